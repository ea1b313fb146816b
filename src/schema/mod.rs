pub mod message;
pub mod scenario;
pub mod sentiment;
