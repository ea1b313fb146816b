pub mod feedback;
pub mod keywords;
pub mod lexicon;
pub mod scorer;
pub mod session;
