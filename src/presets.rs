//! Preset scenario catalog — the fixed templates shipped with the engine.
//!
//! Callers can use these directly, merge them with catalogs loaded from RON
//! files, or ignore them entirely and supply their own scenarios.

use crate::schema::scenario::{Difficulty, Role, Scenario, ScenarioCatalog};

/// The built-in scenario templates, in a stable order.
pub fn preset_scenarios() -> Vec<Scenario> {
    vec![
        customer_service(),
        sales_negotiation(),
        job_interview(),
    ]
}

/// The built-in templates as a catalog, ready for merging with file-loaded
/// scenarios.
pub fn preset_catalog() -> ScenarioCatalog {
    let mut catalog = ScenarioCatalog::default();
    for scenario in preset_scenarios() {
        catalog.insert(scenario);
    }
    catalog
}

fn customer_service() -> Scenario {
    Scenario {
        id: "customer-service".to_string(),
        title: "Customer Service Call".to_string(),
        description: "Handle a frustrated customer whose order arrived damaged."
            .to_string(),
        roles: vec![
            Role {
                id: "customer".to_string(),
                name: "Jordan Reyes".to_string(),
                description: "A customer whose order arrived broken and who wants a quick resolution.".to_string(),
                objectives: vec![
                    "Explain the problem clearly".to_string(),
                    "Ask about replacement options".to_string(),
                    "Stay courteous under frustration".to_string(),
                ],
            },
            Role {
                id: "support-agent".to_string(),
                name: "Sam Okafor".to_string(),
                description: "A support agent empowered to offer refunds or replacements.".to_string(),
                objectives: vec![
                    "De-escalate and acknowledge the issue".to_string(),
                    "Offer a concrete resolution".to_string(),
                ],
            },
        ],
        difficulty: Difficulty::Beginner,
        duration_minutes: 10,
    }
}

fn sales_negotiation() -> Scenario {
    Scenario {
        id: "sales-negotiation".to_string(),
        title: "Sales Negotiation".to_string(),
        description: "Negotiate contract terms with a budget-conscious prospect."
            .to_string(),
        roles: vec![
            Role {
                id: "salesperson".to_string(),
                name: "Priya Nair".to_string(),
                description: "An account executive trying to close an annual contract.".to_string(),
                objectives: vec![
                    "Understand the prospect's constraints".to_string(),
                    "Defend the pricing with value, not discounts".to_string(),
                    "Agree on next steps".to_string(),
                ],
            },
            Role {
                id: "prospect".to_string(),
                name: "Dana Whitfield".to_string(),
                description: "A procurement lead with a fixed budget and two competing offers.".to_string(),
                objectives: vec![
                    "Push for a lower price".to_string(),
                    "Compare against the competing offers".to_string(),
                ],
            },
        ],
        difficulty: Difficulty::Intermediate,
        duration_minutes: 15,
    }
}

fn job_interview() -> Scenario {
    Scenario {
        id: "job-interview".to_string(),
        title: "Job Interview".to_string(),
        description: "A behavioral interview for a team-lead position.".to_string(),
        roles: vec![
            Role {
                id: "candidate".to_string(),
                name: "Alex Moreau".to_string(),
                description: "A candidate with strong individual work but little formal lead experience.".to_string(),
                objectives: vec![
                    "Answer with concrete examples".to_string(),
                    "Ask informed questions about the team".to_string(),
                ],
            },
            Role {
                id: "interviewer".to_string(),
                name: "Robin Castellanos".to_string(),
                description: "An engineering manager probing for leadership signals.".to_string(),
                objectives: vec![
                    "Probe past conflicts and outcomes".to_string(),
                    "Assess coaching instincts".to_string(),
                ],
            },
        ],
        difficulty: Difficulty::Advanced,
        duration_minutes: 30,
    }
}
