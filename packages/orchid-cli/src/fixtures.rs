//! Static data behind `--demo`: the fixed analysis steps and sample companies.

use orchid_core::domains::analysis::models::{
    AnalysisResults, BuyerDetail, CompanyRecord, Influence, Interaction, Outcome, PlanStep,
    Relevance, SourceDetail, Sources,
};

/// Labels shown by the fixed-timer simulation, in order.
pub const ANALYSIS_STEPS: [&str; 6] = [
    "Scanning Idaho market data...",
    "Analyzing company financials...",
    "Evaluating market readiness...",
    "Processing growth indicators...",
    "Calculating opportunity scores...",
    "Preparing final recommendations...",
];

/// What the server works through for a live search.
pub const LIVE_PHASES: [&str; 4] = [
    "Planning search strategy...",
    "Searching for companies...",
    "Analyzing companies...",
    "Preparing final results...",
];

const SHARED_REASONING: &str = "High growth rate combined with recent expansion signals readiness for new solutions. Their tech stack shows gaps in key areas matching your offering.";

struct Seed {
    name: &'static str,
    revenue: &'static str,
    readiness: &'static str,
    location: &'static str,
    growth: &'static str,
    employees: &'static str,
    industry: &'static str,
    logo: &'static str,
    domain: &'static str,
}

const SEEDS: [Seed; 6] = [
    Seed {
        name: "Alpine Tech Solutions",
        revenue: "$2.3M",
        readiness: "87%",
        location: "Boise",
        growth: "+24% YoY",
        employees: "45-50",
        industry: "Software Development",
        logo: "🏔️",
        domain: "alpinetech.com",
    },
    Seed {
        name: "Idaho Innovators Inc",
        revenue: "$1.8M",
        readiness: "92%",
        location: "Meridian",
        growth: "+31% YoY",
        employees: "30-35",
        industry: "Tech Consulting",
        logo: "💡",
        domain: "idahoinnovators.com",
    },
    Seed {
        name: "Gem State Digital",
        revenue: "$3.1M",
        readiness: "85%",
        location: "Nampa",
        growth: "+18% YoY",
        employees: "60-70",
        industry: "Digital Marketing",
        logo: "💎",
        domain: "gemstatedigital.com",
    },
    Seed {
        name: "Mountain Data Systems",
        revenue: "$4.2M",
        readiness: "78%",
        location: "Idaho Falls",
        growth: "+22% YoY",
        employees: "80-90",
        industry: "Data Analytics",
        logo: "📊",
        domain: "mountaindata.com",
    },
    Seed {
        name: "Sawtooth Solutions",
        revenue: "$2.7M",
        readiness: "90%",
        location: "Twin Falls",
        growth: "+28% YoY",
        employees: "40-45",
        industry: "Cloud Services",
        logo: "☁️",
        domain: "sawtoothsolutions.com",
    },
    Seed {
        name: "Cascade Computing",
        revenue: "$1.5M",
        readiness: "95%",
        location: "Pocatello",
        growth: "+35% YoY",
        employees: "25-30",
        industry: "IT Services",
        logo: "🌊",
        domain: "cascadecomputing.com",
    },
];

fn source(kind: &str, url: &str, date: &str, icon: &str) -> SourceDetail {
    SourceDetail {
        kind: kind.to_string(),
        url: url.to_string(),
        date: date.to_string(),
        icon: icon.to_string(),
    }
}

fn company(seed: &Seed) -> CompanyRecord {
    let details = vec![
        source("Website", seed.domain, "2 days ago", "globe"),
        source("Press Release", "PR: Q2 Growth", "Last week", "file-text"),
        source("Blog Post", "Tech Expansion Plans", "2 weeks ago", "link"),
    ];

    CompanyRecord {
        name: seed.name.to_string(),
        revenue: seed.revenue.to_string(),
        readiness: seed.readiness.to_string(),
        location: seed.location.to_string(),
        growth: seed.growth.to_string(),
        employees: seed.employees.to_string(),
        industry: seed.industry.to_string(),
        logo: seed.logo.to_string(),
        sources: Sources {
            count: 4,
            details,
        },
        reasoning: SHARED_REASONING.to_string(),
        tags: ["Series A", "High Growth", "Tech-enabled", "Product-led"]
            .into_iter()
            .map(String::from)
            .collect(),
        interactions: Vec::new(),
        buyers: Vec::new(),
    }
}

fn interaction(kind: &str, date: &str, details: &str, outcome: Outcome) -> Interaction {
    Interaction {
        kind: kind.to_string(),
        date: date.to_string(),
        details: details.to_string(),
        outcome,
    }
}

fn alpine_buyers() -> Vec<BuyerDetail> {
    vec![
        BuyerDetail {
            name: "Sarah Chen".into(),
            role: "Economic Buyer".into(),
            timing: "Q3 budget cycle".into(),
            relevance: Relevance::High,
            title: "VP of Engineering".into(),
            responsibility: "Owns platform tooling budget".into(),
            image_url: None,
            linkedin: Some("sarahchen".into()),
            twitter: None,
            department: Some("Engineering".into()),
            influence: Some(Influence::DecisionMaker),
            last_active: Some("2 days ago".into()),
        },
        BuyerDetail {
            name: "Marcus Webb".into(),
            role: "Technical Evaluator".into(),
            timing: "Evaluating now".into(),
            relevance: Relevance::Medium,
            title: "Lead Architect".into(),
            responsibility: "Runs vendor proofs of concept".into(),
            image_url: None,
            linkedin: Some("marcuswebb".into()),
            twitter: Some("mwebb_builds".into()),
            department: Some("Engineering".into()),
            influence: Some(Influence::Champion),
            last_active: Some("Last week".into()),
        },
    ]
}

/// The six sample companies shown by the simulated search.
pub fn demo_companies() -> Vec<CompanyRecord> {
    let mut companies: Vec<CompanyRecord> = SEEDS.iter().map(company).collect();

    if let Some(alpine) = companies.first_mut() {
        alpine.tags.push("Market Leader".into());
        alpine.interactions = vec![
            interaction(
                "Discovery Call",
                "Mar 12",
                "Walked through current ad-ops tooling",
                Outcome::Positive,
            ),
            interaction(
                "Email",
                "Mar 20",
                "Sent pricing for the team tier",
                Outcome::Pending,
            ),
        ];
        alpine.buyers = alpine_buyers();
    }

    if let Some(innovators) = companies.get_mut(1) {
        innovators.interactions = vec![interaction(
            "Webinar",
            "Feb 28",
            "Two attendees from the consulting practice",
            Outcome::Neutral,
        )];
    }

    companies
}

/// Results envelope for a simulated search.
pub fn demo_results() -> AnalysisResults {
    AnalysisResults {
        steps: ANALYSIS_STEPS
            .iter()
            .enumerate()
            .map(|(i, label)| PlanStep {
                step: i as i64 + 1,
                step_title: label.to_string(),
                queries: Vec::new(),
            })
            .collect(),
        partial_results: Vec::new(),
        companies: demo_companies(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_companies_with_one_fully_populated() {
        let companies = demo_companies();

        assert_eq!(companies.len(), 6);
        assert_eq!(companies[0].buyers.len(), 2);
        assert_eq!(companies[0].tags.len(), 5);
        assert!(companies[5].interactions.is_empty());
    }

    #[test]
    fn results_declare_one_step_per_label() {
        assert_eq!(demo_results().steps.len(), ANALYSIS_STEPS.len());
    }
}
