//! Canned upstream answers for the analysis pipeline.

use orchid_core::domains::analysis::models::{AnalysisPlan, PlanStep};
use orchid_core::kernel::SearchHit;
use serde_json::json;

pub const IDAHO_QUERY: &str = "idaho media companies with more than 25 ad sales employees";

/// A plan with `count` steps, each carrying nine queries.
pub fn plan_with_steps(count: usize) -> AnalysisPlan {
    AnalysisPlan {
        steps: (1..=count)
            .map(|i| PlanStep {
                step: i as i64,
                step_title: format!("Step {i}: research Idaho media segment"),
                queries: (1..=9).map(|q| format!("idaho media query {i}-{q}")).collect(),
            })
            .collect(),
    }
}

pub fn plan_json(count: usize) -> String {
    serde_json::to_string(&plan_with_steps(count)).unwrap()
}

pub fn media_hits(count: usize) -> Vec<SearchHit> {
    (0..count)
        .map(|i| {
            let mut hit = SearchHit::new(
                format!("Idaho media outlet {i}"),
                format!("https://media{i}.example.com"),
            );
            hit.description = Some(format!("Ad sales team of {} people", 20 + i));
            hit
        })
        .collect()
}

/// Formatter output with `count` companies.
pub fn companies_json(count: usize) -> String {
    let companies: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "name": format!("Gem State Media {i}"),
                "revenue": "$8.5M",
                "readiness": "84%",
                "location": "Boise",
                "growth": "+15% YoY",
                "employees": "90-110",
                "industry": "Broadcast Media",
                "logo": "📺",
                "sources": {
                    "count": 1,
                    "details": [{
                        "type": "Website",
                        "url": format!("gemstatemedia{i}.com"),
                        "date": "2 days ago",
                        "icon": "globe"
                    }]
                },
                "reasoning": "Growing ad sales team and recent station acquisitions.",
                "tags": ["Media", "Hiring"]
            })
        })
        .collect();

    json!({ "companies": companies }).to_string()
}
