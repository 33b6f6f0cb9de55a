//! Prompts for each LLM step of the deep analysis.

use crate::kernel::SearchHit;

/// Schema name sent with the planning call.
pub const PLAN_SCHEMA_NAME: &str = "analysis_plan";

/// Schema name sent with the final formatting call.
pub const COMPANY_SCHEMA_NAME: &str = "company_list";

/// Only this many hits are handed to the enrichment model.
pub const ENRICHMENT_HIT_LIMIT: usize = 5;

pub fn planning_prompt(query: &str) -> String {
    format!(
        r#"Given this search query: "{query}",
create a 5-8 point search strategy (including all queries) focusing on finding all the right companies.
Not each step must have queries attached, but every step involving searching should have them attached.
When attaching queries, know that these are queries that the model will then run on google to find relevant articles to research further.
When attaching queries, always attach 9-12 of them."#
    )
}

pub fn enrichment_prompt(hits: &[SearchHit]) -> String {
    let top = &hits[..hits.len().min(ENRICHMENT_HIT_LIMIT)];
    let hits_json = serde_json::to_string(top).unwrap_or_else(|_| "[]".to_string());
    format!(
        "Based on these search results, generate a list of potential company leads with detailed information: {}",
        hits_json
    )
}

pub fn formatting_prompt(enriched: &str) -> String {
    format!(
        "Convert this company analysis into a properly formatted JSON array of company objects: {}",
        enriched
    )
}
