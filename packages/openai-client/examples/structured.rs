//! Type-safe structured output
//!
//! Run with: OPENAI_API_KEY=... cargo run -p openai-client --example structured

use openai_client::{Message, OpenAIClient};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
struct Prospect {
    /// Company name
    name: String,
    /// City the company is based in
    location: String,
    /// Rough headcount, e.g. "40-50"
    employees: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct Prospects {
    companies: Vec<Prospect>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = OpenAIClient::from_env()?;

    let text = "KTVB in Boise employs about 120 people. Idaho Press in Nampa has around 60.";
    let prospects: Prospects = client
        .extract(
            "gpt-4o-mini-2024-07-18",
            vec![
                Message::system("Extract every company mentioned in the text."),
                Message::user(text),
            ],
        )
        .await?;

    for company in prospects.companies {
        println!("{} ({}) - {} employees", company.name, company.location, company.employees);
    }

    Ok(())
}
