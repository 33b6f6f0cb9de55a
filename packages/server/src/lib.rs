// Orchid - sales-intelligence API core
//
// Turns a free-text prospecting query into a list of companies by chaining
// a planner LLM, a web search, an enrichment LLM and a schema-constrained
// formatting LLM.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
