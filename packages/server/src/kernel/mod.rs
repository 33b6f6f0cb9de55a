//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod claude_function;
pub mod deps;
pub mod test_dependencies;
pub mod traits;
pub mod you_search;

pub use claude_function::ClaudeFunctionClient;
pub use deps::ServerDeps;
pub use test_dependencies::{
    MockChatAI, MockSearchService, MockStructuredAI, StructuredCall, TestDependencies,
};
pub use traits::*;
pub use you_search::YouSearchClient;
