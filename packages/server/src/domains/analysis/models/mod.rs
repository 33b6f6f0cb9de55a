pub mod company;
pub mod envelope;
pub mod plan;
pub mod progress;

pub use company::*;
pub use envelope::*;
pub use plan::*;
pub use progress::*;
