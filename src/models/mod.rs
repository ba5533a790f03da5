// Re-export all model types for ease of use

pub mod company;
pub mod query;

pub use company::*;
pub use query::*;
