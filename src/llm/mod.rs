pub mod analyzer;
pub mod client;
pub mod prompts;

pub use analyzer::*;
pub use client::*;
pub use prompts::*;
