pub mod page;
pub mod publisher;

pub use page::*;
pub use publisher::*;
