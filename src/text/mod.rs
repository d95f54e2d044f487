pub mod json_extract;
pub mod normalize;

pub use json_extract::*;
pub use normalize::*;
