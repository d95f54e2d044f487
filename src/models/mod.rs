pub mod analysis;
pub mod note;

pub use analysis::*;
pub use note::*;
