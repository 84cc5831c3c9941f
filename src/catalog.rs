mod catalog;
mod content;

pub use catalog::*;
pub use content::*;
