pub mod content;
pub mod types;
pub mod version;

pub use content::*;
pub use version::*;
