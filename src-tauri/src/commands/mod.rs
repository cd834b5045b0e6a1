pub mod dashboard;
pub mod detection;

pub use dashboard::*;
pub use detection::*;
