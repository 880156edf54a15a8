mod error;
mod pagination;

pub use error::*;
pub use pagination::*;
