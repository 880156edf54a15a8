mod cart;
mod list;

pub use cart::*;
pub use list::*;
