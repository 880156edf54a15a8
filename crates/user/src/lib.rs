pub mod jwt;
pub mod password;
pub mod subscription;

mod command;
mod query;
mod types;

pub use command::*;
pub use query::*;
pub use types::*;
