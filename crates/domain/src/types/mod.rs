//! Domain data types

pub mod telegram;
pub mod twitter;
pub mod user;

pub use telegram::*;
pub use twitter::*;
pub use user::*;
