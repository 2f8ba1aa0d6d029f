mod config;
mod tokens;
mod user;

pub use self::config::*;
pub use self::tokens::*;
pub use self::user::*;
