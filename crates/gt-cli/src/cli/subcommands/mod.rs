pub mod auth;
pub mod key;

pub use auth::AuthCommands;
pub use key::KeyCommands;
