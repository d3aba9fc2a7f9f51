pub mod auth;
pub mod chat;
pub mod dispatch;
pub mod export;
pub mod history;
pub mod key;
pub mod manual;
pub mod status;
pub mod suggestions;
pub mod trace;
