pub mod bot;
pub mod config;
pub mod conversation;
pub mod types;
pub mod weather;

#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;

pub use bot::{BotError, BotResult, Responder};
pub use config::BotConfig;
pub use conversation::Conversation;
pub use types::{Feedback, Message, Sender};
