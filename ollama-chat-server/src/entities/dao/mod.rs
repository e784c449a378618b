pub mod chat;

pub use chat::{ChatRecord, ChatSummary, Message, NewChat};
