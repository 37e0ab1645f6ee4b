pub mod chat;
pub mod interaction;
pub mod weather;
