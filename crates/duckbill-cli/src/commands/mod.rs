pub mod chat;
pub mod scenarios;
