pub mod chat;
pub mod gemini;
pub mod request;
pub mod slot;
