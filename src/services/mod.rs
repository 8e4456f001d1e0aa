pub mod database;
pub mod orchestrator;
pub mod slots;
pub mod tools;
pub mod transcript;
