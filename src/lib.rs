//! Devfolio Scheduler Service
//!
//! Backend for a portfolio site's scheduling chat widget. Visitor messages
//! are forwarded to a Gemini model; when the model asks to check availability
//! or book a meeting, the request is answered locally from an in-memory slot
//! store and the result is handed back until the model replies in text.
//!
//! # Modules
//!
//! - `client`: the `ConversationModel` seam and its Gemini implementation
//! - `services::orchestrator`: the per-turn function-calling loop
//! - `services::slots`: session slot store with atomic booking
//! - `services::database`: CSV store for booking form submissions
//! - `routes` / `handlers`: the axum HTTP surface

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod client_mock;
#[cfg(test)]
mod tests;

pub use client::{ConversationModel, GeminiClient};
pub use config::AppConfig;
pub use handlers::api::AppState;
pub use routes::create_router;
pub use services::orchestrator::ChatOrchestrator;
pub use services::slots::SlotStore;
