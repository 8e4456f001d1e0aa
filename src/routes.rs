use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::api::{
    book_slot, get_availability, get_messages, list_schedule_requests, schedule_request,
    send_chat_message, AppState,
};
use crate::handlers::health::health_check;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let health_route = Router::new().route("/health", get(health_check));

    // Slot and booking form endpoints
    let scheduling_routes = Router::new()
        .route("/api/availability", get(get_availability))
        .route("/api/book", post(book_slot))
        .route("/api/schedule-request", post(schedule_request))
        .route("/api/schedule-requests", get(list_schedule_requests));

    // Chat widget
    let chat_routes = Router::new()
        .route("/api/chat", post(send_chat_message))
        .route("/api/chat/messages", get(get_messages));

    Router::new()
        .merge(health_route)
        .merge(scheduling_routes)
        .merge(chat_routes)
        .with_state(app_state)
}
