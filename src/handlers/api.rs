use axum::{
    extract::{Json as ExtractJson, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::TurnError;
use crate::models::chat::{ChatMessage, ChatRequest, ChatResponse};
use crate::models::request::{MeetingRequest, ScheduleRequestForm, ScheduleRequestResponse};
use crate::models::slot::{BookSlotRequest, BookingResponse, MeetingSlot};
use crate::services::database::MeetingRequestStore;
use crate::services::orchestrator::ChatOrchestrator;
use crate::services::slots::SlotStore;

// AppState struct containing shared resources
pub struct AppState {
    pub orchestrator: Arc<ChatOrchestrator>,
    pub slots: Arc<SlotStore>,
    pub requests: Arc<MeetingRequestStore>,
}

// List every slot with its availability flag
pub async fn get_availability(State(state): State<Arc<AppState>>) -> Json<Vec<MeetingSlot>> {
    let slots = state.slots.all();
    info!("Returning {} slots", slots.len());
    Json(slots)
}

// Book a slot directly, outside of the chat flow
pub async fn book_slot(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<BookSlotRequest>,
) -> Json<BookingResponse> {
    info!("Received request to book slot {}", request.slot_id);
    Json(BookingResponse::from(state.slots.book(&request.slot_id)))
}

// Booking form submission
pub async fn schedule_request(
    State(state): State<Arc<AppState>>,
    ExtractJson(form): ExtractJson<ScheduleRequestForm>,
) -> Json<ScheduleRequestResponse> {
    info!("Received schedule request from {} <{}>", form.name, form.email);

    let request = MeetingRequest::from_form(form);
    match state.requests.store(&request) {
        Ok(()) => Json(ScheduleRequestResponse {
            success: true,
            message: "Request saved to database".to_string(),
        }),
        Err(err) => {
            error!("Failed to store meeting request: {}", err);
            Json(ScheduleRequestResponse {
                success: false,
                message: format!("Database error: {}", err),
            })
        }
    }
}

// Stored booking form submissions
pub async fn list_schedule_requests(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MeetingRequest>>, StatusCode> {
    match state.requests.list() {
        Ok(requests) => {
            info!("Returning {} meeting requests", requests.len());
            Ok(Json(requests))
        }
        Err(err) => {
            error!("Failed to read meeting requests: {}", err);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

// Full transcript, oldest first
pub async fn get_messages(State(state): State<Arc<AppState>>) -> Json<Vec<ChatMessage>> {
    Json(state.orchestrator.transcript())
}

// Run one chat turn. The turn runs on its own task so that a dropped
// connection or the request timeout cannot stop it halfway.
pub async fn send_chat_message(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<ChatRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    info!("Received chat message ({} chars)", request.message.len());

    let orchestrator = Arc::clone(&state.orchestrator);
    let turn = tokio::spawn(async move { orchestrator.send_message(&request.message).await });

    match turn.await {
        Ok(Ok(messages)) => Ok(Json(ChatResponse { messages })),
        Ok(Err(TurnError::EmptyMessage)) => {
            warn!("Ignoring empty chat message");
            Err(StatusCode::BAD_REQUEST)
        }
        Ok(Err(TurnError::Busy)) => Err(StatusCode::CONFLICT),
        Err(err) => {
            error!("Chat turn task failed: {}", err);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
