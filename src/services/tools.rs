use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::gemini::{FunctionCall, FunctionDeclaration, FunctionResponse, Tool};
use crate::models::slot::BookingResponse;
use crate::services::slots::SlotStore;

pub const CHECK_AVAILABILITY: &str = "checkAvailability";
pub const BOOK_MEETING: &str = "bookMeeting";

/// Tool schema advertised to the model
pub fn tool_declarations() -> Vec<Tool> {
    vec![Tool {
        function_declarations: vec![
            FunctionDeclaration {
                name: CHECK_AVAILABILITY.to_string(),
                description: "Get a list of available meeting slots for the next few days."
                    .to_string(),
                parameters: json!({
                    "type": "OBJECT",
                    "properties": {}
                }),
            },
            FunctionDeclaration {
                name: BOOK_MEETING.to_string(),
                description: "Book a specific meeting slot.".to_string(),
                parameters: json!({
                    "type": "OBJECT",
                    "properties": {
                        "slotId": {
                            "type": "STRING",
                            "description": "The ID of the meeting slot to book."
                        },
                        "name": {
                            "type": "STRING",
                            "description": "The name of the visitor booking the meeting."
                        },
                        "email": {
                            "type": "STRING",
                            "description": "The email of the visitor (optional)."
                        }
                    },
                    "required": ["slotId", "name"]
                }),
            },
        ],
    }]
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookMeetingArgs {
    slot_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// Outcome of one tool call, keyed by the call it answers
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub call_id: Option<String>,
    pub name: String,
    pub payload: Value,
}

impl ToolResult {
    pub fn is_error(&self) -> bool {
        self.payload.get("error").is_some()
    }

    pub fn into_function_response(self) -> FunctionResponse {
        FunctionResponse {
            id: self.call_id,
            name: self.name,
            response: json!({ "result": self.payload }),
        }
    }
}

/// Executes model tool calls against the slot store
#[derive(Clone)]
pub struct SchedulerTools {
    slots: Arc<SlotStore>,
}

impl SchedulerTools {
    pub fn new(slots: Arc<SlotStore>) -> Self {
        Self { slots }
    }

    pub fn execute(&self, call: &FunctionCall) -> ToolResult {
        info!("Executing tool call {} ({:?})", call.name, call.id);

        let payload = match call.name.as_str() {
            CHECK_AVAILABILITY => json!({ "slots": self.slots.list_available() }),
            BOOK_MEETING => self.book_meeting(call),
            other => {
                warn!("Model requested unknown function: {}", other);
                json!({ "error": "Unknown function" })
            }
        };

        ToolResult {
            call_id: call.id.clone(),
            name: call.name.clone(),
            payload,
        }
    }

    fn book_meeting(&self, call: &FunctionCall) -> Value {
        let args: BookMeetingArgs = match serde_json::from_value(Value::Object(call.args.clone())) {
            Ok(args) => args,
            Err(err) => {
                warn!("Invalid bookMeeting arguments: {}", err);
                return json!({ "error": format!("Invalid arguments: {}", err) });
            }
        };

        info!(
            "Booking requested by {} <{}> for slot {}",
            args.name.as_deref().unwrap_or("anonymous"),
            args.email.as_deref().unwrap_or("no email"),
            args.slot_id
        );

        let response = BookingResponse::from(self.slots.book(&args.slot_id));
        json!({ "success": response.success, "message": response.message })
    }
}
