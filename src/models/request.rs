use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Booking form payload
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleRequestForm {
    pub name: String,
    pub email: String,
    pub topic: String,
}

// Form submission as stored in the CSV file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRequest {
    pub name: String,
    pub email: String,
    pub topic: String,
    pub requested_at: DateTime<Utc>,
}

impl MeetingRequest {
    pub fn from_form(form: ScheduleRequestForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            topic: form.topic,
            requested_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ScheduleRequestResponse {
    pub success: bool,
    pub message: String,
}
