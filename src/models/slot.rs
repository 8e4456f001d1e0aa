use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// Display format for slot times, e.g. "Tue, Oct 15, 09:00 AM"
pub const SLOT_TIME_FORMAT: &str = "%a, %b %-d, %I:%M %p";

// A bookable meeting time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingSlot {
    pub id: String,
    pub datetime: NaiveDateTime,
    pub available: bool,
}

impl MeetingSlot {
    pub fn new(id: impl Into<String>, datetime: NaiveDateTime, available: bool) -> Self {
        Self {
            id: id.into(),
            datetime,
            available,
        }
    }

    pub fn view(&self) -> SlotView {
        SlotView {
            id: self.id.clone(),
            time: self.datetime.format(SLOT_TIME_FORMAT).to_string(),
        }
    }
}

// Projection of an available slot handed to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub id: String,
    pub time: String,
}

/// Result of a booking attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOutcome {
    Confirmed,
    Unavailable,
    NotFound,
}

impl BookingOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, BookingOutcome::Confirmed)
    }

    pub fn message(self) -> &'static str {
        match self {
            BookingOutcome::Confirmed => "Booking confirmed.",
            BookingOutcome::Unavailable => "Slot no longer available.",
            BookingOutcome::NotFound => "Slot not found or already booked.",
        }
    }
}

// Response body shared by the booking endpoints and the bookMeeting tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
}

impl From<BookingOutcome> for BookingResponse {
    fn from(outcome: BookingOutcome) -> Self {
        Self {
            success: outcome.is_success(),
            message: outcome.message().to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSlotRequest {
    pub slot_id: String,
}
