use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::client::{ConversationModel, MockConversationModel};
use crate::error::ModelError;
use crate::models::gemini::{FunctionCall, GenerateContentRequest, GenerateContentResponse, Part};
use crate::models::slot::MeetingSlot;

pub type Reply = Result<GenerateContentResponse, ModelError>;

// Requests the mock has received, in order
pub type RequestLog = Arc<Mutex<Vec<GenerateContentRequest>>>;

pub fn text_reply(text: &str) -> Reply {
    Ok(GenerateContentResponse::from_parts(vec![Part::text(text)]))
}

pub fn tool_call(id: &str, name: &str, args: Value) -> FunctionCall {
    let args = match args {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    FunctionCall {
        id: Some(id.to_string()),
        name: name.to_string(),
        args,
    }
}

pub fn tool_reply(calls: Vec<FunctionCall>) -> Reply {
    Ok(GenerateContentResponse::from_parts(
        calls.into_iter().map(Part::function_call).collect(),
    ))
}

pub fn failing_reply() -> Reply {
    Err(ModelError::Api {
        status: 503,
        body: "service unavailable".to_string(),
    })
}

// Set up a mock model that plays back the given replies in order and
// records every request it receives
pub fn setup_scripted_model(replies: Vec<Reply>) -> (MockConversationModel, RequestLog) {
    let script = Arc::new(Mutex::new(VecDeque::from(replies)));
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let log_ref = Arc::clone(&log);

    let mut mock_model = MockConversationModel::new();
    mock_model.expect_generate().returning(move |request| {
        log_ref.lock().unwrap().push(request.clone());
        script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::NoCandidates))
    });

    (mock_model, log)
}

// A model that asks for a tool on every reply
pub fn setup_looping_model(name: &str) -> (MockConversationModel, RequestLog) {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let log_ref = Arc::clone(&log);
    let name = name.to_string();

    let mut mock_model = MockConversationModel::new();
    mock_model.expect_generate().returning(move |request| {
        let mut requests = log_ref.lock().unwrap();
        requests.push(request.clone());
        let id = format!("call-{}", requests.len());
        tool_reply(vec![tool_call(&id, &name, Value::Object(Map::new()))])
    });

    (mock_model, log)
}

// Model that blocks until `gate` is notified, to hold a turn open
pub struct GatedModel {
    pub gate: Arc<Notify>,
}

#[async_trait]
impl ConversationModel for GatedModel {
    async fn generate(
        &self,
        _request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ModelError> {
        self.gate.notified().await;
        text_reply("done")
    }
}

// Model whose first call never returns; later calls are logged and answered
pub struct StallingModel {
    pub log: RequestLog,
}

#[async_trait]
impl ConversationModel for StallingModel {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ModelError> {
        let first = {
            let mut requests = self.log.lock().unwrap();
            requests.push(request.clone());
            requests.len() == 1
        };
        if first {
            std::future::pending::<()>().await;
        }
        text_reply("back again")
    }
}

pub fn slot_at(id: &str, date: NaiveDate, hour: u32, available: bool) -> MeetingSlot {
    MeetingSlot::new(
        id,
        NaiveDateTime::new(date, NaiveTime::from_hms_opt(hour, 0, 0).unwrap()),
        available,
    )
}

// Slots from the booking scenarios: "1-0" open, "1-1" taken, "1-2" open
pub fn sample_slots() -> Vec<MeetingSlot> {
    let date = NaiveDate::from_ymd_opt(2035, 3, 30).unwrap();
    vec![
        slot_at("1-0", date, 9, true),
        slot_at("1-1", date, 11, false),
        slot_at("1-2", date, 13, true),
    ]
}
