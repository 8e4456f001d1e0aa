use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::client::ConversationModel;
use crate::error::{ModelError, TurnError};
use crate::models::chat::{ChatMessage, Role};
use crate::models::gemini::{Content, FunctionResponse, GenerateContentRequest, GenerateContentResponse, Tool};
use crate::services::tools::{tool_declarations, SchedulerTools};
use crate::services::transcript::{Transcript, GREETING};

pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 10;

pub const APOLOGY: &str = "Sorry, I encountered an error connecting to the service.";

pub const SYSTEM_INSTRUCTION: &str = r#"You are "SchedulerBot", an executive assistant for a Senior Software Engineer.
Your goal is to help visitors schedule a 30-minute introductory call.

Rules:
1. Be professional, concise, and helpful.
2. You MUST use the "checkAvailability" tool to find open slots before offering times.
3. You MUST use the "bookMeeting" tool to confirm a reservation.
4. If a user asks about the engineer's skills, refer to the portfolio on the screen but encourage them to book a chat.
5. Only offer slots returned by the tool.
6. When booking, ask for their Name and Email (optional).
"#;

// Why a turn ended in the apology message
#[derive(Error, Debug)]
enum TurnFailure {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Model still requesting tools after {0} rounds")]
    ToolRoundLimit(usize),
}

/// Drives the conversation with the remote model and answers its tool calls
pub struct ChatOrchestrator {
    model: Arc<dyn ConversationModel>,
    tools: SchedulerTools,
    declarations: Vec<Tool>,
    system_instruction: String,
    max_tool_rounds: usize,
    // Held for the whole turn; try_lock failing means a turn is in flight
    history: Mutex<Vec<Content>>,
    transcript: RwLock<Transcript>,
}

impl ChatOrchestrator {
    pub fn new(model: Arc<dyn ConversationModel>, tools: SchedulerTools) -> Self {
        Self {
            model,
            tools,
            declarations: tool_declarations(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            history: Mutex::new(Vec::new()),
            transcript: RwLock::new(Transcript::with_greeting(GREETING)),
        }
    }

    pub fn with_max_tool_rounds(mut self, max_tool_rounds: usize) -> Self {
        self.max_tool_rounds = max_tool_rounds;
        self
    }

    /// Snapshot of the transcript, oldest first
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .messages()
            .to_vec()
    }

    pub fn is_busy(&self) -> bool {
        self.history.try_lock().is_err()
    }

    fn append(&self, role: Role, text: impl Into<String>) -> ChatMessage {
        self.transcript
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .append(role, text)
    }

    /// Run one user turn to completion.
    ///
    /// Returns the messages appended to the transcript by this turn: the
    /// user's message, followed by the model's reply or an apology. Model
    /// failures never surface as errors; only a refused turn does. If the
    /// returned future is dropped mid-turn, the turn is failed the same way.
    pub async fn send_message(&self, text: &str) -> Result<Vec<ChatMessage>, TurnError> {
        if text.trim().is_empty() {
            return Err(TurnError::EmptyMessage);
        }

        let history = self.history.try_lock().map_err(|_| {
            warn!("Rejecting message while a turn is in progress");
            TurnError::Busy
        })?;

        let mut appended = vec![self.append(Role::User, text)];
        let mut turn = PendingTurn::start(history, &self.transcript);
        turn.history.push(Content::user_text(text));

        let outcome = self.run_turn(&mut turn.history).await;
        match outcome {
            Ok(Some(reply)) => {
                turn.finish();
                appended.push(self.append(Role::Model, reply));
            }
            Ok(None) => {
                turn.finish();
                info!("Turn finished without model text");
            }
            Err(err) => {
                error!("Chat turn failed: {}", err);
                appended.push(turn.fail());
            }
        }

        Ok(appended)
    }

    async fn run_turn(&self, history: &mut Vec<Content>) -> Result<Option<String>, TurnFailure> {
        let mut response = self.request(history).await?;
        let mut rounds = 0;

        loop {
            let calls = response.function_calls();
            if calls.is_empty() {
                break;
            }

            if rounds >= self.max_tool_rounds {
                return Err(TurnFailure::ToolRoundLimit(rounds));
            }
            rounds += 1;

            info!("Tool round {}: {} call(s)", rounds, calls.len());
            if let Some(content) = response.content() {
                history.push(content.clone());
            }

            let results: Vec<FunctionResponse> = calls
                .iter()
                .map(|call| self.tools.execute(call))
                .inspect(|result| {
                    if result.is_error() {
                        warn!("Tool {} returned an error payload", result.name);
                    }
                })
                .map(|result| result.into_function_response())
                .collect();

            history.push(Content::function_responses(results));
            response = self.request(history).await?;
        }

        let text = response.text();
        // Contents without parts are rejected by the API on the next request
        if let Some(content) = response.content().filter(|content| !content.parts.is_empty()) {
            history.push(content.clone());
        }

        Ok(text)
    }

    async fn request(&self, history: &[Content]) -> Result<GenerateContentResponse, ModelError> {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::system(&self.system_instruction)),
            contents: history.to_vec(),
            tools: self.declarations.clone(),
        };

        debug!("Dispatching model request with {} history entries", history.len());
        self.model.generate(&request).await
    }
}

// Model history locked for one turn. Unless the turn finishes, the history is
// rolled back to where the turn started and the apology is appended, including
// when the turn's future is dropped before completing.
struct PendingTurn<'a> {
    history: MutexGuard<'a, Vec<Content>>,
    transcript: &'a RwLock<Transcript>,
    checkpoint: usize,
    settled: bool,
}

impl<'a> PendingTurn<'a> {
    fn start(history: MutexGuard<'a, Vec<Content>>, transcript: &'a RwLock<Transcript>) -> Self {
        let checkpoint = history.len();
        Self {
            history,
            transcript,
            checkpoint,
            settled: false,
        }
    }

    fn finish(&mut self) {
        self.settled = true;
    }

    fn fail(&mut self) -> ChatMessage {
        self.settled = true;
        self.history.truncate(self.checkpoint);
        self.transcript
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .append(Role::Model, APOLOGY)
    }
}

impl Drop for PendingTurn<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Chat turn dropped before completion");
            self.fail();
        }
    }
}
