use std::collections::VecDeque;

use crate::{MessageId, RequestId};

pub const REUPLOAD_REQUIRED: &str = "Failed to respond. Try reuploading the document.";
pub const FETCH_FAILED: &str = "Failed to fetch response. Please try again.";
pub const FALLBACK_FAILURE: &str = "Something went wrong.";

/// One entry of the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub content: String,
    pub is_response: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatPhase {
    #[default]
    Idle,
    Pending,
    IdleWithError,
}

/// Why a backend request did not produce a usable result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// The backend answered with a non-2xx status. `error` is the `error`
    /// field of the JSON body when one could be read.
    Rejected { error: Option<String> },
    /// The request never completed or the reply could not be decoded.
    Transport { message: Option<String> },
}

/// Maps a failed question to the text shown to the user.
pub fn chat_failure_message(failure: &RequestFailure) -> String {
    match failure {
        RequestFailure::Rejected { error } => {
            let dimensions = error
                .as_deref()
                .is_some_and(|text| text.contains("dimensions"));
            if dimensions {
                REUPLOAD_REQUIRED.to_string()
            } else {
                FETCH_FAILED.to_string()
            }
        }
        RequestFailure::Transport { message } => transport_message(message.as_deref()),
    }
}

pub(crate) fn transport_message(message: Option<&str>) -> String {
    match message {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => FALLBACK_FAILURE.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ChatState {
    input: String,
    transcript: Vec<ChatMessage>,
    queued: VecDeque<String>,
    in_flight: Option<RequestId>,
    error: Option<String>,
    generation: u64,
}

impl ChatState {
    pub(crate) fn phase(&self) -> ChatPhase {
        if self.in_flight.is_some() {
            ChatPhase::Pending
        } else if self.error.is_some() {
            ChatPhase::IdleWithError
        } else {
            ChatPhase::Idle
        }
    }

    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
    }

    pub(crate) fn clear_input(&mut self) {
        self.input.clear();
    }

    pub(crate) fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn queued_len(&self) -> usize {
        self.queued.len()
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub(crate) fn push(&mut self, message: ChatMessage) {
        self.transcript.push(message);
    }

    pub(crate) fn enqueue(&mut self, question: String) {
        self.queued.push_back(question);
    }

    pub(crate) fn pop_queued(&mut self) -> Option<String> {
        self.queued.pop_front()
    }

    pub(crate) fn begin(&mut self, request_id: RequestId) {
        self.in_flight = Some(request_id);
    }

    /// True when `request_id` is the request this transcript is waiting on.
    pub(crate) fn accepts(&self, request_id: RequestId) -> bool {
        self.in_flight == Some(request_id)
    }

    pub(crate) fn finish(&mut self) {
        self.in_flight = None;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.error = Some(message);
    }

    pub(crate) fn clear_error(&mut self) -> bool {
        self.error.take().is_some()
    }

    /// Discards the transcript and forgets any in-flight request, so a late
    /// completion no longer matches.
    pub(crate) fn tear_down(&mut self) {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::default()
        };
    }
}
