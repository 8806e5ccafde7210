use std::sync::Mutex;

use async_trait::async_trait;

use super::ChatCompletion;
use crate::error::CallError;
use crate::web::models::{Choice, ChoiceMessage, CompletionResponse, Message};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

enum Outcome {
    Content(Option<String>),
    Timeout,
}

/// Canned upstream that records every call it receives.
pub struct FakeCompletion {
    outcome: Outcome,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeCompletion {
    pub fn replying(content: &str) -> Self {
        Self::with(Outcome::Content(Some(content.to_string())))
    }

    pub fn without_content() -> Self {
        Self::with(Outcome::Content(None))
    }

    pub fn failing() -> Self {
        Self::with(Outcome::Timeout)
    }

    fn with(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for FakeCompletion {
    async fn call(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<CompletionResponse, CallError> {
        self.calls.lock().unwrap().push(RecordedCall {
            messages,
            temperature,
            max_tokens,
        });

        match &self.outcome {
            Outcome::Content(content) => Ok(CompletionResponse {
                choices: Some(vec![Choice {
                    message: Some(ChoiceMessage {
                        content: content.clone(),
                    }),
                }]),
            }),
            Outcome::Timeout => Err(CallError::Timeout(std::time::Duration::from_secs(25))),
        }
    }
}
