//! Scripted provider for tests.

use super::{GenerationOutcome, ProviderError, TextProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// What the mock does when called.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Raw(Value),
    Status(u16, String),
    Timeout,
    Panic,
}

/// Mock text provider that replays a fixed reply and remembers prompts.
pub struct MockTextProvider {
    reply: MockReply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockReply::Text(text.into()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn generate(&self, prompt: &str) -> Result<GenerationOutcome, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.reply {
            MockReply::Text(text) => Ok(GenerationOutcome::Parsed(text.clone())),
            MockReply::Raw(payload) => Ok(GenerationOutcome::RawPayload(payload.clone())),
            MockReply::Status(status, body) => Err(ProviderError::Upstream {
                provider: self.name().to_string(),
                status: *status,
                body: body.clone(),
            }),
            MockReply::Timeout => Err(ProviderError::Timeout(self.name().to_string())),
            MockReply::Panic => panic!("mock provider asked to panic"),
        }
    }
}
