//! Deterministic stand-in for the generation capability.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{GenerationCapability, GenerationRequest, LlmError};

/// Returns a canned value (or a canned API failure) and records every call.
pub struct RecordingCapability {
    response: Result<Value, String>,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl RecordingCapability {
    pub fn returning(value: Value) -> Self {
        Self {
            response: Ok(value),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationCapability for RecordingCapability {
    async fn generate_object(&self, request: &GenerationRequest) -> Result<Value, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.response {
            Ok(value) => Ok(value.clone()),
            Err(message) => Err(LlmError::Api {
                status: 500,
                message: message.clone(),
            }),
        }
    }
}
