#![allow(dead_code, unreachable_pub)]

use mgate_negotiation::{ContentNegotiator, SerializationContext, SerializationEngine};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Serialize { format: String, groups: Vec<String>, max_depth_checks: bool },
    Deserialize { format: String, body: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockError(pub String);

impl fmt::Display for MockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mock engine failed: {}", self.0)
    }
}

impl std::error::Error for MockError {}

/// Engine writing `<format>:<json>` and reading plain JSON, recording every call.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<Call>>,
    fail: bool,
}

impl RecordingEngine {
    pub fn failing() -> Self {
        Self { calls: Mutex::default(), fail: true }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl SerializationEngine for RecordingEngine {
    type Error = MockError;

    fn serialize<T: Serialize + ?Sized>(
        &self,
        value: &T,
        format: &str,
        context: &SerializationContext,
    ) -> Result<String, Self::Error> {
        self.calls.lock().unwrap().push(Call::Serialize {
            format: format.to_owned(),
            groups: context.groups().to_vec(),
            max_depth_checks: context.max_depth_checks_enabled(),
        });
        if self.fail {
            return Err(MockError("serialize".to_owned()));
        }
        let json = serde_json::to_string(value).map_err(|e| MockError(e.to_string()))?;
        Ok(format!("{format}:{json}"))
    }

    fn deserialize<T: DeserializeOwned>(&self, body: &str, format: &str) -> Result<T, Self::Error> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Deserialize { format: format.to_owned(), body: body.to_owned() });
        if self.fail {
            return Err(MockError("deserialize".to_owned()));
        }
        serde_json::from_str(body).map_err(|e| MockError(e.to_string()))
    }
}

pub fn negotiator() -> ContentNegotiator<RecordingEngine> {
    ContentNegotiator::builder().engine(RecordingEngine::default()).build().unwrap()
}
