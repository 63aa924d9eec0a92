//! Shared test doubles for the compose integration tests.

#![allow(dead_code)]

use animatic_core::{GenerateRequest, GenerateResponse, Output};
use animatic_error::{AnimaticResult, HttpError};
use animatic_interface::{AnimaticDriver, ProgressSink};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use uuid::Uuid;

/// Driver that replays a fixed sequence of responses and records every
/// request it receives.
pub struct ScriptedDriver {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedDriver {
    pub fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(String::from).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AnimaticDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> AnimaticResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(text) => Ok(GenerateResponse {
                outputs: vec![Output::Text(text)],
            }),
            None => Err(HttpError::new("scripted driver ran out of responses").into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Progress sink that records every report, optionally failing each call.
pub struct RecordingSink {
    reports: Mutex<Vec<(Uuid, u8)>>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            reports: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            reports: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn reports(&self) -> Vec<(Uuid, u8)> {
        self.reports.lock().unwrap().clone()
    }

    pub fn percents(&self) -> Vec<u8> {
        self.reports.lock().unwrap().iter().map(|(_, p)| *p).collect()
    }
}

#[async_trait]
impl ProgressSink for RecordingSink {
    async fn report_progress(&self, outline_id: Uuid, percent: u8) -> AnimaticResult<()> {
        self.reports.lock().unwrap().push((outline_id, percent));
        if self.fail {
            Err(HttpError::new("progress endpoint unreachable").into())
        } else {
            Ok(())
        }
    }
}
