#![allow(dead_code)]

use artypacks_api::{ApiError, ApiResult, Conversion, ConvertClient};
use artypacks_gate::{Gate, GateConfig};
use artypacks_license::{CheckClient, CheckOutcome, LicenseError, LicenseKey, LicenseResult};
use artypacks_types::SelectedFile;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// How the fake check endpoint answers one key.
#[derive(Clone)]
pub struct Answer {
    pub delay: Duration,
    pub outcome: Option<CheckOutcome>,
}

impl Answer {
    pub fn valid(credits: u32) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Some(CheckOutcome::Valid {
                credits: Some(credits),
            }),
        }
    }

    pub fn invalid(message: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Some(CheckOutcome::Invalid {
                message: Some(message.to_string()),
            }),
        }
    }

    /// Always answers with a gateway error.
    pub fn down() -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: None,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Check endpoint fake. Each key has a queue of answers; the last one
/// repeats once the queue is down to a single entry.
#[derive(Default)]
pub struct FakeChecker {
    answers: Mutex<HashMap<String, VecDeque<Answer>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeChecker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn answer(&self, key: &str, answers: Vec<Answer>) {
        self.answers
            .lock()
            .unwrap()
            .insert(key.to_string(), answers.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CheckClient for FakeChecker {
    async fn check(&self, key: &LicenseKey) -> LicenseResult<CheckOutcome> {
        self.calls.lock().unwrap().push(key.as_str().to_string());
        let answer = {
            let mut answers = self.answers.lock().unwrap();
            match answers.get_mut(key.as_str()) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };
        let answer = answer.unwrap_or_else(|| Answer::invalid("Unknown key."));
        if !answer.delay.is_zero() {
            tokio::time::sleep(answer.delay).await;
        }
        answer.outcome.ok_or(LicenseError::Server { status: 500 })
    }
}

/// Conversion endpoint fake.
pub struct FakeConverter {
    results: Mutex<VecDeque<ApiResult<Conversion>>>,
    delay: Duration,
    uploads: Mutex<Vec<Vec<String>>>,
}

impl FakeConverter {
    pub fn new(results: Vec<ApiResult<Conversion>>) -> Arc<Self> {
        Self::with_delay(results, Duration::ZERO)
    }

    pub fn with_delay(results: Vec<ApiResult<Conversion>>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            results: Mutex::new(results.into()),
            delay,
            uploads: Mutex::new(Vec::new()),
        })
    }

    pub fn uploads(&self) -> Vec<Vec<String>> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConvertClient for FakeConverter {
    async fn convert(
        &self,
        _key: &LicenseKey,
        files: &[SelectedFile],
        token: &CancellationToken,
    ) -> ApiResult<Conversion> {
        self.uploads
            .lock()
            .unwrap()
            .push(files.iter().map(|f| f.name().to_string()).collect());
        tokio::select! {
            _ = token.cancelled() => return Err(ApiError::Cancelled),
            _ = tokio::time::sleep(self.delay) => {}
        }
        let next = self.results.lock().unwrap().pop_front();
        next.unwrap_or_else(|| {
            Err(ApiError::Rejected {
                status: 500,
                message: "Conversion failed.".to_string(),
            })
        })
    }
}

pub fn done(url: &str) -> ApiResult<Conversion> {
    Ok(Conversion {
        download_url: url.to_string(),
    })
}

pub fn brushset(name: &str) -> SelectedFile {
    SelectedFile::new(name, vec![0u8; 32])
}

pub fn gate(checker: Arc<FakeChecker>, converter: Arc<FakeConverter>) -> Gate {
    Gate::new(checker, converter, GateConfig::default())
}
