#![allow(dead_code)]

use artypacks_license::{CheckClient, CheckOutcome, LicenseError, LicenseKey, LicenseResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Check client that replays a fixed list of answers, then keeps failing
/// with a gateway error.
pub struct ScriptedClient {
    responses: Mutex<VecDeque<LicenseResult<CheckOutcome>>>,
    delay: Duration,
    calls: AtomicU32,
}

impl ScriptedClient {
    pub fn new(responses: Vec<LicenseResult<CheckOutcome>>) -> Self {
        Self::with_delay(responses, Duration::ZERO)
    }

    pub fn with_delay(responses: Vec<LicenseResult<CheckOutcome>>, delay: Duration) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            delay,
            calls: AtomicU32::new(0),
        }
    }

    pub fn always_failing() -> Self {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CheckClient for ScriptedClient {
    async fn check(&self, _key: &LicenseKey) -> LicenseResult<CheckOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or(Err(LicenseError::Server { status: 503 }))
    }
}

pub fn key(raw: &str) -> LicenseKey {
    LicenseKey::parse(raw).unwrap()
}

pub fn valid(credits: u32) -> LicenseResult<CheckOutcome> {
    Ok(CheckOutcome::Valid {
        credits: Some(credits),
    })
}

pub fn invalid(message: &str) -> LicenseResult<CheckOutcome> {
    Ok(CheckOutcome::Invalid {
        message: Some(message.to_string()),
    })
}

pub fn network_down() -> LicenseResult<CheckOutcome> {
    Err(LicenseError::Network("connection refused".to_string()))
}
