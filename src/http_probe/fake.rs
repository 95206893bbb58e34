//! Scripted [`Transport`] for tests. Delays run on the tokio clock, so
//! tests using `start_paused = true` get exact, instantaneous timing.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::result::FailureKind;
use super::transport::{Transport, TransportError};

#[derive(Debug, Clone)]
pub enum Step {
    Respond(Duration),
    Fail(Duration, FailureKind, &'static str),
}

/// Answers each URL according to its script. The last step of a script
/// repeats for every further attempt; unknown URLs fail immediately.
#[derive(Debug, Default)]
pub struct FakeTransport {
    scripts: Mutex<HashMap<String, VecDeque<Step>>>,
    calls: Mutex<HashMap<String, u32>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, url: &str, steps: Vec<Step>) -> Self {
        self.scripts
            .lock()
            .expect("scripts lock")
            .insert(url.to_owned(), steps.into());
        self
    }

    pub fn respond(self, url: &str, delay: Duration) -> Self {
        self.script(url, vec![Step::Respond(delay)])
    }

    pub fn fail(self, url: &str, delay: Duration, kind: FailureKind, detail: &'static str) -> Self {
        self.script(url, vec![Step::Fail(delay, kind, detail)])
    }

    pub fn calls(&self, url: &str) -> u32 {
        self.calls
            .lock()
            .expect("calls lock")
            .get(url)
            .copied()
            .unwrap_or(0)
    }

    fn next_step(&self, url: &str) -> Step {
        *self
            .calls
            .lock()
            .expect("calls lock")
            .entry(url.to_owned())
            .or_insert(0) += 1;

        let mut scripts = self.scripts.lock().expect("scripts lock");
        match scripts.get_mut(url) {
            Some(steps) if steps.len() > 1 => steps.pop_front().expect("non-empty script"),
            Some(steps) => steps
                .front()
                .cloned()
                .unwrap_or(Step::Fail(Duration::ZERO, FailureKind::NetworkError, "empty script")),
            None => Step::Fail(Duration::ZERO, FailureKind::NetworkError, "no route to host"),
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn fetch_headers(&self, url: &str) -> Result<(), TransportError> {
        let step = self.next_step(url);
        match step {
            Step::Respond(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            Step::Fail(delay, kind, detail) => {
                tokio::time::sleep(delay).await;
                Err(TransportError::new(kind, detail))
            }
        }
    }
}
