//! Shared helpers for router integration tests.

use std::sync::{Arc, Mutex};
use subject_router::{handler_fn, Handler};

/// Shared, appendable record of handler invocations.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, label: impl Into<String>) {
        self.calls
            .lock()
            .expect("lock call log")
            .push(label.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock call log").clone()
    }
}

/// Handler that records `label` and advances the chain unchanged.
pub fn recording_handler(log: &CallLog, label: &'static str) -> Arc<dyn Handler> {
    let log = log.clone();
    handler_fn(move |_message, context, next| {
        let log = log.clone();
        Box::pin(async move {
            log.record(label);
            next.run(context).await
        })
    })
}

/// Handler that records `label` and stops the chain without calling `next`.
#[allow(dead_code)]
pub fn stopping_handler(log: &CallLog, label: &'static str) -> Arc<dyn Handler> {
    let log = log.clone();
    handler_fn(move |_message, context, _next| {
        let log = log.clone();
        Box::pin(async move {
            log.record(label);
            Ok(context)
        })
    })
}
