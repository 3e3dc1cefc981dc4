//! Mock provider for testing
//!
//! Returns configurable resolutions without touching the network.
//! Used by renderer tests to pin down dispatch and substitution behavior.

use super::{Provider, Resolution};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Mock provider that returns predefined resolutions
pub struct MockProvider {
    /// Service name to answer for
    name: String,
    /// Queue of resolutions to return (FIFO)
    resolutions: Arc<Mutex<Vec<Resolution>>>,
    /// Default when the queue is empty
    default: Resolution,
    /// Every parameter string this provider was asked to resolve
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a mock answering for `name` with an echoing default
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolutions: Arc::new(Mutex::new(vec![])),
            default: Resolution::Value("mock value".to_string()),
            requests: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Create with a queue of resolutions
    pub fn with_resolutions(name: impl Into<String>, resolutions: Vec<Resolution>) -> Self {
        Self {
            resolutions: Arc::new(Mutex::new(resolutions)),
            ..Self::new(name)
        }
    }

    /// Set the default resolution used when the queue is empty
    pub fn with_default(mut self, default: Resolution) -> Self {
        self.default = default;
        self
    }

    /// Parameter strings of every resolve call, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Handle to the request log that survives moving the mock into a
    /// renderer
    pub fn request_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn resolve(&self, param: &str) -> Resolution {
        self.requests.lock().unwrap().push(param.to_string());

        let mut queue = self.resolutions.lock().unwrap();
        if queue.is_empty() {
            self.default.clone()
        } else {
            queue.remove(0)
        }
    }
}
