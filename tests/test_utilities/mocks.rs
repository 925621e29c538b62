use asset_inventory::ports::outbound::{ProgressReporter, RemoteClient};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// Mock remote client serving canned responses per endpoint and recording
/// every request it receives.
pub struct MockRemoteClient {
    routes: HashMap<String, Value>,
    calls: RefCell<Vec<String>>,
}

impl MockRemoteClient {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_route(mut self, endpoint: &str, body: Value) -> Self {
        self.routes.insert(endpoint.to_string(), body);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.as_str() == endpoint)
            .count()
    }
}

impl RemoteClient for MockRemoteClient {
    fn get_json(&self, endpoint: &str) -> Option<Value> {
        self.calls.borrow_mut().push(endpoint.to_string());
        self.routes.get(endpoint).cloned()
    }
}

/// Mock progress reporter capturing everything it is told.
pub struct MockProgressReporter {
    pub messages: RefCell<Vec<String>>,
    pub errors: RefCell<Vec<String>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self {
            messages: RefCell::new(Vec::new()),
            errors: RefCell::new(Vec::new()),
        }
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}

    fn report_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
