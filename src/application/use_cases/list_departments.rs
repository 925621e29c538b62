use crate::ports::outbound::RemoteClient;
use serde_json::Value;

/// ListDepartmentsUseCase - fetches the department directory and returns
/// the names sorted ascending.
pub struct ListDepartmentsUseCase<'a, C> {
    client: &'a C,
}

impl<'a, C: RemoteClient> ListDepartmentsUseCase<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn execute(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .client
            .get_json("departments")
            .and_then(|body| body.get("departments").and_then(Value::as_array).cloned())
            .unwrap_or_default()
            .iter()
            .filter_map(|d| d.get("name").and_then(Value::as_str).map(str::to_string))
            .collect();
        names.sort();
        names
    }
}
