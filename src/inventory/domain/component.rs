use crate::shared::{InventoryError, Result};
use serde_json::{Map, Value};

/// Sentinel for a field whose value is missing or could not be fetched.
pub const UNKNOWN: &str = "Unknown";

/// Hardware component categories the API reports.
///
/// The short-code vocabulary (`cpu`, `ram`, `hdd`, `nic`) is a fixed,
/// versioned contract on the CLI surface; any new hardware type must be
/// added here, never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Processor,
    Memory,
    LogicalDrive,
    NetworkAdapter,
}

impl ComponentKind {
    /// The `component_type` value the API uses for this kind.
    pub fn canonical_name(self) -> &'static str {
        match self {
            ComponentKind::Processor => "Processor",
            ComponentKind::Memory => "Memory",
            ComponentKind::LogicalDrive => "Logical Drive",
            ComponentKind::NetworkAdapter => "Network Adapter",
        }
    }

    /// Resolves a CLI short code. An unrecognized code is a user error and
    /// fails the whole call.
    pub fn from_short_code(code: &str) -> Result<Self> {
        match code.to_lowercase().as_str() {
            "cpu" => Ok(ComponentKind::Processor),
            "ram" => Ok(ComponentKind::Memory),
            "hdd" => Ok(ComponentKind::LogicalDrive),
            "nic" => Ok(ComponentKind::NetworkAdapter),
            _ => Err(InventoryError::UnknownComponentType {
                code: code.to_string(),
            }
            .into()),
        }
    }

    /// Translates a list of short codes, failing on the first unknown one.
    pub fn translate_short_codes(codes: &[String]) -> Result<Vec<ComponentKind>> {
        codes.iter().map(|c| Self::from_short_code(c)).collect()
    }
}

/// Reads a raw component's `component_type`, empty when absent.
pub fn component_type(component: &Value) -> &str {
    component
        .get("component_type")
        .and_then(Value::as_str)
        .unwrap_or("")
}

/// Returns the first attribute map under `component_data`, or an empty map
/// when the component carries none. A component without attributes renders
/// as all-fields-Unknown rather than erroring.
pub fn first_attributes(component: &Value) -> Map<String, Value> {
    component
        .get("component_data")
        .and_then(Value::as_array)
        .and_then(|entries| entries.first())
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// Returns every attribute map under `component_data`, in input order.
pub fn attribute_maps(component: &Value) -> Vec<&Map<String, Value>> {
    component
        .get("component_data")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(Value::as_object).collect())
        .unwrap_or_default()
}

/// Clones an attribute, defaulting to `"Unknown"` when absent or null.
pub fn attribute(attributes: &Map<String, Value>, key: &str) -> Value {
    match attributes.get(key) {
        Some(Value::Null) | None => Value::String(UNKNOWN.to_string()),
        Some(value) => value.clone(),
    }
}

/// Renders an attribute value for display strings: strings pass through,
/// numbers print in their JSON form, anything else is `"Unknown"`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_short_code_translation() {
        assert_eq!(
            ComponentKind::from_short_code("cpu").unwrap(),
            ComponentKind::Processor
        );
        assert_eq!(
            ComponentKind::from_short_code("RAM").unwrap(),
            ComponentKind::Memory
        );
        assert_eq!(
            ComponentKind::from_short_code("hdd").unwrap().canonical_name(),
            "Logical Drive"
        );
        assert_eq!(
            ComponentKind::from_short_code("nic").unwrap().canonical_name(),
            "Network Adapter"
        );
    }

    #[test]
    fn test_unknown_short_code_fails_whole_translation() {
        let codes = vec!["cpu".to_string(), "gpu".to_string()];
        let result = ComponentKind::translate_short_codes(&codes);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("gpu"));
    }

    #[test]
    fn test_first_attributes_missing_data_is_empty() {
        let component = json!({"component_type": "Memory"});
        assert!(first_attributes(&component).is_empty());
    }

    #[test]
    fn test_attribute_defaults_to_unknown() {
        let attrs = first_attributes(&json!({
            "component_data": [{"model": "Xeon", "no_of_cores": 8}]
        }));
        assert_eq!(attribute(&attrs, "model"), json!("Xeon"));
        assert_eq!(attribute(&attrs, "no_of_cores"), json!(8));
        assert_eq!(attribute(&attrs, "serial_number"), json!(UNKNOWN));
    }

    #[test]
    fn test_display_value_forms() {
        assert_eq!(display_value(&json!("3200")), "3200");
        assert_eq!(display_value(&json!(16)), "16");
        assert_eq!(display_value(&json!(null)), UNKNOWN);
    }
}
