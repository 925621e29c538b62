//! Field-level enrichment helpers shared by the aggregation and search
//! use cases. Every lookup degrades to `"Unknown"` instead of failing.

use crate::inventory::domain::UNKNOWN;
use crate::ports::outbound::RemoteClient;
use serde_json::{json, Map, Value};

/// Reads a string-ish field, defaulting to `"Unknown"`.
pub(crate) fn string_field(record: &Value, key: &str) -> Value {
    match record.get(key) {
        Some(Value::Null) | None => json!(UNKNOWN),
        Some(value) => value.clone(),
    }
}

/// Extended type fields carry tenant-specific numeric suffixes (e.g.
/// `os_23001176139`); match on the stable prefix instead.
pub(crate) fn field_by_prefix(fields: &Map<String, Value>, prefix: &str) -> Value {
    fields
        .iter()
        .find(|(key, value)| key.starts_with(prefix) && !value.is_null())
        .map(|(_, value)| value.clone())
        .unwrap_or(json!(UNKNOWN))
}

/// Resolves the asset's department id against the department directory.
pub(crate) fn department_name<C: RemoteClient>(client: &C, asset: &Value) -> Value {
    let Some(department_id) = asset.get("department_id").filter(|v| !v.is_null()) else {
        return json!(UNKNOWN);
    };
    client
        .get_json("departments")
        .and_then(|body| body.get("departments").and_then(Value::as_array).cloned())
        .and_then(|departments| {
            departments
                .iter()
                .find(|d| d.get("id") == Some(department_id))
                .and_then(|d| d.get("name").cloned())
        })
        .unwrap_or(json!(UNKNOWN))
}

/// Shared shape of the by-id name lookups: `{endpoint}/{id}` wrapping the
/// record under a singular field.
pub(crate) fn lookup_name<C: RemoteClient>(
    client: &C,
    asset: &Value,
    id_key: &str,
    endpoint: &str,
    field: &str,
) -> Value {
    let Some(id) = asset.get(id_key).and_then(Value::as_i64) else {
        return json!(UNKNOWN);
    };
    client
        .get_json(&format!("{endpoint}/{id}"))
        .and_then(|body| body.get(field)?.get("name").cloned())
        .unwrap_or(json!(UNKNOWN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_by_prefix_matches_suffixed_keys() {
        let mut fields = Map::new();
        fields.insert("os_23001176139".into(), json!("Windows 11"));
        fields.insert("mac_address_23001176139".into(), json!(null));

        assert_eq!(field_by_prefix(&fields, "os_"), json!("Windows 11"));
        assert_eq!(field_by_prefix(&fields, "mac_address_"), json!(UNKNOWN));
        assert_eq!(field_by_prefix(&fields, "serial_number_"), json!(UNKNOWN));
    }

    #[test]
    fn test_string_field_defaults() {
        let record = json!({"name": "laptop", "description": null});
        assert_eq!(string_field(&record, "name"), json!("laptop"));
        assert_eq!(string_field(&record, "description"), json!(UNKNOWN));
        assert_eq!(string_field(&record, "missing"), json!(UNKNOWN));
    }
}
