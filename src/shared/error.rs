use std::path::PathBuf;
use thiserror::Error;

/// Application-specific errors for asset aggregation.
///
/// Uses thiserror to derive Display and Error traits automatically.
/// Only the conditions that must abort a run are modeled here; transient
/// network failures and missing lookups degrade inside the callers and
/// never surface as errors (see the caching and aggregation layers).
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Missing credential: environment variable {var} is not set\n\n💡 Hint: export {var} or provide it via the config file")]
    MissingCredentials { var: String },

    #[error("Unknown component type '{code}'\n\n💡 Hint: valid short codes are cpu, ram, hdd and nic")]
    UnknownComponentType { code: String },

    #[error("Failed to create cache directory: {path}\nDetails: {details}\n\n💡 Hint: Check that the parent directory exists and is writable")]
    CacheInit { path: PathBuf, details: String },

    #[error("No valid asset IDs found in '{input}'\n\n💡 Hint: pass comma-separated IDs, ranges like 140-150, or a file containing them")]
    EmptyIdSpec { input: String },

    #[error("Full name '{input}' must include both a first and a last name\n\n💡 Hint: quote the whole name, e.g. --search-user \"Ada Lovelace\"")]
    IncompleteFullName { input: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_component_type_display() {
        let err = InventoryError::UnknownComponentType {
            code: "gpu".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("gpu"));
        assert!(msg.contains("cpu, ram, hdd and nic"));
    }

    #[test]
    fn test_missing_credentials_display() {
        let err = InventoryError::MissingCredentials {
            var: "SERVICEDESK_API_KEY".to_string(),
        };
        assert!(err.to_string().contains("SERVICEDESK_API_KEY"));
    }

    #[test]
    fn test_cache_init_display() {
        let err = InventoryError::CacheInit {
            path: PathBuf::from("/nope/cache"),
            details: "permission denied".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nope/cache"));
        assert!(msg.contains("permission denied"));
    }
}
