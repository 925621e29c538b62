use serde_json::Value;

/// RemoteClient port for the service-desk REST API.
///
/// This port abstracts the authenticated HTTP transport. Implementations
/// issue a GET against an endpoint path (query string included) and return
/// the decoded JSON body, or `None` when the call failed or the resource
/// does not exist. Transient failures are logged by the implementation and
/// never propagate; callers degrade the affected field instead.
pub trait RemoteClient {
    /// Fetches a single endpoint and decodes the response body.
    ///
    /// # Arguments
    /// * `endpoint` - Path relative to the API root, e.g. `assets/42` or
    ///   `locations?page=2`. A leading slash is tolerated.
    ///
    /// # Returns
    /// The decoded JSON document, or `None` on any failure.
    fn get_json(&self, endpoint: &str) -> Option<Value>;

    /// Fetches every page of a paginated collection endpoint.
    ///
    /// Starting at page 1, requests `endpoint{extra_query}{sep}page=N` and
    /// concatenates the array stored under the endpoint's pagination field
    /// (see [`paginated_field_name`]). Stops at the first page where that
    /// array is absent or empty; a failed request is treated the same way.
    /// Ordering is page order then within-page order, with no deduplication.
    ///
    /// There is no page cap beyond empty-page termination: an API that never
    /// returns an empty page iterates unboundedly.
    fn fetch_paginated(&self, endpoint: &str, extra_query: &str) -> Vec<Value> {
        let field = paginated_field_name(endpoint);
        let separator = if endpoint.contains('?') || extra_query.contains('?') {
            '&'
        } else {
            '?'
        };

        let mut all_records = Vec::new();
        let mut page: u32 = 1;
        loop {
            let url = format!("{endpoint}{extra_query}{separator}page={page}");
            let Some(body) = self.get_json(&url) else {
                break;
            };
            match body.get(field).and_then(Value::as_array) {
                Some(records) if !records.is_empty() => {
                    all_records.extend(records.iter().cloned());
                    page += 1;
                }
                _ => break,
            }
        }
        all_records
    }
}

/// Returns the field name a paginated endpoint stores its records under:
/// the first path segment, e.g. `assets` for `assets?query=...` and
/// `locations` for `locations/123`.
pub fn paginated_field_name(endpoint: &str) -> &str {
    endpoint
        .trim_start_matches('/')
        .split(['/', '?'])
        .next()
        .unwrap_or(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    /// Mock client that serves a scripted sequence of pages and records
    /// every endpoint it was asked for.
    struct PagedClient {
        pages: Vec<Value>,
        calls: RefCell<Vec<String>>,
    }

    impl RemoteClient for PagedClient {
        fn get_json(&self, endpoint: &str) -> Option<Value> {
            self.calls.borrow_mut().push(endpoint.to_string());
            let index = self.calls.borrow().len() - 1;
            self.pages.get(index).cloned()
        }
    }

    #[test]
    fn test_paginated_field_name_first_segment() {
        assert_eq!(paginated_field_name("assets"), "assets");
        assert_eq!(paginated_field_name("assets/42/components"), "assets");
        assert_eq!(paginated_field_name("locations?query=x"), "locations");
        assert_eq!(paginated_field_name("/departments"), "departments");
    }

    #[test]
    fn test_fetch_paginated_stops_on_empty_page() {
        let client = PagedClient {
            pages: vec![
                json!({"assets": [{"id": 1}, {"id": 2}]}),
                json!({"assets": [{"id": 3}]}),
                json!({"assets": []}),
            ],
            calls: RefCell::new(Vec::new()),
        };

        let records = client.fetch_paginated("assets", "");
        assert_eq!(records.len(), 3);
        assert_eq!(records[2]["id"], 3);
        // exactly three calls: two full pages plus the terminating empty one
        let calls = client.calls.borrow();
        assert_eq!(
            *calls,
            vec!["assets?page=1", "assets?page=2", "assets?page=3"]
        );
    }

    #[test]
    fn test_fetch_paginated_stops_on_missing_field() {
        let client = PagedClient {
            pages: vec![json!({"locations": [{"id": 1}]}), json!({"other": []})],
            calls: RefCell::new(Vec::new()),
        };
        let records = client.fetch_paginated("locations", "");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_fetch_paginated_failed_request_ends_pagination() {
        let client = PagedClient {
            pages: vec![json!({"assets": [{"id": 1}]})],
            calls: RefCell::new(Vec::new()),
        };
        let records = client.fetch_paginated("assets", "");
        assert_eq!(records.len(), 1);
        assert_eq!(client.calls.borrow().len(), 2);
    }

    #[test]
    fn test_fetch_paginated_appends_with_ampersand_after_query() {
        let client = PagedClient {
            pages: vec![json!({"assets": []})],
            calls: RefCell::new(Vec::new()),
        };
        client.fetch_paginated("assets", "?query=\"user_id:7\"");
        assert_eq!(
            client.calls.borrow()[0],
            "assets?query=\"user_id:7\"&page=1"
        );
    }
}
