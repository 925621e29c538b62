use crate::inventory::domain::{build_forest, render_forest};
use crate::ports::outbound::RemoteClient;

/// ListLocationsUseCase - fetches every location page and renders the
/// parent/child hierarchy as a text outline.
pub struct ListLocationsUseCase<'a, C> {
    client: &'a C,
}

impl<'a, C: RemoteClient> ListLocationsUseCase<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Returns the rendered outline, one line per location. An empty API
    /// answer renders as no lines.
    pub fn execute(&self) -> Vec<String> {
        let records = self.client.fetch_paginated("locations", "");
        let forest = build_forest(&records);
        render_forest(&forest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::cell::RefCell;

    struct PagedClient {
        pages: RefCell<Vec<Value>>,
    }

    impl RemoteClient for PagedClient {
        fn get_json(&self, _endpoint: &str) -> Option<Value> {
            let mut pages = self.pages.borrow_mut();
            if pages.is_empty() {
                None
            } else {
                Some(pages.remove(0))
            }
        }
    }

    #[test]
    fn test_outline_spans_all_pages() {
        let client = PagedClient {
            pages: RefCell::new(vec![
                json!({"locations": [
                    {"id": 1, "name": "HQ"},
                    {"id": 2, "name": "Floor 1", "parent_location_id": 1},
                ]}),
                json!({"locations": [
                    {"id": 3, "name": "Warehouse"},
                ]}),
                json!({"locations": []}),
            ]),
        };

        let lines = ListLocationsUseCase::new(&client).execute();
        assert_eq!(
            lines,
            vec!["├── HQ", "│   └── Floor 1", "└── Warehouse"]
        );
    }

    #[test]
    fn test_empty_answer_renders_nothing() {
        let client = PagedClient {
            pages: RefCell::new(vec![]),
        };
        assert!(ListLocationsUseCase::new(&client).execute().is_empty());
    }
}
