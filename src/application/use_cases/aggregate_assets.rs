use crate::application::dto::{AggregateRequest, EnrichmentOptions};
use crate::application::use_cases::enrichment::{
    department_name, field_by_prefix, lookup_name, string_field,
};
use crate::inventory::services::{reconcile, ReconcileOptions};
use crate::ports::outbound::{ProgressReporter, RemoteClient};
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// AggregateAssetsUseCase - assembles one flat result record per asset.
///
/// For each asset ID the base record is fetched; every enabled enrichment
/// then merges its keys into the result. A sub-lookup that fails degrades
/// its field(s) to `"Unknown"` — partial success is the default outcome.
/// An asset that does not exist is logged and skipped, never aborting the
/// batch.
///
/// # Type Parameters
/// * `C` - RemoteClient implementation (typically the caching decorator)
/// * `PR` - ProgressReporter implementation
pub struct AggregateAssetsUseCase<'a, C, PR> {
    client: &'a C,
    reporter: &'a PR,
    cancel: Option<&'a AtomicBool>,
}

impl<'a, C, PR> AggregateAssetsUseCase<'a, C, PR>
where
    C: RemoteClient,
    PR: ProgressReporter,
{
    pub fn new(client: &'a C, reporter: &'a PR) -> Self {
        Self {
            client,
            reporter,
            cancel: None,
        }
    }

    /// Registers a cancellation flag checked between assets. Results are
    /// only ever committed per whole asset; there is no mid-asset stop.
    pub fn with_cancel_flag(mut self, cancel: &'a AtomicBool) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Processes the whole batch sequentially, in input order.
    pub fn execute(&self, request: &AggregateRequest) -> Vec<Map<String, Value>> {
        let total = request.asset_ids.len();
        let started = Instant::now();
        let mut durations: Vec<f64> = Vec::new();
        let mut results = Vec::new();

        for (index, &asset_id) in request.asset_ids.iter().enumerate() {
            if let Some(cancel) = self.cancel {
                if cancel.load(Ordering::SeqCst) {
                    self.reporter
                        .report_error(&format!("Cancelled after {index} of {total} assets"));
                    break;
                }
            }

            self.reporter
                .report_progress(index + 1, total, Some(&format!("asset {asset_id}")));

            let asset_started = Instant::now();
            match self.aggregate(asset_id, &request.options) {
                Some(result) => {
                    durations.push(asset_started.elapsed().as_secs_f64());
                    results.push(result);
                }
                None => self
                    .reporter
                    .report_error(&format!("Asset {asset_id} not found, skipping")),
            }
        }

        let elapsed = started.elapsed().as_secs_f64();
        let mut summary = format!(
            "✓ Processed {} of {} assets in {:.1}s",
            results.len(),
            total,
            elapsed
        );
        if !durations.is_empty() {
            let avg = durations.iter().sum::<f64>() / durations.len() as f64;
            let fastest = durations.iter().cloned().fold(f64::INFINITY, f64::min);
            let slowest = durations.iter().cloned().fold(0.0, f64::max);
            summary.push_str(&format!(
                " (avg {avg:.1}s, fastest {fastest:.1}s, slowest {slowest:.1}s)"
            ));
        }
        self.reporter.report_completion(&summary);

        results
    }

    /// Aggregates a single asset, or `None` when the base record does not
    /// exist.
    pub fn aggregate(&self, asset_id: u64, options: &EnrichmentOptions) -> Option<Map<String, Value>> {
        let asset = self.fetch_asset(asset_id)?;

        let mut result = Map::new();
        result.insert(
            "display_id".into(),
            asset.get("display_id").cloned().unwrap_or(Value::Null),
        );
        result.insert("name".into(), string_field(&asset, "name"));

        if let Some(kinds) = &options.components {
            let raw = self
                .client
                .get_json(&format!("assets/{asset_id}/components"))
                .and_then(|body| body.get("components").and_then(Value::as_array).cloned())
                .unwrap_or_default();
            let reconcile_options = ReconcileOptions {
                requested: Some(kinds.clone()),
                combine_cpu_ram: options.combine_cpu_ram,
                join_ram: !options.disable_join,
            };
            let rows = reconcile(&raw, &reconcile_options);
            if let Some(first) = rows.into_iter().next() {
                result.extend(first);
            }
        }

        if options.department {
            result.insert("department".into(), department_name(self.client, &asset));
        }
        if options.asset_type {
            result.insert(
                "asset_type".into(),
                lookup_name(self.client, &asset, "asset_type_id", "asset_types", "asset_type"),
            );
        }
        if options.location {
            result.insert(
                "location".into(),
                lookup_name(self.client, &asset, "location_id", "locations", "location"),
            );
        }
        if options.user {
            result.insert("user".into(), self.user_details(&asset));
        }

        if options.wants_type_fields() {
            // one lookup serves all four extended fields
            let fields = self.extended_type_fields(asset_id);
            if options.system_os {
                result.insert("system_os".into(), field_by_prefix(&fields, "os_"));
            }
            if options.machine_ip {
                result.insert(
                    "machine_ip".into(),
                    field_by_prefix(&fields, "computer_ip_address_"),
                );
            }
            if options.machine_mac {
                result.insert("machine_mac".into(), field_by_prefix(&fields, "mac_address_"));
            }
            if options.serial_number {
                result.insert(
                    "serial_number".into(),
                    field_by_prefix(&fields, "serial_number_"),
                );
            }
        }

        if options.description {
            result.insert("description".into(), string_field(&asset, "description"));
        }

        Some(result)
    }

    fn fetch_asset(&self, asset_id: u64) -> Option<Value> {
        self.client
            .get_json(&format!("assets/{asset_id}"))
            .and_then(|body| body.get("asset").cloned())
    }

    /// Nested user detail block. Every field degrades to `"Unknown"` when
    /// the asset has no user or the requester lookup fails.
    fn user_details(&self, asset: &Value) -> Value {
        let requester = asset
            .get("user_id")
            .and_then(Value::as_i64)
            .and_then(|id| self.client.get_json(&format!("requesters/{id}")))
            .and_then(|body| body.get("requester").cloned())
            .unwrap_or(Value::Null);

        json!({
            "first_name": string_field(&requester, "first_name"),
            "last_name": string_field(&requester, "last_name"),
            "primary_email": string_field(&requester, "primary_email"),
            "mobile_phone_number": string_field(&requester, "mobile_phone_number"),
            "job_title": string_field(&requester, "job_title"),
        })
    }

    fn extended_type_fields(&self, asset_id: u64) -> Map<String, Value> {
        self.client
            .get_json(&format!("assets/{asset_id}?include=type_fields"))
            .and_then(|body| {
                body.get("asset")?
                    .get("type_fields")
                    .and_then(Value::as_object)
                    .cloned()
            })
            .unwrap_or_default()
    }
}
