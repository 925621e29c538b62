use crate::inventory::domain::ComponentKind;

/// Independent enrichment switches for one aggregation run. Each enabled
/// flag triggers exactly one enrichment lookup per asset.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentOptions {
    /// Component kinds to reconcile; `None` disables component processing
    /// entirely.
    pub components: Option<Vec<ComponentKind>>,
    pub combine_cpu_ram: bool,
    /// Skip merging multiple RAM units into one summary.
    pub disable_join: bool,
    pub department: bool,
    pub asset_type: bool,
    pub location: bool,
    pub user: bool,
    pub system_os: bool,
    pub machine_ip: bool,
    pub machine_mac: bool,
    pub serial_number: bool,
    pub description: bool,
}

impl EnrichmentOptions {
    /// True when any of the four extended type fields is requested; they
    /// all come from the same `include=type_fields` lookup.
    pub fn wants_type_fields(&self) -> bool {
        self.system_os || self.machine_ip || self.machine_mac || self.serial_number
    }
}

/// One aggregation batch: which assets to process and how to enrich them.
#[derive(Debug, Clone)]
pub struct AggregateRequest {
    pub asset_ids: Vec<u64>,
    pub options: EnrichmentOptions,
}

impl AggregateRequest {
    pub fn new(asset_ids: Vec<u64>, options: EnrichmentOptions) -> Self {
        Self { asset_ids, options }
    }
}
