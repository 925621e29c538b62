//! Component reconciliation: merges an asset's raw hardware-component
//! records into normalized summary rows.
//!
//! Two shapes come out of here. The general path reduces the Memory and
//! Processor subsets to at most one merged row of `memory_*`/`cpu_*`
//! fields. The combine path pairs every CPU unit with a single RAM summary,
//! producing one `CPU + RAM` row per processor.

use crate::inventory::domain::component::{
    attribute, attribute_maps, component_type, display_value, first_attributes, ComponentKind,
    UNKNOWN,
};
use serde_json::{json, Map, Value};

/// Options controlling one reconciliation call.
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Keep only these component kinds; `None` keeps everything.
    pub requested: Option<Vec<ComponentKind>>,
    /// Pair each CPU unit with the RAM summary instead of merging both
    /// subsets into one row.
    pub combine_cpu_ram: bool,
    /// Merge all RAM units into one summary. When false the first RAM unit
    /// stands in verbatim and no total is computed.
    pub join_ram: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            requested: None,
            combine_cpu_ram: false,
            join_ram: true,
        }
    }
}

/// Reconciles raw component records into output rows.
///
/// An asset with zero matching components yields an empty vector, never an
/// error; partial data degrades field-by-field to `"Unknown"`.
pub fn reconcile(raw_components: &[Value], options: &ReconcileOptions) -> Vec<Map<String, Value>> {
    let requested_names: Option<Vec<&str>> = options
        .requested
        .as_ref()
        .map(|kinds| kinds.iter().map(|k| k.canonical_name()).collect());

    let filtered: Vec<&Value> = raw_components
        .iter()
        .filter(|c| match &requested_names {
            Some(names) => names.contains(&component_type(c)),
            None => true,
        })
        .collect();

    let ram_units: Vec<&Value> = filtered
        .iter()
        .copied()
        .filter(|c| component_type(c) == "Memory")
        .collect();
    let cpu_units: Vec<&Value> = filtered
        .iter()
        .copied()
        .filter(|c| component_type(c) == "Processor")
        .collect();

    if options.combine_cpu_ram && !cpu_units.is_empty() && !ram_units.is_empty() {
        let ram_summary = if options.join_ram {
            combine_ram_units(&ram_units)
        } else {
            first_ram_summary(ram_units[0])
        };
        return combine_cpu_and_ram(&cpu_units, &ram_summary, options.join_ram);
    }

    // general path: at most one row merging the first RAM and first CPU unit
    let mut row = Map::new();
    if let Some(ram) = ram_units.first() {
        let attrs = first_attributes(ram);
        row.insert("memory_capacity".into(), attribute(&attrs, "capacity"));
        row.insert("memory_speed".into(), attribute(&attrs, "speed"));
        row.insert("memory_type".into(), attribute(&attrs, "memory_type"));
    }
    if let Some(cpu) = cpu_units.first() {
        let attrs = first_attributes(cpu);
        row.insert("cpu_model".into(), attribute(&attrs, "model"));
        row.insert("cpu_speed".into(), attribute(&attrs, "cpu_speed"));
        row.insert("cpu_cores".into(), attribute(&attrs, "no_of_cores"));
    }

    if row.is_empty() {
        Vec::new()
    } else {
        vec![row]
    }
}

/// Merges every RAM unit into one summary row.
///
/// `total_capacity` sums the numeric capacities (non-numeric units count as
/// zero but still show up in the display string). The display capacity is
/// `<unit>x<count>` when all units agree on one positive value, otherwise
/// the raw values joined with `+` in input order, duplicates retained.
/// Distinct speeds join with `+` in first-occurrence order.
pub fn combine_ram_units(ram_units: &[&Value]) -> Map<String, Value> {
    let mut total_capacity: i64 = 0;
    let mut capacities: Vec<Value> = Vec::new();
    let mut speeds: Vec<String> = Vec::new();
    let mut sockets: Vec<String> = Vec::new();
    let mut memory_type = Value::String(UNKNOWN.to_string());

    for unit in ram_units {
        for attrs in attribute_maps(unit) {
            let capacity = attrs.get("capacity").cloned().unwrap_or(json!(0));
            total_capacity += numeric_capacity(&capacity);
            capacities.push(capacity);

            let speed = display_value(&attribute(attrs, "speed"));
            if !speeds.contains(&speed) {
                speeds.push(speed);
            }
            sockets.push(display_value(&attribute(attrs, "socket")));
            if let Some(mt) = attrs.get("memory_type") {
                memory_type = mt.clone();
            }
        }
    }

    let capacity_labels: Vec<String> = capacities.iter().map(display_value).collect();
    let uniform = !capacity_labels.is_empty()
        && capacity_labels.iter().all(|c| *c == capacity_labels[0])
        && capacities.first().map(numeric_capacity).unwrap_or(0) > 0;
    let capacity = if uniform {
        format!("{}x{}", capacity_labels[0], capacity_labels.len())
    } else {
        capacity_labels.join("+")
    };

    let speed = speeds.join("+");

    let mut summary = Map::new();
    summary.insert("component_type".into(), json!("Memory"));
    summary.insert("capacity".into(), json!(capacity));
    summary.insert("speed".into(), json!(speed));
    summary.insert("socket".into(), json!(sockets.join(", ")));
    summary.insert("memory_type".into(), memory_type);
    summary.insert("total_capacity".into(), json!(total_capacity));
    summary
}

/// Summary of a single RAM unit, used when joining is disabled.
fn first_ram_summary(unit: &Value) -> Map<String, Value> {
    let attrs = first_attributes(unit);
    let mut summary = Map::new();
    summary.insert("component_type".into(), json!("Memory"));
    summary.insert("capacity".into(), attribute(&attrs, "capacity"));
    summary.insert("speed".into(), attribute(&attrs, "speed"));
    summary.insert("socket".into(), attribute(&attrs, "socket"));
    summary.insert("memory_type".into(), attribute(&attrs, "memory_type"));
    summary
}

/// Emits one `CPU + RAM` row per CPU unit, each sharing the one RAM summary.
fn combine_cpu_and_ram(
    cpu_units: &[&Value],
    ram_summary: &Map<String, Value>,
    join_ram: bool,
) -> Vec<Map<String, Value>> {
    let ram_field = |key: &str| attribute(ram_summary, key);
    let ram_total = if join_ram {
        ram_field("total_capacity")
    } else {
        json!("N/A")
    };

    cpu_units
        .iter()
        .map(|cpu| {
            let attrs = first_attributes(cpu);
            let mut row = Map::new();
            row.insert("component_type".into(), json!("CPU + RAM"));
            row.insert("cpu_model".into(), attribute(&attrs, "model"));
            row.insert("cpu_cores".into(), attribute(&attrs, "no_of_cores"));
            row.insert("cpu_speed".into(), attribute(&attrs, "cpu_speed"));
            row.insert("ram_capacity".into(), ram_field("capacity"));
            row.insert("ram_speed".into(), ram_field("speed"));
            row.insert("ram_socket".into(), ram_field("socket"));
            row.insert("ram_memory_type".into(), ram_field("memory_type"));
            row.insert("ram_total_capacity".into(), ram_total.clone());
            row
        })
        .collect()
}

/// Numeric reading of a capacity value; strings of digits parse, anything
/// else counts as zero.
fn numeric_capacity(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) if s.chars().all(|c| c.is_ascii_digit()) && !s.is_empty() => {
            s.parse().unwrap_or(0)
        }
        _ => 0,
    }
}
