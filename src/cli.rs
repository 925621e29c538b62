use clap::Parser;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::application::dto::EnrichmentOptions;
use crate::inventory::domain::ComponentKind;
use crate::shared::{InventoryError, Result};

/// Aggregate and enrich asset records from a service-desk REST API
#[derive(Parser, Debug)]
#[command(name = "asset-inventory")]
#[command(version)]
#[command(about = "Aggregate and enrich asset records from a service-desk REST API", long_about = None)]
pub struct Args {
    /// Asset IDs: comma-separated values, ranges like 140-150, or a path to
    /// a file containing them
    #[arg(short, long, value_name = "SPEC")]
    pub ids: Option<String>,

    /// IDs to exclude, same syntax as --ids
    #[arg(short, long, value_name = "SPEC")]
    pub exclude: Option<String>,

    /// Component types to include (cpu, ram, hdd, nic)
    #[arg(short, long, num_args = 1.., value_name = "TYPE")]
    pub components: Option<Vec<String>>,

    /// Pair each CPU unit with the merged RAM summary
    #[arg(long)]
    pub combine_cpu_ram: bool,

    /// Keep RAM units separate instead of merging them into one summary
    #[arg(long)]
    pub disable_join: bool,

    /// Include the department name
    #[arg(short = 'd', long)]
    pub departments: bool,

    /// Include the asset type name
    #[arg(short = 't', long)]
    pub asset_type: bool,

    /// Include the location name
    #[arg(short = 'l', long)]
    pub location: bool,

    /// Include the assigned user's details
    #[arg(short = 'u', long)]
    pub user: bool,

    /// Include the operating system
    #[arg(short = 's', long)]
    pub system_os: bool,

    /// Include the machine IP address
    #[arg(short = 'n', long)]
    pub machine_ip: bool,

    /// Include the machine MAC address
    #[arg(short = 'm', long)]
    pub machine_mac: bool,

    /// Include the serial number
    #[arg(long)]
    pub serial_number: bool,

    /// Include the free-text description
    #[arg(long)]
    pub description: bool,

    /// Enable every enrichment except components
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Print the location hierarchy and exit
    #[arg(long)]
    pub list_locations: bool,

    /// Print all department names and exit
    #[arg(long)]
    pub list_departments: bool,

    /// List the assets assigned to a user by full name ("First Last")
    #[arg(long, value_name = "NAME")]
    pub search_user: Option<String>,

    /// List the assets in a department by name
    #[arg(long, value_name = "NAME")]
    pub search_department: Option<String>,

    /// List the assets at a location by name
    #[arg(long, value_name = "NAME")]
    pub search_location: Option<String>,

    /// Clear the cache (optionally a single scope: locations, departments,
    /// assets, requesters, general) and exit
    #[arg(long, value_name = "SCOPE", num_args = 0..=1, default_missing_value = "all")]
    pub clear_cache: Option<String>,

    /// Write results to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Bypass the on-disk cache for this run
    #[arg(long)]
    pub no_cache: bool,

    /// Explicit config file path (default: discover asset-inventory.config.yml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Translates the flag set into enrichment options, resolving component
    /// short codes. An unknown short code fails the run before any request
    /// is made.
    pub fn enrichment_options(&self) -> Result<EnrichmentOptions> {
        let components = self
            .components
            .as_ref()
            .map(|codes| ComponentKind::translate_short_codes(codes))
            .transpose()?;

        Ok(EnrichmentOptions {
            components,
            combine_cpu_ram: self.combine_cpu_ram,
            disable_join: self.disable_join,
            department: self.departments || self.all,
            asset_type: self.asset_type || self.all,
            location: self.location || self.all,
            user: self.user || self.all,
            system_os: self.system_os || self.all,
            machine_ip: self.machine_ip || self.all,
            machine_mac: self.machine_mac || self.all,
            serial_number: self.serial_number || self.all,
            description: self.description || self.all,
        })
    }
}

/// Expands an ID spec into sorted, deduplicated asset IDs.
///
/// The spec is a comma-separated list of numbers and inclusive `A-B`
/// ranges, or a path to a file containing such a list. Malformed items are
/// skipped with a warning rather than failing the batch.
///
/// # Returns
/// The expanded IDs plus one warning message per skipped item.
pub fn parse_id_spec(input: &str) -> (Vec<u64>, Vec<String>) {
    let spec = if Path::new(input).is_file() {
        std::fs::read_to_string(input).unwrap_or_else(|_| input.to_string())
    } else {
        input.to_string()
    };

    let mut ids = BTreeSet::new();
    let mut warnings = Vec::new();
    for part in spec.split([',', '\n']) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Some((start, end)) = part.split_once('-') {
            match (start.trim().parse::<u64>(), end.trim().parse::<u64>()) {
                (Ok(start), Ok(end)) if start <= end => ids.extend(start..=end),
                _ => warnings.push(format!("Invalid range '{part}'. Skipping.")),
            }
        } else {
            match part.parse::<u64>() {
                Ok(id) => {
                    ids.insert(id);
                }
                Err(_) => warnings.push(format!("Invalid ID '{part}'. Skipping.")),
            }
        }
    }

    (ids.into_iter().collect(), warnings)
}

/// Resolves the --ids/--exclude pair into the final batch.
///
/// # Errors
/// An input that expands to zero valid IDs aborts the run.
pub fn resolve_asset_ids(ids_input: &str, exclude_input: Option<&str>) -> Result<(Vec<u64>, Vec<String>)> {
    let (ids, mut warnings) = parse_id_spec(ids_input);
    if ids.is_empty() {
        return Err(InventoryError::EmptyIdSpec {
            input: ids_input.to_string(),
        }
        .into());
    }

    let ids = match exclude_input {
        Some(exclude) => {
            let (excluded, exclude_warnings) = parse_id_spec(exclude);
            warnings.extend(exclude_warnings);
            ids.into_iter().filter(|id| !excluded.contains(id)).collect()
        }
        None => ids,
    };

    Ok((ids, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_list() {
        let (ids, warnings) = parse_id_spec("143,145,144");
        assert_eq!(ids, vec![143, 144, 145]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_parse_ranges_and_dedup() {
        let (ids, warnings) = parse_id_spec("10-12,11,12");
        assert_eq!(ids, vec![10, 11, 12]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_invalid_items_warn_and_skip() {
        let (ids, warnings) = parse_id_spec("5,abc,9-7,8");
        assert_eq!(ids, vec![5, 8]);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("abc"));
        assert!(warnings[1].contains("9-7"));
    }

    #[test]
    fn test_ids_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ids.txt");
        std::fs::write(&path, "100,101\n102-103\n").unwrap();

        let (ids, warnings) = parse_id_spec(path.to_str().unwrap());
        assert_eq!(ids, vec![100, 101, 102, 103]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_exclusion_is_applied() {
        let (ids, _) = resolve_asset_ids("1-5", Some("2,4")).unwrap();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_empty_spec_is_an_error() {
        let result = resolve_asset_ids("abc", None);
        assert!(result.is_err());
    }

    #[test]
    fn test_enrichment_all_enables_every_lookup() {
        let args = Args::parse_from(["asset-inventory", "--ids", "1", "-a"]);
        let options = args.enrichment_options().unwrap();
        assert!(options.department);
        assert!(options.user);
        assert!(options.serial_number);
        assert!(options.description);
        assert!(options.components.is_none());
    }

    #[test]
    fn test_component_short_codes_translate() {
        let args = Args::parse_from(["asset-inventory", "--ids", "1", "-c", "cpu", "ram"]);
        let options = args.enrichment_options().unwrap();
        assert_eq!(
            options.components,
            Some(vec![ComponentKind::Processor, ComponentKind::Memory])
        );
    }

    #[test]
    fn test_unknown_component_code_fails() {
        let args = Args::parse_from(["asset-inventory", "--ids", "1", "-c", "gpu"]);
        assert!(args.enrichment_options().is_err());
    }
}
