use asset_inventory::adapters::outbound::console::StderrProgressReporter;
use asset_inventory::adapters::outbound::filesystem::{CacheScope, TtlCache};
use asset_inventory::adapters::outbound::network::{CachingRemoteClient, HttpRemoteClient};
use asset_inventory::application::dto::AggregateRequest;
use asset_inventory::application::use_cases::{
    AggregateAssetsUseCase, ListDepartmentsUseCase, ListLocationsUseCase, SearchAssetsUseCase,
};
use asset_inventory::cli::{resolve_asset_ids, Args};
use asset_inventory::config::{load_or_discover, ApiCredentials, CacheSettings};
use asset_inventory::ports::outbound::{ProgressReporter, RemoteClient};
use asset_inventory::shared::Result;
use chrono::Local;
use serde_json::{Map, Value};
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse_args();
    let config_file = load_or_discover(args.config.as_deref())?;
    let cache_settings = CacheSettings::from_file(&config_file);

    // cache maintenance needs no credentials
    if let Some(scope) = &args.clear_cache {
        return clear_cache(&cache_settings, scope);
    }

    let credentials = ApiCredentials::from_env()?;
    let http = HttpRemoteClient::new(credentials.base_url, credentials.api_key)?;

    if cache_settings.enabled && !args.no_cache {
        let cache = TtlCache::new(&cache_settings.root, cache_settings.max_age)?;
        let client =
            CachingRemoteClient::new(http, cache, cache_settings.excluded_endpoints.clone());
        dispatch(&client, &args)
    } else {
        dispatch(&http, &args)
    }
}

fn dispatch<C: RemoteClient>(client: &C, args: &Args) -> Result<()> {
    if args.list_locations {
        for line in ListLocationsUseCase::new(client).execute() {
            println!("{}", line);
        }
        return Ok(());
    }

    if args.list_departments {
        for name in ListDepartmentsUseCase::new(client).execute() {
            println!("{}", name);
        }
        return Ok(());
    }

    let reporter = StderrProgressReporter::new();

    if let Some(name) = &args.search_user {
        return match SearchAssetsUseCase::new(client).by_user(name)? {
            Some(results) => write_results(&results, args, &reporter),
            None => {
                reporter.report_error(&format!("No user found with name '{name}'"));
                Ok(())
            }
        };
    }
    if let Some(name) = &args.search_department {
        return match SearchAssetsUseCase::new(client).by_department(name) {
            Some(results) => write_results(&results, args, &reporter),
            None => {
                reporter.report_error(&format!("No department found with name '{name}'"));
                Ok(())
            }
        };
    }
    if let Some(name) = &args.search_location {
        return match SearchAssetsUseCase::new(client).by_location(name) {
            Some(results) => write_results(&results, args, &reporter),
            None => {
                reporter.report_error(&format!("No location found with name '{name}'"));
                Ok(())
            }
        };
    }

    let Some(ids_input) = args.ids.as_deref() else {
        anyhow::bail!(
            "No action requested\n\n💡 Hint: pass --ids to aggregate assets, a --search-* lookup, or one of --list-locations / --list-departments / --clear-cache"
        );
    };

    let (asset_ids, warnings) = resolve_asset_ids(ids_input, args.exclude.as_deref())?;
    for warning in &warnings {
        reporter.report_error(warning);
    }

    reporter.report(&format!(
        "asset-inventory {} — run started {}",
        env!("CARGO_PKG_VERSION"),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    let options = args.enrichment_options()?;
    let request = AggregateRequest::new(asset_ids, options);
    let use_case = AggregateAssetsUseCase::new(client, &reporter);
    let results = use_case.execute(&request);

    write_results(&results, args, &reporter)
}

fn write_results(
    results: &[Map<String, Value>],
    args: &Args,
    reporter: &StderrProgressReporter,
) -> Result<()> {
    let serialized = serde_json::to_string_pretty(results)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &serialized).map_err(|e| {
                anyhow::anyhow!("Failed to write results to {}: {e}", path.display())
            })?;
            reporter.report(&format!("Results written to {}", path.display()));
        }
        None => println!("{}", serialized),
    }

    Ok(())
}

fn clear_cache(settings: &CacheSettings, scope: &str) -> Result<()> {
    let cache = TtlCache::new(&settings.root, settings.max_age)?;
    if scope == "all" {
        cache.clear(None);
        eprintln!("Cache cleared");
    } else {
        let scope: CacheScope = scope.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        cache.clear(Some(scope));
        eprintln!("Cache cleared for scope '{}'", scope.dir_name());
    }
    Ok(())
}
