// CompanyScope - main.rs
//
// Command-line front end. Handles:
// 1. CLI argument parsing
// 2. Configuration loading and logging initialisation
// 3. The single record fetch (fatal only with --strict)
// 4. Restoring view state from a query string, applying sort/page options
// 5. Printing the resulting dashboard view as JSON and optional export

use clap::Parser;
use companyscope::app::fetch;
use companyscope::app::state::{Command, Dashboard, DashboardView};
use companyscope::core::export;
use companyscope::core::model::{Facets, Record};
use companyscope::core::query::QueryState;
use companyscope::core::sort::{SortKey, SortOrder, SortSpec};
use companyscope::core::trend::SparklineSet;
use companyscope::platform::config::{self, PlatformPaths};
use companyscope::util::error::{DashboardError, Result};
use companyscope::util::{constants, logging};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// CompanyScope - company data dashboard.
///
/// Loads the company records once, applies the filters carried by a
/// dashboard query string, sorts and paginates the result and prints the
/// visible page together with the summary statistics.
#[derive(Parser, Debug)]
#[command(name = "companyscope", version, about)]
struct Cli {
    /// URL or JSON file with the records (default: [data] source from config).
    source: Option<String>,

    /// Dashboard query string, e.g. "country=USA&industry=Tech&search=acme".
    #[arg(short = 'q', long = "query")]
    query: Option<String>,

    /// Sort column: name, country, industry or numberOfEmployees.
    #[arg(short = 's', long = "sort")]
    sort: Option<SortKey>,

    /// Sort direction: asc or desc.
    #[arg(short = 'o', long = "order")]
    order: Option<SortOrder>,

    /// Keep records in source order.
    #[arg(long = "no-sort", conflicts_with_all = ["sort", "order"])]
    no_sort: bool,

    /// Page to show (1-based).
    #[arg(short = 'p', long = "page", default_value_t = 1)]
    page: usize,

    /// Write the whole filtered, sorted view to a CSV file.
    #[arg(long = "export-csv")]
    export_csv: Option<PathBuf>,

    /// Write the whole filtered, sorted view to a JSON file.
    #[arg(long = "export-json")]
    export_json: Option<PathBuf>,

    /// Include decorative sparkline series in the output.
    #[arg(long = "sparklines")]
    sparklines: bool,

    /// Config file to use instead of the platform default.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Fail on an invalid config value or a failed fetch instead of falling
    /// back to defaults and an empty dashboard.
    #[arg(long = "strict")]
    strict: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// JSON document printed to stdout.
#[derive(Serialize)]
struct Output<'a> {
    source: &'a str,
    fetch_error: Option<String>,
    page_label: String,
    facets: &'a Facets,
    view: DashboardView,
    #[serde(skip_serializing_if = "Option::is_none")]
    sparklines: Option<SparklineSet>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "CompanyScope failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (app_config, config_warnings) = if cli.strict {
        (config::load_config_strict(&config_path)?, Vec::new())
    } else {
        config::load_config_file(&config_path)
    };

    logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "CompanyScope starting"
    );
    for warning in &config_warnings {
        tracing::warn!(error = %warning, "Configuration warning");
    }

    let source_location = cli.source.clone().unwrap_or(app_config.source.clone());
    let source = fetch::source_for(&source_location);
    let (store, fetch_error) = if cli.strict {
        (fetch::fetch_store(source.as_ref())?, None)
    } else {
        fetch::load_store(source.as_ref())
    };

    let mut dashboard = Dashboard::with_query(
        store,
        app_config.page_size,
        QueryState::with_sort(app_config.sort),
    );

    if let Some(ref query) = cli.query {
        dashboard.apply_location(query);
    }

    if cli.no_sort {
        dashboard.dispatch(Command::SetSort(None));
    } else if cli.sort.is_some() || cli.order.is_some() {
        let current = dashboard.query().sort.unwrap_or_default();
        let key = cli.sort.unwrap_or(current.key);
        let order = cli.order.unwrap_or(SortOrder::Asc);
        dashboard.dispatch(Command::SetSort(Some(SortSpec::new(key, order))));
    }

    dashboard.dispatch(Command::SetPage(cli.page));

    if cli.export_csv.is_some() || cli.export_json.is_some() {
        let records: Vec<&Record> = dashboard.filtered_records().collect();
        if let Some(ref path) = cli.export_csv {
            let count = export::export_csv(&records, create_export_file(path)?, path)?;
            tracing::info!(path = %path.display(), records = count, "CSV export written");
        }
        if let Some(ref path) = cli.export_json {
            let count = export::export_json(&records, create_export_file(path)?, path)?;
            tracing::info!(path = %path.display(), records = count, "JSON export written");
        }
    }

    let view = dashboard.view();
    let output = Output {
        source: &source_location,
        fetch_error: fetch_error.map(|e| e.to_string()),
        page_label: view.page.label(),
        facets: dashboard.facets(),
        sparklines: cli
            .sparklines
            .then(|| SparklineSet::from_stats(&view.stats, &mut rand::rng())),
        view,
    };

    let json = serde_json::to_string_pretty(&output).map_err(|e| DashboardError::Io {
        path: PathBuf::from("<stdout>"),
        operation: "serialise view",
        source: e.into(),
    })?;
    println!("{json}");

    Ok(())
}

fn create_export_file(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| DashboardError::Io {
        path: path.to_path_buf(),
        operation: "create export file",
        source: e,
    })?;
    Ok(BufWriter::new(file))
}
