use crate::browser::BrowserSession;
use crate::config::{ResolvedConfig, ResolvedConfigFile};
use crate::constants::DEFAULT_KEYWORD;
use crate::crawler::process_region;
use crate::errors::{AppError, AppResult};
use crate::export;
use crate::logging;
use crate::models::{Region, TenderRecord};
use crate::utils::format_duration;
use clap::{Arg, ArgAction, Command};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Pause between regions when crawling all of them.
const REGION_PAUSE: Duration = Duration::from_secs(1);

/// What the run crawls: a single region or all of them in sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionChoice {
    One(Region),
    All,
}

impl RegionChoice {
    pub fn parse(value: &str) -> AppResult<Self> {
        let lower = value.trim().to_lowercase();
        if lower == "todas" || lower == "all" {
            return Ok(Self::All);
        }
        Region::parse(&lower).map(Self::One).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Unknown region '{value}' (expected sur, este, oeste, centro or todas)"
            ))
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::One(region) => region.display_name(),
            Self::All => "Todas",
        }
    }

    pub fn regions(&self) -> Vec<Region> {
        match self {
            Self::One(region) => vec![*region],
            Self::All => Region::ALL.to_vec(),
        }
    }
}

/// Parses command-line arguments and executes the crawl.
///
/// Two subcommands:
/// - `run`: direct CLI flags; asks for region and keyword interactively
///   when they are omitted
/// - `toml`: run using a TOML configuration file
///
/// Both end up in the same workflow: start a browser session, crawl the
/// selected regions sequentially, export the aggregate CSV (and optional
/// JSON dump), and shut the browser down in every exit path.
pub async fn cli() -> AppResult<()> {
    let cmd = Command::new("licita-crawler")
        .version(APP_VERSION)
        .about(APP_ABOUT)
        .subcommand(
            Command::new("run")
                .about("Crawl one region (or all) and export the scraped tenders")
                .after_help(
                    "Requires a running chromedriver (default http://localhost:9515).\nExample:\n  licita-crawler run -r sur -k alimentación --json",
                )
                .arg(
                    Arg::new("region")
                        .short('r')
                        .long("region")
                        .help("Region: 'sur', 'este', 'oeste', 'centro' or 'todas' (asks interactively when omitted)")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("keyword")
                        .short('k')
                        .long("keyword")
                        .help("Free text for the 'Objeto del contrato' filter")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("headed")
                        .long("headed")
                        .help("Show the browser window instead of running headless")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("webdriver_url")
                        .short('w')
                        .long("webdriver-url")
                        .help("WebDriver endpoint of a running chromedriver")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("output_dir")
                        .short('o')
                        .long("output-dir")
                        .help("Root directory for exported files")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Also write a pretty-printed JSON dump next to the CSV")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("toml")
                .about("Run using a TOML configuration file")
                .arg(
                    Arg::new("config")
                        .help("Path to the TOML config file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        );

    let mut cmd_for_help = cmd.clone();
    let matches = cmd.get_matches();

    match matches.subcommand() {
        Some(("run", sub)) => {
            let mut config = ResolvedConfig::default();
            if sub.get_flag("headed") {
                config.headless = false;
            }
            if let Some(url) = sub.get_one::<String>("webdriver_url") {
                config.webdriver_url = url.clone();
            }
            if let Some(dir) = sub.get_one::<PathBuf>("output_dir") {
                config.output_dir = dir.clone();
            }
            if sub.get_flag("json") {
                config.json_dump = true;
            }

            let choice = match sub.get_one::<String>("region") {
                Some(region) => RegionChoice::parse(region)?,
                None => prompt_region()?,
            };
            let keyword = match sub.get_one::<String>("keyword") {
                Some(keyword) => keyword.clone(),
                // Only prompt when the run is already interactive.
                None if sub.get_one::<String>("region").is_none() => prompt_keyword()?,
                None => DEFAULT_KEYWORD.to_string(),
            };

            let log_path = logging::init_logging(&config.logs_dir)?;
            info!(log_file = %log_path.display(), "Logging initialized");

            run_workflow(choice, &keyword, &config).await?;
        }
        Some(("toml", sub)) => {
            let config_path = sub
                .get_one::<PathBuf>("config")
                .expect("config is required");

            let file_config = ResolvedConfigFile::from_toml_file(config_path)?;
            let choice = RegionChoice::parse(&file_config.region)?;

            let log_path = logging::init_logging(&file_config.resolved.logs_dir)?;
            info!(log_file = %log_path.display(), "Logging initialized");

            run_workflow(choice, &file_config.keyword, &file_config.resolved).await?;
        }
        _ => {
            cmd_for_help
                .print_help()
                .map_err(|e| AppError::IoError(format!("Failed to print help: {e}")))?;
        }
    }

    Ok(())
}

async fn run_workflow(
    choice: RegionChoice,
    keyword: &str,
    config: &ResolvedConfig,
) -> AppResult<()> {
    let start = Instant::now();
    info!(region = choice.label(), keyword, "Starting crawl");

    let session = BrowserSession::start(config).await?;

    let crawl_result = tokio::select! {
        result = crawl_regions(&session, config, choice, keyword) => Some(result),
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, shutting down browser");
            None
        }
    };

    // The browser is released before any crawl error propagates.
    let quit_result = session.quit().await;

    let records = match crawl_result {
        Some(Ok(records)) => {
            quit_result?;
            records
        }
        Some(Err(e)) => {
            let _ = quit_result;
            return Err(e);
        }
        None => {
            quit_result?;
            info!(elapsed = %format_duration(start.elapsed()), "Run aborted by user");
            return Ok(());
        }
    };

    if records.is_empty() {
        warn!("No records extracted, nothing to export");
    } else {
        let csv_path = export::save_records(config, choice.label(), keyword, &records)?;
        info!(
            total = records.len(),
            path = %csv_path.display(),
            "Export complete"
        );
    }

    info!(elapsed = %format_duration(start.elapsed()), "Run finished");
    Ok(())
}

/// Crawls the chosen regions sequentially. A region that fails outright is
/// logged and skipped; the run continues with the next one.
async fn crawl_regions(
    session: &BrowserSession,
    config: &ResolvedConfig,
    choice: RegionChoice,
    keyword: &str,
) -> AppResult<Vec<TenderRecord>> {
    let regions = choice.regions();
    let mut all_records: Vec<TenderRecord> = Vec::new();

    for (idx, region) in regions.iter().enumerate() {
        info!(
            region = region.display_name(),
            index = idx + 1,
            total = regions.len(),
            "Processing region"
        );
        match process_region(session, config, *region, keyword).await {
            Ok((records, _outcome)) => all_records.extend(records),
            Err(e) => {
                warn!(region = region.display_name(), error = %e, "Region failed, continuing");
            }
        }
        if idx + 1 < regions.len() {
            tokio::time::sleep(REGION_PAUSE).await;
        }
    }

    Ok(all_records)
}

fn prompt_region() -> AppResult<RegionChoice> {
    let items = ["Sur", "Este", "Oeste", "Centro", "Todas"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Selecciona una región")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(match selection {
        0 => RegionChoice::One(Region::Sur),
        1 => RegionChoice::One(Region::Este),
        2 => RegionChoice::One(Region::Oeste),
        3 => RegionChoice::One(Region::Centro),
        _ => RegionChoice::All,
    })
}

fn prompt_keyword() -> AppResult<String> {
    let keyword: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Objeto del contrato")
        .default(DEFAULT_KEYWORD.to_string())
        .interact_text()?;
    Ok(keyword)
}
