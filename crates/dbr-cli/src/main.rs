//! dbreport: render browsable HTML reports for a set of JSON tables.
//!
//! Input is a JSON object mapping view names to `{"headers": [..], "rows": [..]}`.
//! An optional layout file supplies titles, descriptions, captions, menu
//! categories, asset paths and the output directory.

mod exit_codes;
mod logging;

use clap::{Args, Parser, Subcommand};
use dbr_report::{
    write_reports, Catalog, IdentityParser, Layout, RenderConfig, ReportError, ReportGenerator,
    TableData,
};
use exit_codes::ExitCode;
use logging::{init_logging, LogConfig, LogFormat, LogLevel};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Timestamp format used when `--updated` is not given.
const UPDATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Render self-contained HTML reports with sortable, filterable tables
#[derive(Parser)]
#[command(name = "dbreport")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Log level: trace, debug, info, warn, error, off
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Log format on stderr: human, jsonl
    #[arg(long, global = true, value_name = "FORMAT")]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render reports and write one HTML file per view
    Render(RenderArgs),
    /// Validate the layout and every table without writing anything
    Check(CheckArgs),
}

/// Where tables and layout come from
#[derive(Args, Debug)]
struct SourceArgs {
    /// JSON object mapping view names to {headers, rows}
    #[arg(long, value_name = "PATH")]
    data: PathBuf,

    /// Layout file with titles, descriptions, captions, categories and paths
    #[arg(long, value_name = "PATH")]
    layout: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output directory (defaults to the layout's report_dir)
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Render only this view; repeat for several
    #[arg(long = "view", value_name = "NAME")]
    views: Vec<String>,

    /// Last-updated timestamp shown in every report (defaults to now)
    #[arg(long, value_name = "TS")]
    updated: Option<String>,

    /// Renderer configuration (JSON)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Minify the generated HTML
    #[arg(long)]
    minify: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[command(flatten)]
    source: SourceArgs,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            std::process::exit(ExitCode::ArgsError.as_i32());
        }
    };

    let log_config = LogConfig::from_env(cli.global.log_level, cli.global.log_format);
    init_logging(&log_config);

    let exit_code = match &cli.command {
        Commands::Render(args) => run_render(args),
        Commands::Check(args) => run_check(args),
    };

    if !exit_code.is_success() {
        debug!(exit = %exit_code, "Command failed");
    }
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Commands
// ============================================================================

fn run_render(args: &RenderArgs) -> ExitCode {
    render(args).unwrap_or_else(|err| report_failure(&err))
}

fn run_check(args: &CheckArgs) -> ExitCode {
    check(args).unwrap_or_else(|err| report_failure(&err))
}

fn render(args: &RenderArgs) -> Result<ExitCode, ReportError> {
    let tables = load_tables(&args.source.data)?;
    let layout = load_layout(args.source.layout.as_deref())?;
    let out_dir = args.out.clone().or_else(|| layout.paths.report_dir.clone());

    if out_dir.is_none() && args.views.len() != 1 {
        eprintln!("error: no output directory; pass --out, set paths.report_dir in the layout, or select exactly one --view to print it");
        return Ok(ExitCode::ArgsError);
    }

    let config = load_config(args.config.as_deref())?;
    let minify = config.minify || args.minify;
    let generator = ReportGenerator::new(config.with_minify(minify));

    let catalog = Catalog::new(layout, tables.keys().cloned())?;
    let selected = (!args.views.is_empty()).then_some(args.views.as_slice());
    let updated = args
        .updated
        .clone()
        .unwrap_or_else(|| chrono::Local::now().format(UPDATED_FORMAT).to_string());

    let reports = catalog.render_all(&generator, &tables, selected, &updated, &IdentityParser)?;

    let mut stdout = std::io::stdout().lock();
    match out_dir {
        Some(dir) => {
            for path in write_reports(&dir, &reports)? {
                writeln!(stdout, "{}", path.display())?;
            }
            info!(dir = %dir.display(), reports = reports.len(), "Reports written");
        }
        None => {
            for html in reports.values() {
                stdout.write_all(html.as_bytes())?;
            }
        }
    }
    stdout.flush()?;

    Ok(ExitCode::Clean)
}

fn check(args: &CheckArgs) -> Result<ExitCode, ReportError> {
    let tables = load_tables(&args.source.data)?;
    let layout = load_layout(args.source.layout.as_deref())?;
    let catalog = Catalog::new(layout, tables.keys().cloned())?;

    let mut stdout = std::io::stdout().lock();
    for view in catalog.views() {
        let Some(table) = tables.get(view) else {
            continue;
        };
        let spec = catalog.spec_for(view, table.clone(), "")?;
        writeln!(
            stdout,
            "ok {view}: {} columns, {} rows",
            spec.headers().len(),
            spec.rows().len()
        )?;
    }
    writeln!(
        stdout,
        "{} views, {} categories",
        catalog.views().len(),
        catalog.categories().len()
    )?;

    Ok(ExitCode::Clean)
}

// ============================================================================
// Helpers
// ============================================================================

fn load_tables(path: &Path) -> Result<BTreeMap<String, TableData>, ReportError> {
    let json = std::fs::read_to_string(path)?;
    let tables: BTreeMap<String, TableData> = serde_json::from_str(&json)?;
    debug!(path = %path.display(), views = tables.len(), "Tables loaded");
    Ok(tables)
}

fn load_layout(path: Option<&Path>) -> Result<Layout, ReportError> {
    match path {
        Some(path) => Layout::load(path),
        None => Ok(Layout::default()),
    }
}

fn load_config(path: Option<&Path>) -> Result<RenderConfig, ReportError> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            RenderConfig::from_json(&json)
                .map_err(|e| ReportError::InvalidConfig(format!("{}: {e}", path.display())))
        }
        None => Ok(RenderConfig::default()),
    }
}

fn report_failure(err: &ReportError) -> ExitCode {
    let code = ExitCode::from(err);
    debug!(code = code.code_name(), error = %err, "Command error");
    eprintln!("error: {err}");
    code
}
