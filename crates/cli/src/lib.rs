use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use grammar_i18n_compiler::{
    evaluate_gate_dir, extract_nodes, generate_skeleton, patch_tables, scan_ui_usage,
    validate_tables, ScanOptions,
};
use serde_json::json;
use std::io;
use std::path::PathBuf;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    print_stdout(&serde_json::to_string_pretty(value)?)
}

#[derive(Parser)]
#[command(name = "grammar-i18n")]
#[command(about = "Keep grammar nodes, i18n tables and UI bindings in sync", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Print a JSON summary to stdout (implies --quiet)
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the node index from every g.* key in the i18n tables
    #[command(name = "i18n-to-nodes")]
    I18nToNodes(I18nToNodesArgs),

    /// Write empty tables with every node key for new languages
    #[command(name = "nodes-to-skeleton")]
    NodesToSkeleton(SkeletonArgs),

    /// Report node keys missing per language and orphan i18n keys
    Validate(ValidateArgs),

    /// Fill every table to full node coverage from a base language
    Patch(PatchArgs),

    /// Scan UI markup for bound keys and reconcile against nodes and tables
    #[command(name = "scan-ui")]
    ScanUi(ScanUiArgs),

    /// Fail when finished reports show undeclared UI keys or missing translations
    Gate(GateArgs),
}

#[derive(Args)]
struct I18nToNodesArgs {
    /// Directory of <lang>.json tables
    #[arg(long)]
    i18n_dir: PathBuf,

    /// Node index file to write
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args)]
struct SkeletonArgs {
    /// Node index file
    #[arg(long)]
    nodes: PathBuf,

    /// Language codes to generate
    #[arg(long, num_args = 1.., required = true)]
    langs: Vec<String>,

    /// Directory to write <lang>.json into
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args)]
struct ValidateArgs {
    /// Node index file
    #[arg(long)]
    nodes: PathBuf,

    /// Directory of <lang>.json tables
    #[arg(long)]
    i18n_dir: PathBuf,

    /// Directory to write reports into
    #[arg(long)]
    report_dir: PathBuf,
}

#[derive(Args)]
struct PatchArgs {
    /// Node index file
    #[arg(long)]
    nodes: PathBuf,

    /// Directory of <lang>.json tables
    #[arg(long)]
    i18n_dir: PathBuf,

    /// Language whose values fill gaps in the others
    #[arg(long)]
    base_lang: String,

    /// Directory to write patched <lang>.json into
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args)]
struct ScanUiArgs {
    /// Node index file
    #[arg(long)]
    nodes: PathBuf,

    /// Directory of <lang>.json tables
    #[arg(long)]
    i18n_dir: PathBuf,

    /// Files or directories to scan for markup
    #[arg(long, num_args = 1.., required = true)]
    scan_paths: Vec<PathBuf>,

    /// Directory to write reports into
    #[arg(long)]
    report_dir: PathBuf,

    /// Extra directory names to skip (repeatable)
    #[arg(long = "ignore-dir")]
    ignore_dirs: Vec<String>,

    /// Extra binding attribute names (repeatable)
    #[arg(long = "attr")]
    attributes: Vec<String>,

    /// Extra markup file extensions (repeatable)
    #[arg(long = "ext")]
    extensions: Vec<String>,

    /// JSON file with scan options (ignore_dirs, extensions, attributes)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct GateArgs {
    /// Directory holding finished reports
    #[arg(long, default_value = "dist/reports")]
    report_dir: PathBuf,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();
    if cli.json {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let json = cli.json;
    match cli.command {
        Commands::I18nToNodes(args) => run_i18n_to_nodes(args, json)?,
        Commands::NodesToSkeleton(args) => run_nodes_to_skeleton(args, json)?,
        Commands::Validate(args) => run_validate(args, json)?,
        Commands::Patch(args) => run_patch(args, json)?,
        Commands::ScanUi(args) => run_scan_ui(args, json)?,
        Commands::Gate(args) => run_gate(args, json)?,
    }

    Ok(())
}

fn run_i18n_to_nodes(args: I18nToNodesArgs, json: bool) -> Result<()> {
    let index = extract_nodes(&args.i18n_dir, &args.out).with_context(|| {
        format!("Failed to build node index from {}", args.i18n_dir.display())
    })?;
    log::info!("Wrote {} nodes to {}", index.nodes.len(), args.out.display());

    if json {
        print_json(&json!({
            "out": args.out,
            "node_count": index.nodes.len(),
        }))?;
    }
    Ok(())
}

fn run_nodes_to_skeleton(args: SkeletonArgs, json: bool) -> Result<()> {
    let node_count = generate_skeleton(&args.nodes, args.langs.as_slice(), &args.out_dir)
        .context("Failed to generate skeleton tables")?;
    log::info!(
        "Wrote {} skeleton tables with {node_count} keys to {}",
        args.langs.len(),
        args.out_dir.display()
    );

    if json {
        print_json(&json!({
            "out_dir": args.out_dir,
            "langs": args.langs,
            "node_count": node_count,
        }))?;
    }
    Ok(())
}

fn run_validate(args: ValidateArgs, json: bool) -> Result<()> {
    let reports = validate_tables(&args.nodes, &args.i18n_dir, &args.report_dir)
        .context("Validation failed")?;
    log::info!(
        "Node keys: {}, missing translations: {}, orphan keys: {}",
        reports.missing.node_count,
        reports.missing.total_missing(),
        reports.orphan.orphan_count
    );

    if json {
        print_json(&json!({
            "report_dir": args.report_dir,
            "node_count": reports.missing.node_count,
            "missing_total": reports.missing.total_missing(),
            "orphan_count": reports.orphan.orphan_count,
        }))?;
    }
    Ok(())
}

fn run_patch(args: PatchArgs, json: bool) -> Result<()> {
    let lang_count = patch_tables(&args.nodes, &args.i18n_dir, &args.base_lang, &args.out_dir)
        .context("Patch failed")?;
    log::info!(
        "Patched {lang_count} tables from '{}' into {}",
        args.base_lang,
        args.out_dir.display()
    );

    if json {
        print_json(&json!({
            "out_dir": args.out_dir,
            "base_lang": args.base_lang,
            "lang_count": lang_count,
        }))?;
    }
    Ok(())
}

fn run_scan_ui(args: ScanUiArgs, json: bool) -> Result<()> {
    let base = match &args.config {
        Some(path) => ScanOptions::from_file(path)
            .with_context(|| format!("Invalid scan config {}", path.display()))?,
        None => ScanOptions::default(),
    };
    let options = base
        .with_ignore_dirs(args.ignore_dirs)
        .with_attributes(args.attributes)
        .with_extensions(args.extensions);

    let reports = scan_ui_usage(
        &args.nodes,
        &args.i18n_dir,
        args.scan_paths.as_slice(),
        &options,
        &args.report_dir,
    )
    .context("UI scan failed")?;
    log::info!(
        "UI keys: {} ({} g.*), missing in nodes: {}, unused nodes: {}, legacy orphans: {}",
        reports.ui_keys.count,
        reports.ui_keys.g_count,
        reports.ui_missing_in_nodes.count,
        reports.nodes_unused_in_ui.count,
        reports.legacy_orphan.count
    );

    if json {
        print_json(&json!({
            "report_dir": args.report_dir,
            "ui_key_count": reports.ui_keys.count,
            "ui_g_count": reports.ui_keys.g_count,
            "ui_missing_in_nodes": reports.ui_missing_in_nodes.count,
            "nodes_unused_in_ui": reports.nodes_unused_in_ui.count,
            "legacy_orphan": reports.legacy_orphan.count,
        }))?;
    }
    Ok(())
}

fn run_gate(args: GateArgs, json: bool) -> Result<()> {
    let outcome = evaluate_gate_dir(&args.report_dir)
        .with_context(|| format!("Failed to read reports in {}", args.report_dir.display()))?;

    if json {
        print_json(&json!({
            "passed": outcome.passed(),
            "failures": outcome.failures,
            "orphan_count": outcome.orphan_count,
        }))?;
    } else {
        print_stdout(&outcome.render())?;
    }

    if !outcome.passed() {
        std::process::exit(outcome.exit_code());
    }
    Ok(())
}
