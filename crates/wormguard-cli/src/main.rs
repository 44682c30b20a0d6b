//! CLI entry point for wormguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup and
//! exit codes. All audit logic lives in the `wormguard-app` crate.

mod http;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use http::HttpRuleSource;
use std::io::ErrorKind;
use tracing::debug;
use wormguard_app::{
    AuditEngine, FileRuleSource, RuleSource, ScanError, parse_report_json, render_annotations,
    render_markdown, render_summary, resolve_scan_config, run_scan, runtime_error_report,
    serialize_report, verdict_exit_code,
};
use wormguard_settings::Overrides;
use wormguard_types::{WormguardReportV1, ids};

#[derive(Parser, Debug)]
#[command(
    name = "wormguard",
    version,
    about = "Sweep package-manager projects for known-compromised dependencies and worm artifacts"
)]
struct Cli {
    /// Path to wormguard config TOML (a missing file means defaults).
    #[arg(long, global = true, default_value = "wormguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (pnpm|npm).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Log progress to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log per-batch and per-entry detail to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Audit every project under a directory and write artifacts.
    Scan {
        /// Directory to sweep.
        target: Utf8PathBuf,

        /// Fetch rules from this URL instead of the configured one.
        #[arg(long, conflicts_with = "rules_file")]
        rules_url: Option<String>,

        /// Read rules from a local file instead of fetching them.
        #[arg(long)]
        rules_file: Option<Utf8PathBuf>,

        /// Package names per dependency-listing invocation.
        #[arg(long)]
        batch_size: Option<u32>,

        /// Seconds before a dependency-listing invocation is killed.
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/wormguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/wormguard/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/wormguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/wormguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },
}

struct ScanArgs {
    target: Utf8PathBuf,
    rules_url: Option<String>,
    rules_file: Option<Utf8PathBuf>,
    batch_size: Option<u32>,
    timeout_secs: Option<u64>,
    report_out: Utf8PathBuf,
    write_markdown: bool,
    markdown_out: Utf8PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    match cli.cmd {
        Commands::Scan {
            ref target,
            ref rules_url,
            ref rules_file,
            batch_size,
            timeout_secs,
            ref report_out,
            write_markdown,
            ref markdown_out,
        } => {
            let args = ScanArgs {
                target: target.clone(),
                rules_url: rules_url.clone(),
                rules_file: rules_file.clone(),
                batch_size,
                timeout_secs,
                report_out: report_out.clone(),
                write_markdown,
                markdown_out: markdown_out.clone(),
            };
            cmd_scan(&cli, args)
        }
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
    }
}

fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}

fn cmd_scan(cli: &Cli, args: ScanArgs) -> anyhow::Result<()> {
    let target = args
        .target
        .canonicalize_utf8()
        .unwrap_or_else(|_| args.target.clone());
    let mut profile = cli.profile.clone().unwrap_or_else(|| "pnpm".to_string());

    let result = (|| -> anyhow::Result<i32> {
        let cfg_text = read_optional(&cli.config)?;
        let overrides = Overrides {
            profile: cli.profile.clone(),
            rules_url: args.rules_url.clone(),
            batch_size: args.batch_size,
            tool_timeout_secs: args.timeout_secs,
        };
        let resolved = resolve_scan_config(&cfg_text, overrides)?;
        profile = resolved.effective.profile.clone();

        let source: Box<dyn RuleSource> = match &args.rules_file {
            Some(path) => Box::new(FileRuleSource::new(path.clone())),
            None => Box::new(HttpRuleSource::new(resolved.effective.rules_url.clone())),
        };
        let engine = AuditEngine::from_config(resolved.effective);

        let report = run_scan(&target, &engine, source.as_ref())?;

        write_report_file(&args.report_out, &report).context("write report json")?;
        if args.write_markdown {
            write_text_file(&args.markdown_out, &render_markdown(&report))
                .context("write markdown")?;
        }
        print!("{}", render_summary(&report));

        Ok(verdict_exit_code(report.verdict.status))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let reason = err
                .downcast_ref::<ScanError>()
                .map(ScanError::reason)
                .unwrap_or(ids::REASON_TOOL_ERROR);
            let report = runtime_error_report(&profile, reason, &format!("{err:#}"));
            let _ = write_report_file(&args.report_out, &report);
            eprintln!("wormguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

/// Read a file that is allowed to be absent.
fn read_optional(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path, "no config file; using defaults");
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("read config: {}", path)),
    }
}

fn write_report_file(path: &Utf8Path, report: &WormguardReportV1) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<WormguardReportV1> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read report: {}", path))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    let md = render_markdown(&report);

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;

    for annotation in render_annotations(&report, max) {
        println!("{}", annotation);
    }

    Ok(())
}
