// src/bin/diffgate.rs
//! Build-tool host shim: parses arguments, feeds analyzer logs through the
//! parsers, runs the diff engine and the gate, and turns FAIL into a
//! non-zero exit code.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process;

use diffgate_core::diff::{self, DiffRequest};
use diffgate_core::gate::QualityGate;
use diffgate_core::parse::{
    CheckerFrameworkLogParser, CheckstyleLogParser, ErrorProneLogParser, LogParser,
};
use diffgate_core::report;
use diffgate_core::store::ResultStore;
use diffgate_core::types::{AnalyzerKind, ModuleResults, Severity, StepResult};

#[derive(Parser)]
#[command(name = "diffgate")]
#[command(about = "Diff-scoped quality gate over static-analysis logs")]
struct Cli {
    /// Repository root containing the git checkout
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Module name the provided logs belong to
    #[arg(long, default_value = "default")]
    module: String,

    /// Error Prone log file
    #[arg(long, value_name = "FILE")]
    error_prone: Option<PathBuf>,

    /// Checker Framework log file
    #[arg(long, value_name = "FILE")]
    checker_framework: Option<PathBuf>,

    /// Checkstyle log file
    #[arg(long, value_name = "FILE")]
    checkstyle: Option<PathBuf>,

    /// Analyzers whose violations report but never fail the gate
    #[arg(long, value_name = "TOOL")]
    permissive: Vec<String>,

    /// Minimum severity counted by the gate (info|minor|major|critical|blocker)
    #[arg(long, default_value = "minor")]
    min_severity: String,

    /// Which changes count (committed|working-tree|both)
    #[arg(long, default_value = "both")]
    mode: String,

    /// Explicit diff base ref (default: merge base with the upstream ref)
    #[arg(long)]
    base: Option<String>,

    /// Explicit diff target ref (default: HEAD)
    #[arg(long)]
    target: Option<String>,

    /// Emit the verdict as JSON instead of the console summary
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let min_severity: Severity = cli
        .min_severity
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid --min-severity: {e}"))?;

    let mode: diff::DiffMode = cli
        .mode
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid --mode: {e}"))?;

    let permissive = parse_permissive(&cli.permissive)?;

    let steps = run_parsers(&cli, &permissive)?;

    let mut store = ResultStore::new(vec![cli.module.clone()]);
    store.store(ModuleResults::new(cli.module.clone(), steps));

    let request = DiffRequest {
        base: cli.base.clone(),
        target: cli.target.clone(),
        mode,
    };
    let ranges = diff::changed_lines(&cli.repo, &request);

    let verdict = QualityGate::new(min_severity).evaluate(&store.get_all(), ranges.as_ref());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        report::print_verdict(&verdict);
    }

    if !verdict.passed() {
        process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_permissive(tools: &[String]) -> Result<Vec<AnalyzerKind>> {
    tools
        .iter()
        .map(|t| {
            t.parse()
                .map_err(|e| anyhow::anyhow!("invalid --permissive: {e}"))
        })
        .collect()
}

/// Parses each provided log into a step result, tagged permissive when its
/// analyzer was listed as such.
fn run_parsers(cli: &Cli, permissive: &[AnalyzerKind]) -> Result<Vec<StepResult>> {
    let parsers: Vec<(Box<dyn LogParser>, Option<&PathBuf>)> = vec![
        (
            Box::new(ErrorProneLogParser::new(&cli.repo)),
            cli.error_prone.as_ref(),
        ),
        (
            Box::new(CheckerFrameworkLogParser::new(&cli.repo)),
            cli.checker_framework.as_ref(),
        ),
        (
            Box::new(CheckstyleLogParser::new(&cli.repo)),
            cli.checkstyle.as_ref(),
        ),
    ];

    let mut steps = Vec::new();

    for (parser, log_path) in parsers {
        let Some(log_path) = log_path else {
            continue;
        };

        let file = File::open(log_path)
            .with_context(|| format!("could not open {} log: {}", parser.tool(), log_path.display()))?;
        let mut reader = BufReader::new(file);

        let violations = parser
            .parse(&mut reader)
            .with_context(|| format!("failed to parse {} log", parser.tool()))?;

        let tool = parser.tool();
        steps.push(StepResult::new(
            tool,
            permissive.contains(&tool),
            violations,
        ));
    }

    Ok(steps)
}
