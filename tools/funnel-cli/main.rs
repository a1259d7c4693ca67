use clap::Parser;
use funnelflow::format::ReportFormatter;
use funnelflow::funnel::{Funnel, Template};
use funnelflow::record::{FunnelDocument, IntoFunnel};
use funnelflow::simulation::{DEFAULT_PASSES, Simulator};
use funnelflow::validate::{is_clean, validate};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Simulate visitor flow, revenue and cost through a marketing funnel
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a funnel JSON file (a saved funnel or a bare array of steps).
    /// The built-in sample funnel is used when omitted.
    funnel_path: Option<String>,

    /// Simulate a built-in template instead of a file
    /// (empty, sales-page, webinar, application, book-funnel, email-marketing, survey)
    #[arg(long, conflicts_with = "funnel_path")]
    template: Option<Template>,

    /// Maximum number of relaxation passes
    #[arg(short, long, default_value_t = DEFAULT_PASSES)]
    passes: usize,

    /// Stop early once no step's output changes by this much between passes
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Print the full report as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Check the funnel for structural problems before simulating
    #[arg(long)]
    validate: bool,

    /// Refuse to simulate when validation finds errors (implies --validate)
    #[arg(long)]
    strict: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let load_start = Instant::now();
    let (name, funnel) = match cli.template {
        Some(template) => (template.to_string(), template.build()),
        None => load_funnel(cli.funnel_path.as_deref()),
    };
    info!(steps = funnel.len(), elapsed = ?load_start.elapsed(), "funnel loaded");

    if cli.validate || cli.strict {
        let issues = validate(&funnel);
        if issues.is_empty() {
            eprintln!("No structural issues found.");
        } else {
            eprintln!("{}", ReportFormatter::format_issues(&issues));
        }
        if cli.strict && !is_clean(&issues) {
            exit_with_error("Validation failed; not simulating.");
        }
    }

    let mut builder = Simulator::builder().passes(cli.passes);
    if let Some(tolerance) = cli.tolerance {
        builder = builder.tolerance(tolerance);
    }
    let simulator = builder.build();

    let sim_start = Instant::now();
    let report = simulator.simulate(&funnel);
    info!(passes_run = report.passes_run, elapsed = ?sim_start.elapsed(), "simulation complete");

    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize report: {}", e)));
        println!("{}", json);
    } else {
        println!("Funnel: {} ({} steps)\n", name, funnel.len());
        println!("{}", ReportFormatter::format_report(&report));
    }
}

fn load_funnel(path: Option<&str>) -> (String, Funnel) {
    let Some(path) = path else {
        eprintln!("No funnel file provided. Using the built-in sample funnel.");
        return ("Sample".to_string(), Funnel::sample());
    };

    let document = FunnelDocument::from_file(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load '{}': {}", path, e)));
    let name = document.name().unwrap_or(path).to_string();
    let funnel = document
        .into_funnel()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert '{}': {}", path, e)));
    (name, funnel)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
