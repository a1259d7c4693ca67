use clap::Parser;
use funnelflow::funnel::{Funnel, Step, StepCategory};
use funnelflow::record::SavedFunnel;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::fs;

/// A CLI tool to generate random funnels for exercising the simulator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_funnel.json")]
    output: String,

    /// Number of traffic sources
    #[arg(long, default_value_t = 2)]
    sources: usize,

    /// Number of non-source steps
    #[arg(long, default_value_t = 8)]
    stages: usize,

    /// Maximum number of outgoing edges per step
    #[arg(long, default_value_t = 3)]
    max_branches: usize,

    /// Probability that a step also links back to an earlier step
    #[arg(long, default_value_t = 0.0)]
    backward: f64,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.stages == 0 || cli.max_branches == 0 {
        eprintln!("Error: --stages and --max-branches must both be at least 1");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.backward) {
        eprintln!("Error: --backward must be between 0 and 1");
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "Generating a funnel with {} source(s) and {} stage(s)...",
        cli.sources, cli.stages
    );

    let funnel = generate_funnel(&mut rng, &cli);
    let saved = SavedFunnel {
        name: format!("Generated ({} steps)", funnel.len()),
        date: None,
        steps: funnel.to_records(),
    };

    let json_output = serde_json::to_string_pretty(&saved)?;
    fs::write(&cli.output, json_output)?;

    println!("Successfully generated and saved funnel to '{}'", cli.output);
    Ok(())
}

fn generate_funnel(rng: &mut StdRng, cli: &Cli) -> Funnel {
    let source_categories: Vec<StepCategory> = StepCategory::ALL
        .into_iter()
        .filter(|c| c.is_entry())
        .collect();
    let stage_categories: Vec<StepCategory> = StepCategory::ALL
        .into_iter()
        .filter(|c| !c.is_entry())
        .collect();

    let stage_id = |i: usize| format!("stage-{}", i);
    let mut steps = Vec::with_capacity(cli.sources + cli.stages);

    for i in 0..cli.sources {
        let category = *source_categories.choose(rng).unwrap_or(&StepCategory::Traffic);
        let first = rng.random_range(0..cli.stages.min(3));
        steps.push(
            Step::new(format!("source-{}", i), format!("Source {}", i + 1), category)
                .with_traffic(
                    rng.random_range(500.0..20_000.0_f64).round(),
                    rng.random_range(0.0..3.0),
                    0.0,
                )
                .with_next([stage_id(first)])
                .in_group("Acquisition"),
        );
    }

    for i in 0..cli.stages {
        let category = *stage_categories.choose(rng).unwrap_or(&StepCategory::Landing);
        let priced = matches!(
            category,
            StepCategory::Sales | StepCategory::Upsell | StepCategory::Downsell | StepCategory::Call
        );
        let mut step = Step::new(
            stage_id(i),
            format!("{} {}", category.label(), i + 1),
            category,
        )
        .with_conversion(
            rng.random_range(1.0..80.0_f64).round(),
            if priced {
                rng.random_range(7.0..2000.0_f64).round()
            } else {
                0.0
            },
        );

        let remaining = cli.stages - i - 1;
        if remaining > 0 {
            let branches = rng.random_range(1..=cli.max_branches.min(remaining));
            let targets: Vec<usize> = rand::seq::index::sample(rng, remaining, branches)
                .into_iter()
                .map(|offset| i + 1 + offset)
                .collect();
            step = step.with_next(targets.iter().map(|t| stage_id(*t)));
            if targets.len() > 1 && rng.random_bool(0.5) {
                step = step.with_weight(stage_id(targets[0]), rng.random_range(10.0..90.0_f64).round());
            }
        }
        if i > 0 && rng.random_bool(cli.backward) {
            step = step.with_next([stage_id(rng.random_range(0..i))]);
        }
        steps.push(step);
    }

    Funnel::new(steps)
}
