//! bloodgate Reference Runtime — Demo CLI
//!
//! Runs one or all of the six biomarker decision pipeline scenarios. Each
//! scenario wires the bundled pipeline (reference ranges, gate registry,
//! constraint mapping, a mock catalog snapshot) together with a mock
//! biomarker panel.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- iron-overload
//!   cargo run -p demo -- iron-overload-inflammation
//!   cargo run -p demo -- methylation
//!   cargo run -p demo -- hepatotoxicity
//!   cargo run -p demo -- unmatched-intent
//!   cargo run -p demo -- determinism

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bloodgate_contracts::error::BloodgateResult;
use bloodgate_demos::scenarios::{determinism, hepatotoxicity, iron_overload, iron_overload_inflammation, methylation, unmatched_intent};

// ── CLI definition ────────────────────────────────────────────────────────────

/// bloodgate — biomarker-to-protocol decision pipeline demo.
///
/// Each subcommand runs one or all of the six end-to-end scenarios,
/// demonstrating the normalizer, gate engine, constraint translator,
/// catalog governance, routing, and matcher stages in sequence.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "bloodgate biomarker decision pipeline demo",
    long_about = "Runs bloodgate demo scenarios showing biomarker normalization,\n\
                  safety gate evaluation, constraint translation, catalog routing,\n\
                  and intent matching end to end.\n\n\
                  Scenarios:\n\
                  1. Iron overload, male            — hard block on elevated ferritin\n\
                  2. Iron overload + inflammation    — block suppressed by elevated CRP\n\
                  3. MTHFR TT + elevated homocysteine — methylfolate required\n\
                  4. Elevated ALT/AST                — hepatotoxicity caution\n\
                  5. Intent without a matching SKU    — unmatched intent reporting\n\
                  6. Determinism cross-run            — identical pipeline_hash"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all six scenarios in sequence.
    RunAll,
    /// Scenario 1: iron overload, male.
    IronOverload,
    /// Scenario 2: iron overload with acute inflammation.
    IronOverloadInflammation,
    /// Scenario 3: MTHFR TT with elevated homocysteine.
    Methylation,
    /// Scenario 4: elevated ALT/AST.
    Hepatotoxicity,
    /// Scenario 5: intent without a matching SKU.
    UnmatchedIntent,
    /// Scenario 6: determinism cross-run.
    Determinism,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::IronOverload => iron_overload::run_scenario(),
        Command::IronOverloadInflammation => iron_overload_inflammation::run_scenario(),
        Command::Methylation => methylation::run_scenario(),
        Command::Hepatotoxicity => hepatotoxicity::run_scenario(),
        Command::UnmatchedIntent => unmatched_intent::run_scenario(),
        Command::Determinism => determinism::run_scenario(),
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {e}");
            std::process::exit(1);
        }
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run_all() -> BloodgateResult<()> {
    iron_overload::run_scenario()?;
    iron_overload_inflammation::run_scenario()?;
    methylation::run_scenario()?;
    hepatotoxicity::run_scenario()?;
    unmatched_intent::run_scenario()?;
    determinism::run_scenario()?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("bloodgate — Biomarker Decision Pipeline");
    println!("Reference Runtime Demo");
    println!("========================================");
    println!();
    println!("Pipeline stages per request:");
    println!("  [A] Normalizer resolves the panel against reference ranges");
    println!("  [B] Gate engine evaluates tiered safety predicates");
    println!("  [C] Constraint translator maps codes to blocks/cautions/recommendations");
    println!("  [D] Catalog governance + routing eliminate unsafe SKUs");
    println!("  [E] Matcher assembles the final protocol from prioritized intents");
    println!();
}
