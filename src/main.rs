// Reproduces the Bayesian decision-boundary figure (Fig. 5.22, p. 283).
// Run with no arguments for the book's settings; RUST_LOG=debug shows
// training progress and every alpha iteration.
use anyhow::Context;
use clap::Parser;
use log::info;

use ferrite_bayes::{pipeline, ExperimentConfig};

#[derive(Parser, Debug)]
#[command(name = "ferrite-bayes", about = "Bayesian NN decision boundary via the evidence approximation")]
struct Args {
    /// JSON experiment config; unspecified fields keep their defaults.
    #[arg(long)]
    config: Option<String>,

    /// Where to write the PNG figure.
    #[arg(long)]
    output: Option<String>,

    /// Seed for data and weight initialization.
    #[arg(long)]
    seed: Option<u64>,

    /// Also write the final network weights as JSON.
    #[arg(long)]
    save_model: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ExperimentConfig::load_json(path)
            .with_context(|| format!("loading config from {path}"))?,
        None => ExperimentConfig::default(),
    };
    if let Some(output) = args.output {
        config.figure.output = output;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let run = pipeline::run(&config).context("figure run failed")?;
    info!("final alpha: {}", run.classifier.alpha());

    run.save_figure(&config.figure.output)
        .with_context(|| format!("writing figure to {}", config.figure.output))?;

    if let Some(path) = args.save_model {
        run.classifier.network().save_json(&path)
            .with_context(|| format!("saving model to {path}"))?;
        info!("model written to {path}");
    }

    Ok(())
}
