use anyhow::{Context, Result};
use clap::Parser;
use mailverify_lib::SystemVerifier;
use tracing_subscriber::EnvFilter;

mod args;
mod output;

use args::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.output_format()?;
    let options = cli.verify_options()?;

    let verifier =
        SystemVerifier::from_system(options).context("impossible d'initialiser le vérificateur")?;

    let result = match verifier.verify(&cli.email, &cli.verifier) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("error: {err}");
            if let Some(trace) = err.trace() {
                output::print_failure_trace(trace.rows());
            }
            std::process::exit(1);
        }
    };

    output::print_result(&cli.email, &result, format)?;

    if !result.exists {
        std::process::exit(2);
    }
    Ok(())
}
