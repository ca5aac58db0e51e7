use anyhow::Result;
use mailverify_lib::VerificationResult;
use serde::Serialize;

use crate::args::Format;

#[derive(Serialize)]
struct JsonReport<'a> {
    email: &'a str,
    #[serde(flatten)]
    result: &'a VerificationResult,
}

pub fn print_result(email: &str, result: &VerificationResult, format: Format) -> Result<()> {
    match format {
        Format::Human => print_human(email, result),
        Format::Json => {
            let report = JsonReport { email, result };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn print_human(email: &str, result: &VerificationResult) {
    let verdict = if result.exists { "EXISTS" } else { "NOT FOUND" };
    match result.strategy {
        Some(strategy) => println!("{email}: {verdict} (via {strategy})"),
        None => println!("{email}: {verdict}"),
    }
    println!("Trace:");
    for row in result.trace() {
        println!("  {row}");
    }
}

/// Trace rows gathered before a decode failure.
pub fn print_failure_trace(rows: &[String]) {
    eprintln!("Trace:");
    for row in rows {
        eprintln!("  {row}");
    }
}
