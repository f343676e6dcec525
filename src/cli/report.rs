//! Rendering of library-type verdicts for the terminal.

use crate::cli::OutputFormat;
use crate::core::types::SamplingMode;
use crate::sampling::config::SamplingConfig;
use crate::sampling::decision::LibraryTypeVerdict;

/// Print a verdict in the requested format
///
/// # Errors
///
/// Returns an error if the JSON output cannot be serialized.
pub fn print_verdict(
    verdict: &LibraryTypeVerdict,
    reference: &str,
    config: &SamplingConfig,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            print_text_verdict(verdict, reference, config, verbose);
            Ok(())
        }
        OutputFormat::Json => print_json_verdict(verdict, reference, config),
        OutputFormat::Tsv => {
            print_tsv_verdict(verdict, reference);
            Ok(())
        }
    }
}

/// First line of the text report
fn headline(verdict: &LibraryTypeVerdict, config: &SamplingConfig) -> String {
    if verdict.label.is_determined() {
        format!(
            "Library type: {} ({})",
            verdict.label.code(),
            verdict.label.description()
        )
    } else if verdict.success {
        format!(
            "Library type could not be determined: {} inward and {} outward pairs",
            verdict.tally.inward_total(),
            verdict.tally.outward_total()
        )
    } else {
        format!(
            "Library type could not be determined: {} after {} attempts ({} of {} confident)",
            verdict.termination,
            verdict.attempts,
            verdict.tally.confident(),
            config.target_confident
        )
    }
}

fn print_text_verdict(
    verdict: &LibraryTypeVerdict,
    reference: &str,
    config: &SamplingConfig,
    verbose: bool,
) {
    println!("{}", headline(verdict, config));

    println!();
    println!("   Mode: {}", verdict.mode);
    println!("   Reference: {reference}");
    println!(
        "   Attempts: {} of {}",
        verdict.attempts, config.max_attempts
    );

    let tally = &verdict.tally;
    match verdict.mode {
        SamplingMode::Single => {
            println!("   Forward: {}, Reverse: {}", tally.forward, tally.reverse);
        }
        SamplingMode::Paired => {
            println!(
                "   Inward: {} forward, {} reverse",
                tally.inward_forward, tally.inward_reverse
            );
            println!(
                "   Outward: {} forward, {} reverse",
                tally.outward_forward, tally.outward_reverse
            );
        }
    }
    println!("   Unclassified: {}", tally.unclassified);

    if verbose {
        let discarded = &verdict.discarded;
        println!();
        println!("   Discarded:");
        println!("     Ambiguous read 1: {}", discarded.ambiguous);
        if verdict.mode == SamplingMode::Paired {
            println!("     Mate not found: {}", discarded.mate_not_found);
            println!("     Ambiguous mate: {}", discarded.mate_ambiguous);
            println!("     Different targets: {}", discarded.target_mismatch);
        }
        println!();
        println!(
            "   Thresholds: stranded ratio {}, inward max {}, outward min {}",
            config.decision.stranded_ratio,
            config.orientation.inward_max_distance,
            config.orientation.outward_min_distance
        );
    }
}

fn print_json_verdict(
    verdict: &LibraryTypeVerdict,
    reference: &str,
    config: &SamplingConfig,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "reference": reference,
        "mode": verdict.mode,
        "library_type": verdict.label,
        "description": verdict.label.description(),
        "success": verdict.success,
        "termination": verdict.termination,
        "attempts": verdict.attempts,
        "tallies": verdict.tally,
        "confident": verdict.tally.confident(),
        "discarded": verdict.discarded,
        "config": config,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

const TSV_COLUMNS: [&str; 13] = [
    "reference",
    "mode",
    "library_type",
    "success",
    "termination",
    "attempts",
    "F",
    "R",
    "IF",
    "IR",
    "OF",
    "OR",
    "unclassified",
];

fn print_tsv_verdict(verdict: &LibraryTypeVerdict, reference: &str) {
    println!("{}", TSV_COLUMNS.join("\t"));

    let tally = &verdict.tally;
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        reference,
        verdict.mode,
        verdict.label.code(),
        verdict.success,
        verdict.termination,
        verdict.attempts,
        tally.forward,
        tally.reverse,
        tally.inward_forward,
        tally.inward_reverse,
        tally.outward_forward,
        tally.outward_reverse,
        tally.unclassified
    );
}
