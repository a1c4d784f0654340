use std::path::Path;
use std::process;

use carousel_core::{Dialect, Summary};

use crate::{report_error, OutputFormat, EXIT_INVALID, EXIT_USAGE};

pub(crate) fn cmd_validate(file: &Path, dialect: Dialect, output: OutputFormat, quiet: bool) {
    let src = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(EXIT_USAGE);
        }
    };
    tracing::debug!(file = %file.display(), %dialect, bytes = src.len(), "validating");

    match carousel_core::validate(&src, dialect) {
        Ok(summary) => {
            if !quiet {
                print_success(&summary, output);
            }
        }
        Err(e) => {
            tracing::debug!(kind = ?e.kind(), "validation failed");
            if !quiet {
                match output {
                    OutputFormat::Json => {
                        let err_json = serde_json::json!({
                            "status": "error",
                            "error": e.to_json_value(),
                        });
                        let pretty = serde_json::to_string_pretty(&err_json)
                            .unwrap_or_else(|_| err_json.to_string());
                        eprintln!("{}", pretty);
                    }
                    OutputFormat::Text => eprintln!("{}", e),
                }
            }
            process::exit(EXIT_INVALID);
        }
    }
}

fn print_success(summary: &Summary, output: OutputFormat) {
    match output {
        OutputFormat::Json => {
            let ok_json = serde_json::json!({
                "status": "ok",
                "summary": summary,
            });
            let pretty = serde_json::to_string_pretty(&ok_json)
                .unwrap_or_else(|_| ok_json.to_string());
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            println!("OK: program is lexically, syntactically and semantically valid");
            println!(
                "  {} carousel(s), {} product(s), {} transaction(s), {} query(ies)",
                summary.carousels, summary.products, summary.transactions, summary.queries
            );
        }
    }
}
