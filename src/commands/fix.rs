use std::io::Write;

use serde::Serialize;

use iconfix::defaults::FixerDefaults;
use iconfix::fixer::{self, FileOutcome, FixReport};
use iconfix::local_files;
use iconfix::ErrorCode;

use crate::commands::CmdResult;
use crate::output;

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum FixOutput {
    #[serde(rename = "fix")]
    Fix {
        defaults: FixerDefaults,
        #[serde(flatten)]
        report: FixReport,
    },
}

/// Run the fixer and collect the report for JSON output.
pub fn run(defaults: &FixerDefaults) -> CmdResult<FixOutput> {
    let report = fixer::fix_directory(&local_files::local(), defaults, |outcome| {
        log_outcome(outcome)
    })?;

    Ok((
        FixOutput::Fix {
            defaults: defaults.clone(),
            report,
        },
        0,
    ))
}

/// Run the fixer, writing one console line per file to `out` as it is
/// processed. Other failures go to stderr.
pub fn run_console<W: Write>(defaults: &FixerDefaults, out: &mut W) -> i32 {
    // Console write errors are ignored; they never abort the run.
    let result = fixer::fix_directory(&local_files::local(), defaults, |outcome| {
        let _ = writeln!(out, "{}", outcome.status_line());
    });

    match result {
        Ok(report) => {
            for code in &report.missing_codes {
                iconfix::log_status!("iconfix", "No icon file for expected code {}", code);
            }
            0
        }
        Err(err) if err.code == ErrorCode::DirectoryNotFound => {
            let _ = writeln!(out, "Error: {}", err.message);
            output::exit_code_for_error(err.code)
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            output::exit_code_for_error(err.code)
        }
    }
}

fn log_outcome(outcome: &FileOutcome) {
    iconfix::log_status!("iconfix", "{}", outcome.status_line());
}
