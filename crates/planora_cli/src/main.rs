//! Command-line entry point.
//!
//! # Responsibility
//! - Run schedule generation on text from arguments or stdin.
//! - Print the result (or the error body) as JSON on stdout.
//!
//! Environment:
//! - `PLANORA_LOG_DIR`: absolute directory for rolling logs (logging is off when unset).
//! - `PLANORA_LOG_LEVEL`: `trace|debug|info|warn|error`.

use clap::Parser;
use planora_core::{
    default_log_level, init_logging, ExtractionOptions, FallbackPolicy, RuleBasedSource,
    ScheduleService,
};
use std::io::Read;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "planora",
    version,
    about = "Turn a plain-language description of a day into a sorted schedule",
    after_help = "Reads TEXT from stdin when no TEXT arguments are given."
)]
struct Cli {
    /// Fail instead of returning the sample schedule when no times are found
    #[arg(long)]
    no_fallback: bool,

    /// Minutes given to a time that has no end partner
    #[arg(long, value_name = "MINUTES")]
    span: Option<u32>,

    /// Description of the day; joined with spaces
    text: Vec<String>,
}

impl Cli {
    fn options(&self) -> ExtractionOptions {
        ExtractionOptions {
            fallback: if self.no_fallback {
                FallbackPolicy::Disabled
            } else {
                FallbackPolicy::Substitute
            },
        }
    }

    fn source(&self) -> RuleBasedSource {
        match self.span {
            Some(minutes) => RuleBasedSource::new().with_default_span(minutes),
            None => RuleBasedSource::new(),
        }
    }

    fn joined_text(&self) -> Option<String> {
        (!self.text.is_empty()).then(|| self.text.join(" "))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(log_dir) = std::env::var("PLANORA_LOG_DIR") {
        let level = std::env::var("PLANORA_LOG_LEVEL")
            .unwrap_or_else(|_| default_log_level().to_string());
        if let Err(err) = init_logging(level.as_str(), log_dir.as_str()) {
            eprintln!("logging disabled: {err}");
        }
    }

    let text = match cli.joined_text() {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            if let Err(err) = std::io::stdin().read_to_string(&mut buffer) {
                eprintln!("failed to read stdin: {err}");
                return ExitCode::from(2);
            }
            buffer
        }
    };

    let service = ScheduleService::with_options(cli.source(), cli.options());

    let (json, code) = match service.generate_schedule(text.as_str()) {
        Ok(schedule) => {
            if schedule.is_fallback() {
                eprintln!("no times recognized; showing the sample schedule");
            }
            (serde_json::to_string_pretty(&schedule), ExitCode::SUCCESS)
        }
        Err(err) => (serde_json::to_string_pretty(&err.to_body()), ExitCode::from(1)),
    };
    match json {
        Ok(json) => {
            println!("{json}");
            code
        }
        Err(err) => {
            eprintln!("failed to encode output: {err}");
            ExitCode::from(1)
        }
    }
}
