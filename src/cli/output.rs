use crate::Correction;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonCorrection {
    input: String,
    output: String,
    distance: usize,
    changed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonOutput {
    total_words: usize,
    changed_words: usize,
    corrections: Vec<JsonCorrection>,
}

/// Render the corrected sequence the way it is persisted: one word per line.
pub fn render_text(results: &[Correction]) -> String {
    results
        .iter()
        .map(|r| r.output.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(results: &[Correction]) -> serde_json::Result<String> {
    let corrections: Vec<JsonCorrection> = results
        .iter()
        .map(|r| JsonCorrection {
            input: r.input.clone(),
            output: r.output.clone(),
            distance: r.distance,
            changed: r.changed(),
        })
        .collect();

    let output = JsonOutput {
        total_words: results.len(),
        changed_words: results.iter().filter(|r| r.changed()).count(),
        corrections,
    };

    serde_json::to_string_pretty(&output)
}

pub fn render(results: &[Correction], format: &OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(results)),
        OutputFormat::Json => render_json(results),
    }
}

pub fn print_summary(total: usize, changed: usize, elapsed: Duration, colored: bool) {
    let secs = elapsed.as_secs_f64();
    if colored {
        eprintln!(
            "{} {} words processed, {} corrected in {:.2}s",
            "✓".green().bold(),
            total.to_string().cyan().bold(),
            changed.to_string().yellow().bold(),
            secs
        );
    } else {
        eprintln!("✓ {} words processed, {} corrected in {:.2}s", total, changed, secs);
    }
}

pub fn print_lookup(result: &Correction, colored: bool) {
    if colored {
        println!(
            "{} {} ({}: {})",
            "Closest word:".bold(),
            result.output.green().bold(),
            "distance".dimmed(),
            result.distance.to_string().cyan()
        );
    } else {
        println!("Closest word: {} (distance: {})", result.output, result.distance);
    }
}
