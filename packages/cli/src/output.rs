//! CLI output formatting utilities.
//!
//! Frame and preset tables, and JSON syntax highlighting.

use boing::SpringConfig;
use colored::Colorize;
use tabled::settings::object::{Columns, Rows};
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::simulate::{Frame, Trace};

/// Decimal places shown for values in tables.
const TABLE_PRECISION: usize = 4;

// ============================================================================
// JSON
// ============================================================================

/// Prints JSON with syntax highlighting.
///
/// Colors:
/// - Keys: Cyan
/// - Strings: Green
/// - Numbers: Yellow
/// - Booleans/Null: Magenta
/// - Brackets/Braces: White (default)
pub fn print_highlighted_json(value: &serde_json::Value) {
    let json_str = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    println!("{}", highlight_json(&json_str));
}

/// Returns a pretty-printed JSON document with ANSI colors applied.
fn highlight_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len() * 2);
    let mut in_string = false;
    let mut is_key = false;
    let mut escape_next = false;
    let mut after_colon = false;
    let mut token = String::new();

    for ch in json.chars() {
        if escape_next {
            token.push(ch);
            escape_next = false;
            continue;
        }

        if ch == '\\' && in_string {
            token.push(ch);
            escape_next = true;
            continue;
        }

        match ch {
            '"' if in_string => {
                token.push(ch);
                let colored = if is_key { token.cyan() } else { token.green() };
                out.push_str(&colored.to_string());
                token.clear();
                in_string = false;
                is_key = false;
            }
            '"' => {
                flush_token(&mut out, &mut token, after_colon);
                token.push(ch);
                in_string = true;
                is_key = !after_colon;
                after_colon = false;
            }
            ':' if !in_string => {
                flush_token(&mut out, &mut token, false);
                out.push_str(&":".white().to_string());
                after_colon = true;
            }
            ',' if !in_string => {
                flush_token(&mut out, &mut token, after_colon);
                out.push_str(&",".white().to_string());
                after_colon = false;
            }
            '{' | '}' | '[' | ']' if !in_string => {
                flush_token(&mut out, &mut token, after_colon);
                out.push_str(&ch.to_string().white().bold().to_string());
                after_colon = false;
            }
            _ => token.push(ch),
        }
    }

    flush_token(&mut out, &mut token, after_colon);
    out
}

/// Appends the pending scalar token, colored by type when it is a value.
fn flush_token(out: &mut String, token: &mut String, is_value: bool) {
    if token.is_empty() {
        return;
    }

    let start = token.find(|c: char| !c.is_whitespace());
    let end = token.rfind(|c: char| !c.is_whitespace()).map(|i| i + 1);

    match (is_value, start, end) {
        (true, Some(start), Some(end)) => {
            let value = &token[start..end];
            let colored = if value == "true" || value == "false" || value == "null" {
                value.magenta().to_string()
            } else if value.parse::<f64>().is_ok() {
                value.yellow().to_string()
            } else {
                value.to_string()
            };
            out.push_str(&token[..start]);
            out.push_str(&colored);
            out.push_str(&token[end..]);
        }
        _ => out.push_str(token),
    }

    token.clear();
}

// ============================================================================
// Tables
// ============================================================================

#[derive(Tabled)]
struct FrameRow {
    #[tabled(rename = "Frame")]
    index: usize,
    #[tabled(rename = "Time (ms)")]
    time: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Velocity")]
    velocity: String,
}

impl From<&Frame> for FrameRow {
    fn from(frame: &Frame) -> Self {
        Self {
            index: frame.index,
            time: format_number(frame.time),
            value: format_number(frame.value),
            velocity: format_number(frame.velocity),
        }
    }
}

#[derive(Tabled)]
struct PresetRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Stiffness")]
    stiffness: String,
    #[tabled(rename = "Damping")]
    damping: String,
    #[tabled(rename = "Mass")]
    mass: String,
    #[tabled(rename = "Ratio")]
    ratio: String,
    #[tabled(rename = "Regime")]
    regime: String,
    #[tabled(rename = "Overdamping")]
    overdamping: String,
}

/// Renders the frames of a run followed by a one-line summary.
pub fn render_trace(trace: &Trace) -> String {
    let config = &trace.config;
    let header = format!(
        "Spring {} → {} (k={}, c={}, m={}, ζ={:.3}, {})",
        config.from_value,
        config.to_value,
        config.stiffness,
        config.damping,
        config.mass,
        trace.damping_ratio,
        trace.regime,
    );

    let rows: Vec<FrameRow> = trace.frames.iter().map(FrameRow::from).collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(0..4)).with(Alignment::right()))
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    let duration = trace.frames.last().map_or(0.0, |frame| frame.time);
    let summary = format!(
        "{} frames, {} ms, settled {}",
        trace.frames.len(),
        format_number(duration),
        format_bool(trace.settled),
    );

    format!("{}\n{table}\n{summary}", header.bold())
}

/// Renders the named presets as a table.
pub fn render_presets(presets: &[(&str, SpringConfig)]) -> String {
    let rows: Vec<PresetRow> = presets
        .iter()
        .map(|(name, config)| PresetRow {
            name: (*name).to_string(),
            stiffness: config.stiffness.to_string(),
            damping: config.damping.to_string(),
            mass: config.mass.to_string(),
            ratio: format!("{:.3}", config.damping_ratio()),
            regime: config.regime().to_string(),
            overdamping: format_bool(config.allows_overdamping),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..5)).with(Alignment::right()))
        .with(Modify::new(Columns::last()).with(Alignment::center()))
        .to_string()
}

/// Formats a float with a fixed number of decimals.
#[must_use]
pub fn format_number(value: f64) -> String { format!("{value:.precision$}", precision = TABLE_PRECISION) }

/// Formats a boolean as a colored string.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}
