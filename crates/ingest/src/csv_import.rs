//! Best-effort CSV import for ad-platform exports (Google Ads, Meta, ...).
//!
//! There is no fixed schema. Columns are sniffed by case-insensitive
//! substring match against known header names, and rows never fail on
//! their own: unparseable numbers become zero. Only a file with fewer
//! than two non-blank lines, or one without recognisable cost and revenue
//! columns, is rejected.

use profitguard_core::{Campaign, CostRate, CsvImportError, ProfitGuardResult};
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

pub const NAME_HEADERS: &[&str] = &["Campaign", "Campaign Name", "Ad set name", "Campaign name"];

pub const COST_HEADERS: &[&str] = &[
    "Cost",
    "Amount Spent",
    "Spend",
    "Total Cost",
    "Amount spent (USD)",
];

pub const REVENUE_HEADERS: &[&str] = &[
    "Conv. value",
    "Purchase Conversion Value",
    "Revenue",
    "Total Value",
    "Conversion value",
    "Value",
];

/// Column positions detected in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetectedColumns {
    pub name: Option<usize>,
    pub cost: usize,
    pub revenue: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub columns: DetectedColumns,
    pub campaigns: Vec<Campaign>,
}

/// Parse CSV text into campaigns priced at `cost_rate`.
pub fn parse_campaigns_csv(
    text: &str,
    cost_rate: CostRate,
) -> Result<ImportSummary, CsvImportError> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        warn!(lines = lines.len(), "CSV import rejected: too few lines");
        metrics::counter!("profitguard_csv_imports_total", "outcome" => "empty").increment(1);
        return Err(CsvImportError::EmptyFile);
    }

    let headers: Vec<String> = lines[0]
        .split(',')
        .map(|h| strip_quotes(h.trim()).to_string())
        .collect();

    let columns = detect_columns(&headers).ok_or_else(|| {
        warn!(?headers, "CSV import rejected: cost/revenue columns not found");
        metrics::counter!("profitguard_csv_imports_total", "outcome" => "missing_columns")
            .increment(1);
        CsvImportError::MissingColumns
    })?;
    debug!(?columns, "CSV columns detected");

    let campaigns: Vec<Campaign> = lines[1..]
        .iter()
        .enumerate()
        .map(|(i, line)| parse_row(i, line, &columns, cost_rate))
        .collect();

    info!(
        rows = campaigns.len(),
        cost_rate = cost_rate.value(),
        "CSV import complete"
    );
    metrics::counter!("profitguard_csv_imports_total", "outcome" => "ok").increment(1);

    Ok(ImportSummary { columns, campaigns })
}

/// Read and parse a CSV file from disk.
pub fn import_csv_file(path: impl AsRef<Path>, cost_rate: CostRate) -> ProfitGuardResult<ImportSummary> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    info!(path = %path.display(), bytes = text.len(), "Importing campaigns from CSV");
    Ok(parse_campaigns_csv(&text, cost_rate)?)
}

pub fn detect_columns(headers: &[String]) -> Option<DetectedColumns> {
    let cost = find_column(headers, COST_HEADERS)?;
    let revenue = find_column(headers, REVENUE_HEADERS)?;
    Some(DetectedColumns {
        name: find_column(headers, NAME_HEADERS),
        cost,
        revenue,
    })
}

/// Index of the first header containing any candidate, case-insensitively.
fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.to_lowercase();
        candidates
            .iter()
            .any(|term| header.contains(&term.to_lowercase()))
    })
}

fn parse_row(index: usize, line: &str, columns: &DetectedColumns, cost_rate: CostRate) -> Campaign {
    let values: Vec<&str> = split_row(line)
        .into_iter()
        .map(|v| strip_quotes(v.trim()))
        .collect();

    let name = columns
        .name
        .and_then(|idx| values.get(idx))
        .map(|v| v.to_string())
        .unwrap_or_else(|| format!("Dataset {}", index + 1));

    let spend = parse_amount(values.get(columns.cost).copied().unwrap_or_default());
    let revenue = parse_amount(values.get(columns.revenue).copied().unwrap_or_default());

    Campaign::new(format!("csv-{index}"), name, spend, revenue, cost_rate)
}

/// Split on every comma followed by an even number of double quotes in
/// the rest of the line. For well-formed rows this is "outside quotes"; a
/// stray quote only affects the fields before it.
pub fn split_row(line: &str) -> Vec<&str> {
    let mut quotes_after = line.matches('"').count();
    let mut cuts = Vec::new();
    for (i, ch) in line.char_indices() {
        match ch {
            '"' => quotes_after -= 1,
            ',' if quotes_after % 2 == 0 => cuts.push(i),
            _ => {}
        }
    }

    let mut fields = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        fields.push(&line[start..cut]);
        start = cut + 1;
    }
    fields.push(&line[start..]);
    fields
}

/// Drop one leading and one trailing double quote, if present.
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// Lenient numeric parse: currency symbols, separators and other noise
/// are removed, then the longest numeric prefix is read. Anything
/// unreadable, or too large for `f64`, is zero.
pub fn parse_amount(raw: &str) -> f64 {
    static NOISE: OnceLock<Regex> = OnceLock::new();
    static NUMBER: OnceLock<Regex> = OnceLock::new();

    let noise = NOISE.get_or_init(|| Regex::new(r"[^0-9.\-]+").expect("valid regex"));
    let number = NUMBER.get_or_init(|| Regex::new(r"^-?(\d+(\.\d*)?|\.\d+)").expect("valid regex"));

    let cleaned = noise.replace_all(raw, "");
    number
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
