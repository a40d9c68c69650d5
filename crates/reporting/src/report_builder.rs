//! Plain-text audit report built from the insight list.
//!
//! The report is a pure function of the insights and the date it is
//! stamped with, so regenerating it without a state change yields the
//! same bytes.

use crate::insights::{Insight, InsightCategory};
use chrono::NaiveDate;

pub const RULE: &str = "----------------------------------------";
pub const REPORT_TITLE: &str = "PROFITGUARD AUDIT REPORT";
pub const REPORT_FOOTER: &str = "Generated by ProfitGuard AI";

struct Section {
    category: InsightCategory,
    heading: &'static str,
    tag: &'static str,
}

const SECTIONS: &[Section] = &[
    Section {
        category: InsightCategory::Kill,
        heading: "1. IMMEDIATE ACTIONS (STOP LOSS)",
        tag: "[STOP]",
    },
    Section {
        category: InsightCategory::Strategy,
        heading: "2. BUSINESS STRATEGY",
        tag: "[ALERT]",
    },
    Section {
        category: InsightCategory::Shift,
        heading: "3. OPPORTUNITIES",
        tag: "[MOVE]",
    },
];

/// Month/day/year without zero padding, e.g. `1/18/2026`.
pub fn format_report_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn build_report(insights: &[Insight], date: NaiveDate) -> String {
    let mut text = format!(
        "{REPORT_TITLE}\nDate: {}\n{RULE}\n\n",
        format_report_date(date)
    );

    for section in SECTIONS {
        let mut items = insights
            .iter()
            .filter(|i| i.category == section.category)
            .peekable();
        if items.peek().is_none() {
            continue;
        }
        text.push_str(section.heading);
        text.push('\n');
        for item in items {
            text.push_str(&format!("- {} {}\n", section.tag, item.body));
        }
        text.push('\n');
    }

    text.push_str(RULE);
    text.push('\n');
    text.push_str(REPORT_FOOTER);
    text
}

/// "Action Required" when anything needs attention, "Optimal" otherwise.
pub fn report_status(insights: &[Insight]) -> &'static str {
    if insights.is_empty() {
        "Optimal"
    } else {
        "Action Required"
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
