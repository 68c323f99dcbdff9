//! Descriptive outcome charts rendered to the terminal
//!
//! Read-only aggregation views over the cleaned frame: Fatal/NonFatal counts
//! grouped by one dimension at a time, rendered as a comfy-table with a
//! proportional bar column. The underlying counts are exposed as a pure
//! function so the rendering stays a thin consumer.

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Table};
use console::style;
use polars::prelude::*;
use std::collections::BTreeMap;

use crate::pipeline::cleaner::column_as_strings;
use crate::pipeline::schema::{
    AGE_BUCKETS, BORO, MONTH, MONTH_NAMES, OUTCOME, PERP_AGE_GROUP, VIC_AGE_GROUP, VIC_RACE,
    VIC_SEX, WEEKDAY, WEEKDAY_NAMES, YEAR,
};

const BAR_WIDTH: usize = 24;

/// Fatal/NonFatal counts for one group value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeCount {
    pub group: String,
    pub fatal: u64,
    pub non_fatal: u64,
}

impl OutcomeCount {
    pub fn total(&self) -> u64 {
        self.fatal + self.non_fatal
    }
}

/// The chart dimensions produced by a full run, with display titles.
pub const CHART_DIMENSIONS: [(&str, &str); 6] = [
    (BORO, "Incidents by borough"),
    (YEAR, "Incidents by year"),
    (MONTH, "Incidents by month"),
    (VIC_AGE_GROUP, "Incidents by victim age group"),
    (VIC_RACE, "Incidents by victim race"),
    (VIC_SEX, "Incidents by victim sex"),
];

/// Count Fatal/NonFatal incidents per value of `column`.
///
/// Groups are ordered by the dimension's natural order: calendar order for
/// months and weekdays, bucket order for age groups, numeric order for years
/// and lexicographic order otherwise. The counts across all groups sum to
/// the frame height.
pub fn outcome_counts(df: &DataFrame, column: &str) -> Result<Vec<OutcomeCount>> {
    let groups = column_as_strings(
        df.column(column)
            .with_context(|| format!("Column '{}' not found", column))?,
    )?;
    let outcomes = column_as_strings(
        df.column(OUTCOME)
            .with_context(|| format!("Column '{}' not found", OUTCOME))?,
    )?;

    let mut counts: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for (row, (group, outcome)) in groups.iter().zip(outcomes.iter()).enumerate() {
        let group = group
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Null group value at row {} in '{}'", row, column))?;
        let outcome = outcome
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Null outcome at row {}", row))?;
        let entry = counts.entry(group).or_insert((0, 0));
        if outcome == "Fatal" {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    let mut result: Vec<OutcomeCount> = counts
        .into_iter()
        .map(|(group, (fatal, non_fatal))| OutcomeCount {
            group,
            fatal,
            non_fatal,
        })
        .collect();
    sort_groups(&mut result, column);

    Ok(result)
}

/// Render one grouped-outcome chart as an indented table with a bar column.
pub fn render_outcome_chart(df: &DataFrame, column: &str, title: &str) -> Result<()> {
    let counts = outcome_counts(df, column)?;
    let max_total = counts.iter().map(OutcomeCount::total).max().unwrap_or(0);

    println!();
    println!(
        "    {} {}",
        style("▸").cyan(),
        style(title.to_uppercase()).white().bold()
    );

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new(column).add_attribute(Attribute::Bold),
        Cell::new("NonFatal").add_attribute(Attribute::Bold),
        Cell::new("Fatal").add_attribute(Attribute::Bold),
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new("").add_attribute(Attribute::Bold),
    ]);

    for count in &counts {
        table.add_row(vec![
            Cell::new(&count.group),
            Cell::new(count.non_fatal),
            Cell::new(count.fatal),
            Cell::new(count.total()),
            Cell::new(bar(count, max_total)),
        ]);
    }

    for line in table.to_string().lines() {
        println!("    {}", line);
    }

    Ok(())
}

/// Render the full chart set for a cleaned frame.
pub fn render_outcome_charts(df: &DataFrame) -> Result<()> {
    for (column, title) in CHART_DIMENSIONS {
        render_outcome_chart(df, column, title)?;
    }
    Ok(())
}

/// Proportional bar: filled blocks for fatal incidents, light blocks for the
/// non-fatal remainder, scaled against the largest group.
fn bar(count: &OutcomeCount, max_total: u64) -> String {
    if max_total == 0 {
        return String::new();
    }
    let scale = |value: u64| ((value * BAR_WIDTH as u64) as f64 / max_total as f64).round() as usize;
    let fatal = scale(count.fatal);
    let non_fatal = scale(count.non_fatal);
    format!("{}{}", "█".repeat(fatal), "░".repeat(non_fatal))
}

fn sort_groups(counts: &mut [OutcomeCount], column: &str) {
    match column {
        MONTH => sort_by_fixed_order(counts, &MONTH_NAMES),
        WEEKDAY => sort_by_fixed_order(counts, &WEEKDAY_NAMES),
        VIC_AGE_GROUP | PERP_AGE_GROUP => sort_by_fixed_order(counts, &AGE_BUCKETS),
        YEAR => counts.sort_by_key(|c| c.group.parse::<i64>().unwrap_or(i64::MAX)),
        // BTreeMap already produced lexicographic order.
        _ => {}
    }
}

fn sort_by_fixed_order(counts: &mut [OutcomeCount], order: &[&str]) {
    counts.sort_by_key(|c| {
        order
            .iter()
            .position(|name| *name == c.group)
            .unwrap_or(order.len())
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_frame() -> DataFrame {
        df! {
            "BORO" => ["BRONX", "QUEENS", "BRONX", "BROOKLYN", "QUEENS", "BRONX"],
            "MONTH" => ["March", "January", "March", "December", "January", "July"],
            "OUTCOME" => ["Fatal", "NonFatal", "NonFatal", "Fatal", "NonFatal", "NonFatal"],
        }
        .unwrap()
    }

    #[test]
    fn test_counts_sum_to_frame_height() {
        let df = chart_frame();
        let counts = outcome_counts(&df, "BORO").unwrap();
        let total: u64 = counts.iter().map(OutcomeCount::total).sum();
        assert_eq!(total as usize, df.height());
    }

    #[test]
    fn test_borough_counts() {
        let df = chart_frame();
        let counts = outcome_counts(&df, "BORO").unwrap();

        let bronx = counts.iter().find(|c| c.group == "BRONX").unwrap();
        assert_eq!(bronx.fatal, 1);
        assert_eq!(bronx.non_fatal, 2);

        // Lexicographic order for boroughs.
        let groups: Vec<&str> = counts.iter().map(|c| c.group.as_str()).collect();
        assert_eq!(groups, vec!["BRONX", "BROOKLYN", "QUEENS"]);
    }

    #[test]
    fn test_month_order_is_calendar_not_alphabetical() {
        let df = chart_frame();
        let counts = outcome_counts(&df, "MONTH").unwrap();
        let groups: Vec<&str> = counts.iter().map(|c| c.group.as_str()).collect();
        assert_eq!(groups, vec!["January", "March", "July", "December"]);
    }
}
