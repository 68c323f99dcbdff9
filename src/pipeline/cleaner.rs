//! Whole-frame cleaning: pruning, parsing, filtering and derived fields
//!
//! The cleaner is a pure function from the raw frame to a new cleaned frame
//! plus an exact accounting of every dropped row. The input frame is never
//! mutated. The missing-value policy is deliberately strict: unsolved cases
//! leave perpetrator fields blank by design, and keeping partial rows would
//! bias the categorical counts, so a row with any missing field is dropped
//! whole. That trades sample size for completeness.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveTime};
use polars::prelude::*;
use serde::Serialize;

use super::schema::{
    Outcome, AGE_BUCKETS, MONTH_NAMES, OCCUR_DATE, OCCUR_TIME, PASSTHROUGH_COLUMNS,
    PERP_AGE_GROUP, PRUNED_COLUMNS, STATISTICAL_MURDER_FLAG, VIC_AGE_GROUP, WEEKDAY_NAMES,
};

/// Placeholder literal the published extract uses for absent values.
const NULL_PLACEHOLDER: &str = "(null)";

/// Exact per-reason accounting of the cleaning pass.
///
/// Invariant: `kept_rows + dropped_missing + dropped_bad_date +
/// dropped_bad_age + dropped_bad_flag == raw_rows`. Each dropped row is
/// counted once, under the first check it failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    /// Rows in the raw frame.
    pub raw_rows: usize,
    /// Rows surviving every check.
    pub kept_rows: usize,
    /// Rows with at least one empty field.
    pub dropped_missing: usize,
    /// Rows whose occurrence date or time matched no accepted format.
    pub dropped_bad_date: usize,
    /// Rows with an age-group literal outside the bucket set.
    pub dropped_bad_age: usize,
    /// Rows whose murder flag was neither boolean nor a recognized literal.
    pub dropped_bad_flag: usize,
}

impl CleanReport {
    pub fn dropped_total(&self) -> usize {
        self.dropped_missing + self.dropped_bad_date + self.dropped_bad_age + self.dropped_bad_flag
    }
}

/// Clean the raw incident frame.
///
/// Prunes unused columns, trims every field, drops incomplete rows, validates
/// age-group buckets, maps the murder flag to the binary [`Outcome`] and adds
/// the calendar-derived YEAR / MONTH / WEEKDAY columns. Surviving rows keep
/// their input order.
pub fn clean_incidents(raw: &DataFrame) -> Result<(DataFrame, CleanReport)> {
    let pruned: Vec<String> = PRUNED_COLUMNS
        .iter()
        .filter(|name| raw.column(name).is_ok())
        .map(|name| name.to_string())
        .collect();
    let df = raw.drop_many(&pruned);

    let height = df.height();

    let date_raw = column_as_strings(
        df.column(OCCUR_DATE)
            .with_context(|| format!("Column '{}' not found", OCCUR_DATE))?,
    )?;
    let time_raw = column_as_strings(
        df.column(OCCUR_TIME)
            .with_context(|| format!("Column '{}' not found", OCCUR_TIME))?,
    )?;
    let flag_raw = column_as_strings(
        df.column(STATISTICAL_MURDER_FLAG)
            .with_context(|| format!("Column '{}' not found", STATISTICAL_MURDER_FLAG))?,
    )?;

    let mut passthrough_raw: Vec<(&str, Vec<Option<String>>)> =
        Vec::with_capacity(PASSTHROUGH_COLUMNS.len());
    for name in PASSTHROUGH_COLUMNS {
        let values = column_as_strings(
            df.column(name)
                .with_context(|| format!("Column '{}' not found", name))?,
        )?;
        passthrough_raw.push((name, values));
    }

    let mut report = CleanReport {
        raw_rows: height,
        ..Default::default()
    };

    let mut out_passthrough: Vec<Vec<String>> =
        vec![Vec::with_capacity(height); PASSTHROUGH_COLUMNS.len()];
    let mut out_date: Vec<String> = Vec::with_capacity(height);
    let mut out_time: Vec<String> = Vec::with_capacity(height);
    let mut out_outcome: Vec<String> = Vec::with_capacity(height);
    let mut out_year: Vec<i32> = Vec::with_capacity(height);
    let mut out_month: Vec<String> = Vec::with_capacity(height);
    let mut out_weekday: Vec<String> = Vec::with_capacity(height);

    for row in 0..height {
        let date_field = normalize_field(date_raw[row].as_deref());
        let time_field = normalize_field(time_raw[row].as_deref());
        let flag_field = normalize_field(flag_raw[row].as_deref());

        let mut fields: Vec<String> = Vec::with_capacity(PASSTHROUGH_COLUMNS.len());
        let mut any_missing =
            date_field.is_none() || time_field.is_none() || flag_field.is_none();
        for (_, values) in &passthrough_raw {
            match normalize_field(values[row].as_deref()) {
                Some(value) => fields.push(value),
                None => any_missing = true,
            }
        }
        if any_missing {
            report.dropped_missing += 1;
            continue;
        }

        // Unwraps are safe: the missing check above rejected None.
        let date_field = date_field.unwrap();
        let time_field = time_field.unwrap();
        let flag_field = flag_field.unwrap();

        let date = match parse_occur_date(&date_field) {
            Some(date) => date,
            None => {
                report.dropped_bad_date += 1;
                continue;
            }
        };
        let time = match parse_occur_time(&time_field) {
            Some(time) => time,
            None => {
                report.dropped_bad_date += 1;
                continue;
            }
        };

        let flag = match parse_murder_flag(&flag_field) {
            Some(flag) => flag,
            None => {
                report.dropped_bad_flag += 1;
                continue;
            }
        };

        let vic_age = field_value(&passthrough_raw, &fields, VIC_AGE_GROUP);
        let perp_age = field_value(&passthrough_raw, &fields, PERP_AGE_GROUP);
        if !AGE_BUCKETS.contains(&vic_age) || !AGE_BUCKETS.contains(&perp_age) {
            report.dropped_bad_age += 1;
            continue;
        }

        for (slot, value) in out_passthrough.iter_mut().zip(fields) {
            slot.push(value);
        }
        out_date.push(date.format("%Y-%m-%d").to_string());
        out_time.push(time.format("%H:%M:%S").to_string());
        out_outcome.push(Outcome::from_murder_flag(flag).as_str().to_string());
        out_year.push(date.year());
        out_month.push(MONTH_NAMES[date.month0() as usize].to_string());
        out_weekday.push(WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize].to_string());
    }

    report.kept_rows = out_date.len();

    let mut columns: Vec<Column> = Vec::with_capacity(PASSTHROUGH_COLUMNS.len() + 6);
    columns.push(Column::new(OCCUR_DATE.into(), out_date));
    columns.push(Column::new(OCCUR_TIME.into(), out_time));
    for ((name, _), values) in passthrough_raw.iter().zip(out_passthrough) {
        columns.push(Column::new((*name).into(), values));
    }
    columns.push(Column::new(super::schema::OUTCOME.into(), out_outcome));
    columns.push(Column::new(super::schema::YEAR.into(), out_year));
    columns.push(Column::new(super::schema::MONTH.into(), out_month));
    columns.push(Column::new(super::schema::WEEKDAY.into(), out_weekday));

    let cleaned = DataFrame::new(columns).context("Failed to assemble cleaned frame")?;

    Ok((cleaned, report))
}

/// Trim a raw field; empty strings and the `(null)` placeholder count as
/// missing.
pub fn normalize_field(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() || trimmed == NULL_PLACEHOLDER {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse an occurrence date under the prioritized accepted formats:
/// month/day/year, then month/year (day 1 assumed), then year/month/day.
/// First matching format wins.
pub fn parse_occur_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Some(date);
    }
    // Month/year only: the extract occasionally truncates the day.
    if let Some((month, year)) = s.split_once('/') {
        if let (Ok(month), Ok(year)) = (month.parse::<u32>(), year.parse::<i32>()) {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, 1) {
                return Some(date);
            }
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }
    None
}

/// Parse an occurrence time as `HH:MM:SS`, falling back to `HH:MM`.
pub fn parse_occur_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

/// Parse the statistical murder flag. Accepts the boolean literals the
/// extract has used over the years, case-insensitively.
pub fn parse_murder_flag(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "y" | "yes" | "1" => Some(true),
        "false" | "n" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Convert a column of any primitive dtype to trimmed-later string values.
/// Nulls stay `None`; numeric and boolean values render as their literal form.
pub fn column_as_strings(col: &Column) -> Result<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let cast = col.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            let cast = col.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map(|n| format!("{}", n)))
                .collect()
        }
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}

fn field_value<'a>(
    passthrough: &[(&str, Vec<Option<String>>)],
    fields: &'a [String],
    name: &str,
) -> &'a str {
    let idx = passthrough
        .iter()
        .position(|(col, _)| *col == name)
        .expect("passthrough column order is fixed");
    &fields[idx]
}
