//! Tooltip and axis label formatting.
//!
//! The formats mirror the dashboard the data is usually shown in:
//! - tooltip value: numeral `+0,0` (signed, thousands separators)
//! - y-axis tick: numeral `0a` (abbreviated, integer)
//! - tooltip date: moment `ll` (`Jan 2, 2021`)
//! - x-axis date: moment `MM/DD/YY`

use chrono::NaiveDate;

use crate::domain::ChartPoint;

/// Abbreviation steps for `0a`, ascending.
const UNITS: [(f64, &str); 5] = [(1.0, ""), (1e3, "k"), (1e6, "m"), (1e9, "b"), (1e12, "t")];

/// Signed integer with thousands separators: `1234 -> "+1,234"`, `0 -> "+0"`.
pub fn fmt_signed_thousands(v: i64) -> String {
    let sign = if v < 0 { '-' } else { '+' };
    format!("{sign}{}", group_thousands(v.unsigned_abs()))
}

/// Abbreviated integer: `1234 -> "1k"`, `-2500 -> "-3k"`, `999_999 -> "1m"`.
///
/// Rounds half away from zero. A value that would round to 1000 of one unit is
/// shown as 1 of the next unit.
pub fn fmt_abbrev(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }

    let abs = v.abs();
    let mut idx = UNITS
        .iter()
        .rposition(|(unit, _)| abs >= *unit)
        .unwrap_or(0);
    let mut scaled = (abs / UNITS[idx].0).round();
    if scaled >= 1000.0 && idx + 1 < UNITS.len() {
        idx += 1;
        scaled = (abs / UNITS[idx].0).round();
    }

    if scaled == 0.0 {
        return "0".to_string();
    }
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{sign}{}{}", scaled as u64, UNITS[idx].1)
}

pub fn fmt_tooltip_date(d: NaiveDate) -> String {
    d.format("%b %-d, %Y").to_string()
}

pub fn fmt_axis_date(d: NaiveDate) -> String {
    d.format("%m/%d/%y").to_string()
}

/// One tooltip line: `"Jan 2, 2021: +1,234"`.
pub fn tooltip_line(p: &ChartPoint) -> String {
    format!("{}: {}", fmt_tooltip_date(p.x), fmt_signed_thousands(p.y))
}

fn group_thousands(v: u64) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
