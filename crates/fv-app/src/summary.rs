//! Min/max summary table.

use std::fmt;

use fv_core::ValueRange;
use serde::Serialize;

/// Significant digits shown in the table.
pub const TABLE_PRECISION: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinMaxRow {
    pub label: &'static str,
    pub value: f64,
}

/// Two-row table: `Max` then `Min`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinMaxTable {
    pub title: String,
    pub rows: [MinMaxRow; 2],
}

impl MinMaxTable {
    pub fn new(title: impl Into<String>, range: ValueRange) -> Self {
        Self {
            title: title.into(),
            rows: [
                MinMaxRow {
                    label: "Max",
                    value: range.max,
                },
                MinMaxRow {
                    label: "Min",
                    value: range.min,
                },
            ],
        }
    }

    pub fn max(&self) -> f64 {
        self.rows[0].value
    }

    pub fn min(&self) -> f64 {
        self.rows[1].value
    }

    /// Rows with their values formatted for display.
    pub fn formatted(&self) -> Vec<(&'static str, String)> {
        self.rows
            .iter()
            .map(|r| (r.label, format_decimal_or_exponent(r.value, TABLE_PRECISION)))
            .collect()
    }
}

impl fmt::Display for MinMaxTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<6}{}", "", self.title)?;
        for (label, value) in self.formatted() {
            writeln!(f, "{:<6}{}", label, value)?;
        }
        Ok(())
    }
}

/// Round to `precision` significant digits, in decimal notation unless the
/// exponent is below -6 or at least `precision`. Trailing zeros are dropped.
///
/// `1234.5` -> `1.2e+3`, `0.0123` -> `0.012`, `20.0` -> `20`.
pub fn format_decimal_or_exponent(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let p = precision.max(1);
    let sci = format!("{:.*e}", p - 1, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -6 || exp >= p as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{}", trim_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (p as i32 - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
