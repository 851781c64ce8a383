//! Locale formatting helpers (es-PY)
//!
//! Currency amounts are Guaraníes: no decimal places, dot-grouped
//! thousands, `₲` prefix. Dates render as Spanish medium date plus short
//! time ("12 mar 2026 14:30").

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{FlotillaError, Result};

/// Spanish month abbreviations, indexed by `month0`.
const MESES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun",
    "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Group an unsigned decimal string with dots every three digits.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Format an integer amount as Guaraníes: `₲ 15.000`.
pub fn format_guaranies(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let grouped = group_thousands(&digits);
    if amount < 0 {
        format!("₲ -{}", grouped)
    } else {
        format!("₲ {}", grouped)
    }
}

/// Parse a date-like string in the forms the backend emits.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM[:SS]`,
/// and a bare `YYYY-MM-DD` (midnight).
fn parse_fecha(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    None
}

/// Format a date-like string as Spanish medium date + short time.
///
/// Malformed input is an explicit error rather than a platform-defined
/// "invalid date" rendering.
pub fn format_fecha(input: &str) -> Result<String> {
    let dt = parse_fecha(input).ok_or_else(|| FlotillaError::FechaInvalida(input.to_string()))?;
    let mes = MESES[dt.month0() as usize];
    Ok(format!(
        "{} {} {} {:02}:{:02}",
        dt.day(),
        mes,
        dt.year(),
        dt.hour(),
        dt.minute()
    ))
}
