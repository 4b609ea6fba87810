//! Metadata normalization.

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, TimeZone};

use crate::model::{Metadata, CANONICAL_FIELDS};

const DATE_FIELDS: [&str; 2] = ["CreationDate", "ModDate"];

/// Maps raw information-dictionary entries onto canonical field names.
///
/// Keys are matched ignoring a leading `/`, letter case and `_`, `-` or
/// space separators. Unknown keys and blank values are dropped. Date fields
/// are rewritten as RFC 3339 timestamps when they parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataNormalizer;

impl MetadataNormalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalize raw `(key, value)` pairs.
    ///
    /// When several raw keys map to the same field, the first non-blank
    /// value wins.
    pub fn normalize(&self, raw: &[(String, String)]) -> Metadata {
        let mut metadata = Metadata::new();

        for (key, value) in raw {
            let Some(field) = canonical_name(key) else {
                log::debug!("Dropping non-standard metadata field {:?}", key);
                continue;
            };
            let value = value.trim();
            if value.is_empty() || metadata.contains(field) {
                continue;
            }

            if DATE_FIELDS.contains(&field) {
                match normalize_date(value) {
                    Some(iso) => metadata.insert(field, iso),
                    None => {
                        log::warn!(
                            "Metadata field {} has an unrecognized date {:?}; keeping it as is",
                            field,
                            value
                        );
                        metadata.insert(field, value);
                    }
                }
            } else {
                metadata.insert(field, value);
            }
        }

        metadata
    }
}

/// Canonical name for a raw metadata key, if it is one we keep.
pub fn canonical_name(key: &str) -> Option<&'static str> {
    let folded: String = key
        .trim()
        .trim_start_matches('/')
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect();

    CANONICAL_FIELDS
        .iter()
        .copied()
        .find(|name| name.eq_ignore_ascii_case(&folded))
}

/// Rewrite a PDF or RFC 3339 date as an RFC 3339 timestamp.
pub fn normalize_date(value: &str) -> Option<String> {
    parse_pdf_date(value)
        .or_else(|| DateTime::parse_from_rfc3339(value.trim()).ok())
        .map(|date| date.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Parse a PDF date string (`D:YYYYMMDDHHmmSSOHH'mm'`).
///
/// Everything after the year is optional. A missing time zone is taken
/// as UTC.
pub fn parse_pdf_date(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    let s = s.strip_prefix("D:").unwrap_or(s);

    let digits_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, zone) = s.split_at(digits_end);
    if digits.len() < 4 || digits.len() > 14 || digits.len() % 2 != 0 {
        return None;
    }

    let part = |start: usize, default: u32| -> Option<u32> {
        match digits.get(start..start + 2) {
            Some(d) => d.parse().ok(),
            None => Some(default),
        }
    };
    let year: i32 = digits.get(0..4)?.parse().ok()?;
    let month = part(4, 1)?;
    let day = part(6, 1)?;
    let hour = part(8, 0)?;
    let minute = part(10, 0)?;
    let second = part(12, 0)?;

    let local = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    parse_zone(zone)?.from_local_datetime(&local).single()
}

/// Parse the `Z`, `+HH'mm'` or `-HH'mm'` suffix of a PDF date.
fn parse_zone(zone: &str) -> Option<FixedOffset> {
    let zone = zone.trim();
    let sign = match zone.chars().next() {
        None | Some('Z') | Some('z') => return FixedOffset::east_opt(0),
        Some('+') => 1,
        Some('-') => -1,
        Some(_) => return None,
    };

    let rest = &zone[1..];
    if rest.chars().any(|c| !c.is_ascii_digit() && c != '\'') {
        return None;
    }
    let digits: String = rest.chars().filter(char::is_ascii_digit).collect();
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
