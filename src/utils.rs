use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::Period;

/// Largest base64 payload accepted by `PUT /playlists/{id}/images`.
pub const MAX_COVER_IMAGE_BYTES: usize = 256 * 1024;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Playlist name suggested when the user doesn't pick one, e.g. `Saved Songs 7-3-2024`.
pub fn default_playlist_name(date: NaiveDate) -> String {
    format!("Saved Songs {}", date.format("%-d-%-m-%Y"))
}

/// Oldest save timestamp still inside `period`, measured back from `now`.
///
/// Tracks saved at or before the cutoff are excluded. `AllTime` reaches back
/// to the Unix epoch.
pub fn period_cutoff(period: Period, now: DateTime<Utc>) -> DateTime<Utc> {
    match period {
        Period::LastDay => now - Duration::days(1),
        Period::LastMonth => now
            .checked_sub_months(Months::new(1))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        Period::LastYear => now
            .checked_sub_months(Months::new(12))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        Period::AllTime => DateTime::<Utc>::UNIX_EPOCH,
    }
}

/// Parses a period as accepted on the command line.
///
/// Accepts `last-day`, `last-month`, `last-year`, `all-time`, their
/// underscore or camel case spellings and the short forms `day`, `month`,
/// `year`, `all`.
pub fn parse_period(s: &str) -> Result<Period, String> {
    let normalized: String = s
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();

    match normalized.as_str() {
        "lastday" | "day" => Ok(Period::LastDay),
        "lastmonth" | "month" => Ok(Period::LastMonth),
        "lastyear" | "year" => Ok(Period::LastYear),
        "alltime" | "all" => Ok(Period::AllTime),
        _ => Err(format!(
            "invalid period '{}': expected one of last-day, last-month, last-year, all-time",
            s
        )),
    }
}

/// Base64 encodes a JPEG for use as a playlist cover.
///
/// Rejects data without the JPEG magic bytes and payloads above
/// [`MAX_COVER_IMAGE_BYTES`] once encoded.
pub fn encode_cover_image(bytes: &[u8]) -> Result<String, String> {
    if !bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Err("cover image must be a JPEG".to_string());
    }

    let encoded = STANDARD.encode(bytes);
    if encoded.len() > MAX_COVER_IMAGE_BYTES {
        return Err(format!(
            "cover image is {} KiB once encoded, the limit is {} KiB",
            encoded.len() / 1024,
            MAX_COVER_IMAGE_BYTES / 1024
        ));
    }

    Ok(encoded)
}

/// Checks the options of a `create` run before anything is sent.
///
/// `library_total` is the number of saved songs reported by the service.
pub fn validate_options(
    playlist_name: &str,
    total_songs: usize,
    library_total: usize,
) -> Result<(), Vec<String>> {
    let mut issues = Vec::new();

    if playlist_name.trim().is_empty() {
        issues.push("Playlist Name cannot be empty".to_string());
    }

    if total_songs > library_total {
        issues.push(format!(
            "Number of songs must be less than or equal to {}",
            library_total
        ));
    }

    if issues.is_empty() { Ok(()) } else { Err(issues) }
}
