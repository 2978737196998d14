use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{HatchError, Result};

/// Any run of characters that is not safe in a project slug.
static INVALID_NAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9._-]+").unwrap());

/// Turn a raw project name into a lowercase, filesystem-safe slug.
///
/// `"  Project Name  "` becomes `"project-name"` and `"foo/bar"` becomes
/// `"foo-bar"`. Names with nothing usable left fail with
/// [`HatchError::InvalidName`]. Applying it to its own output is a no-op.
pub fn normalize_name(raw: &str) -> Result<String> {
    let clean = raw.trim();
    if clean.is_empty() {
        return Err(HatchError::InvalidName);
    }

    let clean = clean.replace(std::path::MAIN_SEPARATOR, "-");
    let clean = INVALID_NAME_CHARS.replace_all(&clean, "-");
    let clean = clean
        .trim_matches(|c| c == '-' || c == '.')
        .to_lowercase();
    if clean.is_empty() {
        return Err(HatchError::InvalidName);
    }

    Ok(clean)
}

/// Directory name for a project created at `now`: `<YYYY-MM-DD>-<slug>`.
pub fn project_dir_name(raw: &str, now: &DateTime<Local>) -> Result<String> {
    let slug = normalize_name(raw)?;
    Ok(format!("{}-{}", now.format("%Y-%m-%d"), slug))
}
