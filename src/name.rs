//! Turn free-text payroll names of the form `Last, First M. Suffix` into a `(first, last)` join key.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Name '{name}' has no comma separating last and first name")]
    MissingComma { name: String },
    #[error("Name '{name}' has nothing before its comma to use as last name")]
    EmptyLastName { name: String },
}

/// The parts of a name that take part in matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    pub first: String,
    pub last: String,
}

/// Generational suffixes, with `III` ahead of `II` so the longer one wins.
static SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s?\b(?:Jr|III|II|IV)\b\.?").expect("valid suffix pattern"));

/// Remove all generational suffixes (`Jr`, `II`, `III`, `IV`, each with an optional period) from `name`.
pub fn strip_suffixes(name: &str) -> std::borrow::Cow<'_, str> {
    SUFFIX.replace_all(name, "")
}

/// Split `raw` into first and last name after stripping suffixes.
///
/// Everything before the first comma is the last name. Of the rest only the first
/// whitespace-separated token is kept, dropping middle names and initials. Commas left behind
/// by a stripped suffix, as in `Smith, Jr., John`, are skipped.
/// The first name is empty if nothing follows the comma.
pub fn normalize_name(raw: &str) -> Result<Name, Error> {
    let cleaned = strip_suffixes(raw);
    let (last, rest) = cleaned.split_once(',').ok_or_else(|| Error::MissingComma {
        name: raw.to_owned(),
    })?;
    let last = last.trim();
    if last.is_empty() {
        return Err(Error::EmptyLastName {
            name: raw.to_owned(),
        });
    }
    Ok(Name {
        first: rest
            .trim_start_matches(|c: char| c == ',' || c.is_whitespace())
            .split_whitespace().next().unwrap_or_default().to_owned(),
        last: last.to_owned(),
    })
}
