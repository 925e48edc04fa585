#![deny(rust_2018_idioms)]

pub mod name;
pub use name::normalize_name;

pub mod load;

pub mod reconcile;
pub use reconcile::function::reconcile;

pub mod write;
pub use write::function::{write_files_with_missing, write_matched, write_missing};

/// Parse a currency amount like `$45,000.00` into a number, ignoring `$`, thousands separators
/// and surrounding whitespace.
pub fn parse_currency(amount: &str) -> Result<f64, std::num::ParseFloatError> {
    amount.replace(['$', ','], "").trim().parse()
}

/// Like [`parse_currency()`], but also ignore spaces and return `None` if nothing is left.
///
/// Overtime pay is often absent from salary extracts, which is no error.
pub fn parse_optional_currency(amount: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    let amount = amount.replace(['$', ',', ' '], "");
    if amount.is_empty() {
        return Ok(None);
    }
    amount.parse().map(Some)
}
