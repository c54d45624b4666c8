pub mod anime;
pub mod release;
pub mod user;
pub mod watchlist;

use thiserror::Error;

pub use anime::{Anime, AnimePatch, NewAnime};
pub use release::{NewRelease, Release, ReleasePatch};
pub use user::{NewUser, User, UserPatch};
pub use watchlist::{NewWatchlistEntry, WatchlistEntry, WatchlistPatch};

/// Rejected textual `field=value` assignment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    #[error("Unknown or non-updatable field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

impl PatchError {
    fn invalid(field: &str, value: &str) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

fn parse_int(field: &str, value: &str) -> Result<i32, PatchError> {
    value
        .trim()
        .parse()
        .map_err(|_| PatchError::invalid(field, value))
}

/// Empty input clears a nullable column.
fn nullable_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Text for a non-null column; blank input is rejected.
pub(super) fn required_text(field: &str, value: &str) -> Result<String, PatchError> {
    nullable_text(value).ok_or_else(|| PatchError::invalid(field, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank_values() {
        assert_eq!(required_text("title", "  Trigun ").unwrap(), "Trigun");
        assert_eq!(
            required_text("release_date", "   "),
            Err(PatchError::InvalidValue {
                field: "release_date".to_string(),
                value: "   ".to_string(),
            })
        );
    }

    #[test]
    fn blank_release_date_assignment_is_invalid() {
        let mut patch = ReleasePatch::default();
        assert!(matches!(
            patch.assign("release_date", ""),
            Err(PatchError::InvalidValue { .. })
        ));
        assert!(patch.is_empty());
    }
}
