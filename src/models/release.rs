use serde::{Deserialize, Serialize};

use super::{PatchError, parse_int, required_text};
use crate::domain::{AnimeId, ReleaseId};

/// A scheduled or aired episode of an anime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: ReleaseId,
    pub anime_id: AnimeId,
    pub episode_number: i32,
    pub release_date: String,
    pub broadcast_slot: String,
}

impl Release {
    /// Whether the release falls on `date` (`YYYY-MM-DD`). Only the date
    /// prefix of `release_date` is compared, so full timestamps match too.
    #[must_use]
    pub fn airs_on(&self, date: &str) -> bool {
        self.release_date.get(..10) == Some(date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelease {
    pub anime_id: AnimeId,
    pub episode_number: i32,
    pub release_date: String,
    pub broadcast_slot: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleasePatch {
    pub anime_id: Option<AnimeId>,
    pub episode_number: Option<i32>,
    pub release_date: Option<String>,
    pub broadcast_slot: Option<String>,
}

impl ReleasePatch {
    pub const FIELDS: &'static [&'static str] =
        &["anime_id", "episode_number", "release_date", "broadcast_slot"];

    #[must_use]
    pub const fn episode_number(mut self, episode_number: i32) -> Self {
        self.episode_number = Some(episode_number);
        self
    }

    #[must_use]
    pub fn release_date(mut self, release_date: impl Into<String>) -> Self {
        self.release_date = Some(release_date.into());
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.anime_id.is_none()
            && self.episode_number.is_none()
            && self.release_date.is_none()
            && self.broadcast_slot.is_none()
    }

    pub fn assign(&mut self, field: &str, value: &str) -> Result<(), PatchError> {
        match field.trim() {
            "anime_id" => self.anime_id = Some(AnimeId::new(parse_int(field, value)?)),
            "episode_number" => self.episode_number = Some(parse_int(field, value)?),
            "release_date" => self.release_date = Some(required_text(field, value)?),
            "broadcast_slot" => self.broadcast_slot = Some(required_text(field, value)?),
            other => return Err(PatchError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(date: &str) -> Release {
        Release {
            id: ReleaseId::new(1),
            anime_id: AnimeId::new(1),
            episode_number: 3,
            release_date: date.to_string(),
            broadcast_slot: "Sundays at 17:00".to_string(),
        }
    }

    #[test]
    fn airs_on_compares_date_prefix() {
        assert!(release("2024-04-07").airs_on("2024-04-07"));
        assert!(release("2024-04-07T17:00:00+09:00").airs_on("2024-04-07"));
        assert!(!release("2024-04-08").airs_on("2024-04-07"));
        assert!(!release("soon").airs_on("2024-04-07"));
    }

    #[test]
    fn assign_is_limited_to_release_columns() {
        let mut patch = ReleasePatch::default();
        patch.assign("episode_number", "4").unwrap();
        patch.assign("release_date", "2024-04-14").unwrap();
        assert_eq!(patch, ReleasePatch::default().episode_number(4).release_date("2024-04-14"));

        assert!(matches!(
            patch.assign("title", "x"),
            Err(PatchError::UnknownField(_))
        ));
        assert!(matches!(
            patch.assign("episode_number", "four"),
            Err(PatchError::InvalidValue { .. })
        ));
    }
}
