use serde::{Deserialize, Serialize};

use super::{PatchError, nullable_text, parse_int, required_text};
use crate::domain::AnimeId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anime {
    pub id: AnimeId,
    pub external_id: i32,
    pub title: String,
    pub synopsis: Option<String>,
    pub episode_count: Option<i32>,
    pub status: String,
    pub air_start: Option<String>,
    pub air_end: Option<String>,
    pub broadcast_slot: Option<String>,
}

/// Anime record as projected from the catalog, before it has a surrogate key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnime {
    pub external_id: i32,
    pub title: String,
    pub synopsis: Option<String>,
    pub episode_count: Option<i32>,
    pub status: String,
    pub air_start: Option<String>,
    pub air_end: Option<String>,
    pub broadcast_slot: Option<String>,
}

impl NewAnime {
    /// Field name and display value pairs, in catalog order.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        fn show<T: ToString>(value: Option<&T>) -> String {
            value.map_or_else(|| "-".to_string(), ToString::to_string)
        }

        vec![
            ("external_id", self.external_id.to_string()),
            ("title", self.title.clone()),
            ("synopsis", show(self.synopsis.as_ref())),
            ("episode_count", show(self.episode_count.as_ref())),
            ("status", self.status.clone()),
            ("air_start", show(self.air_start.as_ref())),
            ("air_end", show(self.air_end.as_ref())),
            ("broadcast_slot", show(self.broadcast_slot.as_ref())),
        ]
    }
}

impl From<Anime> for NewAnime {
    fn from(anime: Anime) -> Self {
        Self {
            external_id: anime.external_id,
            title: anime.title,
            synopsis: anime.synopsis,
            episode_count: anime.episode_count,
            status: anime.status,
            air_start: anime.air_start,
            air_end: anime.air_end,
            broadcast_slot: anime.broadcast_slot,
        }
    }
}

/// Partial update of an anime row. `None` leaves a column untouched;
/// `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimePatch {
    pub external_id: Option<i32>,
    pub title: Option<String>,
    pub synopsis: Option<Option<String>>,
    pub episode_count: Option<Option<i32>>,
    pub status: Option<String>,
    pub air_start: Option<Option<String>>,
    pub air_end: Option<Option<String>>,
    pub broadcast_slot: Option<Option<String>>,
}

impl AnimePatch {
    /// Columns accepted by [`AnimePatch::assign`].
    pub const FIELDS: &'static [&'static str] = &[
        "external_id",
        "title",
        "synopsis",
        "episode_count",
        "status",
        "air_start",
        "air_end",
        "broadcast_slot",
    ];

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub const fn episode_count(mut self, episode_count: Option<i32>) -> Self {
        self.episode_count = Some(episode_count);
        self
    }

    #[must_use]
    pub fn synopsis(mut self, synopsis: Option<String>) -> Self {
        self.synopsis = Some(synopsis);
        self
    }

    #[must_use]
    pub fn broadcast_slot(mut self, broadcast_slot: Option<String>) -> Self {
        self.broadcast_slot = Some(broadcast_slot);
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.external_id.is_none()
            && self.title.is_none()
            && self.synopsis.is_none()
            && self.episode_count.is_none()
            && self.status.is_none()
            && self.air_start.is_none()
            && self.air_end.is_none()
            && self.broadcast_slot.is_none()
    }

    /// Applies a textual assignment, rejecting columns outside [`Self::FIELDS`].
    pub fn assign(&mut self, field: &str, value: &str) -> Result<(), PatchError> {
        match field.trim() {
            "external_id" => self.external_id = Some(parse_int(field, value)?),
            "title" => self.title = Some(required_text(field, value)?),
            "synopsis" => self.synopsis = Some(nullable_text(value)),
            "episode_count" => {
                self.episode_count = Some(match nullable_text(value) {
                    Some(v) => Some(parse_int(field, &v)?),
                    None => None,
                });
            }
            "status" => self.status = Some(required_text(field, value)?),
            "air_start" => self.air_start = Some(nullable_text(value)),
            "air_end" => self.air_end = Some(nullable_text(value)),
            "broadcast_slot" => self.broadcast_slot = Some(nullable_text(value)),
            other => return Err(PatchError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}
