use serde::{Deserialize, Serialize};

use crate::domain::{AnimeId, UserId, WatchlistId};

/// One user's tracking state for one anime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub id: WatchlistId,
    pub user_id: UserId,
    pub anime_id: AnimeId,
    /// RFC 3339 timestamp set when the entry is created.
    pub added_on: String,
    pub last_watched_episode: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWatchlistEntry {
    pub user_id: UserId,
    pub anime_id: AnimeId,
    pub last_watched_episode: i32,
}

impl NewWatchlistEntry {
    #[must_use]
    pub const fn new(user_id: UserId, anime_id: AnimeId) -> Self {
        Self {
            user_id,
            anime_id,
            last_watched_episode: 0,
        }
    }

    #[must_use]
    pub const fn last_watched_episode(mut self, episode: i32) -> Self {
        self.last_watched_episode = episode;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchlistPatch {
    pub last_watched_episode: Option<i32>,
}

impl WatchlistPatch {
    #[must_use]
    pub const fn last_watched_episode(mut self, episode: i32) -> Self {
        self.last_watched_episode = Some(episode);
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.last_watched_episode.is_none()
    }
}
