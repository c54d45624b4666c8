//! Episode alerts for the anime on a user's watchlist.

use tracing::info;

use crate::db::{Store, StoreResult};
use crate::domain::UserId;
use crate::models::{Anime, Release};
use crate::notifications::{Notifier, ReleaseNotification};

/// A release that was due and the outcome of notifying about it.
#[derive(Debug, Clone)]
pub struct DueRelease {
    pub anime: Anime,
    pub release: Release,
    pub delivered: bool,
}

/// Notifies `user_id` about every release dated `date` (`YYYY-MM-DD`) for an
/// anime on their watchlist that is past their last watched episode.
pub async fn notify_due_releases(
    store: &Store,
    notifier: &dyn Notifier,
    user_id: UserId,
    date: &str,
) -> StoreResult<Vec<DueRelease>> {
    store.get_user(user_id).await?;

    let mut due = Vec::new();

    for entry in store.list_watchlist(user_id).await? {
        let anime = store.get_anime(entry.anime_id).await?;

        for release in store.list_releases(entry.anime_id).await? {
            if !release.airs_on(date) || release.episode_number <= entry.last_watched_episode {
                continue;
            }

            let notification = ReleaseNotification::new(
                anime.title.as_str(),
                release.episode_number,
                release.broadcast_slot.as_str(),
            );
            let delivered = notifier.notify(&notification).await;

            due.push(DueRelease {
                anime: anime.clone(),
                release,
                delivered,
            });
        }
    }

    info!(
        "{} release(s) due on {} for user {}",
        due.len(),
        date,
        user_id
    );
    Ok(due)
}
