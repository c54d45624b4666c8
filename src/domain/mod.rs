//! Strongly typed identifiers for stored records.
//!
//! Every table uses an auto-incrementing integer surrogate key. Wrapping each
//! one in its own newtype keeps a `UserId` from being passed where an
//! `AnimeId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! surrogate_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn value(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self::new(id)
            }
        }
    };
}

surrogate_id!(
    /// Surrogate key of a row in `users`.
    ///
    /// ```rust
    /// use anitrack::domain::UserId;
    ///
    /// let id = UserId::new(7);
    /// assert_eq!(id.value(), 7);
    /// assert_eq!(id.to_string(), "7");
    /// ```
    UserId
);

surrogate_id!(
    /// Surrogate key of a row in `anime`. Not the catalog (MAL) id.
    AnimeId
);

surrogate_id!(
    /// Surrogate key of a row in `watchlist`.
    WatchlistId
);

surrogate_id!(
    /// Surrogate key of a row in `releases`.
    ReleaseId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anime_id_conversions() {
        let id = AnimeId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(i32::from(id), 42);
        assert_eq!(AnimeId::from(42), id);
    }

    #[test]
    fn ids_serialize_as_plain_integers() {
        let id = WatchlistId::new(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "3");
        let back: WatchlistId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
