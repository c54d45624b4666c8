pub use super::anime::Entity as Anime;
pub use super::releases::Entity as Releases;
pub use super::users::Entity as Users;
pub use super::watchlist::Entity as Watchlist;
