pub mod anime;
pub mod release;
pub mod user;
pub mod watchlist;
