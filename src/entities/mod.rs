pub mod prelude;

pub mod anime;
pub mod releases;
pub mod users;
pub mod watchlist;
