pub mod release_alerts;

pub use release_alerts::{DueRelease, notify_due_releases};
