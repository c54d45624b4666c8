pub const JIKAN_API: &str = "https://api.jikan.moe/v4";

pub mod notifications {

    pub const MACOS_BIN: &str = "osascript";

    pub const LINUX_BIN: &str = "notify-send";
}
