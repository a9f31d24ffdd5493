// Central defaults for the remote API, scheduling and rendering.
pub const DEFAULT_TRPC_URL: &str = "https://www.sbx.com/api/trpc/referral.getPublicLeaderBoard";
pub const DEFAULT_REFERER: &str = "https://www.sbx.com/";
pub const API_USER_AGENT: &str = "Mozilla/5.0";
pub const API_ACCEPT: &str = "application/json, text/plain, */*";
pub const FETCH_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_LEADERBOARD_UID: &str = "1565-GC91E-MKCX";
pub const DEFAULT_EXPECTED_NAME: &str = "3dhaxxCpu"; // name the API reports for our board
pub const DEFAULT_CLIENT_UID: &str = "154T-BFD91-4B8S";
pub const DEFAULT_CHANNEL_ID: u64 = 1433997173258715166;
pub const DEFAULT_TITLE: &str = "CPU Leaderboard"; // what we show in Discord

pub const DEFAULT_UPDATE_MINUTES: u64 = 5;
pub const DEFAULT_MIN_ENTRANTS: usize = 2;
pub const DEFAULT_DISPLAY_LIMIT: usize = 10;
pub const DEFAULT_PREFIX: &str = "!";

// Raw payload excerpt kept in chat warnings; the full body still goes to the logs.
pub const WARNING_BODY_PREVIEW_CHARS: usize = 300;
// Discord "Unknown Message" JSON error code.
pub const DISCORD_UNKNOWN_MESSAGE: isize = 10008;
