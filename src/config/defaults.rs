pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PUBLIC_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_DB_URL: &str = "sqlite://qtify.db?mode=rwc";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_DB_MIN_IDLE: u32 = 2;

pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com";
pub const DEFAULT_AUTH_SCOPE: &str = "user-read-playback-state user-modify-playback-state";

pub const DEFAULT_ROOM_LIFESPAN_HOURS: i64 = 12;
pub const DEFAULT_ROOM_ID_DIGITS: u32 = 6;
pub const DEFAULT_QR_DIR: &str = "qr-codes";
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 600;
