use std::time::Duration;

/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "ultah_rs=info";

/// Path of the public birthday endpoint, appended to the configured base URL
pub const BIRTHDAY_ENDPOINT: &str = "/api/public/ultah";

/// Timezone used to decide what "today" is when none is configured
pub const DEFAULT_TIMEZONE: &str = "Asia/Jakarta";

/// Link shared when no page URL is configured
pub const DEFAULT_PAGE_URL: &str = "http://localhost/ultah";

/// Request timeout for the birthday endpoint
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Delay before the closed book starts opening, measured from load start
pub const BOOK_OPEN_DELAY: Duration = Duration::from_millis(5000);

/// Length of the book-opening animation
pub const BOOK_OPENING_DURATION: Duration = Duration::from_millis(1200);

/// Length of a single page-turn (or snap-back) transition
pub const PAGE_TURN_DURATION: Duration = Duration::from_millis(300);

/// Frame cadence of the interpolation loop (~60 fps)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Pointer travel, in pixels, that maps to a full page turn
pub const DRAG_REFERENCE_WIDTH: f32 = 300.0;

/// Progress below this magnitude is treated as no direction at all
pub const DRAG_DEAD_ZONE: f32 = 0.05;

/// Progress at which a released drag completes the page turn
pub const COMMIT_THRESHOLD: f32 = 0.35;

/// Default birthday wish printed on every card
pub const DEFAULT_WISH: &str = "Selamat ulang tahun! Semoga panjang umur, sehat selalu, makin sukses kuliahnya, dan tercapai semua impiannya di tahun ini!";

/// Notice shown when sharing falls back to copying the link
pub const CLIPBOARD_FALLBACK_NOTICE: &str = "Link disalin!";
