// Single source of truth for all default values.

// --- Monitor ---
pub const DEFAULT_MONITOR_ENABLED: bool = true;
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60; // 1 minute
pub const DEFAULT_ALERT_THRESHOLD_SECS: u64 = 600; // 10 minutes
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ANNOUNCE_STARTUP: bool = false;
/// Upper bound accepted for any duration setting.
pub const MAX_DURATION_SECS: u64 = 365 * 24 * 60 * 60; // 1 year

// --- Cluster ---
pub const DEFAULT_API_SERVER_URL: &str = "https://kubernetes.default.svc";
pub const DEFAULT_TOKEN_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";
pub const DEFAULT_CA_CERT_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/ca.crt";
pub const DEFAULT_PAGE_SIZE: u32 = 500;

// --- Notify ---
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
