//! Shared constants and invariants

/// Fixed key for the single live token record.
pub const CACHE_KEY_ACCESS_TOKEN: &str = "access_token";

/// OneMap tokens usually last 3 days (259200s).
pub const ONEMAP_TOKEN_LIFETIME_SECS: u64 = 259_200;

/// Cache TTL stays at 2.5 days, below the token lifetime, so a cached
/// token is never served after OneMap has invalidated it.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 216_000;

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;

pub const DEFAULT_UPSTREAM_URL: &str = "https://www.onemap.gov.sg/api/auth/post/getToken";
