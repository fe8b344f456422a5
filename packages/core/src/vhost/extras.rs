//! Optional directive blocks appended to HTTPS server blocks
//!
//! None of these are enabled unless explicitly requested, so the plain
//! templates stay byte-for-byte stable.

use super::VhostError;

/// Max-age used when caching is requested without an explicit value
pub const DEFAULT_CACHE_MAX_AGE: &str = "6h";

/// Static asset extensions covered by the caching block
const CACHED_EXTENSIONS: &str = "js|css|json|png|jpg|jpeg|gif|ico";

/// Units accepted by nginx time values
const TIME_UNITS: &[&str] = &["ms", "s", "m", "h", "d", "w", "M", "y"];

pub(crate) const HSTS_LINES: &str = "    #Send HSTS header\n    add_header Strict-Transport-Security \"max-age=31536000; includeSubDomains; preload\";\n";

pub(crate) const SECURITY_LINES: &str = "    #Turn off nginx version number displayed on all auto generated error pages
    server_tokens off;
    #Controlling Buffer Overflow Attacks
    #Start: Size Limits & Buffer Overflows
    client_body_buffer_size 1K;
    client_header_buffer_size 1k;
    client_max_body_size 1k;
    large_client_header_buffers 2 1k;
    #END: Size Limits & Buffer Overflows
    #Start: Timeouts
    client_body_timeout 10;
    client_header_timeout 10;
    keepalive_timeout 5 5;
    send_timeout 10;
    #End: Timeout
    #Avoid clickjacking
    add_header X-Frame-Options SAMEORIGIN;
    #Disable content-type sniffing on some browsers
    add_header X-Content-Type-Options nosniff;
    #Enable the Cross-site scripting (XSS) filter
    add_header X-XSS-Protection \"1; mode=block\";
";

/// Extra directive blocks requested for a virtual host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extras {
    /// Send a Strict-Transport-Security header
    pub hsts: bool,
    /// Append server_tokens, buffer, timeout, and header hardening
    pub security: bool,
    /// Cache static assets for this long (`expires` value)
    pub cache_max_age: Option<String>,
}

impl Extras {
    pub fn is_empty(&self) -> bool {
        !self.hsts && !self.security && self.cache_max_age.is_none()
    }

    /// Enable caching, falling back to the default max-age
    pub fn with_cache(mut self, max_age: Option<&str>) -> Self {
        let age = max_age
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_CACHE_MAX_AGE);
        self.cache_max_age = Some(age.to_string());
        self
    }
}

/// Check a value against nginx's time syntax: digits plus an optional unit
pub fn validate_time_value(value: &str) -> Result<(), VhostError> {
    let digits_end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, unit) = value.split_at(digits_end);

    if digits.is_empty() || !(unit.is_empty() || TIME_UNITS.contains(&unit)) {
        return Err(VhostError::InvalidCacheAge(value.to_string()));
    }
    Ok(())
}

pub(crate) fn caching_block(max_age: &str) -> String {
    format!(
        "    location ~* \\.({CACHED_EXTENSIONS})$ {{\n        expires {max_age};\n        add_header Cache-Control \"public, no-transform\";\n    }}\n"
    )
}
