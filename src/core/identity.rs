//! Client identity derivation
//!
//! There is no authentication. A caller is recognised by a fingerprint made
//! of the forwarded network origin and the user agent, which is trivially
//! spoofable and shared by everyone behind the same proxy with the same
//! browser. It is only used as the quota and history key.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum identity length
pub const MAX_IDENTITY_LEN: usize = 36;

const UNKNOWN_ORIGIN: &str = "unknown";
const FINGERPRINT_LEN: usize = 8;

/// Heuristic caller fingerprint used as the quota and history key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    /// Derive an identity from the request headers.
    ///
    /// `x-forwarded-for` wins over `x-real-ip`; with neither the origin is
    /// `unknown`. The user agent contributes the first 8 characters of its
    /// base64 encoding. The result only contains `[A-Za-z0-9_]`, is at most
    /// 36 characters long and never starts with `_`.
    pub fn derive(
        forwarded_for: Option<&str>,
        real_ip: Option<&str>,
        user_agent: Option<&str>,
    ) -> Self {
        let base = forwarded_for
            .filter(|v| !v.is_empty())
            .or_else(|| real_ip.filter(|v| !v.is_empty()))
            .unwrap_or(UNKNOWN_ORIGIN);

        let encoded = STANDARD.encode(user_agent.unwrap_or_default());
        let fingerprint: String = encoded.chars().take(FINGERPRINT_LEN).collect();

        let mut id: String = format!("{}_{}", base, fingerprint)
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .take(MAX_IDENTITY_LEN)
            .collect();

        if id.starts_with('_') {
            id.replace_range(..1, "u");
        }

        Self(id)
    }

    /// Wrap an already-derived identity (store round-trips, tests)
    pub fn from_raw<S: Into<String>>(raw: S) -> Self {
        Self(raw.into())
    }

    /// Identity as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClientIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
