//! Request-scoped device context.
//!
//! Outgoing calls carry the originating client's IP and user agent so the
//! backend sees the real client rather than this layer. The context is
//! resolved once per request scope from incoming headers and is read-only
//! afterwards.

/// Fallback IP when no header identifies the client.
const FALLBACK_IP: &str = "127.0.0.1";

/// IP headers in order of preference.
const IP_HEADERS: [&str; 4] = ["x-forwarded-for", "x-real-ip", "x-client-ip", "x-remote-addr"];

/// Originating client metadata attached to every outgoing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceContext {
    pub ip_address: String,
    pub user_agent: String,
}

impl Default for DeviceContext {
    fn default() -> Self {
        Self {
            ip_address: FALLBACK_IP.to_string(),
            user_agent: String::new(),
        }
    }
}

impl DeviceContext {
    pub fn new(ip_address: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            ip_address: normalize_ip(ip_address.into()),
            user_agent: user_agent.into(),
        }
    }

    /// Resolve the context from incoming request headers.
    ///
    /// IP resolution order: `x-forwarded-for` (first hop), `x-real-ip`,
    /// `x-client-ip`, `x-remote-addr`, falling back to `127.0.0.1`.
    /// Header names are matched case-insensitively.
    pub fn from_headers<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let headers: Vec<(String, &str)> = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        let lookup = |name: &str| {
            headers
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.trim())
                .filter(|v| !v.is_empty())
        };

        let ip = IP_HEADERS
            .iter()
            .find_map(|header| lookup(header))
            .map(|value| {
                // X-Forwarded-For may list multiple hops; the first is the client.
                value.split(',').next().unwrap_or(value).trim().to_string()
            })
            .unwrap_or_else(|| FALLBACK_IP.to_string());

        Self {
            ip_address: normalize_ip(ip),
            user_agent: lookup("user-agent").unwrap_or("").to_string(),
        }
    }
}

/// Keep loopback consistent across stacks.
fn normalize_ip(ip: String) -> String {
    if ip == "::1" {
        FALLBACK_IP.to_string()
    } else {
        ip
    }
}
