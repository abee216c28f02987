use std::fmt;

/// Environment keys that feed the allow-list, in the order they are read.
pub const ORIGIN_ENV_KEYS: [&str; 4] = [
    "CLIENT_ORIGIN",
    "RENDER_EXTERNAL_URL",
    "RAILWAY_PUBLIC_DOMAIN",
    "RAILWAY_STATIC_URL",
];

const SCHEMES: [&str; 2] = ["https://", "http://"];

/// Remove leading `http://` / `https://` prefixes.
///
/// Only the scheme is touched: casing, ports and trailing slashes are kept
/// as-is, so `https://a.example/` and `https://a.example` stay distinct.
pub fn strip_scheme(origin: &str) -> &str {
    let mut rest = origin;
    while let Some(stripped) = SCHEMES.iter().find_map(|scheme| rest.strip_prefix(scheme)) {
        rest = stripped;
    }
    rest
}

/// Returned when a browser origin is not on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginRejected {
    pub origin: String,
}

impl fmt::Display for OriginRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Origin not allowed by CORS: {}", self.origin)
    }
}

impl std::error::Error for OriginRejected {}

/// Origins permitted to make credentialed cross-origin requests.
///
/// Built once at startup and never mutated afterwards. An empty list turns
/// the restriction off entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    origins: Vec<String>,
}

impl AllowList {
    /// Build from raw values, dropping empty ones. Duplicates are kept.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let origins = entries
            .into_iter()
            .map(Into::into)
            .filter(|origin| !origin.is_empty())
            .collect();
        Self { origins }
    }

    /// Build by resolving each of [`ORIGIN_ENV_KEYS`] through `lookup`.
    /// Unset keys are skipped.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_entries(ORIGIN_ENV_KEYS.iter().filter_map(|key| lookup(key)))
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    /// Decide whether a request asserting `origin` may proceed.
    ///
    /// An empty list or a missing `Origin` header always passes. Otherwise
    /// the scheme-stripped origin must equal a scheme-stripped entry.
    pub fn check(&self, origin: Option<&str>) -> Result<(), OriginRejected> {
        let Some(origin) = origin else {
            return Ok(());
        };
        if self.origins.is_empty() {
            return Ok(());
        }

        let wanted = strip_scheme(origin);
        if self
            .origins
            .iter()
            .any(|allowed| strip_scheme(allowed) == wanted)
        {
            Ok(())
        } else {
            Err(OriginRejected {
                origin: origin.to_string(),
            })
        }
    }

    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        self.check(origin).is_ok()
    }
}
