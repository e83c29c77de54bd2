//! # Request ID Tracking
//!
//! Utilities for generating and propagating request IDs.
//! Uses CUID2 for collision-resistant, URL-safe identifiers.

/// Header used to accept and echo request identifiers.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// A request ID type using CUID2.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random request ID using CUID2.
    #[inline]
    pub fn new() -> Self { Self(cuid2::create_id()) }

    /// Accept a caller-supplied request ID.
    ///
    /// Values shorter than 20 or longer than 64 characters, or containing
    /// anything other than ASCII alphanumerics, `-` and `_`, are refused so
    /// that untrusted headers cannot inject noise into the logs.
    pub fn from_header(value: &str) -> Option<Self> {
        let value = value.trim();
        let well_formed = (20 ..= 64).contains(&value.len()) &&
            value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        well_formed.then(|| Self(value.to_string()))
    }

    /// Use the incoming header when it is well formed, otherwise generate one.
    pub fn from_header_or_new(value: Option<&str>) -> Self { value.and_then(Self::from_header).unwrap_or_default() }

    /// Get the request ID as a string.
    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }

    /// Consume and return the inner string.
    #[inline]
    pub fn into_string(self) -> String { self.0 }
}

impl Default for RequestId {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}
