use std::fmt;

use crate::headers::SipHeader;

/// The `Content-Length` SIP header.
///
/// Indicates the size of the message body, in bytes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct ContentLength(u32);

impl ContentLength {
    /// Creates a new `ContentLength`.
    pub fn new(len: u32) -> Self {
        Self(len)
    }

    /// Returns the body length.
    pub fn len(&self) -> u32 {
        self.0
    }

    /// Returns `true` when the body is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl SipHeader for ContentLength {
    const NAME: &'static str = "Content-Length";
    const SHORT_NAME: Option<&'static str> = Some("l");
}

impl fmt::Display for ContentLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", ContentLength::NAME, self.0)
    }
}
