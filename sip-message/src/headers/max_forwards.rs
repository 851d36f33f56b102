use std::fmt;

use crate::headers::SipHeader;

/// The `Max-Forwards` SIP header.
///
/// Limits the number of proxies or gateways that can forward the request.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MaxForwards(u32);

impl MaxForwards {
    /// Creates a new `MaxForwards`.
    pub fn new(forwards: u32) -> Self {
        Self(forwards)
    }

    /// Returns the remaining hop count.
    pub fn max_forwards(&self) -> u32 {
        self.0
    }
}

impl Default for MaxForwards {
    fn default() -> Self {
        Self(crate::headers::DEFAULT_MAX_FORWARDS)
    }
}

impl SipHeader for MaxForwards {
    const NAME: &'static str = "Max-Forwards";
}

impl fmt::Display for MaxForwards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", MaxForwards::NAME, self.0)
    }
}
