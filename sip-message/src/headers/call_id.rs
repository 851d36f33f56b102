use std::fmt;

use crate::ArcStr;
use crate::headers::SipHeader;

/// The `Call-ID` SIP header.
///
/// Uniquely identifies a particular invitation or all registrations of a
/// particular client.
///
/// # Examples
///
/// ```
/// # use sip_message::headers::CallId;
/// let cid = CallId::new("a84b4c76e66710@pc33.atlanta.com");
///
/// assert_eq!(
///     "Call-ID: a84b4c76e66710@pc33.atlanta.com",
///     cid.to_string()
/// );
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct CallId(ArcStr);

impl CallId {
    /// Creates a new `CallId` instance.
    pub fn new(id: &str) -> Self {
        Self(id.into())
    }

    /// Returns the internal `CallId` value.
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl SipHeader for CallId {
    const NAME: &'static str = "Call-ID";
    const SHORT_NAME: Option<&'static str> = Some("i");
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", CallId::NAME, self.0)
    }
}
