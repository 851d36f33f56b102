use std::fmt;

use crate::headers::SipHeader;
use crate::message::{NameAddr, Parameters, Uri};

const TAG_PARAM: &str = "tag";

/// The `From` SIP header.
///
/// Indicates the initiator of the request.
///
/// # Examples
///
/// ```
/// # use sip_message::headers::From;
/// # use sip_message::message::NameAddr;
/// let mut from = From::new(NameAddr::with_display("Alice", "sip:alice@atlanta.com".parse().unwrap()));
/// from.set_tag("1928301774");
///
/// assert_eq!(
///     "From: \"Alice\" <sip:alice@atlanta.com>;tag=1928301774",
///     from.to_string()
/// );
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct From {
    addr: NameAddr,
    params: Parameters,
}

impl From {
    /// Creates a new `From` header without parameters.
    pub fn new(addr: NameAddr) -> Self {
        Self {
            addr,
            params: Parameters::new(),
        }
    }

    /// Creates a new `From` header with the given `tag`.
    pub fn with_tag(addr: NameAddr, tag: &str) -> Self {
        let mut from = Self::new(addr);
        from.set_tag(tag);
        from
    }

    /// Returns the `name-addr` of the header.
    pub fn addr(&self) -> &NameAddr {
        &self.addr
    }

    /// Returns the uri of the header.
    pub fn uri(&self) -> &Uri {
        &self.addr.uri
    }

    /// Returns the `tag` parameter.
    pub fn tag(&self) -> Option<&str> {
        self.params.get_named(TAG_PARAM)
    }

    /// Sets the `tag` parameter.
    pub fn set_tag(&mut self, tag: &str) {
        self.params.set(TAG_PARAM, Some(tag));
    }

    /// Returns the header parameters.
    pub fn params(&self) -> &Parameters {
        &self.params
    }
}

impl SipHeader for From {
    const NAME: &'static str = "From";
    const SHORT_NAME: Option<&'static str> = Some("f");
}

impl fmt::Display for From {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}{}", From::NAME, self.addr, self.params)
    }
}
