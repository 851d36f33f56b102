use std::fmt;

use crate::headers::SipHeader;
use crate::message::{NameAddr, Parameters, Uri};

const TAG_PARAM: &str = "tag";

/// The `To` SIP header.
///
/// Specifies the logical recipient of the request. The `tag` is added by
/// the UAS and identifies its side of a dialog.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct To {
    addr: NameAddr,
    params: Parameters,
}

impl To {
    /// Creates a new `To` header without parameters.
    pub fn new(addr: NameAddr) -> Self {
        Self {
            addr,
            params: Parameters::new(),
        }
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

impl SipHeader for To {
    const NAME: &'static str = "To";
    const SHORT_NAME: Option<&'static str> = Some("t");
}

impl fmt::Display for To {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}{}", To::NAME, self.addr, self.params)
    }
}
