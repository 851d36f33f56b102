use std::fmt;

use crate::headers::SipHeader;
use crate::message::{NameAddr, Parameters, Uri};

const EXPIRES_PARAM: &str = "expires";
const Q_PARAM: &str = "q";

/// The `Contact` SIP header.
///
/// Specifies the `URI` for the user or UA sending the message.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Contact {
    addr: NameAddr,
    params: Parameters,
}

impl Contact {
    /// Creates a new `Contact` header.
    pub fn new(addr: NameAddr) -> Self {
        Self {
            addr,
            params: Parameters::new(),
        }
    }

    /// Returns the contact address.
    pub fn address(&self) -> &Uri {
        &self.addr.uri
    }

    /// Returns the `name-addr` of the header.
    pub fn addr(&self) -> &NameAddr {
        &self.addr
    }

    /// Returns the `expires` parameter, when it is a valid number.
    pub fn expires(&self) -> Option<u32> {
        self.params.get_named(EXPIRES_PARAM)?.parse().ok()
    }

    /// Sets the `expires` parameter.
    pub fn set_expires(&mut self, expires: u32) {
        self.params.set(EXPIRES_PARAM, Some(&expires.to_string()));
    }

    /// Returns the `q` parameter.
    pub fn q(&self) -> Option<&str> {
        self.params.get_named(Q_PARAM)
    }

    /// Returns the header parameters.
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Returns a mutable reference to the header parameters.
    pub fn params_mut(&mut self) -> &mut Parameters {
        &mut self.params
    }
}

impl SipHeader for Contact {
    const NAME: &'static str = "Contact";
    const SHORT_NAME: Option<&'static str> = Some("m");
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}{}", Contact::NAME, self.addr, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires() {
        let mut contact = Contact::new(NameAddr::new("sip:alice@pc33.atlanta.com".parse().unwrap()));
        contact.set_expires(3600);
        contact.params_mut().set("q", Some("0.7"));

        assert_eq!(contact.expires(), Some(3600));
        assert_eq!(contact.q(), Some("0.7"));
        assert_eq!(
            contact.to_string(),
            "Contact: <sip:alice@pc33.atlanta.com>;expires=3600;q=0.7"
        );
    }
}
