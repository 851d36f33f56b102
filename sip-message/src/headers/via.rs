use core::fmt;

use crate::SIPV2;
use crate::headers::SipHeader;
use crate::message::{HostPort, Parameters, TransportKind};

const BRANCH_PARAM: &str = "branch";
const RPORT_PARAM: &str = "rport";
const RECEIVED_PARAM: &str = "received";

/// The `Via` SIP header.
///
/// Indicates the path taken by the request so far and the
/// path that should be followed in routing responses. One `Via`
/// value is one hop.
///
/// # Examples
/// ```
/// # use sip_message::headers::Via;
/// let via = Via::new_udp(
///     "server10.biloxi.com".parse().unwrap(),
///     Some("z9hG4bKnashds8"),
/// );
///
/// assert_eq!(
///     "Via: SIP/2.0/UDP server10.biloxi.com;branch=z9hG4bKnashds8",
///     via.to_string()
/// );
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Via {
    transport: TransportKind,
    sent_by: HostPort,
    params: Parameters,
}

impl Via {
    /// Creates a new `Via` header with UDP transport and optional branch.
    ///
    /// # Arguments
    /// * `sent_by` - The host and optional port to which responses should be sent.
    /// * `branch` - Optional branch parameter to identify the transaction.
    pub fn new_udp(sent_by: HostPort, branch: Option<&str>) -> Self {
        Self::new_with_transport(TransportKind::Udp, sent_by, branch)
    }

    /// Creates a new `Via` header for the given transport.
    pub fn new_with_transport(transport: TransportKind, sent_by: HostPort, branch: Option<&str>) -> Self {
        let mut params = Parameters::new();
        if let Some(branch) = branch {
            params.set(BRANCH_PARAM, Some(branch));
        }
        Self {
            transport,
            sent_by,
            params,
        }
    }

    /// Returns the `transport`.
    pub fn transport(&self) -> TransportKind {
        self.transport
    }

    /// Returns the sent_by field.
    pub fn sent_by(&self) -> &HostPort {
        &self.sent_by
    }

    /// Set the sent_by field.
    pub fn set_sent_by(&mut self, sent_by: HostPort) {
        self.sent_by = sent_by;
    }

    /// Returns the branch parameter.
    pub fn branch(&self) -> Option<&str> {
        self.params.get_named(BRANCH_PARAM)
    }

    /// Sets (or replaces) the branch parameter.
    pub fn set_branch(&mut self, branch: &str) {
        self.params.set(BRANCH_PARAM, Some(branch));
    }

    /// Returns the `received` parameter.
    pub fn received(&self) -> Option<&str> {
        self.params.get_named(RECEIVED_PARAM)
    }

    /// Set the `received` parameter.
    pub fn set_received(&mut self, received: &str) {
        self.params.set(RECEIVED_PARAM, Some(received));
    }

    /// Returns the `rport` value.
    ///
    /// `None` when the parameter is absent or present as a bare flag.
    pub fn rport(&self) -> Option<&str> {
        self.params.get_named(RPORT_PARAM)
    }

    /// Sets the `rport` parameter; `None` writes the bare flag.
    pub fn set_rport(&mut self, rport: Option<u16>) {
        let rport = rport.map(|p| p.to_string());
        self.params.set(RPORT_PARAM, rport.as_deref());
    }

    /// Returns every parameter of the hop, in order.
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Returns a mutable reference to the hop parameters.
    pub fn params_mut(&mut self) -> &mut Parameters {
        &mut self.params
    }
}

impl SipHeader for Via {
    const NAME: &'static str = "Via";
    const SHORT_NAME: Option<&'static str> = Some("v");
}

impl fmt::Display for Via {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}/{} {}{}", Via::NAME, SIPV2, self.transport, self.sent_by, self.params)
    }
}
