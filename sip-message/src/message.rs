#![deny(missing_docs)]
//! SIP Message types
//!
//! The module provide the [`Message`] trait shared by [`Request`] and
//! [`Response`], the [`SipMessage`] enum that can hold either of them, and
//! the free functions that derive an `ACK` or a `CANCEL` from an existing
//! exchange.

use std::fmt;

use crate::ArcStr;
use crate::fields::Fields;
use crate::headers::{CSeq, CallId, Contact, ContentLength, Header, Headers, SipHeader, To, Via};

mod code;
mod derived;
mod method;
mod param;
mod request;
mod response;
mod transport;
mod uri;

pub use code::*;
pub use derived::*;
pub use method::*;
pub use param::*;
pub use request::*;
pub use response::*;
pub use transport::*;
pub use uri::*;

/// Opaque identifier of a message.
///
/// Generated with [`MessageId::next`] when a message is built without one.
/// It never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(ArcStr);

impl MessageId {
    /// Generates a new globally unique id (a random UUID v4).
    ///
    /// # Examples
    ///
    /// ```
    /// # use sip_message::MessageId;
    /// assert_ne!(MessageId::next(), MessageId::next());
    /// ```
    pub fn next() -> Self {
        Self(uuid::Uuid::new_v4().to_string().into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the shared string backing the id.
    pub fn as_arc(&self) -> &ArcStr {
        &self.0
    }

    /// Returns `true` if the id is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// State shared by every SIP message.
#[derive(Debug, PartialEq, Eq)]
pub struct MessageBase {
    pub(crate) id: MessageId,
    pub(crate) sip_version: ArcStr,
    pub(crate) headers: Headers,
    pub(crate) body: Option<ArcStr>,
    pub(crate) body_provided: bool,
    pub(crate) fields: Fields,
    pub(crate) src: Option<ArcStr>,
    pub(crate) dest: Option<ArcStr>,
}

impl MessageBase {
    /// Creates a new base. An absent or empty `id` is replaced by a fresh
    /// one.
    pub fn new(id: Option<MessageId>, sip_version: &str, headers: Headers, fields: Fields) -> Self {
        let id = id.filter(|id| !id.is_empty()).unwrap_or_else(MessageId::next);

        Self {
            id,
            sip_version: sip_version.into(),
            headers,
            body: None,
            body_provided: false,
            fields,
            src: None,
            dest: None,
        }
    }
}

/// Behaviour shared by SIP requests and responses.
///
/// Implementors only expose their [`MessageBase`] and the parts that depend
/// on the message kind; everything else is provided.
pub trait Message {
    /// Returns the shared message state.
    fn base(&self) -> &MessageBase;

    /// Returns the shared message state, mutably.
    fn base_mut(&mut self) -> &mut MessageBase;

    /// Renders the first line of the message, without CRLF.
    fn start_line(&self) -> String;

    /// Renders a one-line summary for logs.
    fn short(&self) -> String;

    /// The address this message comes from as `host:port`, `None` when it
    /// cannot be determined.
    fn source(&self) -> Option<String>;

    /// The address this message goes to as `host:port`, `None` when it
    /// cannot be determined.
    fn destination(&self) -> Option<String>;

    /// Returns the message id.
    fn message_id(&self) -> &MessageId {
        &self.base().id
    }

    /// Returns the SIP version, e.g. `SIP/2.0`.
    fn sip_version(&self) -> &str {
        &self.base().sip_version
    }

    /// Sets the SIP version.
    fn set_sip_version(&mut self, sip_version: &str) {
        self.base_mut().sip_version = sip_version.into();
    }

    /// Returns the headers of the message.
    fn headers(&self) -> &Headers {
        &self.base().headers
    }

    /// Returns the headers of the message, mutably.
    fn headers_mut(&mut self) -> &mut Headers {
        &mut self.base_mut().headers
    }

    /// Returns every header designated by `name`.
    fn get_headers(&self, name: &str) -> Vec<&Header> {
        self.headers().get_headers(name)
    }

    /// Returns the first header designated by `name`.
    fn get_header(&self, name: &str) -> Option<&Header> {
        self.headers().get_header(name)
    }

    /// Appends a header.
    fn append_header(&mut self, header: Header) {
        self.headers_mut().push(header);
    }

    /// Removes every header designated by `name`.
    fn remove_header(&mut self, name: &str) -> Vec<Header> {
        self.headers_mut().remove(name)
    }

    /// Returns the body, if any.
    fn body(&self) -> Option<&str> {
        self.base().body.as_deref()
    }

    /// Returns `true` if a body was explicitly set.
    fn body_provided(&self) -> bool {
        self.base().body_provided
    }

    /// Sets the body. When `set_content_length` is `true` the
    /// `Content-Length` header is replaced by the body length in bytes.
    fn set_body(&mut self, body: &str, set_content_length: bool) {
        let base = self.base_mut();
        base.body = Some(body.into());
        base.body_provided = true;

        if set_content_length {
            let len = u32::try_from(body.len()).unwrap_or(u32::MAX);
            base.headers.remove(ContentLength::NAME);
            base.headers.push(Header::ContentLength(ContentLength::new(len)));
        }
    }

    /// Returns the metadata attached to the message.
    fn fields(&self) -> &Fields {
        &self.base().fields
    }

    /// Returns the top-most `Via` hop.
    fn via_hop(&self) -> Option<&Via> {
        crate::find_map_header!(self.headers(), Via)
    }

    /// Returns the top-most `Via` hop, mutably.
    fn via_hop_mut(&mut self) -> Option<&mut Via> {
        crate::find_map_mut_header!(self.headers_mut(), Via)
    }

    /// Returns the `CSeq` header.
    fn cseq(&self) -> Option<&CSeq> {
        crate::find_map_header!(self.headers(), CSeq)
    }

    /// Returns the `CSeq` header, mutably.
    fn cseq_mut(&mut self) -> Option<&mut CSeq> {
        crate::find_map_mut_header!(self.headers_mut(), CSeq)
    }

    /// Returns the `Call-ID` header.
    fn call_id(&self) -> Option<&CallId> {
        crate::find_map_header!(self.headers(), CallId)
    }

    /// Returns the `From` header.
    fn from(&self) -> Option<&crate::headers::From> {
        crate::find_map_header!(self.headers(), From)
    }

    /// Returns the `To` header.
    fn to(&self) -> Option<&To> {
        crate::find_map_header!(self.headers(), To)
    }

    /// Returns the first `Contact` header.
    fn contact(&self) -> Option<&Contact> {
        crate::find_map_header!(self.headers(), Contact)
    }

    /// Returns the transport of the top-most `Via` hop, `UDP` without one.
    fn transport(&self) -> TransportKind {
        self.via_hop().map(Via::transport).unwrap_or_default()
    }

    /// Sets the resolved source address. Once set it wins over header
    /// resolution; an empty string clears it.
    fn set_source(&mut self, src: &str) {
        self.base_mut().src = (!src.is_empty()).then(|| src.into());
    }

    /// Sets the resolved destination address. Once set it wins over header
    /// resolution; an empty string clears it.
    fn set_destination(&mut self, dest: &str) {
        self.base_mut().dest = (!dest.is_empty()).then(|| dest.into());
    }
}

/// Appends a copy of every header named `name` in `from` to `to`.
pub fn copy_headers<F, T>(name: &str, from: &F, to: &mut T)
where
    F: Message + ?Sized,
    T: Message + ?Sized,
{
    for header in from.get_headers(name) {
        to.append_header(header.clone());
    }
}

/// Resolves the address a `Via` hop designates.
///
/// Host is the `received` parameter when non-empty, else the hop host. Port
/// is `rport` when it carries a value, else the hop port, else the default
/// port of the hop transport. A malformed `rport` resolves to port `0`.
pub(crate) fn via_hop_address(via: &Via) -> String {
    let host = match via.received().filter(|received| !received.is_empty()) {
        Some(received) => received.parse::<Host>().map_or_else(|_| received.to_string(), |host| host.to_string()),
        None => via.sent_by().host.to_string(),
    };

    let port = match via.rport().filter(|rport| !rport.is_empty()) {
        Some(rport) => rport.parse::<u16>().unwrap_or_else(|_| {
            tracing::warn!(rport, "Malformed rport in Via hop, using port 0");
            0
        }),
        None => via.sent_by().port.unwrap_or_else(|| via.transport().default_port()),
    };

    format!("{host}:{port}")
}

/// A SIP message, either a [`Request`] or a [`Response`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SipMessage {
    /// A SIP Request.
    Request(Request),
    /// A SIP Response.
    Response(Response),
}

impl SipMessage {
    /// Returns `true` if this message is a request.
    pub const fn is_request(&self) -> bool {
        matches!(self, SipMessage::Request(_))
    }

    /// Returns `true` if this message is a response.
    pub const fn is_response(&self) -> bool {
        matches!(self, SipMessage::Response(_))
    }

    /// Returns a reference to the request, if it is one.
    pub fn request(&self) -> Option<&Request> {
        if let SipMessage::Request(request) = self {
            Some(request)
        } else {
            None
        }
    }

    /// Returns a reference to the response, if it is one.
    pub fn response(&self) -> Option<&Response> {
        if let SipMessage::Response(response) = self {
            Some(response)
        } else {
            None
        }
    }
}

impl Message for SipMessage {
    fn base(&self) -> &MessageBase {
        match self {
            SipMessage::Request(req) => req.base(),
            SipMessage::Response(res) => res.base(),
        }
    }

    fn base_mut(&mut self) -> &mut MessageBase {
        match self {
            SipMessage::Request(req) => req.base_mut(),
            SipMessage::Response(res) => res.base_mut(),
        }
    }

    fn start_line(&self) -> String {
        match self {
            SipMessage::Request(req) => req.start_line(),
            SipMessage::Response(res) => res.start_line(),
        }
    }

    fn short(&self) -> String {
        match self {
            SipMessage::Request(req) => req.short(),
            SipMessage::Response(res) => res.short(),
        }
    }

    fn source(&self) -> Option<String> {
        match self {
            SipMessage::Request(req) => req.source(),
            SipMessage::Response(res) => res.source(),
        }
    }

    fn destination(&self) -> Option<String> {
        match self {
            SipMessage::Request(req) => req.destination(),
            SipMessage::Response(res) => res.destination(),
        }
    }
}

impl From<Request> for SipMessage {
    fn from(value: Request) -> Self {
        SipMessage::Request(value)
    }
}

impl From<Response> for SipMessage {
    fn from(value: Response) -> Self {
        SipMessage::Response(value)
    }
}

impl fmt::Display for SipMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SipMessage::Request(req) => fmt::Display::fmt(req, f),
            SipMessage::Response(res) => fmt::Display::fmt(res, f),
        }
    }
}

/// Writes a full message: start line, headers, blank line and body.
pub(crate) fn write_message<M: Message + ?Sized>(msg: &M, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}\r\n{}\r\n", msg.start_line(), msg.headers())?;
    if let Some(body) = msg.body() {
        f.write_str(body)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::Header;

    fn via(params: &[(&str, Option<&str>)], sent_by: &str) -> Via {
        let mut via = Via::new_udp(sent_by.parse().unwrap(), Some("z9hG4bK-1"));
        for (name, value) in params {
            via.params_mut().set(name, *value);
        }
        via
    }

    #[test]
    fn test_via_hop_address_prefers_received() {
        let via = via(&[("received", Some("1.2.3.4"))], "pc33.atlanta.com:5060");

        assert_eq!(via_hop_address(&via), "1.2.3.4:5060");
    }

    #[test]
    fn test_via_hop_address_ignores_empty_received_and_bare_rport() {
        let via = via(&[("received", Some("")), ("rport", None)], "pc33.atlanta.com");

        assert_eq!(via_hop_address(&via), "pc33.atlanta.com:5060");
    }

    #[test]
    fn test_via_hop_address_uses_rport() {
        let via = via(&[("rport", Some("6000"))], "pc33.atlanta.com:5060");

        assert_eq!(via_hop_address(&via), "pc33.atlanta.com:6000");
    }

    #[test]
    fn test_via_hop_address_malformed_rport_is_zero() {
        let via = via(&[("rport", Some("abc"))], "pc33.atlanta.com:5060");

        assert_eq!(via_hop_address(&via), "pc33.atlanta.com:0");
    }

    #[test]
    fn test_via_hop_address_transport_default_port() {
        let via = Via::new_with_transport(TransportKind::Tls, "pc33.atlanta.com".parse().unwrap(), None);

        assert_eq!(via_hop_address(&via), "pc33.atlanta.com:5061");
    }

    #[test]
    fn test_via_hop_address_brackets_ipv6() {
        let via = via(&[("received", Some("2001:db8::1"))], "pc33.atlanta.com:5062");

        assert_eq!(via_hop_address(&via), "[2001:db8::1]:5062");
    }

    #[test]
    fn test_message_id_from_empty_is_regenerated() {
        let base = MessageBase::new(Some(MessageId::from("")), crate::SIPV2, Headers::new(), Fields::new());

        assert!(!base.id.is_empty());
    }

    #[test]
    fn test_set_body_replaces_content_length() {
        let mut req = RequestBuilder::new(SipMethod::Options, "sip:bob@biloxi.com".parse().unwrap())
            .header(Header::ContentLength(ContentLength::new(99)))
            .build();
        req.set_body("v=0\r\n", true);

        let lengths = req.get_headers("Content-Length");
        assert_eq!(lengths.len(), 1);
        assert_matches!(lengths[0], Header::ContentLength(len) if len.len() == 5);
        assert_eq!(req.body(), Some("v=0\r\n"));
        assert!(req.body_provided());
    }

    #[test]
    fn test_sip_message_dispatch() {
        let req = RequestBuilder::new(SipMethod::Options, "sip:bob@biloxi.com".parse().unwrap()).build();
        let res = Response::from_request(None, &req, StatusCode::NOT_FOUND, "", "");
        let msg: SipMessage = res.into();

        assert!(msg.is_response());
        assert!(msg.request().is_none());
        assert_eq!(msg.start_line(), "SIP/2.0 404 Not Found");
        assert_eq!(msg.destination(), None);

        let msg: SipMessage = req.into();
        assert!(msg.is_request());
        assert_eq!(msg.to_string(), "OPTIONS sip:bob@biloxi.com SIP/2.0\r\n\r\n");
    }

    #[test]
    fn test_overrides_win_and_clear() {
        let mut req = RequestBuilder::new(SipMethod::Options, "sip:bob@biloxi.com".parse().unwrap()).build();
        req.set_destination("10.0.0.1:5070");
        assert_eq!(req.destination().as_deref(), Some("10.0.0.1:5070"));

        req.set_destination("");
        assert_eq!(req.destination().as_deref(), Some("biloxi.com:5060"));
    }

    #[test]
    fn test_message_id_next_is_unique_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| (0..256).map(|_| MessageId::next()).collect::<Vec<_>>()))
            .collect();

        let mut seen = std::collections::HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(!id.is_empty());
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 1024);
    }

    #[test]
    fn test_request_clone_ids_are_unique_across_threads() {
        let req = std::sync::Arc::new(
            RequestBuilder::new(SipMethod::Invite, "sip:bob@biloxi.com".parse().unwrap())
                .id("invite-1")
                .build(),
        );
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let req = std::sync::Arc::clone(&req);
                std::thread::spawn(move || (0..128).map(|_| Request::clone(&req).message_id().clone()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = std::collections::HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert_ne!(&id, req.message_id());
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 512);
    }
}
