use std::fmt;

use crate::SIPV2;
use crate::fields::Fields;
use crate::headers::{Header, Headers, Route};

use super::{Message, MessageBase, MessageId, SipMethod, Uri, via_hop_address, write_message};

/// Represents a SIP Request-Line without the version.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RequestLine {
    /// The SIP method associated with the request (e.g., INVITE, BYE).
    pub method: SipMethod,
    /// The Request-URI indicating the target of the request.
    pub uri: Uri,
}

/// A SIP Request.
///
/// # Examples
///
/// ```
/// use sip_message::{Message, RequestBuilder};
/// use sip_message::message::SipMethod;
///
/// let req = RequestBuilder::new(SipMethod::Invite, "sip:bob@example.com".parse().unwrap()).build();
///
/// assert_eq!(req.start_line(), "INVITE sip:bob@example.com SIP/2.0");
/// assert_eq!(req.fields().get("request_id").unwrap().as_str(), Some(req.message_id().as_str()));
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct Request {
    base: MessageBase,
    req_line: RequestLine,
}

impl Request {
    /// Builds a new request.
    ///
    /// A missing or empty `id` is replaced by a fresh one. `fields` always
    /// receive a `request_id` entry equal to the message id, overriding any
    /// value already present. A blank `body` is ignored.
    pub fn new(
        id: Option<MessageId>,
        method: SipMethod,
        recipient: Uri,
        sip_version: &str,
        headers: Vec<Header>,
        body: &str,
        fields: &Fields,
    ) -> Self {
        let mut base = MessageBase::new(id, sip_version, Headers::from(headers), Fields::new());
        base.fields = fields.with_field("request_id", &base.id);

        let mut request = Request {
            base,
            req_line: RequestLine { method, uri: recipient },
        };
        if !body.trim().is_empty() {
            request.set_body(body, true);
        }

        request
    }

    /// Returns the request method.
    pub fn method(&self) -> SipMethod {
        self.req_line.method
    }

    /// Sets the request method.
    pub fn set_method(&mut self, method: SipMethod) {
        self.req_line.method = method;
    }

    /// Returns the Request-URI.
    pub fn recipient(&self) -> &Uri {
        &self.req_line.uri
    }

    /// Sets the Request-URI.
    pub fn set_recipient(&mut self, recipient: Uri) {
        self.req_line.uri = recipient;
    }

    /// Returns the request line.
    pub fn req_line(&self) -> &RequestLine {
        &self.req_line
    }

    /// Returns `true` for an `INVITE`.
    pub fn is_invite(&self) -> bool {
        self.method().is_invite()
    }

    /// Returns `true` for an `ACK`.
    pub fn is_ack(&self) -> bool {
        self.method().is_ack()
    }

    /// Returns `true` for a `CANCEL`.
    pub fn is_cancel(&self) -> bool {
        self.method().is_cancel()
    }

    /// Returns a copy of this request, same id, with `fields` merged over
    /// the current metadata.
    pub fn with_fields(&self, fields: &Fields) -> Request {
        Request::new(
            Some(self.message_id().clone()),
            self.method(),
            self.recipient().clone(),
            self.sip_version(),
            self.headers().clone_headers(),
            self.body().unwrap_or_default(),
            &self.fields().with_fields(fields),
        )
    }

    /// Returns the first address of the first `Route` header, if any.
    fn route_target(&self) -> Option<&Uri> {
        crate::find_map_header!(self.headers(), Route).and_then(Route::first)
    }
}

impl Message for Request {
    fn base(&self) -> &MessageBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut MessageBase {
        &mut self.base
    }

    fn start_line(&self) -> String {
        format!("{} {} {}", self.req_line.method, self.req_line.uri, self.sip_version())
    }

    fn short(&self) -> String {
        let mut fields = self
            .fields()
            .with_field("method", self.method().as_str())
            .with_field("recipient", self.recipient().to_string());
        if let Some(cseq) = self.cseq() {
            fields = fields.with_field("sequence", cseq.cseq);
        }

        format!("sip.Request<{fields}>")
    }

    /// Resolves the address the request was sent from using the top-most
    /// `Via` hop.
    fn source(&self) -> Option<String> {
        if let Some(src) = &self.base.src {
            return Some(src.to_string());
        }

        self.via_hop().map(via_hop_address)
    }

    /// Resolves the next hop the request must be sent to.
    ///
    /// The first address of the first `Route` governs when present,
    /// otherwise the Request-URI. Only SIP uris can be resolved.
    fn destination(&self) -> Option<String> {
        if let Some(dest) = &self.base.dest {
            return Some(dest.to_string());
        }

        let uri = match self.route_target() {
            Some(uri) => uri,
            None => self.recipient(),
        };
        let Some(uri) = uri.as_sip() else {
            tracing::debug!(uri = %uri, "Cannot resolve destination of a non SIP uri");
            return None;
        };
        let port = uri.port().unwrap_or_else(|| self.transport().default_port());

        Some(format!("{}:{}", uri.host(), port))
    }
}

impl Clone for Request {
    /// Clones the request under a fresh message id.
    fn clone(&self) -> Self {
        Request::new(
            None,
            self.method(),
            self.recipient().clone(),
            self.sip_version(),
            self.headers().clone_headers(),
            self.body().unwrap_or_default(),
            self.fields(),
        )
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_message(self, f)
    }
}

/// Builder for [`Request`].
///
/// Defaults to `SIP/2.0`, no headers, no body and empty metadata.
#[derive(Debug)]
pub struct RequestBuilder {
    id: Option<MessageId>,
    method: SipMethod,
    recipient: Uri,
    sip_version: String,
    headers: Vec<Header>,
    body: String,
    fields: Fields,
}

impl RequestBuilder {
    /// Starts a request for `method` targeting `recipient`.
    pub fn new(method: SipMethod, recipient: Uri) -> Self {
        Self {
            id: None,
            method,
            recipient,
            sip_version: SIPV2.to_string(),
            headers: Vec::new(),
            body: String::new(),
            fields: Fields::new(),
        }
    }

    /// Uses `id` as the message id.
    pub fn id(mut self, id: impl Into<MessageId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the SIP version.
    pub fn sip_version(mut self, sip_version: &str) -> Self {
        self.sip_version = sip_version.to_string();
        self
    }

    /// Adds a header.
    pub fn header(mut self, header: Header) -> Self {
        self.headers.push(header);
        self
    }

    /// Adds several headers, in order.
    pub fn headers(mut self, headers: impl IntoIterator<Item = Header>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the body.
    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    /// Sets the metadata.
    pub fn fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// Builds the request.
    pub fn build(self) -> Request {
        Request::new(
            self.id,
            self.method,
            self.recipient,
            &self.sip_version,
            self.headers,
            &self.body,
            &self.fields,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldValue;
    use crate::headers::{CSeq, Via};

    fn invite() -> Request {
        RequestBuilder::new(SipMethod::Invite, "sip:bob@example.com".parse().unwrap())
            .id("invite-1")
            .header(Header::Via(Via::new_udp("pc33.atlanta.com".parse().unwrap(), Some("z9hG4bK-1"))))
            .header(Header::CSeq(CSeq::new(42, SipMethod::Invite)))
            .fields(Fields::from([("request_id", "stale"), ("call", "a")]))
            .build()
    }

    #[test]
    fn test_start_line() {
        assert_eq!(invite().start_line(), "INVITE sip:bob@example.com SIP/2.0");
    }

    #[test]
    fn test_request_id_overrides_given_field() {
        let req = invite();

        assert_eq!(req.message_id().as_str(), "invite-1");
        assert_eq!(req.fields().get("request_id"), Some(&FieldValue::from("invite-1")));
        assert_eq!(req.fields().get("call"), Some(&FieldValue::from("a")));
    }

    #[test]
    fn test_blank_body_is_ignored() {
        let req = RequestBuilder::new(SipMethod::Message, "sip:bob@example.com".parse().unwrap())
            .body(" \r\n ")
            .build();

        assert_eq!(req.body(), None);
        assert!(!req.body_provided());
        assert!(!req.headers().contains("Content-Length"));
    }

    #[test]
    fn test_clone_gets_new_id_and_independent_headers() {
        let req = invite();
        let mut copy = req.clone();
        copy.cseq_mut().unwrap().cseq = 7;

        assert_ne!(copy.message_id(), req.message_id());
        assert_eq!(copy.fields().get("request_id"), Some(&FieldValue::from(copy.message_id())));
        assert_eq!(req.cseq().unwrap().cseq, 42);
    }

    #[test]
    fn test_with_fields_keeps_id() {
        let req = invite();
        let updated = req.with_fields(&Fields::from([("call", "b"), ("request_id", "other")]));

        assert_eq!(updated.message_id(), req.message_id());
        assert_eq!(updated.fields().get("call"), Some(&FieldValue::from("b")));
        assert_eq!(updated.fields().get("request_id"), Some(&FieldValue::from("invite-1")));
    }

    #[test]
    fn test_method_predicates() {
        let mut req = invite();
        assert!(req.is_invite());

        req.set_method(SipMethod::Cancel);
        assert!(req.is_cancel());
        assert!(!req.is_ack());
    }

    #[test]
    fn test_source_without_via_is_unresolvable() {
        let req = RequestBuilder::new(SipMethod::Options, "sip:bob@example.com".parse().unwrap()).build();

        assert_eq!(req.source(), None);
    }

    #[test]
    fn test_source_uses_default_port() {
        assert_eq!(invite().source().as_deref(), Some("pc33.atlanta.com:5060"));
    }

    #[test]
    fn test_destination_prefers_route() {
        let mut req = invite();
        req.append_header(Header::Route(Route::new(vec![
            "sip:proxy.example.com:5080;lr".parse().unwrap(),
        ])));

        assert_eq!(req.destination().as_deref(), Some("proxy.example.com:5080"));
    }

    #[test]
    fn test_destination_of_non_sip_recipient() {
        let req = RequestBuilder::new(SipMethod::Invite, "tel:+1-201-555-0123".parse().unwrap()).build();

        assert_eq!(req.destination(), None);
    }

    #[test]
    fn test_short() {
        let req = invite();

        assert_eq!(
            req.short(),
            "sip.Request<{call=a, method=INVITE, recipient=sip:bob@example.com, request_id=invite-1, sequence=42}>"
        );
    }

    #[test]
    fn test_display_renders_full_message() {
        let req = RequestBuilder::new(SipMethod::Message, "sip:bob@example.com".parse().unwrap())
            .header(Header::CSeq(CSeq::new(1, SipMethod::Message)))
            .body("hi")
            .build();

        assert_eq!(
            req.to_string(),
            "MESSAGE sip:bob@example.com SIP/2.0\r\nCSeq: 1 MESSAGE\r\nContent-Length: 2\r\n\r\nhi"
        );
    }
}
