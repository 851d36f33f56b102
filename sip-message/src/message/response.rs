use std::fmt;

use crate::ArcStr;
use crate::fields::Fields;
use crate::headers::{CSeq, CallId, Header, Headers, RecordRoute, SipHeader, To, Via};

use super::{Message, MessageBase, MessageId, Request, StatusCode, copy_headers, via_hop_address, write_message};

/// Represents a SIP Status-Line without the version.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct StatusLine {
    /// The SIP status code associated with the response.
    pub code: StatusCode,
    /// The reason phrase explaining the status code.
    pub reason: ArcStr,
}

/// A SIP Response.
#[derive(Debug, PartialEq, Eq)]
pub struct Response {
    base: MessageBase,
    status_line: StatusLine,
}

impl Response {
    /// Builds a new response.
    ///
    /// An empty `reason` is replaced by the canonical phrase of `code`.
    /// `fields` receive a `response_id` entry equal to the message id.
    pub fn new(
        id: Option<MessageId>,
        sip_version: &str,
        code: StatusCode,
        reason: &str,
        headers: Vec<Header>,
        body: &str,
        fields: &Fields,
    ) -> Self {
        let mut base = MessageBase::new(id, sip_version, Headers::from(headers), Fields::new());
        base.fields = fields.with_field("response_id", &base.id);

        let reason = if reason.is_empty() { code.reason() } else { reason };
        let mut response = Response {
            base,
            status_line: StatusLine {
                code,
                reason: reason.into(),
            },
        };
        if !body.trim().is_empty() {
            response.set_body(body, true);
        }

        response
    }

    /// Builds a response to `request`.
    ///
    /// `Record-Route`, `Via`, `From`, `To`, `Call-ID` and `CSeq` are copied
    /// from the request, and its metadata is carried over with a
    /// `request_id` entry pointing at it.
    ///
    /// # Examples
    ///
    /// ```
    /// use sip_message::{Message, RequestBuilder, Response};
    /// use sip_message::message::{SipMethod, StatusCode};
    ///
    /// let req = RequestBuilder::new(SipMethod::Options, "sip:bob@biloxi.com".parse().unwrap()).build();
    /// let res = Response::from_request(None, &req, StatusCode::OK, "", "");
    ///
    /// assert_eq!(res.start_line(), "SIP/2.0 200 OK");
    /// assert!(res.is_success());
    /// ```
    pub fn from_request(id: Option<MessageId>, request: &Request, code: StatusCode, reason: &str, body: &str) -> Self {
        let fields = request.fields().with_field("request_id", request.message_id());
        let mut response = Response::new(id, request.sip_version(), code, reason, Vec::new(), "", &fields);

        for name in [
            RecordRoute::NAME,
            Via::NAME,
            crate::headers::From::NAME,
            To::NAME,
            CallId::NAME,
            CSeq::NAME,
        ] {
            copy_headers(name, request, &mut response);
        }
        if !body.trim().is_empty() {
            response.set_body(body, true);
        }

        response
    }

    /// Returns the status code.
    pub fn status_code(&self) -> StatusCode {
        self.status_line.code
    }

    /// Returns the reason phrase.
    pub fn reason(&self) -> &str {
        &self.status_line.reason
    }

    /// Returns the status line.
    pub fn status_line(&self) -> &StatusLine {
        &self.status_line
    }

    /// Returns `true` for a 1xx response.
    pub fn is_provisional(&self) -> bool {
        self.status_code().is_provisional()
    }

    /// Returns `true` for a 2xx response.
    pub fn is_success(&self) -> bool {
        self.status_code().is_success()
    }

    /// Returns `true` for a 3xx response.
    pub fn is_redirection(&self) -> bool {
        self.status_code().is_redirection()
    }

    /// Returns `true` for a 4xx response.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Returns `true` for a 5xx response.
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Returns `true` for a 6xx response.
    pub fn is_global_error(&self) -> bool {
        self.status_code().is_global_error()
    }

    /// Returns `true` if this answers a `CANCEL`.
    pub fn is_cancel(&self) -> bool {
        self.cseq().is_some_and(|cseq| cseq.method.is_cancel())
    }

    /// Returns `true` if this answers an `ACK`.
    pub fn is_ack(&self) -> bool {
        self.cseq().is_some_and(|cseq| cseq.method.is_ack())
    }

    /// Returns a copy of this response, same id, with `fields` merged over
    /// the current metadata.
    pub fn with_fields(&self, fields: &Fields) -> Response {
        Response::new(
            Some(self.message_id().clone()),
            self.sip_version(),
            self.status_code(),
            self.reason(),
            self.headers().clone_headers(),
            self.body().unwrap_or_default(),
            &self.fields().with_fields(fields),
        )
    }
}

impl Message for Response {
    fn base(&self) -> &MessageBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut MessageBase {
        &mut self.base
    }

    fn start_line(&self) -> String {
        format!("{} {} {}", self.sip_version(), self.status_line.code, self.status_line.reason)
    }

    fn short(&self) -> String {
        let mut fields = self
            .fields()
            .with_field("status", self.status_code().as_u16())
            .with_field("reason", self.reason());
        if let Some(cseq) = self.cseq() {
            fields = fields
                .with_field("sequence", cseq.cseq)
                .with_field("method", cseq.method.as_str());
        }

        format!("sip.Response<{fields}>")
    }

    /// Only what the transport layer recorded; a response carries no header
    /// naming its sender.
    fn source(&self) -> Option<String> {
        self.base.src.as_ref().map(ToString::to_string)
    }

    /// Where the response must be sent, read from the top-most `Via` hop.
    fn destination(&self) -> Option<String> {
        if let Some(dest) = &self.base.dest {
            return Some(dest.to_string());
        }

        self.via_hop().map(via_hop_address)
    }
}

impl Clone for Response {
    /// Clones the response under a fresh message id.
    fn clone(&self) -> Self {
        Response::new(
            None,
            self.sip_version(),
            self.status_code(),
            self.reason(),
            self.headers().clone_headers(),
            self.body().unwrap_or_default(),
            self.fields(),
        )
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_message(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldValue;
    use crate::message::{NameAddr, SipMethod};
    use crate::{RequestBuilder, SIPV2};

    fn request() -> Request {
        RequestBuilder::new(SipMethod::Invite, "sip:bob@biloxi.com".parse().unwrap())
            .id("inv")
            .header(Header::Via(Via::new_udp("pc33.atlanta.com".parse().unwrap(), Some("z9hG4bK-1"))))
            .header(Header::RecordRoute(RecordRoute::new(vec!["sip:p1.example.com;lr".parse().unwrap()])))
            .header(Header::From(crate::headers::From::with_tag(
                NameAddr::new("sip:alice@atlanta.com".parse().unwrap()),
                "1928301774",
            )))
            .header(Header::To(To::new(NameAddr::new("sip:bob@biloxi.com".parse().unwrap()))))
            .header(Header::CallId(CallId::new("a84b4c76e66710")))
            .header(Header::CSeq(CSeq::new(314159, SipMethod::Invite)))
            .header(Header::Other(crate::headers::OtherHeader::new("Subject", "lunch")))
            .build()
    }

    #[test]
    fn test_from_request_copies_dialog_headers() {
        let req = request();
        let res = Response::from_request(Some("res".into()), &req, StatusCode::RINGING, "", "");

        assert_eq!(res.headers().names(), ["Record-Route", "Via", "From", "To", "Call-ID", "CSeq"]);
        assert_eq!(res.fields().get("request_id"), Some(&FieldValue::from("inv")));
        assert_eq!(res.fields().get("response_id"), Some(&FieldValue::from("res")));
        assert_eq!(res.start_line(), "SIP/2.0 180 Ringing");
        assert!(res.is_provisional());
        assert!(!res.is_cancel());
    }

    #[test]
    fn test_destination_follows_via() {
        let req = request();
        let mut res = Response::from_request(None, &req, StatusCode::OK, "", "");
        res.via_hop_mut().unwrap().set_received("192.0.2.4");

        assert_eq!(res.destination().as_deref(), Some("192.0.2.4:5060"));
        assert_eq!(res.source(), None);

        res.set_source("10.0.0.2:5060");
        assert_eq!(res.source().as_deref(), Some("10.0.0.2:5060"));
    }

    #[test]
    fn test_custom_reason_and_clone() {
        let res = Response::new(None, SIPV2, StatusCode::BUSY_HERE, "Gone Fishing", Vec::new(), "", &Fields::new());
        let copy = res.clone();

        assert_eq!(copy.reason(), "Gone Fishing");
        assert_ne!(copy.message_id(), res.message_id());
        assert!(copy.is_client_error());
    }
}
