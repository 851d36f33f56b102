#![allow(dead_code)]

use sip_message::headers::{self, CSeq, CallId, Contact, Header, RecordRoute, To, Via};
use sip_message::message::{NameAddr, SipMethod, StatusCode};
use sip_message::{Fields, Message, Request, RequestBuilder, Response};

pub const INVITE_BRANCH: &str = "z9hG4bK-1";

pub fn via(sent_by: &str, branch: &str) -> Header {
    Header::Via(Via::new_udp(sent_by.parse().unwrap(), Some(branch)))
}

pub fn invite() -> Request {
    RequestBuilder::new(SipMethod::Invite, "sip:bob@example.com".parse().unwrap())
        .id("invite-1")
        .header(via("pc33.atlanta.com", INVITE_BRANCH))
        .header(Header::From(headers::From::with_tag(
            NameAddr::with_display("Alice", "sip:alice@atlanta.com".parse().unwrap()),
            "1928301774",
        )))
        .header(Header::To(To::new(NameAddr::with_display(
            "Bob",
            "sip:bob@example.com".parse().unwrap(),
        ))))
        .header(Header::CallId(CallId::new("a84b4c76e66710@pc33.atlanta.com")))
        .header(Header::CSeq(CSeq::new(42, SipMethod::Invite)))
        .header(Header::Contact(Contact::new(NameAddr::new(
            "sip:alice@pc33.atlanta.com".parse().unwrap(),
        ))))
        .body("v=0\r\no=alice 2890844526 2890844526 IN IP4 pc33.atlanta.com\r\n")
        .fields(Fields::from([("dialog", "d-1")]))
        .build()
}

/// A 200 OK as a UAS behind two record-routing proxies would answer it.
pub fn ok_response(invite: &Request, record_routes: &[&[&str]]) -> Response {
    let mut res = Response::from_request(Some("ok-1".into()), invite, StatusCode::OK, "", "");
    for line in record_routes {
        let addrs = line.iter().map(|uri| uri.parse().unwrap()).collect();
        res.append_header(Header::RecordRoute(RecordRoute::new(addrs)));
    }
    if let Some(Header::To(mut to)) = res.remove_header("To").into_iter().next() {
        to.set_tag("a6c85cf");
        res.append_header(Header::To(to));
    }
    res.append_header(Header::Contact(Contact::new(NameAddr::new(
        "sip:bob@192.0.2.4".parse().unwrap(),
    ))));
    res
}
