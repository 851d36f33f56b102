mod common;

use assert_matches::assert_matches;
use common::{INVITE_BRANCH, invite, ok_response, via};
use sip_message::headers::{CSeq, Header, Route};
use sip_message::message::SipMethod;
use sip_message::{FieldValue, Fields, Message, copy_request, new_ack_request, new_cancel_request};

fn route_addrs(route: &Header) -> Vec<String> {
    assert_matches!(route, Header::Route(Route { addrs }) => addrs.iter().map(ToString::to_string).collect())
}

#[test_log::test]
fn ack_regenerates_branch_and_keeps_sequence() {
    let invite = invite();
    let ok = ok_response(&invite, &[]);
    let ack = new_ack_request(None, &invite, &ok, &Fields::new());

    assert_eq!(ack.start_line(), "ACK sip:bob@192.0.2.4 SIP/2.0");
    assert_ne!(ack.via_hop().unwrap().branch(), Some(INVITE_BRANCH));
    assert_eq!(ack.cseq(), Some(&CSeq::new(42, SipMethod::Ack)));
    assert_eq!(ack.to().unwrap().tag(), Some("a6c85cf"));
    assert_eq!(ack.from().unwrap().tag(), Some("1928301774"));
    assert_eq!(ack.call_id(), invite.call_id());
    assert_eq!(ack.body(), None);
    assert!(!ack.headers().contains("Content-Length"));
}

#[test]
fn ack_reverses_record_route_line() {
    let invite = invite();
    let ok = ok_response(&invite, &[&["sip:r1.example.com;lr", "sip:r2.example.com;lr"]]);
    let ack = new_ack_request(None, &invite, &ok, &Fields::new());

    let routes = ack.get_headers("Route");
    assert_eq!(routes.len(), 1);
    assert_eq!(route_addrs(routes[0]), ["sip:r2.example.com;lr", "sip:r1.example.com;lr"]);
}

#[test]
fn ack_reverses_record_route_headers() {
    let invite = invite();
    let ok = ok_response(
        &invite,
        &[&["sip:r1.example.com;lr"], &["sip:r2.example.com;lr", "sip:r3.example.com;lr"]],
    );
    let ack = new_ack_request(None, &invite, &ok, &Fields::new());

    let routes = ack.get_headers("Route");
    assert_eq!(
        route_addrs(routes[0]),
        ["sip:r3.example.com;lr", "sip:r2.example.com;lr", "sip:r1.example.com;lr"]
    );
    assert_eq!(ack.destination().as_deref(), Some("r3.example.com:5060"));
}

#[test]
fn ack_copies_existing_route_set() {
    let mut invite = invite();
    invite.append_header(Header::Route(Route::new(vec!["sip:proxy.example.com:5080;lr".parse().unwrap()])));
    let ok = ok_response(&invite, &[&["sip:r1.example.com;lr"]]);
    let ack = new_ack_request(None, &invite, &ok, &Fields::new());

    let routes = ack.get_headers("Route");
    assert_eq!(routes.len(), 1);
    assert_eq!(route_addrs(routes[0]), ["sip:proxy.example.com:5080;lr"]);
}

#[test]
fn ack_copies_every_via_and_renews_only_the_top_one() {
    let mut invite = invite();
    invite.append_header(via("proxy.example.com", "z9hG4bK-proxy"));
    let ack = new_ack_request(None, &invite, &ok_response(&invite, &[]), &Fields::new());

    let vias = ack.get_headers("Via");
    assert_eq!(vias.len(), 2);
    assert_matches!(vias[1], Header::Via(v) if v.branch() == Some("z9hG4bK-proxy"));
}

#[test_log::test]
fn cancel_keeps_transaction_identity() {
    let mut invite = invite();
    invite.append_header(Header::Route(Route::new(vec!["sip:proxy.example.com:5080;lr".parse().unwrap()])));
    let cancel = new_cancel_request(Some("cancel-1".into()), &invite, &Fields::from([("reason", "user")]));

    assert_eq!(cancel.start_line(), "CANCEL sip:bob@example.com SIP/2.0");
    assert_eq!(cancel.via_hop(), invite.via_hop());
    assert_eq!(cancel.cseq(), Some(&CSeq::new(42, SipMethod::Cancel)));
    assert_eq!(cancel.get_headers("Route"), invite.get_headers("Route"));
    assert_eq!(cancel.to(), invite.to());
    assert!(!cancel.headers().contains("Contact"));
    assert_eq!(cancel.fields().get("request_id"), Some(&FieldValue::from("cancel-1")));
    assert_eq!(cancel.fields().get("reason"), Some(&FieldValue::from("user")));
    assert_eq!(invite.cseq(), Some(&CSeq::new(42, SipMethod::Invite)));
}

#[test]
fn copy_and_clone_identity_laws() {
    let invite = invite();

    assert_eq!(copy_request(&invite).message_id(), invite.message_id());
    assert_ne!(invite.clone().message_id(), invite.message_id());
}

#[test]
fn clone_is_independent_both_ways() {
    let mut invite = invite();
    let mut clone = invite.clone();

    clone.via_hop_mut().unwrap().set_branch("z9hG4bK-clone");
    invite.cseq_mut().unwrap().cseq = 43;

    assert_eq!(invite.via_hop().unwrap().branch(), Some(INVITE_BRANCH));
    assert_eq!(clone.cseq().unwrap().cseq, 42);
    assert_eq!(clone.body(), invite.body());
    assert_eq!(clone.get_headers("Content-Length").len(), 1);
}
