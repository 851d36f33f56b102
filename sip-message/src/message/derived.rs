//! Requests built from an existing exchange.

use crate::fields::Fields;
use crate::generate_branch;
use crate::headers::{CSeq, CallId, Header, RecordRoute, Route, SipHeader, To, Via};

use super::{Message, MessageId, Request, Response, SipMethod, copy_headers};

/// Builds the `ACK` for a 2xx response to an `INVITE` (RFC 3261 13.2.2.4).
///
/// The `ACK` of a 2xx is a transaction of its own, so the copied top `Via`
/// hop gets a new branch. The route set is the one of the `INVITE` when it
/// had `Route` headers, otherwise the response `Record-Route` set in reverse
/// order. `To` comes from the response, so it carries the remote tag, and
/// `CSeq` keeps the `INVITE` number with the method set to `ACK`.
///
/// The request is sent to the response `Contact`, or to the `INVITE`
/// Request-URI when there is none.
pub fn new_ack_request(
    ack_id: Option<MessageId>,
    invite_request: &Request,
    invite_response: &Response,
    fields: &Fields,
) -> Request {
    let recipient = match invite_response.contact() {
        Some(contact) => contact.address().clone(),
        None => invite_request.recipient().clone(),
    };
    let fields = invite_request
        .fields()
        .with_fields(fields)
        .with_field("invite_request_id", invite_request.message_id())
        .with_field("invite_response_id", invite_response.message_id());

    let mut ack = Request::new(
        ack_id,
        SipMethod::Ack,
        recipient,
        invite_response.sip_version(),
        Vec::new(),
        "",
        &fields,
    );

    copy_headers(Via::NAME, invite_request, &mut ack);
    if let Some(via) = ack.via_hop_mut() {
        via.set_branch(&generate_branch());
    }

    if invite_request.headers().contains(Route::NAME) {
        copy_headers(Route::NAME, invite_request, &mut ack);
    } else {
        let record_routes: Vec<&RecordRoute> = crate::filter_map_header!(invite_response.headers(), RecordRoute).collect();
        if !record_routes.is_empty() {
            let addrs = record_routes
                .iter()
                .rev()
                .flat_map(|rr| rr.reversed_route().addrs)
                .collect();
            ack.append_header(Header::Route(Route::new(addrs)));
        }
    }

    copy_headers(crate::headers::From::NAME, invite_request, &mut ack);
    copy_headers(To::NAME, invite_response, &mut ack);
    copy_headers(CallId::NAME, invite_request, &mut ack);
    copy_headers(CSeq::NAME, invite_request, &mut ack);
    if let Some(cseq) = ack.cseq_mut() {
        cseq.method = SipMethod::Ack;
    }

    tracing::debug!(
        ack_id = %ack.message_id(),
        invite_id = %invite_request.message_id(),
        branch = ack.via_hop().and_then(Via::branch),
        "Built ACK for 2xx response"
    );

    ack
}

/// Builds the `CANCEL` of a pending request (RFC 3261 9.1).
///
/// The `CANCEL` must match the transaction it cancels, so the top `Via` hop
/// is cloned with its branch untouched. `Route`, `From`, `To`, `Call-ID` and
/// `CSeq` are copied, the latter with its method set to `CANCEL`.
pub fn new_cancel_request(cancel_id: Option<MessageId>, request: &Request, fields: &Fields) -> Request {
    let fields = request
        .fields()
        .with_fields(fields)
        .with_field("cancelling_request_id", request.message_id());

    let mut cancel = Request::new(
        cancel_id,
        SipMethod::Cancel,
        request.recipient().clone(),
        request.sip_version(),
        Vec::new(),
        "",
        &fields,
    );

    if let Some(via) = request.via_hop() {
        cancel.append_header(Header::Via(via.clone()));
    }
    for name in [
        Route::NAME,
        crate::headers::From::NAME,
        To::NAME,
        CallId::NAME,
        CSeq::NAME,
    ] {
        copy_headers(name, request, &mut cancel);
    }
    if let Some(cseq) = cancel.cseq_mut() {
        cseq.method = SipMethod::Cancel;
    }

    tracing::debug!(
        cancel_id = %cancel.message_id(),
        request_id = %request.message_id(),
        "Built CANCEL for pending request"
    );

    cancel
}

/// Duplicates `request` keeping its message id and metadata.
///
/// Unlike [`Clone`], the copy is still the same logical message.
pub fn copy_request(request: &Request) -> Request {
    Request::new(
        Some(request.message_id().clone()),
        request.method(),
        request.recipient().clone(),
        request.sip_version(),
        request.headers().clone_headers(),
        request.body().unwrap_or_default(),
        request.fields(),
    )
}
