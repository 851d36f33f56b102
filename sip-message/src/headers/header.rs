use enum_as_inner::EnumAsInner;
use std::fmt;

use crate::ArcStr;
use crate::headers::*;

/// A SIP Header.
///
/// The closed family of headers the message model understands, plus a
/// generic [`Header::Other`] for everything else. Every variant owns its
/// data, so [`Clone`] yields a fully independent copy.
#[derive(Debug, PartialEq, Eq, EnumAsInner, Clone)]
pub enum Header {
    /// `Via` Header
    Via(Via),
    /// `Route` Header
    Route(Route),
    /// `Record-Route` Header
    RecordRoute(RecordRoute),
    /// `CSeq` Header
    CSeq(CSeq),
    /// `Contact` Header
    Contact(Contact),
    /// `From` Header
    From(From),
    /// `To` Header
    To(To),
    /// `Call-ID` Header
    CallId(CallId),
    /// `Content-Length` Header
    ContentLength(ContentLength),
    /// `Max-Forwards` Header
    MaxForwards(MaxForwards),
    /// Other Generic Header
    Other(OtherHeader),
}

/// Other generic Header.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct OtherHeader {
    /// Generic Header name
    pub name: ArcStr,
    /// Generic Header value
    pub value: ArcStr,
}

impl OtherHeader {
    /// Creates a new generic header.
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for OtherHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

macro_rules! impl_header_dispatch {
    ( $($variant:ident),* $(,)? ) => {
        impl Header {
            /// Returns the canonical header name, used as the collection key.
            pub fn name(&self) -> &str {
                match self {
                    $( Header::$variant(_) => <$variant as SipHeader>::NAME, )*
                    Header::Other(other) => &other.name,
                }
            }

            /// Returns `true` if `name` designates this header, either by its
            /// full or its compact form (case-insensitive).
            pub fn matches_name(&self, name: &str) -> bool {
                match self {
                    $( Header::$variant(_) => <$variant as SipHeader>::matches_name(name), )*
                    Header::Other(other) => other.name.eq_ignore_ascii_case(name),
                }
            }
        }

        impl fmt::Display for Header {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $( Header::$variant(inner) => fmt::Display::fmt(inner, f), )*
                    Header::Other(inner) => fmt::Display::fmt(inner, f),
                }
            }
        }
    };
}

impl_header_dispatch!(
    Via,
    Route,
    RecordRoute,
    CSeq,
    Contact,
    From,
    To,
    CallId,
    ContentLength,
    MaxForwards,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::SipMethod;

    #[test]
    fn test_name_and_compact_form() {
        let cid = Header::CallId(CallId::new("a84b4c76e66710"));

        assert_eq!(cid.name(), "Call-ID");
        assert!(cid.matches_name("call-id"));
        assert!(cid.matches_name("i"));
        assert!(!cid.matches_name("Via"));
    }

    #[test]
    fn test_other_header_matches_its_own_name() {
        let hdr = Header::Other(OtherHeader::new("X-Custom", "1"));

        assert_eq!(hdr.name(), "X-Custom");
        assert!(hdr.matches_name("x-custom"));
        assert_eq!(hdr.to_string(), "X-Custom: 1");
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Header::CSeq(CSeq::new(42, SipMethod::Invite));
        let mut copy = original.clone();
        if let Header::CSeq(cseq) = &mut copy {
            cseq.method = SipMethod::Ack;
        }

        assert_matches!(original, Header::CSeq(CSeq { method: SipMethod::Invite, .. }));
        assert_matches!(copy, Header::CSeq(CSeq { cseq: 42, method: SipMethod::Ack }));
    }
}
