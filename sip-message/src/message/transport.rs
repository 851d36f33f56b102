use std::fmt;

const TP_UDP: &str = "UDP";
const TP_TCP: &str = "TCP";
const TP_TLS: &str = "TLS";
const TP_SCTP: &str = "SCTP";
const TP_WS: &str = "WS";
const TP_WSS: &str = "WSS";
const TP_UNKNOWN: &str = "UNKNOWN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// An SIP Transport Type.
pub enum TransportKind {
    #[default]
    /// `UDP` transport.
    Udp,
    /// `TCP` transport.
    Tcp,
    /// `WebSocket` transport.
    Ws,
    /// Secure `WebSocket` transport.
    Wss,
    /// `TLS` transport.
    Tls,
    /// `SCTP` transport.
    Sctp,
    /// UNKNOW transport.
    Unknown,
}

impl TransportKind {
    /// Returns the default port number associated with the transport protocol.
    ///
    /// - `UDP`, `TCP`, and `SCTP` use port `5060` by default.
    /// - `TLS` uses port `5061`.
    /// - `WS` uses port `80` and `WSS` port `443`.
    /// - `Unknown` falls back to `5060`.
    #[inline]
    pub const fn default_port(&self) -> u16 {
        match self {
            TransportKind::Udp | TransportKind::Tcp | TransportKind::Sctp | TransportKind::Unknown => 5060,
            TransportKind::Tls => 5061,
            TransportKind::Ws => 80,
            TransportKind::Wss => 443,
        }
    }

    /// Returns the transport string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Udp => TP_UDP,
            TransportKind::Tcp => TP_TCP,
            TransportKind::Ws => TP_WS,
            TransportKind::Wss => TP_WSS,
            TransportKind::Tls => TP_TLS,
            TransportKind::Sctp => TP_SCTP,
            TransportKind::Unknown => TP_UNKNOWN,
        }
    }
}

/// Returns the well-known port for `transport`.
#[inline]
pub const fn default_port(transport: TransportKind) -> u16 {
    transport.default_port()
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TransportKind {
    fn from(s: &str) -> Self {
        s.as_bytes().into()
    }
}

impl From<&[u8]> for TransportKind {
    fn from(b: &[u8]) -> Self {
        match b {
            b"UDP" | b"udp" => TransportKind::Udp,
            b"TCP" | b"tcp" => TransportKind::Tcp,
            b"WS" | b"ws" => TransportKind::Ws,
            b"WSS" | b"wss" => TransportKind::Wss,
            b"TLS" | b"tls" => TransportKind::Tls,
            b"SCTP" | b"sctp" => TransportKind::Sctp,
            _ => TransportKind::Unknown,
        }
    }
}
