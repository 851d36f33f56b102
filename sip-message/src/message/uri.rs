use std::{
    borrow::Cow,
    fmt,
    net::IpAddr,
    str::FromStr,
};

use enum_as_inner::EnumAsInner;
use itertools::Itertools;

use crate::{
    ArcStr,
    error::{Error, Result},
};

use super::{Parameters, TransportKind};

const TRANSPORT_PARAM: &str = "transport";
const LR_PARAM: &str = "lr";

/// A request target or header address.
///
/// The closed set of URI shapes this crate works with: a SIP/SIPS URI, whose
/// host and port drive address resolution, or any other absolute URI
/// (`tel:`, `urn:`, ...) kept as scheme plus opaque text.
///
/// # Examples
/// ```
/// use sip_message::message::Uri;
///
/// let uri: Uri = "sip:alice@atlanta.com:5070".parse().unwrap();
///
/// assert_eq!(uri.host().unwrap().as_str(), "atlanta.com");
/// assert_eq!(uri.port(), Some(5070));
///
/// let tel: Uri = "tel:+1-201-555-0123".parse().unwrap();
/// assert!(tel.as_sip().is_none());
/// assert_eq!(tel.to_string(), "tel:+1-201-555-0123");
/// ```
#[derive(Debug, PartialEq, Eq, Clone, EnumAsInner)]
pub enum Uri {
    /// A `sip:` or `sips:` URI.
    Sip(SipUri),
    /// Any other absolute URI.
    Absolute(AbsoluteUri),
}

impl Uri {
    /// Returns the host of the uri, `None` for non SIP uris.
    pub fn host(&self) -> Option<&Host> {
        match self {
            Uri::Sip(uri) => Some(&uri.host_port.host),
            Uri::Absolute(_) => None,
        }
    }

    /// Returns the explicit port of the uri, if any.
    pub fn port(&self) -> Option<u16> {
        match self {
            Uri::Sip(uri) => uri.host_port.port,
            Uri::Absolute(_) => None,
        }
    }

    /// Returns the uri scheme as text.
    pub fn scheme(&self) -> &str {
        match self {
            Uri::Sip(uri) => uri.scheme.as_str(),
            Uri::Absolute(uri) => &uri.scheme,
        }
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uri::Sip(uri) => fmt::Display::fmt(uri, f),
            Uri::Absolute(uri) => fmt::Display::fmt(uri, f),
        }
    }
}

impl From<SipUri> for Uri {
    fn from(uri: SipUri) -> Self {
        Uri::Sip(uri)
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (scheme, rest) = s.split_once(':').ok_or_else(|| Error::InvalidUri(s.into()))?;

        if scheme.eq_ignore_ascii_case("sip") || scheme.eq_ignore_ascii_case("sips") {
            return s.parse().map(Uri::Sip);
        }
        if scheme.is_empty() || rest.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c))
        {
            return Err(Error::InvalidUri(s.into()));
        }

        Ok(Uri::Absolute(AbsoluteUri {
            scheme: scheme.into(),
            opaque: rest.into(),
        }))
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// A SIP URI scheme, either `sip` or `sips`.
///
/// Represents the scheme that appears in a SIP URI.
pub enum Scheme {
    /// An Sip uri scheme.
    Sip,
    /// An Sips uri scheme.
    Sips,
}

impl Scheme {
    /// Returns the scheme text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Sip => "sip",
            Scheme::Sips => "sips",
        }
    }
}

/// A non SIP absolute uri, such as `tel:+1-201-555-0123`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AbsoluteUri {
    /// The uri scheme.
    pub scheme: ArcStr,
    /// Everything after the first `:`.
    pub opaque: ArcStr,
}

impl fmt::Display for AbsoluteUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme, self.opaque)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
/// An SIP uri.
pub struct SipUri {
    /// The uri scheme.
    pub scheme: Scheme,

    /// Optional user part of uri.
    pub user: Option<UriUser>,

    /// The uri host.
    pub host_port: HostPort,

    /// Uri parameters (`;lr`, `;transport=tcp`, ...).
    pub params: Parameters,

    /// Header parameters (`?subject=...`).
    pub hdr_params: Parameters,
}

impl SipUri {
    /// Returns the uri host.
    pub fn host(&self) -> &Host {
        &self.host_port.host
    }

    /// Returns the uri explicit port.
    pub fn port(&self) -> Option<u16> {
        self.host_port.port
    }

    /// Returns `true` if the `lr` parameter is present.
    pub fn lr_param(&self) -> bool {
        self.params.contains(LR_PARAM)
    }

    /// Returns the `transport` parameter.
    pub fn transport_param(&self) -> Option<TransportKind> {
        self.params.get_named(TRANSPORT_PARAM).map(TransportKind::from)
    }
}

impl fmt::Display for SipUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.scheme.as_str())?;

        if let Some(user) = &self.user {
            write!(f, "{}", user.user)?;
            if let Some(pass) = &user.pass {
                write!(f, ":{}", pass)?;
            }
            write!(f, "@")?;
        }
        write!(f, "{}{}", self.host_port, self.params)?;

        if !self.hdr_params.is_empty() {
            let formater = Itertools::format_with(self.hdr_params.iter(), "&", |it, f| {
                f(&format_args!("{}={}", it.name(), it.value().unwrap_or("")))
            });
            write!(f, "?{}", formater)?;
        }

        Ok(())
    }
}

impl FromStr for SipUri {
    type Err = Error;

    /// Parses the `scheme:[user[:pass]@]host[:port][;params][?headers]` form.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidUri(s.into());
        let (scheme, rest) = s.trim().split_once(':').ok_or_else(invalid)?;
        let scheme = match scheme.to_ascii_lowercase().as_str() {
            "sip" => Scheme::Sip,
            "sips" => Scheme::Sips,
            _ => return Err(invalid()),
        };

        let (rest, headers) = match rest.split_once('?') {
            Some((rest, headers)) => (rest, Some(headers)),
            None => (rest, None),
        };
        let (user, rest) = match rest.rsplit_once('@') {
            Some((user, rest)) => {
                let user = match user.split_once(':') {
                    Some((user, pass)) => UriUser::new(user, Some(pass)),
                    None => UriUser::new(user, None),
                };
                (Some(user), rest)
            }
            None => (None, rest),
        };

        let mut parts = rest.split(';');
        let host_port = parts.next().ok_or_else(invalid)?.parse()?;
        let mut params = Parameters::new();
        for param in parts.filter(|p| !p.is_empty()) {
            match param.split_once('=') {
                Some((name, value)) => params.push(super::Parameter::new(name, Some(value))),
                None => params.push(super::Parameter::new(param, None)),
            }
        }
        let mut hdr_params = Parameters::new();
        for header in headers.into_iter().flat_map(|h| h.split('&')).filter(|h| !h.is_empty()) {
            let (name, value) = header.split_once('=').unwrap_or((header, ""));
            hdr_params.push(super::Parameter::new(name, Some(value)));
        }

        Ok(SipUri {
            scheme,
            user,
            host_port,
            params,
            hdr_params,
        })
    }
}

/// Represents an SIP `name-addr`.
///
/// Typically appear in `From`, `To`, and `Contact` header.
/// Contains an uri and a optional display part.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NameAddr {
    /// The optional display part.
    pub display: Option<ArcStr>,
    /// The uri of the `name-addr`.
    pub uri: Uri,
}

impl NameAddr {
    /// Creates a `NameAddr` without display name.
    pub fn new(uri: Uri) -> Self {
        Self { display: None, uri }
    }

    /// Creates a `NameAddr` with a display name.
    pub fn with_display(display: &str, uri: Uri) -> Self {
        Self {
            display: Some(display.into()),
            uri,
        }
    }
}

impl From<Uri> for NameAddr {
    fn from(uri: Uri) -> Self {
        Self::new(uri)
    }
}

impl fmt::Display for NameAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(display) = &self.display {
            write!(f, "\"{}\" ", display)?;
        }
        write!(f, "<{}>", self.uri)?;

        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
/// Represents the user information component of a URI.
pub struct UriUser {
    /// The username part of the URI.
    pub user: ArcStr,

    /// The optional password associated with the user.
    pub pass: Option<ArcStr>,
}

impl UriUser {
    /// Creates a new `UriUser`.
    pub fn new(user: &str, pass: Option<&str>) -> Self {
        Self {
            user: user.into(),
            pass: pass.map(Into::into),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
/// Represents the host part of a URI, which can be either a domain name or an IP address.
pub enum Host {
    /// A domain name, such as `example.com`.
    DomainName(ArcStr),

    /// An IP address, either IPv4 or IPv6.
    IpAddr(IpAddr),
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::DomainName(domain) => write!(f, "{domain}"),
            Host::IpAddr(IpAddr::V6(ip)) => write!(f, "[{ip}]"),
            Host::IpAddr(ip_addr) => write!(f, "{ip_addr}"),
        }
    }
}

impl FromStr for Host {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bare = s.strip_prefix('[').and_then(|s| s.strip_suffix(']')).unwrap_or(s);
        if let Ok(ip) = bare.parse() {
            return Ok(Host::IpAddr(ip));
        }
        let valid = !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || "-._".contains(c));
        if !valid {
            return Err(Error::InvalidHost(s.into()));
        }

        Ok(Host::DomainName(s.into()))
    }
}

impl Host {
    /// Returns the string representation of the host as a `Cow<str>`.
    ///
    /// If the host is a domain name, this returns a borrowed string.
    /// If the host is an IP address, this returns an owned string created via formatting.
    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            Host::DomainName(host) => Cow::Borrowed(host),
            Host::IpAddr(host) => Cow::Owned(host.to_string()),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
/// Represents a combination of a host (domain or IP address) and an optional port.
pub struct HostPort {
    /// The host part, which may be a domain name or an IP address.
    pub host: Host,

    /// The optional port number.
    pub port: Option<u16>,
}

impl FromStr for HostPort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(HostPort::new(Host::IpAddr(ip), None));
        }
        let (host, port) = match s.rfind(':') {
            Some(idx) if !s[..idx].contains(':') || s[..idx].ends_with(']') => (&s[..idx], Some(&s[idx + 1..])),
            _ => (s, None),
        };
        let port = port
            .map(|p| p.parse::<u16>().map_err(|_| Error::InvalidPort(p.into())))
            .transpose()?;

        Ok(HostPort::new(host.parse()?, port))
    }
}

impl HostPort {
    /// Creates a new `HostPort` from a host and optional port.
    pub fn new(host: Host, port: Option<u16>) -> Self {
        Self { host, port }
    }
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

impl From<Host> for HostPort {
    fn from(host: Host) -> Self {
        Self { host, port: None }
    }
}

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, Ipv6Addr};

    use super::*;

    #[test]
    fn test_parse_sip_uri_with_params() {
        let uri: SipUri = "sip:alice:secret@atlanta.com:5070;transport=tcp;lr".parse().unwrap();

        assert_eq!(uri.scheme, Scheme::Sip);
        assert_eq!(uri.user, Some(UriUser::new("alice", Some("secret"))));
        assert_eq!(uri.host(), &Host::DomainName("atlanta.com".into()));
        assert_eq!(uri.port(), Some(5070));
        assert_eq!(uri.transport_param(), Some(TransportKind::Tcp));
        assert!(uri.lr_param());
        assert_eq!(uri.to_string(), "sip:alice:secret@atlanta.com:5070;transport=tcp;lr");
    }

    #[test]
    fn test_parse_sips_uri_with_headers() {
        let uri: SipUri = "sips:bob@biloxi.com?subject=project".parse().unwrap();

        assert_eq!(uri.scheme, Scheme::Sips);
        assert_eq!(uri.hdr_params.get_named("subject"), Some("project"));
        assert_eq!(uri.to_string(), "sips:bob@biloxi.com?subject=project");
    }

    #[test]
    fn test_parse_host_port_variants() {
        assert_eq!(
            "10.0.0.1:5080".parse::<HostPort>().unwrap(),
            HostPort::new(Host::IpAddr(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))), Some(5080))
        );
        assert_eq!(
            "[::1]:5060".parse::<HostPort>().unwrap(),
            HostPort::new(Host::IpAddr(IpAddr::V6(Ipv6Addr::LOCALHOST)), Some(5060))
        );
        assert_eq!(
            "::1".parse::<HostPort>().unwrap(),
            HostPort::new(Host::IpAddr(IpAddr::V6(Ipv6Addr::LOCALHOST)), None)
        );
        assert_eq!(
            "proxy.example.com".parse::<HostPort>().unwrap(),
            HostPort::new(Host::DomainName("proxy.example.com".into()), None)
        );
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert_matches!("host:99999".parse::<HostPort>(), Err(Error::InvalidPort(p)) => {
            assert_eq!(p, "99999");
        });
    }

    #[test]
    fn test_ipv6_host_is_bracketed() {
        let hp = HostPort::new(Host::IpAddr(IpAddr::V6(Ipv6Addr::LOCALHOST)), Some(5060));

        assert_eq!(hp.to_string(), "[::1]:5060");
    }

    #[test]
    fn test_uri_rejects_missing_scheme() {
        assert_matches!("alice.example.com".parse::<Uri>(), Err(Error::InvalidUri(_)));
    }

    #[test]
    fn test_name_addr_display() {
        let addr = NameAddr::with_display("Bob", "sip:bob@biloxi.com".parse().unwrap());

        assert_eq!(addr.to_string(), "\"Bob\" <sip:bob@biloxi.com>");
    }
}
