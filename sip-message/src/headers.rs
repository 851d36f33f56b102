#![deny(missing_docs)]
//! SIP Headers types
//!
//! The module provide the [`Headers`] struct that contains
//! an list of [`Header`] kept in render order, and the typed
//! headers the message model reads and writes.

mod call_id;
mod contact;
mod content_length;
mod cseq;
mod from;
mod header;
mod max_forwards;
mod record_route;
mod route;
mod to;
mod via;

pub use call_id::CallId;
pub use contact::Contact;
pub use content_length::ContentLength;
pub use cseq::CSeq;
pub use from::From;
pub use header::*;
pub use max_forwards::MaxForwards;
pub use record_route::RecordRoute;
pub use route::Route;
pub use to::To;
pub use via::Via;

use core::fmt;
use std::ops::Index;

/// Default value of the `Max-Forwards` header.
pub const DEFAULT_MAX_FORWARDS: u32 = 70;

/// Trait implemented by every typed SIP header.
pub trait SipHeader {
    /// The full name of the SIP header (e.g., `"Contact"`).
    const NAME: &'static str;
    /// The abbreviated name of the SIP header, if any (e.g., `"f"` for
    /// `"From"`).
    const SHORT_NAME: Option<&'static str> = None;

    /// Checks if the given name matches this header's name.
    fn matches_name(name: &str) -> bool {
        name.eq_ignore_ascii_case(Self::NAME) || Self::SHORT_NAME.is_some_and(|short| name.eq_ignore_ascii_case(short))
    }
}

/// A collection of SIP Headers.
///
/// A wrapper over Vec<[`Header`]> kept in render order: headers are
/// grouped by name in the order each name first appeared, and keep
/// insertion order within a name.
///
/// # Examples
///
/// ```
/// # use sip_message::headers::{Headers, Header, ContentLength, CallId};
/// let mut headers = Headers::new();
/// headers.push(Header::ContentLength(ContentLength::new(10)));
/// headers.push(Header::CallId(CallId::new("a84b4c76e66710")));
///
/// assert_eq!(headers.len(), 2);
/// assert!(headers.contains("i"));
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Headers(Vec<Header>);

impl Headers {
    /// Create a new empty collection of headers.
    #[inline]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Constructs a new, empty collection of `Headers` with at least the
    /// specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Push an new header.
    ///
    /// The header lands right after the last header with the same name, or
    /// at the end when its name is new to the collection.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sip_message::headers::{Headers, Header, Via, CallId};
    /// let mut headers = Headers::new();
    /// headers.push(Header::Via(Via::new_udp("a.example.com".parse().unwrap(), None)));
    /// headers.push(Header::CallId(CallId::new("1")));
    /// headers.push(Header::Via(Via::new_udp("b.example.com".parse().unwrap(), None)));
    ///
    /// let names: Vec<_> = headers.iter().map(|h| h.name()).collect();
    /// assert_eq!(names, ["Via", "Via", "Call-ID"]);
    /// ```
    pub fn push(&mut self, hdr: Header) {
        let name = hdr.name();
        match self.0.iter().rposition(|h| h.name().eq_ignore_ascii_case(name)) {
            Some(idx) => self.0.insert(idx + 1, hdr),
            None => self.0.push(hdr),
        }
    }

    /// Appends a header. Same as [`Headers::push`].
    #[inline]
    pub fn append_header(&mut self, hdr: Header) {
        self.push(hdr);
    }

    /// Returns every header designated by `name`, in order.
    ///
    /// `name` is matched case-insensitively, compact forms included.
    pub fn get_headers(&self, name: &str) -> Vec<&Header> {
        self.0.iter().filter(|h| h.matches_name(name)).collect()
    }

    /// Returns the first header designated by `name`.
    pub fn get_header(&self, name: &str) -> Option<&Header> {
        self.0.iter().find(|h| h.matches_name(name))
    }

    /// Removes every header designated by `name` and returns them.
    pub fn remove(&mut self, name: &str) -> Vec<Header> {
        let (removed, kept) = std::mem::take(&mut self.0)
            .into_iter()
            .partition(|h| h.matches_name(name));
        self.0 = kept;

        removed
    }

    /// Returns `true` if a header designated by `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// Returns deep copies of every header, in render order.
    pub fn clone_headers(&self) -> Vec<Header> {
        self.0.clone()
    }

    /// Returns the distinct header names, in render order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for hdr in self.0.iter() {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(hdr.name())) {
                names.push(hdr.name());
            }
        }
        names
    }

    /// Returns an iterator over headers.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.0.iter()
    }

    /// Returns an iterator over headers.
    #[inline]
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Header> {
        self.0.iter_mut()
    }

    /// Returns the number of headers in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the header collection contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<usize> for Headers {
    type Output = Header;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl FromIterator<Header> for Headers {
    fn from_iter<I: IntoIterator<Item = Header>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut headers = Headers::with_capacity(iter.size_hint().0);
        for hdr in iter {
            headers.push(hdr);
        }
        headers
    }
}

impl std::convert::From<Vec<Header>> for Headers {
    fn from(headers: Vec<Header>) -> Self {
        headers.into_iter().collect()
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hdr in self.iter() {
            write!(f, "{hdr}\r\n")?;
        }
        Ok(())
    }
}
