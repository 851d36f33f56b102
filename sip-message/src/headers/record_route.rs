use std::fmt;

use itertools::Itertools;

use crate::headers::{Route, SipHeader};
use crate::message::Uri;

/// The `Record-Route` SIP header.
///
/// Keeps proxies in the signaling path for consistent
/// routing and session control.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RecordRoute {
    /// The record route addresses, in header order.
    pub addrs: Vec<Uri>,
}

impl RecordRoute {
    /// Creates a new `Record-Route` header.
    pub fn new(addrs: Vec<Uri>) -> Self {
        Self { addrs }
    }

    /// Builds the `Route` a UAC uses for this entry: the same addresses in
    /// reverse order, each one cloned.
    pub fn reversed_route(&self) -> Route {
        Route::new(self.addrs.iter().rev().cloned().collect())
    }
}

impl SipHeader for RecordRoute {
    const NAME: &'static str = "Record-Route";
}

impl fmt::Display for RecordRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let addrs = self.addrs.iter().format_with(", ", |uri, f| f(&format_args!("<{uri}>")));

        write!(f, "{}: {}", RecordRoute::NAME, addrs)
    }
}
