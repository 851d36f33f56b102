use std::fmt;

use itertools::Itertools;

use crate::headers::SipHeader;
use crate::message::Uri;

/// The `Route` SIP header.
///
/// Specify the sequence of proxy servers and other
/// intermediaries that a SIP message should pass through on
/// its way to the final destination. A single header line may carry
/// several addresses, kept in order.
///
/// # Examples
///
/// ```
/// # use sip_message::headers::Route;
/// let route = Route::new(vec![
///     "sip:p1.example.com;lr".parse().unwrap(),
///     "sip:p2.example.com;lr".parse().unwrap(),
/// ]);
///
/// assert_eq!(
///     "Route: <sip:p1.example.com;lr>, <sip:p2.example.com;lr>",
///     route.to_string()
/// );
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Route {
    /// The route addresses, in header order.
    pub addrs: Vec<Uri>,
}

impl Route {
    /// Creates a new `Route` header.
    pub fn new(addrs: Vec<Uri>) -> Self {
        Self { addrs }
    }

    /// Returns the first address of the header.
    pub fn first(&self) -> Option<&Uri> {
        self.addrs.first()
    }
}

impl SipHeader for Route {
    const NAME: &'static str = "Route";
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let addrs = self.addrs.iter().format_with(", ", |uri, f| f(&format_args!("<{uri}>")));

        write!(f, "{}: {}", Route::NAME, addrs)
    }
}
