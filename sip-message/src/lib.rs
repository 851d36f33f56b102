//! # sip-message
//!
//! The SIP message data model: requests, responses, their headers, and the
//! RFC 3261 rules for deriving an `ACK` or a `CANCEL` from an existing
//! exchange.

pub mod fields;
pub mod headers;
pub mod log;
pub mod message;

pub(crate) mod error;
pub(crate) mod macros;

pub use error::{Error, Result};
pub use fields::{FieldValue, Fields};
pub use message::{
    Message, MessageId, Request, RequestBuilder, Response, SipMessage, copy_request, new_ack_request,
    new_cancel_request,
};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

use std::sync::Arc;

use rand::Rng;
use rand::distr::Alphanumeric;

/// Shared immutable string used across the message types.
pub type ArcStr = Arc<str>;

/// The SIP version this crate renders when none is given.
pub const SIPV2: &str = "SIP/2.0";

/// RFC 3261 magic cookie that starts every compliant branch.
pub const BRANCH_MAGIC_COOKIE: &str = "z9hG4bK";

const BRANCH_RANDOM_LEN: usize = 16;

/// Generates a new RFC 3261 branch token.
///
/// The token is the magic cookie followed by a random alphanumeric suffix, so
/// two calls (from any thread) produce distinct values with overwhelming
/// probability.
///
/// # Examples
///
/// ```
/// let branch = sip_message::generate_branch();
///
/// assert!(branch.starts_with(sip_message::BRANCH_MAGIC_COOKIE));
/// assert_ne!(branch, sip_message::generate_branch());
/// ```
pub fn generate_branch() -> ArcStr {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(BRANCH_RANDOM_LEN)
        .map(char::from)
        .collect();

    format!("{BRANCH_MAGIC_COOKIE}{suffix}").into()
}
