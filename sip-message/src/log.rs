//! Prefixed, field scoped logger over [`tracing`].
//!
//! A [`Logger`] carries a prefix and a [`Fields`] mapping and attaches both to
//! every event it emits, so callers can thread message context (the
//! `request_id` of a request, for instance) through their logs.

use std::fmt;

use crate::ArcStr;
use crate::fields::Fields;
use crate::message::Message;

/// Default prefix of a new [`Logger`].
pub const DEFAULT_PREFIX: &str = "main";

/// A logger scoped by a prefix and a set of fields.
///
/// Scoping never mutates the receiver; [`Logger::with_prefix`] and
/// [`Logger::with_fields`] return new loggers.
///
/// # Examples
///
/// ```
/// use sip_message::Fields;
/// use sip_message::log::Logger;
///
/// let logger = Logger::default().with_prefix("transaction");
/// let scoped = logger.with_fields(&Fields::from([("branch", "z9hG4bK776asdhds")]));
///
/// scoped.debug("Timer A fired");
/// assert_eq!(scoped.prefix(), "transaction");
/// assert!(logger.fields().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    prefix: ArcStr,
    fields: Fields,
}

macro_rules! leveled {
    ($($(#[$doc:meta])* $name:ident => $macro:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&self, msg: impl fmt::Display) {
                tracing::$macro!(prefix = %self.prefix, fields = %self.fields, "{msg}");
            }
        )*
    };
}

impl Logger {
    /// Creates a new logger.
    pub fn new(prefix: &str, fields: Fields) -> Self {
        Self {
            prefix: prefix.into(),
            fields,
        }
    }

    /// Returns the logger prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the logger fields.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Returns a logger with the same fields and another prefix.
    pub fn with_prefix(&self, prefix: &str) -> Logger {
        Logger::new(prefix, self.fields.clone())
    }

    /// Returns a logger with `fields` merged over the current ones.
    pub fn with_fields(&self, fields: &Fields) -> Logger {
        Logger::new(&self.prefix, self.fields.with_fields(fields))
    }

    /// Returns a logger scoped to the metadata of `msg`.
    pub fn for_message<M: Message + ?Sized>(&self, msg: &M) -> Logger {
        self.with_fields(msg.fields())
    }

    leveled! {
        /// Emits a `TRACE` event.
        trace => trace;
        /// Emits a `DEBUG` event.
        debug => debug;
        /// Emits an `INFO` event.
        info => info;
        /// Emits a `WARN` event.
        warn => warn;
        /// Emits an `ERROR` event.
        error => error;
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new(DEFAULT_PREFIX, Fields::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequestBuilder;
    use crate::message::SipMethod;

    #[test]
    fn test_with_prefix_keeps_fields() {
        let logger = Logger::new("ua", Fields::from([("a", 1u32)]));
        let other = logger.with_prefix("transport");

        assert_eq!(other.prefix(), "transport");
        assert_eq!(other.fields(), logger.fields());
        assert_eq!(logger.prefix(), "ua");
    }

    #[test_log::test]
    fn test_for_message_carries_request_id() {
        let req = RequestBuilder::new(SipMethod::Options, "sip:bob@biloxi.com".parse().unwrap())
            .id("opt-1")
            .build();
        let logger = Logger::default().for_message(&req);

        logger.info(req.short());
        assert_eq!(logger.fields().get("request_id").and_then(|v| v.as_str()), Some("opt-1"));
    }
}
