use std::fmt;

use crate::error::{Error, Result};

/// Classifies SIP status codes into categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeClass {
    /// Provisional responses (1xx)
    Provisional,
    /// Successful responses (2xx)
    Success,
    /// Redirection responses (3xx)
    Redirection,
    /// Client failure responses (4xx)
    ClientError,
    /// Server failure responses (5xx)
    ServerError,
    /// Global failure responses (6xx)
    GlobalFailure,
}

/// A SIP response status code, always within `100..=699`.
///
/// # Examples
///
/// ```
/// # use sip_message::message::{StatusCode, CodeClass};
/// let code = StatusCode::try_from(486).unwrap();
///
/// assert_eq!(code.reason(), "Busy Here");
/// assert_eq!(code.class(), CodeClass::ClientError);
/// assert!(StatusCode::try_from(99).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatusCode(u16);

macro_rules! status_codes {
    ($($name:ident = $code:literal, $reason:literal;)*) => {
        impl StatusCode {
            $(
                #[doc = concat!("`", stringify!($code), " ", $reason, "`")]
                pub const $name: StatusCode = StatusCode($code);
            )*

            /// Returns the canonical reason phrase of the code.
            ///
            /// Codes without a registered phrase fall back to the generic
            /// phrase of their class.
            pub fn reason(&self) -> &'static str {
                match self.0 {
                    $( $code => $reason, )*
                    _ => match self.class() {
                        CodeClass::Provisional => "Provisional",
                        CodeClass::Success => "Success",
                        CodeClass::Redirection => "Redirection",
                        CodeClass::ClientError => "Client Error",
                        CodeClass::ServerError => "Server Error",
                        CodeClass::GlobalFailure => "Global Failure",
                    },
                }
            }
        }
    };
}

status_codes! {
    TRYING = 100, "Trying";
    RINGING = 180, "Ringing";
    CALL_IS_BEING_FORWARDED = 181, "Call Is Being Forwarded";
    QUEUED = 182, "Queued";
    SESSION_PROGRESS = 183, "Session Progress";
    OK = 200, "OK";
    ACCEPTED = 202, "Accepted";
    MULTIPLE_CHOICES = 300, "Multiple Choices";
    MOVED_PERMANENTLY = 301, "Moved Permanently";
    MOVED_TEMPORARILY = 302, "Moved Temporarily";
    USE_PROXY = 305, "Use Proxy";
    BAD_REQUEST = 400, "Bad Request";
    UNAUTHORIZED = 401, "Unauthorized";
    FORBIDDEN = 403, "Forbidden";
    NOT_FOUND = 404, "Not Found";
    METHOD_NOT_ALLOWED = 405, "Method Not Allowed";
    PROXY_AUTHENTICATION_REQUIRED = 407, "Proxy Authentication Required";
    REQUEST_TIMEOUT = 408, "Request Timeout";
    UNSUPPORTED_URI_SCHEME = 416, "Unsupported URI Scheme";
    TEMPORARILY_UNAVAILABLE = 480, "Temporarily Unavailable";
    CALL_OR_TRANSACTION_DOES_NOT_EXIST = 481, "Call/Transaction Does Not Exist";
    LOOP_DETECTED = 482, "Loop Detected";
    TOO_MANY_HOPS = 483, "Too Many Hops";
    BUSY_HERE = 486, "Busy Here";
    REQUEST_TERMINATED = 487, "Request Terminated";
    NOT_ACCEPTABLE_HERE = 488, "Not Acceptable Here";
    SERVER_INTERNAL_ERROR = 500, "Server Internal Error";
    NOT_IMPLEMENTED = 501, "Not Implemented";
    BAD_GATEWAY = 502, "Bad Gateway";
    SERVICE_UNAVAILABLE = 503, "Service Unavailable";
    SERVER_TIMEOUT = 504, "Server Time-out";
    VERSION_NOT_SUPPORTED = 505, "Version Not Supported";
    BUSY_EVERYWHERE = 600, "Busy Everywhere";
    DECLINE = 603, "Decline";
    DOES_NOT_EXIST_ANYWHERE = 604, "Does Not Exist Anywhere";
    NOT_ACCEPTABLE_ANYWHERE = 606, "Not Acceptable";
}

impl StatusCode {
    /// Returns the numeric value of the code.
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the class of the code.
    pub const fn class(&self) -> CodeClass {
        match self.0 {
            100..=199 => CodeClass::Provisional,
            200..=299 => CodeClass::Success,
            300..=399 => CodeClass::Redirection,
            400..=499 => CodeClass::ClientError,
            500..=599 => CodeClass::ServerError,
            _ => CodeClass::GlobalFailure,
        }
    }

    /// Returns `true` for 1xx codes.
    pub const fn is_provisional(&self) -> bool {
        matches!(self.class(), CodeClass::Provisional)
    }

    /// Returns `true` for 2xx codes.
    pub const fn is_success(&self) -> bool {
        matches!(self.class(), CodeClass::Success)
    }

    /// Returns `true` for 3xx codes.
    pub const fn is_redirection(&self) -> bool {
        matches!(self.class(), CodeClass::Redirection)
    }

    /// Returns `true` for 4xx codes.
    pub const fn is_client_error(&self) -> bool {
        matches!(self.class(), CodeClass::ClientError)
    }

    /// Returns `true` for 5xx codes.
    pub const fn is_server_error(&self) -> bool {
        matches!(self.class(), CodeClass::ServerError)
    }

    /// Returns `true` for 6xx codes.
    pub const fn is_global_error(&self) -> bool {
        matches!(self.class(), CodeClass::GlobalFailure)
    }

    /// Returns `true` for any final (non 1xx) code.
    pub const fn is_final(&self) -> bool {
        !self.is_provisional()
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = Error;

    fn try_from(code: u16) -> Result<Self> {
        match code {
            100..=699 => Ok(StatusCode(code)),
            _ => Err(Error::InvalidStatusCode(code)),
        }
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
