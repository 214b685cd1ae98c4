//! Parsers and utilities for **U**niform **R**esource **L**ocators ([URL]s).
//!
//! You can find the relevant specification [here](https://url.spec.whatwg.org/).
//!
//! The preferred way to obtain a [URL] is to parse it:
//! ```
//! let url: url::URL = "https://example.com/index.html".parse().unwrap();
//!
//! assert_eq!(url.scheme, "https");
//! assert_eq!(url.host.as_deref(), Some("example.com"));
//! assert_eq!(url.path, ["index.html"]);
//! ```
//!
//! [URL::parse] additionally surfaces the validation errors the input
//! triggered along the way:
//! ```
//! use url::{ValidationError, URL};
//!
//! let result = URL::parse("https://jdoe@example.com");
//!
//! assert_eq!(result.url.username, "jdoe");
//! assert_eq!(result.validation_errors, [ValidationError::InvalidCredentials]);
//! ```

pub mod codepoint;

mod host;
mod parser;
mod percent_encode;
mod scheme;
mod url;
mod util;
mod validation_error;

pub use crate::host::{parse_host, HostParseError};
pub use crate::parser::{ParseFailure, ParseResult, State};
pub use crate::percent_encode::{
    percent_decode, percent_encode_after_encoding, utf8_percent_encode, Encoding, PercentEncodeSet,
};
pub use crate::scheme::{
    default_port_for_scheme, is_special_scheme, special_scheme, SpecialScheme, SPECIAL_SCHEMES,
};
pub use crate::url::{ExcludeFragment, Port, URL};
pub use crate::validation_error::ValidationError;
