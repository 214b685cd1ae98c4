//! Host parsing
//!
//! [Specification](https://url.spec.whatwg.org/#host-parsing)
//!
//! Bracketed IPv6 literals, internationalized domains and IPv4 addresses
//! need parsers of their own which do not exist yet; anything that would
//! reach one of them fails with a dedicated [HostParseError] instead of
//! silently producing a wrong host.

// TODO: Implement an IPv6 parser so that bracketed hosts work.

use crate::{
    codepoint::{is_forbidden_domain_codepoint, is_forbidden_host_codepoint},
    percent_encode::{percent_decode, utf8_percent_encode, PercentEncodeSet},
};

/// Reasons why [parse_host] can fail
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostParseError {
    /// A bracketed host is missing its closing U+005D (])
    Ipv6Unclosed,

    /// The host contains a forbidden host or domain code point
    ForbiddenCodePoint,

    /// The host is a bracketed IPv6 literal, which cannot be parsed yet
    Ipv6Unsupported,

    /// The domain ends in a number and would have to be parsed as an
    /// IPv4 address, which cannot be parsed yet
    Ipv4Unsupported,

    /// The domain would have to go through domain-to-ASCII, which is not
    /// implemented
    DomainToAsciiUnsupported,
}

/// <https://url.spec.whatwg.org/#concept-host-parser>
///
/// On success the host is returned in its serialized form; an empty string
/// is a legitimate (empty) host and distinct from failure.
pub fn parse_host(input: &str, is_opaque: bool) -> Result<String, HostParseError> {
    // If input starts with U+005B ([), then:
    if input.starts_with('[') {
        // If input does not end with U+005D (]), IPv6-unclosed validation
        // error, return failure.
        if !input.ends_with(']') {
            return Err(HostParseError::Ipv6Unclosed);
        }

        // Return the result of IPv6 parsing input with its leading
        // U+005B ([) and trailing U+005D (]) removed.
        log::warn!("refusing to parse IPv6 host {input:?}: no IPv6 parser");
        return Err(HostParseError::Ipv6Unsupported);
    }

    // If isOpaque is true, then return the result of opaque-host parsing
    // input.
    if is_opaque {
        return parse_opaque_host(input);
    }

    // Assert: input is not the empty string.
    debug_assert!(!input.is_empty());

    // Let domain be the result of running UTF-8 decode without BOM on the
    // percent-decoding of input.
    let domain = String::from_utf8_lossy(&percent_decode(input)).into_owned();

    // Let asciiDomain be the result of running domain to ASCII with domain
    // and false. If asciiDomain is failure, then return failure.
    // For an all-ASCII domain without punycode labels this is just
    // lowercasing; everything else needs the missing IDNA machinery.
    if !domain.is_ascii() || domain.split('.').any(|label| label.starts_with("xn--")) {
        log::warn!("refusing to parse host {domain:?}: no domain-to-ASCII");
        return Err(HostParseError::DomainToAsciiUnsupported);
    }
    let ascii_domain = domain.to_ascii_lowercase();

    // If asciiDomain contains a forbidden domain code point, then return
    // failure.
    if ascii_domain.chars().any(is_forbidden_domain_codepoint) {
        return Err(HostParseError::ForbiddenCodePoint);
    }

    // If asciiDomain ends in a number, then return the result of IPv4
    // parsing asciiDomain.
    if ascii_domain
        .chars()
        .last()
        .is_some_and(|c| c.is_ascii_digit())
    {
        log::warn!("refusing to parse host {ascii_domain:?}: no IPv4 parser");
        return Err(HostParseError::Ipv4Unsupported);
    }

    // Return asciiDomain.
    Ok(ascii_domain)
}

/// <https://url.spec.whatwg.org/#concept-opaque-host-parser>
fn parse_opaque_host(input: &str) -> Result<String, HostParseError> {
    // If input contains a forbidden host code point, then return failure.
    if input.chars().any(is_forbidden_host_codepoint) {
        return Err(HostParseError::ForbiddenCodePoint);
    }

    // Return the result of running UTF-8 percent-encode on input using the
    // C0 control percent-encode set.
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        output.push_str(&utf8_percent_encode(c, PercentEncodeSet::C0Control));
    }
    Ok(output)
}
