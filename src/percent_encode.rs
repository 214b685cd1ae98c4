//! Percent-encoding machinery
//!
//! [Specification](https://url.spec.whatwg.org/#percent-encoded-bytes)

use crate::codepoint::is_c0_control;

/// The output encoding for queries
///
/// Only [UTF-8](Encoding::Utf8) is supported; legacy encodings are
/// normalized away before any query is serialized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
}

/// The named percent-encode sets
///
/// Each set includes everything from the previous one, in declaration order:
/// the C0 control set is the smallest, the application/x-www-form-urlencoded
/// set the largest.
///
/// [Specification](https://url.spec.whatwg.org/#percent-encoded-bytes)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PercentEncodeSet {
    /// <https://url.spec.whatwg.org/#c0-control-percent-encode-set>
    C0Control,

    /// <https://url.spec.whatwg.org/#fragment-percent-encode-set>
    Fragment,

    /// <https://url.spec.whatwg.org/#query-percent-encode-set>
    Query,

    /// <https://url.spec.whatwg.org/#special-query-percent-encode-set>
    SpecialQuery,

    /// <https://url.spec.whatwg.org/#path-percent-encode-set>
    Path,

    /// <https://url.spec.whatwg.org/#userinfo-percent-encode-set>
    Userinfo,

    /// <https://url.spec.whatwg.org/#component-percent-encode-set>
    Component,

    /// <https://url.spec.whatwg.org/#application-x-www-form-urlencoded-percent-encode-set>
    ApplicationXWWWFormUrlEncoded,
}

impl PercentEncodeSet {
    /// Whether code points in this set must be percent-encoded
    #[must_use]
    pub fn contains(self, c: char) -> bool {
        match self {
            // The C0 control percent-encode set are the C0 controls and all
            // code points greater than U+007E (~).
            Self::C0Control => is_c0_control(c) || c > '\u{007E}',
            // The fragment percent-encode set is the C0 control
            // percent-encode set and U+0020 SPACE, U+0022 ("), U+003C (<),
            // U+003E (>), and U+0060 (`).
            Self::Fragment => {
                Self::C0Control.contains(c) || matches!(c, ' ' | '"' | '<' | '>' | '`')
            },
            // The query percent-encode set is the C0 control percent-encode
            // set and U+0020 SPACE, U+0022 ("), U+0023 (#), U+003C (<), and
            // U+003E (>).
            Self::Query => {
                Self::C0Control.contains(c) || matches!(c, ' ' | '"' | '#' | '<' | '>')
            },
            // The special-query percent-encode set is the query
            // percent-encode set and U+0027 (').
            Self::SpecialQuery => Self::Query.contains(c) || c == '\'',
            // The path percent-encode set is the query percent-encode set
            // and U+003F (?), U+0060 (`), U+007B ({), and U+007D (}).
            Self::Path => Self::Query.contains(c) || matches!(c, '?' | '`' | '{' | '}'),
            // The userinfo percent-encode set is the path percent-encode set
            // and U+002F (/), U+003A (:), U+003B (;), U+003D (=), U+0040 (@),
            // U+005B ([) to U+005E (^), inclusive, and U+007C (|).
            Self::Userinfo => {
                Self::Path.contains(c)
                    || matches!(c, '/' | ':' | ';' | '=' | '@' | '['..='^' | '|')
            },
            // The component percent-encode set is the userinfo
            // percent-encode set and U+0024 ($) to U+0026 (&), inclusive,
            // U+002B (+), and U+002C (,).
            Self::Component => {
                Self::Userinfo.contains(c) || matches!(c, '$'..='&' | '+' | ',')
            },
            // The application/x-www-form-urlencoded percent-encode set is
            // the component percent-encode set and U+0021 (!), U+0027 (') to
            // U+0029 RIGHT PARENTHESIS, inclusive, and U+007E (~).
            Self::ApplicationXWWWFormUrlEncoded => {
                Self::Component.contains(c) || matches!(c, '!' | '\''..=')' | '~')
            },
        }
    }
}

/// UTF-8 percent-encode a single code point
///
/// Code points outside `set` pass through unchanged; everything else becomes
/// one `%XX` group per UTF-8 byte, with uppercase hex digits.
///
/// <https://url.spec.whatwg.org/#utf-8-percent-encode>
#[must_use]
pub fn utf8_percent_encode(c: char, set: PercentEncodeSet) -> String {
    if !set.contains(c) {
        return c.to_string();
    }

    let mut buffer = [0; 4];
    let bytes = c.encode_utf8(&mut buffer).as_bytes();

    let mut output = String::with_capacity(3 * bytes.len());
    for &byte in bytes {
        percent_encode_byte(byte, &mut output);
    }
    output
}

/// <https://url.spec.whatwg.org/#percent-encode>
fn percent_encode_byte(byte: u8, output: &mut String) {
    const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

    output.push('%');
    output.push(HEX_DIGITS[(byte >> 4) as usize] as char);
    output.push(HEX_DIGITS[(byte & 0x0F) as usize] as char);
}

/// <https://url.spec.whatwg.org/#string-percent-encode-after-encoding>
#[must_use]
pub fn percent_encode_after_encoding(
    encoding: Encoding,
    input: &str,
    set: PercentEncodeSet,
    space_as_plus: bool,
) -> String {
    // Let encoder be the result of getting an encoder from encoding.
    // Only the UTF-8 encoder exists, so encoding a code point cannot fail.
    match encoding {
        Encoding::Utf8 => {},
    }

    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        // If spaceAsPlus is true and codePoint is U+0020 SPACE, then append
        // U+002B (+) to output and continue.
        if space_as_plus && c == ' ' {
            output.push('+');
            continue;
        }

        if set.contains(c) {
            output.push_str(&utf8_percent_encode(c, set));
        } else {
            output.push(c);
        }
    }
    output
}

/// <https://url.spec.whatwg.org/#percent-decode>
///
/// A `%` that is not followed by two ASCII hex digits is copied through
/// verbatim. The output is a byte sequence, not necessarily valid UTF-8.
#[must_use]
pub fn percent_decode(input: &str) -> Vec<u8> {
    let decode = |first: u8, second: u8| {
        let value = (first as char).to_digit(16)? * 16 + (second as char).to_digit(16)?;
        Some(value as u8)
    };

    let bytes = input.as_bytes();
    let mut output = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        // If byte is not 0x25 (%), then append byte to output.
        if bytes[i] != b'%' {
            output.push(bytes[i]);
        } else if let Some(decoded) = bytes
            .get(i + 1)
            .zip(bytes.get(i + 2))
            .and_then(|(&first, &second)| decode(first, second))
        {
            output.push(decoded);
            i += 2;
        } else {
            output.push(b'%');
        }
        i += 1;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_single_bytes() {
        // Examples from
        // https://url.spec.whatwg.org/#example-percent-encode-operations
        let mut buffer = String::new();
        percent_encode_byte(0x23, &mut buffer);
        assert_eq!(buffer, "%23");

        buffer.clear();
        percent_encode_byte(0x7F, &mut buffer);
        assert_eq!(buffer, "%7F");
    }

    #[test]
    fn encode_multibyte_codepoint() {
        assert_eq!(
            utf8_percent_encode('\u{2764}', PercentEncodeSet::C0Control),
            "%E2%9D%A4"
        );
    }

    #[test]
    fn codepoint_outside_set_is_untouched() {
        assert_eq!(utf8_percent_encode('a', PercentEncodeSet::Userinfo), "a");
        assert_eq!(utf8_percent_encode(':', PercentEncodeSet::Userinfo), "%3A");
        assert_eq!(utf8_percent_encode(':', PercentEncodeSet::Query), ":");
    }

    #[test]
    fn sets_form_an_inclusion_chain() {
        // Fragment and SpecialQuery branch off the chain (` and ' do not
        // carry over into the path set), everything else nests.
        let chain = [
            PercentEncodeSet::C0Control,
            PercentEncodeSet::Query,
            PercentEncodeSet::Path,
            PercentEncodeSet::Userinfo,
            PercentEncodeSet::Component,
            PercentEncodeSet::ApplicationXWWWFormUrlEncoded,
        ];

        for window in chain.windows(2) {
            let (smaller, larger) = (window[0], window[1]);
            for c in (0..=0x7F_u8).map(char::from) {
                if smaller.contains(c) {
                    assert!(larger.contains(c), "{larger:?} should contain {c:?}");
                }
            }
        }

        for c in (0..=0x7F_u8).map(char::from) {
            if PercentEncodeSet::C0Control.contains(c) {
                assert!(PercentEncodeSet::Fragment.contains(c));
            }
            if PercentEncodeSet::Query.contains(c) {
                assert!(PercentEncodeSet::SpecialQuery.contains(c));
            }
        }
    }

    #[test]
    fn decode() {
        // Example from
        // https://url.spec.whatwg.org/#example-percent-encode-operations
        assert_eq!(percent_decode("%25%s%1G"), b"%%s%1G");
        assert_eq!(percent_decode("a%62c"), b"abc");
        assert_eq!(percent_decode("%"), b"%");
        assert_eq!(percent_decode("%4"), b"%4");
    }

    #[test]
    fn space_as_plus() {
        assert_eq!(
            percent_encode_after_encoding(
                Encoding::Utf8,
                "a b",
                PercentEncodeSet::ApplicationXWWWFormUrlEncoded,
                true
            ),
            "a+b"
        );
        assert_eq!(
            percent_encode_after_encoding(Encoding::Utf8, "a b", PercentEncodeSet::Query, false),
            "a%20b"
        );
    }
}
