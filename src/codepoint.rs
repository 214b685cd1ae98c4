//! Code point classifications from the WHATWG Infra and URL standards.
//!
//! All predicates operate on [char], so the end-of-input sentinel used by the
//! parser ([None]) can never satisfy any of them by accident.

/// <https://infra.spec.whatwg.org/#c0-control>
#[inline]
#[must_use]
pub fn is_c0_control(c: char) -> bool {
    matches!(c, '\u{0000}'..='\u{001F}')
}

/// <https://infra.spec.whatwg.org/#c0-control-or-space>
#[inline]
#[must_use]
pub fn is_c0_control_or_space(c: char) -> bool {
    is_c0_control(c) || c == ' '
}

/// <https://infra.spec.whatwg.org/#ascii-tab-or-newline>
#[inline]
#[must_use]
pub fn is_ascii_tab_or_newline(c: char) -> bool {
    matches!(c, '\u{0009}' | '\u{000A}' | '\u{000D}')
}

/// <https://infra.spec.whatwg.org/#noncharacter>
#[must_use]
pub fn is_noncharacter(c: char) -> bool {
    matches!(
        c,
        '\u{FDD0}'..='\u{FDEF}'
            | '\u{FFFE}'
            | '\u{FFFF}'
            | '\u{1FFFE}'
            | '\u{1FFFF}'
            | '\u{2FFFE}'
            | '\u{2FFFF}'
            | '\u{3FFFE}'
            | '\u{3FFFF}'
            | '\u{4FFFE}'
            | '\u{4FFFF}'
            | '\u{5FFFE}'
            | '\u{5FFFF}'
            | '\u{6FFFE}'
            | '\u{6FFFF}'
            | '\u{7FFFE}'
            | '\u{7FFFF}'
            | '\u{8FFFE}'
            | '\u{8FFFF}'
            | '\u{9FFFE}'
            | '\u{9FFFF}'
            | '\u{AFFFE}'
            | '\u{AFFFF}'
            | '\u{BFFFE}'
            | '\u{BFFFF}'
            | '\u{CFFFE}'
            | '\u{CFFFF}'
            | '\u{DFFFE}'
            | '\u{DFFFF}'
            | '\u{EFFFE}'
            | '\u{EFFFF}'
            | '\u{FFFFE}'
            | '\u{FFFFF}'
            | '\u{10FFFE}'
            | '\u{10FFFF}'
    )
}

/// <https://url.spec.whatwg.org/#url-code-points>
#[must_use]
pub fn is_url_codepoint(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '$'
                | '&'
                | '\''
                | '('
                | ')'
                | '*'
                | '+'
                | ','
                | '-'
                | '.'
                | '/'
                | ':'
                | ';'
                | '='
                | '?'
                | '@'
                | '_'
                | '~'
        )
        // The range cannot contain surrogates, char excludes them by construction
        || (matches!(c, '\u{00A0}'..='\u{10FFFD}') && !is_noncharacter(c))
}

/// <https://url.spec.whatwg.org/#forbidden-host-code-point>
#[must_use]
pub fn is_forbidden_host_codepoint(c: char) -> bool {
    matches!(
        c,
        '\u{0000}'
            | '\u{0009}'
            | '\u{000A}'
            | '\u{000D}'
            | ' '
            | '#'
            | '/'
            | ':'
            | '<'
            | '>'
            | '?'
            | '@'
            | '['
            | '\\'
            | ']'
            | '^'
            | '|'
    )
}

/// <https://url.spec.whatwg.org/#forbidden-domain-code-point>
#[must_use]
pub fn is_forbidden_domain_codepoint(c: char) -> bool {
    is_forbidden_host_codepoint(c) || is_c0_control(c) || matches!(c, '%' | '\u{007F}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_codepoints() {
        assert!(is_url_codepoint('a'));
        assert!(is_url_codepoint('9'));
        assert!(is_url_codepoint('!'));
        assert!(is_url_codepoint('~'));
        assert!(is_url_codepoint('\u{00E9}'));

        assert!(!is_url_codepoint('%'));
        assert!(!is_url_codepoint('"'));
        assert!(!is_url_codepoint('`'));
        assert!(!is_url_codepoint(' '));
        assert!(!is_url_codepoint('\u{FFFF}'));
        assert!(!is_url_codepoint('\u{FDD0}'));
    }

    #[test]
    fn forbidden_host_codepoints() {
        for c in "\0\t\n\r #/:<>?@[\\]^|".chars() {
            assert!(is_forbidden_host_codepoint(c), "{c:?}");
        }

        assert!(!is_forbidden_host_codepoint('%'));
        assert!(!is_forbidden_host_codepoint('a'));

        // The domain set additionally forbids percent signs and controls
        assert!(is_forbidden_domain_codepoint('%'));
        assert!(is_forbidden_domain_codepoint('\u{007F}'));
        assert!(is_forbidden_domain_codepoint('\u{0001}'));
    }
}
