//! The fixed registry of special schemes
//!
//! [Specification](https://url.spec.whatwg.org/#special-scheme)

use crate::url::Port;

/// A special scheme together with its default port
///
/// `file` is the only special scheme without a default port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpecialScheme {
    pub scheme: &'static str,
    pub default_port: Option<Port>,
}

/// <https://url.spec.whatwg.org/#special-scheme>
pub const SPECIAL_SCHEMES: [SpecialScheme; 6] = [
    SpecialScheme {
        scheme: "ftp",
        default_port: Some(21),
    },
    SpecialScheme {
        scheme: "file",
        default_port: None,
    },
    SpecialScheme {
        scheme: "http",
        default_port: Some(80),
    },
    SpecialScheme {
        scheme: "https",
        default_port: Some(443),
    },
    SpecialScheme {
        scheme: "ws",
        default_port: Some(80),
    },
    SpecialScheme {
        scheme: "wss",
        default_port: Some(443),
    },
];

/// <https://url.spec.whatwg.org/#is-special>
#[inline]
#[must_use]
pub fn is_special_scheme(scheme: &str) -> bool {
    matches!(scheme, "ftp" | "file" | "http" | "https" | "ws" | "wss")
}

#[must_use]
pub fn special_scheme(scheme: &str) -> Option<&'static SpecialScheme> {
    SPECIAL_SCHEMES
        .iter()
        .find(|special| special.scheme == scheme)
}

/// <https://url.spec.whatwg.org/#default-port>
#[must_use]
pub fn default_port_for_scheme(scheme: &str) -> Option<Port> {
    special_scheme(scheme).and_then(|special| special.default_port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ports() {
        assert_eq!(default_port_for_scheme("ftp"), Some(21));
        assert_eq!(default_port_for_scheme("file"), None);
        assert_eq!(default_port_for_scheme("http"), Some(80));
        assert_eq!(default_port_for_scheme("https"), Some(443));
        assert_eq!(default_port_for_scheme("ws"), Some(80));
        assert_eq!(default_port_for_scheme("wss"), Some(443));
        assert_eq!(default_port_for_scheme("gopher"), None);
    }

    #[test]
    fn membership() {
        assert!(is_special_scheme("file"));
        assert!(!is_special_scheme("data"));
        assert!(!is_special_scheme("HTTP"));

        for special in SPECIAL_SCHEMES {
            assert!(is_special_scheme(special.scheme));
        }
    }
}
