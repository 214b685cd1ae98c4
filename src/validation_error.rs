//! Non-fatal errors recorded while parsing a URL

/// Validation errors observed during URL parsing
///
/// These do not stop the parser; they are accumulated on the
/// [ParseResult](crate::ParseResult) in the order they were first seen.
///
/// [Specification](https://url.spec.whatwg.org/#validation-error)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Domain-to-ASCII processing failed
    DomainToAscii,

    /// The input's host contains a forbidden domain code point
    DomainInvalidCodepoint,

    /// Domain-to-Unicode processing failed
    DomainToUnicode,

    /// An opaque host contains a forbidden host code point
    ///
    /// ## Example
    /// `"foo://exa[mple.org"`
    HostInvalidCodepoint,

    /// A code point is found that is not a URL unit
    ///
    /// ## Examples
    /// * `"https://example.org/>"`
    /// * `" https://example.org "`
    /// * `"https://example.org/%s"`
    InvalidURLUnit,

    /// The input's scheme is not followed by "//"
    ///
    /// ## Examples
    /// * `"file:c:/my-secret-folder"`
    /// * `"https:example.org"`
    SpecialSchemeMissingFollowingSolidus,

    /// The input is missing a scheme, because it does not begin with an
    /// ASCII alpha, and either no base URL was provided or the base URL
    /// cannot be used because it has an opaque path
    MissingSchemeNonRelativeURL,

    /// The URL has a special scheme and it uses `\` instead of `/`
    InvalidReverseSolidus,

    /// The input includes credentials
    ///
    /// ## Examples
    /// * `"https://user@example.org"`
    /// * `"https://user:pass@"`
    InvalidCredentials,

    /// The input has a special scheme, but does not contain a host
    ///
    /// ## Examples
    /// * `"https://#fragment"`
    /// * `"https://:443"`
    HostMissing,

    /// The input's port is too big
    ///
    /// ## Example
    /// `"https://example.org:70000"`
    PortOutOfRange,

    /// The input's port is invalid
    ///
    /// ## Example
    /// `"https://example.org:7z"`
    PortInvalid,

    /// The input is a relative-URL string that starts with a Windows drive
    /// letter and the base URL's scheme is "file"
    FileInvalidWindowsDriveLetter,

    /// A file: URL's host is a Windows drive letter
    ///
    /// ## Example
    /// `"file://c:"`
    FileInvalidWindowsDriveLetterHost,
}
