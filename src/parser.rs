//! The basic URL parser state machine
//!
//! [Specification](https://url.spec.whatwg.org/#concept-basic-url-parser)

use crate::{
    codepoint::is_url_codepoint,
    host::{parse_host, HostParseError},
    percent_encode::{
        percent_encode_after_encoding, utf8_percent_encode, Encoding, PercentEncodeSet,
    },
    scheme::is_special_scheme,
    url::{Port, URL},
    util,
    validation_error::ValidationError,
};

/// One state of the basic URL parser state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    SchemeStart,
    Scheme,
    NoScheme,
    SpecialRelativeOrAuthority,
    PathOrAuthority,
    Relative,
    RelativeSlash,
    SpecialAuthoritySlashes,
    SpecialAuthorityIgnoreSlashes,
    Authority,
    Host,
    Hostname,
    Port,
    File,
    FileSlash,
    FileHost,
    PathStart,
    Path,
    OpaquePath,
    Query,
    Fragment,
}

/// A structural parse failure
///
/// Unlike a [ValidationError], reaching one of these aborts the parse.
/// The [ParseResult] still carries the URL as far as it was built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseFailure {
    /// The input exceeds the maximum length this parser accepts
    TooLong,

    /// A state override was given but the input is not a valid scheme
    InvalidScheme,

    /// The input has no scheme and no usable base URL
    MissingScheme,

    /// An authority demands a host but none is present
    HostMissing,

    /// A port contains something other than ASCII digits
    PortInvalid,

    /// A port does not fit into 16 bits
    PortOutOfRange,

    /// Host parsing failed
    HostParse(HostParseError),
}

impl From<HostParseError> for ParseFailure {
    fn from(value: HostParseError) -> Self {
        Self::HostParse(value)
    }
}

/// The outcome of a run of the basic URL parser
///
/// Carries the URL as far as it was built, the validation errors recorded
/// along the way and, if the parse aborted, the failure that stopped it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub url: URL,

    /// Recorded validation errors, in first-occurrence order, without
    /// duplicates
    pub validation_errors: Vec<ValidationError>,

    pub failure: Option<ParseFailure>,
}

impl ParseResult {
    /// Record a validation error
    ///
    /// Recording a kind that is already present is a no-op.
    pub fn record(&mut self, error: ValidationError) {
        if !self.validation_errors.contains(&error) {
            self.validation_errors.push(error);
        }
    }

    #[inline]
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }

    /// A parse that neither failed nor recorded any validation error
    #[must_use]
    pub fn is_clean(&self) -> bool {
        !self.is_failure() && self.validation_errors.is_empty()
    }
}

/// Decision of a state handler on how the dispatch loop continues
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Control {
    Continue,

    /// Terminate the whole parse successfully (state-override early exits)
    Return,
}

type StepResult = Result<Control, ParseFailure>;

/// Per-parse state: cursor, buffer, flags and the URL being built
///
/// One instance exists per call to the basic URL parser; nothing is shared
/// between parses.
pub(crate) struct Parser<'a> {
    input: &'a [char],

    /// Code point index of the current code point
    ///
    /// `-1` makes the next advance restart the scan from the first code
    /// point; any value at or beyond the input length reads as the EOF
    /// code point.
    pointer: isize,

    /// A temporary buffer used during parsing
    ///
    /// Notably, unlike everything in a URL, this can contain unicode data.
    buffer: String,

    state: State,
    state_override: Option<State>,
    base: Option<&'a URL>,
    encoding: Encoding,

    at_sign_seen: bool,
    inside_brackets: bool,
    password_token_seen: bool,

    result: ParseResult,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(
        input: &'a [char],
        base: Option<&'a URL>,
        encoding: Encoding,
        state_override: Option<State>,
        result: ParseResult,
    ) -> Self {
        Self {
            input,
            pointer: 0,
            buffer: String::new(),
            // Let state be state override if given, or scheme start state
            // otherwise.
            state: state_override.unwrap_or(State::SchemeStart),
            state_override,
            base,
            encoding,
            // Let atSignSeen, insideBrackets, and passwordTokenSeen be
            // false.
            at_sign_seen: false,
            inside_brackets: false,
            password_token_seen: false,
            result,
        }
    }

    pub(crate) fn into_result(self) -> ParseResult {
        self.result
    }

    /// Drive the state machine until the input is exhausted or a handler
    /// terminates the parse
    pub(crate) fn run(&mut self) -> Result<(), ParseFailure> {
        loop {
            // Keep running the following state machine by switching on
            // state.
            if self.step()? == Control::Return {
                return Ok(());
            }

            // If after a run pointer points to the EOF code point, go to
            // the next step. Otherwise, increase pointer by 1 and continue
            // with the state machine.
            if self.is_eof() {
                return Ok(());
            }
            self.pointer += 1;
        }
    }

    fn step(&mut self) -> StepResult {
        match self.state {
            State::SchemeStart => self.scheme_start_state(),
            State::Scheme => self.scheme_state(),
            State::NoScheme => self.no_scheme_state(),
            State::SpecialRelativeOrAuthority => self.special_relative_or_authority_state(),
            State::PathOrAuthority => self.path_or_authority_state(),
            State::Relative => self.relative_state(),
            State::RelativeSlash => self.relative_slash_state(),
            State::SpecialAuthoritySlashes => self.special_authority_slashes_state(),
            State::SpecialAuthorityIgnoreSlashes => self.special_authority_ignore_slashes_state(),
            State::Authority => self.authority_state(),
            State::Host | State::Hostname => self.host_state(),
            State::Port => self.port_state(),
            State::File => self.file_state(),
            State::FileSlash => self.file_slash_state(),
            State::FileHost => self.file_host_state(),
            State::PathStart => self.path_start_state(),
            State::Path => self.path_state(),
            State::OpaquePath => self.opaque_path_state(),
            State::Query => self.query_state(),
            State::Fragment => self.fragment_state(),
        }
    }

    /// The code point the pointer points to, or [None] at the end of input
    fn c(&self) -> Option<char> {
        usize::try_from(self.pointer)
            .ok()
            .and_then(|index| self.input.get(index))
            .copied()
    }

    fn is_eof(&self) -> bool {
        self.pointer >= self.input.len() as isize
    }

    /// The code points after the current one
    fn remaining(&self) -> &'a [char] {
        let after = (self.pointer + 1).clamp(0, self.input.len() as isize) as usize;
        &self.input[after..]
    }

    /// The code points from the current one to the end of input
    fn from_pointer(&self) -> &'a [char] {
        let from = self.pointer.clamp(0, self.input.len() as isize) as usize;
        &self.input[from..]
    }

    fn go_back(&mut self) {
        self.pointer -= 1;
    }

    fn record(&mut self, error: ValidationError) {
        self.result.record(error);
    }

    /// The invalid-URL-unit checks shared by the path, opaque path, query
    /// and fragment states
    fn check_url_codepoint(&mut self) {
        let Some(c) = self.c() else { return };

        // If c is not a URL code point and not U+0025 (%), invalid-URL-unit
        // validation error.
        if !is_url_codepoint(c) && c != '%' {
            self.record(ValidationError::InvalidURLUnit);
        }

        // If c is U+0025 (%) and remaining does not start with two ASCII
        // hex digits, invalid-URL-unit validation error.
        let remaining = self.remaining();
        let two_hex_digits = remaining.len() >= 2
            && remaining[0].is_ascii_hexdigit()
            && remaining[1].is_ascii_hexdigit();
        if c == '%' && !two_hex_digits {
            self.record(ValidationError::InvalidURLUnit);
        }
    }

    /// <https://url.spec.whatwg.org/#scheme-start-state>
    fn scheme_start_state(&mut self) -> StepResult {
        match self.c() {
            // If c is an ASCII alpha, append c, lowercased, to buffer, and
            // set state to scheme state.
            Some(c) if c.is_ascii_alphabetic() => {
                self.buffer.push(c.to_ascii_lowercase());
                self.state = State::Scheme;
            },
            // Otherwise, if state override is not given, set state to no
            // scheme state and decrease pointer by 1.
            _ if self.state_override.is_none() => {
                self.state = State::NoScheme;
                self.go_back();
            },
            // Otherwise, return failure.
            _ => return Err(ParseFailure::InvalidScheme),
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#scheme-state>
    fn scheme_state(&mut self) -> StepResult {
        match self.c() {
            // If c is an ASCII alphanumeric, U+002B (+), U+002D (-), or
            // U+002E (.), append c, lowercased, to buffer.
            Some(c) if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => {
                self.buffer.push(c.to_ascii_lowercase());
                Ok(Control::Continue)
            },
            // Otherwise, if c is U+003A (:), then:
            Some(':') => self.commit_scheme(),
            // Otherwise, if state override is not given, set buffer to the
            // empty string, state to no scheme state, and start over (from
            // the first code point in input).
            _ if self.state_override.is_none() => {
                self.buffer.clear();
                self.state = State::NoScheme;
                self.pointer = -1;
                Ok(Control::Continue)
            },
            // Otherwise, return failure.
            _ => Err(ParseFailure::InvalidScheme),
        }
    }

    /// The U+003A (:) branch of the [scheme state](Parser::scheme_state)
    fn commit_scheme(&mut self) -> StepResult {
        // If state override is given, then:
        if self.state_override.is_some() {
            let url = &self.result.url;

            // If url's scheme is a special scheme and buffer is not a
            // special scheme, then return.
            // If url's scheme is not a special scheme and buffer is a
            // special scheme, then return.
            if url.is_special() != is_special_scheme(&self.buffer) {
                return Ok(Control::Return);
            }

            // If url includes credentials or has a non-null port, and
            // buffer is "file", then return.
            if (url.includes_credentials() || url.has_port()) && self.buffer == "file" {
                return Ok(Control::Return);
            }

            // If url's scheme is "file" and its host is an empty host,
            // then return.
            if url.has_file_scheme() && url.has_empty_host() {
                return Ok(Control::Return);
            }
        }

        // Set url's scheme to buffer.
        // Set buffer to the empty string.
        self.result.url.scheme = std::mem::take(&mut self.buffer);

        // If state override is given, then:
        if self.state_override.is_some() {
            // If url's port is url's scheme's default port, then set url's
            // port to null.
            if self.result.url.port == self.result.url.default_port() {
                self.result.url.port = None;
            }

            // Return.
            return Ok(Control::Return);
        }

        // If url's scheme is "file", then:
        if self.result.url.has_file_scheme() {
            // If remaining does not start with "//",
            // special-scheme-missing-following-solidus validation error.
            if !util::starts_with(self.remaining(), "//") {
                self.record(ValidationError::SpecialSchemeMissingFollowingSolidus);
            }

            // Set state to file state.
            self.state = State::File;
        }
        // Otherwise, if url is special, base is non-null, and base's
        // scheme is url's scheme:
        else if self.result.url.is_special()
            && self
                .base
                .is_some_and(|base| base.scheme == self.result.url.scheme)
        {
            // Assert: base is special (and therefore does not have an
            // opaque path).
            debug_assert!(self.base.is_some_and(URL::is_special));

            // Set state to special relative or authority state.
            self.state = State::SpecialRelativeOrAuthority;
        }
        // Otherwise, if url is special, set state to special authority
        // slashes state.
        else if self.result.url.is_special() {
            self.state = State::SpecialAuthoritySlashes;
        }
        // Otherwise, if remaining starts with an U+002F (/), set state to
        // path or authority state and increase pointer by 1.
        else if util::starts_with(self.remaining(), "/") {
            self.state = State::PathOrAuthority;
            self.pointer += 1;
        }
        // Otherwise, set url's path to the empty string and set state to
        // opaque path state.
        else {
            self.result.url.path = vec![String::new()];
            self.state = State::OpaquePath;
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#no-scheme-state>
    fn no_scheme_state(&mut self) -> StepResult {
        // If base is null, or base has an opaque path and c is not
        // U+0023 (#), missing-scheme-non-relative-URL validation error,
        // return failure.
        let base = match self.base {
            Some(base) if !(base.has_opaque_path() && self.c() != Some('#')) => base,
            _ => {
                self.record(ValidationError::MissingSchemeNonRelativeURL);
                return Err(ParseFailure::MissingScheme);
            },
        };

        // Otherwise, if base has an opaque path and c is U+0023 (#), set
        // url's scheme to base's scheme, url's path to base's path, url's
        // query to base's query, url's fragment to the empty string, and
        // set state to fragment state.
        if base.has_opaque_path() && self.c() == Some('#') {
            self.result.url.scheme = base.scheme.clone();
            self.result.url.path = base.path.clone();
            self.result.url.query = base.query.clone();
            self.result.url.fragment = Some(String::new());
            self.state = State::Fragment;
        }
        // Otherwise, if base's scheme is not "file", set state to relative
        // state and decrease pointer by 1.
        else if !base.has_file_scheme() {
            self.state = State::Relative;
            self.go_back();
        }
        // Otherwise, set state to file state and decrease pointer by 1.
        else {
            self.state = State::File;
            self.go_back();
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#special-relative-or-authority-state>
    fn special_relative_or_authority_state(&mut self) -> StepResult {
        // If c is U+002F (/) and remaining starts with U+002F (/), then
        // set state to special authority ignore slashes state and increase
        // pointer by 1.
        if self.c() == Some('/') && util::starts_with(self.remaining(), "/") {
            self.state = State::SpecialAuthorityIgnoreSlashes;
            self.pointer += 1;
        }
        // Otherwise, special-scheme-missing-following-solidus validation
        // error, set state to relative state and decrease pointer by 1.
        else {
            self.record(ValidationError::SpecialSchemeMissingFollowingSolidus);
            self.state = State::Relative;
            self.go_back();
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#path-or-authority-state>
    fn path_or_authority_state(&mut self) -> StepResult {
        // If c is U+002F (/), then set state to authority state.
        if self.c() == Some('/') {
            self.state = State::Authority;
        }
        // Otherwise, set state to path state, and decrease pointer by 1.
        else {
            self.state = State::Path;
            self.go_back();
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#relative-state>
    fn relative_state(&mut self) -> StepResult {
        // Assert: base's scheme is not "file".
        let base = self.base.expect("relative state requires a base url");
        debug_assert!(!base.has_file_scheme());

        // Set url's scheme to base's scheme.
        self.result.url.scheme = base.scheme.clone();

        let c = self.c();

        // If c is U+002F (/), then set state to relative slash state.
        if c == Some('/') {
            self.state = State::RelativeSlash;
        }
        // Otherwise, if url is special and c is U+005C (\),
        // invalid-reverse-solidus validation error, set state to relative
        // slash state.
        else if self.result.url.is_special() && c == Some('\\') {
            self.record(ValidationError::InvalidReverseSolidus);
            self.state = State::RelativeSlash;
        }
        // Otherwise:
        else {
            // Set url's username to base's username, url's password to
            // base's password, url's host to base's host, url's port to
            // base's port, url's path to a clone of base's path, and url's
            // query to base's query.
            self.result.url.username = base.username.clone();
            self.result.url.password = base.password.clone();
            self.result.url.host = base.host.clone();
            self.result.url.port = base.port;
            self.result.url.path = base.path.clone();
            self.result.url.query = base.query.clone();

            // If c is U+003F (?), then set url's query to the empty
            // string, and state to query state.
            if c == Some('?') {
                self.result.url.query = Some(String::new());
                self.state = State::Query;
            }
            // Otherwise, if c is U+0023 (#), set url's fragment to the
            // empty string and state to fragment state.
            else if c == Some('#') {
                self.result.url.fragment = Some(String::new());
                self.state = State::Fragment;
            }
            // Otherwise, if c is not the EOF code point:
            else if c.is_some() {
                // Set url's query to null.
                self.result.url.query = None;

                // Shorten url's path.
                util::shorten_url_path(&mut self.result.url);

                // Set state to path state and decrease pointer by 1.
                self.state = State::Path;
                self.go_back();
            }
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#relative-slash-state>
    fn relative_slash_state(&mut self) -> StepResult {
        let c = self.c();

        // If url is special and c is U+002F (/) or U+005C (\), then:
        if self.result.url.is_special() && matches!(c, Some('/' | '\\')) {
            // If c is U+005C (\), invalid-reverse-solidus validation error.
            if c == Some('\\') {
                self.record(ValidationError::InvalidReverseSolidus);
            }

            // Set state to special authority ignore slashes state.
            self.state = State::SpecialAuthorityIgnoreSlashes;
        }
        // Otherwise, if c is U+002F (/), then set state to authority state.
        else if c == Some('/') {
            self.state = State::Authority;
        }
        // Otherwise, set url's username to base's username, url's password
        // to base's password, url's host to base's host, url's port to
        // base's port, state to path state, and then, decrease pointer
        // by 1.
        else {
            let base = self.base.expect("relative slash state requires a base url");
            self.result.url.username = base.username.clone();
            self.result.url.password = base.password.clone();
            self.result.url.host = base.host.clone();
            self.result.url.port = base.port;
            self.state = State::Path;
            self.go_back();
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#special-authority-slashes-state>
    fn special_authority_slashes_state(&mut self) -> StepResult {
        // If c is U+002F (/) and remaining starts with U+002F (/), then
        // set state to special authority ignore slashes state and increase
        // pointer by 1.
        if self.c() == Some('/') && util::starts_with(self.remaining(), "/") {
            self.state = State::SpecialAuthorityIgnoreSlashes;
            self.pointer += 1;
        }
        // Otherwise, special-scheme-missing-following-solidus validation
        // error, set state to special authority ignore slashes state and
        // decrease pointer by 1.
        else {
            self.record(ValidationError::SpecialSchemeMissingFollowingSolidus);
            self.state = State::SpecialAuthorityIgnoreSlashes;
            self.go_back();
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#special-authority-ignore-slashes-state>
    fn special_authority_ignore_slashes_state(&mut self) -> StepResult {
        // If c is neither U+002F (/) nor U+005C (\), then set state to
        // authority state and decrease pointer by 1.
        if !matches!(self.c(), Some('/' | '\\')) {
            self.state = State::Authority;
            self.go_back();
        }
        // Otherwise, special-scheme-missing-following-solidus validation
        // error.
        else {
            self.record(ValidationError::SpecialSchemeMissingFollowingSolidus);
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#authority-state>
    fn authority_state(&mut self) -> StepResult {
        let c = self.c();

        // If c is U+0040 (@), then:
        if c == Some('@') {
            // Invalid-credentials validation error.
            self.record(ValidationError::InvalidCredentials);

            // If atSignSeen is true, then prepend "%40" to buffer.
            if self.at_sign_seen {
                self.buffer.insert_str(0, "%40");
            }

            // Set atSignSeen to true.
            self.at_sign_seen = true;

            // For each codePoint in buffer:
            // (this also resets buffer to the empty string)
            let buffer = std::mem::take(&mut self.buffer);
            for code_point in buffer.chars() {
                // If codePoint is U+003A (:) and passwordTokenSeen is
                // false, then set passwordTokenSeen to true and continue.
                if code_point == ':' && !self.password_token_seen {
                    self.password_token_seen = true;
                    continue;
                }

                // Let encodedCodePoints be the result of running UTF-8
                // percent-encode codePoint using the userinfo
                // percent-encode set.
                let encoded = utf8_percent_encode(code_point, PercentEncodeSet::Userinfo);

                // If passwordTokenSeen is true, then append
                // encodedCodePoints to url's password. Otherwise, append
                // encodedCodePoints to url's username.
                if self.password_token_seen {
                    self.result.url.password.push_str(&encoded);
                } else {
                    self.result.url.username.push_str(&encoded);
                }
            }
        }
        // Otherwise, if one of the following is true:
        // * c is the EOF code point, U+002F (/), U+003F (?), or U+0023 (#)
        // * url is special and c is U+005C (\)
        else if matches!(c, None | Some('/' | '?' | '#'))
            || (self.result.url.is_special() && c == Some('\\'))
        {
            // If atSignSeen is true and buffer is the empty string,
            // host-missing validation error, return failure.
            if self.at_sign_seen && self.buffer.is_empty() {
                self.record(ValidationError::HostMissing);
                return Err(ParseFailure::HostMissing);
            }

            // Decrease pointer by buffer's code point length + 1, set
            // buffer to the empty string, and set state to host state.
            self.pointer -= self.buffer.chars().count() as isize + 1;
            self.buffer.clear();
            self.state = State::Host;
        }
        // Otherwise, append c to buffer.
        else {
            self.buffer
                .push(c.expect("eof is handled by the previous branch"));
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#host-state>
    /// <https://url.spec.whatwg.org/#hostname-state>
    fn host_state(&mut self) -> StepResult {
        let c = self.c();

        // If state override is given and url's scheme is "file", then
        // decrease pointer by 1 and set state to file host state.
        if self.state_override.is_some() && self.result.url.has_file_scheme() {
            self.go_back();
            self.state = State::FileHost;
        }
        // Otherwise, if c is U+003A (:) and insideBrackets is false, then:
        else if c == Some(':') && !self.inside_brackets {
            // If buffer is the empty string, host-missing validation
            // error, return failure.
            if self.buffer.is_empty() {
                self.record(ValidationError::HostMissing);
                return Err(ParseFailure::HostMissing);
            }

            // If state override is given and state override is hostname
            // state, then return.
            if self.state_override == Some(State::Hostname) {
                return Ok(Control::Return);
            }

            // Let host be the result of host parsing buffer with url is
            // not special. If host is failure, then return failure.
            let host = parse_host(&self.buffer, !self.result.url.is_special())?;

            // Set url's host to host, buffer to the empty string, and
            // state to port state.
            self.result.url.host = Some(host);
            self.buffer.clear();
            self.state = State::Port;
        }
        // Otherwise, if one of the following is true:
        // * c is the EOF code point, U+002F (/), U+003F (?), or U+0023 (#)
        // * url is special and c is U+005C (\)
        else if matches!(c, None | Some('/' | '?' | '#'))
            || (self.result.url.is_special() && c == Some('\\'))
        {
            // Then decrease pointer by 1, and then:
            self.go_back();

            // If url is special and buffer is the empty string,
            // host-missing validation error, return failure.
            if self.result.url.is_special() && self.buffer.is_empty() {
                self.record(ValidationError::HostMissing);
                return Err(ParseFailure::HostMissing);
            }

            // Otherwise, if state override is given, buffer is the empty
            // string, and either url includes credentials or url's port is
            // non-null, return.
            if self.state_override.is_some()
                && self.buffer.is_empty()
                && (self.result.url.includes_credentials() || self.result.url.has_port())
            {
                return Ok(Control::Return);
            }

            // Let host be the result of host parsing buffer with url is
            // not special. If host is failure, then return failure.
            let host = parse_host(&self.buffer, !self.result.url.is_special())?;

            // Set url's host to host, buffer to the empty string, and
            // state to path start state.
            self.result.url.host = Some(host);
            self.buffer.clear();
            self.state = State::PathStart;

            // If state override is given, then return.
            if self.state_override.is_some() {
                return Ok(Control::Return);
            }
        }
        // Otherwise:
        else {
            // If c is U+005B ([), then set insideBrackets to true.
            if c == Some('[') {
                self.inside_brackets = true;
            }
            // If c is U+005D (]), then set insideBrackets to false.
            else if c == Some(']') {
                self.inside_brackets = false;
            }

            // Append c to buffer.
            self.buffer
                .push(c.expect("eof is handled by the previous branch"));
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#port-state>
    fn port_state(&mut self) -> StepResult {
        let c = self.c();

        // If c is an ASCII digit, append c to buffer.
        if let Some(digit) = c.filter(char::is_ascii_digit) {
            self.buffer.push(digit);
        }
        // Otherwise, if one of the following is true:
        // * c is the EOF code point, U+002F (/), U+003F (?), or U+0023 (#)
        // * url is special and c is U+005C (\)
        // * state override is given
        else if matches!(c, None | Some('/' | '?' | '#'))
            || (self.result.url.is_special() && c == Some('\\'))
            || self.state_override.is_some()
        {
            // If buffer is not the empty string, then:
            if !self.buffer.is_empty() {
                // Let port be the mathematical integer value that is
                // represented by buffer in radix-10 using ASCII digits for
                // digits with values 0 through 9.
                // If port is greater than 2^16 − 1, port-out-of-range
                // validation error, return failure.
                let port: Port = match self.buffer.parse() {
                    Ok(port) => port,
                    Err(_) => {
                        self.record(ValidationError::PortOutOfRange);
                        return Err(ParseFailure::PortOutOfRange);
                    },
                };

                // Set url's port to null, if port is url's scheme's
                // default port; otherwise to port.
                if self.result.url.default_port() == Some(port) {
                    self.result.url.port = None;
                } else {
                    self.result.url.port = Some(port);
                }

                // Set buffer to the empty string.
                self.buffer.clear();
            }

            // If state override is given, then return.
            if self.state_override.is_some() {
                return Ok(Control::Return);
            }

            // Set state to path start state and decrease pointer by 1.
            self.state = State::PathStart;
            self.go_back();
        }
        // Otherwise, port-invalid validation error, return failure.
        else {
            self.record(ValidationError::PortInvalid);
            return Err(ParseFailure::PortInvalid);
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#file-state>
    fn file_state(&mut self) -> StepResult {
        // Set url's scheme to "file".
        self.result.url.scheme = "file".to_string();

        // Set url's host to the empty string.
        self.result.url.host = Some(String::new());

        let c = self.c();

        // If c is U+002F (/) or U+005C (\), then:
        if matches!(c, Some('/' | '\\')) {
            // If c is U+005C (\), invalid-reverse-solidus validation error.
            if c == Some('\\') {
                self.record(ValidationError::InvalidReverseSolidus);
            }

            // Set state to file slash state.
            self.state = State::FileSlash;
        }
        // Otherwise, if base is non-null and base's scheme is "file":
        else if let Some(base) = self.base.filter(|base| base.has_file_scheme()) {
            // Set url's host to base's host, url's path to a clone of
            // base's path, and url's query to base's query.
            self.result.url.host = base.host.clone();
            self.result.url.path = base.path.clone();
            self.result.url.query = base.query.clone();

            // If c is U+003F (?), then set url's query to the empty
            // string and state to query state.
            if c == Some('?') {
                self.result.url.query = Some(String::new());
                self.state = State::Query;
            }
            // Otherwise, if c is U+0023 (#), set url's fragment to the
            // empty string and state to fragment state.
            else if c == Some('#') {
                self.result.url.fragment = Some(String::new());
                self.state = State::Fragment;
            }
            // Otherwise, if c is not the EOF code point:
            else if c.is_some() {
                // Set url's query to null.
                self.result.url.query = None;

                // If the code point substring from pointer to the end of
                // input does not start with a Windows drive letter, then
                // shorten url's path.
                if !util::starts_with_windows_drive_letter(self.from_pointer()) {
                    util::shorten_url_path(&mut self.result.url);
                }
                // Otherwise:
                else {
                    // File-invalid-Windows-drive-letter validation error.
                    self.record(ValidationError::FileInvalidWindowsDriveLetter);

                    // Set url's path to an empty list.
                    self.result.url.path = Vec::new();
                }

                // Set state to path state and decrease pointer by 1.
                self.state = State::Path;
                self.go_back();
            }
        }
        // Otherwise, set state to path state, and decrease pointer by 1.
        else {
            self.state = State::Path;
            self.go_back();
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#file-slash-state>
    fn file_slash_state(&mut self) -> StepResult {
        let c = self.c();

        // If c is U+002F (/) or U+005C (\), then:
        if matches!(c, Some('/' | '\\')) {
            // If c is U+005C (\), invalid-reverse-solidus validation error.
            if c == Some('\\') {
                self.record(ValidationError::InvalidReverseSolidus);
            }

            // Set state to file host state.
            self.state = State::FileHost;
        }
        // Otherwise:
        else {
            // If base is non-null and base's scheme is "file", then:
            if let Some(base) = self.base.filter(|base| base.has_file_scheme()) {
                // Set url's host to base's host.
                self.result.url.host = base.host.clone();

                // If the code point substring from pointer to the end of
                // input does not start with a Windows drive letter and
                // base's path[0] is a normalized Windows drive letter,
                // then append base's path[0] to url's path.
                if !util::starts_with_windows_drive_letter(self.from_pointer())
                    && base
                        .path
                        .first()
                        .is_some_and(|segment| util::is_normalized_windows_drive_letter(segment))
                {
                    self.result.url.path.push(base.path[0].clone());
                }
            }

            // Set state to path state, and decrease pointer by 1.
            self.state = State::Path;
            self.go_back();
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#file-host-state>
    fn file_host_state(&mut self) -> StepResult {
        match self.c() {
            // If c is the EOF code point, U+002F (/), U+005C (\),
            // U+003F (?), or U+0023 (#), then decrease pointer by 1 and
            // then:
            None | Some('/' | '\\' | '?' | '#') => {
                self.go_back();

                // If state override is not given and buffer is a Windows
                // drive letter, file-invalid-Windows-drive-letter-host
                // validation error, set state to path state.
                if self.state_override.is_none() && util::is_windows_drive_letter(&self.buffer) {
                    self.record(ValidationError::FileInvalidWindowsDriveLetterHost);

                    // The buffer is intentionally not reset: the path
                    // state picks it up as the first path segment.
                    self.state = State::Path;
                }
                // Otherwise, if buffer is the empty string, then:
                else if self.buffer.is_empty() {
                    // Set url's host to the empty string.
                    self.result.url.host = Some(String::new());

                    // If state override is given, then return.
                    if self.state_override.is_some() {
                        return Ok(Control::Return);
                    }

                    // Set state to path start state.
                    self.state = State::PathStart;
                }
                // Otherwise, run these steps:
                else {
                    // Let host be the result of host parsing buffer with
                    // url is not special. If host is failure, then return
                    // failure.
                    let mut host = parse_host(&self.buffer, !self.result.url.is_special())?;

                    // If host is "localhost", then set host to the empty
                    // string.
                    if host == "localhost" {
                        host = String::new();
                    }

                    // Set url's host to host.
                    self.result.url.host = Some(host);

                    // If state override is given, then return.
                    if self.state_override.is_some() {
                        return Ok(Control::Return);
                    }

                    // Set buffer to the empty string and state to path
                    // start state.
                    self.buffer.clear();
                    self.state = State::PathStart;
                }
            },
            // Otherwise, append c to buffer.
            Some(c) => self.buffer.push(c),
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#path-start-state>
    fn path_start_state(&mut self) -> StepResult {
        let c = self.c();

        // If url is special, then:
        if self.result.url.is_special() {
            // If c is U+005C (\), invalid-reverse-solidus validation error.
            if c == Some('\\') {
                self.record(ValidationError::InvalidReverseSolidus);
            }

            // Set state to path state.
            self.state = State::Path;

            // If c is neither U+002F (/) nor U+005C (\), then decrease
            // pointer by 1.
            if !matches!(c, Some('/' | '\\')) {
                self.go_back();
            }
        }
        // Otherwise, if state override is not given and c is U+003F (?),
        // set url's query to the empty string and state to query state.
        else if self.state_override.is_none() && c == Some('?') {
            self.result.url.query = Some(String::new());
            self.state = State::Query;
        }
        // Otherwise, if state override is not given and c is U+0023 (#),
        // set url's fragment to the empty string and state to fragment
        // state.
        else if self.state_override.is_none() && c == Some('#') {
            self.result.url.fragment = Some(String::new());
            self.state = State::Fragment;
        }
        // Otherwise, if c is not the EOF code point:
        else if c.is_some() {
            // Set state to path state.
            self.state = State::Path;

            // If c is not U+002F (/), then decrease pointer by 1.
            if c != Some('/') {
                self.go_back();
            }
        }
        // Otherwise, if state override is given and url's host is null,
        // append the empty string to url's path.
        else if self.state_override.is_some() && self.result.url.host.is_none() {
            self.result.url.path.push(String::new());
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#path-state>
    fn path_state(&mut self) -> StepResult {
        let c = self.c();
        let is_slash = c == Some('/') || (self.result.url.is_special() && c == Some('\\'));

        // If one of the following is true:
        // * c is the EOF code point or U+002F (/)
        // * url is special and c is U+005C (\)
        // * state override is not given and c is U+003F (?) or U+0023 (#)
        if matches!(c, None | Some('/'))
            || (self.result.url.is_special() && c == Some('\\'))
            || (self.state_override.is_none() && matches!(c, Some('?' | '#')))
        {
            // If url is special and c is U+005C (\),
            // invalid-reverse-solidus validation error.
            if self.result.url.is_special() && c == Some('\\') {
                self.record(ValidationError::InvalidReverseSolidus);
            }

            // If buffer is a double-dot path segment, then:
            if util::is_double_dot_path_segment(&self.buffer) {
                // Shorten url's path.
                util::shorten_url_path(&mut self.result.url);

                // If neither c is U+002F (/), nor url is special and c is
                // U+005C (\), append the empty string to url's path.
                if !is_slash {
                    self.result.url.path.push(String::new());
                }
            }
            // Otherwise, if buffer is a single-dot path segment and if
            // neither c is U+002F (/), nor url is special and c is
            // U+005C (\), append the empty string to url's path.
            else if util::is_single_dot_path_segment(&self.buffer) && !is_slash {
                self.result.url.path.push(String::new());
            }
            // Otherwise, if buffer is not a single-dot path segment, then:
            else if !util::is_single_dot_path_segment(&self.buffer) {
                // If url's scheme is "file", url's path is empty, and
                // buffer is a Windows drive letter, then replace the
                // second code point in buffer with U+003A (:).
                if self.result.url.has_file_scheme()
                    && self.result.url.path.is_empty()
                    && util::is_windows_drive_letter(&self.buffer)
                {
                    self.buffer.replace_range(1..2, ":");
                }

                // Append buffer to url's path.
                // An empty buffer is dropped instead, so a trailing slash
                // does not leave a trailing empty segment behind.
                if !self.buffer.is_empty() {
                    self.result.url.path.push(std::mem::take(&mut self.buffer));
                }
            }

            // Set buffer to the empty string.
            self.buffer.clear();

            // If c is U+003F (?), then set url's query to the empty
            // string and state to query state.
            if c == Some('?') {
                self.result.url.query = Some(String::new());
                self.state = State::Query;
            }
            // If c is U+0023 (#), then set url's fragment to the empty
            // string and state to fragment state.
            if c == Some('#') {
                self.result.url.fragment = Some(String::new());
                self.state = State::Fragment;
            }
        }
        // Otherwise, run these steps:
        else {
            self.check_url_codepoint();

            // UTF-8 percent-encode c using the path percent-encode set and
            // append the result to buffer.
            let c = c.expect("eof is handled by the previous branch");
            self.buffer
                .push_str(&utf8_percent_encode(c, PercentEncodeSet::Path));
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#cannot-be-a-base-url-path-state>
    fn opaque_path_state(&mut self) -> StepResult {
        let c = self.c();

        // If c is U+003F (?), then set url's query to the empty string
        // and state to query state.
        if c == Some('?') {
            self.result.url.query = Some(String::new());
            self.state = State::Query;
        }
        // Otherwise, if c is U+0023 (#), set url's fragment to the empty
        // string and state to fragment state.
        else if c == Some('#') {
            self.result.url.fragment = Some(String::new());
            self.state = State::Fragment;
        }
        // Otherwise:
        else {
            // If c is not the EOF code point, not a URL code point, and
            // not U+0025 (%), invalid-URL-unit validation error.
            // If c is U+0025 (%) and remaining does not start with two
            // ASCII hex digits, invalid-URL-unit validation error.
            self.check_url_codepoint();

            // If c is not the EOF code point, UTF-8 percent-encode c
            // using the C0 control percent-encode set and append the
            // result to url's path.
            if let Some(c) = c {
                let encoded = utf8_percent_encode(c, PercentEncodeSet::C0Control);
                match self.result.url.path.first_mut() {
                    Some(opaque) => opaque.push_str(&encoded),
                    None => self.result.url.path.push(encoded),
                }
            }
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#query-state>
    fn query_state(&mut self) -> StepResult {
        // If encoding is not UTF-8 and one of the following is true:
        // * url is not special
        // * url's scheme is "ws" or "wss"
        // then set encoding to UTF-8.
        if self.encoding != Encoding::Utf8
            && (!self.result.url.is_special()
                || self.result.url.has_ws_scheme()
                || self.result.url.has_wss_scheme())
        {
            self.encoding = Encoding::Utf8;
        }

        let c = self.c();

        // If one of the following is true:
        // * state override is not given and c is U+0023 (#)
        // * c is the EOF code point
        if (self.state_override.is_none() && c == Some('#')) || c.is_none() {
            // Let queryPercentEncodeSet be the special-query
            // percent-encode set if url is special; otherwise the query
            // percent-encode set.
            let query_percent_encode_set = if self.result.url.is_special() {
                PercentEncodeSet::SpecialQuery
            } else {
                PercentEncodeSet::Query
            };

            // Percent-encode after encoding, with encoding, buffer, and
            // queryPercentEncodeSet, and append the result to url's query.
            let encoded = percent_encode_after_encoding(
                self.encoding,
                &self.buffer,
                query_percent_encode_set,
                false,
            );
            self.result
                .url
                .query
                .get_or_insert_with(String::new)
                .push_str(&encoded);

            // Set buffer to the empty string.
            self.buffer.clear();

            // If c is U+0023 (#), then set url's fragment to the empty
            // string and state to fragment state.
            if c == Some('#') {
                self.result.url.fragment = Some(String::new());
                self.state = State::Fragment;
            }
        }
        // Otherwise, if c is not the EOF code point:
        else if let Some(c) = c {
            // If c is not a URL code point and not U+0025 (%),
            // invalid-URL-unit validation error.
            // If c is U+0025 (%) and remaining does not start with two
            // ASCII hex digits, invalid-URL-unit validation error.
            self.check_url_codepoint();

            // Append c to buffer.
            self.buffer.push(c);
        }

        Ok(Control::Continue)
    }

    /// <https://url.spec.whatwg.org/#fragment-state>
    fn fragment_state(&mut self) -> StepResult {
        // If c is not the EOF code point:
        if let Some(c) = self.c() {
            // If c is not a URL code point and not U+0025 (%),
            // invalid-URL-unit validation error.
            // If c is U+0025 (%) and remaining does not start with two
            // ASCII hex digits, invalid-URL-unit validation error.
            self.check_url_codepoint();

            // Append c to buffer.
            self.buffer.push(c);
        } else {
            // UTF-8 percent-encode buffer using the fragment
            // percent-encode set and append the result to url's fragment.
            let encoded = percent_encode_after_encoding(
                Encoding::Utf8,
                &self.buffer,
                PercentEncodeSet::Fragment,
                false,
            );
            self.result
                .url
                .fragment
                .get_or_insert_with(String::new)
                .push_str(&encoded);
            self.buffer.clear();
        }

        Ok(Control::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> ParseResult {
        URL::parse(input)
    }

    #[test]
    fn scheme_is_lowercased() {
        let url = parse("HTTP://example.com").url;
        assert_eq!(url.scheme, "http");

        let url = parse("MailTo:x").url;
        assert_eq!(url.scheme, "mailto");
    }

    #[test]
    fn default_port_is_elided() {
        let result = parse("http://h:80/");
        assert_eq!(result.url.port, None);
        assert!(result.is_clean());

        let result = parse("http://h:21/");
        assert_eq!(result.url.port, Some(21));

        let result = parse("wss://h:443");
        assert_eq!(result.url.port, None);
    }

    #[test]
    fn port_failures() {
        let result = parse("http://h:99999999999999999999");
        assert_eq!(result.failure, Some(ParseFailure::PortOutOfRange));
        assert_eq!(result.validation_errors, [ValidationError::PortOutOfRange]);

        let result = parse("http://h:7z");
        assert_eq!(result.failure, Some(ParseFailure::PortInvalid));
        assert_eq!(result.validation_errors, [ValidationError::PortInvalid]);

        let result = parse("http://h:70000");
        assert_eq!(result.failure, Some(ParseFailure::PortOutOfRange));
    }

    #[test]
    fn at_sign_in_authority_records_invalid_credentials() {
        let result = parse("http://user@h");
        assert_eq!(result.url.username, "user");
        assert_eq!(result.url.host.as_deref(), Some("h"));
        assert_eq!(
            result.validation_errors,
            [ValidationError::InvalidCredentials]
        );
    }

    #[test]
    fn repeated_at_signs_fold_into_username() {
        // Everything up to the last @ belongs to the userinfo, earlier @s
        // are percent-encoded into it.
        let result = parse("http://a@b@h");
        assert_eq!(result.url.username, "a%40b");
        assert_eq!(result.url.host.as_deref(), Some("h"));
    }

    #[test]
    fn userinfo_is_percent_encoded() {
        let result = parse("http://us er:pa^ss@h");
        assert_eq!(result.url.username, "us%20er");
        assert_eq!(result.url.password, "pa%5Ess");
    }

    #[test]
    fn password_keeps_later_colons() {
        let result = parse("http://u:a:b@h");
        assert_eq!(result.url.username, "u");
        assert_eq!(result.url.password, "a%3Ab");
    }

    #[test]
    fn relative_resolution() {
        let base = parse("http://example.com/a/b/c").url;

        let url = URL::parse_with_base("d", Some(&base), Encoding::Utf8).url;
        assert_eq!(url.path, ["a", "b", "d"]);

        let url = URL::parse_with_base("/d", Some(&base), Encoding::Utf8).url;
        assert_eq!(url.path, ["d"]);

        let url = URL::parse_with_base("../d", Some(&base), Encoding::Utf8).url;
        assert_eq!(url.path, ["a", "d"]);

        let url = URL::parse_with_base("//other/x", Some(&base), Encoding::Utf8).url;
        assert_eq!(url.host.as_deref(), Some("other"));
        assert_eq!(url.path, ["x"]);
    }

    #[test]
    fn relative_query_and_fragment() {
        let base = parse("http://example.com/a?old#frag").url;

        let url = URL::parse_with_base("?new", Some(&base), Encoding::Utf8).url;
        assert_eq!(url.path, ["a"]);
        assert_eq!(url.query.as_deref(), Some("new"));
        assert_eq!(url.fragment, None);

        let url = URL::parse_with_base("#new", Some(&base), Encoding::Utf8).url;
        assert_eq!(url.query.as_deref(), Some("old"));
        assert_eq!(url.fragment.as_deref(), Some("new"));
    }

    #[test]
    fn fragment_on_opaque_base() {
        let base = parse("a:").url;
        assert!(base.has_opaque_path());

        let result = URL::parse_with_base("#frag", Some(&base), Encoding::Utf8);
        assert_eq!(result.url.scheme, "a");
        assert_eq!(result.url.fragment.as_deref(), Some("frag"));

        let result = URL::parse_with_base("x", Some(&base), Encoding::Utf8);
        assert_eq!(result.failure, Some(ParseFailure::MissingScheme));
    }

    #[test]
    fn dot_segments_are_removed() {
        let url = parse("http://h/a/./b").url;
        assert_eq!(url.path, ["a", "b"]);

        let url = parse("http://h/a/../b").url;
        assert_eq!(url.path, ["b"]);

        let url = parse("http://h/a/%2E%2E/b").url;
        assert_eq!(url.path, ["b"]);

        // A trailing double-dot marks the directory itself
        let url = parse("http://h/a/b/..").url;
        assert_eq!(url.path, ["a", ""]);
    }

    #[test]
    fn backslashes_in_special_urls() {
        let result = parse("http:\\\\h\\a");
        assert_eq!(result.url.host.as_deref(), Some("h"));
        assert_eq!(result.url.path, ["a"]);
        assert!(result
            .validation_errors
            .contains(&ValidationError::SpecialSchemeMissingFollowingSolidus));
        assert!(result
            .validation_errors
            .contains(&ValidationError::InvalidReverseSolidus));
    }

    #[test]
    fn path_is_percent_encoded() {
        let result = parse("http://h/a b");
        assert_eq!(result.url.path, ["a%20b"]);
        assert_eq!(result.validation_errors, [ValidationError::InvalidURLUnit]);
    }

    #[test]
    fn malformed_percent_sign_is_flagged_but_kept() {
        let result = parse("http://h/%zz");
        assert_eq!(result.url.path, ["%zz"]);
        assert_eq!(result.validation_errors, [ValidationError::InvalidURLUnit]);

        let result = parse("http://h/%4a");
        assert!(result.is_clean());
    }

    #[test]
    fn opaque_path_accumulates_into_one_segment() {
        let url = parse("mailto:a@b,c@d").url;
        assert_eq!(url.path, ["a@b,c@d"]);
        assert_eq!(url.host, None);

        // The C0 control set leaves spaces alone
        let url = parse("data:text/plain;x y").url;
        assert_eq!(url.path, ["text/plain;x y"]);
    }

    #[test]
    fn opaque_path_query_and_fragment() {
        let url = parse("a:b?q#f").url;
        assert_eq!(url.path, ["b"]);
        assert_eq!(url.query.as_deref(), Some("q"));
        assert_eq!(url.fragment.as_deref(), Some("f"));
    }

    #[test]
    fn query_uses_special_set_for_special_urls() {
        // The apostrophe is only escaped for special schemes
        let url = parse("http://h?a'b").url;
        assert_eq!(url.query.as_deref(), Some("a%27b"));

        let url = parse("git://h?a'b").url;
        assert_eq!(url.query.as_deref(), Some("a'b"));
    }

    #[test]
    fn fragment_is_percent_encoded() {
        let url = parse("http://h/#a b`").url;
        assert_eq!(url.fragment.as_deref(), Some("a%20b%60"));
    }

    #[test]
    fn input_whitespace_is_stripped() {
        let result = parse("  http://h/  ");
        assert_eq!(result.url.host.as_deref(), Some("h"));
        assert_eq!(result.validation_errors, [ValidationError::InvalidURLUnit]);

        let result = parse("ht\ttp://\nh/");
        assert_eq!(result.url.scheme, "http");
        assert_eq!(result.url.host.as_deref(), Some("h"));
        assert_eq!(result.validation_errors, [ValidationError::InvalidURLUnit]);
    }

    #[test]
    fn windows_drive_letters() {
        let result = parse("file:///c:/dir/f.txt");
        assert_eq!(result.url.path, ["c:", "dir", "f.txt"]);

        // The pipe form is normalized to a colon
        let result = parse("file:///c|/dir");
        assert_eq!(result.url.path, ["c:", "dir"]);

        // A drive letter is never a host
        let result = parse("file://c:/dir");
        assert_eq!(result.url.host.as_deref(), Some(""));
        assert_eq!(result.url.path, ["c:", "dir"]);
        assert_eq!(
            result.validation_errors,
            [ValidationError::FileInvalidWindowsDriveLetterHost]
        );
    }

    #[test]
    fn file_localhost_is_erased() {
        let result = parse("file://localhost/f.txt");
        assert_eq!(result.url.host.as_deref(), Some(""));
        assert_eq!(result.url.path, ["f.txt"]);
    }

    #[test]
    fn file_base_drive_letter_is_inherited() {
        let base = parse("file:///c:/dir/f.txt").url;

        let url = URL::parse_with_base("/other", Some(&base), Encoding::Utf8).url;
        assert_eq!(url.path, ["c:", "other"]);
    }

    #[test]
    fn state_override_port() {
        let url = parse("http://h").url;

        let result = URL::basic_parse("8080", None, Encoding::Utf8, Some(url), Some(State::Port));
        assert!(!result.is_failure());
        assert_eq!(result.url.port, Some(8080));
    }

    #[test]
    fn state_override_hostname() {
        let url = parse("http://old/x?q").url;

        let result = URL::basic_parse(
            "example.org",
            None,
            Encoding::Utf8,
            Some(url),
            Some(State::Hostname),
        );
        assert!(!result.is_failure());
        assert_eq!(result.url.host.as_deref(), Some("example.org"));
        // The rest of the record is untouched
        assert_eq!(result.url.path, ["x"]);
        assert_eq!(result.url.query.as_deref(), Some("q"));
    }

    #[test]
    fn state_override_scheme_respects_speciality() {
        let url = parse("http://h").url;

        // A special scheme cannot be swapped for a non-special one
        let result = URL::basic_parse(
            "data:",
            None,
            Encoding::Utf8,
            Some(url.clone()),
            Some(State::SchemeStart),
        );
        assert_eq!(result.url.scheme, "http");

        let result = URL::basic_parse(
            "https:",
            None,
            Encoding::Utf8,
            Some(url),
            Some(State::SchemeStart),
        );
        assert_eq!(result.url.scheme, "https");
    }

    #[test]
    fn state_override_scheme_clears_default_port() {
        let mut url = parse("http://h:443").url;
        assert_eq!(url.port, Some(443));

        url = URL::basic_parse(
            "https:",
            None,
            Encoding::Utf8,
            Some(url),
            Some(State::SchemeStart),
        )
        .url;
        assert_eq!(url.scheme, "https");
        assert_eq!(url.port, None);
    }

    #[test]
    fn host_parse_failure_propagates() {
        let result = parse("http://[::1]/x");
        assert_eq!(
            result.failure,
            Some(ParseFailure::HostParse(HostParseError::Ipv6Unsupported))
        );
    }

    #[test]
    fn empty_host_failures() {
        let result = parse("http://:80");
        assert_eq!(result.failure, Some(ParseFailure::HostMissing));
        assert_eq!(result.validation_errors, [ValidationError::HostMissing]);

        let result = parse("http://#f");
        assert_eq!(result.failure, Some(ParseFailure::HostMissing));
    }

    #[test]
    fn non_special_urls_may_have_empty_hosts() {
        let result = parse("git:///x");
        assert!(!result.is_failure());
        assert_eq!(result.url.host.as_deref(), Some(""));
        assert_eq!(result.url.path, ["x"]);
    }

    #[test]
    fn validation_errors_are_deduplicated() {
        let result = parse("http://h/< <");
        assert_eq!(result.validation_errors, [ValidationError::InvalidURLUnit]);
    }
}
