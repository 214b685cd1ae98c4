use crate::url::URL;

/// <https://url.spec.whatwg.org/#windows-drive-letter>
#[must_use]
pub(crate) fn is_windows_drive_letter(input: &str) -> bool {
    let mut chars = input.chars();

    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(first), Some(':' | '|'), None) if first.is_ascii_alphabetic()
    )
}

/// <https://url.spec.whatwg.org/#normalized-windows-drive-letter>
#[must_use]
pub(crate) fn is_normalized_windows_drive_letter(input: &str) -> bool {
    let mut chars = input.chars();

    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(first), Some(':'), None) if first.is_ascii_alphabetic()
    )
}

/// <https://url.spec.whatwg.org/#start-with-a-windows-drive-letter>
///
/// A string starts with a Windows drive letter if all of the following are true:
/// * its length is greater than or equal to 2
/// * its first two code points are a Windows drive letter
/// * its length is 2 or its third code point is U+002F (/), U+005C (\), U+003F (?), or U+0023 (#).
#[must_use]
pub(crate) fn starts_with_windows_drive_letter(input: &[char]) -> bool {
    if input.len() < 2 {
        return false;
    }

    if !input[0].is_ascii_alphabetic() || !matches!(input[1], ':' | '|') {
        return false;
    }

    matches!(input.get(2), None | Some('/' | '\\' | '?' | '#'))
}

/// <https://url.spec.whatwg.org/#single-dot-path-segment>
#[inline]
#[must_use]
pub(crate) fn is_single_dot_path_segment(input: &str) -> bool {
    input == "." || input.eq_ignore_ascii_case("%2e")
}

/// <https://url.spec.whatwg.org/#double-dot-path-segment>
#[inline]
#[must_use]
pub(crate) fn is_double_dot_path_segment(input: &str) -> bool {
    input == ".."
        || input.eq_ignore_ascii_case(".%2e")
        || input.eq_ignore_ascii_case("%2e.")
        || input.eq_ignore_ascii_case("%2e%2e")
}

/// Prefix test over the parser's code point view of its input
#[must_use]
pub(crate) fn starts_with(input: &[char], prefix: &str) -> bool {
    let mut index = 0;
    for expected in prefix.chars() {
        if input.get(index) != Some(&expected) {
            return false;
        }
        index += 1;
    }
    true
}

/// <https://url.spec.whatwg.org/#shorten-a-urls-path>
pub(crate) fn shorten_url_path(url: &mut URL) {
    // Assert: url does not have an opaque path.
    debug_assert!(!url.has_opaque_path());

    // If url's scheme is "file", path's size is 1, and path[0] is a
    // normalized Windows drive letter, then return.
    if url.has_file_scheme()
        && url.path.len() == 1
        && is_normalized_windows_drive_letter(&url.path[0])
    {
        return;
    }

    // Remove path's last item, if any.
    url.path.pop();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_drive_letters() {
        assert!(is_windows_drive_letter("c:"));
        assert!(is_windows_drive_letter("C|"));
        assert!(!is_windows_drive_letter("c"));
        assert!(!is_windows_drive_letter("c:x"));
        assert!(!is_windows_drive_letter("1:"));

        assert!(is_normalized_windows_drive_letter("c:"));
        assert!(!is_normalized_windows_drive_letter("c|"));
    }

    #[test]
    fn starts_with_drive_letter() {
        let as_chars = |s: &str| s.chars().collect::<Vec<char>>();

        assert!(starts_with_windows_drive_letter(&as_chars("c:")));
        assert!(starts_with_windows_drive_letter(&as_chars("c:/")));
        assert!(starts_with_windows_drive_letter(&as_chars("c|#")));
        assert!(!starts_with_windows_drive_letter(&as_chars("c:x")));
        assert!(!starts_with_windows_drive_letter(&as_chars("c")));
    }

    #[test]
    fn dot_path_segments() {
        assert!(is_single_dot_path_segment("."));
        assert!(is_single_dot_path_segment("%2E"));
        assert!(!is_single_dot_path_segment(".."));

        assert!(is_double_dot_path_segment(".."));
        assert!(is_double_dot_path_segment(".%2e"));
        assert!(is_double_dot_path_segment("%2E%2e"));
        assert!(!is_double_dot_path_segment("."));
    }

    #[test]
    fn shorten_path_keeps_drive_letter() {
        let mut url = URL {
            scheme: "file".to_string(),
            path: vec!["c:".to_string()],
            ..URL::default()
        };
        shorten_url_path(&mut url);
        assert_eq!(url.path, ["c:"]);

        url.path = vec!["c:".to_string(), "dir".to_string()];
        shorten_url_path(&mut url);
        assert_eq!(url.path, ["c:"]);

        url.scheme = "http".to_string();
        shorten_url_path(&mut url);
        assert!(url.path.is_empty());
    }
}
