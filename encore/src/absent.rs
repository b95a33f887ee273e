//! The origin's "resource does not exist" signal.
//!
//! The catalog API answers requests for unknown ids with `200 OK` and a fixed
//! placeholder body instead of a 404. The only reliable tell is the body
//! length: exactly [`ABSENT_BODY_LEN`] bytes, whatever they contain. No valid
//! resource the API serves has that length.
//!
//! The check runs on the raw origin body before any decoding. Cached values
//! never go through it since placeholders are never cached.

/// Length in bytes of the origin's placeholder body for a missing entity.
pub const ABSENT_BODY_LEN: usize = 126;

/// Whether `body` is the origin's placeholder for a missing entity.
///
/// ```
/// use encore::absent::{is_absent_marker, ABSENT_BODY_LEN};
///
/// assert!(is_absent_marker(&[b' '; ABSENT_BODY_LEN]));
/// assert!(!is_absent_marker(b"{\"id\":1}"));
/// ```
#[inline]
pub fn is_absent_marker(body: &[u8]) -> bool {
    body.len() == ABSENT_BODY_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_length_matches() {
        assert!(!is_absent_marker(&[0; ABSENT_BODY_LEN - 1]));
        assert!(is_absent_marker(&[0; ABSENT_BODY_LEN]));
        assert!(!is_absent_marker(&[0; ABSENT_BODY_LEN + 1]));
        assert!(!is_absent_marker(b""));
    }

    #[test]
    fn content_does_not_matter() {
        let mut body = br#"{"id":1,"name":"valid json"}"#.to_vec();
        body.resize(ABSENT_BODY_LEN, b' ');
        assert!(is_absent_marker(&body));
    }
}
