use std::fmt;

/// Token returned for text that carries no dotted-numeric version.
///
/// It is never a real version and must never be allowed to match.
pub const SENTINEL_VERSION: &str = "0.0.0";

/// Canonical comparable version token.
///
/// Tokens compare by exact string equality: `1.2.3` and `1.2.3.0` are distinct. There is no
/// range or semver ordering here.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalVersion(String);

impl CanonicalVersion {
    pub fn sentinel() -> Self {
        CanonicalVersion(SENTINEL_VERSION.to_string())
    }

    pub fn is_sentinel(&self) -> bool {
        self.0 == SENTINEL_VERSION
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize arbitrary constraint text (`">= 1.2.3"`, `"v2.0"`, `"= 0.1.18"`) to a token.
///
/// Leading non-digits are dropped, then the first run of digit groups joined by `.` is
/// taken. A trailing dot is not part of the token. Text without digits yields the sentinel.
pub fn normalize(raw: &str) -> CanonicalVersion {
    let rest = raw.trim_start_matches(|c: char| !c.is_ascii_digit());
    let bytes = rest.as_bytes();

    let mut end = digit_run_end(bytes, 0);
    if end == 0 {
        return CanonicalVersion::sentinel();
    }
    while end < bytes.len() && bytes[end] == b'.' {
        let next = digit_run_end(bytes, end + 1);
        if next == end + 1 {
            break;
        }
        end = next;
    }

    CanonicalVersion(rest[..end].to_string())
}

fn digit_run_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_is_sentinel() {
        assert!(normalize("").is_sentinel());
        assert!(normalize("   ").is_sentinel());
    }

    #[test]
    fn strips_operators_and_whitespace() {
        assert_eq!(normalize(">= 1.2.3").as_str(), "1.2.3");
        assert_eq!(normalize("= 0.1.18").as_str(), "0.1.18");
        assert_eq!(normalize("^4.1.0").as_str(), "4.1.0");
    }

    #[test]
    fn strips_leading_v() {
        assert_eq!(normalize("v2.0").as_str(), "2.0");
    }

    #[test]
    fn no_digits_is_sentinel() {
        assert!(normalize("no-digits-here").is_sentinel());
    }

    #[test]
    fn stops_at_first_non_version_character() {
        assert_eq!(normalize("1.2.3-beta.4").as_str(), "1.2.3");
        assert_eq!(normalize("1.2.").as_str(), "1.2");
        assert_eq!(normalize("10..2").as_str(), "10");
        assert_eq!(normalize("1.2.3 || 4.5.6").as_str(), "1.2.3");
    }

    #[test]
    fn distinct_lengths_stay_distinct() {
        assert_ne!(normalize("1.2.3"), normalize("1.2.3.0"));
    }

    #[test]
    fn literal_zero_version_reads_as_sentinel() {
        assert!(normalize("0.0.0").is_sentinel());
    }

    proptest! {
        #[test]
        fn normalize_never_panics(input in ".*") {
            let _ = normalize(&input);
        }

        #[test]
        fn normalize_is_idempotent(input in ".*") {
            let once = normalize(&input);
            let twice = normalize(once.as_str());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn token_is_dotted_numeric(input in ".*") {
            let token = normalize(&input);
            let s = token.as_str();
            prop_assert!(!s.starts_with('.') && !s.ends_with('.'));
            prop_assert!(s.chars().all(|c| c.is_ascii_digit() || c == '.'));
            prop_assert!(!s.contains(".."));
        }
    }
}
