//! Content size measurement and truncation.
//!
//! Pure functions over `&str`. Lengths are measured in the unit a
//! [`ContentDelimiter`] names:
//!
//! - `Characters`: UTF-16 code units, so `"😀"` is two characters
//! - `Bytes`: length of the UTF-8 encoding
//! - `Lines`: `\n`-delimited segments, so `""` is one line and `"a\n"` is two

use std::borrow::Cow;
use tabdeck_config::{ContentDelimiter, Units};

/// Length of `content` in the given unit
pub fn measure(content: &str, units: Units) -> usize {
    match units {
        Units::Characters => content.encode_utf16().count(),
        Units::Bytes => content.len(),
        Units::Lines => content.split('\n').count(),
    }
}

/// Whether `content` is longer than the delimiter allows
pub fn is_over_limit(content: &str, delimiter: &ContentDelimiter) -> bool {
    measure(content, delimiter.units) > delimiter.limit
}

/// Cut `content` down to at most `delimiter.limit` units.
///
/// Returns the input unchanged (borrowed) when it already fits. Character and
/// byte truncation keep whole code points only, so a surrogate pair or a
/// multi-byte sequence is never split and the result can be under the limit.
pub fn truncate<'a>(content: &'a str, delimiter: &ContentDelimiter) -> Cow<'a, str> {
    if !is_over_limit(content, delimiter) {
        return Cow::Borrowed(content);
    }

    let limit = delimiter.limit;
    match delimiter.units {
        Units::Characters => Cow::Borrowed(prefix_within(content, limit, char::len_utf16)),
        Units::Bytes => Cow::Borrowed(prefix_within(content, limit, char::len_utf8)),
        Units::Lines => {
            let kept: Vec<&str> = content.split('\n').take(limit).collect();
            Cow::Owned(kept.join("\n"))
        }
    }
}

/// Longest prefix of whole chars whose summed `size` stays within `limit`
fn prefix_within(content: &str, limit: usize, size: fn(char) -> usize) -> &str {
    let mut used = 0;
    let mut end = 0;
    for (idx, ch) in content.char_indices() {
        used += size(ch);
        if used > limit {
            break;
        }
        end = idx + ch.len_utf8();
    }
    &content[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delim(limit: usize, units: Units) -> ContentDelimiter {
        ContentDelimiter::new(limit, units)
    }

    #[test]
    fn measure_characters_counts_utf16_units() {
        assert_eq!(measure("", Units::Characters), 0);
        assert_eq!(measure("héllo", Units::Characters), 5);
        assert_eq!(measure("😀", Units::Characters), 2);
        assert_eq!(measure("a😀b", Units::Characters), 4);
        assert_eq!(measure("𝄞𝄞", Units::Characters), 4);
    }

    #[test]
    fn measure_bytes_is_utf8_length() {
        assert_eq!(measure("abc", Units::Bytes), 3);
        assert_eq!(measure("é", Units::Bytes), 2);
        assert_eq!(measure("a😀b", Units::Bytes), 6);
    }

    #[test]
    fn measure_lines_counts_segments() {
        assert_eq!(measure("", Units::Lines), 1);
        assert_eq!(measure("one", Units::Lines), 1);
        assert_eq!(measure("one\ntwo", Units::Lines), 2);
        assert_eq!(measure("one\n", Units::Lines), 2);
    }

    #[test]
    fn over_limit_is_strict() {
        assert!(!is_over_limit("abc", &delim(3, Units::Characters)));
        assert!(is_over_limit("abcd", &delim(3, Units::Characters)));
    }

    #[test]
    fn truncate_within_limit_borrows() {
        let out = truncate("short", &delim(10, Units::Characters));
        assert!(matches!(out, Cow::Borrowed("short")));
    }

    #[test]
    fn truncate_characters() {
        assert_eq!(truncate("héllo world", &delim(5, Units::Characters)), "héllo");
    }

    #[test]
    fn truncate_characters_never_splits_a_surrogate_pair() {
        assert_eq!(truncate("a😀b", &delim(2, Units::Characters)), "a");
        assert_eq!(truncate("a😀b", &delim(3, Units::Characters)), "a😀");
        assert_eq!(truncate("😀😀😀", &delim(4, Units::Characters)), "😀😀");
        assert_eq!(truncate("😀", &delim(1, Units::Characters)), "");
    }

    #[test]
    fn truncate_bytes_never_splits_a_code_point() {
        assert_eq!(truncate("a😀b", &delim(3, Units::Bytes)), "a");
        assert_eq!(truncate("a😀b", &delim(5, Units::Bytes)), "a😀");
        assert_eq!(truncate("éé", &delim(3, Units::Bytes)), "é");
        assert_eq!(truncate("😀", &delim(0, Units::Bytes)), "");
    }

    #[test]
    fn truncate_lines_rejoins() {
        let text = "fn main() {\n    run();\n}\n";
        assert_eq!(truncate(text, &delim(2, Units::Lines)), "fn main() {\n    run();");
        assert_eq!(truncate("a\nb\nc", &delim(0, Units::Lines)), "");
    }

    #[test]
    fn truncated_output_is_never_over_limit() {
        let samples = ["", "plain", "ünïcødé 😀😀 text", "a\nb\n\nc\n", "𝄞𝄞𝄞"];
        for sample in samples {
            for &units in Units::all() {
                for limit in 0..8 {
                    let d = delim(limit, units);
                    let out = truncate(sample, &d);
                    // `""` measures one line, so a zero line budget cannot be met.
                    if !(units == Units::Lines && limit == 0) {
                        assert!(!is_over_limit(&out, &d), "{sample:?} {d}");
                    }
                    assert!(sample.starts_with(out.as_ref()));
                }
            }
        }
    }
}
