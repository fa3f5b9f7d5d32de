use chrono::NaiveDate;

pub const FIELD_DELIMITER: char = '|';
pub const ESCAPE: char = '\\';
pub const DATE_FMT: &str = "%Y-%m-%d";

// escape doubles every backslash and prefixes every delimiter with a backslash.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == ESCAPE || c == FIELD_DELIMITER {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

// unescape keeps the character after each backslash literally; a lone trailing backslash is dropped.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaping = false;
    for c in s.chars() {
        if escaping {
            out.push(c);
            escaping = false;
        } else if c == ESCAPE {
            escaping = true;
        } else {
            out.push(c);
        }
    }
    out
}

// split_fields splits a line on unescaped delimiters, fields are returned still escaped.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut escaping = false;
    for (i, c) in line.char_indices() {
        if escaping {
            escaping = false;
        } else if c == ESCAPE {
            escaping = true;
        } else if c == FIELD_DELIMITER {
            fields.push(&line[start..i]);
            start = i + c.len_utf8();
        }
    }
    fields.push(&line[start..]);
    fields
}

// decode_fields splits and unescapes a line, None when it has fewer than min_fields.
pub fn decode_fields(line: &str, min_fields: usize) -> Option<Vec<String>> {
    let fields = split_fields(line);
    if fields.len() < min_fields {
        return None;
    }
    Some(fields.into_iter().map(unescape).collect())
}

pub fn join_fields(fields: &[String]) -> String {
    fields.join(FIELD_DELIMITER.to_string().as_str())
}

// best-effort number, unparseable or out of 32-bit range text yields 0
pub fn parse_number(s: &str) -> i64 {
    s.parse::<i32>().map(i64::from).unwrap_or(0)
}

// best-effort boolean, anything but a case-insensitive "true" yields false
pub fn parse_bool(s: &str) -> bool {
    s.eq_ignore_ascii_case("true")
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FMT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().flat_map(char::to_lowercase).eq(b.chars().flat_map(char::to_lowercase))
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::utils::text::{contains_ignore_case, decode_fields, eq_ignore_case, escape, format_date, join_fields, parse_bool, parse_date, parse_number, split_fields, unescape};

    #[test]
    fn test_should_escape_delimiter_and_backslash() {
        assert_eq!("A\\|B\\\\C", escape("A|B\\C"));
        assert_eq!("plain", escape("plain"));
        assert_eq!("", escape(""));
    }

    #[test]
    fn test_should_unescape_any_character() {
        assert_eq!("A|B\\C", unescape("A\\|B\\\\C"));
        assert_eq!("abc", unescape("\\a\\b\\c"));
    }

    #[test]
    fn test_should_drop_trailing_backslash() {
        assert_eq!("abc", unescape("abc\\"));
    }

    #[test]
    fn test_should_round_trip_awkward_strings() {
        let samples = vec!["", "|", "\\", "\\|", "||\\\\", "A|B\\C", "trailing\\", "ünï|cødé\\"];
        for s in samples {
            let line = join_fields(&[escape(s), escape(s)]);
            let fields = decode_fields(line.as_str(), 2).expect("should decode");
            assert_eq!(vec![s.to_string(), s.to_string()], fields);
        }
    }

    #[test]
    fn test_should_not_split_on_escaped_delimiter() {
        assert_eq!(vec!["a\\|b", "c"], split_fields("a\\|b|c"));
        assert_eq!(vec!["a\\\\", "b"], split_fields("a\\\\|b"));
    }

    #[test]
    fn test_should_keep_empty_fields() {
        assert_eq!(vec!["", "a", ""], split_fields("|a|"));
        assert_eq!(vec![""], split_fields(""));
    }

    #[test]
    fn test_should_reject_short_lines() {
        assert!(decode_fields("a|b", 3).is_none());
        assert_eq!(Some(vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()]),
                   decode_fields("a|b|c|d", 3));
    }

    #[test]
    fn test_should_parse_number_best_effort() {
        assert_eq!(42, parse_number("42"));
        assert_eq!(-3, parse_number("-3"));
        assert_eq!(0, parse_number("forty"));
        assert_eq!(0, parse_number(" 4"));
        assert_eq!(0, parse_number(""));
        assert_eq!(2147483647, parse_number("2147483647"));
        assert_eq!(0, parse_number("3000000000"));
        assert_eq!(0, parse_number("9223372036854775807"));
    }

    #[test]
    fn test_should_parse_bool_best_effort() {
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("True"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("yes"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_should_parse_and_format_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date");
        assert_eq!("2024-03-05", format_date(date));
        assert_eq!(Some(date), parse_date("2024-03-05"));
        assert_eq!(None, parse_date("05/03/2024"));
        assert_eq!(None, parse_date("2024-02-30"));
    }

    #[test]
    fn test_should_compare_ignoring_case() {
        assert!(eq_ignore_case("ABC-x", "abc-X"));
        assert!(!eq_ignore_case("abc", "abcd"));
        assert!(contains_ignore_case("The Go Programming Language", "go pro"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("Rust", "go"));
    }
}
