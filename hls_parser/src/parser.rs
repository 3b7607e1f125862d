use nom::{
    bytes::complete::{tag, take_till},
    character::complete::char,
    combinator::{opt, recognize, rest},
    sequence::{delimited, pair, preceded},
    IResult,
};

fn tag_name(i: &str) -> IResult<&str, &str> {
    preceded(char('#'), recognize(pair(tag("EXT"), take_till(|c| c == ':'))))(i)
}

/// Splits a trimmed `#EXT...` line into its name and the text after the
/// first colon.
pub fn tag_line(i: &str) -> IResult<&str, (&str, Option<&str>)> {
    pair(tag_name, opt(preceded(char(':'), rest)))(i)
}

fn is_non_string(c: char) -> bool {
    "\"\r\n".contains(c)
}

/// A double-quoted string with no escapes; the first closing quote ends it.
pub fn quoted_string(i: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_till(is_non_string), char('"'))(i)
}

/// The duration part of an `EXTINF` value, up to the optional title.
pub fn extinf_duration(i: &str) -> IResult<&str, &str> {
    take_till(|c| c == ',')(i)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_header_tag() {
        assert_eq!(Ok(("", ("EXTM3U", None))), tag_line("#EXTM3U"));
    }

    #[test]
    fn parses_tag_value() {
        assert_eq!(
            Ok(("", ("EXT-X-VERSION", Some("3")))),
            tag_line("#EXT-X-VERSION:3")
        );
    }

    #[test]
    fn splits_at_first_colon() {
        assert_eq!(
            Ok(("", ("EXT-X-KEY", Some(r#"METHOD=AES-128,URI="https://k/1""#)))),
            tag_line(r#"#EXT-X-KEY:METHOD=AES-128,URI="https://k/1""#)
        );
    }

    #[test]
    fn empty_tag_value() {
        assert_eq!(Ok(("", ("EXTINF", Some("")))), tag_line("#EXTINF:"));
    }

    #[test]
    fn rejects_comments() {
        assert!(tag_line("# EXTM3U").is_err());
        assert!(tag_line("segment.ts").is_err());
    }

    #[test]
    fn parses_quoted_string() {
        assert_eq!(Ok(("", "")), quoted_string(r#""""#));
        assert_eq!(Ok(("", "cool input")), quoted_string(r#""cool input""#));
        assert_eq!(Ok((r#"b""#, "a")), quoted_string(r#""a"b""#));
        assert!(quoted_string(r#""never closed"#).is_err());
    }

    #[test]
    fn parses_duration_name() {
        assert_eq!(Ok((",", "12.345")), extinf_duration("12.345,"));
        assert_eq!(
            Ok((",The rain in Spain", "12.345")),
            extinf_duration("12.345,The rain in Spain")
        );
        assert_eq!(Ok(("", "12.345")), extinf_duration("12.345"));
    }
}
