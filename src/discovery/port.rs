//! Port declaration extraction
//!
//! Marker files declare their port as a source-like assignment, e.g.
//! `port := "8080"`. Extraction is plain text matching, not parsing.

use std::fs;
use std::path::Path;

/// Line prefix that introduces a port declaration (after trimming)
pub const PORT_PREFIX: &str = "port :=";

/// Read a marker file and extract its declared port.
///
/// Returns 0 when the file cannot be read or declares nothing usable.
pub fn extract_port(path: &Path) -> i64 {
    match fs::read(path) {
        Ok(bytes) => port_from_source(&String::from_utf8_lossy(&bytes)),
        Err(_) => 0,
    }
}

/// Extract the declared port from marker file contents.
///
/// The first `port :=` line carrying a quoted value wins. A matching line
/// without a usable pair of quotes is skipped and scanning continues.
pub fn port_from_source(content: &str) -> i64 {
    for line in content.split('\n') {
        let line = line.trim();
        if !line.starts_with(PORT_PREFIX) {
            continue;
        }

        if let (Some(start), Some(end)) = (line.find('"'), line.rfind('"')) {
            if start < end {
                return parse_leading_int(&line[start + 1..end]);
            }
        }
    }

    0
}

/// Parse a leading decimal integer literal, yielding 0 on failure.
///
/// Leading whitespace and one sign are accepted; anything after the digit
/// run is ignored. Underscores are absorbed into the token and invalidate it.
pub fn parse_leading_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let token_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b'_')
        .count();
    let token = &rest[..token_len];

    if token.is_empty() || token.contains('_') {
        return 0;
    }

    let mut value: i64 = 0;
    for digit in token.bytes().map(|b| i64::from(b - b'0')) {
        let next = value
            .checked_mul(10)
            .and_then(|v| if negative { v.checked_sub(digit) } else { v.checked_add(digit) });
        match next {
            Some(v) => value = v,
            None => return 0,
        }
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_from_simple_declaration() {
        let src = "package main\n\nfunc main() {\n\tport := \"8080\"\n}\n";
        assert_eq!(port_from_source(src), 8080);
    }

    #[test]
    fn test_port_first_declaration_wins() {
        let src = "port := \"3000\"\nport := \"4000\"\n";
        assert_eq!(port_from_source(src), 3000);
    }

    #[test]
    fn test_port_declaration_without_quotes_is_skipped() {
        let src = "port := 9000\nport := \"9100\"\n";
        assert_eq!(port_from_source(src), 9100);

        let src = "port := \"9000\nport := \"9200\"\n";
        assert_eq!(port_from_source(src), 9200);
    }

    #[test]
    fn test_port_malformed_value_returns_zero() {
        assert_eq!(port_from_source("port := \"oops\""), 0);
        assert_eq!(port_from_source("port := \"\""), 0);
    }

    #[test]
    fn test_port_zero_is_returned_immediately() {
        // An explicit 0 still ends the scan
        let src = "port := \"0\"\nport := \"7000\"\n";
        assert_eq!(port_from_source(src), 0);
    }

    #[test]
    fn test_port_missing_declaration() {
        assert_eq!(port_from_source(""), 0);
        assert_eq!(port_from_source("func main() {}\n"), 0);
        // Prefix must match exactly after trimming
        assert_eq!(port_from_source("port:= \"8080\""), 0);
        assert_eq!(port_from_source("myport := \"8080\""), 0);
    }

    #[test]
    fn test_port_windows_line_endings() {
        let src = "package main\r\n    port := \"5050\"\r\n";
        assert_eq!(port_from_source(src), 5050);
    }

    #[test]
    fn test_port_uses_outermost_quotes() {
        // Quoted span is `81" // was "80`, the digit run stops at the quote
        assert_eq!(port_from_source(r#"port := "81" // was "80""#), 81);
        assert_eq!(port_from_source(r#"port := "8181" + """#), 8181);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("8080"), 8080);
        assert_eq!(parse_leading_int("  42"), 42);
        assert_eq!(parse_leading_int("12abc"), 12);
        assert_eq!(parse_leading_int("+7"), 7);
        assert_eq!(parse_leading_int("-1"), -1);
        assert_eq!(parse_leading_int("abc"), 0);
        assert_eq!(parse_leading_int("-"), 0);
        assert_eq!(parse_leading_int("1_000"), 0);
        assert_eq!(parse_leading_int("99999999999999999999"), 0);
        assert_eq!(parse_leading_int("-9223372036854775808"), i64::MIN);
    }

    #[test]
    fn test_extract_port_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(extract_port(&dir.path().join("missing.marker")), 0);
    }

    #[test]
    fn test_extract_port_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.marker");
        std::fs::write(&path, "port := \"6060\"\n").unwrap();
        assert_eq!(extract_port(&path), 6060);
    }
}
