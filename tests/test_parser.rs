use webserver::http::parser::{ParseError, parse_head, parse_request_line, strip_line_terminator};

#[test]
fn test_parse_simple_get_request() {
    let parsed = parse_request_line("GET /index.html HTTP/1.0").unwrap();

    assert_eq!(parsed.method, "GET");
    assert_eq!(parsed.path, "/index.html");
    assert_eq!(parsed.version, "HTTP/1.0");
}

#[test]
fn test_parse_keeps_unknown_method_verbatim() {
    let parsed = parse_request_line("BREW /pot HTTP/1.0").unwrap();

    assert_eq!(parsed.method, "BREW");
    assert!(!parsed.is_get());
}

#[test]
fn test_parse_version_is_not_validated() {
    let parsed = parse_request_line("GET / banana").unwrap();
    assert_eq!(parsed.version, "banana");
}

#[test]
fn test_parse_collapses_repeated_whitespace() {
    let parsed = parse_request_line("GET  /\tHTTP/1.1").unwrap();

    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
}

#[test]
fn test_parse_too_few_tokens() {
    assert_eq!(
        parse_request_line("GET /"),
        Err(ParseError::WrongTokenCount(2))
    );
}

#[test]
fn test_parse_too_many_tokens() {
    assert_eq!(
        parse_request_line("GET / HTTP/1.0 extra"),
        Err(ParseError::WrongTokenCount(4))
    );
}

#[test]
fn test_parse_blank_line() {
    assert_eq!(parse_request_line(""), Err(ParseError::WrongTokenCount(0)));
}

#[test]
fn test_parse_head_uses_first_line() {
    let lines = vec![
        "POST /submit HTTP/1.0".to_string(),
        "Host: example.com".to_string(),
        String::new(),
    ];
    let parsed = parse_head(&lines).unwrap();

    assert_eq!(parsed.method, "POST");
    assert_eq!(parsed.path, "/submit");
}

#[test]
fn test_parse_head_empty() {
    assert_eq!(parse_head(&[]), Err(ParseError::Empty));
}

#[test]
fn test_parse_error_display() {
    assert_eq!(
        ParseError::WrongTokenCount(2).to_string(),
        "request line has 2 tokens, expected 3"
    );
}

#[test]
fn test_strip_line_terminator() {
    assert_eq!(strip_line_terminator(b"GET / HTTP/1.0\r\n"), Some(&b"GET / HTTP/1.0"[..]));
    assert_eq!(strip_line_terminator(b"\r\n"), Some(&b""[..]));
    assert_eq!(strip_line_terminator(b"\n"), Some(&b""[..]));
    assert_eq!(strip_line_terminator(b"partial"), None);
}
