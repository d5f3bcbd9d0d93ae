//! Tests for the HTTP parser.

#[cfg(test)]
mod tests {
    use crate::parser::{parse_request, parse_response, Error, HttpRequest, Method, DEFAULT_VERSION};

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.uri, b"/index.html");
        assert_eq!(result.version, "HTTP/1.1");
    }

    #[test]
    fn test_header_lines_are_not_interpreted() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert!(result.headers.is_empty());
        assert!(result.get_header("Host").is_none());
    }

    #[test]
    fn test_missing_version_uses_default() {
        let request = b"GET /index.html\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.uri, b"/index.html");
        assert_eq!(result.version, DEFAULT_VERSION);
        assert_eq!(result.version, "2.0");
    }

    #[test]
    fn test_trailing_space_uses_default_version() {
        let result = parse_request(b"GET / \r\n").unwrap();
        assert_eq!(result.uri, b"/");
        assert_eq!(result.version, "2.0");
    }

    #[test]
    fn test_request_line_without_terminator() {
        let result = parse_request(b"OPTIONS * HTTP/1.0").unwrap();
        assert_eq!(result.method, Method::OPTIONS);
        assert_eq!(result.uri, b"*");
        assert_eq!(result.version, "HTTP/1.0");
    }

    #[test]
    fn test_unknown_method_is_kept_verbatim() {
        let result = parse_request(b"BREW /pot HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(result.method, Method::Other("BREW".to_string()));
        assert_eq!(result.method.to_string(), "BREW");
    }

    #[test]
    fn test_method_matching_is_case_sensitive() {
        let result = parse_request(b"get /index.html HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(result.method, Method::Other("get".to_string()));
    }

    #[test]
    fn test_extra_tokens_are_ignored() {
        let result = parse_request(b"GET /a HTTP/1.1 trailing junk\r\n").unwrap();
        assert_eq!(result.uri, b"/a");
        assert_eq!(result.version, "HTTP/1.1");
    }

    #[test]
    fn test_double_space_yields_empty_uri() {
        // Tokens are split on single spaces, so the second token is empty
        let result = parse_request(b"GET  /index.html HTTP/1.1\r\n").unwrap();
        assert_eq!(result.uri, b"");
        assert_eq!(result.version, "/index.html");
    }

    #[test]
    fn test_uri_is_not_decoded() {
        let result = parse_request(b"GET /my%20file.txt?x=1&y=2 HTTP/1.1\r\n").unwrap();
        assert_eq!(result.uri, b"/my%20file.txt?x=1&y=2");
    }

    #[test]
    fn test_empty_request() {
        let result = parse_request(b"");
        assert!(matches!(result, Err(Error::EmptyRequest)));
    }

    #[test]
    fn test_incomplete_request_line() {
        let result = parse_request(b"GET\r\nHost: example.com\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedRequest(ref line)) if line == "GET"));
    }

    #[test]
    fn test_blank_request_line() {
        let result = parse_request(b"\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedRequest(_))));
    }

    #[test]
    fn test_empty_method_token() {
        let result = parse_request(b" /index.html HTTP/1.1\r\n");
        assert!(matches!(result, Err(Error::MalformedRequest(_))));
    }

    #[test]
    fn test_non_utf8_uri_is_kept_as_bytes() {
        let result = parse_request(b"GET /caf\xE9.txt HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.uri, b"/caf\xE9.txt");
        assert_eq!(result.uri_lossy(), "/caf\u{FFFD}.txt");
        assert_eq!(result.version, "HTTP/1.1");
    }

    #[test]
    fn test_malformed_utf8_in_method() {
        let result = parse_request(b"G\xFFT / HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedRequest(ref s)) if s == "Invalid UTF-8"));
    }

    #[test]
    fn test_malformed_utf8_after_request_line_is_ignored() {
        let result = parse_request(b"GET / HTTP/1.1\r\nX-Test: \xFF\xFF\r\n\r\n").unwrap();
        assert_eq!(result.method, Method::GET);
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::GET.to_string(), "GET");
        assert_eq!(Method::OPTIONS.to_string(), "OPTIONS");
        assert_eq!("PATCH".parse::<Method>().unwrap().to_string(), "PATCH");
    }

    #[test]
    fn test_http_request_new() {
        let request = HttpRequest::new(Method::GET, "/", "2.0");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.uri, b"/");
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_parse_response() {
        let response = b"HTTP/2.0 404 Not Found\r\nServer: Flying Potato\r\nX-Extra: a:b\r\n\r\n<h1> 404 Not Found </h1>";
        let result = parse_response(response).unwrap();
        assert_eq!(result.version, "2.0");
        assert_eq!(result.status, 404);
        assert_eq!(result.reason, "Not Found");
        assert_eq!(
            result.headers,
            vec![
                ("Server".to_string(), "Flying Potato".to_string()),
                ("X-Extra".to_string(), "a:b".to_string()),
            ]
        );
        assert_eq!(result.get_header("server"), Some("Flying Potato"));
        assert_eq!(result.body, b"<h1> 404 Not Found </h1>");
    }

    #[test]
    fn test_parse_response_keeps_body_crlf() {
        let response = b"HTTP/1.1 200 OK\r\n\r\nline one\r\n\r\nline two";
        let result = parse_response(response).unwrap();
        assert!(result.headers.is_empty());
        assert_eq!(result.body, b"line one\r\n\r\nline two");
    }

    #[test]
    fn test_parse_response_errors() {
        assert!(matches!(parse_response(b""), Err(Error::EmptyRequest)));
        assert!(matches!(
            parse_response(b"HTTP/2.0 200 OK\r\n"),
            Err(Error::MalformedStatusLine(_))
        ));
        assert!(matches!(
            parse_response(b"HTTX/2.0 200 OK\r\n\r\n"),
            Err(Error::MalformedStatusLine(_))
        ));
        assert!(matches!(
            parse_response(b"HTTP/2.0 2000 OK\r\n\r\n"),
            Err(Error::InvalidStatusCode(ref c)) if c == "2000"
        ));
        assert!(matches!(
            parse_response(b"HTTP/2.0 abc OK\r\n\r\n"),
            Err(Error::InvalidStatusCode(_))
        ));
        assert!(matches!(
            parse_response(b"HTTP/2.0 200 OK\r\nNoColon\r\n\r\n"),
            Err(Error::InvalidHeaderFormat(ref h)) if h == "NoColon"
        ));
    }
}
