//! Endpoint resolution tests

use upcheck::{Endpoint, EndpointError, resolve, validate_format};

#[test]
fn test_scheme_is_discarded() {
    let cases = [("localhost", 9999), ("example.org", 443), ("10.1.2.3", 22), ("db-1.internal", 5432)];

    for (host, port) in cases {
        let expected = Endpoint::new(host, port).unwrap();
        assert_eq!(resolve(&format!("tcp://{host}:{port}")).unwrap(), expected);
        assert_eq!(resolve(&format!("{host}:{port}")).unwrap(), expected);
        assert_eq!(resolve(&format!("https://{host}:{port}")).unwrap(), expected);
    }

    // Internationalised hosts normalise to punycode whatever the scheme
    let bare = resolve("bücher.de:80").unwrap();
    assert_eq!(bare, Endpoint::new("xn--bcher-kva.de", 80).unwrap());
    assert_eq!(resolve("tcp://bücher.de:80").unwrap(), bare);
    assert_eq!(resolve("https://bücher.de:80").unwrap(), bare);
}

#[test]
fn test_https_endpoint_with_default_port() {
    let endpoint = resolve("https://example.org:443").unwrap();
    assert_eq!(endpoint.host(), "example.org");
    assert_eq!(endpoint.port(), 443);
}

#[test]
fn test_no_port_is_invalid_format() {
    let result = resolve("nohostnoport");
    assert!(
        matches!(result, Err(EndpointError::InvalidFormat { ref raw, .. }) if raw == "nohostnoport"),
        "unexpected result: {result:?}"
    );
}

#[test]
fn test_host_is_lowercased() {
    assert_eq!(resolve("tcp://Example.ORG:80").unwrap(), resolve("example.org:80").unwrap());
}

#[test]
fn test_format_validator() {
    assert!(validate_format("examplehost").is_err());
    assert!(validate_format("examplehost:8080").is_ok());
}

#[test]
fn test_display_round_trips_through_resolve() {
    for raw in ["localhost:9", "[::1]:8080", "192.168.0.1:53"] {
        let endpoint = resolve(raw).unwrap();
        assert_eq!(resolve(&endpoint.to_string()).unwrap(), endpoint);
    }
}
