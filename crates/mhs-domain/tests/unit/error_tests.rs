//! Unit tests for domain error types

use mhs_domain::Error;

#[test]
fn test_configuration_error() {
    let error = Error::configuration("bad section");
    assert!(error.is_configuration());
    assert!(!error.is_missing_service());
    assert!(format!("{}", error).contains("bad section"));
}

#[test]
fn test_configuration_error_keeps_source() {
    let source = std::io::Error::other("disk gone");
    let error = Error::configuration_with_source("callback 0 failed", source);
    let source = std::error::Error::source(&error).expect("source should be kept");
    assert!(source.to_string().contains("disk gone"));
}

#[test]
fn test_missing_service_error() {
    let error = Error::missing_service("EchoServer", "server 'echo'");
    match &error {
        Error::MissingService { service, scope } => {
            assert_eq!(service, "EchoServer");
            assert_eq!(scope, "server 'echo'");
        }
        _ => panic!("Expected MissingService error"),
    }
    assert!(error.is_missing_service());
}

#[test]
fn test_unsupported_error() {
    let error = Error::unsupported("build_host");
    assert!(error.is_unsupported());
    assert!(format!("{}", error).contains("build_host"));
}

#[test]
fn test_failure_kinds_are_distinguishable() {
    let errors = [
        Error::configuration("x"),
        Error::missing_service("x", "y"),
        Error::unsupported("x"),
        Error::scope_not_built("x"),
    ];

    for (i, error) in errors.iter().enumerate() {
        let flags = [
            error.is_configuration(),
            error.is_missing_service(),
            error.is_unsupported(),
            error.is_scope_not_built(),
        ];
        assert_eq!(flags.iter().filter(|f| **f).count(), 1);
        assert!(flags[i], "error {} classified wrongly: {:?}", i, error);
    }
}

#[test]
fn test_io_error_conversion() {
    let error: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
    match error {
        Error::Io { message, source } => {
            assert!(message.contains("missing"));
            assert!(source.is_some());
        }
        _ => panic!("Expected Io error"),
    }
}
