//! Error Extension Tests

use mhs_domain::error::{Error, Result};
use mhs_infrastructure::error_ext::ErrorContext;
use std::io;

#[test]
fn test_error_context_extension() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).io_context("failed to read file");

    if let Err(Error::Io { source, message }) = result {
        assert!(message.contains("failed to read file"));
        assert!(source.is_some());
    } else {
        panic!("Expected Io error");
    }
}

#[test]
fn test_config_context_keeps_source() {
    let parse_error = "nope".parse::<u16>().expect_err("not a number");

    let error = Err::<u16, _>(parse_error)
        .config_context("invalid port")
        .expect_err("error expected");

    assert!(error.is_configuration());
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_plain_context_is_internal() {
    let error = Err::<(), _>(io::Error::other("boom"))
        .context("while wiring scope")
        .expect_err("error expected");

    match error {
        Error::Internal { message } => assert_eq!(message, "while wiring scope: boom"),
        other => panic!("Expected Internal error, got {other:?}"),
    }
}
