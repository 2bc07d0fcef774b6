use super::*;
use std::error::Error as StdError;
use std::path::PathBuf;

#[test]
fn test_ambiguous_selector_error() {
    let error = Error::AmbiguousSelector;

    assert_eq!(
        error.to_string(),
        "no installation selector provided; supply an installation id, repository, organization or user"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_key_unreadable_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error = Error::KeyUnreadable(PathBuf::from("/tmp/app.pem"), io_error);

    assert_eq!(
        error.to_string(),
        "failed to read private key file /tmp/app.pem"
    );
    assert!(error.source().is_some());
}

#[test]
fn test_key_malformed_error() {
    let jwt_error = jsonwebtoken::EncodingKey::from_rsa_pem(b"not a key").unwrap_err();
    let error = Error::KeyMalformed(PathBuf::from("/tmp/app.pem"), jwt_error);

    assert_eq!(
        error.to_string(),
        "private key file /tmp/app.pem is not a PEM encoded RSA private key"
    );
    assert!(error.source().is_some());
}

#[test]
fn test_invalid_api_base_error() {
    let parse_error = url::Url::parse("https://").unwrap_err();
    let error = Error::from(parse_error);

    assert!(matches!(error, Error::InvalidApiBase(_)));
    assert!(error.to_string().starts_with("invalid API base URL"));
}

#[test]
fn test_client_build_error() {
    let error = Error::ClientBuild("builder rejected configuration".to_string());

    assert_eq!(
        error.to_string(),
        "failed to build the GitHub API client: builder rejected configuration"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_error_is_send_sync() {
    // This test verifies that Error implements Send and Sync traits
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
