use super::*;

#[test]
fn test_unexpected_status_message() {
    let err = ResourceError::unexpected_status("create", 201, 409);
    let display = err.to_string();
    assert!(display.contains("201"));
    assert!(display.contains("409"));
    assert!(display.starts_with("create:"));
}

#[test]
fn test_client_error_passes_through_verbatim() {
    let err: ResourceError = ClientError::Network("connection reset".to_string()).into();
    assert_eq!(err.to_string(), "Network error: connection reset");
    assert!(matches!(err, ResourceError::Client(ClientError::Network(_))));
}

#[test]
fn test_not_found() {
    let err = ResourceError::NotFound("etl-job".to_string());
    assert!(err.is_not_found());
    assert!(err.to_string().contains("etl-job"));
}

#[test]
fn test_invalid_spec() {
    let err = ResourceError::invalid_spec("cpus", "must be greater than 0");
    assert!(!err.is_not_found());
    let display = err.to_string();
    assert!(display.contains("cpus"));
    assert!(display.contains("must be greater than 0"));
}

#[test]
fn test_import_unsupported() {
    let err = ResourceError::ImportUnsupported;
    assert!(err.to_string().contains("not supported"));
}
