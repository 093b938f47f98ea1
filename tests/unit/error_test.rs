//! Tests for error types

use kraken_rotation::core::RotationError;

#[test]
fn test_not_found_error() {
    let err = RotationError::NotFound("rotation program p1".to_string());
    assert_eq!(format!("{}", err), "not found: rotation program p1");
}

#[test]
fn test_invalid_state_error() {
    let err = RotationError::InvalidState("program p1 is not active".to_string());
    assert_eq!(format!("{}", err), "invalid state: program p1 is not active");
}

#[test]
fn test_conflict_error() {
    let err = RotationError::Conflict("teams already generated for block b1".to_string());
    assert_eq!(
        format!("{}", err),
        "conflict: teams already generated for block b1"
    );
}

#[test]
fn test_data_integrity_error() {
    let err = RotationError::DataIntegrity("enrollment e1 has no resolvable role".to_string());
    assert_eq!(
        format!("{}", err),
        "data integrity: enrollment e1 has no resolvable role"
    );
}

#[test]
fn test_store_error() {
    let err = RotationError::Store("connection failed".to_string());
    assert_eq!(format!("{}", err), "store error: connection failed");
}
