/*!
 * Tests for application error types
 */

use stagehand::errors::{AppError, ExtractError, ScriptError};

/// Test error message formatting for interchange errors
#[test]
fn test_script_error_display_withMalformedVariant_shouldFormatMessage() {
    let error = ScriptError::Malformed("act 1 is not an object".to_string());
    assert_eq!(
        error.to_string(),
        "Malformed interchange document: act 1 is not an object"
    );

    let error = ScriptError::InvalidKey {
        context: "scene",
        key: "two".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Invalid scene key in interchange document: two"
    );
}

/// Test error message formatting for extraction errors
#[test]
fn test_extract_error_display_withActNotFound_shouldFormatMessage() {
    let error = ExtractError::ActNotFound(4);
    assert_eq!(error.to_string(), "Act 4 not found in the play");
}

/// Test wrapping typed errors into the application error
#[test]
fn test_app_error_from_withTypedErrors_shouldWrapVariant() {
    let app_error: AppError = ExtractError::ActNotFound(2).into();
    assert!(matches!(app_error, AppError::Extract(_)));
    assert!(app_error.to_string().contains("Act 2 not found"));

    let app_error: AppError = ScriptError::Malformed("bad".to_string()).into();
    assert!(matches!(app_error, AppError::Script(_)));
}

/// Test conversion from IO errors
#[test]
fn test_app_error_from_withIoError_shouldBecomeFileVariant() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let app_error: AppError = io_error.into();

    assert!(matches!(app_error, AppError::File(_)));
    assert!(app_error.to_string().starts_with("File error:"));
}

/// Test conversion from anyhow errors
#[test]
fn test_app_error_from_withAnyhowError_shouldBecomeUnknownVariant() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();

    assert!(matches!(app_error, AppError::Unknown(_)));
    assert_eq!(app_error.to_string(), "Unknown error: something odd");
}
