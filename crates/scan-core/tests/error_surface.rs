use scan_core::errors::{ErrorInfo, ScanError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("key", "block:var1")
        .with_context("reason", "example")
}

#[test]
fn invalid_parameter_surface() {
    let err = ScanError::InvalidParameter(sample_info("P001", "min exceeds max"));
    assert_eq!(err.code(), "P001");
    assert!(err.info().context.contains_key("key"));
}

#[test]
fn sample_count_surface() {
    let err = ScanError::InvalidSampleCount(sample_info("N001", "zero samples"));
    assert_eq!(err.info().code, "N001");
}

#[test]
fn directory_surface() {
    let err = ScanError::DirectoryCreation(sample_info("D001", "permission denied"));
    assert!(err.to_string().starts_with("directory creation failed"));
}

#[test]
fn merge_surface() {
    let err = ScanError::TemplateMerge(sample_info("M001", "malformed key"));
    assert_eq!(err.info().code, "M001");
}

#[test]
fn display_includes_context_and_hint() {
    let info = ErrorInfo::new("X1", "boom")
        .with_context("a", "1")
        .with_hint("try again");
    let text = ScanError::Deck(info).to_string();
    assert_eq!(text, "deck error: boom [X1] (a=1); hint: try again");

    let bare = ScanError::Io(ErrorInfo::new("io-read", "missing")).to_string();
    assert_eq!(bare, "io error: missing [io-read]");

    let two = ErrorInfo::new("deck-parse", "bad line")
        .with_context("line", "3")
        .with_context("block", "control");
    assert_eq!(two.to_string(), "bad line [deck-parse] (block=control, line=3)");
}

#[test]
fn errors_serialize_by_family() {
    let err = ScanError::Io(ErrorInfo::new("io-write", "disk full"));
    let json = serde_json::to_value(&err).expect("json");
    assert_eq!(json["family"], "Io");
    assert_eq!(json["detail"]["code"], "io-write");
    let back: ScanError = serde_json::from_value(json).expect("decode");
    assert_eq!(back, err);
}
