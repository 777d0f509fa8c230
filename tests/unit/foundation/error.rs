use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LuxelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LuxelError::invariant("x")
            .to_string()
            .contains("invariant violation:")
    );
    assert!(
        LuxelError::decode("a.png", "bad magic")
            .to_string()
            .contains("decode error for 'a.png':")
    );
}

#[test]
fn not_found_lists_searched_directories() {
    let err = LuxelError::not_found(
        "env.hdr",
        vec!["textures".to_string(), "/opt/shared".to_string()],
    );
    let msg = err.to_string();
    assert!(msg.contains("env.hdr"));
    assert!(msg.contains("textures, /opt/shared"));

    let bare = LuxelError::not_found("env.hdr", vec![]);
    assert!(bare.to_string().contains("<no search paths>"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LuxelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
