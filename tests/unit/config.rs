use super::*;

fn write(name: &str, body: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/unit_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn defaults_are_valid() {
    let s = RenderSettings::default();
    s.validate().unwrap();
    assert!(!s.quote_caption);
    assert_eq!(
        s.scan_code_url("spotify:album:abc"),
        "https://scannables.scdn.co/uri/plain/png/FFFFFF/black/640/spotify:album:abc"
    );
}

#[test]
fn partial_file_keeps_defaults() {
    let path = write("partial.json", r#"{ "quote_caption": true }"#);
    let s = RenderSettings::from_path(&path).unwrap();
    assert!(s.quote_caption);
    assert_eq!(s.http_timeout_secs, 15);
}

#[test]
fn unknown_fields_are_rejected() {
    let path = write("unknown.json", r#"{ "theme": "dark" }"#);
    let err = RenderSettings::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn endpoint_without_placeholder_is_rejected() {
    let path = write(
        "endpoint.json",
        r#"{ "scan_code_endpoint": "https://example.com/code.png" }"#,
    );
    let err = RenderSettings::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("{uri}"));
}

#[test]
fn env_overrides_apply_and_skip_bad_values() {
    let s = RenderSettings::default().apply_env_from(|key| match key {
        "SLEEVE_SCAN_CODE_ENDPOINT" => Some("http://localhost/{uri}.png".to_string()),
        "SLEEVE_FONT_DIR" => Some("".to_string()),
        "SLEEVE_HTTP_TIMEOUT_SECS" => Some("0".to_string()),
        _ => None,
    });
    assert_eq!(s.scan_code_endpoint, "http://localhost/{uri}.png");
    assert_eq!(s.font_dir, None);
    assert_eq!(s.http_timeout_secs, 15);

    let s = RenderSettings::default()
        .apply_env_from(|key| (key == "SLEEVE_HTTP_TIMEOUT_SECS").then(|| " 40 ".to_string()));
    assert_eq!(s.http_timeout_secs, 40);
}
