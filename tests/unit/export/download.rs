use super::*;

#[test]
fn file_name_has_prefix_timestamp_and_extension() {
    assert_eq!(
        export_file_name("emoji", 1_700_000_000_123, "png"),
        "emoji_1700000000123.png"
    );
    assert_eq!(export_file_name("face", 5, "svg"), "face_5.svg");
}

#[test]
fn unix_millis_is_after_2020() {
    assert!(unix_millis().unwrap() > 1_577_836_800_000);
}

#[test]
fn write_into_creates_directory() {
    let dir = std::env::temp_dir().join(format!(
        "moji_download_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let download = Download {
        file_name: "emoji_1.svg".to_string(),
        content_type: "image/svg+xml",
        bytes: b"<svg/>".to_vec(),
    };

    let path = download.write_into(&dir.join("nested")).unwrap();
    assert_eq!(path.file_name().unwrap(), "emoji_1.svg");
    assert_eq!(std::fs::read(&path).unwrap(), b"<svg/>");

    std::fs::remove_dir_all(&dir).ok();
}
