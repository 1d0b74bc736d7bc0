use super::*;

#[test]
fn empty_json_yields_defaults() {
    let s: Settings = serde_json::from_str("{}").unwrap();
    assert_eq!(s, Settings::default());
    assert_eq!(s.canvas_size, 640);
    assert_eq!(s.file_prefix, "emoji");
    assert_eq!(s.vector_canvas.view_box, "0 0 32 32");
    s.validate().unwrap();
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let s: Settings =
        serde_json::from_str(r#"{ "canvas_size": 64, "vector_canvas": { "width": 48 } }"#).unwrap();
    assert_eq!(s.canvas_size, 64);
    assert_eq!(s.vector_canvas.width, 48);
    assert_eq!(s.vector_canvas.height, 32);
    assert_eq!(s.canvas(), Canvas::square(64));
}

#[test]
fn validate_rejects_bad_values() {
    let zero = Settings {
        canvas_size: 0,
        ..Settings::default()
    };
    assert!(zero.validate().is_err());

    let huge = Settings {
        canvas_size: 100_000,
        ..Settings::default()
    };
    assert!(huge.validate().is_err());

    let blank = Settings {
        file_prefix: "  ".to_string(),
        ..Settings::default()
    };
    assert!(blank.validate().is_err());
}

#[test]
fn validate_rejects_prefixes_that_leave_the_output_dir() {
    for prefix in ["../x", "a/b", "a\\b", "..", "x..y"] {
        let s = Settings {
            file_prefix: prefix.to_string(),
            ..Settings::default()
        };
        assert!(
            matches!(s.validate(), Err(MojiError::Validation(_))),
            "{prefix}"
        );
    }

    let dotted = Settings {
        file_prefix: "face.v2".to_string(),
        ..Settings::default()
    };
    dotted.validate().unwrap();
}

#[test]
fn from_path_reads_and_validates() {
    let path = std::env::temp_dir().join(format!(
        "moji_settings_{}_{}.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::write(&path, r#"{ "seed": 7, "file_prefix": "face" }"#).unwrap();
    let s = Settings::from_path(&path).unwrap();
    assert_eq!(s.seed, Some(7));
    assert_eq!(s.file_prefix, "face");

    std::fs::write(&path, r#"{ "canvas_size": 0 }"#).unwrap();
    assert!(Settings::from_path(&path).is_err());

    std::fs::remove_file(&path).ok();
}
