use super::*;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "moji_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn asset_ref_normalizes_and_labels() {
    let a = AssetRef::new("eyes\\round.svg").unwrap();
    assert_eq!(a.as_str(), "eyes/round.svg");
    assert_eq!(a.file_name(), "round.svg");
    assert!(AssetRef::new("../escape.svg").is_err());
}

#[test]
fn dir_source_discovers_sorted_svgs_only() {
    let tmp = temp_dir("dir_source_discover");
    let eyes = tmp.join("eyes");
    std::fs::create_dir_all(&eyes).unwrap();
    std::fs::write(eyes.join("b.svg"), "<svg/>").unwrap();
    std::fs::write(eyes.join("a.svg"), "<svg/>").unwrap();
    std::fs::write(eyes.join("notes.txt"), "skip").unwrap();

    let source = DirAssetSource::new(&tmp);
    let found = source.discover(Category::Eye).unwrap();
    let names: Vec<&str> = found.iter().map(|a| a.as_str()).collect();
    assert_eq!(names, ["eyes/a.svg", "eyes/b.svg"]);

    assert_eq!(source.fetch(&found[0]).unwrap(), b"<svg/>");

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn dir_source_missing_category_dir_is_empty() {
    let tmp = temp_dir("dir_source_missing");
    std::fs::create_dir_all(&tmp).unwrap();

    let source = DirAssetSource::new(&tmp);
    assert!(source.discover(Category::Detail).unwrap().is_empty());

    let ghost = AssetRef::new("details/ghost.svg").unwrap();
    assert!(source.fetch(&ghost).is_err());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn memory_source_keeps_insertion_order_and_dedups() {
    let mut source = MemoryAssetSource::new();
    source.insert(Category::Head, "z.svg", "<svg/>").unwrap();
    source.insert(Category::Head, "a.svg", "<svg/>").unwrap();
    source.insert(Category::Head, "z.svg", "<svg id='v2'/>").unwrap();

    let found = source.discover(Category::Head).unwrap();
    let names: Vec<&str> = found.iter().map(|a| a.as_str()).collect();
    assert_eq!(names, ["head/z.svg", "head/a.svg"]);
    assert_eq!(source.fetch(&found[0]).unwrap(), b"<svg id='v2'/>");

    let missing = source.insert_missing(Category::Mouth, "gone.svg").unwrap();
    assert!(matches!(source.fetch(&missing), Err(MojiError::Load(_))));
}
