use super::*;
use crate::assets::source::MemoryAssetSource;

fn svg(color: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32"><rect width="32" height="32" fill="{color}"/></svg>"#
    )
}

#[test]
fn load_keeps_discovery_order_and_allows_empty_categories() {
    let mut source = MemoryAssetSource::new();
    source.insert(Category::Head, "b.svg", svg("red")).unwrap();
    source.insert(Category::Head, "a.svg", svg("blue")).unwrap();
    source.insert(Category::Eye, "c.svg", svg("green")).unwrap();

    let catalog = load_catalog(&source).unwrap();
    assert_eq!(catalog.len(Category::Head), 2);
    assert_eq!(catalog.len(Category::Eye), 1);
    assert_eq!(catalog.len(Category::Eyebrow), 0);
    assert_eq!(catalog.total(), 3);

    let heads: Vec<&str> = catalog
        .assets(Category::Head)
        .iter()
        .map(|a| a.reference.as_str())
        .collect();
    assert_eq!(heads, ["head/b.svg", "head/a.svg"]);
    assert!(catalog.get(Category::Mouth, 0).is_none());
    assert_eq!(catalog.counts().values(), &[2, 0, 1, 0, 0]);
}

#[test]
fn single_fetch_failure_fails_the_whole_load() {
    let mut source = MemoryAssetSource::new();
    source.insert(Category::Head, "ok.svg", svg("red")).unwrap();
    source.insert_missing(Category::Detail, "gone.svg").unwrap();

    let err = load_catalog(&source).unwrap_err();
    assert!(matches!(err, MojiError::Load(_)), "{err}");
}

#[test]
fn malformed_svg_fails_the_whole_load() {
    let mut source = MemoryAssetSource::new();
    source.insert(Category::Mouth, "broken.svg", "<svg").unwrap();

    let err = load_catalog(&source).unwrap_err();
    assert!(err.to_string().contains("mouth/broken.svg"), "{err}");
}
