use super::*;

#[test]
fn category_order_is_head_to_detail() {
    let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    assert_eq!(names, ["head", "eyebrow", "eye", "mouth", "detail"]);
    for (i, c) in Category::ALL.iter().enumerate() {
        assert_eq!(c.index(), i);
    }
}

#[test]
fn category_parses_names_dirs_and_legacy_spelling() {
    assert_eq!("head".parse::<Category>().unwrap(), Category::Head);
    assert_eq!("Eyes".parse::<Category>().unwrap(), Category::Eye);
    assert_eq!("details".parse::<Category>().unwrap(), Category::Detail);
    assert_eq!("eyebow".parse::<Category>().unwrap(), Category::Eyebrow);
    assert!("nose".parse::<Category>().is_err());
}

#[test]
fn category_serde_uses_lowercase_and_accepts_alias() {
    let json = serde_json::to_string(&Category::Eyebrow).unwrap();
    assert_eq!(json, "\"eyebrow\"");
    let parsed: Category = serde_json::from_str("\"eyebow\"").unwrap();
    assert_eq!(parsed, Category::Eyebrow);
}

#[test]
fn category_map_indexes_by_category() {
    let mut m = CategoryMap::from_fn(|c| c.index() * 10);
    assert_eq!(m[Category::Mouth], 30);
    m[Category::Mouth] = 7;
    assert_eq!(m.values(), &[0, 10, 20, 7, 40]);

    let doubled = m.map(|_, v| v * 2);
    assert_eq!(doubled[Category::Detail], 80);

    let cats: Vec<Category> = m.iter().map(|(c, _)| c).collect();
    assert_eq!(cats, Category::ALL);
}

#[test]
fn normalize_path_cross_platform() {
    assert_eq!(normalize_rel_path("a/b.svg").unwrap(), "a/b.svg");
    assert_eq!(normalize_rel_path("a\\b.svg").unwrap(), "a/b.svg");
    assert_eq!(normalize_rel_path("./a//b.svg").unwrap(), "a/b.svg");
    assert!(normalize_rel_path("../x.svg").is_err());
    assert!(normalize_rel_path("/x.svg").is_err());
    assert!(normalize_rel_path("").is_err());
}
