use recipe_docs::{merge_recipes, parse_quick_recipes, parse_recipes, UrlOverrideMap};

const MAIN_DOC: &str = "Chicken Breast Recipe Quick_Recipe
http://example.com/chicken
Bake at 400F for 30 min

Chicken Noodle Soup Recipe
http://example.com/soup
Note: used rotisserie chicken
";

#[test]
fn test_end_to_end_example() {
    let entries = parse_recipes(MAIN_DOC);

    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].title, "Chicken Breast");
    assert_eq!(entries[0].link.as_deref(), Some("http://example.com/chicken"));
    assert!(entries[0].notes.is_none());
    assert!(entries[0].has_quick_recipe);

    assert_eq!(entries[1].title, "Chicken Noodle Soup");
    assert_eq!(entries[1].link.as_deref(), Some("http://example.com/soup"));
    assert_eq!(entries[1].notes.as_deref(), Some("used rotisserie chicken"));
    assert!(!entries[1].has_quick_recipe);
}

#[test]
fn test_block_count_matches_titled_blocks() {
    let text = "Meatloaf\nsome text\n\nSalmon\n\nTilapia\nhttps://t.example\n\nPork Chops\nNote: brine first";
    assert_eq!(parse_recipes(text).len(), 4);
}

#[test]
fn test_reparsing_is_idempotent() {
    assert_eq!(parse_recipes(MAIN_DOC), parse_recipes(MAIN_DOC));
    assert_eq!(parse_quick_recipes(MAIN_DOC), parse_quick_recipes(MAIN_DOC));
}

#[test]
fn test_block_with_empty_title_is_skipped() {
    let text = "Meatloaf\nhttp://a.example\n\nRecipe\nhttp://b.example\n\nSalmon\nNote: lemon";
    let entries = parse_recipes(text);

    let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Meatloaf", "Salmon"]);
    assert_eq!(entries[0].link.as_deref(), Some("http://a.example"));
}

#[test]
fn test_links_do_not_leak_between_blocks() {
    let text = "Meatloaf\n\nSalmon\nhttps://salmon.example";
    let entries = parse_recipes(text);

    assert!(entries[0].link.is_none());
    assert_eq!(entries[1].link.as_deref(), Some("https://salmon.example"));
}

#[test]
fn test_note_prefix_is_stripped_and_trimmed() {
    let entries = parse_recipes("Salmon\nnote:    a squeeze of lemon   ");
    assert_eq!(entries[0].notes.as_deref(), Some("a squeeze of lemon"));
}

#[test]
fn test_windows_line_endings() {
    let text = MAIN_DOC.replace('\n', "\r\n");
    let entries = parse_recipes(&text);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].notes.as_deref(), Some("used rotisserie chicken"));
}

#[test]
fn test_quick_recipe_titles_join_main_titles() {
    let quick_doc = "Chicken Breast Quick_Recipe\nOven: 400F\n30 min\n\nSalmon\nOven: 425F";
    let entries = parse_recipes(MAIN_DOC);
    let quick = parse_quick_recipes(quick_doc);
    let overrides = UrlOverrideMap::from([(
        "Chicken Noodle Soup".to_string(),
        "https://override.example/soup".to_string(),
    )]);

    let recipes = merge_recipes(&entries, &quick, &overrides);

    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].quick_recipe.as_deref(), Some("Oven: 400F\n30 min"));
    assert_eq!(recipes[0].link.as_deref(), Some("http://example.com/chicken"));
    assert!(recipes[1].quick_recipe.is_none());
    assert_eq!(recipes[1].link.as_deref(), Some("https://override.example/soup"));
    assert_eq!(recipes[1].notes.as_deref(), Some("used rotisserie chicken"));
}
