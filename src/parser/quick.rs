use super::blocks::{split_blocks, strip_markers};
use crate::model::QuickRecipeMap;

/// Parse the quick recipe document into a title → instructions map.
///
/// The body lines of a block are joined with newlines; bullet prefixes from
/// the document are kept. A title without body maps to an empty string.
pub fn parse_quick_recipes(text: &str) -> QuickRecipeMap {
    let mut quick_recipes = QuickRecipeMap::new();

    for block in split_blocks(text) {
        let Some((first, body)) = block.split_first() else {
            continue;
        };
        let (title, _) = strip_markers(first);
        if title.is_empty() {
            continue;
        }

        let value = body.join("\n").trim().to_string();
        quick_recipes.insert(title.to_string(), value);
    }

    quick_recipes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quick_recipes() {
        let text = "Salmon Quick_Recipe\nOven: 425\n15 min\n\nTilapia\nPan fry 4 min per side";
        let map = parse_quick_recipes(text);
        assert_eq!(map.len(), 2);
        assert_eq!(map["Salmon"], "Oven: 425\n15 min");
        assert_eq!(map["Tilapia"], "Pan fry 4 min per side");
    }

    #[test]
    fn test_title_without_body_registers_empty_string() {
        let map = parse_quick_recipes("Meatloaf\n\nSalmon\nBake");
        assert_eq!(map["Meatloaf"], "");
        assert_eq!(map["Salmon"], "Bake");
    }

    #[test]
    fn test_empty_title_is_skipped() {
        let map = parse_quick_recipes("Quick_Recipe\nBake at 350\n\nSalmon\nBake");
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("Salmon"));
    }

    #[test]
    fn test_bullets_are_preserved() {
        let text = "Salmon\n- Oven: 425\n  - skin side down\n- 15 min";
        let map = parse_quick_recipes(text);
        assert_eq!(map["Salmon"], "- Oven: 425\n  - skin side down\n- 15 min");
    }

    #[test]
    fn test_instruction_ending_in_recipe_stays_in_body() {
        let map = parse_quick_recipes("Salmon\nOven: 425\nsame as the chicken recipe\n15 min");
        assert_eq!(map.len(), 1);
        assert_eq!(map["Salmon"], "Oven: 425\nsame as the chicken recipe\n15 min");
    }

    #[test]
    fn test_duplicate_title_last_wins() {
        let map = parse_quick_recipes("Salmon\nold\n\nSalmon\nnew");
        assert_eq!(map["Salmon"], "new");
    }
}
