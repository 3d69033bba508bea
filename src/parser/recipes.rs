use super::blocks::{find_url, note_text, parse_title, split_blocks};
use crate::model::RecipeEntry;
use log::debug;
use std::collections::HashMap;

/// Parse the main recipe document into entries, in document order.
///
/// Each block's first line is the title. The first URL in the block becomes
/// the link and `Note:` lines become the notes; everything else is ignored.
/// Blocks whose title is empty after marker stripping are skipped. When a
/// title repeats, the later block replaces the earlier one in place.
pub fn parse_recipes(text: &str) -> Vec<RecipeEntry> {
    let mut entries: Vec<RecipeEntry> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for block in split_blocks(text) {
        let Some(entry) = parse_block(&block) else {
            continue;
        };

        match positions.get(&entry.title) {
            Some(&index) => {
                debug!("Duplicate recipe title {:?}, keeping the later block", entry.title);
                entries[index] = entry;
            }
            None => {
                positions.insert(entry.title.clone(), entries.len());
                entries.push(entry);
            }
        }
    }

    entries
}

fn parse_block(lines: &[&str]) -> Option<RecipeEntry> {
    let (first, rest) = lines.split_first()?;
    let title = parse_title(first);
    if title.text.is_empty() {
        debug!("Skipping block without a title: {:?}", first);
        return None;
    }

    let mut link = title.link;
    let mut notes: Vec<&str> = Vec::new();

    for line in rest {
        if let Some(note) = note_text(line) {
            if !note.is_empty() {
                notes.push(note);
            }
        } else if link.is_none() {
            link = find_url(line).map(str::to_string);
        }
    }

    Some(RecipeEntry {
        title: title.text,
        link,
        notes: (!notes.is_empty()).then(|| notes.join("\n")),
        has_quick_recipe: title.quick_marker,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(parse_recipes("").is_empty());
        assert!(parse_recipes("\n\n   \n").is_empty());
    }

    #[test]
    fn test_quick_marker_flag() {
        let entries = parse_recipes("Salmon Quick_Recipe\nOven: 425\n\nTilapia Recipe");
        assert_eq!(entries.len(), 2);
        assert!(entries[0].has_quick_recipe);
        assert!(!entries[1].has_quick_recipe);
    }

    #[test]
    fn test_first_url_wins() {
        let entries = parse_recipes("Pasta\nhttps://first.com\nhttps://second.com");
        assert_eq!(entries[0].link.as_deref(), Some("https://first.com"));
    }

    #[test]
    fn test_url_inside_note_is_not_the_link() {
        let entries = parse_recipes("Pasta\nNote: see https://n.com for sauce");
        assert!(entries[0].link.is_none());
        assert_eq!(entries[0].notes.as_deref(), Some("see https://n.com for sauce"));
    }

    #[test]
    fn test_multiple_note_lines_are_joined() {
        let entries = parse_recipes("Pasta\nNote: less salt\nNote: more basil\nNote:");
        assert_eq!(entries[0].notes.as_deref(), Some("less salt\nmore basil"));
    }

    #[test]
    fn test_body_line_ending_in_recipe_is_not_a_title() {
        let text = "Pasta\nhttp://x.example\nMy grandmother's recipe\n\nSoup\nhttp://s.example";
        let titles: Vec<_> = parse_recipes(text).into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Pasta", "Soup"]);
    }

    #[test]
    fn test_duplicate_title_last_wins_in_first_position() {
        let text = "Soup\nhttp://old\n\nBread\n\nSoup Recipe\nhttp://new";
        let entries = parse_recipes(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Soup");
        assert_eq!(entries[0].link.as_deref(), Some("http://new"));
        assert_eq!(entries[1].title, "Bread");
    }
}
