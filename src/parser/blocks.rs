use regex::Regex;
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s)]+").expect("Invalid URL pattern"));

static NOTE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^notes?\b\s*:?\s*").expect("Invalid note pattern"));

// Matches one trailing marker: "Recipe", "Quick_Recipe" or "Quick Recipe".
static TRAILING_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s+)(quick[_ ]recipe|recipe)\s*$").expect("Invalid marker pattern")
});

/// A title line with its markers removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Title {
    pub text: String,
    pub quick_marker: bool,
    pub link: Option<String>,
}

/// Split text into blocks of non-blank lines.
///
/// Lines keep their leading whitespace (bullet nesting) but lose trailing
/// whitespace. Without a blank line, a marker line opens a new block only
/// when the current block already has a link or note and the marker line is
/// followed by its own link or note.
pub(crate) fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }

        let next_is_detail = lines.get(i + 1).is_some_and(|next| is_detail(next));
        if next_is_detail && current.iter().any(|l| is_detail(l)) && is_title_line(line) {
            blocks.push(std::mem::take(&mut current));
        }
        current.push(raw.trim_end());
    }

    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn is_detail(line: &str) -> bool {
    find_url(line).is_some() || note_text(line).is_some()
}

fn is_title_line(line: &str) -> bool {
    if is_detail(line) || line.starts_with("- ") || line.starts_with("* ") {
        return false;
    }
    TRAILING_MARKER.is_match(line) && !strip_markers(line).0.is_empty()
}

/// Parse a block's first line into a title.
pub(crate) fn parse_title(line: &str) -> Title {
    let line = line.trim();
    let (without_url, link) = match URL_PATTERN.find(line) {
        Some(m) => {
            let rest = format!("{} {}", &line[..m.start()], &line[m.end()..]);
            (rest.trim().to_string(), Some(m.as_str().to_string()))
        }
        None => (line.to_string(), None),
    };

    let (text, quick_marker) = strip_markers(&without_url);
    Title {
        text: text.to_string(),
        quick_marker,
        link,
    }
}

/// Remove trailing markers, reporting whether one of them was a quick recipe marker.
pub(crate) fn strip_markers(line: &str) -> (&str, bool) {
    let mut title = line.trim();
    let mut quick_marker = false;

    while let Some(caps) = TRAILING_MARKER.captures(title) {
        let (Some(whole), Some(marker)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        if marker.as_str().to_lowercase().starts_with("quick") {
            quick_marker = true;
        }
        title = title[..whole.start()].trim_end();
    }

    (title, quick_marker)
}

/// First URL in the line, if any
pub(crate) fn find_url(line: &str) -> Option<&str> {
    URL_PATTERN.find(line).map(|m| m.as_str())
}

/// Text after a `Note:` prefix, or `None` if the line is not a note
pub(crate) fn note_text(line: &str) -> Option<&str> {
    let line = line.trim();
    NOTE_PREFIX.find(line).map(|m| line[m.end()..].trim())
}
