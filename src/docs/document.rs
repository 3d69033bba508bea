//! The subset of the Google Docs `documents.get` response we read.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub document_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Body,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

/// Only paragraphs carry recipe text; tables and section breaks are skipped
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructuralElement {
    pub paragraph: Option<Paragraph>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub elements: Vec<ParagraphElement>,
    pub bullet: Option<Bullet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bullet {
    #[serde(default)]
    pub nesting_level: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphElement {
    pub text_run: Option<TextRun>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub text_style: TextStyle,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextStyle {
    #[serde(default)]
    pub strikethrough: bool,
    pub link: Option<Link>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Link {
    pub url: Option<String>,
}

/// A hyperlink found in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLink {
    pub text: String,
    pub url: String,
}

impl DocumentLink {
    pub fn is_external(&self) -> bool {
        !self.url.contains("docs.google.com")
    }
}

impl TextRun {
    fn link_url(&self) -> Option<&str> {
        self.text_style.link.as_ref()?.url.as_deref()
    }
}

impl Paragraph {
    fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.elements.iter().filter_map(|e| e.text_run.as_ref())
    }

    /// Paragraph text without struck-through runs, as one line
    fn text(&self) -> String {
        self.text_runs()
            .filter(|run| !run.text_style.strikethrough)
            .map(|run| run.content.as_str())
            .collect::<String>()
            .trim_end_matches(['\n', '\r'])
            .replace(['\n', '\u{000b}'], " ")
    }

    fn to_lines(&self) -> Vec<String> {
        let text = self.text();
        let mut lines = Vec::new();

        match &self.bullet {
            Some(bullet) if !text.trim().is_empty() => {
                let indent = "  ".repeat(bullet.nesting_level);
                lines.push(format!("{}- {}", indent, text.trim()));
            }
            _ => lines.push(text.clone()),
        }

        // Hyperlinked words ("Recipe") become a URL line the text parser can see
        for run in self.text_runs().filter(|run| !run.text_style.strikethrough) {
            if let Some(url) = run.link_url() {
                if !text.contains(url) && !lines.iter().any(|l| l == url) {
                    lines.push(url.to_string());
                }
            }
        }

        lines
    }
}

impl Document {
    /// Flatten the document into plain text, one line per paragraph
    pub fn to_plain_text(&self) -> String {
        self.paragraphs()
            .flat_map(Paragraph::to_lines)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All hyperlinks in the document, struck-through ones included
    pub fn links(&self) -> Vec<DocumentLink> {
        self.paragraphs()
            .flat_map(Paragraph::text_runs)
            .filter_map(|run| {
                Some(DocumentLink {
                    text: run.content.trim().to_string(),
                    url: run.link_url()?.to_string(),
                })
            })
            .collect()
    }

    fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.content.iter().filter_map(|e| e.paragraph.as_ref())
    }
}
