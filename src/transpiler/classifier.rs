use once_cell::sync::Lazy;
use regex::Regex;

/// `speaker: what`, where the speaker is a plain alphanumeric identifier.
static DIALOG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([a-zA-Z0-9]+):(.*)$").unwrap()
});

const PAUSE_MARKER: &str = "---";

/// What a single line of a story script means to the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `# Text`, carrying the trimmed heading text
    Heading1(&'a str),
    /// `## Text`, carrying the trimmed heading text
    Heading2(&'a str),
    Dialogue(Dialogue),
    Pause,
    /// Any other non-blank line, trimmed
    Comment(&'a str),
    Blank,
}

/// A parsed `speaker: utterance` line.
///
/// The utterance is already escaped for use inside a C# string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialogue {
    pub speaker: String,
    pub utterance: String,
}

impl Dialogue {
    /// Lines written as `(...)` are spoken with reverb (thoughts, echoes).
    pub fn is_reverb(&self) -> bool {
        self.utterance.starts_with('(') && self.utterance.ends_with(')')
    }
}

pub fn classify(line: &str) -> LineKind<'_> {
    if let Some(text) = heading2_text(line) {
        return LineKind::Heading2(text);
    }

    if let Some(text) = heading1_text(line) {
        return LineKind::Heading1(text);
    }

    if let Some(dialogue) = parse_dialogue(line) {
        return LineKind::Dialogue(dialogue);
    }

    let trimmed = line.trim();

    if trimmed == PAUSE_MARKER {
        LineKind::Pause
    } else if trimmed.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Comment(trimmed)
    }
}

fn heading1_text(line: &str) -> Option<&str> {
    line.starts_with("# ").then(|| line[1..].trim())
}

fn heading2_text(line: &str) -> Option<&str> {
    line.starts_with("## ").then(|| line[2..].trim())
}

/// Returns `None` for non-dialogue lines and for dialogue with nothing said.
pub fn parse_dialogue(line: &str) -> Option<Dialogue> {
    let captures = DIALOG_REGEX.captures(line)?;

    let speaker = captures.get(1)?.as_str().trim();
    let utterance = unquote(captures.get(2)?.as_str());

    if utterance.is_empty() {
        return None;
    }

    Some(Dialogue {
        speaker: speaker.to_string(),
        utterance: escape(utterance),
    })
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn unquote(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix('"').unwrap_or(text);
    let text = text.strip_suffix('"').unwrap_or(text);
    text.trim()
}
