/*!
 * Bracketed production cues.
 *
 * A bracketed line is sub-classified by substring match against an ordered
 * table. The first entry whose label occurs in the content wins, so the
 * table order is the priority order.
 */

use super::model::Element;

/// One entry of the bracket dispatch table
#[derive(Debug, Clone, Copy)]
pub struct BracketCue {
    /// Substring that selects this cue
    pub label: &'static str,
    /// Builds the element from the bracket-stripped content
    pub build: fn(&str) -> Element,
}

impl BracketCue {
    /// Whether this cue applies to the given bracket content
    pub fn matches(&self, content: &str) -> bool {
        content.contains(self.label)
    }
}

/// Bracket cues in priority order
pub const BRACKET_CUES: &[BracketCue] = &[
    BracketCue { label: "Title card:", build: build_title_card },
    BracketCue { label: "Visual:", build: build_shot },
    BracketCue { label: "Sound effect:", build: build_sound },
    BracketCue { label: "Opening music and animation:", build: build_opening_music },
    BracketCue { label: "Outro music", build: build_outro_music },
    BracketCue { label: "Text on screen:", build: build_super },
    BracketCue { label: "End card", build: build_end_card },
];

/// Whether a trimmed line is a bracketed cue
pub fn is_bracketed(line: &str) -> bool {
    line.starts_with('[') && line.contains(']')
}

/// Strip every leading `[` and trailing `]`
pub fn strip_brackets(line: &str) -> &str {
    line.trim_matches(|c| c == '[' || c == ']')
}

/// Classify a bracketed line, or `None` when no cue label matches
pub fn classify_bracketed(line: &str) -> Option<Element> {
    let content = strip_brackets(line);
    BRACKET_CUES
        .iter()
        .find(|cue| cue.matches(content))
        .map(|cue| (cue.build)(content))
}

// Removes every occurrence of the label, then trims.
fn without_label(content: &str, label: &str) -> String {
    content.replace(label, "").trim().to_string()
}

// Strips one layer of surrounding double quotes.
fn build_title_card(content: &str) -> Element {
    let title = without_label(content, "Title card:");
    let title = title.strip_prefix('"').unwrap_or(&title);
    Element::title_card(title.strip_suffix('"').unwrap_or(title))
}

fn build_shot(content: &str) -> Element {
    Element::shot(without_label(content, "Visual:"))
}

fn build_sound(content: &str) -> Element {
    Element::sound(without_label(content, "Sound effect:"))
}

fn build_opening_music(content: &str) -> Element {
    Element::music_cue(without_label(content, "Opening music and animation:"))
}

fn build_outro_music(_content: &str) -> Element {
    Element::music_cue("Outro music")
}

fn build_super(content: &str) -> Element {
    Element::on_screen_text(without_label(content, "Text on screen:"))
}

fn build_end_card(content: &str) -> Element {
    Element::end_card(content)
}
