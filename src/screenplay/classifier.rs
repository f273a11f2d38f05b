/*!
 * Line classification.
 *
 * Classifies one trimmed script line, with one line of lookahead for
 * narrator cues. Each step reports how many lines it consumed so the scene
 * builder advances its index explicitly.
 */

use log::trace;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::errors::ScriptError;

use super::cues::{classify_bracketed, is_bracketed};
use super::model::{DEFAULT_TONE, Element, FALLBACK_CHARACTER};

/// Speakers recognized in `Name: "..."` lines unless configured otherwise
pub const DEFAULT_SPEAKERS: &[&str] = &["Harmony", "Melody", "Star", "Bubbles"];

/// Prefix of a narrator cue line
pub const NARRATOR_PREFIX: &str = "Narrator";

static SCENE_HEADING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Scene \d+:").expect("Invalid scene heading regex")
});

static TONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((.*?)\)").expect("Invalid tone regex")
});

static QUOTED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""([^"]*)""#).expect("Invalid quoted text regex")
});

static DEFAULT_SPEAKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    build_speaker_regex(DEFAULT_SPEAKERS).expect("Invalid default speaker regex")
});

/// What a classification step produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Start of a new scene, carrying the heading text
    Heading(String),
    /// An element for the current scene
    Element(Element),
    /// Nothing; the line is ignored
    Skip,
}

/// A classification step: outcome plus the number of lines consumed (1 or 2)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub outcome: LineOutcome,
    pub consumed: usize,
}

impl Step {
    fn single(outcome: LineOutcome) -> Self {
        Self { outcome, consumed: 1 }
    }
}

/// Whether a line opens a new scene (`Scene <digits>:`)
pub fn is_scene_heading(line: &str) -> bool {
    SCENE_HEADING_REGEX.is_match(line)
}

/// Heading text of a scene line, or `None` if the line is not a heading
pub fn scene_heading(line: &str) -> Option<String> {
    if !is_scene_heading(line) {
        return None;
    }
    line.split_once(':').map(|(_, heading)| heading.trim().to_string())
}

/// Whether a line is a narrator cue
pub fn is_narrator_cue(line: &str) -> bool {
    line.starts_with(NARRATOR_PREFIX)
}

/// Tone from the first parenthetical on a narrator cue line
pub fn narrator_tone(line: &str) -> String {
    if line.contains('(') && line.contains(')') {
        if let Some(caps) = TONE_REGEX.captures(line) {
            return caps[1].to_string();
        }
    }
    DEFAULT_TONE.to_string()
}

fn build_speaker_regex<S: AsRef<str>>(speakers: &[S]) -> Result<Regex, ScriptError> {
    let mut names = Vec::with_capacity(speakers.len());
    for speaker in speakers {
        let name = speaker.as_ref().trim();
        if name.is_empty() {
            return Err(ScriptError::InvalidSpeaker(speaker.as_ref().to_string()));
        }
        names.push(regex::escape(name));
    }

    let pattern = format!(r"^\s*({})\s*:", names.join("|"));
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ScriptError::InvalidSpeaker(e.to_string()))
}

/// Classifies script lines inside a scene
#[derive(Debug, Clone)]
pub struct LineClassifier {
    // None when no speakers are recognized
    speaker_regex: Option<Regex>,
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self {
            speaker_regex: Some(DEFAULT_SPEAKER_REGEX.clone()),
        }
    }
}

impl LineClassifier {
    /// Create a classifier recognizing the given speaker names
    pub fn with_speakers<S: AsRef<str>>(speakers: &[S]) -> Result<Self, ScriptError> {
        let speaker_regex = if speakers.is_empty() {
            None
        } else {
            Some(build_speaker_regex(speakers)?)
        };
        Ok(Self { speaker_regex })
    }

    /// Classify `lines[index]` assuming a scene is already open.
    ///
    /// Scene headings are recognized here too so the step is usable on its
    /// own; the scene builder handles them before calling in.
    pub fn classify(&self, lines: &[&str], index: usize) -> Step {
        let Some(line) = lines.get(index).copied() else {
            return Step { outcome: LineOutcome::Skip, consumed: 0 };
        };

        if let Some(heading) = scene_heading(line) {
            return Step::single(LineOutcome::Heading(heading));
        }

        if is_bracketed(line) {
            return match classify_bracketed(line) {
                Some(element) => Step::single(LineOutcome::Element(element)),
                None => {
                    trace!("Ignoring unrecognized cue: {}", line);
                    Step::single(LineOutcome::Skip)
                }
            };
        }

        if is_narrator_cue(line) {
            return self.classify_narration(lines, index);
        }

        if let Some(element) = self.classify_quoted(line) {
            return Step::single(LineOutcome::Element(element));
        }

        Step::single(self.classify_action(lines, index))
    }

    fn classify_narration(&self, lines: &[&str], index: usize) -> Step {
        let tone = narrator_tone(lines[index]);

        match lines.get(index + 1).copied() {
            Some(next) if !next.starts_with('[') && !is_narrator_cue(next) && !is_scene_heading(next) => Step {
                outcome: LineOutcome::Element(Element::narration(tone, next)),
                consumed: 2,
            },
            _ => {
                trace!("Narrator cue without text: {}", lines[index]);
                Step::single(LineOutcome::Element(Element::narration(tone, "")))
            }
        }
    }

    fn classify_quoted(&self, line: &str) -> Option<Element> {
        if line.matches('"').count() < 2 {
            return None;
        }

        let text = QUOTED_REGEX.captures(line)?[1].to_string();
        let character = self
            .speaker_regex
            .as_ref()
            .and_then(|re| re.captures(line))
            .map(|caps| caps[1].to_uppercase())
            .unwrap_or_else(|| FALLBACK_CHARACTER.to_string());

        Some(Element::dialogue(character, text))
    }

    fn classify_action(&self, lines: &[&str], index: usize) -> LineOutcome {
        let line = lines[index];
        if line.starts_with('[') || is_narrator_cue(line) {
            return LineOutcome::Skip;
        }

        // A line right after a narrator cue belongs to that cue, never to an action.
        let follows_narrator = index
            .checked_sub(1)
            .and_then(|prev| lines.get(prev))
            .is_none_or(|prev| is_narrator_cue(prev));
        if follows_narrator {
            return LineOutcome::Skip;
        }

        LineOutcome::Element(Element::action(line))
    }
}
