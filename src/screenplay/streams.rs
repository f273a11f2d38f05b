/*!
 * Text streams for downstream tooling.
 *
 * The audio step wants the spoken lines, the image step wants the visual
 * prompts. Both are derived from a finished scene list in script order.
 */

use super::model::{Element, ParsedScript};

/// Prefix the image prompt loader expects on every visual line
pub const VISUAL_PREFIX: &str = "[Visual]";

/// Dialogue and visual streams of a script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptStreams {
    /// `[CHARACTER] text` per spoken line
    pub dialogue: Vec<String>,
    /// `[Visual] description` per shot
    pub visuals: Vec<String>,
}

impl ScriptStreams {
    pub fn from_script(script: &ParsedScript) -> Self {
        let mut streams = Self::default();

        for element in script.elements() {
            match element {
                Element::Dialogue { character, text, .. } if !text.is_empty() => {
                    streams.dialogue.push(format!("[{}] {}", character, text));
                }
                Element::Shot { description } => {
                    streams.visuals.push(format!("{} {}", VISUAL_PREFIX, description));
                }
                _ => {}
            }
        }

        streams
    }

    /// Dialogue stream as file content
    pub fn dialogue_text(&self) -> String {
        self.dialogue.join("\n")
    }

    /// Visual stream as file content
    pub fn visuals_text(&self) -> String {
        self.visuals.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.dialogue.is_empty() && self.visuals.is_empty()
    }
}
