/*!
 * Scene builder.
 *
 * Runs the metadata scan, then walks the non-blank lines once, opening a
 * scene on every heading and appending classified elements to it. Lines
 * before the first heading are dropped.
 */

use log::{debug, trace};

use crate::errors::ScriptError;

use super::classifier::{LineClassifier, LineOutcome, scene_heading};
use super::metadata::extract_metadata;
use super::model::{ParsedScript, Scene};

/// Screenplay parser. Stateless between calls.
#[derive(Debug, Clone, Default)]
pub struct ScreenplayParser {
    classifier: LineClassifier,
}

impl ScreenplayParser {
    /// Create a parser with the default speaker set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser recognizing a custom speaker set
    pub fn with_speakers<S: AsRef<str>>(speakers: &[S]) -> Result<Self, ScriptError> {
        Ok(Self {
            classifier: LineClassifier::with_speakers(speakers)?,
        })
    }

    /// Parse raw script text into a scene list. Never fails.
    pub fn parse(&self, script_text: &str) -> ParsedScript {
        let mut script = ParsedScript::new(extract_metadata(script_text));
        let lines = Self::content_lines(script_text);

        let mut index = 0;
        while index < lines.len() {
            index += self.step(&lines, index, &mut script);
        }

        debug!(
            "Parsed {} lines into {} scene(s)",
            lines.len(),
            script.scene_count()
        );

        script
    }

    /// Trimmed, non-blank lines of the script
    pub fn content_lines(script_text: &str) -> Vec<&str> {
        script_text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    // Processes lines[index] and returns how many lines it consumed.
    fn step(&self, lines: &[&str], index: usize, script: &mut ParsedScript) -> usize {
        if let Some(heading) = scene_heading(lines[index]) {
            Self::open_scene(script, heading);
            return 1;
        }

        if script.scenes.is_empty() {
            trace!("Dropping line before first scene: {}", lines[index]);
            return 1;
        }

        let step = self.classifier.classify(lines, index);
        match step.outcome {
            LineOutcome::Element(element) => {
                if let Some(scene) = script.scenes.last_mut() {
                    scene.elements.push(element);
                }
            }
            LineOutcome::Heading(heading) => Self::open_scene(script, heading),
            LineOutcome::Skip => {}
        }

        step.consumed.max(1)
    }

    fn open_scene(script: &mut ParsedScript, heading: String) {
        let scene_number = script.scenes.len() + 1;
        debug!("Scene {}: {}", scene_number, heading);
        script.scenes.push(Scene::new(scene_number, heading));
    }
}

/// Parse a script with the default parser
pub fn parse_script_into_scenes(script_text: &str) -> ParsedScript {
    ScreenplayParser::new().parse(script_text)
}
