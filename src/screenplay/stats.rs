/*!
 * Script statistics.
 *
 * Per-scene element tallies for diagnostics. Read-only over a finished scene
 * list; the `Display` impl renders the human-readable report.
 */

use std::fmt;

use serde::Serialize;

use super::model::{ElementKind, ParsedScript, Scene};

/// Element counts for one scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneStats {
    pub scene_number: usize,
    pub heading: String,
    pub elements: usize,
    pub dialogue: usize,
    pub action: usize,
    pub shots: usize,
    pub sounds: usize,
    pub graphics: usize,
    pub music_cues: usize,
    pub supers: usize,
}

impl SceneStats {
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            scene_number: scene.scene_number,
            heading: scene.heading.clone(),
            elements: scene.elements.len(),
            dialogue: scene.count_of(ElementKind::Dialogue),
            action: scene.count_of(ElementKind::Action),
            shots: scene.count_of(ElementKind::Shot),
            sounds: scene.count_of(ElementKind::Sound),
            graphics: scene.count_of(ElementKind::Graphic),
            music_cues: scene.count_of(ElementKind::MusicCue),
            supers: scene.count_of(ElementKind::Super),
        }
    }
}

/// Statistics for a whole script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptStats {
    /// Number of scenes, not counting the metadata entry
    pub scene_count: usize,
    pub scenes: Vec<SceneStats>,
}

impl ScriptStats {
    pub fn from_script(script: &ParsedScript) -> Self {
        Self {
            scene_count: script.scene_count(),
            scenes: script.scenes.iter().map(SceneStats::from_scene).collect(),
        }
    }

    /// Total number of elements across all scenes
    pub fn total_elements(&self) -> usize {
        self.scenes.iter().map(|s| s.elements).sum()
    }
}

impl fmt::Display for ScriptStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "--- Script Statistics ---")?;
        writeln!(f, "Number of Scenes: {}", self.scene_count)?;

        if self.scenes.is_empty() {
            return writeln!(f, "No scenes found in the script.");
        }

        for scene in &self.scenes {
            writeln!(f)?;
            writeln!(f, "Scene {}: {}", scene.scene_number, scene.heading)?;
            writeln!(f, "  Number of Elements: {}", scene.elements)?;
            writeln!(f, "    - Dialogue Lines: {}", scene.dialogue)?;
            writeln!(f, "    - Action Lines: {}", scene.action)?;
            writeln!(f, "    - Shots: {}", scene.shots)?;
            writeln!(f, "    - Sound Effects: {}", scene.sounds)?;
            writeln!(f, "    - Graphics: {}", scene.graphics)?;
            writeln!(f, "    - Music Cues: {}", scene.music_cues)?;
            writeln!(f, "    - On-Screen Text: {}", scene.supers)?;
        }

        Ok(())
    }
}

/// Render the statistics report for a scene list
pub fn format_script_stats(script: &ParsedScript) -> String {
    ScriptStats::from_script(script).to_string()
}
