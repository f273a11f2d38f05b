/*!
 * Scene list data model.
 *
 * A parsed script is a metadata record followed by scenes, each scene holding
 * an ordered list of typed elements. On the wire the whole thing is a single
 * JSON array whose first entry is `{"metadata": {...}}` and whose remaining
 * entries are scene objects; `ParsedScript` converts to and from that shape.
 */

use serde::{Deserialize, Serialize};

use crate::errors::ScriptError;

/// Character label used for narration
pub const NARRATOR: &str = "NARRATOR";

/// Modifier attached to every narration line
pub const VOICE_OVER: &str = "V.O.";

/// Tone used when a narrator cue carries no parenthetical
pub const DEFAULT_TONE: &str = "normal";

/// Character label used for quoted lines without a recognized speaker
pub const FALLBACK_CHARACTER: &str = "CHARACTER";

/// Script-wide metadata, stored as the first entry of the scene list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptMetadata {
    /// Title from the `[Title card: "..."]` cue
    #[serde(default)]
    pub title: String,

    /// Series name from the `[Opening music and animation: "..."` cue
    #[serde(default)]
    pub series: String,

    /// Episode number. Never read from the script text.
    #[serde(default = "default_episode")]
    pub episode: u32,
}

impl Default for ScriptMetadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            series: String::new(),
            episode: default_episode(),
        }
    }
}

fn default_episode() -> u32 {
    1
}

/// A numbered scene and its elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// 1-based position in encounter order
    pub scene_number: usize,

    /// Free text after `Scene N:`
    pub heading: String,

    /// `SCENE_<scene_number>`
    pub slug: String,

    /// Elements in script order
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Scene {
    /// Create an empty scene, deriving its slug from the number
    pub fn new(scene_number: usize, heading: impl Into<String>) -> Self {
        Self {
            scene_number,
            heading: heading.into(),
            slug: format!("SCENE_{}", scene_number),
            elements: Vec::new(),
        }
    }

    /// Count the elements of one kind in this scene
    pub fn count_of(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind() == kind).count()
    }
}

/// A single classified script line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// Spoken line, narrated or in character
    Dialogue {
        character: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        modifier: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tone: Option<String>,
        text: String,
    },
    /// Plain descriptive line
    Action { text: String },
    /// `[Visual: ...]`
    Shot { description: String },
    /// `[Sound effect: ...]`
    Sound { description: String },
    /// Opening or outro music
    MusicCue { description: String },
    /// `[Text on screen: ...]`
    Super { content: String },
    /// Title or end card
    Graphic(Graphic),
}

/// Graphic cards, discriminated by `subtype`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "subtype", rename_all = "snake_case")]
pub enum Graphic {
    TitleCard { content: String },
    EndCard { description: String },
}

/// Element discriminant, matching the serialized `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Dialogue,
    Action,
    Shot,
    Sound,
    MusicCue,
    Super,
    Graphic,
}

impl ElementKind {
    /// Serialized `type` value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dialogue => "dialogue",
            Self::Action => "action",
            Self::Shot => "shot",
            Self::Sound => "sound",
            Self::MusicCue => "music_cue",
            Self::Super => "super",
            Self::Graphic => "graphic",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Element {
    /// Narration line with the voice-over modifier
    pub fn narration(tone: impl Into<String>, text: impl Into<String>) -> Self {
        Element::Dialogue {
            character: NARRATOR.to_string(),
            modifier: Some(VOICE_OVER.to_string()),
            tone: Some(tone.into()),
            text: text.into(),
        }
    }

    /// In-character line without modifier or tone
    pub fn dialogue(character: impl Into<String>, text: impl Into<String>) -> Self {
        Element::Dialogue {
            character: character.into(),
            modifier: None,
            tone: None,
            text: text.into(),
        }
    }

    pub fn action(text: impl Into<String>) -> Self {
        Element::Action { text: text.into() }
    }

    pub fn shot(description: impl Into<String>) -> Self {
        Element::Shot { description: description.into() }
    }

    pub fn sound(description: impl Into<String>) -> Self {
        Element::Sound { description: description.into() }
    }

    pub fn music_cue(description: impl Into<String>) -> Self {
        Element::MusicCue { description: description.into() }
    }

    pub fn on_screen_text(content: impl Into<String>) -> Self {
        Element::Super { content: content.into() }
    }

    pub fn title_card(content: impl Into<String>) -> Self {
        Element::Graphic(Graphic::TitleCard { content: content.into() })
    }

    pub fn end_card(description: impl Into<String>) -> Self {
        Element::Graphic(Graphic::EndCard { description: description.into() })
    }

    /// Discriminant of this element
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Dialogue { .. } => ElementKind::Dialogue,
            Element::Action { .. } => ElementKind::Action,
            Element::Shot { .. } => ElementKind::Shot,
            Element::Sound { .. } => ElementKind::Sound,
            Element::MusicCue { .. } => ElementKind::MusicCue,
            Element::Super { .. } => ElementKind::Super,
            Element::Graphic(_) => ElementKind::Graphic,
        }
    }
}

/// Result of parsing a script: metadata plus scenes in encounter order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ScriptEntry>", into = "Vec<ScriptEntry>")]
pub struct ParsedScript {
    pub metadata: ScriptMetadata,
    pub scenes: Vec<Scene>,
}

impl ParsedScript {
    /// Create a scene list holding only the metadata sentinel
    pub fn new(metadata: ScriptMetadata) -> Self {
        Self {
            metadata,
            scenes: Vec::new(),
        }
    }

    /// Number of scenes, excluding the metadata sentinel
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Iterate all elements across scenes in script order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.scenes.iter().flat_map(|scene| scene.elements.iter())
    }

    /// Flatten into the serialized list shape
    pub fn to_entries(&self) -> Vec<ScriptEntry> {
        self.clone().into()
    }
}

/// One entry of the serialized scene list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptEntry {
    /// The leading `{"metadata": {...}}` record
    Metadata { metadata: ScriptMetadata },
    /// A scene record
    Scene(Scene),
}

impl From<ParsedScript> for Vec<ScriptEntry> {
    fn from(script: ParsedScript) -> Self {
        let mut entries = Vec::with_capacity(script.scenes.len() + 1);
        entries.push(ScriptEntry::Metadata { metadata: script.metadata });
        entries.extend(script.scenes.into_iter().map(ScriptEntry::Scene));
        entries
    }
}

impl TryFrom<Vec<ScriptEntry>> for ParsedScript {
    type Error = ScriptError;

    fn try_from(entries: Vec<ScriptEntry>) -> Result<Self, Self::Error> {
        let mut entries = entries.into_iter();
        let metadata = match entries.next() {
            Some(ScriptEntry::Metadata { metadata }) => metadata,
            _ => return Err(ScriptError::MissingMetadata),
        };

        let mut scenes = Vec::new();
        for (offset, entry) in entries.enumerate() {
            match entry {
                ScriptEntry::Scene(scene) => scenes.push(scene),
                ScriptEntry::Metadata { .. } => {
                    return Err(ScriptError::UnexpectedMetadata { index: offset + 1 });
                }
            }
        }

        Ok(Self { metadata, scenes })
    }
}
