/*!
 * Screenplay parsing.
 *
 * Turns a loosely structured script (scene headings, bracketed production
 * cues, narrator blocks, quoted dialogue) into a scene list:
 * - `metadata`: whole-text scan for title and series
 * - `classifier`: per-line classification with narrator lookahead
 * - `cues`: bracket cue dispatch table
 * - `parser`: scene builder
 * - `stats`: per-scene element tallies
 * - `streams`: dialogue and visual text streams
 */

pub mod classifier;
pub mod cues;
pub mod metadata;
pub mod model;
pub mod parser;
pub mod stats;
pub mod streams;

pub use classifier::{DEFAULT_SPEAKERS, LineClassifier, LineOutcome, Step};
pub use metadata::extract_metadata;
pub use model::{Element, ElementKind, Graphic, ParsedScript, Scene, ScriptEntry, ScriptMetadata};
pub use parser::{ScreenplayParser, parse_script_into_scenes};
pub use stats::{SceneStats, ScriptStats, format_script_stats};
pub use streams::ScriptStreams;
