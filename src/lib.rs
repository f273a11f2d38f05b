/*!
 * # scenescript - Screenplay scene graph parser
 *
 * A Rust library for turning loosely structured video scripts into a
 * structured scene list.
 *
 * ## Features
 *
 * - Scene headings (`Scene 1: ...`) split the script into numbered scenes
 * - Bracketed production cues become typed elements:
 *   - `[Visual: ...]` shots
 *   - `[Sound effect: ...]` sounds
 *   - opening and outro music cues
 *   - `[Text on screen: ...]` supers
 *   - title and end cards
 * - Narrator blocks paired with their spoken line
 * - Quoted character dialogue with speaker detection
 * - Title and series metadata from the opening cues
 * - Dialogue and visual-prompt text streams for audio and image tooling
 * - Per-scene statistics
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `screenplay`: The parser and its data model:
 *   - `screenplay::model`: Scene list, scenes and elements
 *   - `screenplay::metadata`: Title and series extraction
 *   - `screenplay::classifier`: Per-line classification
 *   - `screenplay::cues`: Bracket cue dispatch table
 *   - `screenplay::parser`: Scene builder
 *   - `screenplay::stats`: Statistics reporter
 *   - `screenplay::streams`: Dialogue and visual streams
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod screenplay;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use screenplay::{
    Element, ParsedScript, Scene, ScreenplayParser, ScriptMetadata, ScriptStats,
    ScriptStreams, format_script_stats, parse_script_into_scenes,
};
pub use errors::{AppError, ScriptError};
