/*!
 * Script-wide metadata extraction.
 *
 * A single scan over the whole text, independent of the line pass, so cues
 * in the pre-amble before the first scene heading are still picked up.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::model::ScriptMetadata;

static TITLE_CARD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[Title card: "(.*?)"\]"#).expect("Invalid title card regex")
});

// Not anchored at the closing bracket: anything after the quoted name is ignored.
static OPENING_CUE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[Opening music and animation: "(.*?)""#).expect("Invalid opening cue regex")
});

/// Extract title and series from the raw script text.
///
/// Missing cues leave the corresponding field empty; the episode keeps its
/// default.
pub fn extract_metadata(script_text: &str) -> ScriptMetadata {
    let mut metadata = ScriptMetadata::default();

    if let Some(caps) = TITLE_CARD_REGEX.captures(script_text) {
        metadata.title = caps[1].to_string();
    }

    if let Some(caps) = OPENING_CUE_REGEX.captures(script_text) {
        metadata.series = caps[1].to_string();
    }

    debug!(
        "Extracted metadata: title='{}', series='{}'",
        metadata.title, metadata.series
    );

    metadata
}
