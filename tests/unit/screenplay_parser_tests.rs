/*!
 * Tests for the scene builder and line classification
 */

use scenescript::screenplay::{Element, ScreenplayParser, parse_script_into_scenes};
use scenescript::errors::ScriptError;
use crate::common;

fn scene_elements(text: &str) -> Vec<Element> {
    let script = parse_script_into_scenes(text);
    assert_eq!(script.scene_count(), 1, "expected exactly one scene");
    script.scenes[0].elements.clone()
}

/// Test that every heading line opens exactly one scene
#[test]
fn test_parse_withSeveralHeadings_shouldCreateOneScenePerHeading() {
    let text = "Scene 1: A\nAction one.\nScene 7: B\nScene 3: C\nAction three.";
    let script = parse_script_into_scenes(text);

    assert_eq!(script.scene_count(), 3);
    let numbers: Vec<usize> = script.scenes.iter().map(|s| s.scene_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    let slugs: Vec<&str> = script.scenes.iter().map(|s| s.slug.as_str()).collect();
    assert_eq!(slugs, vec!["SCENE_1", "SCENE_2", "SCENE_3"]);
    assert!(script.scenes[1].elements.is_empty());
}

/// Test that lowercase or unnumbered headings are not scene headings
#[test]
fn test_parse_withMalformedHeadings_shouldNotOpenScenes() {
    let text = "Scene 1: Real\nscene 2: lowercase\nScene two: words\nScene 3 missing colon";
    let script = parse_script_into_scenes(text);

    assert_eq!(script.scene_count(), 1);
    assert_eq!(
        script.scenes[0].elements,
        vec![
            Element::action("scene 2: lowercase"),
            Element::action("Scene two: words"),
            Element::action("Scene 3 missing colon"),
        ]
    );
}

/// Test that visual cues produce one shot regardless of whitespace
#[test]
fn test_parse_withPaddedVisualCue_shouldProduceSingleShot() {
    let elements = scene_elements("Scene 1: Sea\n      [Visual:    Coral reef   ]    \n");
    assert_eq!(elements, vec![Element::shot("Coral reef")]);
}

/// Test narrator cue followed by a plain line
#[test]
fn test_parse_withNarratorAndLine_shouldEmitOneVoiceOver() {
    let elements = scene_elements("Scene 1: Sea\nNarrator (calm tone):\n   Waves roll in.   \nGulls cry.");

    assert_eq!(
        elements,
        vec![
            Element::narration("calm tone", "Waves roll in."),
            Element::action("Gulls cry."),
        ]
    );
}

/// Test narrator cue as the last line of the script
#[test]
fn test_parse_withTrailingNarratorCue_shouldEmitEmptyText() {
    let elements = scene_elements("Scene 1: End\nNarrator (sad tone):");
    assert_eq!(elements, vec![Element::narration("sad tone", "")]);
}

/// Test two narrator cues in a row
#[test]
fn test_parse_withConsecutiveNarratorCues_shouldPairOnlyTheSecond() {
    let elements = scene_elements("Scene 1: A\nNarrator:\nNarrator (loud):\nHello!");
    assert_eq!(
        elements,
        vec![
            Element::narration("normal", ""),
            Element::narration("loud", "Hello!"),
        ]
    );
}

/// Test dialogue with a recognized speaker prefix
#[test]
fn test_parse_withKnownSpeaker_shouldUppercaseCharacter() {
    let elements = scene_elements("Scene 1: A\nHarmony: \"Hello there\"\nbubbles : \"Pop!\"");
    assert_eq!(
        elements,
        vec![
            Element::dialogue("HARMONY", "Hello there"),
            Element::dialogue("BUBBLES", "Pop!"),
        ]
    );
}

/// Test quoted lines without a recognized speaker
#[test]
fn test_parse_withUnknownSpeaker_shouldUseFallbackCharacter() {
    let elements = scene_elements("Scene 1: A\n\"Just dialogue\"\nBob: \"Hi\"\n\"Mom,\" she asks, \"why?\"");
    assert_eq!(
        elements,
        vec![
            Element::dialogue("CHARACTER", "Just dialogue"),
            Element::dialogue("CHARACTER", "Hi"),
            Element::dialogue("CHARACTER", "Mom,"),
        ]
    );
}

/// Test a line with a single quote character
#[test]
fn test_parse_withUnbalancedQuote_shouldBeAction() {
    let elements = scene_elements("Scene 1: A\nShe says \"wait");
    assert_eq!(elements, vec![Element::action("She says \"wait")]);
}

/// Test unrecognized bracket cues
#[test]
fn test_parse_withUnknownCue_shouldEmitNothing() {
    let elements = scene_elements("Scene 1: A\n[Unknown cue]\n[Camera pans left]");
    assert!(elements.is_empty());
}

/// Test that bracketed lines never fall through to dialogue
#[test]
fn test_parse_withQuotedBracketLine_shouldNotBeDialogue() {
    let elements = scene_elements("Scene 1: A\n[Crowd shouts \"hooray\"]");
    assert!(elements.is_empty());
}

/// Test lines before the first heading
#[test]
fn test_parse_withPreamble_shouldKeepItOutOfScenes() {
    let text = "Loose intro line.\n\"Quoted intro\"\n[Visual: Intro]\nScene 1: A\n[Visual: Inside]";
    let script = parse_script_into_scenes(text);

    assert_eq!(script.scene_count(), 1);
    assert_eq!(script.scenes[0].elements, vec![Element::shot("Inside")]);
}

/// Test the first line of a scene after its heading
#[test]
fn test_parse_withActionAfterHeading_shouldKeepAction() {
    let elements = scene_elements("Scene 1: A\nThe tide turns.");
    assert_eq!(elements, vec![Element::action("The tide turns.")]);
}

/// Test parsing the same text twice
#[test]
fn test_parse_withSameText_shouldBeIdempotent() {
    let parser = ScreenplayParser::new();
    let first = parser.parse(common::sample_script());
    let second = parser.parse(common::sample_script());
    assert_eq!(first, second);
}

/// Test the sample script end to end
#[test]
fn test_parse_withSampleScript_shouldBuildExpectedScenes() {
    let script = parse_script_into_scenes(common::sample_script());

    assert_eq!(script.metadata.title, common::SAMPLE_TITLE);
    assert_eq!(script.metadata.series, common::SAMPLE_SERIES);
    assert_eq!(script.metadata.episode, 1);
    assert_eq!(script.scene_count(), 2);

    let first = &script.scenes[0];
    assert_eq!(first.heading, "The Sparkling Surface");
    assert_eq!(
        first.elements,
        vec![
            Element::shot("Calm ocean sunrise, shimmering water"),
            Element::narration(
                "normal",
                "Early morning in the Pacific Ocean, and the waves sparkle like golden treasure."
            ),
            Element::action("PSSHHHH!"),
            Element::action("A big, misty spout bursts into the air—"),
            Element::dialogue("CHARACTER", "good morning!"),
            Element::shot("Harmony swimming beside her mom"),
            Element::dialogue("CHARACTER", "Mom,"),
            Element::action("Her mom, Melody, smiles."),
            Element::dialogue(
                "CHARACTER",
                "That's your warm breath meeting the cool ocean air. Every whale's spout is unique—just like you!"
            ),
            Element::narration(
                "whisper tone",
                "See those little bumps on Melody's back? Those are barnacles—tiny creatures that hitch a ride and sparkle like ocean jewels."
            ),
        ]
    );

    let second = &script.scenes[1];
    assert_eq!(second.heading, "Underwater Wonders");
    assert_eq!(second.elements.len(), 10);
    assert_eq!(second.elements[2], Element::sound("Gentle bubbling"));
    assert_eq!(second.elements[5], Element::action("Star:"));
    assert_eq!(
        second.elements[6],
        Element::dialogue("CHARACTER", "Hey, Harmony! What are you looking at?")
    );
    assert_eq!(
        second.elements[9],
        Element::on_screen_text("\"The Great Barrier Reef\"")
    );
}

/// Test the production cues inside a scene
#[test]
fn test_parse_withProductionCues_shouldBuildTypedElements() {
    let text = r#"Scene 1: Finale
[Title card: "The End?"]
[Opening music and animation: "Wait for it, Kids!" intro plays]
[Outro music swells]
[End card: Subscribe]"#;

    assert_eq!(
        scene_elements(text),
        vec![
            Element::title_card("The End?"),
            Element::music_cue("\"Wait for it, Kids!\" intro plays"),
            Element::music_cue("Outro music"),
            Element::end_card("End card: Subscribe"),
        ]
    );
}

/// Test a parser built with a custom speaker set
#[test]
fn test_withSpeakers_withCustomNames_shouldRecognizeOnlyThose() -> Result<(), ScriptError> {
    let parser = ScreenplayParser::with_speakers(&["Bob", "Dr. Fin"])?;
    let script = parser.parse("Scene 1: A\nBob: \"Hi\"\nDr. Fin: \"Hello\"\nHarmony: \"Hey\"");

    assert_eq!(
        script.scenes[0].elements,
        vec![
            Element::dialogue("BOB", "Hi"),
            Element::dialogue("DR. FIN", "Hello"),
            Element::dialogue("CHARACTER", "Hey"),
        ]
    );
    Ok(())
}

/// Test a parser with no speakers configured
#[test]
fn test_withSpeakers_withEmptyList_shouldAlwaysUseFallback() -> Result<(), ScriptError> {
    let parser = ScreenplayParser::with_speakers::<&str>(&[])?;
    let script = parser.parse("Scene 1: A\nHarmony: \"Hey\"");
    assert_eq!(script.scenes[0].elements, vec![Element::dialogue("CHARACTER", "Hey")]);
    Ok(())
}

/// Test that blank speaker names are rejected
#[test]
fn test_withSpeakers_withBlankName_shouldFail() {
    let result = ScreenplayParser::with_speakers(&["Harmony", "  "]);
    assert!(matches!(result, Err(ScriptError::InvalidSpeaker(_))));
}

/// Test that Windows line endings parse like Unix ones
#[test]
fn test_parse_withCrlfLineEndings_shouldMatchLf() {
    let unix = "Scene 1: A\nNarrator:\nHello\n[Visual: Sea]";
    let windows = unix.replace('\n', "\r\n");
    assert_eq!(parse_script_into_scenes(unix), parse_script_into_scenes(&windows));
}
