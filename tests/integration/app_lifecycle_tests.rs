/*!
 * Integration tests for configuration bootstrap and folder runs
 */

use std::fs;
use anyhow::Result;

use scenescript::app_config::Config;
use scenescript::app_controller::{Controller, FOLDER_LOG_FILE, FolderSummary};
use scenescript::screenplay::Element;
use crate::common;

/// Test the config-to-controller path with custom settings
#[test]
fn test_app_lifecycle_withSavedConfig_shouldDriveParsing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let config_path = dir.join("conf.json");

    let mut config = Config::default();
    config.parser.speakers = vec!["Captain".to_string()];
    config.save(&config_path)?;

    let loaded = Config::from_file(&config_path)?;
    loaded.validate()?;
    let controller = Controller::with_config(loaded)?;

    let input = common::create_test_file(&dir, "ship.txt", "Scene 1: Deck\nCaptain: \"Hoist the sails\"")?;
    let script = tokio_test::block_on(controller.parse_file(&input))?;

    assert_eq!(
        script.scenes[0].elements,
        vec![Element::dialogue("CAPTAIN", "Hoist the sails")]
    );
    Ok(())
}

/// Test processing a directory twice
#[test]
fn test_run_folder_withTwoScripts_shouldProcessThenSkip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let season = dir.join("season1");
    fs::create_dir_all(&season)?;

    common::create_sample_script(&dir, "whale.txt")?;
    common::create_test_file(&season, "reef.txt", "Scene 1: Reef\n[Visual: Coral]")?;
    common::create_test_file(&dir, "notes.md", "not a script")?;

    let controller = Controller::new_for_test()?;

    let first = tokio_test::block_on(controller.run_folder(dir.clone(), false))?;
    assert_eq!(first, FolderSummary { processed: 2, skipped: 0, errors: 0 });
    assert!(dir.join("whale.scenes.json").exists());
    assert!(season.join("reef.scenes.json").exists());
    assert!(season.join("reef_imagegen.txt").exists());

    // Stream files written by the first run are not picked up as scripts
    let second = tokio_test::block_on(controller.run_folder(dir.clone(), false))?;
    assert_eq!(second, FolderSummary { processed: 0, skipped: 2, errors: 0 });

    let forced = tokio_test::block_on(controller.run_folder(dir.clone(), true))?;
    assert_eq!(forced.processed, 2);

    let log = fs::read_to_string(dir.join(FOLDER_LOG_FILE))?;
    assert_eq!(log.lines().count(), 3);
    Ok(())
}

/// Test that a script named like a stream file is still processed
#[test]
fn test_run_folder_withStreamLikeScriptName_shouldProcessIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "humpback_audio.txt", "Scene 1: Song\n[Visual: Whale sings]")?;
    common::create_test_file(&dir, "other.txt", "Scene 1: Other")?;

    let controller = Controller::new_for_test()?;

    let first = tokio_test::block_on(controller.run_folder(dir.clone(), false))?;
    assert_eq!(first, FolderSummary { processed: 2, skipped: 0, errors: 0 });
    assert!(dir.join("humpback_audio.scenes.json").exists());
    assert!(dir.join("humpback_audio_imagegen.txt").exists());

    // Outputs of both scripts are recognized, the scripts themselves are not
    let second = tokio_test::block_on(controller.run_folder(dir.clone(), false))?;
    assert_eq!(second, FolderSummary { processed: 0, skipped: 2, errors: 0 });
    Ok(())
}

/// Test that one unreadable script does not stop the folder run
#[test]
fn test_run_folder_withUnreadableScript_shouldCountErrorAndContinue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "good.txt", "Scene 1: Fine")?;
    fs::write(dir.join("broken.txt"), [0xff, 0xfe, 0xfd])?;

    let controller = Controller::new_for_test()?;
    let summary = tokio_test::block_on(controller.run_folder(dir.clone(), false))?;

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.errors, 1);
    assert!(dir.join("good.scenes.json").exists());
    Ok(())
}

/// Test folder mode on a directory without scripts
#[test]
fn test_run_folder_withNoScripts_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(&temp_dir.path().to_path_buf(), "readme.md", "nothing")?;

    let controller = Controller::new_for_test()?;
    let result = tokio_test::block_on(controller.run_folder(temp_dir.path().to_path_buf(), false));
    assert!(result.is_err());
    Ok(())
}

/// Test folder mode with a custom script extension
#[test]
fn test_run_folder_withCustomExtension_shouldOnlyPickMatchingFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "pilot.script", "Scene 1: Pilot")?;
    common::create_test_file(&dir, "ignored.txt", "Scene 1: Ignored")?;

    let mut config = Config::default();
    config.output.script_extension = "script".to_string();
    let controller = Controller::with_config(config)?;

    let summary = tokio_test::block_on(controller.run_folder(dir.clone(), false))?;
    assert_eq!(summary.processed, 1);
    assert!(dir.join("pilot.scenes.json").exists());
    assert!(!dir.join("ignored.scenes.json").exists());
    Ok(())
}
