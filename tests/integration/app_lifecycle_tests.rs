/*!
 * Full application lifecycle tests
 */

use anyhow::Result;
use stagehand::app_config::{Config, ExtractionMode};
use stagehand::app_controller::Controller;
use crate::common;

/// Test a lifecycle driven by a configuration written to and read from disk
#[test]
fn test_lifecycle_withConfigFileOnDisk_shouldHonorConfiguredSettings() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    // Persist a config the way the application does
    let mut config = Config::default();
    config.extraction.mode = ExtractionMode::Merged;
    config.extraction.act = 2;
    let config_path = dir.join("conf.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    // Reload it and drive a full run with it
    let reloaded: Config = serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;
    reloaded.validate()?;
    assert_eq!(reloaded.extraction.mode, ExtractionMode::Merged);
    assert_eq!(reloaded.extraction.act, 2);

    let script_path = common::create_test_script(&dir, "midsummer.txt")?;
    let controller = Controller::with_config(reloaded)?;
    controller.run(script_path, dir.clone(), false)?;
    controller.extract(&dir.join("midsummer.json"))?;
    Ok(())
}

/// Test a folder lifecycle with a custom output extension
#[test]
fn test_lifecycle_withCustomOutputExtension_shouldUseConfiguredExtension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_script(&dir, "midsummer.txt")?;

    let mut config = Config::default();
    config.parser.output_extension = "play.json".to_string();
    let controller = Controller::with_config(config)?;
    controller.run_folder(dir.clone(), false)?;

    assert!(dir.join("midsummer.play.json").exists());
    Ok(())
}

/// Test that reruns over a processed folder leave existing output untouched
#[test]
fn test_lifecycle_withRepeatedFolderRuns_shouldBeIdempotent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_script(&dir, "midsummer.txt")?;

    let controller = Controller::new_for_test()?;
    controller.run_folder(dir.clone(), false)?;

    let first = std::fs::read_to_string(dir.join("midsummer.json"))?;
    controller.run_folder(dir.clone(), false)?;
    let second = std::fs::read_to_string(dir.join("midsummer.json"))?;

    assert_eq!(first, second);
    Ok(())
}
