/*!
 * Tests for dialogue extraction functionality
 */

use anyhow::Result;
use stagehand::dialogue_extractor::DialogueExtractor;
use stagehand::script_parser::Play;
use crate::common;

/// Test that raw extraction returns every dialogue line of the act in order
#[test]
fn test_raw_lines_withSampleScript_shouldReturnActOneLines() -> Result<()> {
    let (play, _) = Play::parse_script_string(common::SAMPLE_SCRIPT);

    let lines = DialogueExtractor::raw_lines(&play, 1)?;

    assert_eq!(
        lines,
        vec![
            "Now, fair Hippolyta, our nuptial hour",
            "Draws on apace;",
            "Four days will quickly steep themselves in night;",
            "Go, Philostrate,",
            "Is all our company here?",
            "You were best to call them generally, man by man.",
        ]
    );
    Ok(())
}

/// Test that stage directions never appear in the extracted output
#[test]
fn test_raw_lines_withSampleScript_shouldSkipStageDirections() -> Result<()> {
    let (play, _) = Play::parse_script_string(common::SAMPLE_SCRIPT);

    let lines = DialogueExtractor::raw_lines(&play, 1)?;

    assert!(lines.iter().all(|l| !l.starts_with("Enter")));
    assert!(lines.iter().all(|l| !l.starts_with('[')));
    Ok(())
}

/// Test that the act filter selects only the requested act
#[test]
fn test_raw_lines_withActTwo_shouldReturnOnlyActTwoLines() -> Result<()> {
    let (play, _) = Play::parse_script_string(common::SAMPLE_SCRIPT);

    let lines = DialogueExtractor::raw_lines(&play, 2)?;

    assert_eq!(lines, vec!["How now, spirit! whither wander you?"]);
    Ok(())
}

/// Test merging of consecutive same-speaker lines
#[test]
fn test_merged_blocks_withSampleScript_shouldMergeConsecutiveLines() -> Result<()> {
    let (play, _) = Play::parse_script_string(common::SAMPLE_SCRIPT);

    let blocks = DialogueExtractor::merged_blocks(&play, 1)?;

    assert_eq!(blocks.len(), 5);

    // Consecutive lines by the same speaker concatenate with no separator
    assert_eq!(blocks[0].speaker, "THESEUS");
    assert_eq!(
        blocks[0].text,
        "Now, fair Hippolyta, our nuptial hourDraws on apace;"
    );

    assert_eq!(blocks[1].speaker, "HIPPOLYTA");
    assert_eq!(blocks[2].speaker, "THESEUS");
    assert_eq!(blocks[3].speaker, "QUINCE");
    assert_eq!(blocks[4].speaker, "BOTTOM");
    Ok(())
}

/// Test that no empty leading block is emitted on the first speaker transition
#[test]
fn test_merged_blocks_withSampleScript_shouldNotEmitLeadingEmptyBlock() -> Result<()> {
    let (play, _) = Play::parse_script_string(common::SAMPLE_SCRIPT);

    let blocks = DialogueExtractor::merged_blocks(&play, 1)?;

    assert!(blocks.iter().all(|b| !b.text.is_empty()));
    Ok(())
}

/// Test that merging continues across scene boundaries within an act
#[test]
fn test_merged_blocks_withSameSpeakerAcrossScenes_shouldMergeAcrossBoundary() -> Result<()> {
    let script = "ACT I\nSCENE I\nPUCK\nFirst scene line.\nSCENE II\nPUCK\nSecond scene line.\n";
    let (play, _) = Play::parse_script_string(script);

    let blocks = DialogueExtractor::merged_blocks(&play, 1)?;

    // The speaker cursor is not reset at the scene boundary
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].speaker, "PUCK");
    assert_eq!(blocks[0].text, "First scene line.Second scene line.");
    Ok(())
}

/// Test block display formatting
#[test]
fn test_dialogue_block_display_withSpeakerAndText_shouldFormatCorrectly() -> Result<()> {
    let script = "ACT I\nSCENE I\nPUCK\nHello there.\n";
    let (play, _) = Play::parse_script_string(script);

    let blocks = DialogueExtractor::merged_blocks(&play, 1)?;

    assert_eq!(format!("{}", blocks[0]), "PUCK : Hello there.");
    Ok(())
}

/// Test that requesting a missing act is an explicit error
#[test]
fn test_merged_blocks_withMissingAct_shouldReturnActNotFound() {
    let (play, _) = Play::parse_script_string(common::SAMPLE_SCRIPT);

    let result = DialogueExtractor::merged_blocks(&play, 99);
    assert!(result.is_err());
    assert_eq!(result.unwrap_err().to_string(), "Act 99 not found in the play");
}

/// Test extraction over an empty play
#[test]
fn test_raw_lines_withEmptyPlay_shouldReturnActNotFound() {
    let (play, _) = Play::parse_script_string("no act headings in here\n");

    assert!(DialogueExtractor::raw_lines(&play, 1).is_err());
}

/// Test extraction from a play reloaded out of the interchange format
#[test]
fn test_raw_lines_withReloadedPlay_shouldMatchDirectExtraction() -> Result<()> {
    let (play, _) = Play::parse_script_string(common::SAMPLE_SCRIPT);
    let reloaded = Play::from_json_str(&play.to_json_string()?)?;

    assert_eq!(
        DialogueExtractor::raw_lines(&play, 1)?,
        DialogueExtractor::raw_lines(&reloaded, 1)?
    );
    Ok(())
}
