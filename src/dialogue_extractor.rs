use std::fmt;
use log::debug;

use crate::errors::ExtractError;
use crate::script_parser::{Play, SceneEntry};

// @module: Per-character dialogue extraction from a parsed play

// @struct: One merged run of consecutive lines by the same speaker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueBlock {
    // @field: Speaker name as it appeared in the script
    pub speaker: String,

    // @field: Concatenated line text, no separator between lines
    pub text: String,
}

impl fmt::Display for DialogueBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} : {}", self.speaker, self.text)
    }
}

/// Dialogue extraction over a read-only play structure
pub struct DialogueExtractor;

impl DialogueExtractor {
    /// Merge consecutive same-speaker dialogue lines of one act into blocks
    ///
    /// Walks the act's scenes in order and its dialogue entries in increasing
    /// key order. A speaker change flushes the accumulated text as one block;
    /// line text is concatenated with no separator. Stage directions are
    /// skipped entirely. The first speaker transition flushes nothing, so no
    /// empty leading block is produced.
    pub fn merged_blocks(play: &Play, act_number: u32) -> Result<Vec<DialogueBlock>, ExtractError> {
        let act = play
            .act(act_number)
            .ok_or(ExtractError::ActNotFound(act_number))?;

        let mut blocks = Vec::new();
        let mut current_speaker = String::new();
        let mut accumulator = String::new();

        for entry in act.scenes.iter().flat_map(|s| &s.entries) {
            if let SceneEntry::Dialogue { speaker, text, .. } = entry {
                if *speaker != current_speaker {
                    if !accumulator.is_empty() {
                        blocks.push(DialogueBlock {
                            speaker: std::mem::take(&mut current_speaker),
                            text: std::mem::take(&mut accumulator),
                        });
                    }
                    current_speaker = speaker.clone();
                }
                accumulator.push_str(text);
            }
        }

        if !accumulator.is_empty() {
            blocks.push(DialogueBlock {
                speaker: current_speaker,
                text: accumulator,
            });
        }

        debug!("Merged act {} into {} dialogue blocks", act_number, blocks.len());
        Ok(blocks)
    }

    /// Collect every individual dialogue line of one act, unmerged, in order
    pub fn raw_lines(play: &Play, act_number: u32) -> Result<Vec<String>, ExtractError> {
        let act = play
            .act(act_number)
            .ok_or(ExtractError::ActNotFound(act_number))?;

        let lines: Vec<String> = act
            .scenes
            .iter()
            .flat_map(|s| &s.entries)
            .filter_map(|entry| match entry {
                SceneEntry::Dialogue { text, .. } => Some(text.clone()),
                SceneEntry::Direction { .. } => None,
            })
            .collect();

        debug!("Collected {} raw dialogue lines from act {}", lines.len(), act_number);
        Ok(lines)
    }
}
