use std::fmt;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use anyhow::{Result, Context};
use log::debug;
use serde_json::{Map, Value};

use crate::errors::ScriptError;

// @module: Play script parsing and structured play model

// @const: Heading markers, matched against the unmodified line
const ACT_MARKER: &str = "ACT";
const SCENE_MARKER: &str = "SCENE";

// @struct: Single entry recorded within a scene
//
// Entries carry the signed key assigned during the scan: dialogue keys are
// positive and increase across the whole document, stage-direction keys are
// negative and decrease across the whole document. The sign separates the two
// kinds in the interchange format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEntry {
    // @variant: Stage direction (entrances, exits, business)
    Direction {
        key: i64,
        text: String,
    },
    // @variant: One spoken line attributed to the current speaker
    Dialogue {
        key: i64,
        speaker: String,
        text: String,
    },
}

impl SceneEntry {
    /// Signed interchange key for this entry
    pub fn key(&self) -> i64 {
        match self {
            SceneEntry::Direction { key, .. } => *key,
            SceneEntry::Dialogue { key, .. } => *key,
        }
    }

    /// Raw trimmed text of the entry - used by tests and external consumers
    #[allow(dead_code)]
    pub fn text(&self) -> &str {
        match self {
            SceneEntry::Direction { text, .. } => text,
            SceneEntry::Dialogue { text, .. } => text,
        }
    }

    pub fn is_dialogue(&self) -> bool {
        matches!(self, SceneEntry::Dialogue { .. })
    }
}

/// A scene: entries in document order, dialogue and directions interleaved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    /// Scene number, 1-based within its act
    pub number: u32,

    /// Entries in the order they were recorded
    pub entries: Vec<SceneEntry>,
}

impl Scene {
    pub fn new(number: u32) -> Self {
        Scene {
            number,
            entries: Vec::new(),
        }
    }

    fn contains_key(&self, key: i64) -> bool {
        self.entries.iter().any(|e| e.key() == key)
    }
}

/// An act: scenes in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Act {
    /// Act number, 1-based and sequential across the play
    pub number: u32,

    /// Scenes in the order they were introduced
    pub scenes: Vec<Scene>,
}

impl Act {
    pub fn new(number: u32) -> Self {
        Act {
            number,
            scenes: Vec::new(),
        }
    }
}

/// Structured form of a whole play
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Play {
    /// Acts in the order they were introduced
    pub acts: Vec<Act>,
}

// @struct: Scan state threaded through one forward pass over the script
//
// act == 0 means no act has started yet; scene == 0 means no scene has
// started within the current act. The two key counters are global to the
// document and are never reset at act or scene boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Current act number (0 = none yet)
    pub act: u32,

    /// Current scene number within the act (0 = none yet, reset per act)
    pub scene: u32,

    /// Current speaker name (empty = none yet)
    pub speaker: String,

    /// Last assigned dialogue key, increasing from 1
    pub dialogue_key: i64,

    /// Last assigned stage-direction key, decreasing from -1
    pub direction_key: i64,
}

// @enum: What a single script line was classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    ActHeading,
    BeforeFirstAct,
    SceneHeading,
    BeforeFirstScene,
    StageDirection,
    SpeakerLabel,
    Dialogue,
    Blank,
}

// @struct: One classification rule: named predicate over (state, raw line)
struct ClassRule {
    name: &'static str,
    matches: fn(&ScanState, &str) -> bool,
    class: LineClass,
}

// Ordered rule table, first match wins. Predicates see the unmodified line,
// leading whitespace included; the rule order encodes the script convention
// (headings first, then the inside-a-scene heuristics).
static RULES: &[ClassRule] = &[
    ClassRule {
        name: "act-heading",
        matches: |_, line| line.starts_with(ACT_MARKER),
        class: LineClass::ActHeading,
    },
    ClassRule {
        name: "before-first-act",
        matches: |state, _| state.act == 0,
        class: LineClass::BeforeFirstAct,
    },
    ClassRule {
        name: "scene-heading",
        matches: |_, line| line.starts_with(SCENE_MARKER),
        class: LineClass::SceneHeading,
    },
    ClassRule {
        name: "before-first-scene",
        matches: |state, _| state.scene == 0,
        class: LineClass::BeforeFirstScene,
    },
    ClassRule {
        name: "stage-direction",
        matches: |_, line| line.starts_with(" [") || line.starts_with(" Enter"),
        class: LineClass::StageDirection,
    },
    ClassRule {
        name: "speaker-label",
        matches: |_, line| is_upper_label(line.trim()),
        class: LineClass::SpeakerLabel,
    },
    ClassRule {
        name: "dialogue",
        matches: |_, line| !line.trim().is_empty(),
        class: LineClass::Dialogue,
    },
    ClassRule {
        name: "blank",
        matches: |_, _| true,
        class: LineClass::Blank,
    },
];

/// Upper-case speaker-label check: at least one cased character and no
/// lower-case cased characters anywhere in the trimmed line
fn is_upper_label(trimmed: &str) -> bool {
    let mut has_cased = false;
    for ch in trimmed.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

impl Play {
    pub fn new() -> Self {
        Play { acts: Vec::new() }
    }

    /// Look up an act by its number
    pub fn act(&self, number: u32) -> Option<&Act> {
        self.acts.iter().find(|a| a.number == number)
    }

    /// Total number of dialogue entries across the play
    pub fn dialogue_line_count(&self) -> usize {
        self.acts
            .iter()
            .flat_map(|a| &a.scenes)
            .flat_map(|s| &s.entries)
            .filter(|e| e.is_dialogue())
            .count()
    }

    /// Total number of stage-direction entries across the play
    pub fn direction_count(&self) -> usize {
        self.acts
            .iter()
            .flat_map(|a| &a.scenes)
            .flat_map(|s| &s.entries)
            .filter(|e| !e.is_dialogue())
            .count()
    }

    /// Parse a script file into a play and the final scan state
    pub fn parse_script_file<P: AsRef<Path>>(path: P) -> Result<(Self, ScanState)> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script file: {}", path.display()))?;
        Ok(Self::parse_script_string(&content))
    }

    /// Parse script text into a play, classifying each line against the rule
    /// table and folding the matched action into the scan state
    ///
    /// Lines hit by a discard rule are skipped silently; that is the designed
    /// behavior for this format, not an error condition.
    pub fn parse_script_string(content: &str) -> (Self, ScanState) {
        let mut play = Play::new();
        let mut state = ScanState::default();

        for line in content.lines() {
            let rule = RULES
                .iter()
                .find(|r| (r.matches)(&state, line))
                .unwrap_or(&RULES[RULES.len() - 1]);
            Self::apply_rule(&mut play, &mut state, rule.class, rule.name, line);
        }

        (play, state)
    }

    fn apply_rule(
        play: &mut Play,
        state: &mut ScanState,
        class: LineClass,
        rule_name: &'static str,
        line: &str,
    ) {
        match class {
            LineClass::ActHeading => {
                state.act += 1;
                state.scene = 0;
                if play.act(state.act).is_none() {
                    play.acts.push(Act::new(state.act));
                }
            }
            LineClass::SceneHeading => {
                state.scene += 1;
                let scene_number = state.scene;
                if let Some(act) = play.act_mut(state.act) {
                    if !act.scenes.iter().any(|s| s.number == scene_number) {
                        act.scenes.push(Scene::new(scene_number));
                    }
                }
            }
            LineClass::StageDirection => {
                state.direction_key -= 1;
                let key = state.direction_key;
                let text = line.trim().to_string();
                if let Some(scene) = play.scene_mut(state.act, state.scene) {
                    if !scene.contains_key(key) {
                        scene.entries.push(SceneEntry::Direction { key, text });
                    }
                }
            }
            LineClass::SpeakerLabel => {
                state.speaker = line.trim().to_string();
            }
            LineClass::Dialogue => {
                state.dialogue_key += 1;
                let key = state.dialogue_key;
                let speaker = state.speaker.clone();
                let text = line.trim().to_string();
                if let Some(scene) = play.scene_mut(state.act, state.scene) {
                    if !scene.contains_key(key) {
                        scene.entries.push(SceneEntry::Dialogue { key, speaker, text });
                    }
                }
            }
            LineClass::BeforeFirstAct | LineClass::BeforeFirstScene | LineClass::Blank => {
                if !line.trim().is_empty() {
                    debug!("Discarding line ({}): {}", rule_name, line.trim());
                }
            }
        }
    }

    fn act_mut(&mut self, number: u32) -> Option<&mut Act> {
        self.acts.iter_mut().find(|a| a.number == number)
    }

    fn scene_mut(&mut self, act: u32, scene: u32) -> Option<&mut Scene> {
        self.act_mut(act)?
            .scenes
            .iter_mut()
            .find(|s| s.number == scene)
    }

    /// Build the interchange JSON value: act -> scene -> entry with all keys
    /// rendered as strings, insertion order preserved at every level
    pub fn to_json_value(&self) -> Value {
        let mut acts = Map::new();
        for act in &self.acts {
            let mut scenes = Map::new();
            for scene in &act.scenes {
                let mut entries = Map::new();
                for entry in &scene.entries {
                    match entry {
                        SceneEntry::Direction { key, text } => {
                            entries.insert(key.to_string(), Value::String(text.clone()));
                        }
                        SceneEntry::Dialogue { key, speaker, text } => {
                            let mut obj = Map::new();
                            obj.insert("speaker".to_string(), Value::String(speaker.clone()));
                            obj.insert("line".to_string(), Value::String(text.clone()));
                            entries.insert(key.to_string(), Value::Object(obj));
                        }
                    }
                }
                scenes.insert(scene.number.to_string(), Value::Object(entries));
            }
            acts.insert(act.number.to_string(), Value::Object(scenes));
        }
        Value::Object(acts)
    }

    /// Serialize to pretty-printed interchange JSON
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_json_value())
            .context("Failed to serialize play to JSON")
    }

    /// Write the interchange JSON file
    pub fn write_to_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create interchange file: {}", path.display()))?;
        file.write_all(self.to_json_string()?.as_bytes())
            .with_context(|| format!("Failed to write interchange file: {}", path.display()))?;

        Ok(())
    }

    /// Reload a play from interchange JSON text
    pub fn from_json_str(content: &str) -> Result<Self, ScriptError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_json_value(&value)
    }

    /// Reload a play from an interchange JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read interchange file: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to load interchange file: {}", path.display()))
    }

    /// Rebuild the structured play from an interchange value, converting the
    /// string keys back to numeric form
    ///
    /// Structural faults (wrong nesting, non-numeric keys, wrong value
    /// shapes) are reported as errors instead of panicking.
    pub fn from_json_value(value: &Value) -> Result<Self, ScriptError> {
        let acts_map = value
            .as_object()
            .ok_or_else(|| ScriptError::Malformed("top level is not an object".to_string()))?;

        let mut play = Play::new();

        for (act_key, act_value) in acts_map {
            let act_number: u32 = act_key.parse().map_err(|_| ScriptError::InvalidKey {
                context: "act",
                key: act_key.clone(),
            })?;
            let scenes_map = act_value.as_object().ok_or_else(|| {
                ScriptError::Malformed(format!("act {} is not an object", act_number))
            })?;

            let mut act = Act::new(act_number);

            for (scene_key, scene_value) in scenes_map {
                let scene_number: u32 = scene_key.parse().map_err(|_| ScriptError::InvalidKey {
                    context: "scene",
                    key: scene_key.clone(),
                })?;
                let entries_map = scene_value.as_object().ok_or_else(|| {
                    ScriptError::Malformed(format!(
                        "act {} scene {} is not an object",
                        act_number, scene_number
                    ))
                })?;

                let mut scene = Scene::new(scene_number);

                for (entry_key, entry_value) in entries_map {
                    let key: i64 = entry_key.parse().map_err(|_| ScriptError::InvalidKey {
                        context: "entry",
                        key: entry_key.clone(),
                    })?;
                    scene.entries.push(Self::entry_from_value(key, entry_value)?);
                }

                act.scenes.push(scene);
            }

            play.acts.push(act);
        }

        Ok(play)
    }

    fn entry_from_value(key: i64, value: &Value) -> Result<SceneEntry, ScriptError> {
        match value {
            Value::String(text) if key < 0 => Ok(SceneEntry::Direction {
                key,
                text: text.clone(),
            }),
            Value::Object(obj) if key > 0 => {
                let speaker = obj
                    .get("speaker")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        ScriptError::Malformed(format!("entry {} is missing a speaker", key))
                    })?;
                let text = obj.get("line").and_then(|v| v.as_str()).ok_or_else(|| {
                    ScriptError::Malformed(format!("entry {} is missing a line", key))
                })?;
                Ok(SceneEntry::Dialogue {
                    key,
                    speaker: speaker.to_string(),
                    text: text.to_string(),
                })
            }
            _ => Err(ScriptError::Malformed(format!(
                "entry {} does not match its key sign",
                key
            ))),
        }
    }
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Play")?;
        writeln!(f, "Acts: {}", self.acts.len())?;
        writeln!(f, "Dialogue lines: {}", self.dialogue_line_count())?;
        writeln!(f, "Stage directions: {}", self.direction_count())?;
        Ok(())
    }
}
