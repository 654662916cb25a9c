/*!
 * # Stagehand
 *
 * A Rust library for parsing stage-play scripts into structured form and
 * extracting per-character dialogue.
 *
 * ## Features
 *
 * - Parse plain-text play scripts (act/scene headings, speaker labels,
 *   stage directions, dialogue) into a structured play record
 * - Serialize the parsed play to an order-preserving JSON interchange file
 * - Extract dialogue for a selected act, merged per speaker or line by line
 * - Process single scripts or whole directories
 * - Configurable output locations and extraction behavior
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `script_parser`: Script parsing and the structured play model
 * - `dialogue_extractor`: Per-character dialogue extraction
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
pub mod script_parser;
pub mod dialogue_extractor;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use script_parser::{Play, Act, Scene, SceneEntry, ScanState};
pub use dialogue_extractor::{DialogueExtractor, DialogueBlock};
pub use errors::{AppError, ScriptError, ExtractError};
