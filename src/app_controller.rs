use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::{Config, ExtractionMode};
use crate::dialogue_extractor::DialogueExtractor;
use crate::file_utils::{FileManager, FileType};
use crate::script_parser::Play;

// @module: Application controller for script processing

/// Main application controller for play parsing and dialogue extraction
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Run the parse workflow for one script file, writing the interchange
    /// JSON next to it or into the given output directory
    pub fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        // Check if the input file exists
        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        // Ensure the output directory exists
        FileManager::ensure_dir(&output_dir)?;

        // Check if the interchange output already exists
        let output_path = FileManager::generate_output_path(
            &input_file,
            &output_dir,
            &self.config.parser.output_extension,
        );
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, interchange output already exists (use -f to force overwrite)");
            return Ok(());
        }

        let (play, state) = Play::parse_script_file(&input_file)?;

        if play.acts.is_empty() {
            warn!("No act headings found in {:?}; wrote an empty play", input_file);
        }

        play.write_to_json(&output_path)
            .with_context(|| format!("Failed to write interchange file for {:?}", input_file))?;

        debug!(
            "Final scan state: act {}, scene {}, dialogue key {}, direction key {}",
            state.act, state.scene, state.dialogue_key, state.direction_key
        );
        info!(
            "Parsed {} act(s), {} dialogue line(s), {} stage direction(s) in {} -> {:?}",
            play.acts.len(),
            play.dialogue_line_count(),
            play.direction_count(),
            Self::format_duration(start_time.elapsed()),
            output_path
        );

        Ok(())
    }

    /// Run the parse workflow for every script file under a directory
    pub fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        info!("Processing script files in directory: {:?}", input_dir);

        let candidates = FileManager::find_files(&input_dir, &self.config.parser.script_extension)?;
        let mut processed_count = 0;

        for path in candidates {
            // Skip text files that don't look like play scripts
            match FileManager::detect_file_type(&path) {
                Ok(FileType::Script) => {}
                Ok(_) => {
                    debug!("Skipping non-script file: {:?}", path);
                    continue;
                }
                Err(e) => {
                    error!("Error inspecting file {:?}: {}", path, e);
                    continue;
                }
            }

            info!("Processing script: {:?}", path);

            let output_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
            if let Err(e) = self.run(path.clone(), output_dir, force_overwrite) {
                error!("Error processing file: {}", e);
            } else {
                processed_count += 1;
            }
        }

        info!("Finished processing {} files", processed_count);

        Ok(())
    }

    /// Run the extraction workflow: load a play and print the dialogue of
    /// the configured act to standard output
    ///
    /// Accepts either an interchange JSON file or a raw script file; a raw
    /// script is parsed on the fly without writing the interchange artifact.
    pub fn extract(&self, input_file: &Path) -> Result<()> {
        let play = self.load_play(input_file)?;

        let act = self.config.extraction.act;
        match self.config.extraction.mode {
            ExtractionMode::Raw => {
                let lines = DialogueExtractor::raw_lines(&play, act)
                    .with_context(|| format!("Failed to extract dialogue from {:?}", input_file))?;
                for line in &lines {
                    if self.config.extraction.quoted {
                        println!("\" {} \",", line);
                    } else {
                        println!("{}", line);
                    }
                }
                info!("Extracted {} dialogue line(s) from act {}", lines.len(), act);
            }
            ExtractionMode::Merged => {
                let blocks = DialogueExtractor::merged_blocks(&play, act)
                    .with_context(|| format!("Failed to extract dialogue from {:?}", input_file))?;
                for block in &blocks {
                    println!("{}", block);
                }
                info!("Extracted {} dialogue block(s) from act {}", blocks.len(), act);
            }
        }

        Ok(())
    }

    /// Load a play from either interchange JSON or raw script text
    fn load_play(&self, input_file: &Path) -> Result<Play> {
        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        match FileManager::detect_file_type(input_file)? {
            FileType::Interchange => {
                debug!("Detected interchange file, loading directly");
                Play::from_json_file(input_file)
            }
            FileType::Script => {
                debug!("Detected script file, parsing before extraction");
                let (play, _) = Play::parse_script_file(input_file)?;
                Ok(play)
            }
            FileType::Unknown => {
                warn!("Could not identify file type of {:?}, treating it as a script", input_file);
                let (play, _) = Play::parse_script_file(input_file)?;
                Ok(play)
            }
        }
    }

    /// Format a duration as seconds with millisecond precision
    fn format_duration(duration: Duration) -> String {
        format!("{:.3}s", duration.as_secs_f64())
    }
}
