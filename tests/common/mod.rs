/*!
 * Common test utilities for the stagehand test suite
 */

use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Initializes logging for tests that want parser diagnostics
#[allow(dead_code)]
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample play script file for testing
pub fn create_test_script(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_SCRIPT)
}

/// A small two-act play in the expected script convention
pub const SAMPLE_SCRIPT: &str = "A MIDSUMMER NIGHT'S DREAM

ACT I
SCENE I. Athens. The palace of THESEUS.
 Enter THESEUS, HIPPOLYTA, and PHILOSTRATE
THESEUS
Now, fair Hippolyta, our nuptial hour
Draws on apace;
HIPPOLYTA
Four days will quickly steep themselves in night;

THESEUS
Go, Philostrate,
 [Exit PHILOSTRATE]
SCENE II. Athens. A room in a cottage.
 Enter QUINCE, SNUG, and BOTTOM
QUINCE
Is all our company here?
BOTTOM
You were best to call them generally, man by man.

ACT II
SCENE I. A wood near Athens.
 Enter a Fairy at one door, and PUCK at another
PUCK
How now, spirit! whither wander you?
";
