// crates/get_git_root/src/lib.rs

use std::path::Path;
use std::process::{Command, Stdio};

/// Returns the root of the Git repository enclosing `start_dir` as a trimmed String,
/// or an error message if `start_dir` is not inside a Git repository (or git is missing).
pub fn get_git_root(start_dir: &Path) -> Result<String, String> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(start_dir)
        .stderr(Stdio::null())
        .output()
        .map_err(|e| format!("Failed to execute git: {}", e))?;
    if output.status.success() {
        let git_root = String::from_utf8_lossy(&output.stdout)
            .trim()
            .to_string();
        log::debug!("git root for {} is {}", start_dir.display(), git_root);
        Ok(git_root)
    } else {
        Err(format!("Error: {} is not inside a git repository.", start_dir.display()))
    }
}
