use crate::error::{GnpError, Result};
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

/// Converts Graphviz sources to PNG with an external `dot` executable.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    executable: String,
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new("dot")
    }
}

impl GraphvizRenderer {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn render_png(&self, dot_path: &Path, png_path: &Path) -> Result<()> {
        let output = Command::new(&self.executable)
            .arg("-Tpng")
            .arg("-o")
            .arg(png_path)
            .arg(dot_path)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => GnpError::Render(format!(
                    "Graphviz executable '{}' not found",
                    self.executable
                )),
                _ => GnpError::Render(format!("Failed to run '{}': {}", self.executable, e)),
            })?;

        if !output.status.success() {
            return Err(GnpError::Render(format!(
                "'{}' exited with {}: {}",
                self.executable,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        log::debug!("Rendered {} to {}", dot_path.display(), png_path.display());
        Ok(())
    }
}
