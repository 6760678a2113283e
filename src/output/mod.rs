//! Writer for `puppet.conf` and `auth.conf`.
//!
//! Rendering is a pure function of the compiled sequences and preserves
//! their order verbatim. Writing goes through a temp file and a rename so a
//! reader never sees a half-written file.

mod render;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use render::{render_auth_conf, render_json, render_puppet_conf};

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::compile::Compilation;

/// File name of the main configuration file.
pub const PUPPET_CONF: &str = "puppet.conf";

/// File name of the authorization file.
pub const AUTH_CONF: &str = "auth.conf";

/// Errors that can occur while writing artifacts.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to write an output file.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// Path being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Failed to serialize the compilation to JSON.
    #[error("Failed to serialize compilation: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Paths of the files written by [`write_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    /// Path of `puppet.conf`.
    pub puppet_conf: PathBuf,
    /// Path of `auth.conf`.
    pub auth_conf: PathBuf,
}

/// Renders and writes both artifacts into `dir`.
///
/// Both files are staged as `*.tmp` before either is renamed into place,
/// so a render or write failure leaves the existing pair untouched.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a file cannot be
/// written.
pub fn write_artifacts(dir: &Path, compilation: &Compilation) -> Result<WrittenFiles, OutputError> {
    let files = WrittenFiles {
        puppet_conf: dir.join(PUPPET_CONF),
        auth_conf: dir.join(AUTH_CONF),
    };

    let puppet_conf =
        StagedFile::write(&files.puppet_conf, &render_puppet_conf(&compilation.settings))?;
    let auth_conf = StagedFile::write(&files.auth_conf, &render_auth_conf(&compilation.acl))?;

    puppet_conf.commit()?;
    auth_conf.commit()?;

    tracing::info!(
        puppet_conf = %files.puppet_conf.display(),
        auth_conf = %files.auth_conf.display(),
        "Wrote configuration files"
    );

    Ok(files)
}

/// Content written to `{target}.tmp`, waiting to be renamed over `target`.
///
/// Dropping a file that was never committed removes the temp file.
struct StagedFile<'a> {
    target: &'a Path,
    temp: PathBuf,
    committed: bool,
}

impl<'a> StagedFile<'a> {
    fn write(target: &'a Path, content: &str) -> Result<Self, OutputError> {
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| write_error(target, e))?;
            }
        }

        let staged = Self {
            target,
            // puppet.conf -> puppet.conf.tmp, not puppet.tmp
            temp: PathBuf::from(format!("{}.tmp", target.display())),
            committed: false,
        };

        std::fs::write(&staged.temp, content).map_err(|e| write_error(target, e))?;

        tracing::debug!(path = %staged.temp.display(), bytes = content.len(), "Staged file");
        Ok(staged)
    }

    fn commit(mut self) -> Result<(), OutputError> {
        std::fs::rename(&self.temp, self.target).map_err(|e| write_error(self.target, e))?;
        self.committed = true;

        tracing::debug!(path = %self.target.display(), "Wrote file");
        Ok(())
    }
}

impl Drop for StagedFile<'_> {
    fn drop(&mut self) {
        if !self.committed {
            // The temp file may never have been created
            let _ = std::fs::remove_file(&self.temp);
        }
    }
}

fn write_error(path: &Path, source: io::Error) -> OutputError {
    OutputError::Write {
        path: path.to_path_buf(),
        source,
    }
}
