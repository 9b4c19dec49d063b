use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HighScoreError {
    #[error("failed to access high score file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score file {path} does not hold an integer: {contents:?}")]
    Parse { path: PathBuf, contents: String },
}

/// Plain-text file holding the best score as a decimal integer.
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file counts as a fresh install and reads as 0.
    pub fn load(&self) -> Result<u32, HighScoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("High score file {} not found, starting from 0", self.path.display());
                return Ok(0);
            }
            Err(source) => {
                return Err(HighScoreError::Io { path: self.path.clone(), source });
            }
        };
        let high_score = contents.trim().parse::<u32>().map_err(|_| HighScoreError::Parse {
            path: self.path.clone(),
            contents: contents.clone(),
        })?;
        info!("Loaded high score {} from {}", high_score, self.path.display());
        Ok(high_score)
    }

    pub fn save(&self, high_score: u32) -> Result<(), HighScoreError> {
        fs::write(&self.path, high_score.to_string())
            .map_err(|source| HighScoreError::Io { path: self.path.clone(), source })?;
        info!("Saved high score {} to {}", high_score, self.path.display());
        Ok(())
    }
}
