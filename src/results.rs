use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::engine::{GameOutcome, RoundOutcome};
use crate::error::ResultsError;

/// Destination for per-round results and the end-of-game summary.
///
/// Records for one game are bracketed by `open_game` / `close_game`;
/// recording without an open game yields [`ResultsError::NoOpenGame`].
/// `close_game` on an already-closed sink is a no-op.
pub trait ResultSink {
    fn open_game(&mut self, game_id: u32) -> Result<(), ResultsError>;

    fn record_round(&mut self, round: u32, outcome: &RoundOutcome) -> Result<(), ResultsError>;

    fn record_summary(
        &mut self,
        human_score: u32,
        computer_score: u32,
        outcome: &GameOutcome,
    ) -> Result<(), ResultsError>;

    fn close_game(&mut self) -> Result<(), ResultsError>;
}

struct OpenGame {
    path: PathBuf,
    file: File,
}

/// Sink that writes one plain-text file per game under a results directory.
///
/// Files are named `game_{id:03}.txt` and opened in append mode, so results
/// survive process restarts and a re-used game id extends its file rather
/// than truncating it. Every record is flushed as it is written.
pub struct FileResultSink {
    dir: PathBuf,
    open: Option<OpenGame>,
}

impl FileResultSink {
    /// Create a sink rooted at `dir`. The directory is created up front; a
    /// failure there surfaces on the first `open_game`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        FileResultSink { dir, open: None }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_path(&self, game_id: u32) -> PathBuf {
        self.dir.join(format!("game_{:03}.txt", game_id))
    }

    fn write_line(&mut self, line: &str) -> Result<(), ResultsError> {
        let open = self.open.as_mut().ok_or(ResultsError::NoOpenGame)?;
        writeln!(open.file, "{}", line)
            .and_then(|_| open.file.flush())
            .map_err(|e| ResultsError::Write {
                path: open.path.clone(),
                source: e,
            })
    }
}

impl ResultSink for FileResultSink {
    fn open_game(&mut self, game_id: u32) -> Result<(), ResultsError> {
        self.open = None;
        let path = self.file_path(game_id);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| ResultsError::Open {
                path: path.clone(),
                source: e,
            })?;
        self.open = Some(OpenGame { path, file });
        self.write_line(&format!("Game {} Results", game_id))
    }

    fn record_round(&mut self, round: u32, outcome: &RoundOutcome) -> Result<(), ResultsError> {
        self.write_line(&format!("Round {} - {}", round, outcome))
    }

    fn record_summary(
        &mut self,
        human_score: u32,
        computer_score: u32,
        outcome: &GameOutcome,
    ) -> Result<(), ResultsError> {
        self.write_line("\nOverall Scores")?;
        self.write_line(&format!("Player - {}", human_score))?;
        self.write_line(&format!("Computer - {}", computer_score))?;
        self.write_line(&format!("Overall Game Result - {}", outcome))
    }

    fn close_game(&mut self) -> Result<(), ResultsError> {
        if let Some(mut open) = self.open.take() {
            open.file.flush().map_err(|e| ResultsError::Write {
                path: open.path,
                source: e,
            })?;
        }
        Ok(())
    }
}

/// Sink that collects records in memory, for tests and for driving the
/// engine without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Vec<String>,
    open: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }

    /// Every line recorded so far, across all games.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl ResultSink for MemorySink {
    fn open_game(&mut self, game_id: u32) -> Result<(), ResultsError> {
        self.open = true;
        self.lines.push(format!("Game {} Results", game_id));
        Ok(())
    }

    fn record_round(&mut self, round: u32, outcome: &RoundOutcome) -> Result<(), ResultsError> {
        if !self.open {
            return Err(ResultsError::NoOpenGame);
        }
        self.lines.push(format!("Round {} - {}", round, outcome));
        Ok(())
    }

    fn record_summary(
        &mut self,
        human_score: u32,
        computer_score: u32,
        outcome: &GameOutcome,
    ) -> Result<(), ResultsError> {
        if !self.open {
            return Err(ResultsError::NoOpenGame);
        }
        self.lines.push(format!("Player - {}", human_score));
        self.lines.push(format!("Computer - {}", computer_score));
        self.lines.push(format!("Overall Game Result - {}", outcome));
        Ok(())
    }

    fn close_game(&mut self) -> Result<(), ResultsError> {
        self.open = false;
        Ok(())
    }
}
