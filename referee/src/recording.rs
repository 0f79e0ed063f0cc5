use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use fiar::GameEvent;
use serde::Serialize;

use crate::Outcome;

/// Writes each game's outcome and event stream as a JSON file into a
/// directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
}

#[derive(Serialize)]
struct GameRecording<'a> {
    outcome: Outcome,
    events: &'a [GameEvent],
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self { num: 1, directory })
    }

    pub fn write_game(&mut self, outcome: Outcome, events: &[GameEvent]) -> anyhow::Result<()> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(filepath)?);
        serde_json::to_writer_pretty(writer, &GameRecording { outcome, events })?;
        self.num += 1;
        Ok(())
    }
}
