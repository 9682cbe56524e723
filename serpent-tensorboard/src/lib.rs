//! Writes per-episode statistics of the snake agents as TFRecord files.
use log::warn;
use serpent_core::record::{Record, RecordValue, Recorder};
use std::path::Path;
use tensorboard_rs::summary_writer::SummaryWriter;

/// Write records to TFRecord.
pub struct TensorboardRecorder {
    writer: SummaryWriter,
    step_key: String,
}

impl TensorboardRecorder {
    /// Construct a [`TensorboardRecorder`].
    ///
    /// TFRecord will be stored in `logdir`. Values are indexed by the
    /// episode counter, the `number_game` entry of the records.
    pub fn new<P: AsRef<Path>>(logdir: P) -> Self {
        Self {
            writer: SummaryWriter::new(logdir),
            step_key: "number_game".to_string(),
        }
    }

    fn step(&self, record: &Record) -> Option<usize> {
        match record.get(&self.step_key) {
            Some(RecordValue::Scalar(v)) => Some(*v as usize),
            None => None,
        }
    }
}

impl Recorder for TensorboardRecorder {
    /// Write a given [Record] into a TFRecord.
    ///
    /// A record without the step value is dropped.
    fn write(&mut self, record: Record) {
        let step = match self.step(&record) {
            Some(step) => step,
            None => {
                warn!("Record without scalar {:?} is dropped", self.step_key);
                return;
            }
        };

        for (k, v) in record.iter() {
            if *k != self.step_key {
                let RecordValue::Scalar(v) = v;
                self.writer.add_scalar(k, *v, step);
            }
        }
    }

    fn flush(&mut self) {
        self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempdir::TempDir;

    fn episode(number_game: usize, score: usize) -> Record {
        Record::from_slice(&[
            ("number_game", RecordValue::Scalar(number_game as _)),
            ("score", RecordValue::Scalar(score as _)),
            ("step", RecordValue::Scalar(10.0)),
        ])
    }

    /// Writes the records, closes the writer and returns the total size of the event files.
    fn written_bytes(dir: &Path, records: Vec<Record>) -> Result<u64> {
        let mut recorder = TensorboardRecorder::new(dir);
        for record in records {
            recorder.write(record);
        }
        recorder.flush();
        // The event file is written by a background thread joined on drop.
        drop(recorder);

        let mut bytes = 0;
        for entry in fs::read_dir(dir)? {
            bytes += entry?.metadata()?.len();
        }
        Ok(bytes)
    }

    #[test]
    fn test_write_episodes() -> Result<()> {
        let dir = TempDir::new("tensorboard_recorder")?;
        let episodes = (1..=3).map(|i| episode(i, i % 2)).collect::<Vec<_>>();
        let bytes = written_bytes(dir.path(), episodes)?;
        assert!(bytes > 0);
        Ok(())
    }

    #[test]
    fn test_record_without_step_is_dropped() -> Result<()> {
        let dir = TempDir::new("tensorboard_recorder")?;
        let recorder = TensorboardRecorder::new(dir.path());
        assert_eq!(recorder.step(&episode(7, 1)), Some(7));
        assert_eq!(recorder.step(&Record::from_scalar("score", 1.0)), None);
        drop(recorder);

        let dir1 = TempDir::new("tensorboard_recorder")?;
        let dir2 = TempDir::new("tensorboard_recorder")?;
        let with_episodes = written_bytes(dir1.path(), vec![episode(1, 0), episode(2, 1)])?;
        let with_extra = written_bytes(
            dir2.path(),
            vec![
                episode(1, 0),
                Record::from_scalar("score", 1.0),
                episode(2, 1),
            ],
        )?;
        assert_eq!(with_episodes, with_extra);
        Ok(())
    }
}
