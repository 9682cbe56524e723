//! Records of training and play statistics.
//!
//! A [`Record`] is a set of named values produced by a training step or at
//! the end of an episode. Records are handed to a [`Recorder`], which
//! decides where they end up (memory, TensorBoard, nowhere).
//!
//! ```rust
//! use serpent_core::record::{Record, RecordValue};
//!
//! let record = Record::from_slice(&[
//!     ("loss", RecordValue::Scalar(0.25)),
//!     ("score", RecordValue::Scalar(3.0)),
//! ]);
//! assert_eq!(record.get_scalar("score").unwrap(), 3.0);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
