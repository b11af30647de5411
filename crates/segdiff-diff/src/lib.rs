//! Token level diffs that survive moved paragraphs and sentences.
//!
//! Texts are tokenized, segmented into paragraphs and sentences, and the
//! segments of both sides are paired by content before the remaining tokens
//! are diffed. A paired segment shows up as an equality wherever it moved to.

mod apply;
mod config;
mod expand;
mod matcher;
mod operation;
mod processor;
pub mod segment_matcher;
pub mod sequence_matcher;
mod serialize;

pub use apply::{apply, old_side};
pub use config::{EngineConfig, EngineConfigError, EngineName, TokenizerName};
pub use matcher::{Cluster, ClusterKey, Matching, clusters};
pub use operation::{Operation, Tag};
pub use processor::{Delta, Deltas, DiffEngine, DiffProcessor, State};
pub use segment_matcher::{SegmentMatcher, SegmentProcessor, diff, diff_segments};
pub use sequence_matcher::{Algorithm, SequenceMatcher, SequenceProcessor};
pub use serialize::{ReplayError, SerializedOperation, replay_new, replay_old, serialize};
