//! Reference data abstraction
//!
//! Provides the capability traits through which resolution reads genomic
//! sequence and transcript metadata, plus an in-memory implementation.

pub mod mock;
pub mod provider;
pub mod transcript;

pub use mock::MockProvider;
pub use provider::{SequenceAccessor, TranscriptLookup};
pub use transcript::{Exon, Strand, Transcript};
