//! Reference collaborator traits
//!
//! Defines the two read-only capabilities the resolver consumes: genomic
//! sequence access and transcript lookup. Both are injected rather than held
//! globally, so the range resolver and allele materializer can run against
//! in-memory fakes such as [`MockProvider`](crate::reference::MockProvider).
//!
//! Implementations are opened once and shared immutably across resolutions;
//! the parallel batch API additionally requires them to be `Sync`.

use std::sync::Arc;

use crate::error::FerroError;
use crate::reference::transcript::Transcript;
use crate::sequence;

/// Trait for fetching genomic reference bases
pub trait SequenceAccessor {
    /// Fetch the bases of a 1-based inclusive range
    ///
    /// # Arguments
    ///
    /// * `chromosome` - Chromosome name (e.g., "chr1")
    /// * `start` - 1-based start position (inclusive)
    /// * `end` - 1-based end position (inclusive)
    ///
    /// # Returns
    ///
    /// The uppercase bases, or [`FerroError::SequenceNotFound`] if the
    /// chromosome is unknown or the range is out of bounds.
    fn fetch_bases(&self, chromosome: &str, start: u64, end: u64) -> Result<String, FerroError>;

    /// Reverse complement of an arbitrary base string
    ///
    /// Case-preserving; fails with [`FerroError::InvalidBase`] on characters
    /// outside `{A,C,G,T,N}`.
    fn reverse_complement(&self, bases: &str) -> Result<String, FerroError> {
        sequence::reverse_complement(bases)
    }

    /// Fetch a single base
    fn fetch_base(&self, chromosome: &str, pos: u64) -> Result<char, FerroError> {
        self.fetch_bases(chromosome, pos, pos)?
            .chars()
            .next()
            .ok_or_else(|| FerroError::SequenceNotFound {
                chromosome: chromosome.to_string(),
                start: pos,
                end: pos,
            })
    }
}

/// Trait for resolving transcript metadata by name
pub trait TranscriptLookup {
    /// Look up a transcript; `None` when the database has no such record
    fn resolve_transcript(&self, name: &str) -> Option<Transcript>;

    /// Check if a transcript exists
    fn has_transcript(&self, name: &str) -> bool {
        self.resolve_transcript(name).is_some()
    }
}

impl<S: SequenceAccessor + ?Sized> SequenceAccessor for &S {
    fn fetch_bases(&self, chromosome: &str, start: u64, end: u64) -> Result<String, FerroError> {
        (**self).fetch_bases(chromosome, start, end)
    }

    fn reverse_complement(&self, bases: &str) -> Result<String, FerroError> {
        (**self).reverse_complement(bases)
    }
}

impl<S: SequenceAccessor + ?Sized> SequenceAccessor for Box<S> {
    fn fetch_bases(&self, chromosome: &str, start: u64, end: u64) -> Result<String, FerroError> {
        (**self).fetch_bases(chromosome, start, end)
    }

    fn reverse_complement(&self, bases: &str) -> Result<String, FerroError> {
        (**self).reverse_complement(bases)
    }
}

impl<S: SequenceAccessor + ?Sized> SequenceAccessor for Arc<S> {
    fn fetch_bases(&self, chromosome: &str, start: u64, end: u64) -> Result<String, FerroError> {
        (**self).fetch_bases(chromosome, start, end)
    }

    fn reverse_complement(&self, bases: &str) -> Result<String, FerroError> {
        (**self).reverse_complement(bases)
    }
}

impl<T: TranscriptLookup + ?Sized> TranscriptLookup for &T {
    fn resolve_transcript(&self, name: &str) -> Option<Transcript> {
        (**self).resolve_transcript(name)
    }
}

impl<T: TranscriptLookup + ?Sized> TranscriptLookup for Box<T> {
    fn resolve_transcript(&self, name: &str) -> Option<Transcript> {
        (**self).resolve_transcript(name)
    }
}

impl<T: TranscriptLookup + ?Sized> TranscriptLookup for Arc<T> {
    fn resolve_transcript(&self, name: &str) -> Option<Transcript> {
        (**self).resolve_transcript(name)
    }
}
