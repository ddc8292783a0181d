//! Parallel batch resolution for ferro-hgvs2vcf
//!
//! Variants in a report resolve independently, so a batch can be spread
//! across rayon's thread pool with one shared, read-only resolver, sequence
//! accessor and transcript lookup. Enable with the `parallel` feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use ferro_hgvs2vcf::parallel::resolve_parallel;
//! use ferro_hgvs2vcf::{MockProvider, VariantRequest, VariantResolver};
//!
//! let provider = MockProvider::with_test_data();
//! let resolver = VariantResolver::default();
//! let requests = vec![
//!     VariantRequest::new("NM_000001.1:c.1G>A", "missense", "1G>A", "chr1:111", "+"),
//!     VariantRequest::new("NM_000001.1:c.229C>A", "missense", "229C>A", "chr1:100", "+"),
//! ];
//!
//! let results = resolve_parallel(&resolver, &requests, &provider, &provider);
//! assert_eq!(results.len(), 2);
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::error::FerroError;
use crate::reference::provider::{SequenceAccessor, TranscriptLookup};
use crate::resolve::{Resolution, VariantRequest, VariantResolver};
use crate::vcf::VariantCall;

/// Resolve a batch of variants in parallel
///
/// Returns one result per request. Order is preserved.
pub fn resolve_parallel<S, T>(
    resolver: &VariantResolver,
    requests: &[VariantRequest],
    seq: &S,
    transcripts: &T,
) -> Vec<Result<Resolution, FerroError>>
where
    S: SequenceAccessor + Sync,
    T: TranscriptLookup + Sync,
{
    requests
        .par_iter()
        .map(|request| resolver.resolve(request, seq, transcripts))
        .collect()
}

/// Resolve a batch of variants in parallel, dropping failures
///
/// Returns only the calls that resolved, in input order.
pub fn resolve_parallel_ok<S, T>(
    resolver: &VariantResolver,
    requests: &[VariantRequest],
    seq: &S,
    transcripts: &T,
) -> Vec<VariantCall>
where
    S: SequenceAccessor + Sync,
    T: TranscriptLookup + Sync,
{
    requests
        .par_iter()
        .filter_map(|request| resolver.resolve(request, seq, transcripts).ok())
        .map(|resolution| resolution.call)
        .collect()
}

/// Statistics from a batch resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParallelStats {
    /// Total items processed
    pub total: usize,
    /// Resolved by the full path
    pub full: usize,
    /// Resolved by the fallback path
    pub fallback: usize,
    /// Failed to resolve
    pub errors: usize,
}

impl ParallelStats {
    /// Tally a batch of results
    pub fn from_results(results: &[Result<Resolution, FerroError>]) -> Self {
        use crate::resolve::ResolutionPath;

        let mut stats = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            match result {
                Ok(r) if r.path == ResolutionPath::Full => stats.full += 1,
                Ok(_) => stats.fallback += 1,
                Err(_) => stats.errors += 1,
            }
        }
        stats
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            ((self.full + self.fallback) as f64 / self.total as f64) * 100.0
        }
    }
}
