// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-hgvs2vcf: clinical c. HGVS notation to VCF coordinates
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Each report variant is resolved by trying the full transcript-aware HGVS
//! path first and, when that is skipped or fails, a fallback that measures
//! the edit from the coding-effect text and anchors it at the report's
//! stated genomic position.
//!
//! # Example
//!
//! ```
//! use ferro_hgvs2vcf::{resolve_variant, MockProvider};
//!
//! let provider = MockProvider::with_test_data();
//!
//! let call = resolve_variant(
//!     "NM_000001.1:c.1G>A",
//!     "missense",
//!     "1G>A",
//!     "chr1:111",
//!     "+",
//!     &provider,
//!     &provider,
//! )
//! .unwrap();
//! assert_eq!(call.to_string(), "chr1:111:G:A");
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod fallback;
pub mod hgvs;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod preprocess;
pub mod reference;
pub mod resolve;
pub mod sequence;
pub mod vcf;

// Re-export commonly used types
pub use config::{FerroConfig, ResolverConfig};
pub use error::{ErrorCode, FerroError};
pub use fallback::{resolve_fallback, GenomicAnchor, OperationKind};
pub use hgvs::parser::parse_cds_variant;
pub use reference::{MockProvider, SequenceAccessor, Strand, Transcript, TranscriptLookup};
pub use resolve::{resolve_variant, Resolution, ResolutionPath, VariantRequest, VariantResolver};
pub use vcf::{FullHgvsResolver, TranscriptHgvsResolver, VariantCall};

/// Result type alias for ferro-hgvs2vcf operations
pub type Result<T> = std::result::Result<T, FerroError>;
