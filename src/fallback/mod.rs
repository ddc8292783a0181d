//! Fallback resolution from the coding effect and stated genomic position
//!
//! Used when the full HGVS path is skipped or fails. Instead of mapping
//! through a transcript, the pipeline trusts the report's `chrom:pos` as the
//! left anchor and measures the edit from the coding-effect text alone:
//!
//! ```text
//! "45+3_45+5del" --tokenize--> (Deletion, "45+3_45+5", "")
//!                --resolve_range--> length 3
//!                --materialize--> chr1:100 TACG>T
//! ```
//!
//! # Example
//!
//! ```
//! use ferro_hgvs2vcf::fallback::{resolve_fallback, GenomicAnchor};
//! use ferro_hgvs2vcf::reference::{MockProvider, Strand};
//!
//! let provider = MockProvider::with_test_data();
//! let anchor: GenomicAnchor = "chr1:100".parse().unwrap();
//! let call = resolve_fallback("229C>A", &anchor, Strand::Plus, &provider).unwrap();
//! assert_eq!(call.to_string(), "chr1:100:T:A");
//! ```

pub mod materialize;
pub mod range;
pub mod tokenizer;

pub use materialize::{materialize, orient_operand, GenomicAnchor};
pub use range::{resolve_range, MainPosition, PositionRange, PositionToken, ResolvedRange};
pub use tokenizer::{tokenize, Operand, OperationKind, TokenizedEffect, DELIMITER_PRIORITY};

use crate::error::FerroError;
use crate::reference::provider::SequenceAccessor;
use crate::reference::transcript::Strand;
use crate::vcf::VariantCall;

/// Resolve a coding effect against the stated genomic anchor
///
/// `effect` must already be HTML-unescaped and have any dataset rewrites
/// applied. Deletion-insertions are rejected before any range arithmetic.
pub fn resolve_fallback<S: SequenceAccessor + ?Sized>(
    effect: &str,
    anchor: &GenomicAnchor,
    strand: Strand,
    seq: &S,
) -> Result<VariantCall, FerroError> {
    let tokens = tokenize(effect)?;
    if tokens.kind == OperationKind::DeletionInsertion {
        return Err(FerroError::UnsupportedOperation {
            operation: format!("{} '{}'", tokens.kind, effect),
        });
    }

    let operand = Operand::parse(tokens.operand, effect)?;
    let resolved = resolve_range(tokens.range, tokens.kind, &operand)?;
    materialize(
        tokens.kind,
        anchor,
        resolved.length,
        &operand,
        strand,
        effect,
        seq,
    )
}
