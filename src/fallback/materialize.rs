//! Allele materialization
//!
//! Turns an operation, a genomic anchor and a resolved length into a
//! [`VariantCall`] by reading reference bases through a
//! [`SequenceAccessor`]. The anchor is the literal `chrom:pos` stated by the
//! report; it is never recomputed from transcript coordinates here.

use std::fmt;
use std::str::FromStr;

use crate::error::FerroError;
use crate::fallback::tokenizer::{OperationKind, Operand};
use crate::reference::provider::SequenceAccessor;
use crate::reference::transcript::Strand;
use crate::sequence;
use crate::vcf::VariantCall;

/// Leftmost genomic coordinate used for sequence lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenomicAnchor {
    pub chromosome: String,
    /// 1-based start position
    pub start: u64,
}

impl GenomicAnchor {
    pub fn new(chromosome: impl Into<String>, start: u64) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
        }
    }

    /// Position `offset` bases to the right of the anchor
    fn offset(&self, offset: u64) -> Result<u64, FerroError> {
        self.start.checked_add(offset).ok_or_else(|| {
            FerroError::invalid_position(format!("{} + {} overflows", self, offset))
        })
    }
}

impl FromStr for GenomicAnchor {
    type Err = FerroError;

    /// Parse a `chrom:pos` field such as `chr17:7579472`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = |why: &str| FerroError::invalid_position(format!("'{}': {}", s, why));

        let (chromosome, pos) = s
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| bad("expected chrom:pos"))?;
        if chromosome.is_empty() {
            return Err(bad("missing chromosome"));
        }
        let start: u64 = pos.trim().parse().map_err(|_| bad("position is not an integer"))?;
        if start == 0 {
            return Err(bad("position must be 1-based"));
        }
        Ok(GenomicAnchor::new(chromosome, start))
    }
}

impl fmt::Display for GenomicAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chromosome, self.start)
    }
}

/// Put an operand on the genomic strand
///
/// Literal bases are reverse-complemented on the minus strand; counts are
/// returned untouched.
pub fn orient_operand<S: SequenceAccessor + ?Sized>(
    operand: &Operand,
    strand: Strand,
    seq: &S,
) -> Result<Operand, FerroError> {
    match operand {
        Operand::Bases(bases) if strand.is_reverse() => {
            Ok(Operand::Bases(seq.reverse_complement(bases)?))
        }
        other => Ok(other.clone()),
    }
}

/// Materialize a call for one operation
///
/// `operand` is the operand as written (transcript strand); it is oriented
/// to the genome here.
///
/// | Operation | `ref` | `alt` |
/// |---|---|---|
/// | substitution | `length` bases at the anchor | operand bases |
/// | deletion | anchor..anchor+length | first base of `ref` |
/// | duplication | first base of `alt` | anchor..anchor+length |
/// | insertion | base at the anchor | `ref` + operand (or `N` x count) |
///
/// # Errors
///
/// * [`FerroError::UnsupportedOperation`] for deletion-insertion
/// * [`FerroError::DuplicationLengthMismatch`] when a duplication operand
///   implies a length other than `length`
/// * [`FerroError::InvalidOperand`] when the operand does not fit the
///   operation
/// * accessor errors are propagated unchanged
pub fn materialize<S: SequenceAccessor + ?Sized>(
    kind: OperationKind,
    anchor: &GenomicAnchor,
    length: u64,
    operand: &Operand,
    strand: Strand,
    notation: &str,
    seq: &S,
) -> Result<VariantCall, FerroError> {
    let chrom = anchor.chromosome.as_str();
    let pos = anchor.start;
    let invalid_operand = |operand: &Operand| FerroError::InvalidOperand {
        operand: operand_text(operand),
        notation: notation.to_string(),
    };
    let operand = orient_operand(operand, strand, seq)?;

    match kind {
        OperationKind::Substitution => {
            let alt = match &operand {
                Operand::Bases(bases) if length > 1 || bases.len() == 1 => bases.clone(),
                other => return Err(invalid_operand(other)),
            };
            let end = anchor.offset(length.saturating_sub(1))?;
            let reference = seq.fetch_bases(chrom, pos, end)?;
            if reference == alt {
                log::debug!(
                    "{}: substitution at {} matches the reference ({})",
                    notation,
                    anchor,
                    reference
                );
            }
            Ok(VariantCall::new(chrom, pos, reference, alt))
        }
        OperationKind::Deletion => {
            let reference = seq.fetch_bases(chrom, pos, anchor.offset(length)?)?;
            Ok(VariantCall::deletion(chrom, pos, &reference))
        }
        OperationKind::Duplication => {
            if let Some(implied) = operand.implied_length() {
                if implied != length {
                    return Err(FerroError::DuplicationLengthMismatch {
                        notation: notation.to_string(),
                        resolved: length,
                        operand: implied,
                    });
                }
            }
            let alternate = seq.fetch_bases(chrom, pos, anchor.offset(length)?)?;
            let reference: String = alternate.chars().take(1).collect();
            Ok(VariantCall::new(chrom, pos, reference, alternate))
        }
        OperationKind::Insertion => {
            if length != 2 {
                return Err(FerroError::InvalidInsertionRange {
                    notation: notation.to_string(),
                });
            }
            let inserted = match &operand {
                Operand::Bases(bases) => bases.clone(),
                Operand::Count(n) => match sequence::placeholder_bases(*n) {
                    Some(placeholder) => placeholder,
                    None => return Err(invalid_operand(&operand)),
                },
                other => return Err(invalid_operand(other)),
            };
            let anchor_base = seq.fetch_base(chrom, pos)?;
            Ok(VariantCall::insertion(chrom, pos, anchor_base, &inserted))
        }
        OperationKind::DeletionInsertion => Err(FerroError::UnsupportedOperation {
            operation: format!("{} '{}'", kind, notation),
        }),
    }
}

fn operand_text(operand: &Operand) -> String {
    match operand {
        Operand::None => String::new(),
        Operand::Count(n) => n.to_string(),
        Operand::Bases(bases) => bases.clone(),
    }
}
