//! Resolved variant call
//!
//! A [`VariantCall`] is the `(chromosome, position, ref, alt)` tuple that
//! both resolution paths produce, using VCF conventions: 1-based position of
//! the first reference base, and a shared left-anchor base on indels.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FerroError;
use crate::sequence;

/// A single biallelic variant in VCF coordinates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantCall {
    /// Chromosome name (e.g., "chr1")
    pub chrom: String,

    /// 1-based position of the first base in the reference allele
    pub pos: u64,

    /// Reference allele (non-empty string of ACGTN)
    #[serde(rename = "ref")]
    pub reference: String,

    /// Alternate allele (non-empty string of ACGTN)
    #[serde(rename = "alt")]
    pub alternate: String,
}

impl VariantCall {
    /// Create a new call from its four fields
    pub fn new(
        chrom: impl Into<String>,
        pos: u64,
        reference: impl Into<String>,
        alternate: impl Into<String>,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
            reference: reference.into(),
            alternate: alternate.into(),
        }
    }

    /// Create a call for a single-base substitution
    pub fn snv(chrom: &str, pos: u64, reference: char, alternate: char) -> Self {
        Self::new(chrom, pos, reference.to_string(), alternate.to_string())
    }

    /// Create a left-anchored deletion; `reference` includes the anchor base
    pub fn deletion(chrom: &str, pos: u64, reference: &str) -> Self {
        let anchor: String = reference.chars().take(1).collect();
        Self::new(chrom, pos, reference, anchor)
    }

    /// Create a left-anchored insertion of `inserted` after `anchor`
    pub fn insertion(chrom: &str, pos: u64, anchor: char, inserted: &str) -> Self {
        Self::new(chrom, pos, anchor.to_string(), format!("{}{}", anchor, inserted))
    }

    /// Get the end position (1-based, inclusive) of the reference allele
    pub fn end_pos(&self) -> u64 {
        (self.pos + self.reference.len() as u64).saturating_sub(1)
    }

    /// Check if this is a SNV (single nucleotide variant)
    pub fn is_snv(&self) -> bool {
        self.reference.len() == 1 && self.alternate.len() == 1
    }

    /// Check if this is a simple left-anchored insertion
    pub fn is_insertion(&self) -> bool {
        self.reference.len() == 1
            && self.alternate.len() > 1
            && self.alternate.starts_with(&self.reference)
    }

    /// Check if this is a simple left-anchored deletion
    pub fn is_deletion(&self) -> bool {
        self.reference.len() > 1
            && self.alternate.len() == 1
            && self.reference.starts_with(&self.alternate)
    }

    /// Get the variant type as a string
    pub fn variant_type(&self) -> &'static str {
        if self.is_snv() {
            "SNV"
        } else if self.is_insertion() {
            "INS"
        } else if self.is_deletion() {
            "DEL"
        } else {
            "COMPLEX"
        }
    }

    /// Check the allele invariants: a 1-based position and non-empty
    /// uppercase alleles over `{A,C,G,T,N}`
    pub fn validate(&self) -> Result<(), FerroError> {
        if self.pos == 0 {
            return Err(FerroError::invalid_position(format!(
                "{}: position must be 1-based",
                self
            )));
        }
        for allele in [&self.reference, &self.alternate] {
            if allele.is_empty() {
                return Err(FerroError::ConversionError {
                    msg: format!("{}: empty allele", self),
                });
            }
            sequence::validate_bases(allele)?;
        }
        Ok(())
    }
}

impl fmt::Display for VariantCall {
    /// Formats as `chrom:pos:ref:alt`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.chrom, self.pos, self.reference, self.alternate
        )
    }
}
