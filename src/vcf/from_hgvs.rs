//! Full c. HGVS to VCF resolution
//!
//! Parses a `transcript:c.change` string, maps both ends of the interval
//! through the transcript's exon table and materializes VCF alleles from the
//! reference genome.
//!
//! # Coordinate System
//!
//! | Context | Basis | Notes |
//! |---------|-------|-------|
//! | HGVS positions | 1-based | c. positions from the parsed variant |
//! | Genomic / VCF POS | 1-based | After mapping; sorted so `start <= end` |
//!
//! VCF requires an anchor base for length-changing edits. Deletions and
//! duplications are anchored on the base before the affected span,
//! insertions on the left flanking position.

use crate::convert::mapper::CoordinateMapper;
use crate::error::FerroError;
use crate::hgvs::edit::{InsertedSequence, NaEdit};
use crate::hgvs::parser::parse_cds_variant;
use crate::reference::provider::{SequenceAccessor, TranscriptLookup};
use crate::reference::transcript::{Strand, Transcript};
use crate::sequence;

use super::record::VariantCall;

/// Resolves a complete `transcript:c.change` string to a [`VariantCall`]
///
/// This is the rich path tried first by the orchestrator. Any error it
/// returns is a candidate for the fallback path (see
/// [`FerroError::allows_fallback`]).
pub trait FullHgvsResolver {
    fn resolve_full_hgvs(
        &self,
        variant_name: &str,
        seq: &dyn SequenceAccessor,
        transcripts: &dyn TranscriptLookup,
    ) -> Result<VariantCall, FerroError>;
}

/// Default [`FullHgvsResolver`] built on the c. parser and [`CoordinateMapper`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptHgvsResolver;

impl TranscriptHgvsResolver {
    pub fn new() -> Self {
        Self
    }
}

impl FullHgvsResolver for TranscriptHgvsResolver {
    fn resolve_full_hgvs(
        &self,
        variant_name: &str,
        seq: &dyn SequenceAccessor,
        transcripts: &dyn TranscriptLookup,
    ) -> Result<VariantCall, FerroError> {
        let variant = parse_cds_variant(variant_name)?;
        let accession = variant.accession.full();
        let transcript =
            transcripts
                .resolve_transcript(&accession)
                .ok_or_else(|| FerroError::ReferenceNotFound {
                    id: accession.clone(),
                })?;

        let mapper = CoordinateMapper::new(&transcript);
        let g_first = mapper.cds_to_genomic(&variant.interval.start)?;
        let g_last = mapper.cds_to_genomic(&variant.interval.last())?;
        let (start, end) = if g_first <= g_last {
            (g_first, g_last)
        } else {
            (g_last, g_first)
        };

        let builder = CallBuilder {
            transcript: &transcript,
            seq,
            variant_name,
        };
        let call = builder.build(start, end, &variant.edit)?;
        log::trace!("{} resolved to {}", variant_name, call);
        Ok(call)
    }
}

/// Materializes one edit at a sorted genomic span
struct CallBuilder<'a> {
    transcript: &'a Transcript,
    seq: &'a dyn SequenceAccessor,
    variant_name: &'a str,
}

impl CallBuilder<'_> {
    fn chrom(&self) -> &str {
        &self.transcript.chromosome
    }

    fn conversion_error(&self, msg: impl std::fmt::Display) -> FerroError {
        FerroError::ConversionError {
            msg: format!("{}: {}", self.variant_name, msg),
        }
    }

    /// Put transcript-strand bases on the genomic strand
    fn orient(&self, bases: &str) -> Result<String, FerroError> {
        match self.transcript.strand {
            Strand::Plus => Ok(bases.to_string()),
            Strand::Minus => self.seq.reverse_complement(bases),
        }
    }

    fn orient_base(&self, base: char) -> Result<char, FerroError> {
        match self.transcript.strand {
            Strand::Plus => Ok(base),
            Strand::Minus => sequence::complement(base).ok_or_else(|| FerroError::InvalidBase {
                base,
                sequence: base.to_string(),
            }),
        }
    }

    fn inserted(&self, sequence: &InsertedSequence) -> Result<String, FerroError> {
        match sequence {
            InsertedSequence::Literal(bases) => self.orient(bases),
            InsertedSequence::Count(n) => sequence::placeholder_bases(*n).ok_or_else(|| {
                self.conversion_error(format!("cannot insert {} placeholder bases", n))
            }),
        }
    }

    fn anchor_before(&self, start: u64) -> Result<(u64, char), FerroError> {
        let pos = start
            .checked_sub(1)
            .filter(|&p| p >= 1)
            .ok_or_else(|| self.conversion_error("no anchor base before position 1"))?;
        Ok((pos, self.seq.fetch_base(self.chrom(), pos)?))
    }

    /// Fetch the affected span and check it against any stated sequence or length
    fn affected(
        &self,
        start: u64,
        end: u64,
        stated: &Option<String>,
        length: &Option<u64>,
    ) -> Result<String, FerroError> {
        let found = self.seq.fetch_bases(self.chrom(), start, end)?;
        if let Some(stated) = stated {
            let expected = self.orient(stated)?;
            if expected != found {
                return Err(FerroError::ReferenceMismatch {
                    location: format!("{}:{}-{}", self.chrom(), start, end),
                    expected,
                    found,
                });
            }
        }
        if let Some(n) = length {
            if *n != found.len() as u64 {
                return Err(self.conversion_error(format!(
                    "stated length {} but interval spans {} bases",
                    n,
                    found.len()
                )));
            }
        }
        Ok(found)
    }

    fn build(&self, start: u64, end: u64, edit: &NaEdit) -> Result<VariantCall, FerroError> {
        let chrom = self.chrom();
        match edit {
            NaEdit::Substitution {
                reference,
                alternative,
            } => {
                if start != end {
                    return Err(self.conversion_error("substitution spans more than one base"));
                }
                let found = self.seq.fetch_base(chrom, start)?;
                let expected = self.orient_base(*reference)?;
                if expected != found {
                    return Err(FerroError::ReferenceMismatch {
                        location: format!("{}:{}", chrom, start),
                        expected: expected.to_string(),
                        found: found.to_string(),
                    });
                }
                Ok(VariantCall::snv(
                    chrom,
                    start,
                    found,
                    self.orient_base(*alternative)?,
                ))
            }
            NaEdit::SubstitutionNoRef { alternative } => {
                if start != end {
                    return Err(self.conversion_error("substitution spans more than one base"));
                }
                let found = self.seq.fetch_base(chrom, start)?;
                Ok(VariantCall::snv(
                    chrom,
                    start,
                    found,
                    self.orient_base(*alternative)?,
                ))
            }
            NaEdit::Deletion { sequence, length } => {
                let deleted = self.affected(start, end, sequence, length)?;
                let (anchor_pos, anchor) = self.anchor_before(start)?;
                Ok(VariantCall::deletion(
                    chrom,
                    anchor_pos,
                    &format!("{}{}", anchor, deleted),
                ))
            }
            NaEdit::Duplication { sequence, length } => {
                let duplicated = self.affected(start, end, sequence, length)?;
                let (anchor_pos, anchor) = self.anchor_before(start)?;
                Ok(VariantCall::insertion(chrom, anchor_pos, anchor, &duplicated))
            }
            NaEdit::Insertion { sequence } => {
                if end != start + 1 {
                    return Err(FerroError::InvalidInsertionRange {
                        notation: self.variant_name.to_string(),
                    });
                }
                let inserted = self.inserted(sequence)?;
                let anchor = self.seq.fetch_base(chrom, start)?;
                Ok(VariantCall::insertion(chrom, start, anchor, &inserted))
            }
            NaEdit::Delins { sequence } => {
                let deleted = self.seq.fetch_bases(chrom, start, end)?;
                let inserted = self.inserted(sequence)?;
                if deleted.len() == inserted.len() {
                    Ok(VariantCall::new(chrom, start, deleted, inserted))
                } else {
                    let (anchor_pos, anchor) = self.anchor_before(start)?;
                    Ok(VariantCall::new(
                        chrom,
                        anchor_pos,
                        format!("{}{}", anchor, deleted),
                        format!("{}{}", anchor, inserted),
                    ))
                }
            }
        }
    }
}
