//! Coordinate mapper for c. positions
//!
//! # Coordinate Systems
//!
//! | System | Basis | Notes |
//! |--------|-------|-------|
//! | Genomic | 1-based | Inclusive exon bounds, `start <= end` on both strands |
//! | Transcript (tx) | 1-based | Contiguous across exons |
//! | CDS (c.) | 1-based | Negative for 5' UTR, `*` for 3' UTR, no `c.0` |
//!
//! ## Key conversions:
//! - CDS → Tx: [`CoordinateMapper::cds_to_tx`], accounts for CDS start/end and UTR regions
//! - Tx → Genomic: [`CoordinateMapper::tx_to_genomic`], accounts for strand and intronic offsets

use crate::error::FerroError;
use crate::hgvs::location::CdsPos;
use crate::reference::transcript::Transcript;

/// Maps coordinates between c., transcript and genomic systems for a transcript
pub struct CoordinateMapper<'a> {
    transcript: &'a Transcript,
}

impl<'a> CoordinateMapper<'a> {
    /// Create a new mapper for a transcript
    pub fn new(transcript: &'a Transcript) -> Self {
        Self { transcript }
    }

    fn conversion_error(&self, msg: impl std::fmt::Display) -> FerroError {
        FerroError::ConversionError {
            msg: format!("{}: {}", self.transcript.id, msg),
        }
    }

    /// Convert a CDS position to a transcript position (the offset is ignored)
    ///
    /// `c.1` is `cds_start`, `c.-1` is the base before it and `c.*1` is the
    /// base after `cds_end`. The result may fall outside the transcript.
    pub fn cds_to_tx(&self, pos: &CdsPos) -> Result<i64, FerroError> {
        let (cds_start, cds_end) = match (self.transcript.cds_start, self.transcript.cds_end) {
            (Some(start), Some(end)) => (start as i64, end as i64),
            _ => return Err(self.conversion_error("transcript has no CDS")),
        };

        Ok(if pos.utr3 {
            cds_end.saturating_add(pos.base)
        } else if pos.base < 1 {
            cds_start.saturating_add(pos.base)
        } else {
            cds_start.saturating_add(pos.base - 1)
        })
    }

    /// Convert a transcript position plus intronic offset to genomic
    pub fn tx_to_genomic(&self, tx_pos: i64, offset: i64) -> Result<u64, FerroError> {
        let tx = u64::try_from(tx_pos)
            .ok()
            .filter(|&t| t >= 1)
            .ok_or_else(|| {
                self.conversion_error(format!("tx position {} is before the transcript", tx_pos))
            })?;

        let genomic = if offset == 0 {
            self.transcript.tx_to_genomic(tx)
        } else {
            self.transcript.intronic_to_genomic(tx, offset)
        };

        genomic.ok_or_else(|| {
            self.conversion_error(format!(
                "tx position {}{:+} does not map to the genome",
                tx, offset
            ))
        })
    }

    /// Convert a CDS position (with any intronic offset) to genomic
    pub fn cds_to_genomic(&self, pos: &CdsPos) -> Result<u64, FerroError> {
        let tx = self.cds_to_tx(pos)?;
        self.tx_to_genomic(tx, pos.offset)
            .map_err(|_| self.conversion_error(format!("c.{} does not map to the genome", pos)))
    }
}
