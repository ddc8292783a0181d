//! Transcript and exon models
//!
//! # Coordinate System
//!
//! All coordinates in this module are **1-based inclusive**:
//!
//! | Field | Basis | Notes |
//! |-------|-------|-------|
//! | `Exon.start`, `Exon.end` | 1-based | Transcript coordinates (inclusive) |
//! | `Exon.genomic_start`, `Exon.genomic_end` | 1-based | Genomic coordinates (inclusive, `start <= end` on both strands) |
//! | `Transcript.cds_start`, `Transcript.cds_end` | 1-based | CDS boundaries in transcript space |

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::FerroError;

/// Strand orientation of a transcript relative to the genome
///
/// `c.` notation is always written on the transcript (mRNA) strand, so on
/// [`Strand::Minus`] literal bases must be reverse-complemented before they
/// are placed on the genome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Strand {
    #[serde(rename = "+")]
    #[default]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Strand {
    /// True for the reverse (minus) strand
    pub fn is_reverse(&self) -> bool {
        matches!(self, Strand::Minus)
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}

impl FromStr for Strand {
    type Err = FerroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Strand::Plus),
            "-" => Ok(Strand::Minus),
            other => Err(FerroError::InvalidStrand {
                value: other.to_string(),
            }),
        }
    }
}

/// An exon in a transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exon {
    /// Exon number (1-based)
    pub number: u32,
    /// Start position in transcript coordinates (1-based, inclusive)
    pub start: u64,
    /// End position in transcript coordinates (1-based, inclusive)
    pub end: u64,
    /// Genomic start position (1-based, inclusive, lowest coordinate)
    pub genomic_start: u64,
    /// Genomic end position (1-based, inclusive, highest coordinate)
    pub genomic_end: u64,
}

impl Exon {
    /// Create a new exon with transcript and genomic coordinates
    pub fn new(number: u32, start: u64, end: u64, genomic_start: u64, genomic_end: u64) -> Self {
        Self {
            number,
            start,
            end,
            genomic_start,
            genomic_end,
        }
    }

    /// Length of the exon
    pub fn len(&self) -> u64 {
        if self.end >= self.start {
            self.end - self.start + 1
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if a transcript position is within this exon
    pub fn contains(&self, pos: u64) -> bool {
        pos >= self.start && pos <= self.end
    }
}

/// A transcript with its exon structure
///
/// Deserialized records go through [`Transcript::new`], so exons listed in
/// genomic order (descending transcript order on the minus strand) are
/// sorted before lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TranscriptRecord")]
pub struct Transcript {
    /// Transcript accession (e.g., "NM_000546.5")
    pub id: String,

    /// Gene symbol (e.g., "TP53")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gene_symbol: Option<String>,

    /// Chromosome name as used by the sequence accessor (e.g., "chr17")
    pub chromosome: String,

    /// Strand orientation
    pub strand: Strand,

    /// CDS start position (1-based, in transcript coordinates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cds_start: Option<u64>,

    /// CDS end position (1-based, in transcript coordinates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cds_end: Option<u64>,

    /// Exons sorted by transcript position
    pub exons: Vec<Exon>,
}

/// Serialized form of [`Transcript`]
#[derive(Deserialize)]
struct TranscriptRecord {
    id: String,
    #[serde(default)]
    gene_symbol: Option<String>,
    chromosome: String,
    strand: Strand,
    #[serde(default)]
    cds_start: Option<u64>,
    #[serde(default)]
    cds_end: Option<u64>,
    exons: Vec<Exon>,
}

impl From<TranscriptRecord> for Transcript {
    fn from(record: TranscriptRecord) -> Self {
        let mut transcript = Transcript::new(
            record.id,
            record.chromosome,
            record.strand,
            record.cds_start,
            record.cds_end,
            record.exons,
        );
        transcript.gene_symbol = record.gene_symbol;
        transcript
    }
}

impl Transcript {
    /// Create a new transcript; exons are sorted by transcript position
    pub fn new(
        id: impl Into<String>,
        chromosome: impl Into<String>,
        strand: Strand,
        cds_start: Option<u64>,
        cds_end: Option<u64>,
        mut exons: Vec<Exon>,
    ) -> Self {
        exons.sort_by_key(|e| e.start);
        Self {
            id: id.into(),
            gene_symbol: None,
            chromosome: chromosome.into(),
            strand,
            cds_start,
            cds_end,
            exons,
        }
    }

    /// Set the gene symbol
    pub fn with_gene_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.gene_symbol = Some(symbol.into());
        self
    }

    /// Check if this is a coding transcript
    pub fn is_coding(&self) -> bool {
        self.cds_start.is_some() && self.cds_end.is_some()
    }

    /// Transcript length (sum of exon lengths)
    pub fn length(&self) -> u64 {
        self.exons.iter().map(Exon::len).sum()
    }

    /// Find which exon contains a transcript position using binary search
    pub fn exon_at(&self, pos: u64) -> Option<&Exon> {
        self.exons
            .binary_search_by(|e| {
                if pos < e.start {
                    Ordering::Greater
                } else if pos > e.end {
                    Ordering::Less
                } else {
                    Ordering::Equal
                }
            })
            .ok()
            .map(|i| &self.exons[i])
    }

    /// Map an exonic transcript position to its genomic position
    pub fn tx_to_genomic(&self, tx_pos: u64) -> Option<u64> {
        let exon = self.exon_at(tx_pos)?;
        let offset_in_exon = tx_pos - exon.start;
        match self.strand {
            Strand::Plus => Some(exon.genomic_start + offset_in_exon),
            Strand::Minus => exon.genomic_end.checked_sub(offset_in_exon),
        }
    }

    /// Map an intronic position (exon boundary plus signed offset) to genomic
    ///
    /// A positive offset must hang off the last base of an exon and a negative
    /// offset off the first base of an exon; anything else is not an intronic
    /// position of this transcript.
    pub fn intronic_to_genomic(&self, tx_boundary: u64, offset: i64) -> Option<u64> {
        let exon = self.exon_at(tx_boundary)?;
        let at_boundary = match offset.cmp(&0) {
            Ordering::Greater => tx_boundary == exon.end,
            Ordering::Less => tx_boundary == exon.start,
            Ordering::Equal => true,
        };
        if !at_boundary {
            return None;
        }

        let genomic = self.tx_to_genomic(tx_boundary)? as i64;
        let mapped = match self.strand {
            Strand::Plus => genomic.checked_add(offset)?,
            Strand::Minus => genomic.checked_sub(offset)?,
        };
        u64::try_from(mapped).ok().filter(|&g| g >= 1)
    }
}
