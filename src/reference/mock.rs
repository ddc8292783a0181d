//! Mock reference provider for testing
//!
//! Holds genomic sequences and transcript records in memory and implements
//! both [`SequenceAccessor`] and [`TranscriptLookup`].

use crate::error::FerroError;
use crate::reference::provider::{SequenceAccessor, TranscriptLookup};
use crate::reference::transcript::Transcript;
use std::collections::HashMap;
use std::path::Path;

/// Mock reference provider backed by in-memory maps
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    transcripts: HashMap<String, Transcript>,
    /// Genomic sequences keyed by contig name
    genomic_sequences: HashMap<String, String>,
}

impl MockProvider {
    /// Create an empty mock provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Load transcripts from a JSON file (an array of transcript records)
    pub fn from_json(path: &Path) -> Result<Self, FerroError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Load transcripts from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self, FerroError> {
        let transcripts: Vec<Transcript> = serde_json::from_str(content)?;

        let map: HashMap<String, Transcript> = transcripts
            .into_iter()
            .map(|tx| (tx.id.clone(), tx))
            .collect();

        Ok(Self {
            transcripts: map,
            genomic_sequences: HashMap::new(),
        })
    }

    /// Add a transcript to the provider
    pub fn add_transcript(&mut self, transcript: Transcript) {
        self.transcripts.insert(transcript.id.clone(), transcript);
    }

    /// Add a genomic sequence for a contig/chromosome (stored uppercase)
    pub fn add_genomic_sequence(&mut self, contig: impl Into<String>, sequence: impl AsRef<str>) {
        self.genomic_sequences
            .insert(contig.into(), sequence.as_ref().to_ascii_uppercase());
    }

    /// Builder form of [`add_genomic_sequence`](Self::add_genomic_sequence)
    pub fn with_genomic_sequence(
        mut self,
        contig: impl Into<String>,
        sequence: impl AsRef<str>,
    ) -> Self {
        self.add_genomic_sequence(contig, sequence);
        self
    }

    /// Builder form of [`add_transcript`](Self::add_transcript)
    pub fn with_transcript(mut self, transcript: Transcript) -> Self {
        self.add_transcript(transcript);
        self
    }

    /// Number of transcripts held
    pub fn transcript_count(&self) -> usize {
        self.transcripts.len()
    }

    /// Create a provider with a small synthetic genome and two transcripts
    ///
    /// `chr1` is 400 bases of repeated `ACGT`, so the base at position `p`
    /// is `"ACGT"[(p - 1) % 4]`.
    ///
    /// | Transcript | Strand | Exon 1 (tx → g) | Exon 2 (tx → g) | CDS (tx) |
    /// |---|---|---|---|---|
    /// | `NM_000001.1` | + | 1-50 → 101-150 | 51-100 → 201-250 | 11-90 |
    /// | `NM_000002.1` | - | 1-50 → 400-351 | 51-100 → 300-251 | 11-90 |
    pub fn with_test_data() -> Self {
        use crate::reference::transcript::{Exon, Strand};

        let mut provider = Self::new();
        provider.add_genomic_sequence("chr1", "ACGT".repeat(100));

        provider.add_transcript(
            Transcript::new(
                "NM_000001.1",
                "chr1",
                Strand::Plus,
                Some(11),
                Some(90),
                vec![Exon::new(1, 1, 50, 101, 150), Exon::new(2, 51, 100, 201, 250)],
            )
            .with_gene_symbol("PLUS1"),
        );

        provider.add_transcript(
            Transcript::new(
                "NM_000002.1",
                "chr1",
                Strand::Minus,
                Some(11),
                Some(90),
                vec![Exon::new(1, 1, 50, 351, 400), Exon::new(2, 51, 100, 251, 300)],
            )
            .with_gene_symbol("MINUS1"),
        );

        provider
    }
}

/// Strip a trailing `.N` version from an accession
fn base_accession(id: &str) -> &str {
    id.split_once('.').map_or(id, |(base, _)| base)
}

impl SequenceAccessor for MockProvider {
    fn fetch_bases(&self, chromosome: &str, start: u64, end: u64) -> Result<String, FerroError> {
        let not_found = || FerroError::SequenceNotFound {
            chromosome: chromosome.to_string(),
            start,
            end,
        };

        let seq = self.genomic_sequences.get(chromosome).ok_or_else(not_found)?;
        if start == 0 || end < start || end as usize > seq.len() {
            return Err(not_found());
        }
        Ok(seq[(start - 1) as usize..end as usize].to_string())
    }
}

impl TranscriptLookup for MockProvider {
    fn resolve_transcript(&self, name: &str) -> Option<Transcript> {
        if let Some(tx) = self.transcripts.get(name) {
            return Some(tx.clone());
        }

        // Fall back to an unversioned match; the highest version wins
        let wanted = base_accession(name);
        self.transcripts
            .values()
            .filter(|tx| base_accession(&tx.id) == wanted)
            .max_by(|a, b| a.id.cmp(&b.id))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::transcript::Strand;

    #[test]
    fn test_fetch_bases() {
        let provider = MockProvider::with_test_data();
        assert_eq!(provider.fetch_bases("chr1", 1, 4).unwrap(), "ACGT");
        assert_eq!(provider.fetch_bases("chr1", 100, 102).unwrap(), "TAC");
        assert_eq!(provider.fetch_base("chr1", 400).unwrap(), 'T');
    }

    #[test]
    fn test_fetch_bases_out_of_bounds() {
        let provider = MockProvider::with_test_data();
        assert!(matches!(
            provider.fetch_bases("chr1", 399, 401),
            Err(FerroError::SequenceNotFound { .. })
        ));
        assert!(provider.fetch_bases("chr1", 0, 1).is_err());
        assert!(provider.fetch_bases("chr1", 5, 4).is_err());
        assert!(provider.fetch_bases("chrZ", 1, 1).is_err());
    }

    #[test]
    fn test_sequences_stored_uppercase() {
        let provider = MockProvider::new().with_genomic_sequence("chrM", "acgtn");
        assert_eq!(provider.fetch_bases("chrM", 1, 5).unwrap(), "ACGTN");
    }

    #[test]
    fn test_resolve_transcript_versioned_and_unversioned() {
        let provider = MockProvider::with_test_data();
        assert!(provider.resolve_transcript("NM_000001.1").is_some());
        let tx = provider.resolve_transcript("NM_000002").unwrap();
        assert_eq!(tx.strand, Strand::Minus);
        assert!(provider.resolve_transcript("NM_000003.1").is_none());
        assert!(!provider.has_transcript("NM_999999"));
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[{
            "id": "NM_JSON.2",
            "chromosome": "chr7",
            "strand": "-",
            "cds_start": 5,
            "cds_end": 20,
            "exons": [{"number": 1, "start": 1, "end": 30, "genomic_start": 1001, "genomic_end": 1030}]
        }]"#;
        let provider = MockProvider::from_json_str(json).unwrap();
        assert_eq!(provider.transcript_count(), 1);
        let tx = provider.resolve_transcript("NM_JSON.2").unwrap();
        assert_eq!(tx.chromosome, "chr7");
        assert_eq!(tx.tx_to_genomic(1), Some(1030));
    }

    #[test]
    fn test_boxed_accessor() {
        let boxed: Box<dyn SequenceAccessor> = Box::new(MockProvider::with_test_data());
        assert_eq!(boxed.fetch_bases("chr1", 5, 6).unwrap(), "AC");
        assert_eq!(boxed.reverse_complement("AACG").unwrap(), "CGTT");
    }
}
