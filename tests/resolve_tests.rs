//! End-to-end resolution tests
//!
//! Covers the report-level entry points: [`resolve_variant`] and
//! [`VariantResolver`] with configuration loaded from TOML files.

use ferro_hgvs2vcf::preprocess::CorrectionKind;
use ferro_hgvs2vcf::reference::Exon;
use ferro_hgvs2vcf::{
    resolve_variant, FerroConfig, FerroError, MockProvider, ResolutionPath, Strand, Transcript,
    VariantCall, VariantRequest, VariantResolver,
};
use rstest::rstest;
use std::io::Write;

fn provider() -> MockProvider {
    MockProvider::with_test_data()
}

// =============================================================================
// Report scenarios
// =============================================================================

#[test]
fn test_scenario_substitution() {
    let call = resolve_variant(
        "NM_000001.1:c.229C>A",
        "missense",
        "229C>A",
        "chr1:100",
        "+",
        &provider(),
        &provider(),
    )
    .unwrap();
    assert_eq!(call, VariantCall::new("chr1", 100, "T", "A"));
}

#[test]
fn test_scenario_intronic_deletion() {
    let call = resolve_variant(
        "NM_000001.1:c.45+3_45+5del",
        "splice",
        "45+3_45+5del",
        "chr1:100",
        "+",
        &provider(),
        &provider(),
    )
    .unwrap();
    assert_eq!(call.reference, "TACG");
    assert_eq!(call.alternate, "T");
}

#[test]
fn test_scenario_minus_strand_insertion() {
    let call = resolve_variant(
        "NM_000002.1:c.123_124insACGT",
        "inframe",
        "123_124insACGT",
        "chr1:102",
        "-",
        &provider(),
        &provider(),
    )
    .unwrap();
    assert_eq!(call.reference, "C");
    assert_eq!(call.alternate, "CACGT");
}

#[rstest]
#[case("2169_*27&gt;T")]
#[case("2169_*27>T")]
fn test_scenario_known_rewrite(#[case] effect: &str) {
    let name = format!("NM_000001.1:c.{}", effect);
    let call = resolve_variant(
        &name,
        "nonframeshift",
        effect,
        "chr1:100",
        "+",
        &provider(),
        &provider(),
    )
    .unwrap();
    assert_eq!(call.reference.len(), 49);
    assert_eq!(call.alternate, "T");
}

#[test]
fn test_scenario_ambiguous_splice_range() {
    let err = resolve_variant(
        "NM_000001.1:c.10+5_20-3del",
        "splice",
        "10+5_20-3del",
        "chr1:100",
        "+",
        &provider(),
        &provider(),
    )
    .unwrap_err();
    assert!(matches!(err, FerroError::AmbiguousSpliceRange { .. }));
    assert_eq!(err.code().as_str(), "E3002");
}

#[rstest]
#[case("2_3delinsCC", "+")]
#[case("45+3_45+5delinsA", "+")]
#[case("2_3delinsCC", "-")]
fn test_delins_on_fallback_path_unsupported(#[case] effect: &str, #[case] strand: &str) {
    let name = format!("NM_000001.1:c.{}", effect);
    let err = resolve_variant(
        &name,
        "splice",
        effect,
        "chr1:100",
        strand,
        &provider(),
        &provider(),
    )
    .unwrap_err();
    assert!(matches!(err, FerroError::UnsupportedOperation { .. }));
}

// =============================================================================
// Path selection
// =============================================================================

#[rstest]
#[case("missense", ResolutionPath::Full)]
#[case("synonymous", ResolutionPath::Full)]
#[case("splice", ResolutionPath::Fallback)]
#[case("Frameshift", ResolutionPath::Fallback)]
#[case("NONFRAMESHIFT", ResolutionPath::Fallback)]
fn test_path_by_functional_effect(#[case] functional: &str, #[case] expected: ResolutionPath) {
    let p = provider();
    let request = VariantRequest::new("NM_000001.1:c.1G>A", functional, "1G>A", "chr1:111", "+");
    let resolution = VariantResolver::default().resolve(&request, &p, &p).unwrap();
    assert_eq!(resolution.path, expected);
    // both paths agree for a simple exonic substitution
    assert_eq!(resolution.call, VariantCall::new("chr1", 111, "G", "A"));
}

#[test]
fn test_full_path_minus_strand_uses_transcript() {
    // The stated position is wrong on purpose; the full path ignores it
    let p = provider();
    let request = VariantRequest::new("NM_000002.1:c.2_3del", "inframe", "2_3del", "chr1:5", "-");
    let resolution = VariantResolver::default().resolve(&request, &p, &p).unwrap();
    assert_eq!(resolution.path, ResolutionPath::Full);
    assert_eq!(resolution.call, VariantCall::new("chr1", 387, "GTA", "G"));
}

#[test]
fn test_reference_mismatch_falls_back() {
    let p = provider();
    let request = VariantRequest::new("NM_000001.1:c.1T>A", "missense", "1T>A", "chr1:111", "+");
    let resolution = VariantResolver::default().resolve(&request, &p, &p).unwrap();
    assert_eq!(resolution.path, ResolutionPath::Fallback);
    assert!(matches!(
        resolution.full_error,
        Some(FerroError::ReferenceMismatch { .. })
    ));
    assert_eq!(resolution.call, VariantCall::new("chr1", 111, "G", "A"));
}

#[test]
fn test_unversioned_transcript_lookup() {
    let p = provider();
    let request = VariantRequest::new("NM_000001:c.2dup", "inframe", "2dup", "chr1:1", "+");
    let resolution = VariantResolver::default().resolve(&request, &p, &p).unwrap();
    assert_eq!(resolution.path, ResolutionPath::Full);
    assert_eq!(resolution.call, VariantCall::new("chr1", 111, "G", "GT"));
}

#[test]
fn test_invalid_genomic_position() {
    let p = provider();
    let request = VariantRequest::new("NM_000001.1:c.229C>A", "splice", "229C>A", "chr1", "+");
    assert!(matches!(
        VariantResolver::default().resolve(&request, &p, &p),
        Err(FerroError::InvalidPosition { .. })
    ));
}

#[test]
fn test_corrections_recorded() {
    let p = provider();
    let request = VariantRequest::new(
        "NM_000001.1:c.229C&gt;A",
        "splice",
        " 229C&gt;A ",
        "chr1:100",
        "+",
    );
    let resolution = VariantResolver::default().resolve(&request, &p, &p).unwrap();
    let kinds: Vec<_> = resolution.corrections.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            CorrectionKind::Whitespace,
            CorrectionKind::HtmlEntity,
            CorrectionKind::HtmlEntity
        ]
    );
}

// =============================================================================
// Custom reference data
// =============================================================================

#[test]
fn test_custom_transcript() {
    let transcript = Transcript::new(
        "NM_TEST.2",
        "chrT",
        Strand::Plus,
        Some(3),
        Some(8),
        vec![Exon::new(1, 1, 10, 11, 20)],
    );
    let p = MockProvider::new()
        .with_genomic_sequence("chrT", "AAAAAAAAAACCCCGGGGTTTTT")
        .with_transcript(transcript);

    // c.1 is tx 3, genomic 13
    let request = VariantRequest::new("NM_TEST.2:c.1C>T", "missense", "1C>T", "chrT:13", "+");
    let resolution = VariantResolver::default().resolve(&request, &p, &p).unwrap();
    assert_eq!(resolution.path, ResolutionPath::Full);
    assert_eq!(resolution.call.to_string(), "chrT:13:C:T");
}

#[test]
fn test_transcripts_from_json_file() {
    let json = r#"[{
        "id": "NM_JSON.1",
        "chromosome": "chr1",
        "strand": "-",
        "cds_start": 1,
        "cds_end": 10,
        "exons": [{"number": 1, "start": 1, "end": 10, "genomic_start": 101, "genomic_end": 110}]
    }]"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let transcripts = MockProvider::from_json(file.path()).unwrap();
    let genome = provider();

    // minus strand: c.1 is g.110 (C on the genome, G on the transcript)
    let request = VariantRequest::new("NM_JSON.1:c.1G>T", "missense", "1G>T", "chr1:110", "-");
    let resolution = VariantResolver::default()
        .resolve(&request, &genome, &transcripts)
        .unwrap();
    assert_eq!(resolution.path, ResolutionPath::Full);
    assert_eq!(resolution.call, VariantCall::new("chr1", 110, "C", "A"));
}

#[rstest]
#[case("1A>G", VariantCall::new("chr1", 300, "T", "C"))]
#[case("11G>A", VariantCall::new("chr1", 270, "C", "T"))]
#[case("21_22del", VariantCall::new("chr1", 238, "CGT", "C"))]
fn test_json_exons_in_genomic_order(#[case] change: &str, #[case] expected: VariantCall) {
    // minus strand listed 5' to 3' on the genome, so exon 3 comes first
    let json = r#"[{
        "id": "NM_000003.1",
        "chromosome": "chr1",
        "strand": "-",
        "cds_start": 1,
        "cds_end": 30,
        "exons": [
            {"number": 3, "start": 21, "end": 30, "genomic_start": 231, "genomic_end": 240},
            {"number": 2, "start": 11, "end": 20, "genomic_start": 261, "genomic_end": 270},
            {"number": 1, "start": 1, "end": 10, "genomic_start": 291, "genomic_end": 300}
        ]
    }]"#;
    let transcripts = MockProvider::from_json_str(json).unwrap();
    let genome = provider();

    let name = format!("NM_000003.1:c.{}", change);
    let request = VariantRequest::new(&name, "missense", change, "chr1:290", "-");
    let resolution = VariantResolver::default()
        .resolve(&request, &genome, &transcripts)
        .unwrap();
    assert_eq!(resolution.path, ResolutionPath::Full);
    assert!(resolution.full_error.is_none());
    assert_eq!(resolution.call, expected);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[resolver]
full-resolution = true
fallback-effects = ["missense"]

[[resolver.rewrites]]
from = "1A>G"
to = "1G>A"
"#
    )
    .unwrap();

    let config = FerroConfig::load_from_path(file.path()).unwrap();
    let resolver = VariantResolver::from_config(&config);
    let p = provider();

    let request = VariantRequest::new("NM_000001.1:c.1A>G", "missense", "1A>G", "chr1:111", "+");
    let resolution = resolver.resolve(&request, &p, &p).unwrap();
    assert_eq!(resolution.path, ResolutionPath::Fallback);
    assert_eq!(resolution.call, VariantCall::new("chr1", 111, "G", "A"));
    assert!(resolution
        .corrections
        .iter()
        .all(|c| c.kind == CorrectionKind::KnownRewrite));
}

#[test]
fn test_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = FerroConfig::load_from_path(dir.path().join("absent.toml")).unwrap_err();
    let err: FerroError = err.into();
    assert!(matches!(err, FerroError::Config { .. }));
    assert!(!err.allows_fallback());
}
