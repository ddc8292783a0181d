//! Fuzz target for the fallback pipeline and the c. parser
//!
//! Feeds arbitrary strings as coding effects and variant names. Neither
//! path may panic; every failure must come back as a `FerroError`.

#![no_main]

use ferro_hgvs2vcf::fallback::{resolve_fallback, resolve_range, tokenize, GenomicAnchor, Operand};
use ferro_hgvs2vcf::{parse_cds_variant, MockProvider, Strand};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static PROVIDER: OnceLock<MockProvider> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Don't fuzz extremely long inputs - diminishing returns
        if input.len() > 1000 {
            return;
        }

        if let Ok(tokens) = tokenize(input) {
            if let Ok(operand) = Operand::parse(tokens.operand, input) {
                let _ = resolve_range(tokens.range, tokens.kind, &operand);
            }
        }

        let provider = PROVIDER.get_or_init(MockProvider::with_test_data);
        let anchor = GenomicAnchor::new("chr1", 100);
        let _ = resolve_fallback(input, &anchor, Strand::Minus, provider);

        let _ = parse_cds_variant(input);
    }
});
