//! c. variant parser using nom
//!
//! Grammar accepted by [`parse_cds_variant`]:
//!
//! ```text
//! variant  := accession [ "(" gene ")" ] ":c." interval edit
//! interval := pos [ "_" pos ]
//! pos      := ( digits | "-" digits | "*" digits ) [ ("+" | "-") digits ]
//! edit     := base ">" base | ">" base | "delins" ins | "del" [seq | n]
//!           | "dup" [seq | n] | "ins" (seq | n)
//! ```

pub mod accession;
pub mod edit;
pub mod position;

use crate::error::FerroError;
use crate::hgvs::variant::CdsVariant;
use accession::{parse_accession, parse_gene_symbol};
use edit::parse_na_edit;
use position::parse_cds_interval;

/// Parse a `transcript:c.change` string into a [`CdsVariant`]
///
/// # Example
///
/// ```
/// use ferro_hgvs2vcf::hgvs::parser::parse_cds_variant;
///
/// let variant = parse_cds_variant("NM_000546.5:c.215C>G").unwrap();
/// assert_eq!(variant.accession.full(), "NM_000546.5");
/// ```
pub fn parse_cds_variant(input: &str) -> Result<CdsVariant, FerroError> {
    let trimmed = input.trim();
    let offset = |remaining: &str| trimmed.len() - remaining.len();

    let (remaining, accession) = parse_accession(trimmed)
        .map_err(|e| FerroError::parse(0, format!("Failed to parse accession: {:?}", e)))?;

    let (remaining, gene_symbol) = parse_gene_symbol(remaining).map_err(|e| {
        FerroError::parse(
            offset(remaining),
            format!("Failed to parse gene symbol: {:?}", e),
        )
    })?;

    let remaining = remaining
        .strip_prefix(":c.")
        .ok_or_else(|| FerroError::parse(offset(remaining), "Expected ':c.' after accession"))?;

    let (remaining, interval) = parse_cds_interval(remaining).map_err(|e| {
        FerroError::parse(
            offset(remaining),
            format!("Failed to parse position: {:?}", e),
        )
    })?;

    let (remaining, edit) = parse_na_edit(remaining).map_err(|e| {
        FerroError::parse(offset(remaining), format!("Failed to parse edit: {:?}", e))
    })?;

    if !remaining.is_empty() {
        return Err(FerroError::parse(
            offset(remaining),
            format!("Unexpected trailing characters: '{}'", remaining),
        ));
    }

    Ok(CdsVariant {
        accession,
        gene_symbol,
        interval,
        edit,
    })
}
