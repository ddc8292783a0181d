//! Nucleotide alphabet helpers
//!
//! Reference bases and literal operands are restricted to `{A,C,G,T,N}`.
//! Lowercase input is accepted where noted and the case is preserved by
//! [`reverse_complement`].

use crate::error::FerroError;

/// Complement of a single base, preserving case
///
/// Returns `None` for characters outside the nucleotide alphabet.
pub fn complement(base: char) -> Option<char> {
    match base {
        'A' => Some('T'),
        'T' => Some('A'),
        'C' => Some('G'),
        'G' => Some('C'),
        'N' => Some('N'),
        'a' => Some('t'),
        't' => Some('a'),
        'c' => Some('g'),
        'g' => Some('c'),
        'n' => Some('n'),
        _ => None,
    }
}

/// Reverse complement of a base string
///
/// Total over `{A,C,G,T,N}` in either case; any other character fails with
/// [`FerroError::InvalidBase`].
pub fn reverse_complement(bases: &str) -> Result<String, FerroError> {
    bases
        .chars()
        .rev()
        .map(|c| {
            complement(c).ok_or_else(|| FerroError::InvalidBase {
                base: c,
                sequence: bases.to_string(),
            })
        })
        .collect()
}

/// Check that every character is an uppercase nucleotide
pub fn validate_bases(bases: &str) -> Result<(), FerroError> {
    match bases.chars().find(|c| !matches!(c, 'A' | 'C' | 'G' | 'T' | 'N')) {
        Some(base) => Err(FerroError::InvalidBase {
            base,
            sequence: bases.to_string(),
        }),
        None => Ok(()),
    }
}

/// Uppercase a base string and validate it against the nucleotide alphabet
pub fn normalize_bases(bases: &str) -> Result<String, FerroError> {
    let upper = bases.to_ascii_uppercase();
    validate_bases(&upper)?;
    Ok(upper)
}

/// Largest `N` run produced for a count-only insertion (`ins3`)
pub const MAX_PLACEHOLDER_BASES: u64 = 1_000_000;

/// `count` placeholder `N` bases, or `None` for zero or oversized counts
pub fn placeholder_bases(count: u64) -> Option<String> {
    if count == 0 || count > MAX_PLACEHOLDER_BASES {
        return None;
    }
    Some("N".repeat(count as usize))
}
