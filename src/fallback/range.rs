//! Position-range resolution
//!
//! Turns range text such as `45+3_45+5`, `-15-3` or `2169_*27` into a
//! [`PositionRange`] and the number of genomic bases it spans.
//!
//! Without exon maps the span can only be measured when both endpoints hang
//! off the same exon boundary, or at most one of them is intronic. A range
//! whose endpoints are intronic against two different boundaries is reported
//! as [`FerroError::AmbiguousSpliceRange`] and never guessed.

use std::fmt;
use std::str::FromStr;

use crate::error::FerroError;
use crate::fallback::tokenizer::{OperationKind, Operand};

/// Main coordinate of a position token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainPosition {
    /// Coding position; negative values lie in the 5' UTR
    Cds(i64),
    /// Position after the stop codon (`*27`)
    ThreePrimeUtr(u64),
}

impl fmt::Display for MainPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainPosition::Cds(n) => write!(f, "{}", n),
            MainPosition::ThreePrimeUtr(n) => write!(f, "*{}", n),
        }
    }
}

/// One endpoint of a position range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionToken {
    pub main: MainPosition,
    /// Signed distance into the adjoining intron; zero for exonic positions
    pub sub_offset: i64,
}

impl PositionToken {
    /// True when the token carries a nonzero intronic offset
    pub fn is_intronic(&self) -> bool {
        self.sub_offset != 0
    }
}

impl FromStr for PositionToken {
    type Err = FerroError;

    /// Parse `45`, `45+3`, `46-2`, `-15`, `-15-3` or `*27`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(FerroError::invalid_position("empty position token"));
        }

        let (main, sub_offset) = if let Some((main, offset)) = token.split_once('+') {
            (main, parse_offset(offset, token)?)
        } else if let Some(idx) = token
            .char_indices()
            .skip(1)
            .find_map(|(i, c)| (c == '-').then_some(i))
        {
            // a leading '-' belongs to the main coordinate
            let (main, offset) = token.split_at(idx);
            (main, -parse_offset(&offset[1..], token)?)
        } else {
            (token, 0)
        };

        Ok(PositionToken {
            main: parse_main(main, token)?,
            sub_offset,
        })
    }
}

impl fmt::Display for PositionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_offset {
            0 => write!(f, "{}", self.main),
            n if n > 0 => write!(f, "{}+{}", self.main, n),
            n => write!(f, "{}{}", self.main, n),
        }
    }
}

fn parse_main(main: &str, token: &str) -> Result<MainPosition, FerroError> {
    let bad = || FerroError::invalid_position(format!("bad position '{}'", token));
    match main.strip_prefix('*') {
        Some(utr) => utr.parse().map(MainPosition::ThreePrimeUtr).map_err(|_| bad()),
        None => main.parse().map(MainPosition::Cds).map_err(|_| bad()),
    }
}

fn parse_offset(offset: &str, token: &str) -> Result<i64, FerroError> {
    if offset.is_empty() || !offset.chars().all(|c| c.is_ascii_digit()) {
        return Err(FerroError::invalid_position(format!(
            "bad intronic offset in '{}'",
            token
        )));
    }
    offset
        .parse()
        .map_err(|_| FerroError::invalid_position(format!("offset out of range in '{}'", token)))
}

/// A single position or a `start_end` span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionRange {
    Point(PositionToken),
    Span(PositionToken, PositionToken),
}

impl FromStr for PositionRange {
    type Err = FerroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('_');
        let first = parts.next().unwrap_or_default().parse()?;
        match (parts.next(), parts.next()) {
            (None, _) => Ok(PositionRange::Point(first)),
            (Some(second), None) => Ok(PositionRange::Span(first, second.parse()?)),
            (Some(_), Some(_)) => Err(FerroError::invalid_position(format!(
                "range '{}' has more than two positions",
                s
            ))),
        }
    }
}

impl fmt::Display for PositionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionRange::Point(p) => write!(f, "{}", p),
            PositionRange::Span(a, b) => write!(f, "{}_{}", a, b),
        }
    }
}

/// A parsed range and the number of genomic bases it spans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub range: PositionRange,
    pub length: u64,
}

/// Resolve range text to a [`ResolvedRange`]
///
/// A single position spans one base. For a span `A_B`:
///
/// 1. If either main coordinate is a `*` UTR marker the operand supplies
///    the length ([`FerroError::UnresolvableLength`] if it cannot).
/// 2. If both share a main coordinate: `|sub(A) - sub(B)| + 1`.
/// 3. If at most one is intronic: `|main(A) - main(B)| + 1 + |sub|`.
/// 4. Otherwise: [`FerroError::AmbiguousSpliceRange`].
///
/// Insertions must resolve to exactly two adjacent positions, otherwise
/// [`FerroError::InvalidInsertionRange`].
pub fn resolve_range(
    text: &str,
    kind: OperationKind,
    operand: &Operand,
) -> Result<ResolvedRange, FerroError> {
    let range: PositionRange = text.parse()?;

    let length = match range {
        PositionRange::Point(_) => 1,
        PositionRange::Span(a, b) => span_length(text, &a, &b, operand)?,
    };

    if kind == OperationKind::Insertion && length != 2 {
        return Err(FerroError::InvalidInsertionRange {
            notation: text.to_string(),
        });
    }

    log::trace!("resolved range '{}' to {} base(s)", text, length);
    Ok(ResolvedRange { range, length })
}

fn span_length(
    text: &str,
    a: &PositionToken,
    b: &PositionToken,
    operand: &Operand,
) -> Result<u64, FerroError> {
    match (a.main, b.main) {
        (MainPosition::ThreePrimeUtr(_), _) | (_, MainPosition::ThreePrimeUtr(_)) => operand
            .implied_length()
            .filter(|&n| n > 0)
            .ok_or_else(|| FerroError::UnresolvableLength {
                range: text.to_string(),
            }),
        (ma, mb) if ma == mb => Ok(a.sub_offset.abs_diff(b.sub_offset).saturating_add(1)),
        (MainPosition::Cds(ma), MainPosition::Cds(mb)) => {
            if a.is_intronic() && b.is_intronic() {
                return Err(FerroError::AmbiguousSpliceRange {
                    range: text.to_string(),
                });
            }
            // at most one offset is nonzero, so their sum is that offset
            Ok(ma
                .abs_diff(mb)
                .saturating_add(1)
                .saturating_add((a.sub_offset + b.sub_offset).unsigned_abs()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> PositionToken {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_plain_token() {
        let t = token("45");
        assert_eq!(t.main, MainPosition::Cds(45));
        assert_eq!(t.sub_offset, 0);
        assert!(!t.is_intronic());
    }

    #[test]
    fn test_parse_intronic_tokens() {
        assert_eq!(token("45+3").sub_offset, 3);
        let t = token("46-2");
        assert_eq!(t.main, MainPosition::Cds(46));
        assert_eq!(t.sub_offset, -2);
    }

    #[test]
    fn test_parse_upstream_utr_tokens() {
        let t = token("-15");
        assert_eq!(t.main, MainPosition::Cds(-15));
        assert_eq!(t.sub_offset, 0);

        let t = token("-15-3");
        assert_eq!(t.main, MainPosition::Cds(-15));
        assert_eq!(t.sub_offset, -3);

        let t = token("-15+4");
        assert_eq!(t.main, MainPosition::Cds(-15));
        assert_eq!(t.sub_offset, 4);
    }

    #[test]
    fn test_parse_downstream_utr_token() {
        let t = token("*27");
        assert_eq!(t.main, MainPosition::ThreePrimeUtr(27));
        assert_eq!(t.to_string(), "*27");
    }

    #[test]
    fn test_parse_bad_tokens() {
        for bad in ["", "abc", "45+", "45+x", "*", "4-5-6", "45-"] {
            assert!(
                matches!(
                    bad.parse::<PositionToken>(),
                    Err(FerroError::InvalidPosition { .. })
                ),
                "expected failure for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_token_display() {
        assert_eq!(token("45+3").to_string(), "45+3");
        assert_eq!(token("46-2").to_string(), "46-2");
        assert_eq!(token("-15-3").to_string(), "-15-3");
    }

    #[test]
    fn test_range_too_many_positions() {
        assert!(matches!(
            "1_2_3".parse::<PositionRange>(),
            Err(FerroError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn test_resolve_point() {
        let r = resolve_range("229", OperationKind::Substitution, &Operand::None).unwrap();
        assert_eq!(r.length, 1);
        assert!(matches!(r.range, PositionRange::Point(_)));
    }

    #[test]
    fn test_resolve_same_boundary() {
        let r = resolve_range("45+3_45+5", OperationKind::Deletion, &Operand::None).unwrap();
        assert_eq!(r.length, 3);
    }

    #[test]
    fn test_resolve_one_intronic_endpoint() {
        let r = resolve_range("45_46-2", OperationKind::Deletion, &Operand::None).unwrap();
        assert_eq!(r.length, 2 + 2);
        let r = resolve_range("45+3_47", OperationKind::Deletion, &Operand::None).unwrap();
        assert_eq!(r.length, 3 + 3);
    }

    #[test]
    fn test_resolve_plain_span() {
        let r = resolve_range("2245_2269", OperationKind::Deletion, &Operand::Count(25)).unwrap();
        assert_eq!(r.length, 25);
    }

    #[test]
    fn test_resolve_ambiguous() {
        let err = resolve_range("10+5_20-3", OperationKind::Deletion, &Operand::None).unwrap_err();
        assert_eq!(
            err,
            FerroError::AmbiguousSpliceRange {
                range: "10+5_20-3".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_utr_uses_operand() {
        let r = resolve_range("2169_*27", OperationKind::Deletion, &Operand::Count(48)).unwrap();
        assert_eq!(r.length, 48);

        let r = resolve_range("*1_*3", OperationKind::Duplication, &Operand::Bases("ACG".into()))
            .unwrap();
        assert_eq!(r.length, 3);

        assert!(matches!(
            resolve_range("2169_*27", OperationKind::Deletion, &Operand::None),
            Err(FerroError::UnresolvableLength { .. })
        ));
    }

    #[test]
    fn test_resolve_insertion_requires_adjacent_pair() {
        let ok = resolve_range("123_124", OperationKind::Insertion, &Operand::None).unwrap();
        assert_eq!(ok.length, 2);

        for bad in ["123", "123_125"] {
            assert!(matches!(
                resolve_range(bad, OperationKind::Insertion, &Operand::None),
                Err(FerroError::InvalidInsertionRange { .. })
            ));
        }
    }
}
