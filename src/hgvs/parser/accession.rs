//! Accession parsing
//!
//! Parses transcript accessions like `NM_000546.5` or `ENST00000269305.9`
//! and an optional parenthesized gene symbol (`NM_000546.5(TP53)`).

use crate::hgvs::variant::Accession;
use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1},
    combinator::opt,
    sequence::{delimited, preceded},
    IResult, Parser,
};

/// Parse an accession with optional `.version`
pub fn parse_accession(input: &str) -> IResult<&str, Accession> {
    let (remaining, name) =
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_').parse(input)?;
    let (remaining, version) = opt(preceded(char('.'), digit1)).parse(remaining)?;

    let version = match version {
        Some(v) => Some(v.parse::<u32>().map_err(|_| {
            nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
        })?),
        None => None,
    };
    Ok((remaining, Accession::new(name, version)))
}

/// Parse an optional `(GENE)` suffix
pub fn parse_gene_symbol(input: &str) -> IResult<&str, Option<String>> {
    let (remaining, gene) = opt(delimited(
        char('('),
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'),
        char(')'),
    ))
    .parse(input)?;
    Ok((remaining, gene.map(str::to_string)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refseq() {
        let (rest, acc) = parse_accession("NM_000546.5:c.215C>G").unwrap();
        assert_eq!(rest, ":c.215C>G");
        assert_eq!(acc, Accession::new("NM_000546", Some(5)));
    }

    #[test]
    fn test_unversioned() {
        let (rest, acc) = parse_accession("ENST00000269305:c.1A>G").unwrap();
        assert_eq!(rest, ":c.1A>G");
        assert_eq!(acc.version, None);
    }

    #[test]
    fn test_gene_symbol() {
        let (rest, gene) = parse_gene_symbol("(TP53):c.1A>G").unwrap();
        assert_eq!(rest, ":c.1A>G");
        assert_eq!(gene.as_deref(), Some("TP53"));

        let (rest, gene) = parse_gene_symbol(":c.1A>G").unwrap();
        assert_eq!(rest, ":c.1A>G");
        assert!(gene.is_none());
    }
}
