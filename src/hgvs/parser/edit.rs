//! Edit parsing
//!
//! Parses the edit portion of a c. variant (substitution, deletion,
//! duplication, insertion, deletion-insertion).

use crate::hgvs::edit::{InsertedSequence, NaEdit};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, satisfy},
    combinator::{map, opt},
    sequence::preceded,
    IResult, Parser,
};

const fn is_base(c: char) -> bool {
    matches!(c, 'A' | 'C' | 'G' | 'T' | 'N' | 'a' | 'c' | 'g' | 't' | 'n')
}

/// Parse a single nucleotide base, uppercased
fn parse_base(input: &str) -> IResult<&str, char> {
    map(satisfy(is_base), |c| c.to_ascii_uppercase()).parse(input)
}

/// Parse a run of nucleotide bases, uppercased
fn parse_sequence(input: &str) -> IResult<&str, String> {
    map(take_while1(is_base), |s: &str| s.to_ascii_uppercase()).parse(input)
}

/// Parse a base count
fn parse_count(input: &str) -> IResult<&str, u64> {
    let (remaining, s) = digit1.parse(input)?;
    let n: u64 = s.parse().map_err(|_| {
        nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
    })?;
    Ok((remaining, n))
}

fn parse_inserted(input: &str) -> IResult<&str, InsertedSequence> {
    alt((
        map(parse_sequence, InsertedSequence::Literal),
        map(parse_count, InsertedSequence::Count),
    ))
    .parse(input)
}

/// Parse `C>G`
fn parse_substitution(input: &str) -> IResult<&str, NaEdit> {
    map(
        (parse_base, char('>'), parse_base),
        |(reference, _, alternative)| NaEdit::Substitution {
            reference,
            alternative,
        },
    )
    .parse(input)
}

/// Parse `>G`
fn parse_substitution_no_ref(input: &str) -> IResult<&str, NaEdit> {
    map(preceded(char('>'), parse_base), |alternative| {
        NaEdit::SubstitutionNoRef { alternative }
    })
    .parse(input)
}

fn parse_delins(input: &str) -> IResult<&str, NaEdit> {
    map(preceded(tag("delins"), parse_inserted), |sequence| {
        NaEdit::Delins { sequence }
    })
    .parse(input)
}

/// `del`, `delACG` or `del3`
fn parse_deletion(input: &str) -> IResult<&str, NaEdit> {
    let (remaining, _) = tag("del").parse(input)?;
    let (remaining, sequence) = opt(parse_sequence).parse(remaining)?;
    let (remaining, length) = if sequence.is_none() {
        opt(parse_count).parse(remaining)?
    } else {
        (remaining, None)
    };
    Ok((remaining, NaEdit::Deletion { sequence, length }))
}

/// `dup`, `dupACG` or `dup3`
fn parse_duplication(input: &str) -> IResult<&str, NaEdit> {
    let (remaining, _) = tag("dup").parse(input)?;
    let (remaining, sequence) = opt(parse_sequence).parse(remaining)?;
    let (remaining, length) = if sequence.is_none() {
        opt(parse_count).parse(remaining)?
    } else {
        (remaining, None)
    };
    Ok((remaining, NaEdit::Duplication { sequence, length }))
}

fn parse_insertion(input: &str) -> IResult<&str, NaEdit> {
    map(preceded(tag("ins"), parse_inserted), |sequence| {
        NaEdit::Insertion { sequence }
    })
    .parse(input)
}

/// Parse a nucleic acid edit
pub fn parse_na_edit(input: &str) -> IResult<&str, NaEdit> {
    alt((
        parse_substitution,
        parse_substitution_no_ref,
        parse_delins, // must come before deletion
        parse_deletion,
        parse_duplication,
        parse_insertion,
    ))
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(s: &str) -> NaEdit {
        let (rest, edit) = parse_na_edit(s).unwrap();
        assert!(rest.is_empty(), "trailing input {:?}", rest);
        edit
    }

    #[test]
    fn test_substitution() {
        assert_eq!(
            edit("c>g"),
            NaEdit::Substitution {
                reference: 'C',
                alternative: 'G'
            }
        );
        assert_eq!(edit(">T"), NaEdit::SubstitutionNoRef { alternative: 'T' });
    }

    #[test]
    fn test_deletion_forms() {
        assert_eq!(
            edit("del"),
            NaEdit::Deletion {
                sequence: None,
                length: None
            }
        );
        assert_eq!(
            edit("delAG"),
            NaEdit::Deletion {
                sequence: Some("AG".to_string()),
                length: None
            }
        );
        assert_eq!(
            edit("del48"),
            NaEdit::Deletion {
                sequence: None,
                length: Some(48)
            }
        );
    }

    #[test]
    fn test_delins_before_deletion() {
        assert_eq!(
            edit("delinsAT"),
            NaEdit::Delins {
                sequence: InsertedSequence::Literal("AT".to_string())
            }
        );
    }

    #[test]
    fn test_insertion_and_duplication() {
        assert_eq!(
            edit("insACGT"),
            NaEdit::Insertion {
                sequence: InsertedSequence::Literal("ACGT".to_string())
            }
        );
        assert_eq!(
            edit("ins3"),
            NaEdit::Insertion {
                sequence: InsertedSequence::Count(3)
            }
        );
        assert_eq!(
            edit("dup"),
            NaEdit::Duplication {
                sequence: None,
                length: None
            }
        );
    }

    #[test]
    fn test_insertion_requires_payload() {
        assert!(parse_na_edit("ins").is_err());
    }
}
