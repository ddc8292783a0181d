//! Position parsing
//!
//! Parses c. positions: `123`, `-15`, `*27`, each optionally followed by an
//! intronic offset (`+5`, `-10`).

use crate::hgvs::location::CdsPos;
use crate::hgvs::variant::CdsInterval;
use nom::{
    branch::alt,
    character::complete::{char, digit1},
    combinator::opt,
    sequence::preceded,
    IResult, Parser,
};

fn verify_error(input: &str) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Verify))
}

/// Parse an unsigned, nonzero integer
fn parse_nonzero(input: &str) -> IResult<&str, i64> {
    let (remaining, s) = digit1.parse(input)?;
    // Checked parsing so overflow is an error rather than a silent wrap
    let value: i64 = s.parse().map_err(|_| {
        nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
    })?;
    if value == 0 {
        return Err(verify_error(input));
    }
    Ok((remaining, value))
}

/// Parse an intronic offset (+5, -10)
fn parse_offset(input: &str) -> IResult<&str, i64> {
    let (input, sign) = alt((char('+'), char('-'))).parse(input)?;
    let (input, value) = parse_nonzero(input)?;
    Ok((input, if sign == '-' { -value } else { value }))
}

/// Parse a CDS position (with optional offset, negative positions, * notation)
///
/// Position 0 is invalid in c. notation (it goes from -1 to 1).
pub fn parse_cds_pos(input: &str) -> IResult<&str, CdsPos> {
    let (remaining, pos) = if let Some(rest) = input.strip_prefix('*') {
        let (remaining, base) = parse_nonzero(rest)?;
        (remaining, CdsPos::utr3(base))
    } else if let Some(rest) = input.strip_prefix('-') {
        let (remaining, base) = parse_nonzero(rest)?;
        (remaining, CdsPos::new(-base))
    } else {
        let (remaining, base) = parse_nonzero(input)?;
        (remaining, CdsPos::new(base))
    };

    let (remaining, offset) = opt(parse_offset).parse(remaining)?;
    Ok((remaining, pos.offset_by(offset.unwrap_or(0))))
}

/// Parse a position or `start_end` interval
pub fn parse_cds_interval(input: &str) -> IResult<&str, CdsInterval> {
    let (remaining, start) = parse_cds_pos(input)?;
    let (remaining, end) = opt(preceded(char('_'), parse_cds_pos)).parse(remaining)?;
    Ok((
        remaining,
        match end {
            Some(end) => CdsInterval::span(start, end),
            None => CdsInterval::point(start),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let (rest, pos) = parse_cds_pos("215C>G").unwrap();
        assert_eq!(rest, "C>G");
        assert_eq!(pos, CdsPos::new(215));
    }

    #[test]
    fn test_parse_utr_positions() {
        assert_eq!(parse_cds_pos("-15").unwrap().1, CdsPos::new(-15));
        assert_eq!(parse_cds_pos("*27").unwrap().1, CdsPos::utr3(27));
        assert_eq!(
            parse_cds_pos("-15-3").unwrap().1,
            CdsPos::with_offset(-15, -3)
        );
    }

    #[test]
    fn test_parse_intronic() {
        assert_eq!(parse_cds_pos("45+3").unwrap().1, CdsPos::with_offset(45, 3));
        assert_eq!(parse_cds_pos("46-2").unwrap().1, CdsPos::with_offset(46, -2));
    }

    #[test]
    fn test_zero_rejected() {
        assert!(parse_cds_pos("0").is_err());
        assert!(parse_cds_pos("*0").is_err());
        assert!(parse_cds_pos("45+0").is_err());
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(parse_cds_pos("99999999999999999999999").is_err());
    }

    #[test]
    fn test_parse_interval() {
        let (rest, iv) = parse_cds_interval("45+3_45+5del").unwrap();
        assert_eq!(rest, "del");
        assert_eq!(
            iv,
            CdsInterval::span(CdsPos::with_offset(45, 3), CdsPos::with_offset(45, 5))
        );

        let (_, iv) = parse_cds_interval("229C>A").unwrap();
        assert_eq!(iv, CdsInterval::point(CdsPos::new(229)));
    }
}
