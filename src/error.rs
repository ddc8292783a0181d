//! Error types for ferro-hgvs2vcf
//!
//! Every failure the resolver can produce is a [`FerroError`] variant, and
//! every variant carries a stable [`ErrorCode`] so that callers (for example a
//! report-assembly layer deciding whether to skip a variant) can branch on the
//! category without matching message text.

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Notation errors (E1xxx)
    /// No operation delimiter in a coding effect
    UnrecognizedNotation = 1001,
    /// Invalid position token or `chrom:pos` field
    InvalidPosition = 1002,
    /// Operand is neither bases nor a count
    InvalidOperand = 1003,
    /// Base outside the nucleotide alphabet
    InvalidBase = 1004,
    /// Strand is neither `+` nor `-`
    InvalidStrand = 1005,
    /// Full HGVS grammar failure
    InvalidSyntax = 1006,

    // Reference errors (E2xxx)
    /// Transcript not found
    ReferenceNotFound = 2001,
    /// Sequence not available
    SequenceNotFound = 2002,
    /// Stated reference disagrees with the genome
    ReferenceMismatch = 2003,

    // Range errors (E3xxx)
    /// Insertion range is not two adjacent positions
    InvalidInsertionRange = 3001,
    /// Both endpoints intronic against different exon boundaries
    AmbiguousSpliceRange = 3002,
    /// Duplication length disagrees with its operand
    DuplicationLengthMismatch = 3003,
    /// Range length cannot be determined
    UnresolvableLength = 3004,

    // Support errors (E4xxx)
    /// Operation has no materialization path
    UnsupportedOperation = 4001,

    // Conversion errors (E5xxx)
    /// Coordinate conversion failed
    ConversionFailed = 5001,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// Configuration error
    ConfigError = 9002,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::UnrecognizedNotation => "unrecognized coding-effect notation",
            ErrorCode::InvalidPosition => "invalid position",
            ErrorCode::InvalidOperand => "invalid operand",
            ErrorCode::InvalidBase => "invalid nucleotide base",
            ErrorCode::InvalidStrand => "invalid strand",
            ErrorCode::InvalidSyntax => "invalid HGVS syntax",
            ErrorCode::ReferenceNotFound => "reference not found",
            ErrorCode::SequenceNotFound => "sequence not available",
            ErrorCode::ReferenceMismatch => "reference sequence mismatch",
            ErrorCode::InvalidInsertionRange => "insertion range is not two adjacent positions",
            ErrorCode::AmbiguousSpliceRange => "ambiguous intronic range",
            ErrorCode::DuplicationLengthMismatch => "duplication length mismatch",
            ErrorCode::UnresolvableLength => "range length cannot be determined",
            ErrorCode::UnsupportedOperation => "unsupported operation",
            ErrorCode::ConversionFailed => "coordinate conversion failed",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::ConfigError => "configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-hgvs2vcf operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FerroError {
    /// No known operation delimiter was found in the coding effect
    #[error("Unrecognized notation: '{notation}'")]
    UnrecognizedNotation { notation: String },

    /// Insertion range is not exactly two adjacent positions
    #[error("Insertion range must be two adjacent positions: '{notation}'")]
    InvalidInsertionRange { notation: String },

    /// Both range endpoints are intronic relative to different exon boundaries
    #[error("Ambiguous splice range '{range}': both endpoints are intronic offsets from different exon boundaries")]
    AmbiguousSpliceRange { range: String },

    /// Resolved duplication length disagrees with the operand
    #[error("Duplication length mismatch in '{notation}': range spans {resolved} bases, operand implies {operand}")]
    DuplicationLengthMismatch {
        notation: String,
        resolved: u64,
        operand: u64,
    },

    /// Operation has no materialization path
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation { operation: String },

    /// Sequence lookup failed (unknown chromosome or out-of-bounds range)
    #[error("Sequence not found for {chromosome}:{start}-{end}")]
    SequenceNotFound {
        chromosome: String,
        start: u64,
        end: u64,
    },

    /// Character outside the nucleotide alphabet
    #[error("Invalid base '{base}' in '{sequence}'")]
    InvalidBase { base: char, sequence: String },

    /// Position token or genomic position field cannot be parsed
    #[error("Invalid position: {msg}")]
    InvalidPosition { msg: String },

    /// Operand is missing, or is neither bases nor a count
    #[error("Invalid operand '{operand}' in '{notation}'")]
    InvalidOperand { operand: String, notation: String },

    /// Range uses a UTR marker and no operand supplies a length
    #[error("Cannot determine length of range '{range}'")]
    UnresolvableLength { range: String },

    /// Strand is neither `+` nor `-`
    #[error("Invalid strand '{value}', expected '+' or '-'")]
    InvalidStrand { value: String },

    /// Full HGVS grammar failure
    #[error("Parse error at position {pos}: {msg}")]
    Parse { pos: usize, msg: String },

    /// Transcript not found
    #[error("Reference not found: {id}")]
    ReferenceNotFound { id: String },

    /// Stated reference disagrees with the genome
    #[error("Reference mismatch at {location}: expected {expected}, found {found}")]
    ReferenceMismatch {
        location: String,
        expected: String,
        found: String,
    },

    /// Coordinate conversion error
    #[error("Coordinate conversion error: {msg}")]
    ConversionError { msg: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// Configuration error
    #[error("Config error: {msg}")]
    Config { msg: String },
}

impl FerroError {
    /// Create a parse error
    pub fn parse(pos: usize, msg: impl Into<String>) -> Self {
        FerroError::Parse {
            pos,
            msg: msg.into(),
        }
    }

    /// Create an invalid position error
    pub fn invalid_position(msg: impl Into<String>) -> Self {
        FerroError::InvalidPosition { msg: msg.into() }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            FerroError::UnrecognizedNotation { .. } => ErrorCode::UnrecognizedNotation,
            FerroError::InvalidInsertionRange { .. } => ErrorCode::InvalidInsertionRange,
            FerroError::AmbiguousSpliceRange { .. } => ErrorCode::AmbiguousSpliceRange,
            FerroError::DuplicationLengthMismatch { .. } => ErrorCode::DuplicationLengthMismatch,
            FerroError::UnsupportedOperation { .. } => ErrorCode::UnsupportedOperation,
            FerroError::SequenceNotFound { .. } => ErrorCode::SequenceNotFound,
            FerroError::InvalidBase { .. } => ErrorCode::InvalidBase,
            FerroError::InvalidPosition { .. } => ErrorCode::InvalidPosition,
            FerroError::InvalidOperand { .. } => ErrorCode::InvalidOperand,
            FerroError::UnresolvableLength { .. } => ErrorCode::UnresolvableLength,
            FerroError::InvalidStrand { .. } => ErrorCode::InvalidStrand,
            FerroError::Parse { .. } => ErrorCode::InvalidSyntax,
            FerroError::ReferenceNotFound { .. } => ErrorCode::ReferenceNotFound,
            FerroError::ReferenceMismatch { .. } => ErrorCode::ReferenceMismatch,
            FerroError::ConversionError { .. } => ErrorCode::ConversionFailed,
            FerroError::Io { .. } => ErrorCode::IoError,
            FerroError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Whether a failure on the full HGVS path hands the variant to the
    /// fallback path.
    ///
    /// IO and configuration failures propagate immediately.
    pub fn allows_fallback(&self) -> bool {
        !matches!(self, FerroError::Io { .. } | FerroError::Config { .. })
    }

    /// Message prefixed with the error code, e.g. `[E3002] Ambiguous ...`
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

impl From<std::io::Error> for FerroError {
    fn from(err: std::io::Error) -> Self {
        FerroError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FerroError {
    fn from(err: serde_json::Error) -> Self {
        FerroError::Io {
            msg: format!("JSON: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::UnrecognizedNotation.as_str(), "E1001");
        assert_eq!(ErrorCode::ReferenceNotFound.as_str(), "E2001");
        assert_eq!(ErrorCode::AmbiguousSpliceRange.as_str(), "E3002");
        assert_eq!(ErrorCode::UnsupportedOperation.as_str(), "E4001");
        assert_eq!(ErrorCode::ConversionFailed.as_str(), "E5001");
        assert_eq!(ErrorCode::IoError.as_str(), "E9001");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(
            ErrorCode::InvalidInsertionRange.description(),
            "insertion range is not two adjacent positions"
        );
        assert_eq!(ErrorCode::InvalidBase.description(), "invalid nucleotide base");
    }

    #[test]
    fn test_code_mapping() {
        let err = FerroError::AmbiguousSpliceRange {
            range: "10+5_20-3".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::AmbiguousSpliceRange);

        let err = FerroError::parse(3, "expected ':c.'");
        assert_eq!(err.code(), ErrorCode::InvalidSyntax);
    }

    #[test]
    fn test_allows_fallback() {
        assert!(FerroError::ReferenceNotFound {
            id: "NM_000546.5".to_string()
        }
        .allows_fallback());
        assert!(FerroError::parse(0, "bad").allows_fallback());
        assert!(!FerroError::Io {
            msg: "disk".to_string()
        }
        .allows_fallback());
        assert!(!FerroError::Config {
            msg: "bad toml".to_string()
        }
        .allows_fallback());
    }

    #[test]
    fn test_detailed_message() {
        let err = FerroError::UnrecognizedNotation {
            notation: "229C".to_string(),
        };
        assert_eq!(
            err.detailed_message(),
            "[E1001] Unrecognized notation: '229C'"
        );
    }

    #[test]
    fn test_display_duplication_mismatch() {
        let err = FerroError::DuplicationLengthMismatch {
            notation: "10_12dupAT".to_string(),
            resolved: 3,
            operand: 2,
        };
        assert_eq!(
            err.to_string(),
            "Duplication length mismatch in '10_12dupAT': range spans 3 bases, operand implies 2"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: FerroError = io.into();
        assert_eq!(err.code(), ErrorCode::IoError);
    }
}
