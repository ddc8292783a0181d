//! c. variant types and parser
//!
//! The types here describe a single coding-sequence variant
//! (`NM_000546.5:c.215C>G`) and are produced by the nom parser in
//! [`parser`].

pub mod edit;
pub mod location;
pub mod parser;
pub mod variant;

pub use edit::{InsertedSequence, NaEdit};
pub use location::CdsPos;
pub use parser::parse_cds_variant;
pub use variant::{Accession, CdsInterval, CdsVariant};
