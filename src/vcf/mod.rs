//! VCF-style variant calls and full c. HGVS resolution
//!
//! [`VariantCall`] is the shared output of both resolution paths.
//! [`FullHgvsResolver`] is the seam for the rich path tried before the
//! fallback resolver.

mod from_hgvs;
mod record;

pub use from_hgvs::{FullHgvsResolver, TranscriptHgvsResolver};
pub use record::VariantCall;
