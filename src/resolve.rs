//! Resolution orchestrator
//!
//! Chooses between the full transcript-aware path and the fallback path for
//! one report variant:
//!
//! ```text
//!            preprocess
//!                |
//!   effect in fallback-effects? --yes--> Fallback
//!                | no
//!              Full --ok--> done
//!                | err (allows_fallback)
//!             Fallback --ok/err--> done
//! ```
//!
//! A fallback failure is returned to the caller as is; there is no third
//! attempt.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{FerroConfig, ResolverConfig};
use crate::error::FerroError;
use crate::fallback::{resolve_fallback, GenomicAnchor};
use crate::preprocess::{DetectedCorrection, Preprocessor};
use crate::reference::provider::{SequenceAccessor, TranscriptLookup};
use crate::reference::transcript::Strand;
use crate::vcf::{FullHgvsResolver, TranscriptHgvsResolver, VariantCall};

/// The report fields describing one variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRequest {
    /// Full HGVS name, e.g. `NM_000546.5:c.215C>G`
    pub variant_name: String,
    /// Functional-effect classification, e.g. `missense` or `splice`
    pub functional_effect: String,
    /// Coding effect without the accession, e.g. `215C>G`
    pub coding_effect: String,
    /// Stated genomic position as `chrom:pos`
    pub genomic_position: String,
    /// Transcript strand, `+` or `-`
    pub strand: String,
}

impl VariantRequest {
    pub fn new(
        variant_name: impl Into<String>,
        functional_effect: impl Into<String>,
        coding_effect: impl Into<String>,
        genomic_position: impl Into<String>,
        strand: impl Into<String>,
    ) -> Self {
        Self {
            variant_name: variant_name.into(),
            functional_effect: functional_effect.into(),
            coding_effect: coding_effect.into(),
            genomic_position: genomic_position.into(),
            strand: strand.into(),
        }
    }
}

/// Which path produced a [`Resolution`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionPath {
    Full,
    Fallback,
}

impl fmt::Display for ResolutionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionPath::Full => write!(f, "full"),
            ResolutionPath::Fallback => write!(f, "fallback"),
        }
    }
}

/// A resolved variant together with how it was resolved
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub call: VariantCall,
    pub path: ResolutionPath,
    /// Input corrections applied to the coding effect and variant name
    pub corrections: Vec<DetectedCorrection>,
    /// Why the full path was abandoned, when it was tried and failed
    pub full_error: Option<FerroError>,
}

impl Resolution {
    /// True when the full path was attempted and failed before fallback
    pub fn fell_back(&self) -> bool {
        self.full_error.is_some()
    }
}

/// Two-step resolver: full HGVS first, then the coding-effect fallback
///
/// Holds no per-call state; one instance can be shared across threads.
pub struct VariantResolver {
    config: ResolverConfig,
    preprocessor: Preprocessor,
    full: Box<dyn FullHgvsResolver + Send + Sync>,
}

impl Default for VariantResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl fmt::Debug for VariantResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantResolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl VariantResolver {
    /// Create a resolver using [`TranscriptHgvsResolver`] for the full path
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            preprocessor: Preprocessor::new(&config),
            config,
            full: Box::new(TranscriptHgvsResolver::new()),
        }
    }

    pub fn from_config(config: &FerroConfig) -> Self {
        Self::new(config.resolver.clone())
    }

    /// Replace the full-path resolver
    pub fn with_full_resolver<R>(mut self, full: R) -> Self
    where
        R: FullHgvsResolver + Send + Sync + 'static,
    {
        self.full = Box::new(full);
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve one report variant
    pub fn resolve<S, T>(
        &self,
        request: &VariantRequest,
        seq: &S,
        transcripts: &T,
    ) -> Result<Resolution, FerroError>
    where
        S: SequenceAccessor,
        T: TranscriptLookup,
    {
        let strand: Strand = request.strand.parse()?;
        let effect = self.preprocessor.coding_effect(&request.coding_effect);
        let name = self.preprocessor.variant_name(&request.variant_name);
        let mut corrections = effect.corrections;
        corrections.extend(name.corrections);

        let full_error = if !self.config.full_resolution {
            log::debug!("{}: full resolution disabled", name.preprocessed);
            None
        } else if self.config.is_fallback_effect(&request.functional_effect) {
            log::debug!(
                "{}: functional effect '{}' goes straight to fallback",
                name.preprocessed,
                request.functional_effect
            );
            None
        } else {
            let attempt = self
                .full
                .resolve_full_hgvs(&name.preprocessed, seq, transcripts)
                .and_then(|call| call.validate().map(|_| call));
            match attempt {
                Ok(call) => {
                    return Ok(Resolution {
                        call,
                        path: ResolutionPath::Full,
                        corrections,
                        full_error: None,
                    })
                }
                Err(e) if e.allows_fallback() => {
                    log::debug!(
                        "{}: full resolution failed [{}], falling back: {}",
                        name.preprocessed,
                        e.code(),
                        e
                    );
                    Some(e)
                }
                Err(e) => return Err(e),
            }
        };

        let anchor: GenomicAnchor = request.genomic_position.trim().parse()?;
        let call = resolve_fallback(&effect.preprocessed, &anchor, strand, seq)?;
        call.validate()?;
        Ok(Resolution {
            call,
            path: ResolutionPath::Fallback,
            corrections,
            full_error,
        })
    }
}

/// Resolve one variant with the default configuration
///
/// `strand` is `"+"` or `"-"`; `genomic_position` is `"chrom:pos"`.
pub fn resolve_variant<S, T>(
    variant_name: &str,
    functional_effect: &str,
    coding_effect: &str,
    genomic_position: &str,
    strand: &str,
    seq: &S,
    transcripts: &T,
) -> Result<VariantCall, FerroError>
where
    S: SequenceAccessor,
    T: TranscriptLookup,
{
    let request = VariantRequest::new(
        variant_name,
        functional_effect,
        coding_effect,
        genomic_position,
        strand,
    );
    VariantResolver::default()
        .resolve(&request, seq, transcripts)
        .map(|resolution| resolution.call)
}
