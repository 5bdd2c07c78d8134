//! Image selection
//!
//! Chooses the final container image for a cycle: the cache hit's image, or
//! the generic builder image which builds on the fly at container start.
//! The selected image and its environment source travel together in a
//! `Provisioned` value so the two can never be mixed across branches.

use crate::cache::CacheOutcome;
use crate::provision::env::EnvironmentBundle;

/// The container image resolved for one provisioning cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedImage {
    /// The generic builder image; the build happens at container start
    Builder(String),
    /// A prebuilt image resolved from the cache registry
    Cached(String),
}

impl ResolvedImage {
    /// The image reference handed to the container runtime
    pub fn reference(&self) -> &str {
        match self {
            Self::Builder(image) | Self::Cached(image) => image,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, Self::Cached(_))
    }
}

/// One cycle's image and its matching environment source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisioned {
    pub image: ResolvedImage,
    pub env: EnvironmentBundle,
}

/// Apply the selection decision table.
///
/// Consumes the outcome so exactly one (image, environment) pairing exists
/// per cycle:
/// - cache disabled  -> builder image + assembled environment
/// - cache hit       -> cached image  + hit-path environment
/// - build triggered -> builder image + resolver's environment
pub fn select_image(
    outcome: CacheOutcome,
    builder_image: &str,
    assembled: EnvironmentBundle,
) -> Provisioned {
    match outcome {
        CacheOutcome::Disabled => Provisioned {
            image: ResolvedImage::Builder(builder_image.to_string()),
            env: assembled,
        },
        CacheOutcome::Hit { image, env } => Provisioned {
            image: ResolvedImage::Cached(image),
            env,
        },
        CacheOutcome::Build { env } => Provisioned {
            image: ResolvedImage::Builder(builder_image.to_string()),
            env,
        },
    }
}
