//! Provisioning: environment assembly, image selection, metadata reporting

pub mod env;
pub mod image;
pub mod metadata;

pub use env::{assemble, rewrite_loopback, EnvironmentBundle};
pub use image::{select_image, Provisioned, ResolvedImage};
pub use metadata::MetadataReport;
