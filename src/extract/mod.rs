//! The normalization and extraction pipeline.
//!
//! Leaf components turning noisy page text into three stable facts per
//! download entry: application identity, version, and variant descriptor.

pub mod filetype;
pub mod identity;
pub mod normalize;
pub mod taxonomy;
pub mod variant;
pub mod version;

pub use filetype::resolve_extension;
pub use identity::build_identity;
pub use normalize::{NameResolver, NormalizeMode};
pub use taxonomy::VariantTaxonomy;
pub use variant::{classify, variant_label};
pub use version::extract_version;
