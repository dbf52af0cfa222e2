//! Foundation types for the varc container format.
//!
//! This crate provides the types shared by every other varc crate: the
//! 128-bit [`AssetKey`] that names a stored asset, and the asset type
//! registry that maps numeric type codes to extension tags and capability
//! flags.
//!
//! # Key Types
//!
//! - [`AssetKey`] — 128-bit asset identifier (external, or content-derived)
//! - [`AssetTypeInfo`] — one row of the fixed asset type registry
//! - [`TypeError`] — parsing and name-lookup failures

pub mod asset;
pub mod error;
pub mod key;

pub use asset::{code_for_extension, code_named, describe, AssetTypeInfo, NONE_CODE, UNKNOWN_CODE};
pub use error::TypeError;
pub use key::AssetKey;
