//! Common building blocks shared by read, write and table operations.
//!
//! This module holds the field model, the codec converting it to and from the
//! SDK's native attribute values, key types, cursor tokens and the error type.

/// Field conversion to and from native attribute values.
pub mod codec;

/// Opaque page-cursor tokens.
pub mod cursor;

/// Error type and its client/server classification.
pub mod error;

/// The tagged field model.
pub mod field;

/// Key types for identifying items and declaring table schemas.
pub mod key;
