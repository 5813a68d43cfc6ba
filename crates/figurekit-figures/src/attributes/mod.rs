//! Typed figure attributes.
//!
//! An [`AttributeKey`] is a typed token; values are stored as tagged
//! [`AttributeValue`]s inside a figure's [`AttributeStore`].

mod key;
pub mod keys;
mod store;
mod value;

pub use key::{key_info, registered_keys, AttributeKey, KeyInfo};
pub use store::{AttributeChange, AttributeRestoreData, AttributeStore};
pub use value::{Attribute, AttributeValue, Color, Gradient, GradientKind, GradientStop};
