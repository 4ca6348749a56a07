//! Domain types for the property store.
//!
//! Nothing in this module knows about document syntax.  File access is limited
//! to opening the backing file; reading and writing its contents is delegated
//! to a [`crate::format::PropertyFormat`].

/// Property keys and the `property_keys!` declaration macro.
pub mod key;

/// The property store itself.
///
/// See [`store::PropertyStore`] for the main type.
pub mod store;
