//! # propstore
//!
//! Typed accessors over a file-backed string property store.
//!
//! An application declares its settings as a closed set of keys, each with an
//! optional default, and reads or writes them as strings, `i32`, `i64`, `f64`
//! or `bool`.  The values live in one in-memory map that can be loaded from and
//! stored to a file on disk.
//!
//! # Architecture overview (for beginners)
//!
//! - **`domain`** – The two concepts the crate is about.
//!   [`PropertyKey`] names a setting and supplies its fallback value;
//!   [`PropertyStore`] holds the live values, resolves keys against them and
//!   converts between strings and typed values.
//!
//! - **`format`** – How the map travels to and from disk.  The default
//!   [`format::XmlFormat`] writes an XML properties document; the
//!   [`format::TomlFormat`] alternative writes a flat TOML table.  Both sit
//!   behind the [`format::PropertyFormat`] trait, so the store never deals with
//!   document syntax itself.
//!
//! ```rust
//! use propstore::{property_keys, PropertyStore};
//!
//! property_keys! {
//!     pub enum Setting {
//!         Retries = "3",
//!         Endpoint,
//!     }
//! }
//!
//! let mut props = PropertyStore::new();
//! assert_eq!(props.get_int(&Setting::Retries).unwrap(), 3);
//! assert!(props.get(&Setting::Endpoint).is_err());
//!
//! props.set(&Setting::Endpoint, "https://example.org");
//! assert_eq!(props.get(&Setting::Endpoint).unwrap(), "https://example.org");
//! ```

pub mod domain;
pub mod format;

// Re-export the everyday types at the crate root so callers can write
// `propstore::PropertyStore` instead of `propstore::domain::store::PropertyStore`.
pub use domain::key::PropertyKey;
pub use domain::store::{PropertyStore, StoreError};
pub use format::{CodecError, PropertyFormat};
