//! The property store: a string map with typed accessors and file persistence.
//!
//! [`PropertyStore`] keeps every entry in memory.  [`load`](PropertyStore::load)
//! replaces the whole map with the contents of the backing file and
//! [`store`](PropertyStore::store) writes the whole map back, so a typical
//! lifecycle looks like this:
//!
//! ```rust,no_run
//! use propstore::{property_keys, PropertyStore};
//!
//! property_keys! {
//!     pub enum AppKey {
//!         Port = "8080",
//!         Verbose = "false",
//!     }
//! }
//!
//! # fn main() -> Result<(), propstore::StoreError> {
//! let mut props = PropertyStore::with_location_and_comment("app.xml", "App settings");
//! props.load()?;
//! let port = props.get_int(&AppKey::Port)?;
//! props.set_bool(&AppKey::Verbose, true);
//! props.store()?;
//! # let _ = port;
//! # Ok(())
//! # }
//! ```
//!
//! # Lookup rules
//!
//! Every getter resolves the key the same way: the stored entry if there is
//! one, otherwise the key's default.  When neither exists, string and numeric
//! getters fail with [`StoreError::MissingValue`].  [`get_bool`](PropertyStore::get_bool)
//! never fails: only a case-insensitive `"true"` is `true`, and everything
//! else, including a missing value, is `false`.
//!
//! # Threading
//!
//! All mutation goes through `&mut self`.  To share one store between threads,
//! wrap it in a `Mutex` so loads, stores and updates are serialized.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::num::{ParseFloatError, ParseIntError};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, trace};

use crate::domain::key::PropertyKey;
use crate::format::{CodecError, Entries, PropertyFormat, XmlFormat};

/// Errors returned by [`PropertyStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `load` or `store` was called before a location was configured.
    #[error("no location configured for the property store")]
    MissingLocation,

    /// The backing file could not be opened, created, read or written.
    #[error("I/O error accessing properties at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing file is not a valid document of the store's format.
    #[error("failed to read properties from {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    /// The entries could not be encoded into the store's format.
    #[error("failed to write properties to {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    /// The key has no stored entry and no default.
    #[error("property `{key}` is not set and has no default")]
    MissingValue { key: String },

    /// The resolved value is not a valid integer literal.
    #[error("property `{key}` is not a valid integer: {value:?}")]
    InvalidInt {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The resolved value is not a valid floating-point literal.
    #[error("property `{key}` is not a valid floating-point number: {value:?}")]
    InvalidFloat {
        key: String,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

/// An in-memory property map bound to an optional backing file.
///
/// The type parameter selects the on-disk format; it defaults to
/// [`XmlFormat`].  Use [`PropertyStore::with_format`] to pick another one.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyStore<F = XmlFormat> {
    /// The live configuration state.
    entries: Entries,
    /// Where `load` reads from and `store` writes to.
    location: Option<PathBuf>,
    /// Header written by `store`; never read back.
    comment: Option<String>,
    format: F,
}

// ── Construction ──────────────────────────────────────────────────────────────

impl PropertyStore<XmlFormat> {
    /// Creates an empty, in-memory store with no location and no comment.
    ///
    /// `load` and `store` fail with [`StoreError::MissingLocation`] until a
    /// location is set with [`set_location`](Self::set_location).
    pub fn new() -> Self {
        Self::with_format(XmlFormat)
    }

    /// Creates an empty store bound to `path`.
    pub fn with_location(path: impl Into<PathBuf>) -> Self {
        let mut props = Self::new();
        props.set_location(path);
        props
    }

    /// Creates an empty store bound to `path` that writes `comment` as the
    /// document header on [`store`](Self::store).
    pub fn with_location_and_comment(path: impl Into<PathBuf>, comment: impl Into<String>) -> Self {
        let mut props = Self::with_location(path);
        props.set_comment(comment);
        props
    }
}

impl Default for PropertyStore<XmlFormat> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PropertyFormat> PropertyStore<F> {
    /// Creates an empty store with no location that persists using `format`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use propstore::{format::TomlFormat, PropertyStore};
    ///
    /// let mut props = PropertyStore::with_format(TomlFormat);
    /// props.set_location("settings.toml");
    /// assert!(props.is_empty());
    /// ```
    pub fn with_format(format: F) -> Self {
        Self {
            entries: Entries::new(),
            location: None,
            comment: None,
            format,
        }
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    /// Returns the backing file location, if one is set.
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Binds the store to `path`.  The path is not checked until the next
    /// `load` or `store`.
    pub fn set_location(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.location = Some(path.into());
        self
    }

    /// Returns the header comment, if one is set.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Sets the header comment written by [`store`](Self::store).
    pub fn set_comment(&mut self, comment: impl Into<String>) -> &mut Self {
        self.comment = Some(comment.into());
        self
    }

    // ── Persistence ───────────────────────────────────────────────────────────

    /// Replaces all entries with the contents of the backing file.
    ///
    /// Entries that are not in the file are dropped; this is not a merge.  On
    /// failure the current entries are left untouched.
    ///
    /// # Errors
    ///
    /// - [`StoreError::MissingLocation`] if no location is set.
    /// - [`StoreError::Io`] if the file cannot be opened.
    /// - [`StoreError::Decode`] if the file cannot be read or parsed.
    pub fn load(&mut self) -> Result<&mut Self, StoreError> {
        let path = self
            .location
            .as_deref()
            .ok_or(StoreError::MissingLocation)?;

        let file = File::open(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);
        let entries = self
            .format
            .decode(&mut reader)
            .map_err(|source| StoreError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), entries = entries.len(), "loaded properties");
        self.entries = entries;
        Ok(self)
    }

    /// Writes all entries and the header comment to the backing file,
    /// replacing its previous contents.
    ///
    /// # Errors
    ///
    /// - [`StoreError::MissingLocation`] if no location is set.
    /// - [`StoreError::Io`] if the file cannot be created or written, including
    ///   writes that fail while the document is being encoded.
    /// - [`StoreError::Encode`] if the entries cannot be encoded.
    pub fn store(&self) -> Result<&Self, StoreError> {
        let path = self
            .location
            .as_deref()
            .ok_or(StoreError::MissingLocation)?;
        let io_error = |source: io::Error| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        self.format
            .encode(&self.entries, self.comment.as_deref(), &mut writer)
            .map_err(|err| match err {
                CodecError::Io(source) => io_error(source),
                source => StoreError::Encode {
                    path: path.to_path_buf(),
                    source,
                },
            })?;
        writer.flush().map_err(io_error)?;

        debug!(path = %path.display(), entries = self.entries.len(), "stored properties");
        Ok(self)
    }

    // ── String accessors ──────────────────────────────────────────────────────

    /// Returns the stored value for `key`, or its default, or `None`.
    pub fn lookup<'a, K: PropertyKey + ?Sized>(&'a self, key: &'a K) -> Option<&'a str> {
        self.entries
            .get(key.name())
            .map(String::as_str)
            .or_else(|| key.default_value())
    }

    /// Returns the stored value for `key`, falling back to its default.
    ///
    /// An entry that was explicitly set to `""` is returned as `""`; the
    /// default only applies when there is no entry at all.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingValue`] if there is neither an entry nor a
    /// default.
    pub fn get<'a, K: PropertyKey + ?Sized>(&'a self, key: &'a K) -> Result<&'a str, StoreError> {
        self.lookup(key).ok_or_else(|| StoreError::MissingValue {
            key: key.name().to_owned(),
        })
    }

    /// Inserts or overwrites the entry for `key`.
    pub fn set<K: PropertyKey + ?Sized>(&mut self, key: &K, value: impl Into<String>) {
        let value = value.into();
        trace!(key = key.name(), value = %value, "set property");
        self.entries.insert(key.name().to_owned(), value);
    }

    // ── Typed accessors ───────────────────────────────────────────────────────

    /// Resolves `key` and parses it as an `i32`.
    ///
    /// # Errors
    ///
    /// [`StoreError::MissingValue`] if unset without default,
    /// [`StoreError::InvalidInt`] if the value is not an integer literal.
    pub fn get_int<K: PropertyKey + ?Sized>(&self, key: &K) -> Result<i32, StoreError> {
        self.parse_int(key)
    }

    /// Stores `value` in canonical decimal form.
    pub fn set_int<K: PropertyKey + ?Sized>(&mut self, key: &K, value: i32) {
        self.set(key, value.to_string());
    }

    /// Resolves `key` and parses it as an `i64`.
    ///
    /// # Errors
    ///
    /// [`StoreError::MissingValue`] if unset without default,
    /// [`StoreError::InvalidInt`] if the value is not an integer literal.
    pub fn get_long<K: PropertyKey + ?Sized>(&self, key: &K) -> Result<i64, StoreError> {
        self.parse_int(key)
    }

    /// Stores `value` in canonical decimal form.
    pub fn set_long<K: PropertyKey + ?Sized>(&mut self, key: &K, value: i64) {
        self.set(key, value.to_string());
    }

    /// Resolves `key` and parses it as an `f64`.
    ///
    /// # Errors
    ///
    /// [`StoreError::MissingValue`] if unset without default,
    /// [`StoreError::InvalidFloat`] if the value is not a float literal.
    pub fn get_double<K: PropertyKey + ?Sized>(&self, key: &K) -> Result<f64, StoreError> {
        let value = self.get(key)?;
        value.parse().map_err(|source| StoreError::InvalidFloat {
            key: key.name().to_owned(),
            value: value.to_owned(),
            source,
        })
    }

    /// Stores `value` in its shortest round-trippable decimal form.
    pub fn set_double<K: PropertyKey + ?Sized>(&mut self, key: &K, value: f64) {
        self.set(key, value.to_string());
    }

    /// Resolves `key` as a boolean.
    ///
    /// Returns `true` only for `"true"` in any letter case.  Malformed and
    /// missing values are `false`; this getter has no error case.
    pub fn get_bool<K: PropertyKey + ?Sized>(&self, key: &K) -> bool {
        self.lookup(key)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }

    /// Stores `"true"` or `"false"`.
    pub fn set_bool<K: PropertyKey + ?Sized>(&mut self, key: &K, value: bool) {
        self.set(key, value.to_string());
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    /// Returns `true` if there is a stored entry for `key`.  Defaults do not
    /// count.
    pub fn contains<K: PropertyKey + ?Sized>(&self, key: &K) -> bool {
        self.entries.contains_key(key.name())
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no stored entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the stored entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn parse_int<T, K>(&self, key: &K) -> Result<T, StoreError>
    where
        T: FromStr<Err = ParseIntError>,
        K: PropertyKey + ?Sized,
    {
        let value = self.get(key)?;
        value.parse().map_err(|source| StoreError::InvalidInt {
            key: key.name().to_owned(),
            value: value.to_owned(),
            source,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::TomlFormat;
    use uuid::Uuid;

    crate::property_keys! {
        enum TestKey {
            Name = "anonymous",
            Port = "8080",
            Ratio = "0.5",
            Verbose = "TRUE",
            BadNumber = "not-a-number",
            NoDefault,
        }
    }

    fn temp_path(extension: &str) -> PathBuf {
        std::env::temp_dir().join(format!("propstore_test_{}.{extension}", Uuid::new_v4()))
    }

    // ── Construction ──────────────────────────────────────────────────────────

    #[test]
    fn test_new_store_has_no_location_comment_or_entries() {
        let props = PropertyStore::new();
        assert_eq!(props.location(), None);
        assert_eq!(props.comment(), None);
        assert!(props.is_empty());
    }

    #[test]
    fn test_with_location_and_comment_sets_both() {
        let props = PropertyStore::with_location_and_comment("/tmp/app.xml", "header");
        assert_eq!(props.location(), Some(Path::new("/tmp/app.xml")));
        assert_eq!(props.comment(), Some("header"));
    }

    #[test]
    fn test_default_equals_new() {
        assert_eq!(PropertyStore::default(), PropertyStore::new());
    }

    #[test]
    fn test_configuration_setters_chain() {
        // Arrange
        let mut props = PropertyStore::new();

        // Act
        props.set_location("a.xml").set_comment("c").set_location("b.xml");

        // Assert
        assert_eq!(props.location(), Some(Path::new("b.xml")));
        assert_eq!(props.comment(), Some("c"));
    }

    // ── String accessors ──────────────────────────────────────────────────────

    #[test]
    fn test_get_returns_default_when_unset() {
        let props = PropertyStore::new();
        assert_eq!(props.get(&TestKey::Name).unwrap(), "anonymous");
    }

    #[test]
    fn test_set_overrides_default() {
        // Arrange
        let mut props = PropertyStore::new();

        // Act
        props.set(&TestKey::Name, "alice");

        // Assert
        assert_eq!(props.get(&TestKey::Name).unwrap(), "alice");
    }

    #[test]
    fn test_explicit_empty_value_is_not_replaced_by_default() {
        let mut props = PropertyStore::new();
        props.set(&TestKey::Name, "");
        assert_eq!(props.get(&TestKey::Name).unwrap(), "");
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let mut props = PropertyStore::new();
        props.set(&TestKey::NoDefault, "first");
        props.set(&TestKey::NoDefault, "second");
        assert_eq!(props.get(&TestKey::NoDefault).unwrap(), "second");
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_get_without_entry_or_default_is_missing_value() {
        // Arrange
        let props = PropertyStore::new();

        // Act
        let result = props.get(&TestKey::NoDefault);

        // Assert
        assert!(matches!(result, Err(StoreError::MissingValue { ref key }) if key == "NoDefault"));
        assert_eq!(props.lookup(&TestKey::NoDefault), None);
    }

    #[test]
    fn test_contains_ignores_defaults() {
        let mut props = PropertyStore::new();
        assert!(!props.contains(&TestKey::Name));
        props.set(&TestKey::Name, "x");
        assert!(props.contains(&TestKey::Name));
    }

    #[test]
    fn test_iter_yields_entries_in_key_order() {
        // Arrange
        let mut props = PropertyStore::new();
        props.set(&TestKey::Port, "1");
        props.set(&TestKey::Name, "n");

        // Act
        let entries: Vec<(&str, &str)> = props.iter().collect();

        // Assert
        assert_eq!(entries, [("Name", "n"), ("Port", "1")]);
    }

    // ── Typed accessors ───────────────────────────────────────────────────────

    #[test]
    fn test_int_set_then_get() {
        let mut props = PropertyStore::new();
        props.set_int(&TestKey::Port, 42);
        assert_eq!(props.get_int(&TestKey::Port).unwrap(), 42);
        assert_eq!(props.get(&TestKey::Port).unwrap(), "42");
    }

    #[test]
    fn test_int_parses_default() {
        let props = PropertyStore::new();
        assert_eq!(props.get_int(&TestKey::Port).unwrap(), 8080);
    }

    #[test]
    fn test_int_accepts_negative_and_explicit_plus() {
        let mut props = PropertyStore::new();
        props.set(&TestKey::Port, "-17");
        assert_eq!(props.get_int(&TestKey::Port).unwrap(), -17);
        props.set(&TestKey::Port, "+17");
        assert_eq!(props.get_int(&TestKey::Port).unwrap(), 17);
    }

    #[test]
    fn test_int_rejects_non_numeric_value() {
        // Arrange
        let mut props = PropertyStore::new();
        props.set(&TestKey::Port, "abc");

        // Act
        let result = props.get_int(&TestKey::Port);

        // Assert
        assert!(matches!(
            result,
            Err(StoreError::InvalidInt { ref key, ref value, .. }) if key == "Port" && value == "abc"
        ));
    }

    #[test]
    fn test_int_rejects_out_of_range_value() {
        let mut props = PropertyStore::new();
        props.set_long(&TestKey::Port, i64::from(i32::MAX) + 1);
        assert!(matches!(
            props.get_int(&TestKey::Port),
            Err(StoreError::InvalidInt { .. })
        ));
        assert_eq!(
            props.get_long(&TestKey::Port).unwrap(),
            i64::from(i32::MAX) + 1
        );
    }

    #[test]
    fn test_int_rejects_surrounding_whitespace() {
        let mut props = PropertyStore::new();
        props.set(&TestKey::Port, " 42");
        assert!(props.get_int(&TestKey::Port).is_err());
    }

    #[test]
    fn test_int_rejects_malformed_default() {
        let props = PropertyStore::new();
        assert!(matches!(
            props.get_int(&TestKey::BadNumber),
            Err(StoreError::InvalidInt { .. })
        ));
    }

    #[test]
    fn test_typed_getter_without_value_is_missing_value() {
        let props = PropertyStore::new();
        assert!(matches!(
            props.get_int(&TestKey::NoDefault),
            Err(StoreError::MissingValue { .. })
        ));
        assert!(matches!(
            props.get_long(&TestKey::NoDefault),
            Err(StoreError::MissingValue { .. })
        ));
        assert!(matches!(
            props.get_double(&TestKey::NoDefault),
            Err(StoreError::MissingValue { .. })
        ));
    }

    #[test]
    fn test_long_set_then_get() {
        let mut props = PropertyStore::new();
        props.set_long(&TestKey::Port, 42);
        assert_eq!(props.get_long(&TestKey::Port).unwrap(), 42);
        props.set_long(&TestKey::Port, i64::MIN);
        assert_eq!(props.get_long(&TestKey::Port).unwrap(), i64::MIN);
    }

    #[test]
    fn test_double_set_then_get() {
        let mut props = PropertyStore::new();
        props.set_double(&TestKey::Ratio, 42.0);
        assert_eq!(props.get_double(&TestKey::Ratio).unwrap(), 42.0);
        props.set_double(&TestKey::Ratio, 0.1);
        assert_eq!(props.get_double(&TestKey::Ratio).unwrap(), 0.1);
    }

    #[test]
    fn test_double_parses_default() {
        let props = PropertyStore::new();
        assert_eq!(props.get_double(&TestKey::Ratio).unwrap(), 0.5);
    }

    #[test]
    fn test_double_rejects_non_numeric_value() {
        let mut props = PropertyStore::new();
        props.set(&TestKey::Ratio, "half");
        assert!(matches!(
            props.get_double(&TestKey::Ratio),
            Err(StoreError::InvalidFloat { ref value, .. }) if value == "half"
        ));
    }

    #[test]
    fn test_bool_is_case_insensitive_true() {
        let mut props = PropertyStore::new();
        props.set(&TestKey::Verbose, "TrUe");
        assert!(props.get_bool(&TestKey::Verbose));
    }

    #[test]
    fn test_bool_treats_anything_else_as_false() {
        // Arrange
        let mut props = PropertyStore::new();

        for value in ["yes", "", "1", "false", "true ", "t"] {
            // Act
            props.set(&TestKey::Verbose, value);

            // Assert
            assert!(!props.get_bool(&TestKey::Verbose), "{value:?} must be false");
        }
    }

    #[test]
    fn test_bool_uses_default_and_missing_is_false() {
        let props = PropertyStore::new();
        assert!(props.get_bool(&TestKey::Verbose), "default \"TRUE\" is true");
        assert!(!props.get_bool(&TestKey::NoDefault));
    }

    #[test]
    fn test_bool_set_then_get() {
        let mut props = PropertyStore::new();
        props.set_bool(&TestKey::Verbose, false);
        assert_eq!(props.get(&TestKey::Verbose).unwrap(), "false");
        assert!(!props.get_bool(&TestKey::Verbose));
        props.set_bool(&TestKey::Verbose, true);
        assert_eq!(props.get(&TestKey::Verbose).unwrap(), "true");
    }

    // ── Persistence ───────────────────────────────────────────────────────────

    #[test]
    fn test_load_without_location_fails_and_keeps_entries() {
        // Arrange
        let mut props = PropertyStore::new();
        props.set(&TestKey::Name, "kept");

        // Act
        let result = props.load().map(|_| ());

        // Assert
        assert!(matches!(result, Err(StoreError::MissingLocation)));
        assert_eq!(props.get(&TestKey::Name).unwrap(), "kept");
    }

    #[test]
    fn test_store_without_location_fails() {
        let props = PropertyStore::new();
        assert!(matches!(props.store(), Err(StoreError::MissingLocation)));
    }

    #[test]
    fn test_load_missing_file_is_io_error_and_keeps_entries() {
        // Arrange
        let path = temp_path("xml");
        let mut props = PropertyStore::with_location(&path);
        props.set(&TestKey::Name, "kept");

        // Act
        let result = props.load().map(|_| ());

        // Assert
        assert!(matches!(result, Err(StoreError::Io { path: ref p, .. }) if *p == path));
        assert_eq!(props.get(&TestKey::Name).unwrap(), "kept");
    }

    #[test]
    fn test_load_garbage_is_decode_error_and_keeps_entries() {
        // Arrange
        let path = temp_path("xml");
        std::fs::write(&path, "WIDTH=1280").unwrap();
        let mut props = PropertyStore::with_location(&path);
        props.set(&TestKey::Name, "kept");

        // Act
        let result = props.load().map(|_| ());

        // Assert
        assert!(matches!(result, Err(StoreError::Decode { .. })));
        assert_eq!(props.get(&TestKey::Name).unwrap(), "kept");

        // Cleanup
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_store_into_missing_directory_is_io_error() {
        let path = std::env::temp_dir()
            .join(format!("propstore_missing_{}", Uuid::new_v4()))
            .join("app.xml");
        let props = PropertyStore::with_location(path);
        assert!(matches!(props.store(), Err(StoreError::Io { .. })));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_store_write_failure_during_encode_is_io_error() {
        // Arrange – /dev/full opens fine but rejects every write with ENOSPC;
        // the value is larger than the write buffer so the failure happens
        // while the document is still being encoded.
        let mut props = PropertyStore::with_location("/dev/full");
        props.set(&TestKey::Name, "x".repeat(64 * 1024));

        // Act
        let result = props.store().map(|_| ());

        // Assert
        assert!(matches!(
            result,
            Err(StoreError::Io { ref path, .. }) if path == Path::new("/dev/full")
        ));
    }

    #[test]
    fn test_load_replaces_entries_instead_of_merging() {
        // Arrange – persist only Port, then add Name in memory
        let path = temp_path("xml");
        let mut props = PropertyStore::with_location(&path);
        props.set_int(&TestKey::Port, 9000);
        props.store().unwrap();
        props.set(&TestKey::Name, "transient");

        // Act
        props.load().unwrap();

        // Assert
        assert_eq!(props.get_int(&TestKey::Port).unwrap(), 9000);
        assert!(!props.contains(&TestKey::Name));
        assert_eq!(props.get(&TestKey::Name).unwrap(), "anonymous");

        // Cleanup
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_store_writes_comment_header() {
        // Arrange
        let path = temp_path("xml");
        let mut props = PropertyStore::with_location_and_comment(&path, "Saved by tests");
        props.set(&TestKey::Name, "x");

        // Act
        props.store().unwrap();

        // Assert
        let document = std::fs::read_to_string(&path).unwrap();
        assert!(document.contains("<comment>Saved by tests</comment>"));
        assert!(document.contains(r#"<entry key="Name">x</entry>"#));

        // Cleanup
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_store_truncates_previous_content() {
        // Arrange – a long file followed by a shorter store
        let path = temp_path("xml");
        let mut props = PropertyStore::with_location(&path);
        props.set(&TestKey::Name, "x".repeat(4096));
        props.store().unwrap();

        // Act
        let mut short = PropertyStore::with_location(&path);
        short.set(&TestKey::Port, "1");
        short.store().unwrap();
        let mut reloaded = PropertyStore::with_location(&path);
        reloaded.load().unwrap();

        // Assert
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get(&TestKey::Port).unwrap(), "1");

        // Cleanup
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_toml_store_round_trips() {
        // Arrange
        let path = temp_path("toml");
        let mut props = PropertyStore::with_format(TomlFormat);
        props.set_location(&path).set_comment("toml settings");
        props.set_double(&TestKey::Ratio, 2.5);
        props.set_bool(&TestKey::Verbose, true);

        // Act
        props.store().unwrap();
        let mut reloaded = PropertyStore::with_format(TomlFormat);
        reloaded.set_location(&path).load().unwrap();

        // Assert
        assert_eq!(reloaded.get_double(&TestKey::Ratio).unwrap(), 2.5);
        assert!(reloaded.get_bool(&TestKey::Verbose));
        assert_eq!(reloaded.comment(), None, "comment is write-only");

        // Cleanup
        std::fs::remove_file(&path).ok();
    }
}
