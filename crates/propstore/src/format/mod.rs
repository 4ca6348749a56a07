//! Backing stream formats for a [`crate::PropertyStore`].
//!
//! A format turns the store's flat string map into bytes and back.  The store
//! itself never looks at the bytes; it only opens the file, hands the stream to
//! a [`PropertyFormat`], and swaps in the decoded map on success.
//!
//! Two formats ship with the crate:
//!
//! - [`XmlFormat`] – the XML properties document (`<properties>` root with
//!   `<entry key="…">` children).  This is the default.
//! - [`TomlFormat`] – a flat TOML table of string values, for applications that
//!   keep their settings next to other `.toml` files.
//!
//! Both write an optional header comment and ignore it when reading.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use thiserror::Error;

pub mod toml;
pub mod xml;

pub use self::toml::TomlFormat;
pub use self::xml::XmlFormat;

/// The in-memory shape of every backing stream: unique string keys mapped to
/// string values.
///
/// A `BTreeMap` keeps the encoded output stable between runs; key order carries
/// no meaning.
pub type Entries = BTreeMap<String, String>;

/// Errors produced while encoding or decoding a backing stream.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Reading from or writing to the underlying stream failed.
    #[error("stream I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The XML writer rejected an event.
    #[error("XML writer failed: {0}")]
    Xml(#[source] quick_xml::Error),

    /// The stream is not a well-formed document of the expected format.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// The same key appears more than once in the document.
    #[error("duplicate key in document: {0}")]
    DuplicateKey(String),

    /// An element appeared where the format does not allow it.
    #[error("unexpected element <{0}>")]
    UnexpectedElement(String),
}

impl From<quick_xml::Error> for CodecError {
    /// Stream failures reported by the XML writer stay [`CodecError::Io`].
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(io) => Self::Io(std::io::Error::new(io.kind(), io)),
            other => Self::Xml(other),
        }
    }
}

impl CodecError {
    /// Wraps any displayable parser/serializer error as [`CodecError::Malformed`].
    pub(crate) fn malformed(err: impl std::fmt::Display) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Serializes a property map to a byte stream and back.
///
/// Implementations must round-trip: `decode(encode(entries, comment))` yields
/// `entries` for any comment.  The comment is write-only.
pub trait PropertyFormat {
    /// Reads a complete document from `input`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the stream cannot be read or is not a valid
    /// document.
    fn decode(&self, input: &mut dyn Read) -> Result<Entries, CodecError>;

    /// Writes `entries`, preceded by `comment` if present, to `output`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the document cannot be produced or the stream
    /// rejects the write.
    fn encode(
        &self,
        entries: &Entries,
        comment: Option<&str>,
        output: &mut dyn Write,
    ) -> Result<(), CodecError>;
}
