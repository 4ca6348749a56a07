//! XML properties document codec.
//!
//! Document shape:
//! ```text
//! <?xml version="1.0" encoding="UTF-8" standalone="no"?>
//! <!DOCTYPE properties SYSTEM "http://java.sun.com/dtd/properties.dtd">
//! <properties>
//! <comment>optional header comment</comment>
//! <entry key="window.width">1280</entry>
//! <entry key="empty"/>
//! </properties>
//! ```
//! The `<comment>` element is optional and ignored when reading.  Entry keys
//! must be unique within a document.

use std::collections::btree_map::Entry;
use std::io::{Read, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::{CodecError, Entries, PropertyFormat};

const ROOT: &[u8] = b"properties";
const COMMENT: &[u8] = b"comment";
const ENTRY: &[u8] = b"entry";
const KEY_ATTRIBUTE: &str = "key";
const DOCTYPE: &str = r#"properties SYSTEM "http://java.sun.com/dtd/properties.dtd""#;

/// Reads and writes the XML properties document format.
///
/// # Examples
///
/// ```rust
/// use propstore::format::{Entries, PropertyFormat, XmlFormat};
///
/// let mut entries = Entries::new();
/// entries.insert("greeting".to_string(), "hello <world>".to_string());
///
/// let mut bytes = Vec::new();
/// XmlFormat.encode(&entries, Some("demo"), &mut bytes).unwrap();
/// let decoded = XmlFormat.decode(&mut bytes.as_slice()).unwrap();
/// assert_eq!(decoded, entries);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XmlFormat;

/// Where the reader currently is in the document.
enum Cursor {
    BeforeRoot,
    InRoot,
    InComment,
    InEntry { key: String, value: String },
    AfterRoot,
}

impl PropertyFormat for XmlFormat {
    fn decode(&self, input: &mut dyn Read) -> Result<Entries, CodecError> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;

        let mut reader = Reader::from_str(&text);
        let mut entries = Entries::new();
        let mut seen_comment = false;
        let mut cursor = Cursor::BeforeRoot;

        loop {
            let event = reader.read_event().map_err(CodecError::malformed)?;
            cursor = match (cursor, event) {
                (Cursor::AfterRoot, Event::Eof) => return Ok(entries),
                (Cursor::BeforeRoot, Event::Eof) => {
                    return Err(CodecError::Malformed(
                        "document has no <properties> element".to_string(),
                    ))
                }
                (_, Event::Eof) => {
                    return Err(CodecError::Malformed(
                        "document ended before </properties>".to_string(),
                    ))
                }

                (Cursor::BeforeRoot, Event::Start(e)) if e.name().as_ref() == ROOT => {
                    Cursor::InRoot
                }
                (Cursor::BeforeRoot, Event::Empty(e)) if e.name().as_ref() == ROOT => {
                    Cursor::AfterRoot
                }

                (Cursor::InRoot, Event::Start(e)) => match e.name().as_ref() {
                    COMMENT if !seen_comment => {
                        seen_comment = true;
                        Cursor::InComment
                    }
                    ENTRY => Cursor::InEntry {
                        key: entry_key(&e)?,
                        value: String::new(),
                    },
                    _ => return Err(unexpected(&e)),
                },
                (Cursor::InRoot, Event::Empty(e)) => match e.name().as_ref() {
                    COMMENT if !seen_comment => {
                        seen_comment = true;
                        Cursor::InRoot
                    }
                    ENTRY => {
                        insert_unique(&mut entries, entry_key(&e)?, String::new())?;
                        Cursor::InRoot
                    }
                    _ => return Err(unexpected(&e)),
                },
                // Mismatched end tags are rejected by the reader itself, so
                // this can only be `</properties>`.
                (Cursor::InRoot, Event::End(_)) => Cursor::AfterRoot,

                (Cursor::InComment, Event::Text(_) | Event::CData(_)) => Cursor::InComment,
                (Cursor::InComment, Event::End(_)) => Cursor::InRoot,

                (Cursor::InEntry { key, mut value }, Event::Text(t)) => {
                    value.push_str(&t.unescape().map_err(CodecError::malformed)?);
                    Cursor::InEntry { key, value }
                }
                (Cursor::InEntry { key, mut value }, Event::CData(c)) => {
                    value.push_str(std::str::from_utf8(&c).map_err(CodecError::malformed)?);
                    Cursor::InEntry { key, value }
                }
                (Cursor::InEntry { key, value }, Event::End(_)) => {
                    insert_unique(&mut entries, key, value)?;
                    Cursor::InRoot
                }

                (cursor, Event::Text(t)) => {
                    if !t.iter().all(u8::is_ascii_whitespace) {
                        return Err(CodecError::Malformed(
                            "text outside of an <entry> element".to_string(),
                        ));
                    }
                    cursor
                }
                (_, Event::Start(e) | Event::Empty(e)) => return Err(unexpected(&e)),
                (_, Event::End(_) | Event::CData(_)) => {
                    return Err(CodecError::Malformed(
                        "content outside of the <properties> element".to_string(),
                    ))
                }
                // Declaration, DOCTYPE, comments and processing instructions.
                (cursor, _) => cursor,
            };
        }
    }

    fn encode(
        &self,
        entries: &Entries,
        comment: Option<&str>,
        output: &mut dyn Write,
    ) -> Result<(), CodecError> {
        let mut writer = Writer::new(output);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;
        newline(&mut writer)?;
        writer.write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))?;
        newline(&mut writer)?;
        writer.write_event(Event::Start(BytesStart::new("properties")))?;
        newline(&mut writer)?;

        if let Some(comment) = comment {
            writer
                .create_element("comment")
                .write_text_content(BytesText::new(comment))?;
            newline(&mut writer)?;
        }

        for (key, value) in entries {
            writer
                .create_element("entry")
                .with_attribute((KEY_ATTRIBUTE, key.as_str()))
                .write_text_content(BytesText::new(value))?;
            newline(&mut writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("properties")))?;
        newline(&mut writer)?;
        Ok(())
    }
}

/// Extracts and unescapes the `key` attribute of an `<entry>` element.
fn entry_key(element: &BytesStart<'_>) -> Result<String, CodecError> {
    let attribute = element
        .try_get_attribute(KEY_ATTRIBUTE)
        .map_err(CodecError::malformed)?
        .ok_or_else(|| CodecError::Malformed("<entry> without a key attribute".to_string()))?;
    let key = attribute.unescape_value().map_err(CodecError::malformed)?;
    Ok(key.into_owned())
}

fn insert_unique(entries: &mut Entries, key: String, value: String) -> Result<(), CodecError> {
    match entries.entry(key) {
        Entry::Occupied(occupied) => Err(CodecError::DuplicateKey(occupied.key().clone())),
        Entry::Vacant(vacant) => {
            vacant.insert(value);
            Ok(())
        }
    }
}

fn unexpected(element: &BytesStart<'_>) -> CodecError {
    CodecError::UnexpectedElement(String::from_utf8_lossy(element.name().as_ref()).into_owned())
}

fn newline<W: Write>(writer: &mut Writer<W>) -> Result<(), CodecError> {
    writer.write_event(Event::Text(BytesText::new("\n")))?;
    Ok(())
}
