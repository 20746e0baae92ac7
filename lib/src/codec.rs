//! # Encoding and decoding records
//!
//! Decoding is two-phase: the text is first parsed into the format's
//! generic value tree, so grammar errors surface as
//! [`Error::MalformedDocument`] before any field is examined.  The tree is
//! then mapped onto the record type, where a wrongly typed value is an
//! [`Error::TypeMismatch`].  Keys the record does not know are skipped and
//! collected.
//!
//! A key repeated within one mapping is malformed in both formats.  YAML
//! keys which are not strings never name a field, so within a record they
//! are skipped like any other unknown key.

use std::fmt::Display;

use crate::error::{BoxedSource, Error, Result};
use crate::record::Record;
use crate::tree::{strip_non_string_keys, StrictJson};
use crate::Format;

/// The serialized text of a record, tagged with its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireDocument {
    format: Format,
    text: String,
}

impl WireDocument {
    /// Wrap text received from elsewhere.
    pub fn new(format: Format, text: impl Into<String>) -> Self {
        Self {
            format,
            text: text.into(),
        }
    }

    /// The format of the text.
    pub fn format(&self) -> Format {
        self.format
    }

    /// The document text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Take the document text.
    pub fn into_string(self) -> String {
        self.text
    }

    /// Decode this document as a record.
    pub fn decode<T: Record>(&self) -> Result<T> {
        decode(&self.text, self.format)
    }
}

impl AsRef<str> for WireDocument {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl Display for WireDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Options controlling the textual layout of encoded output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Indent JSON output.  YAML is always block style.
    pub pretty: bool,
}

/// A decoded record along with the keys that were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    /// The record
    pub record: T,
    /// Dotted paths of keys which matched no field
    pub unknown_keys: Vec<String>,
}

/// Encode a record; JSON output is compact.
pub fn encode<T: Record>(record: &T, format: Format) -> Result<WireDocument> {
    encode_with(record, format, &EncodeOptions::default())
}

/// Encode a record with explicit layout options.
pub fn encode_with<T: Record>(
    record: &T,
    format: Format,
    options: &EncodeOptions,
) -> Result<WireDocument> {
    let text = match format {
        Format::Json if options.pretty => serde_json::to_string_pretty(record)
            .map_err(|e| encode_error::<T>(format, e))?,
        Format::Json => serde_json::to_string(record).map_err(|e| encode_error::<T>(format, e))?,
        Format::Yaml => serde_yaml::to_string(record).map_err(|e| encode_error::<T>(format, e))?,
    };
    tracing::trace!("Encoded {} as {format}: {} bytes", T::NAME, text.len());
    Ok(WireDocument { format, text })
}

fn encode_error<T: Record>(format: Format, e: impl Into<BoxedSource>) -> Error {
    Error::Encode {
        record: T::NAME,
        format,
        source: e.into(),
    }
}

/// Decode a record, discarding unknown keys.
pub fn decode<T: Record>(text: &str, format: Format) -> Result<T> {
    decode_verbose(text, format).map(|d| d.record)
}

/// Decode a record, reporting the unknown keys that were skipped.
pub fn decode_verbose<T: Record>(text: &str, format: Format) -> Result<Decoded<T>> {
    let mut unknown_keys = Vec::new();
    let record = match format {
        Format::Json => {
            let StrictJson(tree) =
                serde_json::from_str(text).map_err(|e| Error::malformed(format, e))?;
            serde_ignored::deserialize(tree, |path| unknown_keys.push(dotted(&path)))
                .map_err(|e| Error::mismatch(T::NAME, format, e))?
        }
        Format::Yaml => {
            let mut tree: serde_yaml::Value =
                serde_yaml::from_str(text).map_err(|e| Error::malformed(format, e))?;
            unknown_keys = strip_non_string_keys(&mut tree, T::root_schema);
            serde_ignored::deserialize(tree, |path| unknown_keys.push(dotted(&path)))
                .map_err(|e| Error::mismatch(T::NAME, format, e))?
        }
    };
    for key in unknown_keys.iter() {
        tracing::debug!("{}: ignoring unknown key {key}", T::NAME);
    }
    Ok(Decoded {
        record,
        unknown_keys,
    })
}

/// Render a path without the `?` segments `serde_ignored` inserts for
/// optional and newtype wrappers, e.g. `spec.ports.0.name`.
fn dotted(path: &serde_ignored::Path) -> String {
    path.to_string()
        .split('.')
        .filter(|segment| *segment != "?")
        .collect::<Vec<_>>()
        .join(".")
}
