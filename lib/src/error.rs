//! Errors from encoding, decoding and record registration.

use thiserror::Error;

use crate::Format;

/// The boxed underlying parser or serializer error.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An error when encoding or decoding a record.
#[derive(Debug, Error)]
pub enum Error {
    /// The text is not well-formed in its grammar.  Detected before any
    /// field is looked at.
    #[error("Malformed {format} document")]
    MalformedDocument {
        /// Format the text was parsed as
        format: Format,
        /// Parser error
        #[source]
        source: BoxedSource,
    },
    /// A known field holds a value that does not fit its declared type.
    #[error("Type mismatch decoding {record} from {format}")]
    TypeMismatch {
        /// Record being decoded
        record: &'static str,
        /// Format of the document
        format: Format,
        /// Error from mapping the value tree onto the record
        #[source]
        source: BoxedSource,
    },
    /// The serializer failed.
    #[error("Encoding {record} as {format}")]
    Encode {
        /// Record being encoded
        record: &'static str,
        /// Requested output format
        format: Format,
        /// Serializer error
        #[source]
        source: BoxedSource,
    },
    /// Two fields of a record map to the same wire name.
    #[error("Record {record} declares wire name {wire_name:?} more than once")]
    DuplicateWireName {
        /// Record declaring the fields
        record: &'static str,
        /// The shared wire name
        wire_name: &'static str,
    },
    /// The type does not deserialize as a struct with named fields.
    #[error("{record} does not deserialize as a struct")]
    NotARecord {
        /// Name the type was registered under
        record: &'static str,
    },
    /// A record with this name is already in the catalog.
    #[error("Record {name} is already registered")]
    DuplicateRecord {
        /// Record name
        name: &'static str,
    },
    /// No record in the catalog matches the lookup key.
    #[error("Unknown record {name:?}")]
    UnknownRecord {
        /// The key as given, `Name` or `group/version/Name`
        name: String,
    },
}

/// The type of Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn malformed(format: Format, source: impl Into<BoxedSource>) -> Self {
        Self::MalformedDocument {
            format,
            source: source.into(),
        }
    }

    pub(crate) fn mismatch(
        record: &'static str,
        format: Format,
        source: impl Into<BoxedSource>,
    ) -> Self {
        Self::TypeMismatch {
            record,
            format,
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = Error::DuplicateWireName {
            record: "ServiceSpec",
            wire_name: "type",
        };
        assert_eq!(
            e.to_string(),
            r#"Record ServiceSpec declares wire name "type" more than once"#
        );
        let e = Error::NotARecord { record: "String" };
        assert_eq!(e.to_string(), "String does not deserialize as a struct");
        let e = Error::DuplicateRecord { name: "Lease" };
        assert_eq!(e.to_string(), "Record Lease is already registered");
        let e = Error::UnknownRecord {
            name: "apps/v1/Pod".into(),
        };
        assert_eq!(e.to_string(), r#"Unknown record "apps/v1/Pod""#);
        let e = Error::malformed(Format::Yaml, "bad indent");
        assert_eq!(e.to_string(), "Malformed YAML document");
        assert_eq!(
            std::error::Error::source(&e).map(|s| s.to_string()),
            Some("bad indent".to_string())
        );
    }
}
