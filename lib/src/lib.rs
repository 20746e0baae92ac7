//! # Keyed optional-field serialization for Kubernetes API records
//!
//! This crate maps API records to and from JSON and YAML.  Each record
//! field has a wire name, derived from its Rust name or declared
//! explicitly, which is used identically in both formats.  Every field is
//! optional: absent fields are omitted from the output entirely, and
//! decoding never invents values for keys a document lacks.  Keys a record
//! does not know are skipped, so documents written against newer API
//! versions still decode.
//!
//! ```
//! use kubewire_lib::api::core_v1::EndpointPort;
//! use kubewire_lib::{decode, encode, Format};
//!
//! let port = EndpointPort {
//!     port: Some(8080),
//!     ..Default::default()
//! };
//! assert_eq!(encode(&port, Format::Json).unwrap().as_str(), r#"{"port":8080}"#);
//!
//! let back: EndpointPort = decode(r#"{"port": 8080, "unused": "x"}"#, Format::Json).unwrap();
//! assert_eq!(back, port);
//! ```

// See https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![forbid(unused_must_use)]
#![deny(unsafe_code)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::todo)]

pub mod api;
pub mod catalog;
pub mod cli;
mod codec;
pub(crate) mod config;
mod error;
mod fieldtable;
mod format;
pub mod k8sapitypes;
mod record;
mod tree;

pub use catalog::{Catalog, CatalogEntry, Transcoded};
pub use codec::{
    decode, decode_verbose, encode, encode_with, Decoded, EncodeOptions, WireDocument,
};
pub use error::{BoxedSource, Error, Result};
pub use fieldtable::FieldTable;
pub use format::Format;
pub use record::Record;
