//! # Per-record wire name tables
//!
//! The mapping from in-memory field to wire name is generated at compile
//! time by `serde_derive` from the `rename_all` and `rename` attributes.
//! This module recovers the wire names the derive produced, in declaration
//! order, by driving the derived `Deserialize` impl against a deserializer
//! that records the field list it is handed and then bails out.

use std::collections::HashMap;

use serde::de::{self, DeserializeOwned, Deserializer, Visitor};

use crate::error::{Error, Result};
use crate::record::Record;

/// The wire names of a record's fields, with constant-time lookup by name.
#[derive(Debug, Clone)]
pub struct FieldTable {
    record: &'static str,
    wire_names: &'static [&'static str],
    index: HashMap<&'static str, usize>,
}

impl FieldTable {
    /// Build the table for a record type.  Fails if two fields share a wire
    /// name.
    pub fn of<T: Record>() -> Result<Self> {
        introspect::<T>(T::NAME)
    }

    pub(crate) fn new(record: &'static str, wire_names: &'static [&'static str]) -> Result<Self> {
        let mut index = HashMap::with_capacity(wire_names.len());
        for (i, &wire_name) in wire_names.iter().enumerate() {
            if index.insert(wire_name, i).is_some() {
                return Err(Error::DuplicateWireName { record, wire_name });
            }
        }
        Ok(Self {
            record,
            wire_names,
            index,
        })
    }

    /// Name of the record this table describes.
    pub fn record(&self) -> &'static str {
        self.record
    }

    /// Wire names in declaration order.
    pub fn wire_names(&self) -> &'static [&'static str] {
        self.wire_names
    }

    /// Declaration index of the field with this wire name.
    pub fn position(&self, wire_name: &str) -> Option<usize> {
        self.index.get(wire_name).copied()
    }

    /// Whether a wire key names a known field.
    pub fn contains(&self, wire_name: &str) -> bool {
        self.index.contains_key(wire_name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.wire_names.len()
    }

    /// True for a record with no fields.
    pub fn is_empty(&self) -> bool {
        self.wire_names.is_empty()
    }
}

pub(crate) fn introspect<T: DeserializeOwned>(record: &'static str) -> Result<FieldTable> {
    let mut captured = None;
    // Always an error: either ours after capturing, or because T is not a struct.
    let _ = T::deserialize(Introspector {
        captured: &mut captured,
    });
    let wire_names = captured.ok_or(Error::NotARecord { record })?;
    FieldTable::new(record, wire_names)
}

struct Introspector<'a> {
    captured: &'a mut Option<&'static [&'static str]>,
}

impl<'de> Deserializer<'de> for Introspector<'_> {
    type Error = de::value::Error;

    fn deserialize_any<V>(self, _visitor: V) -> std::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        Err(de::Error::custom("not a struct"))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        _visitor: V,
    ) -> std::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        *self.captured = Some(fields);
        Err(de::Error::custom("field table captured"))
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::core_v1::{EndpointPort, ServiceSpec};

    #[test]
    fn test_endpoint_port_table() {
        let table = FieldTable::of::<EndpointPort>().unwrap();
        assert_eq!(table.record(), "EndpointPort");
        assert_eq!(
            table.wire_names(),
            &["appProtocol", "name", "port", "protocol"]
        );
        assert_eq!(table.position("port"), Some(2));
        assert!(table.contains("appProtocol"));
        assert!(!table.contains("app_protocol"));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_explicit_renames() {
        let table = FieldTable::of::<ServiceSpec>().unwrap();
        for name in ["clusterIP", "clusterIPs", "externalIPs", "type"] {
            assert!(table.contains(name), "missing {name}");
        }
        for name in ["clusterIp", "cluster_ip", "type_"] {
            assert!(!table.contains(name), "unexpected {name}");
        }
    }

    #[test]
    fn test_duplicate_wire_name() {
        let err = FieldTable::new("Dup", &["name", "port", "name"]).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateWireName {
                record: "Dup",
                wire_name: "name"
            }
        ));
    }

    #[test]
    fn test_not_a_record() {
        assert!(matches!(
            introspect::<String>("String"),
            Err(Error::NotARecord { record: "String" })
        ));
        assert!(matches!(
            introspect::<Vec<u32>>("Vec"),
            Err(Error::NotARecord { .. })
        ));
    }
}
