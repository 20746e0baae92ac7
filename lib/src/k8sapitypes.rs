//! Shared `meta/v1` and `util/intstr` types used across API groups.
//! Only the subset the catalog records reference is defined here.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::record::impl_record;

/// Defines an RFC 3339 timestamp newtype at a fixed sub-second precision.
/// The precision is applied on construction so that the encoded form
/// always decodes back to an equal value.
macro_rules! timestamp {
    ($(#[$meta:meta])* $name:ident, $digits:literal, $secform:expr) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema)]
        pub struct $name(DateTime<Utc>);

        impl $name {
            /// The underlying UTC timestamp.
            pub fn as_datetime(&self) -> &DateTime<Utc> {
                &self.0
            }
        }

        impl From<DateTime<Utc>> for $name {
            fn from(t: DateTime<Utc>) -> Self {
                Self(t.trunc_subsecs($digits))
            }
        }

        impl FromStr for $name {
            type Err = chrono::ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let t = DateTime::parse_from_rfc3339(s)?;
                Ok(t.with_timezone(&Utc).into())
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0.to_rfc3339_opts($secform, true))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    };
}

timestamp!(
    /// A timestamp with second precision, e.g. `2024-01-02T03:04:05Z`.
    Time,
    0,
    SecondsFormat::Secs
);

timestamp!(
    /// A timestamp with microsecond precision, e.g. `2024-01-02T03:04:05.000006Z`.
    MicroTime,
    6,
    SecondsFormat::Micros
);

/// A value that is either an integer or a string, such as a port number or
/// a named port.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum IntOrString {
    /// An integer value
    Int(i32),
    /// A string value
    String(String),
}

impl From<i32> for IntOrString {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for IntOrString {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

/// A fixed-point quantity such as `500m` or `1Gi`, kept in its textual form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, JsonSchema)]
#[serde(transparent)]
pub struct Quantity(pub String);

impl From<&str> for Quantity {
    fn from(v: &str) -> Self {
        Self(v.to_owned())
    }
}

/// Metadata common to all persisted resources.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Unstructured key value map stored with a resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    /// Server time when this object was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<Time>,
    /// Seconds allowed for graceful termination before removal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_grace_period_seconds: Option<i64>,
    /// Time after which this resource will be deleted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_timestamp: Option<Time>,
    /// Entries which must be empty before the object is removed from the registry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalizers: Option<Vec<String>>,
    /// Prefix used by the server to generate a unique name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_name: Option<String>,
    /// Sequence number of the desired state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<i64>,
    /// Key value map used to organize and categorize objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    /// Name, unique within a namespace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Namespace scoping the name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Objects depended on by this object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_references: Option<Vec<OwnerReference>>,
    /// Opaque version used for optimistic concurrency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    /// Unique identifier across time and space
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// Identifies an owning object.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerReference {
    /// API version of the referent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// If true, the owner cannot be deleted before this object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_owner_deletion: Option<bool>,
    /// If true, this reference points to the managing controller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<bool>,
    /// Kind of the referent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Name of the referent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// UID of the referent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// A label query over a set of resources.  The requirements are ANDed; an
/// empty selector matches all objects.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    /// A list of label selector requirements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_expressions: Option<Vec<LabelSelectorRequirement>>,
    /// Equality requirements, one per key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<BTreeMap<String, String>>,
}

/// A selector that relates a key to a set of values.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelectorRequirement {
    /// The label key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// One of `In`, `NotIn`, `Exists` and `DoesNotExist`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// Values for `In` and `NotIn`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

impl_record!("meta.k8s.io/v1" => ObjectMeta, OwnerReference, LabelSelector, LabelSelectorRequirement);
