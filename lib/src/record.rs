//! The contract shared by every API record.

use std::fmt::Debug;

use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::fieldtable::FieldTable;

/// A structured value with named, independently optional fields.
///
/// The key mapping lives in the serde attributes on the implementing type:
/// `rename_all = "camelCase"` gives the default wire name and
/// `rename = "..."` overrides it for a single field.  Every field is an
/// `Option` skipped on serialization when `None`, so absence is never
/// written as `null`.
pub trait Record:
    Serialize + DeserializeOwned + JsonSchema + Clone + Debug + PartialEq + Send + Sync + 'static
{
    /// API group and version, e.g. `rbac.authorization.k8s.io/v1`; core types use `v1`.
    const GROUP_VERSION: &'static str;
    /// The record name, e.g. `EndpointPort`.
    const NAME: &'static str;

    /// Build the wire name table for this record.
    fn field_table() -> Result<FieldTable> {
        FieldTable::of::<Self>()
    }

    /// Generate the JSON schema describing the wire form.
    fn root_schema() -> RootSchema {
        schemars::gen::SchemaGenerator::default().into_root_schema_for::<Self>()
    }
}

/// Implement [`Record`] for a list of types sharing a group/version.
macro_rules! impl_record {
    ($group_version:literal => $($ty:ident),+ $(,)?) => {
        $(
            impl $crate::record::Record for $ty {
                const GROUP_VERSION: &'static str = $group_version;
                const NAME: &'static str = stringify!($ty);
            }
        )+
    };
}
pub(crate) use impl_record;
