//! # Runtime registry of record types
//!
//! The codec is generic over [`Record`]; the catalog erases the type so
//! that a record can be picked by name at runtime (e.g. from the command
//! line).  It is built once, validating every field table, and is
//! read-only afterwards, so it can be shared freely across threads.

use std::collections::BTreeMap;

use schemars::schema::RootSchema;

use crate::codec::{decode_verbose, encode_with, Decoded, EncodeOptions, WireDocument};
use crate::error::{Error, Result};
use crate::fieldtable::FieldTable;
use crate::record::Record;
use crate::Format;

type TranscodeFn = fn(&str, Format, Format, &EncodeOptions) -> Result<Transcoded>;
type CheckFn = fn(&str, Format) -> Result<Vec<String>>;
type SchemaFn = fn() -> RootSchema;

/// The output of decoding a document and encoding it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcoded {
    /// The re-encoded document
    pub document: WireDocument,
    /// Keys of the input which matched no field, and so were dropped
    pub unknown_keys: Vec<String>,
}

/// A registered record type.
pub struct CatalogEntry {
    group_version: &'static str,
    name: &'static str,
    fields: FieldTable,
    transcode: TranscodeFn,
    check: CheckFn,
    schema: SchemaFn,
}

impl std::fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("group_version", &self.group_version)
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl CatalogEntry {
    /// API group and version.
    pub fn group_version(&self) -> &'static str {
        self.group_version
    }

    /// Record name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Wire names of the record's fields.
    pub fn fields(&self) -> &FieldTable {
        &self.fields
    }

    /// Decode `text` as this record and encode it in `to`.
    pub fn transcode(
        &self,
        text: &str,
        from: Format,
        to: Format,
        options: &EncodeOptions,
    ) -> Result<Transcoded> {
        (self.transcode)(text, from, to, options)
    }

    /// Decode `text` as this record, returning the unknown keys.
    pub fn check(&self, text: &str, format: Format) -> Result<Vec<String>> {
        (self.check)(text, format)
    }

    /// The JSON schema of the wire form.
    pub fn json_schema(&self) -> RootSchema {
        (self.schema)()
    }
}

fn transcode<T: Record>(
    text: &str,
    from: Format,
    to: Format,
    options: &EncodeOptions,
) -> Result<Transcoded> {
    let Decoded {
        record,
        unknown_keys,
    } = decode_verbose::<T>(text, from)?;
    let document = encode_with(&record, to, options)?;
    Ok(Transcoded {
        document,
        unknown_keys,
    })
}

fn check<T: Record>(text: &str, format: Format) -> Result<Vec<String>> {
    decode_verbose::<T>(text, format).map(|d| d.unknown_keys)
}

/// Record types addressable by name.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: BTreeMap<&'static str, CatalogEntry>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog of every record this crate defines.
    pub fn builtin() -> Result<Self> {
        use crate::api::{
            authentication_v1::*, autoscaling_v2::*, coordination_v1::*, core_v1::*, rbac_v1::*,
            resource_v1beta2::*, storage_v1::*,
        };
        use crate::k8sapitypes::*;

        macro_rules! register_all {
            ($catalog:ident: $($ty:ty),+ $(,)?) => {
                $( $catalog.register::<$ty>()?; )+
            };
        }

        let mut c = Self::new();
        register_all!(c:
            ObjectMeta, OwnerReference, LabelSelector, LabelSelectorRequirement,
            ObjectReference, EndpointPort, EndpointAddress, EndpointSubset, Endpoints,
            ConfigMap, ServicePort, ServiceSpec, Service,
            PolicyRule, Subject, RoleRef, AggregationRule, ClusterRole, ClusterRoleBinding,
            CrossVersionObjectReference, MetricTarget, ResourceMetricSource, MetricSpec,
            HPAScalingPolicy, HPAScalingRules, HorizontalPodAutoscalerBehavior,
            HorizontalPodAutoscalerSpec, HorizontalPodAutoscaler,
            UserInfo, TokenReviewSpec, TokenReviewStatus, TokenReview,
            StorageClass,
            LeaseSpec, Lease,
            CELDeviceSelector, DeviceSelector, ExactDeviceRequest, DeviceRequest, DeviceClaim,
            ResourceClaimSpec, ResourceClaim, DeviceClassSpec, DeviceClass,
        );
        tracing::debug!("Built catalog with {} records", c.len());
        Ok(c)
    }

    /// Add a record type.  Fails if its field table is invalid or the name
    /// is taken.
    pub fn register<T: Record>(&mut self) -> Result<()> {
        let fields = T::field_table()?;
        if self.entries.contains_key(T::NAME) {
            return Err(Error::DuplicateRecord { name: T::NAME });
        }
        let entry = CatalogEntry {
            group_version: T::GROUP_VERSION,
            name: T::NAME,
            fields,
            transcode: transcode::<T>,
            check: check::<T>,
            schema: T::root_schema,
        };
        self.entries.insert(T::NAME, entry);
        Ok(())
    }

    /// Look up a record by `Name` or `group/version/Name`.
    pub fn get(&self, key: &str) -> Result<&CatalogEntry> {
        let (group_version, name) = match key.rsplit_once('/') {
            Some((gv, name)) => (Some(gv), name),
            None => (None, key),
        };
        self.entries
            .get(name)
            .filter(|e| match group_version {
                Some(gv) => gv == e.group_version,
                None => true,
            })
            .ok_or_else(|| Error::UnknownRecord {
                name: key.to_owned(),
            })
    }

    /// Entries sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Number of registered records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
