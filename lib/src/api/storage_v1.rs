//! `storage.k8s.io/v1` storage classes.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::k8sapitypes::ObjectMeta;
use crate::record::impl_record;

/// Describes a class of storage that can be dynamically provisioned.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageClass {
    /// Whether volumes of this class may be expanded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_volume_expansion: Option<bool>,
    /// Versioned schema of this representation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// REST resource this object represents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Standard object metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,
    /// Mount options for dynamically provisioned volumes, e.g. `["ro", "soft"]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_options: Option<Vec<String>>,
    /// Provisioner-specific parameters; keys are passed through unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, String>>,
    /// The volume plugin used for provisioning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioner: Option<String>,
    /// `Delete` or `Retain`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reclaim_policy: Option<String>,
    /// `Immediate` or `WaitForFirstConsumer`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_binding_mode: Option<String>,
}

impl_record!("storage.k8s.io/v1" => StorageClass);
