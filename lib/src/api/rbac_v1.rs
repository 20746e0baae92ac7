//! `rbac.authorization.k8s.io/v1` cluster roles and bindings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::k8sapitypes::{LabelSelector, ObjectMeta};
use crate::record::impl_record;

/// Actions permitted on a set of resources or non-resource URLs.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRule {
    /// API groups containing the resources; `""` is the core group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_groups: Option<Vec<String>>,
    /// Partial URLs a user should have access to, e.g. `/healthz`
    #[serde(rename = "nonResourceURLs", skip_serializing_if = "Option::is_none")]
    pub non_resource_urls: Option<Vec<String>>,
    /// Optional allow list of resource names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_names: Option<Vec<String>>,
    /// Resources the rule applies to; `*` means all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
    /// Verbs the rule applies to; `*` means all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbs: Option<Vec<String>>,
}

/// A user, group or service account a binding refers to.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// API group of the referenced subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_group: Option<String>,
    /// `User`, `Group` or `ServiceAccount`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Name of the object being referenced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Namespace of the referenced object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// The role being bound.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleRef {
    /// API group of the referenced role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_group: Option<String>,
    /// Kind of the referenced role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Name of the referenced role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// How to build the rules of an aggregated cluster role.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregationRule {
    /// Selectors of the cluster roles whose rules are merged in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_role_selectors: Option<Vec<LabelSelector>>,
}

/// A cluster-scoped set of policy rules.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRole {
    /// If set, the rules are controller managed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation_rule: Option<AggregationRule>,
    /// Versioned schema of this representation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// REST resource this object represents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Standard object metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,
    /// The policy rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<PolicyRule>>,
}

/// Grants the permissions of a cluster role to a set of subjects.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRoleBinding {
    /// Versioned schema of this representation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// REST resource this object represents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Standard object metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,
    /// The cluster role being granted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_ref: Option<RoleRef>,
    /// Who the role applies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<Subject>>,
}

impl_record!("rbac.authorization.k8s.io/v1" =>
    PolicyRule,
    Subject,
    RoleRef,
    AggregationRule,
    ClusterRole,
    ClusterRoleBinding,
);
