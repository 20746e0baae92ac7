//! `autoscaling/v2` horizontal pod autoscalers.  Only resource metrics
//! are modelled; the status subresource is not.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::k8sapitypes::{ObjectMeta, Quantity};
use crate::record::impl_record;

/// Identifies the scaled resource.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrossVersionObjectReference {
    /// API version of the referent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Kind of the referent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Name of the referent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Target value, average value, or average utilization of a metric.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricTarget {
    /// Percentage of the requested value across all pods
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_utilization: Option<i32>,
    /// Target value averaged across all pods
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_value: Option<Quantity>,
    /// `Utilization`, `Value` or `AverageValue`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    /// Target value of the metric
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Quantity>,
}

/// A resource metric known to Kubernetes, such as `cpu` or `memory`.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetricSource {
    /// Name of the resource in question
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Target value for the metric
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<MetricTarget>,
}

/// One metric to scale on.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricSpec {
    /// Set when `type` is `Resource`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceMetricSource>,
    /// The metric source type
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

/// A single scaling policy.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HPAScalingPolicy {
    /// Window over which the policy holds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_seconds: Option<i32>,
    /// `Pods` or `Percent`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    /// Amount of change permitted by the policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,
}

/// Scaling behavior in one direction.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HPAScalingRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub policies: Option<Vec<HPAScalingPolicy>>,
    /// `Max`, `Min` or `Disabled`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub stabilization_window_seconds: Option<i32>,
}

/// Scale up and scale down behavior.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalPodAutoscalerBehavior {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub scale_down: Option<HPAScalingRules>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub scale_up: Option<HPAScalingRules>,
}

/// Desired functionality of the autoscaler.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalPodAutoscalerSpec {
    /// Scaling behavior; defaults apply when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior: Option<HorizontalPodAutoscalerBehavior>,
    /// Upper limit for the number of replicas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_replicas: Option<i32>,
    /// Metrics used to compute the desired replica count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<MetricSpec>>,
    /// Lower limit for the number of replicas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_replicas: Option<i32>,
    /// The resource whose replica count is managed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_target_ref: Option<CrossVersionObjectReference>,
}

/// Automatically manages the replica count of a scalable resource.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalPodAutoscaler {
    /// Versioned schema of this representation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// REST resource this object represents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Standard object metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,
    /// Behavior of the autoscaler
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<HorizontalPodAutoscalerSpec>,
}

impl_record!("autoscaling/v2" =>
    CrossVersionObjectReference,
    MetricTarget,
    ResourceMetricSource,
    MetricSpec,
    HPAScalingPolicy,
    HPAScalingRules,
    HorizontalPodAutoscalerBehavior,
    HorizontalPodAutoscalerSpec,
    HorizontalPodAutoscaler,
);
