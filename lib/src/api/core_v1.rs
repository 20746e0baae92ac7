//! Selected `core/v1` types: endpoints, services and config maps.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::k8sapitypes::{IntOrString, ObjectMeta};
use crate::record::impl_record;

/// A reference to an API object.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    /// API version of the referent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// A piece of the object rather than the entire object, e.g. `spec.containers{name}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_path: Option<String>,
    /// Kind of the referent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Name of the referent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Namespace of the referent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Specific resourceVersion to which this reference is made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    /// UID of the referent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// A port used by an endpoint.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndpointPort {
    /// The application protocol for this port, e.g. `kubernetes.io/h2c`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_protocol: Option<String>,
    /// The name of this port; must match the name of the `ServicePort`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The port number of the endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    /// The IP protocol; one of `TCP`, `UDP` or `SCTP`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// A single IP address of an endpoint.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndpointAddress {
    /// The hostname of this endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// The IP of this endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Node hosting this endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    /// Reference to the object providing the endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_ref: Option<ObjectReference>,
}

/// A group of addresses sharing a set of ports.  The expanded set of
/// endpoints is the cartesian product of addresses and ports.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSubset {
    /// IP addresses which offer the related ports and are ready
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<EndpointAddress>>,
    /// IP addresses which offer the related ports but are not ready
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_ready_addresses: Option<Vec<EndpointAddress>>,
    /// Port numbers available on the related addresses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<EndpointPort>>,
}

/// The set of endpoints implementing a service.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
    /// Versioned schema of this representation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// REST resource this object represents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Standard object metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,
    /// The set of all endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsets: Option<Vec<EndpointSubset>>,
}

/// Configuration data for pods to consume.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMap {
    /// Versioned schema of this representation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// UTF-8 configuration data; keys are used verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
    /// If true, only metadata can be modified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub immutable: Option<bool>,
    /// REST resource this object represents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Standard object metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,
}

/// A port exposed by a service.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServicePort {
    /// The application protocol for this port
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_protocol: Option<String>,
    /// The name of this port within the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The port on each node on which this service is exposed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_port: Option<i32>,
    /// The port exposed by this service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    /// The IP protocol for this port
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Number or name of the port to access on the pods
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_port: Option<IntOrString>,
}

/// The desired state of a service.
///
/// Several fields here spell their acronyms in capitals on the wire, so they
/// carry explicit names rather than the camel-cased default.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    /// The IP address of the service
    #[serde(rename = "clusterIP", skip_serializing_if = "Option::is_none")]
    pub cluster_ip: Option<String>,
    /// IP addresses assigned to this service, one per family
    #[serde(rename = "clusterIPs", skip_serializing_if = "Option::is_none")]
    pub cluster_ips: Option<Vec<String>>,
    /// Additional IPs for which nodes will accept traffic
    #[serde(rename = "externalIPs", skip_serializing_if = "Option::is_none")]
    pub external_ips: Option<Vec<String>>,
    /// External reference for `ExternalName` services
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_name: Option<String>,
    /// The list of ports exposed by this service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<ServicePort>>,
    /// Route traffic to pods with labels matching this selector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<BTreeMap<String, String>>,
    /// Session affinity; `ClientIP` or `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_affinity: Option<String>,
    /// How the service is exposed, e.g. `ClusterIP` or `LoadBalancer`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

/// A named abstraction of a software service.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Versioned schema of this representation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// REST resource this object represents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Standard object metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,
    /// The behavior of the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<ServiceSpec>,
}

impl_record!("v1" =>
    ObjectReference,
    EndpointPort,
    EndpointAddress,
    EndpointSubset,
    Endpoints,
    ConfigMap,
    ServicePort,
    ServiceSpec,
    Service,
);
