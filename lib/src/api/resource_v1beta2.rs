//! `resource.k8s.io/v1beta2` dynamic resource allocation: claims for
//! devices and the classes they are drawn from.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::k8sapitypes::ObjectMeta;
use crate::record::impl_record;

/// A CEL expression selecting a device.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CELDeviceSelector {
    /// Must evaluate to true for the device to be selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

/// Criteria for selecting a device.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSelector {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub cel: Option<CELDeviceSelector>,
}

/// A request for one or more identical devices.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExactDeviceRequest {
    /// Requests privileged administrative access to the devices
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_access: Option<bool>,
    /// `ExactCount` or `All`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_mode: Option<String>,
    /// Number of devices when the mode is `ExactCount`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    /// The `DeviceClass` the devices are drawn from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class_name: Option<String>,
    /// Additional selectors, all of which must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selectors: Option<Vec<DeviceSelector>>,
}

/// A named request within a claim.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub exactly: Option<ExactDeviceRequest>,
    /// Referenced from containers and from the allocation result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The device requests of a claim.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceClaim {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub requests: Option<Vec<DeviceRequest>>,
}

/// What is being requested.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceClaimSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub devices: Option<DeviceClaim>,
}

/// A request for access to resources in the cluster.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceClaim {
    /// Versioned schema of this representation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// REST resource this object represents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Standard object metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,
    /// Describes what is being requested and how to configure it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<ResourceClaimSpec>,
}

/// How devices of a class are selected.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceClassSpec {
    /// Each selector must be satisfied by a device claimed via this class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selectors: Option<Vec<DeviceSelector>>,
}

/// A vendor or admin-provided set of devices.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceClass {
    /// Versioned schema of this representation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// REST resource this object represents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Standard object metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,
    /// Defines what can be allocated and how to configure it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<DeviceClassSpec>,
}

impl_record!("resource.k8s.io/v1beta2" =>
    CELDeviceSelector,
    DeviceSelector,
    ExactDeviceRequest,
    DeviceRequest,
    DeviceClaim,
    ResourceClaimSpec,
    ResourceClaim,
    DeviceClassSpec,
    DeviceClass,
);

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use similar_asserts::assert_eq;

    use super::*;
    use crate::{decode, encode, Format};

    #[test]
    fn test_resource_claim() {
        let text = indoc! {r#"
            apiVersion: resource.k8s.io/v1beta2
            kind: ResourceClaim
            metadata:
              name: gpu
            spec:
              devices:
                requests:
                - name: gpu
                  exactly:
                    deviceClassName: gpu.example.com
                    allocationMode: ExactCount
                    count: 2
                    selectors:
                    - cel:
                        expression: device.attributes["gpu.example.com"].model == "a100"
        "#};
        let claim: ResourceClaim = decode(text, Format::Yaml).unwrap();
        let requests = claim
            .spec
            .as_ref()
            .and_then(|s| s.devices.as_ref())
            .and_then(|d| d.requests.as_deref())
            .unwrap();
        let exactly = requests[0].exactly.as_ref().unwrap();
        assert_eq!(exactly.count, Some(2));
        assert_eq!(exactly.admin_access, None);
        let expr = exactly.selectors.as_ref().unwrap()[0]
            .cel
            .as_ref()
            .and_then(|c| c.expression.as_deref());
        assert_eq!(
            expr,
            Some(r#"device.attributes["gpu.example.com"].model == "a100""#)
        );

        let json = encode(&claim, Format::Json).unwrap();
        assert_eq!(json.decode::<ResourceClaim>().unwrap(), claim);
    }
}
