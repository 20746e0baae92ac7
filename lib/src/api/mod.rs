//! Kubernetes API records, one module per group and version.
//!
//! Every field of every record is optional: a record decoded from a
//! document has exactly the fields the document carried.

pub mod authentication_v1;
pub mod autoscaling_v2;
pub mod coordination_v1;
pub mod core_v1;
pub mod rbac_v1;
pub mod resource_v1beta2;
pub mod storage_v1;
