//! Strategies generating records with arbitrary subsets of fields present.

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use proptest::collection::{btree_map, vec};
use proptest::option;
use proptest::prelude::*;

use kubewire_lib::api::coordination_v1::LeaseSpec;
use kubewire_lib::api::core_v1::{EndpointPort, ServicePort, ServiceSpec};
use kubewire_lib::k8sapitypes::{IntOrString, MicroTime, ObjectMeta, Time};

fn word() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,11}"
}

fn labels() -> impl Strategy<Value = BTreeMap<String, String>> {
    btree_map("[a-z][a-z0-9._/-]{0,15}", "[a-zA-Z0-9 ]{0,10}", 0..4)
}

fn time() -> impl Strategy<Value = Time> {
    (0i64..4_000_000_000).prop_map(|s| Time::from(Utc.timestamp_opt(s, 0).unwrap()))
}

fn micro_time() -> impl Strategy<Value = MicroTime> {
    (0i64..4_000_000_000, 0u32..1_000_000).prop_map(|(s, us)| {
        MicroTime::from(Utc.timestamp_opt(s, us * 1000).unwrap())
    })
}

pub(crate) fn endpoint_port() -> impl Strategy<Value = EndpointPort> {
    (
        option::of(word()),
        option::of(word()),
        option::of(any::<i32>()),
        option::of(prop_oneof![Just("TCP"), Just("UDP"), Just("SCTP")]),
    )
        .prop_map(|(app_protocol, name, port, protocol)| EndpointPort {
            app_protocol,
            name,
            port,
            protocol: protocol.map(ToOwned::to_owned),
        })
}

pub(crate) fn object_meta() -> impl Strategy<Value = ObjectMeta> {
    (
        option::of(labels()),
        option::of(time()),
        option::of(vec(word(), 0..3)),
        option::of(any::<i64>()),
        option::of(labels()),
        option::of(word()),
        option::of(word()),
    )
        .prop_map(
            |(annotations, creation_timestamp, finalizers, generation, labels, name, namespace)| {
                ObjectMeta {
                    annotations,
                    creation_timestamp,
                    finalizers,
                    generation,
                    labels,
                    name,
                    namespace,
                    ..Default::default()
                }
            },
        )
}

fn int_or_string() -> impl Strategy<Value = IntOrString> {
    prop_oneof![
        any::<i32>().prop_map(IntOrString::Int),
        word().prop_map(IntOrString::String),
    ]
}

pub(crate) fn service_spec() -> impl Strategy<Value = ServiceSpec> {
    let port = (option::of(word()), option::of(1i32..65536), option::of(int_or_string()))
        .prop_map(|(name, port, target_port)| ServicePort {
            name,
            port,
            target_port,
            ..Default::default()
        });
    (
        option::of("10\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}"),
        option::of(vec(port, 0..3)),
        option::of(labels()),
        option::of(prop_oneof![Just("ClusterIP"), Just("NodePort")]),
    )
        .prop_map(|(cluster_ip, ports, selector, type_)| ServiceSpec {
            cluster_ip,
            ports,
            selector,
            type_: type_.map(ToOwned::to_owned),
            ..Default::default()
        })
}

pub(crate) fn lease_spec() -> impl Strategy<Value = LeaseSpec> {
    (
        option::of(micro_time()),
        option::of(word()),
        option::of(0i32..3600),
        option::of(micro_time()),
    )
        .prop_map(
            |(acquire_time, holder_identity, lease_duration_seconds, renew_time)| LeaseSpec {
                acquire_time,
                holder_identity,
                lease_duration_seconds,
                renew_time,
                ..Default::default()
            },
        )
}
