//! Integration tests for kubewire-lib.

mod fixture;

use std::collections::BTreeSet;

use anyhow::Result;
use indoc::indoc;
use proptest::prelude::*;
use similar_asserts::assert_eq;

use kubewire_lib::api::coordination_v1::LeaseSpec;
use kubewire_lib::api::core_v1::{EndpointPort, Service, ServiceSpec};
use kubewire_lib::k8sapitypes::ObjectMeta;
use kubewire_lib::{
    decode, decode_verbose, encode, Catalog, EncodeOptions, Error, FieldTable, Format, Record,
};

const FORMATS: [Format; 2] = [Format::Json, Format::Yaml];

/// The set of top level keys in an encoded JSON document.
fn json_keys<T: Record>(r: &T) -> BTreeSet<String> {
    let doc = encode(r, Format::Json).unwrap();
    let v: serde_json::Value = serde_json::from_str(doc.as_str()).unwrap();
    v.as_object().unwrap().keys().cloned().collect()
}

fn roundtrip<T: Record>(r: &T) {
    for format in FORMATS {
        let doc = encode(r, format).unwrap();
        let back: T = decode(doc.as_str(), format).unwrap();
        assert_eq!(&back, r, "{format}: {doc}");
    }
}

#[test]
fn test_endpoint_port_scenario() -> Result<()> {
    let r = EndpointPort {
        port: Some(8080),
        ..Default::default()
    };
    assert_eq!(encode(&r, Format::Json)?.as_str(), r#"{"port":8080}"#);
    assert_eq!(json_keys(&r), BTreeSet::from(["port".to_string()]));

    let d = decode_verbose::<EndpointPort>(r#"{"port": 8080, "unused": "x"}"#, Format::Json)?;
    assert_eq!(d.record, r);
    assert_eq!(d.record.app_protocol, None);
    assert_eq!(d.record.name, None);
    assert_eq!(d.record.protocol, None);
    Ok(())
}

#[test]
fn test_nested_unknown_keys() -> Result<()> {
    let text = indoc! {"
        apiVersion: v1
        kind: Service
        metadata:
          name: web
          managedFields: []
        spec:
          clusterIP: 10.96.0.10
          ports:
          - port: 53
            targetPort: dns
            futureField: 1
          internalTrafficPolicy: Cluster
        status:
          loadBalancer: {}
    "};
    let d = decode_verbose::<Service>(text, Format::Yaml)?;
    let spec = d.record.spec.as_ref().unwrap();
    assert_eq!(spec.cluster_ip.as_deref(), Some("10.96.0.10"));
    assert_eq!(d.unknown_keys.len(), 4, "{:?}", d.unknown_keys);
    for key in ["managedFields", "futureField", "internalTrafficPolicy", "status"] {
        assert!(
            d.unknown_keys.iter().any(|k| k.ends_with(key)),
            "{key} not in {:?}",
            d.unknown_keys
        );
    }
    // Dropped on re-encode
    let out = encode(&d.record, Format::Yaml)?;
    assert!(!out.as_str().contains("futureField"));
    assert!(!out.as_str().contains("status"));
    Ok(())
}

#[test]
fn test_nested_type_mismatch_is_fatal() {
    let text = r#"{"metadata": {"name": "web"}, "spec": {"ports": [{"port": 80}, {"port": "eighty"}]}}"#;
    let e = decode::<Service>(text, Format::Json).unwrap_err();
    assert!(matches!(
        e,
        Error::TypeMismatch {
            record: "Service",
            format: Format::Json,
            ..
        }
    ));
}

#[test]
fn test_builtin_catalog() -> Result<()> {
    let catalog = Catalog::builtin()?;
    for entry in catalog.entries() {
        let fields = entry.fields();
        assert!(!fields.is_empty(), "{}", entry.name());
        for name in fields.wire_names() {
            assert!(!name.contains('_'), "{}: {name}", entry.name());
        }
        // An all-absent record encodes to an empty mapping in both formats
        for (format, empty) in [(Format::Json, "{}"), (Format::Yaml, "{}\n")] {
            let t = entry.transcode("{}", Format::Json, format, &EncodeOptions::default())?;
            assert_eq!(t.document.as_str(), empty, "{}", entry.name());
        }
    }
    Ok(())
}

#[test]
fn test_record_field_table() -> Result<()> {
    let table = ServiceSpec::field_table()?;
    assert_eq!(table.record(), ServiceSpec::NAME);
    assert_eq!(
        table.wire_names(),
        FieldTable::of::<ServiceSpec>()?.wire_names()
    );
    assert_eq!(table.position("clusterIP"), Some(0));
    assert_eq!(ServiceSpec::GROUP_VERSION, "v1");
    assert_eq!(LeaseSpec::GROUP_VERSION, "coordination.k8s.io/v1");
    Ok(())
}

proptest! {
    #[test]
    fn prop_endpoint_port_roundtrip(r in fixture::endpoint_port()) {
        roundtrip(&r);
        let mut expected = BTreeSet::new();
        if r.app_protocol.is_some() {
            expected.insert("appProtocol".to_string());
        }
        if r.name.is_some() {
            expected.insert("name".to_string());
        }
        if r.port.is_some() {
            expected.insert("port".to_string());
        }
        if r.protocol.is_some() {
            expected.insert("protocol".to_string());
        }
        prop_assert_eq!(json_keys(&r), expected);
    }

    #[test]
    fn prop_object_meta_roundtrip(r in fixture::object_meta()) {
        roundtrip(&r);
        prop_assert!(!json_keys(&r).iter().any(|k| k.contains('_')));
    }

    #[test]
    fn prop_service_spec_roundtrip(r in fixture::service_spec()) {
        roundtrip(&r);
        let keys = json_keys(&r);
        prop_assert_eq!(keys.contains("clusterIP"), r.cluster_ip.is_some());
        prop_assert_eq!(keys.contains("type"), r.type_.is_some());
    }

    #[test]
    fn prop_lease_spec_roundtrip(r in fixture::lease_spec()) {
        roundtrip(&r);
    }

    #[test]
    fn prop_format_parity(r in fixture::object_meta()) {
        let from_json: ObjectMeta = encode(&r, Format::Json).unwrap().decode().unwrap();
        let from_yaml: ObjectMeta = encode(&r, Format::Yaml).unwrap().decode().unwrap();
        prop_assert_eq!(from_json, from_yaml);
    }
}
