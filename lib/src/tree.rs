//! # Value tree preparation
//!
//! Both formats are parsed into a generic tree before field mapping.  This
//! module evens out the two grammars: JSON objects reject a repeated key,
//! as YAML mappings already do, and YAML mapping keys which are not strings
//! (`2:`, `true:`) are removed from records, since they can never name a
//! field.  Maps of user data keep such keys, so decoding them into a
//! string-keyed map is still a type mismatch.

use std::fmt;

use schemars::schema::{RootSchema, Schema, SchemaObject, SingleOrVec};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// A JSON value tree which rejects a key repeated within one object.
#[derive(Debug)]
pub(crate) struct StrictJson(pub(crate) JsonValue);

impl<'de> Deserialize<'de> for StrictJson {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StrictJsonVisitor).map(StrictJson)
    }
}

struct StrictJsonVisitor;

impl<'de> Visitor<'de> for StrictJsonVisitor {
    type Value = JsonValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<JsonValue, E> {
        Ok(JsonValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<JsonValue, E> {
        Ok(v.into())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<JsonValue, E> {
        Ok(v.into())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<JsonValue, E> {
        Ok(serde_json::Number::from_f64(v).map_or(JsonValue::Null, JsonValue::Number))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<JsonValue, E> {
        Ok(JsonValue::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<JsonValue, E> {
        Ok(JsonValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<JsonValue, D::Error> {
        StrictJson::deserialize(deserializer).map(|v| v.0)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<JsonValue, A::Error> {
        let mut elements = Vec::new();
        while let Some(StrictJson(v)) = seq.next_element()? {
            elements.push(v);
        }
        Ok(JsonValue::Array(elements))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<JsonValue, A::Error> {
        let mut object = serde_json::Map::new();
        while let Some(key) = map.next_key::<String>()? {
            if object.contains_key(&key) {
                return Err(de::Error::custom(format_args!("duplicate key `{key}`")));
            }
            let StrictJson(v) = map.next_value()?;
            object.insert(key, v);
        }
        Ok(JsonValue::Object(object))
    }
}

fn has_non_string_key(value: &YamlValue) -> bool {
    match value {
        YamlValue::Mapping(m) => m
            .iter()
            .any(|(k, v)| !k.is_string() || has_non_string_key(v)),
        YamlValue::Sequence(s) => s.iter().any(has_non_string_key),
        YamlValue::Tagged(t) => has_non_string_key(&t.value),
        _ => false,
    }
}

fn key_label(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_owned(),
        other => format!("{other:?}"),
    }
}

/// Walks a YAML tree alongside the JSON schema of the record it will be
/// decoded as.
struct KeyStripper<'a> {
    root: &'a RootSchema,
    path: Vec<String>,
    removed: Vec<String>,
}

impl<'a> KeyStripper<'a> {
    /// The concrete schemas a value may match, following references and
    /// `allOf`/`anyOf`/`oneOf` combinators.
    fn candidates(&self, schema: &'a Schema, out: &mut Vec<&'a SchemaObject>) {
        let Schema::Object(obj) = schema else {
            return;
        };
        if let Some(target) = obj
            .reference
            .as_deref()
            .and_then(|r| r.strip_prefix("#/definitions/"))
            .and_then(|name| self.root.definitions.get(name))
        {
            self.candidates(target, out);
        }
        if let Some(sub) = obj.subschemas.as_deref() {
            for list in [&sub.all_of, &sub.any_of, &sub.one_of].into_iter().flatten() {
                for s in list {
                    self.candidates(s, out);
                }
            }
        }
        out.push(obj);
    }

    fn removed_path(&self, key: &YamlValue) -> String {
        let mut segments = self.path.clone();
        segments.push(key_label(key));
        segments.join(".")
    }

    fn visit(&mut self, value: &mut YamlValue, candidates: &[&'a SchemaObject]) {
        match value {
            YamlValue::Mapping(mapping) => {
                let fields = candidates
                    .iter()
                    .copied()
                    .filter_map(|c| c.object.as_deref())
                    .find(|o| !o.properties.is_empty());
                if let Some(fields) = fields {
                    let keys = mapping.keys().cloned().collect::<Vec<_>>();
                    for key in keys {
                        if !key.is_string() {
                            let path = self.removed_path(&key);
                            self.removed.push(path);
                            mapping.remove(&key);
                        }
                    }
                    for (key, v) in mapping.iter_mut() {
                        let Some(name) = key.as_str() else { continue };
                        if let Some(field) = fields.properties.get(name) {
                            self.descend(name.to_owned(), v, field);
                        }
                    }
                } else if let Some(values) = candidates
                    .iter()
                    .copied()
                    .filter_map(|c| c.object.as_deref())
                    .find_map(|o| o.additional_properties.as_deref())
                {
                    for (key, v) in mapping.iter_mut() {
                        self.descend(key_label(key), v, values);
                    }
                }
            }
            YamlValue::Sequence(seq) => {
                let items = candidates
                    .iter()
                    .copied()
                    .filter_map(|c| c.array.as_deref())
                    .find_map(|a| match a.items.as_ref() {
                        Some(SingleOrVec::Single(s)) => Some(&**s),
                        _ => None,
                    });
                if let Some(items) = items {
                    for (i, v) in seq.iter_mut().enumerate() {
                        self.descend(i.to_string(), v, items);
                    }
                }
            }
            _ => {}
        }
    }

    fn descend(&mut self, segment: String, value: &mut YamlValue, schema: &'a Schema) {
        let mut candidates = Vec::new();
        self.candidates(schema, &mut candidates);
        self.path.push(segment);
        self.visit(value, &candidates);
        self.path.pop();
    }
}

/// Remove non-string keys from every mapping in `value` that decodes as a
/// record described by `schema`, returning the dotted paths of the removed
/// keys.  The schema is only generated when such a key exists.
pub(crate) fn strip_non_string_keys(
    value: &mut YamlValue,
    schema: impl FnOnce() -> RootSchema,
) -> Vec<String> {
    if !has_non_string_key(value) {
        return Vec::new();
    }
    let root = schema();
    let root_schema = Schema::Object(root.schema.clone());
    let mut stripper = KeyStripper {
        root: &root,
        path: Vec::new(),
        removed: Vec::new(),
    };
    let mut candidates = Vec::new();
    stripper.candidates(&root_schema, &mut candidates);
    stripper.visit(value, &candidates);
    stripper.removed
}
