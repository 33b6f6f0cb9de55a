//! Type-safe schema generation for OpenAI structured outputs.
//!
//! Uses the `schemars` crate to generate JSON schemas from Rust types, then
//! rewrites them into the subset OpenAI accepts in strict mode.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use openai_client::StructuredOutput;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Lead {
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct LeadList {
//!     leads: Vec<Lead>,
//! }
//!
//! let schema = LeadList::openai_schema();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Keywords strict mode rejects; schemars emits them for integers and floats.
const UNSUPPORTED_KEYWORDS: &[&str] = &["format", "minimum", "maximum"];

/// Trait for types that can be used as OpenAI structured output.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate an OpenAI-compatible JSON schema for this type.
    ///
    /// OpenAI strict mode requires:
    /// 1. `additionalProperties: false` on all object schemas
    /// 2. ALL properties listed in `required`, even nullable ones
    /// 3. Fully inlined schemas (no `$ref` references)
    /// 4. An `items` schema on every array
    fn openai_schema() -> Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        fix_object_schemas(&mut value);
        inline_refs(&mut value);

        if let Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
            map.remove("title");
        }

        ensure_array_items(&mut value);
        strip_unsupported_keywords(&mut value, false);

        value
    }

    /// Get the schema name for this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Add `additionalProperties: false` and list every property in `required`.
fn fix_object_schemas(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("type") == Some(&Value::String("object".to_string())) {
                map.insert("additionalProperties".to_string(), Value::Bool(false));

                if let Some(Value::Object(props)) = map.get("properties") {
                    let all_keys: Vec<Value> =
                        props.keys().map(|k| Value::String(k.clone())).collect();
                    map.insert("required".to_string(), Value::Array(all_keys));
                }
            }

            for (_, v) in map.iter_mut() {
                fix_object_schemas(v);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                fix_object_schemas(item);
            }
        }
        _ => {}
    }
}

/// Replace every `$ref` with the definition it points to.
fn inline_refs(value: &mut Value) {
    let definitions = match value {
        Value::Object(map) => map.get("definitions").cloned(),
        _ => None,
    };

    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs);
    }
}

fn inline_refs_recursive(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(ref_path)) = map.get("$ref").cloned() {
                if let Some(type_name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(type_name) {
                        *value = def.clone();
                        inline_refs_recursive(value, definitions);
                        return;
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions);
            }
        }
        _ => {}
    }
}

/// Arrays without an `items` schema default to arrays of strings.
fn ensure_array_items(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let is_array = map.get("type") == Some(&Value::String("array".to_string()));
            if is_array && !map.contains_key("items") {
                map.insert("items".to_string(), serde_json::json!({ "type": "string" }));
            }
            for (_, v) in map.iter_mut() {
                ensure_array_items(v);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                ensure_array_items(item);
            }
        }
        _ => {}
    }
}

/// `in_properties` is true while walking a `properties` map, whose keys are
/// field names rather than schema keywords.
fn strip_unsupported_keywords(value: &mut Value, in_properties: bool) {
    match value {
        Value::Object(map) => {
            if !in_properties {
                for keyword in UNSUPPORTED_KEYWORDS {
                    map.remove(*keyword);
                }
            }
            for (key, v) in map.iter_mut() {
                let child_is_properties = !in_properties && key == "properties";
                strip_unsupported_keywords(v, child_is_properties);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                strip_unsupported_keywords(item, false);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct SourceDetail {
        url: String,
        format: String,
    }

    #[derive(Deserialize, JsonSchema)]
    struct Sources {
        count: u32,
        details: Vec<SourceDetail>,
    }

    #[derive(Deserialize, JsonSchema)]
    struct Lead {
        name: String,
        location: Option<String>,
        sources: Sources,
        tags: Vec<String>,
        #[serde(default)]
        #[schemars(skip)]
        notes: Vec<String>,
    }

    #[derive(Deserialize, JsonSchema)]
    struct LeadList {
        leads: Vec<Lead>,
    }

    fn lead_schema(schema: &Value) -> &serde_json::Map<String, Value> {
        schema["properties"]["leads"]["items"].as_object().unwrap()
    }

    #[test]
    fn test_root_is_clean_object() {
        let schema = LeadList::openai_schema();
        let root = schema.as_object().unwrap();

        assert_eq!(root.get("type"), Some(&Value::String("object".into())));
        assert!(!root.contains_key("definitions"));
        assert!(!root.contains_key("$schema"));
        assert_eq!(root.get("additionalProperties"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_nested_structs_are_inlined() {
        let schema = LeadList::openai_schema();
        let serialized = serde_json::to_string(&schema).unwrap();

        assert!(!serialized.contains("$ref"), "refs must be inlined: {serialized}");

        let sources = &lead_schema(&schema)["properties"]["sources"];
        assert_eq!(sources["type"], "object");
        assert_eq!(sources["additionalProperties"], false);
    }

    #[test]
    fn test_all_properties_required() {
        let schema = LeadList::openai_schema();
        let lead = lead_schema(&schema);

        let required: Vec<&str> = lead["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();

        assert!(required.contains(&"name"));
        assert!(required.contains(&"location"), "nullable fields are still required");
        assert!(required.contains(&"sources"));
        assert!(required.contains(&"tags"));
    }

    #[test]
    fn test_skipped_fields_are_absent() {
        let schema = LeadList::openai_schema();
        let lead = lead_schema(&schema);

        assert!(!lead["properties"].as_object().unwrap().contains_key("notes"));
    }

    #[test]
    fn test_integer_format_stripped_but_field_named_format_kept() {
        let schema = LeadList::openai_schema();
        let sources = &lead_schema(&schema)["properties"]["sources"];

        let count = sources["properties"]["count"].as_object().unwrap();
        assert_eq!(count.get("type"), Some(&Value::String("integer".into())));
        assert!(!count.contains_key("format"));
        assert!(!count.contains_key("minimum"));

        let detail = &sources["properties"]["details"]["items"];
        assert!(detail["properties"].as_object().unwrap().contains_key("format"));
    }

    #[test]
    fn test_array_without_items_gets_string_items() {
        let mut value = serde_json::json!({
            "type": "object",
            "properties": { "queries": { "type": "array" } }
        });
        ensure_array_items(&mut value);

        assert_eq!(value["properties"]["queries"]["items"]["type"], "string");
    }
}
