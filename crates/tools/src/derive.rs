//! Parameter-schema derivation from typed argument structs.
//!
//! The derived construction path: a tool declares its arguments as a plain
//! struct deriving `JsonSchema` + `Deserialize`, and the parameter list is
//! read off the generated JSON schema once at tool construction. Required
//! follows the schema's `required` set (a `serde` default makes a field
//! optional and carries its default value into the schema); unmapped or
//! unresolvable types fall back to `string`.

use schemars::schema::{InstanceType, Schema, SchemaObject, SingleOrVec};
use schemars::{schema_for, JsonSchema};

use codecrew_core::types::{ParameterType, ToolParameter};

/// Derive one `ToolParameter` per field of `A`.
pub fn derive_parameters<A: JsonSchema>() -> Vec<ToolParameter> {
    let root = schema_for!(A);
    object_parameters(&root.schema)
}

fn object_parameters(schema: &SchemaObject) -> Vec<ToolParameter> {
    let object = match &schema.object {
        Some(object) => object,
        None => return Vec::new(),
    };

    let mut parameters = Vec::new();
    for (name, property) in &object.properties {
        let mut kind = ParameterType::String;
        let mut description = None;
        let mut default = None;
        let mut allowed = None;

        if let Schema::Object(property) = property {
            if let Some(types) = &property.instance_type {
                kind = map_instance_type(types);
            }
            if let Some(metadata) = &property.metadata {
                description = metadata.description.clone();
                default = metadata.default.clone();
            }
            if let Some(values) = &property.enum_values {
                allowed = Some(
                    values
                        .iter()
                        .filter_map(|value| value.as_str().map(String::from))
                        .collect(),
                );
            }
        }

        parameters.push(ToolParameter {
            name: name.clone(),
            kind,
            description: description.unwrap_or_else(|| format!("Parameter: {name}")),
            required: object.required.contains(name),
            default,
            allowed,
        });
    }
    parameters
}

fn map_instance_type(types: &SingleOrVec<InstanceType>) -> ParameterType {
    let instance = match types {
        SingleOrVec::Single(single) => *single.clone(),
        // Nullable fields show up as [T, "null"]; the non-null entry wins.
        SingleOrVec::Vec(list) => list
            .iter()
            .cloned()
            .find(|instance| *instance != InstanceType::Null)
            .unwrap_or(InstanceType::String),
    };

    match instance {
        InstanceType::String => ParameterType::String,
        InstanceType::Integer => ParameterType::Integer,
        InstanceType::Number => ParameterType::Number,
        InstanceType::Boolean => ParameterType::Boolean,
        InstanceType::Array => ParameterType::Array,
        InstanceType::Object => ParameterType::Object,
        InstanceType::Null => ParameterType::String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn default_limit() -> i64 {
        5
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct SampleArgs {
        /// Search text.
        query: String,
        #[serde(default = "default_limit")]
        limit: i64,
    }

    #[test]
    fn test_derived_schema_round_trip() {
        let parameters = derive_parameters::<SampleArgs>();
        assert_eq!(parameters.len(), 2);

        let limit = parameters.iter().find(|p| p.name == "limit").unwrap();
        assert!(!limit.required);
        assert_eq!(limit.kind, ParameterType::Integer);
        assert_eq!(limit.default, Some(json!(5)));
        assert_eq!(limit.description, "Parameter: limit");

        let query = parameters.iter().find(|p| p.name == "query").unwrap();
        assert!(query.required);
        assert_eq!(query.kind, ParameterType::String);
        assert_eq!(query.description, "Search text.");
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct MixedArgs {
        flag: bool,
        ratio: f64,
        items: Vec<String>,
        note: Option<String>,
    }

    #[test]
    fn test_type_mapping() {
        let parameters = derive_parameters::<MixedArgs>();
        let kind_of = |name: &str| {
            parameters
                .iter()
                .find(|p| p.name == name)
                .map(|p| p.kind)
                .unwrap()
        };

        assert_eq!(kind_of("flag"), ParameterType::Boolean);
        assert_eq!(kind_of("ratio"), ParameterType::Number);
        assert_eq!(kind_of("items"), ParameterType::Array);
        // nullable collapses to its non-null type
        assert_eq!(kind_of("note"), ParameterType::String);
    }

    #[test]
    fn test_optional_field_is_not_required() {
        let parameters = derive_parameters::<MixedArgs>();
        let note = parameters.iter().find(|p| p.name == "note").unwrap();
        assert!(!note.required);
    }
}
