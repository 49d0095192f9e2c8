//! Function-call contract derived mechanically from the schema model.
//!
//! The declaration handed to Gemini is generated from `VideoPrompt`'s
//! `JsonSchema` implementation and folded into the subset the
//! `generateContent` tool schema accepts. Deriving it keeps the contract and
//! the model definition from drifting apart; nothing here is hand-maintained
//! in parallel with the structs.

use schemars::schema_for;
use serde_json::{json, Map, Value};
use veoprompt_models::VideoPrompt;

/// Name of the declared function the model must call.
pub const FUNCTION_NAME: &str = "create_video_prompt";

const FUNCTION_DESCRIPTION: &str = "Convert an unstructured video description into a structured \
    video generation prompt with all required elements: subject, scene, shot composition, \
    camera motion, style, and technical parameters.";

/// Full function declaration for the `tools` section of a request.
pub fn function_declaration() -> Value {
    json!({
        "name": FUNCTION_NAME,
        "description": FUNCTION_DESCRIPTION,
        "parameters": prompt_parameters(),
    })
}

/// The `parameters` schema: `VideoPrompt`'s JSON schema in the Gemini dialect.
pub fn prompt_parameters() -> Value {
    let root = schema_for!(VideoPrompt);
    let mut value = serde_json::to_value(root).expect("VideoPrompt schema is serializable");

    let definitions = match value
        .as_object_mut()
        .and_then(|obj| obj.remove("definitions"))
    {
        Some(Value::Object(definitions)) => definitions,
        _ => Map::new(),
    };

    sanitize(&mut value, &definitions);
    value
}

// The tool-schema dialect understands type/description/properties/required/
// items/enum/nullable; everything else JSON Schema allows has to go, and
// references have to be inlined.
fn sanitize(node: &mut Value, definitions: &Map<String, Value>) {
    let Some(obj) = node.as_object_mut() else {
        return;
    };

    resolve_ref(obj, definitions);
    flatten_all_of(obj, definitions);
    flatten_nullable_any_of(obj, definitions);
    collapse_nullable_type(obj);

    for key in [
        "$schema",
        "title",
        "additionalProperties",
        "format",
        "default",
        "examples",
    ] {
        obj.remove(key);
    }

    // Enums are only accepted on string properties.
    if obj.get("type").and_then(Value::as_str) != Some("string") {
        obj.remove("enum");
    }

    if let Some(Value::Object(properties)) = obj.get_mut("properties") {
        for (_, property) in properties.iter_mut() {
            sanitize(property, definitions);
        }
    }
    if let Some(items) = obj.get_mut("items") {
        sanitize(items, definitions);
    }
}

// Replaces a `$ref` with the referenced definition. Keys already present on
// the referring node (a field-level description) win over the definition's.
fn resolve_ref(obj: &mut Map<String, Value>, definitions: &Map<String, Value>) {
    let Some(name) = obj
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|reference| reference.rsplit('/').next())
        .map(str::to_string)
    else {
        return;
    };

    if let Some(Value::Object(definition)) = definitions.get(&name) {
        let definition = definition.clone();
        obj.remove("$ref");
        for (key, val) in definition {
            obj.entry(key).or_insert(val);
        }
    }
}

// schemars wraps a documented reference as `allOf: [$ref]`; fold the single
// subschema back into the node.
fn flatten_all_of(obj: &mut Map<String, Value>, definitions: &Map<String, Value>) {
    let mut subschemas = match obj.remove("allOf") {
        Some(Value::Array(array)) => array,
        Some(other) => {
            obj.insert("allOf".to_string(), other);
            return;
        }
        None => return,
    };

    if subschemas.len() != 1 {
        obj.insert("allOf".to_string(), Value::Array(subschemas));
        return;
    }

    if let Some(Value::Object(mut sub)) = subschemas.pop() {
        resolve_ref(&mut sub, definitions);
        for (key, val) in sub {
            obj.entry(key).or_insert(val);
        }
    }
}

// An optional reference field arrives as `anyOf: [X, {type: null}]`; fold it
// into `X` with `nullable: true`.
fn flatten_nullable_any_of(obj: &mut Map<String, Value>, definitions: &Map<String, Value>) {
    let subschemas = match obj.remove("anyOf") {
        Some(Value::Array(array)) => array,
        Some(other) => {
            obj.insert("anyOf".to_string(), other);
            return;
        }
        None => return,
    };

    let (nulls, mut others): (Vec<Value>, Vec<Value>) = subschemas
        .into_iter()
        .partition(|sub| sub.get("type").and_then(Value::as_str) == Some("null"));

    if nulls.is_empty() || others.len() != 1 {
        others.extend(nulls);
        obj.insert("anyOf".to_string(), Value::Array(others));
        return;
    }

    if let Some(Value::Object(mut sub)) = others.into_iter().next() {
        resolve_ref(&mut sub, definitions);
        for (key, val) in sub {
            obj.entry(key).or_insert(val);
        }
        obj.insert("nullable".to_string(), Value::Bool(true));
    }
}

// An optional primitive field arrives as `type: [T, "null"]`.
fn collapse_nullable_type(obj: &mut Map<String, Value>) {
    let collapsed = match obj.get("type") {
        Some(Value::Array(types)) => {
            let non_null: Vec<&str> = types
                .iter()
                .filter_map(Value::as_str)
                .filter(|ty| *ty != "null")
                .collect();
            if types.len() == 2 && non_null.len() == 1 {
                Some(non_null[0].to_string())
            } else {
                None
            }
        }
        _ => None,
    };

    if let Some(ty) = collapsed {
        obj.insert("type".to_string(), Value::String(ty));
        obj.insert("nullable".to_string(), Value::Bool(true));
    }
}
