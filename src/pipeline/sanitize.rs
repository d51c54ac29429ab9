use serde_json::{Map, Value};

/// Fields assigned by the server, never settable through a client payload.
/// `owner` is stamped from the authenticated principal at create time and
/// immutable afterwards; `id` is assigned by the store.
const PROTECTED_FIELDS: &[&str] = &["id", "owner"];

/// Remove fields whose value is an empty string, recursively through nested
/// objects. Non-string and non-empty values pass through unchanged, e.g.
/// { name: "", type: "tabby" } -> { type: "tabby" }. Prevents a blank form
/// value from clobbering an existing field on partial update.
pub fn remove_blank_fields(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter_map(|(key, value)| match value {
                    Value::String(s) if s.is_empty() => None,
                    nested @ Value::Object(_) => Some((key, remove_blank_fields(nested))),
                    other => Some((key, other)),
                })
                .collect(),
        ),
        other => other,
    }
}

/// Drop server-assigned fields from a client payload before it reaches the
/// store. On create the owner is passed to the store as a separate argument;
/// on update the ownership guard has already run and the payload must not be
/// able to reassign it.
pub fn strip_protected_fields(mut fields: Map<String, Value>) -> Map<String, Value> {
    for field in PROTECTED_FIELDS {
        fields.remove(*field);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_string_fields_are_removed() {
        let input = json!({ "name": "", "type": "tabby" });
        assert_eq!(remove_blank_fields(input), json!({ "type": "tabby" }));
    }

    #[test]
    fn nested_objects_are_stripped_recursively() {
        let input = json!({
            "name": "Milo",
            "details": { "color": "", "age": 3, "tags": { "mood": "" } }
        });
        assert_eq!(
            remove_blank_fields(input),
            json!({ "name": "Milo", "details": { "age": 3, "tags": {} } })
        );
    }

    #[test]
    fn non_string_values_pass_through() {
        let input = json!({ "count": 0, "active": false, "note": null, "tags": ["", "a"] });
        assert_eq!(remove_blank_fields(input.clone()), input);
    }

    #[test]
    fn non_object_input_is_unchanged() {
        assert_eq!(remove_blank_fields(json!("")), json!(""));
        assert_eq!(remove_blank_fields(json!(42)), json!(42));
    }

    #[test]
    fn protected_fields_are_scrubbed() {
        let fields = match json!({ "id": "x", "owner": "u2", "name": "Milo" }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let scrubbed = strip_protected_fields(fields);
        assert!(!scrubbed.contains_key("id"));
        assert!(!scrubbed.contains_key("owner"));
        assert_eq!(scrubbed.get("name"), Some(&json!("Milo")));
    }
}
