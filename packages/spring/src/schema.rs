use crate::config::SpringConfigUpdate;

/// Generates a JSON Schema for spring configuration files.
///
/// The schema includes all configuration options with their types and
/// descriptions.
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(SpringConfigUpdate);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert(
            "$id".to_string(),
            serde_json::json!(
                "https://raw.githubusercontent.com/boing-rs/boing/main/spring.schema.json"
            ),
        );
    }

    schema
}

/// Generates a pretty-printed JSON Schema string for spring configuration files.
#[must_use]
pub fn generate_schema_json() -> String {
    let schema = generate_schema();
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_schema_produces_valid_json() {
        let schema_json = generate_schema_json();
        assert!(!schema_json.is_empty());

        let parsed: serde_json::Value = serde_json::from_str(&schema_json).unwrap();

        assert!(parsed["$id"].as_str().unwrap().contains("spring.schema.json"));
        assert_eq!(parsed["title"], "SpringConfigUpdate");
        assert!(parsed["properties"]["toValue"].is_object());
        assert!(parsed["properties"]["overshootClamping"].is_object());
    }

    #[test]
    fn test_schema_forbids_additional_properties() {
        let parsed: serde_json::Value = serde_json::from_str(&generate_schema_json()).unwrap();
        assert_eq!(parsed["additionalProperties"], false);
    }
}
