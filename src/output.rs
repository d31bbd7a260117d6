use serde::Serialize;

use crate::error::InventoryError;

pub fn render<T: Serialize>(data: &T, format: &str) -> Result<String, InventoryError> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(data)?),
        "yaml" => Ok(serde_yaml::to_string(data)?),
        other => Err(InventoryError::UnsupportedFormat(other.to_string())),
    }
}

pub fn print_error(message: &str) {
    eprintln!("\x1b[31m❌ Error: {}\x1b[0m", message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_json() {
        let text = render(&json!({ "vcenter": { "children": [] } }), "json").unwrap();
        assert_eq!(text, "{\n  \"vcenter\": {\n    \"children\": []\n  }\n}");
    }

    #[test]
    fn test_render_yaml() {
        let text = render(&json!({ "rhel7": { "hosts": ["a"] } }), "yaml").unwrap();
        assert!(text.contains("rhel7:"));
        assert!(text.contains("- a"));
    }

    #[test]
    fn test_unsupported_format() {
        let err = render(&json!({}), "ini").unwrap_err();
        assert!(matches!(err, InventoryError::UnsupportedFormat(ref f) if f == "ini"));
    }
}
