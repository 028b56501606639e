//! Shape validation for untyped DCIM custom fields.
//!
//! Custom fields arrive as free-form JSON. Each field the pipeline reads is
//! validated exactly once here; later stages only see typed values.

use ipnetwork::Ipv4Network;
use serde_json::{Map, Value};

use crate::error::ExportError;

/// Human-readable JSON shape name for mismatch errors.
fn shape_of(value: Option<&Value>) -> String {
    match value {
        None => "missing".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(_)) => "boolean".to_string(),
        Some(Value::Number(_)) => "number".to_string(),
        Some(Value::String(_)) => "string".to_string(),
        Some(Value::Array(_)) => "array".to_string(),
        Some(Value::Object(_)) => "object".to_string(),
    }
}

fn mismatch(field: &str, expected: &str, value: Option<&Value>) -> ExportError {
    ExportError::TypeMismatch {
        field: field.to_string(),
        expected: expected.to_string(),
        actual: shape_of(value),
    }
}

/// Parse an `address/prefix` literal.
pub(crate) fn parse_prefixed(literal: &str) -> Result<Ipv4Network, ExportError> {
    literal
        .parse()
        .map_err(|_| ExportError::AddressParse(literal.to_string()))
}

/// Read a custom field shaped `{ "address": "<ip>/<prefix>" }`.
pub(crate) fn nested_address(
    fields: &Map<String, Value>,
    field: &str,
) -> Result<Ipv4Network, ExportError> {
    let value = fields.get(field);
    let Some(Value::Object(object)) = value else {
        return Err(mismatch(field, "object with \"address\"", value));
    };
    let address = object.get("address");
    let Some(Value::String(literal)) = address else {
        return Err(mismatch(&format!("{field}.address"), "string", address));
    };
    parse_prefixed(literal)
}

/// Read a plain string custom field.
pub(crate) fn plain_string(fields: &Map<String, Value>, field: &str) -> Result<String, ExportError> {
    let value = fields.get(field);
    let Some(Value::String(literal)) = value else {
        return Err(mismatch(field, "string", value));
    };
    Ok(literal.clone())
}

/// Read a custom field shaped as a list of `{ "address": ... }` mappings,
/// preserving source order.
pub(crate) fn address_list(
    fields: &Map<String, Value>,
    field: &str,
) -> Result<Vec<Ipv4Network>, ExportError> {
    let value = fields.get(field);
    let Some(Value::Array(items)) = value else {
        return Err(mismatch(field, "array of address objects", value));
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let Value::Object(object) = item else {
                return Err(mismatch(
                    &format!("{field}[{index}]"),
                    "object with \"address\"",
                    Some(item),
                ));
            };
            let address = object.get("address");
            let Some(Value::String(literal)) = address else {
                return Err(mismatch(&format!("{field}[{index}].address"), "string", address));
            };
            parse_prefixed(literal)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_nested_address_ok() {
        let fields = fields(json!({"bmc_ip": {"address": "10.80.12.20/24"}}));
        let network = nested_address(&fields, "bmc_ip").unwrap();
        assert_eq!(network.ip().to_string(), "10.80.12.20");
        assert_eq!(network.mask().to_string(), "255.255.255.0");
    }

    #[test]
    fn test_nested_address_wrong_shape() {
        let fields = fields(json!({"bmc_ip": "10.80.12.20/24"}));
        let err = nested_address(&fields, "bmc_ip").unwrap_err();
        match err {
            ExportError::TypeMismatch { field, expected, actual } => {
                assert_eq!(field, "bmc_ip");
                assert_eq!(expected, "object with \"address\"");
                assert_eq!(actual, "string");
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_address_missing() {
        let fields = Map::new();
        let err = nested_address(&fields, "bmc_ip").unwrap_err();
        assert!(matches!(
            err,
            ExportError::TypeMismatch { ref actual, .. } if actual == "missing"
        ));
    }

    #[test]
    fn test_nested_address_bad_literal() {
        let fields = fields(json!({"bmc_ip": {"address": "not-an-address"}}));
        let err = nested_address(&fields, "bmc_ip").unwrap_err();
        assert!(matches!(
            err,
            ExportError::AddressParse(ref literal) if literal == "not-an-address"
        ));
    }

    #[test]
    fn test_plain_string_wrong_shape() {
        let fields = fields(json!({"disk": 7}));
        let err = plain_string(&fields, "disk").unwrap_err();
        assert!(matches!(
            err,
            ExportError::TypeMismatch { ref actual, .. } if actual == "number"
        ));
    }

    #[test]
    fn test_address_list_preserves_order() {
        let fields = fields(json!({
            "nameservers": [
                {"address": "121.63.58.96/32"},
                {"address": "121.63.68.96/32"}
            ]
        }));
        let addresses = address_list(&fields, "nameservers").unwrap();
        let rendered: Vec<String> = addresses.iter().map(|n| n.ip().to_string()).collect();
        assert_eq!(rendered, vec!["121.63.58.96", "121.63.68.96"]);
    }

    #[test]
    fn test_address_list_names_offending_entry() {
        let fields = fields(json!({"nameservers": [{"address": "1.1.1.1/32"}, "1.0.0.1"]}));
        let err = address_list(&fields, "nameservers").unwrap_err();
        assert!(matches!(
            err,
            ExportError::TypeMismatch { ref field, .. } if field == "nameservers[1]"
        ));
    }
}
