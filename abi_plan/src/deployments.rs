/* Deployment records: where each contract landed and how it was constructed */

use crate::errors::{PlanError, PlanResult};
use serde_derive::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructor_args: Option<Vec<Value>>,
    /* `0x`-prefixed, as found in the record */
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructor_args_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub libraries: Option<BTreeMap<String, String>>,
}

/* First key that is present and not null */
fn first_present<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

fn is_hex_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_hexdigit())
}

fn normalize_address(raw: &str) -> PlanResult<String> {
    let trimmed = raw.trim();
    match trimmed.strip_prefix("0x") {
        Some(digits) if digits.len() == 40 && is_hex_digits(digits) => Ok(trimmed.to_string()),
        _ => Err(PlanError::InvalidAddress(raw.to_string())),
    }
}

/* `0x` followed by zero or more hex digits */
fn hex_string(value: Option<&Value>) -> Option<String> {
    let trimmed = value?.as_str()?.trim();
    let digits = trimmed.strip_prefix("0x")?;
    is_hex_digits(digits).then(|| trimmed.to_string())
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn array_field(object: &Map<String, Value>, key: &str) -> Option<Vec<Value>> {
    object.get(key).and_then(Value::as_array).cloned()
}

fn parse_item(item: &Value) -> PlanResult<Option<Deployment>> {
    let Some(object) = item.as_object() else {
        return Ok(None);
    };
    let Some(raw_address) = first_present(object, &["address", "contractAddress", "addressHash"])
        .and_then(Value::as_str)
    else {
        return Ok(None);
    };
    let address = normalize_address(raw_address)?;

    let constructor_args_hex = [
        "constructorArgsHex",
        "constructorArgs",
        "constructor_arguments",
        "constructorArguements",
    ]
    .iter()
    .find_map(|key| hex_string(object.get(*key)));

    let libraries = object.get("libraries").and_then(Value::as_object).map(|libs| {
        libs.iter()
            .filter_map(|(name, addr)| Some((name.clone(), addr.as_str()?.to_string())))
            .collect()
    });

    Ok(Some(Deployment {
        address,
        fully_qualified_name: string_field(object, "fullyQualifiedName"),
        contract_name: string_field(object, "contractName").or_else(|| string_field(object, "name")),
        constructor_args: array_field(object, "constructorArgs").or_else(|| array_field(object, "args")),
        constructor_args_hex,
        libraries,
    }))
}

/* Reshape a broadcast transaction into the flat record form */
fn transaction_item(tx: &Map<String, Value>) -> Value {
    let mut item = Map::new();
    let null = Value::Null;
    let pick = |keys: &[&str]| first_present(tx, keys).unwrap_or(&null).clone();

    item.insert("address".into(), pick(&["contractAddress", "address"]));
    item.insert("contractName".into(), pick(&["contractName", "name"]));
    let args = pick(&["arguments", "constructorArgs"]);
    if args.is_array() {
        item.insert("constructorArgs".into(), args);
    }
    let hex = hex_string(tx.get("constructorArgsHex")).or_else(|| hex_string(tx.get("constructorArgs")));
    if let Some(hex) = hex {
        item.insert("constructorArgsHex".into(), Value::String(hex));
    }
    Value::Object(item)
}

/// Parse deployment records.
///
/// Accepts an array of records, an object with a `transactions` array
/// (broadcast output), or a single record. Empty text yields no records.
/// Records without an address string are skipped; a malformed address is
/// an error.
pub fn parse_deployments_text(text: &str) -> PlanResult<Vec<Deployment>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let parsed: Value = serde_json::from_str(trimmed)?;

    let items: Vec<Value> = match &parsed {
        Value::Array(items) => items.clone(),
        Value::Object(object) => match object.get("transactions").and_then(Value::as_array) {
            Some(txs) => txs
                .iter()
                .filter_map(Value::as_object)
                .map(transaction_item)
                .collect(),
            None => vec![parsed.clone()],
        },
        _ => Vec::new(),
    };

    let mut deployments = Vec::new();
    for item in &items {
        if let Some(deployment) = parse_item(item)? {
            deployments.push(deployment);
        }
    }
    Ok(deployments)
}

pub fn load_deployments_file(path: &Path) -> PlanResult<Vec<Deployment>> {
    let text = std::fs::read_to_string(path).map_err(|e| PlanError::io(path, e))?;
    let deployments = parse_deployments_text(&text)?;
    debug!(path = %path.display(), deployments = deployments.len(), "loaded deployments");
    Ok(deployments)
}
