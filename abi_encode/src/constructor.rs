/* Constructor descriptor extraction and the top-level encode entry point */

use crate::encoder::encode_params;
use crate::errors::{EncodeError, EncodeResult};
use abi_types::{ArgumentValue, ConstructorInput, ParamType, DEFAULT_MAX_DEPTH};
use serde_json::Value as JsonValue;
use tracing::debug;

/* Configuration toggles for the constructor encoder */
#[derive(Clone, Debug)]
pub struct EncoderConfig {
    /* Array nesting accepted in constructor parameter types */
    pub max_type_depth: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            max_type_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Read the constructor parameters from a contract interface description.
///
/// Returns `None` when `abi` is not a list at all, which callers must keep
/// apart from `Some(vec![])`: an interface without a constructor entry, or
/// with one whose `inputs` are missing, takes zero arguments. Malformed
/// individual inputs are skipped.
pub fn extract_constructor_inputs(abi: &JsonValue) -> Option<Vec<ConstructorInput>> {
    let entries = abi.as_array()?;
    let constructor = entries
        .iter()
        .filter_map(JsonValue::as_object)
        .find(|entry| entry.get("type").and_then(JsonValue::as_str) == Some("constructor"));

    let Some(inputs) = constructor
        .and_then(|entry| entry.get("inputs"))
        .and_then(JsonValue::as_array)
    else {
        return Some(Vec::new());
    };

    Some(inputs.iter().filter_map(ConstructorInput::from_json).collect())
}

/// Encode constructor arguments with the default configuration.
///
/// See [`ConstructorEncoder::encode`].
pub fn encode_constructor_args(
    abi: &JsonValue,
    args: Option<&[ArgumentValue]>,
) -> EncodeResult<Option<String>> {
    ConstructorEncoder::default().encode(abi, args)
}

/* Stateless constructor encoder; safe to share across threads */
#[derive(Clone, Debug, Default)]
pub struct ConstructorEncoder {
    config: EncoderConfig,
}

impl ConstructorEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode `args` against the constructor declared in `abi`.
    ///
    /// Returns `Ok(None)` when `abi` is not a list of entries; no encoding is
    /// attempted. Otherwise returns the lowercase, unprefixed hex payload,
    /// which is empty for a constructor without parameters. Absent `args`
    /// count as an empty list and missing arguments are never padded.
    pub fn encode(
        &self,
        abi: &JsonValue,
        args: Option<&[ArgumentValue]>,
    ) -> EncodeResult<Option<String>> {
        let Some(inputs) = extract_constructor_inputs(abi) else {
            debug!("interface description is not a list, constructor encoding not applicable");
            return Ok(None);
        };
        let args = args.unwrap_or(&[]);
        if inputs.len() != args.len() {
            return Err(EncodeError::ArityMismatch {
                expected: inputs.len(),
                actual: args.len(),
            });
        }

        let types = inputs
            .iter()
            .map(|input| input.param_type_with_max_depth(self.config.max_type_depth))
            .collect::<Result<Vec<ParamType>, _>>()?;
        debug!(parameters = types.len(), "encoding constructor arguments");

        let encoded = encode_params(&types, args)?;
        Ok(Some(hex::encode(encoded)))
    }

    /* Same as `encode`, but a non-list interface is an error */
    pub fn encode_required(
        &self,
        abi: &JsonValue,
        args: Option<&[ArgumentValue]>,
    ) -> EncodeResult<String> {
        self.encode(abi, args)?.ok_or_else(|| {
            EncodeError::StructuralInvalid("expected a list of interface entries".to_string())
        })
    }

    /* Encode JSON arguments, converting each with `ArgumentValue::from_json` */
    pub fn encode_json(
        &self,
        abi: &JsonValue,
        args: Option<&[JsonValue]>,
    ) -> EncodeResult<Option<String>> {
        let args = args.map(ArgumentValue::from_json_list).transpose()?;
        self.encode(abi, args.as_deref())
    }

    pub fn encode_json_required(
        &self,
        abi: &JsonValue,
        args: Option<&[JsonValue]>,
    ) -> EncodeResult<String> {
        let args = args.map(ArgumentValue::from_json_list).transpose()?;
        self.encode_required(abi, args.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_list_interface_is_not_applicable() {
        assert_eq!(extract_constructor_inputs(&json!({ "abi": [] })), None);
        assert_eq!(extract_constructor_inputs(&json!(null)), None);
        assert_eq!(encode_constructor_args(&json!("abi"), None), Ok(None));
    }

    #[test]
    fn missing_constructor_means_no_parameters() {
        let abi = json!([{ "type": "function", "name": "f", "inputs": [] }]);
        assert_eq!(extract_constructor_inputs(&abi), Some(vec![]));
        assert_eq!(
            encode_constructor_args(&abi, None),
            Ok(Some(String::new()))
        );
        assert_eq!(
            encode_constructor_args(&abi, Some(&[] as &[ArgumentValue])),
            Ok(Some(String::new()))
        );
        assert_eq!(
            encode_constructor_args(&abi, Some(&[ArgumentValue::from(1i64)][..])),
            Err(EncodeError::ArityMismatch {
                expected: 0,
                actual: 1
            })
        );
    }

    #[test]
    fn constructor_without_inputs_list_means_no_parameters() {
        let abi = json!([{ "type": "constructor", "inputs": "nope" }]);
        assert_eq!(extract_constructor_inputs(&abi), Some(vec![]));
    }

    #[test]
    fn first_constructor_entry_wins_and_bad_inputs_are_skipped() {
        let abi = json!([
            "garbage",
            { "type": "event", "name": "E" },
            {
                "type": "constructor",
                "inputs": [
                    { "name": "owner", "type": "address" },
                    { "name": "broken" },
                    42,
                    { "type": "uint8" }
                ]
            },
            { "type": "constructor", "inputs": [{ "type": "bool" }] }
        ]);
        assert_eq!(
            extract_constructor_inputs(&abi),
            Some(vec![
                ConstructorInput::new(Some("owner"), "address"),
                ConstructorInput::new(None, "uint8"),
            ])
        );
    }

    #[test]
    fn encodes_constructor_arguments_as_hex() {
        let abi = json!([{
            "type": "constructor",
            "inputs": [
                { "name": "supply", "type": "uint256" },
                { "name": "symbol", "type": "string" }
            ]
        }]);
        let hex = encode_constructor_args(&abi, Some(&[ArgumentValue::from(1000i64), "TK".into()][..]))
            .unwrap()
            .unwrap();
        assert_eq!(hex.len() % 64, 0);
        assert_eq!(
            hex,
            [
                format!("{}3e8", "0".repeat(61)),
                format!("{}40", "0".repeat(62)),
                format!("{}02", "0".repeat(62)),
                format!("544b{}", "0".repeat(60)),
            ]
            .concat()
        );
    }

    #[test]
    fn tuple_constructor_parameters_are_rejected() {
        let abi = json!([{
            "type": "constructor",
            "inputs": [{ "name": "cfg", "type": "tuple", "components": [] }]
        }]);
        assert_eq!(
            encode_constructor_args(&abi, Some(&[ArgumentValue::Sequence(vec![])][..])),
            Err(EncodeError::UnsupportedType(
                "tuple types not supported".to_string()
            ))
        );
    }

    #[test]
    fn required_variant_reports_structural_errors() {
        let encoder = ConstructorEncoder::new();
        assert!(matches!(
            encoder.encode_required(&json!({}), None),
            Err(EncodeError::StructuralInvalid(_))
        ));
        assert_eq!(encoder.encode_required(&json!([]), None), Ok(String::new()));
    }

    #[test]
    fn json_arguments_are_converted() {
        let abi = json!([{ "type": "constructor", "inputs": [{ "type": "uint256[]" }] }]);
        let encoder = ConstructorEncoder::new();
        let hex = encoder
            .encode_json_required(&abi, Some(&[json!([1, "0x2"])][..]))
            .unwrap();
        assert_eq!(hex.len(), 4 * 64);

        assert!(matches!(
            encoder.encode_json(&abi, Some(&[json!([null])][..])),
            Err(EncodeError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn configured_depth_limit_applies() {
        let abi = json!([{ "type": "constructor", "inputs": [{ "type": "uint8[][]" }] }]);
        let encoder = ConstructorEncoder::with_config(EncoderConfig { max_type_depth: 1 });
        assert!(matches!(
            encoder.encode_json(&abi, Some(&[json!([[1]])][..])),
            Err(EncodeError::UnsupportedType(_))
        ));
    }
}
