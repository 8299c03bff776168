/* Compiler build-info bundles and the contract artifacts they contain */

use crate::errors::{PlanError, PlanResult};
use serde_derive::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/* One compiler run: standard-JSON input plus its output */
#[derive(Debug, Clone, PartialEq)]
pub struct BuildInfo {
    pub id: Option<String>,
    pub solc_version: Option<String>,
    pub solc_long_version: Option<String>,
    pub input: Value,
    pub output: Value,
}

impl BuildInfo {
    /* `None` unless `value` is an object carrying both `input` and `output` */
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let input = object.get("input")?.clone();
        let output = object.get("output")?.clone();
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);
        Some(Self {
            id: text("id"),
            solc_version: text("solcVersion"),
            solc_long_version: text("solcLongVersion"),
            input,
            output,
        })
    }

    /// Compiler version with a leading `v`, or an empty string when unknown.
    ///
    /// Prefers `solcLongVersion`, then `solcVersion`, then the `compiler`
    /// field of the standard-JSON input.
    pub fn compiler_version(&self) -> String {
        let direct = self
            .solc_long_version
            .as_deref()
            .or(self.solc_version.as_deref())
            .map(normalize_compiler_version)
            .unwrap_or_default();
        if !direct.is_empty() {
            return direct;
        }
        self.input
            .get("compiler")
            .and_then(Value::as_str)
            .map(normalize_compiler_version)
            .unwrap_or_default()
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizerSettings {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<u64>,
}

/* A compiled contract, addressed by `source_path:contract_name` */
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub fully_qualified_name: String,
    pub source_path: String,
    pub contract_name: String,
    pub compiler_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evm_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimizer: Option<OptimizerSettings>,
    pub standard_json_input: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abi: Option<Value>,
}

fn normalize_compiler_version(version: &str) -> String {
    let trimmed = version.trim();
    if trimmed.is_empty() || trimmed.starts_with('v') {
        trimmed.to_string()
    } else {
        format!("v{trimmed}")
    }
}

/// Parse a build-info file.
///
/// The text may hold one bundle or an array of them. Entries that are not
/// objects with both `input` and `output` are dropped.
pub fn parse_build_info_text(text: &str) -> PlanResult<Vec<BuildInfo>> {
    let parsed: Value = serde_json::from_str(text)?;
    let bundles = match &parsed {
        Value::Array(items) => items.iter().filter_map(BuildInfo::from_json).collect(),
        single => BuildInfo::from_json(single).into_iter().collect(),
    };
    Ok(bundles)
}

pub fn load_build_info_file(path: &Path) -> PlanResult<Vec<BuildInfo>> {
    let text = std::fs::read_to_string(path).map_err(|e| PlanError::io(path, e))?;
    let bundles = parse_build_info_text(&text)?;
    debug!(path = %path.display(), bundles = bundles.len(), "loaded build info");
    Ok(bundles)
}

fn optimizer_settings(settings: Option<&Map<String, Value>>) -> Option<OptimizerSettings> {
    let optimizer = settings?.get("optimizer")?.as_object()?;
    let enabled = optimizer.get("enabled")?.as_bool()?;
    Some(OptimizerSettings {
        enabled,
        runs: optimizer.get("runs").and_then(Value::as_u64),
    })
}

/// Flatten bundles into one artifact per compiled contract.
///
/// Artifacts repeated across bundles with the same compiler version are kept
/// once (first occurrence wins). The result is sorted by fully-qualified name.
pub fn extract_contracts(build_infos: &[BuildInfo]) -> Vec<ContractArtifact> {
    let mut seen = HashSet::new();
    let mut artifacts = Vec::new();

    for build_info in build_infos {
        let compiler_version = build_info.compiler_version();
        let (Some(input), Some(contracts)) = (
            build_info.input.as_object(),
            build_info.output.get("contracts").and_then(Value::as_object),
        ) else {
            continue;
        };

        let settings = input.get("settings").and_then(Value::as_object);
        let optimizer = optimizer_settings(settings);
        let evm_version = settings
            .and_then(|s| s.get("evmVersion"))
            .and_then(Value::as_str)
            .map(str::to_string);

        for (source_path, by_name) in contracts {
            let Some(by_name) = by_name.as_object() else {
                continue;
            };
            for (contract_name, compiled) in by_name {
                let fully_qualified_name = format!("{source_path}:{contract_name}");
                if !seen.insert((compiler_version.clone(), fully_qualified_name.clone())) {
                    continue;
                }
                artifacts.push(ContractArtifact {
                    fully_qualified_name,
                    source_path: source_path.clone(),
                    contract_name: contract_name.clone(),
                    compiler_version: compiler_version.clone(),
                    evm_version: evm_version.clone(),
                    optimizer,
                    standard_json_input: build_info.input.clone(),
                    abi: compiled.get("abi").cloned(),
                });
            }
        }
    }

    artifacts.sort_by(|a, b| a.fully_qualified_name.cmp(&b.fully_qualified_name));
    debug!(contracts = artifacts.len(), "extracted contract artifacts");
    artifacts
}
