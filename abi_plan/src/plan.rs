/* Match deployments to compiled contracts and derive their verification inputs */

use crate::build_info::ContractArtifact;
use crate::deployments::Deployment;
use abi_encode::ConstructorEncoder;
use serde_derive::Serialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/* One contract to submit for verification */
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    pub id: String,
    pub address: String,
    pub fully_qualified_name: String,
    pub contract_name: String,
    pub compiler_version: String,
    pub standard_json_input: Value,
    /* Lowercase, without `0x` */
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructor_args_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub explorer_url: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SkipReason {
    /* No artifact with the deployment's name */
    Unmatched,
    /* Several artifacts share the deployment's contract name */
    Ambiguous { candidates: Vec<String> },
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SkippedDeployment {
    pub address: String,
    pub reason: SkipReason,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct Plan {
    pub items: Vec<PlanItem>,
    pub skipped: Vec<SkippedDeployment>,
}

enum Match<'a> {
    Found(&'a ContractArtifact),
    Skip(SkipReason),
}

struct ArtifactIndex<'a> {
    contracts: &'a [ContractArtifact],
    by_name: HashMap<&'a str, Vec<&'a ContractArtifact>>,
}

impl<'a> ArtifactIndex<'a> {
    fn new(contracts: &'a [ContractArtifact]) -> Self {
        let mut by_name: HashMap<&str, Vec<&ContractArtifact>> = HashMap::new();
        for contract in contracts {
            by_name
                .entry(contract.contract_name.as_str())
                .or_default()
                .push(contract);
        }
        Self { contracts, by_name }
    }

    /* Exact fully-qualified name first, then a unique contract name */
    fn resolve(&self, deployment: &Deployment) -> Match<'a> {
        if let Some(fqn) = deployment.fully_qualified_name.as_deref() {
            if let Some(exact) = self.contracts.iter().find(|c| c.fully_qualified_name == fqn) {
                return Match::Found(exact);
            }
        }
        let candidates = deployment
            .contract_name
            .as_deref()
            .and_then(|name| self.by_name.get(name))
            .map(Vec::as_slice)
            .unwrap_or_default();
        match candidates {
            [] => Match::Skip(SkipReason::Unmatched),
            [single] => Match::Found(*single),
            many => Match::Skip(SkipReason::Ambiguous {
                candidates: many.iter().map(|c| c.fully_qualified_name.clone()).collect(),
            }),
        }
    }
}

/* `0x`-prefixed hex to lowercase digits; `None` if malformed */
fn explicit_hex(hex: &str) -> Option<String> {
    let digits = hex.trim().strip_prefix("0x")?;
    digits
        .bytes()
        .all(|b| b.is_ascii_hexdigit())
        .then(|| digits.to_ascii_lowercase())
}

fn constructor_args(
    encoder: &ConstructorEncoder,
    artifact: &ContractArtifact,
    deployment: &Deployment,
) -> (Option<String>, Option<String>) {
    if let Some(hex) = deployment.constructor_args_hex.as_deref().and_then(explicit_hex) {
        return (Some(hex), None);
    }
    let Some(args) = deployment.constructor_args.as_deref() else {
        return (None, None);
    };
    let null = Value::Null;
    let abi = artifact.abi.as_ref().unwrap_or(&null);
    match encoder.encode_json(abi, Some(args)) {
        Ok(Some(hex)) => (Some(hex), None),
        Ok(None) => (
            None,
            Some("contract has no interface description to encode against".to_string()),
        ),
        Err(err) => {
            warn!(address = %deployment.address, error = %err, "constructor encoding failed");
            (None, Some(format!("constructor arguments: {err}")))
        }
    }
}

/// Build a verification plan with the default encoder configuration.
///
/// See [`build_plan_with`].
pub fn build_plan(
    contracts: &[ContractArtifact],
    deployments: &[Deployment],
    explorer_base_url: &str,
) -> Plan {
    build_plan_with(&ConstructorEncoder::default(), contracts, deployments, explorer_base_url)
}

/// Match every deployment to an artifact and derive its constructor hex.
///
/// Deployments that cannot be matched unambiguously are reported in
/// `skipped`. Items are unique per address (compared case-insensitively,
/// first wins) and sorted by address.
pub fn build_plan_with(
    encoder: &ConstructorEncoder,
    contracts: &[ContractArtifact],
    deployments: &[Deployment],
    explorer_base_url: &str,
) -> Plan {
    let index = ArtifactIndex::new(contracts);
    let base = explorer_base_url.trim_end_matches('/');
    let mut seen = HashSet::new();
    let mut plan = Plan::default();

    for deployment in deployments {
        let artifact = match index.resolve(deployment) {
            Match::Found(artifact) => artifact,
            Match::Skip(reason) => {
                debug!(address = %deployment.address, ?reason, "skipping deployment");
                plan.skipped.push(SkippedDeployment {
                    address: deployment.address.clone(),
                    reason,
                });
                continue;
            }
        };
        if !seen.insert(deployment.address.to_lowercase()) {
            debug!(address = %deployment.address, "duplicate deployment address");
            continue;
        }

        let (constructor_args_hex, message) = constructor_args(encoder, artifact, deployment);
        plan.items.push(PlanItem {
            id: format!("{}-{}", deployment.address, artifact.fully_qualified_name),
            address: deployment.address.clone(),
            fully_qualified_name: artifact.fully_qualified_name.clone(),
            contract_name: artifact.contract_name.clone(),
            compiler_version: artifact.compiler_version.clone(),
            standard_json_input: artifact.standard_json_input.clone(),
            constructor_args_hex,
            message,
            explorer_url: format!("{base}/address/{}#code", deployment.address),
        });
    }

    plan.items.sort_by(|a, b| a.address.cmp(&b.address));
    debug!(
        items = plan.items.len(),
        skipped = plan.skipped.len(),
        "built verification plan"
    );
    plan
}
