//! Verification planning for deployed contracts
//!
//! Reads compiler build-info bundles and deployment records, matches each
//! deployment to a compiled contract, and produces a verification plan whose
//! items carry the constructor-argument hex an explorer expects.

pub mod build_info;
pub mod deployments;
pub mod errors;
pub mod network;
pub mod plan;

pub use build_info::{
    extract_contracts, load_build_info_file, parse_build_info_text, BuildInfo, ContractArtifact,
    OptimizerSettings,
};
pub use deployments::{load_deployments_file, parse_deployments_text, Deployment};
pub use errors::{PlanError, PlanResult};
pub use network::Network;
pub use plan::{build_plan, build_plan_with, Plan, PlanItem, SkipReason, SkippedDeployment};

// Re-export the encoder for callers that only depend on this crate
pub use abi_encode;
