mod config;
mod error;

use abi_encode::ConstructorEncoder;
use abi_plan::{build_plan_with, extract_contracts, load_build_info_file, load_deployments_file, Network};
use abi_types::ParamType;
use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{validate_explorer_url, Config};

#[derive(Parser)]
#[command(name = "abi")]
#[command(about = "Contract ABI toolchain - constructor argument encoding and verification planning")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.abi-verify/config.yaml)
    #[arg(long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode constructor arguments against a contract ABI
    Encode {
        /// ABI file: a list of entries, or an artifact with an "abi" field
        #[arg(short = 'a', long = "abi", value_name = "FILE", required = true)]
        abi: PathBuf,

        /// JSON file holding the argument list
        #[arg(long = "args", value_name = "FILE", conflicts_with = "args_json")]
        args: Option<PathBuf>,

        /// Argument list as inline JSON
        #[arg(short = 'j', long = "args-json", value_name = "JSON")]
        args_json: Option<String>,

        /// Prefix the output with 0x
        #[arg(long = "prefix")]
        prefix: bool,
    },

    /// Parse type signatures and print their canonical form and layout
    #[command(name = "parse-type")]
    ParseType {
        /// Type signatures (e.g. uint256, address[2], string[][])
        #[arg(required = true)]
        signatures: Vec<String>,

        /// Pretty print JSON output
        #[arg(short = 'p', long = "pretty")]
        pretty: bool,
    },

    /// Build a verification plan from build-info and deployment files
    Plan {
        /// Compiler build-info file(s)
        #[arg(short = 'b', long = "build-info", value_name = "FILE", required = true)]
        build_info: Vec<PathBuf>,

        /// Deployment records
        #[arg(short = 'd', long = "deployments", value_name = "FILE", required = true)]
        deployments: PathBuf,

        /// Target network (overrides the config file)
        #[arg(short = 'n', long = "network", value_enum)]
        network: Option<NetworkArg>,

        /// Explorer base URL (overrides network and config file)
        #[arg(long = "explorer-url", value_name = "URL")]
        explorer_url: Option<String>,

        /// Output file path (stdout when omitted)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Pretty print JSON output
        #[arg(short = 'p', long = "pretty")]
        pretty: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum NetworkArg {
    RskMainnet,
    RskTestnet,
}

impl From<NetworkArg> for Network {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::RskMainnet => Network::RskMainnet,
            NetworkArg::RskTestnet => Network::RskTestnet,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("failed to load config")?;

    match cli.command {
        Commands::Encode {
            abi,
            args,
            args_json,
            prefix,
        } => {
            run_encode(&config, &abi, args.as_deref(), args_json.as_deref(), prefix)?;
        }

        Commands::ParseType { signatures, pretty } => {
            run_parse_type(&config, &signatures, pretty || config.pretty)?;
        }

        Commands::Plan {
            build_info,
            deployments,
            network,
            explorer_url,
            output,
            pretty,
        } => {
            let mut config = config;
            if let Some(network) = network {
                config.network = network.into();
                /* An explicit network replaces a configured explorer */
                config.explorer_url = None;
            }
            if let Some(explorer_url) = explorer_url {
                validate_explorer_url(&explorer_url)?;
                config.explorer_url = Some(explorer_url);
            }
            let pretty = pretty || config.pretty;
            run_plan(&config, &build_info, &deployments, output.as_deref(), pretty)?;
        }
    }

    Ok(())
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

/* Artifacts wrap the entry list in an "abi" field */
fn interface_entries(document: Value) -> Value {
    match document {
        Value::Object(mut object) if object.contains_key("abi") => {
            object.remove("abi").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn argument_list(document: Value) -> anyhow::Result<Vec<Value>> {
    match document {
        Value::Array(items) => Ok(items),
        other => bail!("constructor arguments must be a JSON array, got {other}"),
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

fn run_encode(
    config: &Config,
    abi_file: &Path,
    args_file: Option<&Path>,
    args_json: Option<&str>,
    prefix: bool,
) -> anyhow::Result<()> {
    let abi = interface_entries(read_json(abi_file)?);
    let args = match (args_file, args_json) {
        (Some(path), _) => Some(argument_list(read_json(path)?)?),
        (None, Some(inline)) => Some(argument_list(
            serde_json::from_str(inline).context("invalid JSON in --args-json")?,
        )?),
        (None, None) => None,
    };

    let encoder = ConstructorEncoder::with_config(config.encoder_config());
    let hex = encoder
        .encode_json_required(&abi, args.as_deref())
        .with_context(|| format!("failed to encode constructor arguments for {}", abi_file.display()))?;
    debug!(bytes = hex.len() / 2, "encoded constructor arguments");

    if prefix {
        println!("0x{hex}");
    } else {
        println!("{hex}");
    }
    Ok(())
}

#[derive(Serialize)]
struct ParsedType<'a> {
    signature: &'a str,
    canonical: String,
    dynamic: bool,
    head_slots: usize,
    #[serde(rename = "type")]
    ty: ParamType,
}

fn run_parse_type(config: &Config, signatures: &[String], pretty: bool) -> anyhow::Result<()> {
    let parsed = signatures
        .iter()
        .map(|signature| -> anyhow::Result<ParsedType> {
            let ty = ParamType::parse_with_max_depth(signature, config.max_type_depth)
                .with_context(|| format!("invalid type signature '{signature}'"))?;
            Ok(ParsedType {
                signature,
                canonical: ty.to_string(),
                dynamic: ty.is_dynamic(),
                head_slots: ty.head_slots(),
                ty,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    println!("{}", to_json(&parsed, pretty)?);
    Ok(())
}

fn run_plan(
    config: &Config,
    build_info_files: &[PathBuf],
    deployments_file: &Path,
    output: Option<&Path>,
    pretty: bool,
) -> anyhow::Result<()> {
    let mut build_infos = Vec::new();
    for path in build_info_files {
        build_infos.extend(load_build_info_file(path)?);
    }
    let contracts = extract_contracts(&build_infos);
    let deployments = load_deployments_file(deployments_file)?;

    let encoder = ConstructorEncoder::with_config(config.encoder_config());
    let plan = build_plan_with(&encoder, &contracts, &deployments, config.explorer_base_url());

    for skipped in &plan.skipped {
        warn!(address = %skipped.address, reason = ?skipped.reason, "deployment not planned");
    }
    info!(
        items = plan.items.len(),
        skipped = plan.skipped.len(),
        explorer = config.explorer_base_url(),
        "verification plan ready"
    );

    let rendered = to_json(&plan, pretty)?;
    match output {
        Some(path) => std::fs::write(path, rendered + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}
