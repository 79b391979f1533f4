//! Compiled contract descriptors, read from a Hardhat artifacts directory.

use std::path::{Path, PathBuf};

use alloy_core::primitives::Bytes;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

/// A compiled contract ready to be deployed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractArtifact {
    /// Contract name, as used to look it up.
    pub name: String,
    /// Solidity source the contract was compiled from, when known.
    pub source_name: Option<String>,
    /// JSON ABI entries.
    pub abi: Vec<Value>,
    /// Creation bytecode.
    pub bytecode: Bytes,
    /// Path of the artifact file the descriptor was read from.
    pub path: PathBuf,
}

impl ContractArtifact {
    /// Inputs declared by the ABI constructor, empty when there is none.
    pub fn constructor_inputs(&self) -> &[Value] {
        self.abi
            .iter()
            .find(|entry| entry.get("type").and_then(Value::as_str) == Some("constructor"))
            .and_then(|constructor| constructor.get("inputs"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// On-disk layout of a Hardhat artifact (`artifacts/contracts/<Source>.sol/<Name>.json`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatArtifact {
    contract_name: String,
    #[serde(default)]
    source_name: Option<String>,
    #[serde(default)]
    abi: Vec<Value>,
    bytecode: Bytes,
}

/// Directory holding the compiler output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find the artifact file of a contract.
    ///
    /// Searches `<root>/contracts` when it exists, the root itself otherwise. Debug
    /// (`*.dbg.json`) and `build-info` files are skipped. Fails when nothing or more
    /// than one file matches.
    pub fn find(&self, name: &str) -> Result<PathBuf> {
        let contracts = self.root.join("contracts");
        let search_root = if contracts.is_dir() {
            contracts
        } else {
            self.root.clone()
        };

        if !search_root.is_dir() {
            anyhow::bail!(
                "Artifacts directory not found: {}. Compile the contracts first.",
                search_root.display()
            );
        }

        let file_name = format!("{name}.json");
        let mut matches = Vec::new();
        collect_matches(&search_root, &file_name, &mut matches)?;
        matches.sort();

        match matches.len() {
            0 => anyhow::bail!(
                "No artifact for contract {} under {}",
                name,
                search_root.display()
            ),
            1 => Ok(matches.remove(0)),
            _ => anyhow::bail!(
                "Contract name {} is ambiguous, found {} artifacts: {}",
                name,
                matches.len(),
                matches
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// Load and validate the descriptor of a contract.
    ///
    /// The contract must have creation bytecode and a constructor without inputs, since
    /// deployments never pass constructor arguments.
    pub fn load(&self, name: &str) -> Result<ContractArtifact> {
        let path = self.find(name)?;

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read artifact {}", path.display()))?;
        let raw: HardhatArtifact = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse artifact {}", path.display()))?;

        if raw.contract_name != name {
            anyhow::bail!(
                "Artifact {} describes contract {}, expected {}",
                path.display(),
                raw.contract_name,
                name
            );
        }

        let artifact = ContractArtifact {
            name: raw.contract_name,
            source_name: raw.source_name,
            abi: raw.abi,
            bytecode: raw.bytecode,
            path,
        };

        if artifact.bytecode.is_empty() {
            anyhow::bail!(
                "Contract {} has no creation bytecode (abstract contract or interface?)",
                name
            );
        }

        let inputs = artifact.constructor_inputs();
        if !inputs.is_empty() {
            anyhow::bail!(
                "Contract {} expects {} constructor argument(s), deployments pass none",
                name,
                inputs.len()
            );
        }

        tracing::debug!(
            contract = %artifact.name,
            path = %artifact.path.display(),
            bytecode_len = artifact.bytecode.len(),
            "Loaded contract artifact"
        );

        Ok(artifact)
    }
}

fn collect_matches(dir: &Path, file_name: &str, matches: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();

        if path.is_dir() {
            if path.file_name().is_some_and(|n| n == "build-info") {
                continue;
            }
            collect_matches(&path, file_name, matches)?;
        } else if path.file_name().is_some_and(|n| n == file_name) {
            matches.push(path);
        }
    }

    Ok(())
}
