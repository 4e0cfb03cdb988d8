//! Command-line configuration.
//!
//! The ring is described by `--node NAME[=WEIGHT]` flags, a JSON node file,
//! or both. File entries are applied first, so flags override them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser};
use hashring::{HashRing, RingBuilder, Weight, WeightedNode};
use serde::Deserialize;
use tracing::{info, Level};

use crate::commands::Command;

/// Inspect weighted consistent hash rings.
#[derive(Debug, Parser)]
#[command(name = "hashring-cli", version, about)]
pub struct CliConfig {
    /// Node on the ring, as NAME or NAME=WEIGHT. Repeatable.
    #[arg(short = 'n', long = "node", value_name = "NAME[=WEIGHT]", global = true)]
    pub nodes: Vec<WeightedNode>,

    /// JSON file with either `{"name": weight, ...}` or `["name", ...]`.
    #[arg(long, value_name = "PATH", global = true)]
    pub nodes_file: Option<PathBuf>,

    /// Print reports as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log more (-v info, -vv debug, -vvv trace). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Accepted shapes of the node file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodesFile {
    Weighted(BTreeMap<String, Weight>),
    Names(Vec<String>),
}

impl NodesFile {
    fn into_nodes(self) -> Vec<WeightedNode> {
        match self {
            NodesFile::Weighted(weights) => weights
                .into_iter()
                .map(|(name, weight)| WeightedNode::new(name, weight))
                .collect(),
            NodesFile::Names(names) => names
                .into_iter()
                .map(|name| WeightedNode::new(name, hashring::DEFAULT_WEIGHT))
                .collect(),
        }
    }
}

fn read_nodes_file(path: &Path) -> anyhow::Result<Vec<WeightedNode>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading node file {}", path.display()))?;
    let file: NodesFile = serde_json::from_str(&raw)
        .with_context(|| format!("parsing node file {}", path.display()))?;
    Ok(file.into_nodes())
}

impl CliConfig {
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Node file entries followed by `--node` flags.
    pub fn load_nodes(&self) -> anyhow::Result<Vec<WeightedNode>> {
        let mut nodes = match &self.nodes_file {
            Some(path) => read_nodes_file(path)?,
            None => Vec::new(),
        };
        nodes.extend(self.nodes.iter().cloned());
        Ok(nodes)
    }

    /// Build the initial ring. Later entries for the same name win.
    pub fn build_ring(&self) -> anyhow::Result<HashRing> {
        let ring = self
            .load_nodes()?
            .into_iter()
            .fold(RingBuilder::new(), |builder, node| {
                builder.weighted_node(node.name, node.weight)
            })
            .build();
        info!(
            nodes = ring.node_count(),
            points = ring.point_count(),
            "loaded ring"
        );
        Ok(ring)
    }

    /// Build the ring, run the subcommand and print its report.
    pub fn run(&self) -> anyhow::Result<()> {
        let ring = self.build_ring()?;
        let result = self.command.execute(&ring)?;
        println!("{}", result.render(self.json)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("hashring-cli-{}-{name}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_nodes_and_verbosity() {
        let config = CliConfig::try_parse_from([
            "hashring-cli", "-vv", "--node", "a", "-n", "b=2", "lookup", "test",
        ])
        .unwrap();

        assert_eq!(config.log_level(), Level::DEBUG);
        assert_eq!(
            config.nodes,
            vec![WeightedNode::new("a", 1), WeightedNode::new("b", 2)]
        );

        let ring = config.build_ring().unwrap();
        assert_eq!(ring, HashRing::with_weights([("a", 1), ("b", 2)]));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let config =
            CliConfig::try_parse_from(["hashring-cli", "lookup", "k", "--node", "x", "--json"]).unwrap();
        assert!(config.json);
        assert_eq!(config.log_level(), Level::WARN);
        assert_eq!(config.nodes, vec![WeightedNode::new("x", 1)]);
    }

    #[test]
    fn test_rejects_bad_node_spec() {
        let err = CliConfig::try_parse_from(["hashring-cli", "--node", "a=x", "lookup", "k"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_weighted_nodes_file_with_override() {
        let path = temp_file("weighted.json", r#"{"a": 1, "b": 2, "c": 1}"#);
        let config = CliConfig::try_parse_from([
            "hashring-cli",
            "--nodes-file",
            path.to_str().unwrap(),
            "--node",
            "c=0",
            "lookup",
            "test",
        ])
        .unwrap();

        let ring = config.build_ring().unwrap();
        assert_eq!(ring, HashRing::with_weights([("a", 1), ("b", 2)]));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_names_nodes_file() {
        let path = temp_file("names.json", r#"["a", "b", "c", "a"]"#);
        let config = CliConfig::try_parse_from([
            "hashring-cli",
            "--nodes-file",
            path.to_str().unwrap(),
            "lookup",
            "test",
        ])
        .unwrap();

        assert_eq!(config.build_ring().unwrap(), HashRing::new(["a", "b", "c"]));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_nodes_file() {
        let config = CliConfig::try_parse_from([
            "hashring-cli",
            "--nodes-file",
            "/nonexistent/hashring-nodes.json",
            "lookup",
            "test",
        ])
        .unwrap();

        let err = config.build_ring().unwrap_err();
        assert!(err.to_string().contains("reading node file"));
    }
}
