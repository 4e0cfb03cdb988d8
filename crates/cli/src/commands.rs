//! Subcommands and their reports.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::Context;
use clap::Subcommand;
use hashring::{HashRing, Token, Weight, WeightedNode};
use replication::{BestEffortStrategy, ReplicationStrategy, SimpleStrategy};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the node (or replica set) each key routes to.
    Lookup {
        #[arg(required = true)]
        keys: Vec<String>,

        /// Return this many distinct nodes per key, primary first.
        #[arg(short, long)]
        replicas: Option<usize>,

        /// With --replicas, settle for fewer nodes on a small ring.
        #[arg(long, requires = "replicas")]
        best_effort: bool,
    },

    /// Route synthetic keys and compare each node's share to its weight.
    Distribution {
        #[arg(long, default_value_t = 100_000, value_parser = clap::value_parser!(u64).range(1..))]
        samples: u64,

        /// Sample keys are PREFIX0, PREFIX1, ...
        #[arg(long, default_value = "key-")]
        prefix: String,
    },

    /// Apply membership changes and report which sample keys move.
    Rebalance {
        #[arg(long = "add", value_name = "NAME[=WEIGHT]")]
        add: Vec<WeightedNode>,

        #[arg(long = "remove", value_name = "NAME")]
        remove: Vec<String>,

        #[arg(long = "reweight", value_name = "NAME=WEIGHT")]
        reweight: Vec<WeightedNode>,

        #[arg(long, default_value_t = 100_000, value_parser = clap::value_parser!(u64).range(1..))]
        samples: u64,

        #[arg(long, default_value = "key-")]
        prefix: String,
    },
}

/// Routing of a single key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub key: String,
    pub token: u32,
    /// Index of the chosen point, `None` on an empty ring.
    pub position: Option<usize>,
    /// Primary first; empty on an empty ring.
    pub nodes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeShare {
    pub node: String,
    pub weight: Weight,
    pub keys: u64,
    pub observed: f64,
    pub expected: f64,
    pub ownership: f64,
}

/// Number of sample keys moving between one pair of owners.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flow {
    pub from: Option<String>,
    pub to: Option<String>,
    pub keys: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Lookup {
        routes: Vec<Route>,
    },
    Distribution {
        samples: u64,
        points: usize,
        nodes: Vec<NodeShare>,
    },
    Rebalance {
        samples: u64,
        nodes_before: usize,
        nodes_after: usize,
        moved: u64,
        flows: Vec<Flow>,
    },
}

fn sample_keys(prefix: &str, samples: u64) -> impl Iterator<Item = String> + '_ {
    (0..samples).map(move |i| format!("{prefix}{i}"))
}

fn share(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

impl Command {
    /// Run against `ring`. The ring itself is never modified.
    pub fn execute(&self, ring: &HashRing) -> anyhow::Result<CommandResult> {
        match self {
            Command::Lookup {
                keys,
                replicas,
                best_effort,
            } => lookup(ring, keys, *replicas, *best_effort),
            Command::Distribution { samples, prefix } => Ok(distribution(ring, *samples, prefix)),
            Command::Rebalance {
                add,
                remove,
                reweight,
                samples,
                prefix,
            } => Ok(rebalance(ring, add, remove, reweight, *samples, prefix)),
        }
    }
}

fn lookup(
    ring: &HashRing,
    keys: &[String],
    replicas: Option<usize>,
    best_effort: bool,
) -> anyhow::Result<CommandResult> {
    let strategy: Option<Box<dyn ReplicationStrategy>> = match (replicas, best_effort) {
        (None, _) => None,
        (Some(n), false) => Some(Box::new(SimpleStrategy::new(n))),
        (Some(n), true) => Some(Box::new(BestEffortStrategy::new(n))),
    };

    let mut routes = Vec::with_capacity(keys.len());
    for key in keys {
        let nodes = match &strategy {
            Some(strategy) => strategy
                .replicas_for_key(ring, key)
                .with_context(|| format!("placing replicas for {key:?}"))?
                .all()
                .map(str::to_owned)
                .collect(),
            None => ring.get_node(key).map(str::to_owned).into_iter().collect(),
        };
        routes.push(Route {
            key: key.clone(),
            token: Token::from_key(key).0,
            position: ring.get_node_pos(key),
            nodes,
        });
    }
    Ok(CommandResult::Lookup { routes })
}

fn distribution(ring: &HashRing, samples: u64, prefix: &str) -> CommandResult {
    let mut counts: BTreeMap<&str, u64> = ring.nodes().map(|(name, _)| (name, 0)).collect();
    for key in sample_keys(prefix, samples) {
        if let Some(node) = ring.get_node(&key) {
            *counts.entry(node).or_default() += 1;
        }
    }

    let ownership = ring.ownership();
    let total_weight = ring.total_weight();
    let nodes = ring
        .nodes()
        .map(|(name, weight)| {
            let keys = counts.get(name).copied().unwrap_or_default();
            NodeShare {
                node: name.to_owned(),
                weight,
                keys,
                observed: share(keys, samples),
                expected: share(u64::from(weight), total_weight),
                ownership: ownership.get(name).copied().unwrap_or_default(),
            }
        })
        .collect();

    info!(samples, nodes = ring.node_count(), "sampled distribution");
    CommandResult::Distribution {
        samples,
        points: ring.point_count(),
        nodes,
    }
}

fn rebalance(
    ring: &HashRing,
    add: &[WeightedNode],
    remove: &[String],
    reweight: &[WeightedNode],
    samples: u64,
    prefix: &str,
) -> CommandResult {
    let mut next = ring.clone();
    for name in remove {
        next = next.remove_node(name);
    }
    for node in reweight {
        next = next.update_weighted_node(node.name.as_str(), node.weight);
    }
    for node in add {
        next = next.add_weighted_node(&node.name, node.weight);
    }
    debug!(
        before = ring.node_count(),
        after = next.node_count(),
        "applied membership changes"
    );

    let keys: Vec<String> = sample_keys(prefix, samples).collect();
    let moves = HashRing::diff(ring, &next, keys.iter().map(String::as_str));

    let mut flows: BTreeMap<(Option<&str>, Option<&str>), u64> = BTreeMap::new();
    for moved in &moves {
        *flows.entry((moved.from, moved.to)).or_default() += 1;
    }

    CommandResult::Rebalance {
        samples,
        nodes_before: ring.node_count(),
        nodes_after: next.node_count(),
        moved: moves.len() as u64,
        flows: flows
            .into_iter()
            .map(|((from, to), keys)| Flow {
                from: from.map(str::to_owned),
                to: to.map(str::to_owned),
                keys,
            })
            .collect(),
    }
}

impl CommandResult {
    pub fn render(&self, json: bool) -> anyhow::Result<String> {
        if json {
            serde_json::to_string_pretty(self).context("serializing report")
        } else {
            Ok(self.to_string())
        }
    }
}

fn or_dash(node: &Option<String>) -> &str {
    node.as_deref().unwrap_or("-")
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Lookup { routes } => {
                for (i, route) in routes.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    let nodes = if route.nodes.is_empty() {
                        "-".to_owned()
                    } else {
                        route.nodes.join(", ")
                    };
                    write!(f, "{}\t{:#010x}\t{}", route.key, route.token, nodes)?;
                }
                Ok(())
            }
            CommandResult::Distribution {
                samples,
                points,
                nodes,
            } => {
                write!(f, "{samples} keys over {} nodes, {points} points", nodes.len())?;
                for node in nodes {
                    write!(
                        f,
                        "\n{:<16} w={:<4} keys={:<8} observed={:>6.2}% expected={:>6.2}% owned={:>6.2}%",
                        node.node,
                        node.weight,
                        node.keys,
                        node.observed * 100.0,
                        node.expected * 100.0,
                        node.ownership * 100.0,
                    )?;
                }
                Ok(())
            }
            CommandResult::Rebalance {
                samples,
                nodes_before,
                nodes_after,
                moved,
                flows,
            } => {
                write!(
                    f,
                    "{nodes_before} -> {nodes_after} nodes: {moved} of {samples} keys moved ({:.2}%)",
                    share(*moved, *samples) * 100.0
                )?;
                for flow in flows {
                    write!(f, "\n{} -> {}\t{}", or_dash(&flow.from), or_dash(&flow.to), flow.keys)?;
                }
                Ok(())
            }
        }
    }
}
