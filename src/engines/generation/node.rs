use super::operators::{random_category, random_numeric, random_target, should_mutate};
use crate::config::GnpConfig;
use crate::error::{GnpError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a node does when the activation reaches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Entry point; visited once per activation.
    Initial { target: usize },
    /// Emits `value` (one entry per output attribute) and moves on.
    Processing { target: usize, value: Vec<f64> },
    /// Branches on the category found at `input[source]`.
    CategoryJudgement {
        source: usize,
        targets: Vec<usize>,
        branches: BTreeMap<i64, usize>,
    },
    /// Branches on where `input[source]` falls among sorted `thresholds`.
    NumericJudgement {
        source: usize,
        targets: Vec<usize>,
        thresholds: Vec<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeGene {
    pub index: usize,
    /// Time consumed from the activation budget when this node runs.
    pub delay: f64,
    pub kind: NodeKind,
}

impl NodeGene {
    pub fn initial() -> Self {
        Self {
            index: 0,
            delay: 0.0,
            kind: NodeKind::Initial { target: 0 },
        }
    }

    pub fn processing(index: usize, config: &GnpConfig) -> Self {
        Self {
            index,
            delay: config.delay_time_processing_node,
            kind: NodeKind::Processing {
                target: 0,
                value: Vec::new(),
            },
        }
    }

    pub fn category_judgement(index: usize, config: &GnpConfig) -> Self {
        Self {
            index,
            delay: config.delay_time_judgement_node,
            kind: NodeKind::CategoryJudgement {
                source: 0,
                targets: Vec::new(),
                branches: BTreeMap::new(),
            },
        }
    }

    pub fn numeric_judgement(index: usize, config: &GnpConfig) -> Self {
        Self {
            index,
            delay: config.delay_time_judgement_node,
            kind: NodeKind::NumericJudgement {
                source: 0,
                targets: Vec::new(),
                thresholds: Vec::new(),
            },
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Initial { .. } => "initial",
            NodeKind::Processing { .. } => "processing",
            NodeKind::CategoryJudgement { .. } => "category_judgement",
            NodeKind::NumericJudgement { .. } => "numeric_judgement",
        }
    }

    /// Emitted values, for processing nodes only.
    pub fn output(&self) -> Option<&[f64]> {
        match &self.kind {
            NodeKind::Processing { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Index of the node the activation moves to after this one.
    pub fn next(&self, input: &[f64]) -> Result<usize> {
        match &self.kind {
            NodeKind::Initial { target } | NodeKind::Processing { target, .. } => Ok(*target),
            NodeKind::CategoryJudgement {
                source,
                targets,
                branches,
            } => {
                let value = self.read(input, *source)?;
                let category = value as i64;
                let branch = branches.get(&category).ok_or_else(|| {
                    GnpError::Activation(format!(
                        "Node {}: category {} of input {} has no branch",
                        self.index, category, source
                    ))
                })?;
                self.branch_target(targets, *branch)
            }
            NodeKind::NumericJudgement {
                source,
                targets,
                thresholds,
            } => {
                let value = self.read(input, *source)?;
                let branch = thresholds
                    .iter()
                    .position(|threshold| value < *threshold)
                    .unwrap_or(thresholds.len());
                self.branch_target(targets, branch)
            }
        }
    }

    fn read(&self, input: &[f64], source: usize) -> Result<f64> {
        input.get(source).copied().ok_or_else(|| {
            GnpError::Activation(format!(
                "Node {} reads input {} but the input has {} values",
                self.index,
                source,
                input.len()
            ))
        })
    }

    fn branch_target(&self, targets: &[usize], branch: usize) -> Result<usize> {
        targets.get(branch).copied().ok_or_else(|| {
            GnpError::Activation(format!(
                "Node {}: branch {} is out of range ({} targets)",
                self.index,
                branch,
                targets.len()
            ))
        })
    }

    /// Redraws parts of this gene. With `force` every part is redrawn, which
    /// is how fresh genomes are initialized.
    pub fn mutate<R: Rng>(&mut self, rng: &mut R, config: &GnpConfig, force: bool) {
        let index = self.index;
        let num_nodes = config.num_nodes();

        match &mut self.kind {
            NodeKind::Initial { target } => {
                if should_mutate(rng, config.branch_mutation_rate, force) {
                    *target = random_target(rng, num_nodes, index);
                }
            }
            NodeKind::Processing { target, value } => {
                if should_mutate(rng, config.branch_mutation_rate, force) {
                    *target = random_target(rng, num_nodes, index);
                }

                value.resize(config.output_attributes.len(), 0.0);
                for (slot, attribute) in value.iter_mut().zip(&config.output_attributes) {
                    if should_mutate(rng, config.output_mutation_rate, force) {
                        *slot = if attribute.is_category() {
                            let (min, max) = attribute.category_range();
                            random_category(rng, min, max) as f64
                        } else {
                            let (min, max) = attribute.numeric_range();
                            random_numeric(rng, min, max)
                        };
                    }
                }
            }
            NodeKind::CategoryJudgement {
                source,
                targets,
                branches,
            } => {
                mutate_targets(rng, config, targets, num_nodes, index, force);

                let mut reference_changed = false;
                if should_mutate(rng, config.data_source_mutation_rate, force) {
                    if let Some(candidate) = pick_source(rng, config, true) {
                        *source = candidate;
                        reference_changed = true;
                    }
                }

                let Some(attribute) = config.input_attributes.get(*source) else {
                    return;
                };
                let (min, max) = attribute.category_range();
                if force || reference_changed {
                    branches.clear();
                }
                for category in min..=max {
                    if force
                        || reference_changed
                        || should_mutate(rng, config.judgement_function_mutation_rate, false)
                    {
                        branches.insert(category, rng.gen_range(0..config.num_branches));
                    }
                }
            }
            NodeKind::NumericJudgement {
                source,
                targets,
                thresholds,
            } => {
                mutate_targets(rng, config, targets, num_nodes, index, force);

                let mut reference_changed = false;
                if should_mutate(rng, config.data_source_mutation_rate, force) {
                    if let Some(candidate) = pick_source(rng, config, false) {
                        *source = candidate;
                        reference_changed = true;
                    }
                }

                if force
                    || reference_changed
                    || should_mutate(rng, config.judgement_function_mutation_rate, false)
                {
                    if let Some(attribute) = config.input_attributes.get(*source) {
                        let (min, max) = attribute.numeric_range();
                        thresholds.clear();
                        thresholds.extend(
                            (0..config.num_branches - 1).map(|_| random_numeric(rng, min, max)),
                        );
                    }
                }
                thresholds.sort_by(|a, b| a.total_cmp(b));
            }
        }
    }

    /// Structural consistency with `config`, given this gene sits at `position`.
    pub fn check(&self, position: usize, config: &GnpConfig) -> Result<()> {
        let num_nodes = config.num_nodes();
        let fail = |reason: String| {
            Err(GnpError::Serialization(format!(
                "Node {} ({}): {}",
                position,
                self.kind_name(),
                reason
            )))
        };

        if self.index != position {
            return fail(format!("stored index {} does not match position", self.index));
        }

        let check_target = |target: usize| target != 0 && target < num_nodes && target != position;

        match &self.kind {
            NodeKind::Initial { target } => {
                if !check_target(*target) {
                    return fail(format!("invalid target {}", target));
                }
            }
            NodeKind::Processing { target, value } => {
                if !check_target(*target) {
                    return fail(format!("invalid target {}", target));
                }
                if value.len() != config.output_attributes.len() {
                    return fail(format!(
                        "emits {} values but {} outputs are configured",
                        value.len(),
                        config.output_attributes.len()
                    ));
                }
            }
            NodeKind::CategoryJudgement {
                source, targets, ..
            }
            | NodeKind::NumericJudgement {
                source, targets, ..
            } => {
                if targets.len() != config.num_branches {
                    return fail(format!(
                        "has {} branches, expected {}",
                        targets.len(),
                        config.num_branches
                    ));
                }
                if let Some(target) = targets.iter().find(|t| !check_target(**t)) {
                    return fail(format!("invalid target {}", target));
                }
                let wants_category = matches!(self.kind, NodeKind::CategoryJudgement { .. });
                match config.input_attributes.get(*source) {
                    Some(attr) if attr.is_category() == wants_category => {}
                    _ => return fail(format!("invalid input source {}", source)),
                }
            }
        }
        Ok(())
    }
}

fn mutate_targets<R: Rng>(
    rng: &mut R,
    config: &GnpConfig,
    targets: &mut Vec<usize>,
    num_nodes: usize,
    index: usize,
    force: bool,
) {
    targets.resize(config.num_branches, 0);
    for target in targets.iter_mut() {
        if should_mutate(rng, config.branch_mutation_rate, force) {
            *target = random_target(rng, num_nodes, index);
        }
    }
}

fn pick_source<R: Rng>(rng: &mut R, config: &GnpConfig, category: bool) -> Option<usize> {
    let candidates: Vec<usize> = config
        .input_attributes
        .iter()
        .enumerate()
        .filter(|(_, attr)| attr.is_category() == category)
        .map(|(i, _)| i)
        .collect();
    candidates.choose(rng).copied()
}
