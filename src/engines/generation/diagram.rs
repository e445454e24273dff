use super::node::{NodeGene, NodeKind};
use crate::config::{DataAttribute, GnpConfig};
use crate::error::{GnpError, Result};
use std::fmt::Write;

/// Graphviz source for a node network.
///
/// Nodes are grouped by kind (initial, processing, category judgement,
/// numeric judgement), each followed by its outgoing edges.
pub fn render_dot(genes: &[NodeGene], config: &GnpConfig) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "digraph G")?;
    writeln!(out, "{{")?;
    writeln!(out, "\tgraph [];")?;
    writeln!(out, "\tnode [shape=circle, style=filled, fixedsize=true];")?;
    writeln!(out, "\tedge [penwidth=1, style=solid];")?;

    for gene in genes {
        if let NodeKind::Initial { target } = &gene.kind {
            writeln!(out, "\t{}[shape=doublecircle, fillcolor=lightpink];", gene.index)?;
            writeln!(out, "\t{}->{};", gene.index, target)?;
        }
    }

    for gene in genes {
        if let NodeKind::Processing { target, .. } = &gene.kind {
            writeln!(out, "\t{}[shape=doublecircle, fillcolor=lightblue];", gene.index)?;
            writeln!(out, "\t{}->{};", gene.index, target)?;
        }
    }

    for gene in genes {
        if let NodeKind::CategoryJudgement {
            source,
            targets,
            branches,
        } = &gene.kind
        {
            let attribute = input_attribute(config, *source, gene)?;
            writeln!(out, "\t{}[fillcolor=lightyellow];", gene.index)?;
            for (category, branch) in branches {
                let target = targets.get(*branch).ok_or_else(|| {
                    GnpError::Serialization(format!(
                        "Node {} has no target for branch {}",
                        gene.index, branch
                    ))
                })?;
                let label = match attribute.label(*category) {
                    Some(text) => format!("{} is {}", attribute.name, text),
                    None => format!("{} is {}", attribute.name, category),
                };
                writeln!(out, "\t{}->{}[label=\"{}\"];", gene.index, target, label)?;
            }
        }
    }

    for gene in genes {
        if let NodeKind::NumericJudgement {
            source,
            targets,
            thresholds,
        } = &gene.kind
        {
            let name = &input_attribute(config, *source, gene)?.name;
            writeln!(out, "\t{}[fillcolor=lightcyan];", gene.index)?;
            for (i, target) in targets.iter().enumerate() {
                let label = match (i.checked_sub(1).and_then(|j| thresholds.get(j)), thresholds.get(i)) {
                    (None, Some(upper)) => format!("{} < {:.2}", name, upper),
                    (Some(lower), Some(upper)) => format!("{:.2} < {} < {:.2}", lower, name, upper),
                    (Some(lower), None) => format!("{:.2} < {}", lower, name),
                    (None, None) => name.clone(),
                };
                writeln!(out, "\t{}->{}[label=\"{}\"];", gene.index, target, label)?;
            }
        }
    }

    writeln!(out, "}}")?;
    Ok(out)
}

fn input_attribute<'c>(
    config: &'c GnpConfig,
    source: usize,
    gene: &NodeGene,
) -> Result<&'c DataAttribute> {
    config.input_attributes.get(source).ok_or_else(|| {
        GnpError::Serialization(format!(
            "Node {} reads undefined input attribute {}",
            gene.index, source
        ))
    })
}
