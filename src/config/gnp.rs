use super::traits::ConfigSection;
use crate::error::{GnpError, Result};
use serde::{Deserialize, Serialize};

/// Whether an attribute holds a category index or a real value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    #[serde(alias = "Category")]
    Category,
    #[serde(alias = "Numeric")]
    Numeric,
}

/// Description of one input or output column.
///
/// A labelled category attribute always spans `0..=labels.len() - 1`; the
/// configured `min`/`max` are ignored for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataAttribute {
    pub name: String,
    #[serde(rename = "typename")]
    pub kind: AttributeKind,
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl DataAttribute {
    pub fn numeric(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Numeric,
            min,
            max,
            labels: Vec::new(),
        }
    }

    pub fn category<S: Into<String>>(name: impl Into<String>, labels: Vec<S>) -> Self {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        Self {
            name: name.into(),
            kind: AttributeKind::Category,
            min: 0.0,
            max: labels.len().saturating_sub(1) as f64,
            labels,
        }
    }

    pub fn is_category(&self) -> bool {
        self.kind == AttributeKind::Category
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == AttributeKind::Numeric
    }

    /// Inclusive category range.
    pub fn category_range(&self) -> (i64, i64) {
        if self.labels.is_empty() {
            (self.min as i64, self.max as i64)
        } else {
            (0, self.labels.len() as i64 - 1)
        }
    }

    pub fn numeric_range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn label(&self, category: i64) -> Option<&str> {
        usize::try_from(category)
            .ok()
            .and_then(|i| self.labels.get(i))
            .map(String::as_str)
    }

    fn validate(&self, role: &str) -> Result<()> {
        match self.kind {
            AttributeKind::Category if self.labels.is_empty() => {
                if self.min != 0.0 {
                    return Err(GnpError::Configuration(format!(
                        "{} attribute '{}': minimum of category must be 0",
                        role, self.name
                    )));
                }
                if self.max < 0.0 {
                    return Err(GnpError::Configuration(format!(
                        "{} attribute '{}': maximum of category must be >= 0",
                        role, self.name
                    )));
                }
            }
            AttributeKind::Category => {}
            AttributeKind::Numeric => {
                if !(self.min <= self.max) {
                    return Err(GnpError::Configuration(format!(
                        "{} attribute '{}': min ({}) must not exceed max ({})",
                        role, self.name, self.min, self.max
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Genetic Network Programming parameters: network shape, genetic operator
/// rates and the activation time budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GnpConfig {
    /// Genomes produced by crossover and mutation each generation.
    pub num_genomes: usize,
    /// Best genomes carried over unchanged.
    pub num_elites: usize,
    pub num_category_judgement_nodes: usize,
    pub num_numeric_judgement_nodes: usize,
    pub num_processing_nodes: usize,
    /// Outgoing branches of every judgement node.
    pub num_branches: usize,
    pub crossover_rate: f64,
    pub branch_mutation_rate: f64,
    pub data_source_mutation_rate: f64,
    pub judgement_function_mutation_rate: f64,
    pub output_mutation_rate: f64,
    /// Time budget of one activation.
    pub time_limit: f64,
    pub delay_time_processing_node: f64,
    pub delay_time_judgement_node: f64,
    pub input_attributes: Vec<DataAttribute>,
    pub output_attributes: Vec<DataAttribute>,
}

impl Default for GnpConfig {
    fn default() -> Self {
        Self {
            num_genomes: 100,
            num_elites: 1,
            num_category_judgement_nodes: 0,
            num_numeric_judgement_nodes: 10,
            num_processing_nodes: 10,
            num_branches: 2,
            crossover_rate: 0.1,
            branch_mutation_rate: 0.01,
            data_source_mutation_rate: 0.01,
            judgement_function_mutation_rate: 0.01,
            output_mutation_rate: 0.01,
            time_limit: 10.0,
            delay_time_processing_node: 10.0,
            delay_time_judgement_node: 1.0,
            input_attributes: Vec::new(),
            output_attributes: Vec::new(),
        }
    }
}

impl GnpConfig {
    /// Genomes alive in every generation.
    pub fn population_size(&self) -> usize {
        self.num_genomes + self.num_elites
    }

    /// Nodes per genome, the initial node included.
    pub fn num_nodes(&self) -> usize {
        1 + self.num_category_judgement_nodes
            + self.num_numeric_judgement_nodes
            + self.num_processing_nodes
    }

    pub fn num_crossover_offspring(&self) -> usize {
        (self.num_genomes as f64 * self.crossover_rate) as usize
    }
}

fn check_rate(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GnpError::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}

impl ConfigSection for GnpConfig {
    fn section_name() -> &'static str {
        "gnp"
    }

    fn validate(&self) -> Result<()> {
        if self.input_attributes.is_empty() {
            return Err(GnpError::Configuration(
                "At least one input attribute is required".to_string(),
            ));
        }
        if self.output_attributes.is_empty() {
            return Err(GnpError::Configuration(
                "At least one output attribute is required".to_string(),
            ));
        }
        for attr in &self.input_attributes {
            attr.validate("Input")?;
        }
        for attr in &self.output_attributes {
            attr.validate("Output")?;
        }

        if self.num_genomes < 1 {
            return Err(GnpError::Configuration(
                "num_genomes must be at least 1".to_string(),
            ));
        }
        if self.num_processing_nodes < 1 {
            return Err(GnpError::Configuration(
                "num_processing_nodes must be at least 1".to_string(),
            ));
        }
        if self.num_branches < 1 {
            return Err(GnpError::Configuration(
                "num_branches must be at least 1".to_string(),
            ));
        }
        // Every non-initial node needs a target other than itself and node 0.
        if self.num_nodes() < 3 {
            return Err(GnpError::Configuration(format!(
                "A genome needs at least 3 nodes, configuration yields {}",
                self.num_nodes()
            )));
        }
        if self.num_category_judgement_nodes > 0
            && !self.input_attributes.iter().any(DataAttribute::is_category)
        {
            return Err(GnpError::Configuration(
                "Category judgement nodes require a category input attribute".to_string(),
            ));
        }
        if self.num_numeric_judgement_nodes > 0
            && !self.input_attributes.iter().any(DataAttribute::is_numeric)
        {
            return Err(GnpError::Configuration(
                "Numeric judgement nodes require a numeric input attribute".to_string(),
            ));
        }

        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("branch_mutation_rate", self.branch_mutation_rate)?;
        check_rate("data_source_mutation_rate", self.data_source_mutation_rate)?;
        check_rate(
            "judgement_function_mutation_rate",
            self.judgement_function_mutation_rate,
        )?;
        check_rate("output_mutation_rate", self.output_mutation_rate)?;

        if !(self.time_limit >= 0.0) {
            return Err(GnpError::Configuration(
                "time_limit must be non-negative".to_string(),
            ));
        }
        // Zero delays let a judgement cycle run forever.
        if !(self.delay_time_processing_node > 0.0) || !(self.delay_time_judgement_node > 0.0) {
            return Err(GnpError::Configuration(
                "Node delay times must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
