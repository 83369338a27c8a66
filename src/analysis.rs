//! Analysis assembly: samples × trees × branches.
//!
//! An [`Analysis`] is the fully built form of an [`AnalysisConfig`]. Every
//! enabled sample gets its own set of [`Tree`]s, because the matching policy
//! depends on whether the sample is simulated. Reading events and writing
//! rows belong to the caller: a driver feeds events to
//! [`Tree::evaluate`] or [`Tree::evaluate_batch`] and stores the rows.

use crate::config::{AnalysisConfig, ParallelConfig, SampleConfig, ScorerConfig, TreeConfig};
use crate::error::Result;
use crate::pipeline::{build_tree, construct_exposure_vars, NamedVar};
use crate::record::Event;
use crate::registry::Catalog;
use log::{info, warn};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Named value sequences produced for one event.
pub type Row = BTreeMap<String, Vec<f64>>;

/// Output of one tree for one event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeRow {
    /// One entry per branch.
    pub values: Row,
    /// `livetime` and `pot`.
    pub exposure: Row,
}

impl TreeRow {
    /// Number of values emitted across every branch.
    pub fn len(&self) -> usize {
        self.values.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Built branches and exposure accounting of one configured tree.
#[derive(Debug, Clone)]
pub struct Tree {
    pub name: String,
    pub sim_only: bool,
    branches: Vec<NamedVar>,
    exposure: Vec<NamedVar>,
}

impl Tree {
    pub fn build(catalog: &Catalog, config: &TreeConfig, is_mc: bool) -> Result<Self> {
        Ok(Self {
            name: config.name.clone(),
            sim_only: config.sim_only,
            branches: build_tree(catalog, config, is_mc)?,
            exposure: construct_exposure_vars(catalog, &config.cuts)?,
        })
    }

    pub fn branches(&self) -> &[NamedVar] {
        &self.branches
    }

    pub fn branch_names(&self) -> Vec<&str> {
        self.branches.iter().map(|b| b.name.as_str()).collect()
    }

    pub fn evaluate(&self, event: &Event) -> TreeRow {
        let collect = |vars: &[NamedVar]| -> Row {
            vars.iter()
                .map(|v| (v.name.clone(), v.evaluate(event)))
                .collect()
        };
        TreeRow {
            values: collect(&self.branches),
            exposure: collect(&self.exposure),
        }
    }

    /// Evaluate `events`, preserving their order.
    ///
    /// Batches at or above the configured threshold are split into
    /// `num_threads` chunks evaluated on the rayon thread pool.
    pub fn evaluate_batch(&self, events: &[Event], parallel: &ParallelConfig) -> Vec<TreeRow> {
        if !parallel.parallelize(events.len()) {
            return events.iter().map(|event| self.evaluate(event)).collect();
        }

        let chunk_results: Vec<Vec<TreeRow>> = events
            .par_chunks(parallel.chunk_size(events.len()))
            .map(|chunk| chunk.iter().map(|event| self.evaluate(event)).collect())
            .collect();

        let mut rows = Vec::with_capacity(events.len());
        for chunk in chunk_results {
            rows.extend(chunk);
        }
        rows
    }
}

/// Trees built for one enabled sample.
#[derive(Debug, Clone)]
pub struct SampleSelection {
    pub name: String,
    pub path: String,
    pub is_mc: bool,
    pub trees: Vec<Tree>,
}

impl SampleSelection {
    pub fn build(catalog: &Catalog, sample: &SampleConfig, trees: &[TreeConfig]) -> Result<Self> {
        let mut built = Vec::with_capacity(trees.len());
        for tree in trees {
            if tree.sim_only && !sample.is_mc {
                info!(
                    "Tree '{}' is simulation-only, skipping for sample '{}'",
                    tree.name, sample.name
                );
                continue;
            }
            built.push(Tree::build(catalog, tree, sample.is_mc)?);
        }
        info!("Sample '{}': built {} trees", sample.name, built.len());
        Ok(Self {
            name: sample.name.clone(),
            path: sample.path.clone(),
            is_mc: sample.is_mc,
            trees: built,
        })
    }

    pub fn tree(&self, name: &str) -> Option<&Tree> {
        self.trees.iter().find(|t| t.name == name)
    }
}

/// A fully built analysis.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub output: String,
    pub samples: Vec<SampleSelection>,
    pub parallel: ParallelConfig,
}

impl Analysis {
    /// Build against the built-in vocabulary, applying the configured
    /// scorers first.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        let mut catalog = Catalog::with_defaults()?;
        Self::configure_scorers(&mut catalog, &config.scorers)?;
        Self::build(&catalog, config)
    }

    /// Install the configured scorers into `catalog`.
    pub fn configure_scorers(catalog: &mut Catalog, scorers: &ScorerConfig) -> Result<()> {
        if let Some(primary) = &scorers.primary {
            catalog.set_primary_scorer(primary)?;
        }
        if let Some(pid) = &scorers.pid {
            catalog.set_pid_scorer(pid)?;
        }
        Ok(())
    }

    /// Build every enabled sample. `config.scorers` is not applied; see
    /// [`Analysis::configure_scorers`].
    ///
    /// # Errors
    /// The first configuration error of any tree; nothing is built partially.
    pub fn build(catalog: &Catalog, config: &AnalysisConfig) -> Result<Self> {
        let mut samples = Vec::with_capacity(config.samples.len());
        for sample in &config.samples {
            if sample.disable {
                warn!("Sample '{}' is disabled, skipping", sample.name);
                continue;
            }
            samples.push(SampleSelection::build(catalog, sample, &config.trees)?);
        }
        Ok(Self {
            output: config.general.output.clone(),
            samples,
            parallel: config.parallel.clone(),
        })
    }

    pub fn sample(&self, name: &str) -> Option<&SampleSelection> {
        self.samples.iter().find(|s| s.name == name)
    }
}
