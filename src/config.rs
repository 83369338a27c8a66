//! Analysis configuration.
//!
//! An analysis is declared in YAML: global settings, the samples to run
//! over, and the trees to fill. Each tree lists its cuts, its branches
//! (one named measurement each) and an iteration mode.
//!
//! ```yaml
//! general:
//!   output: selection.root
//! scorers:
//!   primary: lax_primary_classification
//! samples:
//!   - name: bnb_mc
//!     path: /data/bnb_mc/*.flat.root
//!     is_mc: true
//! trees:
//!   - name: numu_cc
//!     mode: reco
//!     cuts:
//!       - { name: fiducial_cut, type: reco }
//!       - { name: "!cosmic", type: true }
//!       - { name: beam_quality_cut, type: spill, decrements_exposure: true }
//!     branches:
//!       - { name: visible_energy, type: both }
//!       - { name: ke, type: reco_particle, selector: leading_muon }
//! ```
//!
//! Category and mode keywords may be written bare: YAML reads `true` as a
//! boolean, which is accepted and mapped back to the keyword.

use crate::error::{Result, SelectionError};
use crate::record::Universe;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

/// Marker stripped from a cut name to negate the cut.
pub const NEGATION_MARKER: char = '!';

/// One configured cut.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CutConfig {
    /// Registered cut name, optionally prefixed with `!`.
    pub name: String,
    #[serde(default, alias = "type", deserialize_with = "optional_keyword")]
    pub category: Option<String>,
    #[serde(default)]
    pub parameters: Vec<f64>,
    /// Cut reduces the recorded exposure instead of rejecting candidates.
    #[serde(default)]
    pub decrements_exposure: bool,
}

impl CutConfig {
    pub fn new(name: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            category: Some(category.to_string()),
            ..Default::default()
        }
    }

    pub fn with_parameters(mut self, parameters: &[f64]) -> Self {
        self.parameters = parameters.to_vec();
        self
    }

    pub fn decrementing_exposure(mut self) -> Self {
        self.decrements_exposure = true;
        self
    }

    /// Registered name and whether the cut is negated.
    pub fn base_name(&self) -> (&str, bool) {
        match self.name.strip_prefix(NEGATION_MARKER) {
            Some(stripped) => (stripped, true),
            None => (self.name.as_str(), false),
        }
    }

    /// Parsed category.
    ///
    /// # Errors
    /// [`SelectionError::MissingCategory`] when absent and
    /// [`SelectionError::UnknownCategory`] when not a known keyword.
    pub fn category(&self) -> Result<Category> {
        let keyword = self
            .category
            .as_deref()
            .ok_or_else(|| SelectionError::MissingCategory(format!("cut {}", self.name)))?;
        Category::parse(keyword, &format!("cut {}", self.name))
    }
}

/// One configured measurement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BranchConfig {
    pub name: String,
    #[serde(default, alias = "type", deserialize_with = "optional_keyword")]
    pub category: Option<String>,
    #[serde(default)]
    pub parameters: Vec<f64>,
    /// Selector reducing a particle-level measurement to one particle.
    #[serde(default)]
    pub selector: Option<String>,
}

impl BranchConfig {
    pub fn new(name: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            category: Some(category.to_string()),
            ..Default::default()
        }
    }

    pub fn with_parameters(mut self, parameters: &[f64]) -> Self {
        self.parameters = parameters.to_vec();
        self
    }

    pub fn with_selector(mut self, selector: &str) -> Self {
        self.selector = Some(selector.to_string());
        self
    }

    pub fn category(&self) -> Result<Category> {
        let keyword = self
            .category
            .as_deref()
            .ok_or_else(|| SelectionError::MissingCategory(format!("variable {}", self.name)))?;
        Category::parse(keyword, &format!("variable {}", self.name))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TreeConfig {
    pub name: String,
    #[serde(deserialize_with = "keyword")]
    pub mode: String,
    /// Only filled for simulated samples.
    #[serde(default)]
    pub sim_only: bool,
    #[serde(default)]
    pub cuts: Vec<CutConfig>,
    #[serde(default)]
    pub branches: Vec<BranchConfig>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleConfig {
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default, alias = "ismc")]
    pub is_mc: bool,
    #[serde(default)]
    pub disable: bool,
}

/// Names of reco particle variables used as primary and PID classifiers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScorerConfig {
    #[serde(default)]
    pub primary: Option<String>,
    #[serde(default)]
    pub pid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub output: String,
}

/// Parallel batch evaluation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Number of chunks a parallel batch is split into; 1 evaluates serially
    pub num_threads: usize,
    /// Evaluate the events of a batch in parallel
    pub enable_event_parallelism: bool,
    /// Minimum batch size for event-level parallelism
    pub min_batch_size_for_parallelism: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_threads: rayon::current_num_threads(),
            enable_event_parallelism: true,
            min_batch_size_for_parallelism: 100,
        }
    }
}

impl ParallelConfig {
    /// Whether a batch of `batch_size` events should be split across threads.
    pub fn parallelize(&self, batch_size: usize) -> bool {
        self.enable_event_parallelism
            && self.num_threads > 1
            && batch_size >= self.min_batch_size_for_parallelism
    }

    /// Events per chunk when a batch of `batch_size` is split across
    /// `num_threads` workers.
    pub fn chunk_size(&self, batch_size: usize) -> usize {
        let workers = self.num_threads.max(1);
        std::cmp::max(1, (batch_size + workers - 1) / workers)
    }
}

/// Complete analysis declaration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scorers: ScorerConfig,
    #[serde(default, alias = "sample")]
    pub samples: Vec<SampleConfig>,
    #[serde(default, alias = "tree")]
    pub trees: Vec<TreeConfig>,
    #[serde(default)]
    pub parallel: ParallelConfig,
}

impl AnalysisConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}

/// Iteration mode of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Walk truth interactions.
    True,
    /// Walk reconstructed interactions.
    Reco,
    /// One value per event.
    Event,
}

impl Mode {
    /// Parse a mode keyword for the measurement named `variable`.
    pub fn parse(mode: &str, variable: &str) -> Result<Self> {
        match mode {
            "true" => Ok(Mode::True),
            "reco" => Ok(Mode::Reco),
            "event" => Ok(Mode::Event),
            _ => Err(SelectionError::InvalidMode {
                mode: mode.to_string(),
                variable: variable.to_string(),
            }),
        }
    }

    /// Primary universe walked in this mode; `None` for event mode.
    pub fn universe(self) -> Option<Universe> {
        match self {
            Mode::True => Some(Universe::Truth),
            Mode::Reco => Some(Universe::Reco),
            Mode::Event => None,
        }
    }
}

/// Entity category keyword of a cut or measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    True,
    Reco,
    TrueParticle,
    RecoParticle,
    Event,
    Spill,
    Mctruth,
    /// Expands into `True` and `Reco`.
    Both,
    /// Expands into `TrueParticle` and `RecoParticle`.
    BothParticle,
}

impl Category {
    pub fn parse(keyword: &str, context: &str) -> Result<Self> {
        match keyword {
            "true" => Ok(Category::True),
            "reco" => Ok(Category::Reco),
            "true_particle" => Ok(Category::TrueParticle),
            "reco_particle" => Ok(Category::RecoParticle),
            "event" => Ok(Category::Event),
            "spill" => Ok(Category::Spill),
            "mctruth" => Ok(Category::Mctruth),
            "both" => Ok(Category::Both),
            "both_particle" => Ok(Category::BothParticle),
            _ => Err(SelectionError::UnknownCategory {
                category: keyword.to_string(),
                context: context.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::True => "true",
            Category::Reco => "reco",
            Category::TrueParticle => "true_particle",
            Category::RecoParticle => "reco_particle",
            Category::Event => "event",
            Category::Spill => "spill",
            Category::Mctruth => "mctruth",
            Category::Both => "both",
            Category::BothParticle => "both_particle",
        }
    }

    /// Interaction category of `universe`.
    pub fn interaction(universe: Universe) -> Self {
        match universe {
            Universe::Truth => Category::True,
            Universe::Reco => Category::Reco,
        }
    }

    /// Particle category of `universe`.
    pub fn particle(universe: Universe) -> Self {
        match universe {
            Universe::Truth => Category::TrueParticle,
            Universe::Reco => Category::RecoParticle,
        }
    }

    /// Concrete categories this keyword stands for.
    pub fn expand(self) -> Vec<Category> {
        match self {
            Category::Both => vec![Category::True, Category::Reco],
            Category::BothParticle => vec![Category::TrueParticle, Category::RecoParticle],
            other => vec![other],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Keyword {
    Text(String),
    Flag(bool),
}

impl From<Keyword> for String {
    fn from(keyword: Keyword) -> Self {
        match keyword {
            Keyword::Text(text) => text,
            Keyword::Flag(flag) => flag.to_string(),
        }
    }
}

fn keyword<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Keyword::deserialize(deserializer).map(String::from)
}

fn optional_keyword<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(Option::<Keyword>::deserialize(deserializer)?.map(String::from))
}
