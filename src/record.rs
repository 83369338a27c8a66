//! Event record data model.
//!
//! An [`Event`] owns two parallel interaction collections, truth and
//! reconstructed, which cross-reference each other through optional
//! at-most-one matches. Records are materialized by an external source and
//! are read-only to the engine.
//!
//! Interaction matches are *indices* into the opposite collection. Particle
//! matches are *ids* into the opposite particle universe, flattened across
//! every interaction of the event.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Particle species codes used by the `pid` field and by PID scorers.
pub mod species {
    pub const PHOTON: u16 = 0;
    pub const ELECTRON: u16 = 1;
    pub const MUON: u16 = 2;
    pub const PION: u16 = 3;
    pub const PROTON: u16 = 4;
}

/// Side of the parallel collections an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Universe {
    Truth,
    Reco,
}

impl Universe {
    pub fn opposite(self) -> Self {
        match self {
            Universe::Truth => Universe::Reco,
            Universe::Reco => Universe::Truth,
        }
    }

    /// Name prefix used when registering functions for this universe.
    pub fn prefix(self) -> &'static str {
        match self {
            Universe::Truth => "true",
            Universe::Reco => "reco",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    pub run: u32,
    pub subrun: u32,
    pub event: u32,
    pub is_mc: bool,
    /// Simulated exposure is reported once, on the first event of a subrun.
    pub first_in_subrun: bool,
    pub n_generated: u64,
    pub pot: f64,
    pub n_offbeam_spills: u32,
    pub global_trigger_time: f64,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            run: 0,
            subrun: 0,
            event: 0,
            is_mc: false,
            first_in_subrun: false,
            n_generated: 0,
            pot: 0.0,
            n_offbeam_spills: 0,
            global_trigger_time: f64::NAN,
        }
    }
}

/// Beam-spill quality record. Present for real data only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Spill {
    pub tor860: f64,
    pub tor875: f64,
    pub lm875a: f64,
    pub lm875b: f64,
    pub lm875c: f64,
    pub horn_current: f64,
}

/// Parent neutrino of a truth interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Neutrino {
    pub id: i64,
    pub energy: f64,
    pub pdg: i32,
    pub current_type: i32,
    pub interaction_mode: i32,
    pub vertex: [f64; 3],
}

impl Default for Neutrino {
    fn default() -> Self {
        Self {
            id: 0,
            energy: f64::NAN,
            pdg: 0,
            current_type: -1,
            interaction_mode: -1,
            vertex: [f64::NAN; 3],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Particle {
    pub id: i64,
    pub pid: u16,
    pub is_primary: bool,
    pub ke: f64,
    pub is_contained: bool,
    pub start_point: [f64; 3],
    pub end_point: [f64; 3],
    pub momentum: [f64; 3],
    pub pid_scores: [f64; 5],
    pub primary_scores: [f64; 2],
    pub match_ids: Vec<i64>,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            id: 0,
            pid: species::PHOTON,
            is_primary: false,
            ke: 0.0,
            is_contained: false,
            start_point: [f64::NAN; 3],
            end_point: [f64::NAN; 3],
            momentum: [0.0; 3],
            pid_scores: [0.0; 5],
            primary_scores: [0.0; 2],
            match_ids: Vec::new(),
        }
    }
}

impl Particle {
    /// Id of the matched particle in the opposite universe, if any.
    pub fn match_id(&self) -> Option<i64> {
        self.match_ids.first().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interaction {
    pub id: i64,
    pub vertex: [f64; 3],
    pub is_fiducial: bool,
    pub is_contained: bool,
    pub is_flash_matched: bool,
    pub flash_time: f64,
    /// Index into [`Event::neutrinos`]; negative for cosmics and reco.
    pub nu_id: i64,
    pub current_type: i32,
    pub particles: Vec<Particle>,
    pub match_ids: Vec<i64>,
}

impl Default for Interaction {
    fn default() -> Self {
        Self {
            id: 0,
            vertex: [f64::NAN; 3],
            is_fiducial: false,
            is_contained: false,
            is_flash_matched: false,
            flash_time: f64::NAN,
            nu_id: -1,
            current_type: -1,
            particles: Vec::new(),
            match_ids: Vec::new(),
        }
    }
}

impl Interaction {
    /// Index of the matched interaction in the opposite collection.
    ///
    /// Only the first candidate is consulted. A negative id reads as no match.
    pub fn match_index(&self) -> Option<usize> {
        self.match_ids
            .first()
            .and_then(|&id| usize::try_from(id).ok())
    }

    /// Index of the parent neutrino, if this is a truth neutrino interaction.
    pub fn neutrino_index(&self) -> Option<usize> {
        usize::try_from(self.nu_id).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub header: Header,
    pub truth: Vec<Interaction>,
    pub reco: Vec<Interaction>,
    pub neutrinos: Vec<Neutrino>,
    /// Every spill accounted to this event (data only).
    pub spills: Vec<Spill>,
    /// The spill associated with the triggered event (data only).
    pub trigger_spill: Option<Spill>,
}

impl Event {
    /// Parse one event record from JSON. Absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a JSON array of event records.
    pub fn batch_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn interactions(&self, universe: Universe) -> &[Interaction] {
        match universe {
            Universe::Truth => &self.truth,
            Universe::Reco => &self.reco,
        }
    }

    /// Resolve `interaction`'s match in the opposite collection.
    ///
    /// Returns `None` when the match list is empty or the id does not index
    /// a valid entry.
    pub fn matched<'a>(
        &'a self,
        interaction: &Interaction,
        universe: Universe,
    ) -> Option<&'a Interaction> {
        interaction
            .match_index()
            .and_then(|idx| self.interactions(universe.opposite()).get(idx))
    }
}
