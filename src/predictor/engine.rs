//! Strategy selection and engine construction.

use crate::branch::Outcome;
use crate::predictor::*;

/// The prediction strategies an engine can be built with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Always predict 'taken' (baseline).
    Static,
    /// Counter table indexed by pc XOR global history.
    Gshare,
    /// Global/local tournament with a learned arbiter.
    Tournament,
    /// Table of perceptrons over global history.
    Perceptron,
}

/// Configuration for building a [PredictorEngine].
///
/// Only the widths used by the selected strategy are consulted; a width
/// that strategy needs must be nonzero or construction panics.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    pub strategy: Strategy,

    /// Global history width in bits (gshare, tournament).
    pub ghist_bits: usize,

    /// Local history width in bits (tournament).
    pub lhist_bits: usize,

    /// Program counter index width in bits (tournament).
    pub pc_index_bits: usize,

    /// Perceptron weight seed. [None] zeroes the weights.
    pub seed: Option<u64>,
}
impl EngineConfig {
    pub fn static_taken() -> Self {
        Self {
            strategy: Strategy::Static,
            ghist_bits: 0,
            lhist_bits: 0,
            pc_index_bits: 0,
            seed: None,
        }
    }

    pub fn gshare(ghist_bits: usize) -> Self {
        Self {
            strategy: Strategy::Gshare,
            ghist_bits,
            lhist_bits: 0,
            pc_index_bits: 0,
            seed: None,
        }
    }

    pub fn tournament(
        ghist_bits: usize,
        lhist_bits: usize,
        pc_index_bits: usize,
    ) -> Self {
        Self {
            strategy: Strategy::Tournament,
            ghist_bits,
            lhist_bits,
            pc_index_bits,
            seed: None,
        }
    }

    pub fn perceptron() -> Self {
        Self {
            strategy: Strategy::Perceptron,
            ghist_bits: 0,
            lhist_bits: 0,
            pc_index_bits: 0,
            seed: None,
        }
    }

    /// Seed the perceptron weights from {-1, 0, +1}.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build an engine, allocating exactly the tables the selected
    /// strategy needs.
    pub fn build(self) -> PredictorEngine {
        match self.strategy {
            Strategy::Static => {
                PredictorEngine::Static(TakenPredictor)
            },
            Strategy::Gshare => {
                PredictorEngine::Gshare(GsharePredictor::new(self.ghist_bits))
            },
            Strategy::Tournament => {
                PredictorEngine::Tournament(TournamentConfig {
                    ghist_bits: self.ghist_bits,
                    lhist_bits: self.lhist_bits,
                    pc_index_bits: self.pc_index_bits,
                }.build())
            },
            Strategy::Perceptron => {
                PredictorEngine::Perceptron(match self.seed {
                    Some(seed) => PerceptronPredictor::new_seeded(seed),
                    None => PerceptronPredictor::new(),
                })
            },
        }
    }
}

/// A branch direction predictor engine: one variant per strategy, so each
/// strategy's state lives next to its logic and only the selected
/// strategy's tables are ever allocated.
pub enum PredictorEngine {
    Static(TakenPredictor),
    Gshare(GsharePredictor),
    Tournament(TournamentPredictor),
    Perceptron(PerceptronPredictor),
}
impl PredictorEngine {
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Static(_) => Strategy::Static,
            Self::Gshare(_) => Strategy::Gshare,
            Self::Tournament(_) => Strategy::Tournament,
            Self::Perceptron(_) => Strategy::Perceptron,
        }
    }
}

impl DirectionPredictor for PredictorEngine {
    fn name(&self) -> &'static str {
        match self {
            Self::Static(p) => p.name(),
            Self::Gshare(p) => p.name(),
            Self::Tournament(p) => p.name(),
            Self::Perceptron(p) => p.name(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Static(p) => p.reset(),
            Self::Gshare(p) => p.reset(),
            Self::Tournament(p) => p.reset(),
            Self::Perceptron(p) => p.reset(),
        }
    }

    fn predict(&self, pc: u32) -> Outcome {
        match self {
            Self::Static(p) => p.predict(pc),
            Self::Gshare(p) => p.predict(pc),
            Self::Tournament(p) => p.predict(pc),
            Self::Perceptron(p) => p.predict(pc),
        }
    }

    fn update(&mut self, pc: u32, outcome: Outcome) {
        match self {
            Self::Static(p) => p.update(pc, outcome),
            Self::Gshare(p) => p.update(pc, outcome),
            Self::Tournament(p) => p.update(pc, outcome),
            Self::Perceptron(p) => p.update(pc, outcome),
        }
    }
}
