//! A two-level tournament predictor.

use crate::branch::Outcome;
use crate::history::{ HistoryRegister, LocalHistoryTable };
use crate::predictor::*;

/// Configuration for building a [TournamentPredictor].
#[derive(Clone, Copy, Debug)]
pub struct TournamentConfig {
    /// Width of the global history register; the global and choice tables
    /// have 2^ghist_bits entries.
    pub ghist_bits: usize,

    /// Width of each per-address history register; the local counter table
    /// has 2^lhist_bits entries.
    pub lhist_bits: usize,

    /// Number of program counter bits used to select a local history.
    pub pc_index_bits: usize,
}
impl TournamentConfig {
    pub fn build(self) -> TournamentPredictor {
        TournamentPredictor::new(self)
    }
}

/// A tournament of two predictors: a global side indexed purely by history
/// and a local side keyed on per-address history, arbitrated by a choice
/// table that learns which side to trust for each global history.
///
/// See "Combining Branch Predictors" (McFarling, 1993).
pub struct TournamentPredictor {
    pub cfg: TournamentConfig,
    pub ghr: HistoryRegister,
    pub global: CounterTable,
    pub local: CounterTable,
    pub local_hist: LocalHistoryTable,
    pub choice: CounterTable,
}
impl TournamentPredictor {
    pub fn new(cfg: TournamentConfig) -> Self {
        Self {
            cfg,
            ghr: HistoryRegister::new(cfg.ghist_bits),
            global: CounterTable::new(cfg.ghist_bits,
                SaturatingCounter::weakly_not_taken()),
            local: CounterTable::new(cfg.lhist_bits,
                SaturatingCounter::weakly_not_taken()),
            local_hist: LocalHistoryTable::new(cfg.pc_index_bits,
                cfg.lhist_bits),
            // Weakly prefer the global side until evidence accumulates.
            choice: CounterTable::new(cfg.ghist_bits,
                SaturatingCounter::weakly_taken()),
        }
    }

    /// The global and choice tables are indexed by history alone.
    fn global_index(&self) -> usize {
        self.ghr.value()
    }

    /// The local counter table is indexed by this address's history.
    fn local_index(&self, pc: u32) -> usize {
        self.local_hist.get_entry(pc as usize).value()
    }
}

impl DirectionPredictor for TournamentPredictor {
    fn name(&self) -> &'static str { "TournamentPredictor" }

    fn reset(&mut self) {
        self.ghr.clear();
        self.global.reset(SaturatingCounter::weakly_not_taken());
        self.local.reset(SaturatingCounter::weakly_not_taken());
        self.local_hist.clear();
        self.choice.reset(SaturatingCounter::weakly_taken());
    }

    fn predict(&self, pc: u32) -> Outcome {
        let global_index = self.global_index();
        let global_pred = self.global.get_entry(global_index).predict();
        let local_pred = self.local.get_entry(self.local_index(pc)).predict();

        // Choice at WT or above trusts the global side.
        match self.choice.get_entry(global_index).predict() {
            Outcome::T => global_pred,
            Outcome::N => local_pred,
        }
    }

    fn update(&mut self, pc: u32, outcome: Outcome) {
        // Both votes and indices are taken from pre-update state: the
        // choice table must be judged against the predictions this branch
        // actually saw.
        let global_index = self.global_index();
        let local_index = self.local_index(pc);
        let global_pred = self.global.get_entry(global_index).predict();
        let local_pred = self.local.get_entry(local_index).predict();

        self.global.get_entry_mut(global_index).update(outcome);
        self.local.get_entry_mut(local_index).update(outcome);

        // The choice table only learns from disagreement: move toward
        // whichever side called this branch correctly.
        if global_pred != local_pred {
            let choice = self.choice.get_entry_mut(global_index);
            if global_pred == outcome {
                choice.inc();
            } else {
                choice.dec();
            }
        }

        self.local_hist.get_entry_mut(pc as usize).shift_in(outcome);
        self.ghr.shift_in(outcome);
    }
}
