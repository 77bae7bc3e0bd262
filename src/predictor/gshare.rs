//! A global-history predictor indexed by 'pc XOR history'.

use crate::branch::Outcome;
use crate::history::HistoryRegister;
use crate::predictor::*;

/// Gshare: one table of saturating counters shared by all branches,
/// indexed by the low program counter bits XOR'ed with global history.
///
/// See "Combining Branch Predictors" (McFarling, 1993).
pub struct GsharePredictor {
    pub ghr: HistoryRegister,
    pub pht: CounterTable,
}
impl GsharePredictor {
    pub fn new(ghist_bits: usize) -> Self {
        Self {
            ghr: HistoryRegister::new(ghist_bits),
            pht: CounterTable::new(ghist_bits,
                SaturatingCounter::weakly_not_taken()),
        }
    }

    fn index(&self, pc: u32) -> usize {
        (pc as usize ^ self.ghr.value()) & self.pht.index_mask()
    }
}

impl DirectionPredictor for GsharePredictor {
    fn name(&self) -> &'static str { "GsharePredictor" }

    fn reset(&mut self) {
        self.ghr.clear();
        self.pht.reset(SaturatingCounter::weakly_not_taken());
    }

    fn predict(&self, pc: u32) -> Outcome {
        self.pht.get_entry(self.index(pc)).predict()
    }

    fn update(&mut self, pc: u32, outcome: Outcome) {
        // The index must see the history that was in effect at prediction
        // time; compute it before the outcome is shifted in.
        let index = self.index(pc);
        self.pht.get_entry_mut(index).update(outcome);
        self.ghr.shift_in(outcome);
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_bit_history_walkthrough() {
        let mut p = GsharePredictor::new(1);

        // One taken training of pc=0 lands on index 0 (pc XOR ghr = 0)
        // and moves that counter WN -> WT, then shifts GHR to 1.
        p.update(0, Outcome::T);
        assert_eq!(p.ghr.value(), 1);
        assert_eq!(p.pht.get_entry(0).state(), SaturatingCounter::WT);

        // With GHR=1, pc=0 now reads index 1 (still WN) and pc=1 reads
        // the freshly-trained index 0.
        assert_eq!(p.predict(0), Outcome::N);
        assert_eq!(p.predict(1), Outcome::T);
    }

    #[test]
    fn consecutive_taken_saturates_the_counter() {
        let mut p = GsharePredictor::new(1);

        // After the first training GHR stays 1, so every following taken
        // training of pc=0 lands on index 1.
        p.update(0, Outcome::T);
        for n in 1..=5u8 {
            p.update(0, Outcome::T);
            let expect = (SaturatingCounter::WN + n).min(SaturatingCounter::ST);
            assert_eq!(p.pht.get_entry(1).state(), expect);
        }
        assert_eq!(p.predict(0), Outcome::T);
    }

    #[test]
    fn training_indexes_before_the_history_shift() {
        // G=2, all counters WN, GHR=0. Train (4,T), (4,T), (8,N):
        //   (4,T): idx = 0b00 ^ 0b00 = 0, counter 0 WN->WT, GHR=0b01
        //   (4,T): idx = 0b00 ^ 0b01 = 1, counter 1 WN->WT, GHR=0b11
        //   (8,N): idx = 0b00 ^ 0b11 = 3, counter 3 WN->SN, GHR=0b10
        let mut p = GsharePredictor::new(2);
        p.update(4, Outcome::T);
        p.update(4, Outcome::T);
        p.update(8, Outcome::N);

        assert_eq!(p.pht.get_entry(0).state(), SaturatingCounter::WT);
        assert_eq!(p.pht.get_entry(1).state(), SaturatingCounter::WT);
        assert_eq!(p.pht.get_entry(2).state(), SaturatingCounter::WN);
        assert_eq!(p.pht.get_entry(3).state(), SaturatingCounter::SN);
        assert_eq!(p.ghr.value(), 2);
    }

    #[test]
    fn predict_has_no_side_effects() {
        let mut p = GsharePredictor::new(4);
        p.update(0x40, Outcome::T);
        let first = p.predict(0x40);
        assert_eq!(p.predict(0x40), first);
        assert_eq!(p.predict(0x40), first);
    }

    #[test]
    fn reset_restores_the_initial_state() {
        let mut p = GsharePredictor::new(3);
        for _ in 0..16 { p.update(0x11, Outcome::T); }
        p.reset();
        assert_eq!(p.ghr.value(), 0);
        for idx in 0..8 {
            assert_eq!(p.pht.get_entry(idx).state(), SaturatingCounter::WN);
        }
    }

    #[test]
    #[should_panic]
    fn zero_width_history_is_rejected() {
        let _ = GsharePredictor::new(0);
    }
}
