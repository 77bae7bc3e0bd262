
use crate::branch::Outcome;
use crate::predictor::DirectionPredictor;

/// A simple predictor with no state: always predict 'taken'.
pub struct TakenPredictor;
impl DirectionPredictor for TakenPredictor {
    fn name(&self) -> &'static str { "TakenPredictor" }
    fn reset(&mut self) {}
    fn predict(&self, _pc: u32) -> Outcome { Outcome::T }
    fn update(&mut self, _pc: u32, _outcome: Outcome) {}
}

/// A simple predictor with no state: always predict 'not-taken'.
pub struct NotTakenPredictor;
impl DirectionPredictor for NotTakenPredictor {
    fn name(&self) -> &'static str { "NotTakenPredictor" }
    fn reset(&mut self) {}
    fn predict(&self, _pc: u32) -> Outcome { Outcome::N }
    fn update(&mut self, _pc: u32, _outcome: Outcome) {}
}
