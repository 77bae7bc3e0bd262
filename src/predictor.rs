//! Implementations of different branch predictors.

pub mod table;
pub mod counter;
pub mod simple;
pub mod gshare;
pub mod tournament;
pub mod perceptron;
pub mod engine;

pub use table::*;
pub use counter::*;
pub use simple::*;
pub use gshare::*;
pub use tournament::*;
pub use perceptron::*;
pub use engine::*;

use crate::branch::Outcome;

/// Interface to a predictor that guesses the direction of the branch at
/// some program counter value, then learns from the resolved outcome.
pub trait DirectionPredictor {
    fn name(&self) -> &'static str;

    /// Reset the internal state of the predictor.
    fn reset(&mut self);

    /// Return the predicted outcome for the branch at 'pc'.
    fn predict(&self, pc: u32) -> Outcome;

    /// Update the internal state with the resolved outcome for the branch
    /// at 'pc'.
    ///
    /// Callers must resolve branches in prediction order: the state read
    /// while updating branch N is the state that predicted branch N.
    fn update(&mut self, pc: u32, outcome: Outcome);
}
