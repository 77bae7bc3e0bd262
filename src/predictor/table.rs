//! Types for implementing a table of predictors.

use crate::predictor::counter::SaturatingCounter;

/// Upper bound on table index widths. Sizing a table past this is treated
/// as a configuration mistake rather than an allocation request.
pub const MAX_INDEX_BITS: usize = 24;

/// Interface to a table of predictors.
pub trait PredictorTable {
    /// The type of input to the table used to form an index.
    type Input;

    /// The type of entry in the table.
    type Entry;

    /// Returns the number of entries in the table.
    fn size(&self) -> usize;

    /// Given some input, return the corresponding index into the table.
    fn get_index(&self, input: Self::Input) -> usize;

    /// Returns a reference to an entry in the table.
    fn get_entry(&self, input: Self::Input) -> &Self::Entry;

    /// Returns a mutable reference to an entry in the table.
    fn get_entry_mut(&mut self, input: Self::Input) -> &mut Self::Entry;

    /// Returns a mask corresponding to the number of entries in the table.
    fn index_mask(&self) -> usize {
        assert!(self.size().is_power_of_two());
        self.size() - 1
    }
}

/// A table of [SaturatingCounter] indexed by a precomputed value.
///
/// The caller owns the indexing scheme (plain history, pc XOR history, a
/// local history value); the table masks whatever it is handed down to
/// its size.
pub struct CounterTable {
    data: Vec<SaturatingCounter>,
    size: usize,
}
impl CounterTable {
    pub fn new(index_bits: usize, init: SaturatingCounter) -> Self {
        assert!(index_bits >= 1 && index_bits <= MAX_INDEX_BITS,
            "invalid counter table index width ({} bits)", index_bits);
        let size = 1 << index_bits;
        Self {
            data: vec![init; size],
            size,
        }
    }

    /// Return every entry to the given state.
    pub fn reset(&mut self, init: SaturatingCounter) {
        self.data.fill(init);
    }
}

impl PredictorTable for CounterTable {
    type Input = usize;
    type Entry = SaturatingCounter;

    fn size(&self) -> usize { self.size }

    fn get_index(&self, input: usize) -> usize {
        input & self.index_mask()
    }

    fn get_entry(&self, input: usize) -> &SaturatingCounter {
        &self.data[self.get_index(input)]
    }

    fn get_entry_mut(&mut self, input: usize) -> &mut SaturatingCounter {
        let index = self.get_index(input);
        &mut self.data[index]
    }
}
