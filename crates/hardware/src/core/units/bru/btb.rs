//! Branch Target Buffer (BTB).
//!
//! The BTB is a direct-mapped table that stores the target address and predictor
//! state of control transfers. Fetch consults it with the address of the last
//! instruction of a branch's delay window, so a hit can redirect the very next fetch.

use crate::config::PredictorState;

/// An entry in the Branch Target Buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BtbEntry {
    /// The full key address this entry belongs to.
    pub tag: u32,
    /// Address of the transfer itself; differs from the key when delay slots are honored.
    pub source: u32,
    /// The last resolved target address.
    pub target: u32,
    /// Direction predictor state.
    pub state: PredictorState,
    /// Indicates if this entry contains valid data.
    pub valid: bool,
}

/// Branch Target Buffer structure.
#[derive(Clone, Debug)]
pub struct Btb {
    table: Vec<BtbEntry>,
}

impl Btb {
    /// Creates a new Branch Target Buffer with the specified size.
    ///
    /// # Arguments
    ///
    /// * `size` - The number of entries; need not be a power of two, must be non-zero.
    pub fn new(size: usize) -> Self {
        Self {
            table: vec![BtbEntry::default(); size.max(1)],
        }
    }

    /// Number of entries.
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// Index of `pc`: word address modulo the table size.
    pub fn index(&self, pc: u32) -> usize {
        (pc >> 2) as usize % self.table.len()
    }

    /// Looks up the entry for `pc`.
    ///
    /// # Returns
    ///
    /// The entry if it is valid and its tag matches, otherwise `None`.
    pub fn lookup(&self, pc: u32) -> Option<&BtbEntry> {
        let entry = &self.table[self.index(pc)];
        (entry.valid && entry.tag == pc).then_some(entry)
    }

    /// Mutable access to the slot `pc` maps to, whatever it currently holds.
    pub fn slot_mut(&mut self, pc: u32) -> &mut BtbEntry {
        let idx = self.index(pc);
        &mut self.table[idx]
    }

    /// Invalidates every entry.
    pub fn clear(&mut self) {
        self.table.fill(BtbEntry::default());
    }
}
