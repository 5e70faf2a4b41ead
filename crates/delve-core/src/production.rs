//! Weighted production table
//!
//! Weights are percentages, so the table is flattened into 100 slots once and
//! a pick is a single `rn2(100)` lookup.

use delve_rng::RandomSource;

use crate::area::AreaKind;
use crate::config::AreaWeights;
use crate::error::BuildError;

/// Flattened weight table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionTable {
    slots: Vec<AreaKind>,
}

impl ProductionTable {
    /// Build the table; the weights must add up to exactly 100
    pub fn new(weights: &AreaWeights) -> Result<Self, BuildError> {
        let sum = weights.sum();
        if sum != 100 {
            return Err(BuildError::WeightSum { sum });
        }
        let mut slots = Vec::with_capacity(100);
        for (kind, weight) in weights.iter() {
            slots.extend(std::iter::repeat_n(kind, usize::from(weight)));
        }
        Ok(Self { slots })
    }

    /// Weighted random kind
    pub fn pick(&self, rng: &mut dyn RandomSource) -> AreaKind {
        let roll = rng.rn2(self.slots.len() as u32) as usize;
        self.slots
            .get(roll)
            .copied()
            .unwrap_or(AreaKind::RectangularRoom)
    }

    /// Number of slots held by a kind
    pub fn slots_for(&self, kind: AreaKind) -> usize {
        self.slots.iter().filter(|&&k| k == kind).count()
    }
}
