#[cfg(feature = "serde")]
use serde::Serialize;

use crate::tableau::Tableau;

/// The tableau as it stood at the start of one pass of the pivot loop
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct IterationSnapshot {
    /// 0-based pass index
    pub iteration: usize,
    pub tableau: Tableau,
}

/// A pivot performed during one pass
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Pivot {
    /// Pass in which the pivot happened
    pub iteration: usize,
    /// Leaving row (1-based constraint row)
    pub row: usize,
    /// Entering column
    pub column: usize,
    /// Pivot element before normalization
    pub element: f64,
}

/// Append-only record of a solve
#[derive(Debug, Default)]
pub(crate) struct IterationRecorder {
    snapshots: Vec<IterationSnapshot>,
    pivots: Vec<Pivot>,
}

impl IterationRecorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, tableau: &Tableau) {
        self.snapshots.push(IterationSnapshot {
            iteration: self.snapshots.len(),
            tableau: tableau.clone(),
        });
    }

    pub(crate) fn record_pivot(&mut self, pivot: Pivot) {
        self.pivots.push(pivot);
    }

    pub(crate) fn finish(self) -> (Vec<IterationSnapshot>, Vec<Pivot>) {
        (self.snapshots, self.pivots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshots_are_detached_copies() {
        let mut tableau = Tableau::zeros(1, 1);
        let mut recorder = IterationRecorder::new();

        recorder.record(&tableau);
        tableau.set(1, 0, 4.0);
        recorder.record(&tableau);

        let (snapshots, pivots) = recorder.finish();
        assert!(pivots.is_empty());
        assert_eq!(snapshots.iter().map(|s| s.iteration).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(snapshots[0].tableau.get(1, 0), 0.0);
        assert_eq!(snapshots[1].tableau.get(1, 0), 4.0);
    }
}
