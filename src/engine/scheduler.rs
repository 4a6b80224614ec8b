//! Groups registered algorithms into same-kind batches.

use crate::algorithms::{Algorithm, GlobalAlgorithm, ScoringContext, Stage};
use crate::errors::Result;
use crate::prediction::Prediction;

/// Consecutive algorithms of one kind, run as a single pass.
pub enum Batch {
    /// Each algorithm runs on each prediction, prediction-major
    PerPrediction(Vec<Box<dyn Algorithm>>),
    /// Each algorithm receives the whole prediction array in turn
    Global(Vec<Box<dyn GlobalAlgorithm>>),
}

impl Batch {
    /// Number of algorithms in the batch
    pub fn len(&self) -> usize {
        match self {
            Batch::PerPrediction(algorithms) => algorithms.len(),
            Batch::Global(algorithms) => algorithms.len(),
        }
    }

    /// Whether the batch holds no algorithm
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of the batched algorithms, in registration order
    pub fn names(&self) -> Vec<&'static str> {
        match self {
            Batch::PerPrediction(algorithms) => algorithms.iter().map(|a| a.name()).collect(),
            Batch::Global(algorithms) => algorithms.iter().map(|a| a.name()).collect(),
        }
    }

    fn run(
        &self,
        mut predictions: Vec<Prediction>,
        ctx: &ScoringContext<'_>,
    ) -> Result<Vec<Prediction>> {
        match self {
            Batch::Global(algorithms) => {
                for algorithm in algorithms {
                    predictions = algorithm.execute(predictions, ctx)?;
                }
            }
            Batch::PerPrediction(algorithms) => {
                for prediction in &mut predictions {
                    for algorithm in algorithms {
                        algorithm.execute(prediction, ctx)?;
                    }
                }
            }
        }
        Ok(predictions)
    }
}

impl std::fmt::Debug for Batch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Batch::PerPrediction(_) => "PerPrediction",
            Batch::Global(_) => "Global",
        };
        f.debug_tuple(kind).field(&self.names()).finish()
    }
}

/// Ordered algorithm batches.
///
/// Adding an algorithm of the same kind as the previous one extends the
/// last batch; a kind switch opens a new batch. Registration order is kept
/// both within and across batches.
#[derive(Debug, Default)]
pub struct Scheduler {
    batches: Vec<Batch>,
}

impl Scheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one algorithm
    pub fn add(&mut self, stage: Stage) {
        match stage {
            Stage::PerPrediction(algorithm) => {
                if let Some(Batch::PerPrediction(batch)) = self.batches.last_mut() {
                    batch.push(algorithm);
                } else {
                    self.batches.push(Batch::PerPrediction(vec![algorithm]));
                }
            }
            Stage::Global(algorithm) => {
                if let Some(Batch::Global(batch)) = self.batches.last_mut() {
                    batch.push(algorithm);
                } else {
                    self.batches.push(Batch::Global(vec![algorithm]));
                }
            }
        }
    }

    /// Register several algorithms in order
    pub fn extend(&mut self, stages: impl IntoIterator<Item = Stage>) {
        for stage in stages {
            self.add(stage);
        }
    }

    /// The batches in execution order
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Total number of registered algorithms
    pub fn len(&self) -> usize {
        self.batches.iter().map(Batch::len).sum()
    }

    /// Whether no algorithm is registered
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Run every batch over `predictions`
    pub fn execute(
        &self,
        mut predictions: Vec<Prediction>,
        ctx: &ScoringContext<'_>,
    ) -> Result<Vec<Prediction>> {
        for batch in &self.batches {
            let _span = tracing::trace_span!("batch", algorithms = batch.len()).entered();
            predictions = batch.run(predictions, ctx)?;
        }
        Ok(predictions)
    }
}
