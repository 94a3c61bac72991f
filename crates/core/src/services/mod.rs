//! Business logic services.

#![allow(missing_docs)]

pub mod analysis;
pub mod dispute;
pub mod reputation;
pub mod settlement;
pub mod stats;
pub mod workflow;

pub use analysis::{AnalysisEngine, RuleBasedAnalyzer, Verdict, evaluate};
pub use dispute::{AddEvidenceInput, CreateDisputeInput, DisputeService, ResolveDisputeInput};
pub use reputation::ReputationUpdate;
pub use settlement::RecordSettlementInput;
pub use stats::DisputeStats;
pub use workflow::AnalysisGate;
