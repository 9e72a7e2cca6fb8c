//! Scoring and evaluation engine for guided investment decision checkpoints.
//!
//! The crate is split into three subsystems that mirror the product: the
//! checkpoint [`engine`] (stage scorers, aggregation, classification,
//! dynamic adjustment, recommendations), the resilient external
//! [`augment`]ation layer with deterministic local fallbacks, and the
//! independent [`risk`] profile scorer. Everything consumes plain answer
//! maps and produces serialisable value objects; collection and persistence
//! are the caller's concern.

pub mod augment;
pub mod config;
pub mod engine;
pub mod error;
pub mod lang;
pub mod risk;
pub mod telemetry;

pub use engine::{DecisionEngine, EngineConfig, EvaluationResult, Rating, Stage, StageScore};
pub use lang::Language;
pub use risk::{RiskAssessmentResult, RiskProfileBand};
