//! Per-founder history kept on the user record

use crate::feature::mirror::{FounderCheckin, FounderLesson, FounderReflectionAnalysis};
use crate::feature::solver::ProblemSolverResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One weekly Startup Mirror reflection and the feedback it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FounderLogEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub checkin: FounderCheckin,
    pub analysis: FounderReflectionAnalysis,
    pub lesson: FounderLesson,
}

/// A problem the founder brought to the Problem Solver, with its answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSolverSession {
    pub id: String,
    pub date: DateTime<Utc>,
    pub problem: String,
    pub solution: ProblemSolverResponse,
}
