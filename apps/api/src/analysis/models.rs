//! Data contracts for the candidate analysis report.
//!
//! These structs define the exact JSON shape returned to callers and double as
//! the schemas each phase's model output must parse into. A field missing from
//! a model response fails that phase's parse, which fails the whole report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Basic info
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    /// Best-effort extraction from the CV text; null when no candidate line is found.
    pub candidate_name: Option<String>,
    pub analysis_timestamp: DateTime<Utc>,
    pub company_name: String,
    pub processing_time_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateAnalysis {
    pub basic_info: BasicInfo,
}

// ────────────────────────────────────────────────────────────────────────────
// Phase 1: Initial screening
// ────────────────────────────────────────────────────────────────────────────

/// Four sub-scores, each 1–5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownScores {
    pub technical_skills: i32,
    pub experience_level: i32,
    pub industry_relevance: i32,
    pub culture_alignment: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitAssessment {
    pub overall_fit_score: i32,
    pub recommendation: String,
    pub justification: String,
    pub breakdown: BreakdownScores,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedGap {
    pub category: String,
    pub gap: String,
    pub severity: String,
    pub impact_on_role: String,
    pub mitigation_strategy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalGapAnalysis {
    pub hiring_risk: String,
    pub overall_assessment: String,
    pub identified_gaps: Vec<IdentifiedGap>,
    pub strengths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningDecision {
    pub proceed_to_next_phase: bool,
    pub priority_level: String,
    pub notes_for_recruiter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase1InitialScreening {
    pub fit_assessment: FitAssessment,
    pub technical_gap_analysis: TechnicalGapAnalysis,
    pub screening_decision: ScreeningDecision,
}

// ────────────────────────────────────────────────────────────────────────────
// Phase 2: HR behavioral
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyContext {
    pub company_description: String,
    pub key_values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralQuestion {
    pub question: String,
    pub tests_value: String,
    pub what_to_look_for: String,
    pub follow_up_areas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrInterviewGuidance {
    pub focus_areas: Vec<String>,
    pub red_flags_to_watch: Vec<String>,
    pub estimated_duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase2HrBehavioral {
    pub company_context: CompanyContext,
    pub behavioral_questions: Vec<BehavioralQuestion>,
    pub interview_guidance: HrInterviewGuidance,
}

// ────────────────────────────────────────────────────────────────────────────
// Phase 3: Technical interview
// ────────────────────────────────────────────────────────────────────────────

/// One technical question. The optional fields vary by question `type`:
/// `global` carries follow-ups, `specific` carries gap links, `use_case`
/// carries a time allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalQuestion {
    #[serde(rename = "type")]
    pub question_type: String,
    pub question: String,
    pub focus_area: String,
    pub difficulty: String,
    pub expected_depth: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_questions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relates_to_gaps: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_allocation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalInterviewGuidance {
    pub focus_areas: Vec<String>,
    pub gap_specific_probes: Vec<String>,
    pub estimated_duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase3TechnicalInterview {
    pub technical_questions: Vec<TechnicalQuestion>,
    pub interview_guidance: TechnicalInterviewGuidance,
}

// ────────────────────────────────────────────────────────────────────────────
// Recruiter summary
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruiterSummary {
    pub overall_recommendation: String,
    pub key_strengths: Vec<String>,
    pub areas_of_concern: Vec<String>,
    pub interview_priorities: Vec<String>,
    pub onboarding_recommendations: Vec<String>,
    pub decision_confidence: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate report
// ────────────────────────────────────────────────────────────────────────────

/// The full candidate report. Assembled once per request after all five phases
/// complete; immutable after assembly; returned directly to the caller and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    pub candidate_analysis: CandidateAnalysis,
    pub phase_1_initial_screening: Phase1InitialScreening,
    pub phase_2_hr_behavioral: Phase2HrBehavioral,
    pub phase_3_technical_interview: Phase3TechnicalInterview,
    pub recruiter_summary: RecruiterSummary,
}
