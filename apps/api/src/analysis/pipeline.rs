//! Analysis Pipeline — produces one `CandidateReport` from one extracted CV
//! and one `CompanyProfile`.
//!
//! Flow: screening → gap analysis → behavioral → technical → summary.
//! Each phase is a render-template → gateway-call → parse unit. The order is
//! fixed because later phases embed earlier phases' structured output as
//! textual context: the technical phase receives the serialized gap list, and
//! the summary phase receives the fit assessment, gap analysis, and screening
//! decision. Exactly five outbound gateway calls per run, single attempt each.
//!
//! Atomicity: either every phase section is present and well-typed, or the run
//! fails with one named error. No partial report is ever returned.

use std::time::Instant;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::analysis::decode::parse_phase;
use crate::analysis::models::{
    BasicInfo, CandidateAnalysis, CandidateReport, FitAssessment, Phase1InitialScreening,
    Phase2HrBehavioral, Phase3TechnicalInterview, RecruiterSummary, ScreeningDecision,
    TechnicalGapAnalysis,
};
use crate::analysis::prompts::{
    BEHAVIORAL_PROMPT_TEMPLATE, GAP_ANALYSIS_PROMPT_TEMPLATE, SCREENING_PROMPT_TEMPLATE,
    SUMMARY_PROMPT_TEMPLATE, TECHNICAL_PROMPT_TEMPLATE,
};
use crate::errors::AppError;
use crate::knowledge::CompanyProfile;
use crate::llm_client::CompletionGateway;

const PHASE_SCREENING: &str = "initial screening";
const PHASE_GAP_ANALYSIS: &str = "technical gap analysis";
const PHASE_BEHAVIORAL: &str = "HR behavioral";
const PHASE_TECHNICAL: &str = "technical interview";
const PHASE_SUMMARY: &str = "recruiter summary";

// ────────────────────────────────────────────────────────────────────────────
// Per-phase wire envelopes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ScreeningResponse {
    fit_assessment: FitAssessment,
    screening_decision: ScreeningDecision,
}

#[derive(Debug, Deserialize)]
struct GapAnalysisResponse {
    technical_gap_analysis: TechnicalGapAnalysis,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    recruiter_summary: RecruiterSummary,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full five-phase analysis and assembles the report.
pub async fn run(
    gateway: &dyn CompletionGateway,
    document: &str,
    profile: &CompanyProfile,
    company_name: &str,
) -> Result<CandidateReport, AppError> {
    if document.trim().is_empty() {
        return Err(AppError::Validation(
            "Candidate document contains no text".to_string(),
        ));
    }

    let started = Instant::now();
    let analysis_timestamp = Utc::now();
    let candidate_name = extract_candidate_name(document);

    // Phase 1: Initial screening (fit assessment + screening decision)
    info!("Running {PHASE_SCREENING} phase for company {company_name}");
    let screening = run_screening(gateway, document, profile).await?;

    // Technical gap analysis (completes phase 1's section)
    info!("Running {PHASE_GAP_ANALYSIS} phase");
    let gap_analysis = run_gap_analysis(gateway, document, profile).await?;

    // Phase 2: HR behavioral (company context only — no candidate input)
    info!("Running {PHASE_BEHAVIORAL} phase");
    let behavioral = run_behavioral(gateway, profile).await?;

    // Phase 3: Technical interview, seeded with the identified gaps
    info!(
        "Running {PHASE_TECHNICAL} phase ({} identified gaps)",
        gap_analysis.technical_gap_analysis.identified_gaps.len()
    );
    let technical =
        run_technical(gateway, document, profile, &gap_analysis.technical_gap_analysis).await?;

    // Recruiter summary, synthesized from the screening and gap outputs
    info!("Running {PHASE_SUMMARY} phase");
    let summary = run_summary(
        gateway,
        &screening.fit_assessment,
        &gap_analysis.technical_gap_analysis,
        &screening.screening_decision,
    )
    .await?;

    let processing_time_seconds = round2(started.elapsed().as_secs_f64());
    info!("Analysis complete in {processing_time_seconds}s");

    Ok(CandidateReport {
        candidate_analysis: CandidateAnalysis {
            basic_info: BasicInfo {
                candidate_name,
                analysis_timestamp,
                company_name: company_name.to_string(),
                processing_time_seconds,
            },
        },
        phase_1_initial_screening: Phase1InitialScreening {
            fit_assessment: screening.fit_assessment,
            technical_gap_analysis: gap_analysis.technical_gap_analysis,
            screening_decision: screening.screening_decision,
        },
        phase_2_hr_behavioral: behavioral,
        phase_3_technical_interview: technical,
        recruiter_summary: summary.recruiter_summary,
    })
}

async fn run_screening(
    gateway: &dyn CompletionGateway,
    resume_text: &str,
    profile: &CompanyProfile,
) -> Result<ScreeningResponse, AppError> {
    let prompt = SCREENING_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_offer_text}", &profile.job_offering)
        .replace("{company_values}", &profile.values);
    let response = gateway.complete(&prompt).await?;
    parse_phase(PHASE_SCREENING, &response)
}

async fn run_gap_analysis(
    gateway: &dyn CompletionGateway,
    resume_text: &str,
    profile: &CompanyProfile,
) -> Result<GapAnalysisResponse, AppError> {
    let prompt = GAP_ANALYSIS_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_offer_text}", &profile.job_offering);
    let response = gateway.complete(&prompt).await?;
    parse_phase(PHASE_GAP_ANALYSIS, &response)
}

async fn run_behavioral(
    gateway: &dyn CompletionGateway,
    profile: &CompanyProfile,
) -> Result<Phase2HrBehavioral, AppError> {
    let prompt = BEHAVIORAL_PROMPT_TEMPLATE
        .replace("{company_values}", &profile.values)
        .replace("{company_about}", &profile.about);
    let response = gateway.complete(&prompt).await?;
    parse_phase(PHASE_BEHAVIORAL, &response)
}

async fn run_technical(
    gateway: &dyn CompletionGateway,
    resume_text: &str,
    profile: &CompanyProfile,
    gap_analysis: &TechnicalGapAnalysis,
) -> Result<Phase3TechnicalInterview, AppError> {
    let gaps_context = serde_json::to_string(&gap_analysis.identified_gaps)
        .map_err(|e| AppError::Internal(e.into()))?;
    let prompt = TECHNICAL_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_offer_text}", &profile.job_offering)
        .replace("{identified_gaps}", &gaps_context);
    let response = gateway.complete(&prompt).await?;
    parse_phase(PHASE_TECHNICAL, &response)
}

async fn run_summary(
    gateway: &dyn CompletionGateway,
    fit_assessment: &FitAssessment,
    gap_analysis: &TechnicalGapAnalysis,
    decision: &ScreeningDecision,
) -> Result<SummaryResponse, AppError> {
    let prompt = SUMMARY_PROMPT_TEMPLATE
        .replace(
            "{fit_assessment}",
            &serde_json::to_string(fit_assessment).map_err(|e| AppError::Internal(e.into()))?,
        )
        .replace(
            "{technical_gaps}",
            &serde_json::to_string(gap_analysis).map_err(|e| AppError::Internal(e.into()))?,
        )
        .replace(
            "{screening_decision}",
            &serde_json::to_string(decision).map_err(|e| AppError::Internal(e.into()))?,
        );
    let response = gateway.complete(&prompt).await?;
    parse_phase(PHASE_SUMMARY, &response)
}

/// Best-effort candidate name extraction from the first lines of the CV.
/// A short line without digits or an email sign is likely the name.
fn extract_candidate_name(cv_text: &str) -> Option<String> {
    cv_text
        .lines()
        .take(10)
        .map(str::trim)
        .find(|line| {
            !line.is_empty()
                && line.split_whitespace().count() <= 4
                && line.len() > 5
                && !line.chars().any(|c| c.is_ascii_digit())
                && !line.contains('@')
        })
        .map(str::to_string)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::llm_client::GatewayError;

    const RESUME: &str = "Jane Smithers\njane@example.com\n8 years of Rust and distributed systems.";

    const SCREENING_CANNED: &str = r#"{
        "fit_assessment": {
            "overall_fit_score": 4,
            "recommendation": "Proceed with interview",
            "justification": "Strong systems background, light on domain experience.",
            "breakdown": {
                "technical_skills": 5,
                "experience_level": 4,
                "industry_relevance": 3,
                "culture_alignment": 4
            }
        },
        "screening_decision": {
            "proceed_to_next_phase": true,
            "priority_level": "High",
            "notes_for_recruiter": "Fast-track to the technical round."
        }
    }"#;

    const GAP_CANNED: &str = r#"{
        "technical_gap_analysis": {
            "hiring_risk": "Medium",
            "overall_assessment": "Technically ready with one operational gap.",
            "identified_gaps": [
                {
                    "category": "Technology Stack",
                    "gap": "No production Kubernetes experience",
                    "severity": "Medium",
                    "impact_on_role": "Slower ramp-up on deployment work",
                    "mitigation_strategy": "Pair with the platform team for the first quarter"
                }
            ],
            "strengths": ["Strong Rust fundamentals", "Distributed systems depth"]
        }
    }"#;

    const BEHAVIORAL_CANNED: &str = r#"{
        "company_context": {
            "company_description": "We build developer infrastructure with an ownership culture.",
            "key_values": ["Ownership", "Customer obsession", "Bias for action"]
        },
        "behavioral_questions": [
            {
                "question": "Tell me about a time you had to act quickly to fix a team issue.",
                "tests_value": "Bias for action",
                "what_to_look_for": "Concrete decisions under time pressure",
                "follow_up_areas": ["What trade-offs were accepted"]
            }
        ],
        "interview_guidance": {
            "focus_areas": ["Ownership signals"],
            "red_flags_to_watch": ["Blaming others for outcomes"],
            "estimated_duration": "30-45 minutes"
        }
    }"#;

    const TECHNICAL_CANNED: &str = r#"{
        "technical_questions": [
            {
                "type": "global",
                "question": "Explain how async executors schedule tasks.",
                "focus_area": "Concurrency fundamentals",
                "difficulty": "Senior",
                "expected_depth": "Wakers, polling, and task budgets",
                "follow_up_questions": ["When would you spawn_blocking?"]
            },
            {
                "type": "specific",
                "question": "How would you structure a rolling deployment on Kubernetes?",
                "focus_area": "Kubernetes",
                "difficulty": "Mid",
                "expected_depth": "Readiness probes and surge settings",
                "relates_to_gaps": ["No production Kubernetes experience"]
            },
            {
                "type": "use_case",
                "question": "Design a rate limiter for a multi-tenant API.",
                "focus_area": "Systems design",
                "difficulty": "Senior",
                "expected_depth": "Token bucket trade-offs and fairness",
                "time_allocation": "20 minutes"
            }
        ],
        "interview_guidance": {
            "focus_areas": ["Distributed systems", "Operational maturity"],
            "gap_specific_probes": ["Deployment experience beyond staging"],
            "estimated_duration": "60-90 minutes"
        }
    }"#;

    const SUMMARY_CANNED: &str = r#"{
        "recruiter_summary": {
            "overall_recommendation": "Hire, contingent on a strong technical round.",
            "key_strengths": ["Rust depth", "Systems design maturity"],
            "areas_of_concern": ["Kubernetes operations"],
            "interview_priorities": ["Probe deployment experience"],
            "onboarding_recommendations": ["Platform team pairing for Q1"],
            "decision_confidence": "Medium"
        }
    }"#;

    enum Canned {
        Reply(String),
        Fail,
    }

    /// Scripted gateway: pops one canned reply per call and records every
    /// prompt it receives, so tests can assert both order and content.
    struct MockGateway {
        script: Mutex<VecDeque<Canned>>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGateway {
        fn scripted(responses: &[&str]) -> Self {
            Self {
                script: Mutex::new(
                    responses
                        .iter()
                        .map(|r| Canned::Reply(r.to_string()))
                        .collect(),
                ),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing_after(responses: &[&str]) -> Self {
            let mut script: VecDeque<Canned> = responses
                .iter()
                .map(|r| Canned::Reply(r.to_string()))
                .collect();
            script.push_back(Canned::Fail);
            Self {
                script: Mutex::new(script),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }

        fn prompt(&self, index: usize) -> String {
            self.prompts.lock().unwrap()[index].clone()
        }
    }

    #[async_trait]
    impl CompletionGateway for MockGateway {
        async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.script.lock().unwrap().pop_front() {
                Some(Canned::Reply(text)) => Ok(text),
                Some(Canned::Fail) => Err(GatewayError::Api {
                    status: 503,
                    message: "upstream unavailable".to_string(),
                }),
                None => panic!("gateway called more times than scripted"),
            }
        }
    }

    fn profile() -> CompanyProfile {
        CompanyProfile {
            values: "Ownership. Customer obsession. Bias for action.".to_string(),
            about: "We build developer infrastructure.".to_string(),
            job_offering: "Senior Rust Engineer, distributed systems team.".to_string(),
        }
    }

    fn full_script() -> MockGateway {
        MockGateway::scripted(&[
            SCREENING_CANNED,
            GAP_CANNED,
            BEHAVIORAL_CANNED,
            TECHNICAL_CANNED,
            SUMMARY_CANNED,
        ])
    }

    #[tokio::test]
    async fn test_run_produces_report_equal_to_canned_responses() {
        let gateway = full_script();
        let report = run(&gateway, RESUME, &profile(), "acme").await.unwrap();

        assert_eq!(gateway.call_count(), 5);

        // Identity check: each section equals the parsed canned response, no loss
        let screening: ScreeningResponse = serde_json::from_str(SCREENING_CANNED).unwrap();
        let gap: GapAnalysisResponse = serde_json::from_str(GAP_CANNED).unwrap();
        let behavioral: Phase2HrBehavioral = serde_json::from_str(BEHAVIORAL_CANNED).unwrap();
        let technical: Phase3TechnicalInterview = serde_json::from_str(TECHNICAL_CANNED).unwrap();
        let summary: SummaryResponse = serde_json::from_str(SUMMARY_CANNED).unwrap();

        assert_eq!(
            report.phase_1_initial_screening.fit_assessment,
            screening.fit_assessment
        );
        assert_eq!(
            report.phase_1_initial_screening.screening_decision,
            screening.screening_decision
        );
        assert_eq!(
            report.phase_1_initial_screening.technical_gap_analysis,
            gap.technical_gap_analysis
        );
        assert_eq!(report.phase_2_hr_behavioral, behavioral);
        assert_eq!(report.phase_3_technical_interview, technical);
        assert_eq!(report.recruiter_summary, summary.recruiter_summary);

        let info = &report.candidate_analysis.basic_info;
        assert_eq!(info.candidate_name.as_deref(), Some("Jane Smithers"));
        assert_eq!(info.company_name, "acme");
        assert!(info.processing_time_seconds >= 0.0);
    }

    #[tokio::test]
    async fn test_fenced_responses_parse_identically() {
        let fence = |s: &str| format!("```json\n{s}\n```");
        let fenced = [
            fence(SCREENING_CANNED),
            fence(GAP_CANNED),
            fence(BEHAVIORAL_CANNED),
            fence(TECHNICAL_CANNED),
            fence(SUMMARY_CANNED),
        ];
        let gateway =
            MockGateway::scripted(&fenced.iter().map(String::as_str).collect::<Vec<_>>());
        let fenced_report = run(&gateway, RESUME, &profile(), "acme").await.unwrap();

        let plain = full_script();
        let plain_report = run(&plain, RESUME, &profile(), "acme").await.unwrap();

        assert_eq!(
            fenced_report.phase_1_initial_screening,
            plain_report.phase_1_initial_screening
        );
        assert_eq!(
            fenced_report.recruiter_summary,
            plain_report.recruiter_summary
        );
    }

    #[tokio::test]
    async fn test_phase_prompts_carry_their_declared_inputs() {
        let gateway = full_script();
        run(&gateway, RESUME, &profile(), "acme").await.unwrap();

        let profile = profile();
        // Screening: candidate text + job offering + values
        let screening_prompt = gateway.prompt(0);
        assert!(screening_prompt.contains(RESUME));
        assert!(screening_prompt.contains(&profile.job_offering));
        assert!(screening_prompt.contains(&profile.values));

        // Gap analysis: candidate text + job offering only
        let gap_prompt = gateway.prompt(1);
        assert!(gap_prompt.contains(RESUME));
        assert!(gap_prompt.contains(&profile.job_offering));

        // Behavioral: company values + about, no candidate text
        let behavioral_prompt = gateway.prompt(2);
        assert!(behavioral_prompt.contains(&profile.values));
        assert!(behavioral_prompt.contains(&profile.about));
        assert!(!behavioral_prompt.contains("Jane Smithers"));
    }

    #[tokio::test]
    async fn test_technical_prompt_embeds_serialized_gap_list() {
        let gateway = full_script();
        run(&gateway, RESUME, &profile(), "acme").await.unwrap();

        let gap: GapAnalysisResponse = serde_json::from_str(GAP_CANNED).unwrap();
        let serialized_gaps =
            serde_json::to_string(&gap.technical_gap_analysis.identified_gaps).unwrap();

        let technical_prompt = gateway.prompt(3);
        assert!(technical_prompt.contains(&serialized_gaps));
        assert!(technical_prompt.contains("No production Kubernetes experience"));
    }

    #[tokio::test]
    async fn test_summary_prompt_embeds_screening_output_verbatim() {
        let gateway = full_script();
        run(&gateway, RESUME, &profile(), "acme").await.unwrap();

        let screening: ScreeningResponse = serde_json::from_str(SCREENING_CANNED).unwrap();
        let summary_prompt = gateway.prompt(4);
        assert!(summary_prompt
            .contains(&serde_json::to_string(&screening.fit_assessment).unwrap()));
        assert!(summary_prompt
            .contains(&serde_json::to_string(&screening.screening_decision).unwrap()));
    }

    #[tokio::test]
    async fn test_empty_document_fails_before_any_gateway_call() {
        let gateway = full_script();
        let err = run(&gateway, "   \n  ", &profile(), "acme").await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_gateway_failure_aborts_after_exactly_that_call() {
        // Fails on the third call (behavioral phase)
        let gateway = MockGateway::failing_after(&[SCREENING_CANNED, GAP_CANNED]);
        let err = run(&gateway, RESUME, &profile(), "acme").await.unwrap_err();

        assert!(matches!(err, AppError::Gateway(_)));
        assert_eq!(gateway.call_count(), 3);
    }

    #[tokio::test]
    async fn test_malformed_phase_response_names_the_phase() {
        let gateway = MockGateway::scripted(&[SCREENING_CANNED, "not valid json"]);
        let err = run(&gateway, RESUME, &profile(), "acme").await.unwrap_err();

        match err {
            AppError::PhaseParse { phase, .. } => assert_eq!(phase, PHASE_GAP_ANALYSIS),
            other => panic!("expected PhaseParse, got {other:?}"),
        }
        assert_eq!(gateway.call_count(), 2);
    }

    #[test]
    fn test_extract_candidate_name_takes_first_plausible_line() {
        let cv = "Jane Smithers\njane@example.com\n+33 6 00 00 00 00\nSenior Engineer";
        assert_eq!(extract_candidate_name(cv).as_deref(), Some("Jane Smithers"));
    }

    #[test]
    fn test_extract_candidate_name_skips_emails_and_numbers() {
        let cv = "jane@example.com\n+33 6 00 00 00 00\nCurriculum Vitae 2026";
        assert_eq!(extract_candidate_name(cv), None);
    }

    #[test]
    fn test_extract_candidate_name_only_checks_first_ten_lines() {
        let cv = format!("{}\nJane Smithers", "x\n".repeat(10));
        assert_eq!(extract_candidate_name(&cv), None);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.345_678), 12.35);
        assert_eq!(round2(0.0), 0.0);
    }
}
