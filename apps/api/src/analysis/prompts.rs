// All LLM prompt constants for the Analysis Pipeline.
// Each template is rendered with literal `{placeholder}` replacement before
// being sent through the CompletionGateway.

/// Phase 1 screening prompt.
/// Replace: {resume_text}, {job_offer_text}, {company_values}
pub const SCREENING_PROMPT_TEMPLATE: &str = r#"You are an AI recruiter conducting initial CV screening. Analyze the candidate's fit and provide a structured assessment.

Evaluate the match based on:
- Technical skill alignment
- Experience and seniority level
- Industry or domain relevance
- Culture and company values alignment

Format your output as a JSON object:
{
    "fit_assessment": {
        "overall_fit_score": X,
        "recommendation": "Proceed with interview" or "Do not proceed",
        "justification": "Brief summary justifying the score",
        "breakdown": {
            "technical_skills": X,
            "experience_level": X,
            "industry_relevance": X,
            "culture_alignment": X
        }
    },
    "screening_decision": {
        "proceed_to_next_phase": true/false,
        "priority_level": "High|Medium|Low",
        "notes_for_recruiter": "Key points for the recruiter to focus on"
    }
}

### Candidate Resume:
{resume_text}

### Job Offer:
{job_offer_text}

### Company Values:
{company_values}

Score each category from 1-5. If any score is below 3, recommend "Do not proceed".
Be objective and provide actionable insights for recruiters."#;

/// Technical gap analysis prompt.
/// Replace: {resume_text}, {job_offer_text}
pub const GAP_ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are a technical recruiter identifying skill gaps and providing actionable hiring guidance.

Analyze the candidate's resume against the job requirements and identify:
- Missing technical skills
- Experience gaps
- Technology stack mismatches
- Domain knowledge gaps
- Certification gaps

Format your output as a JSON object:
{
    "technical_gap_analysis": {
        "hiring_risk": "Low|Medium|High",
        "overall_assessment": "Brief summary of technical readiness",
        "identified_gaps": [
            {
                "category": "Technical Skills|Experience|Technology Stack|Domain Knowledge|Certifications",
                "gap": "Specific gap description",
                "severity": "Low|Medium|High",
                "impact_on_role": "How this affects job performance",
                "mitigation_strategy": "Specific action to address this gap"
            }
        ],
        "strengths": [
            "Key technical strengths that align well with the role"
        ]
    }
}

### Candidate Resume:
{resume_text}

### Job Offer:
{job_offer_text}

Focus on actionable gaps. If no significant gaps exist, return an empty identified_gaps array.
Provide specific mitigation strategies (training, mentoring, gradual ramp-up, etc.)."#;

/// Phase 2 HR behavioral prompt.
/// Replace: {company_values}, {company_about}
pub const BEHAVIORAL_PROMPT_TEMPLATE: &str = r#"You are an HR specialist designing a behavioral interview round that tests alignment with specific company values.

Workflow:
1. From the company values and about page, write a short company description from a recruiter's point of view (use "We", keep the company's tone).
2. Identify the 3 most important values; apply the MECE principle so they do not overlap.
3. For each selected value, design one behavioral question with guidance on what a strong answer sounds like.

Format your output as a JSON object:
{
    "company_context": {
        "company_description": "Short description of the company, its culture and mission",
        "key_values": ["...", "...", "..."]
    },
    "behavioral_questions": [
        {
            "question": "Tell me about a time...",
            "tests_value": "Which company value this question probes",
            "what_to_look_for": "Signals of a strong answer",
            "follow_up_areas": ["Areas worth digging into"]
        }
    ],
    "interview_guidance": {
        "focus_areas": ["Main cultural dimensions to assess"],
        "red_flags_to_watch": ["Answers that suggest a values mismatch"],
        "estimated_duration": "30-45 minutes"
    }
}

### Company Values:
{company_values}

### Company About Page:
{company_about}

Keep the questions concise and easy to understand. Each question must map to exactly one key value."#;

/// Phase 3 technical interview prompt.
/// Replace: {resume_text}, {job_offer_text}, {identified_gaps}
pub const TECHNICAL_PROMPT_TEMPLATE: &str = r#"You are a technical interviewer designing a comprehensive technical assessment with interview guidance.

Create technical questions that assess competency and provide detailed interview guidance.

Format your output as a JSON object:
{
    "technical_questions": [
        {
            "type": "global",
            "question": "Fundamental technical concept question",
            "focus_area": "What this tests",
            "difficulty": "Junior|Mid|Senior",
            "expected_depth": "What depth of answer to expect",
            "follow_up_questions": ["Potential follow-up questions"]
        },
        {
            "type": "specific",
            "question": "Technology-specific question from the job requirements",
            "focus_area": "Specific technology/tool being tested",
            "difficulty": "Junior|Mid|Senior",
            "expected_depth": "Expected level of detail in the answer",
            "relates_to_gaps": ["Which identified gaps this helps validate"]
        },
        {
            "type": "use_case",
            "question": "Practical scenario-based question",
            "focus_area": "Practical skill being assessed",
            "difficulty": "Junior|Mid|Senior",
            "expected_depth": "Expected problem-solving approach",
            "time_allocation": "Recommended time for this question"
        }
    ],
    "interview_guidance": {
        "focus_areas": ["Main technical areas to assess"],
        "gap_specific_probes": ["Questions to validate identified gaps"],
        "estimated_duration": "60-90 minutes"
    }
}

### Job Offer:
{job_offer_text}

### Candidate Resume Context:
{resume_text}

### Identified Gaps Context:
{identified_gaps}

Tailor difficulty to the job seniority. Make questions practical and role-relevant.
Include specific probes for the identified gaps from the previous analysis."#;

/// Recruiter summary prompt.
/// Replace: {fit_assessment}, {technical_gaps}, {screening_decision}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"You are a senior recruiter creating an executive summary and actionable hiring guidance.

Synthesize all analysis into clear recommendations and next steps.

Format your output as a JSON object:
{
    "recruiter_summary": {
        "overall_recommendation": "Clear hire/no-hire recommendation with reasoning",
        "key_strengths": [
            "Top 3-4 candidate strengths"
        ],
        "areas_of_concern": [
            "Main concerns or gaps to address"
        ],
        "interview_priorities": [
            "What to focus on during interviews"
        ],
        "onboarding_recommendations": [
            "Specific actions if hired (training, mentoring, etc.)"
        ],
        "decision_confidence": "High|Medium|Low"
    }
}

### Fit Assessment:
{fit_assessment}

### Technical Gaps:
{technical_gaps}

### Screening Decision:
{screening_decision}

Provide actionable, specific recommendations. Focus on practical next steps.
Consider both the immediate hiring decision and long-term success planning."#;
