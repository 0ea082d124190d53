//! Prompt templates for the coaching endpoints

use crate::constants::ai::{
    CAREER_PLAN_MAX_TOKENS, EMAIL_MAX_TOKENS, INTERVIEW_MAX_TOKENS, MOCK_INTERVIEW_MAX_TOKENS,
};

/// A rendered prompt plus its output token budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachPrompt {
    pub kind: &'static str,
    pub text: String,
    pub max_tokens: usize,
}

/// Professional outreach email for a role
pub fn outreach_email(
    job: &str,
    skills: &str,
    company: Option<&str>,
    experience: Option<&str>,
) -> CoachPrompt {
    let company = company.unwrap_or("a company");
    let experience = experience.unwrap_or("several");
    CoachPrompt {
        kind: "email",
        text: format!(
            "Write a concise, professional outreach email for a {job} position at {company}, \
             highlighting skills: {skills}, and mentioning {experience} years of experience."
        ),
        max_tokens: EMAIL_MAX_TOKENS,
    }
}

/// Three interview questions tailored to the skills
pub fn interview_questions(job: &str, skills: &str) -> CoachPrompt {
    CoachPrompt {
        kind: "interview",
        text: format!(
            "Generate 3 common interview questions for a {job} role, tailored to skills: {skills}."
        ),
        max_tokens: INTERVIEW_MAX_TOKENS,
    }
}

/// One interviewer question with a sample answer and feedback
pub fn mock_interview(job: &str, skills: &str) -> CoachPrompt {
    CoachPrompt {
        kind: "mock_interview",
        text: format!(
            "Act as an interviewer for a {job} role. Ask a question tailored to skills: {skills}, \
             and provide feedback on a sample answer."
        ),
        max_tokens: MOCK_INTERVIEW_MAX_TOKENS,
    }
}

/// Step-by-step career plan
pub fn career_plan(job: &str, experience: Option<&str>) -> CoachPrompt {
    let experience = experience.unwrap_or("no");
    CoachPrompt {
        kind: "career_plan",
        text: format!(
            "Provide a step-by-step career plan for someone with {experience} years of experience \
             who wants to become a {job}. Include education, skills to develop, networking tips, \
             and job application strategies."
        ),
        max_tokens: CAREER_PLAN_MAX_TOKENS,
    }
}
