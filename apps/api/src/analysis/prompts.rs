// User-prompt template for résumé analysis.
// The system prompt with the JSON schema lives in llm_client::prompts.

use crate::analysis::models::{AnalysisRequest, Language};

/// Résumé text beyond this many characters is cut before prompting.
pub const MAX_RESUME_CHARS: usize = 3000;

/// Present in every Indonesian prompt; the analysis client looks for it to pick
/// the fallback language.
pub const INDONESIAN_MARKER: &str = "WAJIB menjawab dalam Bahasa Indonesia";

const INDONESIAN_INSTRUCTION: &str = "Anda WAJIB menjawab dalam Bahasa Indonesia. \
    Semua teks pada summary, strengths, weaknesses, dan recommendations harus ditulis \
    dalam Bahasa Indonesia. Nama field JSON dan nilai enum tetap dalam bahasa Inggris.";

const ENGLISH_INSTRUCTION: &str = "Respond in English. All text in summary, strengths, \
    weaknesses, and recommendations must be written in English.";

/// Replace: {job_title}, {job_level}, {job_requirements}, {job_description},
///          {resume_text}, {language_instruction}
const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this resume against the job posting and return the analysis as a JSON object.

JOB TITLE: {job_title}
JOB LEVEL: {job_level}

JOB REQUIREMENTS:
{job_requirements}

JOB DESCRIPTION:
{job_description}

RESUME CONTENT:
{resume_text}

Evaluate:
1. Relevant experience and skills against the requirements
2. Which required skills are present and which are missing
3. Keywords from the posting that appear in the resume, and keyword density
4. How well the resume would pass an ATS (Applicant Tracking System)
5. Years of relevant experience, industry match, and career progression
6. How competitive the candidate is for this level
7. Concrete, actionable recommendations to improve the resume for this role

SCORING RULES:
- Scores must reflect the actual evidence in the resume.
- Do NOT use round numbers such as 50, 60, 70, 75, 80 or 90; use precise values like 67, 73 or 84.
- "percentage" in skillsMatch is the share of required skills found in the resume.

LANGUAGE:
{language_instruction}"#;

/// Builds the user prompt for one analysis request.
pub fn build_analysis_prompt(request: &AnalysisRequest) -> String {
    let language_instruction = match request.language {
        Language::Indonesia => INDONESIAN_INSTRUCTION,
        Language::English => ENGLISH_INSTRUCTION,
    };

    let resume_text = truncate_resume(&request.resume_text);
    render_template(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("job_title", request.job_title.trim()),
            ("job_level", request.job_level.trim()),
            ("job_requirements", request.job_requirements.trim()),
            ("job_description", request.job_description.trim()),
            ("resume_text", resume_text.as_str()),
            ("language_instruction", language_instruction),
        ],
    )
}

/// Substitutes `{name}` placeholders in one left-to-right pass. Inserted values
/// are never rescanned, so braces in user text stay literal.
fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_brace = &rest[open + 1..];
        let hit = values.iter().find_map(|(name, value)| {
            let remainder = after_brace.strip_prefix(*name)?.strip_prefix('}')?;
            Some((*value, remainder))
        });
        match hit {
            Some((value, remainder)) => {
                out.push_str(value);
                rest = remainder;
            }
            None => {
                out.push('{');
                rest = after_brace;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Cuts résumé text to `MAX_RESUME_CHARS` characters on a char boundary.
pub fn truncate_resume(text: &str) -> String {
    let text = text.trim();
    match text.char_indices().nth(MAX_RESUME_CHARS) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

/// Which language the prompt asked the model to answer in.
pub fn detect_language(prompt: &str) -> Language {
    if prompt.contains(INDONESIAN_MARKER) {
        Language::Indonesia
    } else {
        Language::English
    }
}
