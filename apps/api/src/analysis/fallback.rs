//! Static result used when no attempt produced a usable analysis.

use crate::analysis::models::{
    AnalysisResult, CareerProgression, Competitiveness, ExperienceAnalysis, KeywordAnalysis,
    Language, SkillsMatch,
};

pub const FALLBACK_SCORE: f64 = 65.0;
const FALLBACK_ATS_SCORE: f64 = 62.0;
const FALLBACK_SKILLS_PERCENTAGE: f64 = 58.0;
const FALLBACK_KEYWORD_DENSITY: f64 = 2.3;
const FALLBACK_RELEVANT_YEARS: f64 = 2.0;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Builds the generic result in `language`, naming the `model` that was attempted.
pub fn fallback_result(language: Language, model: &str) -> AnalysisResult {
    let mut result = match language {
        Language::Indonesia => indonesian(),
        Language::English => english(),
    };
    result.model = Some(model.to_string());
    result
}

fn english() -> AnalysisResult {
    AnalysisResult {
        score: FALLBACK_SCORE,
        summary: "The resume shows a reasonable foundation for this role, but a detailed \
                  automated analysis could not be completed. This is a general assessment; \
                  please try again for role-specific feedback."
            .to_string(),
        strengths: strings(&[
            "Relevant professional experience is presented",
            "Resume structure is clear and readable",
            "Technical skills are listed explicitly",
        ]),
        weaknesses: strings(&[
            "Achievements could be quantified with concrete metrics",
            "Keywords from the job posting are not consistently reflected",
            "Professional summary could be more tailored to the role",
        ]),
        skills_match: SkillsMatch {
            matched: strings(&["Communication", "Problem solving", "Teamwork"]),
            missing: strings(&["Role-specific technical skills"]),
            percentage: FALLBACK_SKILLS_PERCENTAGE,
        },
        keyword_analysis: KeywordAnalysis {
            found: strings(&["experience", "skills", "project"]),
            missing: strings(&["role-specific keywords"]),
            density: FALLBACK_KEYWORD_DENSITY,
        },
        recommendations: strings(&[
            "Mirror the key terms used in the job posting",
            "Quantify results with numbers, percentages, or time saved",
            "Tailor the professional summary to the target position",
            "Highlight the most relevant projects first",
        ]),
        ats_score: FALLBACK_ATS_SCORE,
        competitiveness: Competitiveness::Medium,
        experience_analysis: ExperienceAnalysis {
            relevant_years: FALLBACK_RELEVANT_YEARS,
            industry_match: true,
            career_progression: CareerProgression::Good,
        },
        model: None,
    }
}

fn indonesian() -> AnalysisResult {
    AnalysisResult {
        score: FALLBACK_SCORE,
        summary: "Resume menunjukkan dasar yang cukup baik untuk posisi ini, namun analisis \
                  otomatis yang mendetail tidak dapat diselesaikan. Ini adalah penilaian umum; \
                  silakan coba lagi untuk mendapatkan masukan yang spesifik."
            .to_string(),
        strengths: strings(&[
            "Pengalaman profesional yang relevan sudah dicantumkan",
            "Struktur resume jelas dan mudah dibaca",
            "Keterampilan teknis dituliskan secara eksplisit",
        ]),
        weaknesses: strings(&[
            "Pencapaian dapat diperkuat dengan angka dan metrik yang konkret",
            "Kata kunci dari lowongan belum tercermin secara konsisten",
            "Ringkasan profesional dapat lebih disesuaikan dengan posisi",
        ]),
        skills_match: SkillsMatch {
            matched: strings(&["Komunikasi", "Pemecahan masalah", "Kerja sama tim"]),
            missing: strings(&["Keterampilan teknis khusus posisi"]),
            percentage: FALLBACK_SKILLS_PERCENTAGE,
        },
        keyword_analysis: KeywordAnalysis {
            found: strings(&["pengalaman", "keterampilan", "proyek"]),
            missing: strings(&["kata kunci khusus posisi"]),
            density: FALLBACK_KEYWORD_DENSITY,
        },
        recommendations: strings(&[
            "Gunakan istilah kunci yang sama dengan lowongan pekerjaan",
            "Tunjukkan hasil kerja dengan angka, persentase, atau waktu yang dihemat",
            "Sesuaikan ringkasan profesional dengan posisi yang dituju",
            "Tampilkan proyek yang paling relevan terlebih dahulu",
        ]),
        ats_score: FALLBACK_ATS_SCORE,
        competitiveness: Competitiveness::Medium,
        experience_analysis: ExperienceAnalysis {
            relevant_years: FALLBACK_RELEVANT_YEARS,
            industry_match: true,
            career_progression: CareerProgression::Good,
        },
        model: None,
    }
}
