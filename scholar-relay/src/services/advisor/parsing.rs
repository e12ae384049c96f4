//! Parsers for labelled model replies.
//!
//! Labels are matched as the prompts spell them (`EXPLANATION:`), tolerating
//! markdown emphasis such as `**EXPLANATION:**`. `CHANCE` and the
//! `SCHOLARSHIP n:` headings are matched case-insensitively.

use crate::models::{
    AdmissionsPrediction, EssayReview, ResumeDraft, ResumeRequest, SuggestedScholarship,
};
use crate::services::matcher::MAX_RESULTS;
use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_CHANCE: &str = "50%";
pub const DEFAULT_RECOMMENDATIONS: &str =
    "Strengthen academics, highlight leadership and achievements, and craft compelling essays.";
pub const DEFAULT_ESSAY_SCORE: u32 = 7;
pub const DEFAULT_SUMMARY: &str =
    "Motivated student with strong academic and extracurricular background.";
pub const DEFAULT_EDUCATION: &str = "Education details missing";
pub const DEFAULT_EXPERIENCE: &str = "No activities listed";
pub const DEFAULT_SKILLS: &str = "Leadership, Teamwork, Communication, Problem-solving";
pub const DEFAULT_ACHIEVEMENTS: &str = "Awards and recognitions";

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("built-in pattern must compile")
}

fn label(name: &str) -> Regex {
    pattern(&format!(r"\**\b{}\**\s*:\**", name))
}

static CHANCE: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)\bCHANCE\**\s*:\**\s*(\d+%)"));
static EXPLANATION: Lazy<Regex> = Lazy::new(|| label("EXPLANATION"));
static RECOMMENDATIONS: Lazy<Regex> = Lazy::new(|| label("RECOMMENDATIONS"));

static SCORE: Lazy<Regex> = Lazy::new(|| pattern(r"\bSCORE\**\s*:\**\s*(\d+)"));
static FEEDBACK: Lazy<Regex> = Lazy::new(|| label("FEEDBACK"));

static SUMMARY: Lazy<Regex> = Lazy::new(|| label("SUMMARY"));
static EDUCATION: Lazy<Regex> = Lazy::new(|| label("EDUCATION"));
static EXPERIENCE: Lazy<Regex> = Lazy::new(|| label("EXPERIENCE"));
static SKILLS: Lazy<Regex> = Lazy::new(|| label("SKILLS"));
static ACHIEVEMENTS: Lazy<Regex> = Lazy::new(|| label("ACHIEVEMENTS"));

static SCHOLARSHIP_HEADING: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)\**SCHOLARSHIP\**\s*#?\d+\**\s*:\**"));
static NAME: Lazy<Regex> = Lazy::new(|| label("NAME"));
static DESCRIPTION: Lazy<Regex> = Lazy::new(|| label("DESCRIPTION"));
static AMOUNT: Lazy<Regex> = Lazy::new(|| label("AMOUNT"));
static REQUIREMENTS: Lazy<Regex> = Lazy::new(|| label("REQUIREMENTS"));
static LINK: Lazy<Regex> = Lazy::new(|| label("LINK"));

/// Text after `label` up to the earliest `stops` match, trimmed.
/// `None` when the label is absent or the section is blank.
fn section<'a>(reply: &'a str, label: &Regex, stops: &[&Regex]) -> Option<&'a str> {
    let rest = &reply[label.find(reply)?.end()..];
    let end = stops
        .iter()
        .filter_map(|stop| stop.find(rest))
        .map(|m| m.start())
        .min()
        .unwrap_or(rest.len());
    Some(rest[..end].trim()).filter(|s| !s.is_empty())
}

/// First non-blank line after `label`.
fn line_after<'a>(text: &'a str, label: &Regex) -> Option<&'a str> {
    let rest = text[label.find(text)?.end()..].trim_start();
    let line = rest.lines().next().unwrap_or_default().trim();
    (!line.is_empty()).then_some(line)
}

fn captured<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)?.get(1).map(|m| m.as_str())
}

pub fn admissions(reply: &str) -> AdmissionsPrediction {
    let reply = reply.trim();

    AdmissionsPrediction {
        chance: captured(&CHANCE, reply)
            .unwrap_or(DEFAULT_CHANCE)
            .to_string(),
        explanation: section(reply, &EXPLANATION, &[&*RECOMMENDATIONS])
            .unwrap_or(reply)
            .to_string(),
        recommendations: section(reply, &RECOMMENDATIONS, &[])
            .unwrap_or(DEFAULT_RECOMMENDATIONS)
            .to_string(),
    }
}

pub fn essay(reply: &str) -> EssayReview {
    let reply = reply.trim();

    EssayReview {
        score: captured(&SCORE, reply)
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_ESSAY_SCORE),
        feedback: section(reply, &FEEDBACK, &[]).unwrap_or(reply).to_string(),
    }
}

/// Missing sections fall back to what the student submitted where possible.
pub fn resume(reply: &str, req: &ResumeRequest) -> ResumeDraft {
    let experience = if req.activities.is_empty() {
        DEFAULT_EXPERIENCE.to_string()
    } else {
        req.activities
            .iter()
            .map(|a| format!("• {}", a))
            .collect::<Vec<_>>()
            .join("\n")
    };

    ResumeDraft {
        summary: section(
            reply,
            &SUMMARY,
            &[&*EDUCATION, &*EXPERIENCE, &*SKILLS, &*ACHIEVEMENTS],
        )
        .unwrap_or(DEFAULT_SUMMARY)
        .to_string(),
        education: section(reply, &EDUCATION, &[&*EXPERIENCE, &*SKILLS, &*ACHIEVEMENTS])
            .or(req.education.as_deref())
            .unwrap_or(DEFAULT_EDUCATION)
            .to_string(),
        experience: section(reply, &EXPERIENCE, &[&*SKILLS, &*ACHIEVEMENTS])
            .map(str::to_string)
            .unwrap_or(experience),
        skills: section(reply, &SKILLS, &[&*ACHIEVEMENTS])
            .unwrap_or(DEFAULT_SKILLS)
            .to_string(),
        achievements: section(reply, &ACHIEVEMENTS, &[])
            .unwrap_or(DEFAULT_ACHIEVEMENTS)
            .to_string(),
    }
}

/// Entries without a name are skipped. When nothing usable remains a single
/// generic entry is returned.
pub fn scholarships(reply: &str) -> Vec<SuggestedScholarship> {
    let found: Vec<SuggestedScholarship> = SCHOLARSHIP_HEADING
        .split(reply)
        .filter_map(|block| {
            let name = line_after(block, &NAME)?;
            let field = |re: &Regex, default: &str| {
                line_after(block, re).unwrap_or(default).to_string()
            };

            Some(SuggestedScholarship {
                name: name.to_string(),
                description: field(&*DESCRIPTION, "Details not available"),
                amount: field(&*AMOUNT, "Varies"),
                requirements: field(&*REQUIREMENTS, "Check website"),
                link: field(&*LINK, "#"),
            })
        })
        .take(MAX_RESULTS)
        .collect();

    if found.is_empty() {
        return vec![SuggestedScholarship {
            name: "General Merit Scholarship".to_string(),
            description: "Academic achievement recognition".to_string(),
            amount: "$1,000 - $2,500".to_string(),
            requirements: "Strong GPA and academic standing".to_string(),
            link: "#".to_string(),
        }];
    }
    found
}
