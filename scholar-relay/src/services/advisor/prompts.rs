//! Prompt templates. Each asks for the labelled sections [`super::parsing`] reads.

use crate::models::{AdmissionsRequest, FilterQuery, ResumeRequest};

const NOT_SPECIFIED: &str = "Not specified";

fn or_unspecified(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_SPECIFIED)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

pub fn admissions(req: &AdmissionsRequest, college: &str) -> String {
    let gpa = or_unspecified(&req.gpa);
    let sat = or_unspecified(&req.sat);
    let activities = or_unspecified(&req.extracurriculars);

    format!(
        "You are a college admissions expert with access to historical admission data.\n\n\
         Assess this student's chances of admission to {college}. Cover academic \
         competitiveness, the impact of extracurricular activities and personalised \
         suggestions.\n\n\
         Student profile:\n\
         - GPA: {gpa}\n\
         - SAT score: {sat}\n\
         - Extracurriculars: {activities}\n\n\
         Format your response as:\n\
         CHANCE: [percentage such as 45%]\n\
         EXPLANATION: [3-4 sentences on academic and extracurricular strength]\n\
         RECOMMENDATIONS: [5 actionable tips for improving the chances]\n"
    )
}

pub fn essay(essay: &str) -> String {
    format!(
        "You are an expert reviewer of college admissions essays. Review this essay for \
         clarity, flow and structure, personal voice, demonstration of character and \
         achievements, and grammar. Suggest concrete improvements.\n\n\
         Essay: \"\"\"{essay}\"\"\"\n\n\
         Format:\n\
         SCORE: [1-10]\n\
         FEEDBACK: [strengths, weaknesses and actionable improvements]\n"
    )
}

pub fn resume(req: &ResumeRequest, name: &str) -> String {
    let email = or_unspecified(&req.email);
    let phone = or_unspecified(&req.phone);
    let education = or_unspecified(&req.education);
    let activities = if req.activities.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        req.activities.join("; ")
    };
    let additional = req.additional_info.as_deref().unwrap_or("None");

    format!(
        "You are a professional resume writer. Turn the student information below into a \
         polished, keyword-rich resume suitable for college or internship applications.\n\n\
         Name: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Education: {education}\n\
         Activities: {activities}\n\
         Additional Info: {additional}\n\n\
         Format:\n\
         SUMMARY: [2-3 sentence professional summary]\n\
         EDUCATION: [achievements and GPA]\n\
         EXPERIENCE: [experiences and roles]\n\
         SKILLS: [leadership, technical, teamwork and problem-solving skills]\n\
         ACHIEVEMENTS: [awards, honors and recognitions]\n"
    )
}

pub fn scholarship_suggestions(query: &FilterQuery) -> String {
    let gpa = query
        .gpa
        .map(|g| g.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    format!(
        "You are a scholarship advisor. List 15 top national scholarships for a student \
         with this profile, each with its name, description, amount, requirements and link.\n\n\
         Student profile:\n\
         - Low Income: {}\n\
         - First Generation: {}\n\
         - Ethnicity: {}\n\
         - Gender: {}\n\
         - Major: {}\n\
         - State: {}\n\
         - Minimum GPA: {}\n\
         - Volunteer Experience: {}\n\
         - Veteran/Military: {}\n\
         - Disability: {}\n\n\
         Format each scholarship as:\n\
         SCHOLARSHIP 1:\n\
         NAME: ...\n\
         DESCRIPTION: ...\n\
         AMOUNT: ...\n\
         REQUIREMENTS: ...\n\
         LINK: ...\n",
        yes_no(query.low_income),
        yes_no(query.first_gen),
        or_unspecified(&query.ethnicity),
        or_unspecified(&query.gender),
        or_unspecified(&query.major),
        or_unspecified(&query.state),
        gpa,
        yes_no(query.volunteer),
        yes_no(query.veteran),
        yes_no(query.disability),
    )
}
