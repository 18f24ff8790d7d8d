//! Console rendering of analysis and match results

use crate::llm::analyzer::CandidateProfile;
use crate::llm::matcher::JobMatchResult;
use crate::vector::store::ResumeVectorRecord;
use colored::Colorize;

pub fn print_profile(profile: &CandidateProfile) {
    println!("\n{}", "AI Analysis".bold().underline());
    println!("{}", profile.summary);

    if !profile.skills.is_empty() {
        println!("\n{}", "Skills".bold());
        println!("  {}", profile.skills.join(", "));
    }

    print_list("Experience", &profile.experience);
    print_list("Education", &profile.education);

    println!(
        "\n{} {}",
        "Profile Strength:".bold(),
        score_badge(profile.score)
    );
    if !profile.feedback.is_empty() {
        println!("{}", profile.feedback.dimmed());
    }
}

pub fn print_match(result: &JobMatchResult) {
    println!("\n{}", "Job Match".bold().underline());
    println!("{} {}", "Match Score:".bold(), score_badge(result.match_score));

    if !result.feedback.is_empty() {
        println!("\n{}", result.feedback);
    }

    if !result.missing_skills.is_empty() {
        println!("\n{}", "Missing Skills".bold());
        for skill in &result.missing_skills {
            println!("  - {}", skill.yellow());
        }
    }
}

pub fn print_search_results(records: &[ResumeVectorRecord]) {
    if records.is_empty() {
        println!("No similar resumes found.");
        return;
    }

    println!("\n{}", "Similar Resumes".bold().underline());
    for (i, record) in records.iter().enumerate() {
        println!(
            "\n{}. {} <{}>",
            i + 1,
            record.metadata.name.bold(),
            record.metadata.email
        );
        if !record.metadata.skills.is_empty() {
            println!("   Skills: {}", record.metadata.skills.join(", "));
        }
        println!("   {}", truncate(&record.content, 120).dimmed());
    }
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{}", title.bold());
    for item in items {
        println!("  - {}", item);
    }
}

fn score_badge(score: u8) -> colored::ColoredString {
    let text = format!("{}/100", score);
    if score >= 80 {
        text.green().bold()
    } else if score >= 50 {
        text.yellow().bold()
    } else {
        text.red().bold()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
