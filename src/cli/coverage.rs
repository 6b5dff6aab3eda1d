//! Coverage command - audit required-skill presence without the model.
//!
//! Useful for a quick screen: which of the required skills does each resume
//! mention verbatim? Runs entirely offline (the embedding model is never
//! loaded) and involves no batch-relative normalization, so results are
//! stable across invocations with different file sets.

use std::path::PathBuf;

use clap::Args;

use crate::cli::rank::load_candidates;
use crate::cli::OutputFormat;
use crate::core::query::RankQuery;
use crate::ranking::aggregate::round2;
use crate::ranking::skills::SkillCoverage;
use crate::text::Normalizer;

#[derive(Args)]
pub struct CoverageArgs {
    /// Resume files (PDF, DOCX, or plain text); unsupported types are skipped
    #[arg(required = true)]
    pub resumes: Vec<PathBuf>,

    /// Comma-separated required skills (e.g. "Python,AWS,Docker")
    #[arg(short, long, required = true)]
    pub skills: String,
}

/// Execute the coverage subcommand
///
/// # Errors
///
/// Returns an error if the skill list is empty after parsing.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CoverageArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let skills = RankQuery::parse_skill_list(&args.skills);
    anyhow::ensure!(
        !skills.is_empty(),
        "no skills given; pass a comma-separated list via --skills"
    );
    // Reuse RankQuery construction for the case-insensitive dedup.
    let query = RankQuery::new(String::new(), skills);

    let candidates = load_candidates(&args.resumes, verbose);
    if candidates.is_empty() {
        eprintln!("Warning: no readable resumes among the inputs.");
        return Ok(());
    }

    let normalizer = Normalizer::default();
    let reports: Vec<(String, SkillCoverage)> = candidates
        .iter()
        .map(|c| {
            let normalized = normalizer.normalize(&c.raw_text);
            let coverage = SkillCoverage::assess(&normalized, &query.required_skills, &normalizer);
            (c.identifier.clone(), coverage)
        })
        .collect();

    match format {
        OutputFormat::Text => print_text(&reports, query.required_skills.len()),
        OutputFormat::Json => print_json(&reports, &query)?,
        OutputFormat::Tsv => print_tsv(&reports),
    }

    Ok(())
}

fn print_text(reports: &[(String, SkillCoverage)], total: usize) {
    for (name, coverage) in reports {
        println!(
            "\n{}  {}/{} skills ({:.0}%)",
            name,
            coverage.matched.len(),
            total,
            coverage.coverage * 100.0,
        );
        if !coverage.matched.is_empty() {
            println!("   matched: {}", coverage.matched.join(", "));
        }
        if !coverage.missing.is_empty() {
            println!("   missing: {}", coverage.missing.join(", "));
        }
    }
}

fn print_json(reports: &[(String, SkillCoverage)], query: &RankQuery) -> anyhow::Result<()> {
    let results: Vec<serde_json::Value> = reports
        .iter()
        .map(|(name, c)| {
            serde_json::json!({
                "identifier": name,
                "coverage": round2(c.coverage),
                "matched_skills": c.matched,
                "missing_skills": c.missing,
            })
        })
        .collect();

    let output = serde_json::json!({
        "required_skills": query.required_skills,
        "results": results,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(reports: &[(String, SkillCoverage)]) {
    println!("identifier\tcoverage\tmatched\tmissing");
    for (name, c) in reports {
        println!(
            "{}\t{:.2}\t{}\t{}",
            name,
            c.coverage,
            c.matched.join(","),
            c.missing.join(","),
        );
    }
}
