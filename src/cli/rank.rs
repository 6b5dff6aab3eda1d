use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::candidate::Candidate;
use crate::core::query::RankQuery;
use crate::extract::{self, DocumentFormat};
use crate::ranking::aggregate::round2;
use crate::ranking::engine::{RankingConfig, RankingEngine};
use crate::ranking::semantic::{shared_embedder, Embedder};
use crate::ranking::{ScoreRecord, SignalWeights};
use crate::text::NormalizerConfig;

#[derive(Args)]
pub struct RankArgs {
    /// Resume files (PDF, DOCX, or plain text); unsupported types are skipped
    #[arg(required = true)]
    pub resumes: Vec<PathBuf>,

    /// Job description file. Use '-' for stdin
    #[arg(short, long)]
    pub job: PathBuf,

    /// Comma-separated required skills (e.g. "Python,AWS,Docker")
    #[arg(short, long, default_value = "")]
    pub skills: String,

    // === Scoring weight options ===
    /// Weight for the lexical (BM25) signal (0-100, default 30)
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub weight_lexical: u32,

    /// Weight for the semantic (embedding) signal (0-100, default 40)
    #[arg(long, default_value = "40", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub weight_semantic: u32,

    /// Weight for the skill-coverage signal (0-100, default 30)
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub weight_skills: u32,

    /// Number of results to show (0 = all)
    #[arg(short = 'n', long, default_value = "10")]
    pub max_results: usize,

    /// Use the deterministic offline embedder instead of downloading the
    /// MiniLM model (degrades the semantic signal to token overlap)
    #[arg(long)]
    pub offline: bool,
}

/// Execute the rank subcommand
///
/// # Errors
///
/// Returns an error if the job description cannot be read, no resume could
/// be loaded, or the embedding model fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RankArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let job_description = read_job_description(&args.job)?;
    let skills = RankQuery::parse_skill_list(&args.skills);
    let query = RankQuery::new(job_description, skills);

    let candidates = load_candidates(&args.resumes, verbose);
    if candidates.is_empty() {
        eprintln!("Warning: no readable resumes among the inputs, nothing to rank.");
        return Ok(());
    }

    let weights = SignalWeights {
        lexical: f64::from(args.weight_lexical) / 100.0,
        semantic: f64::from(args.weight_semantic) / 100.0,
        skills: f64::from(args.weight_skills) / 100.0,
    };

    if verbose {
        eprintln!(
            "Scoring weights: {:.0}% lexical, {:.0}% semantic, {:.0}% skills",
            weights.lexical * 100.0,
            weights.semantic * 100.0,
            weights.skills * 100.0,
        );
        eprintln!(
            "Ranking {} candidates against {} required skills",
            candidates.len(),
            query.required_skills.len(),
        );
    }

    let embedder = shared_embedder(args.offline)?;
    let engine = RankingEngine::with_config(
        embedder,
        RankingConfig {
            weights,
            normalizer: NormalizerConfig::default(),
        },
    );

    let mut records = engine.rank(&query, &candidates)?;
    if args.max_results > 0 {
        records.truncate(args.max_results);
    }

    match format {
        OutputFormat::Text => print_text(&records, &query),
        OutputFormat::Json => print_json(&records, &query, embedder.name())?,
        OutputFormat::Tsv => print_tsv(&records),
    }

    Ok(())
}

fn read_job_description(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read job description {}: {e}", path.display()))
    }
}

/// Load resume files into candidates.
///
/// Unsupported extensions and unreadable files are skipped with a warning
/// rather than failing the whole batch.
pub(crate) fn load_candidates(paths: &[PathBuf], verbose: bool) -> Vec<Candidate> {
    let mut candidates = Vec::with_capacity(paths.len());

    for path in paths {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        let Some(format) = DocumentFormat::from_filename(&name) else {
            tracing::warn!("skipping {}: unsupported file type", path.display());
            if verbose {
                eprintln!("Skipping {} (unsupported file type)", path.display());
            }
            continue;
        };

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("skipping {}: {e}", path.display());
                eprintln!("Skipping {} ({e})", path.display());
                continue;
            }
        };

        match extract::extract_text(&bytes, format) {
            Ok(text) => {
                if verbose {
                    eprintln!(
                        "Loaded {} ({}, {} chars)",
                        path.display(),
                        format.display_name(),
                        text.len()
                    );
                }
                candidates.push(Candidate::new(name, text));
            }
            Err(e) => {
                tracing::warn!("skipping {}: {e}", path.display());
                eprintln!("Skipping {} ({e})", path.display());
            }
        }
    }

    candidates
}

fn print_text(records: &[ScoreRecord], query: &RankQuery) {
    if records.is_empty() {
        println!("No candidates ranked.");
        return;
    }

    println!("\nRanked {} candidates:", records.len());
    for (i, r) in records.iter().enumerate() {
        println!(
            "\n{:>3}. {:<40} {:>6.2}  ({})",
            i + 1,
            r.identifier,
            round2(r.final_score),
            r.strength,
        );
        println!(
            "     lexical {:.2}  semantic {:.2}  skills {}/{}",
            round2(r.lexical_score),
            round2(r.semantic_score),
            r.matched_skills.len(),
            query.required_skills.len(),
        );
        if !r.matched_skills.is_empty() {
            println!("     matched: {}", r.matched_skills.join(", "));
        }
        if !r.missing_skills.is_empty() {
            println!("     missing: {}", r.missing_skills.join(", "));
        }
    }
}

fn print_json(records: &[ScoreRecord], query: &RankQuery, embedder: &str) -> anyhow::Result<()> {
    let results: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            serde_json::json!({
                "identifier": r.identifier,
                "final_score": round2(r.final_score),
                "strength": r.strength,
                "lexical_score": round2(r.lexical_score),
                "semantic_score": round2(r.semantic_score),
                "coverage": round2(r.coverage),
                "matched_skills": r.matched_skills,
                "missing_skills": r.missing_skills,
            })
        })
        .collect();

    let output = serde_json::json!({
        "required_skills": query.required_skills,
        "embedder": embedder,
        "results": results,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(records: &[ScoreRecord]) {
    println!("rank\tidentifier\tfinal_score\tstrength\tlexical\tsemantic\tcoverage\tmatched\tmissing");
    for (i, r) in records.iter().enumerate() {
        println!(
            "{}\t{}\t{:.2}\t{}\t{:.2}\t{:.2}\t{:.2}\t{}\t{}",
            i + 1,
            r.identifier,
            r.final_score,
            r.strength,
            r.lexical_score,
            r.semantic_score,
            r.coverage,
            r.matched_skills.join(","),
            r.missing_skills.join(","),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_candidates_reads_text_files() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.txt", "Python developer");
        let b = write_file(&dir, "b.txt", "Java developer");

        let candidates = load_candidates(&[a, b], false);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].identifier, "a.txt");
        assert_eq!(candidates[0].raw_text, "Python developer");
    }

    #[test]
    fn test_load_candidates_skips_unsupported_types() {
        let dir = TempDir::new().unwrap();
        let good = write_file(&dir, "cv.txt", "text");
        let bad = write_file(&dir, "cv.exe", "binary");

        let candidates = load_candidates(&[good, bad], false);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].identifier, "cv.txt");
    }

    #[test]
    fn test_load_candidates_skips_missing_files() {
        let candidates = load_candidates(&[PathBuf::from("/nonexistent/cv.txt")], false);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_read_job_description_from_file() {
        let dir = TempDir::new().unwrap();
        let jd = write_file(&dir, "jd.txt", "Senior Rust engineer");
        assert_eq!(read_job_description(&jd).unwrap(), "Senior Rust engineer");
    }
}
