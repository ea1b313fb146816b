/// Transcript Scorer — scores a transcript file and reports the trend.
///
/// Usage: transcript_scorer --input <file.txt> [--threshold <t>]
///
/// The input file holds one message per line; blank lines are skipped.
use std::env;
use std::process;

use converse_engine::core::scorer::SentimentScorer;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut input = None;
    let mut threshold = converse_engine::core::scorer::DEFAULT_LABEL_THRESHOLD;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input = Some(args[i].clone());
            }
            "--threshold" => {
                i += 1;
                threshold = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --threshold must be a number in (0, 1)");
                    process::exit(1);
                });
            }
            "--help" | "-h" => {
                println!("Usage: transcript_scorer --input <file.txt> [--threshold <t>]");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input_path = input.unwrap_or_else(|| {
        eprintln!("Error: --input is required");
        eprintln!("Usage: transcript_scorer --input <file.txt> [--threshold <t>]");
        process::exit(1);
    });

    let text = std::fs::read_to_string(&input_path).unwrap_or_else(|e| {
        eprintln!("Error reading input file '{}': {}", input_path, e);
        process::exit(1);
    });

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        eprintln!("Error: '{}' contains no messages", input_path);
        process::exit(1);
    }

    let scorer = SentimentScorer::with_threshold(threshold);

    println!("Scoring {} messages from '{}'...", lines.len(), input_path);
    for (i, line) in lines.iter().enumerate() {
        let r = scorer.analyze(line);
        println!(
            "  [{:>3}] {:<8} score={:+.3} conf={:.2}  {}",
            i + 1,
            r.label.as_str(),
            r.score,
            r.confidence,
            truncate(line, 60)
        );
    }

    match scorer.analyze_trend(&lines) {
        Ok(report) => {
            println!();
            println!("Average score: {:+.3}", report.average);
            println!("Trend: {}", report.trend.as_str());
        }
        Err(e) => {
            println!();
            println!("Trend: n/a ({})", e);
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{}…", cut)
    }
}
