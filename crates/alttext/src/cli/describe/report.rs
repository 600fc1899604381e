//! Progress bar and human-readable report on stderr.

use std::time::Duration;

use alttext_core::pricing::format_cost;
use alttext_core::{InferenceResult, ResultSet};
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

pub(crate) fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .map(|s| s.progress_chars("##-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message("starting...");
    pb
}

/// Print each described image with its alt text and usage.
pub(crate) fn print_report(results: &ResultSet) {
    let bold = Style::new().for_stderr().bold();
    let dim = Style::new().for_stderr().dim();

    for (file_name, result) in results.iter() {
        eprintln!();
        eprintln!("  {}", bold.apply_to(file_name));
        eprintln!("    {}", result.alt_text);
        eprintln!("    {}", dim.apply_to(usage_line(result)));
    }
}

/// Print totals after a successful batch.
pub(crate) fn print_summary(results: &ResultSet, elapsed: Duration) {
    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Images:       {:>10}", results.len());
    eprintln!("    Tokens:       {:>10}", results.total_tokens());
    eprintln!("    Est. cost:    {:>10}", format_cost(results.total_cost()));
    eprintln!("  ------------------------------------");
    eprintln!("    Duration:     {:>9.1}s", elapsed.as_secs_f64());
    eprintln!("  ====================================");
}

fn usage_line(result: &InferenceResult) -> String {
    let mut line = format!(
        "tokens: {} in / {} out / {} total | time: {} | cost: {}",
        result.tokens_in,
        result.tokens_out,
        result.tokens_total,
        result.duration_display(),
        result.cost_display()
    );
    if let Some(project_id) = &result.project_id {
        line.push_str(&format!(" | project: {project_id}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(project_id: Option<&str>) -> InferenceResult {
        InferenceResult {
            alt_text: "A red kite over a beach.".to_string(),
            tokens_in: 1000,
            tokens_out: 500,
            tokens_total: 1500,
            duration_seconds: 2.346,
            estimated_cost: 0.06,
            project_id: project_id.map(String::from),
        }
    }

    #[test]
    fn test_usage_line() {
        assert_eq!(
            usage_line(&result(None)),
            "tokens: 1000 in / 500 out / 1500 total | time: 2.35 seconds | cost: $0.060000"
        );
    }

    #[test]
    fn test_usage_line_with_project() {
        assert!(usage_line(&result(Some("PRJ-9"))).ends_with(" | project: PRJ-9"));
    }

    #[test]
    fn test_progress_bar_length() {
        let pb = create_progress_bar(3);
        assert_eq!(pb.length(), Some(3));
    }
}
