// Colored terminal output for corpus summaries and sweep results.
//
// This module handles all terminal-specific formatting: colors, tables,
// alignment. The main.rs display logic delegates here.

use colored::Colorize;

use crate::explore::sweep::KSweep;
use crate::output::truncate_chars;
use crate::pipeline::import::CorpusEntry;

/// Display a short summary of an imported corpus.
pub fn display_corpus_summary(entries: &[CorpusEntry]) {
    if entries.is_empty() {
        println!("No records imported. Check the corpus directory.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Imported Corpus ({} records) ===", entries.len()).bold()
    );
    println!();

    let empty_abstracts = entries.iter().filter(|e| e.cleaned.is_empty()).count();
    let mean_tokens: f64 = entries
        .iter()
        .map(|e| e.cleaned.split_whitespace().count() as f64)
        .sum::<f64>()
        / entries.len() as f64;

    println!("  Mean abstract length: {mean_tokens:.0} tokens");
    if empty_abstracts > 0 {
        println!(
            "  {}",
            format!("{empty_abstracts} records cleaned to empty text").yellow()
        );
    }
    println!();

    // A few titles so the user can sanity-check what was sampled
    for entry in entries.iter().take(5) {
        println!(
            "  {:<28} {}",
            entry.file.dimmed(),
            truncate_chars(&entry.title, 60)
        );
    }
    if entries.len() > 5 {
        println!("  {}", format!("... and {} more", entries.len() - 5).dimmed());
    }
    println!();
}

/// Display the sweep score table with a best-k readout per metric.
pub fn display_sweep(sweep: &KSweep) {
    println!(
        "\n{}",
        format!(
            "=== Cluster Quality Sweep (k = {}..{}) ===",
            sweep.ks.first().copied().unwrap_or(0),
            sweep.ks.last().copied().unwrap_or(0),
        )
        .bold()
    );
    println!();

    println!(
        "  {:>4}  {:>12}  {:>18}  {:>15}",
        "k".dimmed(),
        "Silhouette".dimmed(),
        "Calinski-Harabasz".dimmed(),
        "Davies-Bouldin".dimmed(),
    );
    println!("  {}", "-".repeat(58).dimmed());

    let (best_sil, best_ch, best_db) = sweep.best_k();

    for (i, &k) in sweep.ks.iter().enumerate() {
        let mark = |best: usize| if k == best { "*" } else { " " };
        println!(
            "  {:>4}  {:>11.4}{} {:>17.2}{} {:>14.4}{}",
            k,
            sweep.silhouette[i],
            mark(best_sil).green(),
            sweep.calinski_harabasz[i],
            mark(best_ch).green(),
            sweep.davies_bouldin[i],
            mark(best_db).green(),
        );
    }

    println!();
    println!(
        "  Best k: silhouette {} | Calinski-Harabasz {} | Davies-Bouldin {}",
        best_sil.to_string().bold(),
        best_ch.to_string().bold(),
        best_db.to_string().bold(),
    );
    if best_sil == best_ch && best_ch == best_db {
        println!("  {}", "All three metrics agree.".green());
    } else {
        println!(
            "  {}",
            "Metrics disagree — inspect the score curves before settling on k.".yellow()
        );
    }
    println!();
}
