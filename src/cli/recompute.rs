//! CLI `recompute` command — re-annotate stored thoughts with the current
//! lexicon, with a progress bar.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::analysis::{lexicon::LEXICON_VERSION, Lexicon};
use crate::config::CogitoConfig;
use crate::thought::recompute::recompute_annotations;

pub fn recompute(config: &CogitoConfig, limit: Option<usize>) -> Result<()> {
    let mut conn = super::open_db(config).context("failed to open database")?;
    let lexicon = Lexicon::builtin();

    let total: i64 = conn.query_row("SELECT COUNT(*) FROM thoughts", [], |row| row.get(0))?;
    if total == 0 {
        println!("No thoughts to recompute.");
        return Ok(());
    }

    let in_scope = limit.map_or(total as u64, |n| (n as u64).min(total as u64));
    println!("Recomputing annotations for {in_scope} thoughts with lexicon '{LEXICON_VERSION}'...");

    let pb = ProgressBar::new(in_scope);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  {bar:40.cyan/blue} {pos}/{len} ({eta})")
            .expect("valid template")
            .progress_chars("##-"),
    );

    let outcome = recompute_annotations(&mut conn, &lexicon, &config.analysis, limit, || {
        pb.inc(1);
    })?;

    pb.finish_and_clear();

    println!(
        "Recomputed {} thoughts, {} changed.",
        outcome.scanned, outcome.updated
    );
    Ok(())
}
