//! CLI `doctor` command — run database diagnostics and print a health report.

use anyhow::{Context, Result};

use crate::analysis::lexicon::LEXICON_VERSION;
use crate::config::CogitoConfig;
use crate::db;

/// Run database diagnostics and print a health report.
pub fn doctor(config: &CogitoConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    if !db_path.exists() {
        println!("Database: not found at {}", db_path.display());
        println!("Run `cogito log` or `cogito serve` to initialize.");
        return Ok(());
    }

    let file_size = std::fs::metadata(&db_path)
        .map(|m| m.len())
        .unwrap_or(0);

    let conn = db::open_database(&db_path)
        .context("failed to open database (may be corrupt)")?;

    let report = db::check_database_health(&conn)
        .context("failed to run health check")?;

    println!("Cogito Health Report");
    println!("====================");
    println!();
    println!("Database:          {}", db_path.display());
    println!("File size:         {}", super::stats::format_bytes(file_size));
    println!("Schema version:    {}", report.schema_version);
    println!();
    println!("Lexicon:");
    println!(
        "  Stored:          {}",
        report.lexicon_version.as_deref().unwrap_or("(not set)")
    );
    println!("  Current:         {LEXICON_VERSION}");
    if let Some(ref stored) = report.lexicon_version {
        if stored != LEXICON_VERSION {
            println!("  WARNING: lexicon changed! Run `cogito recompute` to refresh scores.");
        } else {
            println!("  Status:          OK (match)");
        }
    }
    println!();
    println!("Row counts:");
    println!("  Thoughts:        {}", report.thought_count);
    println!("  Annotated:       {}", report.annotated_count);
    println!("  Audit log:       {}", report.log_count);
    println!();
    if report.integrity_ok {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   FAILED ({})", report.integrity_details);
    }

    if !report.integrity_ok {
        println!();
        println!("Recovery steps:");
        println!("  1. Restore from a backup: cp backup.db ~/.cogito/thoughts.db");
        println!("  2. Or export from a good copy and start fresh:");
        println!("     cogito export > backup.json");
        println!("     cogito reset --confirm");
    }

    Ok(())
}
