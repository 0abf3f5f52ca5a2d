//! CLI `stats` command — print store statistics.

use anyhow::Result;

use crate::config::CogitoConfig;
use crate::thought::stats::thought_stats;

pub fn stats(config: &CogitoConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = super::open_db(config)?;

    let stats = thought_stats(&conn, Some(&db_path))?;

    println!("Cogito Store Statistics");
    println!("=======================");
    println!();
    println!("Total thoughts:    {}", stats.total_thoughts);
    println!("Database size:     {}", format_bytes(stats.db_size_bytes));
    if let Some(ref oldest) = stats.oldest_thought {
        println!("Oldest:            {oldest}");
    }
    if let Some(ref newest) = stats.newest_thought {
        println!("Newest:            {newest}");
    }

    println!();
    println!("By category:");
    let mut categories: Vec<_> = stats.by_category.iter().collect();
    categories.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    for (category, count) in categories {
        if *count > 0 {
            println!("  {category:<14} {count}");
        }
    }

    if !stats.by_emotion.is_empty() {
        println!();
        println!("By emotion:");
        let mut emotions: Vec<_> = stats.by_emotion.iter().collect();
        emotions.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        for (emotion, count) in emotions {
            println!("  {emotion:<14} {count}");
        }
    }

    if let (Some(avg), Some(min), Some(max)) = (
        stats.importance_avg,
        stats.importance_min,
        stats.importance_max,
    ) {
        println!();
        println!("Importance:        avg {avg:.2}, min {min:.2}, max {max:.2}");
    }

    if !stats.tag_counts.is_empty() {
        println!();
        println!("Top tags:");
        let mut tags: Vec<_> = stats.tag_counts.iter().collect();
        tags.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        for (tag, count) in tags.into_iter().take(10) {
            println!("  {tag:<14} {count}");
        }
    }

    Ok(())
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
