//! CLI `reset` command — delete the database files.

use anyhow::{Context, Result};

use crate::config::CogitoConfig;

/// Delete the database (plus WAL/SHM sidecars). Requires `--confirm`.
pub fn reset(config: &CogitoConfig, confirm: bool) -> Result<()> {
    let db_path = config.resolved_db_path();

    if !confirm {
        println!("This will permanently delete {}.", db_path.display());
        println!("Re-run with --confirm to proceed.");
        return Ok(());
    }

    if !db_path.exists() {
        println!("Nothing to reset — no database at {}.", db_path.display());
        return Ok(());
    }

    std::fs::remove_file(&db_path)
        .with_context(|| format!("failed to delete {}", db_path.display()))?;

    // WAL sidecars may or may not exist
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = db_path.clone().into_os_string();
        sidecar.push(suffix);
        let sidecar = std::path::PathBuf::from(sidecar);
        if sidecar.exists() {
            std::fs::remove_file(&sidecar)
                .with_context(|| format!("failed to delete {}", sidecar.display()))?;
        }
    }

    println!("Deleted {}.", db_path.display());
    Ok(())
}
