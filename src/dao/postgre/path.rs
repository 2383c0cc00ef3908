use std::{fs, path::PathBuf};

use crate::error::Error;

/// Load a migration file from `migration/postgresql/`.
pub fn read_migration(dir: &str, file: &str) -> Result<String, Error> {
    let mut buf = PathBuf::new();

    for chunk in [dir, "migration", "postgresql", file] {
        buf.push(chunk);
    }

    Ok(fs::read_to_string(buf)?)
}
