//! Command-log export.
//!
//! Writes the confirmed-command log to a timestamped CSV under the
//! platform data directory. Export failures are surfaced on the status
//! line by the caller, never fatal.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::Local;

use crate::config;
use crate::modules::modal::CommandRecord;

fn export_dir() -> Result<PathBuf> {
    let dir = config::data_dir()
        .ok_or_else(|| anyhow!("no data directory available"))?
        .join("exports");
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(dir)
}

fn generate_filename(prefix: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d-%H%M%S");
    format!("{}-{}.csv", prefix, timestamp)
}

/// Export the command log. Returns the path written.
pub fn export_command_log(records: &[CommandRecord]) -> Result<PathBuf> {
    if records.is_empty() {
        return Err(anyhow!("no commands to export"));
    }
    let path = export_dir()?.join(generate_filename("commands"));
    write_commands(&path, records)?;
    Ok(path)
}

pub fn write_commands(path: &Path, records: &[CommandRecord]) -> Result<usize> {
    let mut wtr =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;

    wtr.write_record(["timestamp", "action", "drone_id"])?;
    for record in records {
        wtr.write_record([
            record.at.to_rfc3339(),
            record.action.title().to_string(),
            record.target_id.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::modal::EmergencyAction;
    use chrono::Utc;

    #[test]
    fn writes_one_row_per_record() {
        let records = vec![
            CommandRecord {
                action: EmergencyAction::ReturnHome,
                target_id: "DR-1".to_string(),
                at: Utc::now(),
            },
            CommandRecord {
                action: EmergencyAction::EmergencyLand,
                target_id: "DR-2".to_string(),
                at: Utc::now(),
            },
        ];
        let dir = std::env::temp_dir().join("dronedeck-export-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("commands.csv");
        let count = write_commands(&path, &records).unwrap();
        assert_eq!(count, 2);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("timestamp,action,drone_id"));
        assert!(content.contains("Return Home,DR-1"));
        assert!(content.contains("Emergency Land,DR-2"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn empty_log_is_an_error() {
        assert!(export_command_log(&[]).is_err());
    }
}
