use std::path::PathBuf;

use async_trait::async_trait;
use shared::models::Lead;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::{LeadSink, SinkError};

/// Appends each lead as one JSON object per line
pub struct JsonlSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl LeadSink for JsonlSink {
    async fn append(&self, lead: &Lead) -> Result<(), SinkError> {
        let mut line =
            serde_json::to_string(lead).map_err(|e| SinkError::Decode(e.to_string()))?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::BookingRequest;

    fn lead(name: &str) -> Lead {
        let at = NaiveDate::from_ymd_opt(2026, 6, 14)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        Lead::new(
            BookingRequest {
                name: name.into(),
                phone: "555".into(),
                date: "2026-06-14".into(),
                time: "20:00".into(),
                party_size: 3,
            },
            3,
            at,
        )
    }

    #[tokio::test]
    async fn test_appends_one_line_per_lead() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("leads.jsonl");
        let sink = JsonlSink::new(&path);

        sink.append(&lead("Ana")).await.unwrap();
        sink.append(&lead("Ben")).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let rows: Vec<Lead> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Ana");
        assert_eq!(rows[1].name, "Ben");
        assert_eq!(rows[1].timestamp, "2026-06-14T20:00:00");
    }
}
