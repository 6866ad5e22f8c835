use crate::models::LogDocument;
use std::path::Path;
use tokio::fs;
use tracing::error;

pub async fn load_document(path: &Path) -> LogDocument {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(doc) => doc,
            Err(err) => {
                error!("failed to parse log document: {err}");
                LogDocument::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => LogDocument::default(),
        Err(err) => {
            error!("failed to read log document: {err}");
            LogDocument::default()
        }
    }
}

pub async fn persist_document(path: &Path, doc: &LogDocument) -> Result<(), std::io::Error> {
    let payload = serde_json::to_vec_pretty(doc).map_err(std::io::Error::other)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exercise;

    #[tokio::test]
    async fn load_returns_empty_document_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let doc = load_document(&path).await;
        assert!(doc.logs.is_empty());
    }

    #[tokio::test]
    async fn persist_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("misogi-2026.json");

        let mut doc = LogDocument::default();
        doc.logs
            .entry("2026-01-01".to_string())
            .or_default()
            .add(Exercise::Pullups, 9);
        persist_document(&path, &doc).await.unwrap();

        let loaded = load_document(&path).await;
        assert_eq!(loaded.logs.get("2026-01-01").unwrap().pullups, 9);
    }

    #[tokio::test]
    async fn load_survives_a_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("misogi-2026.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let doc = load_document(&path).await;
        assert!(doc.logs.is_empty());
    }
}
