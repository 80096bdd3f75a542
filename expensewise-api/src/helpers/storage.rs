use std::path::{Path, PathBuf};

/// Where uploaded documents are written
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stores the bytes under a fresh unique name that keeps the original extension
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> anyhow::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.root).await?;

        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| ext.to_ascii_lowercase());

        let stored_name = match extension {
            Some(ext) => format!("{}.{}", uuid::Uuid::new_v4(), ext),
            None => uuid::Uuid::new_v4().to_string(),
        };

        let path = self.root.join(stored_name);
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Stored upload");

        Ok(path)
    }

    /// Writes the text transcript read by document processing next to a
    /// stored upload, as `<document>.txt`
    pub async fn save_transcript(&self, document: &Path, text: &str) -> anyhow::Result<PathBuf> {
        if document.parent() != Some(self.root.as_path()) {
            anyhow::bail!("Document is not stored in the upload directory");
        }

        let mut transcript = document.as_os_str().to_owned();
        transcript.push(".txt");
        let transcript = PathBuf::from(transcript);
        tokio::fs::write(&transcript, text).await?;

        tracing::debug!(path = %transcript.display(), size = text.len(), "Stored transcript");

        Ok(transcript)
    }
}

/// Final path component of a client-supplied name, without directories
pub fn sanitize_filename(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next()?.trim();
    if base.is_empty() || base == "." || base == ".." {
        None
    } else {
        Some(base.to_string())
    }
}
