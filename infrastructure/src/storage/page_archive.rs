//! Archive of pages reached after logging in.

use async_trait::async_trait;
use course_application::{PageArchive, ServiceError};
use course_domain::SecretPage;
use std::path::PathBuf;
use tracing::debug;

/// Saves each page as `secret_<UTC timestamp>.html` under one directory.
pub struct FsPageArchive {
    dir: PathBuf,
}

impl FsPageArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_name() -> String {
        format!(
            "secret_{}.html",
            chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ")
        )
    }
}

#[async_trait]
impl PageArchive for FsPageArchive {
    async fn save(&self, page: &SecretPage) -> Result<PathBuf, ServiceError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(Self::file_name());
        tokio::fs::write(&path, &page.body).await?;
        debug!(path = %path.display(), source = %page.url, "Page archived");
        Ok(path)
    }
}
