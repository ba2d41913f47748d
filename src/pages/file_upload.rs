//! File upload page.

use tracing::debug;

use crate::config::FileUploadConfig;
use crate::driver::UiContext;
use crate::error::Result;

// ============================================================================
// FileUploadPage
// ============================================================================

/// Fills the upload form and reads the result page.
#[derive(Debug, Clone)]
pub struct FileUploadPage {
    ctx: UiContext,
    config: FileUploadConfig,
}

impl FileUploadPage {
    /// Creates the page object.
    #[must_use]
    pub fn new(ctx: UiContext, config: &FileUploadConfig) -> Self {
        Self {
            ctx,
            config: config.clone(),
        }
    }

    /// Types `path` into the file input.
    pub async fn choose_file(&self, path: &str) -> Result<()> {
        debug!(path, "Choosing file");
        self.ctx.find(self.config.input.clone()).await?.send_keys(path).await
    }

    /// Clicks the submit button.
    pub async fn submit(&self) -> Result<()> {
        self.ctx.find(self.config.submit.clone()).await?.click().await
    }

    /// Chooses `path` and submits the form.
    pub async fn upload(&self, path: &str) -> Result<()> {
        self.choose_file(path).await?;
        self.submit().await
    }

    /// Returns `true` once the success heading is displayed.
    pub async fn is_success_displayed(&self) -> Result<bool> {
        match self.ctx.try_find(self.config.success.clone()).await? {
            Some(heading) => heading.is_visible().await,
            None => Ok(false),
        }
    }

    /// File name the result page reports.
    pub async fn uploaded_file_name(&self) -> Result<String> {
        self.ctx.find(self.config.uploaded.clone()).await?.text().await
    }
}

/// Last component of a `/` or `\` separated path.
#[must_use]
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fixture::{FixtureDom, widgets};

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("/Users/demo/Desktop/TestFile"), "TestFile");
        assert_eq!(file_name(r"C:\data\report.txt"), "report.txt");
        assert_eq!(file_name("plain.txt"), "plain.txt");
    }

    #[tokio::test]
    async fn test_upload_reports_file_name() {
        let dom = FixtureDom::new();
        widgets::file_upload(&dom);
        let page = FileUploadPage::new(dom.context(), &FileUploadConfig::default());
        assert!(!page.is_success_displayed().await.expect("before"));

        let path = "/Users/demo/Desktop/TestFile";
        page.upload(path).await.expect("upload");

        assert!(page.is_success_displayed().await.expect("after"));
        assert_eq!(page.uploaded_file_name().await.expect("name"), file_name(path));
    }
}
