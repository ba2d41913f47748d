//! Shadow DOM page.

use crate::config::ShadowConfig;
use crate::driver::{UiContext, UiNode};
use crate::error::Result;
use crate::shadow::{self, SelectorPath};

// ============================================================================
// ShadowDomPage
// ============================================================================

/// Reads and drives the nodes inside the shadow DOM demo.
///
/// Every call locates its node afresh from the document.
#[derive(Debug, Clone)]
pub struct ShadowDomPage {
    ctx: UiContext,
    config: ShadowConfig,
}

impl ShadowDomPage {
    /// Creates the page object.
    #[must_use]
    pub fn new(ctx: UiContext, config: &ShadowConfig) -> Self {
        Self {
            ctx,
            config: config.clone(),
        }
    }

    /// Returns `true` if the demo's container is on the page.
    pub async fn is_present(&self) -> Result<bool> {
        Ok(self.ctx.try_find(self.config.container.clone()).await?.is_some())
    }

    /// Text of the `<span>` in the outer shadow root.
    pub async fn span_text(&self) -> Result<String> {
        self.locate(&self.config.span).await?.text().await
    }

    /// Text of the `<div>` in the nested shadow root.
    pub async fn nested_div_text(&self) -> Result<String> {
        self.locate(&self.config.nested_div).await?.text().await
    }

    /// Text of the link in the outer shadow root.
    pub async fn link_text(&self) -> Result<String> {
        self.locate(&self.config.link).await?.text().await
    }

    /// Types into the text input.
    pub async fn enter_text(&self, text: &str) -> Result<()> {
        self.locate(&self.config.text_input).await?.send_keys(text).await
    }

    /// Current value of the text input.
    pub async fn input_value(&self) -> Result<Option<String>> {
        self.locate(&self.config.text_input)
            .await?
            .attribute("value")
            .await
    }

    /// Clicks the checkbox.
    pub async fn select_checkbox(&self) -> Result<()> {
        self.locate(&self.config.checkbox).await?.click().await
    }

    /// Returns `true` if the checkbox is checked.
    pub async fn is_checkbox_selected(&self) -> Result<bool> {
        self.locate(&self.config.checkbox).await?.is_selected().await
    }

    /// Returns `true` if the file input is displayed.
    pub async fn is_file_input_visible(&self) -> Result<bool> {
        self.locate(&self.config.file_input).await?.is_visible().await
    }

    async fn locate(&self, path: &SelectorPath) -> Result<UiNode> {
        shadow::locate(&self.ctx, path).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fixture::{FixtureDom, widgets};

    fn page() -> ShadowDomPage {
        let dom = FixtureDom::new();
        widgets::shadow_dom(&dom);
        ShadowDomPage::new(dom.context(), &ShadowConfig::default())
    }

    #[tokio::test]
    async fn test_texts() {
        let page = page();
        assert!(page.is_present().await.expect("present"));
        assert!(page.span_text().await.expect("span").contains("Mobiles"));
        assert!(page.nested_div_text().await.expect("div").contains("Laptops"));
        assert!(page.link_text().await.expect("link").contains("Blog"));
    }

    #[tokio::test]
    async fn test_input_and_checkbox() {
        let page = page();

        page.enter_text("This is a Shadow DOM input").await.expect("typed");
        assert_eq!(
            page.input_value().await.expect("value").as_deref(),
            Some("This is a Shadow DOM input")
        );

        assert!(!page.is_checkbox_selected().await.expect("state"));
        page.select_checkbox().await.expect("click");
        assert!(page.is_checkbox_selected().await.expect("state"));
    }

    #[tokio::test]
    async fn test_file_input_visible() {
        assert!(page().is_file_input_visible().await.expect("visible"));
    }
}
