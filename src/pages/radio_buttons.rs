//! Radio button page.

use std::fmt;

use crate::config::RadioButtonsConfig;
use crate::driver::{By, UiContext, UiNode};
use crate::error::Result;

// ============================================================================
// Answer
// ============================================================================

/// The three radios of the `like` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    /// "Yes".
    Yes,
    /// "Impressive".
    Impressive,
    /// "No", disabled on the demo page.
    No,
}

impl Answer {
    /// Label shown next to the radio.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::Impressive => "Impressive",
            Self::No => "No",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// RadioButtonsPage
// ============================================================================

/// Chooses answers and reads the echoed confirmation.
#[derive(Debug, Clone)]
pub struct RadioButtonsPage {
    ctx: UiContext,
    config: RadioButtonsConfig,
}

impl RadioButtonsPage {
    /// Creates the page object.
    #[must_use]
    pub fn new(ctx: UiContext, config: &RadioButtonsConfig) -> Self {
        Self {
            ctx,
            config: config.clone(),
        }
    }

    /// Clicks the radio for `answer`.
    pub async fn choose(&self, answer: Answer) -> Result<()> {
        self.radio(answer).await?.click().await
    }

    /// Returns `true` if the radio for `answer` is checked.
    pub async fn is_selected(&self, answer: Answer) -> Result<bool> {
        self.radio(answer).await?.is_selected().await
    }

    /// Returns `false` if the radio carries `disabled`.
    pub async fn is_enabled(&self, answer: Answer) -> Result<bool> {
        let disabled = self.radio(answer).await?.attribute("disabled").await?;
        Ok(disabled.is_none())
    }

    /// Confirmation text, or `None` before any choice.
    pub async fn confirmation(&self) -> Result<Option<String>> {
        match self.ctx.try_find(self.config.confirmation.clone()).await? {
            Some(message) => Ok(Some(message.text().await?)),
            None => Ok(None),
        }
    }

    async fn radio(&self, answer: Answer) -> Result<UiNode> {
        let locator: &By = match answer {
            Answer::Yes => &self.config.yes,
            Answer::Impressive => &self.config.impressive,
            Answer::No => &self.config.no,
        };
        self.ctx.find(locator.clone()).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fixture::{FixtureDom, widgets};

    fn page() -> RadioButtonsPage {
        let dom = FixtureDom::new();
        widgets::radio_buttons(&dom);
        RadioButtonsPage::new(dom.context(), &RadioButtonsConfig::default())
    }

    #[tokio::test]
    async fn test_choose_yes_then_impressive() {
        let page = page();
        assert_eq!(page.confirmation().await.expect("none yet"), None);

        page.choose(Answer::Yes).await.expect("yes");
        assert!(page.is_selected(Answer::Yes).await.expect("state"));
        assert_eq!(
            page.confirmation().await.expect("message").as_deref(),
            Some("You have selected Yes")
        );

        page.choose(Answer::Impressive).await.expect("impressive");
        assert!(page.is_selected(Answer::Impressive).await.expect("state"));
        assert!(!page.is_selected(Answer::Yes).await.expect("cleared"));
        assert!(
            page.confirmation()
                .await
                .expect("message")
                .is_some_and(|text| text.contains("Impressive"))
        );
    }

    #[tokio::test]
    async fn test_disabled_answer_stays_unselected() {
        let page = page();
        assert!(!page.is_enabled(Answer::No).await.expect("enabled"));
        assert!(page.is_enabled(Answer::Yes).await.expect("enabled"));

        page.choose(Answer::No).await.expect("click is accepted");
        assert!(!page.is_selected(Answer::No).await.expect("state"));
        assert_eq!(page.confirmation().await.expect("none"), None);
    }
}
