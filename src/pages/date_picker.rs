//! Date picker page.

use tracing::debug;

use crate::calendar::{CalendarNavigator, TargetDate};
use crate::config::CalendarConfig;
use crate::driver::{By, UiContext};
use crate::error::Result;

// ============================================================================
// DatePickerPage
// ============================================================================

/// Opens the date picker and selects dates in it.
#[derive(Debug, Clone)]
pub struct DatePickerPage {
    ctx: UiContext,
    input: By,
    navigator: CalendarNavigator,
}

impl DatePickerPage {
    /// Creates the page object.
    #[must_use]
    pub fn new(ctx: UiContext, config: &CalendarConfig) -> Self {
        Self {
            ctx,
            input: config.input.clone(),
            navigator: CalendarNavigator::new(config.control.clone())
                .with_max_steps(config.max_steps),
        }
    }

    /// Returns the navigator this page drives.
    #[inline]
    #[must_use]
    pub fn navigator(&self) -> &CalendarNavigator {
        &self.navigator
    }

    /// Clicks the input to show the popup.
    pub async fn open(&self) -> Result<()> {
        debug!(input = %self.input, "Opening date picker");
        self.ctx.find(self.input.clone()).await?.click().await
    }

    /// Navigates to `date` and clicks its day. Returns the navigation clicks.
    pub async fn select_date(&self, date: &TargetDate) -> Result<usize> {
        self.navigator.select_date(&self.ctx, date).await
    }

    /// The input's value, `MM/DD/YYYY` once a date is picked.
    pub async fn selected_date(&self) -> Result<Option<String>> {
        self.ctx.find(self.input.clone()).await?.attribute("value").await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::calendar::{CalendarState, Month};
    use crate::error::Error;
    use crate::fixture::{FixtureDom, widgets};

    fn page(start: CalendarState, config: &CalendarConfig) -> DatePickerPage {
        let dom = FixtureDom::new();
        widgets::date_picker(&dom, start);
        DatePickerPage::new(dom.context(), config)
    }

    #[tokio::test]
    async fn test_select_future_and_past_dates() {
        for (date, expected) in [
            (TargetDate::new(Month::January, 26, 2026), "01/26/2026"),
            (TargetDate::new(Month::March, 30, 2021), "03/30/2021"),
        ] {
            let page = page(
                CalendarState::new(Month::July, 2024),
                &CalendarConfig::default(),
            );
            page.open().await.expect("open");
            page.select_date(&date.expect("date")).await.expect("select");

            assert_eq!(page.selected_date().await.expect("value").as_deref(), Some(expected));
        }
    }

    #[tokio::test]
    async fn test_config_step_budget_applies() {
        let config = CalendarConfig {
            max_steps: Some(2),
            ..CalendarConfig::default()
        };
        let page = page(CalendarState::new(Month::July, 2024), &config);
        assert_eq!(page.navigator().max_steps(), Some(2));

        page.open().await.expect("open");
        let err = page
            .select_date(&TargetDate::new(Month::December, 1, 2024).expect("date"))
            .await
            .expect_err("five steps needed");
        assert!(matches!(err, Error::StepLimitExceeded { .. }));
        assert_eq!(page.selected_date().await.expect("value"), None);
    }
}
