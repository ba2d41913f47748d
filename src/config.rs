//! Suite configuration.
//!
//! Every locator the page objects use, the site they point at and the driver
//! timeouts, loadable from JSON. Missing fields take the defaults for the
//! reference demo site.
//!
//! # Example
//!
//! ```ignore
//! use widget_verify::SuiteConfig;
//!
//! let config = SuiteConfig::from_env()?
//!     .with_command_timeout_ms(10_000)
//!     .with_max_calendar_steps(Some(240));
//! config.validate()?;
//! ```
//!
//! # Sections
//!
//! | Field | Contents |
//! |-------|----------|
//! | `baseUrl` | Page the suite opens |
//! | `timeouts` | Command and connect timeouts |
//! | `shadow` | Selector paths into the shadow DOM demo |
//! | `calendar` | Date picker locators and step budget |
//! | `pagination` | Product table and pager locators |
//! | `staticTable` | Book table locators |
//! | `checkboxes` | Checkbox list locator |
//! | `radioButtons` | Radio inputs and confirmation text |
//! | `dropdowns` | Single and multi-select lists |
//! | `fileUpload` | Upload form locators |
//!
//! The last four sections carry an optional `url` for widgets hosted outside
//! `baseUrl`; [`SuiteConfig::page_url`] resolves it.

// ============================================================================
// Imports
// ============================================================================

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::calendar::{CalendarControl, DEFAULT_MAX_STEPS};
use crate::driver::By;
use crate::error::{Error, Result};
use crate::shadow::SelectorPath;
use crate::table::{CellPolicy, PagerControl, TableControl};

// ============================================================================
// Constants
// ============================================================================

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "WIDGET_VERIFY_CONFIG";

/// Default page under test.
pub const DEFAULT_BASE_URL: &str = "https://testautomationpractice.blogspot.com/";

/// Default per-command timeout in milliseconds.
pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 30_000;

/// Default page hosting the checkbox list.
pub const DEFAULT_CHECKBOXES_URL: &str = "https://the-internet.herokuapp.com/checkboxes";

/// Default page hosting the radio buttons.
pub const DEFAULT_RADIO_BUTTONS_URL: &str = "https://demoqa.com/radio-button";

/// Default page hosting the upload form.
pub const DEFAULT_FILE_UPLOAD_URL: &str = "https://the-internet.herokuapp.com/upload";

/// Default wait for the remote bridge to connect, in milliseconds.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 30_000;

// ============================================================================
// SuiteConfig
// ============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuiteConfig {
    /// Page the suite opens.
    pub base_url: String,
    /// Driver timeouts.
    pub timeouts: TimeoutConfig,
    /// Shadow DOM demo paths.
    pub shadow: ShadowConfig,
    /// Date picker settings.
    pub calendar: CalendarConfig,
    /// Paginated table settings.
    pub pagination: PaginationConfig,
    /// Static table settings.
    pub static_table: StaticTableConfig,
    /// Checkbox list settings.
    pub checkboxes: CheckboxesConfig,
    /// Radio button settings.
    pub radio_buttons: RadioButtonsConfig,
    /// Dropdown settings.
    pub dropdowns: DropdownsConfig,
    /// Upload form settings.
    pub file_upload: FileUploadConfig,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeouts: TimeoutConfig::default(),
            shadow: ShadowConfig::default(),
            calendar: CalendarConfig::default(),
            pagination: PaginationConfig::default(),
            static_table: StaticTableConfig::default(),
            checkboxes: CheckboxesConfig::default(),
            radio_buttons: RadioButtonsConfig::default(),
            dropdowns: DropdownsConfig::default(),
            file_upload: FileUploadConfig::default(),
        }
    }
}

/// Driver timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeoutConfig {
    /// Per-command timeout.
    pub command_ms: u64,
    /// Wait for the remote bridge to connect.
    pub connect_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            command_ms: DEFAULT_COMMAND_TIMEOUT_MS,
            connect_ms: DEFAULT_CONNECT_TIMEOUT_MS,
        }
    }
}

/// Selector paths into the shadow DOM demo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShadowConfig {
    /// Scroll target wrapping the demo.
    pub container: By,
    /// `<span>` in the outer shadow root.
    pub span: SelectorPath,
    /// `<div>` in the nested shadow root.
    pub nested_div: SelectorPath,
    /// Link in the outer shadow root.
    pub link: SelectorPath,
    /// Text input.
    pub text_input: SelectorPath,
    /// Checkbox input.
    pub checkbox: SelectorPath,
    /// File input.
    pub file_input: SelectorPath,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        const HOST: &str = "div#shadow_host";
        Self {
            container: By::id("HTML16"),
            span: SelectorPath::from_css(&[HOST, "span.info"]),
            nested_div: SelectorPath::from_css(&[HOST, "div#nested_shadow_host", "div"]),
            link: SelectorPath::from_css(&[HOST, "a"]),
            text_input: SelectorPath::from_css(&[HOST, "input[type='text']"]),
            checkbox: SelectorPath::from_css(&[HOST, "input[type='checkbox']"]),
            file_input: SelectorPath::from_css(&[HOST, "input[type='file']"]),
        }
    }
}

/// Date picker settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarConfig {
    /// Input that opens the picker and receives the date.
    pub input: By,
    /// Popup locators.
    pub control: CalendarControl,
    /// Navigation step budget; `null` for none.
    pub max_steps: Option<usize>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            input: By::id("datepicker"),
            control: CalendarControl::default(),
            max_steps: Some(DEFAULT_MAX_STEPS),
        }
    }
}

/// Paginated table settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationConfig {
    /// Table locators.
    pub table: TableControl,
    /// Pager locators.
    pub pager: PagerControl,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            table: TableControl::new(By::css("table#productTable tr"))
                .with_action(By::css("input[type='checkbox']"))
                .with_expected_columns(4),
            pager: PagerControl::default(),
        }
    }
}

/// Static table settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticTableConfig {
    /// Table locators.
    pub table: TableControl,
}

impl Default for StaticTableConfig {
    fn default() -> Self {
        Self {
            table: TableControl::new(By::css("table[name='BookTable'] tr"))
                .with_cell_policy(CellPolicy::KeepEmpty),
        }
    }
}

/// Checkbox list settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckboxesConfig {
    /// Page hosting the list; `null` for `baseUrl`.
    pub url: Option<String>,
    /// Every checkbox, in page order.
    pub boxes: By,
}

impl Default for CheckboxesConfig {
    fn default() -> Self {
        Self {
            url: Some(DEFAULT_CHECKBOXES_URL.to_string()),
            boxes: By::css("form#checkboxes input[type='checkbox']"),
        }
    }
}

/// Radio button settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadioButtonsConfig {
    /// Page hosting the radios; `null` for `baseUrl`.
    pub url: Option<String>,
    /// "Yes" radio.
    pub yes: By,
    /// "Impressive" radio.
    pub impressive: By,
    /// "No" radio (disabled on the demo page).
    pub no: By,
    /// Paragraph echoing the choice.
    pub confirmation: By,
}

impl Default for RadioButtonsConfig {
    fn default() -> Self {
        Self {
            url: Some(DEFAULT_RADIO_BUTTONS_URL.to_string()),
            yes: By::id("yesRadio"),
            impressive: By::id("impressiveRadio"),
            no: By::id("noRadio"),
            confirmation: By::css("p.mt-3"),
        }
    }
}

/// Dropdown settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DropdownsConfig {
    /// Page hosting the lists; `null` for `baseUrl`.
    pub url: Option<String>,
    /// Single-select country list.
    pub country: By,
    /// Multi-select color list.
    pub colors: By,
    /// Option entries inside a list.
    pub option: By,
}

impl Default for DropdownsConfig {
    fn default() -> Self {
        Self {
            url: None,
            country: By::id("country"),
            colors: By::id("colors"),
            option: By::tag("option"),
        }
    }
}

/// Upload form settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileUploadConfig {
    /// Page hosting the form; `null` for `baseUrl`.
    pub url: Option<String>,
    /// File input.
    pub input: By,
    /// Submit button.
    pub submit: By,
    /// Heading shown after a successful upload.
    pub success: By,
    /// Element listing the uploaded file name.
    pub uploaded: By,
}

impl Default for FileUploadConfig {
    fn default() -> Self {
        Self {
            url: Some(DEFAULT_FILE_UPLOAD_URL.to_string()),
            input: By::id("file-upload"),
            submit: By::id("file-submit"),
            success: By::text("File Uploaded!"),
            uploaded: By::id("uploaded-files"),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl SuiteConfig {
    /// Parses JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file can't be read, [`Error::Json`] if it doesn't
    /// parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading config");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Loads the file named by `WIDGET_VERIFY_CONFIG`, or the defaults if the
    /// variable is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves a section's page: its own `url`, else `baseUrl`.
    #[must_use]
    pub fn page_url<'a>(&'a self, section_url: Option<&'a str>) -> &'a str {
        section_url.unwrap_or(&self.base_url)
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl SuiteConfig {
    /// Sets the page under test.
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the per-command timeout.
    #[inline]
    #[must_use]
    pub fn with_command_timeout_ms(mut self, ms: u64) -> Self {
        self.timeouts.command_ms = ms;
        self
    }

    /// Sets the connect timeout.
    #[inline]
    #[must_use]
    pub fn with_connect_timeout_ms(mut self, ms: u64) -> Self {
        self.timeouts.connect_ms = ms;
        self
    }

    /// Sets the calendar step budget.
    #[inline]
    #[must_use]
    pub fn with_max_calendar_steps(mut self, max_steps: Option<usize>) -> Self {
        self.calendar.max_steps = max_steps;
        self
    }

    /// Replaces the pagination settings.
    #[inline]
    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// Replaces the static table settings.
    #[inline]
    #[must_use]
    pub fn with_static_table(mut self, static_table: StaticTableConfig) -> Self {
        self.static_table = static_table;
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl SuiteConfig {
    /// Checks values serde can't.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        check_url("baseUrl", &self.base_url)?;
        for (field, url) in [
            ("checkboxes.url", &self.checkboxes.url),
            ("radioButtons.url", &self.radio_buttons.url),
            ("dropdowns.url", &self.dropdowns.url),
            ("fileUpload.url", &self.file_upload.url),
        ] {
            if let Some(url) = url {
                check_url(field, url)?;
            }
        }

        if self.timeouts.command_ms == 0 {
            return Err(Error::config("timeouts.commandMs must be positive"));
        }
        if self.timeouts.connect_ms == 0 {
            return Err(Error::config("timeouts.connectMs must be positive"));
        }
        if self.calendar.max_steps == Some(0) {
            return Err(Error::config(
                "calendar.maxSteps must be positive or null",
            ));
        }

        for (field, control) in [
            ("pagination.table", &self.pagination.table),
            ("staticTable.table", &self.static_table.table),
        ] {
            if control.rows.is_blank() || control.cells.is_blank() {
                return Err(Error::config(format!("{field} has a blank locator")));
            }
            if control.expected_columns == Some(0) {
                return Err(Error::config(format!(
                    "{field}.expectedColumns must be positive"
                )));
            }
        }
        if self.pagination.pager.links.is_blank() {
            return Err(Error::config("pagination.pager.links is blank"));
        }

        Ok(())
    }
}

/// Parses `url` and requires a scheme a browser can load.
fn check_url(field: &str, url: &str) -> Result<()> {
    let parsed = Url::parse(url).map_err(|e| Error::config(format!("{field} {url:?}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https" | "file") {
        return Err(Error::config(format!(
            "{field} scheme {:?} is not http, https or file",
            parsed.scheme()
        )));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
