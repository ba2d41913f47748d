//! Runs every widget check against the in-memory replica.
//!
//! Demonstrates:
//! - Loading `SuiteConfig` (from `WIDGET_VERIFY_CONFIG` when set)
//! - Shadow DOM reads and input through selector paths
//! - Date picker navigation to a future and a past date
//! - Paginated and static table reads
//!
//! - Checkbox, radio, dropdown and upload forms
//!
//! Usage:
//!   cargo run --example offline_suite
//!   cargo run --example offline_suite -- --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use common::Args;
use widget_verify::calendar::{CalendarState, Month};
use widget_verify::fixture::{FixtureDom, widgets};
use widget_verify::{
    Answer, CheckboxesPage, DatePickerPage, DropdownsPage, FileUploadPage, PaginationTablePage,
    RadioButtonsPage, Result, ShadowDomPage, StaticTablePage, SuiteConfig, TargetDate,
};

// ============================================================================
// Constants
// ============================================================================

const PICKER_START: CalendarState = CalendarState {
    month: Month::October,
    year: 2025,
};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    if let Err(e) = run().await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    println!("=== Offline widget suite ===\n");

    let config = SuiteConfig::from_env()?;
    config.validate()?;
    println!("[Setup] Config loaded\n");

    // ========================================================================
    // Shadow DOM
    // ========================================================================

    println!("[1] Shadow DOM");
    let dom = FixtureDom::new();
    widgets::shadow_dom(&dom);
    let page = ShadowDomPage::new(dom.context(), &config.shadow);

    println!("    span:        '{}'", page.span_text().await?);
    println!("    nested div:  '{}'", page.nested_div_text().await?);
    println!("    link:        '{}'", page.link_text().await?);

    page.enter_text("widget").await?;
    page.select_checkbox().await?;
    println!("    input value: {:?}", page.input_value().await?);
    println!("    checkbox:    {}", page.is_checkbox_selected().await?);
    println!("    file input:  visible={}", page.is_file_input_visible().await?);
    println!("    ✓ {} driver queries\n", dom.stats().queries);

    // ========================================================================
    // Date picker
    // ========================================================================

    println!("[2] Date picker (starting at {PICKER_START})");
    for text in ["01/26/2026", "03/30/2021"] {
        let dom = FixtureDom::new();
        widgets::date_picker(&dom, PICKER_START);
        let page = DatePickerPage::new(dom.context(), &config.calendar);

        let target: TargetDate = text.parse()?;
        page.open().await?;
        let steps = page.select_date(&target).await?;
        println!(
            "    {target}: {steps} clicks, input now {:?}",
            page.selected_date().await?
        );
    }
    println!();

    // ========================================================================
    // Paginated table
    // ========================================================================

    println!("[3] Paginated table");
    let dom = FixtureDom::new();
    widgets::pagination_table(&dom);
    let page = PaginationTablePage::new(dom.context(), &config.pagination);

    let pages = page.begin_pagination().await?;
    for (index, snapshot) in pages.iter().enumerate() {
        println!("    page {}: {} rows", index + 1, snapshot.len());
        for row in snapshot {
            println!("        {}", row.join(" | "));
        }
    }
    println!();

    // ========================================================================
    // Static table
    // ========================================================================

    println!("[4] Static table");
    let dom = FixtureDom::new();
    widgets::static_table(&dom);
    let page = StaticTablePage::new(dom.context(), &config.static_table);

    for row in page.read_all().await? {
        println!("    {}", row.join(" | "));
    }

    println!();

    // ========================================================================
    // Form controls
    // ========================================================================

    println!("[5] Checkboxes");
    let dom = FixtureDom::new();
    widgets::checkboxes(&dom);
    let page = CheckboxesPage::new(dom.context(), &config.checkboxes);
    println!("    before: {:?}", page.states().await?);
    let clicked = page.select_all().await?;
    println!("    after:  {:?} ({clicked} clicked)\n", page.states().await?);

    println!("[6] Radio buttons");
    let dom = FixtureDom::new();
    widgets::radio_buttons(&dom);
    let page = RadioButtonsPage::new(dom.context(), &config.radio_buttons);
    for answer in [Answer::Yes, Answer::Impressive, Answer::No] {
        page.choose(answer).await?;
        println!(
            "    {answer}: enabled={} selected={} message={:?}",
            page.is_enabled(answer).await?,
            page.is_selected(answer).await?,
            page.confirmation().await?
        );
    }
    println!();

    println!("[7] Dropdowns");
    let dom = FixtureDom::new();
    widgets::dropdowns(&dom);
    let page = DropdownsPage::new(dom.context(), &config.dropdowns);
    page.country().select_by_text("Brazil").await?;
    println!("    country: {:?}", page.country().first_selected().await?);
    page.colors().select_by_text("Blue").await?;
    page.colors().select_by_value("white").await?;
    page.colors().select_by_index(3).await?;
    println!("    colors:  {:?}\n", page.colors().all_selected().await?);

    println!("[8] File upload");
    let dom = FixtureDom::new();
    widgets::file_upload(&dom);
    let page = FileUploadPage::new(dom.context(), &config.file_upload);
    page.upload("/tmp/widget-verify/TestFile").await?;
    println!(
        "    success={} file={:?}",
        page.is_success_displayed().await?,
        page.uploaded_file_name().await?
    );

    println!("\n=== All checks finished ===");
    Ok(())
}
