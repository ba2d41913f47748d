//! Runs the widget checks against the live demo pages through the bridge.
//!
//! Demonstrates:
//! - Binding the bridge server and waiting for the browser to connect
//! - Navigating to `baseUrl` and driving the four main widgets on it
//! - Visiting the checkbox, radio and upload pages at their own URLs
//!
//! Point the in-browser automation bridge at the printed WebSocket URL after
//! starting the demo.
//!
//! Usage:
//!   cargo run --example remote_suite
//!   cargo run --example remote_suite -- --port 9222 --debug
//!   cargo run --example remote_suite -- --upload /path/to/file

mod common;

// ============================================================================
// Imports
// ============================================================================

use std::net::{IpAddr, Ipv4Addr};

use common::Args;
use widget_verify::transport::PendingServer;
use widget_verify::{
    Answer, CheckboxesPage, DatePickerPage, DropdownsPage, FileUploadPage, PaginationTablePage,
    RadioButtonsPage, RemoteDriver, Result, ShadowDomPage, StaticTablePage, SuiteConfig,
    TargetDate,
};

// ============================================================================
// Constants
// ============================================================================

const TARGET_DATE: &str = "01/26/2027";

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    println!("=== Remote widget suite ===\n");

    let config = SuiteConfig::from_env()?;
    config.validate()?;

    // ========================================================================
    // Connect
    // ========================================================================

    let server = PendingServer::bind(IpAddr::V4(Ipv4Addr::LOCALHOST), args.port).await?;
    println!("[Setup] Waiting for the bridge on {}", server.ws_url());

    let driver = RemoteDriver::accept(server, &config.timeouts).await?;
    println!("        ✓ Connected (session {})\n", driver.session_id());

    let result = run_checks(&driver, &config, &args).await;
    driver.shutdown();
    result?;

    println!("\n=== All checks finished ===");
    Ok(())
}

async fn run_checks(driver: &RemoteDriver, config: &SuiteConfig, args: &Args) -> Result<()> {
    println!("[Setup] Opening {}\n", config.base_url);
    driver.navigate(&config.base_url).await?;
    let ctx = driver.context();

    // ========================================================================
    // Shadow DOM
    // ========================================================================

    println!("[1] Shadow DOM");
    let page = ShadowDomPage::new(ctx.clone(), &config.shadow);
    println!("    span:        '{}'", page.span_text().await?);
    println!("    nested div:  '{}'", page.nested_div_text().await?);
    println!("    link:        '{}'", page.link_text().await?);
    page.enter_text("widget").await?;
    page.select_checkbox().await?;
    println!("    input value: {:?}", page.input_value().await?);
    println!("    checkbox:    {}\n", page.is_checkbox_selected().await?);

    // ========================================================================
    // Date picker
    // ========================================================================

    println!("[2] Date picker");
    let page = DatePickerPage::new(ctx.clone(), &config.calendar);
    let target: TargetDate = TARGET_DATE.parse()?;
    page.open().await?;
    let steps = page.select_date(&target).await?;
    println!(
        "    {target}: {steps} clicks, input now {:?}\n",
        page.selected_date().await?
    );

    // ========================================================================
    // Tables
    // ========================================================================

    println!("[3] Paginated table");
    let page = PaginationTablePage::new(ctx.clone(), &config.pagination);
    let pages = page.begin_pagination().await?;
    for (index, snapshot) in pages.iter().enumerate() {
        println!("    page {}: {} rows", index + 1, snapshot.len());
    }
    println!();

    println!("[4] Static table");
    let page = StaticTablePage::new(ctx.clone(), &config.static_table);
    for row in page.read_all().await? {
        println!("    {}", row.join(" | "));
    }
    println!();

    // ========================================================================
    // Dropdowns
    // ========================================================================

    println!("[5] Dropdowns");
    open_page(driver, config, config.dropdowns.url.as_deref()).await?;
    let page = DropdownsPage::new(driver.context(), &config.dropdowns);
    page.country().select_by_value("france").await?;
    println!("    country: {:?}", page.country().first_selected().await?);
    page.colors().select_by_text("Blue").await?;
    page.colors().select_by_index(3).await?;
    println!("    colors:  {:?}\n", page.colors().all_selected().await?);

    // ========================================================================
    // Checkboxes
    // ========================================================================

    println!("[6] Checkboxes");
    open_page(driver, config, config.checkboxes.url.as_deref()).await?;
    let page = CheckboxesPage::new(driver.context(), &config.checkboxes);
    let clicked = page.select_all().await?;
    println!("    {:?} ({clicked} clicked)\n", page.states().await?);

    // ========================================================================
    // Radio buttons
    // ========================================================================

    println!("[7] Radio buttons");
    open_page(driver, config, config.radio_buttons.url.as_deref()).await?;
    let page = RadioButtonsPage::new(driver.context(), &config.radio_buttons);
    page.choose(Answer::Impressive).await?;
    println!("    message: {:?}", page.confirmation().await?);
    println!("    'No' enabled: {}\n", page.is_enabled(Answer::No).await?);

    // ========================================================================
    // File upload
    // ========================================================================

    println!("[8] File upload");
    match &args.upload {
        Some(path) => {
            open_page(driver, config, config.file_upload.url.as_deref()).await?;
            let page = FileUploadPage::new(driver.context(), &config.file_upload);
            page.upload(path).await?;
            println!(
                "    success={} file={:?}",
                page.is_success_displayed().await?,
                page.uploaded_file_name().await?
            );
        }
        None => println!("    skipped (pass --upload PATH)"),
    }

    Ok(())
}

/// Navigates to a section's page unless it lives on the base page already
/// loaded.
async fn open_page(driver: &RemoteDriver, config: &SuiteConfig, url: Option<&str>) -> Result<()> {
    let target = config.page_url(url);
    if target != config.base_url {
        println!("    → {target}");
        driver.navigate(target).await?;
    }
    Ok(())
}
