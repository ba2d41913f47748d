//! Traversal benchmarks against the in-memory DOM.
//!
//! - Calendar navigation over 12, 120 and 600 month distances
//! - Full pagination sweep with checkbox selection
//!
//! Run with: cargo bench --bench calendar_navigation
//! Results saved to: target/criterion/

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use tokio::runtime::Runtime;

use widget_verify::calendar::{CalendarState, Month, TargetDate};
use widget_verify::config::{CalendarConfig, PaginationConfig};
use widget_verify::fixture::{FixtureDom, widgets};
use widget_verify::{DatePickerPage, PaginationTablePage};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const START: CalendarState = CalendarState {
    month: Month::October,
    year: 2025,
};

const MONTH_DISTANCES: &[i32] = &[12, 120, 600];

// ============================================================================
// Helpers
// ============================================================================

fn open_picker() -> DatePickerPage {
    let dom = FixtureDom::new();
    widgets::date_picker(&dom, START);
    DatePickerPage::new(dom.context(), &CalendarConfig::default())
}

fn target_after(months: i32) -> TargetDate {
    let year = START.year + months / 12;
    TargetDate::new(START.month, 15, year).expect("valid target")
}

// ============================================================================
// Benchmark: Calendar Navigation
// ============================================================================

fn bench_calendar_navigation(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");

    let mut group = c.benchmark_group("calendar_navigation");

    for &months in MONTH_DISTANCES {
        let target = target_after(months);
        group.bench_with_input(BenchmarkId::new("forward", months), &target, |b, target| {
            b.to_async(&rt).iter_batched(
                open_picker,
                |page| async move {
                    page.open().await.expect("open");
                    page.select_date(target).await.expect("select")
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Pagination Sweep
// ============================================================================

fn bench_pagination_sweep(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");

    c.bench_function("pagination_sweep", |b| {
        b.to_async(&rt).iter_batched(
            || {
                let dom = FixtureDom::new();
                widgets::pagination_table(&dom);
                PaginationTablePage::new(dom.context(), &PaginationConfig::default())
            },
            |page| async move { page.begin_pagination().await.expect("sweep") },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_calendar_navigation, bench_pagination_sweep);
criterion_main!(benches);
