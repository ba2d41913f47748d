//! Date-picker navigation.
//!
//! A paged calendar shows one month at a time. [`CalendarNavigator`] reads the
//! displayed month and year, steps forward or backward one month per click
//! until the display matches the target, then clicks the day link.
//!
//! The decision of which way to step is the pure function [`next_step`]; the
//! navigator only adds the reads, the clicks and the step budget around it.
//!
//! # Example
//!
//! ```ignore
//! use widget_verify::calendar::{CalendarNavigator, TargetDate};
//!
//! let target: TargetDate = "01/26/2026".parse()?;
//! let clicks = CalendarNavigator::default().select_date(&ctx, &target).await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::driver::{By, UiContext};
use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default step budget: one hundred years of single-month clicks.
pub const DEFAULT_MAX_STEPS: usize = 1200;

/// `MM/DD/YYYY`, as written into the picker's input.
const DATE_PATTERN: &str = r"^(\d{2})/(\d{2})/(\d{4})$";

/// [`DATE_PATTERN`], compiled on first use.
static DATE_REGEX: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(DATE_PATTERN));

// ============================================================================
// Month
// ============================================================================

/// Calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    /// January.
    January = 1,
    /// February.
    February,
    /// March.
    March,
    /// April.
    April,
    /// May.
    May,
    /// June.
    June,
    /// July.
    July,
    /// August.
    August,
    /// September.
    September,
    /// October.
    October,
    /// November.
    November,
    /// December.
    December,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Returns the month number (1..=12).
    #[inline]
    #[must_use]
    pub const fn number(self) -> u32 {
        self as u32
    }

    /// Returns the month for a number in 1..=12.
    #[must_use]
    pub fn from_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Returns the English name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Returns the number of days in this month of `year`.
    #[must_use]
    pub const fn days_in(self, year: i32) -> u32 {
        match self {
            Month::February if is_leap_year(year) => 29,
            Month::February => 28,
            Month::April | Month::June | Month::September | Month::November => 30,
            _ => 31,
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = Error;

    /// Parses a full English name or a three-letter abbreviation, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|month| {
                let name = month.name();
                name.eq_ignore_ascii_case(wanted)
                    || (wanted.len() == 3 && name[..3].eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| Error::invalid_argument(format!("unknown month {wanted:?}")))
    }
}

/// Gregorian leap year rule.
#[inline]
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

// ============================================================================
// CalendarState
// ============================================================================

/// The month and year a calendar displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarState {
    /// Displayed month.
    pub month: Month,
    /// Displayed year.
    pub year: i32,
}

impl CalendarState {
    /// Creates a state.
    #[inline]
    #[must_use]
    pub const fn new(month: Month, year: i32) -> Self {
        Self { month, year }
    }

    /// Returns the following month.
    #[must_use]
    pub fn next_month(self) -> Self {
        match self.month {
            Month::December => Self::new(Month::January, self.year + 1),
            month => Self::new(Month::ALL[month.number() as usize], self.year),
        }
    }

    /// Returns the preceding month.
    #[must_use]
    pub fn previous_month(self) -> Self {
        match self.month {
            Month::January => Self::new(Month::December, self.year - 1),
            month => Self::new(Month::ALL[month.number() as usize - 2], self.year),
        }
    }

    /// Months between this state and `other` (positive if `other` is later).
    #[must_use]
    pub fn months_until(self, other: Self) -> i64 {
        let index = |s: Self| i64::from(s.year) * 12 + i64::from(s.month.number());
        index(other) - index(self)
    }
}

impl fmt::Display for CalendarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

// ============================================================================
// TargetDate
// ============================================================================

/// A date to select, fixed for one navigation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetDate {
    month: Month,
    day: u32,
    year: i32,
}

impl TargetDate {
    /// Creates a target date.
    ///
    /// Only the day range is checked here. Whether the month actually has
    /// that day is for the calendar to answer ([`Error::DayNotFound`]).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `day` is outside 1..=31.
    pub fn new(month: Month, day: u32, year: i32) -> Result<Self> {
        if !(1..=31).contains(&day) {
            return Err(Error::invalid_argument(format!(
                "day {day} is outside 1..=31"
            )));
        }
        Ok(Self { month, day, year })
    }

    /// Returns the month.
    #[inline]
    #[must_use]
    pub fn month(&self) -> Month {
        self.month
    }

    /// Returns the day of month.
    #[inline]
    #[must_use]
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Returns the year.
    #[inline]
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month view this date lives in.
    #[inline]
    #[must_use]
    pub fn state(&self) -> CalendarState {
        CalendarState::new(self.month, self.year)
    }

    /// Formats as `MM/DD/YYYY`.
    #[must_use]
    pub fn formatted(&self) -> String {
        format!("{:02}/{:02}/{:04}", self.month.number(), self.day, self.year)
    }
}

impl fmt::Display for TargetDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for TargetDate {
    type Err = Error;

    /// Parses `MM/DD/YYYY`.
    fn from_str(s: &str) -> Result<Self> {
        let pattern = DATE_REGEX
            .as_ref()
            .map_err(|e| Error::invalid_argument(format!("date pattern: {e}")))?;
        let invalid = || Error::invalid_argument(format!("expected MM/DD/YYYY, got {s:?}"));

        let caps = pattern.captures(s.trim()).ok_or_else(invalid)?;
        let month = caps[1]
            .parse()
            .ok()
            .and_then(Month::from_number)
            .ok_or_else(invalid)?;
        let day = caps[2].parse().map_err(|_| invalid())?;
        let year = caps[3].parse().map_err(|_| invalid())?;

        Self::new(month, day, year)
    }
}

// ============================================================================
// Step
// ============================================================================

/// One navigation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Click the next-month affordance.
    Forward,
    /// Click the previous-month affordance.
    Backward,
    /// The display matches the target.
    Done,
}

/// Decides the next move from the displayed state towards `target`.
///
/// Forward iff the displayed year is earlier, or the year matches and the
/// displayed month precedes the target month.
#[must_use]
pub fn next_step(state: CalendarState, target: CalendarState) -> Step {
    if state == target {
        Step::Done
    } else if state.year < target.year
        || (state.year == target.year && state.month < target.month)
    {
        Step::Forward
    } else {
        Step::Backward
    }
}

// ============================================================================
// CalendarControl
// ============================================================================

/// Locators for the parts of a paged calendar.
///
/// Defaults match the jQuery UI datepicker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarControl {
    /// Header element holding the month name.
    pub month_label: By,
    /// Header element holding the year.
    pub year_label: By,
    /// Next-month affordance.
    pub next: By,
    /// Previous-month affordance.
    pub previous: By,
    /// Container of the day links.
    pub day_grid: By,
}

impl Default for CalendarControl {
    fn default() -> Self {
        Self {
            month_label: By::css("span.ui-datepicker-month"),
            year_label: By::css("span.ui-datepicker-year"),
            next: By::css("span.ui-icon-circle-triangle-e"),
            previous: By::css("span.ui-icon-circle-triangle-w"),
            day_grid: By::css("table.ui-datepicker-calendar"),
        }
    }
}

// ============================================================================
// CalendarNavigator
// ============================================================================

/// Drives a calendar control to a target date.
#[derive(Debug, Clone)]
pub struct CalendarNavigator {
    control: CalendarControl,
    max_steps: Option<usize>,
}

impl Default for CalendarNavigator {
    fn default() -> Self {
        Self::new(CalendarControl::default())
    }
}

impl CalendarNavigator {
    /// Creates a navigator with the default step budget.
    #[must_use]
    pub fn new(control: CalendarControl) -> Self {
        Self {
            control,
            max_steps: Some(DEFAULT_MAX_STEPS),
        }
    }

    /// Sets the step budget. `None` navigates without a bound.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Returns the control locators.
    #[inline]
    #[must_use]
    pub fn control(&self) -> &CalendarControl {
        &self.control
    }

    /// Returns the step budget.
    #[inline]
    #[must_use]
    pub fn max_steps(&self) -> Option<usize> {
        self.max_steps
    }
}

// ============================================================================
// CalendarNavigator - Operations
// ============================================================================

impl CalendarNavigator {
    /// Reads the displayed month and year.
    ///
    /// # Errors
    ///
    /// [`Error::CalendarHeader`] if either label does not parse.
    pub async fn read_state(&self, ctx: &UiContext) -> Result<CalendarState> {
        let month_text = ctx.find(self.control.month_label.clone()).await?.text().await?;
        let year_text = ctx.find(self.control.year_label.clone()).await?.text().await?;

        let month = month_text
            .parse::<Month>()
            .map_err(|_| Error::calendar_header(&month_text))?;
        let year = year_text
            .trim()
            .parse::<i32>()
            .map_err(|_| Error::calendar_header(&year_text))?;

        Ok(CalendarState::new(month, year))
    }

    /// Steps the calendar until it displays `target`.
    ///
    /// State is re-read after every click. Returns the number of clicks.
    ///
    /// # Errors
    ///
    /// [`Error::StepLimitExceeded`] if the budget runs out first.
    pub async fn navigate_to(&self, ctx: &UiContext, target: CalendarState) -> Result<usize> {
        let mut steps = 0usize;

        loop {
            let state = self.read_state(ctx).await?;
            let step = next_step(state, target);
            debug!(%state, %target, ?step, steps, "Calendar step");

            let affordance = match step {
                Step::Done => return Ok(steps),
                Step::Forward => &self.control.next,
                Step::Backward => &self.control.previous,
            };

            if let Some(limit) = self.max_steps
                && steps >= limit
            {
                return Err(Error::step_limit_exceeded(limit, target.month, target.year));
            }

            ctx.find(affordance.clone()).await?.click().await?;
            steps += 1;
        }
    }

    /// Clicks the day link labelled with the target's day.
    ///
    /// # Errors
    ///
    /// [`Error::DayNotFound`] if the current view has no such day; nothing
    /// is clicked in that case.
    pub async fn click_day(&self, ctx: &UiContext, target: &TargetDate) -> Result<()> {
        let grid = ctx.find(self.control.day_grid.clone()).await?;
        let label = target.day().to_string();

        match grid.try_find(By::link_text(label)).await? {
            Some(link) => link.click().await,
            None => Err(Error::day_not_found(target.day(), target.month(), target.year())),
        }
    }

    /// Navigates to the target's month and clicks its day.
    ///
    /// Returns the number of navigation clicks.
    pub async fn select_date(&self, ctx: &UiContext, target: &TargetDate) -> Result<usize> {
        let steps = self.navigate_to(ctx, target.state()).await?;
        self.click_day(ctx, target).await?;

        info!(date = %target, steps, "Date selected");
        Ok(steps)
    }
}

// ============================================================================
// Tests
// ============================================================================
