// Copyright © 2024 Pathway

use log::warn;

use chrono::NaiveDate;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format of the activation log, in `chrono` strftime syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLayout(String);

impl DateLayout {
    pub fn new(format: impl Into<String>) -> Self {
        Self(format.into())
    }

    /// Parses a date for ordering purposes.
    ///
    /// An empty value is the earliest possible date. A value that can't be
    /// parsed gives `None`, and the caller decides where it goes.
    ///
    /// Only values written exactly in the layout are accepted: `chrono` also
    /// takes unpadded fields, surrounding spaces and signed years, and those
    /// are rejected here.
    pub fn parse(&self, value: &str) -> Option<NaiveDate> {
        if value.is_empty() {
            return Some(NaiveDate::MIN);
        }
        match NaiveDate::parse_from_str(value, &self.0) {
            Ok(date) if date.format(&self.0).to_string() == value => Some(date),
            Ok(date) => {
                warn!(
                    "Date {value:?} is not written as {:?} (reads as {date}), skip",
                    self.0
                );
                None
            }
            Err(e) => {
                warn!("Failed to parse date {value:?} with layout {:?}: {e}, skip", self.0);
                None
            }
        }
    }
}

impl Default for DateLayout {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

/// One activation / deactivation pair, with both dates kept exactly as read.
/// An empty deactivation date means the number is still active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Interval {
    pub activation_date: String,
    pub deactivation_date: String,
}

impl Interval {
    pub fn new(activation_date: impl Into<String>, deactivation_date: impl Into<String>) -> Self {
        Self {
            activation_date: activation_date.into(),
            deactivation_date: deactivation_date.into(),
        }
    }

    /// Whether `self` goes before `other` on the timeline: `self` was
    /// activated before `other` was deactivated.
    ///
    /// Unparseable dates never fail the comparison. If either of the two
    /// dates involved can't be parsed, `self` goes first.
    pub fn precedes(&self, other: &Interval, layout: &DateLayout) -> bool {
        let Some(activation) = layout.parse(&self.activation_date) else {
            return true;
        };
        let Some(deactivation) = layout.parse(&other.deactivation_date) else {
            return true;
        };
        activation < deactivation
    }
}

/// Sorts intervals in place so that no interval is preceded by one it
/// [`precedes`](Interval::precedes).
///
/// `precedes` is not a total order, so this is an insertion sort rather than
/// `slice::sort_by`, which is allowed to panic on inconsistent comparators.
/// Intervals that don't precede each other keep their input order.
pub fn sort_intervals(intervals: &mut [Interval], layout: &DateLayout) {
    for current in 1..intervals.len() {
        let mut position = current;
        while position > 0 && intervals[position].precedes(&intervals[position - 1], layout) {
            intervals.swap(position, position - 1);
            position -= 1;
        }
    }
}
