// Copyright © 2024 Pathway

use std::mem::take;

use super::interval::{sort_intervals, DateLayout, Interval};

/// Finds the activation date that starts the latest unbroken chain of
/// intervals.
///
/// The intervals are sorted first. Walking back from the latest one, the
/// chain breaks where an activation date differs from the deactivation date
/// of the interval right before it. Dates are compared as strings, so two
/// spellings of the same day are a break. The walk stops at the second
/// interval, which means that without a break above it the answer is the
/// activation date of the earliest interval.
///
/// Returns an empty string when there are no intervals.
pub fn find_real_activation(mut intervals: Vec<Interval>, layout: &DateLayout) -> String {
    sort_intervals(&mut intervals, layout);

    if intervals.is_empty() {
        return String::new();
    }

    let mut current = intervals.len() - 1;
    while current > 1 {
        if intervals[current].activation_date != intervals[current - 1].deactivation_date {
            return take(&mut intervals[current].activation_date);
        }
        current -= 1;
    }

    take(&mut intervals[0].activation_date)
}
