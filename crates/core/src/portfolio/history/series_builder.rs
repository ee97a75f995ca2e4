//! Builds the trend chart series.
//!
//! Snapshots and historical year-end points are merged into one chronological
//! series, cut to the selected window, and snapshot points are averaged per
//! bucket. Historical points are never bucketed.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use log::warn;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::history_model::{Bucketing, ChartPoint, HistoricalDataPoint, TimeFrame};
use crate::constants::{ALL_TIME_FALLBACK_YEARS, DECIMAL_PRECISION};
use crate::portfolio::snapshot::NetWorthSnapshot;
use crate::utils::time_utils::{
    end_of_year_utc, local_midnight_utc, months_before, valuation_date_from_utc,
};

/// Builds the chart series for `time_frame` as of `now`.
///
/// Calendar anchors (week start, half-month, month) are computed in `tz`.
/// Returns an empty series when nothing falls inside the window.
pub fn build_chart_series(
    snapshots: &[NetWorthSnapshot],
    historical: &[HistoricalDataPoint],
    time_frame: TimeFrame,
    now: DateTime<Utc>,
    tz: Tz,
) -> Vec<ChartPoint> {
    let mut points = merge_points(snapshots, historical);
    if points.is_empty() {
        return Vec::new();
    }

    let start = window_start(&points, time_frame, now);
    points.retain(|p| p.date >= start);
    if points.is_empty() {
        return Vec::new();
    }

    let (historical_points, snapshot_points): (Vec<ChartPoint>, Vec<ChartPoint>) =
        points.into_iter().partition(|p| p.is_historical);

    let mut series = historical_points;
    series.extend(bucket_points(snapshot_points, time_frame.bucketing(), tz));
    sort_points(&mut series);
    series
}

/// Converts both sources to chart points and sorts them ascending.
pub fn merge_points(
    snapshots: &[NetWorthSnapshot],
    historical: &[HistoricalDataPoint],
) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = Vec::with_capacity(snapshots.len() + historical.len());

    for point in historical {
        match end_of_year_utc(point.year) {
            Some(date) => points.push(ChartPoint {
                date,
                value: point.net_worth,
                is_historical: true,
            }),
            None => warn!("Ignoring historical data point with invalid year {}", point.year),
        }
    }

    points.extend(snapshots.iter().map(|s| ChartPoint {
        date: s.date,
        value: s.net_worth,
        is_historical: false,
    }));

    sort_points(&mut points);
    points
}

/// Start of the window. `points` must be sorted ascending.
fn window_start(points: &[ChartPoint], time_frame: TimeFrame, now: DateTime<Utc>) -> DateTime<Utc> {
    match time_frame.months() {
        Some(months) => months_before(now, months),
        None => points
            .first()
            .map(|p| p.date)
            .unwrap_or_else(|| months_before(now, ALL_TIME_FALLBACK_YEARS * 12)),
    }
}

/// Anchor date of the bucket containing `date`.
fn bucket_anchor(date: NaiveDate, bucketing: Bucketing) -> NaiveDate {
    match bucketing {
        Bucketing::None => date,
        Bucketing::Weekly => {
            date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
        }
        Bucketing::BiWeekly => {
            let day = if date.day() <= 14 { 1 } else { 15 };
            date.with_day(day).unwrap_or(date)
        }
        Bucketing::Monthly => date.with_day(1).unwrap_or(date),
    }
}

fn bucket_points(points: Vec<ChartPoint>, bucketing: Bucketing, tz: Tz) -> Vec<ChartPoint> {
    if bucketing == Bucketing::None {
        return points;
    }

    let mut buckets: BTreeMap<NaiveDate, (Decimal, u32)> = BTreeMap::new();
    for point in points {
        let local = valuation_date_from_utc(point.date, tz);
        let entry = buckets
            .entry(bucket_anchor(local, bucketing))
            .or_insert((Decimal::ZERO, 0));
        entry.0 += point.value;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(anchor, (sum, count))| ChartPoint {
            date: local_midnight_utc(anchor, tz),
            value: (sum / Decimal::from(count)).round_dp(DECIMAL_PRECISION),
            is_historical: false,
        })
        .collect()
}

/// Total order so that equal inputs in any order yield the same series.
fn sort_points(points: &mut [ChartPoint]) {
    points.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| b.is_historical.cmp(&a.is_historical))
            .then_with(|| a.value.cmp(&b.value))
    });
}
