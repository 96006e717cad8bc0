//! Read-only aggregates over attendance data. Nothing here is cached;
//! every call recomputes from the store.

use crate::attendance::{AttendanceStore, Bucket, HistoryEntry, Mark};
use crate::dates::DateKey;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub present_count: usize,
    pub absent_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub total_days: usize,
    pub present_count: usize,
    pub absent_count: usize,
    pub percentage: f64,
}

/// Rounds to two decimal places using the exact binary value of `x`,
/// with exact ties going to the even hundredth (3.125 -> 3.12).
pub fn round_2_decimals(x: f64) -> f64 {
    if !x.is_finite() || x == 0.0 {
        return x;
    }
    let bits = x.abs().to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exp) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };
    if exp >= 0 {
        return x;
    }
    // |x| * 100 == scaled * 2^exp exactly.
    let scaled = u128::from(mantissa) * 100;
    let hundredths: u128 = if exp <= -120 {
        // scaled < 2^60, so |x| * 100 < 2^-60: rounds to zero.
        0
    } else {
        let shift = (-exp) as u32;
        let whole = scaled >> shift;
        let rem = scaled & ((1u128 << shift) - 1);
        let half = 1u128 << (shift - 1);
        if rem > half || (rem == half && whole % 2 == 1) {
            whole + 1
        } else {
            whole
        }
    };
    (hundredths as f64 / 100.0).copysign(x)
}

pub fn bucket_stats(bucket: &Bucket) -> DailyStats {
    let mut stats = DailyStats::default();
    for mark in bucket.values() {
        match mark {
            Mark::Present => stats.present_count += 1,
            Mark::Absent => stats.absent_count += 1,
            Mark::Other(_) => {}
        }
    }
    stats
}

/// Present/absent counts for a date; zero for dates never marked.
pub fn daily_stats(store: &AttendanceStore, date: &DateKey) -> DailyStats {
    store.bucket(date).map(bucket_stats).unwrap_or_default()
}

/// Totals over a history. Days without a mark still count toward `total_days`.
pub fn summarize<I>(history: I) -> StudentSummary
where
    I: IntoIterator<Item = HistoryEntry>,
{
    let mut summary = StudentSummary::default();
    for entry in history {
        summary.total_days += 1;
        match entry.mark {
            Some(Mark::Present) => summary.present_count += 1,
            Some(Mark::Absent) => summary.absent_count += 1,
            _ => {}
        }
    }
    summary.percentage = if summary.total_days > 0 {
        round_2_decimals(summary.present_count as f64 / summary.total_days as f64 * 100.0)
    } else {
        0.0
    };
    summary
}

pub fn student_summary(store: &AttendanceStore, name: &str) -> StudentSummary {
    summarize(store.student_history(name))
}

pub fn percentage(store: &AttendanceStore, name: &str) -> f64 {
    student_summary(store, name).percentage
}
