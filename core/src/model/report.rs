use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::time;

/// Snapshot window selector for the project breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Week,
    Month,
    Quarter,
    Year,
}

impl TimeRange {
    /// Inclusive calendar bounds of the range containing `anchor`.
    pub fn bounds(&self, anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            TimeRange::Week => (time::start_of_week(anchor), time::end_of_week(anchor)),
            TimeRange::Month => (time::start_of_month(anchor), time::end_of_month(anchor)),
            TimeRange::Quarter => (time::start_of_quarter(anchor), time::end_of_quarter(anchor)),
            TimeRange::Year => (time::start_of_year(anchor), time::end_of_year(anchor)),
        }
    }
}

/// Trend bucket size. The trailing window length is fixed per granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Week,
    Month,
}

impl Granularity {
    pub fn bucket_count(&self) -> usize {
        match self {
            Granularity::Week => 8,
            Granularity::Month => 6,
        }
    }
}

/// One project's share of a reporting window. Only produced for projects
/// with nonzero hours; percentages across a result set sum to 100.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectTimeSummary {
    pub project_id: String,
    pub project_name: String,
    pub color: String,
    pub hours: f64,
    pub percentage: f64,
}

/// One trend bucket: hours per roster project (zeros included) over an
/// inclusive [start, end] calendar range.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrendPeriod {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub hours: HashMap<String, f64>,
    pub total: f64,
}

impl TrendPeriod {
    pub fn project_hours(&self, project_id: &str) -> f64 {
        self.hours.get(project_id).copied().unwrap_or(0.0)
    }
}
