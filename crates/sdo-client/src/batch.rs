//! Time series planning and results.
//!
//! A batch covers the half-open range `[start_time, end_time)`. With a limit
//! `L` the step is `floor(total_seconds / L)` whole seconds, so the number of
//! samples is `ceil(total_seconds / step)`, close to but not always `L`.

use chrono::{Duration, NaiveDateTime};
use indexmap::IndexMap;

use sdo_common::{format_time, TimeRange};

use crate::error::{ImageApiError, ImageApiResult};
use crate::pixels::ImageOutput;
use crate::request::RequestDescriptor;

/// The timestamps a batch will fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    range: TimeRange,
    /// `None` when the range is empty
    step: Option<Duration>,
}

impl BatchPlan {
    /// Plan a batch over `range`.
    ///
    /// `limit` takes precedence over `step`. A zero limit is rejected before
    /// any other check, and a step that would round to zero seconds is an
    /// error rather than an endless loop. Empty or reversed ranges produce an
    /// empty plan.
    pub fn new(range: TimeRange, limit: Option<u32>, step: Option<u32>) -> ImageApiResult<Self> {
        let total_seconds = range.total_seconds();

        // (step in seconds, the limit or step it came from)
        let step_seconds = match (limit, step) {
            (Some(0), _) => return Err(ImageApiError::DivisionByZero),
            (Some(_), _) | (None, Some(_)) if total_seconds <= 0 => None,
            (Some(limit), _) => Some((total_seconds / i64::from(limit), limit)),
            (None, Some(step)) => Some((i64::from(step), step)),
            (None, None) => return Err(ImageApiError::MissingParameter("limit")),
        };

        let step = match step_seconds {
            Some((0, divisor)) => {
                return Err(ImageApiError::ZeroStep {
                    total_seconds,
                    divisor,
                })
            }
            Some((secs, _)) => Some(Duration::seconds(secs)),
            None => None,
        };

        Ok(Self { range, step })
    }

    pub fn from_request(request: &RequestDescriptor) -> ImageApiResult<Self> {
        let range = request
            .time_range()
            .ok_or(ImageApiError::MissingParameter("end_time"))?;
        Self::new(range, request.limit, request.step)
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Step in whole seconds, zero for an empty plan.
    pub fn step_seconds(&self) -> i64 {
        self.step.map(|s| s.num_seconds()).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        match self.step {
            Some(step) => {
                let total = self.range.total_seconds();
                let step = step.num_seconds();
                ((total + step - 1) / step) as usize
            }
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> {
        self.range.iter_step(self.step.unwrap_or_else(Duration::zero))
    }
}

/// Batch results keyed by `YYYY-MM-DDTHH:MM:SS`, in fetch order.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    items: IndexMap<String, ImageOutput>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the formatted timestamp, returning any previous value.
    pub fn insert(&mut self, time: &NaiveDateTime, item: ImageOutput) -> Option<ImageOutput> {
        self.items.insert(format_time(time), item)
    }

    pub fn get(&self, key: &str) -> Option<&ImageOutput> {
        self.items.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ImageOutput)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert every entry to its array form, keeping key order.
    pub fn into_arrays(self) -> Self {
        let items = self
            .items
            .into_iter()
            .map(|(k, v)| (k, ImageOutput::Array(v.into_array())))
            .collect();
        Self { items }
    }

    pub fn into_inner(self) -> IndexMap<String, ImageOutput> {
        self.items
    }
}

impl IntoIterator for BatchResult {
    type Item = (String, ImageOutput);
    type IntoIter = indexmap::map::IntoIter<String, ImageOutput>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
