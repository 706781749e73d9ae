//! Rolling time-series buffers backing the telemetry charts.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use super::DroneStatus;

pub const DEFAULT_CAPACITY: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub at: DateTime<Utc>,
    pub value: f64,
}

/// Fixed-capacity FIFO series: once full, the oldest point is evicted
/// on every push.
#[derive(Debug, Clone)]
pub struct RollingSeries {
    points: VecDeque<SeriesPoint>,
    capacity: usize,
}

impl RollingSeries {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, at: DateTime<Utc>, value: f64) {
        self.points.push_back(SeriesPoint { at, value });
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn oldest(&self) -> Option<&SeriesPoint> {
        self.points.front()
    }

    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter()
    }

    /// Values rounded to u64, oldest first. Sparkline widgets take `&[u64]`.
    pub fn values_u64(&self) -> Vec<u64> {
        self.points
            .iter()
            .map(|point| point.value.max(0.0).round() as u64)
            .collect()
    }
}

/// The three chart series bound to the currently selected drone.
#[derive(Debug, Clone)]
pub struct TelemetryHistory {
    pub battery: RollingSeries,
    pub speed: RollingSeries,
    pub signal: RollingSeries,
}

impl TelemetryHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            battery: RollingSeries::new(capacity),
            speed: RollingSeries::new(capacity),
            signal: RollingSeries::new(capacity),
        }
    }

    /// Per-tick update for the selected drone. Active drones append one
    /// point per series; anything else empties all three so an offline
    /// drone never shows stale trailing data.
    pub fn record(
        &mut self,
        status: DroneStatus,
        battery: f64,
        speed: f64,
        signal: f64,
        at: DateTime<Utc>,
    ) {
        if status == DroneStatus::Active {
            self.battery.push(at, battery);
            self.speed.push(at, speed);
            self.signal.push(at, signal);
        } else {
            self.clear_all();
        }
    }

    pub fn clear_all(&mut self) {
        self.battery.clear();
        self.speed.clear();
        self.signal.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.battery.is_empty() && self.speed.is_empty() && self.signal.is_empty()
    }
}
