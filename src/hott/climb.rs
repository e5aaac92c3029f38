//! # Climb-Rate Sampler
//!
//! Three independent periodic jobs (1 s, 3 s, 10 s) that difference the vario
//! altitude against their own previous sample and publish the result in the
//! fixed-point form the vario packet carries:
//!
//! ```text
//! wire = (altitude_now - altitude_prev) * 100 + 30000
//! ```
//!
//! `30000` is zero climb, `31000` is +10 m over the interval. Values that do
//! not fit in a `u16` saturate.

use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use super::protocol::{CLIMB_RATE_SCALE, CLIMB_RATE_ZERO};
use crate::sensors::slot::SlotReader;

/// Sampling interval of one climb-rate job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimbInterval {
    OneSecond,
    ThreeSeconds,
    TenSeconds,
}

impl ClimbInterval {
    pub const ALL: [ClimbInterval; 3] = [
        ClimbInterval::OneSecond,
        ClimbInterval::ThreeSeconds,
        ClimbInterval::TenSeconds,
    ];

    pub fn period(self) -> Duration {
        match self {
            ClimbInterval::OneSecond => Duration::from_secs(1),
            ClimbInterval::ThreeSeconds => Duration::from_secs(3),
            ClimbInterval::TenSeconds => Duration::from_secs(10),
        }
    }
}

/// Encode an altitude change over one interval
///
/// # Arguments
///
/// * `current` - Altitude in metres at this sample
/// * `previous` - Altitude in metres one interval earlier
///
/// # Returns
///
/// * `u16` - Difference in centimetres offset by 30000, saturated at the
///   field width
pub fn encode_climb(current: f32, previous: f32) -> u16 {
    ((current - previous) * CLIMB_RATE_SCALE + f32::from(CLIMB_RATE_ZERO)) as u16
}

/// Latest encoded climb rates, shared between the sampler and the vario encoder
#[derive(Debug)]
pub struct ClimbRates {
    m1s: AtomicU16,
    m3s: AtomicU16,
    m10s: AtomicU16,
}

impl ClimbRates {
    /// All three rates at zero climb
    pub fn new() -> Self {
        Self {
            m1s: AtomicU16::new(CLIMB_RATE_ZERO),
            m3s: AtomicU16::new(CLIMB_RATE_ZERO),
            m10s: AtomicU16::new(CLIMB_RATE_ZERO),
        }
    }

    fn cell(&self, interval: ClimbInterval) -> &AtomicU16 {
        match interval {
            ClimbInterval::OneSecond => &self.m1s,
            ClimbInterval::ThreeSeconds => &self.m3s,
            ClimbInterval::TenSeconds => &self.m10s,
        }
    }

    pub fn get(&self, interval: ClimbInterval) -> u16 {
        self.cell(interval).load(Ordering::Relaxed)
    }

    pub fn set(&self, interval: ClimbInterval, value: u16) {
        self.cell(interval).store(value, Ordering::Relaxed);
    }
}

impl Default for ClimbRates {
    fn default() -> Self {
        Self::new()
    }
}

/// One climb-rate job: remembers the altitude it saw last
#[derive(Debug, Clone)]
pub struct ClimbJob {
    interval: ClimbInterval,
    previous: Option<f32>,
}

impl ClimbJob {
    pub fn new(interval: ClimbInterval) -> Self {
        Self { interval, previous: None }
    }

    pub fn interval(&self) -> ClimbInterval {
        self.interval
    }

    /// Take one altitude sample and return the encoded rate
    ///
    /// The first sample has nothing to compare against and reports zero climb.
    pub fn sample(&mut self, altitude: f32) -> u16 {
        let rate = match self.previous {
            Some(previous) => encode_climb(altitude, previous),
            None => CLIMB_RATE_ZERO,
        };
        self.previous = Some(altitude);
        rate
    }
}

/// Spawn the three climb-rate jobs
///
/// Without an altitude slot nothing is spawned and `rates` stays at zero climb.
pub fn spawn_climb_sampler(
    altitude: Option<SlotReader<f32>>,
    rates: Arc<ClimbRates>,
) -> Vec<JoinHandle<()>> {
    let Some(altitude) = altitude else {
        debug!("No vario altitude, climb-rate sampler not started");
        return Vec::new();
    };

    ClimbInterval::ALL
        .into_iter()
        .map(|interval| {
            let altitude = altitude.clone();
            let rates = Arc::clone(&rates);
            tokio::spawn(run_job(ClimbJob::new(interval), altitude, rates))
        })
        .collect()
}

async fn run_job(mut job: ClimbJob, altitude: SlotReader<f32>, rates: Arc<ClimbRates>) {
    let period = job.interval().period();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let value = job.sample(altitude.get());
        rates.set(job.interval(), value);
        trace!("Climb rate {:?}: {}", job.interval(), value);
    }
}
