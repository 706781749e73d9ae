//! Simulated telemetry: the only source of fleet mutation.

use fastrand::Rng;

use super::{DroneStatus, Fleet};

const WIND_DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Mutates every drone's dynamic fields on each telemetry tick with a
/// bounded random walk. Runs regardless of filter or selection.
#[derive(Debug)]
pub struct TelemetrySimulator {
    rng: Rng,
}

impl TelemetrySimulator {
    pub fn new() -> Self {
        Self { rng: Rng::new() }
    }

    /// Deterministic simulator for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }

    pub fn step(&mut self, fleet: &mut Fleet) {
        for drone in fleet.drones_mut() {
            match drone.status {
                DroneStatus::Offline => {
                    // Grounded: no movement, battery trickles down only.
                    drone.battery = (drone.battery - 0.05).clamp(0.0, 100.0);
                    drone.altitude = 0.0;
                    drone.speed = 0.0;
                }
                DroneStatus::Active | DroneStatus::Returning => {
                    drone.battery =
                        (drone.battery - self.rng.f64() * 0.4).clamp(0.0, 100.0);
                    drone.altitude =
                        (drone.altitude + (self.rng.f64() - 0.5) * 6.0).max(0.0);
                    drone.speed =
                        (drone.speed + (self.rng.f64() - 0.5) * 4.0).clamp(0.0, 50.0);
                    drone.location.lat += (self.rng.f64() - 0.5) * 0.0008;
                    drone.location.lng += (self.rng.f64() - 0.5) * 0.0008;
                    if self.rng.u8(0..5) == 0 {
                        drone.wind = format!(
                            "{} km/h {}",
                            self.rng.u32(5..25),
                            WIND_DIRECTIONS[self.rng.usize(0..WIND_DIRECTIONS.len())]
                        );
                    }
                }
            }
        }
    }

    /// Simulated link quality for the signal chart: 98 ± 2.
    pub fn signal_sample(&mut self) -> f64 {
        98.0 + (self.rng.f64() - 0.5) * 4.0
    }
}

impl Default for TelemetrySimulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battery_stays_in_range() {
        let mut fleet = Fleet::builtin();
        let mut sim = TelemetrySimulator::with_seed(7);
        for _ in 0..5000 {
            sim.step(&mut fleet);
            for drone in fleet.drones() {
                assert!((0.0..=100.0).contains(&drone.battery), "{}", drone.battery);
            }
        }
    }

    #[test]
    fn offline_drone_stays_grounded() {
        let mut fleet = Fleet::builtin();
        let mut sim = TelemetrySimulator::with_seed(7);
        let before = fleet.get("DR-4").unwrap().battery;
        sim.step(&mut fleet);
        let drone = fleet.get("DR-4").unwrap();
        assert_eq!(drone.speed, 0.0);
        assert_eq!(drone.altitude, 0.0);
        assert!(drone.battery <= before);
    }

    #[test]
    fn altitude_and_speed_never_negative() {
        let mut fleet = Fleet::builtin();
        let mut sim = TelemetrySimulator::with_seed(42);
        for _ in 0..2000 {
            sim.step(&mut fleet);
            for drone in fleet.drones() {
                assert!(drone.altitude >= 0.0);
                assert!(drone.speed >= 0.0);
            }
        }
    }

    #[test]
    fn signal_sample_is_bounded() {
        let mut sim = TelemetrySimulator::with_seed(1);
        for _ in 0..1000 {
            let signal = sim.signal_sample();
            assert!((96.0..=100.0).contains(&signal));
        }
    }
}
