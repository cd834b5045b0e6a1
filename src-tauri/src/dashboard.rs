//! Simulated dashboard counters
//!
//! The admin dashboard shows analysis counts that creep upward on a timer.
//! The numbers are decoration: nothing here reads from the detection pipeline.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use tauri::{AppHandle, Emitter};

/// How often the counters move
pub const TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Event carrying a fresh [`DashboardStats`] snapshot
pub const DASHBOARD_EVENT: &str = "dashboard:stats";

const ACTIVE_USERS_FLOOR: u32 = 340;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_analyses: u64,
    pub today_analyses: u64,
    pub active_users: u32,
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self {
            total_analyses: 12_543,
            today_analyses: 342,
            active_users: 342,
        }
    }
}

impl DashboardStats {
    /// Advance the counters by one tick
    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        self.total_analyses += rng.gen_range(0..5u64);
        self.today_analyses += rng.gen_range(0..3u64);
        self.active_users = ACTIVE_USERS_FLOOR + rng.gen_range(0..20u32);
    }
}

/// Counters shared between the ticker task and the commands
#[derive(Debug, Clone, Default)]
pub struct DashboardCounters(Arc<Mutex<DashboardStats>>);

impl DashboardCounters {
    pub fn snapshot(&self) -> DashboardStats {
        *self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn tick<R: Rng>(&self, rng: &mut R) -> DashboardStats {
        let mut stats = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        stats.tick(rng);
        *stats
    }
}

/// Tick the counters forever, emitting each snapshot to the frontend
pub fn spawn_ticker(app: AppHandle, counters: DashboardCounters) {
    tauri::async_runtime::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        // First tick fires immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            let stats = counters.tick(&mut rand::thread_rng());
            if let Err(e) = app.emit(DASHBOARD_EVENT, stats) {
                tracing::debug!("Failed to emit dashboard stats: {}", e);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tick_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut stats = DashboardStats::default();

        for _ in 0..1_000 {
            let before = stats;
            stats.tick(&mut rng);

            let total_step = stats.total_analyses - before.total_analyses;
            let today_step = stats.today_analyses - before.today_analyses;
            assert!(total_step <= 4);
            assert!(today_step <= 2);
            assert!((340..360).contains(&stats.active_users));
        }
    }

    #[test]
    fn test_counters_never_decrease() {
        let counters = DashboardCounters::default();
        let start = counters.snapshot();
        let mut rng = StdRng::seed_from_u64(11);

        let mut previous = start;
        for _ in 0..100 {
            let next = counters.tick(&mut rng);
            assert!(next.total_analyses >= previous.total_analyses);
            assert!(next.today_analyses >= previous.today_analyses);
            previous = next;
        }
        assert_eq!(counters.snapshot(), previous);
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(DashboardStats::default()).unwrap();
        assert_eq!(json["totalAnalyses"], 12_543);
        assert_eq!(json["todayAnalyses"], 342);
        assert_eq!(json["activeUsers"], 342);
    }
}
