//! Tauri commands for the simulated admin dashboard

use tauri::State;

use crate::dashboard::{DashboardCounters, DashboardStats};

/// Current counter values; later values arrive as `dashboard:stats` events
#[tauri::command]
pub fn get_dashboard_stats(counters: State<'_, DashboardCounters>) -> DashboardStats {
    counters.snapshot()
}
