use serde::{Deserialize, Serialize};

/// One normalized day of plant operation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub day: u32,
    pub pv_total_mwh: f64,
    pub pv_to_h2_kwh: f64,
    pub batt_to_h2_kwh: f64,

    // Absent when the electrolyzer did not run.
    pub h2_start_hour: Option<f64>,
    pub h2_stop_hour: Option<f64>,

    // Absent when the simulation left the cell empty; treated as no production.
    pub h2_produced_kg: Option<f64>,

    pub final_soc_pct: f64,
    pub battery_cycles_daily: f64,

    pub h2_duration_hours: f64,
    pub h2_energy_total_kwh: f64,

    /// Non-required columns as (name, raw value), in header order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<(String, String)>,
}

impl DailyRecord {
    pub fn is_producing(&self) -> bool {
        self.h2_produced_kg.is_some_and(|kg| kg != 0.0)
    }
}
