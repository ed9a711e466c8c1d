use serde::Serialize;

/// Nameplate data of the simulated plant, shown next to the monthly results.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct PlantInfo {
    pub pv_plant: &'static str,
    pub battery: &'static str,
    pub electrolyzer: &'static str,
    pub simulation: &'static str,
}

pub const PLANT_INFO: PlantInfo = PlantInfo {
    pv_plant: "3.9 MW",
    battery: "7.3 MWh",
    electrolyzer: "1 MW",
    simulation: "MATLAB/Simulink",
};
