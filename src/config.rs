use log::Level;

use crate::growth::counter::CounterTiming;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // local builds
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Tunables of the growth sections. Everything is compiled in.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthConfig {
    pub max_week: u32,
    pub extrapolation_slope: f64,
    pub counter: CounterTiming,
    /// IntersectionObserver root margin; negative values wait until the
    /// section is that far inside the viewport.
    pub in_view_margin: &'static str,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        GrowthConfig {
            max_week: 12,
            extrapolation_slope: 10.0,
            counter: CounterTiming {
                duration_ms: 2000,
                steps: 60,
            },
            in_view_margin: "-100px",
        }
    }
}

pub fn growth() -> GrowthConfig {
    GrowthConfig::default()
}
