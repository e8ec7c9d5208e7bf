use thiserror::Error;

/// Rejected milestone or curve input. These are configuration defects in the
/// static registry, reported when the registry or the curve is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrowthError {
    #[error("milestone registry is empty")]
    EmptyRegistry,
    #[error("milestone {index} has a non-finite week")]
    NonFiniteWeek { index: usize },
    #[error("milestone {index} is at week {week}, which does not come after week {previous}")]
    NonIncreasingWeek { index: usize, previous: f64, week: f64 },
    #[error("milestone {index} has invalid visibility {value}")]
    InvalidVisibility { index: usize, value: f64 },
    #[error("max week {max_week} ends before the last milestone at week {last_week}")]
    MaxWeekBeforeLastMilestone { max_week: u32, last_week: f64 },
    #[error("extrapolation slope must be finite")]
    NonFiniteSlope,
}
