use serde::Serialize;

use crate::growth::error::GrowthError;
use crate::growth::milestones::{validate_milestones, Milestone};

/// One integer week of the trajectory curve as handed to the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphPoint {
    pub week_label: String,
    pub week_num: u32,
    pub optimized_value: i64,
    pub baseline_value: i64,
    pub milestone_tag: Option<String>,
}

/// Nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Builds the dense curve for weeks `0..=max_week` from sorted milestones.
///
/// Before the first milestone the curve is flat at its visibility, between
/// two milestones it is linearly interpolated, and from the last milestone on
/// it grows by `extrapolation_slope` per week. Input that breaks the registry
/// invariants is rejected instead of producing a degenerate curve.
pub fn generate(
    milestones: &[Milestone],
    max_week: u32,
    extrapolation_slope: f64,
) -> Result<Vec<GraphPoint>, GrowthError> {
    validate_milestones(milestones)?;
    if !extrapolation_slope.is_finite() {
        return Err(GrowthError::NonFiniteSlope);
    }

    let first = &milestones[0];
    let last = &milestones[milestones.len() - 1];
    if f64::from(max_week) < last.week {
        return Err(GrowthError::MaxWeekBeforeLastMilestone {
            max_week,
            last_week: last.week,
        });
    }

    let baseline_value = round_half_up(first.visibility_percent);

    let points = (0..=max_week)
        .map(|week_num| {
            let week = f64::from(week_num);
            let milestone_tag = milestones
                .iter()
                .find(|m| m.display_week() == i64::from(week_num))
                .map(|m| m.stage.clone());

            GraphPoint {
                week_label: format!("W{}", week_num),
                week_num,
                optimized_value: round_half_up(value_at(milestones, week, extrapolation_slope)),
                baseline_value,
                milestone_tag,
            }
        })
        .collect();

    Ok(points)
}

fn value_at(milestones: &[Milestone], week: f64, extrapolation_slope: f64) -> f64 {
    let first = &milestones[0];
    let last = &milestones[milestones.len() - 1];

    if week < first.week {
        return first.visibility_percent;
    }
    if week >= last.week {
        return last.visibility_percent + (week - last.week) * extrapolation_slope;
    }

    // first.week <= week < last.week, so both ends of the segment exist
    let start = milestones.partition_point(|m| m.week <= week) - 1;
    let (from, to) = (&milestones[start], &milestones[start + 1]);
    from.visibility_percent
        + (week - from.week) * (to.visibility_percent - from.visibility_percent)
            / (to.week - from.week)
}
