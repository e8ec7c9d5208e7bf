use plotters::style::RGBColor;

use crate::growth::error::GrowthError;
use crate::growth::trajectory::{self, GraphPoint};

/// Color token carried by milestones and chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(value: u32) -> Self {
        Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    pub fn css(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// `#RRGGBBAA` with the given alpha, used for tinted card backgrounds.
    pub fn css_with_alpha(&self, alpha: u8) -> String {
        format!("{}{:02X}", self.css(), alpha)
    }
}

impl From<Rgb> for RGBColor {
    fn from(color: Rgb) -> Self {
        RGBColor(color.0, color.1, color.2)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub week: f64,
    pub visibility_percent: f64,
    pub stage: String,
    pub color: Rgb,
    pub description: String,
    pub details: Vec<String>,
}

impl Milestone {
    pub fn new(week: f64, visibility_percent: f64, stage: &str, color: Rgb) -> Self {
        Milestone {
            week,
            visibility_percent,
            stage: stage.to_string(),
            color,
            description: String::new(),
            details: Vec::new(),
        }
    }

    pub fn describe(mut self, description: &str, details: &[&str]) -> Self {
        self.description = description.to_string();
        self.details = details.iter().map(|d| d.to_string()).collect();
        self
    }

    /// Week shown on the card and used to place the stage tag on the curve.
    pub fn display_week(&self) -> i64 {
        trajectory::round_half_up(self.week)
    }
}

/// Checks the registry invariants: non-empty, finite strictly increasing
/// weeks, finite non-negative visibility. Rising visibility is not required.
pub fn validate_milestones(milestones: &[Milestone]) -> Result<(), GrowthError> {
    if milestones.is_empty() {
        return Err(GrowthError::EmptyRegistry);
    }

    let mut previous: Option<f64> = None;
    for (index, milestone) in milestones.iter().enumerate() {
        if !milestone.week.is_finite() {
            return Err(GrowthError::NonFiniteWeek { index });
        }
        if !milestone.visibility_percent.is_finite() || milestone.visibility_percent < 0.0 {
            return Err(GrowthError::InvalidVisibility {
                index,
                value: milestone.visibility_percent,
            });
        }
        if let Some(previous) = previous {
            if milestone.week <= previous {
                return Err(GrowthError::NonIncreasingWeek {
                    index,
                    previous,
                    week: milestone.week,
                });
            }
        }
        previous = Some(milestone.week);
    }

    Ok(())
}

/// Ordered, validated and immutable list of milestones.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneRegistry {
    milestones: Vec<Milestone>,
}

impl MilestoneRegistry {
    pub fn new(milestones: Vec<Milestone>) -> Result<Self, GrowthError> {
        validate_milestones(&milestones)?;
        Ok(MilestoneRegistry { milestones })
    }

    /// The five-stage journey shown in the "how it works" section.
    pub fn landing() -> Result<Self, GrowthError> {
        Self::new(vec![
            Milestone::new(1.0, 8.0, "Discovery", Rgb::hex(0x6366F1)).describe(
                "Complete AI visibility audit",
                &[
                    "Complete AI visibility audit",
                    "Identify citation gaps",
                    "Benchmark competitors",
                ],
            ),
            Milestone::new(2.5, 25.0, "Foundation", Rgb::hex(0x8B5CF6)).describe(
                "Deploy technical foundation",
                &[
                    "Deploy llms.txt & robots.txt",
                    "Add structured data",
                    "Fix technical blockers",
                ],
            ),
            Milestone::new(5.0, 55.0, "Optimization", Rgb::hex(0xA855F7)).describe(
                "Transform content for AI",
                &[
                    "Transform content for AI citation",
                    "Create answer-worthy formats",
                    "Build topical authority",
                ],
            ),
            Milestone::new(8.0, 95.0, "Expansion", Rgb::hex(0xC084FC)).describe(
                "Earn high-authority citations",
                &[
                    "Earn high-authority citations",
                    "Target new prompt categories",
                    "Amplify brand signals",
                ],
            ),
            Milestone::new(11.0, 180.0, "Dominance", Rgb::hex(0xE879F9)).describe(
                "Continuous optimization",
                &[
                    "Continuous monitoring & optimization",
                    "Outpace competitors",
                    "Scale across platforms",
                ],
            ),
        ])
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn get(&self, index: usize) -> Option<&Milestone> {
        self.milestones.get(index)
    }

    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    pub fn first(&self) -> &Milestone {
        // non-empty by construction
        &self.milestones[0]
    }

    pub fn last(&self) -> &Milestone {
        &self.milestones[self.milestones.len() - 1]
    }

    pub fn find_stage(&self, stage: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.stage == stage)
    }

    pub fn trajectory(
        &self,
        max_week: u32,
        extrapolation_slope: f64,
    ) -> Result<Vec<GraphPoint>, GrowthError> {
        trajectory::generate(&self.milestones, max_week, extrapolation_slope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(week: f64, visibility: f64) -> Milestone {
        Milestone::new(week, visibility, "Stage", Rgb::hex(0x000000))
    }

    #[test]
    fn landing_registry_is_valid() {
        let registry = MilestoneRegistry::landing().unwrap();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.first().stage, "Discovery");
        assert_eq!(registry.last().visibility_percent, 180.0);
        assert!(registry.milestones().iter().all(|m| m.details.len() == 3));
    }

    #[test]
    fn empty_registry_is_rejected() {
        assert_eq!(MilestoneRegistry::new(vec![]), Err(GrowthError::EmptyRegistry));
    }

    #[test]
    fn repeated_week_is_rejected() {
        let err = MilestoneRegistry::new(vec![plain(1.0, 8.0), plain(1.0, 20.0)]).unwrap_err();
        assert_eq!(
            err,
            GrowthError::NonIncreasingWeek { index: 1, previous: 1.0, week: 1.0 }
        );
    }

    #[test]
    fn decreasing_week_is_rejected() {
        let err = validate_milestones(&[plain(3.0, 8.0), plain(5.0, 9.0), plain(4.0, 10.0)])
            .unwrap_err();
        assert!(matches!(err, GrowthError::NonIncreasingWeek { index: 2, .. }));
    }

    #[test]
    fn negative_or_nan_visibility_is_rejected() {
        assert!(matches!(
            validate_milestones(&[plain(1.0, -1.0)]),
            Err(GrowthError::InvalidVisibility { index: 0, .. })
        ));
        assert!(matches!(
            validate_milestones(&[plain(1.0, 2.0), plain(2.0, f64::NAN)]),
            Err(GrowthError::InvalidVisibility { index: 1, .. })
        ));
    }

    #[test]
    fn non_finite_week_is_rejected() {
        assert_eq!(
            validate_milestones(&[plain(f64::INFINITY, 1.0)]),
            Err(GrowthError::NonFiniteWeek { index: 0 })
        );
    }

    #[test]
    fn falling_visibility_is_accepted() {
        assert!(validate_milestones(&[plain(1.0, 50.0), plain(2.0, 10.0)]).is_ok());
    }

    #[test]
    fn colors_render_as_css() {
        let color = Rgb::hex(0x6366F1);
        assert_eq!(color, Rgb(0x63, 0x66, 0xF1));
        assert_eq!(color.css(), "#6366F1");
        assert_eq!(color.css_with_alpha(0x20), "#6366F120");
    }

    #[test]
    fn display_week_rounds_half_weeks_up() {
        let registry = MilestoneRegistry::landing().unwrap();
        let weeks: Vec<i64> = registry.milestones().iter().map(Milestone::display_week).collect();
        assert_eq!(weeks, vec![1, 3, 5, 8, 11]);
    }
}
