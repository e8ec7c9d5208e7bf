/// Suffixes that mark a stat as already formatted for display.
const DISPLAY_SUFFIXES: [&str; 2] = ["%", "x"];

#[derive(Debug, Clone, PartialEq)]
pub enum StatTarget {
    /// Animated from zero and shown with a trailing `%`.
    Numeric(f64),
    /// A number carrying its own unit, e.g. `180%` or `2.5x`. Shown as-is.
    Suffixed { value: f64, suffix: String, raw: String },
    /// Anything else, e.g. `18 days`. Shown as-is.
    Literal(String),
}

impl StatTarget {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Some(value) = parse_finite(trimmed) {
            return StatTarget::Numeric(value);
        }

        for suffix in DISPLAY_SUFFIXES {
            if let Some(number) = trimmed.strip_suffix(suffix) {
                if let Some(value) = parse_finite(number.trim_end()) {
                    return StatTarget::Suffixed {
                        value,
                        suffix: suffix.to_string(),
                        raw: raw.to_string(),
                    };
                }
            }
        }

        StatTarget::Literal(raw.to_string())
    }

    pub fn numeric(&self) -> Option<f64> {
        match self {
            StatTarget::Numeric(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_animated(&self) -> bool {
        self.numeric().is_some()
    }

    /// Text for the stat card. `current` is the animated value and only
    /// matters for numeric targets.
    pub fn display(&self, current: f64) -> String {
        match self {
            StatTarget::Numeric(_) => format!("{:.0}%", current),
            StatTarget::Suffixed { raw, .. } => raw.clone(),
            StatTarget::Literal(raw) => raw.clone(),
        }
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub label: String,
    pub target: StatTarget,
    pub sublabel: String,
}

impl Stat {
    pub fn new(label: &str, target: &str, sublabel: &str) -> Self {
        Stat {
            label: label.to_string(),
            target: StatTarget::parse(target),
            sublabel: sublabel.to_string(),
        }
    }
}

/// Result cards under the trajectory chart.
pub fn journey_stats() -> Vec<Stat> {
    vec![
        Stat::new("Time to First Citation", "18 days", "average"),
        Stat::new("90-Day Growth", "180%", "visibility increase"),
        Stat::new("Citation Rate", "2.5x", "vs competitors"),
        Stat::new("Traffic Quality", "2.1x", "better conversion"),
    ]
}

/// Headline numbers of the market growth section. Bare numbers count up to
/// a percentage once the section is visible.
pub fn market_stats() -> Vec<Stat> {
    vec![
        Stat::new("Weekly Usage", "65", "of professionals use AI search weekly"),
        Stat::new("Search Intent", "3x", "higher intent than traditional search"),
        Stat::new("Conversion", "2.1x", "better conversion from AI traffic"),
        Stat::new("Momentum", "40", "month-over-month growth"),
    ]
}
