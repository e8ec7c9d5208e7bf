use crate::growth::milestones::Rgb;

/// Monthly active users of one AI search platform, in millions, one value per
/// entry of [`MarketGrowth::periods`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformSeries {
    pub name: &'static str,
    pub color: Rgb,
    pub values: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketGrowth {
    pub periods: Vec<&'static str>,
    pub series: Vec<PlatformSeries>,
}

impl MarketGrowth {
    pub fn landing() -> Self {
        MarketGrowth {
            periods: vec![
                "2023", "Q2 2023", "Q3 2023", "Q4 2023", "2024", "Q2 2024", "Q3 2024", "Q4 2024",
                "2025", "2026*",
            ],
            series: vec![
                PlatformSeries {
                    name: "ChatGPT",
                    color: Rgb::hex(0x10B981),
                    values: vec![200, 300, 400, 500, 550, 620, 700, 750, 800, 950],
                },
                PlatformSeries {
                    name: "Gemini",
                    color: Rgb::hex(0x6366F1),
                    values: vec![50, 80, 120, 150, 180, 210, 230, 245, 250, 320],
                },
                PlatformSeries {
                    name: "Perplexity",
                    color: Rgb::hex(0xF59E0B),
                    values: vec![10, 20, 35, 50, 65, 80, 90, 95, 100, 150],
                },
                PlatformSeries {
                    name: "Claude",
                    color: Rgb::hex(0xEC4899),
                    values: vec![5, 10, 18, 25, 32, 40, 45, 48, 50, 80],
                },
            ],
        }
    }

    pub fn peak(&self) -> u32 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Sum over every platform for one period.
    pub fn total_at(&self, period: usize) -> u32 {
        self.series
            .iter()
            .filter_map(|s| s.values.get(period))
            .sum()
    }

    pub fn period_label(&self, period: usize) -> &str {
        self.periods.get(period).copied().unwrap_or_default()
    }
}
