use log::error;
use yew::prelude::*;

use crate::components::charts::{MarketChart, TrajectoryChart};
use crate::components::in_view::use_in_view;
use crate::components::milestone_cards::MilestoneCards;
use crate::components::stat_cards::StatCards;
use crate::config::{self, GrowthConfig};
use crate::growth::market::MarketGrowth;
use crate::growth::milestones::MilestoneRegistry;
use crate::growth::stats::{journey_stats, market_stats};

#[derive(Properties, PartialEq)]
pub struct SectionProps {
    pub config: GrowthConfig,
}

#[function_component(HowItWorks)]
pub fn how_it_works(props: &SectionProps) -> Html {
    let section_ref = use_node_ref();
    let visible = use_in_view(section_ref.clone(), props.config.in_view_margin);

    let journey = use_memo(
        |(max_week, slope): &(u32, f64)| {
            let journey = MilestoneRegistry::landing().and_then(|registry| {
                let points = registry.trajectory(*max_week, *slope)?;
                Ok((registry, points))
            });
            if let Err(err) = &journey {
                error!("growth trajectory unavailable: {}", err);
            }
            journey
        },
        (props.config.max_week, props.config.extrapolation_slope),
    );

    html! {
        <section class="how-it-works" ref={section_ref}>
            <span class="section-badge">{"How It Works"}</span>
            <h2>{"From Invisible to Unmissable in AI Search"}</h2>
            <p class="section-lead">
                {"Our proven 5-stage framework transforms your brand visibility across ChatGPT, Perplexity, Claude, and Gemini."}
            </p>
            {
                match &*journey {
                    Ok((registry, points)) => html! {
                        <div class="graph-container">
                            <div class="graph-header">
                                <h3>{"AI Visibility Growth Trajectory"}</h3>
                                <p>{"Your journey to AI search dominance"}</p>
                            </div>
                            <TrajectoryChart points={points.clone()} registry={registry.clone()} />
                            <div class="graph-callout">
                                {format!("Average {}% visibility increase in 90 days", registry.last().visibility_percent)}
                            </div>
                            <MilestoneCards registry={registry.clone()} />
                        </div>
                    },
                    Err(_) => html! {},
                }
            }
            <StatCards stats={journey_stats()} timing={props.config.counter} {visible} />
            <div class="section-cta">
                <h3>{"Ready to Start Your Growth Journey?"}</h3>
                <p>{"See your current score, benchmark vs competitors, get custom roadmap"}</p>
                <button class="hero-cta">{"Get Your Free AI Visibility Report"}</button>
            </div>
        </section>
    }
}

#[function_component(MarketGrowthSection)]
pub fn market_growth_section(props: &SectionProps) -> Html {
    let section_ref = use_node_ref();
    let visible = use_in_view(section_ref.clone(), props.config.in_view_margin);
    let market = use_memo(|_| MarketGrowth::landing(), ());
    let latest = market.periods.len().saturating_sub(1);

    html! {
        <section class="market-growth" ref={section_ref}>
            <span class="section-badge">{"Market Growth"}</span>
            <h2>{"The AI Search Revolution Is Here. Is Your Brand Ready?"}</h2>
            <p class="section-lead">
                {"Over 1.5 billion people now search with AI platforms. Don't let your competitors capture this traffic while you're invisible."}
            </p>
            <div class="graph-container">
                <div class="graph-header">
                    <h3>{"Monthly Active Users by Platform"}</h3>
                    <p>{format!("In millions, {} to {}", market.period_label(0), market.period_label(latest))}</p>
                </div>
                <MarketChart market={(*market).clone()} />
                <div class="graph-callout">
                    {format!("{}M+ monthly users across the leading AI platforms", market.total_at(latest))}
                </div>
            </div>
            <StatCards stats={market_stats()} timing={props.config.counter} {visible} />
        </section>
    }
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let config = config::growth();

    // Scroll to top only on initial mount
    use_effect_with_deps(
        move |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    html! {
        <div class="landing-page">
            <style>
                {r#"
                    .landing-page {
                        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                        color: #0F172A;
                    }
                    .hero, .how-it-works, .market-growth {
                        max-width: 1200px;
                        margin: 0 auto;
                        padding: 96px 24px;
                        text-align: center;
                    }
                    .section-badge {
                        display: inline-block;
                        padding: 8px 16px;
                        border-radius: 999px;
                        background: #EEF2FF;
                        color: #4F46E5;
                        font-size: 14px;
                    }
                    .graph-container {
                        background: white;
                        border-radius: 24px;
                        border: 1px solid #F1F5F9;
                        box-shadow: 0 20px 40px rgba(226, 232, 240, 0.5);
                        padding: 32px;
                        margin: 48px 0 32px;
                        text-align: left;
                    }
                    .graph-callout {
                        display: inline-block;
                        margin-top: 16px;
                        padding: 8px 16px;
                        border-radius: 12px;
                        background: linear-gradient(90deg, #6366F1, #9333EA);
                        color: white;
                        font-weight: 600;
                    }
                    .milestone-grid, .stat-grid {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
                        gap: 16px;
                        margin-top: 32px;
                    }
                    .milestone {
                        position: relative;
                        cursor: pointer;
                    }
                    .milestone-card {
                        padding: 16px;
                        border-radius: 12px;
                        border: 1px solid #F1F5F9;
                        background: white;
                        transition: all 0.3s;
                    }
                    .milestone-card.hovered {
                        background: linear-gradient(135deg, #EEF2FF, #FAF5FF);
                        border-color: #C7D2FE;
                        box-shadow: 0 10px 20px rgba(99, 102, 241, 0.15);
                    }
                    .milestone-icon {
                        width: 40px;
                        height: 40px;
                        border-radius: 8px;
                        margin-bottom: 12px;
                    }
                    .milestone-week { font-size: 12px; color: #64748B; }
                    .milestone-stage { font-weight: 700; }
                    .milestone-visibility { font-size: 24px; font-weight: 700; }
                    .milestone-tooltip {
                        position: absolute;
                        z-index: 20;
                        bottom: 100%;
                        left: 50%;
                        transform: translateX(-50%);
                        width: 256px;
                        padding: 16px;
                        margin-bottom: 8px;
                        background: white;
                        border-radius: 12px;
                        border: 1px solid #F1F5F9;
                        box-shadow: 0 20px 40px rgba(15, 23, 42, 0.15);
                    }
                    .stat-card {
                        background: white;
                        border-radius: 16px;
                        border: 1px solid #F1F5F9;
                        padding: 24px;
                    }
                    .stat-value { font-size: 32px; font-weight: 700; }
                    .stat-label, .stat-sublabel { font-size: 14px; color: #64748B; }
                    .hero-cta {
                        padding: 16px 32px;
                        border: none;
                        border-radius: 12px;
                        background: linear-gradient(90deg, #4F46E5, #9333EA);
                        color: white;
                        font-size: 18px;
                        cursor: pointer;
                    }
                "#}
            </style>
            <section class="hero">
                <h1>{"Get Found by AI Search"}</h1>
                <p class="hero-subtitle">
                    {"Track and grow how ChatGPT, Perplexity, Claude, and Gemini cite your brand."}
                </p>
                <button class="hero-cta">{"Start Free Trial"}</button>
            </section>
            <MarketGrowthSection config={config.clone()} />
            <HowItWorks {config} />
        </div>
    }
}
