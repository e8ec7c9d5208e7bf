use log::error;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use thiserror::Error;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::growth::market::MarketGrowth;
use crate::growth::milestones::MilestoneRegistry;
use crate::growth::trajectory::GraphPoint;

const BASELINE_GRAY: RGBColor = RGBColor(0xCB, 0xD5, 0xE1);
const LINE_INDIGO: RGBColor = RGBColor(0x63, 0x66, 0xF1);

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("canvas is not mounted")]
    NotMounted,
    #[error("could not attach a drawing backend to the canvas")]
    Backend,
    #[error("drawing failed: {0}")]
    Draw(String),
}

fn draw_err<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Draw(err.to_string())
}

type Area = DrawingArea<CanvasBackend, Shift>;

fn draw_on(
    canvas_ref: &NodeRef,
    width: u32,
    height: u32,
    draw: impl FnOnce(&Area) -> Result<(), ChartError>,
) -> Result<(), ChartError> {
    let canvas = canvas_ref
        .cast::<HtmlCanvasElement>()
        .ok_or(ChartError::NotMounted)?;
    canvas.set_width(width);
    canvas.set_height(height);

    let backend = CanvasBackend::with_canvas_object(canvas).ok_or(ChartError::Backend)?;
    let root = backend.into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;
    draw(&root)?;
    root.present().map_err(draw_err)
}

fn draw_trajectory(
    root: &Area,
    points: &[GraphPoint],
    registry: &MilestoneRegistry,
) -> Result<(), ChartError> {
    let last_week = points.last().map(|p| p.week_num).unwrap_or(0);
    let peak = points.iter().map(|p| p.optimized_value).max().unwrap_or(0);
    let y_top = (peak + peak / 10).max(10);

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0u32..last_week, 0i64..y_top)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(points.len())
        .x_label_formatter(&|week| {
            points
                .get(*week as usize)
                .map(|p| p.week_label.clone())
                .unwrap_or_default()
        })
        .y_label_formatter(&|value| format!("{}%", value))
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|p| (p.week_num, p.baseline_value)),
            BASELINE_GRAY.stroke_width(2),
        ))
        .map_err(draw_err)?
        .label("Without Optimization")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BASELINE_GRAY.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|p| (p.week_num, p.optimized_value)),
            LINE_INDIGO.stroke_width(4),
        ))
        .map_err(draw_err)?
        .label("With Our Platform")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], LINE_INDIGO.stroke_width(2)));

    let tagged: Vec<(&GraphPoint, RGBColor)> = points
        .iter()
        .filter_map(|p| {
            let tag = p.milestone_tag.as_deref()?;
            let milestone = registry.find_stage(tag)?;
            Some((p, RGBColor::from(milestone.color)))
        })
        .collect();

    chart
        .draw_series(tagged.iter().map(|(p, color)| {
            Circle::new((p.week_num, p.optimized_value), 8, color.filled())
        }))
        .map_err(draw_err)?;

    // Stage names alternate above and below the line so neighbours don't collide
    chart
        .draw_series(tagged.iter().enumerate().map(|(i, (p, color))| {
            let offset = if i % 2 == 0 { -28 } else { 14 };
            EmptyElement::at((p.week_num, p.optimized_value))
                + Text::new(
                    p.milestone_tag.clone().unwrap_or_default(),
                    (-20, offset),
                    ("sans-serif", 12).into_font().color(color),
                )
        }))
        .map_err(draw_err)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BASELINE_GRAY)
        .draw()
        .map_err(draw_err)
}

fn draw_market(root: &Area, market: &MarketGrowth) -> Result<(), ChartError> {
    let last_period = market.periods.len().saturating_sub(1);
    let peak = market.peak();

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0usize..last_period, 0u32..(peak + peak / 10).max(10))
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(market.periods.len())
        .x_label_formatter(&|period| market.period_label(*period).to_string())
        .y_label_formatter(&|value| format!("{}M", value))
        .draw()
        .map_err(draw_err)?;

    for series in &market.series {
        let color = RGBColor::from(series.color);
        chart
            .draw_series(LineSeries::new(
                series.values.iter().copied().enumerate(),
                color.stroke_width(3),
            ))
            .map_err(draw_err)?
            .label(series.name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BASELINE_GRAY)
        .draw()
        .map_err(draw_err)
}

#[derive(Properties, PartialEq)]
pub struct TrajectoryChartProps {
    pub points: Vec<GraphPoint>,
    pub registry: MilestoneRegistry,
}

#[function_component(TrajectoryChart)]
pub fn trajectory_chart(props: &TrajectoryChartProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with_deps(
            move |(points, registry): &(Vec<GraphPoint>, MilestoneRegistry)| {
                if let Err(err) = draw_on(&canvas_ref, 720, 400, |root| {
                    draw_trajectory(root, points, registry)
                }) {
                    error!("trajectory chart: {}", err);
                }
                || ()
            },
            (props.points.clone(), props.registry.clone()),
        );
    }

    html! {
        <div class="growth-chart">
            <canvas ref={canvas_ref} width="720" height="400" style="max-width: 100%;" />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MarketChartProps {
    pub market: MarketGrowth,
}

#[function_component(MarketChart)]
pub fn market_chart(props: &MarketChartProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with_deps(
            move |market: &MarketGrowth| {
                if let Err(err) = draw_on(&canvas_ref, 720, 400, |root| draw_market(root, market)) {
                    error!("market chart: {}", err);
                }
                || ()
            },
            props.market.clone(),
        );
    }

    html! {
        <div class="growth-chart">
            <canvas ref={canvas_ref} width="720" height="400" style="max-width: 100%;" />
        </div>
    }
}
