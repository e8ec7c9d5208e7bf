use std::rc::Rc;

use yew::prelude::*;

use crate::growth::counter::{CounterEngine, CounterTiming, GlooTicker};
use crate::growth::stats::Stat;
use crate::growth::visibility::VisibilityLatch;

#[derive(Properties, PartialEq)]
pub struct StatCardsProps {
    pub stats: Vec<Stat>,
    pub timing: CounterTiming,
    /// Whether the owning section has been seen yet.
    pub visible: bool,
}

struct CounterValues(Vec<f64>);

impl Reducible for CounterValues {
    type Action = (usize, f64);

    fn reduce(self: Rc<Self>, (index, value): (usize, f64)) -> Rc<Self> {
        let mut values = self.0.clone();
        if let Some(slot) = values.get_mut(index) {
            *slot = value;
        }
        Rc::new(CounterValues(values))
    }
}

#[function_component(StatCards)]
pub fn stat_cards(props: &StatCardsProps) -> Html {
    let count = props.stats.len();
    let values = use_reducer(move || CounterValues(vec![0.0; count]));
    let engine = use_mut_ref(|| None::<CounterEngine<GlooTicker>>);
    let latch = use_mut_ref(VisibilityLatch::new);

    // Engine lives exactly as long as the component
    {
        let engine = engine.clone();
        let stats = props.stats.clone();
        let timing = props.timing;
        use_effect_with_deps(
            move |_| {
                *engine.borrow_mut() = Some(CounterEngine::new(&stats, timing, GlooTicker));
                move || {
                    if let Some(mut engine) = engine.borrow_mut().take() {
                        engine.dispose();
                    }
                }
            },
            (),
        );
    }

    {
        let engine = engine.clone();
        let latch = latch.clone();
        let dispatcher = values.dispatcher();
        use_effect_with_deps(
            move |visible: &bool| {
                if let Some(token) = latch.borrow_mut().observe(*visible) {
                    if let Some(engine) = engine.borrow_mut().as_mut() {
                        engine.start(token, move |index, value| dispatcher.dispatch((index, value)));
                    }
                }
                || ()
            },
            props.visible,
        );
    }

    html! {
        <div class="stat-grid">
            { for props.stats.iter().enumerate().map(|(index, stat)| {
                let current = values.0.get(index).copied().unwrap_or_default();
                html! {
                    <div class="stat-card" key={index}>
                        <div class="stat-label">{&stat.label}</div>
                        <div class="stat-value">{stat.target.display(current)}</div>
                        <div class="stat-sublabel">{&stat.sublabel}</div>
                    </div>
                }
            }) }
        </div>
    }
}
