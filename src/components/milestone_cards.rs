use yew::prelude::*;

use crate::growth::hover::{HoverState, PointerEvent};
use crate::growth::milestones::MilestoneRegistry;

#[derive(Properties, PartialEq)]
pub struct MilestoneCardsProps {
    pub registry: MilestoneRegistry,
}

#[function_component(MilestoneCards)]
pub fn milestone_cards(props: &MilestoneCardsProps) -> Html {
    let hover = use_reducer(HoverState::default);
    let tooltip = hover.tooltip(&props.registry);

    html! {
        <div class="milestone-grid">
            { for props.registry.milestones().iter().enumerate().map(|(index, milestone)| {
                let onmouseenter = {
                    let hover = hover.dispatcher();
                    Callback::from(move |_: MouseEvent| hover.dispatch(PointerEvent::Enter(index)))
                };
                let onmouseleave = {
                    let hover = hover.dispatcher();
                    Callback::from(move |_: MouseEvent| hover.dispatch(PointerEvent::Leave(index)))
                };
                let is_hovered = hover.is_hovered(index);

                html! {
                    <div
                        class="milestone"
                        key={index}
                        title={milestone.description.clone()}
                        {onmouseenter}
                        {onmouseleave}
                    >
                        <div class={classes!("milestone-card", is_hovered.then_some("hovered"))}>
                            <div
                                class="milestone-icon"
                                style={format!("background-color: {};", milestone.color.css_with_alpha(0x20))}
                            />
                            <div class="milestone-week">{format!("Week {}", milestone.display_week())}</div>
                            <div class="milestone-stage">{&milestone.stage}</div>
                            <div class="milestone-visibility" style={format!("color: {};", milestone.color.css())}>
                                {format!("{}%", milestone.visibility_percent)}
                            </div>
                        </div>
                        {
                            match tooltip.filter(|_| is_hovered) {
                                Some(details) => html! {
                                    <div class="milestone-tooltip">
                                        <h4>{&milestone.stage}</h4>
                                        <ul>
                                            { for details.iter().map(|detail| html! { <li>{detail}</li> }) }
                                        </ul>
                                    </div>
                                },
                                None => html! {},
                            }
                        }
                    </div>
                }
            }) }
        </div>
    }
}
