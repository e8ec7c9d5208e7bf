use std::rc::Rc;

use yew::Reducible;

use crate::growth::milestones::MilestoneRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter(usize),
    Leave(usize),
}

/// Which milestone card, if any, is under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(usize),
}

impl HoverState {
    pub fn apply(self, event: PointerEvent) -> Self {
        match (self, event) {
            (_, PointerEvent::Enter(index)) => HoverState::Hovering(index),
            (HoverState::Hovering(current), PointerEvent::Leave(index)) if current == index => {
                HoverState::Idle
            }
            // stale leave for a card we already moved off
            (state, PointerEvent::Leave(_)) => state,
        }
    }

    pub fn hovered(&self) -> Option<usize> {
        match self {
            HoverState::Idle => None,
            HoverState::Hovering(index) => Some(*index),
        }
    }

    pub fn is_hovered(&self, index: usize) -> bool {
        self.hovered() == Some(index)
    }

    /// Detail lines of the hovered milestone.
    pub fn tooltip<'a>(&self, registry: &'a MilestoneRegistry) -> Option<&'a [String]> {
        self.hovered()
            .and_then(|index| registry.get(index))
            .map(|milestone| milestone.details.as_slice())
    }
}

impl Reducible for HoverState {
    type Action = PointerEvent;

    fn reduce(self: Rc<Self>, action: PointerEvent) -> Rc<Self> {
        let next = (*self).apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}
