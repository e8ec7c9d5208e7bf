/// Proof that a section has become visible. Only a [`VisibilityLatch`] can
/// create one, and it does so at most once.
#[derive(Debug)]
pub struct BecameVisible {
    _private: (),
}

/// Turns repeated "is intersecting" readings into a single
/// [`BecameVisible`] token. Later readings, visible or not, change nothing.
#[derive(Debug, Default)]
pub struct VisibilityLatch {
    fired: bool,
}

impl VisibilityLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, intersecting: bool) -> Option<BecameVisible> {
        if self.fired || !intersecting {
            return None;
        }
        self.fired = true;
        Some(BecameVisible { _private: () })
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
