use std::collections::BTreeMap;
use std::time::Instant;

use crate::transitions::TransitionConfig;

/// Work deferred until a height transition finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Drop the explicit height so the element sizes naturally.
    ReleaseHeight,
    /// Release the height, then swap the element back to its truncated
    /// content and re-attach an inline toggle.
    Collapse,
}

#[derive(Debug, Clone)]
struct ActiveTransition {
    from: u16,
    to: u16,
    start: Instant,
    config: TransitionConfig,
    completion: Completion,
}

impl ActiveTransition {
    fn value_at(&self, now: Instant) -> u16 {
        let eased = self.config.progress(now.saturating_duration_since(self.start));
        lerp_u16(self.from, self.to, eased)
    }

    fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.config.duration
    }
}

/// Result of advancing the animator to a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Current height of every transition still running, by element index.
    pub heights: Vec<(usize, u16)>,
    /// Transitions that reached their target, by element index.
    pub finished: Vec<(usize, Completion)>,
}

/// Height transitions of managed elements, at most one per element.
#[derive(Debug, Default)]
pub struct HeightAnimator {
    active: BTreeMap<usize, ActiveTransition>,
}

impl HeightAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_active(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.contains_key(&index)
    }

    /// Start a transition for `index` from `from` to `to`.
    ///
    /// A transition already running for the element is replaced: the new one
    /// starts from the replaced one's current height, and the replaced
    /// completion is returned without being run.
    pub fn start(
        &mut self,
        index: usize,
        from: u16,
        to: u16,
        config: TransitionConfig,
        completion: Completion,
        now: Instant,
    ) -> Option<Completion> {
        let previous = self.active.remove(&index);
        let from = previous.as_ref().map_or(from, |p| p.value_at(now));

        log::trace!(
            "[animation] element {} height {} -> {} over {:?}",
            index,
            from,
            to,
            config.duration
        );

        self.active.insert(
            index,
            ActiveTransition {
                from,
                to,
                start: now,
                config,
                completion,
            },
        );
        previous.map(|p| p.completion)
    }

    /// Interpolated height of a running transition.
    pub fn current(&self, index: usize, now: Instant) -> Option<u16> {
        self.active.get(&index).map(|t| t.value_at(now))
    }

    /// Stop a transition without running its completion.
    pub fn cancel(&mut self, index: usize) -> Option<Completion> {
        self.active.remove(&index).map(|t| t.completion)
    }

    /// Advance every transition to `now`, pruning the finished ones.
    pub fn tick(&mut self, now: Instant) -> Frame {
        let mut frame = Frame::default();

        self.active.retain(|index, transition| {
            if transition.is_done(now) {
                frame.finished.push((*index, transition.completion));
                false
            } else {
                frame.heights.push((*index, transition.value_at(now)));
                true
            }
        });

        frame
    }
}

fn lerp_u16(from: u16, to: u16, t: f32) -> u16 {
    let from = from as f32;
    let to = to as f32;
    (from + (to - from) * t).round() as u16
}
