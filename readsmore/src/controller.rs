//! Per-element truncate / expand / collapse state machine.
//!
//! Each managed element moves between two states:
//!
//! ```text
//!            click                     click
//! Collapsed ───────► Expanded ───────► Collapsed ...
//! ```
//!
//! With animation enabled both transitions run in two phases. The height
//! transition starts immediately; its [`Completion`] runs from [`tick`] once
//! the target height is reached. Collapsing keeps the full content in place
//! until then so the shrinking box still has something to clip.
//!
//! Activating an element again while its transition is running replaces the
//! transition: the new one starts from the current height and the pending
//! completion is dropped.
//!
//! [`tick`]: TruncationController::tick

use std::collections::HashMap;
use std::future::IntoFuture;
use std::time::Instant;

use crate::animation::{Completion, HeightAnimator};
use crate::element::{Dom, Node, NodeId};
use crate::error::{Error, Result};
use crate::options::{Options, CHARS_ATTR, EXPANDED_CLASS, INLINE_ATTR, WORDS_ATTR};
use crate::text::{ellipse, Unit};
use crate::types::{Overflow, Size};

/// Nodes making up one toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    pub wrap: NodeId,
    pub link: NodeId,
}

/// Everything the controller knows about one managed element.
#[derive(Debug, Clone)]
pub struct ElementRecord {
    pub node: NodeId,
    /// Markup captured before any mutation.
    pub original_content: String,
    /// Shortened markup with the marker appended. Computed once.
    pub truncated_content: String,
    /// Unit `limit` and `truncated_content` are measured in.
    pub unit: Unit,
    pub limit: usize,
    /// Unit `original_count` is measured in: words when a words override is
    /// set, characters otherwise.
    pub count_unit: Unit,
    /// Size of `original_content` in `count_unit`, compared with `limit`.
    pub original_count: usize,
    pub expanded: bool,
    pub full_height: Option<u16>,
    pub truncated_height: Option<u16>,
    pub toggle: Option<Toggle>,
}

impl ElementRecord {
    /// Whether the element was shortened and carries a toggle.
    pub fn is_truncated(&self) -> bool {
        self.toggle.is_some()
    }
}

pub struct TruncationController<D: Dom> {
    dom: D,
    elements: Vec<NodeId>,
    options: Options,
    records: Vec<ElementRecord>,
    /// Toggle link id -> element index.
    bindings: HashMap<String, usize>,
    animator: HeightAnimator,
    initialized: bool,
}

impl<D: Dom> TruncationController<D> {
    pub fn new(dom: D, elements: Vec<NodeId>, options: Options) -> Self {
        Self {
            dom,
            elements,
            options,
            records: Vec::new(),
            bindings: HashMap::new(),
            animator: HeightAnimator::new(),
            initialized: false,
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn into_dom(self) -> D {
        self.dom
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn elements(&self) -> &[NodeId] {
        &self.elements
    }

    pub fn records(&self) -> &[ElementRecord] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&ElementRecord> {
        self.records.get(index)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn has_active_transitions(&self) -> bool {
        self.animator.has_active()
    }

    /// Wait for `fonts_ready`, then truncate every element.
    ///
    /// Text metrics are only stable once fonts have loaded, so nothing is
    /// measured before the future resolves.
    pub async fn initialize<F>(&mut self, fonts_ready: F) -> Result<()>
    where
        F: IntoFuture<Output = ()>,
    {
        fonts_ready.await;
        self.initialize_now()
    }

    /// Truncate every element, in order, without waiting.
    pub fn initialize_now(&mut self) -> Result<()> {
        if self.initialized {
            return Err(Error::AlreadyInitialized);
        }
        self.initialized = true;

        for index in 0..self.elements.len() {
            let node = self.elements[index];

            if self.options.is_inline {
                self.dom.set_data(node, INLINE_ATTR, "true");
            }

            let full_height = if self.options.animate {
                Some(self.measure_full_height(index, node)?)
            } else {
                None
            };

            let mut record = self.truncate(index, node)?;

            if self.options.animate {
                record.full_height = full_height;
                record.truncated_height = Some(self.dom.outer_height(node));
                log::trace!(
                    "[readsmore] element {} heights: full {:?}, truncated {:?}",
                    index,
                    record.full_height,
                    record.truncated_height
                );
            }

            self.records.push(record);
        }

        Ok(())
    }

    /// Height of the untouched element, laid out as it will be once expanded.
    fn measure_full_height(&mut self, index: usize, node: NodeId) -> Result<u16> {
        if self.options.animation_overflow {
            self.dom.set_overflow(node, Overflow::Auto);
        }

        // An inline toggle takes up room in the expanded layout, so measure
        // with an invisible one in place.
        let placeholder = if self.options.is_inline {
            let toggle = self.create_toggle(index, false)?;
            self.dom.set_hidden(toggle.wrap, true);
            Some(toggle)
        } else {
            None
        };

        let height = self.dom.outer_height(node);

        if let Some(toggle) = placeholder {
            self.dom.remove(toggle.wrap);
            self.bindings.remove(&self.options.toggle_id(index));
        }

        Ok(height)
    }

    fn truncate(&mut self, index: usize, node: NodeId) -> Result<ElementRecord> {
        let chars = self.override_limit(node, CHARS_ATTR);
        let words = self.override_limit(node, WORDS_ATTR);

        let (limit, unit) = match (chars, words) {
            (Some(chars), _) => (chars, Unit::Chars),
            (None, Some(words)) => (words, Unit::Words),
            (None, None) => (self.options.words_count, Unit::Words),
        };

        // Only an explicit words override counts words; the default word
        // limit and the chars override are compared against characters.
        let count_unit = if words.is_some() {
            Unit::Words
        } else {
            Unit::Chars
        };

        let original_content = self.dom.html(node);
        let truncated_content = ellipse(&original_content, limit, unit, &self.options.ellipse);
        let original_count = count_unit.count(&original_content);

        let mut record = ElementRecord {
            node,
            original_content,
            truncated_content,
            unit,
            limit,
            count_unit,
            original_count,
            expanded: false,
            full_height: None,
            truncated_height: None,
            toggle: None,
        };

        if limit < original_count {
            self.dom.set_html(node, &record.truncated_content);
            record.toggle = Some(self.create_toggle(index, false)?);
            log::debug!(
                "[readsmore] element {} truncated to {} {:?} ({} {:?})",
                index,
                limit,
                unit,
                original_count,
                count_unit
            );
        } else {
            log::debug!(
                "[readsmore] element {} fits ({} {:?} against {}), left untouched",
                index,
                original_count,
                count_unit,
                limit
            );
        }

        Ok(record)
    }

    /// Per-element limit from a data attribute. Unparseable values fall back
    /// to the configured default.
    fn override_limit(&self, node: NodeId, key: &str) -> Option<usize> {
        let raw = self.dom.data(node, key)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        match raw.parse::<usize>() {
            Ok(limit) => Some(limit),
            Err(e) => {
                log::warn!("[readsmore] ignoring data-{key}=\"{raw}\": {e}");
                None
            }
        }
    }

    /// Build a toggle for the element at `index`, attach it, and bind it.
    fn create_toggle(&mut self, index: usize, expanded: bool) -> Result<Toggle> {
        let node = self.elements[index];
        let id = self.options.toggle_id(index);

        let wrap = self
            .dom
            .create_node(Node::toggle_wrap(self.options.wrap_class()));
        let mut link = Node::toggle_link(
            id.clone(),
            self.options.link_class(),
            self.options.label(expanded),
        );
        link.clicked = expanded;
        let link = self.dom.create_node(link);
        self.dom.append_child(wrap, link);

        if self.options.is_inline {
            self.dom.append_child(node, wrap);
        } else {
            self.dom.insert_after(node, wrap);
        }

        let bound = self
            .dom
            .find_by_id(&id)
            .ok_or_else(|| Error::ToggleMissing { id: id.clone() })?;
        self.bindings.insert(id, index);

        Ok(Toggle { wrap, link: bound })
    }

    /// Dispatch a click on `target`. Returns false when it is not one of
    /// this controller's toggles.
    pub fn handle_click(&mut self, target: &str, now: Instant) -> Result<bool> {
        let Some(&index) = self.bindings.get(target) else {
            return Ok(false);
        };
        self.activate_at(index, now)?;
        Ok(true)
    }

    pub fn activate(&mut self, index: usize) -> Result<()> {
        self.activate_at(index, Instant::now())
    }

    /// Flip the element at `index` between collapsed and expanded.
    pub fn activate_at(&mut self, index: usize, now: Instant) -> Result<()> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        let record = self
            .records
            .get(index)
            .ok_or(Error::UnknownElement(index))?;
        if !record.is_truncated() {
            return Err(Error::NotTruncated(index));
        }

        self.dom.toggle_class(record.node, EXPANDED_CLASS);

        if record.expanded {
            self.collapse(index, now)
        } else {
            self.expand(index, now)
        }
    }

    fn expand(&mut self, index: usize, now: Instant) -> Result<()> {
        let node = self.records[index].node;
        self.dom.set_html(node, &self.records[index].original_content);
        self.records[index].expanded = true;

        if self.options.is_inline {
            // The old toggle went away with the replaced content
            let toggle = self.create_toggle(index, true)?;
            self.records[index].toggle = Some(toggle);
        } else {
            self.relabel(index, true);
        }

        log::debug!("[readsmore] element {index} expanded");

        let record = &self.records[index];
        if let (true, Some(full), Some(short)) = (
            self.options.animate,
            record.full_height,
            record.truncated_height,
        ) {
            self.start_transition(index, short, full, Completion::ReleaseHeight, now);
        }

        Ok(())
    }

    fn collapse(&mut self, index: usize, now: Instant) -> Result<()> {
        self.records[index].expanded = false;
        self.relabel(index, false);

        log::debug!("[readsmore] element {index} collapsed");

        let record = &self.records[index];
        match (
            self.options.animate,
            record.full_height,
            record.truncated_height,
        ) {
            (true, Some(full), Some(short)) => {
                self.dom.set_overflow(record.node, Overflow::Hidden);
                self.start_transition(index, full, short, Completion::Collapse, now);
                Ok(())
            }
            _ => self.restore_truncated(index),
        }
    }

    fn relabel(&mut self, index: usize, expanded: bool) {
        if let Some(toggle) = self.records[index].toggle {
            self.dom
                .set_html(toggle.link, self.options.label(expanded));
            self.dom.set_clicked(toggle.link, expanded);
        }
    }

    fn start_transition(
        &mut self,
        index: usize,
        from: u16,
        to: u16,
        completion: Completion,
        now: Instant,
    ) {
        let dropped = self.animator.start(
            index,
            from,
            to,
            self.options.transition(),
            completion,
            now,
        );
        if let Some(dropped) = dropped {
            log::debug!("[readsmore] element {index} restarted, dropped {dropped:?}");
        }

        let height = self.animator.current(index, now).unwrap_or(from);
        self.dom.set_height(self.records[index].node, Size::Fixed(height));
    }

    /// Put the truncated content back, re-attaching an inline toggle.
    fn restore_truncated(&mut self, index: usize) -> Result<()> {
        let node = self.records[index].node;
        self.dom.set_html(node, &self.records[index].truncated_content);

        if self.options.is_inline {
            let toggle = self.create_toggle(index, false)?;
            self.records[index].toggle = Some(toggle);
        }
        Ok(())
    }

    /// Advance running height transitions to `now` and run the completions
    /// of those that finished.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        let frame = self.animator.tick(now);

        for (index, height) in frame.heights {
            self.dom
                .set_height(self.records[index].node, Size::Fixed(height));
        }

        for (index, completion) in frame.finished {
            self.complete(index, completion)?;
        }
        Ok(())
    }

    fn complete(&mut self, index: usize, completion: Completion) -> Result<()> {
        let node = self.records[index].node;
        self.dom.set_height(node, Size::Auto);
        self.dom.set_overflow(node, self.resting_overflow());

        match completion {
            Completion::ReleaseHeight => Ok(()),
            Completion::Collapse => self.restore_truncated(index),
        }
    }

    fn resting_overflow(&self) -> Overflow {
        if self.options.animate && self.options.animation_overflow {
            Overflow::Auto
        } else {
            Overflow::Visible
        }
    }
}
