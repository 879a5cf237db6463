//! Gallery controller implementation
//!
//! Wires the interaction core to a [`Surface`] and a catalog: builds the tag bar
//! and card grid, binds every interactive element, and runs the scheduled
//! continuations (delayed activations, exit waits, enter frames).

use crate::config::{AppConfig, GalleryConfig, InteractionConfig};
use crate::data::{ALL_TAG_ID, Card, Catalog, Tag};
use crate::error::{JunkyardError, Result};
use crate::interaction::{
    ActivationGate, DeviceModeResolver, GestureClassifier, InteractionBinder, InteractionContext,
    InteractionMode, SubscriptionId, TouchEndOutcome,
};
use crate::platform::{
    Clock, ElementId, EventOutcome, PlatformEvent, PointerCapability, Surface, TaskQueue, classes,
};
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// What an activation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryAction {
    /// Filter the cards by a tag id (or `all`)
    SelectTag(String),
    /// Navigate to a card's link
    OpenCard {
        /// Target URL
        link: String,
    },
}

/// Current filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// `all` or the id of a tag in the catalog
    pub selected_tag_id: String,
    /// The next render skips the exit phase
    pub is_first_render: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected_tag_id: ALL_TAG_ID.to_string(),
            is_first_render: true,
        }
    }
}

/// Where the card grid is in its transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    /// Cards of the current selection are shown
    Displaying,
    /// Old cards are animating out, the swap is pending
    Exiting,
}

/// Scheduled continuations
#[derive(Debug)]
enum Task {
    /// Confirmed tap: run the action, then leave the gate
    Activate(GalleryAction),
    /// Exit animation finished: swap in the cards for `tag_id`
    FinishExit { epoch: u64, tag_id: String },
    /// Enter transition for a freshly inserted card
    MarkVisible(ElementId),
    /// Deferred navigation after a touch activation
    OpenLink(String),
}

/// Owns filter state and drives the gallery's interaction and transitions
#[derive(Debug)]
pub struct GalleryController<S: Surface> {
    interaction_config: InteractionConfig,
    gallery_config: GalleryConfig,
    catalog: Catalog,
    surface: S,
    context: InteractionContext,
    resolver: DeviceModeResolver,
    mode_changes: mpsc::Receiver<InteractionMode>,
    binder: InteractionBinder<GalleryAction>,
    tasks: TaskQueue<Task>,
    filter: FilterState,
    tag_elements: Vec<(String, ElementId)>,
    displayed: Vec<ElementId>,
    pending_exits: usize,
    /// Bumped on every full rebuild; exit waits from an older epoch are dropped
    epoch: u64,
}

impl<S: Surface> GalleryController<S> {
    /// Create a controller. Nothing is rendered until [`Self::start`].
    pub fn new(
        config: &AppConfig,
        catalog: Catalog,
        surface: S,
        clock: Arc<dyn Clock>,
        capability: &dyn PointerCapability,
    ) -> Self {
        let interaction_config = config.interaction.clone();
        let mut resolver = DeviceModeResolver::new(capability);

        let (tx, mode_changes) = mpsc::channel();
        resolver.on_change(move |mode| {
            // Receiver lives as long as the controller that owns the resolver
            let _ = tx.send(*mode);
        });

        let context = InteractionContext::new(
            clock,
            ActivationGate::new(interaction_config.cooldown()),
            interaction_config.pressed_class.clone(),
        );
        let binder = InteractionBinder::new(
            resolver.current(),
            GestureClassifier::new(interaction_config.move_threshold_px),
            interaction_config.touch_delay(),
        );

        Self {
            interaction_config,
            gallery_config: config.gallery.clone(),
            catalog,
            surface,
            context,
            resolver,
            mode_changes,
            binder,
            tasks: TaskQueue::new(),
            filter: FilterState::default(),
            tag_elements: Vec::new(),
            displayed: Vec::new(),
            pending_exits: 0,
            epoch: 0,
        }
    }

    /// Build the tag bar and render every card
    pub fn start(&mut self) {
        info!(
            "Starting gallery in {} mode with {} tags and {} cards",
            self.mode(),
            self.catalog.tags().len(),
            self.catalog.cards().len()
        );
        self.rebuild_interface();
    }

    /// Forward a platform event. The returned outcome tells the host whether to
    /// cancel the native event.
    pub fn handle_event(&mut self, event: PlatformEvent) -> EventOutcome {
        match event {
            PlatformEvent::TouchStart { target, point } => {
                self.binder
                    .touch_start(&mut self.context, &mut self.surface, target, point);
            }
            PlatformEvent::TouchMove { target, point } => {
                self.binder.touch_move(&mut self.context, target, point);
            }
            PlatformEvent::TouchEnd { target } => {
                if let Some(target) = target {
                    self.finish_touch(target);
                }
                // Safety net for ends that never reached their element
                self.binder
                    .document_touch_end(&mut self.context, &mut self.surface);
            }
            PlatformEvent::TouchCancel { .. } => {
                self.binder.touch_cancel(&mut self.context, &mut self.surface);
            }
            PlatformEvent::Click { target } => {
                let outcome = self
                    .binder
                    .click(&mut self.context, &mut self.surface, target);
                let Some(action) = outcome.action else {
                    return outcome.event;
                };
                let navigates = matches!(action, GalleryAction::OpenCard { .. });
                self.perform(action);
                self.context.leave();
                if navigates {
                    // Navigation already happened here; the native link must not follow
                    return EventOutcome {
                        prevent_default: true,
                        ..outcome.event
                    };
                }
                return outcome.event;
            }
            PlatformEvent::PointerEnter { target } => self.hover(target, true),
            PlatformEvent::PointerLeave { target } => self.hover(target, false),
            PlatformEvent::VisibilityChanged { visible: true }
            | PlatformEvent::WindowBlur
            | PlatformEvent::WindowFocus => {
                self.context.reset(&mut self.surface);
            }
            PlatformEvent::VisibilityChanged { visible: false } => {}
            PlatformEvent::PointerCapabilityChanged { coarse } => {
                self.resolver.update(coarse);
                self.apply_mode_changes();
            }
        }
        EventOutcome::PASS
    }

    fn finish_touch(&mut self, target: ElementId) {
        match self
            .binder
            .touch_end(&mut self.context, &mut self.surface, target)
        {
            TouchEndOutcome::Confirmed { action, delay } => {
                let deadline = self.context.now() + delay;
                self.tasks.schedule_at(deadline, Task::Activate(action));
            }
            TouchEndOutcome::Suppressed | TouchEndOutcome::Rejected | TouchEndOutcome::Ignored => {}
        }
    }

    fn hover(&mut self, target: ElementId, entering: bool) {
        if self.mode() != InteractionMode::Pointer {
            return;
        }
        if !entering {
            self.surface.remove_class(target, classes::HOVER);
            return;
        }
        let is_tag = self.tag_elements.iter().any(|(_, id)| *id == target);
        if is_tag && self.surface.has_class(target, classes::SELECTED) {
            return;
        }
        if is_tag || self.displayed.contains(&target) {
            self.surface.add_class(target, classes::HOVER);
        }
    }

    /// Pick up mode toggles published by the resolver
    fn apply_mode_changes(&mut self) {
        let Some(mode) = self.mode_changes.try_iter().last() else {
            return;
        };
        info!("Rebuilding gallery for {} mode", mode);
        self.binder.set_mode(mode);
        self.filter = FilterState::default();
        self.rebuild_interface();
    }

    /// Recreate tags and cards, binding every element on the current mode's path
    fn rebuild_interface(&mut self) {
        self.epoch += 1;
        self.pending_exits = 0;
        self.binder.unbind_all();
        self.binder
            .touch_cancel(&mut self.context, &mut self.surface);

        self.surface.clear_tags();
        self.tag_elements.clear();

        if self.catalog.is_empty() {
            warn!("Gallery has no tags or no cards, rendering nothing");
            self.surface.clear_cards();
            self.displayed.clear();
            return;
        }

        let all = Tag {
            id: ALL_TAG_ID.to_string(),
            label: self.gallery_config.all_tag_label.clone(),
        };
        for tag in std::iter::once(&all).chain(self.catalog.tags()) {
            let element = self.surface.insert_tag(tag);
            self.binder
                .bind(element, GalleryAction::SelectTag(tag.id.clone()));
            self.tag_elements.push((tag.id.clone(), element));
        }

        if let Err(e) = self.select_tag(ALL_TAG_ID) {
            error!("Failed to select the 'all' tag: {}", e);
        }
        debug!("Bound {} elements", self.binder.len());
    }

    /// Select `tag_id` and re-render the cards.
    ///
    /// Selecting the tag that is already active still runs the full transition.
    pub fn select_tag(&mut self, tag_id: &str) -> Result<()> {
        if !self.catalog.has_tag(tag_id) {
            return Err(JunkyardError::UnknownTag(tag_id.to_string()));
        }
        if self.catalog.is_empty() {
            return Ok(());
        }

        for (id, element) in &self.tag_elements {
            if id == tag_id {
                self.surface.add_class(*element, classes::SELECTED);
                self.surface.remove_class(*element, classes::HOVER);
            } else {
                self.surface.remove_class(*element, classes::SELECTED);
            }
        }

        debug!("Selected tag '{}'", tag_id);
        self.filter.selected_tag_id = tag_id.to_string();
        self.render_cards();
        Ok(())
    }

    /// Replace the displayed cards with the current selection's subset
    pub fn render_cards(&mut self) {
        let tag_id = self.filter.selected_tag_id.clone();

        if self.filter.is_first_render {
            self.swap_cards(&tag_id);
            return;
        }

        for element in &self.displayed {
            self.surface.remove_class(*element, classes::VISIBLE);
            self.surface.add_class(*element, classes::HIDING);
        }
        self.pending_exits += 1;
        let deadline = self.context.now() + self.gallery_config.animation_duration();
        self.tasks.schedule_at(
            deadline,
            Task::FinishExit {
                epoch: self.epoch,
                tag_id,
            },
        );
    }

    fn swap_cards(&mut self, tag_id: &str) {
        let immediate = self.filter.is_first_render;

        for element in self.displayed.drain(..) {
            self.binder.unbind(element);
        }
        self.surface.clear_cards();

        for card in self.catalog.cards_for(tag_id) {
            let icon = self.catalog.icon(&card.icon_key);
            let element = self.surface.insert_card(card, icon);
            self.binder.bind(
                element,
                GalleryAction::OpenCard {
                    link: card.link.clone(),
                },
            );
            if immediate {
                self.surface.add_class(element, classes::VISIBLE);
            } else {
                self.tasks.request_frame(Task::MarkVisible(element));
            }
            self.displayed.push(element);
        }

        debug!(
            "Rendered {} cards for '{}' ({})",
            self.displayed.len(),
            tag_id,
            if immediate { "first render" } else { "transition" }
        );
        self.filter.is_first_render = false;
    }

    fn perform(&mut self, action: GalleryAction) {
        match action {
            GalleryAction::SelectTag(tag_id) => {
                if let Err(e) = self.select_tag(&tag_id) {
                    error!("Tag activation failed: {}", e);
                }
            }
            GalleryAction::OpenCard { link } => {
                if self.mode() == InteractionMode::Touch {
                    let deadline = self.context.now() + self.interaction_config.touch_delay();
                    self.tasks.schedule_at(deadline, Task::OpenLink(link));
                } else {
                    self.surface.open_link(&link);
                }
            }
        }
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Activate(action) => {
                self.perform(action);
                self.context.leave();
            }
            Task::FinishExit { epoch, tag_id } => {
                self.pending_exits = self.pending_exits.saturating_sub(1);
                if epoch != self.epoch {
                    debug!("Dropping exit for '{}' from before the last rebuild", tag_id);
                    return;
                }
                self.swap_cards(&tag_id);
            }
            Task::MarkVisible(element) => {
                if self.displayed.contains(&element) {
                    self.surface.add_class(element, classes::VISIBLE);
                }
            }
            Task::OpenLink(link) => self.surface.open_link(&link),
        }
    }

    /// Run every timer that is due. Returns how many ran.
    pub fn run_due_timers(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.tasks.pop_due(self.context.now()) {
            self.run_task(task);
            ran += 1;
        }
        ran
    }

    /// Run the work deferred to this animation frame. Returns how many tasks ran.
    pub fn run_animation_frame(&mut self) -> usize {
        let tasks = self.tasks.take_frame();
        let ran = tasks.len();
        for task in tasks {
            self.run_task(task);
        }
        ran
    }

    /// Earliest pending timer deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.tasks.next_deadline()
    }

    /// No timer or frame task is pending
    pub fn is_idle(&self) -> bool {
        self.tasks.is_idle()
    }

    /// Cards the current selection shows
    pub fn visible_cards(&self) -> Vec<&Card> {
        self.catalog.cards_for(&self.filter.selected_tag_id)
    }

    /// Current filter
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Transition phase of the card grid
    pub fn phase(&self) -> RenderPhase {
        if self.pending_exits > 0 {
            RenderPhase::Exiting
        } else {
            RenderPhase::Displaying
        }
    }

    /// Active interaction mode
    pub fn mode(&self) -> InteractionMode {
        self.resolver.current()
    }

    /// Call `callback` after each mode toggle. Only capability events fed
    /// through [`Self::handle_event`] change the mode.
    pub fn on_mode_change(
        &mut self,
        callback: impl FnMut(&InteractionMode) + 'static,
    ) -> SubscriptionId {
        self.resolver.on_change(callback)
    }

    /// Drop a subscription made with [`Self::on_mode_change`]
    pub fn unsubscribe_mode_change(&mut self, id: SubscriptionId) -> bool {
        self.resolver.unsubscribe(id)
    }

    /// Element rendered for a tag id
    pub fn tag_element(&self, tag_id: &str) -> Option<ElementId> {
        self.tag_elements
            .iter()
            .find(|(id, _)| id == tag_id)
            .map(|(_, element)| *element)
    }

    /// Card elements currently in the grid, in display order
    pub fn displayed(&self) -> &[ElementId] {
        &self.displayed
    }

    /// Shared interaction state
    pub fn context(&self) -> &InteractionContext {
        &self.context
    }

    /// Element bindings
    pub fn binder(&self) -> &InteractionBinder<GalleryAction> {
        &self.binder
    }

    /// Loaded catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Rendering surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Rendering surface, mutably
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
