//! # Page
//!
//! Owns every component and routes events between them.
//!
//! ```text
//! frame(dt):
//!   1. drain inbound PageEvents      (resize, pointer, scroll, clicks, form)
//!   2. advance timed effects by dt   (preloader, typing, counters, toasts, ...)
//!   3. re-evaluate visibility        (only if geometry changed)
//!   4. particle step + render
//! ```
//!
//! Components never talk to each other directly. Visibility callbacks post
//! a trigger onto an internal channel, and the page turns triggers into
//! effects after the evaluation pass.

use std::collections::HashSet;

use crossbeam_channel::{unbounded, Receiver, Sender};
use folio_core::config::RevealConfig;
use folio_core::{
    rng_from_seed, FolioConfig, FolioError, FolioResult, FolioRng, PageContext, Pointer, PreferenceStore,
    Theme, ThemeState, Viewport,
};
use folio_particles::{FrameHandler, FrameInfo, ParticleLayer, Surface};
use folio_ui::easter::{footer_message, KONAMI_MESSAGE};
use folio_ui::navigation::parallax_transform;
use folio_ui::{
    ContactForm, CounterRamp, CursorState, EasterEggEvent, EasterEggs, ElementId, FormChange, NavChange,
    NavigationState, NotificationCenter, NotificationEvent, NotificationKind, Preloader, PreloaderEvent,
    RootMargin, SmoothScroll, SwipeDetector, Threshold, Timers, TypingEffect, VisibilityEngine, WatchOptions,
};

use crate::events::{
    change_channel, ChangeReceiver, ChangeSink, ClickTarget, EventBus, EventReceiver, EventSender, PageEvent,
    PresentationChange, Target,
};
use crate::layout::PageLayout;

/// Class marking an element whose reveal animation has run.
pub const REVEAL_CLASS: &str = "aos-animate";
/// Body class for the light theme.
pub const LIGHT_THEME_CLASS: &str = "light-theme";
/// Transform applied to a hovered card.
pub const CARD_HOVER_TRANSFORM: &str = "scale(1.05) translateY(-10px) rotate(1deg)";
/// Body animation while the Konami easter egg runs.
pub const RAINBOW_ANIMATION: &str = "rainbow 2s infinite";

const PRESS_TRANSFORM: &str = "scale(0.95)";
const PRESS_DURATION: f32 = 0.15;
const NAVBAR_INTRO_DELAY: f32 = 0.5;
const HERO_INTRO_DELAY: f32 = 1.0;

/// Posted by visibility callbacks.
#[derive(Debug, Clone, Copy)]
enum Trigger {
    Reveal { element: ElementId, delay: f32 },
    SkillBar { element: ElementId, width: f32 },
    Counter { element: ElementId, target: u64 },
}

#[derive(Debug, Clone, Copy)]
enum Deferred {
    Reveal(ElementId),
    ClearTransform(ElementId),
    NavbarLoaded,
    HeroLoaded,
}

/// The running page.
pub struct Page<S: Surface, P: PreferenceStore> {
    config: FolioConfig,
    layout: PageLayout,
    context: PageContext,
    particles: Option<ParticleLayer<S>>,
    /// Surface waiting for a viewport with two non-zero sides.
    pending_surface: Option<S>,
    /// Load-time width checks (cursor, hover lift) have run.
    device_settled: bool,

    visibility: VisibilityEngine,
    reveal_options: WatchOptions,
    skill_threshold: Threshold,
    counter_threshold: Threshold,
    trigger_tx: Sender<Trigger>,
    trigger_rx: Receiver<Trigger>,
    geometry_dirty: bool,

    counters: Vec<(ElementId, CounterRamp)>,
    typing: TypingEffect,
    preloader: Preloader,
    navigation: NavigationState,
    smooth_scroll: SmoothScroll,
    notifications: NotificationCenter,
    contact: ContactForm,
    easter: EasterEggs,
    cursor: CursorState,
    swipe: SwipeDetector,
    theme: ThemeState<P>,
    timers: Timers<Deferred>,
    rng: FolioRng,

    inbox_tx: EventSender,
    inbox: EventReceiver,
    out: ChangeSink,
    changes: ChangeReceiver,
}

impl<S: Surface, P: PreferenceStore> Page<S, P> {
    /// Builds the page for the default viewport. The host should send a
    /// [`PageEvent::Resize`] with the real size before the first frame;
    /// width-dependent load checks (custom cursor, hover lift) wait for the
    /// first resize or the first frame, whichever comes first.
    ///
    /// # Errors
    ///
    /// See [`Page::with_viewport`].
    pub fn new(config: FolioConfig, layout: PageLayout, surface: Option<S>, store: P) -> FolioResult<Self> {
        Self::with_viewport(config, layout, Viewport::default(), surface, store)
    }

    /// Builds the page.
    ///
    /// A missing surface disables the particle background for good; the rest
    /// of the page works without it. A collapsed viewport only postpones the
    /// background until a resize brings a usable size.
    ///
    /// # Errors
    ///
    /// Returns [`folio_core::FolioError::InvalidThreshold`] if a configured
    /// visibility threshold is outside `(0, 1]`.
    pub fn with_viewport(
        config: FolioConfig,
        layout: PageLayout,
        viewport: Viewport,
        surface: Option<S>,
        store: P,
    ) -> FolioResult<Self> {
        let (reveal_options, skill_threshold, counter_threshold) = watch_settings(&config.reveal)?;

        if surface.is_none() {
            tracing::error!(err = %FolioError::MissingSurface, "particle background disabled");
        }

        let (trigger_tx, trigger_rx) = unbounded();
        let (inbox_tx, inbox) = EventBus::create_pair(EventBus::DEFAULT_CAPACITY);
        let (out, changes) = change_channel();

        let mut page = Self {
            context: PageContext::new(viewport, layout.document_height),
            navigation: NavigationState::new(config.navigation.clone(), layout.sections.clone()),
            smooth_scroll: SmoothScroll::new(config.navigation.smooth_scroll_duration),
            typing: TypingEffect::cycle(&config.typing),
            preloader: Preloader::new(config.preloader.clone()),
            notifications: NotificationCenter::new(config.notifications.clone()),
            contact: ContactForm::new(config.contact.clone()),
            cursor: CursorState::new(viewport.width, config.particles.mobile_breakpoint),
            rng: rng_from_seed(config.particles.seed),
            theme: ThemeState::load(store),
            particles: None,
            pending_surface: surface,
            device_settled: false,
            visibility: VisibilityEngine::new(),
            reveal_options,
            skill_threshold,
            counter_threshold,
            trigger_tx,
            trigger_rx,
            geometry_dirty: true,
            counters: Vec::new(),
            easter: EasterEggs::new(),
            swipe: SwipeDetector::new(),
            timers: Timers::new(),
            inbox_tx,
            inbox,
            out,
            changes,
            config,
            layout,
        };

        page.attach_particles();
        page.watch_layout();
        page.intro();
        tracing::info!(
            width = viewport.width,
            height = viewport.height,
            particles = page.particles.is_some(),
            "page ready"
        );
        Ok(page)
    }

    /// Handle for queueing events from the host.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        self.inbox_tx.clone()
    }

    /// Handle for draining presentation changes.
    #[must_use]
    pub fn changes(&self) -> ChangeReceiver {
        self.changes.clone()
    }

    /// Viewport, pointer and scroll as last reported.
    #[must_use]
    pub fn context(&self) -> &PageContext {
        &self.context
    }

    /// The particle background, if it initialized.
    #[must_use]
    pub fn particles(&self) -> Option<&ParticleLayer<S>> {
        self.particles.as_ref()
    }

    /// Active theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    /// Navbar and scroll state.
    #[must_use]
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Toasts on screen.
    #[must_use]
    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Contact form state.
    #[must_use]
    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    /// True once the preloader has hidden.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.preloader.is_loaded()
    }

    /// True if `element` is observed by the visibility engine.
    #[must_use]
    pub fn is_watched(&self, element: ElementId) -> bool {
        self.visibility.is_watched(element)
    }

    /// True if `element`'s one-shot effect has fired.
    #[must_use]
    pub fn is_triggered(&self, element: ElementId) -> bool {
        self.visibility.is_triggered(element)
    }

    /// Applies one event immediately.
    pub fn handle(&mut self, event: PageEvent) {
        match event {
            PageEvent::Resize { width, height } => {
                self.context.record_resize(width, height);
                if let Some(layer) = &mut self.particles {
                    layer.resize(self.context.viewport());
                } else {
                    self.attach_particles();
                }
                self.settle_device();
                self.geometry_dirty = true;
            }
            PageEvent::PointerMove { x, y } => {
                self.context.record_pointer(x, y);
                if let Some(at) = self.cursor.on_move(Pointer::new(x, y)) {
                    self.out.emit(PresentationChange::SetPosition(Target::Cursor, at.x, at.y));
                }
            }
            PageEvent::Scroll { y } => self.apply_scroll(y),
            PageEvent::KeyDown { code } => {
                if let Some(EasterEggEvent::RainbowStarted) = self.easter.key_down(&code) {
                    self.out
                        .emit(PresentationChange::SetAnimation(Target::Body, RAINBOW_ANIMATION.to_string()));
                    self.notify(NotificationKind::Success, KONAMI_MESSAGE);
                }
            }
            PageEvent::Click(target) => self.click(target),
            PageEvent::HoverEnter(element) => {
                if self.cursor.on_enter() {
                    self.out.emit(PresentationChange::AddClass(Target::Cursor, "cursor-hover"));
                }
                if self.hover_effects_enabled() && self.layout.is_hover_card(element) {
                    self.out.emit(PresentationChange::SetTransform(
                        Target::Element(element),
                        CARD_HOVER_TRANSFORM.to_string(),
                    ));
                }
            }
            PageEvent::HoverLeave(element) => {
                if self.cursor.on_leave() {
                    self.out.emit(PresentationChange::RemoveClass(Target::Cursor, "cursor-hover"));
                }
                if self.hover_effects_enabled() && self.layout.is_hover_card(element) {
                    self.out
                        .emit(PresentationChange::SetTransform(Target::Element(element), String::new()));
                }
            }
            PageEvent::TouchStart { x, y } => self.swipe.touch_start(Pointer::new(x, y)),
            PageEvent::TouchEnd { x, y } => {
                if self.swipe.touch_end(Pointer::new(x, y)) {
                    let viewport_height = self.context.viewport().height as f32;
                    if let Some(top) = self.navigation.next_section_top(self.context.scroll_y(), viewport_height) {
                        tracing::debug!(top, "swipe to next section");
                        self.smooth_scroll.scroll_to(self.context.scroll_y(), top);
                    }
                }
            }
            PageEvent::FieldFocus(field) => {
                let changes = self.contact.focus(field);
                self.apply_form(changes);
            }
            PageEvent::FieldBlur(field) => {
                let changes = self.contact.blur(field);
                self.apply_form(changes);
            }
            PageEvent::FieldInput(field, value) => {
                let changes = self.contact.input(field, value);
                self.apply_form(changes);
            }
            PageEvent::Submit => {
                let changes = self.contact.submit();
                self.apply_form(changes);
            }
            PageEvent::LayoutChanged(layout) => {
                self.layout = *layout;
                self.context.record_document_height(self.layout.document_height);
                self.navigation.set_sections(self.layout.sections.clone());
                self.watch_layout();
                self.geometry_dirty = true;
            }
        }
    }

    /// Advances every timed effect by `dt` seconds and re-evaluates
    /// visibility if geometry changed.
    pub fn update(&mut self, dt: f32) {
        for event in self.preloader.update(dt, &mut self.rng) {
            match event {
                PreloaderEvent::Progress(percent) => {
                    self.out
                        .emit(PresentationChange::SetWidthPercent(Target::PreloaderProgress, percent));
                }
                PreloaderEvent::Loaded => {
                    self.out.emit(PresentationChange::AddClass(Target::Preloader, "hidden"));
                    tracing::info!("Portfolio loaded successfully!");
                }
            }
        }

        if let Some(text) = self.typing.update(dt) {
            self.out.emit(PresentationChange::SetText(Target::RoleText, text.to_string()));
        }

        for deferred in self.timers.update(dt) {
            self.run_deferred(deferred);
        }

        for (element, ramp) in &mut self.counters {
            if let Some(shown) = ramp.update(dt) {
                self.out
                    .emit(PresentationChange::SetText(Target::Element(*element), shown.to_string()));
            }
        }
        self.counters.retain(|(_, ramp)| !ramp.is_complete());

        for event in self.notifications.update(dt) {
            self.out.emit(match event {
                NotificationEvent::Dismissed(id) => PresentationChange::DismissNotification(id),
                NotificationEvent::Removed(id) => PresentationChange::RemoveNotification(id),
            });
        }

        let changes = self.contact.update(dt);
        self.apply_form(changes);

        if let Some(EasterEggEvent::RainbowEnded) = self.easter.update(dt) {
            self.out.emit(PresentationChange::SetAnimation(Target::Body, String::new()));
        }

        if let Some(y) = self.smooth_scroll.update(dt) {
            self.out.emit(PresentationChange::ScrollTo(y));
            self.apply_scroll(y);
        }

        if self.geometry_dirty {
            self.geometry_dirty = false;
            self.visibility.evaluate(self.context.viewport_rect());
            self.run_triggers();
        }
    }

    fn click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::NavLink(name) => {
                if self.navigation.close_menu() {
                    self.emit_menu(false);
                }
                self.scroll_to_anchor(&name);
            }
            ClickTarget::Anchor(name) => self.scroll_to_anchor(&name),
            ClickTarget::Hamburger => {
                let open = self.navigation.toggle_menu();
                self.emit_menu(open);
            }
            ClickTarget::ThemeToggle => {
                let theme = self.theme.toggle().unwrap_or_else(|err| {
                    tracing::warn!(%err, "theme preference not saved");
                    self.theme.current()
                });
                self.emit_theme(theme);
            }
            ClickTarget::BackToTop => self.smooth_scroll.scroll_to(self.context.scroll_y(), 0.0),
            ClickTarget::FooterEasterEgg => {
                let message = footer_message(&mut self.rng);
                self.notify(NotificationKind::Info, message);
            }
            ClickTarget::NotificationClose(id) => {
                if let Some(NotificationEvent::Dismissed(id)) = self.notifications.close(id) {
                    self.out.emit(PresentationChange::DismissNotification(id));
                }
            }
            ClickTarget::ExternalLink(url) => tracing::info!(%url, "external link clicked"),
            ClickTarget::GalleryItem(element) => {
                self.out
                    .emit(PresentationChange::SetTransform(Target::Element(element), PRESS_TRANSFORM.to_string()));
                self.timers.schedule(PRESS_DURATION, Deferred::ClearTransform(element));
            }
        }
    }

    fn apply_scroll(&mut self, y: f32) {
        self.context.record_scroll(y);
        let y = self.context.scroll_y();
        let viewport_height = self.context.viewport().height as f32;

        for change in self.navigation.on_scroll(y, viewport_height, self.context.document_height()) {
            match change {
                NavChange::Scrolled(on) => self.emit_class(Target::Navbar, "scrolled", on),
                NavChange::NavbarHidden(hidden) => {
                    let transform = if hidden { "translateY(-100%)" } else { "translateY(0)" };
                    self.out
                        .emit(PresentationChange::SetTransform(Target::Navbar, transform.to_string()));
                }
                NavChange::Progress(percent) => {
                    self.out
                        .emit(PresentationChange::SetWidthPercent(Target::ScrollProgress, percent));
                }
                NavChange::BackToTop(on) => self.emit_class(Target::BackToTop, "visible", on),
                NavChange::ActiveSection(name) => {
                    for section in self.navigation.sections() {
                        self.out
                            .emit(PresentationChange::RemoveClass(Target::NavLink(section.name.clone()), "active"));
                    }
                    self.out.emit(PresentationChange::AddClass(Target::NavLink(name), "active"));
                }
            }
        }

        for index in 0..self.layout.shapes {
            self.out
                .emit(PresentationChange::SetTransform(Target::Shape(index), parallax_transform(index, y)));
        }

        self.geometry_dirty = true;
    }

    fn scroll_to_anchor(&mut self, name: &str) {
        match self.navigation.anchor_target(name) {
            Ok(top) => self.smooth_scroll.scroll_to(self.context.scroll_y(), top),
            Err(err) => tracing::debug!(%err, "anchor has no target"),
        }
    }

    /// Registers new layout elements, moves existing ones and drops the
    /// ones the layout no longer has.
    fn watch_layout(&mut self) {
        let current: HashSet<ElementId> = self
            .layout
            .reveals
            .iter()
            .map(|r| r.id)
            .chain(self.layout.skill_bars.iter().map(|b| b.id))
            .chain(self.layout.counters.iter().map(|c| c.id))
            .collect();
        let stale: Vec<ElementId> = self
            .visibility
            .elements()
            .filter(|id| !current.contains(id))
            .collect();
        for element in stale {
            tracing::debug!(%element, "element left the layout");
            self.visibility.unregister(element);
        }
        self.counters.retain(|(element, _)| current.contains(element));

        for reveal in &self.layout.reveals {
            if self.visibility.is_watched(reveal.id) {
                self.visibility.set_bounds(reveal.id, reveal.bounds);
                continue;
            }
            let tx = self.trigger_tx.clone();
            let delay = reveal.delay;
            self.visibility
                .register_with(reveal.id, reveal.bounds, self.reveal_options, move |element| {
                    post(&tx, Trigger::Reveal { element, delay });
                });
        }

        for bar in &self.layout.skill_bars {
            if self.visibility.is_watched(bar.id) {
                self.visibility.set_bounds(bar.id, bar.bounds);
                continue;
            }
            let tx = self.trigger_tx.clone();
            let width = bar.width;
            self.visibility
                .register(bar.id, bar.bounds, self.skill_threshold, move |element| {
                    post(&tx, Trigger::SkillBar { element, width });
                });
        }

        for counter in &self.layout.counters {
            if self.visibility.is_watched(counter.id) {
                self.visibility.set_bounds(counter.id, counter.bounds);
                continue;
            }
            let tx = self.trigger_tx.clone();
            let target = counter.target;
            self.visibility
                .register(counter.id, counter.bounds, self.counter_threshold, move |element| {
                    post(&tx, Trigger::Counter { element, target });
                });
        }
    }

    fn run_triggers(&mut self) {
        while let Ok(trigger) = self.trigger_rx.try_recv() {
            match trigger {
                Trigger::Reveal { element, delay } => {
                    if delay > 0.0 {
                        self.timers.schedule(delay, Deferred::Reveal(element));
                    } else {
                        self.run_deferred(Deferred::Reveal(element));
                    }
                }
                Trigger::SkillBar { element, width } => {
                    self.out
                        .emit(PresentationChange::SetWidthPercent(Target::Element(element), width));
                }
                Trigger::Counter { element, target } => {
                    tracing::debug!(%element, target, "counter started");
                    self.counters.push((element, CounterRamp::new(target, &self.config.counter)));
                }
            }
        }
    }

    fn run_deferred(&mut self, deferred: Deferred) {
        let change = match deferred {
            Deferred::Reveal(element) => PresentationChange::AddClass(Target::Element(element), REVEAL_CLASS),
            Deferred::ClearTransform(element) => {
                PresentationChange::SetTransform(Target::Element(element), String::new())
            }
            Deferred::NavbarLoaded => PresentationChange::AddClass(Target::Navbar, "loaded"),
            Deferred::HeroLoaded => PresentationChange::AddClass(Target::Hero, "loaded"),
        };
        self.out.emit(change);
    }

    fn apply_form(&mut self, changes: Vec<FormChange>) {
        for change in changes {
            match change {
                FormChange::Focused(field, on) => self.emit_class(Target::FieldGroup(field), "focused", on),
                FormChange::Invalid(field, on) => self.emit_class(Target::Field(field), "error", on),
                FormChange::Notify(kind, message) => self.notify(kind, message),
                FormChange::OpenUrl(url) => self.out.emit(PresentationChange::OpenUrl(url)),
                FormChange::Button { disabled, label } => {
                    self.out.emit(PresentationChange::SetDisabled(Target::SubmitButton, disabled));
                    self.out.emit(PresentationChange::SetText(Target::SubmitButton, label));
                }
                FormChange::Reset => self.out.emit(PresentationChange::ResetForm),
            }
        }
    }

    /// Page-load effects that do not wait for the preloader.
    fn intro(&mut self) {
        if self.theme.current() == Theme::Light {
            self.emit_theme(Theme::Light);
        }
        self.timers.schedule(NAVBAR_INTRO_DELAY, Deferred::NavbarLoaded);
        self.timers.schedule(HERO_INTRO_DELAY, Deferred::HeroLoaded);
    }

    /// Load-time width checks. Run once, against the first usable viewport.
    fn settle_device(&mut self) {
        let viewport = self.context.viewport();
        if self.device_settled || viewport.bounds().is_none() {
            return;
        }
        self.device_settled = true;

        self.cursor = CursorState::new(viewport.width, self.config.particles.mobile_breakpoint);
        if !self.cursor.is_enabled() {
            self.out.emit(PresentationChange::SetVisible(Target::Cursor, false));
        }
        if !self.hover_effects_enabled() {
            for &card in &self.layout.hover_cards {
                self.out
                    .emit(PresentationChange::SetTransform(Target::Element(card), "none".to_string()));
            }
        }
        tracing::debug!(width = viewport.width, cursor = self.cursor.is_enabled(), "device settled");
    }

    /// Binds the pending surface once the viewport has a usable size.
    fn attach_particles(&mut self) {
        let viewport = self.context.viewport();
        if self.particles.is_some() || self.pending_surface.is_none() {
            return;
        }
        if viewport.bounds().is_none() {
            tracing::debug!(?viewport, "particle background waits for a usable viewport");
            return;
        }
        match ParticleLayer::new(self.config.particles.clone(), viewport, self.pending_surface.take()) {
            Ok(layer) => self.particles = Some(layer),
            Err(err) => tracing::error!(%err, "particle background disabled"),
        }
    }

    fn hover_effects_enabled(&self) -> bool {
        !self.context.viewport().is_narrow(self.config.particles.mobile_breakpoint)
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let message = message.into();
        let id = self.notifications.show(message.clone(), kind);
        self.out.emit(PresentationChange::ShowNotification {
            id,
            kind,
            icon: kind.icon(),
            message,
        });
    }

    fn emit_menu(&self, open: bool) {
        self.emit_class(Target::Hamburger, "active", open);
        self.emit_class(Target::NavMenu, "active", open);
        self.out.emit(PresentationChange::LockScroll(open));
    }

    fn emit_theme(&self, theme: Theme) {
        self.emit_class(Target::Body, LIGHT_THEME_CLASS, theme == Theme::Light);
    }

    fn emit_class(&self, target: Target, class: &'static str, on: bool) {
        self.out.emit(if on {
            PresentationChange::AddClass(target, class)
        } else {
            PresentationChange::RemoveClass(target, class)
        });
    }
}

impl<S: Surface, P: PreferenceStore> FrameHandler for Page<S, P> {
    fn frame(&mut self, info: &FrameInfo) {
        for event in self.inbox.drain() {
            self.handle(event);
        }
        self.settle_device();
        self.update(info.dt);
        if let Some(layer) = &mut self.particles {
            layer.tick(self.context.pointer());
        }
    }
}

/// Hands a trigger to the page. Returns `false` if the page is gone.
fn post(tx: &Sender<Trigger>, trigger: Trigger) -> bool {
    match tx.send(trigger) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(trigger = ?err.into_inner(), "visibility trigger dropped");
            false
        }
    }
}

fn watch_settings(reveal: &RevealConfig) -> FolioResult<(WatchOptions, Threshold, Threshold)> {
    let options =
        WatchOptions::once(Threshold::new(reveal.threshold)?).with_margin(RootMargin::bottom(reveal.bottom_margin));
    Ok((
        options,
        Threshold::new(reveal.skill_threshold)?,
        Threshold::new(reveal.counter_threshold)?,
    ))
}
