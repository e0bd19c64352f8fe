//! End-to-end page sessions against a recording surface.

use folio::{ClickTarget, Page, PageEvent, PageLayout, PresentationChange, Target};
use folio_core::{FileStore, FolioConfig, MemoryStore, Theme};
use folio_particles::{CancelToken, CommandBuffer, FrameHandler, FrameInfo, FrameLoop, ManualClock};
use folio_ui::contact::{SENDING_LABEL, SUBMIT_LABEL};
use folio_ui::{ElementId, Field, NotificationKind};

const DT: f32 = 1.0 / 60.0;

fn config() -> FolioConfig {
    let mut config = FolioConfig::default();
    config.particles.seed = Some(7);
    config
}

fn page() -> Page<CommandBuffer, MemoryStore> {
    Page::new(config(), PageLayout::portfolio(), Some(CommandBuffer::new()), MemoryStore::new()).unwrap()
}

/// Runs `seconds` of frames and returns everything emitted meanwhile.
fn run_for<S, P>(page: &mut Page<S, P>, seconds: f32) -> Vec<PresentationChange>
where
    S: folio_particles::Surface,
    P: folio_core::PreferenceStore,
{
    let changes = page.changes();
    let mut seen = Vec::new();
    let frames = (seconds / DT).ceil() as u64;
    for frame in 0..frames {
        page.frame(&FrameInfo { frame, dt: DT });
        seen.extend(changes.drain());
    }
    seen
}

fn count(changes: &[PresentationChange], wanted: &PresentationChange) -> usize {
    changes.iter().filter(|c| *c == wanted).count()
}

#[test]
fn test_page_runs_without_surface() {
    let mut page: Page<CommandBuffer, MemoryStore> =
        Page::new(config(), PageLayout::portfolio(), None, MemoryStore::new()).unwrap();
    assert!(page.particles().is_none());

    page.handle(PageEvent::Scroll { y: 2600.0 });
    let changes = run_for(&mut page, 0.1);

    assert_eq!(
        count(
            &changes,
            &PresentationChange::AddClass(Target::Element(ElementId(200)), folio::page::REVEAL_CLASS)
        ),
        1
    );
    assert_eq!(page.navigation().active_section(), Some("projects"));
}

#[test]
fn test_reveal_fires_once_across_reentry() {
    let mut page = page();
    let reveal = PresentationChange::AddClass(Target::Element(ElementId(200)), folio::page::REVEAL_CLASS);
    let mut all = run_for(&mut page, 0.1);

    for y in [2600.0, 0.0, 2600.0, 0.0, 2600.0] {
        page.handle(PageEvent::Scroll { y });
        all.extend(run_for(&mut page, 0.1));
    }

    assert_eq!(count(&all, &reveal), 1);
    assert!(page.is_triggered(ElementId(200)));
}

#[test]
fn test_staggered_reveal_waits_for_delay() {
    let mut page = page();
    let late = PresentationChange::AddClass(Target::Element(ElementId(202)), folio::page::REVEAL_CLASS);

    page.handle(PageEvent::Scroll { y: 2600.0 });
    let early = run_for(&mut page, 0.2);
    assert_eq!(count(&early, &late), 0);

    let later = run_for(&mut page, 0.4);
    assert_eq!(count(&later, &late), 1);
}

#[test]
fn test_skill_bars_fill_when_half_visible() {
    let mut page = page();
    page.handle(PageEvent::Scroll { y: 1700.0 });
    let changes = run_for(&mut page, 0.05);
    assert!(changes.contains(&PresentationChange::SetWidthPercent(Target::Element(ElementId(400)), 90.0)));
    assert!(changes.contains(&PresentationChange::SetWidthPercent(Target::Element(ElementId(405)), 60.0)));
}

#[test]
fn test_counter_ramps_to_target() {
    let mut page = page();
    page.handle(PageEvent::Scroll { y: 1000.0 });
    let changes = run_for(&mut page, 3.0);

    let shown: Vec<u64> = changes
        .iter()
        .filter_map(|c| match c {
            PresentationChange::SetText(Target::Element(ElementId(502)), text) => text.parse().ok(),
            _ => None,
        })
        .collect();

    assert!(shown.len() > 10);
    assert!(shown.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(shown.last(), Some(&1000));

    // Scrolling away and back does not restart it.
    page.handle(PageEvent::Scroll { y: 0.0 });
    run_for(&mut page, 0.1);
    page.handle(PageEvent::Scroll { y: 1000.0 });
    let again = run_for(&mut page, 0.5);
    assert!(!again
        .iter()
        .any(|c| matches!(c, PresentationChange::SetText(Target::Element(ElementId(502)), _))));
}

#[test]
fn test_theme_preference_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.toml");

    let mut first: Page<CommandBuffer, FileStore> =
        Page::new(config(), PageLayout::portfolio(), Some(CommandBuffer::new()), FileStore::new(&path)).unwrap();
    assert_eq!(first.theme(), Theme::Dark);
    first.changes().drain();
    first.handle(PageEvent::Click(ClickTarget::ThemeToggle));
    assert_eq!(first.theme(), Theme::Light);
    assert!(first
        .changes()
        .drain()
        .contains(&PresentationChange::AddClass(Target::Body, folio::page::LIGHT_THEME_CLASS)));
    drop(first);

    let second: Page<CommandBuffer, FileStore> =
        Page::new(config(), PageLayout::portfolio(), Some(CommandBuffer::new()), FileStore::new(&path)).unwrap();
    assert_eq!(second.theme(), Theme::Light);
    assert!(second
        .changes()
        .drain()
        .contains(&PresentationChange::AddClass(Target::Body, folio::page::LIGHT_THEME_CLASS)));
}

#[test]
fn test_contact_submit_flow() {
    let mut page = page();
    let tx = page.sender();
    let changes = page.changes();

    tx.send(PageEvent::Submit);
    page.frame(&FrameInfo { frame: 0, dt: DT });
    let rejected = changes.drain();
    assert!(rejected.contains(&PresentationChange::AddClass(Target::Field(Field::Email), "error")));
    assert!(rejected.iter().any(|c| matches!(
        c,
        PresentationChange::ShowNotification {
            kind: NotificationKind::Error,
            ..
        }
    )));

    tx.send(PageEvent::FieldFocus(Field::Name));
    tx.send(PageEvent::FieldInput(Field::Name, "Ada".to_string()));
    tx.send(PageEvent::FieldInput(Field::Email, "ada@example.com".to_string()));
    tx.send(PageEvent::FieldInput(Field::Subject, "Hello there".to_string()));
    tx.send(PageEvent::FieldInput(Field::Message, "Hi!".to_string()));
    tx.send(PageEvent::Submit);
    page.frame(&FrameInfo { frame: 1, dt: DT });
    let sent = changes.drain();

    assert!(sent.contains(&PresentationChange::AddClass(Target::FieldGroup(Field::Name), "focused")));
    assert!(sent.contains(&PresentationChange::RemoveClass(Target::Field(Field::Email), "error")));
    assert!(sent.contains(&PresentationChange::SetDisabled(Target::SubmitButton, true)));
    assert!(sent.contains(&PresentationChange::SetText(Target::SubmitButton, SENDING_LABEL.to_string())));
    assert!(sent.iter().any(|c| matches!(
        c,
        PresentationChange::OpenUrl(url) if url.starts_with("mailto:") && url.contains("subject=Hello%20there")
    )));
    assert!(page.contact().is_sending());

    let after = run_for(&mut page, 2.2);
    assert!(after.contains(&PresentationChange::ResetForm));
    assert!(after.contains(&PresentationChange::SetDisabled(Target::SubmitButton, false)));
    assert!(after.contains(&PresentationChange::SetText(Target::SubmitButton, SUBMIT_LABEL.to_string())));
    assert!(!page.contact().is_sending());
    assert_eq!(page.contact().value(Field::Name), "");
}

#[test]
fn test_menu_and_anchor_navigation() {
    let mut page = page();
    page.changes().drain();

    page.handle(PageEvent::Click(ClickTarget::Hamburger));
    let opened = page.changes().drain();
    assert!(opened.contains(&PresentationChange::AddClass(Target::NavMenu, "active")));
    assert!(opened.contains(&PresentationChange::LockScroll(true)));

    page.handle(PageEvent::Click(ClickTarget::NavLink("#skills".to_string())));
    assert!(!page.navigation().is_menu_open());
    let changes = run_for(&mut page, 1.0);
    assert!(changes.contains(&PresentationChange::LockScroll(false)));
    assert!(changes.iter().any(|c| matches!(c, PresentationChange::ScrollTo(_))));
    assert!((page.context().scroll_y() - 1630.0).abs() < 1.0);
    assert_eq!(page.navigation().active_section(), Some("skills"));

    page.handle(PageEvent::Click(ClickTarget::BackToTop));
    run_for(&mut page, 1.0);
    assert!(page.context().scroll_y() < 1.0);
}

#[test]
fn test_konami_code_runs_rainbow() {
    let mut page = page();
    let codes = [
        "ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown", "ArrowLeft", "ArrowRight", "ArrowLeft", "ArrowRight",
        "KeyB", "KeyA",
    ];
    for code in codes {
        page.handle(PageEvent::KeyDown { code: code.to_string() });
    }
    let started = page.changes().drain();
    assert!(started.contains(&PresentationChange::SetAnimation(
        Target::Body,
        folio::page::RAINBOW_ANIMATION.to_string()
    )));
    assert!(started.iter().any(|c| matches!(
        c,
        PresentationChange::ShowNotification {
            kind: NotificationKind::Success,
            ..
        }
    )));

    let later = run_for(&mut page, 4.2);
    assert!(later.contains(&PresentationChange::SetAnimation(Target::Body, String::new())));
}

#[test]
fn test_full_queue_drops_events() {
    let mut page = page();
    let tx = page.sender();
    let accepted = (0..folio::EventBus::DEFAULT_CAPACITY + 10)
        .filter(|i| tx.send(PageEvent::Scroll { y: *i as f32 }))
        .count();
    assert_eq!(accepted, folio::EventBus::DEFAULT_CAPACITY);

    page.frame(&FrameInfo { frame: 0, dt: DT });
    assert!((page.context().scroll_y() - (folio::EventBus::DEFAULT_CAPACITY - 1) as f32).abs() < f32::EPSILON);
    assert!(tx.send(PageEvent::Scroll { y: 0.0 }));
}

#[test]
fn test_frame_loop_drives_page_until_loaded() {
    let mut page = page();
    let mut frame_loop = FrameLoop::new(&config().frame, CancelToken::new());
    let token = frame_loop.token();
    let mut clock = ManualClock::new(DT);

    let report = frame_loop.run(&mut clock, &mut |info: &FrameInfo| {
        page.frame(info);
        if info.frame + 1 >= 600 {
            token.cancel();
        }
    });

    assert_eq!(report.frames, 600);
    assert!(page.is_loaded());
    assert_eq!(page.particles().unwrap().surface().frames(), 600);
}

#[test]
fn test_narrow_viewport_disables_hover_lift() {
    let mut page: Page<CommandBuffer, MemoryStore> = Page::with_viewport(
        config(),
        PageLayout::portfolio(),
        folio_core::Viewport::new(400, 800),
        Some(CommandBuffer::new()),
        MemoryStore::new(),
    )
    .unwrap();
    page.frame(&FrameInfo { frame: 0, dt: DT });
    let intro = page.changes().drain();
    assert!(intro.contains(&PresentationChange::SetVisible(Target::Cursor, false)));
    assert!(intro.contains(&PresentationChange::SetTransform(
        Target::Element(ElementId(200)),
        "none".to_string()
    )));

    page.handle(PageEvent::HoverEnter(ElementId(200)));
    assert!(page.changes().is_empty());
}

#[test]
fn test_narrow_device_reported_after_start() {
    let mut page = page();
    let tx = page.sender();
    let changes = page.changes();
    assert!(!changes
        .drain()
        .iter()
        .any(|c| matches!(c, PresentationChange::SetVisible(Target::Cursor, _))));

    tx.send(PageEvent::Resize { width: 375, height: 812 });
    tx.send(PageEvent::PointerMove { x: 10.0, y: 10.0 });
    page.frame(&FrameInfo { frame: 0, dt: DT });
    let first = changes.drain();

    assert!(first.contains(&PresentationChange::SetVisible(Target::Cursor, false)));
    assert!(!first
        .iter()
        .any(|c| matches!(c, PresentationChange::SetPosition(Target::Cursor, ..))));
    assert!(first.contains(&PresentationChange::SetTransform(
        Target::Element(ElementId(200)),
        "none".to_string()
    )));

    // A later widening does not re-enable the cursor.
    tx.send(PageEvent::Resize { width: 1280, height: 800 });
    tx.send(PageEvent::PointerMove { x: 20.0, y: 20.0 });
    page.frame(&FrameInfo { frame: 1, dt: DT });
    assert!(!changes
        .drain()
        .iter()
        .any(|c| matches!(c, PresentationChange::SetPosition(Target::Cursor, ..))));
}

#[test]
fn test_particles_start_once_viewport_is_usable() {
    let mut page: Page<CommandBuffer, MemoryStore> = Page::with_viewport(
        config(),
        PageLayout::portfolio(),
        folio_core::Viewport::new(0, 0),
        Some(CommandBuffer::new()),
        MemoryStore::new(),
    )
    .unwrap();
    run_for(&mut page, 0.1);
    assert!(page.particles().is_none());

    page.handle(PageEvent::Resize { width: 1280, height: 800 });
    page.frame(&FrameInfo { frame: 0, dt: DT });

    let layer = page.particles().unwrap();
    assert_eq!(layer.surface().circle_count(), 50);
    assert_eq!(layer.surface().frames(), 1);
}

#[test]
fn test_layout_change_drops_removed_elements() {
    let mut page = page();
    let tx = page.sender();
    assert!(page.is_watched(ElementId(200)));

    let mut layout = PageLayout::portfolio();
    layout.reveals.retain(|r| r.id != ElementId(200));
    layout.hover_cards.retain(|id| *id != ElementId(200));
    tx.send(PageEvent::LayoutChanged(Box::new(layout)));
    run_for(&mut page, 0.05);

    assert!(!page.is_watched(ElementId(200)));
    assert!(page.is_watched(ElementId(201)));

    page.handle(PageEvent::Scroll { y: 2600.0 });
    let changes = run_for(&mut page, 1.0);
    assert_eq!(
        count(
            &changes,
            &PresentationChange::AddClass(Target::Element(ElementId(200)), folio::page::REVEAL_CLASS)
        ),
        0
    );
    assert_eq!(
        count(
            &changes,
            &PresentationChange::AddClass(Target::Element(ElementId(201)), folio::page::REVEAL_CLASS)
        ),
        1
    );
    assert!(!page.is_triggered(ElementId(200)));
}
