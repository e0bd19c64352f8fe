//! # Folio Headless Session
//!
//! Runs the portfolio page against a recording surface with a scripted
//! visitor: wait for the preloader, scroll through every section, open the
//! menu, toggle the theme, type the Konami code and submit the contact form.
//!
//! ## Usage
//!
//! ```bash
//! folio_headless --config folio.toml --layout page.toml --frames 900 --seed 7
//! ```

use std::collections::HashMap;
use std::process::ExitCode;

use folio::{ClickTarget, Page, PageEvent, PageLayout, PresentationChange};
use folio_core::{FolioConfig, FolioResult, MemoryStore};
use folio_particles::{CommandBuffer, FrameHandler, FrameInfo, FrameLoop, ManualClock};
use folio_ui::Field;
use tracing_subscriber::EnvFilter;

const DEFAULT_FRAMES: u64 = 900;

struct Options {
    config: Option<String>,
    layout: Option<String>,
    frames: u64,
    seed: Option<u64>,
}

fn parse_args() -> Option<Options> {
    let args: Vec<String> = std::env::args().collect();
    let mut options = Options {
        config: None,
        layout: None,
        frames: DEFAULT_FRAMES,
        seed: None,
    };

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1).cloned();
        match args[i].as_str() {
            "--config" | "-c" => {
                options.config = value;
                i += 1;
            }
            "--layout" | "-l" => {
                options.layout = value;
                i += 1;
            }
            "--frames" | "-f" => {
                options.frames = value.and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_FRAMES);
                i += 1;
            }
            "--seed" | "-s" => {
                options.seed = value.and_then(|v| v.parse().ok());
                i += 1;
            }
            "--help" | "-h" => {
                println!("Usage: folio_headless [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>   TOML configuration (default: built-in)");
                println!("  -l, --layout <PATH>   TOML page layout (default: built-in portfolio)");
                println!("  -f, --frames <N>      Frames to run at 60 Hz (default: {DEFAULT_FRAMES})");
                println!("  -s, --seed <SEED>     Seed for particles and preloader");
                println!("  -h, --help            Show this help");
                return None;
            }
            other => tracing::warn!(arg = other, "ignoring unknown argument"),
        }
        i += 1;
    }
    Some(options)
}

/// Events the scripted visitor sends, keyed by frame.
fn script(layout: &PageLayout) -> HashMap<u64, Vec<PageEvent>> {
    let mut script: HashMap<u64, Vec<PageEvent>> = HashMap::new();
    let mut at = |frame: u64, event: PageEvent| script.entry(frame).or_default().push(event);

    at(0, PageEvent::Resize { width: 1280, height: 800 });
    at(10, PageEvent::PointerMove { x: 640.0, y: 400.0 });

    // One section per second once the preloader is gone.
    for (i, section) in layout.sections.iter().enumerate() {
        at(180 + i as u64 * 60, PageEvent::Scroll { y: section.top });
    }

    at(560, PageEvent::Click(ClickTarget::Hamburger));
    at(570, PageEvent::Click(ClickTarget::NavLink("#about".to_string())));
    at(600, PageEvent::Click(ClickTarget::ThemeToggle));

    for (i, code) in [
        "ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown", "ArrowLeft", "ArrowRight", "ArrowLeft", "ArrowRight",
        "KeyB", "KeyA",
    ]
    .into_iter()
    .enumerate()
    {
        at(620 + i as u64, PageEvent::KeyDown { code: code.to_string() });
    }

    at(700, PageEvent::FieldInput(Field::Name, "Ada Lovelace".to_string()));
    at(701, PageEvent::FieldInput(Field::Email, "ada@example.com".to_string()));
    at(702, PageEvent::FieldInput(Field::Subject, "Engines".to_string()));
    at(703, PageEvent::FieldInput(Field::Message, "Shall we compute?".to_string()));
    at(704, PageEvent::Submit);
    at(720, PageEvent::Click(ClickTarget::BackToTop));

    script
}

fn run(options: Options) -> FolioResult<()> {
    let mut config = match &options.config {
        Some(path) => FolioConfig::load(path)?,
        None => FolioConfig::default(),
    };
    if options.seed.is_some() {
        config.particles.seed = options.seed;
    }
    let layout = match &options.layout {
        Some(path) => PageLayout::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => PageLayout::portfolio(),
    };

    let mut script = script(&layout);
    let frame_config = config.frame.clone();
    let mut page: Page<CommandBuffer, MemoryStore> =
        Page::new(config, layout, Some(CommandBuffer::new()), MemoryStore::new())?;
    let sender = page.sender();
    let changes = page.changes();

    let mut frame_loop = FrameLoop::new(&frame_config, folio_particles::CancelToken::new());
    let token = frame_loop.token();
    let mut clock = ManualClock::new(1.0 / 60.0);

    let mut stats: HashMap<&'static str, u64> = HashMap::new();
    let frames = options.frames;

    let report = frame_loop.run(&mut clock, &mut |info: &FrameInfo| {
        for event in script.remove(&info.frame).unwrap_or_default() {
            sender.send(event);
        }
        page.frame(info);
        for change in changes.drain() {
            *stats.entry(change_kind(&change)).or_default() += 1;
        }
        if info.frame + 1 >= frames {
            token.cancel();
        }
    });

    tracing::info!(
        frames = report.frames,
        avg_ms = report.avg_frame_ms,
        worst_ms = report.worst_frame_ms,
        over_budget = report.frames_over_budget,
        "session finished"
    );

    let mut kinds: Vec<_> = stats.into_iter().collect();
    kinds.sort_unstable();
    println!("┌─ PRESENTATION CHANGES ──────────────────────┐");
    for (kind, count) in kinds {
        println!("│ {kind:<24} {count:>8}");
    }
    println!("└─────────────────────────────────────────────┘");
    Ok(())
}

fn change_kind(change: &PresentationChange) -> &'static str {
    match change {
        PresentationChange::AddClass(..) => "add_class",
        PresentationChange::RemoveClass(..) => "remove_class",
        PresentationChange::SetWidthPercent(..) => "set_width",
        PresentationChange::SetText(..) => "set_text",
        PresentationChange::SetTransform(..) => "set_transform",
        PresentationChange::SetAnimation(..) => "set_animation",
        PresentationChange::SetPosition(..) => "set_position",
        PresentationChange::SetVisible(..) => "set_visible",
        PresentationChange::SetDisabled(..) => "set_disabled",
        PresentationChange::ResetForm => "reset_form",
        PresentationChange::ScrollTo(_) => "scroll_to",
        PresentationChange::ShowNotification { .. } => "show_notification",
        PresentationChange::DismissNotification(_) => "dismiss_notification",
        PresentationChange::RemoveNotification(_) => "remove_notification",
        PresentationChange::OpenUrl(_) => "open_url",
        PresentationChange::LockScroll(_) => "lock_scroll",
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let Some(options) = parse_args() else {
        return ExitCode::SUCCESS;
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "headless session failed");
            ExitCode::FAILURE
        }
    }
}
