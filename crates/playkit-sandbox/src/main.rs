use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use playkit_engine::coords::{FitMode, Vec2, Viewport};
use playkit_engine::lang::LangCatalog;
use playkit_engine::logging::{LogConfig, init_logging};
use playkit_engine::stage::{Sprite, SpriteCmd, Stage};
use playkit_engine::time::{Clock, FrameScheduler, SchedulerConfig, SystemClock, TaskQueue};

const STRINGS: &str = include_str!("../lang/strings.toml");

const RUN_MS: f64 = 2_000.0;

fn main() -> Result<()> {
    init_logging(LogConfig::default());

    let mut strings =
        LangCatalog::from_toml_str(STRINGS).context("parse bundled language tables")?;
    strings.set_lang("en").context("select language")?;
    let banner = strings.resolve("banner").context("missing banner string")?;
    info!("{banner}");

    let viewport = Viewport::new(Vec2::new(320.0, 180.0), FitMode::Contain);
    let layout = viewport.layout(Vec2::new(1280.0, 720.0));
    info!(
        "viewport: {}x{} container, pixel scale {}",
        layout.container.x, layout.container.y, layout.pixel_scale
    );

    let mut stage = Stage::new();
    stage.insert(
        Sprite::new("assets/star.png", Vec2::splat(24.0))
            .at(Vec2::new(160.0, 90.0))
            .with_spin(3.0),
    );
    stage.insert(
        Sprite::new("assets/ship.png", Vec2::new(48.0, 32.0))
            .at(Vec2::new(20.0, 90.0))
            .with_motion(Vec2::new(2.5, 0.0)),
    );
    let stage = Rc::new(RefCell::new(stage));

    let clock = Rc::new(SystemClock::new());
    let queue = TaskQueue::new(clock.clone());

    let stage_for_tick = stage.clone();
    let mut cmds: Vec<SpriteCmd> = Vec::new();
    let scheduler = FrameScheduler::new(
        clock.clone(),
        Rc::new(queue.clone()),
        SchedulerConfig { fps: 60.0, debug: true },
        move |delta_ms| {
            let mut stage = stage_for_tick.borrow_mut();
            stage.update(delta_ms);
            cmds.clear();
            stage.draw(&mut cmds);
            // A real host would hand `cmds` to its renderer here.
        },
    )
    .context("build frame scheduler")?;

    scheduler.play();

    // Pump the queue against the wall clock for a couple of seconds.
    let deadline_ms = clock.now_ms() + RUN_MS;
    while clock.now_ms() < deadline_ms {
        queue.run_due();
        let Some(due_ms) = queue.next_due_ms() else {
            break;
        };
        let wait_ms = due_ms - clock.now_ms();
        if wait_ms > 0.0 {
            thread::sleep(Duration::from_secs_f64(wait_ms / 1000.0));
        }
    }
    scheduler.stop();

    let mut vars = BTreeMap::new();
    vars.insert("frames".to_string(), scheduler.frame_count().to_string());
    vars.insert(
        "avg".to_string(),
        format!("{:.2}", scheduler.average_frame_time_ms().unwrap_or(0.0)),
    );
    let report = strings
        .resolve_with("report", &vars)
        .context("missing report string")?;
    info!("{report}");

    Ok(())
}
