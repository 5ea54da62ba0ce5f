//! Scrolls a simulated 4000px page down with bursts of wheel events, then
//! presses the indicator and follows the glide back to the top.
//!
//! Usage: `scroll_sim [config.json]`, with `RUST_LOG=debug` for lifecycle
//! logs or `RUST_LOG=trace` for every sample.

use std::rc::Rc;

use anyhow::Context;
use scrollring_core::*;
use web_time::Duration;

const SCREEN: (f32, f32) = (1280.0, 800.0);
const FRAME: Duration = Duration::from_millis(16);
const WHEEL_EVENTS_PER_FRAME: usize = 8;
const WHEEL_STEP_PX: f32 = 6.0;

struct Sim {
    clock: Rc<ManualClock>,
    viewport: Rc<SimulatedViewport>,
    frames: Rc<ManualFrames>,
    now_ms: f64,
    frame_no: u64,
}

impl Sim {
    fn frame(&mut self) {
        self.clock.advance(FRAME);
        self.now_ms += FRAME.as_secs_f64() * 1000.0;
        self.frame_no += 1;
        self.viewport.tick();
        self.frames.run_frame(self.now_ms);
    }
}

fn load_config() -> anyhow::Result<IndicatorConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading indicator config {path}"))?;
            IndicatorConfig::from_json(&json).with_context(|| format!("parsing {path}"))
        }
        None => Ok(IndicatorConfig::default()),
    }
}

fn describe(ind: &ScrollProgressIndicator) -> String {
    let s = ind.state();
    match ind.view(SCREEN) {
        Some(_) => format!(
            "{:5.1}% {:?} ring={}",
            s.progress_ratio,
            s.color(),
            ind.ring_color().to_css()
        ),
        None => format!("{:5.1}% hidden", s.progress_ratio),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let clock = Rc::new(ManualClock::new());
    let mut sim = Sim {
        viewport: Rc::new(
            SimulatedViewport::new(SCREEN.1, 4000.0, clock.clone())
                .with_smooth_duration(Duration::from_millis(config.smooth_scroll_ms)),
        ),
        clock,
        frames: Rc::new(ManualFrames::new()),
        now_ms: 0.0,
        frame_no: 0,
    };

    let indicator = ScrollProgressIndicator::mount(
        sim.viewport.clone(),
        sim.frames.clone(),
        sim.clock.clone(),
        config,
    );

    let mut last = String::new();
    let max = sim.viewport.max_scroll();
    while sim.viewport.scroll_top() < max {
        for _ in 0..WHEEL_EVENTS_PER_FRAME {
            sim.viewport.scroll_by(WHEEL_STEP_PX);
        }
        sim.frame();
        let line = describe(&indicator);
        if line != last {
            log::info!("frame {:4} top={:6.0}  {line}", sim.frame_no, sim.viewport.scroll_top());
            last = line;
        }
    }

    log::info!(
        "bottom reached: {} scroll events, {} recomputations over {} frames",
        sim.viewport.notifications(),
        indicator.recomputations(),
        sim.frame_no
    );

    let target = indicator
        .view(SCREEN)
        .context("indicator should be visible at the bottom of the page")?
        .bounds
        .center();
    indicator.handle_click(target, SCREEN);

    let pressed_at = sim.frame_no;
    while sim.viewport.is_smooth_scrolling() {
        sim.frame();
        log::info!(
            "frame {:4} top={:6.0}  {}",
            sim.frame_no,
            sim.viewport.scroll_top(),
            describe(&indicator)
        );
    }
    sim.frame();

    log::info!(
        "back at top after {} frames; state {:?}",
        sim.frame_no - pressed_at,
        indicator.state()
    );
    indicator.unmount();
    Ok(())
}
