//! Headless scene demo.
//!
//! Builds a small scene, runs it on the timer refresh source for a fixed
//! number of frames while replaying scripted pointer input, then reports what
//! the last presented frame contained.

use std::cell::Cell;

use anyhow::{Context, Result};
use daub_engine::logging::{init_logging, LoggingConfig};
use daub_engine::prelude::*;

const FRAMES: u64 = 120;

/// Timer refresh with pointer input injected at fixed frame numbers.
struct ScriptedInput {
    timer: TimerRefresh,
    frame: u64,
    script: Vec<(u64, InputEvent)>,
}

impl RefreshSource for ScriptedInput {
    fn next_frame(&mut self) -> f64 {
        let now = self.timer.next_frame();
        let due = self.script.iter().filter(|(at, _)| *at == self.frame);
        for (_, event) in due {
            self.timer.push_input(event.clone());
        }
        self.frame += 1;
        now
    }

    fn drain_input(&mut self) -> Vec<InputEvent> {
        self.timer.drain_input()
    }
}

fn build(scene: &Scene) -> Result<ShapeRef> {
    let accent = Rc::new(Material::filled("rgb(220, 120, 40)".parse()?));
    let outline = Rc::new(Material::stroked("#141414".parse()?, 2.0));

    let panel = GroupRef::new(ShapeOptions::at(40.0, 40.0));
    let button = ShapeRef::rectangle(ShapeOptions::default().material(accent.clone()), 80.0, 30.0);
    let knob = ShapeRef::circle(ShapeOptions::at(120.0, 15.0).material(outline), 12.0);
    let label = ShapeRef::text(ShapeOptions::at(4.0, 22.0).without_events(), "launch");
    panel.add_all(&[button.clone(), knob.clone(), label])?;

    let walker = ShapeRef::sprite(
        ShapeOptions::at(200.0, 150.0),
        Sprite::new(Image::new("walker.png"), 1, 8),
    );
    walker.on(EventKind::Load, |shape, _| {
        log::info!("sprite ready, hit-testing {:?}", shape.bounds());
        Ok(())
    });

    scene.add_all(&[panel.as_shape().clone(), walker.clone()])?;

    button.on(EventKind::Click, |shape, e| {
        log::info!("button clicked at ({}, {})", e.x, e.y);
        let panel = shape.parent().context("button detached from its panel")?;
        panel.move_by(Movement::x(20.0), Some(250.0), Some("ease_out_quad".into()))?;
        e.stop_propagation();
        Ok(())
    });
    knob.on_str("mousedown touchstart", |shape, _| {
        shape.animate(Target::scale(1.5), 100.0, None)?;
        shape.animate(Target::scale(1.0), 100.0, Some("ease_in_out_sine".into()))?;
        Ok(())
    })?;
    scene.on(EventKind::Click, |_, e| {
        log::info!("click at ({}, {}) reached the scene", e.x, e.y);
        Ok(())
    });

    walker.finish_load(Vec2::new(256.0, 32.0))?;
    Ok(walker)
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = SceneConfig { width: 320.0, height: 240.0, ..SceneConfig::default() };
    let mut scene = Scene::with_config(&config).context("failed to create scene")?;
    let walker = build(&scene)?;

    let control = scene.control();
    let steps = Cell::new(0u32);
    scene.on(EventKind::Render, move |_, e| {
        let Some(info) = e.frame else {
            return Ok(());
        };
        if info.frame % 4 == 0 {
            walker.step(1)?;
            steps.set(steps.get() + 1);
        }
        if info.frame % 30 == 0 {
            log::info!("frame {} ({} fps), sprite stepped {} times", info.frame, info.fps, steps.get());
        }
        if info.frame + 1 >= FRAMES {
            control.stop()?;
        }
        Ok(())
    });
    scene.on(EventKind::Stop, |_, _| {
        log::info!("scene stopped");
        Ok(())
    });

    let mut refresh = ScriptedInput {
        timer: TimerRefresh::from_config(&config),
        frame: 0,
        script: vec![
            (10, InputEvent::pointer(PointerKind::Click, 60.0, 50.0)),
            (40, InputEvent::pointer(PointerKind::Down, 180.0, 55.0)),
            (70, InputEvent::pointer(PointerKind::Click, 5.0, 5.0)),
        ],
    };

    scene.start()?;
    scene.run(&mut refresh).context("scene loop failed")?;

    if let Some(surface) = scene.surface() {
        let presented = surface.presented();
        log::info!("last frame presented {} draw commands", presented.len());
        for cmd in presented.items() {
            log::debug!("{cmd:?}");
        }
    }
    scene.destroy()
}
