//! Windowed frame loop
//!
//! Each repaint runs one simulation step (collisions, then integration) and
//! draws every particle as a filled circle. Steps are paced by the
//! scenario's `delay`, which only affects wall-clock speed; the physics
//! timestep stays fixed.

use crate::pacing::FramePacer;
use crate::scenario::load_context;
use collisim_core::{get_particle_states, Color, SimulationContext};
use egui::{Color32, Key};
use notify::{Event, RecommendedWatcher, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// Interactive window onto a running simulation
pub struct SimApp {
    source_path: Option<PathBuf>,
    source_text: String,
    ctx: SimulationContext,
    last_load_error: Option<String>,
    playing: bool,
    pacer: FramePacer,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: Option<mpsc::Receiver<notify::Result<Event>>>,
}

impl SimApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        ctx: SimulationContext,
        source_text: String,
        source_path: Option<PathBuf>,
    ) -> Self {
        let (file_watcher, file_receiver) = match &source_path {
            Some(path) => match watch(path) {
                Ok((watcher, rx)) => (Some(watcher), Some(rx)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "file watching disabled: {}", e);
                    (None, None)
                }
            },
            None => (None, None),
        };

        let pacer = frame_pacer(&ctx);
        Self {
            source_path,
            source_text,
            ctx,
            last_load_error: None,
            playing: true,
            pacer,
            file_watcher,
            file_receiver,
        }
    }

    /// Rebuild the simulation from the current source text.
    /// On failure the previous simulation keeps running.
    fn reload_context(&mut self) {
        match load_context(&self.source_text) {
            Ok(ctx) => {
                self.pacer = frame_pacer(&ctx);
                self.ctx = ctx;
                self.last_load_error = None;
            }
            Err(e) => {
                tracing::error!("reload failed: {}", e);
                self.last_load_error = Some(e);
            }
        }
    }

    fn check_file_changes(&mut self) {
        let Some(path) = self.source_path.clone() else {
            return;
        };
        let Some(rx) = &self.file_receiver else {
            return;
        };

        let mut needs_reload = false;
        while let Ok(event) = rx.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    paths,
                    ..
                }) if paths.iter().any(|p| p.ends_with(&path) || path.ends_with(p)) => {
                    needs_reload = true;
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("file watcher error: {}", e),
            }
        }

        if needs_reload {
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    tracing::info!(path = %path.display(), "scenario changed, reloading");
                    self.source_text = text;
                    self.reload_context();
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), "could not re-read scenario: {}", e)
                }
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (toggle, single_step, reset) = ctx.input(|i| {
            (
                i.key_pressed(Key::Space),
                i.key_pressed(Key::S),
                i.key_pressed(Key::R),
            )
        });

        if toggle {
            self.playing = !self.playing;
        }
        if reset {
            self.reload_context();
        }
        if single_step && !self.playing {
            self.step();
        }
    }

    fn step(&mut self) {
        let report = self.ctx.simulation.step();
        if report.collisions > 0 {
            tracing::debug!(frame = report.frame, collisions = report.collisions, "collision");
        }
    }
}

fn watch(
    path: &Path,
) -> notify::Result<(RecommendedWatcher, mpsc::Receiver<notify::Result<Event>>)> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res| {
        // The receiver is gone during shutdown; nothing to do then
        let _ = tx.send(res);
    })?;
    watcher.watch(path, notify::RecursiveMode::NonRecursive)?;
    Ok((watcher, rx))
}

fn frame_pacer(ctx: &SimulationContext) -> FramePacer {
    FramePacer::new(Duration::from_millis(ctx.scenario.simulate.delay_ms))
}

fn to_color32(color: Color) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

impl eframe::App for SimApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();
        self.handle_keys(ctx);

        if self.playing && self.pacer.ready(Instant::now()) {
            self.step();
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::WHITE))
            .show(ctx, |ui| {
                let origin = ui.max_rect().min;
                let painter = ui.painter();

                // Window pixel coordinates, y down, truncated like integer
                // pixel positions
                for particle in get_particle_states(&self.ctx) {
                    let center = origin
                        + egui::vec2(particle.pos.x.trunc() as f32, particle.pos.y.trunc() as f32);
                    painter.circle_filled(center, particle.radius as f32, to_color32(particle.color));
                }

                if !self.playing {
                    ui.label(
                        egui::RichText::new(format!(
                            "Paused at frame {} (Space: resume, S: step, R: reset)",
                            self.ctx.simulation.frame()
                        ))
                        .color(Color32::DARK_GRAY),
                    );
                }

                if let Some(ref error) = self.last_load_error {
                    ui.label(
                        egui::RichText::new(format!("Error: {}", error))
                            .color(Color32::RED)
                            .size(16.0),
                    );
                }
            });

        if self.playing {
            ctx.request_repaint_after(self.pacer.remaining(Instant::now()));
        }
    }
}
