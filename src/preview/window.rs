//! eframe-backed preview window
//!
//! One cooperative loop on the calling thread: every frame drains the
//! pending input queue into [`PreviewEvent`]s, advances the state machine,
//! then paints the checkerboard transparency backdrop with the scaled image
//! composited on top. The loop blocks on the backend's present cadence and
//! ends as soon as the machine reaches a terminal state.

use crate::color::Color;
use crate::config::PreviewOptions;
use crate::error::{Error, Result};
use crate::preview::{PreviewEvent, PreviewState, Verdict};
use eframe::egui;
use image::RgbaImage;
use std::cell::Cell;
use std::rc::Rc;

/// Show `image` in a window and block until the user decides.
///
/// `y` or closing the window saves, `n` or Escape cancels. All window
/// resources are torn down by the backend before this returns, on success
/// and on error alike.
pub fn run_preview(options: &PreviewOptions, image: &RgbaImage) -> Result<Verdict> {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let pixels = image.as_raw().clone();
    let verdict = Rc::new(Cell::new(None));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(options.window_title.clone())
            .with_inner_size([width as f32, height as f32]),
        ..Default::default()
    };

    let app_options = options.clone();
    let app_verdict = Rc::clone(&verdict);

    eframe::run_native(
        &options.window_title,
        native_options,
        Box::new(move |cc| {
            let texture = cc.egui_ctx.load_texture(
                "qr-preview",
                egui::ColorImage::from_rgba_unmultiplied([width, height], &pixels),
                egui::TextureOptions::NEAREST,
            );
            Ok(Box::new(PreviewApp {
                state: PreviewState::default().display(),
                texture,
                options: app_options,
                verdict: app_verdict,
            }))
        }),
    )
    .map_err(|e| Error::Render(e.to_string()))?;

    verdict
        .get()
        .ok_or_else(|| Error::Render("preview window closed without a decision".to_string()))
}

struct PreviewApp {
    state: PreviewState,
    texture: egui::TextureHandle,
    options: PreviewOptions,
    verdict: Rc<Cell<Option<Verdict>>>,
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for event in drain_events(ctx) {
            self.state = self.state.apply(event);
        }

        if let Some(verdict) = self.state.verdict() {
            if self.verdict.get().is_none() {
                self.verdict.set(Some(verdict));
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }

        let image_size = self.texture.size_vec2();
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                paint_backdrop(ui, &self.options, image_size);

                let rect = egui::Rect::from_min_size(ui.max_rect().min, image_size);
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                ui.painter()
                    .image(self.texture.id(), rect, uv, egui::Color32::WHITE);
            });

        // Re-poll after every present
        ctx.request_repaint();
    }
}

/// Fold everything the backend reported this frame into the closed event set
fn drain_events(ctx: &egui::Context) -> Vec<PreviewEvent> {
    ctx.input(|input| {
        let mut events = Vec::new();

        if input.viewport().close_requested() {
            events.push(PreviewEvent::CloseRequested);
        }

        for event in &input.events {
            if let egui::Event::Key {
                key, pressed: true, ..
            } = event
            {
                events.push(match key {
                    egui::Key::Y => PreviewEvent::Confirm,
                    egui::Key::N => PreviewEvent::Cancel,
                    egui::Key::Escape => PreviewEvent::Quit,
                    _ => PreviewEvent::Other,
                });
            }
        }

        events
    })
}

/// Checkerboard of two alternating gray boxes over the clear color,
/// visualizing transparency in the composited image
fn paint_backdrop(ui: &egui::Ui, options: &PreviewOptions, area: egui::Vec2) {
    let painter = ui.painter();
    let origin = ui.max_rect().min;

    painter.rect_filled(
        ui.max_rect(),
        egui::CornerRadius::ZERO,
        to_color32(options.clear_color),
    );

    let box_size = options.checker_box_size.max(1) as f32;
    let cols = (area.x / box_size) as u32 + 1;
    let rows = (area.y / box_size) as u32 + 1;

    for x in 0..cols {
        for y in 0..rows {
            let shade = if (x + y) % 2 == 0 {
                options.checker_dark
            } else {
                options.checker_light
            };
            let rect = egui::Rect::from_min_size(
                origin + egui::vec2(x as f32 * box_size, y as f32 * box_size),
                egui::vec2(box_size, box_size),
            );
            painter.rect_filled(rect, egui::CornerRadius::ZERO, to_color32(shade));
        }
    }
}

fn to_color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}
