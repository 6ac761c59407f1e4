use std::collections::HashMap;

use crossbeam_channel::{Receiver, Sender};
use egui::{Color32, CornerRadius, RichText};
use valentine_core::{
    config::{ConfettiSettings, MediaSettings, ScreenCopy},
    InteractionController, InteractionPhase, Settings,
};

use crate::{
    backend_bridge::commands::{BackendCommand, MediaSlot},
    controller::{
        events::UiEvent,
        orchestration::dispatch_backend_command,
        reducer::{MediaState, ScreenModel},
    },
    ui::{confetti::Confetti, theme, viewport::ViewportObserver},
};

const TRANSITION_SECS: f64 = 0.4;
const TRANSITION_SLIDE_PX: f32 = 30.0;
const BASE_FONT_PX: f32 = 16.0;
const BASE_ACCEPT_SIZE: egui::Vec2 = egui::vec2(120.0, 48.0);
const MEDIA_MAX_SIZE: egui::Vec2 = egui::vec2(260.0, 260.0);

/// What the transition shows this frame and how far along it is.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScreenFrame {
    screen: InteractionPhase,
    opacity: f32,
    offset_y: f32,
    settled: bool,
}

struct SlotTexture {
    handle: egui::TextureHandle,
    frame: usize,
}

pub struct ValentineApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    model: ScreenModel,
    copy: ScreenCopy,
    confetti_settings: ConfettiSettings,
    viewport: ViewportObserver,
    confetti: Option<Confetti>,
    textures: HashMap<MediaSlot, SlotTexture>,
    screen_shown_at: Option<f64>,
    accept_hovered: bool,
    accept_pressed: bool,
    theme_applied: bool,
}

impl ValentineApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: Settings,
    ) -> Self {
        let interaction = InteractionController::new(
            settings.presentation.clone(),
            settings.notification.message.clone(),
        );
        let mut app = Self {
            cmd_tx,
            ui_rx,
            model: ScreenModel::new(interaction),
            copy: settings.copy,
            confetti_settings: settings.confetti,
            viewport: ViewportObserver::default(),
            confetti: None,
            textures: HashMap::new(),
            screen_shown_at: None,
            accept_hovered: false,
            accept_pressed: false,
            theme_applied: false,
        };
        app.request_media(&settings.media);
        app
    }

    fn request_media(&mut self, media: &MediaSettings) {
        for (slot, url) in [
            (MediaSlot::Asking, media.asking_image_url.as_str()),
            (MediaSlot::Celebration, media.celebration_image_url.as_str()),
        ] {
            let Some(cmd) = self.model.request_media(slot, url) else {
                continue;
            };
            if !dispatch_backend_command(&self.cmd_tx, cmd, self.model.status_mut()) {
                self.model
                    .media_dispatch_failed(slot, "image request was not queued");
            }
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            if let UiEvent::MediaLoaded { slot, .. } = &event {
                self.textures.remove(slot);
            }
            self.model.apply(event);
        }
    }

    fn accept(&mut self) {
        let Some(cmd) = self.model.accept() else {
            return;
        };
        self.confetti = Some(Confetti::new(self.confetti_settings, fastrand::Rng::new()));
        self.screen_shown_at = None;

        if !dispatch_backend_command(&self.cmd_tx, cmd, self.model.status_mut()) {
            let reason = self
                .model
                .status()
                .unwrap_or("notification was not queued")
                .to_string();
            self.model.notify_dispatch_failed(&reason);
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.theme_applied {
            return;
        }
        theme::apply(ctx);
        self.theme_applied = true;
    }

    fn current_frame(&mut self, now: f64) -> ScreenFrame {
        let started = *self.screen_shown_at.get_or_insert(now);
        screen_frame(self.model.phase(), started, now)
    }

    fn show_media(&mut self, ui: &mut egui::Ui, slot: MediaSlot, placeholder: &str) {
        let now = ui.ctx().input(|i| i.time);
        match self.model.media_mut(slot) {
            Some(MediaState::Ready(playback)) => {
                playback.advance(now);
                let index = playback.current_index();
                let Some(frame) = playback.current_frame() else {
                    ui.label(RichText::new(placeholder).size(96.0));
                    return;
                };
                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [frame.width, frame.height],
                    &frame.rgba,
                );
                match self.textures.get_mut(&slot) {
                    Some(texture) if texture.frame == index => {}
                    Some(texture) => {
                        texture
                            .handle
                            .set(color_image, egui::TextureOptions::LINEAR);
                        texture.frame = index;
                    }
                    None => {
                        let handle = ui.ctx().load_texture(
                            format!("valentine_media_{}", slot.label()),
                            color_image,
                            egui::TextureOptions::LINEAR,
                        );
                        self.textures.insert(
                            slot,
                            SlotTexture {
                                handle,
                                frame: index,
                            },
                        );
                    }
                }

                if let Some(texture) = self.textures.get(&slot) {
                    let size = texture.handle.size_vec2();
                    ui.add(
                        egui::Image::new((texture.handle.id(), size))
                            .max_size(MEDIA_MAX_SIZE)
                            .corner_radius(CornerRadius::same(16)),
                    );
                }
            }
            Some(MediaState::Loading) | None => {
                ui.add_space(12.0);
                ui.spinner();
                ui.label(RichText::new(placeholder).size(72.0));
            }
            Some(MediaState::Failed(reason)) => {
                ui.label(RichText::new(placeholder).size(96.0))
                    .on_hover_text(failure_tooltip(reason));
            }
        }
    }

    fn show_asking(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        let presentation = self.model.interaction().presentation();
        let scale = presentation.scale;
        let emphasis = presentation.emphasis;
        let show_hint = presentation.show_hint;
        let decline_phrase = presentation.decline_phrase.to_string();

        self.show_media(ui, MediaSlot::Asking, "💝");
        ui.add_space(8.0);
        ui.label(
            RichText::new(&self.copy.question_title)
                .size(30.0)
                .strong()
                .color(theme::ROSE_600),
        );
        ui.label(
            RichText::new(&self.copy.question_subtitle)
                .size(18.0)
                .color(theme::ROSE_500),
        );
        ui.add_space(16.0);

        let grow = ctx.animate_value_with_time(egui::Id::new("accept_scale"), scale, 0.3);
        let grow_text =
            ctx.animate_value_with_time(egui::Id::new("accept_emphasis"), emphasis, 0.3);
        let micro = ctx.animate_value_with_time(
            egui::Id::new("accept_micro"),
            press_scale(self.accept_hovered, self.accept_pressed),
            0.12,
        );

        let fill = if self.accept_hovered {
            theme::ROSE_600
        } else {
            theme::ROSE_500
        };
        let accept = ui.add(
            egui::Button::new(
                RichText::new(&self.copy.accept_label)
                    .size(BASE_FONT_PX * grow_text * micro)
                    .strong()
                    .color(Color32::WHITE),
            )
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, theme::PINK_500))
            .min_size(BASE_ACCEPT_SIZE * grow * micro)
            .corner_radius(CornerRadius::same(14)),
        );
        self.accept_hovered = accept.hovered();
        self.accept_pressed = accept.is_pointer_button_down_on();

        ui.add_space(10.0);
        let decline = ui.add(
            egui::Button::new(
                RichText::new(&decline_phrase)
                    .size(BASE_FONT_PX)
                    .color(theme::ROSE_700),
            )
            .fill(Color32::WHITE)
            .stroke(egui::Stroke::new(1.0, theme::ROSE_300))
            .min_size(egui::vec2(96.0, 40.0))
            .corner_radius(CornerRadius::same(12)),
        );

        if show_hint {
            ui.add_space(6.0);
            ui.label(
                RichText::new(&self.copy.hint)
                    .size(14.0)
                    .italics()
                    .color(theme::ROSE_400),
            );
        }

        if accept.clicked() {
            self.accept();
        } else if decline.clicked() {
            self.model.decline();
        }
    }

    fn show_celebrating(&mut self, ui: &mut egui::Ui) {
        self.show_media(ui, MediaSlot::Celebration, "🥰");
        ui.add_space(8.0);
        ui.label(
            RichText::new(&self.copy.celebration_title)
                .size(34.0)
                .strong()
                .color(theme::ROSE_600),
        );
        ui.label(
            RichText::new(&self.copy.celebration_body)
                .size(18.0)
                .color(theme::ROSE_700),
        );
        if self.model.interaction().state().notifying() {
            ui.add_space(8.0);
            ui.label(
                RichText::new(&self.copy.sending_notice)
                    .size(14.0)
                    .color(theme::ROSE_400),
            );
        }
    }

    fn show_screen(&mut self, ctx: &egui::Context) -> ScreenFrame {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                theme::paint_background(ui.painter(), rect);
                self.viewport.observe(rect.size());

                let now = ui.ctx().input(|i| i.time);
                let frame = self.current_frame(now);
                ui.set_opacity(frame.opacity);

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(36.0 + frame.offset_y);
                            match frame.screen {
                                InteractionPhase::Asking => self.show_asking(ui),
                                InteractionPhase::Celebrating => self.show_celebrating(ui),
                            }
                            if let Some(status) = self.model.status() {
                                ui.add_space(18.0);
                                ui.label(
                                    RichText::new(status).size(13.0).color(theme::ROSE_700),
                                );
                            }
                        });
                    });
                frame
            })
            .inner
    }

    fn show_confetti(&mut self, ctx: &egui::Context) {
        let Some(confetti) = self.confetti.as_mut() else {
            return;
        };
        let dt = ctx.input(|i| i.stable_dt);
        confetti.step(dt, self.viewport.current());
        if confetti.is_finished() {
            tracing::debug!("confetti finished");
            self.confetti = None;
            return;
        }

        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("valentine_confetti"),
        ));
        confetti.paint(&painter);
    }

    fn is_animating(&self, now: f64) -> bool {
        let phase = self.model.phase();
        let entering = self
            .screen_shown_at
            .is_some_and(|started| !screen_frame(phase, started, now).settled);
        let media_playing = [MediaSlot::Asking, MediaSlot::Celebration]
            .into_iter()
            .any(|slot| {
                matches!(
                    self.model.media(slot),
                    Some(MediaState::Ready(playback)) if playback.is_animated()
                )
            });
        entering
            || media_playing
            || self.confetti.is_some()
            || self.model.interaction().state().notifying()
    }
}

impl eframe::App for ValentineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        let frame = self.show_screen(ctx);
        // Confetti waits for the question to finish leaving.
        if frame.screen == InteractionPhase::Celebrating {
            self.show_confetti(ctx);
        }

        let now = ctx.input(|i| i.time);
        if self.is_animating(now) {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

fn transition_progress(started_at: f64, now: f64) -> f32 {
    (((now - started_at) / TRANSITION_SECS).clamp(0.0, 1.0)) as f32
}

/// The question fades in on its own. After acceptance it fades out and
/// slides up, and only then does the celebration fade in.
fn screen_frame(phase: InteractionPhase, phase_started_at: f64, now: f64) -> ScreenFrame {
    match phase {
        InteractionPhase::Asking => entering(
            InteractionPhase::Asking,
            transition_progress(phase_started_at, now),
        ),
        InteractionPhase::Celebrating => {
            let exit = transition_progress(phase_started_at, now);
            if exit < 1.0 {
                let eased = ease_out_cubic(exit);
                ScreenFrame {
                    screen: InteractionPhase::Asking,
                    opacity: 1.0 - eased,
                    offset_y: -TRANSITION_SLIDE_PX * eased,
                    settled: false,
                }
            } else {
                entering(
                    InteractionPhase::Celebrating,
                    transition_progress(phase_started_at + TRANSITION_SECS, now),
                )
            }
        }
    }
}

fn entering(screen: InteractionPhase, progress: f32) -> ScreenFrame {
    let eased = ease_out_cubic(progress);
    ScreenFrame {
        screen,
        opacity: eased,
        offset_y: TRANSITION_SLIDE_PX * (1.0 - eased),
        settled: progress >= 1.0,
    }
}

fn failure_tooltip(reason: &str) -> String {
    format!("Image unavailable: {reason}")
}

fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

fn press_scale(hovered: bool, pressed: bool) -> f32 {
    if pressed {
        0.95
    } else if hovered {
        1.05
    } else {
        1.0
    }
}
