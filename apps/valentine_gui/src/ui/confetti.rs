//! Falling-paper confetti overlay.
//!
//! Pieces are emitted from the top edge over a few seconds, fall under gravity
//! and drift sideways. Without recycling each piece is emitted once and the
//! effect ends when the last one leaves the bottom of the viewport.

use egui::{Color32, Painter, Pos2, Shape, Stroke, Vec2};
use valentine_core::config::ConfettiSettings;

use crate::ui::viewport::Viewport;

// Motion constants are per 60 Hz frame and scaled by elapsed time.
const FRAME_RATE: f32 = 60.0;
const GRAVITY: f32 = 0.1;
const FRICTION: f32 = 0.99;
const MAX_INITIAL_VX: f32 = 4.0;
const MAX_INITIAL_VY: f32 = 3.0;
const SPAWN_HEIGHT: f32 = -10.0;
const EMIT_DURATION_SECS: f32 = 5.0;
const MAX_STEP_SECS: f32 = 0.1;
const OFFSCREEN_MARGIN: f32 = 40.0;

const PALETTE: [Color32; 17] = [
    Color32::from_rgb(0xf4, 0x43, 0x36),
    Color32::from_rgb(0xe9, 0x1e, 0x63),
    Color32::from_rgb(0x9c, 0x27, 0xb0),
    Color32::from_rgb(0x67, 0x3a, 0xb7),
    Color32::from_rgb(0x3f, 0x51, 0xb5),
    Color32::from_rgb(0x21, 0x96, 0xf3),
    Color32::from_rgb(0x03, 0xa9, 0xf4),
    Color32::from_rgb(0x00, 0xbc, 0xd4),
    Color32::from_rgb(0x00, 0x96, 0x88),
    Color32::from_rgb(0x4c, 0xaf, 0x50),
    Color32::from_rgb(0x8b, 0xc3, 0x4a),
    Color32::from_rgb(0xcd, 0xdc, 0x39),
    Color32::from_rgb(0xff, 0xeb, 0x3b),
    Color32::from_rgb(0xff, 0xc1, 0x07),
    Color32::from_rgb(0xff, 0x98, 0x00),
    Color32::from_rgb(0xff, 0x57, 0x22),
    Color32::from_rgb(0x79, 0x55, 0x48),
];

#[derive(Debug, Clone)]
struct Piece {
    pos: Pos2,
    vel: Vec2,
    size: Vec2,
    angle: f32,
    spin: f32,
    tilt_phase: f32,
    color: Color32,
}

pub struct Confetti {
    pieces: Vec<Piece>,
    piece_count: usize,
    emitted: usize,
    emit_budget: f32,
    recycle: bool,
    rng: fastrand::Rng,
}

impl Confetti {
    pub fn new(settings: ConfettiSettings, rng: fastrand::Rng) -> Self {
        Self {
            pieces: Vec::with_capacity(settings.piece_count),
            piece_count: settings.piece_count,
            emitted: 0,
            emit_budget: 0.0,
            recycle: settings.recycle,
            rng,
        }
    }

    pub fn active_pieces(&self) -> usize {
        self.pieces.len()
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn is_finished(&self) -> bool {
        !self.recycle && self.emitted >= self.piece_count && self.pieces.is_empty()
    }

    pub fn step(&mut self, dt_secs: f32, viewport: Viewport) {
        let dt_secs = dt_secs.clamp(0.0, MAX_STEP_SECS);
        if dt_secs == 0.0 || viewport.width <= 0.0 || viewport.height <= 0.0 {
            return;
        }

        self.emit(dt_secs, viewport);

        let frames = dt_secs * FRAME_RATE;
        let friction = FRICTION.powf(frames);
        for piece in &mut self.pieces {
            piece.vel.x *= friction;
            piece.vel.y += GRAVITY * frames;
            piece.pos += piece.vel * frames;
            piece.angle += piece.spin * frames;
            piece.tilt_phase += 0.07 * frames;
        }

        let floor = viewport.height + OFFSCREEN_MARGIN;
        if self.recycle {
            for index in 0..self.pieces.len() {
                if self.pieces[index].pos.y > floor {
                    self.pieces[index] = spawn_piece(&mut self.rng, viewport);
                }
            }
        } else {
            self.pieces.retain(|piece| piece.pos.y <= floor);
        }
    }

    fn emit(&mut self, dt_secs: f32, viewport: Viewport) {
        if self.emitted >= self.piece_count {
            return;
        }

        self.emit_budget += dt_secs * self.piece_count as f32 / EMIT_DURATION_SECS;
        while self.emit_budget >= 1.0 && self.emitted < self.piece_count {
            self.emit_budget -= 1.0;
            self.emitted += 1;
            let piece = spawn_piece(&mut self.rng, viewport);
            self.pieces.push(piece);
        }
    }

    pub fn paint(&self, painter: &Painter) {
        for piece in &self.pieces {
            let (sin, cos) = piece.angle.sin_cos();
            // Fake a 3D flutter by squashing the height with the tilt.
            let half = Vec2::new(piece.size.x, piece.size.y * piece.tilt_phase.cos()) * 0.5;
            let corners = [
                Vec2::new(-half.x, -half.y),
                Vec2::new(half.x, -half.y),
                Vec2::new(half.x, half.y),
                Vec2::new(-half.x, half.y),
            ]
            .map(|corner| {
                let rotated = Vec2::new(
                    corner.x * cos - corner.y * sin,
                    corner.x * sin + corner.y * cos,
                );
                piece.pos + rotated
            });
            painter.add(Shape::convex_polygon(
                corners.to_vec(),
                piece.color,
                Stroke::NONE,
            ));
        }
    }
}

fn spawn_piece(rng: &mut fastrand::Rng, viewport: Viewport) -> Piece {
    Piece {
        pos: Pos2::new(rng.f32() * viewport.width, SPAWN_HEIGHT),
        vel: Vec2::new(
            (rng.f32() * 2.0 - 1.0) * MAX_INITIAL_VX,
            rng.f32() * MAX_INITIAL_VY,
        ),
        size: Vec2::new(5.0 + rng.f32() * 10.0, 10.0 + rng.f32() * 10.0),
        angle: rng.f32() * std::f32::consts::TAU,
        spin: (rng.f32() * 2.0 - 1.0) * 0.2,
        tilt_phase: rng.f32() * std::f32::consts::TAU,
        color: PALETTE[rng.usize(..PALETTE.len())],
    }
}

#[cfg(test)]
#[path = "../tests/confetti_tests.rs"]
mod tests;
