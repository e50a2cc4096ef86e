//! Immediate-mode rendering of the simulation snapshot
//!
//! Pure consumer: draws whatever state it is handed and feeds nothing
//! back into the simulation.

mod shapes;

use macroquad::color::Color;
use macroquad::text::{draw_text, measure_text};
use macroquad::time::get_fps;
use macroquad::window::clear_background;

use crate::consts::{ARENA_H, ARENA_W};
use crate::sim::{GamePhase, GameState};

const COLOR_BG: Color = Color::new(0.0, 0.0, 0.0, 1.0);
const COLOR_ASTEROID: Color = Color::new(1.0, 1.0, 1.0, 1.0);
const COLOR_SHIP: Color = Color::new(1.0, 0.9, 0.0, 1.0);
const COLOR_LASER: Color = Color::new(0.0, 1.0, 0.0, 1.0);
const COLOR_UI: Color = Color::new(0.86, 0.86, 0.86, 1.0);
const COLOR_PAUSE: Color = Color::new(0.7, 0.7, 1.0, 1.0);
const COLOR_GAME_OVER: Color = Color::new(1.0, 0.47, 0.47, 1.0);

/// Draw one frame of the current snapshot
pub fn draw_frame(state: &GameState, show_fps: bool) {
    clear_background(COLOR_BG);

    for rock in &state.asteroids {
        shapes::draw_asteroid(rock, COLOR_ASTEROID);
    }
    for laser in &state.lasers {
        shapes::draw_laser(laser, COLOR_LASER);
    }
    shapes::draw_ship(&state.ship, state.now_ms(), COLOR_SHIP);

    draw_hud(state, show_fps);

    match state.phase {
        GamePhase::Paused => {
            draw_centered("PAUSED  (P to resume)", ARENA_H / 2.0, 48.0, COLOR_PAUSE);
        }
        GamePhase::GameOver => {
            draw_centered("GAME OVER", ARENA_H / 2.0 - 12.0, 48.0, COLOR_GAME_OVER);
            draw_centered(
                "Press R to restart or ESC to quit",
                ARENA_H / 2.0 + 28.0,
                22.0,
                COLOR_UI,
            );
        }
        GamePhase::Playing => {}
    }
}

fn draw_hud(state: &GameState, show_fps: bool) {
    draw_text(&format!("Score: {}", state.score), 10.0, 28.0, 22.0, COLOR_UI);
    draw_text(&format!("Lives: {}", state.lives), 10.0, 54.0, 22.0, COLOR_UI);
    if show_fps {
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 80.0, 22.0, COLOR_UI);
    }
}

fn draw_centered(text: &str, y: f32, size: f32, color: Color) {
    let dims = measure_text(text, None, size as u16, 1.0);
    draw_text(text, (ARENA_W - dims.width) / 2.0, y, size, color);
}
