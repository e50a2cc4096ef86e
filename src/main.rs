//! Toro Blast entry point
//!
//! Native shell: window setup, input gathering, fixed-step simulation
//! driving, audio dispatch and rendering.

use std::path::Path;
use std::process;

use glam::Vec2;
use macroquad::input::{
    KeyCode, MouseButton, is_key_down, is_key_pressed, is_mouse_button_down, mouse_position,
};
use macroquad::time::{get_frame_time, get_time};
use macroquad::window::{Conf, next_frame};

use toro_blast::audio::{AudioManager, SoundEffect, THRUST_SECONDS};
use toro_blast::consts::*;
use toro_blast::renderer;
use toro_blast::settings::{SETTINGS_FILE, Settings};
use toro_blast::sim::{GameEvent, GamePhase, GameState, Thrust, TickInput, tick};

fn conf() -> Conf {
    Conf {
        window_title: "Toro Blast".to_string(),
        window_width: ARENA_W as i32,
        window_height: ARENA_H as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load(Path::new(SETTINGS_FILE));

    // Audio is the only fallible resource after the window exists; a failure
    // here aborts the run before the loop starts.
    let audio =
        match AudioManager::new(settings.master_volume, settings.sfx_volume, settings.muted).await
        {
            Ok(audio) => audio,
            Err(err) => {
                log::error!("audio initialization failed: {err:#}");
                process::exit(1);
            }
        };

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("starting session with seed {seed}");
    let mut state = GameState::new(seed);

    let mut input = TickInput::default();
    let mut accumulator = 0.0f32;
    // wall-clock time the thrust hum last (re)started
    let mut thrust_started_at = f64::NEG_INFINITY;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        // Per-tick boolean input state; pause/restart stay latched until a
        // substep actually consumes them
        let (mx, my) = mouse_position();
        input.aim = Vec2::new(mx, my);
        input.thrust = Thrust {
            forward: is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
            back: is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
            left: is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
            right: is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
        };
        input.fire = is_mouse_button_down(MouseButton::Left) || is_key_down(KeyCode::Space);
        input.pause |= is_key_pressed(KeyCode::P);
        input.restart |= is_key_pressed(KeyCode::R);

        let dt = get_frame_time().min(0.1);
        accumulator += dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, &input);
            accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.pause = false;
            input.restart = false;
        }

        // Fire-and-forget audio from the tick's events
        for event in state.events.drain(..) {
            match event {
                GameEvent::LaserFired => audio.play(SoundEffect::Fire),
                GameEvent::AsteroidDestroyed | GameEvent::ShipDestroyed => {
                    audio.play(SoundEffect::Explosion);
                }
            }
        }

        // Low hum while thrusting; restart the one-shot only after the
        // previous one has played out
        let now = get_time();
        if state.phase == GamePhase::Playing
            && input.thrust.forward
            && now - thrust_started_at >= THRUST_SECONDS
        {
            audio.play(SoundEffect::Thrust);
            thrust_started_at = now;
        }

        renderer::draw_frame(&state, settings.show_fps);

        next_frame().await;
    }

    log::info!("quitting");
}
