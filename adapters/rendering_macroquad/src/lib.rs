#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Lane Defence.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Consumers that need sound playback can opt back
//! in by enabling `macroquad/audio` in their own `Cargo.toml` dependency
//! specification.
//!
//! The window is created at the field's native pixel size plus a HUD strip,
//! so mouse coordinates map 1:1 onto field pixels and need no scaling.

mod theme;

pub use theme::Theme;

use std::time::Duration;

use anyhow::Result;
use glam::Vec2;
use lane_defence_core::DefenderKind;
use lane_defence_rendering::{
    AttackerPresentation, DefenderPresentation, FrameInput, GridPresentation, HudPresentation,
    Presentation, ProjectilePresentation, RenderingBackend, Scene, PROJECTILE_RADIUS,
};
use macroquad::input::{
    is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton,
};

/// Height of the HUD strip drawn below the field, in pixels.
const HUD_HEIGHT: f32 = 72.0;
const HUD_FONT_SIZE: f32 = 24.0;
const OVERLAY_FONT_SIZE: f32 = 48.0;
const OVERLAY_MESSAGE: &str = "Game Over!";

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// `Space` starts or restarts a session.
    start_pressed: bool,
    /// `P` toggles the pause phase.
    pause_pressed: bool,
    /// `1` arms a gunner for placement.
    select_gunner: bool,
    /// `2` arms a harvester for placement.
    select_harvester: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
            start_pressed: is_key_pressed(KeyCode::Space),
            pause_pressed: is_key_pressed(KeyCode::P),
            select_gunner: is_key_pressed(KeyCode::Key1),
            select_harvester: is_key_pressed(KeyCode::Key2),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadBackend {
    theme: Theme,
}

impl MacroquadBackend {
    /// Returns a backend drawing with the default palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a backend drawing with the provided palette.
    #[must_use]
    pub fn with_theme(theme: Theme) -> Self {
        Self { theme }
    }

    /// Palette the backend will draw with.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self { theme } = self;
        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let config = macroquad::window::Conf {
            window_title,
            window_width: scene.grid.width() as i32,
            window_height: (scene.grid.height() + HUD_HEIGHT) as i32,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                let frame_input = gather_frame_input(&scene.grid, keyboard);
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                update_scene(frame_dt, frame_input, &mut scene);

                macroquad::window::clear_background(background);
                draw_grid(&scene.grid);
                draw_defenders(&scene.defenders, &scene.grid, &theme);
                draw_attackers(&scene.attackers, &scene.grid, &theme);
                draw_projectiles(&scene.projectiles, &theme);
                draw_hud(&scene.hud, &scene.grid, &theme);
                if scene.hud.game_over() {
                    draw_game_over_overlay(&scene.grid, &theme);
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn gather_frame_input(grid: &GridPresentation, keyboard: KeyboardShortcuts) -> FrameInput {
    let select = if keyboard.select_gunner {
        Some(DefenderKind::Gunner)
    } else if keyboard.select_harvester {
        Some(DefenderKind::Harvester)
    } else {
        None
    };

    let click = if is_mouse_button_pressed(MouseButton::Left) {
        let (x, y) = mouse_position();
        let inside = x >= 0.0 && y >= 0.0 && x < grid.width() && y < grid.height();
        inside.then(|| Vec2::new(x, y))
    } else {
        None
    };

    FrameInput {
        start_pressed: keyboard.start_pressed,
        pause_pressed: keyboard.pause_pressed,
        select,
        click,
    }
}

fn draw_grid(grid: &GridPresentation) {
    let color = to_macroquad_color(grid.line_color);

    for row in 0..grid.horizontal_line_count() {
        let y = row as f32 * grid.cell_length;
        macroquad::shapes::draw_line(0.0, y, grid.width(), y, 1.0, color);
    }

    for column in 0..grid.vertical_line_count() {
        let x = column as f32 * grid.cell_length;
        macroquad::shapes::draw_line(x, 0.0, x, grid.height(), 1.0, color);
    }
}

fn draw_defenders(defenders: &[DefenderPresentation], grid: &GridPresentation, theme: &Theme) {
    let radius = grid.defender_radius();
    let half = grid.cell_length / 2.0;

    for defender in defenders {
        let center_x = defender.cell.column() as f32 * grid.cell_length + half;
        let center_y = defender.cell.row() as f32 * grid.cell_length + half;
        let color = match defender.kind {
            DefenderKind::Gunner => theme.gunner,
            DefenderKind::Harvester => theme.harvester,
        };
        macroquad::shapes::draw_circle(center_x, center_y, radius, to_macroquad_color(color));
    }
}

fn draw_attackers(attackers: &[AttackerPresentation], grid: &GridPresentation, theme: &Theme) {
    let color = to_macroquad_color(theme.attacker);

    for attacker in attackers {
        let top = attacker.row as f32 * grid.cell_length;
        macroquad::shapes::draw_rectangle(
            attacker.x,
            top,
            grid.cell_length,
            grid.cell_length,
            color,
        );
    }
}

fn draw_projectiles(projectiles: &[ProjectilePresentation], theme: &Theme) {
    let color = to_macroquad_color(theme.projectile);

    for projectile in projectiles {
        macroquad::shapes::draw_circle(projectile.x, projectile.y, PROJECTILE_RADIUS, color);
    }
}

fn draw_hud(hud: &HudPresentation, grid: &GridPresentation, theme: &Theme) {
    let color = to_macroquad_color(theme.hud_text);
    let first_line = grid.height() + 28.0;
    let second_line = grid.height() + 56.0;

    macroquad::text::draw_text(
        &format!("Score: {}   Funds: {}", hud.score, hud.currency),
        16.0,
        first_line,
        HUD_FONT_SIZE,
        color,
    );

    let status = match hud.selection {
        Some(DefenderKind::Gunner) => "Armed: gunner (click a cell to place)".to_owned(),
        Some(DefenderKind::Harvester) => "Armed: harvester (click a cell to place)".to_owned(),
        None => format!(
            "[Space] start  [P] pause  [1] gunner {}  [2] harvester {}",
            DefenderKind::Gunner.cost(),
            DefenderKind::Harvester.cost()
        ),
    };
    macroquad::text::draw_text(&status, 16.0, second_line, HUD_FONT_SIZE, color);
}

fn draw_game_over_overlay(grid: &GridPresentation, theme: &Theme) {
    let scrim = lane_defence_rendering::Color::from_rgb_u8(0, 0, 0).with_alpha(0.45);
    macroquad::shapes::draw_rectangle(
        0.0,
        0.0,
        grid.width(),
        grid.height(),
        to_macroquad_color(scrim),
    );

    let metrics =
        macroquad::text::measure_text(OVERLAY_MESSAGE, None, OVERLAY_FONT_SIZE as u16, 1.0);
    macroquad::text::draw_text(
        OVERLAY_MESSAGE,
        (grid.width() - metrics.width) / 2.0,
        grid.height() / 2.0,
        OVERLAY_FONT_SIZE,
        to_macroquad_color(theme.overlay_text),
    );
}

fn to_macroquad_color(color: lane_defence_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
