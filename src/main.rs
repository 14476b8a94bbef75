use lbm_flow::grid::Grid;
use lbm_flow::render;
use lbm_flow::settings::{self, Settings};
use lbm_flow::solver::{self, StepConfig};
use macroquad::prelude::*;

const GRID_W: usize = 256;
const GRID_H: usize = 128;

fn window_conf() -> Conf {
    Conf {
        window_title: "lbm flow".to_owned(),
        window_width: 1024,
        window_height: 512,
        window_resizable: false,
        ..Default::default()
    }
}

// mouse position in the solver's pixel/H units
fn cursor_pos() -> Vec2 {
    let (mx, my) = mouse_position();
    vec2(
        mx / screen_width() * GRID_W as f32,
        my / screen_height() * GRID_H as f32,
    ) / GRID_H as f32
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut grid = Grid::new(GRID_W, GRID_H);
    let mut settings = Settings::default();

    let mut image = Image::gen_image_color(GRID_W as u16, GRID_H as u16, BLACK);
    let texture = Texture2D::from_image(&image);
    texture.set_filter(FilterMode::Nearest);

    let mut last_cursor = cursor_pos();
    let mut pending_init = true;
    let mut paused = false;

    loop {
        let cursor = cursor_pos();
        let cursor_delta = cursor - last_cursor;
        last_cursor = cursor;

        if is_key_pressed(KeyCode::R) {
            pending_init = true;
        }
        if is_key_pressed(KeyCode::Space) {
            paused = !paused;
        }
        if is_key_pressed(KeyCode::V) {
            settings.mode = settings.mode.next();
        }

        let scroll = mouse_wheel().1;
        if scroll != 0.0 {
            let factor = if scroll > 0.0 { 1.1 } else { 0.9 };
            settings.brightness = (settings.brightness * factor).clamp(0.05, 8.0);
        }

        if is_key_down(KeyCode::LeftControl) && is_key_pressed(KeyCode::S) {
            settings::save_to_json(&settings);
        }
        if is_key_down(KeyCode::LeftControl) && is_key_pressed(KeyCode::O) {
            if let Some(loaded) = settings::load_from_json() {
                settings = loaded;
            }
        }

        if pending_init {
            let cfg = StepConfig {
                cursor,
                init: true,
                brightness: settings.brightness,
                ..Default::default()
            };
            solver::tick(&mut grid, &cfg);
            pending_init = false;
        } else if !paused {
            let substeps = settings.substeps.max(1);
            let cfg = StepConfig {
                cursor,
                // split the frame displacement so the total push per frame
                // stays independent of the substep count
                cursor_delta: cursor_delta / substeps as f32,
                init: false,
                brightness: settings.brightness,
                dissipation: 0.0,
            };
            for _ in 0..substeps {
                solver::tick(&mut grid, &cfg);
            }
        }

        render::shade(&grid, settings.mode, settings.brightness, &mut image);
        texture.update(&image);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        draw_text(
            &format!("{:?}  {} fps", settings.mode, get_fps()),
            8.0,
            20.0,
            24.0,
            WHITE,
        );

        next_frame().await;
    }
}
