//! Brick Pong entry point
//!
//! Wires the canvas, input and animation frames to the simulation in the
//! browser; natively it runs a headless session and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use brick_pong::renderer::{Canvas2dRenderer, render_frame};
    use brick_pong::sim::{GameState, TickInput, tick};
    use brick_pong::{GameConfig, InputMode};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Canvas2dRenderer,
        input: TickInput,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        /// Convert a client-space x to field coordinates
        fn client_to_field_x(&self, client_x: i32) -> f32 {
            let rect = self.canvas.get_bounding_client_rect();
            client_x as f32 - rect.left() as f32
        }

        /// Draw the current state, then step it
        fn frame(&mut self) {
            render_frame(&self.state, &mut self.renderer);

            let input = self.input.clone();
            for event in tick(&mut self.state, &input) {
                log::debug!("Frame {}: {:?}", self.state.frame, event);
            }

            // Pointer position is consumed once; held keys persist
            self.input.pointer_x = None;
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Brick Pong starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("myCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let mut config = GameConfig::load().with_field(canvas.width(), canvas.height());
        if let Some(mode) = canvas
            .get_attribute("data-input")
            .and_then(|s| InputMode::from_str(&s))
        {
            config.input_mode = mode;
        }
        log::info!("Input mode: {}", config.input_mode.as_str());

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(config, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let game = Rc::new(RefCell::new(Game {
            state,
            renderer: Canvas2dRenderer::new(ctx),
            input: TickInput::default(),
            canvas,
        }));

        setup_input_handlers(game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Brick Pong running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let mode = game.borrow().state.input_mode();

        match mode {
            InputMode::Pointer => {
                // Registered once; only the latest position is kept
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    let mut g = game.borrow_mut();
                    let x = g.client_to_field_x(event.client_x());
                    g.input.pointer_x = Some(x);
                });
                document
                    .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
            InputMode::Keyboard => {
                for (kind, pressed) in [("keydown", true), ("keyup", false)] {
                    let game = game.clone();
                    let closure =
                        Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                            let mut g = game.borrow_mut();
                            match event.key().as_str() {
                                "ArrowLeft" | "Left" => g.input.left = pressed,
                                "ArrowRight" | "Right" => g.input.right = pressed,
                                _ => {}
                            }
                        });
                    window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
                    closure.forget();
                }
            }
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Lost window, stopping game loop");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
            return;
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brick Pong (native) starting...");
    log::info!("Native mode runs a headless session - serve the wasm build for the playable game");

    let config = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| brick_pong::GameConfig::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => brick_pong::GameConfig::default(),
    };

    if let Err(e) = headless::run(config, HEADLESS_FRAMES) {
        log::error!("Headless run failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// One minute at 60 Hz
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAMES: u64 = 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use brick_pong::sim::{GameEvent, GameState, TickInput, tick};
    use brick_pong::{ConfigError, GameConfig};

    /// Play `frames` frames with the paddle tracking the ball
    pub fn run(config: GameConfig, frames: u64) -> Result<(), ConfigError> {
        let mut state = GameState::new(config, 1)?;
        let (mut paddle_hits, mut wall_bounces) = (0u32, 0u32);

        for _ in 0..frames {
            let input = TickInput {
                pointer_x: Some(state.ball.pos.x),
                ..Default::default()
            };
            for event in tick(&mut state, &input) {
                match event {
                    GameEvent::PaddleHit => paddle_hits += 1,
                    GameEvent::WallBounce { .. } => wall_bounces += 1,
                    GameEvent::BrickDestroyed { row, col, .. } => {
                        log::info!("Frame {}: brick ({}, {}) destroyed", state.frame, row, col)
                    }
                }
            }
            if state.is_cleared() {
                break;
            }
        }

        log::info!(
            "Seed {} finished after {} frames: score {}/{}, {} paddle hits, {} wall bounces",
            state.seed,
            state.frame,
            state.score,
            state.bricks.len(),
            paddle_hits,
            wall_bounces
        );
        Ok(())
    }
}
