//! Blob Drift entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use blob_drift::consts::*;
    use blob_drift::renderer::{CanvasPainter, draw_frame};
    use blob_drift::settings::Settings;
    use blob_drift::sim::{SimConfig, SimulationEngine, TickInput, Viewport, tick};

    /// Game instance holding all state
    struct Game {
        engine: SimulationEngine,
        painter: CanvasPainter,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        /// Run simulation frames for the elapsed wall time
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.engine, &self.input);
                self.accumulator -= FRAME_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.start = false;
            }
            if substeps == MAX_SUBSTEPS {
                // Too far behind; drop the backlog instead of spiralling
                self.accumulator = 0.0;
            }
        }

        fn render(&mut self) {
            draw_frame(&self.engine, &self.settings, &mut self.painter);
        }

        fn resize(&mut self, width: f32, height: f32, dpr: f64) {
            self.engine.resize(width, height);
            self.painter.resize(width, height);
            self.painter.set_pixel_ratio(dpr);
        }
    }

    /// Size the backing store for the device pixel ratio; returns the CSS size
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (f32, f32, f64) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        canvas.set_width((client_w as f64 * dpr) as u32);
        canvas.set_height((client_h as f64 * dpr) as u32);
        (client_w as f32, client_h as f32, dpr)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Blob Drift starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let (width, height, dpr) = fit_canvas(&window, &canvas);

        let query = window.location().search().unwrap_or_default();
        let settings = Settings::from_query(&query);
        log::info!("Quality preset: {}", settings.quality.as_str());

        let seed = js_sys::Date::now() as u64;
        let engine = SimulationEngine::new(SimConfig::default(), Viewport::new(width, height), seed);
        let painter = CanvasPainter::new(ctx, width, height);
        painter.set_pixel_ratio(dpr);

        let game = Rc::new(RefCell::new(Game {
            engine,
            painter,
            settings,
            accumulator: 0.0,
            last_time: 0.0,
            input: TickInput::default(),
        }));
        log::info!("Engine initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_resize(&window, canvas, game.clone());

        request_animation_frame(game);

        log::info!("Blob Drift running!");
        Ok(())
    }

    fn touch_pos(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(Vec2::new(
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        ))
    }

    fn listen<E, F>(target: &web_sys::EventTarget, name: &str, handler: F)
    where
        E: wasm_bindgen::convert::FromWasmAbi + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        if let Err(e) = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
            log::warn!("Failed to add {} listener: {:?}", name, e);
        }
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            listen(canvas, "mousemove", move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                game.borrow_mut().input.pointer = Some(pos);
            });
        }

        // Mouse down - start/restart and hold
        {
            let game = game.clone();
            listen(canvas, "mousedown", move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.pointer = Some(Vec2::new(event.offset_x() as f32, event.offset_y() as f32));
                g.input.pressed = true;
                g.input.start = true;
            });
        }

        // Mouse up
        {
            let game = game.clone();
            listen(canvas, "mouseup", move |_event: MouseEvent| {
                game.borrow_mut().input.pressed = false;
            });
        }

        // Pointer left the canvas
        {
            let game = game.clone();
            listen(canvas, "mouseleave", move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.pointer = None;
                g.input.pressed = false;
            });
        }

        // Touch start
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            listen(canvas, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.input.pointer = touch_pos(&canvas_clone, &event);
                g.input.pressed = true;
                g.input.start = true;
            });
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            listen(canvas, "touchmove", move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pos) = touch_pos(&canvas_clone, &event) {
                    game.borrow_mut().input.pointer = Some(pos);
                }
            });
        }

        // Touch end
        {
            listen(canvas, "touchend", move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if event.touches().length() == 0 {
                    g.input.pressed = false;
                    g.input.pointer = None;
                }
            });
        }
    }

    fn setup_resize(window: &web_sys::Window, canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        listen(window, "resize", move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height, dpr) = fit_canvas(&window, &canvas);
            game.borrow_mut().resize(width, height, dpr);
            log::debug!("Resized to {}x{} @{}x", width, height, dpr);
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Headless run: loads an optional JSON config, plays a scripted session and
/// logs field statistics
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use blob_drift::renderer::{Recorder, draw_frame};
    use blob_drift::settings::Settings;
    use blob_drift::sim::{SimConfig, SimulationEngine, TickInput, Viewport, tick};
    use glam::Vec2;

    env_logger::init();
    log::info!("Blob Drift (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the interactive version");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(text) => SimConfig::from_json(&text).unwrap_or_else(|e| {
                log::warn!("Invalid config {}: {}; using defaults", path, e);
                SimConfig::default()
            }),
            Err(e) => {
                log::warn!("Cannot read config {}: {}; using defaults", path, e);
                SimConfig::default()
            }
        },
        None => SimConfig::default(),
    };
    let frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1800);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let viewport = Viewport::new(800.0, 600.0);
    let mut engine = SimulationEngine::new(config, viewport, seed);
    let settings = Settings::default();
    let mut recorder = Recorder::new();

    for frame in 0..frames {
        // Sweep the pointer around the center; tap to (re)start every 10 s
        let angle = frame as f32 * 0.01;
        let pointer = viewport.center() + Vec2::new(angle.cos(), angle.sin()) * 150.0;
        let input = TickInput {
            pointer: Some(pointer),
            pressed: frame % 240 < 60,
            start: frame % 600 == 120,
        };
        tick(&mut engine, &input);

        recorder.clear();
        draw_frame(&engine, &settings, &mut recorder);

        if frame % 300 == 0 {
            log::info!(
                "frame {}: {:?} particles={} score={} mass={:.0} draws={}",
                frame,
                engine.phase,
                engine.particles.len(),
                engine.score,
                engine.total_mass(),
                recorder.commands.len()
            );
        }
    }

    println!(
        "Finished {} frames: phase {:?}, {} particles, score {}",
        frames,
        engine.phase,
        engine.particles.len(),
        engine.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
