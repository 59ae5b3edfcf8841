//! Flappy Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use flappy_rush::renderer::{RenderState, build_scene};
    use flappy_rush::sim::GamePhase;
    use flappy_rush::ui::{Hud, Overlay, SpeedUpBanner};
    use flappy_rush::{Session, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        banner: SpeedUpBanner,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(session: Session) -> Self {
            Self {
                session,
                render_state: None,
                banner: SpeedUpBanner::default(),
                last_phase: GamePhase::Idle,
            }
        }

        /// Advance and draw one display frame
        fn frame(&mut self, time: f64) {
            let view = self.session.frame(time);
            self.banner.observe(&view);

            if view.phase != self.last_phase {
                if view.phase == GamePhase::Running {
                    self.banner.clear();
                }
                self.last_phase = view.phase;
            }

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&build_scene(&view)) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            update_hud(&Hud::from_view(&view, &self.banner, time));
        }
    }

    fn set_hidden(document: &web_sys::Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn set_text(document: &web_sys::Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    /// Update HUD elements in DOM
    fn update_hud(hud: &Hud) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        set_text(&document, "#hud-score .hud-value", &hud.score);
        set_text(&document, "#hud-speed .hud-value", &hud.speed);
        set_hidden(&document, "speed-up", !hud.speed_up);

        set_hidden(&document, "start-screen", hud.overlay != Overlay::Start);
        match &hud.overlay {
            Overlay::GameOver { score, max_speed } => {
                set_hidden(&document, "game-over", false);
                set_text(&document, "#final-score", &score.to_string());
                set_text(&document, "#final-speed", max_speed);
            }
            _ => set_hidden(&document, "game-over", true),
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        set_hidden(&document, "loading", true);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = Tuning::load();
        let world_size = (tuning.world_width, tuning.world_height);
        let seed = js_sys::Date::now() as u64;
        let session = match Session::new(tuning, seed) {
            Ok(session) => session,
            Err(e) => {
                log::warn!("Rejected tuning ({}), using defaults", e);
                Session::new(Tuning::default(), seed).expect("default tuning is valid")
            }
        };
        let game = Rc::new(RefCell::new(Game::new(session)));
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, world_size).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_visibility(game.clone());

        request_animation_frame(game);

        log::info!("Flappy Rush running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click - jump / start / restart
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().session.jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().session.jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        g.session.jump();
                    }
                    "Enter" => g.session.start(),
                    "i" | "I" => g.session.toggle_autopilot(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Hidden tabs stop getting animation frames; don't replay the gap on return
    fn setup_visibility(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Visible {
                game.borrow_mut().session.suspend();
                log::info!("Tab visible again, resuming clock");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_rush::consts::SIM_DT_MS;
    use flappy_rush::sim::{GameEvent, GamePhase};
    use flappy_rush::{Session, Tuning};

    env_logger::init();
    log::info!("Flappy Rush (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);

    let mut session = match Session::new(Tuning::load(), seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            std::process::exit(1);
        }
    };
    session.toggle_autopilot();

    // Two simulated minutes, or until the pilot crashes
    let frames = (120_000.0 / SIM_DT_MS) as u64;
    for i in 0..=frames {
        let now = i as f64 * SIM_DT_MS;
        let view = session.frame(now);
        for event in session.events() {
            if let GameEvent::SpeedUp { multiplier, at } = event {
                log::info!("{:>7.0} ms  speed {:.1}x", at, multiplier);
            }
        }
        if view.phase == GamePhase::Over {
            break;
        }
    }

    let world = session.world();
    println!(
        "seed {}: score {} after {} ticks at {:.1}x ({:?})",
        seed, world.score, world.frame_count, world.speed_multiplier, world.phase
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
