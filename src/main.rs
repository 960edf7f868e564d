//! Flappy entry point
//!
//! Handles platform-specific initialization and drives the simulation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, KeyboardEvent, PointerEvent};

    use flappy::persistence::LocalStorageStore;
    use flappy::platform::Clock;
    use flappy::sim::{Phase, SimEvent, SimulationLoop};
    use flappy::SimConfig;

    /// Game instance holding all state
    struct Game {
        sim: SimulationLoop,
        clock: Clock,
        viewport: (f32, f32),
    }

    impl Game {
        fn new() -> Self {
            Self {
                sim: SimulationLoop::new(SimConfig::default(), Box::new(LocalStorageStore::new())),
                clock: Clock::new(),
                viewport: (0.0, 0.0),
            }
        }

        /// Tap/click/space: start from Ready, jump while Active
        fn press(&mut self) {
            match self.sim.phase() {
                Phase::Ready => {
                    let now = self.clock.now();
                    self.sim.start(now);
                }
                Phase::Active => self.sim.jump(),
                Phase::Stopped => {}
            }
        }

        /// Advance the simulation to the current time
        fn update(&mut self) {
            let now = self.clock.now();
            let (w, h) = self.viewport;
            self.sim.tick(now, w, h);

            for event in self.sim.drain_events() {
                match event {
                    SimEvent::NewBest { best } => log::info!("New best: {}", best),
                    SimEvent::Stopped { cause } => log::info!("Game over ({:?})", cause),
                    _ => {}
                }
            }
        }

        /// Position sprites and update HUD elements in DOM
        fn render(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            let snap = self.sim.snapshot();
            let config = self.sim.config();
            let (w, h) = self.viewport;

            if let Some(el) = document.get_element_by_id("player") {
                let half = config.sprite_size / 2.0;
                set_box(
                    &el,
                    snap.player_position.x - half,
                    snap.player_position.y - half,
                    config.sprite_size,
                    config.sprite_size,
                );
            }

            // Pipes are drawn exactly where they collide
            let obstacle = &self.sim.state().obstacle;
            let segments = [
                ("pipe-top", obstacle.top_rect(w, config.obstacle_width)),
                ("pipe-bottom", obstacle.bottom_rect(w, h, config)),
            ];
            for (id, rect) in segments {
                if let Some(el) = document.get_element_by_id(id) {
                    set_box(&el, rect.min.x, rect.min.y, rect.width(), rect.height());
                }
            }

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&snap.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                el.set_text_content(Some(&snap.best_score.to_string()));
            }

            // Play button only while Ready, result panel only while Stopped
            set_visible(&document, "play-btn", snap.phase == Phase::Ready);
            set_visible(&document, "result", snap.phase == Phase::Stopped);
            if snap.phase == Phase::Stopped {
                if let Some(el) = document.get_element_by_id("result-score") {
                    el.set_text_content(Some(&format!("Score: {}", snap.score)));
                }
                if let Some(el) = document.get_element_by_id("result-best") {
                    el.set_text_content(Some(&format!("Best: {}", snap.best_score)));
                }
            }
        }
    }

    fn set_box(el: &Element, x: f32, y: f32, w: f32, h: f32) {
        let style = format!(
            "position:absolute;left:{:.1}px;top:{:.1}px;width:{:.1}px;height:{:.1}px",
            x, y, w, h
        );
        let _ = el.set_attribute("style", &style);
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Current size of the playfield element
    fn measure_viewport(document: &web_sys::Document) -> (f32, f32) {
        document
            .get_element_by_id("game")
            .map(|el| (el.client_width() as f32, el.client_height() as f32))
            .unwrap_or((0.0, 0.0))
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let game = Rc::new(RefCell::new(Game::new()));
        game.borrow_mut().viewport = measure_viewport(&document);

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        request_animation_frame(game);

        log::info!("Flappy running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Tap/click on the playfield
        if let Some(field) = document.get_element_by_id("game") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                game.borrow_mut().press();
            });
            let _ = field
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" => g.press(),
                    "Enter" => {
                        if g.sim.phase() == Phase::Stopped {
                            g.sim.reset();
                        } else {
                            g.press();
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Viewport resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let document = web_sys::window().unwrap().document().unwrap();
                game.borrow_mut().viewport = measure_viewport(&document);
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("play-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                event.stop_propagation();
                let mut g = game.borrow_mut();
                let now = g.clock.now();
                g.sim.start(now);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                event.stop_propagation();
                game.borrow_mut().sim.reset();
                log::info!("Game reset");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use flappy::consts::DEMO_FPS;
    use flappy::persistence::{JsonFileStore, MemoryStore};
    use flappy::platform::Clock;
    use flappy::sim::{Phase, SimEvent, SimulationLoop, autopilot};
    use flappy::{ScoreStore, SimConfig};

    /// Viewport the headless demo plays in
    const VIEWPORT: (f32, f32) = (400.0, 800.0);
    const SESSIONS: u32 = 3;
    /// Give up on a session after this much simulated time
    const SESSION_LIMIT_SECS: f64 = 120.0;

    fn load_config() -> SimConfig {
        let Some(path) = std::env::args().nth(1) else {
            return SimConfig::default();
        };
        match SimConfig::load_from_file(&path) {
            Ok(config) => {
                log::info!("Loaded tuning from {}", path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                SimConfig::default()
            }
        }
    }

    fn open_store() -> Box<dyn ScoreStore> {
        match JsonFileStore::default_path() {
            Some(path) => {
                log::info!("Best score file: {:?}", path);
                Box::new(JsonFileStore::new(path))
            }
            None => {
                log::warn!("No data directory, best score will not outlive this run");
                Box::new(MemoryStore::new())
            }
        }
    }

    /// Autopilot sessions on a stepped clock
    pub fn run() {
        let config = load_config();
        let mut sim = SimulationLoop::new(config.clone(), open_store());
        let (w, h) = VIEWPORT;
        let wall = Clock::new();
        let frame_dt = 1.0 / DEMO_FPS;
        let mut now = 0.0;

        for session in 1..=SESSIONS {
            sim.reset();
            sim.start(now);
            let started = now;

            while sim.phase() == Phase::Active && now - started < SESSION_LIMIT_SECS {
                if autopilot::should_jump(&sim.snapshot(), &config) {
                    sim.jump();
                }
                now += frame_dt;
                sim.tick(now, w, h);

                for event in sim.drain_events() {
                    match event {
                        SimEvent::Scored { score } => log::debug!("Score {}", score),
                        SimEvent::NewBest { best } => log::info!("New best: {}", best),
                        _ => {}
                    }
                }
            }

            let snap = sim.snapshot();
            println!(
                "Session {}: score {} (best {}) after {:.1}s{}",
                session,
                snap.score,
                snap.best_score,
                now - started,
                if snap.phase == Phase::Stopped { "" } else { ", still flying" }
            );
        }

        log::info!("Simulated {:.1}s in {:.3}s", now, wall.now());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy (native) starting...");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(test)]
mod tests {
    /// Element ids the wasm host looks up
    const HOST_IDS: [&str; 12] = [
        "game",
        "player",
        "pipe-top",
        "pipe-bottom",
        "hud-score",
        "hud-best",
        "play-btn",
        "result",
        "result-score",
        "result-best",
        "reset-btn",
        "loading",
    ];

    #[test]
    fn test_page_defines_host_ids() {
        let page = include_str!("../index.html");
        for id in HOST_IDS {
            assert!(page.contains(&format!("id=\"{id}\"")), "index.html lacks #{id}");
        }
        assert!(page.contains("class=\"hud-value\""));
        assert!(page.contains(".hidden"));
    }
}
