//! Ball Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, KeyboardEvent};

    use ball_dash::render::{Hud, Scene};
    use ball_dash::sim::{GameSession, TickInput, step};
    use ball_dash::{Tuning, project};

    /// Game instance holding session and DOM handles
    struct Game {
        session: GameSession,
        input: TickInput,
        last_time: f64,
        document: Document,
        wrapper: HtmlElement,
        score_el: HtmlElement,
        ball_el: HtmlElement,
        obstacle_els: HashMap<u32, HtmlElement>,
        end_el: Option<HtmlElement>,
        hud: Hud,
    }

    fn create_div(document: &Document, parent: &HtmlElement) -> Result<HtmlElement, JsValue> {
        let el = document.create_element("div")?.dyn_into::<HtmlElement>()?;
        parent.append_child(&el)?;
        Ok(el)
    }

    fn place(el: &HtmlElement, rect: &ball_dash::sim::Rect) -> Result<(), JsValue> {
        let style = el.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", &format!("{}px", rect.x))?;
        style.set_property("top", &format!("{}px", rect.y))?;
        style.set_property("width", &format!("{}px", rect.width))?;
        style.set_property("height", &format!("{}px", rect.height))?;
        Ok(())
    }

    impl Game {
        fn new(document: Document, wrapper: HtmlElement) -> Result<Self, JsValue> {
            let seed = js_sys::Date::now() as u64;
            let width = wrapper.client_width() as f32;
            let session = GameSession::new(seed, width, Tuning::load());

            let score_el = create_div(&document, &wrapper)?;
            score_el.set_id("score");
            let ball_el = create_div(&document, &wrapper)?;
            ball_el.set_id("ball");

            Ok(Self {
                session,
                input: TickInput::default(),
                last_time: js_sys::Date::now(),
                document,
                wrapper,
                score_el,
                ball_el,
                obstacle_els: HashMap::new(),
                end_el: None,
                hud: Hud::default(),
            })
        }

        fn viewport(&self) -> Vec2 {
            Vec2::new(
                self.wrapper.client_width() as f32,
                self.wrapper.client_height() as f32,
            )
        }

        fn on_space(&mut self) {
            if self.session.is_running() {
                self.input.jump = true;
            } else {
                self.input.restart = true;
            }
        }

        /// Run due ticks and redraw
        fn frame(&mut self) -> Result<(), JsValue> {
            let now = js_sys::Date::now();
            let elapsed = ((now - self.last_time).max(0.0) / 1000.0).min(0.1);
            self.last_time = now;

            if let Some(reason) = step(
                &mut self.session,
                &self.input,
                std::time::Duration::from_secs_f64(elapsed),
            ) {
                log::info!("Run ended: {}", reason.as_str());
            }
            self.input.clear();

            let events = self.session.drain_events();
            if self.hud.apply_all(&events) {
                self.render_hud()?;
            }
            let scene = project(&self.session, self.viewport());
            self.render(&scene)
        }

        /// Score text and end overlay, redrawn only when an event changed them
        fn render_hud(&mut self) -> Result<(), JsValue> {
            self.score_el.set_text_content(Some(&self.hud.score.to_string()));
            match (&self.hud.end_screen, &self.end_el) {
                (Some(end), None) => {
                    let el = create_div(&self.document, &self.wrapper)?;
                    el.set_class_name("end-screen");
                    el.set_inner_html(&format!("<p>{}</p> <p>{}</p>", end.title, end.prompt));
                    self.end_el = Some(el);
                }
                (None, Some(el)) => {
                    el.remove();
                    self.end_el = None;
                }
                _ => {}
            }
            Ok(())
        }

        /// Ball and obstacle geometry
        fn render(&mut self, scene: &Scene) -> Result<(), JsValue> {
            place(&self.ball_el, &scene.ball)?;

            let mut stale: Vec<u32> = self.obstacle_els.keys().copied().collect();
            for (id, rect) in &scene.obstacles {
                stale.retain(|s| s != id);
                let el = match self.obstacle_els.get(id) {
                    Some(el) => el.clone(),
                    None => {
                        let el = create_div(&self.document, &self.wrapper)?;
                        el.set_class_name("obstacle");
                        self.obstacle_els.insert(*id, el.clone());
                        el
                    }
                };
                place(&el, rect)?;
            }
            for id in stale {
                if let Some(el) = self.obstacle_els.remove(&id) {
                    el.remove();
                }
            }
            Ok(())
        }
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.key() == " " {
                event.prevent_default();
                game.borrow_mut().on_space();
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_resize(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            let width = g.wrapper.client_width() as f32;
            g.input.resize = Some(width);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_loop(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let interval_ms = (game.borrow().session.tuning.tick_interval * 1000.0).round() as i32;
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = game.borrow_mut().frame() {
                log::warn!("Frame error: {:?}", e);
            }
        });
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms.max(1),
        )?;
        closure.forget();
        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let wrapper = document
            .query_selector(".game-wrap")?
            .ok_or("missing .game-wrap")?
            .dyn_into::<HtmlElement>()?;

        let game = Rc::new(RefCell::new(Game::new(document, wrapper)?));
        game.borrow_mut().session.start();
        log::info!("Ball Dash started");

        setup_keyboard(&window, game.clone())?;
        setup_resize(&window, game.clone())?;
        setup_loop(&window, game)
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ball_dash::render::Hud;
    use ball_dash::sim::{EndReason, GameSession, TickInput, step};
    use ball_dash::{Autopilot, Tuning};

    env_logger::init();
    log::info!("Ball Dash (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - build for wasm32 to play");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::load_from_path(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Could not load tuning from {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let dt = tuning.tick_duration();
    let mut session = GameSession::new(seed, ball_dash::consts::DEFAULT_VIEWPORT_WIDTH, tuning);
    session.start();

    let pilot = Autopilot::default();
    let mut input = TickInput::default();
    let mut hud = Hud::default();
    let reason = loop {
        pilot.drive(&session, &mut input);
        let ended = step(&mut session, &input, dt);
        input.clear();
        hud.apply_all(&session.drain_events());
        if let Some(reason) = ended {
            break reason;
        }
    };

    if reason == EndReason::Collision {
        log::warn!("Autopilot crashed on run {}", session.runs);
    }
    let title = hud.end_screen.map(|end| end.title).unwrap_or_default();
    println!("{} Score {} after {} ticks", title, hud.score, session.ticks);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
