//! Waddle Wings entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use waddle_wings::app::{App, UiCommand};
    use waddle_wings::platform::input::should_prevent_default;
    use waddle_wings::platform::storage::LocalStorage;
    use waddle_wings::platform::{Action, InputEvent, action_for};
    use waddle_wings::renderer::{RenderState, tessellate};
    use waddle_wings::sim::Playfield;
    use waddle_wings::ui::{Hud, Panel, Presenter, html};
    use waddle_wings::{Session, Tuning, fit_playfield};

    /// Presenter backed by the page's DOM
    struct DomPresenter {
        document: Document,
    }

    impl DomPresenter {
        fn element(&self, id: &str) -> Option<Element> {
            self.document.get_element_by_id(id)
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.element(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_class(&self, id: &str, class: &str, on: bool) {
            if let Some(el) = self.element(id) {
                let list = el.class_list();
                let _ = if on { list.add_1(class) } else { list.remove_1(class) };
            }
        }
    }

    impl Presenter for DomPresenter {
        fn show_panel(&mut self, panel: &Panel) {
            self.set_text("panel-title", &panel.title);
            if let Some(el) = self.element("panel-content") {
                el.set_inner_html(&html::panel_body(panel));
            }
            self.set_class("panel-backdrop", "hidden", false);
        }

        fn hide_panel(&mut self) {
            self.set_class("panel-backdrop", "hidden", true);
        }

        fn show_hub(&mut self) {
            self.set_class("hub-overlay", "visible", true);
        }

        fn hide_hub(&mut self) {
            self.set_class("hub-overlay", "visible", false);
        }

        fn show_game_over(&mut self, score: u32, best: u32) {
            self.set_text("go-score", &score.to_string());
            self.set_text("go-best", &best.to_string());
            self.set_class("game-over", "hidden", false);
        }

        fn hide_game_over(&mut self) {
            self.set_class("game-over", "hidden", true);
        }

        fn update_hud(&mut self, hud: &Hud) {
            self.set_text("score-display", &hud.score.to_string());
            self.set_text("coins-display", &format!("\u{1f4b0} {}", hud.coins));
            self.set_text("best-display", &format!("\u{1f3c6} {}", hud.best));
            self.set_text("hub-skin-name", hud.skin_name);
        }

        fn notify(&mut self, message: &str) {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(message);
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        app: App<LocalStorage, DomPresenter>,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        last_time: f64,
    }

    impl Game {
        /// Route a raw input event
        fn input(&mut self, event: &InputEvent) {
            match action_for(event) {
                Some(Action::Flap) => {
                    self.app.flap();
                }
                Some(Action::Resize { width, height }) => self.resize(width, height),
                None => {}
            }
        }

        fn resize(&mut self, window_w: f32, window_h: f32) {
            let field = self.app.session_mut().resize(window_w, window_h);
            let (w, h) = physical_size(field);
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(w, h, (field.width, field.height));
            }
            log::info!("Playfield {}x{}", field.width, field.height);
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = tessellate(&self.app.session().scene());
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    fn device_pixel_ratio() -> f64 {
        web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
    }

    fn physical_size(field: Playfield) -> (u32, u32) {
        let dpr = device_pixel_ratio();
        (
            ((field.width as f64) * dpr).round() as u32,
            ((field.height as f64) * dpr).round() as u32,
        )
    }

    fn window_size() -> (f32, f32) {
        let Some(window) = web_sys::window() else {
            return (0.0, 0.0);
        };
        let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        (read(window.inner_width()), read(window.inner_height()))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Waddle Wings starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (win_w, win_h) = window_size();
        let (field_w, field_h) = fit_playfield(win_w, win_h);
        let field = Playfield::new(field_w, field_h);
        let (width, height) = physical_size(field);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(LocalStorage::new(), Tuning::default(), field, seed);
        let presenter = DomPresenter {
            document: document.clone(),
        };
        let app = App::new(session, presenter);
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let render_state = match create_renderer(&instance, &canvas, width, height, field).await {
            Ok(state) => Some(state),
            Err(e) => {
                log::error!("Rendering unavailable: {}", e);
                None
            }
        };

        let game = Rc::new(RefCell::new(Game {
            app,
            render_state,
            canvas: canvas.clone(),
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());

        request_animation_frame(game);

        log::info!("Waddle Wings running!");
    }

    async fn create_renderer(
        instance: &wgpu::Instance,
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        field: Playfield,
    ) -> Result<RenderState, String> {
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| e.to_string())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| e.to_string())?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, (field.width, field.height))
            .await
            .map_err(|e| e.to_string())
    }

    /// Forward an input event, cancelling the browser default where needed
    fn dispatch(game: &Rc<RefCell<Game>>, event: InputEvent, raw: &web_sys::Event) {
        if should_prevent_default(&event) {
            raw.prevent_default();
        }
        game.borrow_mut().input(&event);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Mouse down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                dispatch(&game, InputEvent::PointerDown, &event);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                dispatch(&game, InputEvent::TouchStart, &event);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let input = InputEvent::KeyDown { code: event.code() };
                dispatch(&game, input, &event);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let (width, height) = window_size();
                dispatch(&game, InputEvent::Resize { width, height }, &event);
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in UiCommand::ELEMENT_IDS {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{}", id);
                continue;
            };
            let Some(command) = UiCommand::from_element_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().app.handle(command.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Panel buttons are re-rendered, so listen on the container
        if let Some(content) = document.get_element_by_id("panel-content") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                    return;
                };
                let Ok(Some(btn)) = target.closest("button[data-action]") else {
                    return;
                };
                let action = btn.get_attribute("data-action").unwrap_or_default();
                let id = btn.get_attribute("data-id");
                match waddle_wings::ui::PanelAction::parse(&action, id.as_deref()) {
                    Some(action) => game.borrow_mut().app.handle(UiCommand::Panel(action)),
                    None => log::warn!("Unknown panel action {:?}", action),
                }
            });
            let _ =
                content.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Clicking the dimmed backdrop closes the panel
        if let Some(backdrop) = document.get_element_by_id("panel-backdrop") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let on_backdrop = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .is_some_and(|el| el.id() == "panel-backdrop");
                if on_backdrop {
                    game.borrow_mut().app.handle(UiCommand::ClosePanel);
                }
            });
            let _ = backdrop
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        {
            let mut g = game.borrow_mut();

            // Delta time; the session clamps it
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.app.frame(dt);
            g.render();
        }

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
    use std::time::{SystemTime, UNIX_EPOCH};

    use waddle_wings::app::{App, UiCommand};
    use waddle_wings::platform::storage::FileStore;
    use waddle_wings::sim::Playfield;
    use waddle_wings::ui::LogPresenter;
    use waddle_wings::{Session, Tuning};

    /// Simulated frame length and per-run cap for the demo
    const FRAME: f32 = 1.0 / 60.0;
    const MAX_RUN_SECONDS: f32 = 120.0;
    const DEMO_RUNS: u32 = 3;
    const SAVE_FILE: &str = "waddle-wings-save.json";

    env_logger::init();
    log::info!("Waddle Wings (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }),
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let store = FileStore::open(SAVE_FILE);
    log::info!("Saving progress to {}", store.path().display());

    let mut session = Session::new(store, tuning, Playfield::default(), seed);
    session.set_autopilot(true);
    let mut app = App::new(session, LogPresenter);

    app.handle(UiCommand::ClaimDaily);

    for run in 1..=DEMO_RUNS {
        app.handle(if run == 1 { UiCommand::Play } else { UiCommand::Restart });
        let mut elapsed = 0.0;
        while app.is_playing() && elapsed < MAX_RUN_SECONDS {
            app.frame(FRAME);
            elapsed += FRAME;
        }
        let hud = app.session().hud();
        let state = app.session().state();
        println!(
            "Run {}: score {} after {:.1}s, +{} coins (balance {}, best {})",
            run, state.score, elapsed, state.run_coins, hud.coins, hud.best
        );
    }

    app.handle(UiCommand::Menu);
    let meta = app.session().meta();
    println!(
        "Done: {} runs played, best {}, {} coins",
        meta.runs_played(),
        meta.best_score(),
        meta.coins()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
