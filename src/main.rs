//! Neon Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, TouchEvent};

    use neon_snake::audio::AudioManager;
    use neon_snake::game::{Game, TimerTicket};
    use neon_snake::persistence::{KeyValueStore, LocalStorageStore, MemoryStore};
    use neon_snake::platform::ViewportSizeProvider;
    use neon_snake::renderer::CanvasRenderer;

    type WebGame = Game<CanvasRenderer, AudioManager>;
    type Shared = Rc<RefCell<WebGame>>;

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn element(id: &str) -> Option<Element> {
        document()?.get_element_by_id(id)
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = element(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = element(id) {
            el.set_text_content(Some(text));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Neon Snake starting...");

        let canvas: HtmlCanvasElement = element("game-canvas")
            .ok_or_else(|| JsValue::from_str("no #game-canvas element"))?
            .dyn_into()?;
        let renderer = CanvasRenderer::new(canvas)
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?;
        let viewport = renderer.viewport_size();

        let store: Box<dyn KeyValueStore> = match LocalStorageStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{e}; scores will not persist");
                Box::new(MemoryStore::new())
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::load(
            store,
            renderer,
            AudioManager::new(),
            viewport,
            seed,
        )));

        update_hud(&game.borrow());
        render_highscores(&game.borrow());

        setup_buttons(game.clone());
        setup_keyboard(game.clone());
        setup_touch(game.clone());
        setup_resize(game);

        log::info!("Neon Snake running!");
        Ok(())
    }

    fn start_game(game: &Shared) {
        let ticket = {
            let mut g = game.borrow_mut();
            g.audio().resume();
            g.start()
        };
        set_hidden("start-screen", true);
        set_hidden("game-over-screen", true);
        update_hud(&game.borrow());
        schedule(game.clone(), ticket);
    }

    /// Queue the next tick. The callback is bound to the ticket's run, so a
    /// restart in between turns it into a no-op.
    fn schedule(game: Shared, ticket: TimerTicket) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move || {
            let next = game.borrow_mut().on_timer(ticket.run_id);
            match next {
                Some(next) => {
                    update_hud(&game.borrow());
                    schedule(game, next);
                }
                None => {
                    let current = game.borrow().engine().run_id();
                    if current == ticket.run_id {
                        show_game_over(&game.borrow());
                    }
                }
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ticket.delay_ms as i32,
        );
        closure.forget();
    }

    fn update_hud(g: &WebGame) {
        let run = g.run_state();
        set_text("score", &run.score.to_string());
        set_text("level", &run.level.to_string());
    }

    fn show_game_over(g: &WebGame) {
        update_hud(g);
        set_text("final-score", &g.run_state().score.to_string());
        set_hidden("highscore-entry", g.pending_score().is_none());
        render_highscores(g);
        set_hidden("game-over-screen", false);
    }

    fn render_highscores(g: &WebGame) {
        let Some(list) = element("highscore-list") else {
            return;
        };
        let Some(doc) = document() else { return };
        list.set_inner_html("");
        for entry in g.highscores().entries() {
            if let Ok(item) = doc.create_element("li") {
                item.set_text_content(Some(&format!("{} - {}", entry.name, entry.score)));
                let _ = list.append_child(&item);
            }
        }
    }

    fn on_click(id: &str, mut handler: impl FnMut() + 'static) {
        let Some(el) = element(id) else {
            log::warn!("Missing #{id} element");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| handler());
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Shared) {
        {
            let game = game.clone();
            on_click("start-btn", move || start_game(&game));
        }
        {
            let game = game.clone();
            on_click("restart-btn", move || start_game(&game));
        }
        on_click("save-score-btn", move || {
            let name = element("player-name")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();
            let mut g = game.borrow_mut();
            if let Some(rank) = g.submit_name(&name) {
                log::info!("High score saved at rank {rank}");
            }
            set_hidden("highscore-entry", true);
            render_highscores(&g);
        });
    }

    fn setup_keyboard(game: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            if key.starts_with("Arrow") {
                // Keep arrows from scrolling the page
                event.prevent_default();
            }
            game.borrow_mut().on_key(&key);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_touch(game: Shared) {
        let Some(doc) = document() else { return };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut()
                        .on_touch_start(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let _ = doc.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Prevent scrolling while playing
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if game.borrow().is_running() {
                    event.prevent_default();
                }
            });
            let _ = doc.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.changed_touches().get(0) {
                    game.borrow_mut()
                        .on_touch_end(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let _ = doc.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            let (w, h) = g.renderer().viewport_size();
            g.on_resize(w, h);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use neon_snake::Game;
    use neon_snake::audio::SilentAudio;
    use neon_snake::persistence::FileStore;
    use neon_snake::platform::{FixedViewport, ViewportSizeProvider};
    use neon_snake::renderer::NullRenderer;

    env_logger::init();
    log::info!("Neon Snake (native) starting...");
    log::info!("The playable build targets the browser - run with `trunk serve`");

    let data_dir = std::env::var("NEON_SNAKE_DATA_DIR").unwrap_or_else(|_| ".neon-snake".into());
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    let mut game = Game::load(
        Box::new(FileStore::new(data_dir)),
        NullRenderer,
        SilentAudio,
        FixedViewport::new(400, 400).viewport_size(),
        seed,
    );

    println!("High scores:");
    if game.highscores().is_empty() {
        println!("  (none yet)");
    }
    for (i, entry) in game.highscores().entries().iter().enumerate() {
        println!("  {}. {:<12} {}", i + 1, entry.name, entry.score);
    }

    // Headless smoke run: hold the starting heading until the snake crashes
    let mut ticket = Some(game.start());
    while let Some(t) = ticket {
        ticket = game.on_timer(t.run_id);
    }
    let run = game.run_state();
    println!(
        "Headless run: score {}, level {}, {} ticks",
        run.score,
        run.level,
        game.engine().ticks()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
