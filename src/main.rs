//! Frogger entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlImageElement,
        KeyboardEvent,
    };

    use frogger::Settings;
    use frogger::audio::{AudioManager, Music};
    use frogger::consts::*;
    use frogger::platform::{
        self, FrameClock, MessageSink, Panel, TransientMessage, dispatch_events,
    };
    use frogger::renderer::{self, ImageId, Renderer, SpriteRegion};
    use frogger::sim::{Direction, GameEvent, GamePhase, SessionState, tick};

    /// 2D canvas backend over preloaded images
    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
        images: HashMap<ImageId, HtmlImageElement>,
    }

    impl Renderer for CanvasRenderer {
        fn draw(&mut self, region: &SpriteRegion, dest_x: f32, dest_y: f32, width: f32, height: f32) {
            let Some(image) = self.images.get(&region.image) else {
                return;
            };
            let _ = self
                .ctx
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    image,
                    region.src_x as f64,
                    region.src_y as f64,
                    region.width as f64,
                    region.height as f64,
                    dest_x as f64,
                    dest_y as f64,
                    width as f64,
                    height as f64,
                );
        }
    }

    /// Overlay panels and the transient message line
    struct DomMessages {
        document: Document,
        message: TransientMessage,
    }

    impl DomMessages {
        fn set_hidden(&self, id: &str, hidden: bool) {
            let Some(el) = self.document.get_element_by_id(id) else {
                log::warn!("Missing element #{}", id);
                return;
            };
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }

        /// Clear the message line once it has been up long enough
        fn update(&mut self, dt: f32) {
            if self.message.update(dt) {
                if let Some(el) = self.document.get_element_by_id("message") {
                    el.set_text_content(None);
                }
                self.set_hidden("message", true);
            }
        }
    }

    impl MessageSink for DomMessages {
        fn show_message(&mut self, text: &str) {
            self.message.set(text);
            if let Some(el) = self.document.get_element_by_id("message") {
                el.set_text_content(Some(text));
            }
            self.set_hidden("message", false);
        }

        fn show(&mut self, panel: Panel) {
            self.set_hidden(panel.element_id(), false);
        }

        fn hide(&mut self, panel: Panel) {
            self.set_hidden(panel.element_id(), true);
        }
    }

    /// Game instance holding all state
    struct Game {
        state: SessionState,
        clock: FrameClock,
        renderer: CanvasRenderer,
        audio: AudioManager,
        messages: DomMessages,
        settings: Settings,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            let dt = self.clock.delta(time);
            tick(&mut self.state, dt);

            let events = self.state.drain_events();
            dispatch_events(&events, &mut self.audio, &mut self.messages);
            if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
                self.audio.stop_music();
                self.update_final_score();
            }
            self.messages.update(dt);

            renderer::render(&self.state, &mut self.renderer);
            self.update_hud();
        }

        fn update_hud(&self) {
            let document = &self.messages.document;
            let player = &self.state.player;
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", player.score)));
            }
            if let Some(el) = document.get_element_by_id("lives") {
                el.set_text_content(Some(&format!("Lives: {}", player.lives)));
            }
            if let Some(el) = document.get_element_by_id("food") {
                el.set_text_content(Some(&format!("Food: {}/{}", player.food, FOOD_PER_LIFE)));
            }
        }

        fn update_final_score(&self) {
            if let Some(el) = self.messages.document.get_element_by_id("final-score") {
                el.set_text_content(Some(&self.state.player.score.to_string()));
            }
        }

        /// Start button on the menu
        fn play(&mut self) {
            self.state.select_character(self.settings.character);
            self.state.start();
            self.clock.reset();
            platform::enter_play(&mut self.messages);
            self.audio.play_music(Music::Background);
        }

        /// Play again from the game over panel
        fn play_again(&mut self) {
            if self.state.phase != GamePhase::Menu {
                self.state.reset();
                self.clock.reset();
                self.audio.play_music(Music::Background);
            }
        }

        /// Fresh board and back to the menu
        fn start_over(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.state = SessionState::new(seed);
            self.state.select_character(self.settings.character);
            platform::enter_menu(&mut self.messages);
            self.audio.play_music(Music::Start);
            log::info!("Started over with seed: {}", seed);
        }

        fn select_character(&mut self, character: u8) {
            self.state.select_character(character);
            self.settings.character = self.state.player.character;
            self.settings.save();
        }

        fn toggle_music(&mut self) -> bool {
            let muted = self.settings.toggle_music();
            self.audio.set_music_muted(muted);
            self.settings.save();
            muted
        }
    }

    /// Resolve once the image has loaded
    async fn load_image(path: &str) -> Result<HtmlImageElement, JsValue> {
        let image = HtmlImageElement::new()?;
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            image.set_onload(Some(&resolve));
            image.set_onerror(Some(&reject));
        });
        image.set_src(path);
        JsFuture::from(promise).await?;
        image.set_onload(None);
        image.set_onerror(None);
        Ok(image)
    }

    async fn load_images() -> Result<HashMap<ImageId, HtmlImageElement>, JsValue> {
        let mut images = HashMap::new();
        for id in ImageId::ALL {
            let image = load_image(id.path()).await.map_err(|e| {
                log::error!("Failed to load {}", id.path());
                e
            })?;
            images.insert(id, image);
        }
        log::info!("Loaded {} images", images.len());
        Ok(images)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Frogger starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(BOARD_WIDTH as u32);
        canvas.set_height(BOARD_HEIGHT as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let images = load_images().await?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let mut state = SessionState::new(seed);
        state.select_character(settings.character);
        log::info!("Game initialized with seed: {}", seed);

        let mut game = Game {
            state,
            clock: FrameClock::new(),
            renderer: CanvasRenderer { ctx, images },
            audio: AudioManager::from_settings(&settings),
            messages: DomMessages {
                document: document.clone(),
                message: TransientMessage::default(),
            },
            settings,
        };
        platform::enter_menu(&mut game.messages);
        game.audio.play_music(Music::Start);
        set_mute_label(&document, game.settings.music_muted);
        mark_active_character(&document, game.settings.character);
        let game = Rc::new(RefCell::new(game));

        setup_keyboard(game.clone());
        setup_buttons(&document, game.clone());
        setup_character_select(&document, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Frogger running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let direction = Direction::from_key(&event.key())
                .or_else(|| Direction::from_key_code(event.key_code()));
            if let Some(direction) = direction {
                event.prevent_default();
                game.borrow_mut().state.handle_input(direction);
            }
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing button #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click(document, "start-btn", move || game.borrow_mut().play());
        }
        {
            let game = game.clone();
            on_click(document, "startover-btn", move || game.borrow_mut().start_over());
        }
        {
            let game = game.clone();
            on_click(document, "play-again", move || game.borrow_mut().play_again());
        }
        let doc = document.clone();
        on_click(document, "muteBtn", move || {
            let muted = game.borrow_mut().toggle_music();
            set_mute_label(&doc, muted);
        });
    }

    fn set_mute_label(document: &Document, muted: bool) {
        if let Some(btn) = document.get_element_by_id("muteBtn") {
            btn.set_text_content(Some(if muted { "Music: OFF" } else { "Music: ON" }));
        }
    }

    fn character_elements(document: &Document) -> Vec<Element> {
        let Ok(nodes) = document.query_selector_all(".player") else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn mark_active_character(document: &Document, character: u8) {
        for (i, el) in character_elements(document).iter().enumerate() {
            let classes = el.class_list();
            let _ = if i == character as usize {
                classes.add_1("active")
            } else {
                classes.remove_1("active")
            };
        }
    }

    fn setup_character_select(document: &Document, game: Rc<RefCell<Game>>) {
        for (i, el) in character_elements(document).into_iter().enumerate() {
            let game = game.clone();
            let doc = document.clone();
            let character = i.min(NUM_CHARACTERS as usize - 1) as u8;
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().select_character(character);
                mark_active_character(&doc, character);
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Frogger failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use frogger::Settings;
    use frogger::audio::NullAudio;
    use frogger::platform::{MessageSink, Panel, dispatch_events};
    use frogger::sim::{Direction, SessionState, tick};

    /// Message sink that writes to the log
    struct LogMessages;

    impl MessageSink for LogMessages {
        fn show_message(&mut self, text: &str) {
            log::info!("{}", text);
        }

        fn show(&mut self, panel: Panel) {
            log::debug!("Show panel {:?}", panel);
        }

        fn hide(&mut self, panel: Panel) {
            log::debug!("Hide panel {:?}", panel);
        }
    }

    env_logger::init();
    log::info!("Frogger (native) starting...");
    log::info!("Native mode runs a headless session - build for wasm32 to play in the browser");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let settings = Settings::load();
    let mut state = SessionState::new(seed);
    state.select_character(settings.character);
    state.start();

    // One minute at 60 fps, hopping up twice a second
    let mut audio = NullAudio;
    let mut messages = LogMessages;
    let dt = 1.0 / 60.0;
    for frame in 0..3600 {
        if frame % 30 == 0 {
            state.handle_input(Direction::Up);
        }
        tick(&mut state, dt);
        let events = state.drain_events();
        dispatch_events(&events, &mut audio, &mut messages);
        if state.is_game_over() {
            break;
        }
    }

    log::info!(
        "Session over after {:.1}s: score {}, lives {}, game over: {}",
        state.time,
        state.player.score,
        state.player.lives,
        state.is_game_over()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
