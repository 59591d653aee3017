//! Drift Countdown entry point
//!
//! Handles platform-specific initialization and runs the page loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Visibility gate for the page's single requestAnimationFrame chain.
///
/// The chain re-arms itself every frame for the page lifetime; hiding the
/// tab only idles the per-frame work. The visibility handler must never
/// arm frames itself: a hidden tab's pending callback is paused by the
/// browser, not dropped, so arming on resume would stack a second chain.
#[allow(dead_code)] // used by the wasm driver and tests
#[derive(Debug, Clone, Copy)]
struct FrameGate {
    running: bool,
}

#[allow(dead_code)] // used by the wasm driver and tests
impl FrameGate {
    fn new() -> Self {
        Self { running: true }
    }

    /// visibilitychange handler: flip the gate, nothing else
    fn set_hidden(&mut self, hidden: bool) {
        self.running = !hidden;
    }

    /// Whether the current frame callback should do any work
    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, Element, HtmlAudioElement, HtmlInputElement, MouseEvent};

    use drift_countdown::consts::*;
    use drift_countdown::countdown;
    use drift_countdown::links::NAV_LINKS;
    use drift_countdown::minigame::{Mark, Outcome, TicTacToe};
    use drift_countdown::player::Playback;
    use drift_countdown::settings::Settings;
    use drift_countdown::sim::{Bounds, Sprite, SpriteField};

    use crate::FrameGate;

    /// Page instance holding all state
    struct Page {
        field: SpriteField,
        game: TicTacToe,
        playback: Playback,
        settings: Settings,
        /// One element per sprite, index-aligned with the field
        sprite_els: Vec<Element>,
        /// Live marker elements keyed by marker id
        marker_els: Vec<(String, Element)>,
        /// Idles per-frame work while the tab is hidden
        gate: FrameGate,
    }

    impl Page {
        fn new(seed: u64, bounds: Bounds) -> Self {
            let settings = Settings::load();
            let mut playback = Playback::new();
            playback.set_volume(settings.music_volume);
            Self {
                field: SpriteField::new(SPRITE_COUNT, bounds, seed),
                game: TicTacToe::new(),
                playback,
                settings,
                sprite_els: Vec::new(),
                marker_els: Vec::new(),
                gate: FrameGate::new(),
            }
        }
    }

    fn window() -> web_sys::Window {
        web_sys::window().expect("no window")
    }

    fn document() -> Document {
        window().document().expect("no document")
    }

    /// Current viewport dimensions; re-read every frame so resizes take
    /// effect immediately
    fn viewport_bounds() -> Bounds {
        let w = window()
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let h = window()
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Bounds::new(w as f32, h as f32)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Drift Countdown starting...");

        let document = document();

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let page = Rc::new(RefCell::new(Page::new(seed, viewport_bounds())));
        log::info!("Sprite field initialized with seed: {}", seed);

        create_sprite_elements(&page);
        render_sidebar(&document);
        render_countdown(&document);
        render_minigame(&page.borrow());
        update_play_button(&page.borrow());

        setup_audio(page.clone());
        setup_minigame(page.clone());
        setup_countdown_timer();
        setup_marker_sweep(page.clone());
        setup_visibility_gate(page.clone());

        // Start the frame loop
        request_animation_frame(page);

        log::info!("Drift Countdown running!");
    }

    fn request_animation_frame(page: Rc<RefCell<Page>>) {
        let closure = Closure::once(move |time: f64| {
            page_loop(page, time);
        });
        let _ = window().request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn page_loop(page: Rc<RefCell<Page>>, _time: f64) {
        {
            let mut p = page.borrow_mut();
            if p.gate.is_running() && p.settings.sprites {
                p.field.advance(viewport_bounds(), js_sys::Date::now());
                sync_sprites(&p);
                sync_markers(&mut p);
            }
        }

        // Always re-arm: one chain for the page lifetime
        request_animation_frame(page);
    }

    /// Idle the per-frame work while the tab is hidden.
    ///
    /// Only the gate flips here; the frame chain keeps re-arming itself in
    /// `page_loop`.
    fn setup_visibility_gate(page: Rc<RefCell<Page>>) {
        let document = document();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
            page.borrow_mut().gate.set_hidden(hidden);
            if hidden {
                log::info!("Tab hidden; frame loop idle");
            } else {
                log::info!("Tab visible; frame loop active");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Build one <img> per sprite inside the #sprite-field layer
    fn create_sprite_elements(page: &Rc<RefCell<Page>>) {
        let document = document();
        let Some(container) = document.get_element_by_id("sprite-field") else {
            log::warn!("No #sprite-field element; sprite layer disabled");
            return;
        };

        let mut els = Vec::new();
        for sprite in page.borrow().field.sprites() {
            let Ok(el) = document.create_element("img") else {
                continue;
            };
            let _ = el.set_attribute("src", &format!("/images/{}.png", sprite.image_index));
            let _ = el.set_attribute("alt", &format!("Sprite {}", sprite.image_index));
            let _ = el.set_attribute("class", "floating-sprite");
            let _ = el.set_attribute("style", &sprite_style(sprite));
            let _ = container.append_child(&el);
            els.push(el);
        }
        page.borrow_mut().sprite_els = els;
    }

    fn sprite_style(sprite: &Sprite) -> String {
        format!(
            "left:{}px;top:{}px;width:{}px;height:{}px",
            sprite.pos.x, sprite.pos.y, SPRITE_SIZE, SPRITE_SIZE
        )
    }

    fn sync_sprites(p: &Page) {
        for (sprite, el) in p.field.sprites().iter().zip(&p.sprite_els) {
            let _ = el.set_attribute("style", &sprite_style(sprite));
        }
    }

    /// Reconcile marker elements with the field's live marker set
    fn sync_markers(p: &mut Page) {
        let Some(layer) = document().get_element_by_id("collision-layer") else {
            return;
        };
        let Page {
            field,
            marker_els,
            settings,
            ..
        } = p;

        marker_els.retain(|(id, el)| {
            let alive = field.markers().iter().any(|m| &m.id == id);
            if !alive {
                el.remove();
            }
            alive
        });

        if !settings.collision_text {
            return;
        }

        let document = document();
        for marker in field.markers() {
            if marker_els.iter().any(|(id, _)| *id == marker.id) {
                continue;
            }
            let Ok(el) = document.create_element("div") else {
                continue;
            };
            let _ = el.set_attribute("class", "collision-text");
            let _ = el.set_attribute(
                "style",
                &format!("left:{}px;top:{}px", marker.pos.x - 20.0, marker.pos.y - 20.0),
            );
            el.set_text_content(Some("DN"));
            let _ = layer.append_child(&el);
            marker_els.push((marker.id.clone(), el));
        }
    }

    fn setup_marker_sweep(page: Rc<RefCell<Page>>) {
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut p = page.borrow_mut();
            p.field.expire_markers(js_sys::Date::now());
            sync_markers(&mut p);
        });
        window()
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                MARKER_SWEEP_MS,
            )
            .expect("Failed to set marker sweep interval");
        closure.forget();
    }

    fn setup_countdown_timer() {
        let closure = Closure::<dyn FnMut()>::new(move || {
            render_countdown(&document());
        });
        window()
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                1_000,
            )
            .expect("Failed to set countdown interval");
        closure.forget();
    }

    /// Rebuild the per-zone countdown grid
    fn render_countdown(document: &Document) {
        let Some(grid) = document.get_element_by_id("countdown-grid") else {
            return;
        };

        let now = js_sys::Date::now() as i64;
        let mut html = String::new();
        for zone in countdown::recompute(now) {
            let class = if zone.is_past { "zone-card past" } else { "zone-card" };
            let elapsed = if zone.is_past {
                "<div class=\"elapsed\">+ ELAPSED</div>"
            } else {
                ""
            };
            html.push_str(&format!(
                "<div class=\"{class}\"><h3>{}</h3><span class=\"zone-name\">{}</span>{elapsed}\
                 <div class=\"zone-time\">{:02}d {:02}:{:02}:{:02}</div></div>",
                zone.label,
                zone.name,
                zone.time.days,
                zone.time.hours,
                zone.time.minutes,
                zone.time.seconds,
            ));
        }
        grid.set_inner_html(&html);
    }

    fn render_sidebar(document: &Document) {
        let Some(nav) = document.get_element_by_id("sidebar-links") else {
            return;
        };
        let mut html = String::new();
        for link in NAV_LINKS {
            html.push_str(&format!(
                "<a class=\"nav-link\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">\
                 <span class=\"nav-icon\">{}</span>{}</a>",
                link.url, link.icon, link.name
            ));
        }
        nav.set_inner_html(&html);
    }

    /// Image asset shown for each mark (same sprite set as the field)
    fn mark_asset(mark: Mark) -> u32 {
        match mark {
            Mark::X => 3,
            Mark::O => 9,
        }
    }

    fn setup_minigame(page: Rc<RefCell<Page>>) {
        let document = document();

        for cell in 0..9 {
            let Some(btn) = document.get_element_by_id(&format!("ttt-{cell}")) else {
                continue;
            };
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let accepted = page.borrow_mut().game.play(cell);
                if accepted {
                    render_minigame(&page.borrow());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("ttt-reset") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                page.borrow_mut().game.reset();
                render_minigame(&page.borrow());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn render_minigame(p: &Page) {
        let document = document();

        for (i, cell) in p.game.board().iter().enumerate() {
            let Some(el) = document.get_element_by_id(&format!("ttt-{i}")) else {
                continue;
            };
            match cell {
                Some(mark) => el.set_inner_html(&format!(
                    "<img src=\"/images/{}.png\" alt=\"{}\">",
                    mark_asset(*mark),
                    mark.as_str()
                )),
                None => el.set_inner_html(""),
            }
        }

        if let Some(el) = document.get_element_by_id("ttt-status") {
            let text = match p.game.outcome() {
                Some(Outcome::Win(mark)) => format!("Winner: {}", mark.as_str()),
                Some(Outcome::Draw) => "It's a draw!".to_string(),
                None => format!("Turn: {}", p.game.current_player().as_str()),
            };
            el.set_text_content(Some(&text));
        }
    }

    fn update_play_button(p: &Page) {
        let document = document();
        if let Some(btn) = document.get_element_by_id("play-toggle") {
            let symbol = if p.playback.is_playing() { "⏸" } else { "▶" };
            btn.set_text_content(Some(symbol));
        }
        if let Some(status) = document.get_element_by_id("play-status") {
            let label = if p.playback.is_playing() { "Playing..." } else { "Paused" };
            status.set_text_content(Some(label));
        }
    }

    /// Ask the host to start playback; a rejection (no user gesture yet)
    /// reverts the displayed state to paused
    fn attempt_play(audio: &HtmlAudioElement, page: Rc<RefCell<Page>>) {
        match audio.play() {
            Ok(promise) => {
                wasm_bindgen_futures::spawn_local(async move {
                    if JsFuture::from(promise).await.is_err() {
                        log::info!("Playback refused; reverting to paused");
                        page.borrow_mut().playback.autoplay_blocked();
                        update_play_button(&page.borrow());
                    }
                });
            }
            Err(_) => {
                page.borrow_mut().playback.autoplay_blocked();
                update_play_button(&page.borrow());
            }
        }
    }

    fn setup_audio(page: Rc<RefCell<Page>>) {
        let document = document();
        let Some(el) = document.get_element_by_id("bg-music") else {
            log::warn!("No #bg-music element; music disabled");
            return;
        };
        let audio: HtmlAudioElement = match el.dyn_into() {
            Ok(audio) => audio,
            Err(_) => {
                log::warn!("#bg-music is not an <audio> element");
                return;
            }
        };

        audio.set_volume(f64::from(page.borrow().playback.volume()));

        // Autoplay attempt on load
        attempt_play(&audio, page.clone());

        // Play/pause button
        if let Some(btn) = document.get_element_by_id("play-toggle") {
            let page = page.clone();
            let audio = audio.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let playing = page.borrow_mut().playback.toggle();
                if playing {
                    attempt_play(&audio, page.clone());
                } else {
                    let _ = audio.pause();
                }
                update_play_button(&page.borrow());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Volume slider
        if let Some(slider) = document.get_element_by_id("volume-slider") {
            if let Ok(input) = slider.clone().dyn_into::<HtmlInputElement>() {
                input.set_value(&page.borrow().playback.volume().to_string());
            }
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let Some(input) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                let Ok(volume) = input.value().parse::<f32>() else {
                    return;
                };
                let mut p = page.borrow_mut();
                p.playback.set_volume(volume);
                audio.set_volume(f64::from(p.playback.volume()));
                p.settings.music_volume = p.playback.volume();
                p.settings.save();
            });
            let _ =
                slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_page::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use drift_countdown::consts::*;
    use drift_countdown::countdown;
    use drift_countdown::sim::{Bounds, SpriteField};

    env_logger::init();
    log::info!("Drift Countdown (native) starting...");
    log::info!("Native mode has no page host - run with `trunk serve` for the web version");

    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);

    println!("\nCountdown to 2025-09-09T00:00:00Z:");
    for zone in countdown::recompute(now_ms) {
        let sign = if zone.is_past { '+' } else { '-' };
        println!(
            "  {:<14} {:>4}  {}{}d {:02}:{:02}:{:02}",
            zone.label,
            zone.name,
            sign,
            zone.time.days,
            zone.time.hours,
            zone.time.minutes,
            zone.time.seconds,
        );
    }

    // Short headless field run as a smoke check
    let bounds = Bounds::new(1280.0, 720.0);
    let mut field = SpriteField::new(SPRITE_COUNT, bounds, now_ms as u64);
    for frame in 0..600 {
        field.advance(bounds, now_ms as f64 + f64::from(frame) * 16.0);
    }
    field.expire_markers(now_ms as f64 + 600.0 * 16.0);
    log::info!(
        "Headless field run done: {} sprites, {} live markers",
        field.sprites().len(),
        field.markers().len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
