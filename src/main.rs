//! NeonGenesis entry point
//!
//! In the browser this wires the shell to the DOM. Natively it runs a short
//! headless session against in-memory storage.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, KeyboardEvent};

    use neon_genesis::config::{AwsConfig, USER_ID};
    use neon_genesis::persistence;
    use neon_genesis::platform::{BrowserStorage, KeyValueStorage, MemoryStorage, now_ms};
    use neon_genesis::remote::{HttpTransport, Transport};
    use neon_genesis::settings::SettingChange;
    use neon_genesis::shell::{self, App, CLICK_ATTRIBUTES, Intent};
    use neon_genesis::view;

    /// Autosave countdown and notification ages refresh at this rate
    const HEARTBEAT_MS: i32 = 1000;

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_html(document: &Document, id: &str, html: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_inner_html(html);
        }
    }

    /// Redraw every region from current state
    fn render(app: &Rc<RefCell<App>>) {
        let Some(document) = document() else {
            return;
        };
        let frame = view::frame(&app.borrow(), now_ms());

        if let Some(root) = document.get_element_by_id("app") {
            root.set_class_name(frame.theme_class);
        }
        set_html(&document, "resource-bar", &frame.resource_bar);
        set_html(&document, "nav", &frame.navigation);
        set_html(&document, "panel", &frame.panel);
        set_html(&document, "notifications", &frame.notifications);
        set_html(&document, "help", &frame.help);
    }

    /// Only the feed changes on a heartbeat (ages tick up)
    fn render_notifications(app: &Rc<RefCell<App>>) {
        if let Some(document) = document() {
            let html = view::notification_feed(app.borrow().notifications(), now_ms());
            set_html(&document, "notifications", &html);
        }
    }

    fn apply(app: &Rc<RefCell<App>>, intent: Intent) {
        app.borrow_mut().dispatch(intent, now_ms());
        render(app);
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("NeonGenesis starting...");

        let storage: Rc<dyn KeyValueStorage> = match BrowserStorage::open() {
            Ok(storage) => Rc::new(storage),
            Err(e) => {
                log::warn!("{}, saves will not survive a reload", e);
                Rc::new(MemoryStorage::new())
            }
        };
        let transport = match HttpTransport::new() {
            Ok(t) => Some(Rc::new(t) as Rc<dyn Transport>),
            Err(e) => {
                log::warn!("HTTP client unavailable: {}", e);
                None
            }
        };
        let gateway = persistence::connect(AwsConfig::from_build_env(), transport, storage);

        let seed = now_ms() as u64;
        let app = Rc::new(RefCell::new(App::new(gateway, USER_ID, seed)));
        log::info!("Dashboard initialized with seed: {}", seed);

        // Hide loading indicator
        if let Some(loading) = document().and_then(|d| d.get_element_by_id("loading")) {
            let _ = loading.set_attribute("class", "hidden");
        }

        render(&app);
        setup_click_handler(app.clone());
        setup_settings_handler(app.clone());
        setup_keyboard(app.clone());
        setup_heartbeat(app.clone());

        shell::load_game(app.clone()).await;
        render(&app);

        log::info!("NeonGenesis running!");
    }

    /// Walk up from the click target to the nearest element carrying an
    /// intent attribute
    fn intent_for_target(target: Element) -> Option<Intent> {
        let mut current = Some(target);
        while let Some(el) = current {
            for attr in CLICK_ATTRIBUTES {
                if let Some(value) = el.get_attribute(attr) {
                    return Intent::from_data_attribute(attr, &value);
                }
            }
            current = el.parent_element();
        }
        None
    }

    fn setup_click_handler(app: Rc<RefCell<App>>) {
        let Some(document) = document() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
            if let Some(intent) = target.and_then(intent_for_target) {
                apply(&app, intent);
            }
        });
        let _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Raw value of a settings control as the form would submit it
    fn control_value(target: &Element) -> Option<String> {
        if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
            if input.type_() == "checkbox" {
                return Some(input.checked().to_string());
            }
            return Some(input.value());
        }
        target.dyn_ref::<HtmlSelectElement>().map(|s| s.value())
    }

    fn setup_settings_handler(app: Rc<RefCell<App>>) {
        let Some(document) = document() else {
            return;
        };
        // `change` rather than `input` so a slider is not replaced mid-drag
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Some(name) = target.get_attribute("data-setting") else {
                return;
            };
            let change = control_value(&target).and_then(|value| SettingChange::parse(&name, &value));
            match change {
                Some(change) => apply(&app, Intent::ChangeSetting(change)),
                None => log::warn!("Ignoring unrecognized setting control {}", name),
            }
        });
        let _ = document.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(intent) = Intent::from_key(&event.key()) {
                apply(&app, intent);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_heartbeat(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let last_tick = Cell::new(now_ms());
        let closure = Closure::<dyn FnMut()>::new(move || {
            let now = now_ms();
            let dt = now - last_tick.replace(now);

            let saves_due = app.borrow_mut().tick(dt);
            if saves_due > 0 {
                let app = app.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    for _ in 0..saves_due {
                        shell::save_game(app.clone()).await;
                    }
                    render_notifications(&app);
                });
            }
            render_notifications(&app);
        });
        let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            HEARTBEAT_MS,
        );
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::executor::block_on;
    use neon_genesis::config::{AUTOSAVE_INTERVAL_MS, AwsConfig, USER_ID};
    use neon_genesis::platform::{MemoryStorage, now_ms};
    use neon_genesis::shell::{self, App, Intent, Panel};
    use neon_genesis::state::SectorControl;
    use neon_genesis::{persistence, view};

    env_logger::init();
    log::info!("NeonGenesis (native) starting...");
    log::info!("Native mode runs a headless session - run with `trunk serve` for the dashboard");

    let storage = Rc::new(MemoryStorage::new());
    let gateway = persistence::connect(AwsConfig::from_build_env(), None, storage.clone());
    let seed = now_ms() as u64;
    let app = Rc::new(RefCell::new(App::new(gateway, USER_ID, seed)));

    block_on(shell::load_game(app.clone()));

    let hostile = app
        .borrow()
        .snapshot()
        .map_sectors
        .iter()
        .find(|s| s.control == SectorControl::Enemy)
        .map(|s| s.id);
    if let Some(id) = hostile {
        app.borrow_mut().dispatch(Intent::SelectSector(id), now_ms());
    }
    app.borrow_mut().dispatch(Intent::ShowPanel(Panel::Units), now_ms());

    let saves_due = app.borrow_mut().tick(AUTOSAVE_INTERVAL_MS);
    for _ in 0..saves_due {
        block_on(shell::save_game(app.clone()));
    }

    let app = app.borrow();
    println!("\nSeed {} | {} saved record(s)", seed, storage.len());
    for note in app.notifications().iter() {
        println!("[{}] {}", note.severity.as_str(), note.message);
    }
    println!("\n{}", view::resource_bar(&app.snapshot().resources));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
