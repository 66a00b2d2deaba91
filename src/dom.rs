//! `web-sys` implementations of the picker seams plus the page wiring.
//! Everything here is a thin adapter; the behavior lives in `controller`.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    console, Document, Element, HtmlElement, HtmlTextAreaElement, KeyboardEvent, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::catalog::{AttributeDefinition, ATTRIBUTES};
use crate::controller::{AddressBar, CardSurface, ClipboardService, Notifier, Picker};

pub const DEFAULT_TOAST_MS: u32 = 2_500;

type ToggleHook = Rc<dyn Fn(String)>;

/// Renders the attribute cards into a container element and routes card
/// activation (click or Enter/Space) to the hook installed at mount time.
pub struct DomCards {
    document: Document,
    container: Element,
    on_toggle: RefCell<Option<ToggleHook>>,
}

impl DomCards {
    pub fn new(document: Document, container: Element) -> Self {
        Self {
            document,
            container,
            on_toggle: RefCell::new(None),
        }
    }

    pub fn set_on_toggle(&self, hook: impl Fn(String) + 'static) {
        *self.on_toggle.borrow_mut() = Some(Rc::new(hook));
    }

    fn card(&self, id: &str) -> Option<Element> {
        self.container
            .query_selector(&format!(".card[data-id=\"{id}\"]"))
            .ok()
            .flatten()
    }

    fn build(&self, catalog: &[AttributeDefinition]) -> Result<(), JsValue> {
        // Clearing first keeps re-renders from duplicating cards.
        self.container.set_inner_html("");
        let hook = self.on_toggle.borrow().clone();
        for attr in catalog {
            let card = self.document.create_element("button")?;
            card.set_class_name("card");
            card.set_attribute("type", "button")?;
            card.set_attribute("data-id", attr.id)?;
            card.set_attribute("aria-pressed", "false")?;

            let title = self.document.create_element("h3")?;
            title.set_text_content(Some(attr.title));
            card.append_child(&title)?;
            let description = self.document.create_element("p")?;
            description.set_text_content(Some(attr.description));
            card.append_child(&description)?;

            if let Some(hook) = &hook {
                let id = attr.id.to_string();
                let click_hook = Rc::clone(hook);
                let on_click = Closure::<dyn FnMut()>::wrap(Box::new(move || {
                    click_hook(id.clone());
                }));
                card.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
                on_click.forget();

                let id = attr.id.to_string();
                let key_hook = Rc::clone(hook);
                let on_keydown =
                    Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(move |event| {
                        let key = event.key();
                        if key == "Enter" || key == " " {
                            event.prevent_default();
                            key_hook(id.clone());
                        }
                    }));
                card.add_event_listener_with_callback(
                    "keydown",
                    on_keydown.as_ref().unchecked_ref(),
                )?;
                on_keydown.forget();
            }

            self.container.append_child(&card)?;
        }
        Ok(())
    }
}

impl CardSurface for Rc<DomCards> {
    fn render(&self, catalog: &[AttributeDefinition]) {
        if let Err(err) = self.build(catalog) {
            console::warn_1(&err);
        }
    }

    fn set_pressed(&self, id: &str, pressed: bool) {
        if let Some(card) = self.card(id) {
            let class_list = card.class_list();
            let _ = if pressed {
                class_list.add_1("selected")
            } else {
                class_list.remove_1("selected")
            };
            let _ = card.set_attribute("aria-pressed", if pressed { "true" } else { "false" });
        }
    }

    fn clear_pressed(&self) {
        if let Ok(selected) = self.container.query_selector_all(".card.selected") {
            for idx in 0..selected.length() {
                if let Some(card) = selected.item(idx).and_then(|node| node.dyn_into::<Element>().ok()) {
                    let _ = card.class_list().remove_1("selected");
                    let _ = card.set_attribute("aria-pressed", "false");
                }
            }
        }
    }

    fn has_card(&self, id: &str) -> bool {
        self.card(id).is_some()
    }
}

/// Async clipboard API path; a rejected write falls back to the legacy
/// selection-and-copy technique.
pub struct NavigatorClipboard {
    window: Window,
}

impl ClipboardService for NavigatorClipboard {
    fn copy(&self, text: &str) {
        let promise = self.window.navigator().clipboard().write_text(text);
        let text = text.to_string();
        spawn_local(async move {
            if JsFuture::from(promise).await.is_err() {
                fallback_copy(&text);
            }
        });
    }
}

/// Legacy path for environments without `navigator.clipboard`.
pub struct FallbackClipboard;

impl ClipboardService for FallbackClipboard {
    fn copy(&self, text: &str) {
        fallback_copy(text);
    }
}

/// Picks the clipboard implementation once, at startup, so callers never
/// branch on capability.
pub fn detect_clipboard(window: &Window) -> Box<dyn ClipboardService> {
    let has_clipboard = js_sys::Reflect::has(
        window.navigator().as_ref(),
        &JsValue::from_str("clipboard"),
    )
    .unwrap_or(false);
    if has_clipboard {
        Box::new(NavigatorClipboard {
            window: window.clone(),
        })
    } else {
        Box::new(FallbackClipboard)
    }
}

fn fallback_copy(text: &str) {
    if let Err(err) = try_fallback_copy(text) {
        // Best effort only: the link already sits in the address bar.
        console::warn_1(&err);
    }
}

fn try_fallback_copy(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    let textarea: HtmlTextAreaElement = document.create_element("textarea")?.dyn_into()?;
    textarea.set_value(text);
    let style = textarea.style();
    let _ = style.set_property("position", "fixed");
    let _ = style.set_property("top", "0");
    let _ = style.set_property("left", "0");
    let _ = style.set_property("opacity", "0");
    body.append_child(&textarea)?;
    textarea.select();
    // The element is removed on every path, copy success or not.
    let copied = document.exec_command("copy");
    textarea.remove();
    match copied {
        Ok(true) => Ok(()),
        Ok(false) => Err(JsValue::from_str("copy command refused")),
        Err(err) => Err(err),
    }
}

/// Transient status message bound to the `#toast` element. A new message
/// cancels the pending hide timer and restarts the duration.
pub struct DomToast {
    element: HtmlElement,
    timer: RefCell<Option<Timeout>>,
}

impl DomToast {
    pub fn new(element: HtmlElement) -> Self {
        Self {
            element,
            timer: RefCell::new(None),
        }
    }

    pub fn show_for(&self, message: &str, duration_ms: u32) {
        self.element.set_text_content(Some(message));
        let _ = self.element.class_list().add_1("show");
        let element = self.element.clone();
        let hide = Timeout::new(duration_ms, move || {
            let _ = element.class_list().remove_1("show");
        });
        // Dropping the previous handle cancels it: last message wins.
        *self.timer.borrow_mut() = Some(hide);
    }
}

impl Notifier for DomToast {
    fn show(&self, message: &str) {
        self.show_for(message, DEFAULT_TOAST_MS);
    }
}

/// Address bar backed by `location` and in-place history replacement.
pub struct DomAddress {
    window: Window,
}

impl DomAddress {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn pathname(&self) -> String {
        self.window
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_string())
    }
}

impl AddressBar for DomAddress {
    fn query(&self) -> String {
        self.window
            .location()
            .search()
            .unwrap_or_default()
            .trim_start_matches('?')
            .to_string()
    }

    fn replace_query(&self, query: Option<&str>) {
        let url = match query {
            Some(query) if !query.is_empty() => format!("{}?{query}", self.pathname()),
            _ => self.pathname(),
        };
        if let Ok(history) = self.window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&url));
        }
    }

    fn share_url(&self, query: &str) -> String {
        let origin = self.window.location().origin().unwrap_or_default();
        format!("{origin}{}?{query}", self.pathname())
    }
}

/// Smooth-scrolls to a named section. Fire-and-forget.
pub fn scroll_to_section(document: &Document, id: &str) {
    if let Some(section) = document.get_element_by_id(id) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        section.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

fn wire_button(
    document: &Document,
    id: &str,
    action: impl FnMut() + 'static,
) -> Result<(), JsValue> {
    // Button wiring is optional; pages without the trigger just skip it.
    let Some(button) = document.get_element_by_id(id) else {
        return Ok(());
    };
    let on_click = Closure::<dyn FnMut()>::wrap(Box::new(action));
    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

type DomPicker = Picker<Rc<DomCards>, Box<dyn ClipboardService>, DomToast, DomAddress>;

/// Builds the controller, renders the cards, restores any shared selection
/// from the URL and wires the page triggers.
pub fn mount(window: &Window) -> Result<(), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let container = document
        .get_element_by_id("cards")
        .ok_or_else(|| JsValue::from_str("missing #cards element"))?;
    let toast_element: HtmlElement = document
        .get_element_by_id("toast")
        .ok_or_else(|| JsValue::from_str("missing #toast element"))?
        .dyn_into()?;

    let surface = Rc::new(DomCards::new(document.clone(), container));
    let picker: Rc<RefCell<DomPicker>> = Rc::new(RefCell::new(Picker::new(
        ATTRIBUTES,
        Rc::clone(&surface),
        detect_clipboard(window),
        DomToast::new(toast_element),
        DomAddress::new(window.clone()),
    )));

    let weak = Rc::downgrade(&picker);
    surface.set_on_toggle(move |id| {
        if let Some(picker) = weak.upgrade() {
            picker.borrow_mut().toggle(&id);
        }
    });

    picker.borrow().render();
    picker.borrow_mut().restore_from_url();

    let generate = Rc::clone(&picker);
    wire_button(&document, "generateBtn", move || {
        generate.borrow_mut().generate_link();
    })?;
    let clear = Rc::clone(&picker);
    wire_button(&document, "clearBtn", move || {
        clear.borrow_mut().clear();
    })?;
    let start_doc = document.clone();
    wire_button(&document, "startBtn", move || {
        scroll_to_section(&start_doc, "picker");
    })?;
    let examples_doc = document.clone();
    wire_button(&document, "examplesBtn", move || {
        scroll_to_section(&examples_doc, "examples");
    })?;

    // Focus outlines only once keyboard navigation starts.
    if let Some(body) = document.body() {
        let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(move |event| {
            if event.key() == "Tab" {
                let _ = body.class_list().add_1("show-focus");
            }
        }));
        document
            .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
        on_keydown.forget();
    }

    Ok(())
}
