//! The picker controller: owns the selection and drives the platform seams
//! (card surface, clipboard, toast, address bar). Keeping the seams as traits
//! lets the whole interaction flow run under native tests with fakes instead
//! of a live document.

use crate::catalog::AttributeDefinition;
use crate::link;
use crate::selection::Selection;

pub const MSG_EMPTY_SELECTION: &str = "Select at least one attribute to generate a link.";
pub const MSG_LINK_COPIED: &str = "Link copied to clipboard! You can share it now.";
pub const MSG_PROFILE_LOADED: &str = "Loaded profile from link.";

/// Rendering surface for the attribute cards.
pub trait CardSurface {
    /// Builds one card per definition, clearing any prior output so a
    /// re-render never duplicates cards.
    fn render(&self, catalog: &[AttributeDefinition]);
    /// Reflects membership on the card tagged with `id`.
    fn set_pressed(&self, id: &str, pressed: bool);
    /// Unpresses every card.
    fn clear_pressed(&self);
    /// Whether a card tagged with `id` was rendered.
    fn has_card(&self, id: &str) -> bool;
}

/// Best-effort clipboard write; failures are the implementation's problem.
pub trait ClipboardService {
    fn copy(&self, text: &str);
}

impl<T: ClipboardService + ?Sized> ClipboardService for Box<T> {
    fn copy(&self, text: &str) {
        (**self).copy(text);
    }
}

/// Transient status message, auto-dismissed by the implementation.
pub trait Notifier {
    fn show(&self, message: &str);
}

/// The browser address bar, narrowed to what the picker needs. All mutation
/// goes through in-place history replacement, never navigation.
pub trait AddressBar {
    /// Current raw query string, without the leading `?`.
    fn query(&self) -> String;
    /// Replaces the history entry with `query` (`None` strips the `?`).
    fn replace_query(&self, query: Option<&str>);
    /// Absolute URL for the current page carrying `query`.
    fn share_url(&self, query: &str) -> String;
}

pub struct Picker<S, C, N, B> {
    catalog: &'static [AttributeDefinition],
    selection: Selection,
    surface: S,
    clipboard: C,
    notifier: N,
    address: B,
}

impl<S, C, N, B> Picker<S, C, N, B>
where
    S: CardSurface,
    C: ClipboardService,
    N: Notifier,
    B: AddressBar,
{
    pub fn new(
        catalog: &'static [AttributeDefinition],
        surface: S,
        clipboard: C,
        notifier: N,
        address: B,
    ) -> Self {
        Self {
            catalog,
            selection: Selection::new(),
            surface,
            clipboard,
            notifier,
            address,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Builds the cards and re-applies pressed state for whatever is already
    /// selected, so re-rendering loses nothing.
    pub fn render(&self) {
        self.surface.render(self.catalog);
        for id in self.selection.ids() {
            self.surface.set_pressed(id, true);
        }
    }

    /// Flips membership for `id` and mirrors it on the card. Only rendered
    /// cards can trigger this, so `id` is always a catalog id.
    pub fn toggle(&mut self, id: &str) {
        let pressed = self.selection.toggle(id);
        self.surface.set_pressed(id, pressed);
    }

    /// Serializes the selection into the `attrs` parameter, copies the full
    /// URL and rewrites the address bar. With nothing selected this warns and
    /// leaves the address bar untouched.
    pub fn generate_link(&mut self) {
        if self.selection.is_empty() {
            self.notifier.show(MSG_EMPTY_SELECTION);
            return;
        }
        let query = link::set_attrs(&self.address.query(), self.selection.ids());
        let url = self.address.share_url(&query);
        self.clipboard.copy(&url);
        self.notifier.show(MSG_LINK_COPIED);
        self.address.replace_query(Some(&query));
    }

    /// Empties the selection, unpresses every card and drops the `attrs`
    /// parameter from the address bar (stripping the `?` when nothing else
    /// remains).
    pub fn clear(&mut self) {
        self.selection.clear();
        self.surface.clear_pressed();
        let rest = link::remove_attrs(&self.address.query());
        if rest.is_empty() {
            self.address.replace_query(None);
        } else {
            self.address.replace_query(Some(&rest));
        }
    }

    /// Startup restoration: applies ids from the `attrs` parameter that match
    /// a rendered card, silently skipping the rest. Must run after `render`.
    /// Toasts only when at least one id applied.
    pub fn restore_from_url(&mut self) {
        let Some(ids) = link::parse_attrs(&self.address.query()) else {
            return;
        };
        for id in &ids {
            if self.surface.has_card(id) && self.selection.insert(id) {
                self.surface.set_pressed(id, true);
            }
        }
        if !self.selection.is_empty() {
            self.notifier.show(MSG_PROFILE_LOADED);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ATTRIBUTES;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeSurface {
        rendered: RefCell<usize>,
        pressed: RefCell<BTreeMap<String, bool>>,
    }

    impl CardSurface for Rc<FakeSurface> {
        fn render(&self, catalog: &[AttributeDefinition]) {
            *self.rendered.borrow_mut() += 1;
            let mut pressed = self.pressed.borrow_mut();
            pressed.clear();
            for attr in catalog {
                pressed.insert(attr.id.to_string(), false);
            }
        }

        fn set_pressed(&self, id: &str, value: bool) {
            self.pressed.borrow_mut().insert(id.to_string(), value);
        }

        fn clear_pressed(&self) {
            for value in self.pressed.borrow_mut().values_mut() {
                *value = false;
            }
        }

        fn has_card(&self, id: &str) -> bool {
            self.pressed.borrow().contains_key(id)
        }
    }

    #[derive(Default)]
    struct FakeClipboard {
        copied: RefCell<Vec<String>>,
    }

    impl ClipboardService for Rc<FakeClipboard> {
        fn copy(&self, text: &str) {
            self.copied.borrow_mut().push(text.to_string());
        }
    }

    #[derive(Default)]
    struct FakeNotifier {
        messages: RefCell<Vec<String>>,
    }

    impl Notifier for Rc<FakeNotifier> {
        fn show(&self, message: &str) {
            self.messages.borrow_mut().push(message.to_string());
        }
    }

    struct FakeAddress {
        query: RefCell<Option<String>>,
        replacements: RefCell<usize>,
    }

    impl FakeAddress {
        fn with_query(query: &str) -> Rc<Self> {
            Rc::new(Self {
                query: RefCell::new(if query.is_empty() {
                    None
                } else {
                    Some(query.to_string())
                }),
                replacements: RefCell::new(0),
            })
        }
    }

    impl AddressBar for Rc<FakeAddress> {
        fn query(&self) -> String {
            self.query.borrow().clone().unwrap_or_default()
        }

        fn replace_query(&self, query: Option<&str>) {
            *self.replacements.borrow_mut() += 1;
            *self.query.borrow_mut() = query.map(str::to_string);
        }

        fn share_url(&self, query: &str) -> String {
            format!("https://example.test/picker?{query}")
        }
    }

    struct Harness {
        surface: Rc<FakeSurface>,
        clipboard: Rc<FakeClipboard>,
        notifier: Rc<FakeNotifier>,
        address: Rc<FakeAddress>,
        picker: Picker<Rc<FakeSurface>, Rc<FakeClipboard>, Rc<FakeNotifier>, Rc<FakeAddress>>,
    }

    fn harness(query: &str) -> Harness {
        let surface = Rc::new(FakeSurface::default());
        let clipboard = Rc::new(FakeClipboard::default());
        let notifier = Rc::new(FakeNotifier::default());
        let address = FakeAddress::with_query(query);
        let picker = Picker::new(
            ATTRIBUTES,
            Rc::clone(&surface),
            Rc::clone(&clipboard),
            Rc::clone(&notifier),
            Rc::clone(&address),
        );
        picker.render();
        Harness {
            surface,
            clipboard,
            notifier,
            address,
            picker,
        }
    }

    #[test]
    fn toggle_presses_and_releases_the_card() {
        let mut h = harness("");
        h.picker.toggle("creative");
        assert!(h.picker.selection().contains("creative"));
        assert_eq!(h.surface.pressed.borrow()["creative"], true);

        h.picker.toggle("creative");
        assert!(h.picker.selection().is_empty());
        assert_eq!(h.surface.pressed.borrow()["creative"], false);
    }

    #[test]
    fn rerender_keeps_selection_without_duplicating() {
        let mut h = harness("");
        h.picker.toggle("bold");
        h.picker.render();
        assert_eq!(*h.surface.rendered.borrow(), 2);
        assert_eq!(h.surface.pressed.borrow()["bold"], true);
    }

    #[test]
    fn generate_with_empty_selection_warns_and_leaves_address_alone() {
        let mut h = harness("");
        h.picker.generate_link();
        assert_eq!(h.notifier.messages.borrow().as_slice(), [MSG_EMPTY_SELECTION]);
        assert_eq!(*h.address.replacements.borrow(), 0);
        assert!(h.clipboard.copied.borrow().is_empty());
    }

    #[test]
    fn generate_encodes_selection_in_pick_order() {
        let mut h = harness("");
        h.picker.toggle("focused");
        h.picker.toggle("analytical");
        h.picker.generate_link();

        assert_eq!(h.address.query(), "attrs=focused,analytical");
        assert_eq!(
            h.clipboard.copied.borrow().as_slice(),
            ["https://example.test/picker?attrs=focused,analytical"]
        );
        assert_eq!(h.notifier.messages.borrow().as_slice(), [MSG_LINK_COPIED]);
    }

    #[test]
    fn generate_preserves_foreign_parameters() {
        let mut h = harness("theme=dark");
        h.picker.toggle("curious");
        h.picker.generate_link();
        assert_eq!(h.address.query(), "theme=dark&attrs=curious");
    }

    #[test]
    fn restore_applies_known_ids_and_skips_unknown_ones() {
        let mut h = harness("attrs=creative,bold,unknownid");
        h.picker.restore_from_url();

        assert_eq!(h.picker.selection().ids(), ["creative", "bold"]);
        assert!(!h.surface.pressed.borrow().contains_key("unknownid"));
        assert_eq!(h.surface.pressed.borrow()["creative"], true);
        assert_eq!(h.notifier.messages.borrow().as_slice(), [MSG_PROFILE_LOADED]);
    }

    #[test]
    fn restore_with_absent_or_empty_parameter_is_silent() {
        let mut h = harness("");
        h.picker.restore_from_url();
        assert!(h.notifier.messages.borrow().is_empty());

        let mut h = harness("attrs=");
        h.picker.restore_from_url();
        assert!(h.picker.selection().is_empty());
        assert!(h.notifier.messages.borrow().is_empty());
    }

    #[test]
    fn restore_with_only_unknown_ids_is_silent() {
        let mut h = harness("attrs=nope,alsonope");
        h.picker.restore_from_url();
        assert!(h.picker.selection().is_empty());
        assert!(h.notifier.messages.borrow().is_empty());
    }

    #[test]
    fn clear_empties_selection_cards_and_address_bar() {
        let mut h = harness("attrs=creative,bold");
        h.picker.restore_from_url();
        h.picker.clear();

        assert!(h.picker.selection().is_empty());
        assert!(h.surface.pressed.borrow().values().all(|&v| !v));
        assert_eq!(*h.address.query.borrow(), None);
    }

    #[test]
    fn clear_keeps_foreign_parameters() {
        let mut h = harness("theme=dark&attrs=bold");
        h.picker.restore_from_url();
        h.picker.clear();
        assert_eq!(h.address.query(), "theme=dark");
    }

    #[test]
    fn encode_then_decode_round_trips_known_subset() {
        let mut h = harness("");
        h.picker.toggle("resilient");
        h.picker.toggle("intuitive");
        h.picker.generate_link();
        let query = h.address.query();

        let mut restored = harness(&query);
        restored.picker.restore_from_url();
        assert_eq!(restored.picker.selection().ids(), ["resilient", "intuitive"]);
    }
}
