//! Behavior tests for the dropdown widget.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use lattice_dropdown_core::{ConnectionId, Signal};
use parking_lot::Mutex;

use crate::error::DropdownError;
use crate::widget::{
    AccessibleNode, AccessibleRole, Activatable, ActivationHandler, Direction, Document,
    DropdownConfig, DropdownMenu, Key, KeyPressEvent, KeyboardModifiers, MenuItem, Point,
    PointerPressEvent, Rect, TriggerButton,
};

type Log = Arc<Mutex<Vec<String>>>;

struct Fixture {
    document: Document,
    trigger: Arc<TriggerButton>,
    menu: DropdownMenu<TriggerButton>,
    log: Log,
}

impl Fixture {
    fn with_items(labels: &[(&str, &str)], config: DropdownConfig) -> Self {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let items = labels
            .iter()
            .map(|&(label, value)| {
                let log = log.clone();
                let entry = format!("callback:{value}");
                MenuItem::new(label, value).with_callback(move || log.lock().push(entry.clone()))
            })
            .collect();

        let document = Document::new();
        let trigger = Arc::new(
            TriggerButton::new("Toggle Menu").with_geometry(Rect::new(10.0, 10.0, 120.0, 30.0)),
        );
        let menu = DropdownMenu::new(&document, trigger.clone(), items, config);

        let selected_log = log.clone();
        menu.selected()
            .connect(move |value| selected_log.lock().push(format!("selected:{value}")));
        let open_log = log.clone();
        menu.open_changed()
            .connect(move |open| open_log.lock().push(format!("open:{open}")));

        Self {
            document,
            trigger,
            menu,
            log,
        }
    }

    fn options() -> Self {
        Self::with_items(
            &[("Option 1", "1"), ("Option 2", "2"), ("Option 3", "3")],
            DropdownConfig::default(),
        )
    }

    /// Deliver a key the way a host does: focused trigger first, then the
    /// document.
    fn press(&self, event: KeyPressEvent) -> KeyPressEvent {
        let mut event = event;
        if self.trigger.has_focus() {
            self.trigger.key_press(&mut event);
        }
        self.document.key_down(&mut event);
        event
    }

    fn press_key(&self, key: Key) -> KeyPressEvent {
        self.press(KeyPressEvent::key(key))
    }

    fn pointer_down(&self, event: PointerPressEvent) {
        let mut event = event;
        self.document.pointer_down(&mut event);
    }

    fn focused_label(&self) -> Option<String> {
        self.menu.focused_item().map(|item| item.label().to_string())
    }

    fn entries(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    fn assert_expanded_mirrors_open(&self, context: &str) {
        let open = self.menu.is_open();
        assert_eq!(self.trigger.is_expanded(), open, "{context}");
        let tree = self.menu.accessibility_tree();
        let button = tree.find_by_role(AccessibleRole::Button).unwrap();
        assert_eq!(button.expanded, Some(open), "{context}");
    }
}

/// A trigger whose hooks report back to an observer, which may query the
/// menu from inside them.
struct ObservedTrigger {
    inner: TriggerButton,
    hook: Signal<&'static str>,
}

impl ObservedTrigger {
    fn new(label: &str) -> Self {
        Self {
            inner: TriggerButton::new(label).with_geometry(Rect::new(0.0, 0.0, 100.0, 20.0)),
            hook: Signal::new(),
        }
    }
}

impl Activatable for ObservedTrigger {
    fn on_activate(&self, handler: ActivationHandler) -> ConnectionId {
        self.inner.on_activate(handler)
    }

    fn remove_activation_handler(&self, id: ConnectionId) {
        self.inner.remove_activation_handler(id);
    }

    fn set_accessibility_state(&self, has_popup: bool, expanded: bool) {
        self.inner.set_accessibility_state(has_popup, expanded);
        self.hook.emit("state");
    }

    fn set_indicator(&self, glyph: Option<char>) {
        self.inner.set_indicator(glyph);
    }

    fn focus(&self) {
        self.inner.focus();
        self.hook.emit("focus");
    }

    fn blur(&self) {
        self.inner.blur();
        self.hook.emit("blur");
    }

    fn has_focus(&self) -> bool {
        self.inner.has_focus()
    }

    fn geometry(&self) -> Rect {
        self.hook.emit("geometry");
        self.inner.geometry()
    }

    fn accessible_node(&self) -> AccessibleNode {
        self.hook.emit("node");
        self.inner.accessible_node()
    }
}

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("lattice_dropdown=trace")
        .with_test_writer()
        .try_init();
}

// =========================================================================
// Rendering and accessibility
// =========================================================================

#[test]
fn test_trigger_is_a_collapsed_popup_button() {
    setup();
    let f = Fixture::options();
    assert!(Arc::ptr_eq(&f.menu.trigger(), &f.trigger));

    let tree = f.menu.accessibility_tree();
    let button = tree
        .find_by_role_and_name(AccessibleRole::Button, "toggle menu")
        .unwrap();
    assert!(button.has_popup);
    assert_eq!(button.expanded, Some(false));
    assert!(tree.find_by_role(AccessibleRole::Menu).is_none());
    assert!(tree.find_all_by_role(AccessibleRole::MenuItem).is_empty());
}

#[test]
fn test_indicator_is_shown_but_not_announced() {
    setup();
    let f = Fixture::options();

    assert_eq!(f.trigger.display_text(), "Toggle Menu ▼");
    let tree = f.menu.accessibility_tree();
    let button = tree.find_by_role(AccessibleRole::Button).unwrap();
    assert_eq!(button.name.as_deref(), Some("Toggle Menu"));
}

#[test]
fn test_click_opens_menu_with_items() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    assert!(f.menu.is_open());

    let tree = f.menu.accessibility_tree();
    let menu = tree.find_by_role(AccessibleRole::Menu).unwrap();
    assert_eq!(menu.tab_index, Some(-1));
    for name in ["Option 1", "Option 2", "Option 3"] {
        let item = tree
            .find_by_role_and_name(AccessibleRole::MenuItem, name)
            .unwrap();
        assert_eq!(item.tab_index, Some(0));
    }
    assert_eq!(menu.children.len(), 3);

    let button = tree.find_by_role(AccessibleRole::Button).unwrap();
    assert_eq!(button.expanded, Some(true));
    assert!(f.trigger.is_expanded());
}

#[test]
fn test_expanded_mirrors_open_state() {
    setup();
    let f = Fixture::options();

    for _ in 0..3 {
        f.trigger.click();
        assert_eq!(f.trigger.is_expanded(), f.menu.is_open());
        assert!(f.trigger.has_popup());
    }
    assert!(f.menu.is_open());
}

#[test]
fn test_open_focuses_first_item() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    assert_eq!(f.focused_label().as_deref(), Some("Option 1"));
    assert!(!f.trigger.has_focus());

    let tree = f.menu.accessibility_tree();
    let focused: Vec<_> = tree.descendants().filter(|node| node.focused).collect();
    assert_eq!(focused.len(), 1);
    assert_eq!(focused[0].name.as_deref(), Some("Option 1"));
}

#[test]
fn test_direction_classes() {
    setup();
    let cases = [
        (Direction::Up, "bottom-full mb-2"),
        (Direction::Down, "top-full mt-2"),
        (Direction::Left, "right-full mr-2"),
        (Direction::Right, "left-full ml-2"),
    ];
    for (direction, classes) in cases {
        let f = Fixture::with_items(
            &[("Option 1", "1")],
            DropdownConfig::default().with_direction(direction),
        );
        f.trigger.click();
        assert_eq!(f.menu.direction(), direction);
        assert!(
            f.menu.menu_class_names().contains(classes),
            "{direction}: {}",
            f.menu.menu_class_names()
        );
    }
}

#[test]
fn test_direction_from_toml() {
    setup();
    let config = DropdownConfig::from_toml_str("direction = \"up\"").unwrap();
    let f = Fixture::with_items(&[("Option 1", "1")], config);
    assert!(f.menu.menu_class_names().contains("bottom-full mb-2"));
    assert!(f.menu.menu_rect().bottom() <= f.trigger.geometry().top());
}

// =========================================================================
// Activation
// =========================================================================

#[test]
fn test_item_click_runs_callback_and_closes() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    assert!(f.menu.activate_item(0));
    assert!(!f.menu.is_open());
    assert!(f.trigger.has_focus());
    assert_eq!(
        f.entries()
            .iter()
            .filter(|entry| *entry == "callback:1")
            .count(),
        1
    );
}

#[test]
fn test_activation_order() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    f.menu.activate_item(1);
    assert_eq!(
        f.entries(),
        ["open:true", "callback:2", "selected:2", "open:false"]
    );
}

#[test]
fn test_click_at_item_position() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    let rect = f.menu.item_rect(2).unwrap();
    let center = Point::new(rect.left() + rect.width() / 2.0, rect.top() + rect.height() / 2.0);
    assert!(f.menu.click_at(center));
    assert!(f.entries().contains(&"selected:3".to_string()));
    assert!(!f.menu.is_open());

    assert!(!f.menu.click_at(center));
}

#[test]
fn test_activation_requires_open_menu() {
    setup();
    let f = Fixture::options();

    assert!(!f.menu.activate_item(0));
    f.trigger.click();
    assert!(!f.menu.activate_item(7));
    assert!(f.menu.is_open());
    assert!(f.entries().iter().all(|entry| !entry.starts_with("selected")));
}

#[test]
fn test_panicking_callback_still_closes_menu() {
    setup();
    let document = Document::new();
    let trigger = Arc::new(TriggerButton::new("Toggle Menu"));
    let menu = DropdownMenu::new(
        &document,
        trigger.clone(),
        vec![MenuItem::new("Broken", "broken").with_callback(|| panic!("callback failed"))],
        DropdownConfig::default(),
    );
    let selected = Arc::new(Mutex::new(Vec::new()));
    let selected_clone = selected.clone();
    menu.selected()
        .connect(move |value| selected_clone.lock().push(value.clone()));

    trigger.click();
    let result = panic::catch_unwind(AssertUnwindSafe(|| menu.activate_item(0)));

    assert!(result.is_err());
    assert!(!menu.is_open());
    assert!(trigger.has_focus());
    assert!(!trigger.is_expanded());
    assert_eq!(*selected.lock(), ["broken"]);
    assert_eq!(document.listener_count(), 0);
}

// =========================================================================
// Keyboard
// =========================================================================

#[test]
fn test_enter_and_space_on_trigger_toggle() {
    setup();
    for key in [Key::Enter, Key::Space] {
        let f = Fixture::options();

        f.assert_expanded_mirrors_open("initial");

        let mut event = KeyPressEvent::key(key);
        f.trigger.key_press(&mut event);
        f.document.key_down(&mut event);
        assert!(f.menu.is_open(), "{key} should open");
        f.assert_expanded_mirrors_open(&format!("{key} open"));
        assert!(f.entries().iter().all(|entry| !entry.starts_with("selected")));

        let mut event = KeyPressEvent::key(key);
        f.trigger.key_press(&mut event);
        f.document.key_down(&mut event);
        assert!(!f.menu.is_open(), "{key} should close");
        f.assert_expanded_mirrors_open(&format!("{key} close"));
    }
}

#[test]
fn test_space_key_name_maps_to_space() {
    assert_eq!(Key::from_name(" "), Some(Key::Space));
}

#[test]
fn test_arrow_down_moves_focus() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    let event = f.press_key(Key::ArrowDown);
    assert!(event.is_default_prevented());
    assert_eq!(f.focused_label().as_deref(), Some("Option 2"));
}

#[test]
fn test_arrow_up_moves_focus() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    f.press_key(Key::ArrowDown);
    f.press_key(Key::ArrowUp);
    assert_eq!(f.focused_label().as_deref(), Some("Option 1"));
}

#[test]
fn test_arrow_keys_wrap() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    for n in 1..=7 {
        f.press_key(Key::ArrowDown);
        assert_eq!(f.menu.focused_index(), Some(n % 3));
    }

    f.menu.close();
    f.trigger.click();
    for n in 1..=7 {
        f.press_key(Key::ArrowUp);
        assert_eq!(f.menu.focused_index(), Some((3 - n % 3) % 3));
    }
}

#[test]
fn test_home_and_end() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    f.press_key(Key::End);
    assert_eq!(f.focused_label().as_deref(), Some("Option 3"));

    f.press_key(Key::ArrowUp);
    f.press_key(Key::Home);
    assert_eq!(f.focused_label().as_deref(), Some("Option 1"));
}

#[test]
fn test_end_then_arrow_down_wraps_to_first() {
    setup();
    let f = Fixture::with_items(
        &[
            ("Profile", "profile"),
            ("Settings", "settings"),
            ("Item 1", "1"),
            ("Item 2", "2"),
            ("Item 3", "3"),
        ],
        DropdownConfig::default(),
    );

    f.trigger.click();
    f.press_key(Key::End);
    assert_eq!(f.focused_label().as_deref(), Some("Item 3"));
    f.press_key(Key::ArrowDown);
    assert_eq!(f.focused_label().as_deref(), Some("Profile"));
}

#[test]
fn test_escape_closes_and_focuses_trigger() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    let event = f.press_key(Key::Escape);
    assert!(event.is_default_prevented());
    assert!(!f.menu.is_open());
    assert!(f.trigger.has_focus());
}

#[test]
fn test_tab_from_last_item_closes() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    f.press_key(Key::End);
    let event = f.press_key(Key::Tab);
    assert!(event.is_default_prevented());
    assert!(!f.menu.is_open());
    assert!(f.trigger.has_focus());
}

#[test]
fn test_shift_tab_from_first_item_closes() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    let event = f.press(KeyPressEvent::backtab());
    assert!(event.is_default_prevented());
    assert!(!f.menu.is_open());
    assert!(f.trigger.has_focus());
}

#[test]
fn test_tab_inside_menu_keeps_it_open() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    let event = f.press_key(Key::Tab);
    assert!(!event.is_default_prevented());
    assert!(f.menu.is_open());

    f.press_key(Key::End);
    let event = f.press(KeyPressEvent::new(Key::Tab, KeyboardModifiers::SHIFT));
    assert!(!event.is_default_prevented());
    assert!(f.menu.is_open());
}

#[test]
fn test_enter_on_focused_item_activates_it() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    f.press_key(Key::ArrowDown);
    let event = f.press_key(Key::Enter);
    assert!(event.is_default_prevented());
    assert!(!f.menu.is_open());
    assert!(f.entries().contains(&"selected:2".to_string()));
}

#[test]
fn test_keys_ignored_while_closed() {
    setup();
    let f = Fixture::options();

    for key in [Key::ArrowDown, Key::Escape, Key::Tab, Key::End] {
        let event = f.press_key(key);
        assert!(!event.is_default_prevented());
    }
    assert!(!f.menu.is_open());
    assert_eq!(f.menu.focused_index(), None);
}

// =========================================================================
// Dismissal
// =========================================================================

#[test]
fn test_outside_press_closes() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    f.pointer_down(PointerPressEvent::new(Point::new(900.0, 900.0)));
    assert!(!f.menu.is_open());
    assert!(f.trigger.has_focus());
    assert!(!f.trigger.is_expanded());

    f.pointer_down(PointerPressEvent::new(Point::new(900.0, 900.0)));
    assert!(!f.menu.is_open());
    assert_eq!(f.entries(), ["open:true", "open:false"]);
}

#[test]
fn test_outside_press_on_focusable_target_keeps_its_focus() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    f.pointer_down(PointerPressEvent::new(Point::new(900.0, 900.0)).on_focusable_target());
    assert!(!f.menu.is_open());
    assert!(!f.trigger.has_focus());
}

#[test]
fn test_press_inside_menu_or_trigger_keeps_open() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    let item = f.menu.item_rect(1).unwrap();
    f.pointer_down(PointerPressEvent::new(Point::new(item.left() + 1.0, item.top() + 1.0)));
    assert!(f.menu.is_open());

    // Pressing the trigger leaves the close to its click.
    f.pointer_down(PointerPressEvent::new(Point::new(20.0, 20.0)));
    assert!(f.menu.is_open());
    f.trigger.click();
    assert!(!f.menu.is_open());
}

#[test]
fn test_listeners_only_while_open() {
    setup();
    let f = Fixture::options();
    assert_eq!(f.document.listener_count(), 0);

    f.trigger.click();
    assert_eq!(f.document.listener_count(), 2);

    f.press_key(Key::Escape);
    assert_eq!(f.document.listener_count(), 0);
}

#[test]
fn test_drop_releases_listeners_and_handler() {
    setup();
    let f = Fixture::options();

    f.trigger.click();
    assert_eq!(f.trigger.clicked.connection_count(), 1);
    let Fixture {
        document,
        trigger,
        menu,
        ..
    } = f;
    drop(menu);

    assert_eq!(document.listener_count(), 0);
    assert_eq!(trigger.clicked.connection_count(), 0);
    trigger.click();
}

// =========================================================================
// Edge cases
// =========================================================================

#[test]
fn test_empty_menu() {
    setup();
    let f = Fixture::with_items(&[], DropdownConfig::default());

    f.trigger.click();
    assert!(f.menu.is_open());
    assert!(f.trigger.has_focus());
    assert_eq!(f.menu.focused_index(), None);

    let tree = f.menu.accessibility_tree();
    assert!(tree.find_by_role(AccessibleRole::Menu).unwrap().children.is_empty());

    for key in [Key::ArrowDown, Key::ArrowUp, Key::Home, Key::End] {
        f.press_key(key);
        assert_eq!(f.menu.focused_index(), None);
    }

    // With the trigger focused, Escape goes through the document.
    f.press_key(Key::Escape);
    assert!(!f.menu.is_open());
    assert!(f.trigger.has_focus());
}

#[test]
fn test_empty_menu_closes_on_tab() {
    setup();
    let f = Fixture::with_items(&[], DropdownConfig::default());

    f.trigger.click();
    let event = f.press_key(Key::Tab);
    assert!(!f.menu.is_open());
    assert!(!event.is_default_prevented());
    assert!(!f.trigger.is_expanded());
}

#[test]
fn test_trigger_hooks_may_query_the_menu() {
    setup();
    let (done_tx, done_rx) = mpsc::channel();

    let worker = thread::spawn(move || {
        let document = Document::new();
        let trigger = Arc::new(ObservedTrigger::new("Toggle Menu"));
        let menu = Arc::new(DropdownMenu::new(
            &document,
            trigger.clone(),
            vec![MenuItem::new("Option 1", "1"), MenuItem::new("Option 2", "2")],
            DropdownConfig::default(),
        ));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let weak = Arc::downgrade(&menu);
        trigger.hook.connect(move |hook| {
            if let Some(menu) = weak.upgrade() {
                let entry = format!("{hook}:{}:{:?}", menu.is_open(), menu.focused_index());
                seen_clone.lock().push(entry);
            }
        });

        trigger.inner.click();
        document.key_down(&mut KeyPressEvent::key(Key::ArrowDown));
        let _ = menu.accessibility_tree();
        document.pointer_down(&mut PointerPressEvent::new(Point::new(500.0, 500.0)));
        trigger.inner.click();
        document.key_down(&mut KeyPressEvent::key(Key::Escape));

        assert!(!menu.is_open());
        let _ = done_tx.send(seen.lock().clone());
    });

    let seen = done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("menu operations did not finish");
    worker.join().unwrap();

    for expected in [
        "state:true:Some(0)",
        "blur:true:Some(1)",
        "geometry:true:Some(1)",
        "state:false:None",
        "focus:false:None",
    ] {
        assert!(seen.iter().any(|entry| entry == expected), "missing {expected}: {seen:?}");
    }
}

#[test]
fn test_try_new_validates_items() {
    let document = Document::new();
    let trigger = Arc::new(TriggerButton::new("Toggle Menu"));

    let duplicate = DropdownMenu::try_new(
        &document,
        trigger.clone(),
        vec![MenuItem::new("A", "same"), MenuItem::new("B", "same")],
        DropdownConfig::default(),
    );
    assert!(matches!(duplicate, Err(DropdownError::DuplicateValue { .. })));

    let empty_label = DropdownMenu::try_new(
        &document,
        trigger.clone(),
        vec![MenuItem::new("", "a")],
        DropdownConfig::default(),
    );
    assert!(matches!(empty_label, Err(DropdownError::EmptyLabel { index: 0 })));

    let menu = DropdownMenu::try_new(
        &document,
        trigger,
        vec![MenuItem::new("A", "a")],
        DropdownConfig::default(),
    )
    .unwrap();
    assert_eq!(menu.items().len(), 1);
}

#[test]
fn test_independent_menus_share_a_document() {
    setup();
    let document = Document::new();
    let first_trigger = Arc::new(
        TriggerButton::new("First").with_geometry(Rect::new(0.0, 0.0, 100.0, 20.0)),
    );
    let second_trigger = Arc::new(
        TriggerButton::new("Second").with_geometry(Rect::new(300.0, 0.0, 100.0, 20.0)),
    );
    let first = DropdownMenu::new(
        &document,
        first_trigger.clone(),
        vec![MenuItem::new("A", "a")],
        DropdownConfig::default(),
    );
    let second = DropdownMenu::new(
        &document,
        second_trigger.clone(),
        vec![MenuItem::new("B", "b")],
        DropdownConfig::default(),
    );

    first_trigger.click();
    let mut press = PointerPressEvent::new(Point::new(310.0, 10.0));
    document.pointer_down(&mut press);
    second_trigger.click();

    assert!(!first.is_open());
    assert!(second.is_open());
    assert_eq!(document.listener_count(), 2);
}
