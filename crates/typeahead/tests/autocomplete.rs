//! Integration tests for the autocomplete control.
//!
//! Time is driven by a manual clock, so nothing here sleeps.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use typeahead::autocomplete::prefix_filter;
use typeahead::{
    Autocomplete, AutocompleteBuilder, AutocompleteConfig, AutocompleteEvent, AutocompleteItem,
    DropdownView, FilterError, FocusAfterFilter, Key, Selection,
};
use typeahead_core::{
    ManualClock, MouseButton, Point, PointerEvent, PointerEventBus, Property, Rect,
    SharedTaskScheduler, Signal,
};

const FRUITS: &[&str] = &[
    "Apple",
    "Apricot",
    "Banana",
    "Blackberry",
    "Blueberry",
    "Cherry",
    "Cantaloupe",
    "Date",
    "Dragonfruit",
    "Durian",
    "Elderberry",
    "Grape",
    "Grapefruit",
    "Green Apple",
    "Honeydew",
    "Kiwi",
    "Lemon",
    "Lime",
    "Mango",
    "Peach",
    "Pear",
    "Pineapple",
    "Watermelon",
];

struct Host {
    clock: Arc<ManualClock>,
    scheduler: Arc<SharedTaskScheduler>,
    pointer: Arc<PointerEventBus>,
}

impl Host {
    fn build<T: AutocompleteItem>(&self, builder: AutocompleteBuilder<T>) -> Autocomplete<T> {
        builder.build(self.scheduler.clone(), self.pointer.clone())
    }

    fn advance(&self, millis: u64) -> usize {
        self.clock.advance(Duration::from_millis(millis));
        self.scheduler.process_ready()
    }

    /// Let the default debounce delay elapse.
    fn settle(&self) -> usize {
        self.advance(300)
    }

    fn press(&self, x: f32, y: f32) {
        self.pointer
            .dispatch(&PointerEvent::down(Point::new(x, y), MouseButton::Left));
    }
}

fn setup() -> Host {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let clock = Arc::new(ManualClock::new());
    Host {
        scheduler: Arc::new(SharedTaskScheduler::with_clock(clock.clone())),
        clock,
        pointer: Arc::new(PointerEventBus::new()),
    }
}

fn record<A: Clone + Send + 'static>(signal: &Signal<A>) -> Arc<Mutex<Vec<A>>> {
    let received = Arc::new(Mutex::new(Vec::new()));
    let received_clone = received.clone();
    signal.connect(move |args: &A| received_clone.lock().push(args.clone()));
    received
}

fn fruits() -> Vec<&'static str> {
    FRUITS.to_vec()
}

// =========================================================================
// Debounced filtering
// =========================================================================

#[test]
fn test_debounce_collapses_keystrokes() {
    let host = setup();
    let queries = Arc::new(Mutex::new(Vec::new()));

    let queries_clone = queries.clone();
    let control = host.build(Autocomplete::builder(fruits()).with_filter(
        move |query: &str, options: &[&'static str]| {
            queries_clone.lock().push(query.to_string());
            prefix_filter(query, options, |option| option.to_string())
        },
    ));
    let passes = record(control.filtered_changed());

    control.handle_event(AutocompleteEvent::text("a"));
    host.advance(20);
    control.handle_event(AutocompleteEvent::text("ap"));
    host.advance(20);
    control.handle_event(AutocompleteEvent::text("app"));

    // One task pending, and it is not due yet
    assert_eq!(host.scheduler.active_count(), 1);
    assert_eq!(host.advance(299), 0);
    assert!(passes.lock().is_empty());

    assert_eq!(host.advance(1), 1);
    assert_eq!(*queries.lock(), vec!["app".to_string()]);
    assert_eq!(*passes.lock(), vec![1]);
    assert_eq!(control.filtered(), vec!["Apple"]);
}

#[test]
fn test_default_prefix_filter() {
    let host = setup();
    let control = host.build(Autocomplete::builder(vec!["Apple", "Banana", "Apricot"]));

    control.on_text_changed("ap");
    host.settle();
    assert_eq!(control.filtered(), vec!["Apple", "Apricot"]);

    control.on_text_changed("");
    host.settle();
    assert_eq!(control.filtered(), vec!["Apple", "Banana", "Apricot"]);

    control.on_text_changed("z");
    host.settle();
    assert!(control.filtered().is_empty());
}

#[test]
fn test_owner_updates_rearm_filter() {
    let host = setup();
    let control = host.build(Autocomplete::builder(vec!["Apple", "Banana"]));
    host.settle();
    assert!(!control.has_pending_filter());

    control.set_options(vec!["Blueberry", "Cherry"]);
    assert!(control.has_pending_filter());
    // Not visible until the pass runs
    assert_eq!(control.filtered(), vec!["Apple", "Banana"]);
    host.settle();
    assert_eq!(control.filtered(), vec!["Blueberry", "Cherry"]);

    control.set_filter(|_: &str, options: &[&'static str]| options.iter().rev().cloned().collect());
    host.settle();
    assert_eq!(control.filtered(), vec!["Cherry", "Blueberry"]);

    control.clear_filter();
    host.settle();
    assert_eq!(control.filtered(), vec!["Blueberry", "Cherry"]);

    // A shorter delay applies to the re-armed pass
    control.on_text_changed("c");
    control.set_debounce_time(Duration::from_millis(50));
    assert_eq!(host.advance(50), 1);
    assert_eq!(control.filtered(), vec!["Cherry"]);
    assert_eq!(control.config().debounce_ms, 50);
}

#[test]
fn test_filter_failure_empties_list() {
    let host = setup();
    let control = host.build(Autocomplete::builder(fruits()).with_fallible_filter(
        |query: &str, options: &[&'static str]| {
            if query == "boom" {
                Err(FilterError::rejected(query, "lookup failed"))
            } else {
                Ok(prefix_filter(query, options, |option| option.to_string()))
            }
        },
    ));
    let failures = record(control.filter_failed());
    let passes = record(control.filtered_changed());

    control.on_text_changed("boom");
    host.settle();

    assert!(control.filtered().is_empty());
    assert_eq!(
        *failures.lock(),
        vec![FilterError::rejected("boom", "lookup failed")]
    );
    assert_eq!(*passes.lock(), vec![0]);
    assert_eq!(control.view().dropdown, DropdownView::NoResults);

    // The next good query recovers
    control.on_text_changed("ki");
    host.settle();
    assert_eq!(control.filtered(), vec!["Kiwi"]);
}

#[test]
fn test_panicking_filter_is_contained() {
    let host = setup();
    let control = host.build(Autocomplete::builder(fruits()));
    let failures = record(control.filter_failed());

    control.set_fallible_filter(
        |_: &str, _: &[&'static str]| -> Result<Vec<&'static str>, FilterError> {
            panic!("index out of range")
        },
    );
    control.on_text_changed("a");
    host.settle();

    assert!(control.filtered().is_empty());
    assert!(matches!(
        failures.lock().as_slice(),
        [FilterError::Panicked { query, .. }] if query == "a"
    ));
}

#[test]
fn test_flush_filter_reports_failure() {
    let host = setup();
    let control = host.build(
        Autocomplete::builder(fruits())
            .with_fallible_filter(|query: &str, _: &[&'static str]| {
                Err(FilterError::rejected(query, "offline"))
            }),
    );

    control.on_text_changed("pe");
    let err = control.flush_filter().unwrap_err();
    assert!(matches!(err, typeahead::Error::Filter(_)));
    assert!(!control.has_pending_filter());
}

// =========================================================================
// Visibility and focus
// =========================================================================

#[test]
fn test_input_click_toggles() {
    let host = setup();
    let control = host.build(Autocomplete::builder(fruits()));
    let opens = record(control.open_changed());

    assert!(control.handle_event(AutocompleteEvent::InputClicked));
    assert!(control.is_open());
    assert!(control.handle_event(AutocompleteEvent::InputClicked));
    assert!(!control.is_open());
    assert_eq!(*opens.lock(), vec![true, false]);
}

#[test]
fn test_keyboard_wraparound() {
    let host = setup();
    let control = host.build(Autocomplete::builder(vec!["Apple", "Apricot", "Banana"]));
    host.settle();
    control.on_input_clicked();

    // From no focus, up goes to the last row
    assert!(control.on_key(Key::ArrowUp));
    assert_eq!(control.focused_index(), 2);

    // Down from the last row wraps to the first
    assert!(control.on_key(Key::ArrowDown));
    assert_eq!(control.focused_index(), 0);

    // Up from the first row wraps to the last
    assert!(control.on_key(Key::ArrowUp));
    assert_eq!(control.focused_index(), 2);

    assert!(control.on_key(Key::ArrowUp));
    assert_eq!(control.focused_index(), 1);
    assert_eq!(control.focused_option(), Some("Apricot"));
}

#[test]
fn test_mouse_enter_focuses_row() {
    let host = setup();
    let control = host.build(Autocomplete::builder(fruits()));
    host.settle();
    control.on_input_clicked();

    assert!(control.handle_event(AutocompleteEvent::RowMouseEnter(4)));
    assert_eq!(control.focused_index(), 4);
    assert_eq!(control.view().focused_row().map(|row| row.label.as_str()), Some("Blueberry"));

    // Rows past the end are ignored
    assert!(!control.handle_event(AutocompleteEvent::RowMouseEnter(100)));
    assert_eq!(control.focused_index(), 4);
}

#[test]
fn test_outside_click_closes() {
    let host = setup();
    let control = host.build(Autocomplete::builder(fruits()));
    let opens = record(control.open_changed());
    control.set_input_rect(Some(Rect::new(0.0, 0.0, 200.0, 30.0)));
    control.set_dropdown_rect(Some(Rect::new(0.0, 30.0, 200.0, 150.0)));

    control.on_input_clicked();
    assert!(control.is_open());

    // Inside the dropdown
    host.press(100.0, 100.0);
    assert!(control.is_open());

    // Inside the input
    host.press(100.0, 15.0);
    assert!(control.is_open());

    // Moves never close
    host.pointer
        .dispatch(&PointerEvent::moved(Point::new(500.0, 500.0)));
    assert!(control.is_open());

    // Anywhere else
    host.press(500.0, 500.0);
    assert!(!control.is_open());
    assert_eq!(*opens.lock(), vec![true, false]);

    // Already closed: nothing to report
    host.press(500.0, 500.0);
    assert_eq!(opens.lock().len(), 2);
}

#[test]
fn test_press_before_regions_known_keeps_open() {
    let host = setup();
    let control = host.build(Autocomplete::builder(vec!["Apple", "Banana", "Cherry"]));
    let values = record(control.value_changed());
    host.settle();
    control.on_input_clicked();

    // No regions reported yet: the press may well be on a row
    host.press(5.0, 40.0);
    assert!(control.is_open());
    assert!(control.on_row_pointer_down(1));
    assert_eq!(*values.lock(), vec![Selection::One("Banana")]);

    // One region alone is still not enough to call a press outside
    control.set_input_rect(Some(Rect::new(0.0, 0.0, 200.0, 30.0)));
    host.press(500.0, 500.0);
    assert!(control.is_open());

    control.set_dropdown_rect(Some(Rect::new(0.0, 30.0, 200.0, 150.0)));
    host.press(500.0, 500.0);
    assert!(!control.is_open());
}

#[test]
fn test_escape_closes() {
    let host = setup();
    let control = host.build(Autocomplete::builder(fruits()));

    control.on_text_changed("b");
    assert!(control.is_open());
    assert!(control.handle_event(AutocompleteEvent::KeyPress(Key::Escape)));
    assert!(!control.is_open());
    assert!(!control.handle_event(AutocompleteEvent::KeyPress(Key::Escape)));
    assert!(!control.handle_event(AutocompleteEvent::KeyPress(Key::Other)));
}

#[test]
fn test_empty_results() {
    let host = setup();
    let control = host.build(Autocomplete::builder(fruits()));

    control.on_text_changed("zzz");
    host.settle();

    let view = control.view();
    assert!(view.open);
    assert_eq!(view.dropdown, DropdownView::NoResults);

    assert!(!control.on_key(Key::ArrowDown));
    assert!(!control.on_key(Key::ArrowUp));
    assert!(!control.on_key(Key::Enter));
    assert_eq!(control.focused_index(), -1);
}

#[test]
fn test_empty_options() {
    let host = setup();
    let control = host.build(Autocomplete::<&str>::builder(Vec::new()));
    host.settle();
    control.on_input_clicked();

    assert_eq!(control.view().dropdown, DropdownView::NoResults);
    assert!(!control.on_key(Key::ArrowDown));
    assert_eq!(control.focused_index(), -1);
}

#[test]
fn test_focus_clamped_after_filter() {
    let host = setup();
    let control = host.build(Autocomplete::builder(fruits()));
    host.settle();
    control.on_input_clicked();
    control.on_row_mouse_enter(5);

    control.on_text_changed("ba");
    // Focus is not touched until the pass runs
    assert_eq!(control.focused_index(), 5);
    host.settle();

    assert_eq!(control.filtered(), vec!["Banana"]);
    assert_eq!(control.focused_index(), 0);

    control.on_text_changed("q");
    host.settle();
    assert_eq!(control.focused_index(), -1);
}

#[test]
fn test_focus_reset_after_filter() {
    let host = setup();
    let control = host.build(
        Autocomplete::builder(fruits()).with_config(
            AutocompleteConfig::new().with_focus_after_filter(FocusAfterFilter::Reset),
        ),
    );
    host.settle();
    control.on_input_clicked();
    control.on_row_mouse_enter(1);

    control.on_text_changed("a");
    host.settle();
    assert_eq!(control.filtered(), vec!["Apple", "Apricot"]);
    assert_eq!(control.focused_index(), -1);
}

// =========================================================================
// Selection
// =========================================================================

#[test]
fn test_single_commit() {
    let host = setup();
    let control = host.build(
        Autocomplete::builder(vec!["Apple", "Apricot", "Banana"]).with_value(Selection::One("")),
    );
    let values = record(control.value_changed());
    host.settle();
    control.on_input_clicked();

    assert!(control.handle_event(AutocompleteEvent::RowPointerDown(2)));
    assert_eq!(*values.lock(), vec![Selection::One("Banana")]);

    // Committing does not change the control's copy until the owner feeds it back
    assert!(!control.is_selected(&"Banana"));
    control.set_value(Selection::One("Banana"));
    assert!(control.is_selected(&"Banana"));
    assert!(!control.is_selected(&"Apple"));

    let view = control.view();
    let selected: Vec<_> = view
        .dropdown
        .rows()
        .iter()
        .filter(|row| row.selected)
        .map(|row| row.label.as_str())
        .collect();
    assert_eq!(selected, vec!["Banana"]);
    assert!(view.dropdown.rows().iter().all(|row| !row.checkbox));

    // Neither the dropdown nor the text are touched by default
    assert!(control.is_open());
}

#[test]
fn test_enter_commits_focused_row() {
    let host = setup();
    let control = host.build(Autocomplete::builder(fruits()));
    let values = record(control.value_changed());

    control.on_text_changed("gr");
    host.settle();
    assert_eq!(control.filtered(), vec!["Grape", "Grapefruit", "Green Apple"]);

    control.on_key(Key::ArrowDown);
    control.on_key(Key::ArrowDown);
    assert!(control.on_key(Key::Enter));
    assert_eq!(*values.lock(), vec![Selection::One("Grapefruit")]);
}

#[test]
fn test_multi_toggle() {
    let host = setup();
    let control = host.build(
        Autocomplete::builder(vec!["Apple", "Banana", "Cherry"])
            .with_config(AutocompleteConfig::new().with_multiple(true).with_close_on_select(true))
            .with_value(Selection::Many(vec!["Apple"])),
    );
    let values = record(control.value_changed());
    host.settle();
    control.on_input_clicked();

    assert!(control.is_selected(&"Apple"));
    control.on_row_pointer_down(0);
    control.on_row_checkbox_toggled(1);

    assert_eq!(
        *values.lock(),
        vec![
            Selection::Many(vec![]),
            Selection::Many(vec!["Apple", "Banana"]),
        ]
    );

    // Multi-select never closes, whatever the config says
    assert!(control.is_open());
    assert!(control.view().dropdown.rows().iter().all(|row| row.checkbox));
}

#[test]
fn test_owner_property_round_trip() {
    let host = setup();
    let store = Arc::new(Property::new(Selection::Many(vec!["Apple", "Banana", "Apple"])));
    let control = Arc::new(
        host.build(
            Autocomplete::builder(vec!["Apple", "Banana", "Cherry"])
                .with_config(AutocompleteConfig::new().with_multiple(true))
                .with_value(store.get()),
        ),
    );
    {
        let store = store.clone();
        let control_weak = Arc::downgrade(&control);
        control
            .value_changed()
            .connect(move |value: &Selection<&'static str>| {
                if store.set(value.clone()) {
                    if let Some(control) = control_weak.upgrade() {
                        control.set_value(value.clone());
                    }
                }
            });
    }
    host.settle();
    control.on_input_clicked();

    // Toggling off drops every copy of the option
    control.on_row_checkbox_toggled(0);
    assert_eq!(store.get(), Selection::Many(vec!["Banana"]));
    assert!(!control.is_selected(&"Apple"));

    control.on_row_checkbox_toggled(2);
    assert_eq!(store.get(), Selection::Many(vec!["Banana", "Cherry"]));
    assert!(control.is_selected(&"Cherry"));
}

#[test]
fn test_checkbox_ignored_in_single_mode() {
    let host = setup();
    let control = host.build(Autocomplete::builder(fruits()));
    let values = record(control.value_changed());
    host.settle();
    control.on_input_clicked();

    assert!(!control.handle_event(AutocompleteEvent::RowCheckboxToggled(0)));
    assert!(values.lock().is_empty());
}

#[test]
fn test_commit_unknown_option() {
    let host = setup();
    let control = host.build(Autocomplete::builder(fruits()));
    let values = record(control.value_changed());

    assert!(control.commit("Quince"));
    assert_eq!(*values.lock(), vec![Selection::One("Quince")]);
}

#[test]
fn test_close_and_clear_on_select() {
    let host = setup();
    let control = host.build(
        Autocomplete::builder(fruits()).with_config(
            AutocompleteConfig::new()
                .with_close_on_select(true)
                .with_clear_input_on_select(true),
        ),
    );
    let values = record(control.value_changed());
    let inputs = record(control.input_changed());
    let opens = record(control.open_changed());

    control.on_text_changed("ba");
    host.settle();
    control.on_key(Key::ArrowDown);
    control.on_key(Key::Enter);

    assert_eq!(*values.lock(), vec![Selection::One("Banana")]);
    assert_eq!(*inputs.lock(), vec!["ba".to_string(), String::new()]);
    assert_eq!(*opens.lock(), vec![true, false]);
    assert!(!control.is_open());
    assert_eq!(control.input_text(), "");

    // Clearing the text re-filters
    assert!(control.has_pending_filter());
    host.settle();
    assert_eq!(control.filtered().len(), FRUITS.len());
}

// =========================================================================
// Disabled, loading and rendering
// =========================================================================

#[test]
fn test_disabled_ignores_user_events() {
    let host = setup();
    let control = host.build(
        Autocomplete::builder(fruits()).with_config(AutocompleteConfig::new().with_disabled(true)),
    );
    let values = record(control.value_changed());
    let inputs = record(control.input_changed());
    host.settle();

    assert!(!control.handle_event(AutocompleteEvent::text("ap")));
    assert!(!control.handle_event(AutocompleteEvent::InputClicked));
    assert!(!control.handle_event(AutocompleteEvent::KeyPress(Key::ArrowDown)));
    assert!(!control.handle_event(AutocompleteEvent::RowMouseEnter(0)));
    assert!(!control.commit("Apple"));

    assert_eq!(control.input_text(), "");
    assert!(!control.is_open());
    assert!(values.lock().is_empty());
    assert!(inputs.lock().is_empty());
    assert!(control.view().disabled);

    control.set_disabled(false);
    assert!(control.handle_event(AutocompleteEvent::InputClicked));
}

#[test]
fn test_disabling_closes_dropdown() {
    let host = setup();
    let control = host.build(Autocomplete::builder(fruits()));
    let opens = record(control.open_changed());

    control.on_input_clicked();
    control.set_disabled(true);
    assert!(!control.is_open());
    assert_eq!(*opens.lock(), vec![true, false]);
}

#[test]
fn test_view_carries_config_text() {
    let host = setup();
    let control = host.build(
        Autocomplete::builder(fruits()).with_config(
            AutocompleteConfig::new()
                .with_label("Fruit")
                .with_description("Pick a fruit from the list.")
                .with_placeholder("Start typing...")
                .with_loading(true),
        ),
    );

    let view = control.view();
    assert_eq!(view.label, "Fruit");
    assert_eq!(view.description, "Pick a fruit from the list.");
    assert_eq!(view.placeholder, "Start typing...");
    assert!(view.loading);
    assert!(!view.open);
    assert_eq!(view.dropdown, DropdownView::Hidden);

    control.set_loading(false);
    assert!(!control.view().loading);
}

#[test]
fn test_render_option_receives_selection() {
    let host = setup();
    let control = host.build(
        Autocomplete::builder(vec!["Lemon", "Lime"])
            .with_value(Selection::One("Lime"))
            .with_render_option(|option: &&str, selected| {
                if selected {
                    format!("[x] {option}")
                } else {
                    format!("[ ] {option}")
                }
            }),
    );
    host.settle();
    control.on_input_clicked();

    assert_eq!(control.view().row_labels(), vec!["[ ] Lemon", "[x] Lime"]);
}

#[test]
fn test_custom_text_representation() {
    #[derive(Debug, Clone, PartialEq)]
    struct Fruit {
        id: u32,
        name: &'static str,
    }

    let host = setup();
    let options = vec![
        Fruit { id: 7, name: "Mango" },
        Fruit { id: 8, name: "Melon" },
        Fruit { id: 9, name: "Peach" },
    ];
    let control = host.build(AutocompleteBuilder::with_text(options, |fruit: &Fruit| {
        fruit.name.to_string()
    }));

    control.on_text_changed("m");
    host.settle();

    let ids: Vec<u32> = control.filtered().iter().map(|fruit| fruit.id).collect();
    assert_eq!(ids, vec![7, 8]);
    assert_eq!(control.view().row_labels(), vec!["Mango", "Melon"]);
}

#[test]
fn test_config_from_toml_drives_control() {
    let host = setup();
    let config = AutocompleteConfig::from_toml_str(
        r#"
        label = "Fruit"
        multiple = true
        debounce_ms = 100
        "#,
    )
    .unwrap();
    let control = host.build(Autocomplete::builder(fruits()).with_config(config));

    control.on_text_changed("pe");
    assert_eq!(host.advance(100), 1);
    assert_eq!(control.filtered(), vec!["Peach", "Pear"]);
}

// =========================================================================
// Lifecycle
// =========================================================================

#[test]
fn test_drop_releases_timer_and_listener() {
    let host = setup();
    let control = host.build(Autocomplete::builder(fruits()));

    control.on_text_changed("a");
    assert_eq!(host.scheduler.active_count(), 1);
    assert_eq!(host.pointer.subscriber_count(), 1);

    drop(control);
    assert_eq!(host.scheduler.active_count(), 0);
    assert_eq!(host.pointer.subscriber_count(), 0);

    assert_eq!(host.settle(), 0);
    host.press(0.0, 0.0);
}

#[test]
fn test_controls_are_independent() {
    let host = setup();
    let first = host.build(Autocomplete::builder(fruits()));
    let second = host.build(Autocomplete::builder(fruits()));
    assert_eq!(host.pointer.subscriber_count(), 2);

    first.on_text_changed("ch");
    second.on_text_changed("da");
    host.settle();

    assert_eq!(first.filtered(), vec!["Cherry"]);
    assert_eq!(second.filtered(), vec!["Date"]);

    drop(first);
    assert_eq!(host.pointer.subscriber_count(), 1);
}
