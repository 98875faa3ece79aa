//! Fruit Picker Example
//!
//! Drives an autocomplete control through a scripted session and prints the
//! view after each step:
//! - typing with debounced filtering
//! - keyboard navigation and Enter to select
//! - the owner feeding the selected value back
//! - closing on an outside click
//!
//! Run with: RUST_LOG=typeahead=debug cargo run -p typeahead --example fruit_picker

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use typeahead::prelude::*;
use tracing_subscriber::EnvFilter;

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
    "Jackfruit",
    "Kiwi",
    "Lemon",
    "Lime",
    "Mango",
    "Mangosteen",
    "Nectarine",
    "Orange",
    "Papaya",
    "Passionfruit",
    "Peach",
    "Pear",
    "Pineapple",
    "Plum",
    "Pomegranate",
    "Raspberry",
    "Strawberry",
    "Tangerine",
    "Tomato",
    "Watermelon",
];

const CONFIG: &str = r#"
label = "Fruit"
description = "Pick a fruit from the list."
placeholder = "Start typing..."
debounce_ms = 100
"#;

/// Host side of the demo: owns the clock and the event sources.
struct Host {
    clock: Arc<ManualClock>,
    scheduler: Arc<SharedTaskScheduler>,
    pointer: Arc<PointerEventBus>,
}

impl Host {
    fn new() -> Self {
        let clock = Arc::new(ManualClock::new());
        Self {
            scheduler: Arc::new(SharedTaskScheduler::with_clock(clock.clone())),
            clock,
            pointer: Arc::new(PointerEventBus::new()),
        }
    }

    /// Let `millis` pass and run whatever became due.
    fn wait(&self, millis: u64) {
        self.clock.advance(Duration::from_millis(millis));
        self.scheduler.process_ready();
    }
}

fn print_view(step: &str, view: &AutocompleteView) {
    println!("--- {step}");
    println!(
        "{} [{}]{}",
        view.label,
        if view.input_text.is_empty() {
            view.placeholder.as_str()
        } else {
            view.input_text.as_str()
        },
        if view.loading { " (loading)" } else { "" }
    );
    match &view.dropdown {
        DropdownView::Hidden => {}
        DropdownView::NoResults => println!("    (no results)"),
        DropdownView::Rows(rows) => {
            for row in rows {
                let marker = if row.focused { '>' } else { ' ' };
                println!("  {marker} {}", row.label);
            }
        }
    }
    if !view.description.is_empty() {
        println!("{}", view.description);
    }
}

fn main() -> typeahead::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let host = Host::new();
    let config = AutocompleteConfig::from_toml_str(CONFIG)?;

    // The owner keeps the selected value.
    let selected = Arc::new(Property::new(Selection::<&str>::None));

    let picker = Arc::new(
        Autocomplete::builder(FRUITS.to_vec())
            .with_config(config)
            .with_value(selected.get())
            .with_render_option(|fruit: &&str, is_selected| {
                if is_selected {
                    format!("{fruit} *")
                } else {
                    fruit.to_string()
                }
            })
            .build(host.scheduler.clone(), host.pointer.clone()),
    );
    picker.set_input_rect(Some(Rect::new(0.0, 0.0, 240.0, 32.0)));
    picker.set_dropdown_rect(Some(Rect::new(0.0, 32.0, 240.0, 200.0)));

    let log = Arc::new(Mutex::new(Vec::new()));
    {
        let selected = selected.clone();
        let picker_weak = Arc::downgrade(&picker);
        let log = log.clone();
        picker.value_changed().connect(move |value| {
            if selected.set(value.clone()) {
                log.lock().push(format!("value changed to {value:?}"));
                if let Some(picker) = picker_weak.upgrade() {
                    picker.set_value(value.clone());
                }
            }
        });
    }

    for text in ["p", "pe", "pea"] {
        picker.handle_event(AutocompleteEvent::text(text));
        host.wait(30);
    }
    print_view("typed 'pea' quickly (filter still pending)", &picker.view());

    host.wait(100);
    print_view("after the debounce delay", &picker.view());

    picker.handle_event(AutocompleteEvent::KeyPress(Key::ArrowDown));
    picker.handle_event(AutocompleteEvent::KeyPress(Key::ArrowDown));
    print_view("arrow down twice", &picker.view());

    picker.handle_event(AutocompleteEvent::KeyPress(Key::Enter));
    print_view("enter", &picker.view());

    host.pointer
        .dispatch(&PointerEvent::down(Point::new(400.0, 400.0), MouseButton::Left));
    print_view("clicked outside", &picker.view());

    for line in log.lock().iter() {
        println!("{line}");
    }
    println!("owner holds: {:?}", selected.get());

    Ok(())
}
