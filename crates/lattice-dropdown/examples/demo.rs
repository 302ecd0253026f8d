//! Lattice Dropdown Demo
//!
//! Drives a five-item dropdown through a scripted session (click, arrow
//! keys, Enter, outside press) and prints the accessibility tree after each
//! step.
//!
//! Run with: cargo run -p lattice-dropdown --example demo [config.toml]
//!
//! Set `RUST_LOG=lattice_dropdown=trace` for state machine details.

use std::sync::Arc;

use lattice_dropdown::prelude::*;
use tracing_subscriber::EnvFilter;

fn print_tree(node: &AccessibleNode, depth: usize) {
    let mut line = format!("{}{}", "  ".repeat(depth), node.role);
    if let Some(name) = &node.name {
        line.push_str(&format!(" \"{name}\""));
    }
    if node.has_popup {
        line.push_str(" haspopup");
    }
    if let Some(expanded) = node.expanded {
        line.push_str(&format!(" expanded={expanded}"));
    }
    if node.focused {
        line.push_str(" [focused]");
    }
    println!("{line}");
    for child in &node.children {
        print_tree(child, depth + 1);
    }
}

fn step(title: &str, menu: &DropdownMenu<TriggerButton>) {
    println!("\n== {title} ==");
    print_tree(&menu.accessibility_tree(), 1);
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lattice_dropdown=debug")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => DropdownConfig::load(path)?,
        None => DropdownConfig::default(),
    };

    let items = [
        ("Profile", "profile"),
        ("Settings", "settings"),
        ("Item 1", "item1"),
        ("Item 2", "item2"),
        ("Item 3", "item3"),
    ]
    .into_iter()
    .map(|(label, value)| {
        MenuItem::new(label, value).with_callback(move || println!("{label} clicked"))
    })
    .collect();

    let document = Document::new();
    let trigger = Arc::new(
        TriggerButton::new("Open Menu").with_geometry(Rect::new(200.0, 120.0, 140.0, 40.0)),
    );
    let menu = DropdownMenu::try_new(&document, trigger.clone(), items, config)?;
    menu.selected().connect(|value| println!("Selected: {value}"));

    println!("Trigger renders as \"{}\"", trigger.display_text());
    println!("Menu classes: {}", menu.menu_class_names());
    step("initial", &menu);

    trigger.click();
    step("after click", &menu);

    for key in [Key::ArrowDown, Key::End, Key::ArrowDown, Key::ArrowUp] {
        let mut event = KeyPressEvent::key(key);
        document.key_down(&mut event);
        step(&format!("after {key}"), &menu);
    }

    // Focus is on an item, so only the document sees the key.
    let mut enter = KeyPressEvent::key(Key::Enter);
    document.key_down(&mut enter);
    step("after Enter", &menu);

    trigger.click();
    let mut outside = PointerPressEvent::new(Point::new(10.0, 10.0));
    document.pointer_down(&mut outside);
    step("after outside press", &menu);

    Ok(())
}
