//! Realises the declarative view tree with egui widgets.
//!
//! Event bindings fire synchronously while walking, so callers must not hold
//! controller borrows across a call into here.

use egui::Ui;

use crate::ui::vdom::{Event, Payload, VNode};

/// Walks `node` and renders it. Nodes carrying a `hidden` attribute are
/// skipped; the app surfaces those through modal windows instead.
pub fn show(ui: &mut Ui, node: &VNode) {
    if node.attr_value("hidden").is_some() {
        return;
    }
    match node.tag {
        "h2" => {
            if let Some(text) = &node.text {
                ui.add_space(6.0);
                ui.heading(text);
            }
        }
        "div" if node.has_class("autoplay") => {
            ui.horizontal_wrapped(|ui| show_children(ui, node));
        }
        "div" if node.has_class("setting") => show_setting(ui, node),
        "a" => show_link(ui, node),
        "form" => show_form(ui, node),
        "button" => {
            let text = node.text.clone().unwrap_or_default();
            if ui.button(text).clicked() {
                node.emit(Event::Click, Payload::None);
            }
        }
        "label" => {
            if let Some(text) = &node.text {
                ui.label(text);
            }
        }
        "input" => {} // hidden fields and unanchored inputs have no widget
        "br" => ui.add_space(2.0),
        "i" => {} // icons have no egui counterpart
        _ => {
            if let Some(text) = &node.text {
                ui.label(text);
            }
            show_children(ui, node);
        }
    }
}

/// Renders only the children of `node`, ignoring its own visibility. The app
/// uses this to put hidden continuation blocks inside a modal window.
pub fn show_children(ui: &mut Ui, node: &VNode) {
    for child in &node.children {
        show(ui, child);
    }
}

fn show_link(ui: &mut Ui, node: &VNode) {
    let text = node.text.clone().unwrap_or_default();
    if let Some(href) = node.attr_value("href") {
        ui.hyperlink_to(text, href.to_string());
    } else if ui.selectable_label(node.has_class("active"), text).clicked() {
        node.emit(Event::Click, Payload::None);
    }
}

fn show_form(ui: &mut Ui, form: &VNode) {
    ui.horizontal(|ui| {
        for child in &form.children {
            match child.tag {
                "input" if child.attr_value("type") == Some("hidden") => {}
                "button" => {
                    let text = child.text.clone().unwrap_or_default();
                    if ui.button(text).clicked() {
                        form.emit(Event::Submit, Payload::None);
                    }
                }
                _ => show(ui, child),
            }
        }
    });
}

fn show_setting(ui: &mut Ui, row: &VNode) {
    let title = row.attr_value("title").map(str::to_string);
    let label = row
        .children
        .iter()
        .find(|c| c.tag == "label")
        .and_then(|c| c.text.clone())
        .unwrap_or_default();

    ui.horizontal(|ui| {
        let Some(input) = row.children.iter().find(|c| c.tag == "input") else {
            return;
        };
        match input.attr_value("type") {
            Some("checkbox") => checkbox(ui, input, &label, title.as_deref()),
            Some("range") => range(ui, input, &label, row),
            _ => {}
        }
    });
}

fn checkbox(ui: &mut Ui, input: &VNode, label: &str, title: Option<&str>) {
    let mut checked = input.attr_value("checked") == Some("true");
    let enabled = input.attr_value("disabled").is_none();
    let mut response = ui.add_enabled(enabled, egui::Checkbox::new(&mut checked, label));
    if let Some(title) = title {
        response = response.on_hover_text(title.to_string());
    }
    if response.changed() {
        input.emit(Event::Change, Payload::Flag(checked));
    }
}

fn range(ui: &mut Ui, input: &VNode, label: &str, row: &VNode) {
    let Some(binding) = &input.range else { return };
    let min: i64 = input
        .attr_value("min")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let max: i64 = input
        .attr_value("max")
        .and_then(|v| v.parse().ok())
        .unwrap_or(min);

    ui.label(label);
    let mut value = binding.current().clamp(min, max);
    let response = ui.add(egui::Slider::new(&mut value, min..=max).show_value(false));
    if response.changed() {
        binding.set(value);
    }
    if !response.hovered() {
        response.surrender_focus();
    }
    if let Some(value_text) = row.find("range-value").and_then(|c| c.text.clone()) {
        ui.label(value_text);
    }
}
