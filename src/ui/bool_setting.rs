//! Labelled on/off rows shared by the panel sections.

use std::rc::Rc;

use crate::i18n::Trans;
use crate::ui::vdom::{Event, Handler, VNode};

/// Descriptor for one toggle row. Built per render, consumed immediately.
pub struct BoolSetting {
    /// Translation key for the row label.
    pub name: &'static str,
    /// Tooltip, already resolved to display text.
    pub title: Option<String>,
    pub id: &'static str,
    pub checked: bool,
    pub disabled: bool,
    pub change: Rc<dyn Fn(bool)>,
}

/// Renders `setting` as a checkbox + label row, requesting `redraw` after the
/// change handler runs.
pub fn bool_setting(setting: BoolSetting, trans: &Trans, redraw: Rc<dyn Fn()>) -> VNode {
    let input_id = format!("analyse-toggle-{}", setting.id);
    let mut input = VNode::new("input")
        .attr("id", input_id.clone())
        .attr("type", "checkbox")
        .attr("checked", if setting.checked { "true" } else { "false" })
        .on_after(Event::Change, Handler::Flag(setting.change), redraw);
    if setting.disabled {
        input = input.attr("disabled", "true");
    }

    let mut row = VNode::new("div").class("setting");
    if let Some(title) = setting.title {
        row = row.attr("title", title);
    }
    row.child(input).child(
        VNode::new("label")
            .attr("for", input_id)
            .text(trans.noarg(setting.name)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use crate::ui::vdom::Payload;

    #[test]
    fn change_flows_through_then_redraws() {
        let seen = Rc::new(Cell::new(None));
        let redrawn = Rc::new(Cell::new(false));
        let row = bool_setting(
            BoolSetting {
                name: "evaluation_gauge",
                title: None,
                id: "gauge",
                checked: true,
                disabled: false,
                change: {
                    let seen = Rc::clone(&seen);
                    Rc::new(move |v| seen.set(Some(v)))
                },
            },
            &Trans::default(),
            {
                let redrawn = Rc::clone(&redrawn);
                Rc::new(move || redrawn.set(true))
            },
        );

        let input = row.find_id("analyse-toggle-gauge").unwrap();
        assert_eq!(input.attr_value("checked"), Some("true"));
        assert!(input.attr_value("disabled").is_none());
        input.emit(Event::Change, Payload::Flag(false));
        assert_eq!(seen.get(), Some(false));
        assert!(redrawn.get());
    }

    #[test]
    fn disabled_rows_carry_the_attribute_and_title() {
        let row = bool_setting(
            BoolSetting {
                name: "enable",
                title: Some("Required by practice mode".to_string()),
                id: "all",
                checked: true,
                disabled: true,
                change: Rc::new(|_| {}),
            },
            &Trans::default(),
            Rc::new(|| {}),
        );
        assert_eq!(row.attr_value("title"), Some("Required by practice mode"));
        let input = row.find_id("analyse-toggle-all").unwrap();
        assert_eq!(input.attr_value("disabled"), Some("true"));
    }
}
