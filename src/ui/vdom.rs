//! Declarative view nodes. The action menu composes these; a renderer walks
//! the tree and realises it (see `ui::render` for the egui one).

use std::rc::Rc;

/// Events a view node can bind handlers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Click,
    Change,
    Submit,
}

/// Handler shapes, keyed by the payload the renderer delivers.
#[derive(Clone)]
pub enum Handler {
    Unit(Rc<dyn Fn()>),
    Flag(Rc<dyn Fn(bool)>),
}

impl Handler {
    pub fn unit(f: impl Fn() + 'static) -> Self {
        Handler::Unit(Rc::new(f))
    }

    pub fn flag(f: impl Fn(bool) + 'static) -> Self {
        Handler::Flag(Rc::new(f))
    }
}

/// Payload delivered alongside an event.
#[derive(Clone, Copy)]
pub enum Payload {
    None,
    Flag(bool),
}

/// A handler registered for an event, plus an optional callback invoked after
/// the handler returns (typically the controller redraw request).
#[derive(Clone)]
pub struct EventBinding {
    pub event: Event,
    handler: Handler,
    after: Option<Rc<dyn Fn()>>,
}

/// Read/write wiring for a numeric range input. Raw input is parsed; a value
/// that fails to parse is dropped for that event.
#[derive(Clone)]
pub struct RangeBinding {
    read: Rc<dyn Fn() -> i64>,
    write: Rc<dyn Fn(i64)>,
}

impl RangeBinding {
    pub fn new(read: impl Fn() -> i64 + 'static, write: impl Fn(i64) + 'static) -> Self {
        Self {
            read: Rc::new(read),
            write: Rc::new(write),
        }
    }

    /// Current value, as the input should display it.
    pub fn current(&self) -> i64 {
        (self.read)()
    }

    /// Typed write from a renderer that already holds a number.
    pub fn set(&self, value: i64) {
        (self.write)(value)
    }

    /// Raw input from a generic renderer.
    pub fn input(&self, raw: &str) {
        if let Ok(value) = raw.trim().parse::<i64>() {
            (self.write)(value);
        }
    }
}

/// A node in the declarative view tree: tag, classes, attributes, optional
/// leaf text, children, event bindings, and optional range wiring.
#[derive(Clone, Default)]
pub struct VNode {
    pub tag: &'static str,
    pub classes: Vec<&'static str>,
    pub attrs: Vec<(&'static str, String)>,
    pub text: Option<String>,
    pub children: Vec<VNode>,
    pub events: Vec<EventBinding>,
    pub range: Option<RangeBinding>,
}

impl VNode {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Default::default()
        }
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    /// Adds `class` only when `on` holds.
    pub fn class_if(mut self, class: &'static str, on: bool) -> Self {
        if on {
            self.classes.push(class);
        }
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: VNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn child_if(mut self, child: Option<VNode>) -> Self {
        if let Some(child) = child {
            self.children.push(child);
        }
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = VNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn on(mut self, event: Event, handler: Handler) -> Self {
        self.events.push(EventBinding {
            event,
            handler,
            after: None,
        });
        self
    }

    /// Binds `handler` for `event` and runs `after` once the handler returns.
    pub fn on_after(mut self, event: Event, handler: Handler, after: Rc<dyn Fn()>) -> Self {
        self.events.push(EventBinding {
            event,
            handler,
            after: Some(after),
        });
        self
    }

    pub fn range(mut self, binding: RangeBinding) -> Self {
        self.range = Some(binding);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Depth-first search for the first node carrying `class`, self included.
    pub fn find(&self, class: &str) -> Option<&VNode> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(class))
    }

    /// Depth-first search by element id, self included.
    pub fn find_id(&self, id: &str) -> Option<&VNode> {
        if self.attr_value("id") == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_id(id))
    }

    /// Dispatches `event` to every matching binding. A payload that does not
    /// fit the handler shape is dropped, as is an event nothing is bound to.
    pub fn emit(&self, event: Event, payload: Payload) {
        for binding in self.events.iter().filter(|b| b.event == event) {
            let ran = match (&binding.handler, payload) {
                (Handler::Unit(f), _) => {
                    f();
                    true
                }
                (Handler::Flag(f), Payload::Flag(value)) => {
                    f(value);
                    true
                }
                (Handler::Flag(_), Payload::None) => false,
            };
            if ran {
                if let Some(after) = &binding.after {
                    after();
                }
            }
        }
    }
}

/// Hidden form field carried on submission forms.
pub fn hidden_input(name: &'static str, value: impl Into<String>) -> VNode {
    VNode::new("input")
        .attr("type", "hidden")
        .attr("name", name)
        .attr("value", value)
}
