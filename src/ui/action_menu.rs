//! The action menu: board tools, notation preferences, engine settings,
//! replay speeds, and game-level actions, composed into one declarative tree.

use std::cell::RefCell;
use std::rc::Rc;

use crate::autoplay::{AutoplaySpeed, BASE_SPEEDS, EVAL_LOSS_SPEED, REALTIME_SPEED};
use crate::ctrl::{AnalyseCtrl, ConfirmRequest, FormRequest, ModalRequest};
use crate::engine::{Backend, EvalEngine};
use crate::game::Source;
use crate::pgn;
use crate::router::{self, ContinueMode};
use crate::ui::bool_setting::{bool_setting, BoolSetting};
use crate::ui::vdom::{hidden_input, Event, Handler, RangeBinding, VNode};

/// Open/closed state of the menu. The tree below is rebuilt from scratch on
/// every redraw; this flag is the only state the menu owns.
#[derive(Debug, Default)]
pub struct ActionMenu {
    open: bool,
}

impl ActionMenu {
    pub fn open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }
}

/// Builds the whole panel. Sections whose preconditions fail are simply
/// absent; nothing in here can error.
pub fn view(ctrl: &Rc<RefCell<AnalyseCtrl>>) -> VNode {
    let c = ctrl.borrow();

    let mut root = VNode::new("div")
        .class("action-menu")
        .child(tools(ctrl, &c))
        .children(notation_section(ctrl, &c))
        .children(engine_section(ctrl, &c));
    if c.mainline.len() > 4 {
        root = root
            .child(VNode::new("h2").text(c.trans.noarg("replay_mode")))
            .child(autoplay_buttons(ctrl, &c));
    }
    root.child_if(delete_button(ctrl, &c))
        .child_if(continue_links(&c))
}

fn tools(ctrl: &Rc<RefCell<AnalyseCtrl>>, c: &AnalyseCtrl) -> VNode {
    let flip = {
        let ctrl = Rc::clone(ctrl);
        VNode::new("a")
            .class("action")
            .text(c.trans.noarg("flip_board"))
            .on(Event::Click, Handler::unit(move || ctrl.borrow_mut().flip()))
    };

    let editor = if c.ongoing {
        None
    } else {
        let href = if c.data.user_analysis {
            format!("/editor?fen={}", c.node.fen)
        } else {
            format!("/{}/edit?fen={}", c.data.id, c.node.fen)
        };
        let mut link = VNode::new("a")
            .class("action")
            .attr("href", href)
            .attr("rel", "nofollow")
            .text(c.trans.noarg("board_editor"));
        if c.embed {
            link = link.attr("target", "_blank");
        }
        Some(link)
    };

    let continue_trigger = if c.can_continue() {
        let ctrl = Rc::clone(ctrl);
        let modal_id = format!("continue-with-{}", c.data.id);
        Some(
            VNode::new("a")
                .class("action")
                .text(c.trans.noarg("continue_from_here"))
                .on(
                    Event::Click,
                    Handler::unit(move || {
                        let modal = ctrl.borrow().env.modal.clone();
                        modal(ModalRequest {
                            id: modal_id.clone(),
                        });
                    }),
                ),
        )
    } else {
        None
    };

    VNode::new("div")
        .class("tools")
        .child(flip)
        .child_if(editor)
        .child_if(continue_trigger)
        .child_if(study_button(ctrl, c))
}

fn study_button(ctrl: &Rc<RefCell<AnalyseCtrl>>, c: &AnalyseCtrl) -> Option<VNode> {
    if let Some(study) = &c.study {
        if c.embed && !c.ongoing {
            return Some(
                VNode::new("a")
                    .class("action")
                    .class("study-link")
                    .attr(
                        "href",
                        format!("/study/{}#{}", study.id, study.current_chapter().id),
                    )
                    .attr("target", "_blank")
                    .text(c.trans.noarg("open_study")),
            );
        }
    }
    if c.study.is_some() || c.ongoing {
        return None;
    }

    let real_game = !c.data.user_analysis;
    let mut form = VNode::new("form")
        .class("study-form")
        .attr("method", "post")
        .attr("action", "/study/as");
    form = if real_game {
        form.child(hidden_input("game_id", c.data.id.clone()))
    } else {
        // Filled with the exported mainline at submit time.
        form.child(hidden_input("pgn", ""))
    };
    form = form
        .child(hidden_input("orientation", c.orientation_key()))
        .child(hidden_input("variant", c.data.variant.key()))
        .child(hidden_input("fen", c.data.root_fen()));

    let submit = {
        let ctrl = Rc::clone(ctrl);
        Handler::unit(move || {
            let (submit, request) = {
                let c = ctrl.borrow();
                let mut fields = Vec::new();
                if c.data.user_analysis {
                    fields.push(("pgn".to_string(), pgn::export(&c.data, &c.mainline)));
                } else {
                    fields.push(("game_id".to_string(), c.data.id.clone()));
                }
                fields.push(("orientation".to_string(), c.orientation_key().to_string()));
                fields.push(("variant".to_string(), c.data.variant.key().to_string()));
                fields.push(("fen".to_string(), c.data.root_fen()));
                (
                    c.env.submit.clone(),
                    FormRequest {
                        action: "/study/as".to_string(),
                        fields,
                    },
                )
            };
            submit(request);
        })
    };

    Some(
        form.on(Event::Submit, submit).child(
            VNode::new("button")
                .class("action")
                .attr("type", "submit")
                .text(c.trans.noarg("study")),
        ),
    )
}

fn notation_section(ctrl: &Rc<RefCell<AnalyseCtrl>>, c: &AnalyseCtrl) -> Vec<VNode> {
    let change: Rc<dyn Fn(bool)> = {
        let ctrl = Rc::clone(ctrl);
        Rc::new(move |inline| {
            let mut c = ctrl.borrow_mut();
            c.tree_view.set_inline(inline);
            c.toggle_menu();
        })
    };
    vec![
        VNode::new("h2").text(c.trans.noarg("preferences")),
        bool_setting(
            BoolSetting {
                name: "inline_notation",
                title: Some("Shift+I".to_string()),
                id: "inline",
                checked: c.tree_view.inline(),
                disabled: false,
                change,
            },
            &c.trans,
            c.redraw_handle(),
        ),
    ]
}

fn engine_section(ctrl: &Rc<RefCell<AnalyseCtrl>>, c: &AnalyseCtrl) -> Vec<VNode> {
    let Some(eval) = &c.eval else {
        return Vec::new();
    };
    if !eval.allowed() {
        return Vec::new();
    }

    let mut nodes = vec![VNode::new("h2").text(c.trans.noarg("computer_analysis"))];

    let title = if c.mandatory_eval {
        c.trans.noarg("required_by_practice")
    } else {
        c.env.engine.name.clone()
    };
    nodes.push(bool_setting(
        BoolSetting {
            name: "enable",
            title: Some(title),
            id: "all",
            checked: c.show_computer(),
            disabled: c.mandatory_eval,
            change: {
                let ctrl = Rc::clone(ctrl);
                Rc::new(move |_| ctrl.borrow_mut().toggle_computer())
            },
        },
        &c.trans,
        c.redraw_handle(),
    ));

    if !c.show_computer() {
        return nodes;
    }

    nodes.push(bool_setting(
        BoolSetting {
            name: "best_move_arrow",
            title: None,
            id: "shapes",
            checked: c.show_auto_shapes(),
            disabled: false,
            change: {
                let ctrl = Rc::clone(ctrl);
                Rc::new(move |_| ctrl.borrow_mut().toggle_auto_shapes())
            },
        },
        &c.trans,
        c.redraw_handle(),
    ));
    nodes.push(bool_setting(
        BoolSetting {
            name: "evaluation_gauge",
            title: None,
            id: "gauge",
            checked: c.show_gauge(),
            disabled: false,
            change: {
                let ctrl = Rc::clone(ctrl);
                Rc::new(move |_| ctrl.borrow_mut().toggle_gauge())
            },
        },
        &c.trans,
        c.redraw_handle(),
    ));
    nodes.push(bool_setting(
        BoolSetting {
            name: "infinite_analysis",
            title: Some(c.trans.noarg("removes_depth_limit")),
            id: "infinite",
            checked: eval.infinite(),
            disabled: false,
            change: {
                let ctrl = Rc::clone(ctrl);
                Rc::new(move |v| ctrl.borrow_mut().set_infinite(v))
            },
        },
        &c.trans,
        c.redraw_handle(),
    ));

    nodes.push(multi_pv_setting(ctrl, c, eval));
    match eval.backend() {
        Backend::Threaded => nodes.extend(threads_setting(ctrl, c, eval)),
        Backend::Legacy => nodes.push(hash_setting(ctrl, c, eval)),
    }
    nodes
}

fn multi_pv_setting(ctrl: &Rc<RefCell<AnalyseCtrl>>, c: &AnalyseCtrl, eval: &EvalEngine) -> VNode {
    let max = 5;
    let read = {
        let ctrl = Rc::clone(ctrl);
        move || i64::from(ctrl.borrow().eval.as_ref().map_or(1, |e| e.multi_pv()))
    };
    let write = {
        let ctrl = Rc::clone(ctrl);
        move |v: i64| ctrl.borrow_mut().set_multi_pv(v)
    };
    range_setting(
        "analyse-multipv",
        c.trans.noarg("multiple_lines"),
        1,
        max,
        RangeBinding::new(read, write),
        format!("{} / {max}", eval.multi_pv()),
    )
}

fn threads_setting(
    ctrl: &Rc<RefCell<AnalyseCtrl>>,
    c: &AnalyseCtrl,
    eval: &EvalEngine,
) -> Option<VNode> {
    let max = thread_slider_max(c.env.engine.cores)?;
    let read = {
        let ctrl = Rc::clone(ctrl);
        move || i64::from(ctrl.borrow().eval.as_ref().map_or(1, |e| e.threads()))
    };
    let write = {
        let ctrl = Rc::clone(ctrl);
        move |v: i64| ctrl.borrow_mut().set_threads(v)
    };
    Some(range_setting(
        "analyse-threads",
        c.trans.noarg("cpus"),
        1,
        max,
        RangeBinding::new(read, write),
        format!("{} / {max}", eval.threads()),
    ))
}

fn hash_setting(ctrl: &Rc<RefCell<AnalyseCtrl>>, c: &AnalyseCtrl, eval: &EvalEngine) -> VNode {
    let read = {
        let ctrl = Rc::clone(ctrl);
        move || {
            i64::from(
                ctrl.borrow()
                    .eval
                    .as_ref()
                    .map_or(16, |e| e.hash_size())
                    .max(1)
                    .ilog2(),
            )
        }
    };
    let write = {
        let ctrl = Rc::clone(ctrl);
        move |v: i64| ctrl.borrow_mut().set_hash_size(v)
    };
    range_setting(
        "analyse-memory",
        c.trans.noarg("memory"),
        4,
        10,
        RangeBinding::new(read, write),
        format_hash_size(eval.hash_size()),
    )
}

fn range_setting(
    id: &'static str,
    label: String,
    min: u32,
    max: u32,
    binding: RangeBinding,
    value_text: String,
) -> VNode {
    VNode::new("div")
        .class("setting")
        .child(VNode::new("label").attr("for", id).text(label))
        .child(
            VNode::new("input")
                .attr("id", id)
                .attr("type", "range")
                .attr("min", min.to_string())
                .attr("max", max.to_string())
                .attr("step", "1")
                .range(binding),
        )
        .child(VNode::new("div").class("range-value").text(value_text))
}

/// Upper bound for the thread slider: leave one core of headroom when more
/// than two are present, and never offer more than eight.
fn thread_slider_max(cores: Option<usize>) -> Option<u32> {
    let mut max = u32::try_from(cores?).ok()?;
    if max > 2 {
        max -= 1;
    }
    Some(max.min(8))
}

/// Hash sizes read in MB below a gigabyte and in rounded GB above.
fn format_hash_size(megabytes: u32) -> String {
    if megabytes < 1000 {
        format!("{megabytes}MB")
    } else {
        format!("{}GB", (f64::from(megabytes) / 1024.0).round() as u32)
    }
}

fn autoplay_buttons(ctrl: &Rc<RefCell<AnalyseCtrl>>, c: &AnalyseCtrl) -> VNode {
    let mut speeds: Vec<AutoplaySpeed> = BASE_SPEEDS.to_vec();
    if !c.data.move_centis.is_empty() {
        speeds.push(REALTIME_SPEED);
    }
    if c.data.analysis.is_some() {
        speeds.push(EVAL_LOSS_SPEED);
    }

    let mut row = VNode::new("div").class("autoplay");
    for speed in speeds {
        let click = {
            let ctrl = Rc::clone(ctrl);
            Handler::unit(move || ctrl.borrow_mut().toggle_autoplay(speed.delay))
        };
        row = row.child(
            VNode::new("a")
                .class("action")
                .class_if("active", c.autoplay.active(speed.delay))
                .text(c.trans.noarg(speed.name))
                .on_after(Event::Click, click, c.redraw_handle()),
        );
    }
    row
}

fn delete_button(ctrl: &Rc<RefCell<AnalyseCtrl>>, c: &AnalyseCtrl) -> Option<VNode> {
    let g = &c.data;
    if g.source != Source::Import {
        return None;
    }
    if g.imported_by.is_none() || g.imported_by != c.user_id {
        return None;
    }

    let action = format!("/{}/delete", g.id);
    let submit = {
        let ctrl = Rc::clone(ctrl);
        let action = action.clone();
        Handler::unit(move || {
            let (confirm, submit, message) = {
                let c = ctrl.borrow();
                (
                    c.env.confirm.clone(),
                    c.env.submit.clone(),
                    c.trans.noarg("delete_imported_game"),
                )
            };
            let request = FormRequest {
                action: action.clone(),
                fields: Vec::new(),
            };
            confirm(ConfirmRequest {
                message,
                on_confirm: Rc::new(move || submit(request.clone())),
            });
        })
    };

    Some(
        VNode::new("form")
            .class("delete")
            .attr("method", "post")
            .attr("action", action)
            .on(Event::Submit, submit)
            .child(
                VNode::new("button")
                    .class("action")
                    .attr("type", "submit")
                    .text(c.trans.noarg("delete")),
            ),
    )
}

fn continue_links(c: &AnalyseCtrl) -> Option<VNode> {
    if !c.can_continue() {
        return None;
    }
    Some(
        VNode::new("div")
            .class("continue-with")
            .attr("id", format!("continue-with-{}", c.data.id))
            .attr("hidden", "true")
            .child(
                VNode::new("a")
                    .class("button")
                    .attr("href", continue_href(c, ContinueMode::Ai))
                    .attr("rel", "nofollow")
                    .text(c.trans.noarg("play_machine")),
            )
            .child(VNode::new("br"))
            .child(
                VNode::new("a")
                    .class("button")
                    .attr("href", continue_href(c, ContinueMode::Friend))
                    .attr("rel", "nofollow")
                    .text(c.trans.noarg("play_friend")),
            ),
    )
}

fn continue_href(c: &AnalyseCtrl, mode: ContinueMode) -> String {
    if c.data.user_analysis {
        format!("/?fen={}#{}", c.encode_node_fen(), mode.as_str())
    } else {
        format!("{}?fen={}", router::cont(&c.data, mode), c.node.fen)
    }
}
