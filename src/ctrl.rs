//! Controller state for the analysis screen. The action menu reads this
//! snapshot and forwards user intent back through the methods below; nothing
//! here renders anything.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use shakmaty::Color;

use crate::autoplay::{Autoplay, AutoplayDelay};
use crate::engine::{EngineMeta, EvalEngine};
use crate::game::{GameData, MoveRecord, VariantKey};
use crate::i18n::Trans;
use crate::study::Study;
use crate::ui::action_menu::ActionMenu;

/// How the move list is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TreeViewMode {
    #[default]
    Column,
    Inline,
}

#[derive(Debug, Default)]
pub struct TreeView {
    mode: TreeViewMode,
}

impl TreeView {
    pub fn mode(&self) -> TreeViewMode {
        self.mode
    }

    pub fn inline(&self) -> bool {
        self.mode == TreeViewMode::Inline
    }

    pub fn set_inline(&mut self, inline: bool) {
        self.mode = if inline {
            TreeViewMode::Inline
        } else {
            TreeViewMode::Column
        };
    }
}

/// The position currently shown on the board.
#[derive(Debug, Clone)]
pub struct NodeSnapshot {
    pub fen: String,
    /// 0 is the starting position.
    pub ply: usize,
}

/// Confirmation passed to the injected dialog capability, which decides when
/// (and whether) to run `on_confirm`.
#[derive(Clone)]
pub struct ConfirmRequest {
    pub message: String,
    pub on_confirm: Rc<dyn Fn()>,
}

/// Request to surface a block of the view tree in a modal, by element id.
#[derive(Debug, Clone)]
pub struct ModalRequest {
    pub id: String,
}

/// A delegated HTTP form submission. Transport is outside this crate; the
/// capability receives the action and the assembled fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRequest {
    pub action: String,
    pub fields: Vec<(String, String)>,
}

/// Capabilities injected into the controller instead of reaching for
/// process-wide globals.
#[derive(Clone)]
pub struct Env {
    pub engine: EngineMeta,
    pub confirm: Rc<dyn Fn(ConfirmRequest)>,
    pub modal: Rc<dyn Fn(ModalRequest)>,
    pub submit: Rc<dyn Fn(FormRequest)>,
}

impl Env {
    /// Environment that logs and otherwise swallows every request.
    pub fn inert(engine: EngineMeta) -> Self {
        Self {
            engine,
            confirm: Rc::new(|req: ConfirmRequest| {
                tracing::info!(message = %req.message, "confirmation request dropped");
            }),
            modal: Rc::new(|req: ModalRequest| {
                tracing::info!(id = %req.id, "modal request dropped");
            }),
            submit: Rc::new(|req: FormRequest| {
                tracing::info!(action = %req.action, "form submission dropped");
            }),
        }
    }
}

pub struct AnalyseCtrl {
    pub data: GameData,
    pub mainline: Vec<MoveRecord>,
    pub node: NodeSnapshot,
    pub user_id: Option<String>,
    pub embed: bool,
    pub ongoing: bool,
    /// Evaluation cannot be switched off, e.g. in practice mode.
    pub mandatory_eval: bool,
    pub orientation: Color,
    pub eval: Option<EvalEngine>,
    pub tree_view: TreeView,
    pub autoplay: Autoplay,
    pub study: Option<Study>,
    pub menu: ActionMenu,
    pub trans: Trans,
    pub env: Env,
    show_computer: bool,
    show_auto_shapes: bool,
    show_gauge: bool,
    dirty: Rc<Cell<bool>>,
}

impl AnalyseCtrl {
    pub fn new(data: GameData, mainline: Vec<MoveRecord>, env: Env) -> Self {
        let node = NodeSnapshot {
            fen: data.root_fen(),
            ply: 0,
        };
        Self {
            data,
            mainline,
            node,
            user_id: None,
            embed: false,
            ongoing: false,
            mandatory_eval: false,
            orientation: Color::White,
            eval: None,
            tree_view: TreeView::default(),
            autoplay: Autoplay::default(),
            study: None,
            menu: ActionMenu::default(),
            trans: Trans::default(),
            env,
            show_computer: true,
            show_auto_shapes: true,
            show_gauge: true,
            dirty: Rc::new(Cell::new(false)),
        }
    }

    pub fn flip(&mut self) {
        self.orientation = self.orientation.other();
        self.request_redraw();
    }

    pub fn orientation_key(&self) -> &'static str {
        match self.orientation {
            Color::White => "white",
            Color::Black => "black",
        }
    }

    pub fn can_continue(&self) -> bool {
        !self.ongoing && !self.embed && self.data.variant == VariantKey::Standard
    }

    pub fn show_computer(&self) -> bool {
        self.show_computer
    }

    pub fn set_show_computer(&mut self, on: bool) {
        self.show_computer = on;
    }

    pub fn toggle_computer(&mut self) {
        self.show_computer = !self.show_computer;
        tracing::debug!(enabled = self.show_computer, "computer analysis toggled");
        self.request_redraw();
    }

    pub fn show_auto_shapes(&self) -> bool {
        self.show_auto_shapes
    }

    pub fn set_show_auto_shapes(&mut self, on: bool) {
        self.show_auto_shapes = on;
    }

    pub fn toggle_auto_shapes(&mut self) {
        self.show_auto_shapes = !self.show_auto_shapes;
        self.request_redraw();
    }

    pub fn show_gauge(&self) -> bool {
        self.show_gauge
    }

    pub fn set_show_gauge(&mut self, on: bool) {
        self.show_gauge = on;
    }

    pub fn toggle_gauge(&mut self) {
        self.show_gauge = !self.show_gauge;
        self.request_redraw();
    }

    pub fn set_infinite(&mut self, infinite: bool) {
        if let Some(eval) = &mut self.eval {
            eval.set_infinite(infinite);
        }
        self.request_redraw();
    }

    pub fn set_multi_pv(&mut self, lines: i64) {
        if let Some(eval) = &mut self.eval {
            eval.set_multi_pv(lines.clamp(1, 5) as u32);
        }
        self.request_redraw();
    }

    pub fn set_threads(&mut self, threads: i64) {
        if let Some(eval) = &mut self.eval {
            eval.set_threads(threads.max(1) as u32);
        }
        self.request_redraw();
    }

    /// `exponent` is the slider position; the stored size is `2^exponent` MB.
    pub fn set_hash_size(&mut self, exponent: i64) {
        if let Some(eval) = &mut self.eval {
            let exponent = exponent.clamp(0, 30) as u32;
            eval.set_hash_size(1 << exponent);
        }
        self.request_redraw();
    }

    pub fn toggle_autoplay(&mut self, delay: AutoplayDelay) {
        self.autoplay.toggle(delay);
        self.request_redraw();
    }

    pub fn toggle_menu(&mut self) {
        self.menu.toggle();
        self.request_redraw();
    }

    /// Jumps the board to `ply` (0 = starting position).
    pub fn jump_to(&mut self, ply: usize) {
        let ply = ply.min(self.mainline.len());
        self.node = if ply == 0 {
            NodeSnapshot {
                fen: self.data.root_fen(),
                ply: 0,
            }
        } else {
            NodeSnapshot {
                fen: self.mainline[ply - 1].resulting_fen.clone(),
                ply,
            }
        };
        self.request_redraw();
    }

    /// Board position encoded for use inside a URL.
    pub fn encode_node_fen(&self) -> String {
        self.node.fen.replace(' ', "_")
    }

    pub fn request_redraw(&self) {
        self.dirty.set(true);
    }

    /// Redraw callback handed to view bindings.
    pub fn redraw_handle(&self) -> Rc<dyn Fn()> {
        let dirty = Rc::clone(&self.dirty);
        Rc::new(move || dirty.set(true))
    }

    /// True when something requested a redraw since the last call.
    pub fn take_redraw(&self) -> bool {
        self.dirty.replace(false)
    }
}
