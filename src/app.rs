use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use shakmaty::Color;

use crate::ctrl::{AnalyseCtrl, ConfirmRequest, Env, FormRequest, ModalRequest, TreeViewMode};
use crate::engine::{Backend, EngineMeta, EvalEngine};
use crate::game::{mainline_from_sans, GameData, MoveRecord, ServerAnalysis, Source, VariantKey};
use crate::i18n::Trans;
use crate::ui::{action_menu, render, MoveList};

/// Prompt/submission state produced by the injected capabilities and consumed
/// by the windows below.
#[derive(Default)]
struct Prompts {
    confirm: Option<ConfirmRequest>,
    modal: Option<ModalRequest>,
    submissions: Vec<FormRequest>,
}

/// Panel preferences persisted across runs.
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct Prefs {
    orientation_white: bool,
    tree_view: TreeViewMode,
    show_computer: bool,
    show_auto_shapes: bool,
    show_gauge: bool,
    infinite: bool,
    multi_pv: u32,
    threads: u32,
    hash_size: u32,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            orientation_white: true,
            tree_view: TreeViewMode::Column,
            show_computer: true,
            show_auto_shapes: true,
            show_gauge: true,
            infinite: false,
            multi_pv: 1,
            threads: 1,
            hash_size: 16,
        }
    }
}

pub struct AnalyseApp {
    ctrl: Rc<RefCell<AnalyseCtrl>>,
    prompts: Rc<RefCell<Prompts>>,
    last_step: Option<Instant>,
}

impl AnalyseApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self> {
        let prefs: Prefs = cc
            .storage
            .and_then(|s| eframe::get_value(s, eframe::APP_KEY))
            .unwrap_or_default();

        let prompts: Rc<RefCell<Prompts>> = Rc::default();
        let env = {
            let confirm_target = Rc::clone(&prompts);
            let modal_target = Rc::clone(&prompts);
            let submit_target = Rc::clone(&prompts);
            Env {
                engine: EngineMeta::detect("Stockfish"),
                confirm: Rc::new(move |req| confirm_target.borrow_mut().confirm = Some(req)),
                modal: Rc::new(move |req| modal_target.borrow_mut().modal = Some(req)),
                submit: Rc::new(move |req: FormRequest| {
                    tracing::info!(action = %req.action, fields = req.fields.len(), "form submitted");
                    submit_target.borrow_mut().submissions.push(req);
                }),
            }
        };

        let (data, mainline) = demo_game()?;
        let mut ctrl = AnalyseCtrl::new(data, mainline, env);
        ctrl.user_id = Some("demo".to_string());
        ctrl.eval = Some(EvalEngine::new(Backend::Threaded));
        ctrl.trans = load_translations();
        apply_prefs(&mut ctrl, &prefs);
        let end = ctrl.mainline.len();
        ctrl.jump_to(end);
        ctrl.take_redraw();

        Ok(Self {
            ctrl: Rc::new(RefCell::new(ctrl)),
            prompts,
            last_step: None,
        })
    }

    fn step_autoplay(&mut self) {
        let now = Instant::now();
        let (playing, at_end, delay) = {
            let c = self.ctrl.borrow();
            (
                c.autoplay.playing(),
                c.node.ply >= c.mainline.len(),
                c.autoplay.step_delay(&c.data, c.node.ply),
            )
        };
        if !playing {
            self.last_step = None;
            return;
        }
        if at_end {
            self.ctrl.borrow_mut().autoplay.stop();
            self.last_step = None;
            return;
        }
        let started = *self.last_step.get_or_insert(now);
        if let Some(delay) = delay {
            if now.duration_since(started) >= delay {
                let mut c = self.ctrl.borrow_mut();
                let next = c.node.ply + 1;
                c.jump_to(next);
                drop(c);
                self.last_step = Some(now);
            }
        }
    }

    fn show_prompts(&mut self, ctx: &egui::Context) {
        let confirm = self.prompts.borrow().confirm.clone();
        if let Some(request) = confirm {
            let mut decided = false;
            egui::Window::new("Confirm")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(request.message.clone());
                    ui.horizontal(|ui| {
                        if ui.button("OK").clicked() {
                            (request.on_confirm)();
                            decided = true;
                        }
                        if ui.button("Cancel").clicked() {
                            decided = true;
                        }
                    });
                });
            if decided {
                self.prompts.borrow_mut().confirm = None;
            }
        }

        // The continuation block lives hidden in the panel tree; surface it here.
        let modal = self.prompts.borrow().modal.clone();
        if let Some(request) = modal {
            let tree = action_menu::view(&self.ctrl);
            let mut close = false;
            egui::Window::new("Continue from here")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    match tree.find_id(&request.id) {
                        Some(block) => render::show_children(ui, block),
                        None => {
                            ui.label("Nothing to continue.");
                        }
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            if close {
                self.prompts.borrow_mut().modal = None;
            }
        }

        // Delegated submissions land here instead of on the network.
        let count = self.prompts.borrow().submissions.len();
        if count > 0 {
            let last = self.prompts.borrow().submissions.last().cloned();
            if let Some(last) = last {
                egui::Window::new("Outbox")
                    .collapsible(true)
                    .resizable(false)
                    .show(ctx, |ui| {
                        ui.label(format!("{count} request(s); last: POST {}", last.action));
                    });
            }
        }
    }
}

impl eframe::App for AnalyseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.step_autoplay();

        egui::SidePanel::left("menu")
            .default_width(280.0)
            .show(ctx, |ui| {
                let open = self.ctrl.borrow().menu.open();
                if ui.button(if open { "✕ Menu" } else { "☰ Menu" }).clicked() {
                    self.ctrl.borrow_mut().toggle_menu();
                }
                ui.separator();
                if self.ctrl.borrow().menu.open() {
                    let tree = action_menu::view(&self.ctrl);
                    egui::ScrollArea::vertical().show(ui, |ui| render::show(ui, &tree));
                }
            });

        egui::TopBottomPanel::bottom("moves")
            .default_height(140.0)
            .show(ctx, |ui| {
                let (mainline, current_ply, mode) = {
                    let c = self.ctrl.borrow();
                    (c.mainline.clone(), c.node.ply, c.tree_view.mode())
                };
                if let Some(ply) = MoveList::show(ui, &mainline, current_ply, mode) {
                    self.ctrl.borrow_mut().jump_to(ply);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let c = self.ctrl.borrow();
            ui.heading("Analyse Board");
            ui.label(format!("Orientation: {}", c.orientation_key()));
            ui.label(format!("Ply {} / {}", c.node.ply, c.mainline.len()));
            ui.monospace(c.node.fen.clone());
            if c.show_computer() && c.show_gauge() {
                if let Some(eval) = &c.eval {
                    ui.label(format!(
                        "Engine: {} line(s), {} thread(s), {} hash",
                        eval.multi_pv(),
                        eval.threads(),
                        eval.hash_size(),
                    ));
                }
            }
        });

        self.show_prompts(ctx);

        if self.ctrl.borrow().take_redraw() {
            ctx.request_repaint();
        }
        if self.ctrl.borrow().autoplay.playing() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let prefs = collect_prefs(&self.ctrl.borrow());
        eframe::set_value(storage, eframe::APP_KEY, &prefs);
    }
}

/// A short imported game with clock and analysis data, so every menu section
/// has something to show.
fn demo_game() -> Result<(GameData, Vec<MoveRecord>)> {
    let sans = ["e4", "e5", "Qh5", "Nc6", "Bc4", "Nf6", "Qxf7#"];
    let mainline = mainline_from_sans(None, &sans)?;
    let data = GameData {
        id: "demo1234".to_string(),
        source: Source::Import,
        variant: VariantKey::Standard,
        imported_by: Some("demo".to_string()),
        move_centis: vec![120, 180, 95, 210, 160, 240, 130],
        analysis: Some(ServerAnalysis {
            cp_loss: vec![2, 10, 35, 52, 8, 120, 0],
        }),
        user_analysis: false,
        initial_fen: None,
    };
    Ok((data, mainline))
}

fn load_translations() -> Trans {
    let Some(path) = std::env::var_os("ANALYSE_BOARD_TRANS") else {
        return Trans::default();
    };
    let loaded = std::fs::read_to_string(&path)
        .map_err(anyhow::Error::from)
        .and_then(|json| Trans::from_json(&json));
    match loaded {
        Ok(trans) => trans,
        Err(e) => {
            tracing::warn!("failed to load translations from {:?}: {:#}", path, e);
            Trans::default()
        }
    }
}

fn collect_prefs(c: &AnalyseCtrl) -> Prefs {
    Prefs {
        orientation_white: c.orientation == Color::White,
        tree_view: c.tree_view.mode(),
        show_computer: c.show_computer(),
        show_auto_shapes: c.show_auto_shapes(),
        show_gauge: c.show_gauge(),
        infinite: c.eval.as_ref().is_some_and(|e| e.infinite()),
        multi_pv: c.eval.as_ref().map_or(1, |e| e.multi_pv()),
        threads: c.eval.as_ref().map_or(1, |e| e.threads()),
        hash_size: c.eval.as_ref().map_or(16, |e| e.hash_size()),
    }
}

fn apply_prefs(c: &mut AnalyseCtrl, prefs: &Prefs) {
    c.orientation = if prefs.orientation_white {
        Color::White
    } else {
        Color::Black
    };
    c.tree_view.set_inline(prefs.tree_view == TreeViewMode::Inline);
    c.set_show_computer(prefs.show_computer);
    c.set_show_auto_shapes(prefs.show_auto_shapes);
    c.set_show_gauge(prefs.show_gauge);
    if let Some(eval) = &mut c.eval {
        eval.set_infinite(prefs.infinite);
        eval.set_multi_pv(prefs.multi_pv);
        eval.set_threads(prefs.threads);
        eval.set_hash_size(prefs.hash_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_game_feeds_every_menu_section() {
        let (data, mainline) = demo_game().unwrap();
        assert!(mainline.len() > 4);
        assert_eq!(data.move_centis.len(), mainline.len());
        assert!(data.analysis.is_some());
        assert_eq!(data.source, Source::Import);
    }

    #[test]
    fn prefs_round_trip_through_the_controller() {
        let (data, mainline) = demo_game().unwrap();
        let mut ctrl = AnalyseCtrl::new(
            data,
            mainline,
            Env::inert(EngineMeta {
                name: "Stockfish".to_string(),
                cores: Some(4),
            }),
        );
        ctrl.eval = Some(EvalEngine::new(Backend::Threaded));

        let mut prefs = Prefs::default();
        prefs.orientation_white = false;
        prefs.tree_view = TreeViewMode::Inline;
        prefs.show_gauge = false;
        prefs.multi_pv = 3;
        prefs.hash_size = 256;
        apply_prefs(&mut ctrl, &prefs);

        let collected = collect_prefs(&ctrl);
        assert!(!collected.orientation_white);
        assert_eq!(collected.tree_view, TreeViewMode::Inline);
        assert!(!collected.show_gauge);
        assert_eq!(collected.multi_pv, 3);
        assert_eq!(collected.hash_size, 256);
    }
}
