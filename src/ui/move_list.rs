use egui::{ScrollArea, Ui};

use crate::ctrl::TreeViewMode;
use crate::game::MoveRecord;

pub struct MoveList;

impl MoveList {
    /// Renders the mainline; returns the ply to jump to when a move is clicked.
    pub fn show(
        ui: &mut Ui,
        moves: &[MoveRecord],
        current_ply: usize,
        mode: TreeViewMode,
    ) -> Option<usize> {
        let mut clicked = None;

        ui.vertical(|ui| {
            ui.heading("Moves");
            ui.separator();

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match mode {
                    TreeViewMode::Inline => {
                        ui.horizontal_wrapped(|ui| {
                            for (i, record) in moves.iter().enumerate() {
                                if i % 2 == 0 {
                                    ui.label(format!("{}.", i / 2 + 1));
                                }
                                if ui
                                    .selectable_label(current_ply == i + 1, &record.san)
                                    .clicked()
                                {
                                    clicked = Some(i + 1);
                                }
                            }
                        });
                    }
                    TreeViewMode::Column => {
                        for (i, pair) in moves.chunks(2).enumerate() {
                            ui.horizontal(|ui| {
                                ui.label(format!("{}.", i + 1));
                                for (j, record) in pair.iter().enumerate() {
                                    let ply = i * 2 + j + 1;
                                    if ui
                                        .selectable_label(current_ply == ply, &record.san)
                                        .clicked()
                                    {
                                        clicked = Some(ply);
                                    }
                                }
                            });
                        }
                    }
                });
        });

        clicked
    }
}
