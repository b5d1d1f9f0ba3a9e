//! eframe shell: translates window events into controller actions and
//! paints the board. All game rules live in the controller and core.

use std::time::{Duration, Instant};

use eawase_core::Board;
use eframe::egui;
use image::imageops::FilterType;
use image::{imageops, RgbaImage};
use log::info;

use crate::controller::{cell_at, GameController, PuzzleAction, SolveReport};

/// The board is fit into a 500 pixel square, so each cell is
/// `500 / max(rows, cols)` on a side.
pub(crate) const BOARD_SPAN: u32 = 500;
pub(crate) const STATUS_STRIP_HEIGHT: f32 = 50.0;

const TICK: Duration = Duration::from_secs(1);
const REPAINT_INTERVAL: Duration = Duration::from_millis(200);

pub(crate) fn box_size(board: &Board) -> u32 {
    (BOARD_SPAN / board.rows().max(board.cols()) as u32).max(1)
}

/// Inner window size for this board, status strip included.
pub(crate) fn window_size(board: &Board) -> [f32; 2] {
    let cell = box_size(board) as f32;
    [
        board.cols() as f32 * cell,
        board.rows() as f32 * cell + STATUS_STRIP_HEIGHT,
    ]
}

pub(crate) struct EawaseApp {
    controller: GameController,
    box_size: u32,
    texture: Option<egui::TextureHandle>,
    dirty: bool,
    last_tick: Instant,
    banner: Option<String>,
}

impl EawaseApp {
    pub(crate) fn new(board: Board) -> Self {
        let box_size = box_size(&board);
        Self {
            controller: GameController::new(board),
            box_size,
            texture: None,
            dirty: true,
            last_tick: Instant::now(),
            banner: None,
        }
    }

    /// Composites every tile's rendered image, scaled to the cell size,
    /// into one board-sized frame.
    fn compose_board(&self) -> egui::ColorImage {
        let board = self.controller.board();
        let cell = self.box_size;
        let width = board.cols() as u32 * cell;
        let height = board.rows() as u32 * cell;
        let mut canvas = RgbaImage::new(width, height);
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                let Ok(tile) = board.tile_at(row, col) else {
                    continue;
                };
                let scaled =
                    imageops::resize(&tile.rendered_image(), cell, cell, FilterType::Triangle);
                imageops::replace(
                    &mut canvas,
                    &scaled,
                    col as i64 * cell as i64,
                    row as i64 * cell as i64,
                );
            }
        }
        egui::ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            canvas.as_raw(),
        )
    }

    fn dispatch(&mut self, action: PuzzleAction) {
        if self.controller.is_solved() {
            return;
        }
        let report = self.controller.apply(action);
        self.dirty = true;
        self.announce(report);
    }

    fn announce(&mut self, report: Option<SolveReport>) {
        if let Some(report) = report {
            info!("puzzle solved in {} seconds", report.elapsed_secs);
            self.banner = Some(format!("Puzzle solved in {} seconds!", report.elapsed_secs));
        }
    }

    fn advance_clock(&mut self) {
        while self.last_tick.elapsed() >= TICK {
            self.last_tick += TICK;
            let report = self.controller.apply(PuzzleAction::Tick);
            self.announce(report);
        }
    }
}

impl eframe::App for EawaseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.advance_clock();
        ctx.request_repaint_after(REPAINT_INTERVAL);

        let key_actions = [
            (egui::Key::L, PuzzleAction::RotateLeft),
            (egui::Key::R, PuzzleAction::RotateRight),
            (egui::Key::F, PuzzleAction::Flip),
        ];
        for (key, action) in key_actions {
            if ctx.input(|input| input.key_pressed(key)) {
                self.dispatch(action);
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                let board = self.controller.board();
                let cell = self.box_size as f32;
                let board_size =
                    egui::vec2(board.cols() as f32 * cell, board.rows() as f32 * cell);
                let (rect, response) =
                    ui.allocate_exact_size(board_size, egui::Sense::click());

                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        let local = pos - rect.min;
                        if let Some((row, col)) = cell_at(local.x, local.y, self.box_size) {
                            self.dispatch(PuzzleAction::PressCell { row, col });
                        }
                    }
                }

                if self.dirty || self.texture.is_none() {
                    let frame = self.compose_board();
                    self.texture =
                        Some(ctx.load_texture("board", frame, egui::TextureOptions::NEAREST));
                    self.dirty = false;
                }
                if let Some(texture) = &self.texture {
                    ui.painter().image(
                        texture.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }

                if let Some((row, col)) = self.controller.selected() {
                    let min = rect.min + egui::vec2(col as f32 * cell, row as f32 * cell);
                    let highlight = egui::Rect::from_min_size(min, egui::vec2(cell, cell));
                    ui.painter().rect_stroke(
                        highlight,
                        egui::CornerRadius::ZERO,
                        egui::Stroke::new(3.0, egui::Color32::GOLD),
                        egui::StrokeKind::Inside,
                    );
                }

                let status = match &self.banner {
                    Some(text) => text.clone(),
                    None => format!("Time: {} seconds", self.controller.elapsed_secs()),
                };
                ui.allocate_ui_with_layout(
                    egui::vec2(board_size.x, STATUS_STRIP_HEIGHT),
                    egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                    |ui| {
                        ui.label(
                            egui::RichText::new(status)
                                .size(20.0)
                                .color(egui::Color32::BLACK),
                        );
                    },
                );
            });
    }
}
