/*!
GUI implementation for the waveform viewer.
*/

use crate::config::{AppConfig, VIEW_ALL};
use crate::export::{export_svgs, timestamped_dir};
use crate::surface::EguiSurface;
use eframe::egui;
use linecode::{render_scheme, BitSequence, Scheme};
use std::path::PathBuf;
use tracing::{error, info};

/// Main GUI application state
pub struct WaveviewGui {
    config: AppConfig,
    config_path: PathBuf,

    // UI state
    input: String,
    error_message: String,
    current: Option<BitSequence>,

    // Status
    status_message: String,
    last_surface_width: Option<f32>,
}

impl WaveviewGui {
    /// Create a new GUI instance
    pub fn new(config: AppConfig, config_path: PathBuf, cc: &eframe::CreationContext<'_>) -> Self {
        let visuals = if config.gui.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        cc.egui_ctx.set_visuals(visuals);

        Self::from_config(config, config_path)
    }

    /// Build the application state and draw the cached sequence, if any
    fn from_config(config: AppConfig, config_path: PathBuf) -> Self {
        let mut gui = Self {
            input: config.session.last_input.clone(),
            config,
            config_path,
            error_message: String::new(),
            current: None,
            status_message: "Ready".to_string(),
            last_surface_width: None,
        };

        if gui.config.session.cached_bits().is_some() {
            gui.generate();
        }
        gui
    }

    /// Validate the input field and, if valid, make it the displayed sequence
    fn generate(&mut self) {
        match BitSequence::parse(&self.input) {
            Ok(bits) => {
                self.error_message.clear();
                self.config.session.remember(&bits);
                info!("Encoding {}", bits);
                self.current = Some(bits);
            }
            Err(e) => {
                self.error_message = e.to_string();
            }
        }
    }

    /// Fill the input with a random sequence and generate
    fn randomize(&mut self) {
        self.input = BitSequence::random(&mut rand::thread_rng()).to_string();
        self.generate();
    }

    /// Empty the input and all drawings
    fn clear(&mut self) {
        self.input.clear();
        self.error_message.clear();
        self.current = None;
    }

    /// Text for the "current binary" display
    fn current_display(&self) -> String {
        self.current
            .as_ref()
            .map(|bits| bits.to_string())
            .unwrap_or_else(|| "No input".to_string())
    }

    /// Combo box text for the current view; an unknown selector is shown as is
    fn view_label(&self) -> String {
        let view = &self.config.gui.view;
        if view == VIEW_ALL {
            return "All encodings".to_string();
        }
        Scheme::from_selector(view)
            .map(|s| s.name().to_string())
            .unwrap_or_else(|| format!("Unknown ({})", view))
    }

    /// Write the visible schemes as SVG files
    fn export(&mut self) {
        let Some(bits) = &self.current else {
            self.status_message = "Nothing to export".to_string();
            return;
        };

        let width = self
            .last_surface_width
            .unwrap_or(self.config.render.export_width);
        let dir = timestamped_dir(&self.config.render.export_directory);
        let schemes = self.config.gui.visible_schemes();

        match export_svgs(&dir, bits, &schemes, width, &self.config.render) {
            Ok(paths) => {
                self.status_message = format!("Exported {} file(s) to {}", paths.len(), dir.display());
            }
            Err(e) => {
                error!("Export failed: {:#}", e);
                self.status_message = format!("Export failed: {}", e);
            }
        }
    }

    fn input_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Binary input:");
            let response = ui.text_edit_singleline(&mut self.input);
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.generate();
            }

            if ui.button("▶️ Generate").clicked() {
                self.generate();
            }
            if ui.button("🎲 Random").clicked() {
                self.randomize();
            }
            if ui.button("🧹 Clear").clicked() {
                self.clear();
            }
        });

        if !self.error_message.is_empty() {
            ui.colored_label(egui::Color32::RED, &self.error_message);
        }

        ui.horizontal(|ui| {
            ui.label("Current binary:");
            ui.monospace(self.current_display());
        });

        ui.horizontal(|ui| {
            egui::ComboBox::from_label("View")
                .selected_text(self.view_label())
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.config.gui.view, VIEW_ALL.to_string(), "All encodings");
                    for scheme in Scheme::ALL {
                        ui.selectable_value(&mut self.config.gui.view, scheme.selector().to_string(), scheme.name());
                    }
                });

            if ui.button("💾 Export SVG").clicked() {
                self.export();
            }
            if ui.button("💾 Save Config").clicked() {
                match self.config.save_to_file(&self.config_path) {
                    Ok(_) => self.status_message = "Configuration saved".to_string(),
                    Err(e) => self.status_message = format!("Failed to save config: {}", e),
                }
            }
            ui.label(&self.status_message);
        });
    }

    /// Allocate this frame's surface for `scheme` and draw on it
    fn scheme_panel(&mut self, ui: &mut egui::Ui, scheme: Scheme) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.strong(scheme.name());
                ui.weak(scheme.rule());
            });

            // Width follows the container so resizing redraws at the new size.
            let width = self.config.render.surface_width(ui.available_width());
            let (response, painter) = ui.allocate_painter(
                egui::vec2(width, self.config.render.height),
                egui::Sense::hover(),
            );
            self.last_surface_width = Some(width);

            if let Some(bits) = &self.current {
                let mut surface = EguiSurface::new(painter, response.rect);
                render_scheme(Some(&mut surface), scheme, bits, &self.config.render.style());
            }
        });
    }
}

impl eframe::App for WaveviewGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("input").show(ctx, |ui| {
            ui.heading("📈 Line Encoding Visualizer");
            self.input_panel(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for scheme in self.config.gui.visible_schemes() {
                    self.scheme_panel(ui, scheme);
                    ui.add_space(8.0);
                }
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Auto-save configuration (and the cached input) if enabled
        if self.config.gui.auto_save_config {
            if let Err(e) = self.config.save_to_file(&self.config_path) {
                error!("Failed to save config on exit: {:#}", e);
            }
        }
    }
}
