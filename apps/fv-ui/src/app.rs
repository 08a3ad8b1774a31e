use std::path::PathBuf;
use std::sync::Arc;

use egui_file_dialog::{DialogMode, FileDialog};
use fv_app::{
    AppError, ComponentOptions, Options, PlotResponse, Selection, component_options, plot,
    result_options, time_options,
};
use fv_model::{ExampleKey, Model, ModelCache, ModelSource};

use crate::views::{MeshView, show_colorbar, show_summary, show_time_axis};

/// Selector changes are collected during layout and applied afterwards.
enum Action {
    SelectSource(ModelSource),
    SelectTime(usize),
    SelectResult(String),
    SelectComponent(usize),
    Plot,
    Reload,
}

pub struct FieldViewApp {
    cache: ModelCache,
    model: Option<Arc<Model>>,
    selection: Selection,
    time_options: Options<usize>,
    result_options: Options<String>,
    components: ComponentOptions,
    plot: Option<PlotResponse>,
    mesh_view: MeshView,
    file_dialog: FileDialog,
    last_directory: Option<PathBuf>,
    status: Option<String>,
}

impl FieldViewApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            cache: ModelCache::new(),
            model: None,
            selection: Selection::default(),
            time_options: Options {
                options: Vec::new(),
                default: None,
            },
            result_options: Options {
                options: Vec::new(),
                default: None,
            },
            components: ComponentOptions::default(),
            plot: None,
            mesh_view: MeshView::default(),
            file_dialog: FileDialog::new(),
            last_directory: None,
            status: None,
        }
    }

    /// Load a model and reset the time, result and component selectors.
    /// On failure the previous model and selectors stay as they were.
    fn select_source(&mut self, source: ModelSource) {
        let model = match self.cache.get_or_load(&source) {
            Ok(model) => model,
            Err(e) => {
                tracing::warn!(%source, error = %e, "model load failed");
                self.status = Some(format!("Failed to load {}: {}", source, e));
                return;
            }
        };

        self.time_options = time_options(&model);
        self.result_options = result_options(&model);
        self.selection = Selection::new(source).with_defaults(&model);
        self.components = self
            .selection
            .result_name
            .as_deref()
            .and_then(|name| model.result_info().find(name))
            .map(component_options)
            .unwrap_or_default();
        self.selection.component = Some(self.components.value);
        self.status = Some(format!(
            "Loaded {} ({} results, {} time sets)",
            model.name(),
            model.result_info().available_results.len(),
            model.time_freq_support().n_sets()
        ));
        self.model = Some(model);
    }

    fn select_result(&mut self, name: String) {
        let Some(model) = self.model.as_ref() else {
            return;
        };
        let Some(result) = model.result_info().find(&name) else {
            return;
        };
        self.components = component_options(result);
        self.selection.component = Some(self.components.value);
        self.selection.result_name = Some(name);
    }

    fn reload(&mut self) {
        if let Some(source) = self.selection.source.clone() {
            self.cache.invalidate(&source);
            self.select_source(source);
        }
    }

    /// Run the plot chain. Errors only update the status line.
    fn plot(&mut self) {
        let Some(model) = self.model.clone() else {
            self.status = Some(AppError::NoSelection { missing: "model" }.to_string());
            return;
        };
        match self.selection.resolve(&model).and_then(|r| plot(&model, &r)) {
            Ok(response) => {
                self.mesh_view.set_response(&response);
                self.status = Some(format!(
                    "Plotted {} ({}) in {:.1} ms",
                    response.attribute_name,
                    response.location,
                    response.timing.total_s * 1e3
                ));
                self.plot = Some(response);
            }
            Err(e) => {
                tracing::warn!(error = %e, "plot failed");
                self.status = Some(e.to_string());
            }
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::SelectSource(source) => self.select_source(source),
            Action::SelectTime(index) => self.selection.time_index = Some(index),
            Action::SelectResult(name) => self.select_result(name),
            Action::SelectComponent(c) => self.selection.component = Some(c),
            Action::Plot => self.plot(),
            Action::Reload => self.reload(),
        }
    }

    fn selectors(&mut self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label("Select Example");
                let current = self
                    .selection
                    .source
                    .as_ref()
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                egui::ComboBox::from_id_salt("example_selector")
                    .selected_text(current)
                    .width(180.0)
                    .show_ui(ui, |ui| {
                        for key in ExampleKey::ALL {
                            let source = ModelSource::Example(key);
                            let selected = self.selection.source.as_ref() == Some(&source);
                            if ui.selectable_label(selected, key.as_str()).clicked() {
                                actions.push(Action::SelectSource(source));
                            }
                        }
                    });

                ui.label("Select Time / Frequency");
                let current = self
                    .selection
                    .time_index
                    .and_then(|i| self.time_options.options.get(i))
                    .map(|o| o.label.clone())
                    .unwrap_or_default();
                egui::ComboBox::from_id_salt("time_selector")
                    .selected_text(current)
                    .width(180.0)
                    .show_ui(ui, |ui| {
                        for opt in &self.time_options.options {
                            let selected = self.selection.time_index == Some(opt.value);
                            if ui.selectable_label(selected, &opt.label).clicked() {
                                actions.push(Action::SelectTime(opt.value));
                            }
                        }
                    });
            });

            ui.vertical(|ui| {
                ui.label("Select Result");
                egui::ComboBox::from_id_salt("result_selector")
                    .selected_text(self.selection.result_name.clone().unwrap_or_default())
                    .width(200.0)
                    .show_ui(ui, |ui| {
                        for opt in &self.result_options.options {
                            let selected = self.selection.result_name.as_deref() == Some(opt.value.as_str());
                            if ui.selectable_label(selected, &opt.label).clicked() {
                                actions.push(Action::SelectResult(opt.value.clone()));
                            }
                        }
                    });

                ui.label("Select Component");
                ui.add_enabled_ui(!self.components.disabled, |ui| {
                    let current = self.selection.component.unwrap_or(self.components.value);
                    egui::ComboBox::from_id_salt("component_selector")
                        .selected_text(current.to_string())
                        .width(200.0)
                        .show_ui(ui, |ui| {
                            for &c in &self.components.values {
                                if ui.selectable_label(current == c, c.to_string()).clicked() {
                                    actions.push(Action::SelectComponent(c));
                                }
                            }
                        });
                });
            });

            ui.separator();
            ui.vertical(|ui| {
                if ui
                    .add_sized([140.0, 40.0], egui::Button::new("Plot Results"))
                    .clicked()
                {
                    actions.push(Action::Plot);
                }
                ui.add_enabled_ui(self.selection.source.is_some(), |ui| {
                    if ui.button("Reload model").clicked() {
                        actions.push(Action::Reload);
                    }
                });
            });
        });
    }
}

impl eframe::App for FieldViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("FieldView");
                ui.separator();
                if ui.button("Open model…").clicked() {
                    let initial_dir = self.last_directory.as_ref().and_then(|p| p.to_str());
                    let _ = self
                        .file_dialog
                        .open(DialogMode::SelectFile, true, initial_dir);
                }
                ui.separator();
                ui.checkbox(self.mesh_view.show_edges_mut(), "Edges");
                if ui.button("Reset view").clicked() {
                    self.mesh_view.reset_camera();
                }
            });
            ui.add_space(4.0);
            self.selectors(ui, &mut actions);
            ui.add_space(4.0);
        });

        self.file_dialog.update(ctx);
        if let Some(path) = self.file_dialog.take_selected() {
            self.last_directory = path.parent().map(|p| p.to_path_buf());
            actions.push(Action::SelectSource(ModelSource::File(path.to_path_buf())));
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.status {
                    Some(status) => ui.label(status),
                    None => ui.label("Select an example or open a model file"),
                };
            });
        });

        egui::SidePanel::right("legend")
            .default_width(240.0)
            .show(ctx, |ui| {
                match &self.plot {
                    Some(plot) => show_colorbar(ui, &plot.colorbar),
                    None => {
                        ui.label("No result plotted");
                    }
                }
                ui.separator();
                show_summary(ui, self.plot.as_ref().map(|p| &p.summary));
                ui.separator();
                if let Some(model) = &self.model {
                    ui.label("Time / Frequency");
                    show_time_axis(ui, model.time_freq_support(), self.selection.time_index);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.mesh_view.show(ui);
        });

        for action in actions {
            self.apply(action);
        }
    }
}
