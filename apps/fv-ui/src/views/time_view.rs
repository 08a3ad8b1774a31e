use egui_plot::{Line, Plot, PlotPoints, Points};
use fv_model::TimeFreqSupport;

/// Time/frequency value per set, with the selected set highlighted.
pub fn show_time_axis(ui: &mut egui::Ui, support: &TimeFreqSupport, selected: Option<usize>) {
    let points: Vec<[f64; 2]> = support
        .time_frequencies
        .iter()
        .enumerate()
        .map(|(i, t)| [(i + 1) as f64, *t])
        .collect();
    let highlight: Vec<[f64; 2]> = selected
        .and_then(|i| points.get(i).copied())
        .into_iter()
        .collect();

    Plot::new("time_axis_plot")
        .height(140.0)
        .allow_scroll(false)
        .x_axis_label("Set")
        .y_axis_label(format!("Time ({})", support.unit))
        .show(ui, |plot_ui| {
            let line_points: PlotPoints = points.clone().into();
            plot_ui.line(Line::new(line_points).name("time"));
            let marker_points: PlotPoints = points.into();
            plot_ui.points(Points::new(marker_points).radius(2.5));
            if !highlight.is_empty() {
                let selected_points: PlotPoints = highlight.into();
                plot_ui.points(
                    Points::new(selected_points)
                        .radius(5.0)
                        .color(egui::Color32::from_rgb(240, 249, 33))
                        .name("selected"),
                );
            }
        });
}
