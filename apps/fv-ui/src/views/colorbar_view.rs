use egui::{Align2, Color32, FontId, Rect, Sense, Shape, Stroke, pos2, vec2};
use fv_app::{Colorbar, format_decimal_or_exponent};

const STRIPS: usize = 64;
const TICKS: usize = 6;

/// Vertical colour scale with the title on top and ticks on the right.
pub fn show_colorbar(ui: &mut egui::Ui, colorbar: &Colorbar) {
    let size = vec2(ui.available_width(), ui.available_height().min(420.0));
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, super::mesh_view::BACKGROUND);

    painter.text(
        pos2(rect.left() + 10.0, rect.top() + 6.0),
        Align2::LEFT_TOP,
        &colorbar.title,
        FontId::proportional(14.0),
        Color32::WHITE,
    );

    let bar = Rect::from_min_max(
        pos2(rect.left() + 10.0, rect.top() + 30.0),
        pos2(rect.left() + 40.0, rect.bottom() - 12.0),
    );
    let step = bar.height() / STRIPS as f32;
    for i in 0..STRIPS {
        // top strip is the maximum
        let t = 1.0 - (i as f64 + 0.5) / STRIPS as f64;
        let [r, g, b] = colorbar.colormap.sample(t);
        let strip = Rect::from_min_size(pos2(bar.left(), bar.top() + i as f32 * step), vec2(bar.width(), step + 0.5));
        painter.rect_filled(strip, 0.0, Color32::from_rgb(r, g, b));
    }
    painter.rect_stroke(bar, 0.0, Stroke::new(1.0, Color32::WHITE));

    let ticks = colorbar.ticks(TICKS);
    let n = ticks.len().max(2) - 1;
    for (i, value) in ticks.iter().enumerate() {
        let y = bar.bottom() - bar.height() * i as f32 / n as f32;
        painter.add(Shape::line_segment(
            [pos2(bar.right(), y), pos2(bar.right() + 5.0, y)],
            Stroke::new(1.0, Color32::WHITE),
        ));
        painter.text(
            pos2(bar.right() + 8.0, y),
            Align2::LEFT_CENTER,
            format_decimal_or_exponent(*value, 3),
            FontId::proportional(12.0),
            Color32::WHITE,
        );
    }
}
