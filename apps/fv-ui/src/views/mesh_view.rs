//! 3-D surface view of a plotted grid.
//!
//! The outer surface is painted back to front with flat Lambert shading.
//! Drag rotates, scroll zooms, double click resets the camera.

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke};
use fv_app::{Colorbar, PlotResponse};
use fv_field::Location;
use fv_mesh::extract_surface;
use nalgebra::{Rotation3, Vector3};

pub const BACKGROUND: Color32 = Color32::from_rgb(51, 76, 102);
pub const NO_DATA: Color32 = Color32::from_gray(150);

const DEFAULT_YAW: f32 = 0.6;
const DEFAULT_PITCH: f32 = -1.1;

struct SceneFace {
    points: Vec<usize>,
    normal: Vector3<f32>,
    /// One colour per face point.
    colors: Vec<Color32>,
}

/// Surface geometry centred on the origin and scaled to unit radius.
struct Scene {
    positions: Vec<Vector3<f32>>,
    faces: Vec<SceneFace>,
}

impl Scene {
    fn build(response: &PlotResponse) -> Self {
        let grid = &response.grid;
        let center = grid.center();
        let radius = (grid.diagonal() * 0.5).max(1e-12);
        let positions = grid
            .points()
            .iter()
            .map(|p| ((p - center) / radius).cast::<f32>())
            .collect();

        let faces = extract_surface(grid)
            .into_iter()
            .map(|face| {
                let normal = face
                    .normal(grid)
                    .try_normalize(1e-30)
                    .unwrap_or_else(Vector3::z)
                    .cast::<f32>();
                let colors = match response.location {
                    Location::Nodal => face
                        .points
                        .iter()
                        .map(|&p| color_of(&response.colorbar, response.scalar_at(p)))
                        .collect(),
                    _ => vec![color_of(&response.colorbar, response.scalar_at(face.cell)); face.points.len()],
                };
                SceneFace {
                    points: face.points,
                    normal,
                    colors,
                }
            })
            .collect();

        Self { positions, faces }
    }
}

fn color_of(colorbar: &Colorbar, value: f64) -> Color32 {
    colorbar
        .color_of(value)
        .map(|[r, g, b]| Color32::from_rgb(r, g, b))
        .unwrap_or(NO_DATA)
}

fn shaded(color: Color32, factor: f32) -> Color32 {
    let scale = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgb(scale(color.r()), scale(color.g()), scale(color.b()))
}

pub struct MeshView {
    yaw: f32,
    pitch: f32,
    zoom: f32,
    show_edges: bool,
    scene: Option<Scene>,
}

impl Default for MeshView {
    fn default() -> Self {
        Self {
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            zoom: 1.0,
            show_edges: true,
            scene: None,
        }
    }
}

impl MeshView {
    pub fn set_response(&mut self, response: &PlotResponse) {
        let scene = Scene::build(response);
        tracing::debug!(faces = scene.faces.len(), "surface scene built");
        self.scene = Some(scene);
    }

    pub fn reset_camera(&mut self) {
        self.yaw = DEFAULT_YAW;
        self.pitch = DEFAULT_PITCH;
        self.zoom = 1.0;
    }

    pub fn show_edges_mut(&mut self) -> &mut bool {
        &mut self.show_edges
    }

    fn rotation(&self) -> Rotation3<f32> {
        Rotation3::from_axis_angle(&Vector3::x_axis(), self.pitch)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), self.yaw)
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, BACKGROUND);

        if response.dragged() {
            let delta = response.drag_delta();
            self.yaw += delta.x * 0.01;
            self.pitch = (self.pitch + delta.y * 0.01).clamp(-3.1, 3.1);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.zoom = (self.zoom * (1.0 + scroll * 0.002)).clamp(0.1, 20.0);
            }
        }
        if response.double_clicked() {
            self.reset_camera();
        }

        let Some(scene) = &self.scene else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Select a result and press Plot Results",
                FontId::proportional(16.0),
                Color32::WHITE,
            );
            return;
        };

        let rot = self.rotation();
        let projected: Vec<Vector3<f32>> = scene.positions.iter().map(|p| rot * p).collect();
        let scale = 0.45 * rect.width().min(rect.height()) * self.zoom;
        let project = |p: &Vector3<f32>| to_screen(rect, scale, p);

        let mut order: Vec<(f32, usize)> = scene
            .faces
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let depth = f.points.iter().map(|&k| projected[k].z).sum::<f32>() / f.points.len() as f32;
                (depth, i)
            })
            .collect();
        order.sort_by(|a, b| a.0.total_cmp(&b.0));

        let edge = Stroke::new(0.6, Color32::from_black_alpha(110));
        let mut shapes = Vec::with_capacity(order.len() * 2);
        for (_, i) in order {
            let face = &scene.faces[i];
            if face.points.len() < 3 {
                continue;
            }
            let shade = 0.35 + 0.65 * (rot * face.normal).z.abs();
            let screen: Vec<Pos2> = face.points.iter().map(|&k| project(&projected[k])).collect();

            let mut mesh = egui::Mesh::default();
            for (pos, color) in screen.iter().zip(&face.colors) {
                mesh.colored_vertex(*pos, shaded(*color, shade));
            }
            for k in 1..(screen.len() as u32 - 1) {
                mesh.add_triangle(0, k, k + 1);
            }
            shapes.push(Shape::mesh(mesh));
            if self.show_edges {
                shapes.push(Shape::closed_line(screen, edge));
            }
        }
        painter.extend(shapes);
    }
}

fn to_screen(rect: Rect, scale: f32, p: &Vector3<f32>) -> Pos2 {
    egui::pos2(rect.center().x + p.x * scale, rect.center().y - p.y * scale)
}
