//! Built-in example models.
//!
//! Each example is generated deterministically from closed-form load
//! cases on a structured hexahedral block, so the examples need no data
//! files and every call returns identical values.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use fv_core::EntityId;
use fv_field::{Field, FieldsContainer, Location, Scoping};
use fv_mesh::{ElementKind, Mesh, MeshBuilder};

use crate::model::{AvailableResult, DataSources, Metadata, Model, RecordedResult, ResultInfo, TimeFreqSupport};
use crate::{ModelError, ModelResult};

const UNIT_SYSTEM: &str = "MKS: m, kg, N, s, V, A, degC";
const YOUNG: f64 = 2.0e11;
const POISSON: f64 = 0.3;

/// Selection key of a built-in example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExampleKey {
    SimpleBar,
    MsupTransient,
    Static,
}

impl ExampleKey {
    pub const ALL: [ExampleKey; 3] = [
        ExampleKey::SimpleBar,
        ExampleKey::MsupTransient,
        ExampleKey::Static,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExampleKey::SimpleBar => "simple_bar",
            ExampleKey::MsupTransient => "msup_transient",
            ExampleKey::Static => "static",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExampleKey::SimpleBar => "Cantilever bar under tip load, one load step",
            ExampleKey::MsupTransient => "Vibrating plate, 20 transient time steps",
            ExampleKey::Static => "Block under partial surface pressure",
        }
    }
}

impl fmt::Display for ExampleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExampleKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExampleKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ModelError::UnknownExample {
                name: s.to_string(),
            })
    }
}

/// Build the example model for `key`. No caching: every call rebuilds.
pub fn load_model(key: ExampleKey) -> ModelResult<Model> {
    let model = match key {
        ExampleKey::SimpleBar => simple_bar(),
        ExampleKey::MsupTransient => msup_transient(),
        ExampleKey::Static => static_block(),
    }?;
    tracing::info!(
        example = %key,
        nodes = model.mesh().nodes().len(),
        elements = model.mesh().elements().len(),
        "example model loaded"
    );
    Ok(model)
}

/// Structured block of `nx * ny * nz` hexahedra.
///
/// Node id = 1 + i + (nx+1) * (j + (ny+1) * k); element ids follow the
/// same pattern over cells.
struct Block {
    n: [usize; 3],
    size: [f64; 3],
}

impl Block {
    fn node_id(&self, i: usize, j: usize, k: usize) -> u32 {
        (1 + i + (self.n[0] + 1) * (j + (self.n[1] + 1) * k)) as u32
    }

    fn node_position(&self, i: usize, j: usize, k: usize) -> [f64; 3] {
        [
            self.size[0] * i as f64 / self.n[0] as f64,
            self.size[1] * j as f64 / self.n[1] as f64,
            self.size[2] * k as f64 / self.n[2] as f64,
        ]
    }

    /// Nodes in id order.
    fn nodes(&self) -> Vec<(u32, [f64; 3])> {
        let mut out = Vec::new();
        for k in 0..=self.n[2] {
            for j in 0..=self.n[1] {
                for i in 0..=self.n[0] {
                    out.push((self.node_id(i, j, k), self.node_position(i, j, k)));
                }
            }
        }
        out
    }

    /// Hexahedra in id order, with their cell coordinates.
    fn hexes(&self) -> Vec<(u32, [usize; 3], [u32; 8])> {
        let mut out = Vec::new();
        let mut id = 1;
        for k in 0..self.n[2] {
            for j in 0..self.n[1] {
                for i in 0..self.n[0] {
                    let conn = [
                        self.node_id(i, j, k),
                        self.node_id(i + 1, j, k),
                        self.node_id(i + 1, j + 1, k),
                        self.node_id(i, j + 1, k),
                        self.node_id(i, j, k + 1),
                        self.node_id(i + 1, j, k + 1),
                        self.node_id(i + 1, j + 1, k + 1),
                        self.node_id(i, j + 1, k + 1),
                    ];
                    out.push((id, [i, j, k], conn));
                    id += 1;
                }
            }
        }
        out
    }

    fn cell_center(&self, cell: [usize; 3]) -> [f64; 3] {
        let lo = self.node_position(cell[0], cell[1], cell[2]);
        let hi = self.node_position(cell[0] + 1, cell[1] + 1, cell[2] + 1);
        [
            0.5 * (lo[0] + hi[0]),
            0.5 * (lo[1] + hi[1]),
            0.5 * (lo[2] + hi[2]),
        ]
    }

    fn cell_volume(&self) -> f64 {
        (0..3).map(|a| self.size[a] / self.n[a] as f64).product()
    }

    fn mesh(&self) -> ModelResult<Mesh> {
        let mut builder = MeshBuilder::new();
        for (id, p) in self.nodes() {
            builder.add_node(EntityId::new(id), p);
        }
        for (id, _, conn) in self.hexes() {
            let nodes: Vec<EntityId> = conn.iter().map(|&n| EntityId::new(n)).collect();
            builder.add_element(EntityId::new(id), ElementKind::Hex8, &nodes);
        }
        Ok(builder.build()?)
    }

    fn position_of(&self, node_id: u32) -> [f64; 3] {
        let idx = node_id as usize - 1;
        let row = self.n[0] + 1;
        let layer = row * (self.n[1] + 1);
        self.node_position(idx % row, (idx % layer) / row, idx / layer)
    }
}

/// Nodal field over the given node ids.
fn nodal<const C: usize>(
    name: String,
    block: &Block,
    node_ids: &[u32],
    f: impl Fn([f64; 3]) -> [f64; C],
) -> ModelResult<Field> {
    let mut data = Vec::with_capacity(node_ids.len() * C);
    for &id in node_ids {
        data.extend_from_slice(&f(block.position_of(id)));
    }
    Ok(Field::new(
        name,
        Location::Nodal,
        C,
        Scoping::from_raw(node_ids.iter().copied()),
        data,
    )?)
}

/// Elemental-nodal field over every element, evaluated at each element node.
fn elemental_nodal<const C: usize>(
    name: String,
    block: &Block,
    f: impl Fn([f64; 3]) -> [f64; C],
) -> ModelResult<Field> {
    let hexes = block.hexes();
    let mut data = Vec::with_capacity(hexes.len() * 8 * C);
    let mut offsets = Vec::with_capacity(hexes.len() + 1);
    offsets.push(0);
    for (_, _, conn) in &hexes {
        for &node in conn {
            data.extend_from_slice(&f(block.position_of(node)));
        }
        offsets.push(data.len());
    }
    Ok(Field::elemental_nodal(
        name,
        C,
        Scoping::from_raw(hexes.iter().map(|(id, _, _)| *id)),
        data,
        offsets,
    )?)
}

fn single_set(field: Field) -> FieldsContainer {
    FieldsContainer::new(vec![field])
}

fn result(
    name: &str,
    operator_name: &str,
    location: Location,
    n_components: usize,
    physics_name: &str,
    unit: &str,
) -> AvailableResult {
    AvailableResult {
        name: name.to_string(),
        operator_name: operator_name.to_string(),
        n_components,
        location,
        physics_name: physics_name.to_string(),
        unit: unit.to_string(),
    }
}

fn assemble(
    key: ExampleKey,
    analysis_type: &str,
    mesh: Mesh,
    times: Vec<f64>,
    results: Vec<(AvailableResult, Vec<FieldsContainer>)>,
) -> Model {
    let mut available = Vec::with_capacity(results.len());
    let mut recorded = Vec::with_capacity(results.len());
    for (info, sets) in results {
        recorded.push(RecordedResult {
            operator_name: info.operator_name.clone(),
            sets,
        });
        available.push(info);
    }

    Model::new(
        key.as_str(),
        Metadata {
            meshed_region: mesh,
            result_info: ResultInfo {
                analysis_type: analysis_type.to_string(),
                physics_type: "mechanical".to_string(),
                unit_system: UNIT_SYSTEM.to_string(),
                available_results: available,
            },
            time_freq_support: TimeFreqSupport {
                time_frequencies: times,
                unit: "s".to_string(),
            },
            data_sources: DataSources::new(key.as_str(), recorded),
        },
    )
}

fn simple_bar() -> ModelResult<Model> {
    let block = Block {
        n: [20, 2, 2],
        size: [1.0, 0.1, 0.1],
    };
    let [l, _, h] = block.size;
    let zc = 0.5 * h;
    let tip = 1.0e-3;
    let all_nodes: Vec<u32> = block.nodes().iter().map(|(id, _)| *id).collect();

    let displacement = nodal("displacement_1".to_string(), &block, &all_nodes, |p| {
        let s = p[0] / l;
        let w = -tip * s * s * (3.0 - s) / 2.0;
        let slope = -tip * (6.0 * s - 3.0 * s * s) / (2.0 * l);
        [-(p[2] - zc) * slope, 0.0, w]
    })?;

    let forces = elemental_nodal("element_nodal_forces_1".to_string(), &block, |p| {
        let s = p[0] / l;
        [2.0e3 * (1.0 - s) * (p[2] - zc) / h, 0.0, -12.5]
    })?;

    let hexes = block.hexes();
    let volume = Field::new(
        "elemental_volume_1",
        Location::Elemental,
        1,
        Scoping::from_raw(hexes.iter().map(|(id, _, _)| *id)),
        vec![block.cell_volume(); hexes.len()],
    )?;

    let temperature = nodal("structural_temperature_1".to_string(), &block, &all_nodes, |p| {
        [22.0 + 6.0 * p[0] / l + 2.0 * p[2] / h]
    })?;

    Ok(assemble(
        ExampleKey::SimpleBar,
        "static",
        block.mesh()?,
        vec![1.0],
        vec![
            (
                result("displacement", "U", Location::Nodal, 3, "Nodal Displacement", "m"),
                vec![single_set(displacement)],
            ),
            (
                result(
                    "element_nodal_forces",
                    "ENF",
                    Location::ElementalNodal,
                    3,
                    "Element nodal Forces",
                    "N",
                ),
                vec![single_set(forces)],
            ),
            (
                result(
                    "elemental_volume",
                    "ENG_VOL",
                    Location::Elemental,
                    1,
                    "Volume",
                    "m^3",
                ),
                vec![single_set(volume)],
            ),
            (
                result(
                    "structural_temperature",
                    "BFE",
                    Location::Nodal,
                    1,
                    "Temperature",
                    "degC",
                ),
                vec![single_set(temperature)],
            ),
        ],
    ))
}

/// Plate deflection: two modes with their own frequencies.
struct PlateModes {
    dims: [f64; 2],
    modes: [(f64, f64, f64, f64); 2], // (m, n, amplitude, frequency Hz)
}

/// w and its derivatives (w_x, w_y, w_xx, w_yy, w_xy) at a point and time.
struct Deflection {
    w: f64,
    wx: f64,
    wy: f64,
    wxx: f64,
    wyy: f64,
    wxy: f64,
}

impl PlateModes {
    fn at(&self, x: f64, y: f64, t: f64) -> Deflection {
        let mut d = Deflection {
            w: 0.0,
            wx: 0.0,
            wy: 0.0,
            wxx: 0.0,
            wyy: 0.0,
            wxy: 0.0,
        };
        for &(m, n, amp, freq) in &self.modes {
            let a = amp * (2.0 * PI * freq * t).sin();
            let kx = m * PI / self.dims[0];
            let ky = n * PI / self.dims[1];
            let (sx, cx) = (kx * x).sin_cos();
            let (sy, cy) = (ky * y).sin_cos();
            d.w += a * sx * sy;
            d.wx += a * kx * cx * sy;
            d.wy += a * ky * sx * cy;
            d.wxx -= a * kx * kx * sx * sy;
            d.wyy -= a * ky * ky * sx * sy;
            d.wxy += a * kx * ky * cx * cy;
        }
        d
    }
}

fn msup_transient() -> ModelResult<Model> {
    let block = Block {
        n: [20, 10, 1],
        size: [1.0, 0.5, 0.02],
    };
    let zc = 0.5 * block.size[2];
    let plate = PlateModes {
        dims: [block.size[0], block.size[1]],
        modes: [(1.0, 1.0, 5.0e-3, 5.0), (2.0, 1.0, 1.5e-3, 12.0)],
    };
    let times: Vec<f64> = (1..=20).map(|i| i as f64 / 100.0).collect();
    let all_nodes: Vec<u32> = block.nodes().iter().map(|(id, _)| *id).collect();
    let plate_modulus = YOUNG / (1.0 - POISSON * POISSON);
    let shear_modulus = YOUNG / (2.0 * (1.0 + POISSON));

    let mut displacement = Vec::with_capacity(times.len());
    let mut stress = Vec::with_capacity(times.len());
    let mut strain = Vec::with_capacity(times.len());

    for (set, &t) in times.iter().enumerate() {
        let set = set + 1;
        displacement.push(single_set(nodal(
            format!("displacement_{}", set),
            &block,
            &all_nodes,
            |p| {
                let d = plate.at(p[0], p[1], t);
                let zeta = p[2] - zc;
                [-zeta * d.wx, -zeta * d.wy, d.w]
            },
        )?));

        stress.push(single_set(elemental_nodal(format!("stress_{}", set), &block, |p| {
            let d = plate.at(p[0], p[1], t);
            let zeta = p[2] - zc;
            [
                -zeta * plate_modulus * (d.wxx + POISSON * d.wyy),
                -zeta * plate_modulus * (d.wyy + POISSON * d.wxx),
                0.0,
                -2.0 * zeta * shear_modulus * d.wxy,
                0.0,
                0.0,
            ]
        })?));

        strain.push(single_set(elemental_nodal(
            format!("elastic_strain_{}", set),
            &block,
            |p| {
                let d = plate.at(p[0], p[1], t);
                let zeta = p[2] - zc;
                [
                    -zeta * d.wxx,
                    -zeta * d.wyy,
                    POISSON / (1.0 - POISSON) * zeta * (d.wxx + d.wyy),
                    -2.0 * zeta * d.wxy,
                    0.0,
                    0.0,
                ]
            },
        )?));
    }

    Ok(assemble(
        ExampleKey::MsupTransient,
        "transient",
        block.mesh()?,
        times,
        vec![
            (
                result("displacement", "U", Location::Nodal, 3, "Nodal Displacement", "m"),
                displacement,
            ),
            (
                result("stress", "S", Location::ElementalNodal, 6, "Stress", "Pa"),
                stress,
            ),
            (
                result(
                    "elastic_strain",
                    "EPEL",
                    Location::ElementalNodal,
                    6,
                    "Strain",
                    "m/m",
                ),
                strain,
            ),
        ],
    ))
}

fn static_block() -> ModelResult<Model> {
    let block = Block {
        n: [8, 8, 4],
        size: [0.2, 0.2, 0.1],
    };
    let [lx, ly, h] = block.size;
    let p0 = 1.0e6;
    let bump = |x: f64, y: f64| 1.0 + 0.5 * (PI * x / lx).sin() * (PI * y / ly).sin();
    let all_nodes: Vec<u32> = block.nodes().iter().map(|(id, _)| *id).collect();

    let displacement = nodal("displacement_1".to_string(), &block, &all_nodes, |p| {
        let depth = p[2] / h;
        [
            3.0e-6 * (p[0] - 0.5 * lx) / lx * depth,
            3.0e-6 * (p[1] - 0.5 * ly) / ly * depth,
            -2.0e-5 * depth * bump(p[0], p[1]),
        ]
    })?;

    let stress = elemental_nodal("stress_1".to_string(), &block, |p| {
        let szz = -p0 * bump(p[0], p[1]) * (0.5 + 0.5 * p[2] / h);
        let shear = 0.02 * p0 * (p[0] - 0.5 * lx) / lx;
        [
            POISSON * szz,
            POISSON * szz,
            szz,
            0.05 * p0 * (2.0 * PI * p[0] / lx).sin() * (2.0 * PI * p[1] / ly).sin(),
            shear,
            shear,
        ]
    })?;

    // Pressure acts on the top layer only. The scoping also names two ids
    // from a neighbouring part that this mesh doesn't contain.
    let hexes = block.hexes();
    let top = block.n[2] - 1;
    let mut pressure_ids = Vec::new();
    let mut pressure_values = Vec::new();
    for (id, cell, _) in hexes.iter().filter(|(_, c, _)| c[2] == top) {
        let c = block.cell_center(*cell);
        pressure_ids.push(*id);
        pressure_values.push(p0 * bump(c[0], c[1]));
    }
    let foreign = hexes.len() as u32 + 100;
    pressure_ids.extend([foreign, foreign + 1]);
    pressure_values.extend([p0, p0]);
    let pressure = Field::new(
        "pressure_1",
        Location::Elemental,
        1,
        Scoping::from_raw(pressure_ids),
        pressure_values,
    )?;

    // Temperature is known on the hot half only, listed in reverse id order.
    let half: Vec<u32> = block
        .nodes()
        .iter()
        .rev()
        .filter(|(_, p)| p[0] <= 0.5 * lx + 1e-12)
        .map(|(id, _)| *id)
        .collect();
    let temperature = nodal("temperature_1".to_string(), &block, &half, |p| {
        [20.0 + 60.0 * (1.0 - p[0] / lx) + 10.0 * p[2] / h]
    })?;

    Ok(assemble(
        ExampleKey::Static,
        "static",
        block.mesh()?,
        vec![1.0],
        vec![
            (
                result("displacement", "U", Location::Nodal, 3, "Nodal Displacement", "m"),
                vec![single_set(displacement)],
            ),
            (
                result("stress", "S", Location::ElementalNodal, 6, "Stress", "Pa"),
                vec![single_set(stress)],
            ),
            (
                result("pressure", "PRES", Location::Elemental, 1, "Surface Pressure", "Pa"),
                vec![single_set(pressure)],
            ),
            (
                result("temperature", "BFE", Location::Nodal, 1, "Temperature", "degC"),
                vec![single_set(temperature)],
            ),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for key in ExampleKey::ALL {
            assert_eq!(key.as_str().parse::<ExampleKey>().unwrap(), key);
        }
        assert!(matches!(
            "nope".parse::<ExampleKey>(),
            Err(ModelError::UnknownExample { .. })
        ));
    }

    #[test]
    fn block_position_matches_id_layout() {
        let block = Block {
            n: [3, 2, 2],
            size: [3.0, 2.0, 2.0],
        };
        for (id, p) in block.nodes() {
            assert_eq!(block.position_of(id), p);
        }
    }

    #[test]
    fn every_example_builds_with_consistent_sets() {
        for key in ExampleKey::ALL {
            let model = load_model(key).unwrap();
            let n_sets = model.time_freq_support().n_sets();
            assert!(n_sets >= 1);
            for r in &model.result_info().available_results {
                let rec = model.data_sources().recorded(&r.operator_name).unwrap();
                assert_eq!(rec.sets.len(), n_sets, "{} / {}", key, r.name);
                for fc in &rec.sets {
                    let f = fc.first().unwrap();
                    assert_eq!(f.component_count(), r.n_components);
                    assert_eq!(f.location().unwrap(), r.location);
                    f.validate().unwrap();
                }
            }
        }
    }

    #[test]
    fn msup_has_twenty_sets() {
        let model = load_model(ExampleKey::MsupTransient).unwrap();
        let tf = &model.time_freq_support().time_frequencies;
        assert_eq!(tf.len(), 20);
        assert!((tf[0] - 0.01).abs() < 1e-12);
        assert!((tf[19] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn static_pressure_references_foreign_ids() {
        let model = load_model(ExampleKey::Static).unwrap();
        let rec = model.data_sources().recorded("PRES").unwrap();
        let field = rec.sets[0].first().unwrap();
        let map = model.mesh().elements().map_scoping(field.scoping().ids());
        assert_eq!(map.dropped(), 2);
        assert_eq!(map.len(), 64);
    }
}
