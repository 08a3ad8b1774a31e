//! Projection laws: shape, coverage, idempotence, dispatch and rejection.

use std::cell::Cell;

use fv_app::{AppError, FieldProjector, Projection};
use fv_core::{EntityId, finite_range};
use fv_field::{ElementalMean, ElementalReduction, Field, FieldResult, Location, Scoping};
use fv_mesh::{ElementKind, Grid, Mesh, MeshBuilder};
use proptest::prelude::*;

/// Five nodes with ids 0..=4 on a line, joined by four line elements 10..=13.
fn five_node_mesh() -> Mesh {
    let mut b = MeshBuilder::new();
    for i in 0..5u32 {
        b.add_node(EntityId::new(i), [i as f64, 0.0, 0.0]);
    }
    for i in 0..4u32 {
        b.add_element(
            EntityId::new(10 + i),
            ElementKind::Line2,
            &[EntityId::new(i), EntityId::new(i + 1)],
        );
    }
    b.build().unwrap()
}

fn point_values<'a>(p: &'a Projection) -> &'a [f64] {
    p.grid.point_data.get(&p.attribute_name).unwrap().values()
}

#[derive(Default)]
struct CountingMean {
    calls: Cell<usize>,
}

impl ElementalReduction for CountingMean {
    fn reduce(&self, field: &Field) -> FieldResult<Field> {
        self.calls.set(self.calls.get() + 1);
        ElementalMean.reduce(field)
    }
}

#[test]
fn identity_scenario() {
    let mesh = five_node_mesh();
    let field = Field::new("temperature_1", Location::Nodal, 1, Scoping::from_raw([2, 4]), vec![10.0, 20.0]).unwrap();

    let p = FieldProjector::new().project(&mesh, &field).unwrap();
    let values = point_values(&p);
    assert_eq!(values.len(), 5);
    assert!(values[0].is_nan());
    assert!(values[1].is_nan());
    assert_eq!(values[2], 10.0);
    assert!(values[3].is_nan());
    assert_eq!(values[4], 20.0);

    let range = finite_range(values).unwrap();
    assert_eq!(range.as_array(), [10.0, 20.0]);
}

#[test]
fn unknown_id_is_dropped() {
    let mesh = five_node_mesh();
    let field = Field::new(
        "temperature_1",
        Location::Nodal,
        1,
        Scoping::from_raw([1, 99, 3]),
        vec![5.0, 6.0, 7.0],
    )
    .unwrap();

    let p = FieldProjector::new().project(&mesh, &field).unwrap();
    let values = point_values(&p);
    assert_eq!(values.len(), 5);
    assert_eq!(values[1], 5.0);
    assert_eq!(values[3], 7.0);
    assert_eq!(values.iter().filter(|v| v.is_nan()).count(), 3);
}

#[test]
fn name_derivation() {
    let mesh = five_node_mesh();
    let projector = FieldProjector::new();
    for (field_name, expected) in [("stress_1", "stress"), ("displacement", "displacement")] {
        let field = Field::new(field_name, Location::Nodal, 1, Scoping::from_raw([0]), vec![1.0]).unwrap();
        assert_eq!(projector.project(&mesh, &field).unwrap().attribute_name, expected);
    }
}

#[test]
fn dispatch_by_location() {
    let mesh = five_node_mesh();

    let nodal = Field::new("u_1", Location::Nodal, 1, Scoping::from_raw([0]), vec![1.0]).unwrap();
    let elemental = Field::new("p_1", Location::Elemental, 1, Scoping::from_raw([11]), vec![2.0]).unwrap();
    let elemental_nodal = Field::elemental_nodal(
        "s_1",
        1,
        Scoping::from_raw([12, 13]),
        vec![1.0, 2.0, 4.0, 8.0],
        vec![0, 2, 4],
    )
    .unwrap();

    let projector = FieldProjector::with_reduction(CountingMean::default());

    let p = projector.project(&mesh, &nodal).unwrap();
    assert_eq!(p.location, Location::Nodal);
    assert!(p.grid.point_data.contains("u"));
    assert_eq!(p.grid.cell_data.get("dummy").unwrap().values(), &[0.0; 4]);

    let p = projector.project(&mesh, &elemental).unwrap();
    assert_eq!(p.location, Location::Elemental);
    assert!(p.grid.cell_data.contains("p"));
    assert_eq!(p.grid.point_data.get("dummy").unwrap().values(), &[0.0; 5]);
    assert_eq!(projector.reduction().calls.get(), 0);

    let p = projector.project(&mesh, &elemental_nodal).unwrap();
    assert_eq!(projector.reduction().calls.get(), 1);
    assert_eq!(p.location, Location::Elemental);
    let s = p.grid.cell_data.get("s").unwrap().values();
    assert!(s[0].is_nan() && s[1].is_nan());
    assert_eq!(&s[2..], &[1.5, 6.0]);
    assert_eq!(p.grid.point_data.get("dummy").unwrap().values(), &[0.0; 5]);
}

#[test]
fn unknown_location_leaves_grid_unmodified() {
    let mesh = five_node_mesh();
    let field = Field::from_raw(
        "stress_1",
        "unknown_location",
        1,
        Scoping::from_raw([0, 1]),
        vec![1.0, 2.0],
        None,
    );

    let projector = FieldProjector::with_reduction(CountingMean::default());
    let mut grid = Grid::from_mesh(&mesh);
    grid.point_data.insert("previous", fv_mesh::DataArray::scalars(vec![0.5; 5]));
    grid.set_active_scalars("previous");
    let before = grid.clone();

    let err = projector.project_onto(&mesh, &field, &mut grid).unwrap_err();
    assert!(matches!(err, AppError::UnsupportedLocation { ref location } if location == "unknown_location"));
    assert_eq!(grid, before);
    assert_eq!(projector.reduction().calls.get(), 0);
}

#[test]
fn location_labels_are_case_insensitive() {
    let mesh = five_node_mesh();
    for label in ["nodal", "NODAL", "Nodal"] {
        let field = Field::from_raw("t_1", label, 1, Scoping::from_raw([0]), vec![1.0], None);
        let p = FieldProjector::new().project(&mesh, &field).unwrap();
        assert_eq!(p.location, Location::Nodal);
    }
}

/// Mesh of `n` nodes with odd ids 1, 3, 5, ...
fn odd_id_mesh(n: usize) -> Mesh {
    let mut b = MeshBuilder::new();
    for i in 0..n {
        b.add_node(EntityId::new(2 * i as u32 + 1), [i as f64, 0.0, 0.0]);
    }
    b.build().unwrap()
}

fn nodal_case() -> impl Strategy<Value = (usize, usize, Vec<u32>, Vec<f64>)> {
    (1usize..20, 1usize..4)
        .prop_flat_map(|(n, cc)| {
            (
                Just(n),
                Just(cc),
                prop::collection::btree_set(0u32..(2 * n as u32 + 6), 0..(n + 5)),
            )
        })
        .prop_flat_map(|(n, cc, ids)| {
            let ids: Vec<u32> = ids.into_iter().collect();
            let len = ids.len() * cc;
            (
                Just(n),
                Just(cc),
                Just(ids).prop_shuffle(),
                prop::collection::vec(-1.0e6_f64..1.0e6_f64, len),
            )
        })
}

proptest! {
    #[test]
    fn projection_laws((n, cc, ids, data) in nodal_case()) {
        let mesh = odd_id_mesh(n);
        let field = Field::new("f_1", Location::Nodal, cc, Scoping::from_raw(ids.clone()), data.clone()).unwrap();
        let projector = FieldProjector::new();

        let first = projector.project(&mesh, &field).unwrap();
        let values = point_values(&first);

        // shape
        prop_assert_eq!(values.len(), n * cc);

        // coverage
        for i in 0..n {
            let id = 2 * i as u32 + 1;
            let tuple = &values[i * cc..(i + 1) * cc];
            match ids.iter().position(|&s| s == id) {
                Some(k) => prop_assert_eq!(tuple, &data[k * cc..(k + 1) * cc]),
                None => prop_assert!(tuple.iter().all(|v| v.is_nan())),
            }
        }

        // idempotence
        let second = projector.project(&mesh, &field).unwrap();
        let a: Vec<u64> = values.iter().map(|v| v.to_bits()).collect();
        let b: Vec<u64> = point_values(&second).iter().map(|v| v.to_bits()).collect();
        prop_assert_eq!(a, b);
    }
}
