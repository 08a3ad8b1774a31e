//! fv-mesh: mesh and renderable grid layer for fieldview.
//!
//! Provides:
//! - Mesh data structures (Node, Element, ElementKind, Mesh)
//! - Entity collections with id -> position lookup and scoping maps
//! - Incremental mesh builder with validation
//! - Renderable grid with point/cell data stores and surface extraction
//!
//! # Example
//!
//! ```
//! use fv_core::EntityId;
//! use fv_mesh::{ElementKind, MeshBuilder};
//!
//! let mut builder = MeshBuilder::new();
//! for (id, x) in [(1, 0.0), (2, 1.0), (3, 1.0), (4, 0.0)] {
//!     let y = if id > 2 { 1.0 } else { 0.0 };
//!     builder.add_node(EntityId::new(id), [x, y, 0.0]);
//! }
//! builder.add_element(EntityId::new(10), ElementKind::Quad4, &fv_core::ids([1, 2, 3, 4]));
//! let mesh = builder.build().unwrap();
//!
//! assert_eq!(mesh.nodes().len(), 4);
//! assert_eq!(mesh.elements().len(), 1);
//! assert_eq!(mesh.grid().n_cells(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod grid;
pub mod indexing;
pub mod mesh;
pub mod surface;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::MeshBuilder;
pub use error::{MeshError, MeshResult};
pub use grid::{Cell, DataArray, DataKind, DataStore, Grid};
pub use indexing::{Entity, EntityCollection, ScopingMap};
pub use mesh::{Element, ElementKind, Mesh, Node};
pub use surface::{SurfaceFace, extract_surface};
