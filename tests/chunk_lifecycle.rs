use cgmath::{Matrix4, Point3, Vector3};
use voxel_chunk_engine::config::ChunkSettings;
use voxel_chunk_engine::rendering::meshing::ChunkMesh;
use voxel_chunk_engine::rendering::model::{ModelHandle, ModelStore, ModelUploader};
use voxel_chunk_engine::voxels::chunk::{populate_grid, BoundaryPolicy, Chunk, MeshState};
use voxel_chunk_engine::voxels::density::{ConstantDensity, GeneratorKind};

fn settings(dimension: usize) -> ChunkSettings {
    ChunkSettings {
        dimension,
        scale: 1.0,
        threshold: 0.0,
        boundary_policy: BoundaryPolicy::Hidden,
    }
}

fn sphere(x: f64, y: f64, z: f64) -> f64 {
    9.0 - ((x - 3.0).powi(2) + (y - 3.0).powi(2) + (z - 3.0).powi(2))
}

#[test]
fn new_chunk_is_unbuilt_and_has_no_model() {
    let chunk = Chunk::new(Point3::new(0, 0, 0), settings(6), &sphere);
    assert_eq!(chunk.state(), MeshState::Unbuilt);
    assert_eq!(chunk.model(), None);
    assert!(chunk.grid().solid_count() > 0);
    assert_eq!(chunk.grid().visible_face_count(), 0);
}

#[test]
fn update_blocks_marks_the_mesh_dirty() {
    let mut chunk = Chunk::new(Point3::new(0, 0, 0), settings(6), &sphere);
    chunk.update_blocks();
    assert_eq!(chunk.state(), MeshState::Dirty);
    assert!(chunk.grid().visible_face_count() > 0);
}

#[test]
fn built_chunk_returns_its_cached_model() {
    let mut store = ModelStore::new();
    let mut chunk = Chunk::new(Point3::new(0, 0, 0), settings(6), &sphere);
    chunk.update_blocks();

    let first = chunk.request_mesh(&mut store);
    let second = chunk.request_mesh(&mut store);
    assert_eq!(first, second);
    assert_eq!(chunk.state(), MeshState::Built);
    assert_eq!(store.upload_count(), 1);

    let info = store.info(first).unwrap();
    assert_eq!(info.vertex_count, 4 * chunk.grid().visible_face_count());
}

#[test]
fn requesting_an_unbuilt_chunk_computes_visibility_first() {
    let mut store = ModelStore::new();
    let mut chunk = Chunk::new(Point3::new(0, 0, 0), settings(6), &sphere);

    let handle = chunk.request_mesh(&mut store);
    assert_eq!(chunk.state(), MeshState::Built);
    assert!(!store.get(handle).unwrap().is_empty());
}

#[test]
fn rebuild_releases_the_previous_model() {
    let mut store = ModelStore::new();
    let mut chunk = Chunk::new(Point3::new(0, 0, 0), settings(6), &sphere);
    let old = chunk.update_blocks_and_generate(&mut store);

    chunk.update_blocks();
    assert_eq!(chunk.state(), MeshState::Dirty);
    assert_eq!(chunk.model(), Some(old));

    let new = chunk.request_mesh(&mut store);
    assert_ne!(old, new);
    assert!(!store.is_live(old));
    assert!(store.is_live(new));
    assert_eq!(store.live_count(), 1);
    assert_eq!(store.release_count(), 1);
}

#[test]
fn repopulating_replaces_the_grid() {
    let mut store = ModelStore::new();
    let mut chunk = Chunk::generated(Point3::new(0, 0, 0), settings(4), &ConstantDensity(1.0), &mut store);
    assert_eq!(chunk.grid().solid_count(), 64);

    chunk.repopulate(&ConstantDensity(-1.0));
    assert_eq!(chunk.state(), MeshState::Unbuilt);
    assert_eq!(chunk.grid().solid_count(), 0);

    let handle = chunk.request_mesh(&mut store);
    assert!(store.get(handle).unwrap().is_empty());
    assert_eq!(store.live_count(), 1);
}

#[test]
fn release_model_returns_the_handle() {
    let mut store = ModelStore::new();
    let mut chunk = Chunk::generated(Point3::new(0, 0, 0), settings(4), &sphere, &mut store);
    chunk.release_model(&mut store);
    assert_eq!(chunk.model(), None);
    assert_eq!(chunk.state(), MeshState::Dirty);
    assert_eq!(store.live_count(), 0);
}

/// Records every upload and release before forwarding to a store.
#[derive(Default)]
struct CountingUploader {
    uploads: Vec<usize>,
    released: Vec<ModelHandle>,
    store: ModelStore,
}

impl ModelUploader for CountingUploader {
    fn upload(&mut self, mesh: &ChunkMesh) -> ModelHandle {
        self.uploads.push(mesh.vertex_count());
        self.store.upload(mesh)
    }

    fn release(&mut self, handle: ModelHandle) {
        self.released.push(handle);
        self.store.release(handle);
    }
}

#[test]
fn at_most_one_build_per_invalidation() {
    let mut uploader = CountingUploader::default();
    let mut chunk = Chunk::new(Point3::new(0, 0, 0), settings(6), &sphere);

    for _ in 0..3 {
        chunk.update_blocks();
        for _ in 0..4 {
            chunk.request_mesh(&mut uploader);
        }
    }
    assert_eq!(uploader.uploads.len(), 3);
    assert_eq!(uploader.released.len(), 2);
}

#[test]
fn placement_matrix_scales_chunk_position_by_dimension() {
    let chunk = Chunk::new(Point3::new(2, -1, 3), settings(8), &ConstantDensity(-1.0));
    assert_eq!(
        chunk.placement_matrix(),
        Matrix4::from_translation(Vector3::new(16.0, -8.0, 24.0))
    );
}

#[test]
fn population_is_deterministic() {
    let s = ChunkSettings {
        dimension: 8,
        ..ChunkSettings::default()
    };
    for kind in [GeneratorKind::Perlin, GeneratorKind::WhiteNoise, GeneratorKind::Checkerboard] {
        let field = kind.build(7);
        let a = populate_grid(Point3::new(1, 0, -1), &s, &*field);
        let b = populate_grid(Point3::new(1, 0, -1), &s, &*field);
        assert_eq!(a, b, "{kind:?}");
    }
}

#[test]
fn non_finite_samples_are_empty() {
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let grid = populate_grid(Point3::new(0, 0, 0), &settings(3), &ConstantDensity(value));
        assert_eq!(grid.solid_count(), 0, "{value}");
    }
    let grid = populate_grid(Point3::new(0, 0, 0), &settings(3), &|x: f64, _y: f64, _z: f64| {
        if x < 1.0 {
            f64::NAN
        } else {
            1.0
        }
    });
    assert_eq!(grid.solid_count(), 18);
}

#[test]
#[should_panic(expected = "exceeds the maximum")]
fn oversized_chunk_panics_before_sampling() {
    Chunk::new(Point3::new(0, 0, 0), settings(257), &ConstantDensity(-1.0));
}
