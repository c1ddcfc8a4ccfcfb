use cgmath::{Matrix4, Point3, Vector3};
use voxel_chunk_engine::config::{ChunkSettings, ConfigError, EngineConfig};
use voxel_chunk_engine::rendering::model::ModelStore;
use voxel_chunk_engine::rendering::uniform::UniformValue;
use voxel_chunk_engine::voxels::chunk::{BoundaryPolicy, MeshState};
use voxel_chunk_engine::voxels::density::{ConstantDensity, GeneratorKind};
use voxel_chunk_engine::voxels::world::World;
use voxel_chunk_engine::{run, run_with_uploader, EngineError, MODEL_UNIFORM, MVP_UNIFORM};

fn solid_world(dimension: usize) -> World {
    let settings = ChunkSettings {
        dimension,
        boundary_policy: BoundaryPolicy::Visible,
        ..ChunkSettings::default()
    };
    World::new(settings, Box::new(ConstantDensity(1.0)))
}

#[test]
fn added_chunks_are_ready_for_meshing() {
    let mut world = solid_world(4);
    let chunk = world.add_chunk_at(Point3::new(0, 0, 0));
    assert_eq!(chunk.state(), MeshState::Dirty);
    assert_eq!(chunk.grid().visible_face_count(), 96);
    assert_eq!(world.chunk_count(), 1);
}

#[test]
fn adding_an_existing_chunk_keeps_it() {
    let mut store = ModelStore::new();
    let mut world = solid_world(2);
    world.add_chunk_at(Point3::new(1, 1, 1));
    world.request_meshes(&mut store);

    let chunk = world.add_chunk_at(Point3::new(1, 1, 1));
    assert_eq!(chunk.state(), MeshState::Built);
    assert_eq!(world.chunk_count(), 1);
}

#[test]
fn cube_around_origin_has_every_chunk() {
    let mut world = solid_world(2);
    world.add_chunks_around_origin(1);
    assert_eq!(world.chunk_count(), 27);
    assert!(world.get_chunk_at(Point3::new(-1, 1, 0)).is_some());
    assert!(world.get_chunk_at(Point3::new(2, 0, 0)).is_none());
}

#[test]
fn request_meshes_builds_each_chunk_once() {
    let mut store = ModelStore::new();
    let mut world = solid_world(2);
    world.add_chunks_around_origin(1);

    let draws = world.request_meshes(&mut store);
    assert_eq!(draws.len(), 27);
    assert_eq!(store.upload_count(), 27);

    let again = world.request_meshes(&mut store);
    assert_eq!(store.upload_count(), 27);
    assert_eq!(draws, again);

    assert_eq!(draws[0].position, Point3::new(-1, -1, -1));
    assert_eq!(
        draws[0].placement,
        Matrix4::from_translation(Vector3::new(-2.0, -2.0, -2.0))
    );
}

#[test]
fn regenerating_a_chunk_rebuilds_only_that_chunk() {
    let mut store = ModelStore::new();
    let mut world = solid_world(2);
    world.add_chunks_around_origin(1);
    world.request_meshes(&mut store);

    assert!(world.regenerate_chunk_at(Point3::new(0, 0, 0)));
    assert!(!world.regenerate_chunk_at(Point3::new(5, 5, 5)));
    world.request_meshes(&mut store);
    assert_eq!(store.upload_count(), 28);
    assert_eq!(store.release_count(), 1);
    assert_eq!(store.live_count(), 27);
}

#[test]
fn removing_a_chunk_releases_its_model() {
    let mut store = ModelStore::new();
    let mut world = solid_world(2);
    world.add_chunk_at(Point3::new(0, 0, 0));
    let draws = world.request_meshes(&mut store);

    let removed = world.remove_chunk_at(Point3::new(0, 0, 0), &mut store).unwrap();
    assert_eq!(removed.model(), None);
    assert!(!store.is_live(draws[0].model));
    assert!(world.get_chunk_at_mut(Point3::new(0, 0, 0)).is_none());
    assert!(world.remove_chunk_at(Point3::new(0, 0, 0), &mut store).is_none());
}

#[test]
fn run_summarises_a_solid_world() {
    let config = EngineConfig {
        chunk_dimension: 4,
        generator: GeneratorKind::Solid,
        boundary_policy: BoundaryPolicy::Visible,
        world_radius: 1,
        ..EngineConfig::default()
    };
    let summary = run(&config).unwrap();
    assert_eq!(summary.chunks, 27);
    assert_eq!(summary.solid_cells, 27 * 64);
    assert_eq!(summary.visible_faces, 27 * 96);
    assert_eq!(summary.vertices, 4 * summary.visible_faces);
    assert_eq!(summary.triangles, 2 * summary.visible_faces);
    assert_eq!(summary.draws, 27);
}

#[test]
fn run_rejects_invalid_config() {
    let config = EngineConfig {
        chunk_dimension: 0,
        ..EngineConfig::default()
    };
    assert!(run(&config).is_err());
}

#[test]
fn run_with_uploader_rejects_invalid_config_before_generating() {
    let mut store = ModelStore::new();
    for dimension in [0, 257] {
        let config = EngineConfig {
            chunk_dimension: dimension,
            world_radius: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            run_with_uploader(&config, &mut store),
            Err(EngineError::Config(ConfigError::Invalid(_)))
        ));
    }
    assert_eq!(store.upload_count(), 0);
}

#[test]
fn prepared_draws_carry_model_and_mvp_uniforms() {
    let config = EngineConfig {
        chunk_dimension: 2,
        generator: GeneratorKind::Empty,
        world_radius: 0,
        ..EngineConfig::default()
    };
    let mut store = ModelStore::new();
    let (summary, prepared) = run_with_uploader(&config, &mut store).unwrap();
    assert_eq!(summary.visible_faces, 0);
    assert_eq!(prepared.len(), 1);

    let uniforms = &prepared[0].uniforms;
    assert_eq!(
        uniforms.get(MODEL_UNIFORM),
        Some(&UniformValue::Mat4(prepared[0].draw.placement))
    );
    assert!(matches!(uniforms.get(MVP_UNIFORM), Some(UniformValue::Mat4(_))));
    assert!(store.is_live(prepared[0].draw.model));
}
