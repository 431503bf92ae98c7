//! Tests for the lifecycle manager.

use super::*;
use crate::asset::DeferredAssetSource;
use crate::sink::{MemorySink, SinkEvent};

fn manager() -> LifecycleManager<MemorySink, DeferredAssetSource> {
    LifecycleManager::init(MemorySink::recording(), DeferredAssetSource::new())
}

fn triangle_asset() -> CapAsset {
    CapAsset::from_buffers(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2]).unwrap()
}

#[test]
fn test_new_manager_is_idle() {
    let manager = manager();
    assert_eq!(manager.state(), LifecycleState::Idle);
    assert_eq!(manager.published_tube_count(), 0);
    assert!(manager.generation_id().is_none());
    assert!(manager.caps().is_none());
}

#[test]
fn test_rebuild_publishes_six_tubes() {
    let mut manager = manager();
    let outcome = manager.rebuild(85.75, 0.7, 0.5);

    assert_eq!(manager.state(), LifecycleState::Published);
    match outcome {
        RebuildOutcome::Published { tubes, caps, .. } => {
            assert_eq!(tubes, 6);
            assert_eq!(caps, CapStatus::Loading);
        }
        RebuildOutcome::Aborted { error } => panic!("unexpected abort: {error}"),
    }
    assert_eq!(manager.sink().node_count(), 6);
    assert_eq!(manager.sink().material_count(), 1);
    assert!(manager
        .tubes()
        .iter()
        .all(|node| node.cast_shadow && !node.receive_shadow));
}

#[test]
fn test_tubes_share_one_material() {
    let mut manager = manager();
    manager.rebuild(85.75, 0.7, 0.5);
    let first = manager.tubes()[0].material;
    assert!(manager.tubes().iter().all(|node| node.material == first));
}

#[test]
fn test_rebuild_releases_previous_generation() {
    let mut manager = manager();
    manager.rebuild(85.75, 0.7, 0.5);
    let old: Vec<_> = manager.tubes().iter().map(|node| node.geometry).collect();
    let old_material = manager.tubes()[0].material;

    manager.rebuild(60.0, 0.7, 0.5);

    assert_eq!(manager.sink().node_count(), 6);
    assert_eq!(manager.sink().material_count(), 1);
    assert!(old.iter().all(|geometry| manager.sink().is_released(*geometry)));
    assert!(manager
        .sink()
        .events()
        .contains(&SinkEvent::ReleaseMaterial(old_material)));
}

#[test]
fn test_short_length_aborts_with_empty_scene() {
    let mut manager = manager();
    manager.rebuild(85.75, 0.7, 0.5);
    let outcome = manager.rebuild(5.0, 0.7, 0.5);

    assert!(!outcome.is_published());
    assert!(outcome.generation().is_none());
    match outcome {
        RebuildOutcome::Aborted { error } => assert!(error.is_degenerate_layout()),
        RebuildOutcome::Published { .. } => panic!("short length should abort"),
    }
    assert_eq!(manager.state(), LifecycleState::Aborted);
    assert_eq!(manager.published_tube_count(), 0);
    assert_eq!(manager.sink().node_count(), 0);
    assert_eq!(manager.sink().material_count(), 0);
    assert!(manager.sink().live_geometries().is_empty());
}

#[test]
fn test_template_load_requested_once() {
    let mut manager = manager();
    manager.rebuild(85.75, 0.7, 0.5);
    manager.rebuild(70.0, 0.7, 0.5);
    manager.rebuild(60.0, 0.7, 0.5);

    assert_eq!(manager.source().requests().len(), 1);
    assert_eq!(manager.source().requests()[0].1, CAP_ASSET_NAME);
    assert!(manager.cap_template().is_pending());
}

#[test]
fn test_resolved_load_places_caps_on_current_generation() {
    let mut manager = manager();
    manager.rebuild(85.75, 0.7, 0.5);
    manager.rebuild(70.0, 0.7, 0.5);
    let handle = manager.pending_cap_load().unwrap();

    assert!(manager.resolve_cap_load(handle, Ok(triangle_asset())));

    let caps = manager.caps().unwrap();
    assert!(caps.iter().all(CapInstance::is_attached));
    assert_eq!(manager.sink().node_count(), 8);

    let material = manager.tubes()[0].material;
    assert!(caps
        .iter()
        .flat_map(CapInstance::nodes)
        .all(|node| node.material == material));
}

#[test]
fn test_ready_template_places_caps_during_rebuild() {
    let mut manager = manager();
    manager.rebuild(85.75, 0.7, 0.5);
    let handle = manager.pending_cap_load().unwrap();
    manager.resolve_cap_load(handle, Ok(triangle_asset()));

    let outcome = manager.rebuild(70.0, 0.7, 0.5);
    match outcome {
        RebuildOutcome::Published { caps, .. } => assert_eq!(caps, CapStatus::Placed),
        RebuildOutcome::Aborted { error } => panic!("unexpected abort: {error}"),
    }
    assert_eq!(manager.sink().node_count(), 8);
    assert_eq!(manager.sink().material_count(), 1);
}

#[test]
fn test_caps_follow_layout() {
    let mut manager = manager();
    manager.rebuild(85.75, 0.7, 0.5);
    let handle = manager.pending_cap_load().unwrap();
    manager.resolve_cap_load(handle, Ok(triangle_asset()));
    let before = manager.caps().unwrap()[0].nodes()[0].transform;

    manager.rebuild(60.0, 0.7, 0.5);
    let after = manager.caps().unwrap()[0].nodes()[0].transform;
    let expected = cap_transforms(manager.layout().unwrap(), manager.parameters().unwrap())[0];

    assert_ne!(before.translation, after.translation);
    assert_eq!(after, expected);
}

#[test]
fn test_stale_handle_ignored() {
    let mut manager = manager();
    manager.rebuild(85.75, 0.7, 0.5);
    let handle = manager.pending_cap_load().unwrap();

    assert!(!manager.resolve_cap_load(LoadHandle(handle.0 + 10), Ok(triangle_asset())));
    assert!(manager.cap_template().is_pending());
    assert!(manager.caps().is_none());
}

#[test]
fn test_load_after_abort_caches_without_placing() {
    let mut manager = manager();
    manager.rebuild(85.75, 0.7, 0.5);
    let handle = manager.pending_cap_load().unwrap();
    manager.rebuild(5.0, 0.7, 0.5);

    assert!(!manager.resolve_cap_load(handle, Ok(triangle_asset())));
    assert!(manager.cap_template().ready().is_some());
    assert!(manager.caps().is_none());
    assert_eq!(manager.sink().node_count(), 0);
}

#[test]
fn test_failed_load_disables_caps() {
    let mut manager = manager();
    manager.rebuild(85.75, 0.7, 0.5);
    let handle = manager.pending_cap_load().unwrap();
    let error = AssetLoadError::new(CAP_ASSET_NAME, "not found");

    assert!(!manager.resolve_cap_load(handle, Err(error.clone())));
    assert!(matches!(manager.cap_template(), AssetSlot::Failed(failed) if *failed == error));
    assert_eq!(manager.published_tube_count(), 6);

    let outcome = manager.rebuild(70.0, 0.7, 0.5);
    match outcome {
        RebuildOutcome::Published { tubes, caps, .. } => {
            assert_eq!(tubes, 6);
            assert_eq!(caps, CapStatus::Unavailable);
        }
        RebuildOutcome::Aborted { error } => panic!("unexpected abort: {error}"),
    }
    assert_eq!(manager.source().requests().len(), 1);
}

#[test]
fn test_teardown_releases_everything() {
    let mut manager = manager();
    manager.rebuild(85.75, 0.7, 0.5);
    let handle = manager.pending_cap_load().unwrap();
    manager.resolve_cap_load(handle, Ok(triangle_asset()));

    let sink = manager.teardown();
    assert_eq!(sink.node_count(), 0);
    assert_eq!(sink.material_count(), 0);
    assert!(sink.live_geometries().is_empty());
}

#[test]
fn test_export_groups_track_published_scene() {
    let mut manager = manager();
    manager.rebuild(85.75, 0.7, 0.5);
    assert_eq!(manager.export_groups().non_empty().len(), 2);

    let handle = manager.pending_cap_load().unwrap();
    manager.resolve_cap_load(handle, Ok(triangle_asset()));
    let groups = manager.export_groups();
    assert_eq!(groups.non_empty().len(), 4);
    assert_eq!(groups.left().nodes.len(), 3);
    assert_eq!(groups.cap2().nodes.len(), 1);

    manager.rebuild(5.0, 0.7, 0.5);
    assert!(manager.export_groups().non_empty().is_empty());
}

#[test]
fn test_custom_config_changes_resolution() {
    let config = PipelineConfig::new(1e-9, 10, 8, 3, 1.0).unwrap();
    let mut manager =
        LifecycleManager::with_config(MemorySink::new(), DeferredAssetSource::new(), config);
    manager.rebuild(85.75, 0.7, 0.5);
    assert_eq!(manager.tubes()[0].mesh.vertex_count() % 11, 0);
}

#[test]
fn test_kernel_failure_aborts() {
    let config = PipelineConfig::new(10.0, 10, 8, 3, 1.0).unwrap();
    let mut manager =
        LifecycleManager::with_config(MemorySink::new(), DeferredAssetSource::new(), config);
    let outcome = manager.rebuild(85.75, 0.7, 0.5);

    match outcome {
        RebuildOutcome::Aborted { error } => assert!(!error.is_degenerate_layout()),
        RebuildOutcome::Published { .. } => panic!("coarse tolerance should reject the tubes"),
    }
    assert_eq!(manager.sink().node_count(), 0);
    assert_eq!(manager.sink().material_count(), 0);
}

#[test]
fn test_malformed_cap_asset_fails_load() {
    let mut manager = manager();
    manager.rebuild(85.75, 0.7, 0.5);
    let handle = manager.pending_cap_load().unwrap();

    let mut dangling = serpentine_mesh::Mesh::new();
    dangling.add_vertex(glam::DVec3::ZERO);
    dangling.add_vertex(glam::DVec3::X);
    dangling.add_vertex(glam::DVec3::Y);
    dangling.add_triangle(0, 1, 7);

    assert!(!manager.resolve_cap_load(handle, Ok(CapAsset::new(vec![dangling]))));
    assert!(matches!(manager.cap_template(), AssetSlot::Failed(error) if error.asset == CAP_ASSET_NAME));
    assert!(manager.caps().is_none());
    assert_eq!(manager.sink().node_count(), 6);

    let outcome = manager.rebuild(70.0, 0.7, 0.5);
    assert!(matches!(
        outcome,
        RebuildOutcome::Published {
            tubes: 6,
            caps: CapStatus::Unavailable,
            ..
        }
    ));
}

#[test]
fn test_same_parameters_rebuild_releases_first_generation() {
    let mut manager = manager();
    manager.rebuild(85.75, 0.7, 0.5);
    let first: Vec<_> = manager.tubes().iter().map(|node| node.geometry).collect();
    let first_material = manager.tubes()[0].material;

    manager.rebuild(85.75, 0.7, 0.5);

    assert_eq!(manager.sink().node_count(), 6);
    assert_eq!(manager.sink().material_count(), 1);
    assert_eq!(manager.sink().live_geometries().len(), 6);
    assert!(first.iter().all(|geometry| manager.sink().is_released(*geometry)));
    assert!(first
        .iter()
        .all(|geometry| !manager.sink().live_geometries().contains(geometry)));
    assert_ne!(manager.tubes()[0].material, first_material);
}

#[test]
fn test_plain_sink_stays_bounded_over_many_rebuilds() {
    let config = PipelineConfig::new(1e-9, 10, 8, 3, 1.0).unwrap();
    let mut manager =
        LifecycleManager::with_config(MemorySink::new(), DeferredAssetSource::new(), config);
    for round in 0..1000 {
        let length = 60.0 + f64::from(round % 50);
        assert!(manager.rebuild(length, 0.7, 0.5).is_published());
    }

    let sink = manager.sink();
    assert!(sink.events().is_empty());
    assert_eq!(sink.node_count(), 6);
    assert_eq!(sink.material_count(), 1);
    assert_eq!(sink.live_geometries().len(), 6);
    assert_eq!(sink.released_count(), 999 * 6);
}
