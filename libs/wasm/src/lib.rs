//! WASM-facing entry points for the serpentine tube viewer.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. The page owns the Three.js scene; [`TubeStudio`] owns
//! the geometry lifecycle and hands meshes over as [`MeshHandle`]s.
//!
//! ```
//! use serpentine_wasm::TubeStudio;
//!
//! let mut studio = TubeStudio::new();
//! assert!(studio.rebuild().is_empty());
//! assert_eq!(studio.tube_count(), 6);
//! ```

use config::constants::{CAP_ASSET_NAME, DEFAULT_HOLE_DIAMETER, DEFAULT_SLIDER_VALUE};
use serde::Serialize;
use serpentine_mesh::framing::{self, AxisFrame, Tick};
use serpentine_mesh::params::{face_for_hole, length_from_slider};
use serpentine_mesh::{DerivedLayout, GeometryParameters};
use serpentine_scene::{
    AssetLoadError, AssetSlot, CapAsset, DeferredAssetSource, LifecycleManager, MaterialSpec,
    MemorySink, RebuildOutcome, SceneNode,
};
use wasm_bindgen::prelude::*;

mod diagnostics;
mod mesh_handle;

pub use diagnostics::{Diagnostic, DiagnosticList, Severity};
pub use mesh_handle::MeshHandle;

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "serpentine-wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Everything the page needs to frame the current object, serialized by
/// [`TubeStudio::layout_json`].
#[derive(Debug, Clone, Serialize)]
pub struct LayoutReport {
    pub parameters: GeometryParameters,
    /// `None` when the last rebuild aborted.
    pub layout: Option<DerivedLayout>,
    pub camera_distance: f64,
    pub ground_level: f64,
    pub axes: AxisFrame,
    pub ticks: Vec<Tick>,
}

/// The viewer's geometry state behind the two sliders.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const studio = new TubeStudio();
/// // slider.oninput = () => { studio.set_length_slider(slider.value); refresh(studio.rebuild()); };
/// // if (studio.pending_cap_asset()) {
/// //   const { positions, indices } = await loadObj(studio.pending_cap_asset());
/// //   studio.provide_cap_asset(positions, indices);
/// // }
/// ```
#[wasm_bindgen]
pub struct TubeStudio {
    manager: LifecycleManager<MemorySink, DeferredAssetSource>,
    slider_value: f64,
    hole_diameter: f64,
}

impl Default for TubeStudio {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl TubeStudio {
    /// Creates an empty studio with the default slider positions.
    #[wasm_bindgen(constructor)]
    pub fn new() -> TubeStudio {
        Self {
            manager: LifecycleManager::init(MemorySink::new(), DeferredAssetSource::new()),
            slider_value: DEFAULT_SLIDER_VALUE,
            hole_diameter: DEFAULT_HOLE_DIAMETER,
        }
    }

    /// Moves the length slider. Takes effect on the next rebuild.
    pub fn set_length_slider(&mut self, value: f64) {
        self.slider_value = value;
    }

    /// Moves the hole slider; the face size follows. Takes effect on the
    /// next rebuild.
    pub fn set_hole_diameter(&mut self, value: f64) {
        self.hole_diameter = value;
    }

    /// Total length selected by the slider.
    #[wasm_bindgen(getter)]
    pub fn total_length(&self) -> f64 {
        length_from_slider(self.slider_value)
    }

    /// Face size the next rebuild will use.
    #[wasm_bindgen(getter)]
    pub fn face_size(&self) -> f64 {
        self.parameters().face_size
    }

    /// Replaces the scene with one built from the current sliders.
    ///
    /// Returns an empty list when the tubes were published.
    pub fn rebuild(&mut self) -> DiagnosticList {
        let face = face_for_hole(self.hole_diameter);
        let length = length_from_slider(self.slider_value);
        match self.manager.rebuild(length, face, self.hole_diameter) {
            RebuildOutcome::Published { .. } => DiagnosticList::default(),
            RebuildOutcome::Aborted { error } => DiagnosticList::new(vec![(&error).into()]),
        }
    }

    /// Name of the cap asset the page should fetch, while one is wanted.
    pub fn pending_cap_asset(&self) -> Option<String> {
        self.manager
            .pending_cap_load()
            .map(|_| CAP_ASSET_NAME.to_owned())
    }

    /// Delivers the fetched cap as flat position and index buffers.
    ///
    /// Returns true when the caps were placed in the current scene. Malformed
    /// buffers fail the load and disable caps, as [`Self::fail_cap_asset`]
    /// does.
    pub fn provide_cap_asset(&mut self, positions: Vec<f32>, indices: Vec<u32>) -> bool {
        let Some(handle) = self.manager.pending_cap_load() else {
            return false;
        };
        let positions: Vec<f64> = positions.into_iter().map(f64::from).collect();
        let asset = CapAsset::from_buffers(&positions, &indices);
        self.manager.resolve_cap_load(handle, asset)
    }

    /// Reports that the cap could not be fetched or parsed.
    pub fn fail_cap_asset(&mut self, message: &str) -> DiagnosticList {
        let Some(handle) = self.manager.pending_cap_load() else {
            return DiagnosticList::default();
        };
        let error = AssetLoadError::new(CAP_ASSET_NAME, message);
        let diagnostic = Diagnostic::from(&error);
        self.manager.resolve_cap_load(handle, Err(error));
        DiagnosticList::new(vec![diagnostic])
    }

    /// True once the cap template failed and caps are disabled.
    pub fn caps_unavailable(&self) -> bool {
        matches!(self.manager.cap_template(), AssetSlot::Failed(_))
    }

    #[wasm_bindgen(getter)]
    pub fn tube_count(&self) -> usize {
        self.manager.published_tube_count()
    }

    /// One published tube, in top/bottom/connector × left/right order.
    pub fn tube(&self, index: usize) -> Option<MeshHandle> {
        self.manager.tubes().get(index).map(MeshHandle::from_node)
    }

    /// Number of attached cap parts.
    #[wasm_bindgen(getter)]
    pub fn cap_count(&self) -> usize {
        self.cap_nodes().count()
    }

    pub fn cap(&self, index: usize) -> Option<MeshHandle> {
        self.cap_nodes().nth(index).map(MeshHandle::from_node)
    }

    /// Camera distance for the current face size.
    pub fn camera_distance(&self) -> f64 {
        framing::camera_distance(self.parameters().face_size)
    }

    /// Height of the ground plane for the current face size.
    pub fn ground_level(&self) -> f64 {
        framing::ground_level(self.parameters().face_size)
    }

    /// [`LayoutReport`] as JSON.
    pub fn layout_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.layout_report())
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Parameters of the shared tube material as JSON.
    pub fn material_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&MaterialSpec::tube())
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Download names of the bodies that currently have geometry.
    pub fn export_names(&self) -> Vec<String> {
        self.manager
            .export_groups()
            .non_empty()
            .iter()
            .map(|group| group.file_name.to_owned())
            .collect()
    }

    /// One body merged into a single mesh, by download name.
    pub fn export_body(&self, file_name: &str) -> Option<MeshHandle> {
        let groups = self.manager.export_groups();
        let group = groups
            .non_empty()
            .into_iter()
            .find(|group| group.file_name == file_name)?;
        Some(MeshHandle::from_mesh(group.file_name, &group.merged_mesh()))
    }
}

impl TubeStudio {
    /// Sanitized parameters the sliders currently select.
    pub fn parameters(&self) -> GeometryParameters {
        GeometryParameters::sanitize(
            length_from_slider(self.slider_value),
            face_for_hole(self.hole_diameter),
            self.hole_diameter,
        )
    }

    pub fn layout_report(&self) -> LayoutReport {
        let parameters = self.parameters();
        let axes = AxisFrame::for_face_size(parameters.face_size);
        LayoutReport {
            parameters,
            layout: self.manager.layout().copied(),
            camera_distance: framing::camera_distance(parameters.face_size),
            ground_level: framing::ground_level(parameters.face_size),
            ticks: axes.ticks(),
            axes,
        }
    }

    pub fn manager(&self) -> &LifecycleManager<MemorySink, DeferredAssetSource> {
        &self.manager
    }

    fn cap_nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.manager
            .caps()
            .into_iter()
            .flatten()
            .filter(|cap| cap.is_attached())
            .flat_map(|cap| cap.nodes())
    }
}
