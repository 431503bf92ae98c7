/// WASM-compatible rebuild diagnostics.
///
/// This module turns rebuild outcomes and cap load failures into messages
/// the page can show next to the controls.

use serpentine_scene::{AssetLoadError, SceneError};
use wasm_bindgen::prelude::*;

/// Diagnostic severity for JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A diagnostic message for JavaScript.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const diagnostics = studio.rebuild();
/// // if (!diagnostics.is_empty()) console.warn(diagnostics.get(0).message());
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    message: String,
    hint: Option<String>,
}

#[wasm_bindgen]
impl Diagnostic {
    /// Returns the severity of the diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the diagnostic message.
    pub fn message(&self) -> String {
        self.message.clone()
    }

    /// Returns the hint, if any.
    pub fn hint(&self) -> Option<String> {
        self.hint.clone()
    }

    /// Converts this diagnostic to a plain JavaScript object.
    ///
    /// This is useful for passing data between the worker and main thread,
    /// as wasm-bindgen wrappers cannot be transferred.
    pub fn to_js_object(&self) -> JsValue {
        use js_sys::{Object, Reflect};

        let obj = Object::new();
        let mut set = |key: &str, value: JsValue| {
            // Reflect::set on a fresh plain object cannot fail
            let _ = Reflect::set(&obj, &JsValue::from_str(key), &value);
        };
        set("severity", JsValue::from(self.severity as i32));
        set("message", JsValue::from_str(&self.message));
        if let Some(hint) = &self.hint {
            set("hint", JsValue::from_str(hint));
        }

        JsValue::from(obj)
    }
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<&SceneError> for Diagnostic {
    fn from(error: &SceneError) -> Self {
        if error.is_degenerate_layout() {
            Diagnostic::new(Severity::Warning, error.to_string())
                .with_hint("Move the length slider towards a longer tube")
        } else {
            Diagnostic::new(Severity::Error, error.to_string())
        }
    }
}

impl From<&AssetLoadError> for Diagnostic {
    fn from(error: &AssetLoadError) -> Self {
        Diagnostic::new(Severity::Error, error.to_string())
            .with_hint("The tube is shown without end caps")
    }
}

/// A collection of diagnostics.
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct DiagnosticList {
    diagnostics: Vec<Diagnostic>,
}

#[wasm_bindgen]
impl DiagnosticList {
    /// Returns the number of diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns true if there are no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns a diagnostic by index.
    pub fn get(&self, index: usize) -> Option<Diagnostic> {
        self.diagnostics.get(index).cloned()
    }
}

impl DiagnosticList {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}
