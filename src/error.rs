use thiserror::Error;

use crate::model::ValueKind;

/// Rejected descriptor, reported when the registry binds a control list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    #[error("unsupported widget type `{0}` (expected slider, checkbox or option)")]
    UnsupportedType(String),

    #[error("model has no field `{key}`")]
    MissingKey { key: String },

    #[error("field `{key}` holds a {found} value but a {expected} widget was requested")]
    KindMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("field `{key}` selects option {index} but only {len} options exist")]
    OptionOutOfRange { key: String, index: usize, len: usize },

    #[error("could not mount widget `{key}`: {reason}")]
    Mount { key: String, reason: String },
}

/// Shader stage, used to tag compile diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Vertex => f.write_str("vertex"),
            Stage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("WebGL2 not supported")]
    Unsupported,

    #[error("could not compile {stage} shader: {log}")]
    Compile { stage: Stage, log: String },

    #[error("program failed to link: {0}")]
    Link(String),

    #[error("unable to create {0}")]
    Create(&'static str),

    #[error("missing attribute `{0}`")]
    MissingAttribute(&'static str),
}

impl From<BindError> for wasm_bindgen::JsValue {
    fn from(err: BindError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

impl From<RenderError> for wasm_bindgen::JsValue {
    fn from(err: RenderError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
