//! 2D translation, rotation and scale of a letter "F", driven by controls
//! bound to a plain model.

pub mod error;
pub mod model;
pub mod overrides;
pub mod registry;
pub mod scene;
pub mod widget;

pub use error::{BindError, RenderError};
pub use model::{Model, SharedModel, Value};
pub use overrides::NameOverrides;
pub use registry::{bind, Descriptor, Frontend, Headless, Registry, View, WidgetHandle, WidgetKind};
pub use widget::{dispatch, Input, Widget};

// Browser entry point and DOM frontend; only built for wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    pub mod dom;
    pub mod logging;
    pub mod query;
    mod render;

    pub use render::Renderer;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        logging::init();
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let Some(canvas) = document.get_element_by_id("canvas") else {
            log::warn!("no #canvas element, nothing to draw");
            return Ok(());
        };
        let canvas = canvas.dyn_into::<web_sys::HtmlCanvasElement>()?;

        render::start(&window, &document, canvas)
    }
}
