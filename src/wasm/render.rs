use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, HtmlCanvasElement, KeyboardEvent, WebGl2RenderingContext as GL, WebGlBuffer,
    WebGlProgram, WebGlShader, WebGlUniformLocation, Window,
};

use crate::error::{RenderError, Stage};
use crate::registry::{self, Notify};
use crate::scene::{self, Transform2d};

use super::dom::DomFrontend;
use super::query;

fn compile_shader(gl: &GL, stage: Stage, source: &str) -> Result<WebGlShader, RenderError> {
    let kind = match stage {
        Stage::Vertex => GL::VERTEX_SHADER,
        Stage::Fragment => GL::FRAGMENT_SHADER,
    };
    let shader = gl.create_shader(kind).ok_or(RenderError::Create("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        Err(RenderError::Compile {
            stage,
            log: gl.get_shader_info_log(&shader).unwrap_or_default(),
        })
    }
}

fn link_program(
    gl: &GL,
    vertex: &WebGlShader,
    fragment: &WebGlShader,
) -> Result<WebGlProgram, RenderError> {
    let program = gl.create_program().ok_or(RenderError::Create("program"))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        Err(RenderError::Link(
            gl.get_program_info_log(&program).unwrap_or_default(),
        ))
    }
}

/// Matches the drawing buffer to the CSS size of the canvas. Returns
/// whether the size changed.
fn resize_canvas_to_display_size(canvas: &HtmlCanvasElement) -> bool {
    let width = canvas.client_width().max(0) as u32;
    let height = canvas.client_height().max(0) as u32;
    let resized = canvas.width() != width || canvas.height() != height;
    if resized {
        canvas.set_width(width);
        canvas.set_height(height);
    }
    resized
}

/// One program, one buffer, one draw call.
pub struct Renderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    position_buffer: WebGlBuffer,
    position_location: u32,
    resolution: Option<WebGlUniformLocation>,
    color_location: Option<WebGlUniformLocation>,
    translation: Option<WebGlUniformLocation>,
    rotation: Option<WebGlUniformLocation>,
    scale: Option<WebGlUniformLocation>,
    color: [f32; 4],
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, RenderError> {
        let gl: GL = canvas
            .get_context("webgl2")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into().ok())
            .ok_or(RenderError::Unsupported)?;

        let vertex = compile_shader(&gl, Stage::Vertex, scene::VERTEX_SHADER)?;
        let fragment = compile_shader(&gl, Stage::Fragment, scene::FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vertex, &fragment)?;

        let position_location = u32::try_from(gl.get_attrib_location(&program, "a_position"))
            .map_err(|_| RenderError::MissingAttribute("a_position"))?;

        let position_buffer = gl.create_buffer().ok_or(RenderError::Create("buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&position_buffer));
        let geometry = js_sys::Float32Array::from(&scene::F_GEOMETRY[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &geometry, GL::STATIC_DRAW);

        let uniform = |name: &str| gl.get_uniform_location(&program, name);
        let resolution = uniform("u_resolution");
        let color_location = uniform("u_color");
        let translation = uniform("u_translation");
        let rotation = uniform("u_rotation");
        let scale = uniform("u_scale");

        let color = [
            js_sys::Math::random() as f32,
            js_sys::Math::random() as f32,
            js_sys::Math::random() as f32,
            1.0,
        ];

        log::info!("renderer ready, color {:?}", color);
        Ok(Self {
            gl,
            canvas,
            program,
            position_buffer,
            position_location,
            resolution,
            color_location,
            translation,
            rotation,
            scale,
            color,
        })
    }

    pub fn draw(&self, transform: &Transform2d) {
        let gl = &self.gl;
        resize_canvas_to_display_size(&self.canvas);

        let (width, height) = (self.canvas.width(), self.canvas.height());
        gl.viewport(0, 0, width as i32, height as i32);
        gl.clear(GL::COLOR_BUFFER_BIT);
        gl.use_program(Some(&self.program));

        gl.enable_vertex_attrib_array(self.position_location);
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.position_buffer));
        // 2 floats per vertex, tightly packed
        gl.vertex_attrib_pointer_with_i32(self.position_location, 2, GL::FLOAT, false, 0, 0);

        gl.uniform2f(self.resolution.as_ref(), width as f32, height as f32);
        gl.uniform4fv_with_f32_array(self.color_location.as_ref(), &self.color);
        gl.uniform2fv_with_f32_array(self.translation.as_ref(), &transform.translation);
        gl.uniform2fv_with_f32_array(self.rotation.as_ref(), &transform.rotation);
        gl.uniform2fv_with_f32_array(self.scale.as_ref(), &transform.scale);

        gl.draw_arrays(GL::TRIANGLES, 0, scene::VERTEX_COUNT);
    }
}

/// Draws the F, builds its controls under `#ui` (or `<body>`), and redraws
/// on control input, window resize and the `r` reset key.
pub fn start(window: &Window, document: &Document, canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    let renderer = Rc::new(Renderer::new(canvas.clone())?);
    let model = scene::default_model().into_shared();

    let redraw: Notify = {
        let renderer = renderer.clone();
        let model = model.clone();
        Rc::new(move || renderer.draw(&Transform2d::from_model(&model.borrow())))
    };
    redraw();

    let overrides = query::load_overrides(window);
    let parent = match document.get_element_by_id("ui") {
        Some(parent) => parent,
        None => document.body().ok_or("no body")?.into(),
    };
    let mut frontend = DomFrontend::new(document.clone(), parent);
    let controls = scene::controls(f64::from(canvas.width()), f64::from(canvas.height()));
    let registry = Rc::new(registry::bind(
        &mut frontend,
        &model,
        controls,
        &overrides,
        Some(redraw.clone()),
    )?);
    log::info!("{} controls bound", registry.len());

    let resize_closure = {
        let redraw = redraw.clone();
        Closure::wrap(Box::new(move || redraw()) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    let reset_closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if event.key() != "r" {
            return;
        }
        let defaults = scene::default_model();
        *model.borrow_mut() = defaults.clone();
        registry.push_update(&defaults);
        redraw();
        log::debug!("transform reset");
    }) as Box<dyn FnMut(KeyboardEvent)>);
    window.add_event_listener_with_callback("keydown", reset_closure.as_ref().unchecked_ref())?;
    reset_closure.forget();

    Ok(())
}
