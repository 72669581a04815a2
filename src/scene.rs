//! The letter "F", its transform parameters and the controls that drive them.

use crate::model::Model;
use crate::registry::Descriptor;

pub const VERTEX_SHADER: &str = r#"
attribute vec2 a_position;

uniform vec2 u_resolution;
uniform vec2 u_translation;
uniform vec2 u_rotation;
uniform vec2 u_scale;

void main() {
    vec2 scaled = a_position * u_scale;
    vec2 rotated = vec2(
        scaled.x * u_rotation.y + scaled.y * u_rotation.x,
        scaled.y * u_rotation.y - scaled.x * u_rotation.x);
    vec2 position = rotated + u_translation;

    // pixels -> 0..1 -> 0..2 -> -1..1, y flipped so 0,0 is top left
    vec2 clip = (position / u_resolution) * 2.0 - 1.0;
    gl_Position = vec4(clip * vec2(1, -1), 0, 1);
}
"#;

pub const FRAGMENT_SHADER: &str = r#"
precision mediump float;

uniform vec4 u_color;

void main() {
    gl_FragColor = u_color;
}
"#;

/// 6 triangles, 3 points each.
pub const VERTEX_COUNT: i32 = 18;

#[rustfmt::skip]
pub const F_GEOMETRY: [f32; 36] = [
    // left column
    0.0, 0.0,
    30.0, 0.0,
    0.0, 150.0,
    0.0, 150.0,
    30.0, 0.0,
    30.0, 150.0,

    // top rung
    30.0, 0.0,
    100.0, 0.0,
    30.0, 30.0,
    30.0, 30.0,
    100.0, 0.0,
    100.0, 30.0,

    // middle rung
    30.0, 60.0,
    67.0, 60.0,
    30.0, 90.0,
    30.0, 90.0,
    67.0, 60.0,
    67.0, 90.0,
];

pub const X: &str = "x";
pub const Y: &str = "y";
pub const ANGLE: &str = "angle";
pub const SCALE_X: &str = "scaleX";
pub const SCALE_Y: &str = "scaleY";

/// Starting position, rotation and scale of the F.
pub fn default_model() -> Model {
    Model::new()
        .with(X, 100.0)
        .with(Y, 150.0)
        .with(ANGLE, 0.0)
        .with(SCALE_X, 1.0)
        .with(SCALE_Y, 1.0)
}

/// Slider layout; translation spans the canvas.
pub fn controls(canvas_width: f64, canvas_height: f64) -> Vec<Descriptor> {
    vec![
        Descriptor::slider(X).range(0.0, canvas_width),
        Descriptor::slider(Y).range(0.0, canvas_height),
        Descriptor::slider(ANGLE).range(0.0, 360.0),
        Descriptor::slider(SCALE_X).range(-5.0, 5.0).step(0.01).precision(2),
        Descriptor::slider(SCALE_Y).range(-5.0, 5.0).step(0.01).precision(2),
    ]
}

/// `[sin, cos]` of the angle, measured clockwise on screen.
pub fn rotation_from_degrees(degrees: f64) -> [f32; 2] {
    let radians = (360.0 - degrees).to_radians();
    [radians.sin() as f32, radians.cos() as f32]
}

/// Uniform values fed to the vertex shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2d {
    pub translation: [f32; 2],
    pub rotation: [f32; 2],
    pub scale: [f32; 2],
}

impl Default for Transform2d {
    fn default() -> Self {
        Self::from_model(&default_model())
    }
}

impl Transform2d {
    /// Fields absent from `model` read as zero translation, zero angle and
    /// unit scale.
    pub fn from_model(model: &Model) -> Self {
        let get = |key, fallback| model.number(key).unwrap_or(fallback) as f32;
        Self {
            translation: [get(X, 0.0), get(Y, 0.0)],
            rotation: rotation_from_degrees(model.number(ANGLE).unwrap_or(0.0)),
            scale: [get(SCALE_X, 1.0), get(SCALE_Y, 1.0)],
        }
    }

    /// Same arithmetic as [`VERTEX_SHADER`], in pixels.
    pub fn apply(&self, [x, y]: [f32; 2]) -> [f32; 2] {
        let [sx, sy] = [x * self.scale[0], y * self.scale[1]];
        let [s, c] = self.rotation;
        let rotated = [sx * c + sy * s, sy * c - sx * s];
        [
            rotated[0] + self.translation[0],
            rotated[1] + self.translation[1],
        ]
    }

    /// Clip-space position for a canvas of `resolution` pixels.
    pub fn to_clip(&self, point: [f32; 2], resolution: [f32; 2]) -> [f32; 2] {
        let [x, y] = self.apply(point);
        [
            x / resolution[0] * 2.0 - 1.0,
            -(y / resolution[1] * 2.0 - 1.0),
        ]
    }
}
