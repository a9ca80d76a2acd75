//! Embedded WGSL sources and the shader interface shared with the renderer
//!
//! Sub-pass indices select fragment entry points within one program, so one
//! mask program and one outline program cover every mode.

/// Global parameter names understood by the outline shaders
pub mod param {
    pub const COLOR: &str = "outline_color";
    pub const WIDTH: &str = "outline_width";
    pub const INTENSITY: &str = "outline_intensity";
    pub const GAUSS_SAMPLES: &str = "outline_gauss_samples";
    pub const SOURCE_TEXTURE: &str = "outline_source";
    pub const ALPHA_CUTOFF: &str = "outline_alpha_cutoff";
}

/// Sub-pass indices of the mask program
pub mod mask_pass {
    /// Opaque silhouette rasterization
    pub const DEFAULT: u32 = 0;
    /// Silhouette rasterization with alpha-cutoff discard
    pub const ALPHA_TEST: u32 = 1;
}

/// Sub-pass indices of the outline program
pub mod outline_pass {
    /// Horizontal blur of the mask into the intermediate target
    pub const HORIZONTAL: u32 = 0;
    /// Vertical blur plus composite into the destination
    pub const VERTICAL: u32 = 1;
}

/// Vertex count of the procedural fullscreen draw
pub const FULLSCREEN_VERTEX_COUNT: u32 = 3;

pub const MASK_SHADER: &str = r#"
struct MaskParams {
    alpha_cutoff: f32,
}

@group(0) @binding(0) var<uniform> object: mat4x4<f32>;
@group(0) @binding(1) var base_texture: texture_2d<f32>;
@group(0) @binding(2) var base_sampler: sampler;
@group(0) @binding(3) var<uniform> params: MaskParams;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
}

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) uv: vec2<f32>) -> VertexOutput {
    var output: VertexOutput;
    output.position = object * vec4<f32>(position, 1.0);
    output.uv = uv;
    return output;
}

@fragment
fn fs_mask(input: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(1.0);
}

@fragment
fn fs_mask_alpha_test(input: VertexOutput) -> @location(0) vec4<f32> {
    let alpha = textureSample(base_texture, base_sampler, input.uv).a;
    if alpha < params.alpha_cutoff {
        discard;
    }
    return vec4<f32>(1.0);
}
"#;

pub const OUTLINE_SHADER: &str = r#"
struct OutlineParams {
    color: vec4<f32>,
    width: f32,
    intensity: f32,
}

// Intensities at or above this value mean "solid fill, ignore blur falloff".
const SOLID_INTENSITY: f32 = 100.0;

@group(0) @binding(0) var source_texture: texture_2d<f32>;
@group(0) @binding(1) var source_sampler: sampler;
@group(0) @binding(2) var<uniform> params: OutlineParams;
@group(0) @binding(3) var<uniform> gauss_samples: array<vec4<f32>, 8>;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var output: VertexOutput;
    let x = f32((vertex_index << 1u) & 2u);
    let y = f32(vertex_index & 2u);
    output.position = vec4<f32>(x * 2.0 - 1.0, y * 2.0 - 1.0, 0.0, 1.0);
    output.uv = vec2<f32>(x, 1.0 - y);
    return output;
}

fn gauss_weight(i: i32) -> f32 {
    return gauss_samples[i / 4][i % 4];
}

// Raw (unnormalized) gaussian taps along one axis; the intensity parameter
// accounts for total kernel energy.
fn sample_coverage(uv: vec2<f32>, axis_step: vec2<f32>) -> f32 {
    let width = i32(params.width);
    var coverage = 0.0;
    for (var i = 1 - width; i < width; i += 1) {
        let tap = textureSample(source_texture, source_sampler, uv + axis_step * f32(i)).r;
        coverage += tap * gauss_weight(abs(i));
    }
    return coverage;
}

@fragment
fn fs_horizontal(input: VertexOutput) -> @location(0) vec4<f32> {
    let axis_step = vec2<f32>(1.0 / f32(textureDimensions(source_texture).x), 0.0);
    return vec4<f32>(sample_coverage(input.uv, axis_step), 0.0, 0.0, 1.0);
}

@fragment
fn fs_vertical(input: VertexOutput) -> @location(0) vec4<f32> {
    let axis_step = vec2<f32>(0.0, 1.0 / f32(textureDimensions(source_texture).y));
    let coverage = sample_coverage(input.uv, axis_step);

    var alpha: f32;
    if params.intensity >= SOLID_INTENSITY {
        alpha = step(0.001, coverage);
    } else {
        alpha = clamp(coverage * params.intensity, 0.0, 1.0);
    }
    return vec4<f32>(params.color.rgb, params.color.a * alpha);
}
"#;
