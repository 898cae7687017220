use bytemuck::{Pod, Zeroable};

/// Full-screen blit of the CPU raster over a solid background.
///
/// The raster holds straight (non-premultiplied) alpha, so the fragment
/// stage composites it over `background` itself.
pub const BLIT_SOURCE: &str = r#"
struct BlitUniforms {
    background: vec4<f32>,
};

@group(0) @binding(0) var field_texture: texture_2d<f32>;
@group(0) @binding(1) var field_sampler: sampler;
@group(0) @binding(2) var<uniform> uniforms: BlitUniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    // One oversized triangle covering the viewport
    let x = f32((vertex_index << 1u) & 2u);
    let y = f32(vertex_index & 2u);

    var out: VertexOutput;
    out.clip_position = vec4<f32>(x * 2.0 - 1.0, 1.0 - y * 2.0, 0.0, 1.0);
    out.uv = vec2<f32>(x, y);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(field_texture, field_sampler, in.uv);
    let rgb = mix(uniforms.background.rgb, texel.rgb, texel.a);
    return vec4<f32>(rgb, 1.0);
}
"#;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct BlitUniforms {
    pub background: [f32; 4],
}

impl BlitUniforms {
    /// Deep slate behind the field.
    pub fn new() -> Self {
        Self {
            background: [0.008, 0.016, 0.035, 1.0],
        }
    }
}
