use glow::HasContext;

use super::camera::ArcBallCamera;
use super::mesh::{MeshData, VERTEX_STRIDE};
use crate::build::{LightRig, RenderableMesh};

// ── Render parameters ────────────────────────────────────────

/// Parameters for rendering the viewport
pub struct RenderParams {
    /// Viewport rectangle [x, y, width, height] in pixels
    pub viewport: [f32; 4],
    /// Background color RGB
    pub bg_color: [u8; 3],
}

/// Per-draw uniforms for one mesh. Index refers to the uploaded geometry list.
#[derive(Clone, Copy)]
pub struct DrawItem {
    pub geometry: usize,
    pub model: glam::Mat4,
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
}

impl DrawItem {
    pub fn from_mesh(index: usize, mesh: &RenderableMesh) -> Self {
        let [r, g, b] = mesh.color;
        Self {
            geometry: index,
            model: mesh.world,
            color: [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0],
            roughness: mesh.material.roughness as f32,
            metalness: mesh.material.metalness as f32,
        }
    }
}

// ── GPU mesh handles ─────────────────────────────────────────

struct GpuMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ibo: glow::Buffer,
    index_count: i32,
}

// ── Main GL renderer ─────────────────────────────────────────

/// Geometry is uploaded once per generation; hover and selection only
/// change the per-draw uniforms.
pub struct GlRenderer {
    program: glow::Program,
    meshes: Vec<GpuMesh>,
    /// Generation of the geometry currently on the GPU
    uploaded_generation: Option<u64>,
}

impl GlRenderer {
    pub fn new(gl: &glow::Context) -> Result<Self, String> {
        let program = compile_program(gl, MESH_VERT, MESH_FRAG)?;
        Ok(Self {
            program,
            meshes: Vec::new(),
            uploaded_generation: None,
        })
    }

    pub fn uploaded_generation(&self) -> Option<u64> {
        self.uploaded_generation
    }

    /// Replace GPU geometry with a new generation
    pub fn upload_geometry(&mut self, gl: &glow::Context, geometry: &[MeshData], generation: u64) {
        if self.uploaded_generation == Some(generation) {
            return;
        }
        self.delete_meshes(gl);

        for data in geometry {
            match upload_mesh(gl, data) {
                Ok(mesh) => self.meshes.push(mesh),
                Err(e) => {
                    tracing::error!("Mesh upload failed: {e}");
                    self.delete_meshes(gl);
                    return;
                }
            }
        }
        self.uploaded_generation = Some(generation);
        tracing::debug!("uploaded {} meshes (generation {generation})", self.meshes.len());
    }

    /// Render the scene
    pub fn paint(
        &self,
        gl: &glow::Context,
        camera: &ArcBallCamera,
        lights: &LightRig,
        items: &[DrawItem],
        params: &RenderParams,
    ) {
        let aspect = params.viewport[2] / params.viewport[3].max(1.0);
        let vp = camera.view_projection(aspect);
        let eye = camera.eye_position();
        let (spot_inner, spot_outer) = lights.spot.cone_cosines();
        let spot_dir = (lights.spot.target - lights.spot.position).normalize_or_zero();

        unsafe {
            gl.viewport(
                params.viewport[0] as i32,
                params.viewport[1] as i32,
                params.viewport[2] as i32,
                params.viewport[3] as i32,
            );
            gl.scissor(
                params.viewport[0] as i32,
                params.viewport[1] as i32,
                params.viewport[2] as i32,
                params.viewport[3] as i32,
            );
            gl.enable(glow::SCISSOR_TEST);

            // Clear viewport area with configured background color
            gl.clear_color(
                params.bg_color[0] as f32 / 255.0,
                params.bg_color[1] as f32 / 255.0,
                params.bg_color[2] as f32 / 255.0,
                1.0,
            );
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);
            gl.enable(glow::CULL_FACE);
            gl.cull_face(glow::BACK);

            gl.use_program(Some(self.program));
            let p = self.program;
            set_uniform_mat4(gl, p, "u_view_proj", &vp);
            set_uniform_vec3(gl, p, "u_eye", &eye);
            set_uniform_f32(gl, p, "u_ambient", lights.ambient.intensity);
            set_uniform_vec3(gl, p, "u_spot_pos", &lights.spot.position);
            set_uniform_vec3(gl, p, "u_spot_dir", &spot_dir);
            set_uniform_f32(gl, p, "u_spot_intensity", lights.spot.intensity);
            set_uniform_f32(gl, p, "u_spot_inner", spot_inner);
            set_uniform_f32(gl, p, "u_spot_outer", spot_outer);
            set_uniform_vec3(gl, p, "u_point_pos", &lights.point.position);
            set_uniform_f32(gl, p, "u_point_intensity", lights.point.intensity);

            for item in items {
                let Some(mesh) = self.meshes.get(item.geometry) else {
                    continue;
                };
                set_uniform_mat4(gl, p, "u_model", &item.model);
                let [r, g, b] = item.color;
                set_uniform_vec3(gl, p, "u_color", &glam::Vec3::new(r, g, b));
                set_uniform_f32(gl, p, "u_roughness", item.roughness);
                set_uniform_f32(gl, p, "u_metalness", item.metalness);
                draw_mesh(gl, mesh);
            }

            gl.disable(glow::CULL_FACE);
            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::SCISSOR_TEST);
            gl.use_program(None);
        }
    }

    fn delete_meshes(&mut self, gl: &glow::Context) {
        for mesh in self.meshes.drain(..) {
            unsafe {
                gl.delete_vertex_array(mesh.vao);
                gl.delete_buffer(mesh.vbo);
                gl.delete_buffer(mesh.ibo);
            }
        }
        self.uploaded_generation = None;
    }

    pub fn destroy(&mut self, gl: &glow::Context) {
        self.delete_meshes(gl);
        unsafe {
            gl.delete_program(self.program);
        }
    }
}

// ── GPU upload ───────────────────────────────────────────────

fn upload_mesh(gl: &glow::Context, data: &MeshData) -> Result<GpuMesh, String> {
    unsafe {
        let vao = gl.create_vertex_array()?;
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer()?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck_cast_slice(&data.vertices),
            glow::STATIC_DRAW,
        );

        let stride = (VERTEX_STRIDE * 4) as i32;
        // position: location 0
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        // normal: location 1
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 3 * 4);

        let ibo = gl.create_buffer()?;
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck_cast_slice(&data.indices),
            glow::STATIC_DRAW,
        );

        gl.bind_vertex_array(None);

        Ok(GpuMesh {
            vao,
            vbo,
            ibo,
            index_count: data.indices.len() as i32,
        })
    }
}

// ── Draw calls ───────────────────────────────────────────────

unsafe fn draw_mesh(gl: &glow::Context, mesh: &GpuMesh) {
    gl.bind_vertex_array(Some(mesh.vao));
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(mesh.ibo));
    gl.draw_elements(glow::TRIANGLES, mesh.index_count, glow::UNSIGNED_INT, 0);
    gl.bind_vertex_array(None);
}

// ── Shader compilation ───────────────────────────────────────

fn compile_program(gl: &glow::Context, vert_src: &str, frag_src: &str) -> Result<glow::Program, String> {
    unsafe {
        let program = gl.create_program()?;

        let vert = compile_shader(gl, glow::VERTEX_SHADER, vert_src)?;
        let frag = compile_shader(gl, glow::FRAGMENT_SHADER, frag_src)?;

        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);
        gl.delete_shader(vert);
        gl.delete_shader(frag);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            tracing::error!("Program link error: {log}");
            gl.delete_program(program);
            return Err(format!("Program link error: {log}"));
        }

        Ok(program)
    }
}

unsafe fn compile_shader(gl: &glow::Context, kind: u32, src: &str) -> Result<glow::Shader, String> {
    let shader = gl.create_shader(kind)?;
    gl.shader_source(shader, src);
    gl.compile_shader(shader);
    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        let stage = if kind == glow::VERTEX_SHADER { "Vertex" } else { "Fragment" };
        tracing::error!("{stage} shader error: {log}");
        gl.delete_shader(shader);
        return Err(format!("{stage} shader error: {log}"));
    }
    Ok(shader)
}

// ── Uniform setters ──────────────────────────────────────────

fn set_uniform_mat4(gl: &glow::Context, program: glow::Program, name: &str, mat: &glam::Mat4) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, &mat.to_cols_array());
    }
}

fn set_uniform_vec3(gl: &glow::Context, program: glow::Program, name: &str, v: &glam::Vec3) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_3_f32(loc.as_ref(), v.x, v.y, v.z);
    }
}

fn set_uniform_f32(gl: &glow::Context, program: glow::Program, name: &str, v: f32) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_1_f32(loc.as_ref(), v);
    }
}

// ── Byte cast helper ─────────────────────────────────────────

fn bytemuck_cast_slice<T: Copy>(slice: &[T]) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(
            slice.as_ptr() as *const u8,
            std::mem::size_of_val(slice),
        )
    }
}

// ── Shaders ──────────────────────────────────────────────────

const MESH_VERT: &str = r#"#version 330 core
uniform mat4 u_view_proj;
uniform mat4 u_model;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;

out vec3 v_world_pos;
out vec3 v_normal;

void main() {
    vec4 world = u_model * vec4(a_position, 1.0);
    v_world_pos = world.xyz;
    v_normal = mat3(transpose(inverse(u_model))) * a_normal;
    gl_Position = u_view_proj * world;
}
"#;

// Blinn-Phong with roughness/metalness mapped onto shininess and specular tint.
// Light intensities use inverse-square falloff.
const MESH_FRAG: &str = r#"#version 330 core
uniform vec3 u_eye;
uniform vec3 u_color;
uniform float u_roughness;
uniform float u_metalness;

uniform float u_ambient;
uniform vec3 u_spot_pos;
uniform vec3 u_spot_dir;
uniform float u_spot_intensity;
uniform float u_spot_inner;
uniform float u_spot_outer;
uniform vec3 u_point_pos;
uniform float u_point_intensity;

in vec3 v_world_pos;
in vec3 v_normal;

out vec4 frag_color;

vec3 shade(vec3 n, vec3 v, vec3 l, float radiance) {
    vec3 h = normalize(l + v);
    float ndl = max(dot(n, l), 0.0);
    float shininess = mix(256.0, 4.0, u_roughness);
    float spec = pow(max(dot(n, h), 0.0), shininess) * (1.0 - u_roughness * 0.7);
    vec3 diffuse = u_color * (1.0 - u_metalness) * ndl;
    vec3 specular = mix(vec3(0.04), u_color, u_metalness) * spec;
    return (diffuse + specular) * radiance;
}

void main() {
    vec3 n = normalize(v_normal);
    vec3 v = normalize(u_eye - v_world_pos);

    // Metals reflect little diffuse light; keep them readable under ambient
    vec3 color = u_color * u_ambient * (1.0 - 0.5 * u_metalness);

    vec3 to_spot = u_spot_pos - v_world_pos;
    float spot_d2 = max(dot(to_spot, to_spot), 1e-4);
    vec3 l_spot = to_spot * inversesqrt(spot_d2);
    float cos_angle = dot(-l_spot, u_spot_dir);
    float cone = smoothstep(u_spot_outer, max(u_spot_inner, u_spot_outer + 1e-4), cos_angle);
    color += shade(n, v, l_spot, u_spot_intensity * cone / spot_d2);

    vec3 to_point = u_point_pos - v_world_pos;
    float point_d2 = max(dot(to_point, to_point), 1e-4);
    color += shade(n, v, to_point * inversesqrt(point_d2), u_point_intensity / point_d2);

    frag_color = vec4(color, 1.0);
}
"#;
