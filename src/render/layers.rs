use super::helpers;
use folio_core::scene::ParticleBuffer;
use folio_core::{Scene, CIRCLES_WGSL, PARTICLES_WGSL};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    pub(crate) view: [[f32; 4]; 4],
    pub(crate) proj: [[f32; 4]; 4],
    pub(crate) particle_model: [[f32; 4]; 4],
    pub(crate) resolution: [f32; 2],
    pub(crate) time: f32,
    pub(crate) _pad: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CircleInstance {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ParticleInstance {
    pub(crate) pos_size: [f32; 4],
    pub(crate) color: [f32; 4],
}

const CIRCLE_ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    0 => Float32x4, 1 => Float32x4, 2 => Float32x4, 3 => Float32x4, 4 => Float32x4
];
const PARTICLE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

/// Circle disks and the particle cloud, sharing one globals uniform.
pub(crate) struct SceneLayers {
    pub(crate) globals_buffer: wgpu::Buffer,
    pub(crate) globals_bg: wgpu::BindGroup,
    pub(crate) circle_pipeline: wgpu::RenderPipeline,
    pub(crate) circle_buffer: wgpu::Buffer,
    pub(crate) circle_capacity: usize,
    pub(crate) circle_count: u32,
    pub(crate) particle_pipeline: wgpu::RenderPipeline,
    pub(crate) particle_buffer: wgpu::Buffer,
    pub(crate) particle_capacity: usize,
    pub(crate) particle_count: u32,
    scratch_circles: Vec<CircleInstance>,
    scratch_particles: Vec<ParticleInstance>,
}

pub(crate) fn create_scene_layers(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    samples: u32,
    circle_capacity: usize,
    particle_capacity: usize,
) -> SceneLayers {
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("globals_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("globals"),
        size: std::mem::size_of::<Globals>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("globals_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: globals_buffer.as_entire_binding(),
        }],
    });

    let circle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("circles_shader"),
        source: wgpu::ShaderSource::Wgsl(CIRCLES_WGSL.into()),
    });
    let circle_pipeline = helpers::make_instanced_pipeline(
        device,
        "circles_pipeline",
        &pl,
        &circle_shader,
        ("vs_circle", "fs_circle"),
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &CIRCLE_ATTRS,
        },
        format,
        wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
        samples,
    );

    let particle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("particles_shader"),
        source: wgpu::ShaderSource::Wgsl(PARTICLES_WGSL.into()),
    });
    let particle_pipeline = helpers::make_instanced_pipeline(
        device,
        "particles_pipeline",
        &pl,
        &particle_shader,
        ("vs_particle", "fs_particle"),
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &PARTICLE_ATTRS,
        },
        format,
        helpers::ADDITIVE_PREMULTIPLIED,
        samples,
    );

    let circle_buffer = helpers::instance_buffer(
        device,
        "circle_instances",
        (circle_capacity * std::mem::size_of::<CircleInstance>()) as u64,
    );
    let particle_buffer = helpers::instance_buffer(
        device,
        "particle_instances",
        (particle_capacity * std::mem::size_of::<ParticleInstance>()) as u64,
    );

    SceneLayers {
        globals_buffer,
        globals_bg,
        circle_pipeline,
        circle_buffer,
        circle_capacity,
        circle_count: 0,
        particle_pipeline,
        particle_buffer,
        particle_capacity,
        particle_count: 0,
        scratch_circles: Vec::with_capacity(circle_capacity),
        scratch_particles: Vec::with_capacity(particle_capacity),
    }
}

impl SceneLayers {
    pub(crate) fn upload(&mut self, queue: &wgpu::Queue, scene: &mut Scene, resolution: [f32; 2]) {
        let globals = Globals {
            view: scene.camera.view_matrix().to_cols_array_2d(),
            proj: scene.camera.projection_matrix().to_cols_array_2d(),
            particle_model: scene.particles.model_matrix().to_cols_array_2d(),
            resolution,
            time: scene.time(),
            _pad: 0.0,
        };
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        // far to near so the alpha blend composes correctly
        self.scratch_circles.clear();
        for i in scene.back_to_front().into_iter().take(self.circle_capacity) {
            let (params, state) = (&scene.params[i], &scene.circles[i]);
            self.scratch_circles.push(CircleInstance {
                model: state.model_matrix(params).to_cols_array_2d(),
                color: [state.color[0], state.color[1], state.color[2], state.opacity],
            });
        }
        self.circle_count = self.scratch_circles.len() as u32;
        if !self.scratch_circles.is_empty() {
            queue.write_buffer(
                &self.circle_buffer,
                0,
                bytemuck::cast_slice(&self.scratch_circles),
            );
        }

        if scene.particles.take_dirty() {
            pack_particles(&scene.particles, self.particle_capacity, &mut self.scratch_particles);
            self.particle_count = self.scratch_particles.len() as u32;
            if !self.scratch_particles.is_empty() {
                queue.write_buffer(
                    &self.particle_buffer,
                    0,
                    bytemuck::cast_slice(&self.scratch_particles),
                );
            }
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_bind_group(0, &self.globals_bg, &[]);
        if self.circle_count > 0 {
            rpass.set_pipeline(&self.circle_pipeline);
            rpass.set_vertex_buffer(0, self.circle_buffer.slice(..));
            rpass.draw(0..6, 0..self.circle_count);
        }
        if self.particle_count > 0 {
            rpass.set_pipeline(&self.particle_pipeline);
            rpass.set_vertex_buffer(0, self.particle_buffer.slice(..));
            rpass.draw(0..6, 0..self.particle_count);
        }
    }
}

fn pack_particles(buf: &ParticleBuffer, capacity: usize, out: &mut Vec<ParticleInstance>) {
    out.clear();
    let rows = buf
        .positions
        .chunks_exact(3)
        .zip(buf.colors.chunks_exact(3))
        .zip(&buf.sizes)
        .take(capacity);
    for ((p, c), &size) in rows {
        out.push(ParticleInstance {
            pos_size: [p[0], p[1], p[2], size],
            color: [c[0], c[1], c[2], 1.0],
        });
    }
}
