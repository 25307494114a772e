use std::fmt;

use thiserror::Error;

use super::quad::QuadVertex;
use super::sprite::SpriteInstance;
use super::RenderCtx;

/// Entry point the vertex stage must export.
pub const VERTEX_ENTRY: &str = "vs_main";
/// Entry point the fragment stage must export.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Shader stage of a [`ProgramSource`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    fn entry_point(self) -> &'static str {
        match self {
            Stage::Vertex => VERTEX_ENTRY,
            Stage::Fragment => FRAGMENT_ENTRY,
        }
    }

    fn naga_stage(self) -> naga::ShaderStage {
        match self {
            Stage::Vertex => naga::ShaderStage::Vertex,
            Stage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Vertex => f.write_str("vertex"),
            Stage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("an error occurred compiling the {stage} shader:\n{message}")]
    Compile { stage: Stage, message: String },

    #[error("the {stage} shader failed validation: {message}")]
    Validate { stage: Stage, message: String },

    #[error("unable to link the shader program: {stage} stage has no `{entry}` entry point")]
    MissingEntryPoint { stage: Stage, entry: &'static str },
}

/// WGSL sources for the vertex and fragment stages.
#[derive(Debug, Copy, Clone)]
pub struct ProgramSource<'a> {
    pub vertex: &'a str,
    pub fragment: &'a str,
}

impl ProgramSource<'static> {
    /// The built-in sprite program.
    pub const SPRITE: ProgramSource<'static> = ProgramSource {
        vertex: include_str!("shaders/sprite_vs.wgsl"),
        fragment: include_str!("shaders/sprite_fs.wgsl"),
    };
}

impl<'a> ProgramSource<'a> {
    /// Compiles and validates both stages on the CPU and checks that each exports
    /// its entry point.
    ///
    /// Pipeline creation is only attempted on a validated program, so a bad shader
    /// never reaches wgpu's uncaptured-error handler.
    pub fn validate(&self) -> Result<ValidatedProgram<'a>, ShaderError> {
        check_stage(self.vertex, Stage::Vertex)?;
        check_stage(self.fragment, Stage::Fragment)?;
        Ok(ValidatedProgram { source: *self })
    }

    /// Like [`validate`](Self::validate) but logs the failure and returns `None`.
    pub fn validate_or_log(&self) -> Option<ValidatedProgram<'a>> {
        match self.validate() {
            Ok(program) => Some(program),
            Err(err) => {
                log::error!("unable to initialize the shader program: {err}");
                None
            }
        }
    }
}

/// A program source that passed [`ProgramSource::validate`].
#[derive(Debug, Copy, Clone)]
pub struct ValidatedProgram<'a> {
    source: ProgramSource<'a>,
}

impl<'a> ValidatedProgram<'a> {
    pub fn source(&self) -> ProgramSource<'a> {
        self.source
    }
}

fn check_stage(src: &str, stage: Stage) -> Result<(), ShaderError> {
    let module = naga::front::wgsl::parse_str(src).map_err(|e| ShaderError::Compile {
        stage,
        message: e.emit_to_string(src),
    })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .map_err(|e| ShaderError::Validate {
        stage,
        message: e.as_inner().to_string(),
    })?;

    let entry = stage.entry_point();
    let exported = module
        .entry_points
        .iter()
        .any(|ep| ep.name == entry && ep.stage == stage.naga_stage());

    if !exported {
        return Err(ShaderError::MissingEntryPoint { stage, entry });
    }

    Ok(())
}

/// Linked sprite pipeline plus the bind group layout its textures use.
///
/// Created once at bootstrap and immutable afterwards.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    texture_layout: wgpu::BindGroupLayout,
}

impl ShaderProgram {
    /// Validates `source` and builds the render pipeline for `ctx.surface_format`.
    pub fn build(ctx: &RenderCtx<'_>, source: ProgramSource<'_>) -> Result<Self, ShaderError> {
        let validated = source.validate()?;
        Ok(Self::from_validated(ctx, validated))
    }

    /// Bootstrap entry point: logs any failure and yields `None` instead of an error.
    pub fn build_or_log(ctx: &RenderCtx<'_>, source: ProgramSource<'_>) -> Option<Self> {
        let validated = source.validate_or_log()?;
        let program = Self::from_validated(ctx, validated);
        log::debug!("sprite program linked for {:?}", ctx.surface_format);
        Some(program)
    }

    fn from_validated(ctx: &RenderCtx<'_>, validated: ValidatedProgram<'_>) -> Self {
        let source = validated.source();

        let vertex = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("spritewalk sprite vertex shader"),
            source: wgpu::ShaderSource::Wgsl(source.vertex.into()),
        });
        let fragment = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("spritewalk sprite fragment shader"),
            source: wgpu::ShaderSource::Wgsl(source.fragment.into()),
        });

        let texture_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("spritewalk sprite texture bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("spritewalk sprite pipeline layout"),
                    bind_group_layouts: &[&texture_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("spritewalk sprite pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vertex,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), SpriteInstance::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fragment,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            texture_layout,
        }
    }

    #[inline]
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    #[inline]
    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }
}
