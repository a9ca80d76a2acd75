//! Deferred command recording
//!
//! The outline pipeline never talks to a GPU device directly. It appends
//! commands to a [`CommandRecorder`], and the host plays the recorded work
//! back on its own execution timeline. [`CommandList`] is the concrete
//! recorder shipped with the crate; hosts with their own deferred command
//! abstraction implement the trait over it instead.

use glam::Vec4;

use crate::command::types::*;

/// One recorded command.
///
/// Commands are plain data so host executors can translate them to any
/// graphics API and tests can assert on exact recorded sequences.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AllocateTarget {
        target: TargetId,
        desc: TargetDescriptor,
    },
    ReleaseTarget {
        target: TargetId,
    },
    SetRenderTarget {
        color: TargetId,
        load_op: LoadOp,
        store_op: StoreOp,
        depth: Option<DepthAttachment>,
    },
    /// Clear the currently bound color target
    Clear {
        color: [f32; 4],
    },
    /// Draw one submaterial slot of a renderable with an override program
    DrawRenderer {
        renderer: RendererHandle,
        submaterial: u32,
        program: ProgramHandle,
        pass: u32,
    },
    /// Fullscreen draw with shader-stage vertex generation
    DrawProcedural {
        program: ProgramHandle,
        pass: u32,
        vertex_count: u32,
    },
    /// Fullscreen draw through an explicit mesh (procedural-draw fallback)
    DrawMesh {
        mesh: MeshHandle,
        program: ProgramHandle,
        pass: u32,
    },
    SetFloat {
        name: String,
        value: f32,
    },
    SetColor {
        name: String,
        value: Vec4,
    },
    SetFloatArray {
        name: String,
        values: Vec<f32>,
    },
    /// Bind a previously allocated target as a global shader input
    SetTexture {
        name: String,
        target: TargetId,
    },
}

/// Append-only deferred command recorder.
///
/// All operations are synchronous recording calls; nothing executes until
/// the host submits the recorded work. Implementations must preserve issue
/// order exactly.
pub trait CommandRecorder {
    /// Allocate a named temporary render target and return its identifier
    fn allocate_target(&mut self, desc: TargetDescriptor) -> TargetId;

    /// Release a temporary render target
    fn release_target(&mut self, target: TargetId);

    /// Bind a color target (and optionally a depth attachment) for
    /// subsequent draws
    fn set_render_target(
        &mut self,
        color: TargetId,
        load_op: LoadOp,
        store_op: StoreOp,
        depth: Option<DepthAttachment>,
    );

    /// Clear the currently bound color target
    fn clear(&mut self, color: [f32; 4]);

    /// Draw one submaterial slot of a renderable with an override program
    /// and sub-pass index
    fn draw_renderer(
        &mut self,
        renderer: RendererHandle,
        submaterial: u32,
        program: ProgramHandle,
        pass: u32,
    );

    /// Record a fullscreen procedural draw of `vertex_count` vertices
    fn draw_procedural(&mut self, program: ProgramHandle, pass: u32, vertex_count: u32);

    /// Record a fullscreen mesh draw (fallback for platforms without
    /// shader-stage vertex generation)
    fn draw_mesh(&mut self, mesh: MeshHandle, program: ProgramHandle, pass: u32);

    /// Set a global scalar shader parameter
    fn set_float(&mut self, name: &str, value: f32);

    /// Set a global color shader parameter
    fn set_color(&mut self, name: &str, value: Vec4);

    /// Set a global float-array shader parameter
    fn set_float_array(&mut self, name: &str, values: &[f32]);

    /// Bind an allocated target as a global shader texture input
    fn set_texture(&mut self, name: &str, target: TargetId);

    /// Whether the platform supports procedural fullscreen draws
    /// (shader-stage vertex generation plus instancing)
    fn supports_procedural_draw(&self) -> bool;
}

/// Concrete recorder backed by a command vector.
///
/// Target identifiers are minted locally; the host resolves them to real
/// GPU resources at playback time.
pub struct CommandList {
    commands: Vec<Command>,
    next_target_id: u64,
    procedural_draw: bool,
}

impl CommandList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            next_target_id: 0,
            procedural_draw: true,
        }
    }

    /// Override the procedural-draw capability (e.g. for GLES-class hosts)
    pub fn with_procedural_draw(mut self, supported: bool) -> Self {
        self.procedural_draw = supported;
        self
    }

    /// All commands recorded so far, in issue order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Drain the recorded commands for playback
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandList {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRecorder for CommandList {
    fn allocate_target(&mut self, desc: TargetDescriptor) -> TargetId {
        let target = TargetId::from_raw(self.next_target_id);
        self.next_target_id += 1;
        self.commands.push(Command::AllocateTarget { target, desc });
        target
    }

    fn release_target(&mut self, target: TargetId) {
        self.commands.push(Command::ReleaseTarget { target });
    }

    fn set_render_target(
        &mut self,
        color: TargetId,
        load_op: LoadOp,
        store_op: StoreOp,
        depth: Option<DepthAttachment>,
    ) {
        self.commands.push(Command::SetRenderTarget {
            color,
            load_op,
            store_op,
            depth,
        });
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.commands.push(Command::Clear { color });
    }

    fn draw_renderer(
        &mut self,
        renderer: RendererHandle,
        submaterial: u32,
        program: ProgramHandle,
        pass: u32,
    ) {
        self.commands.push(Command::DrawRenderer {
            renderer,
            submaterial,
            program,
            pass,
        });
    }

    fn draw_procedural(&mut self, program: ProgramHandle, pass: u32, vertex_count: u32) {
        self.commands.push(Command::DrawProcedural {
            program,
            pass,
            vertex_count,
        });
    }

    fn draw_mesh(&mut self, mesh: MeshHandle, program: ProgramHandle, pass: u32) {
        self.commands.push(Command::DrawMesh {
            mesh,
            program,
            pass,
        });
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.commands.push(Command::SetFloat {
            name: name.to_string(),
            value,
        });
    }

    fn set_color(&mut self, name: &str, value: Vec4) {
        self.commands.push(Command::SetColor {
            name: name.to_string(),
            value,
        });
    }

    fn set_float_array(&mut self, name: &str, values: &[f32]) {
        self.commands.push(Command::SetFloatArray {
            name: name.to_string(),
            values: values.to_vec(),
        });
    }

    fn set_texture(&mut self, name: &str, target: TargetId) {
        self.commands.push(Command::SetTexture {
            name: name.to_string(),
            target,
        });
    }

    fn supports_procedural_draw(&self) -> bool {
        self.procedural_draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_preserve_issue_order() {
        let mut list = CommandList::new();
        let target = list.allocate_target(TargetDescriptor {
            label: "mask".to_string(),
            size: TargetSize::MatchDestination,
            format: TargetFormat::R8Unorm,
        });
        list.set_render_target(target, LoadOp::DontCare, StoreOp::Store, None);
        list.clear([0.0; 4]);
        list.release_target(target);

        let kinds: Vec<_> = list
            .commands()
            .iter()
            .map(|c| std::mem::discriminant(c))
            .collect();
        assert_eq!(kinds.len(), 4);
        assert_eq!(
            list.commands()[0],
            Command::AllocateTarget {
                target,
                desc: TargetDescriptor {
                    label: "mask".to_string(),
                    size: TargetSize::MatchDestination,
                    format: TargetFormat::R8Unorm,
                },
            }
        );
        assert_eq!(list.commands()[3], Command::ReleaseTarget { target });
    }

    #[test]
    fn minted_target_ids_are_unique() {
        let mut list = CommandList::new();
        let desc = TargetDescriptor {
            label: "t".to_string(),
            size: TargetSize::default(),
            format: TargetFormat::default(),
        };
        let a = list.allocate_target(desc.clone());
        let b = list.allocate_target(desc);
        assert_ne!(a, b);
    }
}
