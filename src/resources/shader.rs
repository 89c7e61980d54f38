//! Shader Handle and Scoped Shader Mode

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use tracing::debug;

use crate::native::{path_to_cstring, NativeContext, NativeShader, ResourceDevice};
use crate::resources::error::{ResourceError, Result};

/// Shader program owning one native handle, unloaded on drop while its
/// context lives
pub struct Shader {
    device: Rc<dyn ResourceDevice>,
    context: NativeContext,
    handle: NativeShader,
}

impl Shader {
    /// Compile a program from vertex and fragment sources
    ///
    /// A `None` stage uses the native default for that stage.
    pub fn load(
        device: Rc<dyn ResourceDevice>,
        context: &NativeContext,
        vertex: Option<&Path>,
        fragment: Option<&Path>,
    ) -> Result<Self> {
        if !context.is_alive() {
            return Err(ResourceError::ContextClosed);
        }
        let failed = || ResourceError::ShaderLoadFailed {
            vertex: vertex.map(Path::to_path_buf),
            fragment: fragment.map(Path::to_path_buf),
        };

        let vs = vertex.map(path_to_cstring);
        let fs = fragment.map(path_to_cstring);
        if matches!(vs, Some(None)) || matches!(fs, Some(None)) {
            return Err(failed());
        }

        let handle = device
            .load_shader(vs.flatten().as_deref(), fs.flatten().as_deref())
            .ok_or_else(failed)?;

        debug!("Loaded shader program {}", handle.id);
        Ok(Self {
            device,
            context: context.clone(),
            handle,
        })
    }

    /// Draw with this shader until the returned guard is dropped
    ///
    /// Does nothing once the window is closed.
    pub fn enable(&self) -> ShaderMode<'_> {
        if self.context.is_alive() {
            self.device.begin_shader_mode(&self.handle);
        }
        ShaderMode { shader: self }
    }

    /// Release the native shader now
    pub fn release(self) {
        drop(self);
    }

    /// Native program id
    pub fn id(&self) -> u32 {
        self.handle.id
    }
}

impl fmt::Debug for Shader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shader").field("id", &self.handle.id).finish()
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        if !self.context.is_alive() {
            debug!("Shader program {} freed with its context", self.handle.id);
            return;
        }
        debug!("Releasing shader program {}", self.handle.id);
        self.device.unload_shader(self.handle);
    }
}

/// Active shader mode; the default shader is restored on drop
///
/// Borrows the shader, so it cannot be released while enabled.
#[must_use = "shader mode ends as soon as the guard is dropped"]
pub struct ShaderMode<'a> {
    shader: &'a Shader,
}

impl ShaderMode<'_> {
    /// Return to the default shader
    pub fn disable(self) {
        drop(self);
    }
}

impl fmt::Debug for ShaderMode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderMode")
            .field("shader", &self.shader.handle.id)
            .finish()
    }
}

impl Drop for ShaderMode<'_> {
    fn drop(&mut self) {
        if self.shader.context.is_alive() {
            self.shader.device.end_shader_mode();
        }
    }
}
