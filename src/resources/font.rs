//! Font Handle

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use tracing::debug;

use crate::native::{path_to_cstring, NativeContext, NativeFont, ResourceDevice};
use crate::resources::error::{ResourceError, Result};

/// TTF font owning one native handle, unloaded on drop while its context lives
pub struct Font {
    device: Rc<dyn ResourceDevice>,
    context: NativeContext,
    handle: NativeFont,
}

impl Font {
    /// Load a TTF font
    pub fn load(
        device: Rc<dyn ResourceDevice>,
        context: &NativeContext,
        path: &Path,
    ) -> Result<Self> {
        if !context.is_alive() {
            return Err(ResourceError::ContextClosed);
        }
        let failed = || ResourceError::FontLoadFailed(path.to_path_buf());
        let c_path = path_to_cstring(path).ok_or_else(failed)?;
        let handle = device.load_font(&c_path).ok_or_else(failed)?;

        debug!(
            "Loaded font {} ({} glyphs, base size {})",
            path.display(),
            handle.glyph_count,
            handle.base_size
        );
        Ok(Self {
            device,
            context: context.clone(),
            handle,
        })
    }

    /// Release the native font now
    pub fn release(self) {
        drop(self);
    }

    /// Size the glyphs were rasterized at
    pub fn base_size(&self) -> i32 {
        self.handle.base_size
    }

    /// Number of glyphs in the atlas
    pub fn glyph_count(&self) -> i32 {
        self.handle.glyph_count
    }

    /// Underlying native handle, valid while `self` lives
    pub fn native(&self) -> &NativeFont {
        &self.handle
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("atlas", &self.handle.texture.id)
            .field("base_size", &self.handle.base_size)
            .field("glyph_count", &self.handle.glyph_count)
            .finish()
    }
}

impl Drop for Font {
    fn drop(&mut self) {
        if !self.context.is_alive() {
            debug!("Font atlas {} freed with its context", self.handle.texture.id);
            return;
        }
        debug!("Releasing font atlas {}", self.handle.texture.id);
        self.device.unload_font(self.handle);
    }
}
