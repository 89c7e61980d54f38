//! Texture Marshaling
//!
//! Moves pixels between CPU buffers and GPU textures.
//!
//! Upload has two routes:
//!
//! - **Fast path**: packed RGBA goes to the native constructor as is.
//! - **Slow path**: anything else is first normalized to packed RGBA, row by
//!   row using the real stride, then takes the fast path.
//!
//! Read-back downloads a native image, expands it to packed RGBA and always
//! releases the native image before returning.

use std::fmt;
use std::path::Path;
use std::ptr;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::config::TextureConfig;
use crate::native::{path_to_cstring, NativeContext, NativeImage, NativeTexture, TextureDevice};
use crate::texture::buffer::{PixelBuffer, PixelView};
use crate::texture::error::{Result, TextureError};
use crate::texture::format::PixelFormat;
use crate::utils::Timer;

/// Normalize any view to a packed RGBA buffer
///
/// Gray is replicated into R, G and B. RGB gets an opaque alpha. Strided RGBA
/// is repacked.
pub fn normalize_to_rgba(view: &PixelView<'_>) -> PixelBuffer {
    let format = view.format();
    let bpp = format.bytes_per_pixel();
    let mut data = Vec::with_capacity(view.width() as usize * view.height() as usize * 4);

    for row in view.rows() {
        if format == PixelFormat::Rgba {
            data.extend_from_slice(row);
            continue;
        }
        for px in row.chunks_exact(bpp) {
            data.extend_from_slice(&format.to_rgba(px));
        }
    }

    PixelBuffer::from_validated(view.width(), view.height(), PixelFormat::Rgba, data)
}

/// Expand packed native pixels in `format` to packed RGBA
pub fn expand_to_rgba(
    width: u32,
    height: u32,
    format: PixelFormat,
    bytes: &[u8],
) -> Result<PixelBuffer> {
    let view = PixelView::packed(width, height, format, bytes)?;
    Ok(normalize_to_rgba(&view))
}

/// Borrow the pixel bytes of a native image
///
/// # Safety
///
/// `image.data` must point to at least `width * height * bpp` readable bytes
/// that stay valid for the returned lifetime.
#[allow(unsafe_code)]
unsafe fn image_bytes<'a>(image: &'a NativeImage, format: PixelFormat) -> &'a [u8] {
    let len = image.width as usize * image.height as usize * format.bytes_per_pixel();
    // SAFETY: guaranteed by the caller
    unsafe { std::slice::from_raw_parts(image.data as *const u8, len) }
}

/// Native read-back image released on every exit path
struct ImageGuard<'a> {
    device: &'a dyn TextureDevice,
    image: NativeImage,
}

impl Drop for ImageGuard<'_> {
    fn drop(&mut self) {
        let image = std::mem::replace(
            &mut self.image,
            NativeImage {
                data: ptr::null_mut(),
                width: 0,
                height: 0,
                mipmaps: 0,
                format: 0,
            },
        );
        self.device.unload_image(image);
    }
}

/// GPU texture owning one native handle
///
/// The handle is released exactly once, when the texture is dropped or
/// passed to [`Texture::release`]. A texture that outlives its context is
/// freed with the context and never calls back into the native library.
pub struct Texture {
    device: Rc<dyn TextureDevice>,
    context: NativeContext,
    handle: NativeTexture,
}

impl Texture {
    /// Load an image file through the native decoder
    pub fn load_file(
        device: Rc<dyn TextureDevice>,
        context: &NativeContext,
        path: &Path,
    ) -> Result<Self> {
        if !context.is_alive() {
            return Err(TextureError::ContextClosed);
        }
        let c_path = path_to_cstring(path)
            .ok_or_else(|| TextureError::InvalidPath(path.to_path_buf()))?;

        let handle = device
            .load_texture(&c_path)
            .filter(|handle| handle.id != 0)
            .ok_or_else(|| TextureError::LoadFailed(path.to_path_buf()))?;

        debug!(
            "Loaded texture {} ({}x{}) from {}",
            handle.id,
            handle.width,
            handle.height,
            path.display()
        );
        Ok(Self {
            device,
            context: context.clone(),
            handle,
        })
    }

    /// Upload a pixel view
    pub fn from_pixels(
        device: Rc<dyn TextureDevice>,
        context: &NativeContext,
        view: PixelView<'_>,
        config: &TextureConfig,
    ) -> Result<Self> {
        if !context.is_alive() {
            return Err(TextureError::ContextClosed);
        }
        let (width, height) = (view.width(), view.height());

        let pixels = match view.packed_bytes() {
            Some(pixels) if view.is_canonical() => pixels,
            _ => {
                let timer = Timer::new();
                let normalized = normalize_to_rgba(&view);
                if config.warn_on_slow_path {
                    warn!(
                        "Fallback conversion for {:?} {}x{} (stride {}) finished in {:.3}ms",
                        view.format(),
                        width,
                        height,
                        view.stride(),
                        timer.elapsed_ms()
                    );
                }
                return Self::from_pixels(device, context, normalized.view(), config);
            }
        };

        let upload_failed = || TextureError::UploadFailed { width, height };
        let native_width = i32::try_from(width).map_err(|_| upload_failed())?;
        let native_height = i32::try_from(height).map_err(|_| upload_failed())?;

        let handle = device
            .load_texture_from_pixels(
                native_width,
                native_height,
                PixelFormat::Rgba.to_native(),
                pixels,
            )
            .filter(|handle| handle.id != 0)
            .ok_or_else(upload_failed)?;

        debug!("Uploaded texture {} ({}x{})", handle.id, width, height);
        Ok(Self {
            device,
            context: context.clone(),
            handle,
        })
    }

    /// Read the texture back as packed RGBA
    ///
    /// Fails with [`TextureError::UnsupportedPixelFormat`] when the native
    /// library reports an encoding other than gray+alpha, RGB or RGBA, and
    /// with [`TextureError::ContextClosed`] once the window is closed.
    pub fn read(&self) -> Result<PixelBuffer> {
        if !self.context.is_alive() {
            return Err(TextureError::ContextClosed);
        }
        let image = self
            .device
            .load_image_from_texture(&self.handle)
            .ok_or(TextureError::ReadbackFailed(self.handle.id))?;
        let guard = ImageGuard {
            device: self.device.as_ref(),
            image,
        };

        let format = PixelFormat::from_native(guard.image.format)
            .ok_or(TextureError::UnsupportedPixelFormat(guard.image.format))?;

        if guard.image.data.is_null() || guard.image.width <= 0 || guard.image.height <= 0 {
            return Err(TextureError::ReadbackFailed(self.handle.id));
        }

        // SAFETY: the native library allocated width * height * bpp bytes for
        // this image, and the guard keeps them alive until after the copy.
        #[allow(unsafe_code)]
        let bytes = unsafe { image_bytes(&guard.image, format) };

        expand_to_rgba(
            guard.image.width as u32,
            guard.image.height as u32,
            format,
            bytes,
        )
    }

    /// Release the native texture now
    pub fn release(self) {
        drop(self);
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.handle.width.max(0) as u32
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.handle.height.max(0) as u32
    }

    /// Native texture id
    pub fn id(&self) -> u32 {
        self.handle.id
    }

    /// Underlying native handle, valid while `self` lives
    pub fn native(&self) -> &NativeTexture {
        &self.handle
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("id", &self.handle.id)
            .field("width", &self.handle.width)
            .field("height", &self.handle.height)
            .finish()
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        if !self.context.is_alive() {
            debug!("Texture {} freed with its context", self.handle.id);
            return;
        }
        debug!("Releasing texture {}", self.handle.id);
        self.device.unload_texture(self.handle);
    }
}
