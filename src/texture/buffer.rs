//! CPU Pixel Buffers
//!
//! [`PixelBuffer`] owns its pixels, [`PixelView`] borrows them. Both carry an
//! explicit stride so a view can describe a sub-rectangle of a larger image
//! without copying. Rows must always be walked using the stride; only a
//! packed buffer (stride equal to the packed row length) may be treated as a
//! single flat slice.

use image::{DynamicImage, GrayAlphaImage, RgbImage, RgbaImage};

use crate::texture::error::{Result, TextureError};
use crate::texture::format::PixelFormat;

fn overflow(width: u32, height: u32, stride: usize) -> TextureError {
    TextureError::InvalidBuffer(format!(
        "{}x{} buffer with stride {} exceeds addressable memory",
        width, height, stride
    ))
}

fn validate(width: u32, height: u32, stride: usize, format: PixelFormat, len: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(TextureError::InvalidBuffer(format!(
            "empty {}x{} buffer",
            width, height
        )));
    }

    let packed = (width as usize)
        .checked_mul(format.bytes_per_pixel())
        .ok_or_else(|| overflow(width, height, stride))?;
    if stride < packed {
        return Err(TextureError::InvalidBuffer(format!(
            "stride {} shorter than packed row of {} bytes",
            stride, packed
        )));
    }

    // Last row only needs its pixels, not the padding
    let required = stride
        .checked_mul(height as usize - 1)
        .and_then(|rows| rows.checked_add(packed))
        .ok_or_else(|| overflow(width, height, stride))?;
    if len < required {
        return Err(TextureError::InvalidBuffer(format!(
            "{} bytes for {}x{} {:?} with stride {} (need {})",
            len, width, height, format, stride, required
        )));
    }

    Ok(())
}

/// Borrowed, possibly strided, pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelView<'a> {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    data: &'a [u8],
}

impl<'a> PixelView<'a> {
    /// Describe `data` as `height` rows of `stride` bytes
    pub fn new(
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
        data: &'a [u8],
    ) -> Result<Self> {
        validate(width, height, stride, format, data.len())?;
        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    /// Describe packed `data` (no row padding)
    pub fn packed(width: u32, height: u32, format: PixelFormat, data: &'a [u8]) -> Result<Self> {
        Self::new(
            width,
            height,
            width as usize * format.bytes_per_pixel(),
            format,
            data,
        )
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes from the start of one row to the next
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel encoding
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes of pixel data in one row
    pub fn packed_row_len(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// Whether rows follow each other without padding
    pub fn is_packed(&self) -> bool {
        self.stride == self.packed_row_len()
    }

    /// Packed RGBA: the only layout the native constructor receives
    pub fn is_canonical(&self) -> bool {
        self.format == PixelFormat::Rgba && self.is_packed()
    }

    /// Pixel bytes of a packed view as one contiguous slice
    pub fn packed_bytes(&self) -> Option<&'a [u8]> {
        if !self.is_packed() {
            return None;
        }
        Some(&self.data[..self.packed_row_len() * self.height as usize])
    }

    /// Row `y` without its padding
    pub fn row(&self, y: u32) -> &'a [u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.packed_row_len()]
    }

    /// Rows top to bottom, padding excluded
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> {
        let view = *self;
        (0..view.height).map(move |y| view.row(y))
    }

    /// Bytes of the pixel at (`x`, `y`)
    pub fn pixel(&self, x: u32, y: u32) -> &'a [u8] {
        let bpp = self.format.bytes_per_pixel();
        let start = y as usize * self.stride + x as usize * bpp;
        &self.data[start..start + bpp]
    }

    /// Sub-rectangle sharing this view's memory and stride
    pub fn sub_view(&self, x: u32, y: u32, width: u32, height: u32) -> Result<PixelView<'a>> {
        let fits_x = x.checked_add(width).is_some_and(|right| right <= self.width);
        let fits_y = y.checked_add(height).is_some_and(|bottom| bottom <= self.height);
        if !fits_x || !fits_y {
            return Err(TextureError::InvalidBuffer(format!(
                "region {}x{} at ({}, {}) outside {}x{}",
                width, height, x, y, self.width, self.height
            )));
        }

        let offset = y as usize * self.stride + x as usize * self.format.bytes_per_pixel();
        PixelView::new(width, height, self.stride, self.format, &self.data[offset..])
    }

    /// Copy into an owned buffer keeping format and packing rows
    pub fn to_packed(&self) -> PixelBuffer {
        let mut data = Vec::with_capacity(self.packed_row_len() * self.height as usize);
        for row in self.rows() {
            data.extend_from_slice(row);
        }
        PixelBuffer::from_validated(self.width, self.height, self.format, data)
    }
}

/// Owned pixel rectangle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap packed pixel data
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let stride = width as usize * format.bytes_per_pixel();
        Self::with_stride(width, height, stride, format, data)
    }

    /// Wrap pixel data whose rows are `stride` bytes apart
    pub fn with_stride(
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self> {
        validate(width, height, stride, format, data.len())?;
        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    /// Packed buffer whose geometry comes from an already validated view
    pub(crate) fn from_validated(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * format.bytes_per_pixel()
        );
        Self {
            width,
            height,
            stride: width as usize * format.bytes_per_pixel(),
            format,
            data,
        }
    }

    /// Transparent black (or zeroed gray) buffer
    pub fn zeroed(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let bpp = format.bytes_per_pixel();
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(bpp))
            .ok_or_else(|| overflow(width, height, (width as usize).saturating_mul(bpp)))?;
        Self::new(width, height, format, vec![0; len])
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes from the start of one row to the next
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel encoding
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw bytes including any row padding
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Take the raw bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Borrow the whole buffer
    pub fn view(&self) -> PixelView<'_> {
        PixelView {
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: self.format,
            data: &self.data,
        }
    }

    /// Bytes of the pixel at (`x`, `y`)
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        self.view().pixel(x, y)
    }

    /// Take pixels from a decoded image
    ///
    /// Gray+alpha, RGB and RGBA images keep their encoding. Every other
    /// image type is converted to RGBA first.
    pub fn from_dynamic_image(image: DynamicImage) -> Result<Self> {
        let (width, height) = (image.width(), image.height());
        match image {
            DynamicImage::ImageLumaA8(img) => {
                Self::new(width, height, PixelFormat::GrayAlpha, img.into_raw())
            }
            DynamicImage::ImageRgb8(img) => Self::new(width, height, PixelFormat::Rgb, img.into_raw()),
            DynamicImage::ImageRgba8(img) => {
                Self::new(width, height, PixelFormat::Rgba, img.into_raw())
            }
            other => Self::new(width, height, PixelFormat::Rgba, other.into_rgba8().into_raw()),
        }
    }

    /// Copy into an `image` crate buffer in the same encoding
    pub fn to_dynamic_image(&self) -> Option<DynamicImage> {
        let packed = self.view().to_packed().into_data();
        match self.format {
            PixelFormat::GrayAlpha => {
                GrayAlphaImage::from_raw(self.width, self.height, packed).map(DynamicImage::from)
            }
            PixelFormat::Rgb => {
                RgbImage::from_raw(self.width, self.height, packed).map(DynamicImage::from)
            }
            PixelFormat::Rgba => {
                RgbaImage::from_raw(self.width, self.height, packed).map(DynamicImage::from)
            }
        }
    }

    /// Convert to a packed RGBA `image` crate buffer
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        let rgba = crate::texture::marshal::normalize_to_rgba(&self.view());
        RgbaImage::from_raw(rgba.width, rgba.height, rgba.data)
    }
}
