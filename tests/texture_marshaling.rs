use std::path::Path;
use std::rc::Rc;

use proptest::prelude::*;

use rayframe::config::WindowConfig;
use rayframe::native::pixel_formats::{
    UNCOMPRESSED_GRAY_ALPHA, UNCOMPRESSED_R5G6B5, UNCOMPRESSED_R8G8B8, UNCOMPRESSED_R8G8B8A8,
};
use rayframe::native::HeadlessBackend;
use rayframe::texture::{normalize_to_rgba, PixelBuffer, PixelFormat, PixelView, TextureError};
use rayframe::window::Window;

fn open() -> (Rc<HeadlessBackend>, Window<HeadlessBackend>) {
    let backend = Rc::new(HeadlessBackend::new());
    let window = Window::open(backend.clone(), &WindowConfig::default()).unwrap();
    (backend, window)
}

/// Distinct RGBA value for every pixel of a `width` wide image
fn pattern(width: u32, height: u32) -> Vec<u8> {
    (0..height)
        .flat_map(|y| (0..width).flat_map(move |x| [x as u8, y as u8, (x ^ y) as u8, 255]))
        .collect()
}

#[test]
fn test_rgba_round_trip() {
    let (backend, window) = open();
    let data = pattern(4, 4);
    let view = PixelView::packed(4, 4, PixelFormat::Rgba, &data).unwrap();

    let texture = window.load_texture_from_pixels(view).unwrap();
    assert_eq!((texture.width(), texture.height()), (4, 4));

    let read = texture.read().unwrap();
    assert_eq!(read.format(), PixelFormat::Rgba);
    assert_eq!(read.data(), &data[..]);
    assert_eq!(backend.live_images(), 0);
}

#[test]
fn test_sub_view_upload_uses_stride() {
    let (backend, window) = open();

    // 8x8 region in the middle of a 32 pixel wide source (stride 128 bytes)
    let source = pattern(32, 16);
    let full = PixelView::packed(32, 16, PixelFormat::Rgba, &source).unwrap();
    let region = full.sub_view(4, 2, 8, 8).unwrap();
    assert_eq!(region.stride(), 128);

    let texture = window.load_texture_from_pixels(region).unwrap();
    let stored = backend.texture(texture.id()).unwrap();

    let expected: Vec<u8> = region.rows().flatten().copied().collect();
    assert_eq!(stored.pixels, expected);
    assert_eq!(&stored.pixels[..4], &[4, 2, 6, 255]);

    // Copying width*height pixels from the region start would cross rows
    let start = 2 * 128 + 4 * 4;
    let naive = &source[start..start + 8 * 8 * 4];
    assert_ne!(stored.pixels.as_slice(), naive);
}

#[test]
fn test_upload_normalizes_gray_alpha() {
    let (backend, window) = open();
    let data = [10, 200, 20, 100];
    let view = PixelView::packed(2, 1, PixelFormat::GrayAlpha, &data).unwrap();

    let texture = window.load_texture_from_pixels(view).unwrap();
    let stored = backend.texture(texture.id()).unwrap();
    assert_eq!(stored.format, UNCOMPRESSED_R8G8B8A8);
    assert_eq!(stored.pixels, vec![10, 10, 10, 200, 20, 20, 20, 100]);
}

#[test]
fn test_read_expands_gray_alpha() {
    let (backend, window) = open();
    assert!(backend.register_texture_file(
        "gray.png",
        1,
        2,
        UNCOMPRESSED_GRAY_ALPHA,
        vec![7, 9, 250, 0]
    ));

    let texture = window.load_texture(Path::new("gray.png")).unwrap();
    assert_eq!(backend.texture(texture.id()).unwrap().format, UNCOMPRESSED_GRAY_ALPHA);

    let read = texture.read().unwrap();
    assert_eq!(read.format(), PixelFormat::Rgba);
    assert_eq!(read.data(), &[7, 7, 7, 9, 250, 250, 250, 0]);
    assert_eq!(backend.live_images(), 0);
}

#[test]
fn test_read_rgb_file() {
    let (backend, window) = open();
    assert!(backend.register_texture_file(
        "rgb.bmp",
        2,
        1,
        UNCOMPRESSED_R8G8B8,
        vec![1, 2, 3, 4, 5, 6]
    ));

    let texture = window.load_texture("rgb.bmp").unwrap();
    let read = texture.read().unwrap();
    assert_eq!(read.data(), &[1, 2, 3, 255, 4, 5, 6, 255]);
    assert_eq!(read.stride(), 8);
}

#[test]
fn test_unsupported_read_releases_image() {
    let (backend, window) = open();
    assert!(backend.register_texture_file("packed.png", 2, 2, UNCOMPRESSED_R5G6B5, vec![0; 8]));

    let texture = window.load_texture("packed.png").unwrap();
    assert_eq!(
        texture.read(),
        Err(TextureError::UnsupportedPixelFormat(UNCOMPRESSED_R5G6B5))
    );
    assert_eq!(backend.live_images(), 0);
    assert_eq!(backend.double_releases(), 0);
}

#[test]
fn test_missing_file() {
    let (_backend, window) = open();
    assert_eq!(
        window.load_texture("missing.png").unwrap_err(),
        TextureError::LoadFailed("missing.png".into())
    );
}

#[test]
fn test_release_and_drop_unload_once() {
    let (backend, window) = open();
    let data = pattern(2, 2);

    let first = window
        .load_texture_from_pixels(PixelView::packed(2, 2, PixelFormat::Rgba, &data).unwrap())
        .unwrap();
    let second = window
        .load_texture_from_pixels(PixelView::packed(2, 2, PixelFormat::Rgba, &data).unwrap())
        .unwrap();
    assert_eq!(backend.live_textures(), 2);

    first.release();
    assert_eq!(backend.live_textures(), 1);
    drop(second);
    assert_eq!(backend.live_textures(), 0);
    assert_eq!(backend.double_releases(), 0);
}

#[test]
fn test_texture_outlives_window() {
    let (backend, mut window) = open();
    let data = pattern(1, 1);
    let texture = window
        .load_texture_from_pixels(PixelView::packed(1, 1, PixelFormat::Rgba, &data).unwrap())
        .unwrap();

    window.close();
    drop(window);
    assert_eq!(backend.live_textures(), 0);

    // Freed with the context: no read-back and no second unload
    assert_eq!(texture.read(), Err(TextureError::ContextClosed));
    drop(texture);
    assert_eq!(backend.double_releases(), 0);
    assert_eq!(backend.live_images(), 0);
}

#[test]
fn test_resources_dropped_after_close_make_no_native_calls() {
    let (backend, mut window) = open();
    backend.register_font_file("mono.ttf");
    backend.register_shader_file("wave.fs");

    let data = pattern(2, 2);
    let texture = window
        .load_texture_from_pixels(PixelView::packed(2, 2, PixelFormat::Rgba, &data).unwrap())
        .unwrap();
    let font = window.load_font("mono.ttf").unwrap();
    let shader = window.load_shader(None, Some(Path::new("wave.fs"))).unwrap();
    assert_eq!(
        (backend.live_textures(), backend.live_fonts(), backend.live_shaders()),
        (1, 1, 1)
    );

    window.close();
    shader.enable().disable();
    drop((texture, font, shader));
    assert_eq!(backend.double_releases(), 0);
    assert_eq!(backend.active_shader(), None);
}

#[test]
fn test_short_file_never_reaches_read_back() {
    let (backend, window) = open();
    let registered = backend.register_texture_file(
        "short.png",
        2048,
        2048,
        UNCOMPRESSED_R8G8B8A8,
        vec![1, 2, 3, 4],
    );
    assert!(!registered);

    assert_eq!(
        window.load_texture("short.png").unwrap_err(),
        TextureError::LoadFailed("short.png".into())
    );
    assert_eq!(backend.live_textures(), 0);
}

#[test]
fn test_dynamic_image_upload() {
    let (backend, window) = open();
    let image = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        3,
        2,
        image::Rgb([9, 8, 7]),
    ));

    let buffer = PixelBuffer::from_dynamic_image(image).unwrap();
    assert_eq!(buffer.format(), PixelFormat::Rgb);

    let texture = window.load_texture_from_pixels(buffer.view()).unwrap();
    let stored = backend.texture(texture.id()).unwrap();
    assert_eq!(stored.pixels.len(), 3 * 2 * 4);
    assert_eq!(&stored.pixels[..4], &[9, 8, 7, 255]);
}

fn any_format() -> impl Strategy<Value = PixelFormat> {
    prop_oneof![
        Just(PixelFormat::GrayAlpha),
        Just(PixelFormat::Rgb),
        Just(PixelFormat::Rgba),
    ]
}

proptest! {
    #[test]
    fn prop_strided_upload_matches_rows(
        format in any_format(),
        width in 1u32..12,
        height in 1u32..12,
        padding in 0usize..16,
        seed in any::<u8>(),
    ) {
        let (backend, window) = open();
        let bpp = format.bytes_per_pixel();
        let stride = width as usize * bpp + padding;
        let data: Vec<u8> = (0..stride * height as usize)
            .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
            .collect();
        let view = PixelView::new(width, height, stride, format, &data).unwrap();

        let texture = window.load_texture_from_pixels(view).unwrap();
        let stored = backend.texture(texture.id()).unwrap();
        prop_assert_eq!(stored.format, UNCOMPRESSED_R8G8B8A8);

        let expected = normalize_to_rgba(&view);
        prop_assert_eq!(stored.pixels.as_slice(), expected.data());

        // Each stored row comes from the source row at y * stride, padding skipped
        let row_len = width as usize * 4;
        for y in 0..height {
            let start = y as usize * row_len;
            let source = &data[y as usize * stride..][..width as usize * bpp];
            let converted: Vec<u8> = source
                .chunks_exact(bpp)
                .flat_map(|px| format.to_rgba(px))
                .collect();
            prop_assert_eq!(&stored.pixels[start..start + row_len], converted.as_slice());
        }
    }
}
