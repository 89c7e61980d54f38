//! User-Friendly Error Formatting
//!
//! Turns an `anyhow` chain from the demo binary into a boxed message with
//! troubleshooting hints for the failure category.

use std::fmt::Write;

use crate::resources::ResourceError;
use crate::texture::TextureError;
use crate::window::WindowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Config,
    Texture,
    Resource,
    Window,
    Generic,
}

fn categorize(error: &anyhow::Error) -> Category {
    for cause in error.chain() {
        if cause.is::<WindowError>() {
            return Category::Window;
        }
        if cause.is::<TextureError>() {
            return Category::Texture;
        }
        if cause.is::<ResourceError>() {
            return Category::Resource;
        }
        if cause.is::<toml::de::Error>() {
            return Category::Config;
        }
    }

    let message = format!("{error:#}").to_lowercase();
    if message.contains("config") {
        Category::Config
    } else if message.contains("texture") || message.contains("image") {
        Category::Texture
    } else if message.contains("font") || message.contains("shader") {
        Category::Resource
    } else if message.contains("window") || message.contains("display") {
        Category::Window
    } else {
        Category::Generic
    }
}

/// Format error for user consumption
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut output = String::new();

    writeln!(output).ok();
    writeln!(
        output,
        "╔════════════════════════════════════════════════════════════╗"
    )
    .ok();
    writeln!(
        output,
        "║                     ERROR                                  ║"
    )
    .ok();
    writeln!(
        output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();
    writeln!(output).ok();

    match categorize(error) {
        Category::Config => format_config_error(&mut output),
        Category::Texture => format_texture_error(&mut output),
        Category::Resource => format_resource_error(&mut output),
        Category::Window => format_window_error(&mut output),
        Category::Generic => format_generic_error(&mut output, &error.to_string()),
    }

    writeln!(output).ok();
    writeln!(
        output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(output, "Technical Details:").ok();
    writeln!(output).ok();
    writeln!(output, "{error:#}").ok();
    writeln!(output).ok();

    writeln!(
        output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(output, "Need Help?").ok();
    writeln!(
        output,
        "  - Run with --verbose for detailed logs: rayframe-demo -vvv"
    )
    .ok();
    writeln!(
        output,
        "  - Write logs to a file: rayframe-demo --log-file rayframe.log"
    )
    .ok();
    writeln!(
        output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();

    output
}

fn format_config_error(output: &mut String) {
    writeln!(output, "Configuration Error").ok();
    writeln!(output).ok();
    writeln!(output, "Problem with the configuration file.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. File not found").ok();
    writeln!(output, "     → Pass an existing file: rayframe-demo -c rayframe.toml").ok();
    writeln!(output, "     → Omit --config to run with defaults").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Invalid TOML syntax").ok();
    writeln!(output, "     → Check for typos and missing quotes").ok();
    writeln!(output).ok();
    writeln!(output, "  3. Out-of-range values").ok();
    writeln!(output, "     → window.width and window.height must be positive").ok();
    writeln!(output, "     → input.key_scan_limit must be within 1..=512").ok();
    writeln!(
        output,
        "     → logging.format must be pretty, compact or json"
    )
    .ok();
}

fn format_texture_error(output: &mut String) {
    writeln!(output, "Texture Error").ok();
    writeln!(output).ok();
    writeln!(output, "Could not create or read back a texture.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Image file missing or unreadable").ok();
    writeln!(output, "     → Check the path given to --texture").ok();
    writeln!(output, "     → Supported: PNG, BMP, JPEG (as built into raylib)").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Unsupported pixel format on read-back").ok();
    writeln!(
        output,
        "     → Only gray+alpha, RGB and RGBA 8-bit textures can be read"
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  3. No GPU context").ok();
    writeln!(output, "     → Textures can only be created after the window opens").ok();
}

fn format_resource_error(output: &mut String) {
    writeln!(output, "Font or Shader Error").ok();
    writeln!(output).ok();
    writeln!(output, "Could not load a font or compile a shader.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. File not found").ok();
    writeln!(output, "     → Paths are relative to the working directory").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Shader compile error").ok();
    writeln!(output, "     → Run with -vvv to see the GL compiler log").ok();
    writeln!(output, "     → Check the GLSL version matches the GL context").ok();
}

fn format_window_error(output: &mut String) {
    writeln!(output, "Window Error").ok();
    writeln!(output).ok();
    writeln!(output, "Could not open the window or its GL context.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. No display available").ok();
    writeln!(output, "     → Check: echo $DISPLAY $WAYLAND_DISPLAY").ok();
    writeln!(output).ok();
    writeln!(output, "  2. OpenGL 3.3 not supported").ok();
    writeln!(output, "     → Update graphics drivers").ok();
    writeln!(output).ok();
    writeln!(output, "  3. Invalid window size or title").ok();
    writeln!(output, "     → Width and height must be positive").ok();
    writeln!(output, "     → The title must not contain NUL bytes").ok();
}

fn format_generic_error(output: &mut String, error: &str) {
    writeln!(output, "Runtime Error").ok();
    writeln!(output).ok();
    writeln!(output, "An error occurred while running the demo.").ok();
    writeln!(output).ok();
    writeln!(output, "Error: {error}").ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_window_error_formatting() {
        let error = anyhow::Error::new(WindowError::OpenFailed {
            width: 800,
            height: 600,
            title: "demo".to_string(),
        });
        let formatted = format_user_error(&error);
        assert!(formatted.contains("ERROR"));
        assert!(formatted.contains("Window Error"));
        assert!(formatted.contains("800x600"));
    }

    #[test]
    fn test_texture_error_through_context() {
        let result: Result<(), TextureError> =
            Err(TextureError::UnsupportedPixelFormat(3));
        let error = result.context("Reading back demo texture").unwrap_err();
        assert_eq!(categorize(&error), Category::Texture);
    }

    #[test]
    fn test_config_by_message() {
        let error = anyhow::anyhow!("Failed to read config file: demo.toml");
        assert_eq!(categorize(&error), Category::Config);
        assert!(format_user_error(&error).contains("Configuration Error"));
    }

    #[test]
    fn test_generic() {
        let error = anyhow::anyhow!("something odd");
        let formatted = format_user_error(&error);
        assert!(formatted.contains("Runtime Error"));
        assert!(formatted.contains("something odd"));
    }
}
