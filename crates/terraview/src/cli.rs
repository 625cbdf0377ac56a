//! Command-line surface for the terrain preview.

use clap::Parser;
use thiserror::Error;

/// Parsed `WIDTHxHEIGHT` window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizeSpecError {
    #[error("expected WIDTHxHEIGHT, found no 'x' separator in '{0}'")]
    MissingSeparator(String),
    #[error("invalid width in '{0}'")]
    InvalidWidth(String),
    #[error("invalid height in '{0}'")]
    InvalidHeight(String),
    #[error("window dimensions must be non-zero, found '{0}'")]
    ZeroDimension(String),
}

pub fn parse_surface_size(spec: &str) -> Result<SurfaceSize, SizeSpecError> {
    let (width, height) = spec
        .split_once(['x', 'X'])
        .ok_or_else(|| SizeSpecError::MissingSeparator(spec.to_string()))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| SizeSpecError::InvalidWidth(spec.to_string()))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| SizeSpecError::InvalidHeight(spec.to_string()))?;
    if width == 0 || height == 0 {
        return Err(SizeSpecError::ZeroDimension(spec.to_string()));
    }
    Ok(SurfaceSize { width, height })
}

#[derive(Debug, Parser)]
#[command(name = "terraview", about = "Windowed procedural terrain preview", version)]
pub struct Args {
    /// Window size as WIDTHxHEIGHT.
    #[arg(long, default_value = "1024x768", value_parser = parse_surface_size)]
    pub size: SurfaceSize,

    /// Optional frames-per-second cap; uncapped renders at the display
    /// rate.
    #[arg(long)]
    pub fps: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_well_formed_sizes() {
        assert_eq!(
            parse_surface_size("1024x768"),
            Ok(SurfaceSize {
                width: 1024,
                height: 768
            })
        );
        assert_eq!(
            parse_surface_size("640X480"),
            Ok(SurfaceSize {
                width: 640,
                height: 480
            })
        );
        assert_eq!(
            parse_surface_size(" 800 x 600 "),
            Ok(SurfaceSize {
                width: 800,
                height: 600
            })
        );
    }

    #[test]
    fn rejects_malformed_sizes() {
        assert!(matches!(
            parse_surface_size("1024"),
            Err(SizeSpecError::MissingSeparator(_))
        ));
        assert!(matches!(
            parse_surface_size("ax768"),
            Err(SizeSpecError::InvalidWidth(_))
        ));
        assert!(matches!(
            parse_surface_size("1024xb"),
            Err(SizeSpecError::InvalidHeight(_))
        ));
        assert!(matches!(
            parse_surface_size("0x768"),
            Err(SizeSpecError::ZeroDimension(_))
        ));
        assert!(matches!(
            parse_surface_size("1024x0"),
            Err(SizeSpecError::ZeroDimension(_))
        ));
    }

    #[test]
    fn default_size_is_1024x768() {
        let args = Args::parse_from(["terraview"]);
        assert_eq!(
            args.size,
            SurfaceSize {
                width: 1024,
                height: 768
            }
        );
        assert_eq!(args.fps, None);
    }
}
