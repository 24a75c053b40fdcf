//! Image model and the plain-text pixel format it loads from and saves to.
//!
//! The on-disk format is a line-oriented PPM variant: a `P3` type tag, a
//! free-form description line, `<width> <height>`, the sample depth, then
//! one R, one G, and one B value per line for every pixel in row-major
//! order. Only RGB-tagged images can be serialized.

use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};
use crate::file_io;
use crate::pixel::{ColorSpace, PixelRgb, PixelYuv};

/// Type tag of the supported text pixel format.
pub const PPM_MAGIC: &str = "P3";

const PPM_EXTENSION: &str = "ppm";

/// Pixel storage; the variant doubles as the image's color-space tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Pixels {
    Rgb(Vec<PixelRgb>),
    Yuv(Vec<PixelYuv>),
}

impl Pixels {
    pub fn len(&self) -> usize {
        match self {
            Self::Rgb(pixels) => pixels.len(),
            Self::Yuv(pixels) => pixels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn color_space(&self) -> ColorSpace {
        match self {
            Self::Rgb(_) => ColorSpace::Rgb,
            Self::Yuv(_) => ColorSpace::Yuv,
        }
    }
}

/// A width x height raster of pixels in one of the two color spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    pub depth: u16,
    pub description: String,
    pub pixels: Pixels,
}

impl Image {
    pub fn new(
        width: usize,
        height: usize,
        depth: u16,
        description: String,
        pixels: Pixels,
    ) -> Self {
        Self {
            width,
            height,
            depth,
            description,
            pixels,
        }
    }

    pub fn color_space(&self) -> ColorSpace {
        self.pixels.color_space()
    }

    /// Loads a text pixel file. Returns `Ok(None)` when the path does not
    /// exist; a recognized but malformed file is an error.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        if !extension.eq_ignore_ascii_case(PPM_EXTENSION) {
            return Err(PipelineError::UnsupportedFormat(extension.to_string()));
        }
        match file_io::read_trimmed_lines(path)? {
            None => Ok(None),
            Some(lines) => Self::parse_ppm(&lines).map(Some),
        }
    }

    /// Serializes to `path`, normalizing the `.ppm` extension. The image
    /// must be RGB-tagged and its pixel count must match its dimensions.
    pub fn save(&self, path: &Path) -> Result<PathBuf> {
        let data = self.to_ppm()?;
        Ok(file_io::write_text(&data, path, Some(PPM_EXTENSION))?)
    }

    /// Converts the pixel grid in place; a no-op when already in `target`.
    pub fn convert_color_space(&mut self, target: ColorSpace) {
        match (&self.pixels, target) {
            (Pixels::Rgb(pixels), ColorSpace::Yuv) => {
                self.pixels = Pixels::Yuv(pixels.iter().map(|p| p.to_yuv()).collect());
            }
            (Pixels::Yuv(pixels), ColorSpace::Rgb) => {
                self.pixels = Pixels::Rgb(pixels.iter().map(|p| p.to_rgb()).collect());
            }
            _ => {}
        }
    }

    pub(crate) fn parse_ppm(lines: &[String]) -> Result<Self> {
        if lines.len() < 4 {
            return Err(PipelineError::MalformedFile(
                "truncated header".to_string(),
            ));
        }
        if lines[0] != PPM_MAGIC {
            return Err(PipelineError::MalformedFile(format!(
                "unexpected type tag {:?}",
                lines[0]
            )));
        }
        let description = lines[1].clone();

        let dimensions: Vec<&str> = lines[2].split_whitespace().collect();
        let [width, height] = dimensions.as_slice() else {
            return Err(PipelineError::MalformedFile(format!(
                "bad dimension line {:?}",
                lines[2]
            )));
        };
        let width: usize = width
            .parse()
            .map_err(|_| PipelineError::MalformedFile(format!("bad width {width:?}")))?;
        let height: usize = height
            .parse()
            .map_err(|_| PipelineError::MalformedFile(format!("bad height {height:?}")))?;
        let depth: u16 = lines[3]
            .parse()
            .map_err(|_| PipelineError::MalformedFile(format!("bad depth {:?}", lines[3])))?;

        let mut values = Vec::with_capacity(width * height * 3);
        for token in lines[4..].iter().flat_map(|line| line.split_whitespace()) {
            let value: u8 = token
                .parse()
                .map_err(|_| PipelineError::MalformedFile(format!("bad sample {token:?}")))?;
            values.push(value);
        }
        if values.len() != width * height * 3 {
            return Err(PipelineError::MalformedFile(format!(
                "expected {} samples, found {}",
                width * height * 3,
                values.len()
            )));
        }

        let pixels = values
            .chunks_exact(3)
            .map(|rgb| PixelRgb::new(rgb[0], rgb[1], rgb[2]))
            .collect();
        Ok(Self::new(
            width,
            height,
            depth,
            description,
            Pixels::Rgb(pixels),
        ))
    }

    pub(crate) fn to_ppm(&self) -> Result<String> {
        if self.pixels.len() != self.width * self.height {
            return Err(PipelineError::SizeMismatch {
                width: self.width,
                height: self.height,
                actual: self.pixels.len(),
            });
        }
        let Pixels::Rgb(pixels) = &self.pixels else {
            return Err(PipelineError::PixelFormatMismatch {
                expected: ColorSpace::Rgb,
                found: self.color_space(),
            });
        };

        let mut out = String::with_capacity(pixels.len() * 12 + 64);
        out.push_str(PPM_MAGIC);
        out.push('\n');
        out.push_str(&self.description);
        out.push('\n');
        out.push_str(&format!("{} {}\n", self.width, self.height));
        out.push_str(&format!("{}\n", self.depth));
        for pixel in pixels {
            out.push_str(&format!("{}\n{}\n{}\n", pixel.r, pixel.g, pixel.b));
        }
        Ok(out)
    }
}

impl std::fmt::Display for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} image, {} x {}, {} actual pixels",
            self.color_space(),
            self.width,
            self.height,
            self.pixels.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_DEPTH;

    fn sample_image() -> Image {
        let pixels = vec![
            PixelRgb::new(255, 0, 0),
            PixelRgb::new(0, 255, 0),
            PixelRgb::new(0, 0, 255),
            PixelRgb::new(128, 128, 128),
        ];
        Image::new(
            2,
            2,
            DEFAULT_DEPTH,
            "# test image".to_string(),
            Pixels::Rgb(pixels),
        )
    }

    #[test]
    fn test_ppm_serialize_parse_roundtrip() {
        let image = sample_image();
        let text = image.to_ppm().unwrap();
        let lines: Vec<String> = text.lines().map(|l| l.to_string()).collect();
        let parsed = Image::parse_ppm(&lines).unwrap();
        assert_eq!(parsed, image);
    }

    #[test]
    fn test_save_rejects_size_mismatch() {
        let mut image = sample_image();
        image.height = 3;
        let err = image.to_ppm().unwrap_err();
        assert_eq!(
            err,
            PipelineError::SizeMismatch {
                width: 2,
                height: 3,
                actual: 4,
            }
        );
    }

    #[test]
    fn test_save_rejects_yuv_pixels() {
        let mut image = sample_image();
        image.convert_color_space(ColorSpace::Yuv);
        let err = image.to_ppm().unwrap_err();
        assert_eq!(
            err,
            PipelineError::PixelFormatMismatch {
                expected: ColorSpace::Rgb,
                found: ColorSpace::Yuv,
            }
        );
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let err = Image::load(Path::new("image.bmp")).unwrap_err();
        assert_eq!(err, PipelineError::UnsupportedFormat("bmp".to_string()));
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let missing = Path::new("no/such/directory/input.ppm");
        assert_eq!(Image::load(missing).unwrap(), None);
    }

    #[test]
    fn test_parse_rejects_bad_sample() {
        let image = sample_image();
        let mut lines: Vec<String> = image.to_ppm().unwrap().lines().map(String::from).collect();
        lines[5] = "300".to_string();
        assert!(matches!(
            Image::parse_ppm(&lines),
            Err(PipelineError::MalformedFile(_))
        ));
    }

    #[test]
    fn test_convert_color_space_roundtrip() {
        let original = sample_image();
        let mut image = original.clone();
        image.convert_color_space(ColorSpace::Yuv);
        assert_eq!(image.color_space(), ColorSpace::Yuv);
        image.convert_color_space(ColorSpace::Rgb);
        for (a, b) in match (&original.pixels, &image.pixels) {
            (Pixels::Rgb(a), Pixels::Rgb(b)) => a.iter().zip(b.iter()),
            _ => panic!("expected RGB pixels"),
        } {
            assert!((a.r as i32 - b.r as i32).abs() <= 1);
            assert!((a.g as i32 - b.g as i32).abs() <= 1);
            assert!((a.b as i32 - b.b as i32).abs() <= 1);
        }
    }
}
