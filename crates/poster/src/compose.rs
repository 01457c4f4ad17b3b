use std::path::PathBuf;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use tracing::debug;

use crate::output::sanitize_filename;
use crate::{PosterError, PosterRecord};

/// Width backdrops are scaled to before encoding.
const FRAME_WIDTH: u32 = 1500;
const JPEG_QUALITY: u8 = 95;

/// Writes one poster artifact per record.
pub trait PosterComposer: Send + Sync {
    fn compose(&self, record: &PosterRecord) -> Result<PathBuf, PosterError>;
}

/// Scales the backdrop into the frame and writes a JPEG named after the
/// item. Text and badge layout live behind this boundary, not in it.
pub struct JpegComposer {
    output_dir: PathBuf,
}

impl JpegComposer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl PosterComposer for JpegComposer {
    fn compose(&self, record: &PosterRecord) -> Result<PathBuf, PosterError> {
        let backdrop = image::load_from_memory(&record.backdrop)
            .map_err(|e| PosterError::Image(e.to_string()))?;

        let scale = FRAME_WIDTH as f32 / backdrop.width().max(1) as f32;
        let height = ((backdrop.height() as f32 * scale).round() as u32).max(1);
        let frame = backdrop.resize_exact(FRAME_WIDTH, height, FilterType::Lanczos3);

        let path = self
            .output_dir
            .join(format!("{}.jpg", sanitize_filename(&record.title)));
        debug!(file = %path.display(), width = FRAME_WIDTH, height, "writing poster");

        let mut out = std::fs::File::create(&path)?;
        let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
        encoder
            .encode_image(&frame.to_rgb8())
            .map_err(|e| PosterError::Image(e.to_string()))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use marquee_ratings::ResolvedRating;

    use super::*;

    fn record_with_backdrop(backdrop: Vec<u8>) -> PosterRecord {
        PosterRecord {
            title: "Test: Item".into(),
            year: Some("2020".into()),
            genres: vec!["Action".into()],
            overview: "A story.".into(),
            backdrop,
            logo_path: "/logo.png".into(),
            cast: vec!["Someone".into()],
            directors: vec!["A Director".into()],
            length_label: "2h0min".into(),
            rating: ResolvedRating::none(),
            native_score: 72,
        }
    }

    #[test]
    fn garbage_backdrop_bytes_fail_cleanly() {
        let composer = JpegComposer::new(std::env::temp_dir());
        let err = composer
            .compose(&record_with_backdrop(vec![0, 1, 2, 3]))
            .unwrap_err();
        assert!(matches!(err, PosterError::Image(_)));
    }

    #[test]
    fn poster_is_written_under_the_sanitized_name() {
        let dir = std::env::temp_dir().join("marquee-compose-test");
        std::fs::create_dir_all(&dir).unwrap();

        let mut png = Vec::new();
        image::RgbImage::from_pixel(4, 2, image::Rgb([10, 20, 30]))
            .write_to(
                &mut std::io::Cursor::new(&mut png),
                image::ImageFormat::Png,
            )
            .unwrap();

        let composer = JpegComposer::new(&dir);
        let path = composer.compose(&record_with_backdrop(png)).unwrap();
        assert_eq!(path.file_name().unwrap(), "Test__Item.jpg");
        assert!(path.exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
