use fast_image_resize::images::Image;
use fast_image_resize::{IntoImageView, Resizer};
use image::DynamicImage;
use ndarray::Array4;

use crate::error::PredictError;

#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    pub mean: [f32; 3],
    pub std: [f32; 3],
    pub height: usize,
    pub width: usize,
}

impl Default for PreprocessConfig {
    // Maps 8-bit intensities to [-1, 1], the input range of the
    // EfficientNetV2 family.
    fn default() -> Self {
        Self {
            mean: [0.5, 0.5, 0.5],
            std: [0.5, 0.5, 0.5],
            height: 224,
            width: 224,
        }
    }
}

#[derive(Debug)]
pub struct Processor {
    pub config: PreprocessConfig,
}

impl Processor {
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    /// Preprocess a decoded image into the model input tensor:
    /// RGB, bicubic resize to height x width, normalized f32, NHWC with a
    /// leading batch dimension of 1.
    pub fn preprocess(&self, x: &DynamicImage) -> Result<Array4<f32>, PredictError> {
        let (height, width) = (self.config.height, self.config.width);
        let src = DynamicImage::ImageRgb8(x.to_rgb8());

        let mut dst_image = Image::new(
            width as u32,
            height as u32,
            src.pixel_type()
                .ok_or_else(|| PredictError::Preprocess("unsupported pixel format".to_string()))?,
        );

        // Resize source image into the destination buffer with a bicubic
        // (Catmull-Rom) convolution filter.
        let mut resizer = Resizer::new();
        let resize_options = fast_image_resize::ResizeOptions::new().resize_alg(
            fast_image_resize::ResizeAlg::Convolution(fast_image_resize::FilterType::CatmullRom),
        );
        resizer
            .resize(&src, &mut dst_image, Some(&resize_options))
            .map_err(|e| PredictError::Preprocess(e.to_string()))?;

        let resized: image::RgbImage =
            image::ImageBuffer::from_raw(dst_image.width(), dst_image.height(), dst_image.buffer().to_vec())
                .ok_or_else(|| PredictError::Preprocess("resize produced an invalid buffer".to_string()))?;

        let mut img_arr = Array4::<f32>::zeros((1, height, width, 3));
        // Populate the array with normalized pixel values
        for (i, rgb) in resized.pixels().enumerate() {
            let y = i / width;
            let x = i % width;
            img_arr[[0, y, x, 0]] = (rgb[0] as f32 / 255.0 - self.config.mean[0]) / self.config.std[0];
            img_arr[[0, y, x, 1]] = (rgb[1] as f32 / 255.0 - self.config.mean[1]) / self.config.std[1];
            img_arr[[0, y, x, 2]] = (rgb[2] as f32 / 255.0 - self.config.mean[2]) / self.config.std[2];
        }

        Ok(img_arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)))
    }

    #[test]
    fn output_shape_is_batched_hwc() {
        let processor = Processor::new(PreprocessConfig::default());
        let tensor = processor.preprocess(&solid_image(64, 48, [10, 20, 30])).unwrap();
        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
    }

    #[test]
    fn normalization_maps_extremes_to_unit_range() {
        let processor = Processor::new(PreprocessConfig::default());

        let white = processor.preprocess(&solid_image(32, 32, [255, 255, 255])).unwrap();
        for &v in white.iter() {
            assert!((v - 1.0).abs() < 1e-2, "expected ~1.0, got {v}");
        }

        let black = processor.preprocess(&solid_image(32, 32, [0, 0, 0])).unwrap();
        for &v in black.iter() {
            assert!((v + 1.0).abs() < 1e-2, "expected ~-1.0, got {v}");
        }
    }

    #[test]
    fn channels_keep_their_order() {
        let processor = Processor::new(PreprocessConfig::default());
        let tensor = processor.preprocess(&solid_image(32, 32, [255, 0, 0])).unwrap();
        assert!(tensor[[0, 100, 100, 0]] > 0.9);
        assert!(tensor[[0, 100, 100, 1]] < -0.9);
        assert!(tensor[[0, 100, 100, 2]] < -0.9);
    }

    #[test]
    fn preprocessing_is_deterministic() {
        let processor = Processor::new(PreprocessConfig::default());
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(50, 70, |x, y| {
            Rgb([(x * 5 % 256) as u8, (y * 3 % 256) as u8, ((x + y) % 256) as u8])
        }));
        let a = processor.preprocess(&img).unwrap();
        let b = processor.preprocess(&img).unwrap();
        assert_eq!(a, b);
    }
}
