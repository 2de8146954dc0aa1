use image::DynamicImage;
use ndarray::CowArray;
use tokio::sync::Mutex;

use crate::cli::Args;
use crate::error::{LoadError, PredictError};
use crate::labels::load_labels;
use crate::model::load_session;
use crate::postprocess::Prediction;
use crate::preprocess::{PreprocessConfig, Processor};

/// The classifier behind the HTTP surface: one model session, one label
/// list, one preprocessor, constructed at startup and immutable afterwards.
///
/// The session is behind a mutex so concurrent requests take turns invoking
/// the interpreter.
pub struct ClassifierService {
    session: Mutex<ort::session::Session>,
    labels: Vec<String>,
    processor: Processor,
}

impl ClassifierService {
    /// Loads the label list and the model artifact from the configured
    /// paths. Either failure leaves the caller responsible for running in
    /// degraded mode.
    pub fn load(args: &Args) -> Result<Self, LoadError> {
        let labels = load_labels(&args.labels)?;
        let session = load_session(&args.model, args.cuda).map_err(|source| LoadError::Model {
            path: args.model.clone(),
            source,
        })?;
        Ok(Self {
            session: Mutex::new(session),
            labels,
            processor: Processor::new(PreprocessConfig::default()),
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Classifies one uploaded image: decode, preprocess, invoke, argmax.
    pub async fn classify(&self, image_bytes: &[u8]) -> Result<Prediction, PredictError> {
        let image = decode_image(image_bytes)?;
        let tensor = self.processor.preprocess(&image)?;

        let tensor = CowArray::from(tensor.into_dyn());
        let input = ort::value::TensorRef::from_array_view(&tensor)?;
        let input_data = ort::inputs![input];

        let mut session = self.session.lock().await;
        let outputs = session.run(input_data)?;
        let (_name, value) = outputs.iter().next().ok_or(PredictError::EmptyScores)?;
        let (_shape, scores) = value.try_extract_tensor::<f32>()?;
        let raw_scores: Vec<f32> = scores.iter().copied().collect();

        Prediction::from_scores(raw_scores, &self.labels)
    }
}

/// Decode uploaded bytes into an image, any encoding the image crate knows.
pub fn decode_image(image_bytes: &[u8]) -> Result<DynamicImage, PredictError> {
    Ok(image::load_from_memory(image_bytes)?)
}
