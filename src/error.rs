use thiserror::Error;

/// Failures while bringing up the model and its label list. Any of these
/// leaves the service in degraded mode instead of terminating the process.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read label file {path}: {source}")]
    Labels {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("label file {path} contains no labels")]
    EmptyLabels { path: String },

    #[error("failed to load model {path}: {source}")]
    Model {
        path: String,
        #[source]
        source: ort::Error,
    },
}

/// Per-request failures. Each request terminates normally from the
/// transport's perspective; the cause is reported in the response body.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to preprocess image: {0}")]
    Preprocess(String),

    #[error("inference failed: {0}")]
    Inference(#[from] ort::Error),

    #[error("model produced an empty score vector")]
    EmptyScores,

    #[error("model returned {scores} scores for {labels} labels")]
    ScoreMismatch { scores: usize, labels: usize },
}
