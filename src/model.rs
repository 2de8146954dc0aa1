use ort::ep::{CPU, CUDA};
use ort::session::Session;
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};

/// Builds an inference session for the model artifact at `model_path`.
/// CUDA is opt-in; the CPU provider is the default.
pub fn load_session(model_path: &str, cuda: bool) -> Result<Session, ort::Error> {
    let provider = if cuda {
        [CUDA::default().build().error_on_failure()]
    } else {
        [CPU::default().build()]
    };
    let session = SessionBuilder::new()?
        .with_execution_providers(provider)?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .commit_from_file(model_path)?;
    Ok(session)
}
