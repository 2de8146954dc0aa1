use clap::Parser;


#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// ONNX model path
    #[arg(long, default_value = "model.onnx")]
    pub model: String,

    /// label list path, one class name per line
    #[arg(long, default_value = "labels.txt")]
    pub labels: String,

    /// bind address
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// bind port
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// run inference on the CUDA execution provider
    #[arg(long, default_value_t = false)]
    pub cuda: bool,
}
