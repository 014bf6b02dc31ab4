use std::path::PathBuf;
use std::process;

use clap::Parser;

use facebox_core::detection::domain::face_model::FaceModel;
use facebox_core::detection::infrastructure::onnx_yunet_model::OnnxYunetModel;
use facebox_core::loader::native_loader;
use facebox_core::pipeline::detect_faces_use_case::DetectFacesUseCase;
use facebox_core::pipeline::runtime_resolver::RuntimeResolver;
use facebox_core::shared::constants::{
    DEFAULT_CONFIDENCE, RUNTIME_LIB_STEM, RUNTIME_NAMESPACE,
};

/// Face detection for images, using a bundled native inference runtime.
#[derive(Parser)]
#[command(name = "facebox")]
struct Cli {
    /// Input image file.
    #[arg(long)]
    input: PathBuf,

    /// Face detection ONNX model file.
    #[arg(long)]
    model: PathBuf,

    /// Packaged archive holding the platform-specific runtime libraries.
    #[arg(long)]
    archive: PathBuf,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// Archive directory namespace holding the runtime libraries.
    #[arg(long, default_value = RUNTIME_NAMESPACE)]
    lib_namespace: String,

    /// File-name stem of the runtime library inside the archive.
    #[arg(long, default_value = RUNTIME_LIB_STEM)]
    lib_stem: String,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let model = build_model(&cli)?;
    let mut use_case = DetectFacesUseCase::new(model);
    let (output, detections) = use_case.execute(&cli.input)?;

    log::info!(
        "{} faces written to {}",
        detections.len(),
        output.display()
    );
    Ok(())
}

/// Resolves, verifies, and loads the native runtime, then builds the
/// inference model on top of it.
fn build_model(cli: &Cli) -> Result<Box<dyn FaceModel>, Box<dyn std::error::Error>> {
    let resolver = RuntimeResolver::new(&cli.archive, &cli.lib_namespace, &cli.lib_stem);
    let resolved = resolver.resolve()?;
    if resolved.extracted {
        log::info!("extracted runtime to {}", resolved.path.display());
    }

    let runtime = native_loader::load_once(&resolved.path)?;

    let model = OnnxYunetModel::new(runtime, &cli.model, cli.confidence)?;
    Ok(Box::new(model))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !cli.model.exists() {
        return Err(format!("Model file not found: {}", cli.model.display()).into());
    }
    if !cli.archive.exists() {
        return Err(format!("Archive not found: {}", cli.archive.display()).into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    Ok(())
}
