// ml_examples/src/main.rs
use anyhow::Result;
use nann::{softmax, Fixed8, ModelConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = r#"{
    "seed": 42,
    "layers": [
        { "fan_in": 4, "fan_out": 8, "activation": "leaky_relu" },
        { "fan_in": 8, "fan_out": 8, "activation": "leaky_relu" },
        { "fan_in": 8, "fan_out": 3, "activation": "identity" }
    ]
}"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "ml_examples=info,nann=debug".into()),
        )
        .init();

    // Optional path to a JSON model config; a small classifier otherwise.
    let config = match std::env::args().nth(1) {
        Some(path) => ModelConfig::from_file(path)?,
        None => ModelConfig::from_json(DEFAULT_CONFIG)?,
    };
    let model = config.build_initialized()?;
    let (fan_in, fan_out) = model.shape();
    info!("{} (in {}, out {})", model, fan_in, fan_out);

    let samples = [
        vec![0.5, -1.0, 0.25, 2.0],
        vec![-0.5, 0.0, 1.5, -2.0],
        vec![1.0, 1.0, 1.0, 1.0],
    ];
    if samples.iter().all(|s| s.len() != fan_in) {
        warn!(fan_in, "no built-in sample matches the model input width");
    }
    let mut scratch = Vec::with_capacity(fan_out);
    let mut spare = Vec::with_capacity(fan_in);
    for sample in samples.iter().filter(|s| s.len() == fan_in) {
        let mut input = std::mem::take(&mut spare);
        input.clear();
        input.extend_from_slice(sample);
        let (mut out, rest) = model.forward_buffers(input, scratch);
        softmax(&mut out);
        info!(?sample, probabilities = ?out, "forward");
        scratch = out;
        spare = rest;
    }

    let packed: Vec<Fixed8> = model.biases().iter().map(|&b| Fixed8::from_f32(b * 64.0)).collect();
    info!("biases x64 as fixed8: {:?}", packed.iter().copied().map(Fixed8::to_f32).collect::<Vec<_>>());
    Ok(())
}
