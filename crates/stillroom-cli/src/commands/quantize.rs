use clap::Args;
use stillroom_core::{grid_secs, quantize};

#[derive(Args)]
pub struct QuantizeArgs {
    /// Duration in seconds to quantize
    #[arg(long)]
    pub duration: f64,
    /// Tempo in beats per minute
    #[arg(long)]
    pub bpm: f64,
}

pub fn run(args: QuantizeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let quantized = quantize(args.duration, args.bpm);
    let json = serde_json::json!({
        "duration_secs": args.duration,
        "bpm": args.bpm,
        "grid_secs": grid_secs(args.bpm),
        "quantized_secs": quantized,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
