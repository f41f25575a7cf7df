use clap::Subcommand;
use stillroom_core::{Benchmark, BreathPattern, CapacityProgression, Config};

#[derive(Subcommand)]
pub enum BreathAction {
    /// Effective pattern at a point in a session
    Pattern {
        /// Elapsed session time in seconds
        #[arg(long)]
        elapsed: f64,
        /// Total planned session duration in seconds (config default if omitted)
        #[arg(long)]
        total: Option<f64>,
        /// Benchmark maxima as inhale,hold_in,exhale,hold_out
        #[arg(long, value_delimiter = ',')]
        benchmark: Option<Vec<f64>>,
        /// Tempo for musical grid alignment
        #[arg(long)]
        bpm: Option<f64>,
    },
    /// The capacity multiplier over a whole session, at --step intervals
    Curve {
        /// Total planned session duration in seconds
        #[arg(long, default_value = "600")]
        total: f64,
        /// Sampling step in seconds
        #[arg(long, default_value = "30")]
        step: f64,
    },
}

pub fn run(action: BreathAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    match action {
        BreathAction::Pattern {
            elapsed,
            total,
            benchmark,
            bpm,
        } => {
            let benchmark = benchmark.map(|v| Benchmark::new(v[0], v[1], v[2], v[3]));
            let manual: BreathPattern = config.breath.pattern();
            let total = total.unwrap_or(config.session.planned_secs);
            let mut prog = CapacityProgression::new(benchmark, manual, total);
            if let Some(bpm) = bpm.or(config.breath.bpm) {
                prog = prog.with_bpm(bpm);
            }
            let effective = prog.effective_at(elapsed);
            println!("{}", serde_json::to_string_pretty(&effective)?);
        }
        BreathAction::Curve { total, step } => {
            let step = if step > 0.0 { step } else { 30.0 };
            let prog = CapacityProgression::new(None, config.breath.pattern(), total);
            let mut t = 0.0;
            while t <= total {
                let m = prog.effective_at(t).multiplier;
                println!("t={t:>8.1}  multiplier={m:.4}");
                t += step;
            }
        }
    }
    Ok(())
}
