use clap::Subcommand;
use stillroom_core::{BreathPattern, Event, PhaseDurations, PracticeSession};

#[derive(Subcommand)]
pub enum TempoAction {
    /// Simulate a tempo-synced session over a whole track
    Run {
        /// Track duration in seconds
        #[arg(long)]
        track: f64,
        /// Track tempo in beats per minute
        #[arg(long)]
        bpm: f64,
        /// Benchmark maxima as inhale,hold_in,exhale,hold_out
        #[arg(
            long,
            value_delimiter = ',',
            default_value = "10,5,10,5"
        )]
        benchmark: Vec<f64>,
        /// Audio clock update interval in seconds
        #[arg(long, default_value = "1")]
        step: f64,
    },
}

pub fn run(action: TempoAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TempoAction::Run {
            track,
            bpm,
            benchmark,
            step,
        } => {
            let maxima =
                BreathPattern::new(benchmark[0], benchmark[1], benchmark[2], benchmark[3]);
            let step = if step > 0.0 { step } else { 1.0 };
            let mut session =
                PracticeSession::tempo_synced(PhaseDurations::default(), track, bpm, maxima);
            for event in session.start() {
                println!("{}", serde_json::to_string(&event)?);
            }

            let steps = (track / step).ceil() as u64;
            for i in 0..=steps {
                let elapsed = i as f64 * step;
                for event in session.track_elapsed(elapsed) {
                    match &event {
                        Event::SegmentAdvanced {
                            segment_index,
                            cap,
                            segment_beat_total,
                            ..
                        } => {
                            println!(
                                "t={elapsed:>8.1}  segment {segment_index} cap {cap} \
                                 ({segment_beat_total} beats expected)"
                            );
                        }
                        Event::PatternUpdated { pattern, .. } => {
                            println!("t={elapsed:>8.1}  pattern {}", serde_json::to_string(pattern)?);
                        }
                        _ => {}
                    }
                }
                // One detected beat per elapsed second at 60 bpm equivalent.
                session.beat();
            }
            for event in session.stop() {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
    }
    Ok(())
}
