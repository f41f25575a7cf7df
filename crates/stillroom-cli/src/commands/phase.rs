use clap::Subcommand;
use stillroom_core::{Event, PhaseDurations, PracticeSession};

#[derive(Subcommand)]
pub enum PhaseAction {
    /// Simulate the phase clock with synthetic timestamps
    Run {
        /// Fade-in duration in seconds
        #[arg(long, default_value = "2")]
        fade_in: f64,
        /// Display duration in seconds
        #[arg(long, default_value = "8")]
        display: f64,
        /// Fade-out duration in seconds
        #[arg(long, default_value = "2")]
        fade_out: f64,
        /// Void duration in seconds
        #[arg(long, default_value = "4")]
        void: f64,
        /// Seconds of session time to simulate
        #[arg(long, default_value = "32")]
        duration: f64,
        /// Tick interval in seconds
        #[arg(long, default_value = "0.25")]
        tick: f64,
    },
    /// Print the default phase durations as JSON
    Defaults,
}

pub fn run(action: PhaseAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PhaseAction::Run {
            fade_in,
            display,
            fade_out,
            void,
            duration,
            tick,
        } => {
            let durations = PhaseDurations::new(fade_in, display, fade_out, void);
            let tick = if tick > 0.0 { tick } else { 0.25 };
            let mut session = PracticeSession::visualization(durations);
            for event in session.start() {
                println!("{}", serde_json::to_string(&event)?);
            }

            let steps = (duration / tick).ceil() as u64;
            for i in 0..=steps {
                let now = i as f64 * tick;
                for event in session.tick(now) {
                    match &event {
                        Event::PhaseChanged {
                            new_phase,
                            old_phase,
                            ..
                        } => {
                            println!(
                                "t={now:>8.2}  {old_phase:?} -> {new_phase:?}"
                            );
                        }
                        Event::CycleCompleted { cycle, .. } => {
                            println!("t={now:>8.2}  cycle {cycle} complete");
                        }
                        _ => {}
                    }
                }
            }
            for event in session.stop() {
                println!("{}", serde_json::to_string(&event)?);
            }
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
        PhaseAction::Defaults => {
            let json = serde_json::to_string_pretty(&PhaseDurations::default())?;
            println!("{json}");
        }
    }
    Ok(())
}
