use clap::Subcommand;
use stillroom_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the active configuration as JSON
    Show,
    /// Write a default config file to the standard location
    Init,
    /// Print the config file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load();
            config.validate()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Init => {
            let config = Config::default();
            config.save()?;
            println!("config written to {}", Config::default_path()?.display());
        }
        ConfigAction::Path => {
            println!("{}", Config::default_path()?.display());
        }
    }
    Ok(())
}
