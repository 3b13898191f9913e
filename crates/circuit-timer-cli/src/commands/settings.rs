use circuit_timer_core::{AdjustField, Settings, SettingsStore};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Get a settings value
    Get {
        /// Settings key (e.g. "workTime", "circuits")
        key: String,
    },
    /// Set a settings value
    Set {
        /// Settings key
        key: String,
        /// New value
        value: String,
    },
    /// Step a duration or count, clamped to its allowed range
    Adjust {
        /// work, rest, sets or circuits
        field: AdjustField,
        /// Amount to add (negative to subtract)
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// List all settings
    List,
    /// Reset settings to defaults
    Reset,
    /// Print the settings file location
    Path,
}

pub async fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SettingsStore::open_default()?;
    match action {
        SettingsAction::Get { key } => {
            let settings = store.load_or_default();
            match settings.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        SettingsAction::Set { key, value } => {
            let mut settings = store.load_or_default();
            settings.set(&key, &value)?;
            super::save(&store, &mut settings).await?;
            println!("ok");
        }
        SettingsAction::Adjust { field, delta } => {
            let mut settings = store.load_or_default();
            let value = settings.adjust(field, delta);
            super::save(&store, &mut settings).await?;
            println!("{value}");
        }
        SettingsAction::List => {
            let settings = store.load_or_default();
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsAction::Reset => {
            let mut settings = Settings::default();
            super::save(&store, &mut settings).await?;
            println!("settings reset to defaults");
        }
        SettingsAction::Path => {
            println!("{}", store.path().display());
        }
    }
    Ok(())
}
