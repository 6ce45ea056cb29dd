use chrono::NaiveTime;
use clap::Subcommand;
use vitaharmony_core::profile::{ProfileStore, Toggle};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print all settings
    Show,
    /// Flip a preference: notifications, sound, haptics, dark-mode
    Toggle { name: Toggle },
    /// Set the daily reminder time (HH:MM)
    Reminder { time: String },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = ProfileStore::load(super::open_store()?);
    match action {
        SettingsAction::Show => super::print_json(store.settings())?,
        SettingsAction::Toggle { name } => {
            let value = store.toggle(name);
            println!("{}", if value { "on" } else { "off" });
        }
        SettingsAction::Reminder { time } => {
            let time = NaiveTime::parse_from_str(&time, "%H:%M")
                .map_err(|e| format!("invalid time '{time}': {e}"))?;
            store.set_reminder_time(time);
            println!("reminder set for {}", time.format("%H:%M"));
        }
    }
    Ok(())
}
