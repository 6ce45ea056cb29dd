use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Device preferences, persisted as one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    #[serde(default = "default_reminder_time")]
    pub reminder_time: NaiveTime,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_true")]
    pub haptics_enabled: bool,
    #[serde(default = "default_true")]
    pub dark_mode_enabled: bool,
}

fn default_true() -> bool {
    true
}

fn default_reminder_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            reminder_time: default_reminder_time(),
            sound_enabled: true,
            haptics_enabled: true,
            dark_mode_enabled: true,
        }
    }
}

/// A boolean preference that can be toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Notifications,
    Sound,
    Haptics,
    DarkMode,
}

impl std::str::FromStr for Toggle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "notifications" => Ok(Toggle::Notifications),
            "sound" => Ok(Toggle::Sound),
            "haptics" => Ok(Toggle::Haptics),
            "dark-mode" | "darkmode" => Ok(Toggle::DarkMode),
            other => Err(format!("unknown setting: {other}")),
        }
    }
}

impl AppSettings {
    /// Flip a preference and return its new value.
    pub fn toggle(&mut self, which: Toggle) -> bool {
        let flag = match which {
            Toggle::Notifications => &mut self.notifications_enabled,
            Toggle::Sound => &mut self.sound_enabled,
            Toggle::Haptics => &mut self.haptics_enabled,
            Toggle::DarkMode => &mut self.dark_mode_enabled,
        };
        *flag = !*flag;
        *flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_only_the_named_flag() {
        let mut s = AppSettings::default();
        assert!(!s.toggle(Toggle::Sound));
        assert!(!s.sound_enabled);
        assert!(s.notifications_enabled && s.haptics_enabled && s.dark_mode_enabled);
        assert!(s.toggle(Toggle::Sound));
    }

    #[test]
    fn reminder_defaults_to_nine() {
        let s: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(s.reminder_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert!(s.dark_mode_enabled);
    }

    #[test]
    fn toggle_names_parse() {
        assert_eq!("dark_mode".parse::<Toggle>().unwrap(), Toggle::DarkMode);
        assert!("volume".parse::<Toggle>().is_err());
    }
}
