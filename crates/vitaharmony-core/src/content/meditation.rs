use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeditationCategory {
    Breathwork,
    #[serde(rename = "Body Awareness")]
    BodyAwareness,
    Mindfulness,
    Visualization,
    #[serde(rename = "Stress Relief")]
    StressRelief,
    Sleep,
    Focus,
}

impl MeditationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeditationCategory::Breathwork => "Breathwork",
            MeditationCategory::BodyAwareness => "Body Awareness",
            MeditationCategory::Mindfulness => "Mindfulness",
            MeditationCategory::Visualization => "Visualization",
            MeditationCategory::StressRelief => "Stress Relief",
            MeditationCategory::Sleep => "Sleep",
            MeditationCategory::Focus => "Focus",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MeditationDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl MeditationDifficulty {
    pub fn harder(self) -> Self {
        match self {
            MeditationDifficulty::Beginner => MeditationDifficulty::Intermediate,
            _ => MeditationDifficulty::Advanced,
        }
    }

    pub fn easier(self) -> Self {
        match self {
            MeditationDifficulty::Advanced => MeditationDifficulty::Intermediate,
            _ => MeditationDifficulty::Beginner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackgroundSound {
    None,
    #[serde(rename = "Ocean Waves")]
    Ocean,
    Rain,
    Forest,
    #[serde(rename = "Tibetan Bells")]
    Bells,
    #[serde(rename = "Singing Bowls")]
    Singing,
    #[serde(rename = "White Noise")]
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionType {
    #[serde(rename = "Breathe In")]
    BreathIn,
    #[serde(rename = "Breathe Out")]
    BreathOut,
    Hold,
    Focus,
    Release,
    Visualize,
}

/// Breathing animation phase driven by interactive instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreathingPhase {
    #[default]
    Neutral,
    BreathIn,
    Hold,
    BreathOut,
}

impl From<Option<InteractionType>> for BreathingPhase {
    fn from(interaction: Option<InteractionType>) -> Self {
        match interaction {
            Some(InteractionType::BreathIn) => BreathingPhase::BreathIn,
            Some(InteractionType::BreathOut) => BreathingPhase::BreathOut,
            Some(InteractionType::Hold) => BreathingPhase::Hold,
            _ => BreathingPhase::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeditationInstruction {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Seconds from session start.
    pub timestamp: u32,
    pub text: String,
    #[serde(default)]
    pub is_interactive: bool,
    #[serde(default)]
    pub interaction_type: Option<InteractionType>,
}

impl MeditationInstruction {
    pub fn new(timestamp: u32, text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            text: text.into(),
            is_interactive: false,
            interaction_type: None,
        }
    }

    pub fn interactive(timestamp: u32, text: &str, interaction: InteractionType) -> Self {
        Self {
            is_interactive: true,
            interaction_type: Some(interaction),
            ..Self::new(timestamp, text)
        }
    }

    /// Phase shown while this instruction is current.
    pub fn breathing_phase(&self) -> BreathingPhase {
        if self.is_interactive {
            BreathingPhase::from(self.interaction_type)
        } else {
            BreathingPhase::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeditationSession {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Duration in seconds.
    pub duration: u32,
    pub category: MeditationCategory,
    pub difficulty: MeditationDifficulty,
    pub background_sound: BackgroundSound,
    pub instructions: Vec<MeditationInstruction>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rating: Option<u8>,
    /// Fraction of positive interaction responses, 0.0 to 1.0.
    #[serde(default)]
    pub focus_score: Option<f64>,
}

impl MeditationSession {
    pub fn minutes(&self) -> u32 {
        self.duration / 60
    }

    pub fn formatted_duration(&self) -> String {
        format!("{} min", self.minutes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_interactive_instructions_move_the_phase() {
        let plain = MeditationInstruction::new(0, "Welcome");
        assert_eq!(plain.breathing_phase(), BreathingPhase::Neutral);

        let inhale = MeditationInstruction::interactive(4, "Breathe in...", InteractionType::BreathIn);
        assert_eq!(inhale.breathing_phase(), BreathingPhase::BreathIn);

        let focus = MeditationInstruction::interactive(8, "Focus", InteractionType::Focus);
        assert_eq!(focus.breathing_phase(), BreathingPhase::Neutral);
    }

    #[test]
    fn difficulty_steps_saturate() {
        assert_eq!(MeditationDifficulty::Advanced.harder(), MeditationDifficulty::Advanced);
        assert_eq!(MeditationDifficulty::Beginner.easier(), MeditationDifficulty::Beginner);
        assert_eq!(
            MeditationDifficulty::Beginner.harder(),
            MeditationDifficulty::Intermediate
        );
    }

    #[test]
    fn enum_names_match_stored_format() {
        assert_eq!(
            serde_json::to_string(&BackgroundSound::Bells).unwrap(),
            "\"Tibetan Bells\""
        );
        assert_eq!(
            serde_json::to_string(&InteractionType::BreathOut).unwrap(),
            "\"Breathe Out\""
        );
    }
}
