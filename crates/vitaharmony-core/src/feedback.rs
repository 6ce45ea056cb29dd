//! Coach, completion and progress messages.
//!
//! Every function here is pure and deterministic. Each bucket has a pool of
//! phrasings ([`MessagePool`]); the functions return the pool's first entry
//! so the same input always yields the same text.

use crate::content::MeditationCategory;

/// A fixed list of interchangeable messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessagePool(&'static [&'static str]);

impl MessagePool {
    pub fn first(&self) -> &'static str {
        self.0.first().copied().unwrap_or_default()
    }

    /// Every phrasing in the pool, canonical entry first.
    pub fn all(&self) -> &'static [&'static str] {
        self.0
    }
}

pub mod pools {
    use super::MessagePool;

    pub const ENCOURAGEMENT_START: MessagePool = MessagePool(&[
        "Great start! Keep that energy up!",
        "You've got this! Let's go!",
        "Strong start! Keep pushing!",
        "Excellent! You're doing amazing!",
    ]);

    pub const ENCOURAGEMENT_MIDDLE: MessagePool = MessagePool(&[
        "You're doing great! Halfway there!",
        "Keep that momentum going!",
        "Look at you go! Impressive!",
        "You're crushing it! Don't stop now!",
        "Fantastic work! Keep it up!",
    ]);

    pub const ENCOURAGEMENT_LATE: MessagePool = MessagePool(&[
        "Almost there! You're so strong!",
        "You're in the zone! Keep going!",
        "Incredible effort! Push through!",
        "You're unstoppable today!",
        "Amazing! The finish line is near!",
    ]);

    pub const ENCOURAGEMENT_FINAL: MessagePool = MessagePool(&[
        "Final push! You've got this!",
        "So close! Finish strong!",
        "You're about to crush this workout!",
        "Last stretch! Give it everything!",
        "Almost done! You're amazing!",
    ]);

    pub const ENCOURAGEMENT_GENERAL: MessagePool = MessagePool(&[
        "You're doing amazing! Keep it up!",
        "Great form! I can see the improvement!",
        "You're stronger than you think!",
        "Almost there! Don't give up now!",
        "Excellent work! Your dedication is paying off!",
        "Feel that burn? That's progress happening!",
        "You're crushing it today!",
    ]);

    pub const REST: MessagePool = MessagePool(&[
        "Take a deep breath and recover.",
        "Good job! Use this time to recharge.",
        "Rest well, you've earned it!",
        "Breathe deeply and prepare for the next set.",
        "Recovery is just as important as the workout.",
    ]);

    pub const COMPLETION: MessagePool = MessagePool(&[
        "Congratulations! You've completed your workout!",
        "Amazing job! You're one step closer to your goals!",
        "You did it! Your body will thank you later!",
        "Fantastic work! Same time tomorrow?",
        "You're unstoppable! Great session today!",
    ]);

    pub const WORKOUT_QUOTES: MessagePool = MessagePool(&[
        "Push yourself, because no one else is going to do it for you.",
        "Great things never come from comfort zones.",
        "The only bad workout is the one that didn't happen.",
        "Your body can stand almost anything. It's your mind you have to convince.",
        "Fitness is not about being better than someone else. It's about being better than you used to be.",
    ]);

    pub const MEDITATION_QUOTES: MessagePool = MessagePool(&[
        "The present moment is filled with joy and happiness. If you are attentive, you will see it.",
        "Meditation is not evasion; it is a serene encounter with reality.",
        "In the midst of movement and chaos, keep stillness inside of you.",
        "Peace comes from within. Do not seek it without.",
        "The thing about meditation is you become more and more you.",
    ]);

    pub const WELLNESS_TIPS: MessagePool = MessagePool(&[
        "Stay hydrated! Drink at least 8 glasses of water today.",
        "Quality sleep is crucial for recovery. Aim for 7-9 hours tonight.",
        "Protein helps muscle recovery. Include it in your post-workout meal.",
        "Stretch daily to improve flexibility and prevent injury.",
        "Progressive overload is key to improvement. Gradually increase your workout intensity.",
        "Rest days are essential! Your muscles grow during recovery.",
        "Consistency beats intensity. Show up regularly, even if you don't feel 100%.",
        "Mind-muscle connection improves results. Focus on the muscles you're working.",
        "Warm up properly to prevent injury and improve performance.",
        "Track your progress! What gets measured gets improved.",
    ]);
}

// ── Workout ──────────────────────────────────────────────────────────

pub fn encouragement_pool(progress: f64) -> MessagePool {
    if progress < 0.25 {
        pools::ENCOURAGEMENT_START
    } else if progress < 0.5 {
        pools::ENCOURAGEMENT_MIDDLE
    } else if progress < 0.75 {
        pools::ENCOURAGEMENT_LATE
    } else {
        pools::ENCOURAGEMENT_FINAL
    }
}

/// Coach line for the given workout progress in [0,1].
pub fn workout_encouragement(progress: f64) -> &'static str {
    encouragement_pool(progress).first()
}

pub fn rest_message() -> &'static str {
    pools::REST.first()
}

pub fn workout_completion_message(performance: f64) -> &'static str {
    if performance > 0.8 {
        "Outstanding performance! You absolutely crushed that workout! 💪"
    } else if performance > 0.6 {
        "Great job! You completed the workout with solid effort!"
    } else if performance > 0.4 {
        "Good work! You finished the workout. Keep building that consistency!"
    } else {
        "You did it! Every workout counts. You're making progress!"
    }
}

/// Summary shown after a workout, from the share of exercises completed
/// and the final performance score.
pub fn analyze_workout(completed: usize, total: usize, performance: f64) -> String {
    let rate = if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64
    };

    let opening = if total > 0 && completed >= total {
        "Perfect! You completed every exercise! "
    } else if rate > 0.75 {
        "Excellent! You completed most of the workout! "
    } else if rate > 0.5 {
        "Good effort! You made it through more than half! "
    } else {
        "Every start counts! Try to complete more next time. "
    };

    let closing = if performance > 0.8 {
        "Your performance was outstanding!"
    } else if performance > 0.6 {
        "You performed well today!"
    } else {
        "Keep building your strength and endurance!"
    };

    format!("{opening}{closing}")
}

pub fn next_workout_recommendation(recent_performance: f64) -> &'static str {
    if recent_performance > 0.8 {
        "You're ready for a challenge! Try increasing the intensity or duration of your next workout."
    } else if recent_performance > 0.6 {
        "Great progress! Continue with your current routine or add some variety."
    } else {
        "Focus on consistency. Stick with your current level and build your foundation."
    }
}

// ── Meditation ───────────────────────────────────────────────────────

/// Category-specific guidance for the elapsed whole minute, if any.
pub fn meditation_guidance(category: MeditationCategory, elapsed_secs: u32) -> Option<&'static str> {
    use MeditationCategory::*;

    let message = match (category, elapsed_secs / 60) {
        (Breathwork, 2) => "Notice how your breathing is becoming more natural and rhythmic.",
        (Breathwork, 5) => "You're doing wonderfully. Stay with the breath.",
        (Mindfulness, 3) => {
            "If your mind wanders, that's perfectly normal. Gently return to the present."
        }
        (Mindfulness, 7) => "Notice the stillness growing within you.",
        (StressRelief, 2) => "Feel the tension melting away with each breath.",
        (StressRelief, 5) => "You're releasing what no longer serves you.",
        (Focus, 3) => "Your concentration is strengthening. Keep your attention steady.",
        (Visualization, 2) => "Let the images come naturally. Don't force them.",
        (Visualization, 5) => "Immerse yourself fully in this visualization.",
        _ => return None,
    };
    Some(message)
}

pub fn meditation_completion_message(focus_score: f64) -> &'static str {
    if focus_score > 0.8 {
        "Exceptional focus! Your meditation practice is truly deepening. 🧘"
    } else if focus_score > 0.6 {
        "Great session! You maintained good focus throughout."
    } else if focus_score > 0.4 {
        "Nice work! Each meditation strengthens your practice."
    } else {
        "You completed the session! Remember, meditation is a journey, not a destination."
    }
}

pub fn analyze_meditation(focus_score: f64, duration_secs: u32) -> String {
    let opening = if focus_score > 0.8 {
        "Your focus was exceptional! You're mastering the art of meditation. "
    } else if focus_score > 0.6 {
        "Great focus! You're making wonderful progress in your practice. "
    } else if focus_score > 0.4 {
        "Good session! Your meditation skills are developing. "
    } else {
        "You showed up and that's what matters! Each session improves your focus. "
    };

    let minutes = duration_secs / 60;
    let closing = if minutes >= 20 {
        "That's an impressive duration!"
    } else if minutes >= 10 {
        "A solid meditation length!"
    } else {
        "Even short sessions have great benefits!"
    };

    format!("{opening}You meditated for {minutes} minutes. {closing}")
}

// ── Progress ─────────────────────────────────────────────────────────

pub fn streak_message(streak: u32) -> String {
    match streak {
        1 => "Great start! You've begun your journey to better health! 🎉".into(),
        7 => "Amazing! One week streak! You're building a powerful habit! 🔥".into(),
        14 => "Two weeks strong! Your consistency is impressive! ⭐".into(),
        30 => "30 days! You're officially a wellness warrior! 🏆".into(),
        50 => "50 days! Your dedication is truly inspiring! 💎".into(),
        100 => "100 DAYS! You're a true champion! This is legendary! 👑".into(),
        n if n > 0 && n % 7 == 0 => {
            format!("{} weeks of consistency! Keep the momentum going! 🚀", n / 7)
        }
        n if n > 100 && n % 50 == 0 => format!("{n} days! You're unstoppable! 🌟"),
        n => format!("Day {n}! Your commitment is paying off!"),
    }
}

/// Quote for a context label; anything mentioning "workout" or "fitness"
/// gets a workout quote, everything else a meditation quote.
pub fn motivational_quote(context: &str) -> &'static str {
    let context = context.to_lowercase();
    if context.contains("workout") || context.contains("fitness") {
        pools::WORKOUT_QUOTES.first()
    } else {
        pools::MEDITATION_QUOTES.first()
    }
}

pub fn wellness_tip() -> &'static str {
    pools::WELLNESS_TIPS.first()
}

pub fn wellness_tips() -> &'static [&'static str] {
    pools::WELLNESS_TIPS.all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encouragement_boundaries_go_up() {
        assert_eq!(workout_encouragement(0.0), pools::ENCOURAGEMENT_START.first());
        assert_eq!(workout_encouragement(0.25), pools::ENCOURAGEMENT_MIDDLE.first());
        assert_eq!(workout_encouragement(0.5), pools::ENCOURAGEMENT_LATE.first());
        assert_eq!(workout_encouragement(0.75), pools::ENCOURAGEMENT_FINAL.first());
        assert_eq!(workout_encouragement(1.0), pools::ENCOURAGEMENT_FINAL.first());
    }

    #[test]
    fn completion_thresholds_are_strict() {
        assert!(workout_completion_message(0.81).starts_with("Outstanding"));
        assert!(workout_completion_message(0.8).starts_with("Great job"));
        assert!(workout_completion_message(0.6).starts_with("Good work"));
        assert!(workout_completion_message(0.4).starts_with("You did it"));

        assert!(meditation_completion_message(0.9).starts_with("Exceptional"));
        assert!(meditation_completion_message(0.75).starts_with("Great session"));
        assert!(meditation_completion_message(0.0).starts_with("You completed"));
    }

    #[test]
    fn guidance_only_on_listed_minutes() {
        assert!(meditation_guidance(MeditationCategory::Breathwork, 120).is_some());
        assert!(meditation_guidance(MeditationCategory::Breathwork, 179).is_some());
        assert!(meditation_guidance(MeditationCategory::Breathwork, 180).is_none());
        assert!(meditation_guidance(MeditationCategory::Focus, 180).is_some());
        assert!(meditation_guidance(MeditationCategory::Focus, 300).is_none());
        assert!(meditation_guidance(MeditationCategory::Sleep, 120).is_none());
        assert!(meditation_guidance(MeditationCategory::BodyAwareness, 120).is_none());
    }

    #[test]
    fn streak_milestones() {
        assert!(streak_message(1).starts_with("Great start"));
        assert!(streak_message(7).contains("One week"));
        assert_eq!(
            streak_message(21),
            "3 weeks of consistency! Keep the momentum going! 🚀"
        );
        // Multiples of 7 win over multiples of 50.
        assert!(streak_message(350).starts_with("50 weeks"));
        assert_eq!(streak_message(150), "150 days! You're unstoppable! 🌟");
        assert_eq!(streak_message(3), "Day 3! Your commitment is paying off!");
        assert_eq!(streak_message(0), "Day 0! Your commitment is paying off!");
    }

    #[test]
    fn analyses() {
        assert_eq!(
            analyze_workout(4, 4, 0.9),
            "Perfect! You completed every exercise! Your performance was outstanding!"
        );
        assert!(analyze_workout(3, 4, 0.7).starts_with("Good effort"));
        assert!(analyze_workout(0, 0, 0.7).starts_with("Every start counts"));

        let text = analyze_meditation(0.75, 600);
        assert!(text.starts_with("Great focus!"));
        assert!(text.contains("You meditated for 10 minutes. A solid meditation length!"));
    }

    #[test]
    fn quotes_and_pools() {
        assert_eq!(motivational_quote("Workout"), pools::WORKOUT_QUOTES.first());
        assert_eq!(motivational_quote("mindfulness"), pools::MEDITATION_QUOTES.first());
        assert_eq!(wellness_tip(), pools::WELLNESS_TIPS.all()[0]);
        assert_eq!(wellness_tips().len(), 10);
        assert!(next_workout_recommendation(0.9).starts_with("You're ready"));
    }
}
