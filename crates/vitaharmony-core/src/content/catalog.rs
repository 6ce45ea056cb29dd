//! Built-in workout and meditation catalog.
//!
//! Content is generated fresh on every call (new ids each time) from the
//! user's goal, level and preferred meditation length. The adapt functions
//! return an adjusted copy and never touch the input.

use crate::profile::{FitnessGoal, FitnessLevel, UserProfile};

use super::meditation::{
    BackgroundSound, InteractionType, MeditationCategory, MeditationDifficulty,
    MeditationInstruction, MeditationSession,
};
use super::workout::{Exercise, Workout, WorkoutCategory};

/// Meditation sessions within this many minutes of the preferred length are
/// offered.
pub const MEDITATION_DURATION_TOLERANCE_MIN: u32 = 10;

/// Body weight assumed by [`calculate_calories`] when the profile has none.
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

// ── Workouts ─────────────────────────────────────────────────────────

/// Workouts matching the profile's goal, scaled by its fitness level.
pub fn generate_workouts(profile: &UserProfile) -> Vec<Workout> {
    let level = profile.fitness_level;
    match profile.fitness_goal {
        FitnessGoal::WeightLoss => weight_loss(level),
        FitnessGoal::MuscleGain => muscle_gain(level),
        FitnessGoal::Endurance => endurance(level),
        FitnessGoal::Flexibility => flexibility(level),
        FitnessGoal::General => general(level),
        FitnessGoal::StressRelief => stress_relief(level),
    }
}

/// Look up a generated workout by name, case-insensitively.
pub fn find_workout(profile: &UserProfile, name: &str) -> Option<Workout> {
    generate_workouts(profile)
        .into_iter()
        .find(|w| w.name.eq_ignore_ascii_case(name.trim()))
}

fn workout(
    name: &str,
    description: &str,
    duration: u32,
    difficulty: FitnessLevel,
    category: WorkoutCategory,
    calories_burned: u32,
    exercises: Vec<Exercise>,
) -> Workout {
    Workout {
        id: uuid::Uuid::new_v4(),
        name: name.into(),
        description: description.into(),
        duration,
        difficulty,
        category,
        exercises,
        calories_burned,
        completed_at: None,
        rating: None,
        performance: None,
    }
}

fn weight_loss(level: FitnessLevel) -> Vec<Workout> {
    let duration = level.base_duration_secs();
    let m = level.multiplier();
    vec![
        workout(
            "HIIT Fat Burner",
            "High-intensity interval training to maximize calorie burn",
            duration,
            level,
            WorkoutCategory::Hiit,
            300 * m,
            vec![
                Exercise::new("Jumping Jacks", "Full body cardio warm-up", 30 * m)
                    .steps(&[
                        "Stand with feet together",
                        "Jump while spreading legs and raising arms",
                        "Return to start position",
                    ])
                    .targets(&["Full Body"]),
                Exercise::new("Burpees", "Ultimate fat burning exercise", 30 * m)
                    .reps(10)
                    .steps(&["Start standing", "Drop to plank", "Push up", "Jump up"])
                    .targets(&["Full Body"]),
                Exercise::new("Mountain Climbers", "Core and cardio combo", 30 * m)
                    .steps(&["Start in plank position", "Alternate bringing knees to chest"])
                    .targets(&["Core", "Legs"]),
                Exercise::new("High Knees", "Cardio intensity builder", 30 * m)
                    .steps(&["Run in place", "Bring knees to chest level"])
                    .targets(&["Legs", "Cardio"]),
                Exercise::new("Rest", "Active recovery", 30)
                    .steps(&["Walk in place", "Deep breathing"]),
            ],
        ),
        workout(
            "Cardio Blast",
            "Steady-state cardio for fat burning",
            duration + 300,
            level,
            WorkoutCategory::Cardio,
            250 * m,
            vec![
                Exercise::new("Running in Place", "Cardio warm-up", 60 * m)
                    .steps(&["Start with light jog", "Increase pace gradually"])
                    .targets(&["Legs"]),
                Exercise::new("Jump Rope (or simulated)", "Cardio endurance", 120 * m)
                    .steps(&["Jump with both feet", "Maintain steady rhythm"])
                    .targets(&["Legs", "Cardio"]),
                Exercise::new("Butt Kicks", "Cardio and leg workout", 60 * m)
                    .steps(&["Run in place", "Kick heels to glutes"])
                    .targets(&["Legs"]),
                Exercise::new("Skaters", "Lateral cardio movement", 60 * m)
                    .steps(&["Leap side to side", "Land on one foot"])
                    .targets(&["Legs", "Core"]),
            ],
        ),
    ]
}

fn muscle_gain(level: FitnessLevel) -> Vec<Workout> {
    let m = level.multiplier();
    vec![
        workout(
            "Upper Body Strength",
            "Build muscle in chest, arms, and shoulders",
            1800,
            level,
            WorkoutCategory::Strength,
            200 * m,
            vec![
                Exercise::new("Push-ups", "Classic chest builder", 60)
                    .reps(15 * m)
                    .sets(3)
                    .rest(60)
                    .steps(&["Start in plank", "Lower chest to ground", "Push back up"])
                    .targets(&["Chest", "Triceps"]),
                Exercise::new("Diamond Push-ups", "Tricep focused", 60)
                    .reps(10 * m)
                    .sets(3)
                    .rest(60)
                    .steps(&["Form diamond with hands", "Perform push-up"])
                    .targets(&["Triceps", "Chest"]),
                Exercise::new("Pike Push-ups", "Shoulder builder", 60)
                    .reps(12 * m)
                    .sets(3)
                    .rest(60)
                    .steps(&["Form inverted V", "Lower head to ground"])
                    .targets(&["Shoulders"]),
                Exercise::new("Tricep Dips", "Arm sculptor", 60)
                    .reps(15 * m)
                    .sets(3)
                    .rest(60)
                    .steps(&["Use chair or bench", "Lower body down", "Push back up"])
                    .targets(&["Triceps"]),
            ],
        ),
        workout(
            "Lower Body Power",
            "Leg and glute muscle building",
            1800,
            level,
            WorkoutCategory::Strength,
            220 * m,
            vec![
                Exercise::new("Squats", "Leg power builder", 60)
                    .reps(20 * m)
                    .sets(4)
                    .rest(60)
                    .steps(&[
                        "Feet shoulder-width",
                        "Lower hips back and down",
                        "Push through heels",
                    ])
                    .targets(&["Quads", "Glutes"]),
                Exercise::new("Lunges", "Single leg strength", 60)
                    .reps(15 * m)
                    .sets(3)
                    .rest(60)
                    .steps(&["Step forward", "Lower back knee", "Push back to start"])
                    .targets(&["Quads", "Glutes"]),
                Exercise::new("Glute Bridges", "Glute activation", 60)
                    .reps(20 * m)
                    .sets(3)
                    .rest(60)
                    .steps(&["Lie on back", "Lift hips up", "Squeeze glutes"])
                    .targets(&["Glutes", "Hamstrings"]),
                Exercise::new("Calf Raises", "Lower leg strength", 60)
                    .reps(25 * m)
                    .sets(3)
                    .rest(45)
                    .steps(&["Stand on balls of feet", "Raise heels up", "Lower slowly"])
                    .targets(&["Calves"]),
            ],
        ),
    ]
}

fn endurance(level: FitnessLevel) -> Vec<Workout> {
    let m = level.multiplier();
    vec![workout(
        "Stamina Builder",
        "Increase cardiovascular endurance",
        2400,
        level,
        WorkoutCategory::Cardio,
        400 * m,
        vec![
            Exercise::new("Warm-up Jog", "Prepare the body", 300)
                .steps(&["Start with light pace", "Gradually increase intensity"])
                .targets(&["Cardio"]),
            Exercise::new("Steady Run", "Build endurance", 900 * m)
                .steps(&["Maintain consistent pace", "Focus on breathing"])
                .targets(&["Legs", "Cardio"]),
            Exercise::new("Sprint Intervals", "Push your limits", 60 * m)
                .sets(5)
                .rest(90)
                .steps(&["Sprint at max effort", "Rest between intervals"])
                .targets(&["Legs", "Cardio"]),
            Exercise::new("Cool Down", "Recovery", 300)
                .steps(&["Slow to walking pace", "Deep breathing"]),
        ],
    )]
}

fn flexibility(level: FitnessLevel) -> Vec<Workout> {
    vec![
        workout(
            "Full Body Stretch",
            "Improve flexibility and mobility",
            1200,
            level,
            WorkoutCategory::Stretching,
            80,
            vec![
                Exercise::new("Neck Rolls", "Neck mobility", 60)
                    .steps(&["Slowly roll neck in circles", "Reverse direction"])
                    .targets(&["Neck"]),
                Exercise::new("Shoulder Stretch", "Upper body flexibility", 90)
                    .steps(&["Pull arm across body", "Hold for 30 seconds each side"])
                    .targets(&["Shoulders"]),
                Exercise::new("Forward Fold", "Hamstring stretch", 120)
                    .steps(&["Stand and bend forward", "Reach for toes", "Hold position"])
                    .targets(&["Hamstrings", "Back"]),
                Exercise::new("Hip Flexor Stretch", "Hip mobility", 120)
                    .steps(&["Lunge position", "Push hips forward", "Hold each side"])
                    .targets(&["Hip Flexors"]),
                Exercise::new("Quad Stretch", "Leg flexibility", 90)
                    .steps(&["Stand on one leg", "Pull foot to glutes", "Hold each side"])
                    .targets(&["Quads"]),
                Exercise::new("Butterfly Stretch", "Inner thigh stretch", 120)
                    .steps(&["Sit with soles together", "Press knees down", "Lean forward"])
                    .targets(&["Inner Thighs"]),
            ],
        ),
        workout(
            "Yoga Flow",
            "Dynamic stretching and flexibility",
            1800,
            level,
            WorkoutCategory::Yoga,
            100,
            vec![
                Exercise::new("Cat-Cow Stretch", "Spine mobility", 120)
                    .steps(&["Start on all fours", "Arch and round back", "Flow with breath"])
                    .targets(&["Spine", "Core"]),
                Exercise::new("Downward Dog", "Full body stretch", 180)
                    .steps(&["Form inverted V", "Press heels down", "Relax shoulders"])
                    .targets(&["Full Body"]),
                Exercise::new("Warrior Pose", "Strength and flexibility", 120)
                    .steps(&["Lunge with arms extended", "Hold each side"])
                    .targets(&["Legs", "Core"]),
                Exercise::new("Child's Pose", "Relaxation stretch", 180)
                    .steps(&["Sit on heels", "Extend arms forward", "Rest forehead on ground"])
                    .targets(&["Back", "Shoulders"]),
            ],
        ),
    ]
}

fn general(level: FitnessLevel) -> Vec<Workout> {
    let m = level.multiplier();
    vec![workout(
        "Full Body Workout",
        "Balanced routine for overall fitness",
        1800,
        level,
        WorkoutCategory::FullBody,
        250 * m,
        vec![
            Exercise::new("Jumping Jacks", "Warm-up", 60)
                .steps(&["Full body movement", "Increase heart rate"])
                .targets(&["Full Body"]),
            Exercise::new("Push-ups", "Upper body", 60)
                .reps(12 * m)
                .sets(3)
                .rest(45)
                .steps(&["Standard push-up form"])
                .targets(&["Chest", "Arms"]),
            Exercise::new("Squats", "Lower body", 60)
                .reps(15 * m)
                .sets(3)
                .rest(45)
                .steps(&["Proper squat form"])
                .targets(&["Legs"]),
            Exercise::new("Plank", "Core strength", 45 * m)
                .sets(3)
                .rest(60)
                .steps(&["Hold plank position", "Keep body straight"])
                .targets(&["Core"]),
            Exercise::new("Burpees", "Full body cardio", 60)
                .reps(10 * m)
                .sets(2)
                .rest(60)
                .steps(&["Complete burpee cycle"])
                .targets(&["Full Body"]),
        ],
    )]
}

fn stress_relief(level: FitnessLevel) -> Vec<Workout> {
    vec![workout(
        "Relaxing Yoga",
        "Gentle movements for stress relief",
        1800,
        level,
        WorkoutCategory::Yoga,
        100,
        vec![
            Exercise::new("Deep Breathing", "Calm the mind", 180)
                .steps(&["Inhale deeply for 4 counts", "Hold for 4", "Exhale for 4"]),
            Exercise::new("Gentle Stretching", "Release tension", 300)
                .steps(&["Slow, gentle movements", "Focus on breathing"])
                .targets(&["Full Body"]),
            Exercise::new("Restorative Poses", "Deep relaxation", 600)
                .steps(&["Hold comfortable positions", "Let go of stress"])
                .targets(&["Full Body"]),
            Exercise::new("Meditation", "Mental relaxation", 300)
                .steps(&["Sit comfortably", "Focus on breath", "Clear your mind"]),
        ],
    )]
}

/// Scale a workout to the last session's performance.
///
/// Above 0.8: reps ×1.2, one more set (capped at 5), duration ×1.1.
/// Below 0.5: reps ×0.8, duration ×0.9. Fractions are truncated.
pub fn adapt_workout(workout: &Workout, performance: f64) -> Workout {
    let mut adapted = workout.clone();
    if performance > 0.8 {
        for ex in &mut adapted.exercises {
            ex.reps = ex.reps.map(|r| scale(r, 1.2));
            ex.sets = ex.sets.map(|s| (s + 1).min(5));
            ex.duration = scale(ex.duration, 1.1);
        }
    } else if performance < 0.5 {
        for ex in &mut adapted.exercises {
            ex.reps = ex.reps.map(|r| scale(r, 0.8));
            ex.duration = scale(ex.duration, 0.9);
        }
    }
    adapted
}

/// Estimated kcal for `duration_secs` at `intensity` in [0,1].
///
/// MET ranges from 3 (idle) to 11 (all-out).
pub fn calculate_calories(duration_secs: u32, weight_kg: Option<f64>, intensity: f64) -> u32 {
    let weight = weight_kg.unwrap_or(DEFAULT_WEIGHT_KG);
    let hours = f64::from(duration_secs) / 3600.0;
    let met = 3.0 + intensity.clamp(0.0, 1.0) * 8.0;
    (met * weight * hours).max(0.0) as u32
}

fn scale(value: u32, factor: f64) -> u32 {
    (f64::from(value) * factor) as u32
}

// ── Meditation ───────────────────────────────────────────────────────

/// Sessions close to the profile's preferred meditation length.
pub fn generate_meditation_sessions(profile: &UserProfile) -> Vec<MeditationSession> {
    let preferred = profile.preferred_meditation_duration;
    all_meditation_sessions()
        .into_iter()
        .filter(|s| s.minutes().abs_diff(preferred) <= MEDITATION_DURATION_TOLERANCE_MIN)
        .collect()
}

/// Look up a session by title among those offered to the profile.
pub fn find_meditation(profile: &UserProfile, title: &str) -> Option<MeditationSession> {
    generate_meditation_sessions(profile)
        .into_iter()
        .find(|s| s.title.eq_ignore_ascii_case(title.trim()))
}

/// Every built-in session, unfiltered.
pub fn all_meditation_sessions() -> Vec<MeditationSession> {
    use BackgroundSound as Sound;
    use InteractionType::*;
    use MeditationCategory as Cat;
    use MeditationDifficulty as Diff;

    vec![
        session(
            "Box Breathing",
            "A calming breathwork technique used by athletes and professionals",
            600,
            Cat::Breathwork,
            Diff::Beginner,
            Sound::Ocean,
            vec![
                say(0, "Welcome to Box Breathing. Find a comfortable seated position."),
                say(10, "We'll breathe in a pattern of 4-4-4-4. Ready?"),
                cue(20, "Breathe in...", BreathIn),
                cue(24, "Hold...", Hold),
                cue(28, "Breathe out...", BreathOut),
                cue(32, "Hold...", Hold),
                cue(36, "Continue this pattern...", BreathIn),
                say(300, "You're halfway there. Notice how calm you feel."),
                say(570, "Begin to slow down your breathing."),
                say(590, "Take one final deep breath and release. Well done."),
            ],
        ),
        session(
            "4-7-8 Breathing",
            "A powerful technique for relaxation and sleep",
            480,
            Cat::Breathwork,
            Diff::Beginner,
            Sound::Rain,
            vec![
                say(0, "Welcome. This technique helps you relax deeply."),
                cue(10, "Breathe in for 4 counts...", BreathIn),
                cue(14, "Hold for 7 counts...", Hold),
                cue(21, "Exhale for 8 counts...", BreathOut),
                cue(29, "Again, breathe in...", BreathIn),
                say(240, "Feel the relaxation spreading through your body."),
                say(460, "Prepare to finish the session."),
                say(475, "Return to normal breathing. Excellent work."),
            ],
        ),
        session(
            "Energizing Breath",
            "Activate your body and mind with this dynamic breathwork",
            600,
            Cat::Breathwork,
            Diff::Intermediate,
            Sound::Bells,
            vec![
                say(0, "This practice will energize you. Sit up tall."),
                say(10, "Take quick, powerful breaths through your nose."),
                cue(20, "Breathe in sharply!", BreathIn),
                cue(21, "Breathe out!", BreathOut),
                say(300, "Feel the energy building in your body."),
                say(580, "Slow down and return to normal breathing."),
            ],
        ),
        session(
            "Body Scan",
            "Connect with your body through mindful awareness",
            900,
            Cat::BodyAwareness,
            Diff::Beginner,
            Sound::Forest,
            vec![
                say(0, "Lie down or sit comfortably. Close your eyes."),
                say(20, "Bring awareness to your toes. Notice any sensations."),
                say(120, "Move your attention to your feet and ankles."),
                say(240, "Scan through your lower legs, noticing any tension."),
                cue(360, "Bring awareness to your thighs and hips.", Focus),
                say(480, "Notice your abdomen and lower back."),
                say(600, "Scan your chest and upper back. Breathe deeply."),
                cue(720, "Bring attention to your shoulders, arms, and hands.", Release),
                say(780, "Finally, scan your neck, face, and head."),
                say(840, "Feel your whole body as one connected system."),
                say(880, "Slowly open your eyes when you're ready."),
            ],
        ),
        session(
            "Present Moment Awareness",
            "Simple mindfulness practice for beginners",
            600,
            Cat::Mindfulness,
            Diff::Beginner,
            Sound::Ocean,
            vec![
                say(0, "Sit comfortably and close your eyes."),
                say(15, "Notice the sounds around you without judgment."),
                cue(120, "Bring attention to your breath.", Focus),
                say(240, "When your mind wanders, gently return to the breath."),
                cue(360, "Notice any thoughts without getting caught in them.", Release),
                say(480, "Simply be present in this moment."),
                say(570, "Begin to deepen your breath."),
                say(590, "When you're ready, open your eyes."),
            ],
        ),
        session(
            "Letting Go",
            "Release stress and tension from your day",
            720,
            Cat::StressRelief,
            Diff::Beginner,
            Sound::Rain,
            vec![
                say(0, "Find a comfortable position. Take a deep breath."),
                say(20, "Acknowledge any stress you're feeling without judgment."),
                cue(120, "Imagine stress as a color. What color is it?", Visualize),
                cue(180, "With each exhale, imagine this color leaving your body.", Release),
                say(360, "Feel yourself becoming lighter with each breath."),
                say(540, "Notice how much calmer you feel now."),
                say(690, "Carry this peace with you as you return to your day."),
            ],
        ),
        session(
            "Calm Mind",
            "Quiet mental chatter and find inner peace",
            900,
            Cat::StressRelief,
            Diff::Intermediate,
            Sound::Singing,
            vec![
                say(0, "Close your eyes and settle into your seat."),
                say(30, "Notice the thoughts passing through your mind."),
                cue(120, "Imagine each thought as a cloud floating by.", Visualize),
                say(240, "Don't grab onto the clouds. Just watch them pass."),
                cue(450, "Return to the stillness between thoughts.", Focus),
                say(720, "Rest in this quiet space."),
                say(870, "Gently return to the present moment."),
            ],
        ),
        session(
            "Mental Clarity",
            "Sharpen your focus and concentration",
            600,
            Cat::Focus,
            Diff::Intermediate,
            Sound::White,
            vec![
                say(0, "Sit with a straight spine. Eyes closed or softly focused."),
                say(20, "Choose a single point of focus - your breath."),
                cue(60, "Count your breaths from 1 to 10, then start over.", Focus),
                say(180, "If you lose count, simply start again at 1."),
                cue(360, "Notice how your focus becomes sharper.", Focus),
                say(540, "This concentrated attention is available anytime."),
                say(580, "Slowly transition back to normal awareness."),
            ],
        ),
        session(
            "Deep Concentration",
            "Advanced focus training",
            1200,
            Cat::Focus,
            Diff::Advanced,
            Sound::Bells,
            vec![
                say(0, "This is a deep concentration practice. Be patient."),
                say(30, "Focus on a single point - the tip of your nose."),
                cue(120, "Feel the subtle sensations of breath at this point.", Focus),
                say(600, "Maintain unwavering focus. You're doing great."),
                say(1140, "Gradually expand your awareness."),
                say(1180, "Open your eyes slowly. Notice your mental clarity."),
            ],
        ),
        session(
            "Peaceful Place",
            "Create your personal sanctuary in your mind",
            900,
            Cat::Visualization,
            Diff::Beginner,
            Sound::Ocean,
            vec![
                say(0, "Close your eyes and take three deep breaths."),
                cue(30, "Imagine a place where you feel completely at peace.", Visualize),
                say(90, "What do you see? Notice the colors and shapes."),
                say(180, "What sounds do you hear in this peaceful place?"),
                cue(300, "Feel the temperature. Is there a breeze?", Focus),
                say(480, "Notice how safe and relaxed you feel here."),
                say(720, "Remember you can return to this place anytime."),
                say(840, "Slowly say goodbye to this place for now."),
                say(880, "Return to the present, feeling refreshed."),
            ],
        ),
        session(
            "Goal Visualization",
            "Visualize achieving your fitness and wellness goals",
            720,
            Cat::Visualization,
            Diff::Intermediate,
            Sound::Forest,
            vec![
                say(0, "Sit comfortably and breathe deeply."),
                cue(20, "Think of a goal you want to achieve.", Visualize),
                say(90, "Imagine yourself having already achieved this goal."),
                cue(180, "How do you look? How do you feel?", Visualize),
                say(300, "See yourself confident and successful."),
                cue(480, "Feel the emotions of this achievement.", Focus),
                say(660, "This future is yours to create."),
                say(700, "Return to the present with renewed motivation."),
            ],
        ),
    ]
}

fn session(
    title: &str,
    description: &str,
    duration: u32,
    category: MeditationCategory,
    difficulty: MeditationDifficulty,
    background_sound: BackgroundSound,
    instructions: Vec<MeditationInstruction>,
) -> MeditationSession {
    MeditationSession {
        id: uuid::Uuid::new_v4(),
        title: title.into(),
        description: description.into(),
        duration,
        category,
        difficulty,
        background_sound,
        instructions,
        completed_at: None,
        rating: None,
        focus_score: None,
    }
}

fn say(timestamp: u32, text: &str) -> MeditationInstruction {
    MeditationInstruction::new(timestamp, text)
}

fn cue(timestamp: u32, text: &str, interaction: InteractionType) -> MeditationInstruction {
    MeditationInstruction::interactive(timestamp, text, interaction)
}

/// Adjust a session to the last focus score.
///
/// Above 0.75: one level harder, duration ×1.2. Below 0.4: one level
/// easier, duration ×0.8.
pub fn adapt_session(session: &MeditationSession, focus_score: f64) -> MeditationSession {
    let mut adapted = session.clone();
    if focus_score > 0.75 {
        adapted.difficulty = session.difficulty.harder();
        adapted.duration = scale(session.duration, 1.2);
    } else if focus_score < 0.4 {
        adapted.difficulty = session.difficulty.easier();
        adapted.duration = scale(session.duration, 0.8);
    }
    adapted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(goal: FitnessGoal, level: FitnessLevel) -> UserProfile {
        UserProfile {
            fitness_goal: goal,
            fitness_level: level,
            ..UserProfile::default()
        }
    }

    #[test]
    fn every_goal_has_workouts() {
        for goal in FitnessGoal::ALL {
            let workouts = generate_workouts(&profile(goal, FitnessLevel::Beginner));
            assert!(!workouts.is_empty(), "{goal:?}");
            for w in &workouts {
                assert!(!w.exercises.is_empty());
                assert!(w.exercise_duration() > 0);
            }
        }
    }

    #[test]
    fn level_scales_weight_loss_content() {
        let advanced = generate_workouts(&profile(FitnessGoal::WeightLoss, FitnessLevel::Advanced));
        let hiit = &advanced[0];
        assert_eq!(hiit.name, "HIIT Fat Burner");
        assert_eq!(hiit.duration, 2700);
        assert_eq!(hiit.calories_burned, 900);
        assert_eq!(hiit.exercises[0].duration, 90);
        // Rest block is not scaled.
        assert_eq!(hiit.exercises[4].duration, 30);
        assert_eq!(advanced[1].duration, 3000);
    }

    #[test]
    fn muscle_gain_scales_reps_not_duration() {
        let w = generate_workouts(&profile(FitnessGoal::MuscleGain, FitnessLevel::Intermediate));
        let pushups = &w[0].exercises[0];
        assert_eq!(pushups.reps, Some(30));
        assert_eq!(pushups.sets, Some(3));
        assert_eq!(pushups.rest_time, Some(60));
        assert_eq!(pushups.duration, 60);
    }

    #[test]
    fn find_workout_ignores_case() {
        let p = profile(FitnessGoal::Flexibility, FitnessLevel::Beginner);
        assert!(find_workout(&p, "yoga flow").is_some());
        assert!(find_workout(&p, "Stamina Builder").is_none());
    }

    #[test]
    fn meditation_filter_uses_preferred_duration() {
        let mut p = UserProfile::default();
        p.preferred_meditation_duration = 30;
        let titles: Vec<_> = generate_meditation_sessions(&p)
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Deep Concentration"]);

        p.preferred_meditation_duration = 10;
        assert_eq!(generate_meditation_sessions(&p).len(), 11);
    }

    #[test]
    fn instructions_are_sorted_by_timestamp() {
        for s in all_meditation_sessions() {
            assert!(s
                .instructions
                .windows(2)
                .all(|w| w[0].timestamp <= w[1].timestamp));
            assert!(s.instructions.iter().all(|i| i.timestamp < s.duration));
        }
    }

    #[test]
    fn adapt_workout_high_and_low() {
        let base = find_workout(
            &profile(FitnessGoal::MuscleGain, FitnessLevel::Beginner),
            "Lower Body Power",
        )
        .unwrap();

        let up = adapt_workout(&base, 0.9);
        assert_eq!(up.exercises[0].reps, Some(24));
        assert_eq!(up.exercises[0].sets, Some(5));
        assert_eq!(up.exercises[0].duration, 66);

        let down = adapt_workout(&base, 0.3);
        assert_eq!(down.exercises[0].reps, Some(16));
        assert_eq!(down.exercises[0].sets, Some(4));
        assert_eq!(down.exercises[0].duration, 54);

        assert_eq!(adapt_workout(&base, 0.6), base);
    }

    #[test]
    fn adapt_session_moves_difficulty() {
        let base = all_meditation_sessions().remove(0);
        let up = adapt_session(&base, 0.8);
        assert_eq!(up.difficulty, MeditationDifficulty::Intermediate);
        assert_eq!(up.duration, 720);

        let down = adapt_session(&base, 0.2);
        assert_eq!(down.difficulty, MeditationDifficulty::Beginner);
        assert_eq!(down.duration, 480);

        assert_eq!(adapt_session(&base, 0.75), base);
    }

    #[test]
    fn calories_use_met_formula() {
        // MET 7 × 70 kg × 0.5 h
        assert_eq!(calculate_calories(1800, None, 0.5), 245);
        assert_eq!(calculate_calories(3600, Some(80.0), 1.0), 880);
        assert_eq!(calculate_calories(0, Some(80.0), 1.0), 0);
    }
}
