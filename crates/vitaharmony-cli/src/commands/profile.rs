use clap::Subcommand;
use vitaharmony_core::profile::{FitnessGoal, FitnessLevel, ProfileStore, ProfileUpdate};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print the current profile
    Show,
    /// Edit profile fields
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        goal: Option<FitnessGoal>,
        #[arg(long)]
        level: Option<FitnessLevel>,
        #[arg(long)]
        age: Option<u32>,
        /// Kilograms
        #[arg(long)]
        weight: Option<f64>,
        /// Centimetres
        #[arg(long)]
        height: Option<f64>,
    },
    /// Set preferred session lengths in minutes
    Durations {
        /// 15-60, steps of 5
        #[arg(long)]
        workout: Option<u32>,
        /// 5-30, steps of 5
        #[arg(long)]
        meditation: Option<u32>,
    },
    /// Switch to a guest profile, keeping history
    Logout,
    /// Delete all stored data
    Delete {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

fn show(store: &ProfileStore) -> Result<(), Box<dyn std::error::Error>> {
    let profile = store.profile();
    let mut value = serde_json::to_value(profile)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert("bmi".into(), serde_json::json!(profile.bmi()));
        obj.insert("bmiCategory".into(), serde_json::json!(profile.bmi_category()));
    }
    super::print_json(&value)
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = ProfileStore::load(super::open_store()?);

    match action {
        ProfileAction::Show => show(&store)?,
        ProfileAction::Update {
            name,
            email,
            goal,
            level,
            age,
            weight,
            height,
        } => {
            let update = ProfileUpdate {
                name,
                email,
                fitness_goal: goal,
                fitness_level: level,
                age,
                weight,
                height,
            };
            if update.is_empty() {
                return Err("nothing to update".into());
            }
            store.update(update)?;
            show(&store)?;
        }
        ProfileAction::Durations { workout, meditation } => {
            if workout.is_none() && meditation.is_none() {
                return Err("pass --workout and/or --meditation".into());
            }
            if let Some(minutes) = workout {
                store.set_workout_duration(minutes)?;
            }
            if let Some(minutes) = meditation {
                store.set_meditation_duration(minutes)?;
            }
            show(&store)?;
        }
        ProfileAction::Logout => {
            store.logout();
            println!("logged out");
        }
        ProfileAction::Delete { yes } => {
            if !yes {
                return Err("refusing to delete account data without --yes".into());
            }
            store.delete_account();
            println!("account data deleted");
        }
    }
    Ok(())
}
