use clap::Subcommand;
use vitaharmony_core::content::catalog;
use vitaharmony_core::feedback;
use vitaharmony_core::profile::ProfileStore;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// Workouts for the current fitness level
    Workouts {
        /// Print full JSON including exercises
        #[arg(long)]
        json: bool,
    },
    /// Meditation sessions near the preferred length
    Meditations {
        /// Include every session regardless of length
        #[arg(long)]
        all: bool,
        /// Print full JSON including instructions
        #[arg(long)]
        json: bool,
    },
    /// A motivational quote and a wellness tip
    Quote {
        /// "workout" or "meditation"
        #[arg(default_value = "workout")]
        context: String,
    },
    /// Every wellness tip
    Tips,
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = ProfileStore::load(super::open_store()?);
    let profile = store.profile();

    match action {
        CatalogAction::Workouts { json } => {
            let workouts = catalog::generate_workouts(profile);
            if json {
                return super::print_json(&workouts);
            }
            for w in &workouts {
                println!(
                    "{:<24} {:>7}  {:<12} {:>2} exercises",
                    w.name,
                    w.formatted_duration(),
                    w.category.as_str(),
                    w.exercises.len()
                );
            }
        }
        CatalogAction::Meditations { all, json } => {
            let sessions = if all {
                catalog::all_meditation_sessions()
            } else {
                catalog::generate_meditation_sessions(profile)
            };
            if json {
                return super::print_json(&sessions);
            }
            if sessions.is_empty() {
                eprintln!("no sessions near {} minutes (try --all)", profile.preferred_meditation_duration);
            }
            for s in &sessions {
                println!(
                    "{:<28} {:>6}  {:<16} {:?}",
                    s.title,
                    s.formatted_duration(),
                    s.category.as_str(),
                    s.difficulty
                );
            }
        }
        CatalogAction::Quote { context } => {
            println!("{}", feedback::motivational_quote(&context));
            println!("tip: {}", feedback::wellness_tip());
        }
        CatalogAction::Tips => {
            for tip in feedback::wellness_tips() {
                println!("{tip}");
            }
        }
    }
    Ok(())
}
