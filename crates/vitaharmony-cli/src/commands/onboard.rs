//! Non-interactive onboarding: every answer comes from a flag.

use clap::Args;
use vitaharmony_core::onboarding::{AccountChoice, OnboardingFlow, Personalization};
use vitaharmony_core::profile::{FitnessGoal, FitnessLevel, ProfileStore};

#[derive(Args)]
pub struct OnboardArgs {
    /// Fitness goal (e.g. "weight-loss", "endurance", "stress-relief")
    #[arg(long, default_value = "general")]
    goal: FitnessGoal,
    /// Fitness level: beginner, intermediate or advanced
    #[arg(long, default_value = "beginner")]
    level: FitnessLevel,
    /// Preferred workout length in minutes (15-60, steps of 5)
    #[arg(long, default_value_t = 30)]
    workout_minutes: u32,
    /// Preferred meditation length in minutes (5-30, steps of 5)
    #[arg(long, default_value_t = 10)]
    meditation_minutes: u32,
    #[arg(long)]
    age: Option<u32>,
    /// Account name; requires --email
    #[arg(long, requires = "email", conflicts_with = "guest")]
    name: Option<String>,
    #[arg(long, requires = "name")]
    email: Option<String>,
    /// Continue without an account
    #[arg(long)]
    guest: bool,
    /// Run onboarding again even if already completed
    #[arg(long)]
    force: bool,
}

pub fn run(args: OnboardArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = ProfileStore::load(super::open_store()?);
    if store.has_completed_onboarding() && !args.force {
        return Err("onboarding already completed (use --force to redo it)".into());
    }

    let account = match (args.name, args.email) {
        (Some(name), Some(email)) if !args.guest => AccountChoice::Create { name, email },
        _ if args.guest => AccountChoice::Guest,
        _ => return Err("pass --name and --email, or --guest".into()),
    };

    let mut flow = OnboardingFlow::new();
    eprintln!("step: {}", flow.step().as_str());
    eprintln!("step: {}", flow.advance()?.as_str());
    let step = flow.personalize(Personalization {
        goal: args.goal,
        level: args.level,
        workout_minutes: args.workout_minutes,
        meditation_minutes: args.meditation_minutes,
        age: args.age,
    })?;
    eprintln!("step: {}", step.as_str());
    eprintln!("step: {}", flow.advance()?.as_str());
    eprintln!("step: {}", flow.choose_account(account)?.as_str());

    flow.finish(&mut store)?;
    eprintln!("step: {}", flow.step().as_str());
    super::print_json(flow.profile())
}
