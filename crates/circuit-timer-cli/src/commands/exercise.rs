use circuit_timer_core::SettingsStore;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ExerciseAction {
    /// List exercises in workout order
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an exercise (active by default)
    Add {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Remove an exercise
    Remove { id: String },
    /// Enable or disable an exercise
    Toggle { id: String },
    /// Move an exercise to another position (1-based)
    Move { from: usize, to: usize },
}

pub async fn run(action: ExerciseAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SettingsStore::open_default()?;
    let mut settings = store.load_or_default();

    match action {
        ExerciseAction::List { json } => {
            let ordered = settings.exercises.ordered(&settings.exercise_order);
            if json {
                println!("{}", serde_json::to_string_pretty(&ordered)?);
            } else {
                for (i, ex) in ordered.iter().enumerate() {
                    let mark = if ex.is_active { "x" } else { " " };
                    println!("{:>2}. [{mark}] {:<20} {:<38} {}", i + 1, ex.name, ex.id, ex.description);
                }
            }
            return Ok(());
        }
        ExerciseAction::Add { name, description } => {
            let id = settings.exercises.add(&name, &description)?;
            println!("{id}");
        }
        ExerciseAction::Remove { id } => {
            settings.remove_exercise(&id)?;
            println!("removed {id}");
        }
        ExerciseAction::Toggle { id } => {
            let active = settings.exercises.toggle(&id)?;
            println!("{id} {}", if active { "enabled" } else { "disabled" });
        }
        ExerciseAction::Move { from, to } => {
            let (from, to) = (from.saturating_sub(1), to.saturating_sub(1));
            settings.move_exercise(from, to)?;
            println!("ok");
        }
    }

    super::save(&store, &mut settings).await
}
