use circuit_core::expander::rest_between_sets_seconds;
use circuit_core::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "circuit")]
#[command(about = "Workout planning and interval playback", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List workout paths with their workout counts
    Paths,

    /// List the workouts in a path
    List {
        /// Path name
        path: String,
    },

    /// Preview a workout
    Show {
        /// Workout id
        id: String,

        /// Also generate and print a timed sequence
        #[arg(long)]
        generate: bool,

        /// Seed for a reproducible sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Print the generated sequence as JSON
        #[arg(long, requires = "generate")]
        json: bool,
    },

    /// Create a new workout
    Create {
        #[arg(long)]
        path: String,

        #[arg(long)]
        title: String,

        /// Warmup time in minutes
        #[arg(long)]
        warmup: Option<f64>,

        /// Number of sets
        #[arg(long)]
        sets: Option<u32>,

        /// Rest between sets in minutes
        #[arg(long)]
        rest_sets: Option<f64>,

        /// Rest between exercises in seconds
        #[arg(long)]
        rest_exercises: Option<f64>,

        /// Keep exercise order fixed across sets
        #[arg(long)]
        no_shuffle: bool,

        /// Exercise as "Name:1s_max:seconds_per_rep[:lower:upper]" (repeatable)
        #[arg(long = "exercise", required = true, value_parser = parse_exercise)]
        exercises: Vec<ExerciseSpec>,
    },

    /// Change a workout's scheduling parameters or exercises
    Configure {
        /// Workout id
        id: String,

        #[arg(long)]
        warmup: Option<f64>,

        #[arg(long)]
        sets: Option<u32>,

        #[arg(long)]
        rest_sets: Option<f64>,

        #[arg(long)]
        rest_exercises: Option<f64>,

        #[arg(long)]
        shuffle: Option<bool>,

        /// Replacement exercise list, as "Name:1s_max:seconds_per_rep[:lower:upper]" (repeatable)
        #[arg(long = "exercise", value_parser = parse_exercise)]
        exercises: Vec<ExerciseSpec>,
    },

    /// Rescale max reps from how the workout felt
    Calibrate {
        /// Workout id
        id: String,

        /// 1 (too easy) to 10 (too hard)
        #[arg(long, allow_negative_numbers = true)]
        feedback: i64,
    },

    /// Generate a sequence and play through it
    Play {
        /// Workout id
        id: String,

        /// Seed for a reproducible sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Don't wait in real time between ticks
        #[arg(long)]
        fast: bool,
    },
}

fn main() -> Result<()> {
    // Keep stdout for command output
    circuit_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let seed = load_seed(config.data.seed_file.as_deref())?;
    tracing::debug!("Using data directory {:?}", data_dir);
    let store = WorkoutStore::open(&data_dir, seed);

    match cli.command {
        Commands::Paths => cmd_paths(&store),
        Commands::List { path } => cmd_list(&store, &path),
        Commands::Show {
            id,
            generate,
            seed,
            json,
        } => cmd_show(&store, &id, generate, seed, json),
        Commands::Create {
            path,
            title,
            warmup,
            sets,
            rest_sets,
            rest_exercises,
            no_shuffle,
            exercises,
        } => {
            let overrides = WorkoutSettings {
                warmup_minutes: warmup,
                sets,
                rest_between_sets_minutes: rest_sets,
                rest_between_exercises_seconds: rest_exercises,
                shuffle: no_shuffle.then_some(false),
                exercises: None,
            };
            let draft = exercises.into_iter().fold(
                WorkoutDraft::with_defaults(path, title, &config.defaults).settings(&overrides),
                WorkoutDraft::exercise,
            );
            cmd_create(&store, draft)
        }
        Commands::Configure {
            id,
            warmup,
            sets,
            rest_sets,
            rest_exercises,
            shuffle,
            exercises,
        } => {
            let settings = WorkoutSettings {
                warmup_minutes: warmup,
                sets,
                rest_between_sets_minutes: rest_sets,
                rest_between_exercises_seconds: rest_exercises,
                shuffle,
                exercises: (!exercises.is_empty()).then_some(exercises),
            };
            cmd_configure(&store, &id, &settings)
        }
        Commands::Calibrate { id, feedback } => cmd_calibrate(&store, &id, feedback),
        Commands::Play { id, seed, fast } => {
            cmd_play(&store, &id, seed, fast, config.playback.tick_millis)
        }
    }
}

fn parse_exercise(value: &str) -> std::result::Result<ExerciseSpec, String> {
    let parts: Vec<&str> = value.split(':').map(str::trim).collect();
    if !(parts.len() == 3 || parts.len() == 5) {
        return Err(format!(
            "expected Name:1s_max:seconds_per_rep[:lower:upper], got '{}'",
            value
        ));
    }

    let mut exercise = ExerciseSpec::new(parts[0]);
    exercise.one_second_max = parts[1]
        .parse()
        .map_err(|e| format!("invalid 1s_max '{}': {}", parts[1], e))?;
    exercise.seconds_per_rep = parts[2]
        .parse()
        .map_err(|e| format!("invalid seconds_per_rep '{}': {}", parts[2], e))?;
    if parts.len() == 5 {
        exercise.lower = parts[3]
            .parse()
            .map_err(|e| format!("invalid lower '{}': {}", parts[3], e))?;
        exercise.upper = parts[4]
            .parse()
            .map_err(|e| format!("invalid upper '{}': {}", parts[4], e))?;
    }
    Ok(exercise)
}

fn make_rng(seed: Option<u64>) -> impl RandomSource {
    match seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    }
}

fn cmd_paths(store: &WorkoutStore) -> Result<()> {
    let paths = store.paths()?;
    if paths.is_empty() {
        println!("No workouts yet. Create one with `circuit create`.");
        return Ok(());
    }
    for summary in paths {
        let noun = if summary.count == 1 { "workout" } else { "workouts" };
        println!("{}  ({} {})", summary.path, summary.count, noun);
    }
    Ok(())
}

fn cmd_list(store: &WorkoutStore, path: &str) -> Result<()> {
    let workouts = store.workouts_by_path(path)?;
    if workouts.is_empty() {
        println!("No workouts in path '{}'.", path);
        return Ok(());
    }
    println!("{}", path);
    for workout in workouts {
        println!(
            "  {}  {}  ({} sets, {} exercises)",
            workout.id,
            workout.title,
            workout.sets,
            workout.exercises.len()
        );
    }
    Ok(())
}

fn cmd_show(
    store: &WorkoutStore,
    id: &str,
    generate: bool,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let workout = store.find(id)?;

    if !json {
        display_workout(&workout);
    }

    if generate {
        let steps = expand(&workout, &mut make_rng(seed));
        if json {
            println!("{}", serde_json::to_string_pretty(&steps)?);
        } else {
            display_sequence(&steps);
        }
    }

    Ok(())
}

fn cmd_create(store: &WorkoutStore, draft: WorkoutDraft) -> Result<()> {
    let workout = store.create(draft)?;
    println!("✓ Created workout '{}'", workout.title);
    println!("  id: {}", workout.id);
    Ok(())
}

fn cmd_configure(store: &WorkoutStore, id: &str, settings: &WorkoutSettings) -> Result<()> {
    if settings.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }
    let workout = store.configure(id, settings)?;
    println!("✓ Updated '{}'", workout.title);
    display_workout(&workout);
    Ok(())
}

fn cmd_calibrate(store: &WorkoutStore, id: &str, feedback: i64) -> Result<()> {
    let before = store.find(id)?;
    let after = store.calibrate(id, feedback)?;

    println!("✓ Calibrated '{}' with feedback {}/10", after.title, feedback);
    for (old, new) in before.exercises.iter().zip(&after.exercises) {
        println!(
            "  {}: 1s_max {} → {}",
            new.name, old.one_second_max, new.one_second_max
        );
    }
    Ok(())
}

fn cmd_play(
    store: &WorkoutStore,
    id: &str,
    seed: Option<u64>,
    fast: bool,
    tick_millis: u64,
) -> Result<()> {
    let workout = store.find(id)?;
    workout.ensure_playable()?;

    let steps = expand(&workout, &mut make_rng(seed));
    let total = total_duration_seconds(&steps);
    let finish = chrono::Local::now() + chrono::Duration::seconds(total as i64);

    println!("▶ {} ({} steps, {})", workout.title, steps.len(), format_total(total));
    if !fast {
        println!("  Finishes around {}", finish.format("%H:%M"));
    }

    let mut player = Player::new(steps);
    player.start();
    announce(&player);

    let tick = Duration::from_millis(tick_millis);
    while !player.is_complete() {
        if !fast {
            std::thread::sleep(tick);
        }
        if player.tick() {
            announce(&player);
        }
    }

    println!("\n✓ Workout complete!");
    println!("  Rate it with: circuit calibrate {} --feedback <1-10>", workout.id);
    Ok(())
}

fn announce(player: &Player) {
    if let Some(step) = player.current() {
        println!(
            "[{}/{}] {}  {}",
            player.position(),
            player.len(),
            format_clock(player.time_left()),
            describe_step(step)
        );
        if let Some(next) = player.upcoming() {
            println!("        next: {}", next.title());
        }
    }
}

fn describe_step(step: &TimedStep) -> String {
    match step {
        TimedStep::Exercise {
            exercise_name,
            reps,
            set_number,
            ..
        } => format!("{} - {} reps | Set {}", exercise_name, reps, set_number),
        other => other.title(),
    }
}

fn format_total(seconds: u64) -> String {
    format!("{}m {:02}s", seconds / 60, seconds % 60)
}

fn display_workout(workout: &WorkoutDefinition) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", workout.title);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Path:    {}", workout.path);
    if !workout.tags.is_empty() {
        println!("  Tags:    {}", workout.tags.join(", "));
    }
    println!("  Warmup:  {} min", workout.warmup_minutes);
    println!("  Sets:    {}", workout.sets);
    println!(
        "  Rest:    {} min between sets, {} s between exercises",
        workout.rest_between_sets_minutes, workout.rest_between_exercises_seconds
    );
    if workout.sets > 1 {
        let longest = (1..workout.sets)
            .map(|set| rest_between_sets_seconds(workout.rest_between_sets_minutes, set, workout.sets))
            .max()
            .unwrap_or(0);
        println!("           (set rests peak at {})", format_clock(longest));
    }
    println!("  Shuffle: {}", if workout.shuffle { "yes" } else { "no" });
    println!();

    for (idx, exercise) in workout.exercises.iter().enumerate() {
        let range = rep_range(exercise);
        println!(
            "  {}. {}  (max reps {}, {} s/rep, range {}-{})",
            idx + 1,
            exercise.name,
            exercise.one_second_max,
            exercise.seconds_per_rep,
            range.min,
            range.max
        );
    }
    println!();
}

fn display_sequence(steps: &[TimedStep]) {
    println!("  Generated sequence:");
    for (idx, step) in steps.iter().enumerate() {
        println!("  {:>3}. {}", idx + 1, step);
    }
    println!(
        "\n  Total: {}",
        format_total(total_duration_seconds(steps))
    );
}
