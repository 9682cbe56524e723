use anyhow::Result;
use clap::{Parser, ValueEnum};
use serpent::{run_dqn, run_greedy, run_random, SerpentConfig};
use serpent_candle_agent::learner::Algorithm;
use serpent_core::record::{NullRecorder, Recorder};
use serpent_tensorboard::TensorboardRecorder;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Train a DQN agent from scratch
    Train,

    /// Play a trained checkpoint greedily
    Play,

    /// Play random directions
    Random,
}

/// Train/play deep Q-learning agents on the snake game
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// What to run
    #[arg(value_enum, default_value_t = Mode::Train)]
    mode: Mode,

    /// Configuration file, the training profile is used if not given
    #[arg(long)]
    config: Option<PathBuf>,

    /// Learning algorithm (dqn, double_dqn, dueling_dqn, dueling_double_dqn)
    #[arg(long)]
    algorithm: Option<String>,

    /// Checkpoint to play, without the .safetensors suffix
    #[arg(long, default_value = "models/model1")]
    model: String,

    /// Number of episodes to play
    #[arg(long)]
    max_number_game: Option<usize>,

    /// Directory of TFRecord files, nothing is recorded if not given
    #[arg(long)]
    logdir: Option<PathBuf>,

    /// Write the configuration into the given file and exit
    #[arg(long)]
    create_config: Option<PathBuf>,

    /// Show config
    #[arg(long, default_value_t = false)]
    show_config: bool,
}

fn load_config(args: &Args) -> Result<SerpentConfig> {
    let mut config = match &args.config {
        Some(path) => SerpentConfig::load(path)?,
        None => SerpentConfig::default(),
    };
    if let Some(algorithm) = &args.algorithm {
        config = config.algorithm(algorithm.parse::<Algorithm>()?);
    }
    if let Some(n) = args.max_number_game {
        config = config.max_number_game(n);
    }
    Ok(config)
}

fn create_recorder(args: &Args) -> Box<dyn Recorder> {
    match &args.logdir {
        Some(logdir) => Box::new(TensorboardRecorder::new(logdir)),
        None => Box::new(NullRecorder::new()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = load_config(&args)?;

    if let Some(path) = &args.create_config {
        config.save(path)?;
        println!("Create config file: {}", path.display());
        return Ok(());
    }
    if args.show_config {
        println!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    let mut recorder = create_recorder(&args);
    let game_loop = match args.mode {
        Mode::Train => run_dqn(&config, &mut recorder)?,
        Mode::Play => run_greedy(&config, &args.model, &mut recorder)?,
        Mode::Random => run_random(&config, &mut recorder)?,
    };
    println!(
        "Best score: {}, best step: {}",
        game_loop.best_score(),
        game_loop.best_step()
    );

    Ok(())
}
