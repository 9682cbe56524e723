use anyhow::Result;
use serpent::{run_dqn, run_greedy, run_random, SerpentConfig};
use serpent_candle_agent::learner::Algorithm;
use serpent_core::{
    error::SerpentError,
    record::{BufferedRecorder, NullRecorder},
};
use tempdir::TempDir;

fn small_training_config(dir: &TempDir, algorithm: Algorithm) -> SerpentConfig {
    let mut config = SerpentConfig::default()
        .algorithm(algorithm)
        .max_number_game(4);
    config.agent = config
        .agent
        .step_without_learn(20)
        .batch_size(4)
        .memory_size(200)
        // Exploration never stops, so every episode ends at a wall.
        .epsilon(1.0, 1.0, 0.0)
        .save_model_after_games(2)
        .file_name(dir.path().join("model").to_string_lossy());
    config
}

#[test]
fn test_random_run() -> Result<()> {
    let config = SerpentConfig::default().max_number_game(5);
    let mut recorder = BufferedRecorder::new();
    let game_loop = run_random(&config, &mut recorder)?;

    let history = game_loop.results_history();
    assert_eq!(history.len(), 5);
    assert_eq!(
        history.iter().map(|r| r.number_game).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5]
    );
    assert!(history.iter().all(|r| r.step > 0));
    assert_eq!(
        game_loop.number_all_step(),
        history.iter().map(|r| r.step).sum::<usize>()
    );
    assert_eq!(recorder.len(), 5);
    Ok(())
}

#[test]
fn test_train_writes_checkpoints() -> Result<()> {
    let dir = TempDir::new("serpent_train")?;
    for algorithm in [Algorithm::Dqn, Algorithm::DuelingDoubleDqn] {
        let config = small_training_config(&dir, algorithm);
        let game_loop = run_dqn(&config, &mut NullRecorder::new())?;
        assert_eq!(game_loop.results_history().len(), 4);

        assert!(dir.path().join("model1.safetensors").is_file());
        assert!(dir.path().join("model2.safetensors").is_file());

        // The checkpoint can be played by a network of the same shape.
        let play = config.clone().max_number_game(0);
        let model = dir.path().join("model1");
        run_greedy(&play, &model.to_string_lossy(), &mut NullRecorder::new())?;
    }
    Ok(())
}

#[test]
fn test_play_rejects_mismatched_checkpoint() -> Result<()> {
    let dir = TempDir::new("serpent_play")?;
    let config = small_training_config(&dir, Algorithm::Dqn);
    run_dqn(&config, &mut NullRecorder::new())?;

    let play = config.algorithm(Algorithm::DuelingDqn).max_number_game(0);
    let model = dir.path().join("model1");
    let err = run_greedy(&play, &model.to_string_lossy(), &mut NullRecorder::new()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SerpentError>(),
        Some(SerpentError::Configuration(_))
    ));
    Ok(())
}

#[test]
fn test_unknown_algorithm_is_rejected() {
    let err = "triple_dqn".parse::<Algorithm>().unwrap_err();
    assert!(matches!(err, SerpentError::Configuration(_)));
}
