//! Game loop.
use super::GameLoopConfig;
use crate::{
    error::SerpentError,
    record::{Record, RecordValue, Recorder},
    Direction, Env, GameSnapshot, Policy,
};
use anyhow::Result;
use log::info;

/// Summary of a finished episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeResult {
    /// Episode counter, starting from 1.
    pub number_game: usize,

    /// Fruits eaten in the episode.
    pub score: usize,

    /// Decisions taken in the episode.
    pub step: usize,
}

/// Plays episodes until the episode counter exceeds
/// [`GameLoopConfig::max_number_game`].
///
/// Every tick the loop publishes a fresh [`GameSnapshot`] of the game and
/// asks the policy for a direction:
///
/// 1. Build the snapshot from the environment and the loop counters.
/// 2. Call [`Policy::new_direction`]. The policy is called once more after
///    the last episode so that it observes the end of that episode.
/// 3. If the episode counter exceeds `max_number_game`, log the final
///    statistics and return.
/// 4. Increment the step counters and advance the environment.
/// 5. If the episode is over, update the best score and step, append an
///    [`EpisodeResult`] to the history, write a [`Record`] and reset the
///    environment.
#[derive(Debug)]
pub struct GameLoop {
    max_number_game: usize,
    record_interval: usize,
    number_game: usize,
    number_all_step: usize,
    step: usize,
    best_score: usize,
    best_step: usize,
    last_direction: Option<Direction>,
    results_history: Vec<EpisodeResult>,
}

impl GameLoop {
    /// Constructs the game loop.
    pub fn build(config: &GameLoopConfig) -> Result<Self> {
        if config.record_interval == 0 {
            return Err(SerpentError::Configuration("record_interval must be positive".into()).into());
        }
        Ok(Self {
            max_number_game: config.max_number_game,
            record_interval: config.record_interval,
            number_game: 0,
            number_all_step: 0,
            step: 0,
            best_score: 0,
            best_step: 0,
            last_direction: None,
            results_history: vec![],
        })
    }

    /// Runs the loop.
    pub fn run<E, P, R>(&mut self, env: &mut E, policy: &mut P, recorder: &mut R) -> Result<()>
    where
        E: Env,
        P: Policy + ?Sized,
        R: Recorder + ?Sized,
    {
        info!(
            "Settings game: resolution {} x {}, max number game {}",
            env.frame().width(),
            env.frame().height(),
            self.max_number_game
        );
        self.new_game(env)?;

        loop {
            let snapshot = self.snapshot(env);
            let direction = policy.new_direction(&snapshot)?;

            if self.number_game > self.max_number_game {
                info!(
                    "Final stats: best score {}, best step {}",
                    self.best_score, self.best_step
                );
                recorder.flush();
                return Ok(());
            }

            self.step += 1;
            self.number_all_step += 1;
            let outcome = env.advance(direction)?;
            self.last_direction = Some(env.direction());

            if outcome.is_over {
                self.game_over(env.score(), recorder);
                self.new_game(env)?;
            }
        }
    }

    fn new_game<E: Env>(&mut self, env: &mut E) -> Result<()> {
        env.reset()?;
        self.step = 0;
        self.number_game += 1;
        Ok(())
    }

    fn game_over<R: Recorder + ?Sized>(&mut self, score: usize, recorder: &mut R) {
        self.best_score = self.best_score.max(score);
        self.best_step = self.best_step.max(self.step);
        self.results_history.push(EpisodeResult {
            number_game: self.number_game,
            score,
            step: self.step,
        });

        info!(
            "Number game: {}, score: {}, step: {}, sum all steps: {}",
            self.number_game, score, self.step, self.number_all_step
        );

        if self.number_game % self.record_interval == 0 {
            recorder.write(Record::from_slice(&[
                ("number_game", RecordValue::Scalar(self.number_game as _)),
                ("score", RecordValue::Scalar(score as _)),
                ("step", RecordValue::Scalar(self.step as _)),
                ("number_all_step", RecordValue::Scalar(self.number_all_step as _)),
                ("best_score", RecordValue::Scalar(self.best_score as _)),
            ]));
        }
    }

    fn snapshot<E: Env>(&self, env: &E) -> GameSnapshot {
        let snapshot = GameSnapshot::new(env.frame().clone())
            .with_score(env.score())
            .with_best_score(self.best_score)
            .with_step(self.step)
            .with_best_step(self.best_step)
            .with_number_game(self.number_game)
            .with_number_all_step(self.number_all_step)
            .with_positions(env.snake_position(), env.snake_body(), env.fruit_position());
        match self.last_direction {
            Some(d) => snapshot.with_last_direction(d),
            None => snapshot,
        }
    }

    /// Finished episodes, oldest first.
    pub fn results_history(&self) -> &[EpisodeResult] {
        &self.results_history
    }

    /// Best score over finished episodes.
    pub fn best_score(&self) -> usize {
        self.best_score
    }

    /// Best number of steps over finished episodes.
    pub fn best_step(&self) -> usize {
        self.best_step
    }

    /// Decisions taken over all episodes.
    pub fn number_all_step(&self) -> usize {
        self.number_all_step
    }
}
