//! Snake game on a board of square cells.
mod config;
use anyhow::Result;
pub use config::SnakeEnvConfig;
use log::{debug, info};
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
use serpent_core::{error::SerpentError, Direction, Env, Frame, Outcome, Position};
use std::collections::VecDeque;

/// Snake game.
///
/// Positions are given in cells, `(0, 0)` being the top-left cell. An
/// episode starts with a snake of three cells heading right in the middle
/// row and one fruit on a free cell away from the border rows and columns
/// at the top and left.
pub struct SnakeEnv {
    config: SnakeEnvConfig,
    cells_x: i32,
    cells_y: i32,

    /// Head first.
    body: VecDeque<Position>,
    direction: Direction,
    fruit: Position,
    score: usize,
    frame: Frame,
    rng: SmallRng,
}

impl SnakeEnv {
    /// Number of cells along the x and y axes.
    pub fn cells(&self) -> (i32, i32) {
        (self.cells_x, self.cells_y)
    }

    fn is_inside(&self, p: Position) -> bool {
        p.x >= 0 && p.x < self.cells_x && p.y >= 0 && p.y < self.cells_y
    }

    /// Places the fruit uniformly on a free cell of `[1, cells)` in both axes.
    ///
    /// The fruit stays where it is if the snake covers every candidate cell.
    fn spawn_fruit(&mut self) {
        let free = (1..self.cells_y)
            .flat_map(|y| (1..self.cells_x).map(move |x| Position::new(x, y)))
            .filter(|p| !self.body.contains(p))
            .collect::<Vec<_>>();
        match free.choose(&mut self.rng) {
            Some(p) => self.fruit = *p,
            None => debug!("No free cell for the fruit"),
        }
    }

    fn render(&mut self) {
        let u = self.config.unit_size;
        let cell = |p: Position| (p.x as usize * u, p.y as usize * u);

        self.frame.fill(self.config.background_color);
        for p in self.body.iter().skip(1) {
            let (x, y) = cell(*p);
            self.frame.fill_rect(x, y, u, u, self.config.snake_body_color);
        }
        let (x, y) = cell(self.fruit);
        self.frame.fill_rect(x, y, u, u, self.config.apple_color);
        if let Some(head) = self.body.front() {
            let (x, y) = cell(*head);
            self.frame.fill_rect(x, y, u, u, self.config.snake_head_color);
        }
    }
}

impl Env for SnakeEnv {
    type Config = SnakeEnvConfig;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        if config.unit_size == 0 {
            return Err(SerpentError::Configuration("unit_size must be positive".into()).into());
        }
        let cells_x = (config.window_x / config.unit_size) as i32;
        let cells_y = (config.window_y / config.unit_size) as i32;
        if cells_x < 4 || cells_y < 2 {
            return Err(SerpentError::Configuration(format!(
                "board of {}x{} cells is too small",
                cells_x, cells_y
            ))
            .into());
        }
        info!(
            "Snake board: {} x {} pixels, {} x {} cells",
            config.window_x, config.window_y, cells_x, cells_y
        );

        let mut env = Self {
            config: config.clone(),
            cells_x,
            cells_y,
            body: VecDeque::new(),
            direction: Direction::Right,
            fruit: Position::new(0, 0),
            score: 0,
            frame: Frame::new(config.window_x, config.window_y),
            rng: SmallRng::seed_from_u64(seed as u64),
        };
        env.reset()?;
        Ok(env)
    }

    fn reset(&mut self) -> Result<()> {
        let x = self.cells_x / 4;
        let y = self.cells_y / 2;
        self.body = (0..3).map(|i| Position::new(x + 1 - i, y)).collect();
        self.direction = Direction::Right;
        self.score = 0;
        self.spawn_fruit();
        self.render();
        Ok(())
    }

    fn advance(&mut self, direction: Direction) -> Result<Outcome> {
        if direction != self.direction.opposite() {
            self.direction = direction;
        }

        let head = self.body[0].moved(self.direction);
        self.body.push_front(head);

        let ate_fruit = head == self.fruit;
        if ate_fruit {
            self.score += 1;
        } else {
            self.body.pop_back();
        }

        if !self.is_inside(head) || self.body.iter().skip(1).any(|p| *p == head) {
            return Ok(Outcome {
                ate_fruit,
                is_over: true,
            });
        }

        if ate_fruit {
            self.spawn_fruit();
        }
        self.render();

        Ok(Outcome {
            ate_fruit,
            is_over: false,
        })
    }

    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn score(&self) -> usize {
        self.score
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn snake_position(&self) -> Position {
        self.body[0]
    }

    fn snake_body(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }

    fn fruit_position(&self) -> Position {
        self.fruit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    fn env() -> SnakeEnv {
        SnakeEnv::build(&SnakeEnvConfig::default(), 42).unwrap()
    }

    #[test]
    fn test_initial_layout() {
        let env = env();
        assert_eq!(env.cells(), (12, 12));
        assert_eq!(env.snake_position(), Position::new(4, 6));
        assert_eq!(
            env.snake_body(),
            vec![Position::new(4, 6), Position::new(3, 6), Position::new(2, 6)]
        );
        assert_eq!(env.direction(), Direction::Right);
        assert_eq!(env.score(), 0);

        let fruit = env.fruit_position();
        assert!((1..12).contains(&fruit.x) && (1..12).contains(&fruit.y));
        assert!(!env.snake_body().contains(&fruit));
    }

    #[test]
    fn test_render_colors() {
        let env = env();
        let config = SnakeEnvConfig::default();
        let frame = env.frame();
        assert_eq!(frame.pixel(4 * 20 + 5, 6 * 20 + 5), config.snake_head_color);
        assert_eq!(frame.pixel(3 * 20, 6 * 20 + 19), config.snake_body_color);
        let fruit = env.fruit_position();
        assert_eq!(
            frame.pixel(fruit.x as usize * 20 + 10, fruit.y as usize * 20 + 10),
            config.apple_color
        );
        assert_eq!(frame.pixel(0, 0), config.background_color);
    }

    #[test]
    fn test_reversal_is_ignored() -> Result<()> {
        let mut env = env();
        env.fruit = Position::new(1, 1);
        let outcome = env.advance(Direction::Left)?;
        assert!(!outcome.is_over);
        assert_eq!(env.direction(), Direction::Right);
        assert_eq!(env.snake_position(), Position::new(5, 6));
        Ok(())
    }

    #[test]
    fn test_eating_grows_snake() -> Result<()> {
        let mut env = env();
        env.fruit = Position::new(5, 6);
        let outcome = env.advance(Direction::Right)?;
        assert!(outcome.ate_fruit && !outcome.is_over);
        assert_eq!(env.score(), 1);
        assert_eq!(env.snake_body().len(), 4);
        assert!(!env.snake_body().contains(&env.fruit_position()));
        Ok(())
    }

    #[test]
    fn test_wall_collision() -> Result<()> {
        let mut env = env();
        env.fruit = Position::new(1, 1);
        for _ in 0..7 {
            assert!(!env.advance(Direction::Right)?.is_over);
        }
        assert_eq!(env.snake_position(), Position::new(11, 6));
        assert!(env.advance(Direction::Right)?.is_over);
        Ok(())
    }

    #[test]
    fn test_self_collision() -> Result<()> {
        let mut env = env();
        env.fruit = Position::new(1, 1);
        env.body = [(5, 5), (5, 6), (4, 6), (3, 6), (3, 5)]
            .iter()
            .map(|&(x, y)| Position::new(x, y))
            .collect();
        env.direction = Direction::Up;
        assert!(!env.advance(Direction::Left)?.is_over);
        assert!(env.advance(Direction::Down)?.is_over);
        Ok(())
    }

    #[test]
    fn test_reset_starts_new_episode() -> Result<()> {
        let mut env = env();
        env.fruit = Position::new(5, 6);
        env.advance(Direction::Right)?;
        env.reset()?;
        assert_eq!(env.score(), 0);
        assert_eq!(env.snake_body().len(), 3);
        Ok(())
    }

    #[test]
    fn test_small_board_is_rejected() {
        let config = SnakeEnvConfig::default().window(40, 40);
        assert!(SnakeEnv::build(&config, 0).is_err());
    }

    #[test]
    fn test_serde_snake_env_config() -> Result<()> {
        let config = SnakeEnvConfig::default().unit_size(10).apple_color([1, 2, 3]);
        let dir = TempDir::new("snake_env_config")?;
        let path = dir.path().join("snake_env.yaml");

        config.save(&path)?;
        let config_ = SnakeEnvConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
