use std::fmt;

use crate::ai::{Opponent, Tier, TieredOpponent};
use crate::error::{EngineError, ResultsError};
use crate::game::{Board, Player, WinLine};
use crate::results::ResultSink;

/// Outcome of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    InProgress,
    HumanWon(WinLine),
    ComputerWon(WinLine),
    Draw,
}

impl RoundOutcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, RoundOutcome::InProgress)
    }

    /// The winning line, when the round ended in a win.
    pub fn win_line(&self) -> Option<WinLine> {
        match self {
            RoundOutcome::HumanWon(line) | RoundOutcome::ComputerWon(line) => Some(*line),
            _ => None,
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RoundOutcome::InProgress => "None",
            RoundOutcome::HumanWon(_) => "Player won",
            RoundOutcome::ComputerWon(_) => "Computer won",
            RoundOutcome::Draw => "Draw",
        };
        f.write_str(text)
    }
}

/// Outcome of a whole game, decided on cumulative round scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    HumanWon,
    ComputerWon,
    Draw,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameOutcome::HumanWon => "Player won",
            GameOutcome::ComputerWon => "Computer won",
            GameOutcome::Draw => "Draw",
        };
        f.write_str(text)
    }
}

/// Lifecycle phase of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingConfig,
    InRound,
    RoundOver,
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::AwaitingConfig => "AwaitingConfig",
            Phase::InRound => "InRound",
            Phase::RoundOver => "RoundOver",
            Phase::GameOver => "GameOver",
        };
        f.write_str(name)
    }
}

/// Snapshot of everything about the current game apart from the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub phase: Phase,
    pub round: u32,
    pub max_rounds: u32,
    pub human_score: u32,
    pub computer_score: u32,
    pub tier: Option<Tier>,
    pub round_outcome: RoundOutcome,
    pub game_outcome: Option<GameOutcome>,
}

impl GameState {
    fn initial() -> Self {
        GameState {
            phase: Phase::AwaitingConfig,
            round: 1,
            max_rounds: 0,
            human_score: 0,
            computer_score: 0,
            tier: None,
            round_outcome: RoundOutcome::InProgress,
            game_outcome: None,
        }
    }
}

/// Round and game lifecycle driver.
///
/// Owns the board, the scores, the computer policy and the result sink.
/// Every mutating call is synchronous: the human move and the computer's
/// reply happen inside one `submit_human_move` call, so callers never
/// observe a half-played turn. A failed call leaves all observable state
/// exactly as it was.
///
/// The engine pushes nothing to the outside world. Callers poll
/// [`revision`](GameEngine::revision) and re-read [`state`](GameEngine::state)
/// and [`board`](GameEngine::board) when it changes. Sink failures never
/// fail a gameplay call; the latest one is held for
/// [`take_sink_error`](GameEngine::take_sink_error).
pub struct GameEngine<S: ResultSink> {
    board: Board,
    state: GameState,
    policy: Box<dyn Opponent>,
    sink: S,
    seed: Option<u64>,
    game_id: u32,
    revision: u64,
    sink_error: Option<ResultsError>,
}

impl<S: ResultSink> GameEngine<S> {
    /// Engine whose policies draw from OS entropy. Opens the result sink
    /// for game 1.
    pub fn new(sink: S) -> Self {
        Self::build(sink, None)
    }

    /// Engine whose configured policies draw from a fixed seed, making
    /// whole games reproducible.
    pub fn with_seed(sink: S, seed: u64) -> Self {
        Self::build(sink, Some(seed))
    }

    fn build(sink: S, seed: Option<u64>) -> Self {
        let mut engine = GameEngine {
            board: Board::new(),
            state: GameState::initial(),
            // Placeholder until configure installs the requested tier.
            policy: build_policy(Tier::Two, seed),
            sink,
            seed,
            game_id: 1,
            revision: 0,
            sink_error: None,
        };
        let res = engine.sink.open_game(engine.game_id);
        engine.note_sink(res);
        engine
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    /// Bumped after every successful mutating call.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The most recent result-sink failure, if any, clearing it.
    pub fn take_sink_error(&mut self) -> Option<ResultsError> {
        self.sink_error.take()
    }

    /// Replace the computer policy. `configure` installs a tier policy, so
    /// call this afterwards to substitute a custom opponent.
    pub fn set_policy(&mut self, policy: Box<dyn Opponent>) {
        self.policy = policy;
    }

    /// Pick the difficulty and the number of rounds, starting round 1.
    /// Valid once per game, before any move.
    pub fn configure(&mut self, tier: Tier, max_rounds: u32) -> Result<(), EngineError> {
        if self.state.phase != Phase::AwaitingConfig {
            return Err(EngineError::InvalidTransition {
                op: "configure",
                phase: self.state.phase,
            });
        }
        if max_rounds == 0 {
            return Err(EngineError::InvalidConfiguration(
                "a game needs at least one round".to_string(),
            ));
        }

        self.policy = build_policy(tier, self.seed);
        self.state.tier = Some(tier);
        self.state.max_rounds = max_rounds;
        self.state.round = 1;
        self.state.phase = Phase::InRound;
        self.revision += 1;
        Ok(())
    }

    /// Play one human move and, if it does not end the round, the
    /// computer's reply. Both placements are committed before returning.
    pub fn submit_human_move(&mut self, column: usize) -> Result<(), EngineError> {
        if self.state.phase != Phase::InRound {
            return Err(EngineError::InvalidTransition {
                op: "submit_human_move",
                phase: self.state.phase,
            });
        }

        let row = self
            .board
            .place(column, Player::Human)
            .map_err(|reason| EngineError::InvalidMove { column, reason })?;

        if let Some(line) = self.board.check_win_at(row, column) {
            self.finish_round(RoundOutcome::HumanWon(line));
            self.revision += 1;
            return Ok(());
        }

        // Rounds start empty and placements strictly alternate, so after a
        // non-winning human move the board cannot be full; the computer
        // always has an open column.
        let reply = self.policy.choose_column(&mut self.board);
        let reply_row = match self.board.place(reply, Player::Computer) {
            Ok(reply_row) => reply_row,
            Err(reason) => {
                // A policy returning a closed column is a bug in the
                // policy. Back out the human piece so the caller sees an
                // untouched round.
                self.board.unplace(row, column);
                return Err(EngineError::InvalidMove {
                    column: reply,
                    reason,
                });
            }
        };

        if let Some(line) = self.board.check_win_at(reply_row, reply) {
            self.finish_round(RoundOutcome::ComputerWon(line));
        } else if self.board.is_full() {
            self.finish_round(RoundOutcome::Draw);
        }
        self.revision += 1;
        Ok(())
    }

    /// Move on from a finished round: either start the next one on a fresh
    /// board or, after the last round, settle the game.
    pub fn advance_round(&mut self) -> Result<(), EngineError> {
        if self.state.phase != Phase::RoundOver {
            return Err(EngineError::InvalidTransition {
                op: "advance_round",
                phase: self.state.phase,
            });
        }

        if self.state.round == self.state.max_rounds {
            self.finish_game();
        } else {
            self.state.round += 1;
            self.board.clear();
            self.state.round_outcome = RoundOutcome::InProgress;
            self.state.phase = Phase::InRound;
        }
        self.revision += 1;
        Ok(())
    }

    /// Settle the game from the current scores without playing the
    /// remaining rounds. Valid while a round is in progress or just after
    /// one ended.
    pub fn end_game_early(&mut self) -> Result<(), EngineError> {
        if self.state.phase != Phase::InRound && self.state.phase != Phase::RoundOver {
            return Err(EngineError::InvalidTransition {
                op: "end_game_early",
                phase: self.state.phase,
            });
        }
        self.finish_game();
        self.revision += 1;
        Ok(())
    }

    /// Abandon whatever is in progress and return to the unconfigured
    /// state under a fresh game id. Valid in any phase.
    pub fn new_game(&mut self) {
        let res = self.sink.close_game();
        self.note_sink(res);

        self.board.clear();
        self.state = GameState::initial();
        self.game_id += 1;

        let res = self.sink.open_game(self.game_id);
        self.note_sink(res);
        self.revision += 1;
    }

    fn finish_round(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::HumanWon(_) => self.state.human_score += 1,
            RoundOutcome::ComputerWon(_) => self.state.computer_score += 1,
            RoundOutcome::Draw => {
                self.state.human_score += 1;
                self.state.computer_score += 1;
            }
            RoundOutcome::InProgress => {}
        }
        self.state.round_outcome = outcome;
        self.state.phase = Phase::RoundOver;

        let res = self.sink.record_round(self.state.round, &outcome);
        self.note_sink(res);
    }

    fn finish_game(&mut self) {
        let outcome = if self.state.human_score == self.state.computer_score {
            GameOutcome::Draw
        } else if self.state.human_score > self.state.computer_score {
            GameOutcome::HumanWon
        } else {
            GameOutcome::ComputerWon
        };
        self.state.game_outcome = Some(outcome);
        self.state.phase = Phase::GameOver;

        let res =
            self.sink
                .record_summary(self.state.human_score, self.state.computer_score, &outcome);
        self.note_sink(res);
        let res = self.sink.close_game();
        self.note_sink(res);
    }

    fn note_sink(&mut self, result: Result<(), ResultsError>) {
        if let Err(err) = result {
            self.sink_error = Some(err);
        }
    }
}

fn build_policy(tier: Tier, seed: Option<u64>) -> Box<dyn Opponent> {
    match seed {
        Some(seed) => Box::new(TieredOpponent::seeded(tier, seed)),
        None => Box::new(TieredOpponent::new(tier)),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::game::Cell;
    use crate::results::MemorySink;

    /// Opponent that replays a fixed column script.
    struct ScriptedOpponent {
        cols: Vec<usize>,
        next: usize,
    }

    impl ScriptedOpponent {
        fn new(cols: Vec<usize>) -> Self {
            ScriptedOpponent { cols, next: 0 }
        }
    }

    impl Opponent for ScriptedOpponent {
        fn choose_column(&mut self, _board: &mut Board) -> usize {
            let col = self.cols[self.next];
            self.next += 1;
            col
        }

        fn name(&self) -> &str {
            "Scripted"
        }
    }

    /// Sink that refuses every record.
    struct FailingSink;

    impl ResultSink for FailingSink {
        fn open_game(&mut self, _game_id: u32) -> Result<(), ResultsError> {
            Err(self.refusal())
        }

        fn record_round(&mut self, _round: u32, _outcome: &RoundOutcome) -> Result<(), ResultsError> {
            Err(self.refusal())
        }

        fn record_summary(
            &mut self,
            _human_score: u32,
            _computer_score: u32,
            _outcome: &GameOutcome,
        ) -> Result<(), ResultsError> {
            Err(self.refusal())
        }

        fn close_game(&mut self) -> Result<(), ResultsError> {
            Err(self.refusal())
        }
    }

    impl FailingSink {
        fn refusal(&self) -> ResultsError {
            ResultsError::Write {
                path: PathBuf::from("nowhere"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "refused"),
            }
        }
    }

    fn configured(tier: Tier, max_rounds: u32) -> GameEngine<MemorySink> {
        let mut engine = GameEngine::with_seed(MemorySink::new(), 7);
        engine.configure(tier, max_rounds).unwrap();
        engine
    }

    /// Human stacks column 0 to a vertical four; the scripted computer
    /// answers in column 1 and never interferes.
    fn play_human_win(engine: &mut GameEngine<MemorySink>) {
        engine.set_policy(Box::new(ScriptedOpponent::new(vec![1, 1, 1])));
        for _ in 0..4 {
            engine.submit_human_move(0).unwrap();
        }
        assert!(matches!(
            engine.state().round_outcome,
            RoundOutcome::HumanWon(_)
        ));
    }

    /// The scripted computer stacks column 6 to a vertical four while the
    /// human scatters harmlessly.
    fn play_computer_win(engine: &mut GameEngine<MemorySink>) {
        engine.set_policy(Box::new(ScriptedOpponent::new(vec![6, 6, 6, 6])));
        for col in [0, 1, 2, 4] {
            engine.submit_human_move(col).unwrap();
        }
        assert!(matches!(
            engine.state().round_outcome,
            RoundOutcome::ComputerWon(_)
        ));
    }

    #[test]
    fn test_engine_starts_awaiting_config() {
        let engine = GameEngine::new(MemorySink::new());
        let state = engine.state();
        assert_eq!(state.phase, Phase::AwaitingConfig);
        assert_eq!(state.round, 1);
        assert_eq!(state.human_score, 0);
        assert_eq!(state.computer_score, 0);
        assert_eq!(state.tier, None);
        assert_eq!(engine.revision(), 0);
        assert_eq!(engine.game_id(), 1);
        assert_eq!(engine.sink().lines(), ["Game 1 Results"]);
    }

    #[test]
    fn test_configure_starts_round_one() {
        let mut engine = GameEngine::new(MemorySink::new());
        engine.configure(Tier::Three, 5).unwrap();

        let state = engine.state();
        assert_eq!(state.phase, Phase::InRound);
        assert_eq!(state.tier, Some(Tier::Three));
        assert_eq!(state.max_rounds, 5);
        assert_eq!(state.round, 1);
        assert_eq!(engine.revision(), 1);
    }

    #[test]
    fn test_configure_is_one_shot() {
        let mut engine = configured(Tier::Two, 3);
        let err = engine.configure(Tier::One, 2).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidTransition {
                op: "configure",
                ..
            }
        ));
        assert_eq!(engine.state().tier, Some(Tier::Two));
    }

    #[test]
    fn test_configure_rejects_zero_rounds() {
        let mut engine = GameEngine::new(MemorySink::new());
        let err = engine.configure(Tier::Two, 0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));
        assert_eq!(engine.state().phase, Phase::AwaitingConfig);
        assert_eq!(engine.revision(), 0);

        // The failed attempt does not use up the one configure per game.
        engine.configure(Tier::Two, 3).unwrap();
        assert_eq!(engine.state().phase, Phase::InRound);
    }

    #[test]
    fn test_human_vertical_win_ends_round() {
        let mut engine = configured(Tier::Two, 3);
        play_human_win(&mut engine);

        let state = engine.state();
        assert_eq!(state.phase, Phase::RoundOver);
        assert_eq!(state.human_score, 1);
        assert_eq!(state.computer_score, 0);

        let line = state.round_outcome.win_line().unwrap();
        assert_eq!(line.owner, Player::Human);
        assert_eq!(line.start, (2, 0));
        assert_eq!(line.end, (5, 0));

        // The computer replied to the first three moves only.
        assert_eq!(engine.board().get(3, 1), Cell::Computer);
        assert_eq!(engine.board().get(2, 1), Cell::Empty);

        assert!(engine
            .sink()
            .lines()
            .contains(&"Round 1 - Player won".to_string()));
    }

    #[test]
    fn test_computer_win_ends_round() {
        let mut engine = configured(Tier::Two, 3);
        play_computer_win(&mut engine);

        let state = engine.state();
        assert_eq!(state.phase, Phase::RoundOver);
        assert_eq!(state.human_score, 0);
        assert_eq!(state.computer_score, 1);

        let line = state.round_outcome.win_line().unwrap();
        assert_eq!(line.owner, Player::Computer);
        assert_eq!(line.start, (2, 6));
        assert_eq!(line.end, (5, 6));

        assert!(engine
            .sink()
            .lines()
            .contains(&"Round 1 - Computer won".to_string()));
    }

    #[test]
    fn test_drawn_round_credits_both_sides() {
        let mut engine = configured(Tier::Two, 1);

        // Interleaved fill with no four anywhere: the human takes the
        // bottom half of even columns and the top half of odd ones, the
        // computer the reverse, and the computer's last piece fills the
        // board.
        let computer_cols = vec![1, 1, 1, 3, 3, 3, 5, 5, 5, 0, 0, 0, 2, 2, 2, 4, 4, 4, 6, 6, 6];
        let human_cols = [0, 0, 0, 2, 2, 2, 4, 4, 4, 6, 6, 6, 1, 1, 1, 3, 3, 3, 5, 5, 5];
        engine.set_policy(Box::new(ScriptedOpponent::new(computer_cols)));
        for col in human_cols {
            engine.submit_human_move(col).unwrap();
        }

        assert!(engine.board().is_full());
        let state = engine.state();
        assert_eq!(state.phase, Phase::RoundOver);
        assert_eq!(state.round_outcome, RoundOutcome::Draw);
        assert_eq!(state.human_score, 1);
        assert_eq!(state.computer_score, 1);

        engine.advance_round().unwrap();
        let state = engine.state();
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.game_outcome, Some(GameOutcome::Draw));

        let lines = engine.sink().lines();
        assert!(lines.contains(&"Round 1 - Draw".to_string()));
        assert!(lines.contains(&"Player - 1".to_string()));
        assert!(lines.contains(&"Computer - 1".to_string()));
        assert!(lines.contains(&"Overall Game Result - Draw".to_string()));
    }

    #[test]
    fn test_invalid_moves_leave_everything_unchanged() {
        let mut engine = configured(Tier::Two, 3);

        // Fill column 0 with alternating pieces: three human moves there,
        // three scripted replies on top of them.
        engine.set_policy(Box::new(ScriptedOpponent::new(vec![0, 0, 0])));
        for _ in 0..3 {
            engine.submit_human_move(0).unwrap();
        }
        assert!(engine.board().is_column_full(0));
        assert_eq!(engine.state().phase, Phase::InRound);

        let board_before = *engine.board();
        let state_before = *engine.state();
        let revision_before = engine.revision();

        let err = engine.submit_human_move(0).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidMove {
                column: 0,
                reason: crate::game::MoveError::ColumnFull,
            }
        ));

        let err = engine.submit_human_move(7).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidMove {
                column: 7,
                reason: crate::game::MoveError::InvalidColumn,
            }
        ));

        assert_eq!(*engine.board(), board_before);
        assert_eq!(*engine.state(), state_before);
        assert_eq!(engine.revision(), revision_before);
    }

    #[test]
    fn test_out_of_phase_calls_are_rejected() {
        let mut engine = GameEngine::new(MemorySink::new());

        // AwaitingConfig: only configure and new_game are legal.
        assert!(matches!(
            engine.submit_human_move(0).unwrap_err(),
            EngineError::InvalidTransition {
                op: "submit_human_move",
                phase: Phase::AwaitingConfig,
            }
        ));
        assert!(matches!(
            engine.advance_round().unwrap_err(),
            EngineError::InvalidTransition { .. }
        ));
        assert!(matches!(
            engine.end_game_early().unwrap_err(),
            EngineError::InvalidTransition { .. }
        ));

        // InRound: advancing makes no sense mid-round.
        engine.configure(Tier::Two, 2).unwrap();
        assert!(matches!(
            engine.advance_round().unwrap_err(),
            EngineError::InvalidTransition {
                op: "advance_round",
                phase: Phase::InRound,
            }
        ));

        // RoundOver: no further moves in the finished round.
        play_human_win(&mut engine);
        assert!(matches!(
            engine.submit_human_move(3).unwrap_err(),
            EngineError::InvalidTransition {
                op: "submit_human_move",
                phase: Phase::RoundOver,
            }
        ));

        // GameOver: everything but new_game is rejected.
        engine.end_game_early().unwrap();
        assert!(matches!(
            engine.submit_human_move(3).unwrap_err(),
            EngineError::InvalidTransition { .. }
        ));
        assert!(matches!(
            engine.advance_round().unwrap_err(),
            EngineError::InvalidTransition { .. }
        ));
        assert!(matches!(
            engine.end_game_early().unwrap_err(),
            EngineError::InvalidTransition { .. }
        ));
    }

    #[test]
    fn test_advance_round_resets_the_board() {
        let mut engine = configured(Tier::Two, 3);
        play_human_win(&mut engine);

        engine.advance_round().unwrap();
        let state = engine.state();
        assert_eq!(state.phase, Phase::InRound);
        assert_eq!(state.round, 2);
        assert_eq!(state.round_outcome, RoundOutcome::InProgress);
        assert_eq!(state.human_score, 1);
        assert_eq!(*engine.board(), Board::new());
    }

    #[test]
    fn test_full_game_three_one_human_takes_it() {
        let mut engine = configured(Tier::Two, 4);

        play_human_win(&mut engine);
        engine.advance_round().unwrap();
        play_computer_win(&mut engine);
        engine.advance_round().unwrap();
        play_human_win(&mut engine);
        engine.advance_round().unwrap();
        play_human_win(&mut engine);
        engine.advance_round().unwrap();

        let state = engine.state();
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.human_score, 3);
        assert_eq!(state.computer_score, 1);
        assert_eq!(state.game_outcome, Some(GameOutcome::HumanWon));

        let lines = engine.sink().lines();
        assert!(lines.contains(&"Player - 3".to_string()));
        assert!(lines.contains(&"Computer - 1".to_string()));
        assert!(lines.contains(&"Overall Game Result - Player won".to_string()));
    }

    #[test]
    fn test_full_game_two_all_is_a_draw() {
        let mut engine = configured(Tier::Two, 4);

        play_human_win(&mut engine);
        engine.advance_round().unwrap();
        play_computer_win(&mut engine);
        engine.advance_round().unwrap();
        play_computer_win(&mut engine);
        engine.advance_round().unwrap();
        play_human_win(&mut engine);
        engine.advance_round().unwrap();

        let state = engine.state();
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.human_score, 2);
        assert_eq!(state.computer_score, 2);
        assert_eq!(state.game_outcome, Some(GameOutcome::Draw));
    }

    #[test]
    fn test_end_game_early_settles_from_current_scores() {
        let mut engine = configured(Tier::Two, 5);
        play_human_win(&mut engine);
        engine.advance_round().unwrap();

        // Round 2 just started; the human leads 1-0.
        engine.end_game_early().unwrap();
        let state = engine.state();
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.game_outcome, Some(GameOutcome::HumanWon));
        assert!(engine
            .sink()
            .lines()
            .contains(&"Overall Game Result - Player won".to_string()));
    }

    #[test]
    fn test_end_game_early_is_valid_in_round_over() {
        let mut engine = configured(Tier::Two, 5);
        play_computer_win(&mut engine);
        assert_eq!(engine.state().phase, Phase::RoundOver);

        engine.end_game_early().unwrap();
        assert_eq!(engine.state().game_outcome, Some(GameOutcome::ComputerWon));
    }

    #[test]
    fn test_new_game_resets_and_rekeys_the_sink() {
        let mut engine = configured(Tier::Two, 3);
        play_human_win(&mut engine);

        engine.new_game();
        let state = engine.state();
        assert_eq!(state.phase, Phase::AwaitingConfig);
        assert_eq!(state.round, 1);
        assert_eq!(state.human_score, 0);
        assert_eq!(state.computer_score, 0);
        assert_eq!(state.tier, None);
        assert_eq!(state.game_outcome, None);
        assert_eq!(*engine.board(), Board::new());
        assert_eq!(engine.game_id(), 2);
        assert!(engine
            .sink()
            .lines()
            .contains(&"Game 2 Results".to_string()));

        // The fresh game is fully playable.
        engine.configure(Tier::One, 2).unwrap();
        assert_eq!(engine.state().phase, Phase::InRound);
    }

    #[test]
    fn test_revision_bumps_on_success_only() {
        let mut engine = GameEngine::new(MemorySink::new());
        assert_eq!(engine.revision(), 0);

        engine.configure(Tier::Two, 0).unwrap_err();
        assert_eq!(engine.revision(), 0);

        engine.configure(Tier::Two, 3).unwrap();
        assert_eq!(engine.revision(), 1);

        engine.submit_human_move(7).unwrap_err();
        assert_eq!(engine.revision(), 1);

        engine.submit_human_move(3).unwrap();
        assert_eq!(engine.revision(), 2);

        engine.new_game();
        assert_eq!(engine.revision(), 3);
    }

    #[test]
    fn test_sink_failures_never_fail_gameplay() {
        let mut engine = GameEngine::new(FailingSink);
        // Opening game 1 already failed.
        assert!(engine.take_sink_error().is_some());
        assert!(engine.take_sink_error().is_none());

        engine.configure(Tier::Two, 1).unwrap();
        engine.set_policy(Box::new(ScriptedOpponent::new(vec![1, 1, 1])));
        for _ in 0..4 {
            engine.submit_human_move(0).unwrap();
        }

        // The round finished and was scored despite the failing sink.
        assert_eq!(engine.state().phase, Phase::RoundOver);
        assert_eq!(engine.state().human_score, 1);
        assert!(matches!(
            engine.take_sink_error(),
            Some(ResultsError::Write { .. })
        ));
    }

    #[test]
    fn test_seeded_engines_play_identically() {
        let mut a = GameEngine::with_seed(MemorySink::new(), 1234);
        let mut b = GameEngine::with_seed(MemorySink::new(), 1234);
        a.configure(Tier::Two, 1).unwrap();
        b.configure(Tier::Two, 1).unwrap();

        for col in [3, 3, 2] {
            a.submit_human_move(col).unwrap();
            b.submit_human_move(col).unwrap();
            assert_eq!(*a.board(), *b.board());
            assert_eq!(*a.state(), *b.state());
        }
    }
}
