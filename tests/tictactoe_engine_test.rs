//! Tests for the pure tic-tac-toe engine.

use tictactoe_server::{
    Game, GameState, GameStatus, MoveError, Player, Position, Square, Winner, invariants,
    rules::LINES,
};

/// Plays `moves` from a fresh game, panicking on any rejection.
fn play(moves: &[(i64, i64)]) -> GameState {
    moves.iter().fold(Game::initialize(), |state, &(row, col)| {
        let next = Game::apply_move(&state, row, col)
            .unwrap_or_else(|e| panic!("move ({row}, {col}) rejected: {e}"));
        assert!(invariants::check_all(&next).is_ok());
        next
    })
}

fn coords(pos: Position) -> (i64, i64) {
    (pos.row() as i64, pos.col() as i64)
}

#[test]
fn test_initialize() {
    let state = Game::initialize();
    assert!(
        state
            .board()
            .squares()
            .iter()
            .all(|s| *s == Square::Empty)
    );
    assert_eq!(state.current_player(), Player::X);
    assert!(!state.is_over());
    assert_eq!(state.winner(), None);
    assert_eq!(state.moves_count(), 0);
}

#[test]
fn test_turns_alternate_from_x() {
    let moves = [(1, 1), (0, 0), (2, 2), (0, 2), (0, 1), (2, 1)];
    let mut state = Game::initialize();
    for (i, (row, col)) in moves.into_iter().enumerate() {
        let expected = if i % 2 == 0 { Player::X } else { Player::O };
        assert_eq!(state.current_player(), expected, "before move {i}");
        state = Game::apply_move(&state, row, col).unwrap();
        assert!(!state.is_over());
    }
    assert_eq!(state.current_player(), Player::X);
}

#[test]
fn test_move_count_matches_filled_cells() {
    let moves = [(1, 1), (0, 0), (2, 2), (0, 2)];
    for n in 0..=moves.len() {
        let state = play(&moves[..n]);
        assert_eq!(usize::from(state.moves_count()), n);
        assert_eq!(state.board().filled(), n);
    }
}

#[test]
fn test_occupied_cell_rejected_without_change() {
    let state = play(&[(1, 1)]);
    let result = Game::apply_move(&state, 1, 1);
    assert_eq!(result, Err(MoveError::CellOccupied(Position::Center)));
    assert!(result.unwrap_err().to_string().contains("occupied"));

    // The input is untouched and still accepts O's move.
    assert_eq!(state, play(&[(1, 1)]));
    assert_eq!(state.current_player(), Player::O);
}

#[test]
fn test_every_move_rejected_after_game_over() {
    let won = play(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    for pos in Position::ALL {
        let (row, col) = coords(pos);
        assert_eq!(
            Game::apply_move(&won, row, col),
            Err(MoveError::GameAlreadyOver)
        );
    }
    assert_eq!(won.moves_count(), 5);
    assert_eq!(won.winner(), Some(Winner::Player(Player::X)));
}

#[test]
fn test_out_of_bounds_rejected() {
    let state = play(&[(1, 1)]);
    for (row, col) in [(-1, 0), (0, -1), (3, 0), (0, 3), (-1, 3)] {
        assert_eq!(
            Game::apply_move(&state, row, col),
            Err(MoveError::InvalidCoordinates { row, col })
        );
    }
    let err = Game::apply_move(&state, 3, 3).unwrap_err();
    assert!(err.to_string().contains("out of bounds"));
}

#[test]
fn test_row_win() {
    let state = play(&[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);
    assert!(state.is_over());
    assert_eq!(state.winner(), Some(Winner::Player(Player::X)));
    assert_eq!(state.moves_count(), 5);
    assert_eq!(state.status(), GameStatus::Won(Player::X));
}

#[test]
fn test_every_line_detected_for_both_players() {
    for line in LINES {
        let free: Vec<Position> = Position::ALL
            .into_iter()
            .filter(|p| !line.contains(p))
            .collect();

        // X completes the line; O plays two free cells.
        let x_moves = line.map(coords);
        let o_filler = pick_non_line_pair(&free);
        let moves = [
            x_moves[0],
            coords(o_filler[0]),
            x_moves[1],
            coords(o_filler[1]),
            x_moves[2],
        ];
        let state = play(&moves);
        assert_eq!(
            state.winner(),
            Some(Winner::Player(Player::X)),
            "X line {line:?}"
        );

        // O completes the line; X plays three free cells first.
        let x_filler = pick_non_line_triple(&free);
        let moves = [
            coords(x_filler[0]),
            x_moves[0],
            coords(x_filler[1]),
            x_moves[1],
            coords(x_filler[2]),
            x_moves[2],
        ];
        let state = play(&moves);
        assert_eq!(
            state.winner(),
            Some(Winner::Player(Player::O)),
            "O line {line:?}"
        );
        assert_eq!(state.current_player(), Player::O);
    }
}

/// Two cells from `free`; two cells alone never complete a line.
fn pick_non_line_pair(free: &[Position]) -> [Position; 2] {
    [free[0], free[1]]
}

/// Three cells from `free` that do not form a line themselves.
fn pick_non_line_triple(free: &[Position]) -> [Position; 3] {
    for a in 0..free.len() {
        for b in a + 1..free.len() {
            for c in b + 1..free.len() {
                let triple = [free[a], free[b], free[c]];
                let is_line = LINES
                    .iter()
                    .any(|line| triple.iter().all(|p| line.contains(p)));
                if !is_line {
                    return triple;
                }
            }
        }
    }
    panic!("no non-line triple in {free:?}");
}

#[test]
fn test_tie() {
    // X O X / X O O / O X X
    let state = play(&[
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 1),
        (1, 0),
        (1, 2),
        (2, 1),
        (2, 0),
        (2, 2),
    ]);
    assert!(state.is_over());
    assert_eq!(state.winner(), Some(Winner::Tie));
    assert_eq!(state.status(), GameStatus::Tie);
    assert_eq!(state.moves_count(), 9);
}

#[test]
fn test_win_on_ninth_move_is_not_tie() {
    // X X O / O X X / O O X, diagonal completed by the last move
    let state = play(&[
        (0, 0),
        (0, 2),
        (0, 1),
        (1, 0),
        (1, 1),
        (2, 0),
        (1, 2),
        (2, 1),
        (2, 2),
    ]);
    assert_eq!(state.moves_count(), 9);
    assert_eq!(state.winner(), Some(Winner::Player(Player::X)));
}

#[test]
fn test_reset_mid_game_and_finished() {
    let mid = play(&[(0, 0), (1, 1)]);
    assert_eq!(Game::reset(&mid), Game::initialize());

    let won = play(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    let fresh = Game::reset(&won);
    assert_eq!(fresh, Game::initialize());
    assert!(Game::apply_move(&fresh, 0, 0).is_ok());
}
