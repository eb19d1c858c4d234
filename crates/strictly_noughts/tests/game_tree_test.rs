//! Properties checked over every reachable game.
//!
//! The full game tree is small enough to walk completely, so each property
//! is verified for all boards reachable by legal play rather than sampled.

use strictly_noughts::invariants::{GameStateInvariants, InvariantSet};
use strictly_noughts::rules::LINES;
use strictly_noughts::{
    Board, Cell, Contract, GameContract, GameState, Mark, Outcome, Party, Position, Rejection,
    Signers, Transition,
};

#[derive(Default)]
struct Tally {
    positions: usize,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

fn alice() -> Party {
    Party::new("Alice")
}

fn bob() -> Party {
    Party::new("Bob")
}

fn complete_lines(board: &Board, mark: Mark) -> usize {
    LINES
        .iter()
        .filter(|line| line.iter().all(|pos| board.get(*pos) == Cell::Marked(mark)))
        .count()
}

/// Party expected to move next: crosses first, then alternating.
fn next_mover(state: &GameState) -> Party {
    match state.turn() {
        Some(last) if last == state.player_x() => state.player_o().clone(),
        _ => state.player_x().clone(),
    }
}

fn walk(state: &GameState, signers: &Signers, tally: &mut Tally) {
    tally.positions += 1;

    assert!(
        GameStateInvariants::check_all(state).is_ok(),
        "invariants broken on {}",
        state.board()
    );

    // Exactly one outcome, never both winners.
    let x_lines = complete_lines(state.board(), Mark::X);
    let o_lines = complete_lines(state.board(), Mark::O);
    assert!(x_lines == 0 || o_lines == 0, "both won on {}", state.board());

    match state.outcome() {
        Outcome::XWins => tally.x_wins += 1,
        Outcome::OWins => tally.o_wins += 1,
        Outcome::Draw => tally.draws += 1,
        Outcome::InProgress => {}
    }

    if state.is_terminal() {
        // Terminal versions refuse any further play.
        if let Some(pos) = Position::valid_moves(state.board()).first() {
            let mover = next_mover(state);
            let output = state.play(&mover, *pos);
            assert_eq!(
                GameContract.verify(
                    &Transition::Play {
                        input: state.clone(),
                        output
                    },
                    signers
                ),
                Err(Rejection::GameFinished(*state.outcome()))
            );
        }
        return;
    }

    let mover = next_mover(state);
    for pos in Position::valid_moves(state.board()) {
        let output = state.play(&mover, pos);
        let play = Transition::Play {
            input: state.clone(),
            output: output.clone(),
        };
        assert_eq!(GameContract.verify(&play, signers), Ok(()), "{}", output.board());
        assert_eq!(
            output.board().blank_count() + 1,
            state.board().blank_count(),
            "blank count must drop by exactly one"
        );

        // The previous mover may not go again.
        if let Some(last) = state.turn() {
            let repeat = state.play(last, pos);
            assert_eq!(
                GameContract.verify(
                    &Transition::Play {
                        input: state.clone(),
                        output: repeat
                    },
                    signers
                ),
                Err(Rejection::SameMoverTwice)
            );
        }

        walk(&output, signers, tally);
    }
}

#[test]
fn test_every_reachable_game_is_accepted_and_consistent() {
    let signers = Signers::from([alice(), bob()]);
    let start = GameState::new(alice(), bob());
    assert_eq!(
        GameContract.verify(
            &Transition::Create {
                output: start.clone()
            },
            &signers
        ),
        Ok(())
    );

    let mut tally = Tally::default();
    walk(&start, &signers, &mut tally);

    // Known sizes of the tic-tac-toe game tree.
    assert_eq!(tally.positions, 549_946);
    assert_eq!(tally.x_wins, 131_184);
    assert_eq!(tally.o_wins, 77_904);
    assert_eq!(tally.draws, 46_080);
}

#[test]
fn test_apply_move_never_changes_occupied_cells() {
    // Every board with each cell blank, X or O, indexed in base 3.
    for code in 0..3usize.pow(9) {
        let mut cells = [Cell::Blank; 9];
        let mut rest = code;
        for cell in cells.iter_mut() {
            *cell = match rest % 3 {
                0 => Cell::Blank,
                1 => Cell::Marked(Mark::X),
                _ => Cell::Marked(Mark::O),
            };
            rest /= 3;
        }
        let board = Board::from_cells(cells);

        for pos in Position::ALL {
            for mark in [Mark::X, Mark::O] {
                let next = board.apply_move(mark, pos);
                if board.is_blank(pos) {
                    assert_eq!(next.get(pos), Cell::Marked(mark));
                } else {
                    assert_eq!(next, board);
                }
            }
        }
    }
}

#[test]
fn test_movers_alternate_starting_with_crosses() {
    let signers = Signers::from([alice(), bob()]);
    let moves = [
        Position::Center,
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::MiddleLeft,
        Position::MiddleRight,
        Position::TopCenter,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    let mut state = GameState::new(alice(), bob());
    let mut movers = Vec::new();
    for pos in moves {
        if state.is_terminal() {
            break;
        }
        let mover = next_mover(&state);
        let output = state.play(&mover, pos);
        GameContract
            .verify(
                &Transition::Play {
                    input: state,
                    output: output.clone(),
                },
                &signers,
            )
            .unwrap();
        movers.push(mover);
        state = output;
    }

    assert_eq!(movers[0], alice());
    for pair in movers.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}
