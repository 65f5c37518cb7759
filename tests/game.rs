use lib::chess::{Color, Notation, Piece, Role, Square};
use lib::rules::{Game, Rejection};

fn play(game: &mut Game, moves: &[&str]) {
    for m in moves {
        let notation: Notation = m.parse().unwrap();
        assert!(game.request_notation(&notation).is_ok(), "{m}");
    }
}

#[test]
fn scholars_mate_leaves_black_in_check() {
    let mut game = Game::default();
    play(&mut game, &["e4", "e5", "Gc4", "Sc6", "Hh5", "Sf6", "Hf7"]);

    assert_eq!(
        game.board().to_string(),
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR"
    );

    assert_eq!(game.turn(), Color::Black);
    assert!(game.is_check(Color::Black));
    assert!(!game.is_check(Color::White));

    let black = game.snapshot().into_iter().filter(|(_, p)| p.color() == Color::Black);
    assert_eq!(black.count(), 15);
}

#[test]
fn king_cannot_capture_a_defended_piece() {
    let mut game = Game::default();
    play(&mut game, &["e4", "e5", "Gc4", "Sc6", "Hh5", "Sf6", "Hf7"]);

    let e8: Square = "e8".parse().unwrap();
    let f7: Square = "f7".parse().unwrap();

    assert_eq!(game.request_move(e8, f7), Err(Rejection::SelfCheck(e8, f7)));
    assert!(game.legal_targets(e8).is_empty());
    assert_eq!(game.turn(), Color::Black);
}

#[test]
fn notation_without_candidates_is_rejected() {
    let mut game = Game::default();
    let notation: Notation = "Hh5".parse().unwrap();
    assert_eq!(
        game.request_notation(&notation),
        Err(Rejection::NoCandidate(notation))
    );

    assert_eq!(game.board().to_string(), Game::default().board().to_string());
}

#[test]
fn check_flags_are_shared_with_observers() {
    let mut game = Game::default();
    let flags = game.check_flags();
    assert!(!flags.get(Color::Black));

    play(&mut game, &["e4", "f6", "Hh5"]);

    let h5: Square = "h5".parse().unwrap();
    let queen = game.board()[h5].map(|f| f.piece());
    assert_eq!(queen, Some(Piece::new(Role::Queen, Color::White)));

    let observer = std::thread::spawn(move || flags.get(Color::Black));
    assert!(observer.join().unwrap());
}
