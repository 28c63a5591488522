use glue_core::{Cell, EncodedOperation, Field, Operation, Piece, Rotation};
use glue_engine::{
    assemble, glue_code, glue_codes, glue_field, replay, SearchConfig, Sequence,
};
use glue_fumen::{decode, encode, Page};

fn field(text: &str) -> Field {
    text.parse().expect("valid field")
}

fn code_for(board: &Field) -> String {
    encode(&[Page::new().with_field(board.clone())]).expect("encodable")
}

fn operations(sequence: &Sequence) -> Vec<Operation> {
    sequence.iter().map(|op| op.decode()).collect()
}

fn absolute_row(op: &EncodedOperation) -> u32 {
    op.placement_key() & 0x1f
}

/// I, O, L flat on the floor, an upright I closing row 0, a T on top.
fn stacked_board() -> Field {
    let mut board = Field::new();
    for op in [
        Operation::new(Piece::I, Rotation::Spawn, 1, 0),
        Operation::new(Piece::O, Rotation::Spawn, 4, 0),
        Operation::new(Piece::L, Rotation::Spawn, 7, 0),
        Operation::new(Piece::I, Rotation::Left, 9, 1),
        Operation::new(Piece::T, Rotation::Spawn, 1, 1),
    ] {
        board.fill(&op);
    }
    board
}

fn four_by_four_i() -> Field {
    field("IIII______\nIIII______\nIIII______\nIIII______")
}

mod boards {
    use super::*;

    #[test]
    fn test_single_line_piece() {
        let outcome = glue_field(&field("IIII______"), &SearchConfig::default());
        assert_eq!(outcome.solutions.len(), 1);
        assert_eq!(
            operations(&outcome.solutions.as_slice()[0]),
            vec![Operation::new(Piece::I, Rotation::Spawn, 1, 0)]
        );
    }

    #[test]
    fn test_empty_board() {
        let outcome = glue_field(&Field::new(), &SearchConfig::default());
        assert_eq!(outcome.solutions.len(), 1);
        assert!(outcome.solutions.as_slice()[0].is_empty());
    }

    #[test]
    fn test_partial_piece() {
        let board = field("TTT_______\nTTT_______");
        assert!(glue_field(&board, &SearchConfig::default()).solutions.is_empty());

        let code = code_for(&board);
        let report = glue_code(&code, &SearchConfig::default()).expect("decodable");
        assert_eq!(report.unglued_pages(), 1);
        let lines = glue_codes(&[code.as_str()], &SearchConfig::default()).lines();
        assert_eq!(
            lines,
            vec![
                format!("{code} couldn't be glued"),
                "Warning: 1 fumens couldn't be glued".to_string(),
            ]
        );
    }

    #[test]
    fn test_two_reconstructions() {
        let code = code_for(&four_by_four_i());
        let report = glue_codes(&[code.as_str()], &SearchConfig::default());
        assert_eq!(report.codes[0].pages[0].outputs.len(), 2);
        let lines = report.lines();
        assert_eq!(lines[0], format!("Warning: {code} led to 2 outputs"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_clearing_placement() {
        let board = field("XXXXX_____\nXXXXXXIIII");
        let outcome = glue_field(&board, &SearchConfig::default());
        assert_eq!(outcome.solutions.len(), 1);
        let sequence = &outcome.solutions.as_slice()[0];
        assert_eq!(
            operations(sequence),
            vec![Operation::new(Piece::I, Rotation::Spawn, 7, 0)]
        );

        let mut pages = assemble(&board.blanked(), sequence);
        pages.push(Page::new());
        let played = decode(&encode(&pages).expect("encodable")).expect("valid notation");
        let after = played[1].field.as_ref().expect("decoded field");
        assert_eq!(board.height(), 2);
        assert_eq!(after.height(), 1);
    }

    #[test]
    fn test_raised_anchor_keeps_scan_row() {
        let board = field("_IIII_____\n____LLL___\n____LIIII_");
        let outcome = glue_field(&board, &SearchConfig::default());
        assert_eq!(outcome.solutions.len(), 1);
        let sequence = &outcome.solutions.as_slice()[0];
        assert_eq!(
            operations(sequence),
            vec![
                Operation::new(Piece::L, Rotation::Reverse, 5, 1),
                Operation::new(Piece::I, Rotation::Spawn, 6, 0),
                Operation::new(Piece::I, Rotation::Spawn, 2, 2),
            ]
        );
        let rest = replay(&board, sequence).expect("sequence covers the board");
        assert!(!rest.has_piece_cells());
    }
}

mod soundness {
    use super::*;

    fn assert_sound(board: &Field, config: &SearchConfig) -> usize {
        let outcome = glue_field(board, config);
        for sequence in outcome.solutions.iter() {
            let rest = replay(board, sequence).expect("every placement matches its colour");
            assert!(!rest.has_piece_cells());
        }
        outcome.solutions.len()
    }

    #[test]
    fn test_stacked_board_replays() {
        assert!(assert_sound(&stacked_board(), &SearchConfig::default()) >= 1);
    }

    #[test]
    fn test_four_by_four_replays() {
        assert_eq!(assert_sound(&four_by_four_i(), &SearchConfig::default()), 2);
    }

    #[test]
    fn test_glued_code_plays_back() {
        let board = stacked_board();
        let report = glue_code(&code_for(&board), &SearchConfig::default()).expect("decodable");
        for output in report.outputs() {
            let pages = decode(output).expect("valid notation");
            assert_eq!(pages.len(), 5);
            assert_eq!(pages[0].field.as_ref(), Some(&board.blanked()));

            let last = pages.last().expect("at least one page");
            let mut played = last.field.clone().expect("decoded field");
            played.fill(&last.operation.expect("every page places a piece"));
            played.clear_lines();

            let mut expected = board.clone();
            expected.clear_lines();
            assert_eq!(played, expected);
        }
    }

    #[test]
    fn test_floating_only_board_fails() {
        let board = field("TTT_______\n_T________\n__________\nIIII______");
        assert!(glue_field(&board, &SearchConfig::default()).solutions.is_empty());
    }
}

mod dedup_and_rows {
    use super::*;

    #[test]
    fn test_orderings_collapse_to_one() {
        // the O can go before or after the I that clears row 0
        let board = field("OO________\nOO________\nXXXXXXIIII");
        let outcome = glue_field(&board, &SearchConfig::default());
        assert_eq!(outcome.solutions.len(), 1);

        let sequence = &outcome.solutions.as_slice()[0];
        assert_eq!(
            operations(sequence),
            vec![
                Operation::new(Piece::I, Rotation::Spawn, 7, 0),
                Operation::new(Piece::O, Rotation::Spawn, 0, 0),
            ]
        );
        // the O sat on original row 1
        assert_eq!(absolute_row(&sequence[1]), 1);
        assert!(!replay(&board, sequence).expect("sound").has_piece_cells());
    }

    #[test]
    fn test_fast_mode_never_finds_more() {
        for board in [stacked_board(), four_by_four_i()] {
            let all = glue_field(&board, &SearchConfig::exhaustive()).solutions.len();
            let fast = glue_field(&board, &SearchConfig::fast()).solutions.len();
            assert!(fast >= 1);
            assert!(fast <= all);
        }
    }

    #[test]
    fn test_expected_solutions_stop_early() {
        let config = SearchConfig::default().with_expected_solutions(1);
        assert_eq!(glue_field(&four_by_four_i(), &config).solutions.len(), 1);
    }

    #[test]
    fn test_order_follows_queue() {
        let order = vec![Piece::I, Piece::O, Piece::L, Piece::I, Piece::T];
        let config = SearchConfig::default().with_order(order.clone());
        let outcome = glue_field(&stacked_board(), &config);
        assert_eq!(outcome.solutions.len(), 1);
        let pieces: Vec<Piece> = operations(&outcome.solutions.as_slice()[0])
            .iter()
            .map(|op| op.piece)
            .collect();
        assert_eq!(pieces, order);

        let wrong = SearchConfig::default().with_order(vec![Piece::T, Piece::I, Piece::O, Piece::L, Piece::I]);
        assert!(glue_field(&stacked_board(), &wrong).solutions.is_empty());
    }
}

mod visualize {
    use super::*;

    #[test]
    fn test_trace_holds_attempts_then_results() {
        let board = field("_T________\nTTT_______");
        let config = SearchConfig::default().with_visualize(true);
        let report = glue_codes(&[code_for(&board)], &config);
        let trace = report.trace.expect("trace requested");
        let pages = decode(&trace).expect("valid notation");
        // 12 attempted rotations, then the single result page
        assert_eq!(pages.len(), 13);
        assert_eq!(
            pages[12].operation,
            Some(Operation::new(Piece::T, Rotation::Spawn, 1, 0))
        );
        assert_eq!(pages[0].field.as_ref().map(|f| f.get(1, 0)), Some(Cell::Mino(Piece::T)));
    }
}
