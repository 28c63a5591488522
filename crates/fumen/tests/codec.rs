use glue_core::{Cell, Field, Operation, Piece, Rotation};
use glue_fumen::{decode, encode, Flags, FumenError, Page};

fn field(text: &str) -> Field {
    text.parse().expect("valid field")
}

mod decoding {
    use super::*;

    #[test]
    fn test_empty_page() {
        let pages = decode("v115@vhAAgH").expect("valid notation");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].field, Some(Field::new()));
        assert_eq!(pages[0].operation, None);
        assert_eq!(pages[0].comment.as_deref(), Some(""));
        assert_eq!(pages[0].flags, Flags::default());
    }

    #[test]
    fn test_single_t_piece() {
        let pages = decode("v115@vhAVQJ").expect("valid notation");
        assert_eq!(
            pages[0].operation,
            Some(Operation::new(Piece::T, Rotation::Spawn, 4, 0))
        );
    }

    #[test]
    fn test_viewer_url_and_separators() {
        let pages = decode("https://fumen.zui.jp/?v115@vhAAgH&dummy=1").expect("valid url");
        assert_eq!(pages.len(), 1);
        let pages = decode("d115@vhC?AgHAgH?AgH").expect("valid notation");
        assert_eq!(pages.len(), 3);
    }

    #[test]
    fn test_errors() {
        assert_eq!(decode("hello"), Err(FumenError::UnsupportedVersion));
        assert_eq!(decode("v110@7eAA4G"), Err(FumenError::UnsupportedVersion));
        assert_eq!(decode("v115@vh!AgH"), Err(FumenError::Malformed));
    }

    #[test]
    fn test_locked_piece_carries_to_next_page() {
        let pages = decode("v115@vhBVQJAgH").expect("valid notation");
        assert_eq!(pages.len(), 2);
        let second = pages[1].field.as_ref().expect("decoded field");
        assert_eq!(second.get(3, 0), Cell::Mino(Piece::T));
        assert_eq!(second.get(4, 1), Cell::Mino(Piece::T));
    }
}

mod encoding {
    use super::*;

    #[test]
    fn test_empty_page() {
        assert_eq!(encode(&[Page::new()]).expect("encodable"), "v115@vhAAgH");
        assert_eq!(encode(&[]).expect("encodable"), "v115@vhAAgH");
    }

    #[test]
    fn test_repeated_fields_share_counter() {
        let pages = vec![Page::new(), Page::new(), Page::new()];
        assert_eq!(encode(&pages).expect("encodable"), "v115@vhCAgHAgHAgH");
    }

    #[test]
    fn test_operation_sequence() {
        let pages = vec![
            Page::new().with_operation(Operation::new(Piece::T, Rotation::Spawn, 4, 0)),
            Page::new(),
        ];
        assert_eq!(encode(&pages).expect("encodable"), "v115@vhBVQJAgH");
    }

    #[test]
    fn test_out_of_bounds_operation() {
        let pages = vec![Page::new().with_operation(Operation::new(Piece::I, Rotation::Spawn, 4, 23))];
        assert!(matches!(encode(&pages), Err(FumenError::OutOfBounds { .. })));
    }
}

mod round_trip {
    use super::*;

    #[test]
    fn test_fields_operations_and_comments() {
        let first = field("__________\nXXXX__XXXX\nXXXX__XXXX");
        let pages = vec![
            Page::new()
                .with_field(first.clone())
                .with_operation(Operation::new(Piece::O, Rotation::Spawn, 4, 0))
                .with_comment("glue me"),
            Page::new().with_operation(Operation::new(Piece::I, Rotation::Left, 0, 1)),
            Page::new()
                .with_operation(Operation::new(Piece::S, Rotation::Right, 7, 1))
                .with_comment("#Q=[](L)SZ"),
        ];
        let decoded = decode(&encode(&pages).expect("encodable")).expect("valid notation");

        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[0].field.as_ref(), Some(&first));
        for (page, written) in decoded.iter().zip(&pages) {
            assert_eq!(page.operation, written.operation);
        }
        assert_eq!(decoded[0].comment.as_deref(), Some("glue me"));
        assert_eq!(decoded[1].comment.as_deref(), Some("glue me"));
        assert!(!decoded[1].flags.quiz);
        assert_eq!(decoded[2].comment.as_deref(), Some("#Q=[](L)SZ"));
        assert!(decoded[2].flags.quiz);

        // the O cleared both rows
        let second = decoded[1].field.as_ref().expect("decoded field");
        assert_eq!(second.height(), 0);
    }

    #[test]
    fn test_coloured_board() {
        let board = field("_IIII_____\n____LLL___\nXXXXLIIIIX");
        let encoded = encode(&[Page::new().with_field(board.clone())]).expect("encodable");
        let decoded = decode(&encoded).expect("valid notation");
        assert_eq!(decoded[0].field, Some(board));
    }

    #[test]
    fn test_flags_survive() {
        let mut garbage = Field::new();
        garbage.set_garbage(0, Cell::Gray);
        let flags = Flags {
            rise: true,
            mirror: true,
            ..Flags::default()
        };
        let pages = vec![
            Page::new().with_field(garbage).with_flags(flags),
            Page::new(),
        ];
        let decoded = decode(&encode(&pages).expect("encodable")).expect("valid notation");
        assert_eq!(decoded[0].flags, flags);
        let second = decoded[1].field.as_ref().expect("decoded field");
        assert_eq!(second.get(9, 0), Cell::Gray);
    }

    #[test]
    fn test_unlocked_page_leaves_field() {
        let pages = vec![
            Page::new()
                .with_operation(Operation::new(Piece::J, Rotation::Reverse, 4, 1))
                .with_flags(Flags {
                    lock: false,
                    ..Flags::default()
                }),
            Page::new(),
        ];
        let decoded = decode(&encode(&pages).expect("encodable")).expect("valid notation");
        assert_eq!(decoded[1].field, Some(Field::new()));
    }
}
