use super::{
    Alignment, AlignmentStorage, CombinationMode, DenseStorage, HashedStorage, MAX_DENSE_POSITION,
    MAX_POSITION, SortedSparseStorage,
};
use crate::error::Error;

const ROWS: [usize; 9] = [3, 4, 5, 6, 8, 9, 10, 12, 13];
const COLS: [usize; 9] = [3, 4, 6, 7, 8, 10, 11, 12, 13];

fn fixture<Storage: AlignmentStorage>() -> Alignment<Storage> {
    let mut alignment = Alignment::new();
    for (row, col) in ROWS.into_iter().zip(COLS) {
        alignment.add_pair(row, col, 1.0).unwrap();
    }
    alignment
}

fn pairs<Storage: AlignmentStorage>(alignment: &Alignment<Storage>) -> Vec<(usize, usize)> {
    alignment.iter().map(|pair| (pair.row, pair.col)).collect()
}

fn mapping<Storage: AlignmentStorage>() {
    let alignment = fixture::<Storage>();
    for (row, col) in ROWS.into_iter().zip(COLS) {
        assert_eq!(alignment.map_row_to_col(row), Some(col));
        assert_eq!(alignment.map_col_to_row(col), Some(row));
    }
    for row in [0, 1, 2, 7, 11, 14, 100] {
        assert_eq!(alignment.map_row_to_col(row), None);
    }
    for col in [0, 5, 9, 14, 100] {
        assert_eq!(alignment.map_col_to_row(col), None);
    }
    assert!(alignment.is_monotone());
}

fn bounds_length_and_score<Storage: AlignmentStorage>() {
    let alignment = fixture::<Storage>();
    assert_eq!(alignment.row_from(), Some(3));
    assert_eq!(alignment.row_to(), Some(14));
    assert_eq!(alignment.col_from(), Some(3));
    assert_eq!(alignment.col_to(), Some(14));
    assert_eq!(alignment.len(), 9);
    assert_eq!(alignment.length(), 13);
    assert_eq!(alignment.num_gaps(), 4);
    assert_eq!(alignment.score(), 9.0);
}

fn empty_alignment<Storage: AlignmentStorage>() {
    let mut alignment = Alignment::<Storage>::new();
    assert!(alignment.is_empty());
    assert_eq!(alignment.bounds(), None);
    assert_eq!(alignment.row_from(), None);
    assert_eq!(alignment.col_to(), None);
    assert_eq!(alignment.length(), 0);
    assert_eq!(alignment.num_gaps(), 0);

    alignment.remove_row_region(0, 10);
    alignment.remove_col_region(0, 10);
    alignment.switch_row_col();
    assert!(alignment.is_empty());
}

fn remove_row_region<Storage: AlignmentStorage>() {
    let mut alignment = fixture::<Storage>();

    alignment.remove_row_region(3, 5);
    assert_eq!(alignment.row_from(), Some(5));
    assert_eq!(alignment.col_from(), Some(6));
    assert_eq!(alignment.row_to(), Some(14));
    assert_eq!(alignment.col_to(), Some(14));
    assert_eq!(alignment.score(), 7.0);

    alignment.remove_row_region(10, 14);
    assert_eq!(alignment.row_from(), Some(5));
    assert_eq!(alignment.col_from(), Some(6));
    assert_eq!(alignment.row_to(), Some(10));
    assert_eq!(alignment.col_to(), Some(11));

    for (row, col) in [(5, 6), (6, 7), (8, 8), (9, 10)] {
        assert_eq!(alignment.map_row_to_col(row), Some(col));
        assert_eq!(alignment.map_col_to_row(col), Some(row));
    }

    alignment.remove_row_region(0, 20);
    assert!(alignment.is_empty());
    assert_eq!(alignment.bounds(), None);
    assert_eq!(alignment.score(), 0.0);
}

fn remove_col_region<Storage: AlignmentStorage>() {
    let mut alignment = fixture::<Storage>();

    alignment.remove_col_region(3, 7);
    assert_eq!(alignment.row_from(), Some(6));
    assert_eq!(alignment.col_from(), Some(7));

    alignment.remove_col_region(11, 100);
    assert_eq!(alignment.row_to(), Some(10));
    assert_eq!(alignment.col_to(), Some(11));
    assert_eq!(pairs(&alignment), vec![(6, 7), (8, 8), (9, 10)]);
}

fn ignored_region_removals<Storage: AlignmentStorage>() {
    let mut alignment = fixture::<Storage>();
    let expected = pairs(&alignment);

    alignment.remove_row_region(5, 3);
    alignment.remove_row_region(7, 7);
    alignment.remove_row_region(100, 200);
    alignment.remove_col_region(9, 2);
    alignment.remove_col_region(20, 30);
    alignment.remove_row_region(0, 3);

    assert_eq!(pairs(&alignment), expected);
    assert_eq!(alignment.row_from(), Some(3));
    assert_eq!(alignment.col_to(), Some(14));
}

fn removal_is_idempotent<Storage: AlignmentStorage>() {
    let mut once = fixture::<Storage>();
    once.remove_row_region(4, 9);

    let mut twice = fixture::<Storage>();
    twice.remove_row_region(4, 9);
    twice.remove_row_region(4, 9);

    assert_eq!(pairs(&once), pairs(&twice));
    assert_eq!(once.bounds(), twice.bounds());
    assert_eq!(once.score(), twice.score());
}

fn removal_keeps_untouched_mappings<Storage: AlignmentStorage>() {
    let mut alignment = fixture::<Storage>();
    alignment.remove_row_region(6, 10);

    for (row, col) in ROWS.into_iter().zip(COLS) {
        if (6..10).contains(&row) {
            assert_eq!(alignment.map_row_to_col(row), None);
            assert_eq!(alignment.map_col_to_row(col), None);
        } else {
            assert_eq!(alignment.map_row_to_col(row), Some(col));
            assert_eq!(alignment.map_col_to_row(col), Some(row));
        }
    }
}

fn switch_row_col<Storage: AlignmentStorage>() {
    let original = fixture::<Storage>();
    let mut switched = original.clone();
    switched.switch_row_col();

    for (row, col) in ROWS.into_iter().zip(COLS) {
        assert_eq!(switched.map_row_to_col(col), Some(row));
        assert_eq!(switched.map_col_to_row(row), Some(col));
        assert_eq!(
            original.map_col_to_row(switched.map_col_to_row(row).unwrap()),
            Some(row)
        );
    }
    assert_eq!(switched.length(), original.length());
    assert_eq!(switched.num_gaps(), original.num_gaps());
    assert_eq!(switched.score(), original.score());
    assert_eq!(switched.row_from(), original.col_from());
    assert_eq!(switched.col_to(), original.row_to());

    switched.switch_row_col();
    assert_eq!(pairs(&switched), pairs(&original));
    assert_eq!(switched.bounds(), original.bounds());
}

fn diagonals<Storage: AlignmentStorage>() {
    let mut alignment = Alignment::<Storage>::new();
    alignment.add_diagonal(5, 10, 0).unwrap();
    alignment.add_diagonal(10, 15, 5).unwrap();
    alignment.add_diagonal(25, 30, -5).unwrap();

    assert_eq!(alignment.len(), 15);
    assert!(alignment.is_monotone());
    assert_eq!(alignment.map_row_to_col(5), Some(5));
    assert_eq!(alignment.map_row_to_col(12), Some(17));
    assert_eq!(alignment.map_row_to_col(29), Some(24));
    assert_eq!(alignment.row_from(), Some(5));
    assert_eq!(alignment.row_to(), Some(30));
    assert_eq!(alignment.col_from(), Some(5));
    assert_eq!(alignment.col_to(), Some(25));

    alignment.add_diagonal(7, 7, 3).unwrap();
    assert_eq!(alignment.len(), 15);
}

fn invalid_diagonal_leaves_alignment_unchanged<Storage: AlignmentStorage>() {
    let mut alignment = fixture::<Storage>();
    let expected = pairs(&alignment);

    assert!(alignment.add_diagonal(0, 10, -5).is_err());
    assert_eq!(pairs(&alignment), expected);
}

fn overwriting_pairs<Storage: AlignmentStorage>() {
    let mut alignment = fixture::<Storage>();

    alignment.add_pair(13, 20, 5.0).unwrap();
    assert_eq!(alignment.map_row_to_col(13), Some(20));
    assert_eq!(alignment.map_col_to_row(13), None);
    assert_eq!(alignment.col_to(), Some(21));
    assert_eq!(alignment.score(), 13.0);

    alignment.add_pair(15, 20, 1.0).unwrap();
    assert_eq!(alignment.map_row_to_col(13), None);
    assert_eq!(alignment.map_col_to_row(20), Some(15));
    assert_eq!(alignment.row_to(), Some(16));
    assert_eq!(alignment.len(), 9);
    assert_eq!(alignment.score(), 9.0);
}

fn new_empty_and_clone<Storage: AlignmentStorage>() {
    let alignment = fixture::<Storage>();

    let empty = alignment.new_empty();
    assert!(empty.is_empty());

    let mut copy = alignment.clone();
    copy.remove_row_region(0, 100);
    assert!(copy.is_empty());
    assert_eq!(alignment.len(), 9);
}

fn combine<Storage: AlignmentStorage>() {
    let mut lhs = Alignment::<Storage>::new();
    lhs.add_diagonal(0, 5, 10).unwrap();

    let mut by_rows = Alignment::<Storage>::new();
    by_rows.add_diagonal(0, 5, 50).unwrap();
    let mut by_cols = Alignment::<Storage>::new();
    by_cols.add_diagonal(7, 12, 3).unwrap();
    let mut chained = Alignment::<Storage>::new();
    chained.add_diagonal(10, 15, 90).unwrap();

    let mut result = Alignment::<Storage>::new();
    result
        .combine(&lhs, &by_rows, CombinationMode::RowRow)
        .unwrap();
    assert_eq!(
        pairs(&result),
        (10..15).zip(50..55).collect::<Vec<_>>()
    );

    result
        .combine(&lhs, &chained, CombinationMode::ColRow)
        .unwrap();
    assert_eq!(pairs(&result), (0..5).zip(100..105).collect::<Vec<_>>());
    assert_eq!(result.score(), 0.0);

    result
        .combine(&lhs, &by_cols, CombinationMode::ColCol)
        .unwrap();
    assert_eq!(pairs(&result), (0..5).zip(7..12).collect::<Vec<_>>());

    result
        .combine(&lhs, &chained, CombinationMode::RowCol)
        .unwrap();
    assert!(result.is_empty());
}

fn append<Storage: AlignmentStorage>() {
    let mut head = Alignment::<Storage>::new();
    head.add_diagonal(0, 5, 0).unwrap();

    let mut tail = Alignment::<Storage>::new();
    tail.add_diagonal(7, 10, 2).unwrap();

    let mut overlapping = Alignment::<Storage>::new();
    overlapping.add_diagonal(8, 10, -6).unwrap();

    assert!(head.append(&overlapping).is_err());
    assert_eq!(head.len(), 5);

    head.append(&tail).unwrap();
    assert_eq!(head.len(), 8);
    assert_eq!(head.row_to(), Some(10));
    assert_eq!(head.col_to(), Some(12));
    assert!(head.is_monotone());
}

fn affine_score<Storage: AlignmentStorage>() {
    let mut alignment = Alignment::<Storage>::new();
    alignment.add_pair(0, 0, 1.0).unwrap();
    alignment.add_pair(1, 1, 1.0).unwrap();
    alignment.add_pair(4, 2, 1.0).unwrap();
    alignment.add_pair(5, 6, 2.0).unwrap();

    // Row gap of two, column gap of three.
    let score = alignment.calculate_affine_score(-10.0, -1.0);
    assert_eq!(score, 5.0 - 11.0 - 12.0);
    assert_eq!(alignment.score(), score);
}

fn shift<Storage: AlignmentStorage>() {
    let mut alignment = fixture::<Storage>();
    alignment.shift_rows(-3).unwrap();
    assert_eq!(alignment.row_from(), Some(0));
    assert_eq!(alignment.map_row_to_col(0), Some(3));

    alignment.shift_cols(10).unwrap();
    assert_eq!(alignment.col_from(), Some(13));
    assert_eq!(alignment.map_col_to_row(23), Some(10));

    assert!(alignment.shift_rows(-1).is_err());
    assert_eq!(alignment.row_from(), Some(0));
}

fn unrepresentable_positions<Storage: AlignmentStorage>() {
    let mut alignment = fixture::<Storage>();
    let expected = pairs(&alignment);

    assert!(matches!(
        alignment.add_pair(MAX_POSITION + 1, 0, 1.0),
        Err(Error::InvalidPosition { .. })
    ));
    assert_eq!(pairs(&alignment), expected);

    // Storages may support fewer positions, but then they fail cleanly.
    match alignment.add_pair(MAX_POSITION, 0, 1.0) {
        Ok(()) => assert_eq!(alignment.map_col_to_row(0), Some(MAX_POSITION)),
        Err(Error::InvalidPosition { .. }) => {
            assert_eq!(pairs(&alignment), expected);
            assert_eq!(alignment.score(), 9.0);
        }
        Err(error) => panic!("Unexpected error: {error}"),
    }
}

macro_rules! storage_contract {
    ($name:ident, $storage:ty) => {
        mod $name {
            #[test]
            fn mapping() {
                super::mapping::<$storage>();
            }

            #[test]
            fn bounds_length_and_score() {
                super::bounds_length_and_score::<$storage>();
            }

            #[test]
            fn empty_alignment() {
                super::empty_alignment::<$storage>();
            }

            #[test]
            fn remove_row_region() {
                super::remove_row_region::<$storage>();
            }

            #[test]
            fn remove_col_region() {
                super::remove_col_region::<$storage>();
            }

            #[test]
            fn ignored_region_removals() {
                super::ignored_region_removals::<$storage>();
            }

            #[test]
            fn removal_is_idempotent() {
                super::removal_is_idempotent::<$storage>();
            }

            #[test]
            fn removal_keeps_untouched_mappings() {
                super::removal_keeps_untouched_mappings::<$storage>();
            }

            #[test]
            fn switch_row_col() {
                super::switch_row_col::<$storage>();
            }

            #[test]
            fn diagonals() {
                super::diagonals::<$storage>();
            }

            #[test]
            fn invalid_diagonal_leaves_alignment_unchanged() {
                super::invalid_diagonal_leaves_alignment_unchanged::<$storage>();
            }

            #[test]
            fn overwriting_pairs() {
                super::overwriting_pairs::<$storage>();
            }

            #[test]
            fn new_empty_and_clone() {
                super::new_empty_and_clone::<$storage>();
            }

            #[test]
            fn combine() {
                super::combine::<$storage>();
            }

            #[test]
            fn append() {
                super::append::<$storage>();
            }

            #[test]
            fn affine_score() {
                super::affine_score::<$storage>();
            }

            #[test]
            fn shift() {
                super::shift::<$storage>();
            }

            #[test]
            fn unrepresentable_positions() {
                super::unrepresentable_positions::<$storage>();
            }
        }
    };
}

storage_contract!(dense, crate::alignment::DenseStorage);
storage_contract!(sorted_sparse, crate::alignment::SortedSparseStorage);
storage_contract!(hashed, crate::alignment::HashedStorage);

#[test]
fn storages_agree() {
    let dense = fixture::<DenseStorage>();
    let sorted = fixture::<SortedSparseStorage>();
    let hashed = fixture::<HashedStorage>();

    assert_eq!(pairs(&dense), pairs(&sorted));
    assert_eq!(pairs(&dense), pairs(&hashed));
    assert_eq!(dense.bounds(), hashed.bounds());
}

#[test]
fn dense_storage_rejects_huge_positions() {
    let mut dense = fixture::<DenseStorage>();
    let expected = pairs(&dense);

    for (row, col) in [(MAX_POSITION, 0), (0, MAX_POSITION), (MAX_DENSE_POSITION + 1, 20)] {
        assert!(matches!(
            dense.add_pair(row, col, 1.0),
            Err(Error::InvalidPosition { .. })
        ));
    }
    assert!(dense.add_diagonal(20, 22, MAX_POSITION as isize - 21).is_err());
    assert!(dense.shift_rows(MAX_POSITION as isize - 13).is_err());
    assert_eq!(pairs(&dense), expected);
    assert_eq!(dense.score(), 9.0);

    let mut sparse = fixture::<SortedSparseStorage>();
    sparse.add_pair(MAX_POSITION, 20, 1.0).unwrap();
    assert_eq!(sparse.map_row_to_col(MAX_POSITION), Some(20));
}
