use kurosuwado_core::puzzle::DataContractError;
use kurosuwado_core::{reconcile, HIGHLIGHT_COLOR};

fn snapshot(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

#[test]
fn filling_an_empty_cell_is_a_change() {
    let previous = snapshot(&["", "", "CAT", ""]);
    let incoming = snapshot(&["", "A", "CAT", ""]);
    let changed = reconcile(&previous, &incoming).unwrap();
    assert_eq!(changed.len(), 1);
    assert_eq!(changed.get(&1), Some(&HIGHLIGHT_COLOR));
}

#[test]
fn clearing_a_cell_is_not_a_change() {
    let previous = snapshot(&["DOG", "", "", ""]);
    let incoming = snapshot(&["", "", "", ""]);
    let changed = reconcile(&previous, &incoming).unwrap();
    assert!(changed.is_empty());
}

#[test]
fn rewriting_a_cell_is_a_change() {
    let previous = snapshot(&["DOG", "A"]);
    let incoming = snapshot(&["CAT", "A"]);
    let changed = reconcile(&previous, &incoming).unwrap();
    assert_eq!(changed.into_iter().collect::<Vec<_>>(), vec![(0, HIGHLIGHT_COLOR)]);
}

#[test]
fn identical_value_is_never_marked() {
    let previous = snapshot(&["A", "B", "", "D"]);
    let incoming = snapshot(&["A", "B", "C", "D"]);
    let changed = reconcile(&previous, &incoming).unwrap();
    assert!(!changed.contains_key(&0));
    assert!(!changed.contains_key(&1));
    assert!(!changed.contains_key(&3));
    assert!(changed.contains_key(&2));
}

#[test]
fn reconcile_with_self_is_empty() {
    for cells in [
        vec![],
        snapshot(&[""]),
        snapshot(&["A", "", "CAT"]),
        snapshot(&["X"; 225]),
    ] {
        let changed = reconcile(&cells, &cells).unwrap();
        assert!(changed.is_empty());
    }
}

#[test]
fn all_empty_incoming_is_empty() {
    let previous = snapshot(&["A", "B", "C"]);
    let incoming = snapshot(&["", "", ""]);
    assert!(reconcile(&previous, &incoming).unwrap().is_empty());
}

#[test]
fn length_mismatch_fails_without_partial_result() {
    let previous = snapshot(&["A", "B"]);
    let incoming = snapshot(&["A", "B", "C"]);
    let err = reconcile(&previous, &incoming).unwrap_err();
    assert_eq!(
        err,
        DataContractError::SnapshotLength {
            expected: 2,
            found: 3
        }
    );
}

#[test]
fn every_forward_fill_is_marked() {
    let previous = snapshot(&["", "", "", ""]);
    let incoming = snapshot(&["C", "A", "T", "S"]);
    let changed = reconcile(&previous, &incoming).unwrap();
    assert_eq!(changed.len(), 4);
    for index in 0..4 {
        assert_eq!(changed.get(&index), Some(&HIGHLIGHT_COLOR));
    }
}

#[test]
fn mixed_update_marks_only_forward_progress() {
    // index 0 cleared, 1 unchanged, 2 rewritten, 3 filled
    let previous = snapshot(&["A", "B", "C", ""]);
    let incoming = snapshot(&["", "B", "D", "E"]);
    let changed = reconcile(&previous, &incoming).unwrap();
    assert_eq!(
        changed.into_iter().collect::<Vec<_>>(),
        vec![(2, HIGHLIGHT_COLOR), (3, HIGHLIGHT_COLOR)]
    );
}
