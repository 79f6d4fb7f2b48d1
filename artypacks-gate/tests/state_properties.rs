//! Property tests for the upload queue.

use artypacks_gate::AppState;
use artypacks_types::SelectedFile;
use proptest::prelude::*;

fn file_strategy() -> impl Strategy<Value = SelectedFile> {
    (
        "[a-z]{1,12}",
        prop_oneof![Just(".brushset"), Just(".BRUSHSET"), Just(".png"), Just(".zip")],
        0usize..64,
    )
        .prop_map(|(stem, ext, size)| SelectedFile::new(format!("{stem}{ext}"), vec![0u8; size]))
}

fn batches_strategy() -> impl Strategy<Value = Vec<Vec<SelectedFile>>> {
    prop::collection::vec(prop::collection::vec(file_strategy(), 0..8), 0..6)
}

proptest! {
    /// The queue never exceeds the cap, however many files arrive at once.
    #[test]
    fn queue_never_exceeds_cap(cap in 1usize..6, batches in batches_strategy()) {
        let mut state = AppState::new(cap);
        for batch in batches {
            state.add_files(batch);
            prop_assert!(state.files().len() <= cap);
        }
    }

    /// Accepted files are the leading brushsets of the batch, in order.
    #[test]
    fn accepted_files_keep_drop_order(
        cap in 1usize..6,
        batch in prop::collection::vec(file_strategy(), 0..10),
    ) {
        let mut state = AppState::new(cap);
        let report = state.add_files(batch.clone());

        let expected: Vec<&str> = batch
            .iter()
            .filter(|f| f.is_brushset())
            .take(cap)
            .map(|f| f.name())
            .collect();
        let queued: Vec<&str> = state.files().iter().map(|e| e.file.name()).collect();
        prop_assert_eq!(queued, expected);
        prop_assert_eq!(
            report.accepted.len() + report.dropped.len() + report.rejected.len(),
            batch.len()
        );
    }

    /// Adding a file then removing it by id restores the previous queue.
    #[test]
    fn add_then_remove_roundtrip(
        initial in prop::collection::vec(file_strategy(), 0..3),
        stem in "[a-z]{1,12}",
    ) {
        let mut state = AppState::new(4);
        state.add_files(initial);
        let before = state.clone();

        let report = state.add_files([SelectedFile::new(format!("{stem}.brushset"), vec![1u8])]);
        prop_assert_eq!(report.accepted.len(), 1);
        prop_assert!(state.remove_file(report.accepted[0]));
        prop_assert_eq!(state, before);
    }
}
