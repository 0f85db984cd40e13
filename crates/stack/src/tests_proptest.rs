//! Property-based tests for unwind ordering

#[cfg(test)]
mod proptest_tests {
    use crate::{CleanupStack, ScopeMarker};
    use proptest::prelude::*;
    use std::cell::RefCell;

    const CAPACITY: usize = 16;

    fn push_tracked<'a>(
        stack: &mut CleanupStack<'a, CAPACITY>,
        runs: &'a RefCell<Vec<u32>>,
        order: &'a RefCell<Vec<usize>>,
        id: usize,
    ) {
        stack.push(move || {
            runs.borrow_mut()[id] += 1;
            order.borrow_mut().push(id);
        });
    }

    proptest! {
        #[test]
        fn test_full_unwind_is_reverse_of_push(count in 0usize..=CAPACITY) {
            let log = RefCell::new(Vec::new());
            let mut stack = CleanupStack::<CAPACITY>::new();

            for id in 0..count {
                let log = &log;
                stack.push(move || log.borrow_mut().push(id));
            }
            let ran = stack.unwind_all();

            let expected: Vec<usize> = (0..count).rev().collect();
            prop_assert_eq!(ran, count);
            prop_assert_eq!(&*log.borrow(), &expected);
            prop_assert_eq!(stack.len(), 0);
        }

        #[test]
        fn test_marker_unwind_releases_only_later_pushes(
            before in 0usize..=8,
            after in 0usize..=8,
        ) {
            let log = RefCell::new(Vec::new());
            let mut stack = CleanupStack::<CAPACITY>::new();

            for id in 0..before {
                let log = &log;
                stack.push(move || log.borrow_mut().push(id));
            }
            let marker = stack.mark_scope();
            for id in before..before + after {
                let log = &log;
                stack.push(move || log.borrow_mut().push(id));
            }

            prop_assert_eq!(stack.unwind_to_marker(marker), after);
            let scoped: Vec<usize> = (before..before + after).rev().collect();
            prop_assert_eq!(&*log.borrow(), &scoped);
            prop_assert_eq!(stack.len(), before);

            log.borrow_mut().clear();
            prop_assert_eq!(stack.unwind_all(), before);
            let remaining: Vec<usize> = (0..before).rev().collect();
            prop_assert_eq!(&*log.borrow(), &remaining);
            prop_assert_eq!(stack.len(), 0);
        }

        #[test]
        fn test_nested_markers_run_each_action_once(
            scope_sizes in prop::collection::vec(0usize..=3, 0..5),
            frame_size in 0usize..=1,
        ) {
            let runs = RefCell::new(vec![0u32; CAPACITY]);
            let order = RefCell::new(Vec::new());
            let mut stack = CleanupStack::<CAPACITY>::new();
            let mut next = 0usize;
            let mut markers: Vec<ScopeMarker> = Vec::new();

            for _ in 0..frame_size {
                push_tracked(&mut stack, &runs, &order, next);
                next += 1;
            }
            for size in &scope_sizes {
                markers.push(stack.mark_scope());
                for _ in 0..*size {
                    push_tracked(&mut stack, &runs, &order, next);
                    next += 1;
                }
            }
            prop_assert_eq!(stack.depth(), scope_sizes.len());

            while let Some(marker) = markers.pop() {
                stack.unwind_to_marker(marker);
            }
            prop_assert_eq!(stack.len(), frame_size);
            stack.unwind_all();

            let expected: Vec<usize> = (0..next).rev().collect();
            prop_assert_eq!(&*order.borrow(), &expected);
            prop_assert!(runs.borrow()[..next].iter().all(|count| *count == 1));
        }
    }
}
