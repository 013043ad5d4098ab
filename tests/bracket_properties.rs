//! Property-based tests for the bracket ordering and error-combination rules

use proptest::prelude::*;

use brago::testing::CallLog;
use brago::{bracket, bracket_infallible, with_resource, BracketError, Close};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Acquire,
    Use,
    Release,
}

fn outcome() -> impl Strategy<Value = Result<i32, String>> {
    prop_oneof![any::<i32>().prop_map(Ok::<i32, String>), "[a-z]{1,8}".prop_map(Err::<i32, String>)]
}

#[derive(Debug)]
struct Scripted {
    close: Result<(), String>,
}

impl Close for Scripted {
    type Error = String;

    fn close(self) -> Result<(), String> {
        self.close
    }
}

proptest! {
    #[test]
    fn prop_acquire_failure_runs_nothing(err in "[a-z]{1,8}") {
        let steps = CallLog::new();

        let result = bracket(
            || Err::<i32, _>(err.clone()),
            |_| {
                steps.record(Step::Release);
                Ok::<(), String>(())
            },
            |_| {
                steps.record(Step::Use);
                Ok(())
            },
        );

        prop_assert_eq!(result, Err(BracketError::Acquire(err)));
        prop_assert!(steps.is_empty());
    }

    #[test]
    fn prop_release_runs_once_after_use(
        resource in any::<i32>(),
        used in outcome(),
        released in prop::result::maybe_ok(Just(()), "[a-z]{1,8}"),
    ) {
        let steps = CallLog::new();
        let released_with = CallLog::new();

        let _ = bracket(
            || {
                steps.record(Step::Acquire);
                Ok::<_, String>(resource)
            },
            |r| {
                steps.record(Step::Release);
                released_with.record(r);
                released.clone()
            },
            |_| {
                steps.record(Step::Use);
                used.clone()
            },
        );

        prop_assert_eq!(steps.calls(), vec![Step::Acquire, Step::Use, Step::Release]);
        prop_assert_eq!(released_with.calls(), vec![resource]);
    }

    #[test]
    fn prop_outcome_follows_combination_table(
        used in outcome(),
        released in prop::result::maybe_ok(Just(()), "[a-z]{1,8}"),
    ) {
        let result = bracket(|| Ok::<_, String>(()), |_| released.clone(), |_| used.clone());

        match (used, released) {
            (Ok(v), Ok(())) => prop_assert_eq!(result, Ok(v)),
            (Ok(_), Err(r)) => prop_assert_eq!(result, Err(BracketError::Release(r))),
            (Err(u), Ok(())) => prop_assert_eq!(result, Err(BracketError::Use(u))),
            (Err(u), Err(r)) => prop_assert_eq!(
                result,
                Err(BracketError::Both { use_error: u, release_error: r })
            ),
        }
    }

    #[test]
    fn prop_infallible_never_reports_release(used in outcome()) {
        let releases = CallLog::new();

        let result = bracket_infallible(
            || Ok::<_, String>(7),
            |r| releases.record(r),
            |_| used.clone(),
        );

        prop_assert_eq!(result, used);
        prop_assert_eq!(releases.calls(), vec![7]);
    }

    #[test]
    fn prop_with_resource_equals_bracket_with_close(
        used in outcome(),
        close in prop::result::maybe_ok(Just(()), "[a-z]{1,8}"),
    ) {
        let derived = with_resource(
            || Ok::<_, String>(Scripted { close: close.clone() }),
            |_| used.clone(),
        );
        let explicit = bracket(
            || Ok::<_, String>(Scripted { close: close.clone() }),
            Scripted::close,
            |_| used.clone(),
        );

        prop_assert_eq!(derived, explicit);
    }
}
