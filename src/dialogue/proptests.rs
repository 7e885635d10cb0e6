//! Property tests for the dialogue log

use super::{DialogueLog, Role};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    User(String),
    Assistant(String),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-zA-Z ?]{0,30}".prop_map(Op::User),
        "[a-zA-Z ?]{0,30}".prop_map(Op::Assistant),
    ]
}

proptest! {
    #[test]
    fn appends_are_kept_in_call_order(ops in proptest::collection::vec(arb_op(), 0..40)) {
        let mut log = DialogueLog::new();
        for op in &ops {
            match op {
                Op::User(text) => log.append_user(text.clone(), None),
                Op::Assistant(text) => log.append_assistant(text.clone(), None),
            }
        }

        let turns = log.turns_excluding_seed();
        prop_assert_eq!(turns.len(), ops.len());
        for (turn, op) in turns.iter().zip(&ops) {
            match op {
                Op::User(text) => {
                    prop_assert_eq!(turn.role(), Role::User);
                    prop_assert_eq!(turn.content(), text.as_str());
                }
                Op::Assistant(text) => {
                    prop_assert_eq!(turn.role(), Role::Assistant);
                    prop_assert_eq!(turn.content(), text.as_str());
                }
            }
        }
        prop_assert_eq!(log.all_turns()[0].role(), Role::System);
        prop_assert!(turns.iter().all(|t| t.role() != Role::System));
    }

    #[test]
    fn reset_always_reseeds(ops in proptest::collection::vec(arb_op(), 0..20)) {
        let mut log = DialogueLog::new();
        for op in ops {
            match op {
                Op::User(text) => log.append_user(text, None),
                Op::Assistant(text) => log.append_assistant(text, None),
            }
        }
        log.reset();
        prop_assert_eq!(log.all_turns().len(), 1);
        prop_assert!(log.turns_excluding_seed().is_empty());
    }
}
