use gridworld::render::{policy_frame, values_frame};
use gridworld::{Action, Policy, State, ValueFunction};

#[test]
fn values_frame_formats_fixed_width_cells_and_blanks() {
    let v = ValueFunction::from([
        (State::new(0, 0), 0.62),
        (State::new(0, 1), -0.9),
        (State::new(1, 1), 0.),
    ]);

    // (1,0) has no entry and renders blank, not zero.
    assert_eq!(
        values_frame(&v, 2, 2),
        "--------------\n\
         \x20 0.62| -0.90|\n\
         --------------\n\
         \x20     |  0.00|\n"
    );
}

#[test]
fn policy_frame_renders_action_symbols() {
    let p = Policy::from([
        (State::new(0, 0), Action::Up),
        (State::new(0, 2), Action::Left),
    ]);

    insta::assert_snapshot!(policy_frame(&p, 1, 4), @r###"
    ------------------------
      U  |     |  L  |     |
    "###);
}

#[test]
fn frames_cover_the_whole_rectangle() {
    let v = ValueFunction::new();
    let frame = values_frame(&v, 3, 4);

    assert_eq!(frame.lines().count(), 6);
    assert!(frame.lines().all(|l| l.len() == 28));
}
