use float_eq::assert_float_eq;
use gridworld::factory::{negative_grid, standard_grid, DEFAULT_STEP_COST};
use gridworld::{Action, GridError, State};
use rstest::rstest;

#[test]
fn standard_grid_has_eleven_states_and_no_blocked_cell() {
    let g = standard_grid();

    let states = g.all_states();
    assert_eq!(states.len(), 11);
    assert!(!states.contains(&State::new(1, 1)));

    assert_eq!(g.non_terminal_states().len(), 9);
    assert_eq!(g.current_state(), State::new(2, 0));
    assert!(!g.game_over());
}

#[test]
fn reward_cells_are_terminal() {
    let g = standard_grid();

    assert!(g.is_terminal(&State::new(0, 3)));
    assert!(g.is_terminal(&State::new(1, 3)));
    assert!(g.is_terminal(&State::new(1, 1)));
    assert!(!g.is_terminal(&State::new(2, 0)));
}

#[rstest]
#[case(State::new(0, 0), Action::Up)]
#[case(State::new(0, 0), Action::Left)]
#[case(State::new(1, 0), Action::Right)] // (1,1) is blocked
#[case(State::new(2, 1), Action::Up)]
#[case(State::new(2, 3), Action::Down)]
fn illegal_step_stays_put_and_pays_the_stay_put_reward(
    #[case] s: State,
    #[case] action: Action,
) {
    let mut g = standard_grid();

    g.set_state(s);
    let r = g.step(action);

    assert_eq!(g.current_state(), s);
    assert_float_eq!(r, 0., abs <= 0.);
}

#[test]
fn stepping_into_a_terminal_pays_its_arrival_reward() {
    let mut g = standard_grid();

    g.set_state(State::new(0, 2));
    assert_float_eq!(g.step(Action::Right), 1., abs <= 0.);
    assert_eq!(g.current_state(), State::new(0, 3));
    assert!(g.game_over());

    g.set_state(State::new(1, 2));
    assert_float_eq!(g.step(Action::Right), -1., abs <= 0.);
    assert!(g.game_over());
}

#[test]
fn undo_restores_every_legal_step() {
    let mut g = standard_grid();

    for s in g.non_terminal_states() {
        let legal = g.actions(&s).cloned().unwrap_or_default();
        for a in legal {
            g.set_state(s);
            g.step(a);
            let restored = g.undo_step(a).unwrap();
            assert_eq!(restored, s, "undoing {a} from {s}");
        }
    }
}

#[rstest]
#[case(State::new(2, 0), Action::Up, State::new(3, 0))] // below the grid
#[case(State::new(0, 0), Action::Down, State::new(-1, 0))] // above the grid
#[case(State::new(1, 0), Action::Left, State::new(1, 1))] // the blocked cell
fn unpaired_undo_off_the_state_set_is_an_invariant_violation(
    #[case] s: State,
    #[case] action: Action,
    #[case] landing: State,
) {
    let mut g = standard_grid();

    g.set_state(s);
    let err = g.undo_step(action).unwrap_err();

    assert_eq!(
        err,
        GridError::InvariantViolation {
            action,
            state: landing
        }
    );
}

#[test]
fn negative_grid_charges_every_non_terminal_cell() {
    let g = negative_grid(DEFAULT_STEP_COST);

    assert_eq!(g.all_states().len(), 11);
    for s in g.non_terminal_states() {
        assert_float_eq!(g.rewards()[&s], DEFAULT_STEP_COST, abs <= 0.);
    }
    assert_float_eq!(g.rewards()[&State::new(0, 3)], 1., abs <= 0.);
    assert_float_eq!(g.rewards()[&State::new(1, 3)], -1., abs <= 0.);
}
