//! End-to-end runs with real agent processes, launched as `sh -c` one-liners
//! through the production [`ShellLauncher`].

#![cfg(unix)]

use dorf::prelude::*;

fn quiet() -> Configuration {
    Configuration::new().with_verbose(false)
}

fn run(agents: &[&str]) -> (TurnEngine<dorf::agent_process::AgentProcess>, Outcome) {
    let commands: Vec<String> = agents.iter().map(|s| s.to_string()).collect();
    let launcher = ShellLauncher::default();
    let mut engine = TurnEngine::setup(&commands, Board::new(10, 10), &launcher, quiet())
        .expect("setup failed");
    let outcome = engine.run().expect("run failed");
    (engine, outcome)
}

#[test]
fn two_row_plus_agents() {
    // Agent 1 starts on the bottom row and walks straight off the board.
    let (engine, outcome) = run(&["yes row+", "yes row+"]);
    assert!(matches!(outcome, Outcome::Winner { id: 0, .. }));
    assert_eq!(engine.turn(), 1);
    assert_eq!(engine.dead_ids(), vec![1]);
}

#[test]
fn garbage_talker_is_eliminated_first() {
    let (engine, outcome) = run(&["echo diag+", "yes row-"]);
    assert_eq!(engine.dead_ids(), vec![0]);
    match outcome {
        Outcome::Winner { id, name } => {
            assert_eq!(id, 1);
            assert_eq!(name, "yes row-");
        }
        Outcome::NoSurvivors => panic!("expected a winner"),
    }
}

#[test]
fn agent_that_exits_immediately_forfeits() {
    // `true` closes stdout without writing a token: EOF is an invalid move.
    let (engine, outcome) = run(&["true", "yes row-"]);
    assert_eq!(engine.dead_ids(), vec![0]);
    assert!(matches!(outcome, Outcome::Winner { id: 1, .. }));
}

#[test]
fn four_agents_play_out_deterministically() {
    // Corners: 0:(0,0) 1:(9,9) 2:(0,9) 3:(9,0).
    // Turn 1: agents 2 and 3 walk off the board (but still vacated their
    // corners first). Agent 0 then descends column 0 and agent 1 climbs
    // column 9; on turn 9 each arrives on a corner exhausted in turn 1, so
    // both die in the same turn and nobody wins.
    let (engine, outcome) = run(&["yes row+", "yes row-", "yes col+", "yes col-"]);
    assert_eq!(engine.dead_ids(), vec![2, 3, 0, 1]);
    assert_eq!(engine.turn(), 9);
    assert_eq!(outcome, Outcome::NoSurvivors);
}

#[test]
fn three_agents_are_rejected_before_anything_is_spawned() {
    let commands: Vec<String> = vec!["yes row+".into(), "yes row+".into(), "yes row+".into()];
    let launcher = ShellLauncher::default();
    let result = TurnEngine::setup(&commands, Board::new(10, 10), &launcher, quiet());
    assert!(result.is_err());
}
