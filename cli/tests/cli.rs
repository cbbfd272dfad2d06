use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn races_lists_builtin_bonuses() {
    Command::cargo_bin("dnd-cli")
        .unwrap()
        .arg("races")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Human (+1 STR, +1 DEX, +1 CON, +1 INT, +1 WIS, +1 CHA)"))
        .stdout(predicate::str::contains("5. Orc (+2 STR, +1 CON)"));
}

#[test]
fn enemies_lists_templates() {
    Command::cargo_bin("dnd-cli")
        .unwrap()
        .arg("enemies")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goblin: HP 7, AC 13, level 1"))
        .stdout(predicate::str::contains("Orc: HP 15, AC 13, level 2"));
}

#[test]
fn roll_is_deterministic_for_a_seed() {
    let run = || {
        Command::cargo_bin("dnd-cli")
            .unwrap()
            .args(["roll", "--seed", "7", "--sides", "6", "--count", "3", "--rolls", "4"])
            .output()
            .unwrap()
            .stdout
    };
    let first = run();
    assert_eq!(first, run());
    assert_eq!(String::from_utf8(first).unwrap().lines().count(), 4);
}

#[test]
fn fight_prints_log_and_winner() {
    Command::cargo_bin("dnd-cli")
        .unwrap()
        .args(["fight", "--name", "Aria", "--race", "elf", "--enemy", "orc", "--seed", "11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[INIT]"))
        .stdout(predicate::str::contains("[END] winner="))
        .stdout(predicate::str::contains("is victorious!"));
}

#[test]
fn fight_rejects_unknown_enemy() {
    Command::cargo_bin("dnd-cli")
        .unwrap()
        .args(["fight", "--enemy", "Dragon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid enemy type key 'Dragon'"));
}

#[test]
fn play_quits_from_menu() {
    Command::cargo_bin("dnd-cli")
        .unwrap()
        .args(["play", "--seed", "3"])
        .write_stdin("Mira\n2\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mira the Elf"))
        .stdout(predicate::str::contains("Mira lives to adventure another day!"));
}

#[test]
fn simulate_vs_reports_win_rate() {
    Command::cargo_bin("simulate-vs")
        .unwrap()
        .args(["--trials", "20", "--enemy", "Goblin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("trials:             20"))
        .stdout(predicate::str::contains("win rate:"));
}

#[test]
fn roll_rejects_degenerate_dice() {
    Command::cargo_bin("dnd-cli")
        .unwrap()
        .args(["roll", "--sides", "0", "--count", "1", "--rolls", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--sides"))
        .stderr(predicate::str::contains("panicked").not());

    Command::cargo_bin("dnd-cli")
        .unwrap()
        .args(["roll", "--sides", "6", "--count", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--count"));
}

#[test]
fn simulate_vs_reads_yaml_config_with_bom() {
    let config = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/duel.yaml");
    Command::cargo_bin("simulate-vs")
        .unwrap()
        .args(["--trials", "10", "--config", config])
        .assert()
        .success()
        .stdout(predicate::str::contains("hero:               Dwarf (base HP 10)"))
        .stdout(predicate::str::contains("enemy:              Orc"))
        .stdout(predicate::str::contains("seed:               5"));
}
