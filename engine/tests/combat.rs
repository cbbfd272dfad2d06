use engine::enemy::spawn_enemy;
use engine::{
    Ability, CombatConfig, CombatSession, CombatState, Dice, EnemyTable, Entity, ScriptedDice,
    Side,
};
use proptest::prelude::*;

fn hero() -> Entity {
    let mut hero = Entity::new("Hero", 15, 10, 1);
    hero.set_score(Ability::Str, 14);
    hero.set_score(Ability::Dex, 12);
    hero
}

fn goblin() -> Entity {
    spawn_enemy("Goblin", None, &EnemyTable::builtin().unwrap()).unwrap()
}

#[test]
fn tied_initiative_goes_to_first_participant() {
    // Equal DEX so equal naturals give equal totals.
    let a = Entity::new("Player", 10, 10, 1);
    let b = Entity::new("Enemy", 10, 10, 1);
    let mut session = CombatSession::new(a, b);
    let mut dice = ScriptedDice::new([15, 15]);
    assert_eq!(session.roll_initiative(&mut dice).unwrap(), [Side::A, Side::B]);
    assert_eq!(session.state(), CombatState::InitiativeRolled);
}

#[test]
fn tied_totals_after_modifiers_go_to_first_participant() {
    // Hero 14 + 1 vs Goblin 13 + 2.
    let mut session = CombatSession::new(hero(), goblin());
    let mut dice = ScriptedDice::new([14, 13]);
    assert_eq!(session.roll_initiative(&mut dice).unwrap(), [Side::A, Side::B]);
}

#[test]
fn higher_enemy_initiative_acts_first() {
    let mut session = CombatSession::new(hero(), goblin());
    let mut dice = ScriptedDice::new([8, 12]);
    assert_eq!(session.roll_initiative(&mut dice).unwrap(), [Side::B, Side::A]);
}

#[test]
fn knockout_ends_the_round_before_the_second_actor() {
    let mut session = CombatSession::new(hero(), goblin());
    // Initiative 15 / 5, Hero hits with 18 and rolls 6 (8 damage); the last
    // two faces would be the goblin's swing.
    let mut dice = ScriptedDice::new([15, 5, 18, 6, 20, 6]);
    session.roll_initiative(&mut dice).unwrap();
    let continues = session.execute_round(&mut dice).unwrap();
    assert!(!continues);
    assert_eq!(session.round(), 1);
    assert_eq!(session.participant_b().hit_points(), 0);
    assert_eq!(session.participant_a().hit_points(), 15);
    assert_eq!(dice.remaining(), 2);
    assert_eq!(session.state(), CombatState::Concluded);
}

#[test]
fn round_with_no_knockout_continues() {
    let mut session = CombatSession::new(hero(), goblin());
    // Both swing and hit lightly: Hero 15 -> 3 dmg, Goblin 15 -> 2 - 1 = 1 dmg.
    let mut dice = ScriptedDice::new([15, 5, 15, 1, 15, 2]);
    session.roll_initiative(&mut dice).unwrap();
    assert!(session.execute_round(&mut dice).unwrap());
    assert_eq!(session.round(), 1);
    assert_eq!(session.participant_b().hit_points(), 4);
    assert_eq!(session.participant_a().hit_points(), 14);
    assert_eq!(session.state(), CombatState::RoundInProgress);
}

#[test]
fn run_combat_reports_the_survivor() {
    let mut session = CombatSession::new(hero(), goblin());
    let mut dice = ScriptedDice::new([15, 5, 18, 6]);
    assert_eq!(session.run_combat(&mut dice).unwrap(), Side::A);
    assert_eq!(session.winner(), Some(Side::A));
    assert_eq!(session.state(), CombatState::Concluded);
}

#[test]
fn fallen_actor_is_skipped_without_rolling() {
    let a = Entity::new("A", 10, 10, 1);
    let b = Entity::new("B", 0, 10, 1);
    let mut session = CombatSession::new(a, b);
    // B wins initiative; the last two faces would be an attack.
    let mut dice = ScriptedDice::new([5, 15, 20, 6]);
    assert_eq!(session.roll_initiative(&mut dice).unwrap(), [Side::B, Side::A]);
    assert_eq!(dice.remaining(), 2);

    assert!(!session.execute_round(&mut dice).unwrap());
    assert_eq!(session.round(), 1);
    assert_eq!(dice.remaining(), 2);
    assert_eq!(session.state(), CombatState::Concluded);
    assert_eq!(session.winner(), Some(Side::A));
    assert_eq!(session.participant_a().hit_points(), 10);
    assert!(session.log().iter().all(|l| !l.starts_with("[ATTACK]")));
    assert_eq!(session.log().last().map(String::as_str), Some("[ROUND] 1"));
}

#[test]
fn scripted_fight_log() {
    let mut hero = Entity::new("Hero", 12, 12, 1);
    hero.set_score(Ability::Str, 14);
    hero.set_score(Ability::Dex, 12);
    let mut session = CombatSession::new(hero, goblin());
    let mut dice = ScriptedDice::new([9, 8, 10, 15, 1, 11, 5]);
    assert_eq!(session.run_combat(&mut dice).unwrap(), Side::A);
    insta::assert_snapshot!(session.log().join("\n"), @r"
    [START] Hero (HP 12/12, AC 12) vs Goblin (HP 7/7, AC 13)
    [INIT] Hero d20=9 +1 = 10 vs Goblin d20=8 +2 = 10 → Hero goes first
    [ROUND] 1
    [ATTACK][Hero → Goblin] d20=10 +2 = 12 vs AC 13 → MISS
    [ATTACK][Goblin → Hero] d20=15 -1 = 14 vs AC 12 → HIT
    [DMG][Goblin] d6=1 -1 = 0 (min 1) = 1
    [HP][Hero] 12 → 11 / 12
    [ROUND] 2
    [ATTACK][Hero → Goblin] d20=11 +2 = 13 vs AC 13 → HIT
    [DMG][Hero] d6=5 +2 = 7
    [HP][Goblin] 7 → 0 / 7
    [DOWN][Goblin] defeated
    [END] winner=Hero rounds=2
    ");
}

prop_compose! {
    fn combatant(name: &'static str)(
        hp in 1i32..40,
        ac in 5i32..16,
        str_score in 8i32..19,
        dex in 3i32..19,
    ) -> Entity {
        let mut e = Entity::new(name, hp, ac, 1);
        e.set_score(Ability::Str, str_score);
        e.set_score(Ability::Dex, dex);
        e
    }
}

proptest! {
    #[test]
    fn exactly_one_side_survives(seed in any::<u64>(), a in combatant("A"), b in combatant("B")) {
        let total_hp = a.hit_points() + b.hit_points();
        let mut session = CombatSession::with_config(a, b, CombatConfig::default());
        let mut dice = Dice::from_seed(seed);
        let winner = session.run_combat(&mut dice).unwrap();

        let alive = [session.participant_a().is_alive(), session.participant_b().is_alive()];
        prop_assert_eq!(alive.iter().filter(|x| **x).count(), 1);
        prop_assert!(session.participant(winner).is_alive());
        prop_assert!(!session.participant(winner.opponent()).is_alive());
        prop_assert_eq!(session.winner(), Some(winner));

        // Each landed hit removes at least one point and the fight stops at
        // the first knockout.
        let hits = session.log().iter().filter(|l| l.ends_with("→ HIT")).count() as i32;
        prop_assert!(hits < total_hp);
        prop_assert!(session.round() >= 1);
    }
}
