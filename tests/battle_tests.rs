//! Battle session tests.
//!
//! These tests play whole turns through `BattleSession`:
//! - Setup, execution and the energy stop condition
//! - Turn hand-off to the enemy and back
//! - Win, loss and tie detection
//! - Restart and level loading

use proptest::prelude::*;

use stack_battle::battle::{
    BattleSession, BattleState, BlockReason, ExecutionOutcome, InputGate, SwapOutcome,
};
use stack_battle::cards::{CardId, CardRegistry, CardTemplate, InstanceId};
use stack_battle::core::{BattleConfig, EntityBaseStats, Level, Side};
use stack_battle::effects::{EffectMode, EffectSpec, EffectTarget};
use stack_battle::error::{BattleError, LookupError, SwapRejection};
use stack_battle::events::BattleEvent;
use stack_battle::rules::GameResult;
use stack_battle::zones::PileRef;

const ZAP: CardId = CardId::new(1);
const ALPHA: CardId = CardId::new(10);
const BETA: CardId = CardId::new(11);
const GAMMA: CardId = CardId::new(12);
const ECHO: CardId = CardId::new(13);

fn registry() -> CardRegistry {
    CardRegistry::from_templates([
        CardTemplate::new(ZAP, "Zap", 1)
            .with_effect(EffectSpec::delete(1, EffectTarget::Opponent, EffectMode::Top)),
        CardTemplate::new(ALPHA, "A", 1),
        CardTemplate::new(BETA, "B", 1),
        CardTemplate::new(GAMMA, "C", 1),
        CardTemplate::new(ECHO, "Echo", 0).with_effect(EffectSpec::add(
            1,
            EffectTarget::Owner,
            EffectMode::Top,
            ECHO,
        )),
    ])
    .unwrap()
}

fn session_with(player: EntityBaseStats, enemy: EntityBaseStats) -> BattleSession {
    let mut s = BattleSession::new(BattleConfig::new(42), registry());
    s.setup_battle(player, enemy).unwrap();
    s
}

fn zaps(name: &str, energy: i32, count: usize) -> EntityBaseStats {
    EntityBaseStats::new(name, energy, 3).with_deck(vec![ZAP; count])
}

// =============================================================================
// Setup
// =============================================================================

/// Setup queues the reset, the enemy refill and the player's turn start in order.
#[test]
fn test_setup_event_order() {
    let mut s = session_with(zaps("Hero", 2, 3), zaps("Slime", 1, 3));

    assert_eq!(
        s.drain_events(),
        vec![
            BattleEvent::BattleReset,
            BattleEvent::EnergyReset {
                side: Side::Enemy,
                energy: 1
            },
            BattleEvent::StateChanged {
                from: BattleState::Setup,
                to: BattleState::PlayerTurn
            },
            BattleEvent::TurnStarted { side: Side::Player },
            BattleEvent::EnergyReset {
                side: Side::Player,
                energy: 2
            },
        ]
    );
    assert_eq!(s.pending_events(), 0);
}

/// Invalid stats are refused before anything changes.
#[test]
fn test_setup_rejects_invalid_stats() {
    let mut s = BattleSession::new(BattleConfig::default(), registry());

    let result = s.setup_battle(zaps("Hero", 2, 3), EntityBaseStats::new("Slime", 1, 0));
    assert!(matches!(result, Err(BattleError::InvalidStats { .. })));
    assert_eq!(s.state(), BattleState::Setup);
}

/// Shuffled stacks depend only on the seed.
#[test]
fn test_shuffle_is_seeded() {
    let stats = || {
        EntityBaseStats::new("Hero", 2, 3)
            .with_deck([ALPHA, BETA, GAMMA, ZAP, ZAP, ALPHA, BETA])
            .shuffled()
    };

    let a = session_with(stats(), zaps("Slime", 1, 2));
    let b = session_with(stats(), zaps("Slime", 1, 2));

    assert_eq!(
        a.entity(Side::Player).stack.titles(),
        b.entity(Side::Player).stack.titles()
    );
}

// =============================================================================
// Execution
// =============================================================================

/// With 2 energy, execute-all runs A and B and stops before C.
#[test]
fn test_execute_all_stops_on_energy() {
    let mut s = session_with(
        EntityBaseStats::new("Hero", 2, 3).with_deck([ALPHA, BETA, GAMMA]),
        zaps("Slime", 1, 3),
    );

    let outcomes: Vec<_> = s.execute_all(Side::Player).collect();

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_executed() && outcomes[1].is_executed());
    assert_eq!(
        outcomes[2],
        ExecutionOutcome::Blocked(BlockReason::InsufficientEnergy {
            cost: 1,
            available: 0
        })
    );

    let player = s.entity(Side::Player);
    assert_eq!(player.discard.titles(), vec!["A", "B"]);
    assert_eq!(player.stack.titles(), vec!["C"]);
    assert_eq!(player.current_energy, 0);
    assert_eq!(s.state(), BattleState::PlayerExecution);
}

/// Executed cards report their instance, and events carry the same id.
#[test]
fn test_execute_next_reports_card() {
    let mut s = session_with(
        EntityBaseStats::new("Hero", 2, 3).with_deck([ALPHA, BETA]),
        zaps("Slime", 1, 1),
    );
    s.drain_events();

    let ExecutionOutcome::Executed(card) = s.execute_next(Side::Player) else {
        panic!("expected the top card to execute");
    };
    assert_eq!(card.title, "A");
    assert_eq!(card.id, InstanceId(0));

    let events = s.drain_events();
    assert!(events.contains(&BattleEvent::CardExecuted {
        side: Side::Player,
        card: InstanceId(0),
        title: "A".to_string(),
        cost: 1,
    }));
}

/// Swaps are still allowed once the player has started executing.
#[test]
fn test_swap_during_execution() {
    let mut s = session_with(zaps("Hero", 1, 4), zaps("Slime", 1, 4));
    assert!(s.execute_next(Side::Player).is_executed());
    assert_eq!(s.state(), BattleState::PlayerExecution);

    assert!(matches!(
        s.attempt_swap(Side::Player, 0, 1, false, false),
        SwapOutcome::Applied(_)
    ));
}

/// A held card blocks ending the turn.
#[test]
fn test_end_turn_blocked_while_card_held() {
    struct Held;
    impl InputGate for Held {
        fn card_held(&self) -> bool {
            true
        }
    }

    let mut s = session_with(zaps("Hero", 1, 2), zaps("Slime", 1, 2));
    s.set_gate(Box::new(Held));

    assert_eq!(s.end_player_turn(), Err(BattleError::CardHeld));
    assert_eq!(s.state(), BattleState::PlayerTurn);
}

/// Strict mode refuses to end the turn until events are drained.
#[test]
fn test_end_turn_strict_mode() {
    let mut s = BattleSession::new(BattleConfig::new(1).rejecting_while_events_pending(), registry());
    s.setup_battle(zaps("Hero", 1, 2), zaps("Slime", 1, 3)).unwrap();

    assert_eq!(s.end_player_turn(), Err(BattleError::EventsPending));
    s.drain_events();
    assert!(s.end_player_turn().is_ok());
}

/// A free card that puts a copy of itself on top ends the enemy turn at the
/// step limit instead of looping.
#[test]
fn test_self_refilling_enemy_turn_is_bounded() {
    let mut s = BattleSession::new(BattleConfig::new(3).with_max_steps_per_turn(16), registry());
    s.setup_battle(
        zaps("Hero", 1, 3),
        EntityBaseStats::new("Mirror", 0, 3).with_deck([ECHO]),
    )
    .unwrap();

    let outcomes = s.end_player_turn().unwrap();

    assert_eq!(outcomes.len(), 17);
    assert!(outcomes[..16].iter().all(ExecutionOutcome::is_executed));
    assert_eq!(
        outcomes[16],
        ExecutionOutcome::Blocked(BlockReason::StepLimit { steps: 16 })
    );
    assert_eq!(s.state(), BattleState::PlayerTurn);
    assert_eq!(s.entity(Side::Enemy).stack.titles(), vec!["Echo"]);
    assert_eq!(s.entity(Side::Enemy).discard.len(), 16);
}

/// The same card in the player's stack ends execute-all at the step limit.
#[test]
fn test_self_refilling_execute_all_is_finite() {
    let mut s = BattleSession::new(BattleConfig::new(3).with_max_steps_per_turn(8), registry());
    s.setup_battle(
        EntityBaseStats::new("Hero", 1, 3).with_deck([ECHO]),
        zaps("Slime", 1, 3),
    )
    .unwrap();

    let outcomes: Vec<_> = s.execute_all(Side::Player).collect();

    assert_eq!(outcomes.len(), 9);
    assert_eq!(
        outcomes.last(),
        Some(&ExecutionOutcome::Blocked(BlockReason::StepLimit { steps: 8 }))
    );
    assert!(s.end_player_turn().is_ok());
}

fn costed_registry() -> CardRegistry {
    CardRegistry::from_templates(
        (0..4).map(|cost| CardTemplate::new(CardId::new(20 + cost as u32), format!("Cost{}", cost), cost)),
    )
    .unwrap()
}

proptest! {
    /// Execute-all only stops early on a top card the side cannot afford.
    #[test]
    fn prop_execute_all_stops_on_unaffordable(
        costs in prop::collection::vec(0i32..4, 1..12),
        energy in 0i32..8,
    ) {
        let deck: Vec<_> = costs.iter().map(|&cost| CardId::new(20 + cost as u32)).collect();
        let mut s = BattleSession::new(BattleConfig::new(0), costed_registry());
        s.setup_battle(
            EntityBaseStats::new("Hero", energy, 3).with_deck(deck),
            EntityBaseStats::new("Slime", 1, 3).with_deck([CardId::new(20)]),
        )
        .unwrap();

        let outcomes: Vec<_> = s.execute_all(Side::Player).collect();
        let player = s.entity(Side::Player);

        match outcomes.last() {
            Some(ExecutionOutcome::Blocked(BlockReason::InsufficientEnergy { cost, available })) => {
                let top = player.stack.top().unwrap();
                prop_assert_eq!(top.energy_cost, *cost);
                prop_assert_eq!(player.current_energy, *available);
                prop_assert!(player.current_energy < top.energy_cost);
            }
            Some(ExecutionOutcome::GameOver(GameResult::Loss)) => {
                prop_assert!(player.stack.is_empty());
            }
            other => {
                prop_assert!(false, "unexpected stop: {:?}", other);
            }
        }
        let executed = outcomes.iter().filter(|o| o.is_executed()).count();
        prop_assert_eq!(executed + player.stack.len(), costs.len());
    }
}

// =============================================================================
// Game over
// =============================================================================

/// Both stacks empty out on the same step: a tie.
#[test]
fn test_full_game_ends_in_tie() {
    let mut s = session_with(zaps("Hero", 2, 5), zaps("Slime", 1, 5));

    let first: Vec<_> = s.execute_all(Side::Player).collect();
    assert_eq!(first.iter().filter(|o| o.is_executed()).count(), 2);

    let enemy = s.end_player_turn().unwrap();
    assert_eq!(enemy.len(), 2);
    assert!(enemy[0].is_executed());
    assert_eq!(s.entity(Side::Player).stack.len(), 2);
    assert_eq!(s.entity(Side::Enemy).stack.len(), 2);

    let second: Vec<_> = s.execute_all(Side::Player).collect();
    assert_eq!(second.last(), Some(&ExecutionOutcome::GameOver(GameResult::Tie)));
    assert_eq!(s.result(), Some(GameResult::Tie));
    assert_eq!(s.state(), BattleState::GameOver);
    assert!(s.drain_events().contains(&BattleEvent::GameOver {
        result: GameResult::Tie
    }));
}

/// Running out of own cards loses.
#[test]
fn test_player_runs_out_and_loses() {
    let mut s = session_with(zaps("Hero", 2, 1), zaps("Slime", 1, 3));

    let outcomes: Vec<_> = s.execute_all(Side::Player).collect();

    assert_eq!(outcomes.last(), Some(&ExecutionOutcome::GameOver(GameResult::Loss)));
    assert!(!s.result().unwrap().is_winner(Side::Player));
}

/// Emptying the enemy wins, and nothing executes afterwards.
#[test]
fn test_player_wins() {
    let mut s = session_with(zaps("Hero", 2, 3), zaps("Slime", 1, 1));

    let outcomes: Vec<_> = s.execute_all(Side::Player).collect();

    assert_eq!(outcomes.last(), Some(&ExecutionOutcome::GameOver(GameResult::Win)));
    assert!(s.result().unwrap().is_winner(Side::Player));
    assert_eq!(
        s.attempt_swap(Side::Player, 0, 1, false, false),
        SwapOutcome::Rejected(SwapRejection::WrongPhase(BattleState::GameOver))
    );
}

// =============================================================================
// Restart and levels
// =============================================================================

/// Restart rebuilds both sides with fresh ids and drops pending events.
#[test]
fn test_restart_rebuilds_battle() {
    let mut s = session_with(zaps("Hero", 2, 3), zaps("Slime", 1, 3));
    s.execute_all(Side::Player).for_each(drop);
    s.end_player_turn().unwrap();

    s.restart().unwrap();

    assert_eq!(s.state(), BattleState::PlayerTurn);
    assert_eq!(s.result(), None);
    let player = s.entity(Side::Player);
    assert_eq!(player.stack.len(), 3);
    assert!(player.discard.is_empty());
    assert_eq!(player.current_energy, 2);
    assert_eq!(player.stack.top().unwrap().id, InstanceId(0));
    assert_eq!(s.entity(Side::Enemy).stack.len(), 3);
    assert_eq!(s.drain_events()[0], BattleEvent::BattleReset);
}

/// Loading a level records its number; restart keeps it, a plain setup clears it.
#[test]
fn test_load_level() {
    let level = Level::new(3, zaps("Hero", 2, 4), zaps("Boss", 3, 6));
    let mut s = BattleSession::new(BattleConfig::new(9), registry());

    s.load_level(&level).unwrap();
    assert_eq!(s.level(), Some(3));
    assert_eq!(s.entity(Side::Enemy).name, "Boss");
    assert_eq!(s.entity(Side::Enemy).current_energy, 3);

    s.restart().unwrap();
    assert_eq!(s.level(), Some(3));

    s.setup_battle(zaps("Hero", 2, 1), zaps("Slime", 1, 1)).unwrap();
    assert_eq!(s.level(), None);
}

// =============================================================================
// Inspection
// =============================================================================

/// Pile listings and dumps reflect the live state.
#[test]
fn test_inspection() {
    let mut s = session_with(
        EntityBaseStats::new("Hero", 2, 3).with_deck([ALPHA, BETA]),
        zaps("Slime", 1, 2),
    );
    assert!(s.execute_next(Side::Player).is_executed());

    assert_eq!(s.print_pile(PileRef::stack(Side::Player)), "0. B [1]\n");
    assert_eq!(s.lookup_pile("pd").unwrap().titles(), vec!["A"]);
    assert!(matches!(
        s.lookup_pile("graveyard"),
        Err(LookupError::UnknownPile(_))
    ));

    let dump = s.debug_dump(Side::Player);
    assert!(dump.starts_with("Hero : "));
    assert!(dump.contains("- CurrentEnergy  : 1"));
}
