//! Timer-driven session behaviour, run on a paused tokio clock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use combat_core::{
    AbilityCategory, AbilityDefinition, AbilityOutcome, CombatResult, CombatSnapshot, CombatState,
    CombatantStats, ConsumableRestore, EffectKind, EffectSpec, Equipment, FixedRng, HotbarBinding,
    Item, ItemSlot, MobStats, SnapshotError, Usability,
};
use combat_runtime::{
    CombatHost, CombatSession, Event, HostError, HotbarOutcome, SessionError, Topic,
};

/// Every roll hits for minimum damage; attack intervals are 60 ticks.
const ALWAYS_HIT: FixedRng = FixedRng(0);
/// Every roll misses.
const ALWAYS_MISS: FixedRng = FixedRng(99);

#[derive(Default)]
struct RecordingHost {
    ends: Mutex<Vec<(CombatResult, CombatState)>>,
    changes: Mutex<Vec<(u32, u32)>>,
    restores: HashMap<String, ConsumableRestore>,
}

impl RecordingHost {
    fn with_potion() -> Self {
        let mut restores = HashMap::new();
        restores.insert(
            "potion".to_string(),
            ConsumableRestore {
                health_restore: 30,
                mana_restore: 10,
            },
        );
        Self {
            restores,
            ..Self::default()
        }
    }

    fn ends(&self) -> Vec<(CombatResult, CombatState)> {
        self.ends.lock().unwrap().clone()
    }

    fn changes(&self) -> Vec<(u32, u32)> {
        self.changes.lock().unwrap().clone()
    }
}

#[async_trait]
impl CombatHost for RecordingHost {
    fn on_combat_end(&self, result: CombatResult, final_state: &CombatState) {
        self.ends.lock().unwrap().push((result, final_state.clone()));
    }

    fn on_health_change(&self, health: u32, mana: u32) {
        self.changes.lock().unwrap().push((health, mana));
    }

    async fn on_use_consumable(
        &self,
        item_id: &str,
    ) -> Result<Option<ConsumableRestore>, HostError> {
        if item_id == "cursed_flask" {
            return Err(HostError::new("inventory", "failed to remove item"));
        }
        Ok(self.restores.get(item_id).copied())
    }

    fn consumable_name(&self, item_id: &str) -> String {
        match item_id {
            "potion" => "Healing Potion".to_string(),
            other => other.to_string(),
        }
    }
}

fn hero() -> CombatantStats {
    CombatantStats::default().with_level(5)
}

fn training_dummy(health: u32) -> MobStats {
    MobStats::new("dummy", "Training Dummy", 5, health).with_damage(1, 1)
}

fn sword() -> Equipment {
    Equipment::builder()
        .weapon(
            Item::new("sword", "Practice Sword", ItemSlot::Weapon)
                .with_type("sword")
                .with_damage(10, 10),
        )
        .build()
}

fn fireball() -> AbilityDefinition {
    AbilityDefinition::new("fireball", "Fireball", AbilityCategory::Spell)
        .with_cost(20)
        .with_effect(EffectSpec::new(EffectKind::Damage, 30))
}

#[tokio::test(start_paused = true)]
async fn five_hits_end_in_exactly_one_victory() {
    let host = Arc::new(RecordingHost::default());
    let snapshot =
        CombatSnapshot::new(hero(), training_dummy(50), 200, 100).with_equipment(sword());
    let session = CombatSession::builder()
        .snapshot(snapshot)
        .host(host.clone())
        .rng(ALWAYS_HIT)
        .seed(7)
        .build()
        .unwrap();

    tokio::time::sleep(Duration::from_secs(31)).await;
    assert!(session.is_finished());
    let state = session.join().await.unwrap();

    let ends = host.ends();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].0, CombatResult::Victory);
    assert_eq!(ends[0].1.mob_health, 0);
    assert_eq!(state.result, Some(CombatResult::Victory));
    assert_eq!(state.clock, 300);
    assert!(!state.is_active);
    // The dummy hits back before the last swing.
    assert!(!host.changes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn forced_stop_reports_no_result() {
    let host = Arc::new(RecordingHost::default());
    let snapshot = CombatSnapshot::new(hero(), training_dummy(500), 200, 100);
    let session = CombatSession::builder()
        .snapshot(snapshot)
        .host(host.clone())
        .rng(ALWAYS_MISS)
        .build()
        .unwrap();

    tokio::time::sleep(Duration::from_millis(1_050)).await;
    let state = session.stop().await.unwrap();

    assert_eq!(state.clock, 10);
    assert!(!state.is_active);
    assert_eq!(state.result, None);
    assert!(host.ends().is_empty());
}

#[tokio::test(start_paused = true)]
async fn requirement_failures_do_not_touch_state() {
    let host = Arc::new(RecordingHost::default());
    let snapshot =
        CombatSnapshot::new(hero(), training_dummy(500), 200, 0).with_ability(fireball());
    let session = CombatSession::builder()
        .snapshot(snapshot)
        .host(host.clone())
        .rng(ALWAYS_MISS)
        .build()
        .unwrap();
    let handle = session.handle();

    let before = handle.query_state().await.unwrap();
    assert_eq!(
        handle.can_use("fireball").await.unwrap(),
        Usability::blocked("Need 20 mana")
    );
    assert_eq!(
        handle.use_ability("fireball").await.unwrap(),
        AbilityOutcome::Rejected(Usability::blocked("Need 20 mana"))
    );
    let after = handle.query_state().await.unwrap();
    assert_eq!(after.log.len(), before.log.len());
    assert_eq!(after.mob_health, 500);
    assert!(host.changes().is_empty());

    assert!(matches!(
        handle.use_ability("meteor").await,
        Err(SessionError::UnknownAbility(id)) if id == "meteor"
    ));
    session.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn cooldowns_count_down_on_their_own_timer() {
    let host = Arc::new(RecordingHost::default());
    let taunt = AbilityDefinition::new("taunt", "Taunt", AbilityCategory::Ability);
    let snapshot = CombatSnapshot::new(hero(), training_dummy(500), 200, 50).with_ability(taunt);
    let session = CombatSession::builder()
        .snapshot(snapshot)
        .host(host)
        .rng(ALWAYS_MISS)
        .build()
        .unwrap();
    let handle = session.handle();

    assert!(handle.use_ability("taunt").await.unwrap().is_used());
    tokio::time::sleep(Duration::from_millis(9_500)).await;
    assert!(!handle.can_use("taunt").await.unwrap().can_use);

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(handle.can_use("taunt").await.unwrap().can_use);
    session.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn consumables_go_through_the_host() {
    let host = Arc::new(RecordingHost::with_potion());
    let snapshot = CombatSnapshot::new(hero(), training_dummy(500), 150, 50);
    let session = CombatSession::builder()
        .snapshot(snapshot)
        .host(host.clone())
        .rng(ALWAYS_MISS)
        .build()
        .unwrap();
    let handle = session.handle();

    let report = handle.use_consumable("potion").await.unwrap().unwrap();
    assert!(report.resources_changed);
    assert_eq!(host.changes(), vec![(180, 60)]);

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.log.last(), Some("You use Healing Potion: +30 health, +10 mana."));

    // Collaborator failures and unknown items degrade to no effect.
    assert_eq!(handle.use_consumable("cursed_flask").await.unwrap(), None);
    assert_eq!(handle.use_consumable("pebble").await.unwrap(), None);
    assert_eq!(handle.query_state().await.unwrap().character_health, 180);
    session.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn host_echo_is_swallowed_once() {
    let host = Arc::new(RecordingHost::with_potion());
    let snapshot = CombatSnapshot::new(hero(), training_dummy(500), 150, 50);
    let session = CombatSession::builder()
        .snapshot(snapshot)
        .host(host.clone())
        .rng(ALWAYS_MISS)
        .build()
        .unwrap();
    let handle = session.handle();

    handle.use_consumable("potion").await.unwrap();
    let echo = handle.report_external_resources(180, 60).await.unwrap();
    assert!(!echo.health_synced);

    let external = handle.report_external_resources(120, 999).await.unwrap();
    assert!(external.health_synced);
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.character_health, 120);
    assert_eq!(state.character_mana, 60);
    session.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn hotbar_slots_and_keys() {
    let host = Arc::new(RecordingHost::with_potion());
    let snapshot = CombatSnapshot::new(hero(), training_dummy(500), 150, 50)
        .with_ability(fireball())
        .with_binding(HotbarBinding::ability(1, "fireball"))
        .with_binding(HotbarBinding::consumable(2, "potion"));
    let session = CombatSession::builder()
        .snapshot(snapshot)
        .host(host)
        .rng(ALWAYS_MISS)
        .build()
        .unwrap();
    let handle = session.handle();

    match handle.trigger_hotbar(1).await.unwrap() {
        HotbarOutcome::Ability(outcome) => assert!(outcome.is_used()),
        other => panic!("slot 1 holds an ability: {other:?}"),
    }
    assert_eq!(handle.query_state().await.unwrap().mob_health, 470);

    match handle.press_key('2').await.unwrap() {
        Some(HotbarOutcome::Consumable(Some(report))) => assert!(report.resources_changed),
        other => panic!("key 2 drinks the potion: {other:?}"),
    }

    assert_eq!(handle.press_key('5').await.unwrap(), None);
    assert_eq!(handle.press_key('q').await.unwrap(), None);
    assert!(matches!(
        handle.trigger_hotbar(5).await,
        Err(SessionError::EmptyHotbarSlot(5))
    ));
    session.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn events_follow_the_session() {
    let host = Arc::new(RecordingHost::default());
    let snapshot =
        CombatSnapshot::new(hero(), training_dummy(10), 200, 100).with_equipment(sword());
    let session = CombatSession::builder()
        .snapshot(snapshot)
        .host(host)
        .rng(ALWAYS_HIT)
        .build()
        .unwrap();
    let mut log = session.subscribe(Topic::Log);
    let mut telemetry = session.subscribe(Topic::Telemetry);
    let mut outcome = session.subscribe(Topic::Outcome);
    let handle = session.handle();

    match log.recv().await.unwrap() {
        Event::Log(event) => assert_eq!(event.line, "You engage Training Dummy (level 5)."),
        other => panic!("unexpected event: {other:?}"),
    }
    match telemetry.recv().await.unwrap() {
        Event::Telemetry(event) => {
            assert_eq!(event.clock, 1);
            assert_eq!(event.mob_max_health, 10);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    match outcome.recv().await.unwrap() {
        Event::Outcome(event) => {
            assert_eq!(event.result, CombatResult::Victory);
            assert_eq!(event.clock, 60);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    session.join().await.unwrap();
    assert!(matches!(
        handle.use_ability("fireball").await,
        Err(SessionError::SessionEnded)
    ));
}

#[tokio::test]
async fn build_validates_inputs() {
    let missing = CombatSession::builder()
        .host(Arc::new(RecordingHost::default()))
        .build();
    assert!(matches!(missing, Err(SessionError::MissingSnapshot)));

    let down = CombatSession::builder()
        .snapshot(CombatSnapshot::new(hero(), training_dummy(10), 0, 0))
        .host(Arc::new(RecordingHost::default()))
        .build();
    assert!(matches!(
        down,
        Err(SessionError::Snapshot(SnapshotError::CharacterDown))
    ));
}
