use super::*;
use crate::ability::{AbilityCategory, AbilityDefinition};
use crate::config::CombatConfig;
use crate::effects::{EffectKind, EffectSpec};
use crate::env::{CombatContext, Equipment, FixedRng, Item, ItemSlot, MobStats, RngOracle};
use crate::state::CombatSnapshot;
use crate::stats::{CombatantStats, StatKind};

/// `FixedRng(0)`: every roll hits, minimum damage, 60-tick intervals.
const ALWAYS_HIT: u32 = 0;
/// `FixedRng(99)`: every roll misses (hit chance tops out at 99).
const ALWAYS_MISS: u32 = 99;

struct Fixture {
    context: CombatContext,
    rng: Box<dyn RngOracle>,
    state: CombatState,
}

impl Fixture {
    fn new(snapshot: CombatSnapshot, rng: u32) -> Self {
        let context = snapshot
            .build_context(CombatConfig::default())
            .expect("valid snapshot");
        let rng: Box<dyn RngOracle> = Box::new(FixedRng(rng));
        let state = CombatState::from_snapshot(&snapshot, &CombatEnv::new(&context, rng.as_ref()), 7);
        Self { context, rng, state }
    }

    fn tick(&mut self) -> TickReport {
        let env = CombatEnv::new(&self.context, self.rng.as_ref());
        CombatEngine::new(&mut self.state).tick(&env)
    }

    fn ticks(&mut self, count: usize) -> Vec<TickReport> {
        (0..count).map(|_| self.tick()).collect()
    }

    fn use_ability(&mut self, id: &str) -> AbilityOutcome {
        let env = CombatEnv::new(&self.context, self.rng.as_ref());
        CombatEngine::new(&mut self.state)
            .use_ability(id, &env)
            .expect("known ability")
    }

    fn can_use(&mut self, id: &str) -> Usability {
        let env = CombatEnv::new(&self.context, self.rng.as_ref());
        CombatEngine::new(&mut self.state)
            .can_use(id, &env)
            .expect("known ability")
    }

    fn external(&mut self, health: u32, mana: u32) -> TickReport {
        let env = CombatEnv::new(&self.context, self.rng.as_ref());
        CombatEngine::new(&mut self.state).accept_external(health, mana, &env)
    }

    fn max_health(&self) -> u32 {
        let env = CombatEnv::new(&self.context, self.rng.as_ref());
        self.state.maximums(&env).health
    }

    fn log_contains(&self, needle: &str) -> bool {
        self.state.log.lines().iter().any(|line| line.contains(needle))
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

#[test]
fn five_hits_of_ten_kill_a_fifty_health_mob() {
    let snapshot = CombatSnapshot::new(hero(), training_dummy(50), 200, 100).with_equipment(sword());
    let mut fx = Fixture::new(snapshot, ALWAYS_HIT);

    let reports = fx.ticks(400);

    let endings: Vec<_> = reports.iter().filter_map(|r| r.ended).collect();
    assert_eq!(endings, vec![CombatResult::Victory]);
    assert_eq!(fx.state.mob_health, 0);
    assert_eq!(fx.state.result, Some(CombatResult::Victory));
    assert!(!fx.state.is_active);
    assert_eq!(
        fx.state.log.lines().iter().filter(|l| l.starts_with("You hit")).count(),
        5
    );
    // 5 attacks at 60-tick intervals
    assert_eq!(fx.state.clock, 300);
}

#[test]
fn ended_session_ignores_further_ticks() {
    let snapshot = CombatSnapshot::new(hero(), training_dummy(10), 200, 100).with_equipment(sword());
    let mut fx = Fixture::new(snapshot, ALWAYS_HIT);
    fx.ticks(60);
    assert!(!fx.state.is_active);

    let frozen = fx.state.clone();
    let report = fx.tick();
    assert!(!report.changed_anything());
    assert_eq!(fx.state, frozen);
}

#[test]
fn mob_kill_preempts_mob_attack_in_the_same_tick() {
    let snapshot = CombatSnapshot::new(hero(), training_dummy(10), 200, 100).with_equipment(sword());
    let mut fx = Fixture::new(snapshot, ALWAYS_HIT);

    fx.ticks(60);

    assert_eq!(fx.state.result, Some(CombatResult::Victory));
    assert_eq!(fx.state.character_health, 200);
    assert!(!fx.log_contains("hits you"));
}

#[test]
fn character_death_is_defeat() {
    let brute = MobStats::new("ogre", "Ogre", 5, 500).with_damage(400, 400);
    let snapshot = CombatSnapshot::new(hero(), brute, 50, 0);
    let mut fx = Fixture::new(snapshot, ALWAYS_HIT);

    let reports = fx.ticks(60);

    assert_eq!(reports.last().and_then(|r| r.ended), Some(CombatResult::Defeat));
    assert_eq!(fx.state.character_health, 0);
    assert_eq!(fx.state.result, Some(CombatResult::Defeat));
}

#[test]
fn insufficient_mana_rejects_without_mutation() {
    let fireball = AbilityDefinition::new("fireball", "Fireball", AbilityCategory::Spell)
        .with_cost(20)
        .with_effect(EffectSpec::new(EffectKind::Damage, 30));
    let snapshot = CombatSnapshot::new(hero(), training_dummy(100), 200, 0).with_ability(fireball);
    let mut fx = Fixture::new(snapshot, ALWAYS_MISS);

    let before = fx.state.clone();
    assert_eq!(fx.can_use("fireball"), Usability::blocked("Need 20 mana"));
    assert_eq!(
        fx.use_ability("fireball"),
        AbilityOutcome::Rejected(Usability::blocked("Need 20 mana"))
    );
    assert_eq!(fx.state, before);
}

#[test]
fn ability_resolves_effects_then_pays_cost() {
    let fireball = AbilityDefinition::new("fireball", "Fireball", AbilityCategory::Spell)
        .with_cost(20)
        .with_cooldown(3)
        .with_effect(EffectSpec::new(EffectKind::Damage, 20).scaled_by(StatKind::Intelligence, 2.0));
    let character = hero().with(StatKind::Intelligence, 14);
    let snapshot = CombatSnapshot::new(character, training_dummy(100), 200, 50).with_ability(fireball);
    let mut fx = Fixture::new(snapshot, ALWAYS_MISS);

    let AbilityOutcome::Used(report) = fx.use_ability("fireball") else {
        panic!("fireball should be usable");
    };

    assert_eq!(fx.state.mob_health, 72);
    assert_eq!(fx.state.character_mana, 30);
    assert!(report.resources_changed && report.mob_health_changed);
    assert_eq!(fx.state.cooldowns.remaining("fireball"), 3);
    assert_eq!(fx.can_use("fireball"), Usability::blocked("On cooldown (3s)"));
    assert!(fx.log_contains("Fireball hits Training Dummy for 28 damage."));
}

#[test]
fn lethal_ability_still_commits_cost_before_ending() {
    let execute = AbilityDefinition::new("execute", "Execute", AbilityCategory::Attack)
        .with_cost(10)
        .with_effect(EffectSpec::new(EffectKind::Damage, 50))
        .with_effect(EffectSpec::new(EffectKind::Dot, 5).named("Bleed").lasting(5));
    let snapshot = CombatSnapshot::new(hero(), training_dummy(40), 200, 50).with_ability(execute);
    let mut fx = Fixture::new(snapshot, ALWAYS_MISS);

    let AbilityOutcome::Used(report) = fx.use_ability("execute") else {
        panic!("execute should be usable");
    };

    assert_eq!(report.ended, Some(CombatResult::Victory));
    assert_eq!(fx.state.character_mana, 40);
    assert!(fx.state.effects.dots.is_empty());
    assert!(!fx.state.is_active);
}

#[test]
fn generic_abilities_fall_back_to_default_cooldown() {
    let taunt = AbilityDefinition::new("taunt", "Taunt", AbilityCategory::Ability);
    let snapshot = CombatSnapshot::new(hero(), training_dummy(100), 200, 50).with_ability(taunt);
    let mut fx = Fixture::new(snapshot, ALWAYS_MISS);

    assert!(fx.use_ability("taunt").is_used());
    assert_eq!(fx.can_use("taunt"), Usability::blocked("On cooldown (10s)"));

    for _ in 0..9 {
        CombatEngine::new(&mut fx.state).tick_cooldowns();
    }
    assert!(!fx.can_use("taunt").can_use);
    let ready = CombatEngine::new(&mut fx.state).tick_cooldowns();
    assert_eq!(ready, vec!["taunt".to_string()]);
    assert!(fx.can_use("taunt").can_use);
}

#[test]
fn constitution_buff_moves_current_and_max_health_differently() {
    let fortitude = AbilityDefinition::new("fortitude", "Fortitude", AbilityCategory::Spell).with_effect(
        EffectSpec::new(EffectKind::Buff, 5)
            .on_stat(StatKind::Constitution)
            .lasting(30),
    );

    // Below the post-expiry max: untouched by expiry.
    let snapshot = CombatSnapshot::new(hero(), training_dummy(1_000), 100, 50).with_ability(fortitude.clone());
    let mut fx = Fixture::new(snapshot, ALWAYS_MISS);
    assert_eq!(fx.max_health(), 200);
    fx.use_ability("fortitude");
    assert_eq!(fx.state.character_health, 125);
    assert_eq!(fx.max_health(), 240);
    fx.ticks(300);
    assert!(fx.state.effects.buffs.is_empty());
    assert_eq!(fx.max_health(), 200);
    // regen: +2 at ticks 100 and 200 while buffed, +1 at 300 after expiry
    assert_eq!(fx.state.character_health, 130);

    // Above the post-expiry max: clamped on expiry.
    let snapshot = CombatSnapshot::new(hero(), training_dummy(1_000), 200, 50).with_ability(fortitude);
    let mut fx = Fixture::new(snapshot, ALWAYS_MISS);
    fx.use_ability("fortitude");
    assert_eq!(fx.state.character_health, 225);
    fx.ticks(299);
    assert_eq!(fx.state.character_health, 229);
    fx.tick();
    assert_eq!(fx.state.character_health, 200);
    assert!(fx.log_contains("Fortitude fades."));
}

#[test]
fn reapplied_poison_refreshes_instead_of_stacking() {
    let envenom = AbilityDefinition::new("envenom", "Envenom", AbilityCategory::Spell)
        .with_effect(EffectSpec::new(EffectKind::Dot, 2).named("Poison").lasting(5));
    let snapshot = CombatSnapshot::new(hero(), training_dummy(1_000), 200, 50).with_ability(envenom);
    let mut fx = Fixture::new(snapshot, ALWAYS_MISS);

    fx.use_ability("envenom");
    fx.ticks(20);
    assert_eq!(fx.state.effects.dots.get("Poison").map(|d| d.ticks_remaining), Some(30));
    assert_eq!(fx.state.mob_health, 960);

    fx.use_ability("envenom");
    assert_eq!(fx.state.effects.dots.count("Poison"), 1);
    assert_eq!(fx.state.effects.dots.get("Poison").map(|d| d.ticks_remaining), Some(50));
    assert!(fx.log_contains("(refreshed)"));
}

#[test]
fn dot_pulses_every_tick_and_can_win() {
    let envenom = AbilityDefinition::new("envenom", "Envenom", AbilityCategory::Spell)
        .with_effect(EffectSpec::new(EffectKind::Dot, 3).named("Poison").lasting(5));
    let snapshot = CombatSnapshot::new(hero(), training_dummy(9), 200, 50).with_ability(envenom);
    let mut fx = Fixture::new(snapshot, ALWAYS_MISS);

    fx.use_ability("envenom");
    let reports = fx.ticks(3);
    assert_eq!(reports[2].ended, Some(CombatResult::Victory));
    assert_eq!(fx.state.clock, 3);
}

#[test]
fn hot_heals_are_clamped_to_max() {
    let renew = AbilityDefinition::new("renew", "Renew", AbilityCategory::Heal)
        .with_effect(EffectSpec::new(EffectKind::Hot, 4).named("Renew").lasting(1));
    let snapshot = CombatSnapshot::new(hero(), training_dummy(1_000), 190, 50).with_ability(renew);
    let mut fx = Fixture::new(snapshot, ALWAYS_MISS);

    fx.use_ability("renew");
    let report = fx.tick();
    assert!(report.resources_changed);
    assert_eq!(fx.state.character_health, 194);
    fx.ticks(9);
    assert_eq!(fx.state.character_health, 200);
    assert!(fx.state.effects.hots.is_empty());
}

#[test]
fn new_thorns_replace_old_and_reflect_landed_damage() {
    let brambles = AbilityDefinition::new("brambles", "Brambles", AbilityCategory::Spell)
        .with_effect(EffectSpec::new(EffectKind::Thorns, 20).lasting(60));
    let spikes = AbilityDefinition::new("spikes", "Iron Spikes", AbilityCategory::Spell)
        .with_effect(EffectSpec::new(EffectKind::Thorns, 50).lasting(60))
        .with_effect(EffectSpec::new(EffectKind::Shield, 4).named("Ward").lasting(60));
    let mob = MobStats::new("boar", "Boar", 1, 1_000).with_damage(10, 10);
    let snapshot = CombatSnapshot::new(hero(), mob, 200, 50)
        .with_ability(brambles)
        .with_ability(spikes);
    let mut fx = Fixture::new(snapshot, ALWAYS_HIT);

    fx.use_ability("brambles");
    fx.use_ability("spikes");
    let thorns = fx.state.effects.thorns.peek().expect("thorns active");
    assert_eq!(thorns.name, "Iron Spikes");
    assert_eq!(thorns.reflect_percent, 50);

    fx.ticks(60);

    // Unarmed hit for 1, boar hits for 10: 4 absorbed, 6 taken, 5 reflected.
    assert_eq!(fx.state.character_health, 194);
    assert_eq!(fx.state.mob_health, 1_000 - 1 - 5);
    assert!(fx.state.effects.shields.is_empty());
    assert!(fx.log_contains("Iron Spikes reflects 5 damage to Boar."));
}

#[test]
fn legacy_definitions_use_power_and_primary_stat() {
    let smite = AbilityDefinition::new("smite", "Smite", AbilityCategory::Attack)
        .with_power(20, Some(StatKind::Strength));
    let character = hero().with(StatKind::Strength, 14);
    let snapshot = CombatSnapshot::new(character, training_dummy(100), 200, 50).with_ability(smite);
    let mut fx = Fixture::new(snapshot, ALWAYS_MISS);

    fx.use_ability("smite");
    assert_eq!(fx.state.mob_health, 76);
}

#[test]
fn external_echo_is_suppressed_once_and_mana_is_never_taken() {
    let fireball = AbilityDefinition::new("fireball", "Fireball", AbilityCategory::Spell)
        .with_cost(20)
        .with_effect(EffectSpec::new(EffectKind::Damage, 5));
    let snapshot = CombatSnapshot::new(hero(), training_dummy(100), 150, 50).with_ability(fireball);
    let mut fx = Fixture::new(snapshot, ALWAYS_MISS);

    fx.use_ability("fireball");
    assert!(fx.state.sync.is_armed());

    // Echo of our own write.
    let echo = fx.external(150, 30);
    assert!(!echo.health_synced);

    // A potion drunk outside the session.
    let potion = fx.external(180, 200);
    assert!(potion.health_synced);
    assert_eq!(fx.state.character_health, 180);
    assert_eq!(fx.state.character_mana, 30);

    let clamped = fx.external(9_999, 0);
    assert!(clamped.health_synced);
    assert_eq!(fx.state.character_health, 200);
}

#[test]
fn late_external_update_is_applied_after_the_next_pass() {
    let snapshot = CombatSnapshot::new(hero(), training_dummy(1_000), 200, 50);
    let mut fx = Fixture::new(snapshot, ALWAYS_HIT);

    let hit_at = (1..=60)
        .find(|_| fx.tick().resources_changed)
        .expect("the mob lands a hit");
    assert_eq!(fx.state.character_health, 199);
    assert!(fx.state.sync.is_armed());

    // No internal writes until regen at tick 100.
    fx.ticks(39);
    assert!(fx.state.clock < 100, "hit landed at tick {hit_at}");
    assert!(!fx.state.sync.is_armed());

    let late = fx.external(150, 0);
    assert!(late.health_synced);
    assert_eq!(fx.state.character_health, 150);
    assert_eq!(fx.state.character_mana, 50);
}

#[test]
fn constitution_debuff_drains_health_and_wears_off() {
    let weakness = AbilityDefinition::new("weakness", "Curse of Weakness", AbilityCategory::Spell).with_effect(
        EffectSpec::new(EffectKind::Debuff, 5)
            .named("Weakness")
            .on_stat(StatKind::Constitution)
            .lasting(3),
    );

    let snapshot = CombatSnapshot::new(hero(), training_dummy(1_000), 100, 50).with_ability(weakness.clone());
    let mut fx = Fixture::new(snapshot, ALWAYS_MISS);
    assert_eq!(fx.max_health(), 200);

    fx.use_ability("weakness");
    assert!(fx.log_contains("You suffer Weakness."));
    assert_eq!(fx.state.character_health, 75);
    assert_eq!(fx.max_health(), 160);

    fx.ticks(29);
    assert_eq!(fx.max_health(), 160);
    assert!(!fx.log_contains("Weakness wears off."));

    fx.tick();
    assert!(fx.log_contains("Weakness wears off."));
    assert!(fx.state.effects.debuffs.is_empty());
    assert_eq!(fx.max_health(), 200);
    // Expiry only clamps; nothing is refunded.
    assert_eq!(fx.state.character_health, 75);

    // Losses never take health below 1.
    let snapshot = CombatSnapshot::new(hero(), training_dummy(1_000), 10, 50).with_ability(weakness);
    let mut fx = Fixture::new(snapshot, ALWAYS_MISS);
    fx.use_ability("weakness");
    assert_eq!(fx.state.character_health, 1);
    assert!(fx.state.is_active);
}

#[test]
fn consumables_restore_within_bounds() {
    let snapshot = CombatSnapshot::new(hero(), training_dummy(100), 190, 150);
    let mut fx = Fixture::new(snapshot, ALWAYS_MISS);
    let env = CombatEnv::new(&fx.context, fx.rng.as_ref());

    let report = CombatEngine::new(&mut fx.state).apply_consumable(
        "Minor Potion",
        ConsumableRestore {
            health_restore: 25,
            mana_restore: 25,
        },
        &env,
    );

    assert!(report.resources_changed);
    assert_eq!(fx.state.character_health, 200);
    assert_eq!(fx.state.character_mana, 175);
    assert_eq!(fx.state.log.last(), Some("You use Minor Potion: +10 health, +25 mana."));
}

#[test]
fn forced_stop_ends_without_result() {
    let snapshot = CombatSnapshot::new(hero(), training_dummy(100), 200, 50);
    let mut fx = Fixture::new(snapshot, ALWAYS_HIT);

    assert!(CombatEngine::new(&mut fx.state).stop());
    assert!(!CombatEngine::new(&mut fx.state).stop());
    assert_eq!(fx.state.result, None);
    assert!(!fx.tick().changed_anything());
    assert_eq!(fx.state.clock, 0);
}

#[test]
fn resources_stay_in_bounds_through_a_long_fight() {
    let mob = MobStats::new("wolf", "Wolf", 6, 5_000).with_damage(3, 9);
    let snapshot = CombatSnapshot::new(hero(), mob, 200, 200).with_equipment(sword());
    let context = snapshot
        .build_context(CombatConfig::default())
        .expect("valid snapshot");
    let rng = crate::env::PcgRng;
    let env = CombatEnv::new(&context, &rng);
    let mut state = CombatState::from_snapshot(&snapshot, &env, 42);

    for _ in 0..5_000 {
        CombatEngine::new(&mut state).tick(&env);
        let max = state.maximums(&env);
        assert!(state.character_health <= max.health);
        assert!(state.character_mana <= max.mana);
        assert!(state.player_timer.threshold >= context.config.min_attack_ticks);
        assert!(state.mob_timer.threshold >= context.config.min_attack_ticks);
    }
    assert!(!state.is_active);
    assert!(state.result.is_some());
}
