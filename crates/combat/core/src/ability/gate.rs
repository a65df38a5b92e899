//! Requirement checks run before an ability is invoked.

use super::cooldown::CooldownMap;
use super::definition::AbilityDefinition;
use crate::env::Equipment;

/// Whether an ability can be used right now, and why not.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Usability {
    pub can_use: bool,
    pub reason: Option<String>,
}

impl Usability {
    pub fn ready() -> Self {
        Self {
            can_use: true,
            reason: None,
        }
    }

    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            can_use: false,
            reason: Some(reason.into()),
        }
    }
}

/// Checks, in order and stopping at the first failure: mana, cooldown,
/// weapon type, offhand type.
pub fn can_use(
    ability: &AbilityDefinition,
    mana: u32,
    cooldowns: &CooldownMap,
    equipment: &Equipment,
) -> Usability {
    if ability.mana_cost > 0 && mana < ability.mana_cost {
        return Usability::blocked(format!("Need {} mana", ability.mana_cost));
    }

    let remaining = cooldowns.remaining(&ability.id);
    if remaining > 0 {
        return Usability::blocked(format!("On cooldown ({remaining}s)"));
    }

    if let Some(allowed) = ability.allowed_weapon_types.as_deref() {
        if !matches_type_list(allowed, equipment.weapon_type()) {
            return Usability::blocked(format!("Requires weapon: {}", normalize_list(allowed)));
        }
    }

    if let Some(allowed) = ability.allowed_offhand_types.as_deref() {
        if !matches_type_list(allowed, equipment.offhand_type()) {
            return Usability::blocked(format!("Requires offhand: {}", normalize_list(allowed)));
        }
    }

    Usability::ready()
}

/// Set membership against a comma-separated type list.
///
/// An empty list allows anything, including nothing equipped. Comparison is
/// case-insensitive and ignores surrounding whitespace.
pub fn matches_type_list(allowed: &str, equipped: Option<&str>) -> bool {
    let mut types = allowed.split(',').map(str::trim).filter(|t| !t.is_empty()).peekable();
    if types.peek().is_none() {
        return true;
    }
    let Some(equipped) = equipped.map(str::trim) else {
        return false;
    };
    types.any(|allowed| allowed.eq_ignore_ascii_case(equipped))
}

fn normalize_list(allowed: &str) -> String {
    allowed
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
