//! Hostile NPC record supplied by the host.

/// Dexterity assumed for every mob when drawing its attack interval.
pub const MOB_DEXTERITY: i32 = 10;

/// Stat record of the hostile NPC.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MobStats {
    pub id: String,
    pub name: String,
    pub level: i32,
    pub max_health: u32,
    pub damage_min: u32,
    pub damage_max: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor: i32,
    /// Attack speed multiplier (1.0 = baseline).
    #[cfg_attr(feature = "serde", serde(default = "default_attack_speed"))]
    pub attack_speed: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_attribute"))]
    pub strength: i32,
    #[cfg_attr(feature = "serde", serde(default = "default_attribute"))]
    pub evasiveness: i32,
}

#[cfg(feature = "serde")]
fn default_attack_speed() -> f64 {
    1.0
}

#[cfg(feature = "serde")]
fn default_attribute() -> i32 {
    10
}

impl MobStats {
    pub fn new(id: impl Into<String>, name: impl Into<String>, level: i32, max_health: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            max_health,
            damage_min: 1,
            damage_max: 3,
            armor: 0,
            attack_speed: 1.0,
            strength: 10,
            evasiveness: 10,
        }
    }

    pub fn with_damage(mut self, min: u32, max: u32) -> Self {
        self.damage_min = min;
        self.damage_max = max.max(min);
        self
    }

    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_attack_speed(mut self, attack_speed: f64) -> Self {
        self.attack_speed = attack_speed;
        self
    }

    pub fn with_strength(mut self, strength: i32) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_evasiveness(mut self, evasiveness: i32) -> Self {
        self.evasiveness = evasiveness;
        self
    }

    /// Attack speed with non-positive values treated as baseline.
    pub fn speed(&self) -> f64 {
        if self.attack_speed > 0.0 { self.attack_speed } else { 1.0 }
    }
}
