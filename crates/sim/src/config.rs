//! Simulation settings read from the process environment.
use std::env;
use std::path::PathBuf;

/// What to fight and where the content lives.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub content_dir: PathBuf,
    pub character: String,
    pub mob: String,
    /// Fixed session seed; random when unset.
    pub seed: Option<u64>,
    /// Charges of every consumable the auto-pilot carries.
    pub consumable_charges: u32,
    /// Print the final state as JSON instead of a summary.
    pub json: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../combat/content/data")),
            character: "aldric".to_string(),
            mob: "grey_wolf".to_string(),
            seed: None,
            consumable_charges: 2,
            json: false,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_CONTENT_DIR` - Content data directory (default: bundled data)
    /// - `COMBAT_CHARACTER` - Character id (default: aldric)
    /// - `COMBAT_MOB` - Mob id (default: grey_wolf)
    /// - `COMBAT_SEED` - Session seed (default: random)
    /// - `COMBAT_CONSUMABLE_CHARGES` - Charges per consumable (default: 2)
    /// - `COMBAT_OUTPUT` - `json` to print the final state as JSON
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("COMBAT_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        if let Ok(character) = env::var("COMBAT_CHARACTER") {
            config.character = character;
        }
        if let Ok(mob) = env::var("COMBAT_MOB") {
            config.mob = mob;
        }
        config.seed = read_env::<u64>("COMBAT_SEED");
        if let Some(charges) = read_env::<u32>("COMBAT_CONSUMABLE_CHARGES") {
            config.consumable_charges = charges;
        }
        config.json = env::var("COMBAT_OUTPUT").is_ok_and(|output| output.eq_ignore_ascii_case("json"));

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
