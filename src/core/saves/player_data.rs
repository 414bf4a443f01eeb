//=========================================================================
// Player Data
//=========================================================================
//
// The persisted player stats, one `key=value` per line:
//
//   name=Vex
//   level=1
//   ...
//   playtime=0
//
// Values are not escaped; everything after the first `=` is the value.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::str::FromStr;

//=== Internal Dependencies ===============================================

use super::SaveError;

//=== PlayerData ==========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerData {
    pub name: String,
    pub level: i32,
    pub experience: i32,
    pub health: i32,
    pub max_health: i32,
    pub strength: i32,
    pub intelligence: i32,
    pub agility: i32,
    /// Hours played.
    pub playtime: f32,
}

impl Default for PlayerData {
    fn default() -> Self {
        Self {
            name: String::new(),
            level: 1,
            experience: 0,
            health: 100,
            max_health: 100,
            strength: 10,
            intelligence: 10,
            agility: 10,
            playtime: 0.0,
        }
    }
}

impl PlayerData {
    /// Default stats under `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn serialize(&self) -> String {
        format!(
            "name={}\nlevel={}\nexperience={}\nhealth={}\nmaxHealth={}\n\
             strength={}\nintelligence={}\nagility={}\nplaytime={}\n",
            self.name,
            self.level,
            self.experience,
            self.health,
            self.max_health,
            self.strength,
            self.intelligence,
            self.agility,
            self.playtime
        )
    }

    /// Parses over the defaults. Lines without `=` and unknown keys are
    /// skipped; a malformed number is an error.
    pub fn deserialize(data: &str) -> Result<Self, SaveError> {
        let mut player = Self::default();

        for line in data.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };

            match key {
                "name" => player.name = value.to_string(),
                "level" => player.level = parse_field(key, value)?,
                "experience" => player.experience = parse_field(key, value)?,
                "health" => player.health = parse_field(key, value)?,
                "maxHealth" => player.max_health = parse_field(key, value)?,
                "strength" => player.strength = parse_field(key, value)?,
                "intelligence" => player.intelligence = parse_field(key, value)?,
                "agility" => player.agility = parse_field(key, value)?,
                "playtime" => player.playtime = parse_field(key, value)?,
                _ => {}
            }
        }

        Ok(player)
    }
}

fn parse_field<T: FromStr>(key: &str, value: &str) -> Result<T, SaveError> {
    value.trim().parse().map_err(|_| SaveError::Parse {
        key: key.to_string(),
        value: value.to_string(),
    })
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_every_field() {
        let player = PlayerData {
            name: "Vex".to_string(),
            level: 7,
            experience: 1234,
            health: 42,
            max_health: 120,
            strength: 14,
            intelligence: 18,
            agility: 9,
            playtime: 3.14159,
        };

        assert_eq!(PlayerData::deserialize(&player.serialize()).unwrap(), player);
    }

    #[test]
    fn serialize_uses_camel_case_keys() {
        let text = PlayerData::named("Kit").serialize();
        assert!(text.starts_with("name=Kit\nlevel=1\n"));
        assert!(text.contains("maxHealth=100\n"));
        assert!(text.ends_with("playtime=0\n"));
    }

    #[test]
    fn value_keeps_everything_after_first_equals() {
        let player = PlayerData::deserialize("name=a=b\n").unwrap();
        assert_eq!(player.name, "a=b");
    }

    #[test]
    fn missing_keys_use_defaults() {
        let player = PlayerData::deserialize("# comment\nlevel=3\nunknown=1\n").unwrap();
        assert_eq!(player, PlayerData { level: 3, ..PlayerData::default() });
    }

    #[test]
    fn malformed_number_is_parse_error() {
        let err = PlayerData::deserialize("level=high\n").unwrap_err();
        assert!(matches!(err, SaveError::Parse { ref key, .. } if key == "level"));
    }

    #[test]
    fn two_decimal_playtime_is_accepted() {
        let player = PlayerData::deserialize("playtime=1.50\n").unwrap();
        assert_eq!(player.playtime, 1.5);
    }
}
