// Payload shapes for inbound events and the helpers handlers use to read positional args.

use crate::domain::{EntityId, PayloadError, Vec2};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub player_id: EntityId,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default)]
    pub missiles: u32,
    #[serde(default)]
    pub max_missiles: u32,
}

impl PlayerInfo {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Shared shape of `newMissile` and `newComet` payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct BodyInfo {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub rotation: f32,
}

impl BodyInfo {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosshairInfo {
    pub id: EntityId,
    pub mouse_x: f32,
    pub mouse_y: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRotation {
    pub player_id: EntityId,
    pub rotation: f32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SnapshotPosition {
    pub x: f32,
    pub y: f32,
}

pub fn arg(args: &[Value], index: usize) -> Result<&Value, PayloadError> {
    args.get(index)
        .ok_or(PayloadError::MissingArgument { index })
}

pub fn parse<'a, T>(value: &'a Value, field: &'static str) -> Result<T, PayloadError>
where
    T: Deserialize<'a>,
{
    T::deserialize(value).map_err(|e| PayloadError::invalid(field, e.to_string()))
}

pub fn parse_arg<'a, T>(
    args: &'a [Value],
    index: usize,
    field: &'static str,
) -> Result<T, PayloadError>
where
    T: Deserialize<'a>,
{
    parse(arg(args, index)?, field)
}

/// Accepts `[a, b]` sent either as two args or as one array arg.
pub fn tuple_args(args: &[Value]) -> &[Value] {
    match args {
        [Value::Array(items)] => items,
        _ => args,
    }
}

/// Entries of a keyed map (`{id: entry}`) or of a sparse array; null slots are skipped.
pub fn entries<'a>(
    value: &'a Value,
    field: &'static str,
) -> Result<Vec<(Option<&'a str>, &'a Value)>, PayloadError> {
    match value {
        Value::Object(map) => Ok(map
            .iter()
            .filter(|(_, entry)| !entry.is_null())
            .map(|(key, entry)| (Some(key.as_str()), entry))
            .collect()),
        Value::Array(items) => Ok(items
            .iter()
            .filter(|entry| !entry.is_null())
            .map(|entry| (None, entry))
            .collect()),
        other => Err(PayloadError::invalid(
            field,
            format!("expected map or array, got {other}"),
        )),
    }
}

/// Loose truthiness, matching how the server sends flags (`true`, `1`, `"yes"`).
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Text form of a passthrough UI value.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn when_tuple_is_wrapped_then_it_is_unwrapped() {
        let wrapped = [json!(["c1", 80])];
        let flat = [json!("c1"), json!(80)];
        assert_eq!(tuple_args(&wrapped), &flat[..]);
        assert_eq!(tuple_args(&flat), &flat[..]);
    }

    #[test]
    fn when_array_has_null_slots_then_entries_skip_them() {
        let value = json!([{"id": 1}, null, {"id": 3}]);
        let found = entries(&value, "comets").expect("array is accepted");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn when_payload_is_scalar_then_entries_fail() {
        assert!(entries(&json!(4), "players").is_err());
    }

    #[test]
    fn when_player_info_lacks_ammo_then_defaults_apply() {
        let info: PlayerInfo =
            parse(&json!({"playerId": "A", "x": 10, "y": 20}), "player").expect("parses");
        assert_eq!(info.player_id, EntityId::from("A"));
        assert_eq!(info.max_missiles, 0);
        assert_eq!(info.position(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn when_argument_is_missing_then_error_names_its_index() {
        let result: Result<u32, _> = parse_arg(&[json!(1)], 2, "count");
        assert_eq!(result, Err(PayloadError::MissingArgument { index: 2 }));
    }

    #[test]
    fn when_values_are_displayed_then_strings_lose_quotes() {
        assert_eq!(display_value(&json!("3:00")), "3:00");
        assert_eq!(display_value(&json!(250)), "250");
        assert!(truthy(Some(&json!(true))));
        assert!(!truthy(Some(&json!(0))));
        assert!(!truthy(None));
    }
}
