// Debug overlay session. Only created when the server acknowledges `enterDebug`.

use crate::domain::{DebugField, Key};
use serde::Deserialize;
use serde_json::Value;

/// Tunable values the server reports when debug mode starts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DebugBaseline {
    pub regen_speed: Option<Value>,
    pub comet_limit: Option<Value>,
    pub comet_rate: Option<Value>,
    pub comet_health: Option<Value>,
    pub comet_speed: Option<Value>,
}

impl DebugBaseline {
    pub fn value_for(&self, field: DebugField) -> Option<&Value> {
        match field {
            DebugField::RegenSpeed => self.regen_speed.as_ref(),
            DebugField::CometLimit => self.comet_limit.as_ref(),
            DebugField::CometRate => self.comet_rate.as_ref(),
            DebugField::CometHealth => self.comet_health.as_ref(),
            DebugField::CometSpeed => self.comet_speed.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebugAction {
    Select(DebugField),
    Adjust { field: DebugField, delta: Option<i32> },
    Nothing,
}

#[derive(Debug, Clone)]
pub struct DebugSession {
    selected: Option<DebugField>,
    // The `+`/`-` key that already fired; cleared once that key is seen up.
    adjust_latch: Option<Key>,
    baseline: DebugBaseline,
}

impl DebugSession {
    pub fn new(baseline: DebugBaseline) -> Self {
        Self {
            selected: None,
            adjust_latch: None,
            baseline,
        }
    }

    pub fn selected(&self) -> Option<DebugField> {
        self.selected
    }

    pub fn baseline(&self) -> &DebugBaseline {
        &self.baseline
    }

    pub fn is_latched(&self) -> bool {
        self.adjust_latch.is_some()
    }

    /// Handles one raw key-down event.
    pub fn on_key_down(&mut self, key: Key) -> DebugAction {
        match key {
            Key::Digit(digit) => match DebugField::from_digit(digit) {
                Some(field) => {
                    self.selected = Some(field);
                    DebugAction::Select(field)
                }
                None => DebugAction::Nothing,
            },
            Key::Plus | Key::Minus => {
                if self.adjust_latch.is_some() {
                    return DebugAction::Nothing;
                }
                self.adjust_latch = Some(key);

                let Some(field) = self.selected else {
                    return DebugAction::Nothing;
                };
                let sign = if key == Key::Minus { -1 } else { 1 };
                DebugAction::Adjust {
                    field,
                    delta: field.step().map(|step| step * sign),
                }
            }
            Key::Backquote | Key::Other => DebugAction::Nothing,
        }
    }

    /// Clears the latch once the latched key is observed up.
    pub fn observe_held(&mut self, is_held: impl Fn(Key) -> bool) {
        if let Some(key) = self.adjust_latch {
            if !is_held(key) {
                self.adjust_latch = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_minus_pressed_on_comet_speed_then_delta_is_negative_one() {
        let mut session = DebugSession::new(DebugBaseline::default());

        assert_eq!(
            session.on_key_down(Key::Digit(0)),
            DebugAction::Select(DebugField::CometSpeed)
        );
        assert_eq!(
            session.on_key_down(Key::Minus),
            DebugAction::Adjust {
                field: DebugField::CometSpeed,
                delta: Some(-1)
            }
        );
    }

    #[test]
    fn when_key_repeats_while_held_then_only_first_press_fires() {
        let mut session = DebugSession::new(DebugBaseline::default());
        session.on_key_down(Key::Digit(4));

        assert!(matches!(session.on_key_down(Key::Plus), DebugAction::Adjust { .. }));
        session.observe_held(|key| key == Key::Plus);
        assert_eq!(session.on_key_down(Key::Plus), DebugAction::Nothing);
        assert_eq!(session.on_key_down(Key::Minus), DebugAction::Nothing);

        session.observe_held(|_| false);
        assert_eq!(
            session.on_key_down(Key::Plus),
            DebugAction::Adjust {
                field: DebugField::Credits,
                delta: Some(100)
            }
        );
    }

    #[test]
    fn when_comet_rate_is_raised_then_delta_is_negative() {
        let mut session = DebugSession::new(DebugBaseline::default());
        session.on_key_down(Key::Digit(8));

        assert_eq!(
            session.on_key_down(Key::Plus),
            DebugAction::Adjust {
                field: DebugField::CometRate,
                delta: Some(-500)
            }
        );
    }

    #[test]
    fn when_round_is_adjusted_then_no_delta_is_carried() {
        let mut session = DebugSession::new(DebugBaseline::default());
        session.on_key_down(Key::Digit(1));

        assert_eq!(
            session.on_key_down(Key::Minus),
            DebugAction::Adjust {
                field: DebugField::Round,
                delta: None
            }
        );
    }

    #[test]
    fn when_no_field_selected_then_adjust_latches_but_emits_nothing() {
        let mut session = DebugSession::new(DebugBaseline::default());

        assert_eq!(session.on_key_down(Key::Plus), DebugAction::Nothing);
        assert!(session.is_latched());
    }

    #[test]
    fn when_baseline_is_partial_then_missing_values_are_none() {
        let baseline: DebugBaseline =
            serde_json::from_value(serde_json::json!({"regenSpeed": 3, "cometRate": 2000}))
                .expect("baseline parses");

        assert_eq!(
            baseline.value_for(DebugField::RegenSpeed),
            Some(&serde_json::json!(3))
        );
        assert_eq!(baseline.value_for(DebugField::CometSpeed), None);
        assert_eq!(baseline.value_for(DebugField::Timer), None);
    }
}
