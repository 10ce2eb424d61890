// Input vocabulary for the local control loop, the shop and the debug overlay.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Dedicated debug request key.
    Backquote,
    Digit(u8),
    Plus,
    Minus,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
    pub is_down: bool,
}

/// Everything the control loop samples in one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputFrame {
    pub pointer: Pointer,
    /// Raw key-down events delivered since the previous frame, in order. Held keys may
    /// repeat here.
    pub key_events: Vec<Key>,
    /// Keys observed down at sampling time.
    pub held: HashSet<Key>,
    /// Shop button the pointer pressed this frame, if any.
    pub upgrade_clicked: Option<UpgradeKind>,
}

impl InputFrame {
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Delivers a key-down event and marks the key as held.
    pub fn press(mut self, key: Key) -> Self {
        self.key_events.push(key);
        self.held.insert(key);
        self
    }

    /// Marks a key as held without a new key-down event (auto-repeat suppressed).
    pub fn hold(mut self, key: Key) -> Self {
        self.held.insert(key);
        self
    }

    pub fn pointer_at(mut self, x: f32, y: f32, is_down: bool) -> Self {
        self.pointer = Pointer { x, y, is_down };
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UpgradeKind {
    Speed,
    Damage,
    Radius,
    RegenSpeed,
    MaxMissiles,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 5] = [
        UpgradeKind::Speed,
        UpgradeKind::Damage,
        UpgradeKind::Radius,
        UpgradeKind::RegenSpeed,
        UpgradeKind::MaxMissiles,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            UpgradeKind::Speed => "speed",
            UpgradeKind::Damage => "damage",
            UpgradeKind::Radius => "radius",
            UpgradeKind::RegenSpeed => "regenSpeed",
            UpgradeKind::MaxMissiles => "maxMissiles",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.wire_name() == name)
    }

    // Shown on the shop button until the server sends a cost update.
    pub fn starting_cost(self) -> u32 {
        match self {
            UpgradeKind::Speed | UpgradeKind::Damage => 1000,
            UpgradeKind::Radius | UpgradeKind::RegenSpeed => 500,
            UpgradeKind::MaxMissiles => 800,
        }
    }

    pub fn button_label(self, cost: &str) -> String {
        let title = match self {
            UpgradeKind::Speed => "Missile\nSpeed",
            UpgradeKind::Damage => "Missile\nDamage",
            UpgradeKind::Radius => "Explosion\nRadius",
            UpgradeKind::RegenSpeed => "Ammo Regen\nSpeed",
            UpgradeKind::MaxMissiles => "Ammo\nCapacity",
        };
        format!("{title}\n\n{cost}")
    }
}

/// Server tunables adjustable from the debug overlay, indexed by digit key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DebugField {
    CometSpeed,
    Round,
    BaseHealth,
    Timer,
    Credits,
    MaxMissiles,
    RegenSpeed,
    CometLimit,
    CometRate,
    CometHealth,
}

impl DebugField {
    pub const ALL: [DebugField; 10] = [
        DebugField::CometSpeed,
        DebugField::Round,
        DebugField::BaseHealth,
        DebugField::Timer,
        DebugField::Credits,
        DebugField::MaxMissiles,
        DebugField::RegenSpeed,
        DebugField::CometLimit,
        DebugField::CometRate,
        DebugField::CometHealth,
    ];

    pub fn from_digit(digit: u8) -> Option<Self> {
        Self::ALL.get(usize::from(digit)).copied()
    }

    pub fn digit(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            DebugField::CometSpeed => "cometSpeed",
            DebugField::Round => "round",
            DebugField::BaseHealth => "baseHealth",
            DebugField::Timer => "timer",
            DebugField::Credits => "credits",
            DebugField::MaxMissiles => "maxMissiles",
            DebugField::RegenSpeed => "regenSpeed",
            DebugField::CometLimit => "cometLimit",
            DebugField::CometRate => "cometRate",
            DebugField::CometHealth => "cometHealth",
        }
    }

    pub fn event_name(self) -> &'static str {
        match self {
            DebugField::CometSpeed => "changeCometSpeed",
            DebugField::Round => "changeRound",
            DebugField::BaseHealth => "changeBaseHealth",
            DebugField::Timer => "changeTimer",
            DebugField::Credits => "changeCredits",
            DebugField::MaxMissiles => "changeMaxMissiles",
            DebugField::RegenSpeed => "changeRegenSpeed",
            DebugField::CometLimit => "changeCometLimit",
            DebugField::CometRate => "changeCometRate",
            DebugField::CometHealth => "changeCometHealth",
        }
    }

    /// Delta sent for one `+` press. Spawn rate is an interval, so it moves the other way.
    /// `None` means the adjustment carries no payload.
    pub fn step(self) -> Option<i32> {
        match self {
            DebugField::Round => None,
            DebugField::BaseHealth => Some(10),
            DebugField::Timer => Some(5),
            DebugField::Credits => Some(100),
            DebugField::CometRate => Some(-500),
            DebugField::CometSpeed
            | DebugField::MaxMissiles
            | DebugField::RegenSpeed
            | DebugField::CometLimit
            | DebugField::CometHealth => Some(1),
        }
    }

    /// Overlay line, with the current value appended for fields that report one.
    pub fn overlay_line(self, value: Option<&str>) -> String {
        let (title, unit) = match self {
            DebugField::CometSpeed => ("Comet speed", ""),
            DebugField::Round => ("Round", ""),
            DebugField::BaseHealth => ("Base Health", ""),
            DebugField::Timer => ("Timer", ""),
            DebugField::Credits => ("Credits", ""),
            DebugField::MaxMissiles => ("Maximum missile capacity", ""),
            DebugField::RegenSpeed => ("Regen speed", "s"),
            DebugField::CometLimit => ("Maximum number of comets", ""),
            DebugField::CometRate => ("Comet spawn rate", ""),
            DebugField::CometHealth => ("Comet health", ""),
        };
        match value {
            Some(value) => format!("{} - {title} = {value}{unit}", self.digit()),
            None => format!("{} - {title}", self.digit()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_digit_is_in_range_then_field_round_trips() {
        for digit in 0..10u8 {
            let field = DebugField::from_digit(digit).expect("digit maps to a field");
            assert_eq!(field.digit(), digit);
        }
        assert_eq!(DebugField::from_digit(10), None);
    }

    #[test]
    fn when_field_reports_a_value_then_overlay_line_includes_it() {
        assert_eq!(
            DebugField::RegenSpeed.overlay_line(Some("3")),
            "6 - Regen speed = 3s"
        );
        assert_eq!(DebugField::Round.overlay_line(None), "1 - Round");
    }

    #[test]
    fn when_wire_name_is_known_then_upgrade_kind_parses() {
        assert_eq!(UpgradeKind::from_wire("regenSpeed"), Some(UpgradeKind::RegenSpeed));
        assert_eq!(UpgradeKind::from_wire("armor"), None);
        assert_eq!(
            UpgradeKind::Radius.button_label("500"),
            "Explosion\nRadius\n\n500"
        );
    }
}
