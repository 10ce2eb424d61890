use crate::domain::HudSlot;
use std::collections::BTreeMap;

// Last text written to each HUD slot.
#[derive(Debug, Default)]
pub struct Hud {
    texts: BTreeMap<HudSlot, String>,
}

impl Hud {
    pub fn set(&mut self, slot: HudSlot, text: String) {
        self.texts.insert(slot, text);
    }

    pub fn get(&self, slot: HudSlot) -> Option<&str> {
        self.texts.get(&slot).map(String::as_str)
    }
}
