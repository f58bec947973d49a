//! Keybinding table mapping key combinations to hotkey actions.

use std::collections::HashMap;

use crate::actions::HotkeyAction;
use crate::keys::{Key, KeyCombo, Modifiers};

/// Map from key combination to hotkey action.
///
/// `Default` binds every builtin combo for both platforms (`command+c` and
/// `ctrl+c` alike); `default_for_platform` binds only the platform's primary
/// modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindingConfig {
    bindings: HashMap<KeyCombo, HotkeyAction>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        let mut config = Self::default_for_platform(true);
        config.bind_primary(false);
        config
    }
}

impl KeybindingConfig {
    /// A table with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Builtin bindings using the platform's primary modifier.
    pub fn default_for_platform(is_mac: bool) -> Self {
        let mut config = Self::empty();
        config.bind_unmodified();
        config.bind_primary(is_mac);
        config
    }

    fn bind_unmodified(&mut self) {
        use HotkeyAction::*;

        self.bind(KeyCombo::new(Key::Backspace), Delete);
        self.bind(KeyCombo::new(Key::Delete), Delete);
        self.bind(KeyCombo::new(Key::Escape), ClearSelection);

        self.bind(KeyCombo::new(Key::ArrowLeft), SelectPreviousSibling);
        self.bind(KeyCombo::new(Key::ArrowRight), SelectNextSibling);
        self.bind(KeyCombo::new(Key::ArrowUp), SelectPrevious);
        self.bind(KeyCombo::new(Key::ArrowDown), SelectNext);

        self.bind(KeyCombo::option(Key::ArrowLeft), SwapWithPrevious);
        self.bind(KeyCombo::option(Key::ArrowRight), SwapWithNext);
        self.bind(KeyCombo::option(Key::ArrowUp), MoveUp);
        self.bind(KeyCombo::option(Key::ArrowDown), MoveDown);
    }

    fn bind_primary(&mut self, is_mac: bool) {
        use HotkeyAction::*;

        let primary = |c: &str| KeyCombo::primary(Key::character(c), is_mac);
        self.bind(primary("c"), Copy);
        self.bind(primary("x"), Cut);
        self.bind(primary("v"), Paste);
        self.bind(primary("z"), Undo);
        self.bind(primary("y"), Redo);
        if is_mac {
            self.bind(
                KeyCombo::with_modifiers(Key::character("z"), Modifiers::META_SHIFT),
                Redo,
            );
        }
    }

    /// Bind a combo, returning the action it replaced.
    pub fn bind(&mut self, combo: KeyCombo, action: HotkeyAction) -> Option<HotkeyAction> {
        self.bindings.insert(combo.normalized(), action)
    }

    pub fn unbind(&mut self, combo: &KeyCombo) -> Option<HotkeyAction> {
        self.bindings.remove(&combo.normalized())
    }

    /// Look up the action for a combo.
    pub fn lookup(&self, combo: &KeyCombo) -> Option<HotkeyAction> {
        self.bindings.get(&combo.normalized()).copied()
    }

    /// Every combo bound to `action`, sorted by notation.
    pub fn combos_for(&self, action: HotkeyAction) -> Vec<KeyCombo> {
        let mut combos: Vec<KeyCombo> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(combo, _)| combo.clone())
            .collect();
        combos.sort_by_key(KeyCombo::to_string);
        combos
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyCombo, HotkeyAction)> {
        self.bindings.iter().map(|(combo, action)| (combo, *action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notation(config: &KeybindingConfig, action: HotkeyAction) -> Vec<String> {
        config
            .combos_for(action)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_default_binds_both_platforms() {
        let config = KeybindingConfig::default();
        assert_eq!(notation(&config, HotkeyAction::Copy), ["command+c", "ctrl+c"]);
        assert_eq!(
            notation(&config, HotkeyAction::Redo),
            ["command+shift+z", "command+y", "ctrl+y"]
        );
        assert_eq!(notation(&config, HotkeyAction::Delete), ["backspace", "del"]);
        assert_eq!(config.len(), 22);
    }

    #[test]
    fn test_linux_binding_table() {
        let config = KeybindingConfig::default_for_platform(false);
        let mut lines: Vec<String> = config
            .iter()
            .map(|(combo, action)| format!("{combo} => {action}"))
            .collect();
        lines.sort();

        insta::assert_snapshot!(lines.join("\n"), @r"
        backspace => delete
        ctrl+c => copy
        ctrl+v => paste
        ctrl+x => cut
        ctrl+y => redo
        ctrl+z => undo
        del => delete
        down => select_next
        escape => clear_selection
        left => select_previous_sibling
        option+down => move_down
        option+left => swap_with_previous
        option+right => swap_with_next
        option+up => move_up
        right => select_next_sibling
        up => select_previous
        ");
    }

    #[test]
    fn test_platform_bindings() {
        let linux = KeybindingConfig::default_for_platform(false);
        assert_eq!(
            linux.lookup(&KeyCombo::ctrl(Key::character("z"))),
            Some(HotkeyAction::Undo)
        );
        assert_eq!(linux.lookup(&KeyCombo::meta(Key::character("z"))), None);
        assert_eq!(notation(&linux, HotkeyAction::Redo), ["ctrl+y"]);
    }

    #[test]
    fn test_lookup_ignores_character_case() {
        let config = KeybindingConfig::default();
        let shifted = KeyCombo::with_modifiers(Key::character("Z"), Modifiers::META_SHIFT);
        assert_eq!(config.lookup(&shifted), Some(HotkeyAction::Redo));
    }

    #[test]
    fn test_rebind_and_unbind() {
        let mut config = KeybindingConfig::default();
        let combo = KeyCombo::new(Key::Backspace);

        assert_eq!(
            config.bind(combo.clone(), HotkeyAction::ClearSelection),
            Some(HotkeyAction::Delete)
        );
        assert_eq!(config.lookup(&combo), Some(HotkeyAction::ClearSelection));
        assert_eq!(config.unbind(&combo), Some(HotkeyAction::ClearSelection));
        assert_eq!(config.lookup(&combo), None);
    }

    #[test]
    fn test_option_arrows_do_not_shadow_plain_arrows() {
        let config = KeybindingConfig::default();
        assert_eq!(
            config.lookup(&KeyCombo::new(Key::ArrowUp)),
            Some(HotkeyAction::SelectPrevious)
        );
        assert_eq!(
            config.lookup(&KeyCombo::option(Key::ArrowUp)),
            Some(HotkeyAction::MoveUp)
        );
    }
}
