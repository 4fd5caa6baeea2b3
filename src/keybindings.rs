use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Quit,
    CloseTopmost,
    // Toolbar
    ShrinkAll,
    GrowAll,
    Redistribute,
    CopyLayout,
    PasteLayout,
    // Host
    NewWindow,
    ToggleSplitView,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::CloseTopmost => "Close topmost window (Esc)",
            Action::ShrinkAll => "Shrink all windows",
            Action::GrowAll => "Grow all windows",
            Action::Redistribute => "Redistribute equally",
            Action::CopyLayout => "Copy layout",
            Action::PasteLayout => "Paste layout",
            Action::NewWindow => "New window",
            Action::ToggleSplitView => "Toggle split view",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bindings used by the terminal host. Esc is the close-topmost signal.
    pub fn standard() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        kb.add(CloseTopmost, KeyCombo::new(KeyCode::Esc, KeyModifiers::NONE));
        kb.add(ShrinkAll, KeyCombo::plain('-'));
        kb.add(GrowAll, KeyCombo::plain('+'));
        kb.add(GrowAll, KeyCombo::plain('='));
        kb.add(Redistribute, KeyCombo::plain('r'));
        kb.add(CopyLayout, KeyCombo::plain('c'));
        kb.add(PasteLayout, KeyCombo::plain('v'));
        kb.add(NewWindow, KeyCombo::plain('n'));
        kb.add(ToggleSplitView, KeyCombo::plain('s'));
        kb
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        self.map
            .iter()
            .find(|(_, list)| list.iter().any(|c| c.matches(key)))
            .map(|(act, _)| *act)
    }

    /// One entry per bound action, ordered by action.
    pub fn help_entries(&self) -> Vec<(Action, Vec<String>)> {
        let mut v: Vec<(Action, Vec<String>)> = self
            .map
            .iter()
            .map(|(act, list)| (*act, list.iter().map(|c| c.display()).collect()))
            .collect();
        v.sort_by_key(|(act, _)| *act);
        v
    }

    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn esc_closes_topmost() {
        let kb = KeyBindings::standard();
        let ev = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&ev), Some(Action::CloseTopmost));
    }

    #[test]
    fn modifiers_must_match_exactly() {
        let kb = KeyBindings::standard();
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(kb.matches(Action::Quit, &ev));
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&ev), None);
    }

    #[test]
    fn help_lists_every_combo() {
        let kb = KeyBindings::standard();
        assert_eq!(kb.combos_for(Action::GrowAll), vec!["+", "="]);
        assert_eq!(kb.help_entries().first().map(|(a, _)| *a), Some(Action::Quit));
    }
}
