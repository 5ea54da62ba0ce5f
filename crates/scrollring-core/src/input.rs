#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Enter,
    Space,
    Tab,
    Escape,
    Home,
    End,
    Other(String),
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` string.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            "Home" => Key::Home,
            "End" => Key::End,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => Key::Other(other.to_string()),
                }
            }
        }
    }

    /// Keys that press a focused button.
    pub fn is_activation_key(&self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}
