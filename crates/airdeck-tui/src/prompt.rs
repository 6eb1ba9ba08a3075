//! Two-step "add device" prompt: IP address, then an optional name.
//!
//! Key handling lives here; what a submitted value means is decided by the
//! dashboard reducer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_input::{Input, InputRequest};

/// Longest value accepted in either step.
pub const MAX_INPUT_CHARS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptStep {
    AwaitingIp,
    AwaitingName { ip: String },
}

/// What a key did to the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKey {
    /// Buffer or cursor changed (or nothing happened).
    Edited,
    /// Esc: close without side effects.
    Cancel,
    /// Enter, with the trimmed buffer.
    Submit(String),
}

#[derive(Debug, Clone)]
pub struct Prompt {
    pub step: PromptStep,
    pub input: Input,
}

impl PartialEq for Prompt {
    fn eq(&self, other: &Self) -> bool {
        self.step == other.step
            && self.input.value() == other.input.value()
            && self.input.cursor() == other.input.cursor()
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt {
    pub fn new() -> Self {
        Self {
            step: PromptStep::AwaitingIp,
            input: Input::default(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.step {
            PromptStep::AwaitingIp => "Enter device IP address",
            PromptStep::AwaitingName { .. } => "Friendly name (optional, Enter to skip)",
        }
    }

    /// Move to the name step for `ip` with an empty buffer.
    pub fn ask_name(&mut self, ip: String) {
        self.step = PromptStep::AwaitingName { ip };
        self.input.reset();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptKey {
        match key.code {
            KeyCode::Esc => return PromptKey::Cancel,
            KeyCode::Enter => return PromptKey::Submit(self.input.value().trim().to_owned()),
            _ => {}
        }

        if let Some(request) = input_request(key) {
            let at_limit = self.input.value().chars().count() >= MAX_INPUT_CHARS;
            if !(at_limit && matches!(request, InputRequest::InsertChar(_))) {
                let _ = self.input.handle(request);
            }
        }
        PromptKey::Edited
    }
}

/// Map a key to a text-editing request. Unmapped keys are ignored.
fn input_request(key: KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let request = match key.code {
        KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
        KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
        KeyCode::Char('k') if ctrl => InputRequest::DeleteTillEnd,
        KeyCode::Char('a') if ctrl => InputRequest::GoToStart,
        KeyCode::Char('e') if ctrl => InputRequest::GoToEnd,
        KeyCode::Char(_) if ctrl || alt => return None,
        KeyCode::Char(c) => InputRequest::InsertChar(c),
        KeyCode::Backspace if ctrl || alt => InputRequest::DeletePrevWord,
        KeyCode::Backspace => InputRequest::DeletePrevChar,
        KeyCode::Delete => InputRequest::DeleteNextChar,
        KeyCode::Left if ctrl || alt => InputRequest::GoToPrevWord,
        KeyCode::Left => InputRequest::GoToPrevChar,
        KeyCode::Right if ctrl || alt => InputRequest::GoToNextWord,
        KeyCode::Right => InputRequest::GoToNextChar,
        KeyCode::Home => InputRequest::GoToStart,
        KeyCode::End => InputRequest::GoToEnd,
        _ => return None,
    };
    Some(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn press(prompt: &mut Prompt, code: KeyCode) -> PromptKey {
        prompt.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(prompt: &mut Prompt, s: &str) {
        for c in s.chars() {
            press(prompt, KeyCode::Char(c));
        }
    }

    #[test]
    fn enter_submits_trimmed_value() {
        let mut prompt = Prompt::new();
        type_str(&mut prompt, " 10.0.0.5 ");
        assert_eq!(
            press(&mut prompt, KeyCode::Enter),
            PromptKey::Submit("10.0.0.5".into())
        );
    }

    #[test]
    fn editing_keys() {
        let mut prompt = Prompt::new();
        type_str(&mut prompt, "10.0.0.55");
        press(&mut prompt, KeyCode::Backspace);
        press(&mut prompt, KeyCode::Home);
        press(&mut prompt, KeyCode::Delete);
        assert_eq!(prompt.input.value(), "0.0.0.5");

        prompt.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(prompt.input.value(), "");
    }

    #[test]
    fn input_is_capped() {
        let mut prompt = Prompt::new();
        type_str(&mut prompt, &"x".repeat(MAX_INPUT_CHARS + 10));
        assert_eq!(prompt.input.value().chars().count(), MAX_INPUT_CHARS);
    }

    #[test]
    fn esc_cancels_from_either_step() {
        let mut prompt = Prompt::new();
        assert_eq!(press(&mut prompt, KeyCode::Esc), PromptKey::Cancel);
        prompt.ask_name("10.0.0.5".into());
        assert_eq!(press(&mut prompt, KeyCode::Esc), PromptKey::Cancel);
    }

    #[test]
    fn ask_name_clears_buffer() {
        let mut prompt = Prompt::new();
        type_str(&mut prompt, "10.0.0.5");
        prompt.ask_name("10.0.0.5".into());
        assert_eq!(prompt.input.value(), "");
        assert_eq!(prompt.title(), "Friendly name (optional, Enter to skip)");
    }

    #[test]
    fn shortcut_letters_are_text() {
        let mut prompt = Prompt::new();
        type_str(&mut prompt, "qrad");
        assert_eq!(prompt.input.value(), "qrad");
    }
}
