use inksac::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    /// A highlighter that never emits escape codes.
    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colors a command line without changing its visible width: the command
    /// name (cyan if known, red otherwise), flags in yellow, redirection
    /// operators in violet.
    pub fn highlight_command(&self, input: &str, is_known: impl Fn(&str) -> bool) -> String {
        if !self.is_enabled() {
            return input.to_string();
        }

        let mut result = String::with_capacity(input.len());
        let mut seen_command = false;
        for piece in input.split_inclusive(char::is_whitespace) {
            let word = piece.trim_end();
            let spacing = &piece[word.len()..];

            if word.is_empty() {
                result.push_str(spacing);
                continue;
            }

            let style = if !seen_command {
                seen_command = true;
                let color = if is_known(word) { Color::Cyan } else { Color::Red };
                Some(Style::builder().foreground(color).bold().build())
            } else if word.starts_with('>') {
                Some(Style::builder().foreground(Color::RGB(190, 120, 255)).build())
            } else if word.starts_with('-') {
                Some(Style::builder().foreground(Color::Yellow).build())
            } else {
                None
            };

            match style {
                Some(style) => result.push_str(&word.style(style).to_string()),
                None => result.push_str(word),
            }
            result.push_str(spacing);
        }

        result
    }

    pub fn highlight_prompt(&self, prompt: &str) -> String {
        if !self.is_enabled() {
            return prompt.to_string();
        }

        let prompt_style = Style::builder().foreground(Color::Green).bold().build();
        prompt.style(prompt_style).to_string()
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.is_enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.is_enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        hint.style(hint_style).to_string()
    }
}
