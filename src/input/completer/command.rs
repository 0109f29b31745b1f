use rustyline::completion::Pair;

/// Completes the first word of a line against the built-in command names.
#[derive(Clone, Default)]
pub struct CommandCompleter {
    commands: Vec<String>,
}

impl CommandCompleter {
    pub fn new<'a>(commands: impl IntoIterator<Item = &'a str>) -> Self {
        let mut commands: Vec<String> = commands.into_iter().map(String::from).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    pub fn is_known(&self, command: &str) -> bool {
        self.commands.iter().any(|c| c == command)
    }

    pub fn complete_command(&self, input: &str) -> Vec<Pair> {
        let input = input.trim();
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(input))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect()
    }
}
