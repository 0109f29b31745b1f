use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

/// Completes path arguments relative to the session's current directory,
/// which is not the process working directory.
#[derive(Clone, Default)]
pub struct PathCompleter {
    cwd: PathBuf,
}

impl PathCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_cwd(&mut self, cwd: &Path) {
        self.cwd = cwd.to_path_buf();
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (typed_dir, file_prefix) = split_input(incomplete);
        let search_dir = if Path::new(&typed_dir).is_absolute() {
            PathBuf::from(&typed_dir)
        } else {
            self.cwd.join(&typed_dir)
        };

        let entries = match fs::read_dir(&search_dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        // dotfiles only show up once the user has typed the dot
        let show_hidden = file_prefix.starts_with('.');
        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(&file_prefix) || (name.starts_with('.') && !show_hidden) {
                    return None;
                }

                let text = format!("{}{}", typed_dir, name);
                let pair = if entry.path().is_dir() {
                    Pair {
                        display: format!("{}/", name),
                        replacement: format!("{}/", text),
                    }
                } else {
                    Pair {
                        display: name,
                        replacement: format!("{} ", text),
                    }
                };
                Some(pair)
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

/// Splits typed text into the directory part (kept verbatim, with its
/// trailing slash) and the file-name prefix being completed.
fn split_input(incomplete: &str) -> (String, String) {
    match incomplete.rfind('/') {
        Some(idx) => (
            incomplete[..=idx].to_string(),
            incomplete[idx + 1..].to_string(),
        ),
        None => (String::new(), incomplete.to_string()),
    }
}
