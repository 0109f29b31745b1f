use std::collections::BTreeSet;
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use crate::filesystem::WriteMode;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unterminated {0} quote")]
    UnterminatedQuote(char),
    #[error("pipes are not supported")]
    Pipe,
    #[error("redirection needs a target file")]
    MissingRedirectTarget,
    #[error("only one redirection is allowed per command")]
    MultipleRedirects,
    #[error("redirection without a command")]
    MissingCommand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Redirect(WriteMode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub mode: WriteMode,
    pub target: String,
}

/// A tokenized line before flag recognition: command name, remaining words
/// in order, and the optional output redirection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub name: String,
    pub words: Vec<String>,
    pub redirect: Option<Redirect>,
}

/// A command ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<String>,
    pub flags: BTreeSet<char>,
    pub redirect: Option<Redirect>,
}

impl Invocation {
    pub fn has_flag(&self, flag: char) -> bool {
        self.flags.contains(&flag)
    }

    pub fn is_redirected(&self) -> bool {
        self.redirect.is_some()
    }
}

pub fn tokenize(line: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    // quoted empty strings still produce a word
    let mut in_word = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => flush_word(&mut tokens, &mut word, &mut in_word),
            '\'' => {
                in_word = true;
                read_single_quoted(&mut chars, &mut word)?;
            }
            '"' => {
                in_word = true;
                read_double_quoted(&mut chars, &mut word)?;
            }
            '\\' => {
                in_word = true;
                word.push(chars.next().unwrap_or('\\'));
            }
            '>' => {
                flush_word(&mut tokens, &mut word, &mut in_word);
                if chars.peek() == Some(&'>') {
                    chars.next();
                    tokens.push(Token::Redirect(WriteMode::Append));
                } else {
                    tokens.push(Token::Redirect(WriteMode::Truncate));
                }
            }
            '|' => return Err(ParseError::Pipe),
            _ => {
                in_word = true;
                word.push(c);
            }
        }
    }
    flush_word(&mut tokens, &mut word, &mut in_word);

    Ok(tokens)
}

fn flush_word(tokens: &mut Vec<Token>, word: &mut String, in_word: &mut bool) {
    if *in_word {
        tokens.push(Token::Word(std::mem::take(word)));
        *in_word = false;
    }
}

fn read_single_quoted(chars: &mut Peekable<Chars<'_>>, word: &mut String) -> Result<(), ParseError> {
    for c in chars.by_ref() {
        if c == '\'' {
            return Ok(());
        }
        word.push(c);
    }
    Err(ParseError::UnterminatedQuote('\''))
}

fn read_double_quoted(chars: &mut Peekable<Chars<'_>>, word: &mut String) -> Result<(), ParseError> {
    while let Some(c) = chars.next() {
        match c {
            '"' => return Ok(()),
            '\\' if matches!(chars.peek(), Some('"') | Some('\\')) => {
                if let Some(escaped) = chars.next() {
                    word.push(escaped);
                }
            }
            _ => word.push(c),
        }
    }
    Err(ParseError::UnterminatedQuote('"'))
}

impl CommandLine {
    /// Returns `Ok(None)` for a line with no tokens.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut words = Vec::new();
        let mut redirect = None;
        let mut tokens = tokenize(line)?.into_iter();

        while let Some(token) = tokens.next() {
            match token {
                Token::Word(word) => words.push(word),
                Token::Redirect(mode) => {
                    let target = match tokens.next() {
                        Some(Token::Word(target)) => target,
                        _ => return Err(ParseError::MissingRedirectTarget),
                    };
                    if redirect.is_some() {
                        return Err(ParseError::MultipleRedirects);
                    }
                    redirect = Some(Redirect { mode, target });
                }
            }
        }

        if words.is_empty() {
            return match redirect {
                Some(_) => Err(ParseError::MissingCommand),
                None => Ok(None),
            };
        }

        let name = words.remove(0);
        Ok(Some(CommandLine {
            name,
            words,
            redirect,
        }))
    }

    /// Splits words into flags and positional arguments. A word counts as
    /// flags only when it is `-` followed by letters that are all in
    /// `accepted`; everything else, a lone `-` included, stays positional.
    pub fn into_invocation(self, accepted: &[char]) -> Invocation {
        let mut args = Vec::new();
        let mut flags = BTreeSet::new();

        for word in self.words {
            match word.strip_prefix('-') {
                Some(letters)
                    if !letters.is_empty() && letters.chars().all(|c| accepted.contains(&c)) =>
                {
                    flags.extend(letters.chars());
                }
                _ => args.push(word),
            }
        }

        Invocation {
            name: self.name,
            args,
            flags,
            redirect: self.redirect,
        }
    }
}
