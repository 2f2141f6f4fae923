//! Chat command parser.
//!
//! Commands are recognised only when the message starts with the configured prefix
//! (`!` by default), so ordinary conversation never triggers the bot. The command name
//! is matched case-insensitively; arguments are split on whitespace, with double quotes
//! grouping a multi-word argument (`!addla "ad astra" "to the stars"`). Extra trailing
//! arguments are ignored. A missing required argument yields [`Command::Invalid`]
//! carrying the usage line.
use log::trace;

use super::category::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Hi,
    Cmds,
    Langs,
    Grammar(String),
    Flash(Option<String>),
    Guess(String),
    Write { lang: String, letter: String },
    AddWord { lang: String, word: String, translation: String },
    Rand(String),
    FlashcardCreate { word: String, translation: String },
    FlashcardGenerate,
    FlashcardList,
    SetColor(String),
    ResetColor,
    Colors,
    Calc(String),
    Written,
    Hangman(String),
    Challenge,
    Lead,
    /// Not a command: missing prefix or unrecognised name.
    Unknown,
    /// Recognised command with missing arguments; holds the usage text.
    Invalid(String),
}

/// Split arguments on whitespace, honouring double quotes. An unterminated quote runs
/// to the end of the line.
pub fn tokenize(args: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;
    for c in args.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    out.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if has_token {
        out.push(current);
    }
    out
}

/// Vocabulary shortcut commands and the category each one adds to.
const ADD_ALIASES: [(&str, Category); 5] = [
    ("addch", Category::Chinese),
    ("addgr", Category::Greek),
    ("addla", Category::Latin),
    ("addsans", Category::Sanskrit),
    ("addnorse", Category::Norse),
];

pub struct CommandParser {
    prefix: String,
}

impl CommandParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        CommandParser {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn usage(&self, text: &str) -> Command {
        Command::Invalid(format!("Usage: `{}{}`", self.prefix, text))
    }

    pub fn parse(&self, raw: &str) -> Command {
        let trimmed = raw.trim();
        let Some(body) = trimmed.strip_prefix(self.prefix.as_str()) else {
            return Command::Unknown;
        };
        if self.prefix.is_empty() {
            return Command::Unknown;
        }
        let (name, rest) = match body.find(char::is_whitespace) {
            Some(idx) => (&body[..idx], body[idx..].trim()),
            None => (body, ""),
        };
        if name.is_empty() {
            return Command::Unknown;
        }
        let name = name.to_ascii_lowercase();
        let args = tokenize(rest);
        let arg = |i: usize| args.get(i).cloned();

        let cmd = match name.as_str() {
            "hi" => Command::Hi,
            "cmds" => Command::Cmds,
            "langs" => Command::Langs,
            "grammar" => match arg(0) {
                Some(lang) => Command::Grammar(lang),
                None => self.usage("grammar <lang>"),
            },
            "flash" => Command::Flash(arg(0)),
            "guess" => match arg(0) {
                Some(lang) => Command::Guess(lang),
                None => self.usage("guess <lang>"),
            },
            "write" => match (arg(0), arg(1)) {
                (Some(lang), Some(letter)) => Command::Write { lang, letter },
                _ => self.usage("write <lang> <letter>"),
            },
            "add" => match (arg(0), arg(1), arg(2)) {
                (Some(lang), Some(word), Some(translation)) => Command::AddWord {
                    lang,
                    word,
                    translation,
                },
                _ => self.usage("add <lang> <word> <translation>"),
            },
            "rand" => match arg(0) {
                Some(lang) => Command::Rand(lang),
                None => self.usage("rand <lang>"),
            },
            "flashcardcreate" => match (arg(0), arg(1)) {
                (Some(word), Some(translation)) => Command::FlashcardCreate { word, translation },
                _ => self.usage("flashcardcreate <word> <translation>"),
            },
            "flashcardgenerate" => Command::FlashcardGenerate,
            "flashcardlist" => Command::FlashcardList,
            "setcolor" => match arg(0) {
                Some(color) => Command::SetColor(color),
                None => self.usage("setcolor <color>"),
            },
            "resetcolor" => Command::ResetColor,
            "colors" => Command::Colors,
            // calc takes the raw remainder, quotes and all
            "calc" => {
                if rest.is_empty() {
                    self.usage("calc <expression>")
                } else {
                    Command::Calc(rest.to_string())
                }
            }
            "written" => Command::Written,
            "hangman" => match arg(0) {
                Some(lang) => Command::Hangman(lang),
                None => self.usage("hangman <lang>"),
            },
            "challenge" => Command::Challenge,
            "lead" => Command::Lead,
            other => match ADD_ALIASES.iter().find(|(alias, _)| *alias == other) {
                Some((alias, category)) => match (arg(0), arg(1)) {
                    (Some(word), Some(translation)) => Command::AddWord {
                        lang: category.tag().to_string(),
                        word,
                        translation,
                    },
                    _ => self.usage(&format!("{} <word> <translation>", alias)),
                },
                None => Command::Unknown,
            },
        };
        trace!("Parsed {:?} from '{}'", cmd, raw);
        cmd
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new("!")
    }
}
