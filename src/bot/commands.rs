//! Command handlers.
//!
//! [`execute`] runs one parsed [`Command`] for one inbound message. Every user-facing
//! failure (bad language, empty vocabulary, bad input, store write failure) becomes a
//! short reply; the only error returned is a closed outgoing transport.
use log::{error, info, warn};
use std::sync::Arc;

use super::answer;
use super::calc;
use super::category::Category;
use super::colors;
use super::content;
use super::games::{self, GameSession, SetupError};
use super::hangman;
use super::parser::Command;
use super::server::BotState;
use super::transport::{InboundMessage, Responder, TransportClosed};
use crate::logutil::preview;
use crate::validation::validate_pair;

const SAVE_FAILED: &str = "Sorry, I couldn't save that right now. Please try again later.";

pub async fn execute(state: &BotState, msg: &InboundMessage, cmd: Command) -> Result<(), TransportClosed> {
    let out = state.responder(&msg.channel);
    match cmd {
        Command::Hi => out.send(content::greeting(state.parser_prefix())),
        Command::Cmds => out.send(content::help_text(state.parser_prefix())),
        Command::Langs => out.send(content::languages_line()),
        Command::Grammar(lang) => grammar(&out, &lang),
        Command::Flash(difficulty) => {
            let setup = games::pick_flashcard(&state.vocab, difficulty.as_deref());
            run_game(state, msg, &out, setup).await
        }
        Command::Guess(lang) => {
            let setup = games::pick_guess(&state.vocab, &lang);
            run_game(state, msg, &out, setup).await
        }
        Command::Write { lang, letter } => {
            let setup = games::pick_write(&state.vocab, &lang, &letter);
            run_game(state, msg, &out, setup).await
        }
        Command::Hangman(lang) => {
            let setup = games::pick_hangman(&state.vocab, &lang);
            run_game(state, msg, &out, setup).await
        }
        Command::AddWord {
            lang,
            word,
            translation,
        } => add_word(state, msg, &out, &lang, &word, &translation).await,
        Command::Rand(lang) => random_word(state, &out, &lang),
        Command::FlashcardCreate { word, translation } => {
            create_flashcard(state, msg, &out, &word, &translation).await
        }
        Command::FlashcardGenerate => match state.flashcards.random_card() {
            Some((word, translation)) => out.send(format!("Flashcard: **{}** - **{}**", word, translation)),
            None => out.send(format!(
                "No flashcards available. Create one with `{}flashcardcreate <word> <translation>`.",
                state.parser_prefix()
            )),
        },
        Command::FlashcardList => {
            let cards = state.flashcards.list();
            if cards.is_empty() {
                return out.send("No flashcards available.");
            }
            let lines: Vec<String> = cards
                .iter()
                .map(|(w, t)| format!("- **{}** - {}", w, t))
                .collect();
            out.send(format!("**Your Flashcards:**\n{}", lines.join("\n")))
        }
        Command::SetColor(color) => match state.colors.set_color(&msg.author, &color) {
            Ok(role) => {
                info!("{} set color {}", msg.author, role.role_name());
                out.send(format!("Your color has been set to **{}**!", role.role_name()))
            }
            Err(e) => out.send(e.to_string()),
        },
        Command::ResetColor => {
            state.colors.reset_color(&msg.author);
            out.send("Your color has been reset to default.")
        }
        Command::Colors => out.send(format!("**Available Colors:** {}", colors::palette_list())),
        Command::Calc(expression) => match calc::evaluate(&expression) {
            Ok(value) => out.send(format!(
                "The result of **{}** is: **{}**",
                expression,
                calc::format_number(value)
            )),
            Err(e) => out.send(format!("Error calculating the expression: {}", e)),
        },
        Command::Written => out.send(content::written_scripts()),
        Command::Challenge => out.send(content::CHALLENGE),
        Command::Lead => leaderboard(state, &out),
        Command::Invalid(usage) => out.send(usage),
        Command::Unknown => Ok(()),
    }
}

fn grammar(out: &Responder, lang: &str) -> Result<(), TransportClosed> {
    match Category::from_tag(lang) {
        Some(category) => out.send(format!(
            "**{} Grammar:**\n{}",
            category.display_name(),
            content::grammar_note(category)
        )),
        None => out.send(format!(
            "No grammar information available for '{}'. Please choose from {}.",
            lang.to_lowercase(),
            Category::choice_list()
        )),
    }
}

/// Start a game whose setup may have failed. Failed setups only post the reason.
async fn run_game(
    state: &BotState,
    msg: &InboundMessage,
    out: &Responder,
    setup: Result<GameSession, SetupError>,
) -> Result<(), TransportClosed> {
    let session = match setup {
        Ok(session) => session,
        Err(e) => return out.send(e.to_string()),
    };
    info!(
        "game {} {:?} ({}) for {} in {}",
        session.id, session.kind, session.category, msg.author, msg.channel
    );
    let ctx = state.game_context(msg);
    match session.question() {
        Some(question) => {
            let outcome = answer::ask(&ctx, &question).await?;
            info!("game {} finished: {:?}", session.id, outcome);
        }
        None => {
            let result = hangman::play(&ctx, &session.word, state.config.games.hangman_attempts).await?;
            info!("game {} finished: {:?}", session.id, result);
        }
    }
    Ok(())
}

/// Add a word, persisting on the blocking pool (the store locks and fsyncs).
async fn add_word(
    state: &BotState,
    msg: &InboundMessage,
    out: &Responder,
    lang: &str,
    word: &str,
    translation: &str,
) -> Result<(), TransportClosed> {
    let category = match games::parse_category(lang) {
        Ok(c) => c,
        Err(e) => return out.send(e.to_string()),
    };
    let (word, translation) = match validate_pair(word, translation, &state.config.term_rules()) {
        Ok(pair) => pair,
        Err(e) => return out.send(format!("{}.", e)),
    };
    let vocab = Arc::clone(&state.vocab);
    let (w, t) = (word.clone(), translation.clone());
    let saved = tokio::task::spawn_blocking(move || vocab.add_word(category, &w, &t)).await;
    match saved {
        Ok(Ok(previous)) => {
            if let Some(old) = previous {
                info!(
                    "{} replaced {} '{}' ('{}' -> '{}')",
                    msg.author,
                    category,
                    preview(&word),
                    preview(&old),
                    preview(&translation)
                );
            } else {
                info!("{} added {} '{}'", msg.author, category, preview(&word));
            }
            out.send(format!(
                "Added to {} vocabulary: **{}** - **{}**",
                category, word, translation
            ))
        }
        Ok(Err(e)) => {
            error!("Failed to save {} word '{}': {}", category, preview(&word), e);
            out.send(SAVE_FAILED)
        }
        Err(e) => {
            error!("Vocabulary write task for '{}' failed: {}", preview(&word), e);
            out.send(SAVE_FAILED)
        }
    }
}

fn random_word(state: &BotState, out: &Responder, lang: &str) -> Result<(), TransportClosed> {
    let category = match games::parse_category(lang) {
        Ok(c) => c,
        Err(e) => return out.send(e.to_string()),
    };
    match state.vocab.random_entry(category) {
        Some((word, translation)) => out.send(format!(
            "Random word in **{}**: **{}** - **{}**",
            category, word, translation
        )),
        None => out.send(SetupError::EmptyVocabulary(category).to_string()),
    }
}

async fn create_flashcard(
    state: &BotState,
    msg: &InboundMessage,
    out: &Responder,
    word: &str,
    translation: &str,
) -> Result<(), TransportClosed> {
    let (word, translation) = match validate_pair(word, translation, &state.config.term_rules()) {
        Ok(pair) => pair,
        Err(e) => return out.send(format!("{}.", e)),
    };
    let flashcards = Arc::clone(&state.flashcards);
    let (w, t) = (word.clone(), translation.clone());
    match tokio::task::spawn_blocking(move || flashcards.add_card(&w, &t)).await {
        Ok(Ok(_)) => {
            info!("{} created flashcard '{}'", msg.author, preview(&word));
            out.send(format!("Flashcard created: **{}** - **{}**", word, translation))
        }
        Ok(Err(e)) => {
            error!("Failed to save flashcard '{}': {}", preview(&word), e);
            out.send(SAVE_FAILED)
        }
        Err(e) => {
            error!("Flashcard write task for '{}' failed: {}", preview(&word), e);
            out.send(SAVE_FAILED)
        }
    }
}

fn leaderboard(state: &BotState, out: &Responder) -> Result<(), TransportClosed> {
    let ranked = state.leaderboard.ranked();
    if ranked.is_empty() {
        return out.send("No scores recorded yet.");
    }
    let lines: Vec<String> = ranked
        .iter()
        .map(|(user, score)| format!("{}: {} points", user.mention(), score))
        .collect();
    out.send(format!("**Leaderboard:**\n{}", lines.join("\n")))
}

/// Log a handler that could not reply because the transport went away.
pub(crate) fn report_closed(msg: &InboundMessage, err: &TransportClosed) {
    warn!(
        "Dropped reply to {} for '{}': {}",
        msg.author,
        preview(&msg.text),
        err
    );
}
