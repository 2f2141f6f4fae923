//! The shared question/answer turn used by the Flashcard, Guess and Write games.
//!
//! One turn is `Prompted → {Correct, Incorrect, TimedOut}`:
//!
//! 1. subscribe for the participant's next message in the channel, then post the prompt
//! 2. wait up to the configured deadline (30 s by default)
//! 3. grade with trimmed, case-insensitive exact equality
//! 4. post the verdict; a correct answer adds one leaderboard point
//!
//! Subscribing before the prompt goes out means a fast reply can never slip past.
//! A timeout is an ordinary outcome, not an error.
use log::info;
use std::sync::Arc;
use std::time::Duration;

use super::leaderboard::Leaderboard;
use super::replies::ReplyHub;
use super::transport::{Responder, TransportClosed, UserId};
use crate::logutil::preview;

pub const DEFAULT_ANSWER_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect { given: String },
    TimedOut,
}

/// Everything a running game needs to talk to its participant.
#[derive(Clone)]
pub struct GameContext {
    pub participant: UserId,
    pub responder: Responder,
    pub replies: ReplyHub,
    pub leaderboard: Arc<Leaderboard>,
    pub timeout: Duration,
}

/// A prompt plus the answer it expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub expected: String,
    /// How the reveal names the answer: "answer", "word", "meaning".
    pub answer_noun: &'static str,
}

/// Trimmed, Unicode case-insensitive exact comparison.
pub fn answers_match(given: &str, expected: &str) -> bool {
    given.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// Run one question/answer turn.
pub async fn ask(ctx: &GameContext, question: &Question) -> Result<AnswerOutcome, TransportClosed> {
    let subscription = ctx
        .replies
        .subscribe(&ctx.participant, ctx.responder.channel());
    ctx.responder.send(question.prompt.as_str())?;

    let outcome = match subscription.recv_within(ctx.timeout).await {
        None => {
            ctx.responder.send(format!(
                "Time's up! The correct {} was: **{}**",
                question.answer_noun, question.expected
            ))?;
            AnswerOutcome::TimedOut
        }
        Some(reply) if answers_match(&reply.text, &question.expected) => {
            ctx.responder.send("Correct! 🎉")?;
            let score = ctx.leaderboard.record_win(&ctx.participant);
            info!("{} answered correctly (score {})", ctx.participant, score);
            AnswerOutcome::Correct
        }
        Some(reply) => {
            ctx.responder.send(format!(
                "Wrong! The correct {} was: **{}**",
                question.answer_noun, question.expected
            ))?;
            AnswerOutcome::Incorrect {
                given: reply.text,
            }
        }
    };
    info!(
        "{} in {}: '{}' -> {:?}",
        ctx.participant,
        ctx.responder.channel(),
        preview(&question.prompt),
        outcome
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::transport::{ChannelId, InboundMessage, OutgoingMessage};
    use tokio::sync::mpsc;

    fn context(timeout: Duration) -> (GameContext, mpsc::UnboundedReceiver<OutgoingMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let ctx = GameContext {
            participant: UserId::from("alice"),
            responder: Responder::new(ChannelId::from("spanish"), tx),
            replies: ReplyHub::new(),
            leaderboard: Arc::new(Leaderboard::new()),
            timeout,
        };
        (ctx, rx)
    }

    fn hola() -> Question {
        Question {
            prompt: "What is 'hello'?".into(),
            expected: "Hola".into(),
            answer_noun: "answer",
        }
    }

    #[test]
    fn matching_trims_and_ignores_case() {
        assert!(answers_match("  hola ", "Hola"));
        assert!(answers_match("ΛΌΓΟΣ", "λόγος"));
        assert!(!answers_match("hol", "Hola"));
        assert!(!answers_match("hola amigo", "Hola"));
    }

    #[tokio::test]
    async fn correct_reply_scores_one_point() {
        let (ctx, mut rx) = context(Duration::from_secs(5));
        let task = {
            let ctx = ctx.clone();
            tokio::spawn(async move { ask(&ctx, &hola()).await })
        };
        assert_eq!(rx.recv().await.unwrap().text, "What is 'hello'?");
        ctx.replies
            .deliver(InboundMessage::new("alice", "spanish", "hola"))
            .unwrap();
        assert_eq!(task.await.unwrap().unwrap(), AnswerOutcome::Correct);
        assert_eq!(rx.recv().await.unwrap().text, "Correct! 🎉");
        assert_eq!(ctx.leaderboard.score(&UserId::from("alice")), 1);
    }

    #[tokio::test]
    async fn timeout_reveals_and_leaves_score() {
        let (ctx, mut rx) = context(Duration::from_millis(30));
        let outcome = ask(&ctx, &hola()).await.unwrap();
        assert_eq!(outcome, AnswerOutcome::TimedOut);
        rx.recv().await.unwrap();
        assert_eq!(
            rx.recv().await.unwrap().text,
            "Time's up! The correct answer was: **Hola**"
        );
        assert_eq!(ctx.leaderboard.score(&UserId::from("alice")), 0);
        assert_eq!(ctx.replies.pending(), 0);
    }

    #[tokio::test]
    async fn other_traffic_does_not_resolve_the_wait() {
        let (ctx, mut rx) = context(Duration::from_secs(5));
        let task = {
            let ctx = ctx.clone();
            tokio::spawn(async move { ask(&ctx, &hola()).await })
        };
        rx.recv().await.unwrap();
        assert!(ctx
            .replies
            .deliver(InboundMessage::new("mallory", "spanish", "Hola"))
            .is_err());
        assert!(ctx
            .replies
            .deliver(InboundMessage::new("alice", "elsewhere", "Hola"))
            .is_err());
        ctx.replies
            .deliver(InboundMessage::new("alice", "spanish", "adios"))
            .unwrap();
        assert_eq!(
            task.await.unwrap().unwrap(),
            AnswerOutcome::Incorrect {
                given: "adios".into()
            }
        );
        assert_eq!(
            rx.recv().await.unwrap().text,
            "Wrong! The correct answer was: **Hola**"
        );
        assert_eq!(ctx.leaderboard.score(&UserId::from("mallory")), 0);
        assert_eq!(ctx.leaderboard.score(&UserId::from("alice")), 0);
    }
}
