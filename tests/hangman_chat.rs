use lexibot::bot::transport::UserId;

mod common;
use common::harness;

#[tokio::test]
async fn hangman_cat_won_with_one_miss() {
    let mut h = harness(r#"{"latin": {"cat": "feles"}}"#);
    let game = h.say("alice", "general", "!hangman latin").unwrap();
    assert_eq!(
        h.next_text().await,
        "Starting Hangman! You have 6 incorrect guesses before you lose."
    );
    assert_eq!(
        h.next_text().await,
        "Word: _ _ _\nGuessed letters: \nAttempts left: 6"
    );

    h.say("alice", "general", "c");
    assert_eq!(h.next_text().await, "Good guess!");
    assert_eq!(h.next_text().await, "Word: c _ _\nGuessed letters: c\nAttempts left: 6");

    h.say("alice", "general", "x");
    assert_eq!(h.next_text().await, "Wrong guess!");
    assert_eq!(h.next_text().await, "Word: c _ _\nGuessed letters: c, x\nAttempts left: 5");

    h.say("alice", "general", "x");
    assert_eq!(h.next_text().await, "You've already guessed that letter!");
    h.next_text().await;

    h.say("alice", "general", "at");
    assert_eq!(h.next_text().await, "Please guess a single letter.");
    h.next_text().await;

    h.say("alice", "general", "A");
    assert_eq!(h.next_text().await, "Good guess!");
    h.next_text().await;

    h.say("alice", "general", "t");
    assert_eq!(h.next_text().await, "Good guess!");
    assert_eq!(
        h.next_text().await,
        "Congratulations! You've guessed the word: **cat**"
    );
    game.await.unwrap();

    // Hangman never touches the leaderboard.
    assert_eq!(h.server.state().leaderboard.score(&UserId::from("alice")), 0);
    assert_eq!(h.server.state().replies.pending(), 0);
}

#[tokio::test]
async fn hangman_runs_out_of_attempts() {
    let mut h = common::harness_with(r#"{"greek": {"ab": "x"}}"#, |c| c.games.hangman_attempts = 2);
    let game = h.say("alice", "general", "!hangman greek").unwrap();
    assert_eq!(
        h.next_text().await,
        "Starting Hangman! You have 2 incorrect guesses before you lose."
    );
    h.next_text().await;

    h.say("alice", "general", "z");
    assert_eq!(h.next_text().await, "Wrong guess!");
    h.next_text().await;
    h.say("alice", "general", "y");
    assert_eq!(h.next_text().await, "Wrong guess!");
    assert_eq!(h.next_text().await, "You've run out of attempts! The word was: **ab**");
    game.await.unwrap();
}

#[tokio::test]
async fn hangman_timeout_reveals_word() {
    let mut h = common::harness_with(r#"{"norse": {"ás": "god"}}"#, |c| c.bot.answer_timeout_secs = 1);
    let game = h.say("alice", "general", "!hangman norse").unwrap();
    h.next_text().await;
    h.next_text().await;
    game.await.unwrap();
    assert_eq!(h.next_text().await, "Time's up! The correct word was: **ás**");
}
