mod common;
use common::harness;

#[tokio::test]
async fn greeting_help_and_challenge() {
    let mut h = harness("{}");
    assert!(h.command("a", "c", "!hi").await.starts_with("Hello! 👋"));
    let help = h.command("a", "c", "!cmds").await;
    assert!(help.starts_with("**Available Commands:**"));
    assert!(help.contains("`!hangman [lang]`"));
    assert_eq!(
        h.command("a", "c", "!challenge").await,
        "Challenge accepted! Let's make learning fun and competitive!"
    );
    assert_eq!(h.command("a", "c", "!lead").await, "No scores recorded yet.");
}

#[tokio::test]
async fn greeting_follows_configured_prefix() {
    let mut h = common::harness_with("{}", |c| c.bot.command_prefix = "?".into());
    assert_eq!(
        h.command("a", "c", "?hi").await,
        "Hello! 👋 I'm here to help you learn! Type `?cmds` to see what I can do!"
    );
}

#[tokio::test]
async fn plain_chat_is_ignored() {
    let h = harness("{}");
    assert!(h.say("a", "c", "hello everyone").is_none());
    assert!(h.say("a", "c", "!notacommand").is_none());
}

#[tokio::test]
async fn grammar_notes() {
    let mut h = harness("{}");
    let latin = h.command("a", "c", "!grammar LATIN").await;
    assert!(latin.starts_with("**Latin Grammar:**\nLatin grammar"));
    assert_eq!(
        h.command("a", "c", "!grammar Elvish").await,
        "No grammar information available for 'elvish'. Please choose from Chinese, Greek, Latin, Sanskrit, or Norse."
    );
}

#[tokio::test]
async fn calculator() {
    let mut h = harness("{}");
    assert_eq!(
        h.command("a", "c", "!calc 2 + 3 * 4").await,
        "The result of **2 + 3 * 4** is: **14**"
    );
    assert_eq!(
        h.command("a", "c", "!calc 7/2").await,
        "The result of **7/2** is: **3.5**"
    );
    assert_eq!(
        h.command("a", "c", "!calc 2^3").await,
        "Error calculating the expression: Invalid characters in expression."
    );
    assert_eq!(
        h.command("a", "c", "!calc 1/0").await,
        "Error calculating the expression: Division by zero."
    );
}

#[tokio::test]
async fn deeply_nested_calc_is_rejected_and_bot_keeps_serving() {
    let mut h = harness("{}");
    let nested = format!("!calc {}1{}", "(".repeat(1000), ")".repeat(1000));
    assert_eq!(
        h.command("a", "c", &nested).await,
        "Error calculating the expression: Expression is nested too deeply."
    );
    assert_eq!(
        h.command("a", "c", "!calc (1 + 1)").await,
        "The result of **(1 + 1)** is: **2**"
    );
}

#[tokio::test]
async fn color_roles() {
    let mut h = harness("{}");
    assert_eq!(
        h.command("a", "c", "!setcolor gold").await,
        "Your color has been set to **Gold**!"
    );
    let err = h.command("a", "c", "!setcolor teal").await;
    assert!(err.starts_with("That color is not available. Please choose from: Silver"));
    assert_eq!(
        h.command("a", "c", "!resetcolor").await,
        "Your color has been reset to default."
    );
    assert_eq!(
        h.command("a", "c", "!colors").await,
        "**Available Colors:** Silver, Gold, Purple, Yellow, Green, Red, Azure, Orange"
    );
}

#[tokio::test]
async fn color_creation_can_be_denied() {
    let mut h = common::harness_with("{}", |c| c.colors.allow_role_creation = false);
    assert_eq!(
        h.command("a", "c", "!setcolor red").await,
        "I don't have permission to create roles."
    );
}

#[tokio::test]
async fn written_scripts_cover_every_language() {
    let mut h = harness("{}");
    let text = h.command("a", "c", "!written").await;
    assert!(text.starts_with("**Chinese**:\n汉字"));
    assert!(text.contains("**Norse**:\nRunes (Norse):"));
}
