//! Static reply text: greeting, command list, grammar notes, writing systems.
use super::category::Category;

/// Reply to `hi`, pointing at the command list under the configured prefix.
pub fn greeting(prefix: &str) -> String {
    format!(
        "Hello! 👋 I'm here to help you learn! Type `{}cmds` to see what I can do!",
        prefix
    )
}

pub const CHALLENGE: &str = "Challenge accepted! Let's make learning fun and competitive!";

/// Command list for `cmds`, rendered with the configured prefix.
pub fn help_text(prefix: &str) -> String {
    const SECTIONS: &[(&str, &[(&str, &str)])] = &[
        (
            "General Commands",
            &[
                ("hi", "Greet the bot."),
                ("cmds", "Lists all available commands."),
                ("langs", "Lists supported languages."),
            ],
        ),
        (
            "Interactive Learning",
            &[
                ("grammar [lang]", "Explains grammar elements for a specified language."),
                ("flash [difficulty]", "Starts a flashcard game."),
                ("guess [lang]", "Starts a word guess game."),
                ("write [lang] [letter]", "Write the meaning of a word that starts with a specified letter."),
                ("addch [char] [translation]", "Adds a word to Chinese vocabulary."),
                ("addgr [word] [translation]", "Adds a word to Greek vocabulary."),
                ("addla [word] [translation]", "Adds a word to Latin vocabulary."),
                ("addsans [word] [translation]", "Adds a word to Sanskrit vocabulary."),
                ("addnorse [word] [translation]", "Adds a word to Norse vocabulary."),
                ("add [lang] [word] [translation]", "Adds a word to any vocabulary."),
                ("rand [lang]", "Provides a random word in the specified language."),
            ],
        ),
        (
            "Color Management",
            &[
                ("setcolor [color]", "Set your color."),
                ("resetcolor", "Reset your color."),
                ("colors", "List available colors."),
            ],
        ),
        (
            "Learning Tools",
            &[
                ("written", "Show how alphabets and characters look in all languages."),
                ("challenge", "Start a challenge for a fun competition!"),
                ("lead", "View the leaderboard."),
            ],
        ),
        ("Calculator", &[("calc [expression]", "Perform a calculation.")]),
        (
            "Flashcard Management",
            &[
                ("flashcardcreate [word] [translation]", "Create a flashcard."),
                ("flashcardgenerate", "Generate a random flashcard."),
                ("flashcardlist", "List all your flashcards."),
            ],
        ),
        (
            "Hangman Game",
            &[("hangman [lang]", "Start a Hangman game with a word from the specified language.")],
        ),
    ];

    let mut out = String::from("**Available Commands:**\n");
    for (title, entries) in SECTIONS {
        out.push_str(&format!("\n**{}:**\n", title));
        for (usage, what) in *entries {
            out.push_str(&format!("- `{}{}`: {}\n", prefix, usage, what));
        }
    }
    out
}

pub fn languages_line() -> String {
    let names: Vec<&str> = Category::ALL.iter().map(|c| c.display_name()).collect();
    format!("**Supported Languages:** {}", names.join(", "))
}

pub fn grammar_note(category: Category) -> &'static str {
    match category {
        Category::Greek => "Greek grammar includes cases, genders, and conjugations. For example, nouns have nominative, accusative, genitive, and vocative cases.",
        Category::Latin => "Latin grammar is known for its extensive use of cases, verb conjugations, and agreement between subjects and verbs.",
        Category::Chinese => "Chinese grammar is analytic, relying on word order and particles rather than inflections to convey meaning.",
        Category::Sanskrit => "Sanskrit grammar is highly inflected, with eight cases, three genders, and extensive verb conjugations.",
        Category::Norse => "Norse grammar features strong and weak declensions, three genders, and a system of verb conjugations.",
    }
}

fn script_sample(category: Category) -> &'static str {
    match category {
        Category::Chinese => "汉字 (Hànzì)\n你好 (Nǐ hǎo) - Hello\n再见 (Zàijiàn) - Goodbye",
        Category::Greek => concat!(
            "Γράμματα (Grámata)\n",
            "Χαίρετε (Chairete) - Hello\n",
            "Αντίο (Antío) - Goodbye\n",
            "Α α, Β β, Γ γ, Δ δ, Ε ε, Ζ ζ, Η η, Θ θ, Ι ι, Κ κ, Λ λ, Μ μ, Ν ν, Ξ ξ, Ο ο, Π π, Ρ ρ, Σ σ/ς, Τ τ, Υ υ, Φ φ, Χ χ, Ψ ψ, Ω ω"
        ),
        Category::Latin => concat!(
            "Scriptura (Scripture)\n",
            "Salve - Hello\n",
            "Vale - Goodbye\n",
            "A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k, L l, M m, N n, O o, P p, Q q, R r, S s, T t, U u, V v"
        ),
        Category::Sanskrit => concat!(
            "लिपि (Lipī)\n",
            "नमस्ते (Namaste) - Hello\n",
            "अलविदा (Alvida) - Goodbye\n",
            "अ आ इ ई उ ऊ ऋ ए ओ क ख ग घ च छ ज झ ट ठ ड ढ त थ द ध न प फ ब भ म य र ल व श ष स ह"
        ),
        Category::Norse => concat!(
            "Runes (Norse):\n",
            "ᚠ (Fehu) - Wealth\nᚢ (Uruz) - Strength\nᚦ (Thurisaz) - Thorn\nᚨ (Ansuz) - God\n",
            "ᚱ (Raido) - Journey\nᚲ (Kaunan) - Torch\nᚷ (Gebo) - Gift\nᚹ (Wunjo) - Joy\n",
            "ᚺ (Hagalaz) - Hail\nᚾ (Naudiz) - Need\nᛁ (Isaz) - Ice\nᛃ (Jera) - Year\n",
            "ᛇ (Eihwaz) - Yew\nᛈ (Perthro) - Mystery\nᛉ (Algiz) - Protection\nᛊ (Sowilo) - Sun\n",
            "ᛏ (Tiwaz) - Honor\nᛒ (Berkano) - Growth\nᛖ (Ehwaz) - Horse\nᛗ (Madr) - Man"
        ),
    }
}

/// Every writing-system sample, one block per language.
pub fn written_scripts() -> String {
    Category::ALL
        .iter()
        .map(|c| format!("**{}**:\n{}", c.display_name(), script_sample(*c)))
        .collect::<Vec<_>>()
        .join("\n\n")
}
