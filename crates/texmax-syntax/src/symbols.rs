//! Static lookup tables for commands with fixed meanings.

/// Functions rendered upright that take no braced argument.
pub const NON_ARGUMENT_FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "cot", "sec", "csc", "log", "ln", "exp", "arcsin", "arccos", "arctan",
    "sinh", "cosh", "tanh", "max", "min", "det", "arg", "mod",
];

/// Big operators that accept `^`/`_` limits.
pub const LIMITED_OPERATORS: &[&str] = &["int", "sum", "prod", "lim"];

/// Commands that produce horizontal space. Names of symbol commands are the
/// bare character (`\,` is `","`).
pub const SPACING_COMMANDS: &[&str] = &[" ", ",", ":", ";", "!", "quad", "qquad"];

const GREEK_LETTERS: &[(&str, &str)] = &[
    ("alpha", "α"),
    ("beta", "β"),
    ("gamma", "γ"),
    ("delta", "δ"),
    ("epsilon", "ε"),
    ("zeta", "ζ"),
    ("eta", "η"),
    ("theta", "θ"),
    ("iota", "ι"),
    ("kappa", "κ"),
    ("lambda", "λ"),
    ("mu", "μ"),
    ("nu", "ν"),
    ("xi", "ξ"),
    ("omicron", "ο"),
    ("pi", "π"),
    ("rho", "ρ"),
    ("sigma", "σ"),
    ("tau", "τ"),
    ("upsilon", "υ"),
    ("phi", "φ"),
    ("chi", "χ"),
    ("psi", "ψ"),
    ("omega", "ω"),
    ("Alpha", "Α"),
    ("Beta", "Β"),
    ("Gamma", "Γ"),
    ("Delta", "Δ"),
    ("Epsilon", "Ε"),
    ("Zeta", "Ζ"),
    ("Eta", "Η"),
    ("Theta", "Θ"),
    ("Iota", "Ι"),
    ("Kappa", "Κ"),
    ("Lambda", "Λ"),
    ("Mu", "Μ"),
    ("Nu", "Ν"),
    ("Xi", "Ξ"),
    ("Omicron", "Ο"),
    ("Pi", "Π"),
    ("Rho", "Ρ"),
    ("Sigma", "Σ"),
    ("Tau", "Τ"),
    ("Upsilon", "Υ"),
    ("Phi", "Φ"),
    ("Chi", "Χ"),
    ("Psi", "Ψ"),
    ("Omega", "Ω"),
];

// The first command listed for a value is the one written back out.
const DELIMITER_COMMANDS: &[(&str, &str)] = &[
    ("{", "{"),
    ("lbrace", "{"),
    ("}", "}"),
    ("rbrace", "}"),
    ("|", "‖"),
    ("Vert", "‖"),
    ("lVert", "‖"),
    ("rVert", "‖"),
    ("vert", "|"),
    ("lvert", "|"),
    ("rvert", "|"),
    ("langle", "⟨"),
    ("rangle", "⟩"),
    ("lfloor", "⌊"),
    ("rfloor", "⌋"),
    ("lceil", "⌈"),
    ("rceil", "⌉"),
    ("backslash", "\\"),
];

pub fn is_non_argument_function(name: &str) -> bool {
    NON_ARGUMENT_FUNCTIONS.contains(&name)
}

pub fn is_limited_operator(name: &str) -> bool {
    LIMITED_OPERATORS.contains(&name)
}

pub fn is_spacing_command(name: &str) -> bool {
    SPACING_COMMANDS.contains(&name)
}

/// Unicode letter for a Greek command name (`alpha` → `α`).
pub fn greek_letter(name: &str) -> Option<&'static str> {
    GREEK_LETTERS
        .iter()
        .find(|(command, _)| *command == name)
        .map(|(_, letter)| *letter)
}

/// Command name for a Greek letter (`α` → `alpha`).
pub fn greek_command(letter: &str) -> Option<&'static str> {
    GREEK_LETTERS
        .iter()
        .find(|(_, value)| *value == letter)
        .map(|(command, _)| *command)
}

/// Canonical delimiter for a named delimiter command (`langle` → `⟨`).
pub fn delimiter_value(command: &str) -> Option<&'static str> {
    DELIMITER_COMMANDS
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, value)| *value)
}

/// Command name that writes `value` back out, for delimiters that have no
/// literal token form.
pub fn delimiter_command(value: &str) -> Option<&'static str> {
    DELIMITER_COMMANDS
        .iter()
        .find(|(_, canonical)| *canonical == value)
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greek_both_ways() {
        assert_eq!(greek_letter("alpha"), Some("α"));
        assert_eq!(greek_letter("Omega"), Some("Ω"));
        assert_eq!(greek_letter("omicron"), Some("ο"));
        assert_eq!(greek_letter("aleph"), None);
        assert_eq!(greek_command("λ"), Some("lambda"));
        assert_eq!(greek_command("x"), None);
    }

    #[test]
    fn test_every_greek_letter_round_trips() {
        for (command, letter) in GREEK_LETTERS {
            assert_eq!(greek_command(letter), Some(*command));
        }
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(delimiter_value("lbrace"), Some("{"));
        assert_eq!(delimiter_value("|"), Some("‖"));
        assert_eq!(delimiter_value("rvert"), Some("|"));
        assert_eq!(delimiter_value("frac"), None);
        assert_eq!(delimiter_command("‖"), Some("|"));
        assert_eq!(delimiter_command("⟨"), Some("langle"));
        assert_eq!(delimiter_command("\\"), Some("backslash"));
    }

    #[test]
    fn test_command_classes() {
        assert!(is_non_argument_function("arctan"));
        assert!(!is_non_argument_function("frac"));
        assert!(is_limited_operator("lim"));
        assert!(is_spacing_command(","));
        assert!(is_spacing_command("qquad"));
        assert!(!is_spacing_command("."));
    }
}
