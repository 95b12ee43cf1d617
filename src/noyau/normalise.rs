//! Normaliseur : notation utilisateur -> forme canonique.
//!
//! Règles, dans l'ordre (l'ordre compte) :
//! 1. glyphes `×` `÷` `−` -> `*` `/` `-`
//! 2. pourcentage : `50%` -> `(50/100)` (avant tout le reste : `%` ne doit
//!    jamais atteindre la liste blanche comme modulo)
//! 3. puissance : `**` -> `^` (jeton canonique, l'opérande est lu par la grammaire)
//! 4. mots entiers : `pi`/`π` -> `PI`, `e` -> `E`, `ans` -> `ANS` (casse libre)
//! 5. fonctions connues -> minuscules (`LOG10` -> `log10`), mots inconnus intacts
//!
//! Un mot collé à un nombre (`2pi`, `3e`) n'est pas un mot entier : il reste
//! tel quel. L'exposant d'un littéral (`1e5`, `2.5E-3`) fait partie du nombre.
//!
//! Fonction pure et totale : une entrée mal formée passe, la liste blanche
//! et l'évaluateur la rejetteront.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Match, Regex};

use super::espace::{EspaceNoms, ANS};

lazy_static! {
    /// Littéral numérique immédiatement suivi de `%`.
    static ref POURCENT: Regex =
        Regex::new(r"((?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)%").unwrap();

    /// Nombre ou mot, même découpage que le tokeniseur : un nombre est
    /// consommé en entier (exposant compris) avant qu'un mot puisse commencer.
    static ref LEXEME: Regex = Regex::new(
        r"(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?|(?P<mot>[A-Za-z_][A-Za-z0-9_]*)"
    )
    .unwrap();
}

/// Tous les mots identifiants de `s`, collés ou non à un nombre.
pub(crate) fn mots_de(s: &str) -> impl Iterator<Item = Match<'_>> {
    LEXEME.captures_iter(s).filter_map(|c| c.name("mot"))
}

/// Mot qui suit directement un nombre (`2pi` : `pi` est collé).
fn colle(s: &str, m: &Match) -> bool {
    s[..m.start()].ends_with(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

pub fn normalise(raw: &str) -> String {
    let s = glyphes(raw);
    let s = pourcentages(&s);
    let s = puissance(&s);
    mots(&s)
}

fn glyphes(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            '−' => '-',
            autre => autre,
        })
        .collect::<String>()
        .replace('π', "PI")
}

fn pourcentages(s: &str) -> String {
    POURCENT.replace_all(s, "($1/100)").into_owned()
}

fn puissance(s: &str) -> String {
    s.replace("**", "^")
}

fn mots(s: &str) -> String {
    let espace = EspaceNoms::standard();

    LEXEME
        .replace_all(s, |c: &Captures| -> String {
            match c.name("mot") {
                Some(m) if !colle(s, &m) => mot_canonique(espace, m.as_str()).into_owned(),
                _ => c[0].to_string(),
            }
        })
        .into_owned()
}

fn mot_canonique<'a>(espace: &EspaceNoms, mot: &'a str) -> Cow<'a, str> {
    if mot.eq_ignore_ascii_case("pi") {
        return Cow::Borrowed("PI");
    }
    if mot.eq_ignore_ascii_case("e") {
        return Cow::Borrowed("E");
    }
    if mot.eq_ignore_ascii_case(ANS) {
        return Cow::Borrowed(ANS);
    }
    match espace.fonction_canonique(mot) {
        Some(nom) => Cow::Borrowed(nom),
        None => Cow::Borrowed(mot),
    }
}
