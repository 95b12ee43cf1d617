// src/noyau/filtre.rs
//
// Pare-feu syntaxique sur la forme canonique, avant toute évaluation :
// - liste blanche de caractères
// - chaque mot doit être un nom de l'espace (ou ANS)
// - pas de ".." (littéral numérique mal formé)

use super::erreur::EvalError;
use super::espace::{EspaceNoms, ANS};
use super::normalise::mots_de;

fn caractere_autorise(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_ascii_alphabetic()
        || c.is_whitespace()
        || matches!(c, '.' | '+' | '-' | '*' | '/' | '^' | '(' | ')' | ',' | '%' | '_')
}

/// Liste blanche (caractères + mots).
pub fn verifie_caracteres(canonique: &str) -> Result<(), EvalError> {
    if let Some(c) = canonique.chars().find(|c| !caractere_autorise(*c)) {
        tracing::debug!(caractere = ?c, "caractère hors liste blanche");
        return Err(EvalError::InvalidCharacters);
    }

    let espace = EspaceNoms::standard();
    if let Some(m) =
        mots_de(canonique).find(|m| m.as_str() != ANS && !espace.contient(m.as_str()))
    {
        tracing::debug!(mot = m.as_str(), "nom hors espace");
        return Err(EvalError::InvalidCharacters);
    }

    Ok(())
}

/// Rejette ".." (ex: `1..2`).
pub fn verifie_nombres(canonique: &str) -> Result<(), EvalError> {
    if canonique.contains("..") {
        return Err(EvalError::BadNumberFormat);
    }
    Ok(())
}
