// src/noyau/jetons.rs

use super::erreur::ErreurInterne;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Constantes + fonctions (le parse décide : suivi de '(' => appel)
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,
    Comma,
}

/// Tokenize une forme canonique en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .25, 4.), exposant optionnel (1e5, 2.5E-3)
/// - opérateurs + - * / ^
/// - parenthèses ( ) et virgule
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (casse conservée : déjà normalisée)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurInterne> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Comma),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            _ => None,
        };
        if let Some(tok) = simple {
            out.push(tok);
            i += 1;
            continue;
        }

        // Identifiants ASCII
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
            continue;
        }

        // Nombre décimal : un seul point, au moins un chiffre
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            // exposant : seulement si des chiffres suivent (`2e` reste `2` puis `e`)
            if i < chars.len() && matches!(chars[i], 'e' | 'E') {
                let mut j = i + 1;
                if j < chars.len() && matches!(chars[j], '+' | '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    while j < chars.len() && chars[j].is_ascii_digit() {
                        j += 1;
                    }
                    i = j;
                }
            }
            let txt: String = chars[start..i].iter().collect();
            let mantisse = txt.split(['e', 'E']).next().unwrap_or_default();

            let points = mantisse.matches('.').count();
            if points > 1 || !mantisse.chars().any(|d| d.is_ascii_digit()) {
                return Err(ErreurInterne::NombreInvalide(txt));
            }
            let v = txt
                .parse::<f64>()
                .map_err(|_| ErreurInterne::NombreInvalide(txt.clone()))?;

            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurInterne::CaractereInattendu(c));
    }

    Ok(out)
}
