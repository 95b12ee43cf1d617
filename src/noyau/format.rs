// src/noyau/format.rs
//
// Rendu texte de la démarche (jetons, RPN, arbre).

use super::expr::Expr;
use super::jetons::Tok;
use super::lecture::format_nombre;
use super::rpn::Rpn;

/// Liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Tok::Num(v) => format_nombre(*v),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Comma => ",".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// RPN en texte ; `neg` pour le moins unaire, `nom/arité` pour les appels.
pub fn format_rpn(rpn: &[Rpn]) -> String {
    rpn.iter()
        .map(|r| match r {
            Rpn::Num(v) => format_nombre(*v),
            Rpn::Const(nom) => nom.clone(),
            Rpn::Neg => "neg".to_string(),
            Rpn::Plus => "+".to_string(),
            Rpn::Minus => "-".to_string(),
            Rpn::Star => "*".to_string(),
            Rpn::Slash => "/".to_string(),
            Rpn::Caret => "^".to_string(),
            Rpn::Appel { nom, arite } => format!("{nom}/{arite}"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Arbre entièrement parenthésé (lève toute ambiguïté de précédence).
pub fn format_expr(e: &Expr) -> String {
    use Expr::*;

    match e {
        Num(v) => format_nombre(*v),
        Const(nom) => nom.clone(),
        Neg(x) => format!("(-{})", format_expr(x)),
        Add(a, b) => format!("({} + {})", format_expr(a), format_expr(b)),
        Sub(a, b) => format!("({} - {})", format_expr(a), format_expr(b)),
        Mul(a, b) => format!("({} * {})", format_expr(a), format_expr(b)),
        Div(a, b) => format!("({} / {})", format_expr(a), format_expr(b)),
        Pow(a, b) => format!("({} ^ {})", format_expr(a), format_expr(b)),
        Appel(nom, args) => {
            let args: Vec<String> = args.iter().map(format_expr).collect();
            format!("{nom}({})", args.join(", "))
        }
    }
}
