//! Noyau de la calculatrice
//!
//! Organisation interne :
//! - normalise.rs : notation utilisateur -> forme canonique
//! - filtre.rs    : liste blanche + ".." (pare-feu avant évaluation)
//! - espace.rs    : constantes + fonctions autorisées
//! - jetons.rs    : tokenisation
//! - rpn.rs       : shunting-yard + construction Expr
//! - expr.rs      : arbre + évaluation flottante
//! - lecture.rs   : arrondi + rendu des nombres
//! - format.rs    : rendu de la démarche
//! - eval.rs      : pipeline complet + dernière réponse
//! - reglages.rs  : décimales, gardes-fous
//! - erreur.rs    : erreurs classées

pub mod erreur;
pub mod espace;
pub mod eval;
pub mod expr;
pub mod filtre;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod normalise;
pub mod reglages;
pub mod rpn;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::EvalError;
pub use eval::{Demarche, Evaluateur};
pub use lecture::format_nombre;
pub use normalise::normalise;
pub use reglages::Reglages;
