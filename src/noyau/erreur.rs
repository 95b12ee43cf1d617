// src/noyau/erreur.rs
//
// Deux niveaux d'erreurs :
// - EvalError     : les cinq classes visibles par l'appelant (UI, CLI)
// - ErreurInterne : diagnostic détaillé des étapes jetons/RPN/arbre,
//                   journalisé puis replié en EvalError::BadExpression.

use thiserror::Error;

/// Échec classé d'une évaluation. Terminal pour l'appel en cours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum EvalError {
    #[error("expression vide")]
    EmptyExpression,

    #[error("caractères non autorisés")]
    InvalidCharacters,

    #[error("nombre mal formé")]
    BadNumberFormat,

    #[error("résultat non fini")]
    NonFiniteResult,

    #[error("expression invalide")]
    BadExpression,
}

impl EvalError {
    /// Message unique affiché par la calculatrice, quelle que soit la classe.
    pub fn message_uniforme(&self) -> &'static str {
        "Erreur"
    }

    /// Nom court de la classe (sortie `--detail`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyExpression => "EmptyExpression",
            Self::InvalidCharacters => "InvalidCharacters",
            Self::BadNumberFormat => "BadNumberFormat",
            Self::NonFiniteResult => "NonFiniteResult",
            Self::BadExpression => "BadExpression",
        }
    }
}

/// Diagnostic interne. Ne traverse jamais l'API publique.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurInterne {
    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),

    #[error("nombre invalide: {0:?}")]
    NombreInvalide(String),

    #[error("parenthèses non fermées")]
    ParentheseNonFermee,

    #[error("parenthèse fermante sans ouvrante")]
    ParentheseInattendue,

    #[error("virgule hors d'un appel de fonction")]
    VirguleHorsAppel,

    #[error("identifiant inconnu: {0}")]
    IdentInconnu(String),

    #[error("{nom} attend {attendu} argument(s), reçu {recu}")]
    Arite {
        nom: String,
        attendu: usize,
        recu: usize,
    },

    #[error("{0} n'est pas une fonction")]
    PasUneFonction(String),

    #[error("{0} est une fonction, pas une valeur")]
    FonctionSansAppel(String),

    #[error("expression trop profonde (max {0})")]
    TropProfond(usize),

    #[error("expression trop longue (max {0} caractères)")]
    TropLongue(usize),

    #[error("expression invalide")]
    ExpressionInvalide,
}

impl From<ErreurInterne> for EvalError {
    fn from(_: ErreurInterne) -> Self {
        EvalError::BadExpression
    }
}
