//! Noyau : évaluation (pipeline réel)
//!
//! brut -> normalise -> longueur -> liste blanche -> ".." -> ANS -> jetons
//!      -> RPN -> Expr -> évaluation (espace fixe) -> finitude -> arrondi
//!      -> nouvelle ANS
//!
//! Toute erreur sort classée (`EvalError`) ; le diagnostic interne est
//! journalisé puis jeté.

use std::sync::{Mutex, MutexGuard, PoisonError};

use lazy_static::lazy_static;
use regex::Regex;

use super::erreur::{ErreurInterne, EvalError};
use super::espace::EspaceNoms;
use super::filtre::{verifie_caracteres, verifie_nombres};
use super::format::{format_expr, format_rpn, format_tokens};
use super::jetons::tokenize;
use super::lecture::{arrondir, litteral_ans};
use super::normalise::normalise;
use super::reglages::Reglages;
use super::rpn::{from_rpn, to_rpn};

lazy_static! {
    static ref MOT_ANS: Regex = Regex::new(r"\bANS\b").unwrap();
}

#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub canonique: String,
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

/// Évaluateur avec sa cellule « dernière réponse ».
///
/// La cellule est verrouillée pendant toute l'évaluation : lecture d'ANS,
/// calcul et écriture forment un bloc, même partagé entre threads.
#[derive(Debug, Default)]
pub struct Evaluateur {
    reglages: Reglages,
    derniere: Mutex<Option<f64>>,
}

impl Evaluateur {
    pub fn new(reglages: Reglages) -> Self {
        Self {
            reglages,
            derniere: Mutex::new(None),
        }
    }

    fn cellule(&self) -> MutexGuard<'_, Option<f64>> {
        // la valeur (un f64) reste cohérente même après un panic ailleurs
        self.derniere.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Dernière réponse, `None` avant le premier succès.
    pub fn last_answer(&self) -> Option<f64> {
        *self.cellule()
    }

    /// Une valeur non finie est refusée et la cellule reste intacte.
    pub fn set_last_answer(&self, valeur: f64) -> Result<(), EvalError> {
        if !valeur.is_finite() {
            return Err(EvalError::NonFiniteResult);
        }
        *self.cellule() = Some(arrondir(valeur, self.reglages.decimales));
        Ok(())
    }

    pub fn clear_last_answer(&self) {
        *self.cellule() = None;
    }

    /// Bouton « réponse précédente » : ajoute la valeur d'ANS à la saisie,
    /// sous la même forme que la substitution (négatif entre parenthèses).
    /// Après une valeur (`7`, `sin(1)`), un `*` est intercalé.
    /// Sans réponse précédente, la saisie est laissée telle quelle.
    pub fn inserer_ans(&self, entree: &mut String) {
        let Some(v) = self.last_answer() else {
            return;
        };
        let apres_valeur = entree
            .trim_end()
            .ends_with(|c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ')' | '%'));
        if apres_valeur {
            entree.push('*');
        }
        entree.push_str(&litteral_ans(Some(v)));
    }

    /// Évalue une expression utilisateur ; en cas de succès le résultat
    /// arrondi devient la nouvelle dernière réponse.
    pub fn evaluate(&self, raw: &str) -> Result<f64, EvalError> {
        self.evaluate_detaille(raw).map(|(v, _)| v)
    }

    /// Comme `evaluate`, avec la démarche (forme canonique, jetons, RPN, arbre).
    pub fn evaluate_detaille(&self, raw: &str) -> Result<(f64, Demarche), EvalError> {
        let mut derniere = self.cellule();

        let resultat = self.pipeline(raw, *derniere);
        match &resultat {
            Ok((v, _)) => {
                *derniere = Some(*v);
                tracing::debug!(entree = raw, valeur = *v, "évaluation réussie");
            }
            Err(e) => tracing::debug!(entree = raw, erreur = %e, "évaluation rejetée"),
        }
        resultat
    }

    fn pipeline(&self, raw: &str, derniere: Option<f64>) -> Result<(f64, Demarche), EvalError> {
        // 1) Entrée vide
        if raw.trim().is_empty() {
            return Err(EvalError::EmptyExpression);
        }

        // 2) Normalisation
        let canonique = normalise(raw);
        tracing::debug!(entree = raw, %canonique, "forme canonique");

        // 3) Longueur, mesurée avant que ANS ne devienne des chiffres
        if canonique.chars().count() > self.reglages.longueur_max {
            let diagnostic = ErreurInterne::TropLongue(self.reglages.longueur_max);
            tracing::debug!(%diagnostic, "expression refusée");
            return Err(EvalError::BadExpression);
        }

        // 4) Liste blanche, ".."
        verifie_caracteres(&canonique)?;
        verifie_nombres(&canonique)?;

        // 5) ANS -> littéral
        let source = MOT_ANS.replace_all(&canonique, litteral_ans(derniere).as_str());

        // 6) Grammaire + espace fixe
        let (brut, mut demarche) = self.calcul(&source).map_err(|e| {
            tracing::debug!(diagnostic = %e, "expression refusée");
            EvalError::from(e)
        })?;
        demarche.canonique = canonique;

        // 7) Contrat de finitude
        if !brut.is_finite() {
            return Err(EvalError::NonFiniteResult);
        }

        // 8) Arrondi
        Ok((arrondir(brut, self.reglages.decimales), demarche))
    }

    fn calcul(&self, source: &str) -> Result<(f64, Demarche), ErreurInterne> {
        let jetons = tokenize(source)?;
        let rpn = to_rpn(&jetons)?;
        tracing::trace!(jetons = %format_tokens(&jetons), rpn = %format_rpn(&rpn), "analyse");

        let arbre = from_rpn(&rpn, self.reglages.profondeur_max)?;
        let valeur = arbre.eval(EspaceNoms::standard())?;

        let demarche = Demarche {
            canonique: String::new(),
            jetons: format_tokens(&jetons),
            rpn: format_rpn(&rpn),
            arbre: format_expr(&arbre),
        };
        Ok((valeur, demarche))
    }
}
