// src/noyau/expr.rs
//
// Arbre d'expression (flottant) + évaluation dans l'espace de noms fixe.
// Aucun nom hors de l'espace n'est résolu ; pas d'affectation, pas d'instruction.

use super::erreur::ErreurInterne;
use super::espace::EspaceNoms;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Const(String),

    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Appel(String, Vec<Expr>),
}

impl Expr {
    /// Évalue l'arbre. Le résultat peut être infini ou NaN :
    /// le contrat « résultat fini » est vérifié par l'appelant.
    pub fn eval(&self, espace: &EspaceNoms) -> Result<f64, ErreurInterne> {
        use Expr::*;

        Ok(match self {
            Num(v) => *v,
            Const(nom) => espace.constante(nom)?,

            Neg(x) => -x.eval(espace)?,
            Add(a, b) => a.eval(espace)? + b.eval(espace)?,
            Sub(a, b) => a.eval(espace)? - b.eval(espace)?,
            Mul(a, b) => a.eval(espace)? * b.eval(espace)?,
            // IEEE : x/0 => ±inf ou NaN, rattrapé par le contrôle de finitude
            Div(a, b) => a.eval(espace)? / b.eval(espace)?,
            Pow(a, b) => a.eval(espace)?.powf(b.eval(espace)?),

            Appel(nom, args) => {
                let valeurs = args
                    .iter()
                    .map(|a| a.eval(espace))
                    .collect::<Result<Vec<_>, _>>()?;
                espace.appeler(nom, &valeurs)?
            }
        })
    }
}
