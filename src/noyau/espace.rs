// src/noyau/espace.rs
//
// Espace de noms fixe : constantes + fonctions.
// Seuls ces noms (et ANS, substitué avant l'évaluation) sont résolus.

use std::collections::HashMap;
use std::f64::consts;

use lazy_static::lazy_static;

use super::erreur::ErreurInterne;

/// Jeton de la dernière réponse (substitué textuellement, jamais résolu ici).
pub const ANS: &str = "ANS";

#[derive(Clone, Copy, Debug)]
pub enum Entree {
    Constante(f64),
    Unaire(fn(f64) -> f64),
    Binaire(fn(f64, f64) -> f64),
    Variadique(fn(&[f64]) -> f64),
}

#[derive(Debug)]
pub struct EspaceNoms {
    entrees: HashMap<&'static str, Entree>,
}

lazy_static! {
    static ref STANDARD: EspaceNoms = EspaceNoms::construire();
}

fn max_variadique(args: &[f64]) -> f64 {
    if args.iter().any(|x| x.is_nan()) {
        return f64::NAN;
    }
    args.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min_variadique(args: &[f64]) -> f64 {
    if args.iter().any(|x| x.is_nan()) {
        return f64::NAN;
    }
    args.iter().copied().fold(f64::INFINITY, f64::min)
}

impl EspaceNoms {
    /// Espace standard, construit une seule fois.
    pub fn standard() -> &'static EspaceNoms {
        &STANDARD
    }

    fn construire() -> Self {
        use Entree::*;

        let entrees: [(&'static str, Entree); 20] = [
            ("PI", Constante(consts::PI)),
            ("E", Constante(consts::E)),
            ("sin", Unaire(f64::sin)),
            ("cos", Unaire(f64::cos)),
            ("tan", Unaire(f64::tan)),
            ("asin", Unaire(f64::asin)),
            ("acos", Unaire(f64::acos)),
            ("atan", Unaire(f64::atan)),
            ("sqrt", Unaire(f64::sqrt)),
            ("abs", Unaire(f64::abs)),
            ("floor", Unaire(f64::floor)),
            ("ceil", Unaire(f64::ceil)),
            ("round", Unaire(f64::round)),
            ("exp", Unaire(f64::exp)),
            ("log", Unaire(f64::ln)),
            ("ln", Unaire(f64::ln)),
            ("log10", Unaire(f64::log10)),
            ("pow", Binaire(f64::powf)),
            ("max", Variadique(max_variadique)),
            ("min", Variadique(min_variadique)),
        ];

        Self {
            entrees: entrees.into_iter().collect(),
        }
    }

    pub fn get(&self, nom: &str) -> Option<Entree> {
        self.entrees.get(nom).copied()
    }

    pub fn contient(&self, nom: &str) -> bool {
        self.entrees.contains_key(nom)
    }

    /// Nom de fonction connu (insensible à la casse), sous sa forme canonique.
    pub fn fonction_canonique(&self, mot: &str) -> Option<&'static str> {
        let lower = mot.to_ascii_lowercase();
        self.entrees
            .get_key_value(lower.as_str())
            .filter(|(_, e)| !matches!(e, Entree::Constante(_)))
            .map(|(k, _)| *k)
    }

    /// Valeur d'une constante.
    pub fn constante(&self, nom: &str) -> Result<f64, ErreurInterne> {
        match self.get(nom) {
            Some(Entree::Constante(v)) => Ok(v),
            Some(_) => Err(ErreurInterne::FonctionSansAppel(nom.to_string())),
            None => Err(ErreurInterne::IdentInconnu(nom.to_string())),
        }
    }

    /// Appel de fonction avec contrôle d'arité.
    pub fn appeler(&self, nom: &str, args: &[f64]) -> Result<f64, ErreurInterne> {
        let arite = |attendu: usize| ErreurInterne::Arite {
            nom: nom.to_string(),
            attendu,
            recu: args.len(),
        };

        match self.get(nom) {
            Some(Entree::Unaire(f)) => match args {
                [x] => Ok(f(*x)),
                _ => Err(arite(1)),
            },
            Some(Entree::Binaire(f)) => match args {
                [a, b] => Ok(f(*a, *b)),
                _ => Err(arite(2)),
            },
            Some(Entree::Variadique(f)) => Ok(f(args)),
            Some(Entree::Constante(_)) => Err(ErreurInterne::PasUneFonction(nom.to_string())),
            None => Err(ErreurInterne::IdentInconnu(nom.to_string())),
        }
    }
}
