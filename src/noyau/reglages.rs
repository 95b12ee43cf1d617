//! Réglages du noyau (sans état, sans évaluation).
//!
//! Bornes fixes comme pour la précision de l'UI : on clampe, on ne refuse pas.

/// Décimales conservées sur chaque résultat (et donc sur ANS).
pub const DECIMALES_DEFAUT: u32 = 12;

/// Au-delà, `f64` n'a plus de chiffres significatifs à offrir.
pub const DECIMALES_MAX: u32 = 15;

/// Garde-fou : profondeur maximale de l'arbre d'expression.
pub const PROFONDEUR_DEFAUT: usize = 256;

/// Garde-fou : longueur maximale de la forme canonique (en caractères).
pub const LONGUEUR_DEFAUT: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub decimales: u32,
    pub profondeur_max: usize,
    pub longueur_max: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            decimales: DECIMALES_DEFAUT,
            profondeur_max: PROFONDEUR_DEFAUT,
            longueur_max: LONGUEUR_DEFAUT,
        }
    }
}

impl Reglages {
    pub fn avec_decimales(mut self, decimales: u32) -> Self {
        self.decimales = decimales.min(DECIMALES_MAX);
        self
    }

    pub fn avec_profondeur_max(mut self, profondeur: usize) -> Self {
        self.profondeur_max = profondeur.max(1);
        self
    }

    pub fn avec_longueur_max(mut self, longueur: usize) -> Self {
        self.longueur_max = longueur.max(1);
        self
    }
}
