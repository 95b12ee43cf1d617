// src/noyau/lecture.rs
//
// Lecture du résultat : arrondi à N décimales + rendu texte.

/// Arrondit `x` à `decimales` décimales.
///
/// Passe par le rendu décimal exact de `x` (`{:.N}`), puis relit la valeur :
/// le double le plus proche du décimal arrondi. Stable : arrondir deux fois
/// donne le même double. `-0` est ramené à `0`.
pub fn arrondir(x: f64, decimales: u32) -> f64 {
    if !x.is_finite() {
        return x;
    }

    let txt = format!("{:.*}", decimales as usize, x);
    let r = txt.parse::<f64>().unwrap_or(x);

    if r == 0.0 {
        0.0
    } else {
        r
    }
}

/// Rendu pour l'affichage : plus courte forme décimale qui relit le même double.
/// (jamais de notation exponentielle)
pub fn format_nombre(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    format!("{x}")
}

/// Littéral substitué à `ANS` : parenthésé si négatif (`ANS^2` avec ANS=-3 => 9).
pub fn litteral_ans(x: Option<f64>) -> String {
    match x {
        None => "0".to_string(),
        Some(v) if v < 0.0 => format!("({})", format_nombre(v)),
        Some(v) => format_nombre(v),
    }
}
