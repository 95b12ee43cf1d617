//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : un succès est toujours fini et déjà arrondi

use std::time::{Duration, Instant};

use super::erreur::EvalError;
use super::eval::Evaluateur;
use super::lecture::arrondir;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn check_succes(expr: &str, v: f64) {
    assert!(v.is_finite(), "succès non fini: expr={expr:?} v={v}");
    assert_eq!(arrondir(v, 12), v, "succès non arrondi: expr={expr:?}");
}

/* ------------------------ Génération d'expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let a = rng.pick(10);
    match rng.pick(4) {
        0 => format!("{a}.{}", rng.pick(100)),
        1 => format!("{a}%"),
        _ => format!("{a}"),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "pi".to_string(),
        1 => "e".to_string(),
        2 => "ANS".to_string(),
        _ => gen_nombre(rng),
    }
}

const UNAIRES: [&str; 14] = [
    "sin", "cos", "tan", "asin", "acos", "atan", "sqrt", "abs", "floor", "ceil", "round", "exp",
    "ln", "log10",
];

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(10) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}−{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("{}×{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({})^{}", gen_expr(rng, depth - 1), rng.pick(4)),
        6 => format!("-{}", gen_expr(rng, depth - 1)),
        7 => {
            let f = UNAIRES[rng.pick(UNAIRES.len() as u32) as usize];
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
        8 => {
            let f = if rng.coin() { "max" } else { "min" };
            let n = 1 + rng.pick(3);
            let args: Vec<String> = (0..n).map(|_| gen_expr(rng, depth - 1)).collect();
            format!("{f}({})", args.join(", "))
        }
        _ => format!("pow({}, {})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
    }
}

/// Bruit : caractères hors grammaire ou séquences cassées insérés au hasard.
fn abimer(rng: &mut Rng, s: &str) -> String {
    const BRUIT: [&str; 8] = [";", "..", ")", "(", "alert", "$", ",", "%"];
    let mut chars: Vec<char> = s.chars().collect();
    let pos = rng.pick(chars.len() as u32 + 1) as usize;
    let b = BRUIT[rng.pick(BRUIT.len() as u32) as usize];
    for (k, c) in b.chars().enumerate() {
        chars.insert(pos + k, c);
    }
    chars.into_iter().collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_invariant_fini() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let passe = |seed: u64| {
        let mut rng = Rng::new(seed);
        let ev = Evaluateur::default();
        let mut sorties = Vec::new();
        for _ in 0..150 {
            budget(t0, max);
            let expr = gen_expr(&mut rng, 4);
            let r = ev.evaluate(&expr);
            if let Ok(v) = r {
                check_succes(&expr, v);
            }
            sorties.push(r);
        }
        sorties
    };

    // Même seed => mêmes expressions => mêmes sorties (ANS compris)
    let a = passe(0xC0FFEE_u64);
    let b = passe(0xC0FFEE_u64);
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        match (x, y) {
            (Ok(u), Ok(v)) => assert_eq!(u.to_bits(), v.to_bits()),
            _ => assert_eq!(x, y),
        }
    }

    let ok = a.iter().filter(|r| r.is_ok()).count();
    let non_fini = a
        .iter()
        .filter(|r| **r == Err(EvalError::NonFiniteResult))
        .count();

    // On veut voir un mix, sinon le fuzz ne “balaye” rien.
    assert!(ok > 20, "trop peu de succès: {ok}");
    assert!(non_fini > 0, "aucun résultat non fini: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_toujours_classe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let ev = Evaluateur::default();

    let mut refus = 0usize;
    for _ in 0..150 {
        budget(t0, max);

        let propre = gen_expr(&mut rng, 3);
        let expr = abimer(&mut rng, &propre);

        // jamais de panic ; soit un succès fini, soit une des cinq classes
        match ev.evaluate(&expr) {
            Ok(v) => check_succes(&expr, v),
            Err(EvalError::EmptyExpression) => panic!("vide inattendu: {expr:?}"),
            Err(_) => refus += 1,
        }
    }
    assert!(refus > 50, "trop peu de refus: {refus}");
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 64 termes : profondeur 7, longueur < 1024
    let expr = somme_balancee("1/2", 64);
    budget(t0, max);

    let v = Evaluateur::default()
        .evaluate(&expr)
        .unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(v, 32.0);
}

#[test]
fn fuzz_safe_imbrication_profonde_refusee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let ev = Evaluateur::default();

    // parenthèses seules : pas de profondeur d'arbre
    let parens = format!("{}1{}", "(".repeat(400), ")".repeat(400));
    assert_eq!(ev.evaluate(&parens), Ok(1.0));

    // appels imbriqués : refus propre, pas de débordement de pile
    let appels = format!("{}1{}", "abs(".repeat(300), ")".repeat(300));
    assert_eq!(ev.evaluate(&appels), Err(EvalError::BadExpression));

    let negations = "-".repeat(1000) + "1";
    assert_eq!(ev.evaluate(&negations), Err(EvalError::BadExpression));

    budget(t0, max);
}
