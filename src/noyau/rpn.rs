// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> Expr
//
// Règles:
// - Ident(nom) suivi de '(' => appel de fonction (sorti après sa parenthèse
//   fermante, avec son nombre d'arguments) ; sinon => constante.
// - Moins unaire: si '-' arrive quand on n'attend PAS une valeur, on empile Neg
//   (préfixe, n'éjecte rien). Plus unaire: ignoré.
// - Précédences: + - (1) < * / (2) < Neg (3) < ^ (4)
//   ^ et Neg associatifs à droite : -2^2 = -(2^2), 2^-3 = 2^(-3), 2^3^2 = 2^(3^2).

use super::erreur::ErreurInterne;
use super::expr::Expr;
use super::jetons::Tok;

/// Élément de la notation polonaise inversée.
#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Const(String),
    Neg,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Appel { nom: String, arite: usize },
}

/// Pile d'opérateurs du shunting-yard.
#[derive(Clone, Debug)]
enum Pile {
    Op(Rpn),
    LPar { appel: bool },
    Fonction(String),
}

fn precedence(op: &Rpn) -> i32 {
    match op {
        Rpn::Plus | Rpn::Minus => 1,
        Rpn::Star | Rpn::Slash => 2,
        Rpn::Neg => 3,
        Rpn::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(op: &Rpn) -> bool {
    matches!(op, Rpn::Caret | Rpn::Neg)
}

fn binaire(t: &Tok) -> Option<Rpn> {
    match t {
        Tok::Plus => Some(Rpn::Plus),
        Tok::Minus => Some(Rpn::Minus),
        Tok::Star => Some(Rpn::Star),
        Tok::Slash => Some(Rpn::Slash),
        Tok::Caret => Some(Rpn::Caret),
        _ => None,
    }
}

/// Dépile les opérateurs vers la sortie jusqu'à '(' (exclue).
fn vider_jusqu_a_parenthese(ops: &mut Vec<Pile>, out: &mut Vec<Rpn>) {
    while let Some(Pile::Op(_)) = ops.last() {
        if let Some(Pile::Op(op)) = ops.pop() {
            out.push(op);
        }
    }
}

/// Convertit une suite de jetons en RPN.
///
/// Exemple:
///   tokens: [Ident("max"), LPar, Num(1), Comma, Num(2), RPar, Caret, Num(2)]
///   rpn:    [Num(1), Num(2), Appel{max, 2}, Num(2), Caret]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErreurInterne> {
    let mut out: Vec<Rpn> = Vec::new();
    let mut ops: Vec<Pile> = Vec::new();

    // Arguments déjà clos (par virgule) pour chaque appel ouvert.
    let mut arites: Vec<usize> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les juxtapositions.
    let mut prev_was_value = false;
    let mut prev_was_lpar = false;

    let mut iter = tokens.iter().peekable();
    while let Some(tok) = iter.next() {
        let lpar_avant = prev_was_lpar;
        prev_was_lpar = false;

        match tok {
            Tok::Num(v) => {
                if prev_was_value {
                    return Err(ErreurInterne::ExpressionInvalide);
                }
                out.push(Rpn::Num(*v));
                prev_was_value = true;
            }

            Tok::Ident(nom) => {
                if prev_was_value {
                    return Err(ErreurInterne::ExpressionInvalide);
                }
                if matches!(iter.peek(), Some(Tok::LPar)) {
                    ops.push(Pile::Fonction(nom.clone()));
                    prev_was_value = false;
                } else {
                    out.push(Rpn::Const(nom.clone()));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(ErreurInterne::ExpressionInvalide);
                }
                let appel = matches!(ops.last(), Some(Pile::Fonction(_)));
                if appel {
                    arites.push(0);
                }
                ops.push(Pile::LPar { appel });
                prev_was_value = false;
                prev_was_lpar = true;
            }

            Tok::Comma => {
                if !prev_was_value {
                    return Err(ErreurInterne::ExpressionInvalide);
                }
                vider_jusqu_a_parenthese(&mut ops, &mut out);
                match (ops.last(), arites.last_mut()) {
                    (Some(Pile::LPar { appel: true }), Some(n)) => *n += 1,
                    _ => return Err(ErreurInterne::VirguleHorsAppel),
                }
                prev_was_value = false;
            }

            Tok::RPar => {
                vider_jusqu_a_parenthese(&mut ops, &mut out);
                let appel = match ops.pop() {
                    Some(Pile::LPar { appel }) => appel,
                    _ => return Err(ErreurInterne::ParentheseInattendue),
                };

                if appel {
                    let closes = arites.pop().unwrap_or(0);
                    let arite = if lpar_avant {
                        0
                    } else if prev_was_value {
                        closes + 1
                    } else {
                        return Err(ErreurInterne::ExpressionInvalide);
                    };
                    match ops.pop() {
                        Some(Pile::Fonction(nom)) => out.push(Rpn::Appel { nom, arite }),
                        _ => return Err(ErreurInterne::ExpressionInvalide),
                    }
                } else if !prev_was_value {
                    // "()" ou "(1+)"
                    return Err(ErreurInterne::ExpressionInvalide);
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                // unaire
                if matches!(tok, Tok::Minus) {
                    ops.push(Pile::Op(Rpn::Neg));
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    return Err(ErreurInterne::ExpressionInvalide);
                }
                let op = binaire(tok).ok_or(ErreurInterne::ExpressionInvalide)?;

                // dépile tant que la précédence/associativité l'exige
                // (jamais au-delà d'une '(' ou d'une fonction)
                while let Some(Pile::Op(top)) = ops.last() {
                    let p_top = precedence(top);
                    let p_tok = precedence(&op);

                    let doit_pop = if is_right_associative(&op) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(Pile::Op(top)) = ops.pop() {
                        out.push(top);
                    }
                }

                ops.push(Pile::Op(op));
                prev_was_value = false;
            }
        }
    }

    if !prev_was_value {
        return Err(ErreurInterne::ExpressionInvalide);
    }

    // vide la pile ops
    while let Some(p) = ops.pop() {
        match p {
            Pile::Op(op) => out.push(op),
            Pile::LPar { .. } | Pile::Fonction(_) => {
                return Err(ErreurInterne::ParentheseNonFermee)
            }
        }
    }

    Ok(out)
}

/// Construit une Expr à partir d'une RPN, en bornant la profondeur de l'arbre.
pub fn from_rpn(rpn: &[Rpn], profondeur_max: usize) -> Result<Expr, ErreurInterne> {
    // (sous-arbre, profondeur)
    let mut st: Vec<(Expr, usize)> = Vec::new();

    let noeud = |e: Expr, p: usize| {
        if p > profondeur_max {
            Err(ErreurInterne::TropProfond(profondeur_max))
        } else {
            Ok((e, p))
        }
    };

    for elem in rpn.iter().cloned() {
        match elem {
            Rpn::Num(v) => st.push((Expr::Num(v), 1)),
            Rpn::Const(nom) => st.push((Expr::Const(nom), 1)),

            Rpn::Neg => {
                let (x, p) = st.pop().ok_or(ErreurInterne::ExpressionInvalide)?;
                st.push(noeud(Expr::Neg(Box::new(x)), p + 1)?);
            }

            Rpn::Plus | Rpn::Minus | Rpn::Star | Rpn::Slash | Rpn::Caret => {
                let (b, pb) = st.pop().ok_or(ErreurInterne::ExpressionInvalide)?;
                let (a, pa) = st.pop().ok_or(ErreurInterne::ExpressionInvalide)?;
                let (a, b) = (Box::new(a), Box::new(b));

                let e = match elem {
                    Rpn::Plus => Expr::Add(a, b),
                    Rpn::Minus => Expr::Sub(a, b),
                    Rpn::Star => Expr::Mul(a, b),
                    Rpn::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };
                st.push(noeud(e, pa.max(pb) + 1)?);
            }

            Rpn::Appel { nom, arite } => {
                if st.len() < arite {
                    return Err(ErreurInterne::ExpressionInvalide);
                }
                let args = st.split_off(st.len() - arite);
                let p = args.iter().map(|(_, p)| *p).max().unwrap_or(0) + 1;
                let args = args.into_iter().map(|(e, _)| e).collect();
                st.push(noeud(Expr::Appel(nom, args), p)?);
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(ErreurInterne::ExpressionInvalide),
    }
}
