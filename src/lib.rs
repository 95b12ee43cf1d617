//! Calculatrice : normalisation + évaluation sûre d'expressions saisies,
//! avec rappel de la dernière réponse (`ANS`).
//!
//! ```
//! use calculatrice_ans::{Evaluateur, EvalError};
//!
//! let calc = Evaluateur::default();
//! assert_eq!(calc.evaluate("(2+1)^3"), Ok(27.0));
//! assert_eq!(calc.evaluate("ANS/3"), Ok(9.0));
//! assert_eq!(calc.evaluate("1/0"), Err(EvalError::NonFiniteResult));
//! ```

pub mod noyau;

pub use noyau::{format_nombre, Demarche, EvalError, Evaluateur, Reglages};
