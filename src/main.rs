// src/main.rs
//
// Calculatrice ANS : point d'entrée ligne de commande
// ---------------------------------------------------
// Appelant minimal du noyau (remplace l'interface graphique) :
// - expressions en arguments : évaluées dans l'ordre (ANS enchaîne)
// - sinon : boucle interactive sur stdin

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use calculatrice_ans::{format_nombre, Demarche, EvalError, Evaluateur, Reglages};

const TITRE_APP: &str = "Calculatrice ANS";

#[derive(Parser, Debug)]
#[command(version, about = "Évalue des expressions de calculatrice (ANS = réponse précédente)")]
struct Args {
    /// Expressions à évaluer, dans l'ordre. Sans argument : mode interactif.
    expressions: Vec<String>,

    /// Décimales conservées sur chaque résultat (max 15).
    #[arg(long, default_value_t = calculatrice_ans::noyau::reglages::DECIMALES_DEFAUT)]
    decimales: u32,

    /// Affiche la démarche (forme canonique, jetons, RPN, arbre).
    #[arg(long)]
    demarche: bool,

    /// Affiche la classe d'erreur au lieu du message unique « Erreur ».
    #[arg(long)]
    detail: bool,

    /// Journalisation détaillée (debug) sur stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn installer_journal(verbose: bool) {
    let defaut = if verbose { "debug" } else { "warn" };
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(defaut));

    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(io::stderr)
        .init();
}

struct Sortie {
    demarche: bool,
    detail: bool,
}

impl Sortie {
    fn erreur(&self, e: EvalError) -> String {
        if self.detail {
            format!("{} ({})", e.message_uniforme(), e.code())
        } else {
            e.message_uniforme().to_string()
        }
    }

    fn ecrire(
        &self,
        out: &mut impl Write,
        resultat: &Result<(f64, Demarche), EvalError>,
    ) -> io::Result<()> {
        match resultat {
            Ok((v, d)) => {
                if self.demarche {
                    writeln!(out, "  canonique : {}", d.canonique)?;
                    writeln!(out, "  jetons    : {}", d.jetons)?;
                    writeln!(out, "  rpn       : {}", d.rpn)?;
                    writeln!(out, "  arbre     : {}", d.arbre)?;
                }
                writeln!(out, "{}", format_nombre(*v))
            }
            Err(e) => writeln!(out, "{}", self.erreur(*e)),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    installer_journal(args.verbose);

    let calc = Evaluateur::new(Reglages::default().avec_decimales(args.decimales));
    let sortie = Sortie {
        demarche: args.demarche,
        detail: args.detail,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.expressions.is_empty() {
        let mut echecs = 0usize;
        for expr in &args.expressions {
            let r = calc.evaluate_detaille(expr);
            if r.is_err() {
                echecs += 1;
            }
            sortie.ecrire(&mut out, &r)?;
        }
        return Ok(if echecs == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    repl(&calc, &sortie, &mut out)?;
    Ok(ExitCode::SUCCESS)
}

fn repl(calc: &Evaluateur, sortie: &Sortie, out: &mut impl Write) -> anyhow::Result<()> {
    let stdin = io::stdin();

    writeln!(out, "{TITRE_APP}")?;
    writeln!(out, ":ans     - dernière réponse")?;
    writeln!(out, ":ans 2*  - complète la saisie avec la dernière réponse")?;
    writeln!(out, ":effacer - oublie la dernière réponse")?;
    writeln!(out, ":quit    - quitter")?;
    writeln!(out)?;

    let mut lignes = stdin.lock().lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(ligne) = lignes.next() else {
            break;
        };
        let ligne = ligne?;
        let ligne = ligne.trim();

        match ligne {
            "" => continue,
            ":quit" | ":q" => break,
            ":ans" => {
                match calc.last_answer() {
                    Some(v) => writeln!(out, "{}", format_nombre(v))?,
                    None => writeln!(out, "aucune")?,
                }
                continue;
            }
            ":effacer" => {
                calc.clear_last_answer();
                continue;
            }
            _ => {}
        }

        let r = match ligne.strip_prefix(":ans ") {
            Some(debut) => {
                let mut saisie = debut.trim().to_string();
                calc.inserer_ans(&mut saisie);
                writeln!(out, "  {saisie}")?;
                calc.evaluate_detaille(&saisie)
            }
            None => calc.evaluate_detaille(ligne),
        };
        sortie.ecrire(out, &r)?;
    }

    Ok(())
}
