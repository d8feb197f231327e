//! Noyau : évaluation (pipeline réel)
//!
//! précontrôle -> jetons -> RPN -> structure -> pile de Reel -> affichage
//!
//! `validate` et `evaluate` partagent exactement la même analyse :
//! une entrée refusée par l’un pour la forme l’est par l’autre, avec la même erreur.

use log::{debug, trace};

use super::config::{Associativite, ConfigCalcul, ModeAngle};
use super::decimal::{Contexte, Reel};
use super::erreur::{ErreurCalc, ResultatCalc};
use super::format::{formate, forme_exacte};
use super::jetons::{format_jetons, tokenize, GenreJeton, Jeton};
use super::priorites::NEG;
use super::rpn::{to_rpn, verifie_structure};
use super::validation::precontrole;

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    /// Forme exacte du résultat (1/3, π/2, …) quand elle existe.
    pub exact: Option<String>,
    /// Étapes exactes reconnues (une par ligne).
    pub preuve: String,
}

#[derive(Clone, Debug)]
pub struct Evaluation {
    pub valeur: Reel,
    pub affichage: String,
    pub demarche: Demarche,
}

struct Analyse {
    jetons: Vec<Jeton>,
    rpn: Vec<Jeton>,
}

fn analyse(expr: &str, assoc: Associativite) -> ResultatCalc<Analyse> {
    precontrole(expr)?;

    let jetons = tokenize(expr)?;
    debug!("jetons: {}", format_jetons(&jetons));

    let rpn = to_rpn(&jetons, assoc)?;
    verifie_structure(&rpn)?;

    Ok(Analyse { jetons, rpn })
}

/// Contrôle de forme complet, sans aucun calcul.
pub fn validate(expr: &str) -> ResultatCalc<()> {
    analyse(expr, Associativite::default()).map(|_| ())
}

/// Évalue avec la configuration par défaut ; renvoie le texte affiché.
pub fn evaluate(expr: &str, mode: ModeAngle) -> ResultatCalc<String> {
    evaluate_avec(expr, mode, &ConfigCalcul::default())
}

pub fn evaluate_avec(expr: &str, mode: ModeAngle, cfg: &ConfigCalcul) -> ResultatCalc<String> {
    eval_expression(expr, mode, cfg).map(|e| e.affichage)
}

/// API publique : évalue une expression et retourne
/// - la valeur (pleine précision)
/// - l’affichage (arrondi)
/// - la démarche (jetons, rpn, forme exacte, preuve)
pub fn eval_expression(
    expr: &str,
    mode: ModeAngle,
    cfg: &ConfigCalcul,
) -> ResultatCalc<Evaluation> {
    let cfg = cfg.clone().normalise();

    let Analyse { jetons, rpn } = analyse(expr, cfg.associativite_puissance)?;

    let cx = Contexte::new(&cfg, mode);
    let valeur = evalue_rpn(&rpn, &cx)?;
    let valeur = cx.verifie_fini(valeur)?;

    let affichage = formate(valeur.valeur(), cfg.max_decimales, cfg.epsilon_entier);
    debug!("résultat ({mode:?}): {affichage}");

    let demarche = Demarche {
        jetons: format_jetons(&jetons),
        rpn: format_jetons(&rpn),
        exact: forme_exacte(&valeur),
        preuve: cx.preuve().join("\n"),
    };

    Ok(Evaluation {
        valeur,
        affichage,
        demarche,
    })
}

/* ------------------------ Machine à pile ------------------------ */

fn depile(pile: &mut Vec<Reel>, op: &Jeton) -> ResultatCalc<Reel> {
    pile.pop()
        .ok_or_else(|| ErreurCalc::syntaxe(format!("opérande manquant pour '{}'", op.texte)))
}

fn constante(cx: &Contexte, nom: &str) -> ResultatCalc<Reel> {
    match nom {
        "π" => Ok(cx.pi()),
        "e" => Ok(cx.e()),
        _ => Err(ErreurCalc::syntaxe(format!("constante inconnue: '{nom}'"))),
    }
}

fn binaire(cx: &Contexte, op: &str, a: &Reel, b: &Reel) -> ResultatCalc<Reel> {
    match op {
        "+" => cx.ajoute(a, b),
        "-" => cx.soustrait(a, b),
        "×" => cx.multiplie(a, b),
        "÷" => cx.divise(a, b),
        "^" => cx.puissance(a, b),
        "mod" => cx.modulo(a, b),
        _ => Err(ErreurCalc::syntaxe(format!("opérateur binaire inconnu: '{op}'"))),
    }
}

fn unaire(cx: &Contexte, op: &str, a: &Reel) -> ResultatCalc<Reel> {
    match op {
        NEG => Ok(cx.oppose(a)),
        "%" => cx.pourcent(a),
        "!" => cx.factorielle(a),
        "√" => cx.racine_carree(a),
        "sin" => cx.sin(a),
        "cos" => cx.cos(a),
        "tan" => cx.tan(a),
        "asin" => cx.asin(a),
        "acos" => cx.acos(a),
        "atan" => cx.atan(a),
        "log" => cx.log10(a),
        "ln" => cx.ln(a),
        _ => Err(ErreurCalc::syntaxe(format!("opérateur unaire inconnu: '{op}'"))),
    }
}

/// Évalue une RPN sur une pile de Reel.
/// Une pile vide ou surchargée est une erreur, jamais une panique.
pub fn evalue_rpn(rpn: &[Jeton], cx: &Contexte) -> ResultatCalc<Reel> {
    let mut pile: Vec<Reel> = Vec::with_capacity(rpn.len());

    for j in rpn {
        let v = match j.genre {
            GenreJeton::Nombre => Reel::depuis_litteral(&j.texte)?,
            GenreJeton::Constante => constante(cx, &j.texte)?,
            GenreJeton::Operateur if j.arite == 2 => {
                let b = depile(&mut pile, j)?;
                let a = depile(&mut pile, j)?;
                binaire(cx, &j.texte, &a, &b)?
            }
            GenreJeton::Operateur | GenreJeton::Fonction => {
                let a = depile(&mut pile, j)?;
                unaire(cx, &j.texte, &a)?
            }
            GenreJeton::RacineDegre => {
                let a = depile(&mut pile, j)?;
                let degre = j
                    .degre_racine()
                    .ok_or_else(|| ErreurCalc::syntaxe("racine sans indice"))?;
                cx.racine_n(&Reel::depuis_litteral(degre)?, &a)?
            }
            GenreJeton::ParG | GenreJeton::ParD => {
                return Err(ErreurCalc::syntaxe("parenthèse inattendue en RPN"))
            }
        };
        trace!("{} -> {:?}", j.texte, v.forme());
        pile.push(v);
    }

    let resultat = pile
        .pop()
        .ok_or_else(|| ErreurCalc::syntaxe("expression sans valeur"))?;
    if !pile.is_empty() {
        return Err(ErreurCalc::syntaxe("opérateur manquant entre deux valeurs"));
    }
    Ok(resultat)
}
