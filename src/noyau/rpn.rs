// src/noyau/rpn.rs
//
// Shunting-yard -> RPN
// Objectif:
// - Convertir une suite de Jeton en RPN (postfix)
// - Vérifier la structure de la RPN (nombre d’opérandes) sans rien calculer
//
// Règles:
// - Fonctions / √ / n√ / moins unaire : préfixes, empilés sans dépiler.
// - ! et % : postfixes, sortis directement (ils s’appliquent à l’opérande qui vient de finir).
// - Fonctions “collées” à leur argument : sorties juste après la parenthèse fermante.
// - ^ : associativité choisie par la configuration.

use log::debug;

use super::config::Associativite;
use super::erreur::{ErreurCalc, ResultatCalc};
use super::jetons::{format_jetons, GenreJeton, Jeton};
use super::priorites::{priorite_jeton, Fixite, Priorite};

fn priorite_de(j: &Jeton) -> ResultatCalc<Priorite> {
    priorite_jeton(j).ok_or_else(|| ErreurCalc::syntaxe(format!("opérateur inconnu: '{}'", j.texte)))
}

fn est_collee(j: &Jeton) -> bool {
    matches!(j.genre, GenreJeton::Fonction | GenreJeton::RacineDegre)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: [sin, (, π, ÷, 2, )]
///   rpn:    [π, 2, ÷, sin]
pub fn to_rpn(jetons: &[Jeton], assoc: Associativite) -> ResultatCalc<Vec<Jeton>> {
    let mut out: Vec<Jeton> = Vec::with_capacity(jetons.len());
    let mut ops: Vec<Jeton> = Vec::new();

    for tok in jetons.iter().cloned() {
        match tok.genre {
            GenreJeton::Nombre | GenreJeton::Constante => out.push(tok),

            GenreJeton::ParG => ops.push(tok),

            GenreJeton::ParD => {
                // dépile jusqu’à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if top.genre == GenreJeton::ParG {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err(ErreurCalc::syntaxe("parenthèse fermante sans ouvrante"));
                }

                // si une fonction est au sommet, on la sort aussi
                if ops.last().is_some_and(est_collee) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }
            }

            GenreJeton::Operateur | GenreJeton::Fonction | GenreJeton::RacineDegre => {
                let p_tok = priorite_de(&tok)?;
                match p_tok.fixite {
                    Fixite::Prefixe => ops.push(tok),
                    Fixite::Postfixe => out.push(tok),
                    Fixite::Infixe => {
                        let droite = tok.texte == "^" && assoc == Associativite::Droite;
                        while let Some(top) = ops.last() {
                            if top.genre == GenreJeton::ParG {
                                break;
                            }
                            let p_top = priorite_de(top)?;

                            let doit_pop = if droite {
                                p_top.niveau > p_tok.niveau
                            } else {
                                p_top.niveau >= p_tok.niveau
                            };
                            if !doit_pop {
                                break;
                            }
                            if let Some(t) = ops.pop() {
                                out.push(t);
                            }
                        }
                        ops.push(tok);
                    }
                }
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if op.genre == GenreJeton::ParG {
            return Err(ErreurCalc::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    debug!("rpn: {}", format_jetons(&out));
    Ok(out)
}

/// Simule la pile d’évaluation (compte d’opérandes seulement).
/// Garantit qu’une RPN acceptée laisse exactement une valeur.
pub fn verifie_structure(rpn: &[Jeton]) -> ResultatCalc<()> {
    let mut profondeur: usize = 0;

    for j in rpn {
        if j.est_operande() {
            profondeur += 1;
            continue;
        }
        let arite = match j.genre {
            GenreJeton::ParG | GenreJeton::ParD => {
                return Err(ErreurCalc::syntaxe("parenthèse inattendue en RPN"))
            }
            _ => priorite_de(j)?.arite as usize,
        };
        if profondeur < arite {
            return Err(ErreurCalc::syntaxe(format!(
                "opérande manquant pour '{}'",
                j.texte
            )));
        }
        profondeur = profondeur - arite + 1;
    }

    match profondeur {
        1 => Ok(()),
        0 => Err(ErreurCalc::syntaxe("expression sans valeur")),
        _ => Err(ErreurCalc::syntaxe("opérateur manquant entre deux valeurs")),
    }
}
