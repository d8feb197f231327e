// src/noyau/validation.rs
//
// Pré-contrôle sur le texte brut : diagnostics rapides et lisibles,
// avant toute tokenisation. Ne calcule rien.

use super::erreur::{ErreurCalc, ResultatCalc};
use super::priorites::est_fonction;

/// Symboles d’opérateurs binaires (factorielle et pourcentage exclus).
const BINAIRES: [char; 7] = ['+', '-', '×', '÷', '^', '*', '/'];

fn est_binaire(c: char) -> bool {
    BINAIRES.contains(&c)
}

/// Caractère non blanc qui précède `i`.
fn precedent(chars: &[char], i: usize) -> Option<char> {
    chars[..i].iter().rev().copied().find(|c| !c.is_whitespace())
}

/// Indice du caractère non blanc qui suit `i` (inclus).
fn suivant(chars: &[char], i: usize) -> Option<usize> {
    (i..chars.len()).find(|&k| !chars[k].is_whitespace())
}

/// Un '-' est un signe (collé au nombre) s’il est suivi d’un chiffre ou d’un point
/// et précédé de rien, de '(' ou d’un opérateur binaire.
fn est_signe(chars: &[char], i: usize) -> bool {
    if chars[i] != '-' {
        return false;
    }
    let nombre_suit = matches!(chars.get(i + 1), Some(c) if c.is_ascii_digit() || *c == '.');
    let avant_ok = match precedent(chars, i) {
        None => true,
        Some(p) => p == '(' || est_binaire(p),
    };
    nombre_suit && avant_ok
}

/// Mots alphabétiques (minuscules) avec leur position de début et de fin.
fn mots(chars: &[char]) -> Vec<(usize, usize, String)> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_alphabetic() && chars[i] != 'π' {
            let start = i;
            while i < chars.len() && chars[i].is_alphabetic() && chars[i] != 'π' {
                i += 1;
            }
            let w: String = chars[start..i].iter().collect();
            out.push((start, i, w.to_lowercase()));
        } else {
            i += 1;
        }
    }
    out
}

fn controle_constantes(chars: &[char], mots: &[(usize, usize, String)]) -> ResultatCalc<()> {
    let message = "constante (π ou e) suivie d’un chiffre : insérez un ×, par exemple π×123";
    for (i, c) in chars.iter().enumerate() {
        if *c == 'π' && matches!(chars.get(i + 1), Some(d) if d.is_ascii_digit()) {
            return Err(ErreurCalc::validation(message));
        }
    }
    for (_, fin, w) in mots {
        if (w == "e" || w == "pi") && matches!(chars.get(*fin), Some(d) if d.is_ascii_digit()) {
            return Err(ErreurCalc::validation(message));
        }
    }
    Ok(())
}

fn controle_parentheses(chars: &[char]) -> ResultatCalc<()> {
    let mut profondeur: i64 = 0;
    for c in chars {
        match c {
            '(' => profondeur += 1,
            ')' => profondeur -= 1,
            _ => {}
        }
        if profondeur < 0 {
            return Err(ErreurCalc::validation("trop de parenthèses fermantes"));
        }
    }
    if profondeur > 0 {
        return Err(ErreurCalc::validation("trop de parenthèses ouvrantes"));
    }
    Ok(())
}

fn controle_operateurs(chars: &[char], mots: &[(usize, usize, String)]) -> ResultatCalc<()> {
    for (i, c) in chars.iter().enumerate() {
        if !est_binaire(*c) || est_signe(chars, i) {
            continue;
        }
        if matches!(precedent(chars, i), Some(p) if est_binaire(p)) {
            return Err(ErreurCalc::validation("opérateurs consécutifs"));
        }
    }

    let fin_operateur = match precedent(chars, chars.len()) {
        Some(c) if est_binaire(c) => true,
        Some(_) => mots.last().is_some_and(|(_, fin, w)| {
            w == "mod" && chars[*fin..].iter().all(|c| c.is_whitespace())
        }),
        None => false,
    };
    if fin_operateur {
        return Err(ErreurCalc::validation("se termine par un opérateur"));
    }
    Ok(())
}

fn controle_factorielle(chars: &[char]) -> ResultatCalc<()> {
    for (i, c) in chars.iter().enumerate() {
        if *c != '!' {
            continue;
        }
        let ok = matches!(precedent(chars, i), Some(p) if p.is_ascii_digit() || p == ')');
        if !ok {
            return Err(ErreurCalc::validation(
                "factorielle mal placée : ! doit suivre un chiffre ou ')'",
            ));
        }
    }
    Ok(())
}

/// Zéro littéral : '0' non suivi d’un chiffre ni d’un point.
fn zero_litteral(chars: &[char], i: usize) -> bool {
    chars.get(i) == Some(&'0')
        && !matches!(chars.get(i + 1), Some(c) if c.is_ascii_digit() || *c == '.')
}

fn controle_division_zero(chars: &[char], mots: &[(usize, usize, String)]) -> ResultatCalc<()> {
    for (i, c) in chars.iter().enumerate() {
        if (*c == '÷' || *c == '/') && suivant(chars, i + 1).is_some_and(|k| zero_litteral(chars, k))
        {
            return Err(ErreurCalc::arithmetique("division par zéro"));
        }
    }
    for (_, fin, w) in mots {
        if w == "mod" && suivant(chars, *fin).is_some_and(|k| zero_litteral(chars, k)) {
            return Err(ErreurCalc::arithmetique("modulo par zéro"));
        }
    }
    Ok(())
}

fn controle_fonctions(chars: &[char], mots: &[(usize, usize, String)]) -> ResultatCalc<()> {
    for (_, fin, w) in mots {
        if !est_fonction(w) {
            continue;
        }
        let parenthese = suivant(chars, *fin).is_some_and(|k| chars[k] == '(');
        if !parenthese {
            return Err(ErreurCalc::validation(format!(
                "fonction sans parenthèse : {w} doit être suivie de '(', par exemple {w}(90)"
            )));
        }
    }
    Ok(())
}

fn controle_points(chars: &[char]) -> ResultatCalc<()> {
    let mut points = 0;
    for c in chars {
        if *c == '.' {
            points += 1;
            if points > 1 {
                return Err(ErreurCalc::validation("plusieurs points décimaux dans un nombre"));
            }
        } else if !c.is_ascii_digit() {
            points = 0;
        }
    }
    Ok(())
}

/// Pré-contrôle complet du texte brut.
///
/// Ordre : vide, constantes, parenthèses, opérateurs, factorielle,
/// division par zéro littérale, fonctions, points décimaux.
pub fn precontrole(expr: &str) -> ResultatCalc<()> {
    if expr.trim().is_empty() {
        return Err(ErreurCalc::validation("Entrée vide"));
    }

    let chars: Vec<char> = expr.chars().collect();
    let mots = mots(&chars);

    controle_constantes(&chars, &mots)?;
    controle_parentheses(&chars)?;
    controle_operateurs(&chars, &mots)?;
    controle_factorielle(&chars)?;
    controle_division_zero(&chars, &mots)?;
    controle_fonctions(&chars, &mots)?;
    controle_points(&chars)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::erreur::GenreErreur;

    fn msg(expr: &str) -> String {
        precontrole(expr)
            .expect_err(&format!("{expr:?} devrait être refusé"))
            .message()
            .to_string()
    }

    #[test]
    fn expressions_valides() {
        for e in [
            "2+3",
            "(2+3)×4",
            "2+-5",
            "5!-3",
            "20%-1",
            "(-5)",
            "-5+2",
            "sin (30)",
            "10÷0.5",
            "10÷05",
            "5 mod 3",
            "3√8",
            "(3)!",
            "2--5",
        ] {
            assert!(precontrole(e).is_ok(), "{e:?} devrait passer");
        }
    }

    #[test]
    fn parentheses_messages_distincts() {
        let ouv = msg("(2+3");
        let fer = msg("2+3)");
        assert_ne!(ouv, fer);
        assert!(ouv.contains("ouvrantes"));
        assert!(fer.contains("fermantes"));
        assert!(msg(")(").contains("fermantes"));
    }

    #[test]
    fn operateurs() {
        assert!(msg("2++3").contains("consécutifs"));
        assert!(msg("2×÷3").contains("consécutifs"));
        assert!(msg("2+--5").contains("consécutifs"));
        assert!(msg("2+").contains("termine"));
        assert!(msg("5 mod ").contains("termine"));
    }

    #[test]
    fn factorielle_placement() {
        assert!(msg("!5").contains("factorielle"));
        assert!(msg("π!").contains("factorielle"));
        assert!(precontrole("(2+1)!").is_ok());
    }

    #[test]
    fn division_par_zero_litterale() {
        let e = precontrole("10÷0").unwrap_err();
        assert_eq!(e.genre(), GenreErreur::Arithmetique);
        let e = precontrole("10 / 0 + 1").unwrap_err();
        assert_eq!(e.genre(), GenreErreur::Arithmetique);
        let e = precontrole("5 mod 0").unwrap_err();
        assert_eq!(e.genre(), GenreErreur::Arithmetique);
        assert!(precontrole("10÷0.0").is_ok());
    }

    #[test]
    fn fonctions_sans_parenthese() {
        assert!(msg("sin 30").contains("sin"));
        assert!(msg("ln").contains("ln"));
        assert!(msg("2×asin").contains("asin"));
    }

    #[test]
    fn constantes_et_points() {
        assert!(msg("π123").contains('×'));
        assert!(msg("e5").contains('×'));
        assert!(msg("1.2.3").contains("points"));
        assert!(msg("   ").contains("vide"));
    }
}
