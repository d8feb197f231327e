//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//! - précision par défaut (32 chiffres + garde)
//!
//! Notes :
//! - Les angles spéciaux ne sont reconnus que sous forme exacte (c·π en radians,
//!   rationnel en degrés). "π÷4 + 2π" reste reconnu car c·π + c'·π reste c''·π.
//! - Une valeur approchée (sin(1), √2…) est comparée via l’affichage à 10 décimales.

use std::time::{Duration, Instant};

use super::config::{Associativite, ConfigCalcul, ModeAngle};
use super::erreur::GenreErreur;
use super::{evaluate, evaluate_avec, validate};

fn eval_ok(expr: &str, mode: ModeAngle) -> String {
    evaluate(expr, mode).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_eval_eq(expr: &str, attendu: &str) {
    assert_eq!(eval_ok(expr, ModeAngle::Radians), attendu, "expr={expr:?}");
}

fn assert_genre(expr: &str, mode: ModeAngle, genre: GenreErreur) {
    let e = evaluate(expr, mode).expect_err(&format!("{expr:?} devrait échouer"));
    assert_eq!(e.genre(), genre, "expr={expr:?} err={e}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Propriétés de référence ------------------------ */

#[test]
fn sci_priorites() {
    assert_eval_eq("2+3", "5");
    assert_eval_eq("2+3×4", "14");
    assert_eval_eq("(2+3)×4", "20");
    assert_eval_eq("2×3+4×5", "26");
    assert_eval_eq("100-10×2^3", "20");
    assert_eval_eq("2×5!", "240");
}

#[test]
fn sci_erreurs_de_reference() {
    assert_genre("10÷0", ModeAngle::Radians, GenreErreur::Arithmetique);
    assert_genre("5 mod 0", ModeAngle::Radians, GenreErreur::Arithmetique);
    assert_genre("(-1)!", ModeAngle::Radians, GenreErreur::Domaine);
    assert_eval_eq("5!", "120");
}

#[test]
fn sci_trig_modes() {
    assert_eq!(eval_ok("sin(π÷2)", ModeAngle::Radians), "1");
    assert_eq!(eval_ok("sin(90)", ModeAngle::Degres), "1");
    assert_eq!(eval_ok("ln(e)", ModeAngle::Radians), "1");
}

#[test]
fn sci_parentheses_messages_distincts() {
    let a = validate("(2+3").unwrap_err();
    let b = validate("2+3)").unwrap_err();
    assert_eq!(a.genre(), GenreErreur::Validation);
    assert_eq!(b.genre(), GenreErreur::Validation);
    assert_ne!(a.message(), b.message());
}

#[test]
fn sci_associativite_puissance() {
    let droite = ConfigCalcul::default();
    let gauche = ConfigCalcul {
        associativite_puissance: Associativite::Gauche,
        ..ConfigCalcul::default()
    };
    assert_eq!(evaluate_avec("2^3^2", ModeAngle::Radians, &droite).unwrap(), "512");
    assert_eq!(evaluate_avec("2^3^2", ModeAngle::Radians, &gauche).unwrap(), "64");
    // sans chaîne, aucune différence
    assert_eq!(evaluate_avec("(2^3)^2", ModeAngle::Radians, &droite).unwrap(), "64");
    assert_eq!(evaluate_avec("2^(3^2)", ModeAngle::Radians, &gauche).unwrap(), "512");
}

#[test]
fn sci_constantes_adjacentes() {
    let e = evaluate("π123", ModeAngle::Radians).unwrap_err();
    assert!(e.est_structurelle());
    assert!(e.message().contains('×'));
    assert_eval_eq("2π", "6.2831853072");
    assert_eval_eq("π×123", "386.4158963915");
}

/* ------------------------ Identités (valeurs approchées) ------------------------ */

#[test]
fn sci_identites_symetrie() {
    // sin(-x) = -sin(x)
    assert_eval_eq("sin(-1)", "-0.8414709848");
    assert_eval_eq("-sin(1)", "-0.8414709848");
    // cos(-x) = cos(x)
    assert_eq!(eval_ok("cos(-2)", ModeAngle::Radians), eval_ok("cos(2)", ModeAngle::Radians));
    // sin² + cos² = 1
    assert_eval_eq("sin(1)^2+cos(1)^2", "1");
    assert_eval_eq("sin(0.3)^2+cos(0.3)^2", "1");
}

#[test]
fn sci_periodicite() {
    let base = eval_ok("sin(1)", ModeAngle::Radians);
    assert_eq!(eval_ok("sin(1+2π)", ModeAngle::Radians), base);
    assert_eq!(eval_ok("sin(1-6π)", ModeAngle::Radians), base);
    // angle exact : π/6 + 2π reste un multiple exact de π
    assert_eval_eq("sin(π÷6+2π)", "0.5");
    assert_eq!(eval_ok("cos(420)", ModeAngle::Degres), "0.5");
}

#[test]
fn sci_inverses() {
    assert_eval_eq("sin(asin(0.3))", "0.3");
    assert_eval_eq("tan(atan(7))", "7");
    assert_eq!(eval_ok("acos(-1)", ModeAngle::Degres), "180");
    assert_eq!(eval_ok("atan(1)", ModeAngle::Degres), "45");
    assert_eq!(eval_ok("asin(0.3)", ModeAngle::Degres), "17.4576031237");
}

#[test]
fn sci_logarithmes() {
    assert_eval_eq("ln(e^3)", "3");
    assert_eval_eq("e^ln(5)", "5");
    assert_eval_eq("log(10^12)", "12");
    assert_eval_eq("log(2)+log(5)", "1");
    assert_eval_eq("ln(2)", "0.6931471806");
}

/* ------------------------ Aller-retour d’affichage ------------------------ */

#[test]
fn sci_aller_retour_affichage() {
    for expr in [
        "1÷3",
        "-2÷3",
        "√2",
        "π",
        "e",
        "2^0.5",
        "sin(1)",
        "10÷4",
        "-7",
        "123456789×987654321",
        "0.1+0.2",
        "1÷7×1000000",
    ] {
        let r = eval_ok(expr, ModeAngle::Radians);
        let r2 = eval_ok(&r, ModeAngle::Radians);
        assert_eq!(r, r2, "aller-retour: {expr:?} -> {r:?} -> {r2:?}");
    }
}

/* ------------------------ Limites ------------------------ */

#[test]
fn sci_plafond_factorielle() {
    let r = eval_ok("170!", ModeAngle::Radians);
    assert_eq!(r.len(), 307);
    assert!(r.starts_with("72574156153079989673967282111292631147169916812964513765435"));
    assert_genre("171!", ModeAngle::Radians, GenreErreur::Domaine);

    let petit = ConfigCalcul {
        plafond_factorielle: 10,
        ..ConfigCalcul::default()
    };
    assert_eq!(evaluate_avec("10!", ModeAngle::Radians, &petit).unwrap(), "3628800");
    let e = evaluate_avec("11!", ModeAngle::Radians, &petit).unwrap_err();
    assert_eq!(e.genre(), GenreErreur::Domaine);
}

#[test]
fn sci_depassement() {
    assert!(evaluate("10^999", ModeAngle::Radians).is_ok());
    assert_genre("10^1000", ModeAngle::Radians, GenreErreur::Arithmetique);
    assert_genre("e^5000", ModeAngle::Radians, GenreErreur::Arithmetique);
    assert_genre("2^1000000", ModeAngle::Radians, GenreErreur::Arithmetique);
    assert_genre("9^9^9", ModeAngle::Radians, GenreErreur::Arithmetique);
    // très petit : affiché 0, pas d’erreur
    assert_eval_eq("0.5^3000", "0");
    assert_eval_eq("e^(-5000)", "0");
}

#[test]
fn sci_precision_relative_petites_valeurs() {
    // chiffres significatifs : une valeur approchée minuscule n’est pas écrasée à 0
    assert_eval_eq("√2÷10^45×10^45", "1.4142135624");
    assert_eval_eq("e÷10^50×10^50", "2.7182818285");
    assert_eval_eq("sin(2÷10^50)×10^50", "2");
    assert_eval_eq("√(2÷10^50)×10^25", "1.4142135624");
    assert_eval_eq("ln(2)÷10^43×10^43", "0.6931471806");
    assert_eval_eq("sin(3÷10^15)×10^15", "3");
    assert_eval_eq("atan(5÷10^30)×10^30", "5");
    assert_eval_eq("asin(3÷10^40)×10^40", "3");
    assert_eval_eq("ln(1.00000000000000000001)×10^20", "1");
    assert_eval_eq("e^(-200.5)×e^200.5", "1");
    assert_eval_eq("√(2×10^60)÷10^30", "1.4142135624");
    assert_eq!(eval_ok("sin(1÷10^30)×10^30", ModeAngle::Degres), "0.0174532925");
}

#[test]
fn sci_tan_cosinus_numeriquement_nul() {
    // angle approché (non exact) : la règle |cos| < 1e-15 s’applique
    assert_genre("tan(1.5707963267948966192313216916)", ModeAngle::Radians, GenreErreur::Domaine);
    assert_genre("tan(1.570796326794896)", ModeAngle::Radians, GenreErreur::Domaine);
    // cos ≈ 9.7e-14 : au-dessus du seuil, tan ≈ 1.03e13
    let r = eval_ok("tan(1.5707963267948)", ModeAngle::Radians);
    assert_eq!(r.split('.').next().map(str::len), Some(14), "{r}");
}

#[test]
fn sci_postfixes_et_fonctions_collees() {
    // ! et % s’appliquent à l’opérande qui les précède immédiatement
    assert_eval_eq("2^3!", "64");
    assert_eval_eq("2^50%", "1.4142135624");
    // une fonction s’applique à sa parenthèse, la puissance au résultat
    assert_eq!(eval_ok("sin(30)^2", ModeAngle::Degres), "0.25");
    assert_eval_eq("2×3!", "12");
}

#[test]
fn sci_angle_radians_immense() {
    // réduction modulo 2π sur une échelle élargie
    let a = eval_ok("sin(1+2π×10^20)", ModeAngle::Radians);
    assert_eq!(a, eval_ok("sin(1)", ModeAngle::Radians));

    let large = ConfigCalcul {
        exposant_max: 2000,
        ..ConfigCalcul::default()
    };
    let e = evaluate_avec("sin(10^1200)", ModeAngle::Radians, &large).unwrap_err();
    assert_eq!(e.genre(), GenreErreur::Domaine);
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_profondeur_parentheses() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let n = 300;
    let expr = format!("{}1{}", "(".repeat(n), "+1)".repeat(n));
    budget(t0, max);

    assert_eval_eq(&expr, &(n + 1).to_string());
    budget(t0, max);
}

#[test]
fn sci_stress_taille_somme() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let expr = vec!["1÷2"; 800].join(" + ");
    budget(t0, max);

    // 800×(1/2) = 400
    assert_eval_eq(&expr, "400");
    budget(t0, max);
}

#[test]
fn sci_stress_bigint() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    // gros numérateur contrôlé (100 chiffres)
    let big = "9".repeat(100);
    let expr = format!("{big}÷7+1÷7");
    let r = eval_ok(&expr, ModeAngle::Radians);
    budget(t0, max);

    // 10^100 / 7 = 142857…(répété).285714…
    assert!(r.starts_with("142857142857"), "{r}");
    assert_eq!(r.split('.').next().map(str::len), Some(100));
}

#[test]
fn sci_stress_trig_enchainee() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut expr = "1".to_string();
    for _ in 0..12 {
        expr = format!("cos(sin({expr}))");
        budget(t0, max);
    }
    let r = eval_ok(&expr, ModeAngle::Radians);
    budget(t0, max);
    assert!(r.starts_with("0.") || r == "1", "{r}");
}
