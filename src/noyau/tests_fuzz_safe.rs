//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés :
//!   * jamais de panique, toute erreur est classée (syntaxe/validation/domaine/arithmétique)
//!   * validate échoue (forme) <=> evaluate échoue (forme), avec la même erreur
//!   * un résultat affiché se ré-évalue en lui-même

use std::time::{Duration, Instant};

use super::config::ModeAngle;
use super::{evaluate, validate};

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
    fn choix<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.pick(items.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Invariants ------------------------ */

fn mode(rng: &mut Rng) -> ModeAngle {
    if rng.coin() {
        ModeAngle::Radians
    } else {
        ModeAngle::Degres
    }
}

/// validate et evaluate doivent rendre le même verdict de forme.
fn check_validate_coherent(expr: &str, m: ModeAngle) {
    let v = validate(expr);
    let r = evaluate(expr, m);
    match (&v, &r) {
        (Err(ev), Err(er)) if ev.est_structurelle() => {
            assert_eq!(ev, er, "expr={expr:?}");
        }
        (Err(ev), _) => {
            // validate peut refuser une division littérale par zéro (arithmétique)
            assert_eq!(Some(ev), r.as_ref().err(), "expr={expr:?}");
        }
        (Ok(()), Err(er)) => {
            assert!(
                !er.est_structurelle(),
                "validate ok mais evaluate refuse la forme: expr={expr:?} err={er}"
            );
        }
        (Ok(()), Ok(_)) => {}
    }
}

/// Un résultat affiché, relu comme littéral, redonne le même affichage.
fn check_aller_retour(expr: &str, affichage: &str, m: ModeAngle) {
    let relu = evaluate(affichage, m)
        .unwrap_or_else(|e| panic!("relecture impossible: expr={expr:?} aff={affichage:?} err={e}"));
    assert_eq!(relu, affichage, "aller-retour: expr={expr:?}");
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}", rng.pick(1000)),
        3 => format!("{}.{}", rng.pick(100), rng.pick(100)),
        4 => format!(".{}", rng.pick(10)),
        _ => format!("-{}", 1 + rng.pick(20)),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(7) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => "π".to_string(),
        4 => "e".to_string(),
        5 => format!("{}π", 1 + rng.pick(6)),
        _ => format!("({})", gen_nombre(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let fonctions = ["sin", "cos", "tan", "asin", "acos", "atan", "log", "ln"];
    let binaires = ["+", "-", "×", "÷", "^", " mod ", "*", "/"];

    match rng.pick(10) {
        0 | 1 => gen_atom(rng),
        2..=4 => {
            let op = rng.choix(&binaires);
            format!(
                "({}{op}{})",
                gen_expr(rng, depth - 1),
                gen_expr(rng, depth - 1)
            )
        }
        5 | 6 => {
            let f = rng.choix(&fonctions);
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
        7 => format!("√({})", gen_expr(rng, depth - 1)),
        8 => format!("({})!", rng.pick(12)),
        _ => format!("({})%", gen_expr(rng, depth - 1)),
    }
}

/// Texte “presque valide” : morceaux de grammaire collés au hasard.
fn gen_bruit(rng: &mut Rng) -> String {
    let morceaux = [
        "1", "2", "0", ".", "5", "+", "-", "×", "÷", "^", "(", ")", "!", "%", "π", "e", "sin",
        "ln(", " mod ", "√", "3√", " ", "pi", "*", "/", "#",
    ];
    let n = 1 + rng.pick(10);
    (0..n).map(|_| rng.choix(&morceaux)).collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let m = mode(&mut rng);

        check_validate_coherent(&expr, m);

        match evaluate(&expr, m) {
            Ok(aff) => {
                check_aller_retour(&expr, &aff, m);
                seen_ok += 1;
            }
            Err(e) => {
                // les expressions générées sont bien formées : seules les erreurs
                // de calcul sont admises
                assert!(
                    !e.est_structurelle(),
                    "erreur de forme inattendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_refus = 0usize;
    for _ in 0..400 {
        budget(t0, max);

        let expr = gen_bruit(&mut rng);
        let m = mode(&mut rng);

        check_validate_coherent(&expr, m);
        if validate(&expr).is_err() {
            seen_refus += 1;
        }
    }
    assert!(seen_refus > 50, "trop peu de refus: {seen_refus}");
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    // Même seed => mêmes expressions => mêmes sorties
    let mut a = Rng::new(42);
    let mut b = Rng::new(42);

    for _ in 0..40 {
        budget(t0, max);
        let ea = gen_expr(&mut a, 3);
        let eb = gen_expr(&mut b, 3);
        assert_eq!(ea, eb);
        assert_eq!(evaluate(&ea, ModeAngle::Radians), evaluate(&eb, ModeAngle::Radians));
    }
}

#[test]
fn fuzz_safe_angles_speciaux_degres() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xDE6_u64);

    for _ in 0..120 {
        budget(t0, max);

        // multiples de 30° et 45° : sin/cos rationnels quand la table les connaît
        let angle = if rng.coin() {
            30 * rng.pick(25) as i64 - 360
        } else {
            45 * rng.pick(17) as i64 - 360
        };
        for f in ["sin", "cos"] {
            let expr = format!("{f}({angle})");
            let r = evaluate(&expr, ModeAngle::Degres)
                .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
            let v: f64 = r.parse().unwrap_or_else(|_| panic!("expr={expr:?} aff={r:?}"));
            assert!((-1.0..=1.0).contains(&v), "expr={expr:?} -> {r}");
        }
    }
}
