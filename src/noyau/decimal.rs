// src/noyau/decimal.rs
//
// Noyau numérique décimal
// -----------------------------------------------------------
// - Reel : valeur rationnelle exacte + “forme” (rationnel, multiple de π, e, approché)
// - Contexte : précision, mode d’angle, constantes calculées à la demande
// - Opérations exactes tant que possible, sinon virgule fixe (fixe.rs)
// - Aucune opération ne panique : tout échec est une ErreurCalc

use std::cell::{OnceCell, RefCell};

use log::{debug, warn};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::config::{ConfigCalcul, ModeAngle};
use super::erreur::{ErreurCalc, ResultatCalc};
use super::fixe::{decale, div_arrondi, exposant_decimal, pow10, racine_entiere, Echelle, GARDE};
use super::trig::{
    mod_rationnel, trig_inverse_special, trig_special, TrigFn, TrigInv, TrigOutcome,
};

/// Indice maximal pour une racine exacte / Newton entier.
const RACINE_EXACTE_MAX: u32 = 64;

/// Coût maximal (en bits) d’une puissance entière exacte.
const BUDGET_BITS_PUISSANCE: u64 = 1 << 20;

/// Seuil sous lequel cos(x) est considéré nul pour tan.
const SEUIL_COS_TAN: usize = 15;

/// Au-delà de 10^REDUCTION_MAX radians, la réduction modulo 2π est refusée.
const REDUCTION_MAX: i64 = 1000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Forme {
    /// Valeur exacte.
    Rationnel,
    /// c·π exact (la valeur porte une approximation de π).
    MultiplePi(BigRational),
    /// e (approximation de e).
    E,
    /// Résultat arrondi à la précision de travail.
    Approche,
}

/// Valeur décimale du calculateur.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reel {
    val: BigRational,
    forme: Forme,
}

impl Reel {
    pub fn rationnel(val: BigRational) -> Self {
        Self {
            val,
            forme: Forme::Rationnel,
        }
    }

    pub fn entier(n: i64) -> Self {
        Self::rationnel(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn zero() -> Self {
        Self::entier(0)
    }

    /// Littéral décimal : "12", "-3.5", ".5", "5."
    pub fn depuis_litteral(txt: &str) -> ResultatCalc<Self> {
        let invalide = || ErreurCalc::syntaxe(format!("nombre invalide: '{txt}'"));

        let (negatif, corps) = match txt.strip_prefix('-') {
            Some(reste) => (true, reste),
            None => (false, txt),
        };
        let (ent, frac) = corps.split_once('.').unwrap_or((corps, ""));
        let chiffres_ok = ent.chars().chain(frac.chars()).all(|c| c.is_ascii_digit());
        if (ent.is_empty() && frac.is_empty()) || !chiffres_ok {
            return Err(invalide());
        }

        let tous = format!("{ent}{frac}");
        let n = BigInt::parse_bytes(tous.as_bytes(), 10).ok_or_else(invalide)?;
        let n = if negatif { -n } else { n };
        Ok(Self::rationnel(BigRational::new(n, pow10(frac.len()))))
    }

    pub fn valeur(&self) -> &BigRational {
        &self.val
    }

    pub fn forme(&self) -> &Forme {
        &self.forme
    }

    pub fn est_exact(&self) -> bool {
        self.forme != Forme::Approche
    }

    fn rationnel_exact(&self) -> Option<&BigRational> {
        (self.forme == Forme::Rationnel).then_some(&self.val)
    }

    fn entier_exact(&self) -> Option<&BigInt> {
        self.rationnel_exact()
            .filter(|q| q.is_integer())
            .map(|q| q.numer())
    }

    fn est_zero_exact(&self) -> bool {
        self.rationnel_exact().is_some_and(|q| q.is_zero())
    }

    fn est_un_exact(&self) -> bool {
        self.rationnel_exact().is_some_and(|q| q.is_one())
    }
}

/// Racine n-ième exacte d’un rationnel positif, si elle existe.
fn racine_exacte(q: &BigRational, n: u32) -> Option<BigRational> {
    if q.is_negative() {
        return None;
    }
    let rn = racine_entiere(q.numer(), n);
    let rd = racine_entiere(q.denom(), n);
    if &rn.pow(n) == q.numer() && &rd.pow(n) == q.denom() {
        Some(BigRational::new(rn, rd))
    } else {
        None
    }
}

/// 10^k exact -> Some(k)
fn exposant_dix(q: &BigRational) -> Option<i64> {
    let (n, signe) = if q.denom().is_one() {
        (q.numer().clone(), 1)
    } else if q.numer().is_one() {
        (q.denom().clone(), -1)
    } else {
        return None;
    };
    let dix = BigInt::from(10);
    let mut n = n;
    let mut k = 0i64;
    while n > BigInt::one() && (&n % &dix).is_zero() {
        n /= &dix;
        k += 1;
    }
    n.is_one().then_some(signe * k)
}

fn rat(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

/// Contexte d’une évaluation : précision, mode d’angle, constantes en cache.
/// Créé par appel, jamais partagé entre évaluations.
///
/// `chiffres` compte des chiffres significatifs : une valeur approchée est
/// arrondie relativement à sa grandeur, et les séries travaillent sur une
/// échelle élargie quand l’argument est petit.
pub struct Contexte<'a> {
    cfg: &'a ConfigCalcul,
    mode: ModeAngle,
    ech: Echelle,
    pi: OnceCell<BigInt>,
    e: OnceCell<BigInt>,
    ln10: OnceCell<BigInt>,
    limite: OnceCell<BigInt>,
    preuve: RefCell<Vec<String>>,
}

impl<'a> Contexte<'a> {
    pub fn new(cfg: &'a ConfigCalcul, mode: ModeAngle) -> Self {
        Self {
            cfg,
            mode,
            ech: Echelle::new(cfg.chiffres + GARDE),
            pi: OnceCell::new(),
            e: OnceCell::new(),
            ln10: OnceCell::new(),
            limite: OnceCell::new(),
            preuve: RefCell::new(Vec::new()),
        }
    }

    pub fn mode(&self) -> ModeAngle {
        self.mode
    }

    /// Étapes exactes reconnues (angles spéciaux, etc.).
    pub fn preuve(&self) -> Vec<String> {
        self.preuve.borrow().clone()
    }

    fn note(&self, ligne: String) {
        debug!("preuve: {ligne}");
        self.preuve.borrow_mut().push(ligne);
    }

    /* ------------------------ constantes ------------------------ */

    fn pi_fixe(&self) -> &BigInt {
        self.pi.get_or_init(|| self.ech.pi())
    }

    fn e_fixe(&self) -> &BigInt {
        self.e.get_or_init(|| self.ech.exp(&self.ech.un))
    }

    fn ln10_fixe(&self) -> &BigInt {
        self.ln10
            .get_or_init(|| self.ech.ln(&(&self.ech.un * BigInt::from(10))))
    }

    fn limite(&self) -> &BigInt {
        self.limite
            .get_or_init(|| pow10(self.cfg.exposant_max as usize))
    }

    fn pi_rationnel(&self) -> BigRational {
        self.ech.vers_rationnel(self.pi_fixe().clone())
    }

    fn ln10_rationnel(&self) -> BigRational {
        self.ech.vers_rationnel(self.ln10_fixe().clone())
    }

    /// π sur une échelle quelconque (cache si c’est l’échelle de travail).
    fn pi_pour(&self, ech: &Echelle) -> BigInt {
        if ech.chiffres == self.ech.chiffres {
            self.pi_fixe().clone()
        } else {
            ech.pi()
        }
    }

    pub fn pi(&self) -> Reel {
        self.multiple_pi(BigRational::one())
    }

    pub fn e(&self) -> Reel {
        Reel {
            val: self.ech.vers_rationnel(self.e_fixe().clone()),
            forme: Forme::E,
        }
    }

    /* ------------------------ précision ------------------------ */

    fn depassement(&self) -> ErreurCalc {
        ErreurCalc::arithmetique(format!(
            "résultat non fini (dépassement de 10^{})",
            self.cfg.exposant_max
        ))
    }

    /// Valeur approchée, arrondie à la précision de travail (chiffres significatifs).
    fn approche(&self, q: BigRational) -> Reel {
        Reel {
            val: self.ech.arrondi_significatif(&q),
            forme: Forme::Approche,
        }
    }

    /// x² sous la précision de travail : sin x = tan x = asin x = atan x = x,
    /// cos x = 1 et ln(1 + x) = x - x²/2.
    fn negligeable(&self, x: &BigRational) -> bool {
        !x.is_zero() && exposant_decimal(x) < -((self.ech.chiffres / 2) as i64 + 1)
    }

    /// Échelle élargie pour un argument |x| < 1 : autant de chiffres que de zéros en tête.
    fn echelle_pour(&self, x: &BigRational) -> Echelle {
        let k = if x.is_zero() { 0 } else { exposant_decimal(x) };
        let marge = if k < 0 { k.unsigned_abs() as usize + 1 } else { 0 };
        Echelle::new(self.ech.chiffres + marge)
    }

    fn multiple_pi(&self, c: BigRational) -> Reel {
        if c.is_zero() {
            return Reel::zero();
        }
        Reel {
            val: &c * self.pi_rationnel(),
            forme: Forme::MultiplePi(c),
        }
    }

    /// ln d’un rationnel > 0 : ln(p) - ln(q), sur une échelle élargie près de 1.
    fn ln_rationnel(&self, q: &BigRational) -> BigRational {
        let d = q - BigRational::one();
        if d.is_zero() {
            return d;
        }
        if self.negligeable(&d) {
            return &d - &d * &d / rat(2);
        }
        let ech = self.echelle_pour(&d);
        let num = ech.depuis_entier(q.numer());
        let den = ech.depuis_entier(q.denom());
        ech.vers_rationnel(ech.ln(&num) - ech.ln(&den))
    }

    /// x^(1/n) pour x >= 0 : x = y·10^(n·m) avec y proche de 1, racine de y, puis ×10^m.
    fn racine_decalee(&self, x: &BigRational, n: u32) -> BigRational {
        if x.is_zero() {
            return BigRational::zero();
        }
        let m = exposant_decimal(x).div_euclid(n as i64);
        let y = decale(x, -(n as i64) * m);
        let r = self.ech.racine_n(&self.ech.depuis_rationnel(&y), n);
        decale(&self.ech.vers_rationnel(r), m)
    }

    /// Refuse toute magnitude >= 10^exposant_max.
    pub fn verifie_fini(&self, r: Reel) -> ResultatCalc<Reel> {
        let lim = self.limite() * r.val.denom();
        if r.val.numer().abs() >= lim {
            return Err(self.depassement());
        }
        Ok(r)
    }

    /// e^t avec garde de dépassement ; t < 0 via 1/e^|t| (précision relative conservée).
    fn exp_borne(&self, t: &BigRational) -> ResultatCalc<Reel> {
        let max = self.ln10_rationnel() * rat(i64::from(self.cfg.exposant_max));
        if *t >= max {
            return Err(self.depassement());
        }
        if *t <= -&max {
            return Ok(self.approche(BigRational::zero()));
        }
        let x = self.ech.depuis_rationnel(&t.abs());
        let y = self.ech.vers_rationnel(self.ech.exp(&x));
        let r = if t.is_negative() { y.recip() } else { y };
        self.verifie_fini(self.approche(r))
    }

    /* ------------------------ arithmétique ------------------------ */

    pub fn oppose(&self, a: &Reel) -> Reel {
        match &a.forme {
            Forme::Rationnel => Reel::rationnel(-&a.val),
            Forme::MultiplePi(c) => self.multiple_pi(-c),
            _ => Reel {
                val: -&a.val,
                forme: Forme::Approche,
            },
        }
    }

    pub fn ajoute(&self, a: &Reel, b: &Reel) -> ResultatCalc<Reel> {
        let r = match (&a.forme, &b.forme) {
            (Forme::Rationnel, Forme::Rationnel) => Reel::rationnel(&a.val + &b.val),
            (Forme::MultiplePi(c1), Forme::MultiplePi(c2)) => self.multiple_pi(c1 + c2),
            _ if a.est_zero_exact() => b.clone(),
            _ if b.est_zero_exact() => a.clone(),
            _ => self.approche(&a.val + &b.val),
        };
        self.verifie_fini(r)
    }

    pub fn soustrait(&self, a: &Reel, b: &Reel) -> ResultatCalc<Reel> {
        self.ajoute(a, &self.oppose(b))
    }

    pub fn multiplie(&self, a: &Reel, b: &Reel) -> ResultatCalc<Reel> {
        let r = match (&a.forme, &b.forme) {
            (Forme::Rationnel, Forme::Rationnel) => Reel::rationnel(&a.val * &b.val),
            (Forme::Rationnel, Forme::MultiplePi(c)) => self.multiple_pi(&a.val * c),
            (Forme::MultiplePi(c), Forme::Rationnel) => self.multiple_pi(c * &b.val),
            _ if a.est_zero_exact() || b.est_zero_exact() => Reel::zero(),
            _ if a.est_un_exact() => b.clone(),
            _ if b.est_un_exact() => a.clone(),
            _ => self.approche(&a.val * &b.val),
        };
        self.verifie_fini(r)
    }

    pub fn divise(&self, a: &Reel, b: &Reel) -> ResultatCalc<Reel> {
        if b.val.is_zero() {
            return Err(ErreurCalc::arithmetique("division par zéro"));
        }
        let r = match (&a.forme, &b.forme) {
            (Forme::Rationnel, Forme::Rationnel) => Reel::rationnel(&a.val / &b.val),
            (Forme::MultiplePi(c), Forme::Rationnel) => self.multiple_pi(c / &b.val),
            (Forme::MultiplePi(c1), Forme::MultiplePi(c2)) => Reel::rationnel(c1 / c2),
            _ if a.est_zero_exact() => Reel::zero(),
            _ if b.est_un_exact() => a.clone(),
            _ => self.approche(&a.val / &b.val),
        };
        self.verifie_fini(r)
    }

    /// a mod b = a - b·trunc(a/b) (signe du dividende).
    pub fn modulo(&self, a: &Reel, b: &Reel) -> ResultatCalc<Reel> {
        if b.val.is_zero() {
            return Err(ErreurCalc::arithmetique("modulo par zéro"));
        }
        let q = (&a.val / &b.val).trunc();
        let reste = &a.val - &b.val * q;
        if a.forme == Forme::Rationnel && b.forme == Forme::Rationnel {
            Ok(Reel::rationnel(reste))
        } else {
            Ok(self.approche(reste))
        }
    }

    /// x% = x/100
    pub fn pourcent(&self, a: &Reel) -> ResultatCalc<Reel> {
        self.divise(a, &Reel::entier(100))
    }

    pub fn factorielle(&self, a: &Reel) -> ResultatCalc<Reel> {
        let n = match a.entier_exact() {
            Some(n) if n.is_negative() => {
                return Err(ErreurCalc::domaine("factorielle d’un nombre négatif"))
            }
            Some(n) => n,
            None => {
                return Err(ErreurCalc::domaine(
                    "factorielle : argument entier positif requis",
                ))
            }
        };

        let plafond = self.cfg.plafond_factorielle;
        let n = match n.to_u32().filter(|n| *n <= plafond) {
            Some(n) => n,
            None => {
                warn!("factorielle refusée : {n}! dépasse le plafond {plafond}");
                return Err(ErreurCalc::domaine(format!(
                    "factorielle : argument supérieur au plafond ({plafond})"
                )));
            }
        };

        // produit interrompu dès que la limite de magnitude est franchie
        let limite = self.limite();
        let mut acc = BigInt::one();
        for k in 2..=n {
            acc *= BigInt::from(k);
            if &acc >= limite {
                warn!("factorielle interrompue à {k}! : dépassement");
                return Err(self.depassement());
            }
        }
        Ok(Reel::rationnel(BigRational::from_integer(acc)))
    }

    /* ------------------------ puissances / racines ------------------------ */

    pub fn puissance(&self, a: &Reel, b: &Reel) -> ResultatCalc<Reel> {
        if let Some(n) = b.entier_exact() {
            return self.puissance_entiere(a, n);
        }

        if a.val.is_zero() {
            return if b.val.is_positive() {
                Ok(Reel::zero())
            } else if b.val.is_zero() {
                Ok(Reel::entier(1))
            } else {
                Err(ErreurCalc::arithmetique(
                    "division par zéro (0 à une puissance négative)",
                ))
            };
        }
        if a.val.is_negative() {
            return Err(ErreurCalc::domaine(
                "puissance : base négative avec exposant non entier",
            ));
        }

        // exposant p/q exact : racine q-ième exacte si elle existe
        if let (Some(base), Some(expo)) = (a.rationnel_exact(), b.rationnel_exact()) {
            let q = expo.denom().to_u32().filter(|q| *q <= RACINE_EXACTE_MAX);
            if let Some(r) = q.and_then(|q| racine_exacte(base, q)) {
                return self.puissance_entiere(&Reel::rationnel(r), expo.numer());
            }
        }

        // a^b = exp(b·ln a)
        let ln_a = if a.forme == Forme::E {
            BigRational::one()
        } else {
            self.ln_rationnel(&a.val)
        };
        self.exp_borne(&(&b.val * ln_a))
    }

    fn puissance_entiere(&self, a: &Reel, n: &BigInt) -> ResultatCalc<Reel> {
        if n.is_zero() || a.est_un_exact() {
            return Ok(Reel::entier(1));
        }
        if a.val.is_zero() {
            return if n.is_negative() {
                Err(ErreurCalc::arithmetique(
                    "division par zéro (0 à une puissance négative)",
                ))
            } else {
                Ok(Reel::zero())
            };
        }

        // dépassement certain : n·log2|a| minoré au-delà de la limite
        let nb = a.val.numer().bits() as i64;
        let db = a.val.denom().bits() as i64;
        let minorant = if n.is_positive() { nb - 1 - db } else { db - 1 - nb };
        let lim_bits = BigInt::from(self.cfg.exposant_max as u64 * 3322 / 1000 + 1);
        let n_abs = n.abs();
        if minorant > 0 && &n_abs * BigInt::from(minorant) > lim_bits {
            return Err(self.depassement());
        }

        let cout = BigInt::from((nb + db) as u64) * &n_abs;
        let exact = cout <= BigInt::from(BUDGET_BITS_PUISSANCE);

        let r = match (exact, n_abs.to_u32()) {
            (true, Some(k)) => {
                let num = a.val.numer().pow(k);
                let den = a.val.denom().pow(k);
                let q = if n.is_negative() {
                    BigRational::new(den, num)
                } else {
                    BigRational::new(num, den)
                };
                match a.forme {
                    Forme::Rationnel => Reel::rationnel(q),
                    _ => self.approche(q),
                }
            }
            _ => {
                // trop coûteux en exact : exp(n·ln|a|), signe selon la parité
                let t = BigRational::from_integer(n.clone()) * self.ln_rationnel(&a.val.abs());
                let r = self.exp_borne(&t)?;
                let impair = (&n_abs % 2u32).is_one();
                if a.val.is_negative() && impair {
                    self.oppose(&r)
                } else {
                    r
                }
            }
        };
        self.verifie_fini(r)
    }

    pub fn racine_carree(&self, a: &Reel) -> ResultatCalc<Reel> {
        if a.val.is_negative() {
            return Err(ErreurCalc::domaine("racine carrée d’un nombre négatif"));
        }
        if let Some(r) = a.rationnel_exact().and_then(|q| racine_exacte(q, 2)) {
            return Ok(Reel::rationnel(r));
        }
        Ok(self.approche(self.racine_decalee(&a.val, 2)))
    }

    /// Racine n-ième : `degre`√`a`.
    pub fn racine_n(&self, degre: &Reel, a: &Reel) -> ResultatCalc<Reel> {
        if degre.val.is_zero() {
            return Err(ErreurCalc::domaine("racine d’indice nul"));
        }
        if a.val.is_negative() {
            return Err(ErreurCalc::domaine("racine d’un nombre négatif"));
        }

        let petit = degre
            .entier_exact()
            .and_then(|n| n.to_u32())
            .filter(|n| *n <= RACINE_EXACTE_MAX);
        match petit {
            Some(n) => {
                if let Some(r) = a.rationnel_exact().and_then(|q| racine_exacte(q, n)) {
                    return Ok(Reel::rationnel(r));
                }
                Ok(self.approche(self.racine_decalee(&a.val, n)))
            }
            None => {
                let inverse = self.divise(&Reel::entier(1), degre)?;
                self.puissance(a, &inverse)
            }
        }
    }

    /* ------------------------ logarithmes ------------------------ */

    pub fn ln(&self, a: &Reel) -> ResultatCalc<Reel> {
        if !a.val.is_positive() {
            return Err(ErreurCalc::domaine("ln : argument strictement positif requis"));
        }
        if a.forme == Forme::E {
            self.note("ln(e) = 1".to_string());
            return Ok(Reel::entier(1));
        }
        if a.est_un_exact() {
            return Ok(Reel::zero());
        }
        Ok(self.approche(self.ln_rationnel(&a.val)))
    }

    pub fn log10(&self, a: &Reel) -> ResultatCalc<Reel> {
        if !a.val.is_positive() {
            return Err(ErreurCalc::domaine("log : argument strictement positif requis"));
        }
        if let Some(k) = a.rationnel_exact().and_then(exposant_dix) {
            self.note(format!("log(10^{k}) = {k}"));
            return Ok(Reel::entier(k));
        }
        Ok(self.approche(self.ln_rationnel(&a.val) / self.ln10_rationnel()))
    }

    /* ------------------------ trigonométrie ------------------------ */

    /// Coefficient c si l’angle vaut exactement c·π (radians) ou c·180 (degrés).
    fn coeff_pi(&self, x: &Reel) -> Option<BigRational> {
        match (self.mode, &x.forme) {
            (_, Forme::Rationnel) if x.val.is_zero() => Some(BigRational::zero()),
            (ModeAngle::Radians, Forme::MultiplePi(c)) => Some(c.clone()),
            (ModeAngle::Degres, Forme::Rationnel) => Some(&x.val / rat(180)),
            _ => None,
        }
    }

    /// Angle en radians ramené dans [-π, π].
    ///
    /// Degrés et multiples de π : réduction exacte du coefficient modulo 2.
    /// Radians : réduction sur une échelle élargie des chiffres de la partie entière.
    fn angle_reduit(&self, x: &Reel) -> ResultatCalc<BigRational> {
        let coeff = match (self.mode, &x.forme) {
            (ModeAngle::Degres, _) => Some(&x.val / rat(180)),
            (ModeAngle::Radians, Forme::MultiplePi(c)) => Some(c.clone()),
            _ => None,
        };
        if let Some(c) = coeff {
            let mut c = mod_rationnel(&c, 2);
            if c > BigRational::one() {
                c -= rat(2);
            }
            return Ok(c * self.pi_rationnel());
        }

        if x.val.abs() <= rat(3) {
            return Ok(x.val.clone());
        }
        let k = exposant_decimal(&x.val);
        if k > REDUCTION_MAX {
            return Err(ErreurCalc::domaine(format!(
                "angle trop grand pour être réduit modulo 2π (> 10^{REDUCTION_MAX})"
            )));
        }
        let ech = Echelle::new(self.ech.chiffres + k.unsigned_abs() as usize + 1);
        let deux_pi = ech.pi() * 2u32;
        let t = ech.depuis_rationnel(&x.val);
        let tours = div_arrondi(&t, &deux_pi);
        Ok(ech.vers_rationnel(t - tours * deux_pi))
    }

    fn trig_direct(&self, x: &Reel, f: TrigFn) -> ResultatCalc<Reel> {
        if let Some(c) = self.coeff_pi(x) {
            match trig_special(&c, f) {
                Some(TrigOutcome::Valeur(v, preuve)) => {
                    self.note(preuve);
                    return Ok(Reel::rationnel(v));
                }
                Some(TrigOutcome::Indefini(preuve)) => {
                    self.note(preuve.clone());
                    return Err(ErreurCalc::domaine(preuve));
                }
                None => {}
            }
        }

        let r = self.angle_reduit(x)?;
        if r.is_zero() || self.negligeable(&r) {
            let v = match f {
                TrigFn::Cos => BigRational::one(),
                TrigFn::Sin | TrigFn::Tan => r,
            };
            return Ok(self.approche(v));
        }

        let ech = self.echelle_pour(&r);
        let pi = self.pi_pour(&ech);
        let t = ech.depuis_rationnel(&r);
        let v = match f {
            TrigFn::Sin => ech.sin(&t, &pi),
            TrigFn::Cos => ech.cos(&t, &pi),
            TrigFn::Tan => {
                let c = ech.cos(&t, &pi);
                let seuil = &ech.un / pow10(SEUIL_COS_TAN);
                if c.abs() < seuil {
                    return Err(ErreurCalc::domaine("tan : indéfinie (cos nul)"));
                }
                ech.div(&ech.sin(&t, &pi), &c)
            }
        };
        Ok(self.approche(ech.vers_rationnel(v)))
    }

    pub fn sin(&self, x: &Reel) -> ResultatCalc<Reel> {
        self.trig_direct(x, TrigFn::Sin)
    }

    pub fn cos(&self, x: &Reel) -> ResultatCalc<Reel> {
        self.trig_direct(x, TrigFn::Cos)
    }

    pub fn tan(&self, x: &Reel) -> ResultatCalc<Reel> {
        self.trig_direct(x, TrigFn::Tan)
    }

    /// Angle exact c·π rendu dans le mode courant.
    fn angle_exact(&self, c: BigRational) -> Reel {
        match self.mode {
            ModeAngle::Radians => self.multiple_pi(c),
            ModeAngle::Degres => Reel::rationnel(c * rat(180)),
        }
    }

    /// Angle en radians rendu dans le mode courant.
    fn angle_sortie(&self, rad: BigRational) -> Reel {
        match self.mode {
            ModeAngle::Radians => self.approche(rad),
            ModeAngle::Degres => self.approche(rad * rat(180) / self.pi_rationnel()),
        }
    }

    fn atan_rationnel(&self, v: &BigRational) -> BigRational {
        if v.is_zero() || self.negligeable(v) {
            return v.clone();
        }
        let ech = self.echelle_pour(v);
        let pi = self.pi_pour(&ech);
        ech.vers_rationnel(ech.atan(&ech.depuis_rationnel(v), &pi))
    }

    /// asin(v) = atan(v / √(1 - v²)) ; |v| = 1 -> ±π/2
    fn asin_rationnel(&self, v: &BigRational) -> BigRational {
        if v.is_zero() || self.negligeable(v) {
            return v.clone();
        }
        let ech = self.echelle_pour(v);
        let pi = self.pi_pour(&ech);
        let w = ech.depuis_rationnel(v);
        let reste = &ech.un - ech.mul(&w, &w);
        let rad = if reste.is_positive() {
            ech.atan(&ech.div(&w, &ech.sqrt(&reste)), &pi)
        } else {
            let demi = div_arrondi(&pi, &BigInt::from(2));
            if w.is_negative() {
                -demi
            } else {
                demi
            }
        };
        ech.vers_rationnel(rad)
    }

    fn trig_inverse(&self, x: &Reel, f: TrigInv) -> ResultatCalc<Reel> {
        let borne = matches!(f, TrigInv::Asin | TrigInv::Acos);
        if borne && x.val.abs() > BigRational::one() {
            return Err(ErreurCalc::domaine(format!(
                "{} : argument hors de [-1, 1]",
                f.nom()
            )));
        }

        if let Some((c, preuve)) = x.rationnel_exact().and_then(|q| trig_inverse_special(q, f)) {
            self.note(preuve);
            return Ok(self.angle_exact(c));
        }

        let rad = match f {
            TrigInv::Atan => self.atan_rationnel(&x.val),
            TrigInv::Asin => self.asin_rationnel(&x.val),
            TrigInv::Acos => self.pi_rationnel() / rat(2) - self.asin_rationnel(&x.val),
        };
        Ok(self.angle_sortie(rad))
    }

    pub fn asin(&self, x: &Reel) -> ResultatCalc<Reel> {
        self.trig_inverse(x, TrigInv::Asin)
    }

    pub fn acos(&self, x: &Reel) -> ResultatCalc<Reel> {
        self.trig_inverse(x, TrigInv::Acos)
    }

    pub fn atan(&self, x: &Reel) -> ResultatCalc<Reel> {
        self.trig_inverse(x, TrigInv::Atan)
    }
}
