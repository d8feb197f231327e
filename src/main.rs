// src/main.rs
//
// Calculatrice scientifique : point d’entrée terminal
// ---------------------------------------------------
// Une ligne = une expression. Commandes :
//   :deg / :rad   mode d’angle
//   :hist         afficher l’historique
//   :N            recharger l’entrée N de l’historique et la réévaluer
//   :efface       vider l’historique
//   :q            quitter
//
// Journalisation : RUST_LOG (défaut "info").
// Configuration  : fichier JSON désigné par CALCULATRICE_CONFIG (facultatif).

use std::io::{self, BufRead, Write};

use log::{info, warn};

use calculatrice_sci::app::AppCalc;
use calculatrice_sci::noyau::{ConfigCalcul, ModeAngle};

const VAR_CONFIG: &str = "CALCULATRICE_CONFIG";

fn charge_config() -> ConfigCalcul {
    let Ok(chemin) = std::env::var(VAR_CONFIG) else {
        return ConfigCalcul::default();
    };
    match std::fs::read_to_string(&chemin) {
        Ok(texte) => match ConfigCalcul::depuis_json(&texte) {
            Ok(cfg) => {
                info!("configuration chargée depuis {chemin}");
                cfg
            }
            Err(e) => {
                warn!("{chemin} : {e} ; configuration par défaut");
                ConfigCalcul::default()
            }
        },
        Err(e) => {
            warn!("lecture de {chemin} impossible : {e} ; configuration par défaut");
            ConfigCalcul::default()
        }
    }
}

fn invite(app: &AppCalc) -> &'static str {
    match app.mode_angle {
        ModeAngle::Radians => "rad> ",
        ModeAngle::Degres => "deg> ",
    }
}

fn affiche(app: &AppCalc, sortie: &mut impl Write) -> io::Result<()> {
    if !app.erreur.is_empty() {
        return writeln!(sortie, "  {}", app.erreur);
    }
    writeln!(sortie, "  = {}", app.resultat)?;
    if let Some(exact) = &app.demarche.exact {
        writeln!(sortie, "    (exact : {exact})")?;
    }
    Ok(())
}

/// Traite une commande `:xxx`. Renvoie false pour quitter.
fn commande(app: &mut AppCalc, cmd: &str, sortie: &mut impl Write) -> io::Result<bool> {
    match cmd {
        "q" | "quit" => return Ok(false),
        "deg" => app.mode_angle = ModeAngle::Degres,
        "rad" => app.mode_angle = ModeAngle::Radians,
        "efface" => app.efface_historique(),
        "hist" => {
            if app.historique.is_empty() {
                writeln!(sortie, "  (historique vide)")?;
            }
            for (i, item) in app.historique.items().iter().enumerate() {
                writeln!(sortie, "  {i:>3}  {}", item.ligne())?;
            }
        }
        autre => match autre.parse::<usize>() {
            Ok(i) if app.selectionne_historique(i) => {
                writeln!(sortie, "  {}", app.entree)?;
                app.evalue();
                affiche(app, sortie)?;
            }
            _ => writeln!(sortie, "  commande inconnue : :{autre}")?,
        },
    }
    Ok(true)
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut app = AppCalc::avec_config(charge_config());
    let stdin = io::stdin();
    let mut sortie = io::stdout();

    write!(sortie, "{}", invite(&app))?;
    sortie.flush()?;

    for ligne in stdin.lock().lines() {
        let ligne = ligne?;
        let ligne = ligne.trim();

        if let Some(cmd) = ligne.strip_prefix(':') {
            if !commande(&mut app, cmd.trim(), &mut sortie)? {
                break;
            }
        } else if !ligne.is_empty() {
            app.entree = ligne.to_string();
            app.evalue();
            affiche(&app, &mut sortie)?;
        }

        write!(sortie, "{}", invite(&app))?;
        sortie.flush()?;
    }
    Ok(())
}
