// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plain-text rendering of the account page.

use crate::models::{FormMode, UserProfile};
use crate::session::AccountSession;
use crate::time_utils::format_iso_date;
use std::fmt::Write;

const EMPTY_HISTORY: &str = "Aucun historique disponible.";

/// Render whichever view the session is in.
pub fn render(session: &AccountSession) -> String {
    match session.current_user() {
        Some(user) => render_account(user),
        None => render_login(session.form_mode(), session.email_input()),
    }
}

/// Login or registration form.
pub fn render_login(mode: FormMode, email: &str) -> String {
    let (title, submit, switch) = match mode {
        FormMode::Login => ("Connexion", "Se connecter", "Pas de compte ? Inscrivez-vous"),
        FormMode::Register => (
            "Inscription",
            "S'inscrire",
            "Déjà un compte ? Connectez-vous",
        ),
    };

    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", title);
    if !email.is_empty() {
        let _ = writeln!(out, "Email : {}", email);
    }
    let _ = writeln!(out, "[Entrée] {}", submit);
    let _ = writeln!(out, "[t] {}", switch);
    let _ = writeln!(out, "[q] Quitter");
    out
}

/// Account dashboard: balance, subscription and history.
pub fn render_account(user: &UserProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Mon compte ==  ({})", user.email);
    let _ = writeln!(out);
    let _ = writeln!(out, "Jetons disponibles : {}", user.tokens);
    let _ = writeln!(out, "[a] Acheter 50 jetons");
    let _ = writeln!(out);
    let _ = writeln!(out, "Abonnement actuel : {}", user.subscription);
    if !user.is_pro() {
        let _ = writeln!(out, "[p] Passer à Pro");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Historique d'activité");
    if user.history.is_empty() {
        let _ = writeln!(out, "  - {}", EMPTY_HISTORY);
    }
    for entry in &user.history {
        let _ = writeln!(
            out,
            "  - {} – {}",
            format_iso_date(entry.date),
            entry.action
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[d] Déconnexion  [q] Quitter");
    out
}
