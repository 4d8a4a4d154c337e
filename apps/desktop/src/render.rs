//! Terminal rendition of the film views.

use client_core::FilmView;
use shared::{
    domain::{Film, Identity},
    error::{ClassifiedError, NetworkFailureKind},
};

/// Strips control characters so service or user text cannot inject
/// terminal escape sequences.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

pub struct TerminalView;

impl FilmView for TerminalView {
    type Node = String;

    fn auth_form(&self, notice: Option<&ClassifiedError>) -> String {
        let mut out = String::from("== Sign in ==");
        if let Some(err) = notice {
            out.push_str(&format!("\n! {}", sanitize(err.message())));
        }
        out.push_str("\nEnter your name and email.");
        out
    }

    fn top_bar(&self, identity: &Identity) -> String {
        format!(
            "Filmoteka | {} <{}>",
            sanitize(identity.name()),
            sanitize(identity.email())
        )
    }

    fn films(&self, films: &[Film]) -> String {
        if films.is_empty() {
            return "The film list is empty for now".to_string();
        }
        films
            .iter()
            .map(|film| {
                let mark = if film.is_watched { 'x' } else { ' ' };
                format!("[{mark}] {} ({})", sanitize(&film.title), film.release_year)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn global_error(&self, message: &str) -> String {
        format!("Oops... something went wrong\n  {}", sanitize(message))
    }

    fn connectivity_error(&self, error: &ClassifiedError) -> String {
        let tag = match error.network_kind() {
            Some(NetworkFailureKind::Unreachable) => "network error",
            Some(NetworkFailureKind::Slow) => "slow network",
            None => "status",
        };
        format!("[{tag}] {}", sanitize(error.message()))
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
