use shared::domain::Film;

#[derive(Debug, Clone)]
pub(crate) struct AppState {
    pub(crate) films: Vec<Film>,
}
