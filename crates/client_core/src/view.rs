use shared::{
    domain::{Film, Identity},
    error::ClassifiedError,
};

use crate::flow::FlowState;

/// Presentation collaborator. Implementations own all formatting and must
/// sanitize user-supplied text before display.
pub trait FilmView {
    type Node;

    fn auth_form(&self, notice: Option<&ClassifiedError>) -> Self::Node;
    fn top_bar(&self, identity: &Identity) -> Self::Node;
    fn films(&self, films: &[Film]) -> Self::Node;
    fn global_error(&self, message: &str) -> Self::Node;
    fn connectivity_error(&self, error: &ClassifiedError) -> Self::Node;
}

/// Nodes for the main area in the given state. `Loading` renders nothing.
pub fn render_state<V: FilmView>(
    view: &V,
    state: &FlowState,
    auth_notice: Option<&ClassifiedError>,
) -> Vec<V::Node> {
    match state {
        FlowState::ShowingAuth => vec![view.auth_form(auth_notice)],
        FlowState::Loading => Vec::new(),
        FlowState::ShowingFilms { identity, films } => {
            vec![view.top_bar(identity), view.films(films)]
        }
        FlowState::ShowingError { message } => vec![view.global_error(message)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Labels;

    impl FilmView for Labels {
        type Node = String;

        fn auth_form(&self, notice: Option<&ClassifiedError>) -> String {
            match notice {
                Some(err) => format!("auth({err})"),
                None => "auth".into(),
            }
        }

        fn top_bar(&self, identity: &Identity) -> String {
            format!("top({})", identity.email())
        }

        fn films(&self, films: &[Film]) -> String {
            format!("films({})", films.len())
        }

        fn global_error(&self, message: &str) -> String {
            format!("error({message})")
        }

        fn connectivity_error(&self, error: &ClassifiedError) -> String {
            format!("net({error})")
        }
    }

    #[test]
    fn renders_each_state() {
        let identity = Identity::new("Alice", "alice@example.com").expect("identity");
        let notice = ClassifiedError::auth_required();

        assert_eq!(
            render_state(&Labels, &FlowState::ShowingAuth, Some(&notice)),
            ["auth(invalid email)"]
        );
        assert!(render_state(&Labels, &FlowState::Loading, None).is_empty());
        assert_eq!(
            render_state(
                &Labels,
                &FlowState::ShowingFilms {
                    identity,
                    films: Vec::new()
                },
                None
            ),
            ["top(alice@example.com)", "films(0)"]
        );
        assert_eq!(
            render_state(
                &Labels,
                &FlowState::ShowingError {
                    message: "boom".into()
                },
                None
            ),
            ["error(boom)"]
        );
    }
}
