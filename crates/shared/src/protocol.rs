pub const DEFAULT_BASE_URL: &str = "https://sb-film.skillbox.cc";

pub const PING_ROUTE: &str = "/ping";
pub const FILMS_ROUTE: &str = "/films";

/// Request header carrying the identity's email on `/films`.
pub const EMAIL_HEADER: &str = "email";
